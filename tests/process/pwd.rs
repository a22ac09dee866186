use crate::common::{
    TestEnv, args, assert_path_str_equal, buffer_to_string, capture_buffer, lock_env,
};
use osmium::process::builtin::Builtin;
use osmium::process::pwd::Pwd;

#[test]
fn pwd_prints_current_directory() {
    let _guard = lock_env();
    let env_state = TestEnv::new();
    env_state.set_current_dir(&env_state.root());

    let mut pwd = Pwd::new();
    let buffer = capture_buffer();
    pwd.capture_output_buffer(buffer.clone());

    assert_eq!(pwd.call(&[]), Some(0));
    assert_path_str_equal(buffer_to_string(&buffer).trim_end(), &env_state.root());
}

#[test]
fn pwd_rejects_operands() {
    let mut pwd = Pwd::new();
    let buffer = capture_buffer();
    pwd.capture_output_buffer(buffer.clone());

    assert_eq!(pwd.call(&args(&["extra"])), None);
    assert!(buffer.borrow().is_empty());
}
