use crate::common::{
    TestEnv, args, assert_path_str_equal, buffer_to_string, canonical_path, capture_buffer,
    lock_env,
};
use osmium::process::builtin::Builtin;
use osmium::process::cd::Cd;
use std::env;
use std::fs;

fn capturing_cd() -> (Cd, std::rc::Rc<std::cell::RefCell<Vec<u8>>>) {
    let mut cd = Cd::new();
    let buffer = capture_buffer();
    cd.capture_output_buffer(buffer.clone());
    (cd, buffer)
}

#[test]
fn cd_changes_directory_and_prints_it() {
    let _guard = lock_env();
    let env_state = TestEnv::new();
    let target = env_state.root().join("project");
    fs::create_dir_all(&target).unwrap();
    env_state.set_current_dir(&env_state.root());

    let (mut cd, buffer) = capturing_cd();
    assert_eq!(cd.call(&args(&["project"])), Some(0));
    assert_eq!(canonical_path(&env::current_dir().unwrap()), canonical_path(&target));
    assert_path_str_equal(buffer_to_string(&buffer).trim_end(), &target);
}

#[test]
fn cd_uses_home_when_no_operands() {
    let _guard = lock_env();
    let mut env_state = TestEnv::new();
    let home = env_state.root().join("home");
    fs::create_dir_all(&home).unwrap();
    env_state.set_var("HOME", home.to_str().unwrap());
    env_state.set_current_dir(&env_state.root());

    let (mut cd, _buffer) = capturing_cd();
    assert_eq!(cd.call(&[]), Some(0));
    assert_eq!(canonical_path(&env::current_dir().unwrap()), canonical_path(&home));
}

#[test]
fn cd_without_home_fails() {
    let _guard = lock_env();
    let mut env_state = TestEnv::new();
    env_state.remove_var("HOME");
    let before = env::current_dir().unwrap();

    let (mut cd, buffer) = capturing_cd();
    assert_eq!(cd.call(&[]), None);
    assert_eq!(env::current_dir().unwrap(), before);
    assert!(buffer.borrow().is_empty());
}

#[test]
fn cd_to_missing_directory_fails_and_stays_put() {
    let _guard = lock_env();
    let env_state = TestEnv::new();
    env_state.set_current_dir(&env_state.root());
    let before = env::current_dir().unwrap();

    let (mut cd, buffer) = capturing_cd();
    assert_eq!(cd.call(&args(&["does-not-exist"])), None);
    assert_eq!(env::current_dir().unwrap(), before);
    assert!(buffer.borrow().is_empty());
}
