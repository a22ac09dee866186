use crate::common::{TestEnv, args, buffer_to_string, capture_buffer, lock_env};
use osmium::process::builtin::Builtin;
use osmium::process::which::Which;
use std::env;
use std::fs;
use std::os::unix::fs::PermissionsExt;

fn install_tool(dir: &std::path::Path, name: &str) -> std::path::PathBuf {
    fs::create_dir_all(dir).unwrap();
    let tool = dir.join(name);
    fs::write(&tool, "#!/bin/sh\nexit 0\n").unwrap();
    fs::set_permissions(&tool, fs::Permissions::from_mode(0o755)).unwrap();
    tool
}

#[test]
fn which_reports_builtins() {
    let mut which = Which::new();
    let buffer = capture_buffer();
    which.capture_output_buffer(buffer.clone());

    assert_eq!(which.call(&args(&["cd"])), Some(0));
    assert_eq!(buffer_to_string(&buffer), "cd: shell built-in command\n");
}

#[test]
fn which_follows_path_order() {
    let _guard = lock_env();
    let mut env_state = TestEnv::new();
    let first = env_state.root().join("first");
    let second = env_state.root().join("second");
    let expected = install_tool(&first, "tool");
    install_tool(&second, "tool");
    let path = env::join_paths([&first, &second]).unwrap();
    env_state.set_var("PATH", path.to_str().unwrap());

    let mut which = Which::new();
    let buffer = capture_buffer();
    which.capture_output_buffer(buffer.clone());

    assert_eq!(which.call(&args(&["tool"])), Some(0));
    assert_eq!(buffer_to_string(&buffer).trim_end(), expected.to_str().unwrap());
}

#[test]
fn which_fails_for_unknown_commands() {
    let _guard = lock_env();
    let mut env_state = TestEnv::new();
    let empty = env_state.root();
    env_state.set_var("PATH", empty.to_str().unwrap());

    let mut which = Which::new();
    let buffer = capture_buffer();
    which.capture_output_buffer(buffer.clone());

    assert_eq!(which.call(&args(&["nonexistentcmd123"])), None);
    assert!(buffer.borrow().is_empty());
}
