use once_cell::sync::Lazy;
use std::cell::RefCell;
use std::collections::HashMap;
use std::env;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::sync::{Mutex, MutexGuard};
use tempfile::TempDir;

static ENV_LOCK: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));

/// Serialize tests that touch the working directory or environment.
pub fn lock_env<'a>() -> MutexGuard<'a, ()> {
    match ENV_LOCK.lock() {
        Ok(guard) => guard,
        Err(poison) => poison.into_inner(),
    }
}

/// Temporary directory plus a record of process state to put back on drop.
pub struct TestEnv {
    temp_dir: TempDir,
    original_dir: PathBuf,
    saved_env: HashMap<&'static str, Option<String>>,
}

impl TestEnv {
    pub fn new() -> Self {
        Self {
            temp_dir: tempfile::tempdir().unwrap(),
            original_dir: env::current_dir().unwrap(),
            saved_env: HashMap::new(),
        }
    }

    pub fn root(&self) -> PathBuf {
        self.temp_dir.path().to_path_buf()
    }

    fn save_var(&mut self, key: &'static str) {
        self.saved_env.entry(key).or_insert_with(|| env::var(key).ok());
    }

    pub fn set_var(&mut self, key: &'static str, value: impl AsRef<str>) {
        self.save_var(key);
        unsafe {
            env::set_var(key, value.as_ref());
        }
    }

    pub fn remove_var(&mut self, key: &'static str) {
        self.save_var(key);
        unsafe {
            env::remove_var(key);
        }
    }

    pub fn set_current_dir(&self, path: &Path) {
        env::set_current_dir(path).unwrap();
    }
}

impl Drop for TestEnv {
    fn drop(&mut self) {
        env::set_current_dir(&self.original_dir).ok();
        for (key, value) in &self.saved_env {
            if let Some(val) = value {
                unsafe {
                    env::set_var(key, val);
                }
            } else {
                unsafe {
                    env::remove_var(key);
                }
            }
        }
    }
}

pub fn args(tokens: &[&str]) -> Vec<String> {
    tokens.iter().map(|s| s.to_string()).collect()
}

pub fn capture_buffer() -> Rc<RefCell<Vec<u8>>> {
    Rc::new(RefCell::new(Vec::new()))
}

pub fn buffer_to_string(buffer: &Rc<RefCell<Vec<u8>>>) -> String {
    String::from_utf8(buffer.borrow().clone()).unwrap()
}

pub fn canonical_path(path: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| path.to_path_buf())
}

pub fn assert_path_str_equal(lhs: &str, rhs: &Path) {
    assert_eq!(canonical_path(Path::new(lhs)), canonical_path(rhs));
}
