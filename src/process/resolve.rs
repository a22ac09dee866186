//! Command name resolution against `PATH`.
//!
//! Only a bare name (no `/` anywhere) is searched for:
//!
//! * `./cmd` in the current directory is run as given
//! * `foo/bar` relative to the current directory is run as given
//! * `/usr/bin/wc` is run as given

use super::error::ResolveError;
use nix::errno::Errno;
use nix::unistd;
use std::env;
use std::ffi::{CStr, CString, OsStr};
use std::mem;
use std::os::unix::ffi::{OsStrExt, OsStringExt};
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use tracing::trace;

/// Something that can replace the current process image.
pub trait ImageReplacer {
    /// Replace the image with `path`, passing `argv`. Only returns on failure.
    fn replace(&mut self, path: &CStr, argv: &[CString]) -> Errno;
}

/// Replaces the image with `execv(2)`.
pub struct Execv;

impl ImageReplacer for Execv {
    fn replace(&mut self, path: &CStr, argv: &[CString]) -> Errno {
        match unistd::execv(path, argv) {
            Ok(never) => match never {},
            Err(errno) => errno,
        }
    }
}

/// A name with a `/` anywhere in it is executed verbatim.
pub fn needs_path_resolution(name: impl AsRef<OsStr>) -> bool {
    !name.as_ref().as_bytes().contains(&b'/')
}

/// Directories to search, in `PATH` order. Unset or empty yields nothing;
/// an empty component means the current directory.
pub fn search_dirs(path_env: Option<&OsStr>) -> Vec<PathBuf> {
    match path_env {
        Some(value) if !value.is_empty() => env::split_paths(value)
            .map(|dir| {
                if dir.as_os_str().is_empty() {
                    PathBuf::from(".")
                } else {
                    dir
                }
            })
            .collect(),
        _ => Vec::new(),
    }
}

/// Find where a command would be run from without running it.
pub fn lookup(name: &str, path_env: Option<&OsStr>) -> Option<PathBuf> {
    if !needs_path_resolution(name) {
        let path = PathBuf::from(name);
        return is_executable_file(&path).then_some(path);
    }

    search_dirs(path_env)
        .into_iter()
        .map(|dir| dir.join(name))
        .find(|candidate| is_executable_file(candidate))
}

fn is_executable_file(path: &Path) -> bool {
    path.metadata()
        .map(|meta| meta.is_file() && meta.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

/// Replace the process image with `argv[0]`, searching `path_env` if needed.
///
/// For every candidate directory element zero is swapped for the full path
/// for the attempt and swapped back afterwards; the other elements are never
/// touched. Returning at all means every attempt failed.
pub fn exec_resolved<R: ImageReplacer>(
    argv: &mut [CString],
    path_env: Option<&OsStr>,
    replacer: &mut R,
) -> ResolveError {
    let Some(first) = argv.first() else {
        return ResolveError::Empty;
    };
    let name = OsStr::from_bytes(first.to_bytes()).to_owned();

    if !needs_path_resolution(&name) {
        let path = first.clone();
        let errno = replacer.replace(&path, argv);
        return ResolveError::Exec {
            path: name.to_string_lossy().into_owned(),
            errno,
        };
    }

    for dir in search_dirs(path_env) {
        let candidate = match CString::new(dir.join(&name).into_os_string().into_vec()) {
            Ok(candidate) => candidate,
            Err(_) => continue,
        };

        let original = mem::replace(&mut argv[0], candidate);
        let errno = replacer.replace(&argv[0], argv);
        trace!(candidate = ?argv[0], %errno, "exec attempt failed");
        argv[0] = original;
    }

    ResolveError::NotFound(name.to_string_lossy().into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::os::unix::fs::PermissionsExt;

    /// Records every attempt and fails all of them.
    #[derive(Default)]
    struct Recorder {
        attempts: Vec<(CString, Vec<CString>)>,
    }

    impl ImageReplacer for Recorder {
        fn replace(&mut self, path: &CStr, argv: &[CString]) -> Errno {
            self.attempts.push((path.to_owned(), argv.to_vec()));
            Errno::ENOENT
        }
    }

    fn c_args(args: &[&str]) -> Vec<CString> {
        args.iter().map(|a| CString::new(*a).unwrap()).collect()
    }

    #[test]
    fn only_bare_names_need_resolution() {
        assert!(needs_path_resolution("ls"));
        assert!(!needs_path_resolution("./ls"));
        assert!(!needs_path_resolution("bin/ls"));
        assert!(!needs_path_resolution("/usr/bin/wc"));
        assert!(!needs_path_resolution("trailing/"));
    }

    #[test]
    fn search_dirs_follow_path_order() {
        let dirs = search_dirs(Some(OsStr::new("/opt/bin:/usr/bin:/bin")));
        assert_eq!(
            dirs,
            vec![
                PathBuf::from("/opt/bin"),
                PathBuf::from("/usr/bin"),
                PathBuf::from("/bin")
            ]
        );
    }

    #[test]
    fn unset_or_empty_path_has_no_dirs() {
        assert!(search_dirs(None).is_empty());
        assert!(search_dirs(Some(OsStr::new(""))).is_empty());
    }

    #[test]
    fn empty_component_means_current_dir() {
        let dirs = search_dirs(Some(OsStr::new("/bin::/usr/bin")));
        assert_eq!(dirs[1], PathBuf::from("."));
    }

    #[test]
    fn tries_each_dir_with_full_path_in_slot_zero() {
        let mut argv = c_args(&["tool", "-v", "file"]);
        let mut recorder = Recorder::default();

        let err = exec_resolved(&mut argv, Some(OsStr::new("/a:/b")), &mut recorder);

        assert!(matches!(err, ResolveError::NotFound(ref name) if name == "tool"));
        assert_eq!(recorder.attempts.len(), 2);
        assert_eq!(recorder.attempts[0].0.to_str().unwrap(), "/a/tool");
        assert_eq!(recorder.attempts[0].1, c_args(&["/a/tool", "-v", "file"]));
        assert_eq!(recorder.attempts[1].1, c_args(&["/b/tool", "-v", "file"]));
    }

    #[test]
    fn original_name_restored_after_failures() {
        let mut argv = c_args(&["tool", "x"]);
        let mut recorder = Recorder::default();

        exec_resolved(&mut argv, Some(OsStr::new("/a:/b:/c")), &mut recorder);

        assert_eq!(argv, c_args(&["tool", "x"]));
    }

    #[test]
    fn path_with_separator_is_tried_once_verbatim() {
        let mut argv = c_args(&["./tool", "x"]);
        let mut recorder = Recorder::default();

        let err = exec_resolved(&mut argv, Some(OsStr::new("/a:/b")), &mut recorder);

        assert!(matches!(err, ResolveError::Exec { ref path, .. } if path == "./tool"));
        assert_eq!(recorder.attempts.len(), 1);
        assert_eq!(recorder.attempts[0].0.to_str().unwrap(), "./tool");
    }

    #[test]
    fn no_path_means_not_found_without_attempts() {
        let mut argv = c_args(&["tool"]);
        let mut recorder = Recorder::default();

        let err = exec_resolved(&mut argv, None, &mut recorder);

        assert!(matches!(err, ResolveError::NotFound(_)));
        assert!(recorder.attempts.is_empty());
    }

    #[test]
    fn empty_argv_is_rejected() {
        let mut recorder = Recorder::default();
        assert!(matches!(
            exec_resolved(&mut [], None, &mut recorder),
            ResolveError::Empty
        ));
    }

    #[test]
    fn lookup_returns_first_executable_match() {
        let first = tempfile::tempdir().unwrap();
        let second = tempfile::tempdir().unwrap();
        for dir in [&first, &second] {
            let tool = dir.path().join("tool");
            fs::write(&tool, "#!/bin/sh\n").unwrap();
            fs::set_permissions(&tool, fs::Permissions::from_mode(0o755)).unwrap();
        }
        let plain = first.path().join("data");
        fs::write(&plain, "not a program").unwrap();

        let path = env::join_paths([first.path(), second.path()]).unwrap();
        assert_eq!(
            lookup("tool", Some(path.as_os_str())),
            Some(first.path().join("tool"))
        );
        assert_eq!(lookup("data", Some(path.as_os_str())), None);
    }
}
