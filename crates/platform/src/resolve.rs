//! Executable resolution over the process search path

use std::env;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use tracing::debug;

/// Check whether a path points at an executable regular file.
#[cfg(unix)]
pub fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;

    match path.metadata() {
        Ok(meta) => meta.is_file() && meta.permissions().mode() & 0o111 != 0,
        Err(_) => false,
    }
}

#[cfg(windows)]
pub fn is_executable(path: &Path) -> bool {
    if !path.is_file() {
        return false;
    }
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());
    matches!(ext.as_deref(), Some("exe" | "bat" | "cmd" | "com"))
}

/// Search the process `PATH` for an executable with the given bare name.
///
/// Returns the first match in search-path order, or `None` if the name
/// does not resolve anywhere.
pub fn find_in_path(name: &str) -> Option<PathBuf> {
    find_in(name, env::var_os("PATH"))
}

fn find_in(name: &str, path_var: Option<OsString>) -> Option<PathBuf> {
    let path_var = path_var?;

    for dir in env::split_paths(&path_var) {
        if dir.as_os_str().is_empty() {
            continue;
        }
        for candidate in candidates(&dir, name) {
            if is_executable(&candidate) {
                debug!(name = %name, path = %candidate.display(), "resolved executable");
                return Some(candidate);
            }
        }
    }

    None
}

#[cfg(unix)]
fn candidates(dir: &Path, name: &str) -> Vec<PathBuf> {
    vec![dir.join(name)]
}

/// On Windows a bare name resolves through PATHEXT-style extensions.
#[cfg(windows)]
fn candidates(dir: &Path, name: &str) -> Vec<PathBuf> {
    if Path::new(name).extension().is_some() {
        return vec![dir.join(name)];
    }
    ["exe", "bat", "cmd", "com"]
        .iter()
        .map(|ext| dir.join(format!("{}.{}", name, ext)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[cfg(unix)]
    fn write_executable(dir: &Path, name: &str) -> PathBuf {
        use std::os::unix::fs::PermissionsExt;

        let path = dir.join(name);
        std::fs::write(&path, "#!/bin/sh\nexit 0\n").unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    #[test]
    #[cfg(unix)]
    fn test_find_in_custom_path() {
        let temp = TempDir::new().unwrap();
        let expected = write_executable(temp.path(), "faketool");

        let found = find_in("faketool", Some(temp.path().into()));
        assert_eq!(found, Some(expected));
    }

    #[test]
    #[cfg(unix)]
    fn test_find_respects_search_order() {
        let first = TempDir::new().unwrap();
        let second = TempDir::new().unwrap();
        let expected = write_executable(first.path(), "faketool");
        write_executable(second.path(), "faketool");

        let path_var = env::join_paths([first.path(), second.path()]).unwrap();
        let found = find_in("faketool", Some(path_var));
        assert_eq!(found, Some(expected));
    }

    #[test]
    #[cfg(unix)]
    fn test_non_executable_file_is_skipped() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("faketool"), "not a program").unwrap();

        let found = find_in("faketool", Some(temp.path().into()));
        assert_eq!(found, None);
    }

    #[test]
    fn test_missing_name_resolves_to_none() {
        let temp = TempDir::new().unwrap();
        let found = find_in("definitely-not-a-real-tool", Some(temp.path().into()));
        assert_eq!(found, None);
    }

    #[test]
    fn test_empty_path_var() {
        assert_eq!(find_in("sh", None), None);
    }
}
