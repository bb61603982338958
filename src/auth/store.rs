//! Token file persistence

use crate::error::Result;
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

/// `<config dir>/journal-submit/token`
pub fn default_token_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("journal-submit").join("token"))
}

/// Read a token file; missing or empty files yield `None`
pub fn read_token(path: &Path) -> Result<Option<String>> {
    match fs::read_to_string(path) {
        Ok(contents) => {
            let token = contents.trim();
            Ok((!token.is_empty()).then(|| token.to_string()))
        }
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Write a token file, creating parent directories
///
/// On unix the file is created owner-only (0600) and an existing file is
/// tightened to 0600 before the token is written.
pub fn write_token(path: &Path, token: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);

    #[cfg(unix)]
    {
        use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};
        options.mode(0o600);
        if path.exists() {
            fs::set_permissions(path, fs::Permissions::from_mode(0o600))?;
        }
    }

    let mut file = options.open(path)?;
    writeln!(file, "{}", token.trim())?;
    Ok(())
}

/// Delete a token file; returns whether one existed
pub fn remove_token(path: &Path) -> Result<bool> {
    match fs::remove_file(path) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_write_read_remove() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("token");

        write_token(&path, "  abc123 ").unwrap();
        assert_eq!(read_token(&path).unwrap().as_deref(), Some("abc123"));

        assert!(remove_token(&path).unwrap());
        assert!(!remove_token(&path).unwrap());
        assert_eq!(read_token(&path).unwrap(), None);
    }

    #[test]
    fn test_empty_file_is_no_token() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("token");
        fs::write(&path, "\n").unwrap();
        assert_eq!(read_token(&path).unwrap(), None);
    }

    #[cfg(unix)]
    #[test]
    fn test_token_file_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let path = dir.path().join("token");
        write_token(&path, "abc123").unwrap();

        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[cfg(unix)]
    #[test]
    fn test_existing_token_file_is_tightened() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let path = dir.path().join("token");
        fs::write(&path, "old-token-that-is-longer\n").unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o644)).unwrap();

        write_token(&path, "new").unwrap();

        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
        assert_eq!(fs::read_to_string(&path).unwrap(), "new\n");
    }
}
