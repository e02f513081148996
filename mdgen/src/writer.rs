//! All-or-nothing file output.
//!
//! Content goes to a temporary file in the target directory which is then
//! renamed over the target, so a failed write never leaves a truncated file.

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use tempfile::NamedTempFile;

use crate::error::{DocumentError, Result};

/// Write `contents` to `path`.
///
/// With `overwrite == false` an existing file is reported as
/// [`DocumentError::AlreadyExists`] and left untouched, including one that
/// appears between the existence check and the final rename.
pub fn write_atomic(path: &Path, contents: &str, overwrite: bool) -> Result<()> {
    let existing = match fs::metadata(path) {
        Ok(meta) => Some(meta),
        Err(e) if e.kind() == io::ErrorKind::NotFound => None,
        Err(e) => return Err(DocumentError::io(path, e)),
    };
    if existing.is_some() && !overwrite {
        return Err(DocumentError::AlreadyExists(path.to_path_buf()));
    }
    if existing.as_ref().is_some_and(|meta| meta.is_dir()) {
        return Err(DocumentError::io(
            path,
            io::Error::other("target path is a directory"),
        ));
    }

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(dir).map_err(|e| DocumentError::io(path, e))?;
    tmp.write_all(contents.as_bytes())
        .and_then(|()| tmp.as_file().sync_all())
        .map_err(|e| DocumentError::io(path, e))?;

    // Temp files are created owner-only; match what a plain create would give.
    let permissions = match &existing {
        Some(meta) => Some(meta.permissions()),
        None => default_permissions(),
    };
    if let Some(permissions) = permissions {
        tmp.as_file()
            .set_permissions(permissions)
            .map_err(|e| DocumentError::io(path, e))?;
    }

    let persisted = if overwrite {
        tmp.persist(path)
    } else {
        tmp.persist_noclobber(path)
    };
    match persisted {
        Ok(_) => {
            log::info!("wrote {} bytes to {}", contents.len(), path.display());
            Ok(())
        }
        Err(e) if !overwrite && e.error.kind() == io::ErrorKind::AlreadyExists => {
            Err(DocumentError::AlreadyExists(path.to_path_buf()))
        }
        Err(e) => Err(DocumentError::io(path, e.error)),
    }
}

#[cfg(unix)]
fn default_permissions() -> Option<fs::Permissions> {
    use std::os::unix::fs::PermissionsExt;
    Some(fs::Permissions::from_mode(0o644))
}

#[cfg(not(unix))]
fn default_permissions() -> Option<fs::Permissions> {
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leftover_temp_files(dir: &Path, keep: &str) -> Vec<String> {
        fs::read_dir(dir)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .filter(|name| name != keep)
            .collect()
    }

    #[test]
    fn test_creates_new_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.md");
        write_atomic(&path, "# Hi\n", false).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "# Hi\n");
        assert!(leftover_temp_files(dir.path(), "out.md").is_empty());
    }

    #[test]
    fn test_refuses_existing_without_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.md");
        fs::write(&path, "original").unwrap();

        for _ in 0..2 {
            let err = write_atomic(&path, "new", false).unwrap_err();
            assert!(matches!(err, DocumentError::AlreadyExists(_)));
        }
        assert_eq!(fs::read_to_string(&path).unwrap(), "original");
        assert!(leftover_temp_files(dir.path(), "out.md").is_empty());
    }

    #[test]
    fn test_overwrites_when_allowed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.md");
        fs::write(&path, "original").unwrap();
        write_atomic(&path, "replaced", true).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "replaced");
    }

    #[test]
    fn test_missing_parent_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("out.md");
        let err = write_atomic(&path, "x", true).unwrap_err();
        assert!(matches!(err, DocumentError::Io { .. }));
        assert!(!path.exists());
    }

    #[test]
    fn test_directory_target_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = write_atomic(dir.path(), "x", true).unwrap_err();
        assert!(matches!(err, DocumentError::Io { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn test_new_file_is_world_readable() {
        use std::os::unix::fs::PermissionsExt;
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.md");
        write_atomic(&path, "x", false).unwrap();
        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o644);
    }
}
