//! Static asset copying.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::SiteError;

/// Replace `dst` with a recursive copy of `src`.
///
/// Any existing `dst` is removed first. Returns the destination path of every
/// copied file, in traversal order.
///
/// # Errors
///
/// Returns [`SiteError::SourceNotFound`] if `src` does not exist, or
/// [`SiteError::Io`] for the first failed filesystem operation.
pub fn copy_dir_recursive(src: &Path, dst: &Path) -> Result<Vec<PathBuf>, SiteError> {
    if !src.exists() {
        return Err(SiteError::SourceNotFound(src.to_path_buf()));
    }

    if dst.exists() {
        tracing::debug!(path = %dst.display(), "Removing existing directory");
        fs::remove_dir_all(dst).map_err(SiteError::io(dst))?;
    }

    let mut copied = Vec::new();
    copy_tree(src, dst, &mut copied)?;
    Ok(copied)
}

fn copy_tree(src: &Path, dst: &Path, copied: &mut Vec<PathBuf>) -> Result<(), SiteError> {
    fs::create_dir_all(dst).map_err(SiteError::io(dst))?;

    for entry in sorted_entries(src)? {
        let from = entry.path();
        let to = dst.join(entry.file_name());
        let is_dir = entry.file_type().map_err(SiteError::io(&from))?.is_dir();

        if is_dir {
            copy_tree(&from, &to, copied)?;
        } else {
            tracing::info!(source = %from.display(), destination = %to.display(), "Copying file");
            fs::copy(&from, &to).map_err(SiteError::io(&from))?;
            copied.push(to);
        }
    }
    Ok(())
}

/// Directory entries sorted by file name, so builds are reproducible.
pub(crate) fn sorted_entries(dir: &Path) -> Result<Vec<fs::DirEntry>, SiteError> {
    let mut entries = fs::read_dir(dir)
        .and_then(|entries| entries.collect::<Result<Vec<_>, _>>())
        .map_err(SiteError::io(dir))?;
    entries.sort_by_key(fs::DirEntry::file_name);
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_copy_nested_tree() {
        let tmp = tempfile::tempdir().unwrap();
        let src = tmp.path().join("static");
        fs::create_dir_all(src.join("images/icons")).unwrap();
        fs::write(src.join("index.css"), "body {}").unwrap();
        fs::write(src.join("images/logo.png"), [0u8, 1, 2]).unwrap();
        fs::write(src.join("images/icons/a.svg"), "<svg/>").unwrap();

        let dst = tmp.path().join("public");
        let copied = copy_dir_recursive(&src, &dst).unwrap();

        assert_eq!(
            copied,
            vec![
                dst.join("images/icons/a.svg"),
                dst.join("images/logo.png"),
                dst.join("index.css"),
            ]
        );
        assert_eq!(fs::read_to_string(dst.join("index.css")).unwrap(), "body {}");
        assert_eq!(fs::read(dst.join("images/logo.png")).unwrap(), vec![0u8, 1, 2]);
    }

    #[test]
    fn test_copy_replaces_existing_destination() {
        let tmp = tempfile::tempdir().unwrap();
        let src = tmp.path().join("static");
        fs::create_dir_all(&src).unwrap();
        fs::write(src.join("new.txt"), "new").unwrap();

        let dst = tmp.path().join("public");
        fs::create_dir_all(dst.join("stale")).unwrap();
        fs::write(dst.join("stale/old.txt"), "old").unwrap();

        copy_dir_recursive(&src, &dst).unwrap();

        assert!(dst.join("new.txt").exists());
        assert!(!dst.join("stale").exists());
    }

    #[test]
    fn test_copy_empty_source() {
        let tmp = tempfile::tempdir().unwrap();
        let src = tmp.path().join("static");
        fs::create_dir_all(&src).unwrap();

        let dst = tmp.path().join("out/public");
        let copied = copy_dir_recursive(&src, &dst).unwrap();

        assert!(copied.is_empty());
        assert!(dst.is_dir());
    }

    #[test]
    fn test_copy_missing_source() {
        let tmp = tempfile::tempdir().unwrap();
        let src = tmp.path().join("nope");
        let dst = tmp.path().join("public");
        fs::create_dir_all(&dst).unwrap();

        let err = copy_dir_recursive(&src, &dst).unwrap_err();

        assert!(matches!(err, SiteError::SourceNotFound(ref p) if *p == src));
        // Destination is left alone when the source is missing.
        assert!(dst.exists());
    }
}
