//! Filesystem helpers used by project and generation code.
//!
//! All helpers are blocking and assume a single writer per project
//! directory.

use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
};

use eyre::{Result, WrapErr, eyre};
use walkdir::WalkDir;

use crate::FileMode;

/// Apply a permission mode to an existing file.
pub fn set_mode(path: &Path, mode: FileMode) -> Result<()> {
    #[cfg(unix)]
    let permissions = {
        use std::os::unix::fs::PermissionsExt;
        std::fs::Permissions::from_mode(mode.bits())
    };
    #[cfg(not(unix))]
    let permissions = {
        let mut permissions = std::fs::metadata(path)?.permissions();
        permissions.set_readonly(!mode.is_writable());
        permissions
    };

    std::fs::set_permissions(path, permissions)
        .wrap_err_with(|| format!("failed to set mode {} on '{}'", mode, path.display()))
}

/// Remove a file if present. Returns whether something was removed.
pub fn remove_file_if_exists(path: &Path) -> Result<bool> {
    if !path.exists() {
        return Ok(false);
    }
    // Read-only files cannot be removed on some platforms.
    #[cfg(not(unix))]
    set_mode(path, FileMode::ReadWrite)?;
    std::fs::remove_file(path)
        .wrap_err_with(|| format!("failed to remove '{}'", path.display()))?;
    Ok(true)
}

/// Recursively remove a directory if present. Returns whether something was removed.
pub fn remove_dir_if_exists(path: &Path) -> Result<bool> {
    if !path.is_dir() {
        return Ok(false);
    }
    std::fs::remove_dir_all(path)
        .wrap_err_with(|| format!("failed to remove directory '{}'", path.display()))?;
    tracing::debug!(path = %path.display(), "removed directory");
    Ok(true)
}

/// Create a directory and all of its parents.
pub fn make_dirs(path: &Path) -> Result<()> {
    std::fs::create_dir_all(path)
        .wrap_err_with(|| format!("failed to create directory '{}'", path.display()))
}

/// Copy a single file, replacing the destination and applying `mode`.
pub fn copy_file(src: &Path, dest: &Path, mode: FileMode) -> Result<()> {
    if !src.is_file() {
        return Err(eyre!("copy source '{}' does not exist", src.display()));
    }
    if let Some(parent) = dest.parent() {
        make_dirs(parent)?;
    }
    remove_file_if_exists(dest)?;
    std::fs::copy(src, dest).wrap_err_with(|| {
        format!("failed to copy '{}' to '{}'", src.display(), dest.display())
    })?;
    set_mode(dest, mode)?;
    tracing::debug!(src = %src.display(), dest = %dest.display(), %mode, "copied file");
    Ok(())
}

/// Mirror every file below `src` into `dst`, keeping relative paths.
pub fn mirror_dir(src: &Path, dst: &Path, mode: FileMode) -> Result<()> {
    if !src.is_dir() {
        return Err(eyre!("mirror source '{}' does not exist", src.display()));
    }
    make_dirs(dst)?;

    for entry in WalkDir::new(src).follow_links(false) {
        let entry = entry?;
        let rel = entry.path().strip_prefix(src)?;
        if rel.as_os_str().is_empty() {
            continue;
        }
        let out = dst.join(rel);

        if entry.file_type().is_dir() {
            make_dirs(&out)?;
        } else if entry.file_type().is_file() {
            copy_file(entry.path(), &out, mode)?;
        }
    }

    Ok(())
}

/// Names of the regular files directly inside `dir`, sorted.
pub fn list_files(dir: &Path) -> Result<Vec<String>> {
    let mut names = Vec::new();
    for entry in std::fs::read_dir(dir)
        .wrap_err_with(|| format!("failed to read directory '{}'", dir.display()))?
    {
        let entry = entry?;
        if entry.file_type()?.is_file() {
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
    }
    names.sort();
    Ok(names)
}

/// Byte-for-byte comparison of two files.
pub fn files_equal(a: &Path, b: &Path) -> Result<bool> {
    let left = std::fs::read(a).wrap_err_with(|| format!("failed to read '{}'", a.display()))?;
    let right = std::fs::read(b).wrap_err_with(|| format!("failed to read '{}'", b.display()))?;
    Ok(left == right)
}

/// Prior content of files about to be replaced, so a failed batch of
/// writes can be undone.
#[derive(Debug, Default)]
pub struct Backup {
    entries: Vec<(PathBuf, Option<Saved>)>,
}

#[derive(Debug)]
struct Saved {
    content: Vec<u8>,
    permissions: std::fs::Permissions,
}

impl Backup {
    /// Remember the current state of `path`. Only the first call per path
    /// counts.
    pub fn save(&mut self, path: &Path) -> Result<()> {
        if self.entries.iter().any(|(saved, _)| saved == path) {
            return Ok(());
        }
        let saved = if path.is_file() {
            let content = std::fs::read(path)
                .wrap_err_with(|| format!("failed to back up '{}'", path.display()))?;
            let permissions = std::fs::metadata(path)?.permissions();
            Some(Saved {
                content,
                permissions,
            })
        } else {
            None
        };
        self.entries.push((path.to_path_buf(), saved));
        Ok(())
    }

    /// Put every saved file back and remove files that did not exist.
    ///
    /// Keeps going after a failure and returns the first one.
    pub fn restore(self) -> Result<()> {
        let mut first_error = None;
        for (path, saved) in self.entries.into_iter().rev() {
            let restored = match saved {
                Some(saved) => remove_file_if_exists(&path).and_then(|_| {
                    std::fs::write(&path, &saved.content)
                        .and_then(|_| std::fs::set_permissions(&path, saved.permissions))
                        .wrap_err_with(|| format!("failed to restore '{}'", path.display()))
                }),
                None if path.is_file() => remove_file_if_exists(&path).map(|_| ()),
                None => Ok(()),
            };
            match restored {
                Ok(()) => tracing::debug!(path = %path.display(), "restored file"),
                Err(e) => {
                    tracing::error!("{e:#}");
                    first_error.get_or_insert(e);
                }
            }
        }
        first_error.map_or(Ok(()), Err)
    }
}

/// Result of comparing two directory trees.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirDiff {
    /// Files present on both sides with different content.
    pub changed: Vec<PathBuf>,
    /// Entries only present in the left tree (topmost entry only).
    pub left_only: Vec<PathBuf>,
    /// Entries only present in the right tree (topmost entry only).
    pub right_only: Vec<PathBuf>,
}

impl DirDiff {
    /// Whether both trees hold the same files with the same content.
    pub fn is_empty(&self) -> bool {
        self.changed.is_empty() && self.left_only.is_empty() && self.right_only.is_empty()
    }
}

/// Recursive three-way comparison of two directory trees.
pub fn compare_dirs(left: &Path, right: &Path) -> Result<DirDiff> {
    let left_entries = tree_entries(left)?;
    let right_entries = tree_entries(right)?;

    let mut diff = DirDiff::default();
    for (rel, is_dir) in &left_entries {
        match right_entries.get(rel) {
            Some(other_is_dir) if is_dir != other_is_dir => diff.changed.push(rel.clone()),
            Some(_) if *is_dir => {}
            Some(_) => {
                if !files_equal(&left.join(rel), &right.join(rel))? {
                    diff.changed.push(rel.clone());
                }
            }
            None => push_topmost(&mut diff.left_only, rel),
        }
    }
    for rel in right_entries.keys() {
        if !left_entries.contains_key(rel) {
            push_topmost(&mut diff.right_only, rel);
        }
    }

    Ok(diff)
}

fn push_topmost(list: &mut Vec<PathBuf>, rel: &Path) {
    if !list.iter().any(|reported| rel.starts_with(reported)) {
        list.push(rel.to_path_buf());
    }
}

/// Relative path → is-directory, ordered so parents precede children.
fn tree_entries(root: &Path) -> Result<BTreeMap<PathBuf, bool>> {
    let mut entries = BTreeMap::new();
    for entry in WalkDir::new(root).follow_links(false) {
        let entry = entry?;
        let rel = entry.path().strip_prefix(root)?;
        if rel.as_os_str().is_empty() {
            continue;
        }
        entries.insert(rel.to_path_buf(), entry.file_type().is_dir());
    }
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    fn write(path: &Path, content: &str) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    #[test]
    fn test_copy_file_replaces_read_only_destination() {
        let temp = TempDir::new().unwrap();
        let src = temp.path().join("a.db");
        let dest = temp.path().join("out").join("a.db");
        write(&src, "one");

        copy_file(&src, &dest, FileMode::ReadOnly).unwrap();
        write(&src, "two");
        copy_file(&src, &dest, FileMode::ReadOnly).unwrap();

        assert_eq!(fs::read_to_string(&dest).unwrap(), "two");
        assert!(fs::metadata(&dest).unwrap().permissions().readonly());
    }

    #[test]
    fn test_copy_file_missing_source() {
        let temp = TempDir::new().unwrap();
        let err = copy_file(
            &temp.path().join("missing.db"),
            &temp.path().join("x.db"),
            FileMode::ReadOnly,
        )
        .unwrap_err();
        assert!(err.to_string().contains("missing.db"));
    }

    #[test]
    fn test_mirror_and_compare_identical() {
        let temp = TempDir::new().unwrap();
        let src = temp.path().join("src");
        write(&src.join("a.db"), "record");
        write(&src.join("sub").join("b.proto"), "proto");

        let dst = temp.path().join("copy");
        mirror_dir(&src, &dst, FileMode::ReadOnly).unwrap();

        assert!(compare_dirs(&dst, &src).unwrap().is_empty());
    }

    #[test]
    fn test_compare_dirs_reports_three_ways() {
        let temp = TempDir::new().unwrap();
        let left = temp.path().join("left");
        let right = temp.path().join("right");
        write(&left.join("same.db"), "x");
        write(&right.join("same.db"), "x");
        write(&left.join("changed.db"), "old");
        write(&right.join("changed.db"), "new");
        write(&left.join("gone").join("deep.txt"), "x");
        write(&right.join("extra.proto"), "x");

        let diff = compare_dirs(&left, &right).unwrap();

        assert_eq!(diff.changed, vec![PathBuf::from("changed.db")]);
        assert_eq!(diff.left_only, vec![PathBuf::from("gone")]);
        assert_eq!(diff.right_only, vec![PathBuf::from("extra.proto")]);
    }

    #[test]
    fn test_list_files_skips_directories() {
        let temp = TempDir::new().unwrap();
        write(&temp.path().join("b.db"), "");
        write(&temp.path().join("a.db"), "");
        fs::create_dir(temp.path().join("dir")).unwrap();

        assert_eq!(list_files(temp.path()).unwrap(), vec!["a.db", "b.db"]);
    }

    #[test]
    fn test_backup_restores_replaced_and_new_files() {
        let temp = TempDir::new().unwrap();
        let src = temp.path().join("new.db");
        let kept = temp.path().join("out").join("kept.db");
        let added = temp.path().join("out").join("added.db");
        write(&src, "new");
        write(&kept, "old");
        set_mode(&kept, FileMode::ReadOnly).unwrap();

        let mut backup = Backup::default();
        backup.save(&kept).unwrap();
        backup.save(&added).unwrap();
        copy_file(&src, &kept, FileMode::ReadOnly).unwrap();
        copy_file(&src, &added, FileMode::ReadOnly).unwrap();
        backup.save(&kept).unwrap();

        backup.restore().unwrap();

        assert_eq!(fs::read_to_string(&kept).unwrap(), "old");
        assert!(fs::metadata(&kept).unwrap().permissions().readonly());
        assert!(!added.exists());
    }

    #[test]
    fn test_remove_dir_if_exists() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("gone");
        write(&dir.join("f.txt"), "x");

        assert!(remove_dir_if_exists(&dir).unwrap());
        assert!(!remove_dir_if_exists(&dir).unwrap());
    }
}
