use std::{
    fmt,
    io::Write,
    path::{Path, PathBuf},
    str::FromStr,
};

use eyre::{Result, WrapErr, eyre};
use tempfile::NamedTempFile;

use crate::fs::{remove_file_if_exists, set_mode};

/// Trait for types that represent a generated file
pub trait GeneratedFile {
    /// Get the file path relative to the base directory
    fn path(&self, base: &Path) -> PathBuf;

    /// Get the rules for writing this file
    fn rules(&self) -> FileRules;

    /// Render the file content
    fn render(&self) -> String;

    /// Write the file to disk, replacing any previous version
    fn write(&self, base: &Path) -> Result<WriteResult> {
        let path = self.path(base);
        let rules = self.rules();
        write_file(&path, &rules.apply_header(self.render()), rules.mode)
    }

    /// Write the content next to its destination without replacing it yet
    fn stage(&self, base: &Path) -> Result<StagedFile> {
        let rules = self.rules();
        StagedFile::new(self.path(base), &rules.apply_header(self.render()), rules.mode)
    }
}

/// Remove-then-write, then apply the permission mode.
fn write_file(path: &Path, content: &str, mode: FileMode) -> Result<WriteResult> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .wrap_err_with(|| format!("failed to create directory '{}'", parent.display()))?;
    }
    let replaced = remove_file_if_exists(path)?;
    std::fs::write(path, content)
        .wrap_err_with(|| format!("failed to write '{}'", path.display()))?;
    set_mode(path, mode)?;

    Ok(if replaced {
        WriteResult::Replaced
    } else {
        WriteResult::Written
    })
}

/// Content written to a temporary sibling of its destination.
///
/// Dropping it without [`StagedFile::commit`] removes the temporary file
/// and leaves the destination untouched.
pub struct StagedFile {
    temp: NamedTempFile,
    path: PathBuf,
}

impl StagedFile {
    pub fn new(path: PathBuf, content: &str, mode: FileMode) -> Result<Self> {
        let parent = path
            .parent()
            .ok_or_else(|| eyre!("'{}' has no parent directory", path.display()))?;
        std::fs::create_dir_all(parent)
            .wrap_err_with(|| format!("failed to create directory '{}'", parent.display()))?;

        let mut temp = NamedTempFile::new_in(parent)
            .wrap_err_with(|| format!("failed to stage '{}'", path.display()))?;
        temp.write_all(content.as_bytes())
            .and_then(|_| temp.flush())
            .wrap_err_with(|| format!("failed to stage '{}'", path.display()))?;
        set_mode(temp.path(), mode)?;

        Ok(Self { temp, path })
    }

    /// Final location of the file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Rename the staged content over the destination.
    pub fn commit(self) -> Result<WriteResult> {
        let replaced = self.path.exists();
        #[cfg(not(unix))]
        remove_file_if_exists(&self.path)?;
        self.temp
            .persist(&self.path)
            .wrap_err_with(|| format!("failed to write '{}'", self.path.display()))?;

        Ok(if replaced {
            WriteResult::Replaced
        } else {
            WriteResult::Written
        })
    }
}

/// Result of a write operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteResult {
    /// File was written, nothing existed before
    Written,
    /// A previous version was removed first
    Replaced,
}

/// A file to be written verbatim
pub struct File {
    path: PathBuf,
    content: String,
    rules: FileRules,
}

impl File {
    /// Create a new file with the given path and content (default rules: read-write, no header)
    pub fn new(path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
            rules: FileRules::default(),
        }
    }

    /// Override the permission mode applied after writing
    pub fn with_mode(mut self, mode: FileMode) -> Self {
        self.rules.mode = mode;
        self
    }

    /// Get the file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get the file content
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Check if the file exists
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Write the file according to its rules
    pub fn write(&self) -> Result<WriteResult> {
        write_file(
            &self.path,
            &self.rules.apply_header(self.content.clone()),
            self.rules.mode,
        )
    }
}

/// Rules that determine how a file should be written
#[derive(Debug, Clone)]
pub struct FileRules {
    pub mode: FileMode,
    pub header: Option<&'static str>,
}

impl FileRules {
    fn apply_header(&self, content: String) -> String {
        match self.header {
            Some(header) => format!("{}\n{}", header, content),
            None => content,
        }
    }
}

impl Default for FileRules {
    fn default() -> Self {
        Self {
            mode: FileMode::ReadWrite,
            header: None,
        }
    }
}

/// Permission mode applied to written or copied files.
///
/// Parsed from the short letter form used in copy directives: any
/// combination of `r`, `w` and `x`. Read permission is always granted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FileMode {
    /// 0444
    #[default]
    ReadOnly,
    /// 0644
    ReadWrite,
    /// 0555
    ReadExecute,
    /// 0755
    ReadWriteExecute,
}

impl FileMode {
    /// Unix permission bits for this mode.
    pub fn bits(self) -> u32 {
        match self {
            FileMode::ReadOnly => 0o444,
            FileMode::ReadWrite => 0o644,
            FileMode::ReadExecute => 0o555,
            FileMode::ReadWriteExecute => 0o755,
        }
    }

    /// Whether the owner may write the file.
    pub fn is_writable(self) -> bool {
        matches!(self, FileMode::ReadWrite | FileMode::ReadWriteExecute)
    }
}

impl FromStr for FileMode {
    type Err = eyre::Report;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim().to_lowercase();
        if s.is_empty() || !s.chars().all(|c| matches!(c, 'r' | 'w' | 'x')) {
            return Err(eyre!("invalid file mode '{}', expected letters from 'rwx'", s));
        }
        Ok(match (s.contains('w'), s.contains('x')) {
            (false, false) => FileMode::ReadOnly,
            (true, false) => FileMode::ReadWrite,
            (false, true) => FileMode::ReadExecute,
            (true, true) => FileMode::ReadWriteExecute,
        })
    }
}

impl fmt::Display for FileMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            FileMode::ReadOnly => "r",
            FileMode::ReadWrite => "rw",
            FileMode::ReadExecute => "rx",
            FileMode::ReadWriteExecute => "rwx",
        };
        f.write_str(s)
    }
}
