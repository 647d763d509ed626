use std::path::{Component, Path, PathBuf};

use iocman_core::FileMode;

use super::DirectiveError;

/// Where the source of a copy directive lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyRoot {
    /// The project's managed `src/` directory.
    Source,
    /// The shared template area.
    Template,
}

impl CopyRoot {
    fn prefix(self) -> &'static str {
        match self {
            CopyRoot::Source => "src/",
            CopyRoot::Template => "template/",
        }
    }
}

/// One line of `RAW.file_copy`: `source:dest[:mode]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopyDirective {
    pub root: CopyRoot,
    /// Source path below [`CopyDirective::root`].
    pub source: PathBuf,
    /// Destination below the runtime directory.
    pub dest: PathBuf,
    pub mode: FileMode,
}

impl CopyDirective {
    pub fn parse(item: &str) -> Result<Self, DirectiveError> {
        let parts: Vec<&str> = item.split(':').map(str::trim).collect();
        let (source, dest, mode) = match parts.as_slice() {
            [source, dest] => (*source, *dest, None),
            [source, dest, mode] => (*source, *dest, Some(*mode)),
            _ => return Err(DirectiveError::BadCopyShape),
        };

        let (root, rest) = [CopyRoot::Source, CopyRoot::Template]
            .into_iter()
            .find_map(|root| source.strip_prefix(root.prefix()).map(|rest| (root, rest)))
            .ok_or_else(|| DirectiveError::UnknownRoot(source.to_string()))?;
        if rest.is_empty() {
            return Err(DirectiveError::UnknownRoot(source.to_string()));
        }
        if !stays_inside(Path::new(rest)) {
            return Err(DirectiveError::EscapingSource(source.to_string()));
        }

        if dest.is_empty() || !stays_inside(Path::new(dest)) {
            return Err(DirectiveError::EscapingDestination(dest.to_string()));
        }

        let mode = match mode {
            Some(mode) => mode
                .parse::<FileMode>()
                .map_err(|_| DirectiveError::BadMode(mode.to_string()))?,
            None => FileMode::ReadOnly,
        };

        Ok(Self {
            root,
            source: PathBuf::from(rest),
            dest: PathBuf::from(dest),
            mode,
        })
    }
}

fn stays_inside(path: &Path) -> bool {
    path.components().all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
}
