//! Mini-languages embedded in configuration values.

mod copy;
mod load;

pub use copy::{CopyDirective, CopyRoot};
pub use load::LoadDirective;

/// Why a directive line was rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DirectiveError {
    #[error("no file name given")]
    MissingFile,
    #[error("bad condition '{0}', expected 'key=value'")]
    BadCondition(String),
    #[error("expected 'source:dest[:mode]'")]
    BadCopyShape,
    #[error("source '{0}' must start with 'src/' or 'template/'")]
    UnknownRoot(String),
    #[error("source '{0}' must stay inside its root directory")]
    EscapingSource(String),
    #[error("destination '{0}' must stay inside the runtime directory")]
    EscapingDestination(String),
    #[error("invalid mode '{0}', expected letters from 'rwx'")]
    BadMode(String),
}
