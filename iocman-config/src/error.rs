use std::path::PathBuf;

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Result type for configuration operations (boxed to reduce size on stack)
pub type Result<T> = std::result::Result<T, Box<Error>>;

#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("'{path}' is not a project directory")]
    #[diagnostic(
        code(iocman::invalid_project),
        help("pass the path of an existing project directory")
    )]
    InvalidProject { path: PathBuf },

    #[error("config file '{path}' not found")]
    #[diagnostic(
        code(iocman::config_missing),
        help("run 'iocman create <name>' to create a new project")
    )]
    ConfigMissing { path: PathBuf },

    #[error("failed to read '{path}'")]
    #[diagnostic(code(iocman::io))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write '{path}': {reason}")]
    #[diagnostic(code(iocman::write))]
    Write { path: PathBuf, reason: String },

    #[error("failed to parse config file")]
    #[diagnostic(
        code(iocman::parse_error),
        help("every top-level table is a section, every value a string")
    )]
    Parse {
        #[source_code]
        src: NamedSource<String>,
        #[label("parse error here")]
        span: Option<SourceSpan>,
        #[source]
        source: toml::de::Error,
    },

    #[error("failed to serialize config")]
    #[diagnostic(code(iocman::serialize_error))]
    Serialize {
        #[source]
        source: toml::ser::Error,
    },

    #[error("failed to parse environment file '{path}'")]
    #[diagnostic(code(iocman::environment_error))]
    Environment {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

impl Error {
    /// Create a parse error from a toml error with source context
    pub fn parse(source: toml::de::Error, src: &str, filename: &str) -> Box<Self> {
        let span = source.span().map(SourceSpan::from);
        Box::new(Error::Parse {
            src: NamedSource::new(filename, src.to_string()),
            span,
            source,
        })
    }

    /// Create an I/O error for `path`
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Box<Self> {
        Box::new(Error::Io {
            path: path.into(),
            source,
        })
    }
}
