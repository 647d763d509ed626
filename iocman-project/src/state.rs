//! Project health and its diagnostic history.

use std::{fmt, str::FromStr};

use eyre::eyre;
use iocman_codegen::Severity;
use iocman_config::{ConfigStore, keys};
use serde::Serialize;

/// Health of a project.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StateLevel {
    #[default]
    Normal,
    Warning,
    Error,
}

impl StateLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            StateLevel::Normal => keys::state::NORMAL,
            StateLevel::Warning => keys::state::WARNING,
            StateLevel::Error => keys::state::ERROR,
        }
    }
}

impl fmt::Display for StateLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StateLevel {
    type Err = eyre::Report;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "" | keys::state::NORMAL => Ok(StateLevel::Normal),
            keys::state::WARNING => Ok(StateLevel::Warning),
            keys::state::ERROR => Ok(StateLevel::Error),
            other => Err(eyre!("unknown project state \"{other}\"")),
        }
    }
}

/// Health level plus the append-only log explaining it.
///
/// Mirrored in `IOC.state` and `IOC.state_info` so restarts observe the
/// same state. `Error` is absorbing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProjectState {
    pub level: StateLevel,
    pub info: String,
}

impl ProjectState {
    /// Read the mirrored fields. An unreadable level counts as `Error`.
    pub fn from_store(store: &ConfigStore) -> Self {
        let raw = store.get(keys::IOC, keys::ioc::STATE);
        let level = raw.parse().unwrap_or_else(|e| {
            tracing::warn!("{e}, treating project as broken");
            StateLevel::Error
        });
        Self {
            level,
            info: store.get(keys::IOC, keys::ioc::STATE_INFO),
        }
    }

    /// Record a diagnostic.
    ///
    /// Errors always move the project to `Error`. Warnings move it to
    /// `Warning` unless it is already in `Error`. Info is not recorded.
    /// Returns whether anything changed.
    pub fn escalate(&mut self, severity: Severity, message: &str, hint: Option<&str>) -> bool {
        let level = match severity {
            Severity::Error => StateLevel::Error,
            Severity::Warning => StateLevel::Warning,
            Severity::Info => return false,
        };
        self.level = self.level.max(level);

        let mut entry = format!("[{level}] {message}");
        if let Some(hint) = hint {
            entry.push_str("\ninstruction: ");
            entry.push_str(hint);
        }
        if !self.info.is_empty() {
            self.info.push('\n');
        }
        self.info.push_str(&entry);
        true
    }

    /// Mirror into `store`. Does not persist.
    pub fn write_to(&self, store: &mut ConfigStore) {
        store.set(keys::IOC, keys::ioc::STATE, self.level.as_str());
        store.set(keys::IOC, keys::ioc::STATE_INFO, self.info.clone());
    }

    pub fn is_error(&self) -> bool {
        self.level == StateLevel::Error
    }
}
