//! Feature modules contributing to the startup script.
//!
//! Each [`ModuleKind`] has one [`Contributor`]. Contributors only append
//! lines to the phase buffers and schedule file actions; nothing touches
//! the filesystem until the emit phase.

mod audit_log;
mod autosave;
mod raw;
mod status;
mod transport;

use std::fmt;

use iocman_config::{ConfigStore, keys};
use iocman_core::split_list;

use crate::pipeline::GenerationContext;

/// A module's contribution to the startup script.
pub trait Contributor: Send + Sync {
    /// Append lines and schedule file actions for this module.
    fn contribute(&self, ctx: &mut GenerationContext<'_>);
}

/// The closed set of modules, in dispatch order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModuleKind {
    /// Periodic state save and restore.
    Autosave,
    /// Channel access put logging.
    AuditLog,
    /// IOC health records.
    DeviceStatus,
    /// Host health records.
    HostStatus,
    /// Serial/IP port transport, enabled by the `ASYN` section.
    SerialTransport,
    /// Protocol driven devices, enabled by the `STREAM` section.
    StreamingProtocol,
    /// Verbatim commands and file copies, enabled by the `RAW` section.
    Raw,
}

impl ModuleKind {
    pub const ALL: [ModuleKind; 7] = [
        ModuleKind::Autosave,
        ModuleKind::AuditLog,
        ModuleKind::DeviceStatus,
        ModuleKind::HostStatus,
        ModuleKind::SerialTransport,
        ModuleKind::StreamingProtocol,
        ModuleKind::Raw,
    ];

    /// Enablement token in `IOC.module`, for token gated modules.
    pub fn token(self) -> Option<&'static str> {
        match self {
            ModuleKind::Autosave => Some("autosave"),
            ModuleKind::AuditLog => Some("caputlog"),
            ModuleKind::DeviceStatus => Some("status-ioc"),
            ModuleKind::HostStatus => Some("status-os"),
            _ => None,
        }
    }

    /// Configuration section, for section gated modules.
    pub fn section(self) -> Option<&'static str> {
        match self {
            ModuleKind::SerialTransport => Some(keys::ASYN),
            ModuleKind::StreamingProtocol => Some(keys::STREAM),
            ModuleKind::Raw => Some(keys::RAW),
            _ => None,
        }
    }

    /// Every recognized enablement token.
    pub fn tokens() -> impl Iterator<Item = &'static str> {
        Self::ALL.into_iter().filter_map(Self::token)
    }

    /// Module enabled by `token`, compared case-insensitively.
    pub fn from_token(token: &str) -> Option<Self> {
        let token = token.trim();
        Self::ALL
            .into_iter()
            .find(|kind| kind.token().is_some_and(|t| t.eq_ignore_ascii_case(token)))
    }

    pub fn is_enabled(self, config: &ConfigStore) -> bool {
        if let Some(section) = self.section() {
            return config.has_section(section);
        }
        let module = config.get(keys::IOC, keys::ioc::MODULE);
        split_list(&module)
            .into_iter()
            .any(|token| Self::from_token(token) == Some(self))
    }

    /// Enabled modules in dispatch order.
    pub fn enabled(config: &ConfigStore) -> Vec<ModuleKind> {
        Self::ALL
            .into_iter()
            .filter(|kind| kind.is_enabled(config))
            .collect()
    }

    pub fn contributor(self) -> &'static dyn Contributor {
        match self {
            ModuleKind::Autosave => &autosave::Autosave,
            ModuleKind::AuditLog => &audit_log::AuditLog,
            ModuleKind::DeviceStatus => &status::DeviceStatus,
            ModuleKind::HostStatus => &status::HostStatus,
            ModuleKind::SerialTransport => &transport::SerialTransport,
            ModuleKind::StreamingProtocol => &transport::StreamingProtocol,
            ModuleKind::Raw => &raw::Raw,
        }
    }
}

impl fmt::Display for ModuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.token(), self.section()) {
            (Some(token), _) => f.write_str(token),
            (None, Some(section)) => write!(f, "[{section}]"),
            (None, None) => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(module: &str) -> ConfigStore {
        let mut config = ConfigStore::new("ioc.toml");
        config.set(keys::IOC, keys::ioc::MODULE, module);
        config
    }

    #[test]
    fn test_token_match_is_exact() {
        let config = config("status-ioc");

        assert!(ModuleKind::DeviceStatus.is_enabled(&config));
        assert!(!ModuleKind::HostStatus.is_enabled(&config));
        assert!(!ModuleKind::Autosave.is_enabled(&config));
    }

    #[test]
    fn test_sections_enable_transport_modules() {
        let mut config = config("autosave");
        config.add_section("stream");
        config.add_section(keys::RAW);

        assert_eq!(
            ModuleKind::enabled(&config),
            vec![ModuleKind::Autosave, ModuleKind::StreamingProtocol, ModuleKind::Raw]
        );
    }

    #[test]
    fn test_from_token() {
        assert_eq!(ModuleKind::from_token(" CaPutLog "), Some(ModuleKind::AuditLog));
        assert_eq!(ModuleKind::from_token("asyn"), None);
        assert_eq!(
            ModuleKind::tokens().collect::<Vec<_>>(),
            vec!["autosave", "caputlog", "status-ioc", "status-os"]
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(ModuleKind::HostStatus.to_string(), "status-os");
        assert_eq!(ModuleKind::SerialTransport.to_string(), "[ASYN]");
    }
}
