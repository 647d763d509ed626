//! Reserved section and option names.

/// Primary section holding project metadata.
pub const IOC: &str = "IOC";
/// Managed source file lists.
pub const SRC: &str = "SRC";
/// Database load directives.
pub const DB: &str = "DB";
/// Generation settings.
pub const SETTING: &str = "SETTING";
/// Raw passthrough commands and file copies.
pub const RAW: &str = "RAW";
/// Serial/IP port transport.
pub const ASYN: &str = "ASYN";
/// Streaming protocol transport.
pub const STREAM: &str = "STREAM";

/// Options of the [`IOC`] section.
pub mod ioc {
    pub const NAME: &str = "name";
    pub const HOST: &str = "host";
    pub const IMAGE: &str = "image";
    pub const BIN: &str = "bin";
    pub const MODULE: &str = "module";
    pub const DESCRIPTION: &str = "description";
    pub const STATE: &str = "state";
    pub const STATE_INFO: &str = "state_info";
    pub const STATUS: &str = "status";
    pub const SNAPSHOT: &str = "snapshot";
    pub const IS_EXPORTED: &str = "is_exported";
}

/// Options of the [`SRC`] section.
pub mod src {
    pub const DB_FILE: &str = "db_file";
    pub const PROTOCOL_FILE: &str = "protocol_file";
    pub const OTHER_FILE: &str = "other_file";
}

/// Options of the [`DB`] section.
pub mod db {
    pub const LOAD: &str = "load";
}

/// Options of the [`SETTING`] section.
pub mod setting {
    pub const REPORT_INFO: &str = "report_info";
    pub const CAPUTLOG_JSON: &str = "caputlog_json";
    pub const EPICS_ENV: &str = "epics_env";
}

/// Options of the [`RAW`] section.
pub mod raw {
    pub const CMD_BEFORE_DBLOAD: &str = "cmd_before_dbload";
    pub const CMD_AT_DBLOAD: &str = "cmd_at_dbload";
    pub const CMD_AFTER_IOCINIT: &str = "cmd_after_iocinit";
    pub const FILE_COPY: &str = "file_copy";
}

/// Options shared by the [`ASYN`] and [`STREAM`] sections.
pub mod port {
    pub const PORT_CONFIG: &str = "port_config";
    pub const ASYN_OPTION: &str = "asyn_option";
    pub const LOAD: &str = "load";
    pub const PROTOCOL_FILE: &str = "protocol_file";
}

/// Project lifecycle status values stored in `IOC.status`.
pub mod status {
    pub const CREATED: &str = "created";
    pub const GENERATED: &str = "generated";
    pub const RESTORED: &str = "restored";
    pub const REMOVED: &str = "removed";
}

/// Snapshot record values stored in `IOC.snapshot`.
pub mod snapshot {
    pub const UNTRACKED: &str = "untracked";
    pub const TRACKED: &str = "tracked";
    pub const ERROR: &str = "error";
}

/// Project health values stored in `IOC.state`.
pub mod state {
    pub const NORMAL: &str = "normal";
    pub const WARNING: &str = "warning";
    pub const ERROR: &str = "error";
}
