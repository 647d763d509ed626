//! Editable boilerplate for optional sections.

use std::{fmt, str::FromStr};

use eyre::{Result, bail, eyre};
use iocman_config::{ConfigStore, keys};

use crate::Project;

const PORT_CONFIG: &str = "drvAsynIPPortConfigure(\"L0\",\"192.168.0.23:4001\",0,0,0)
drvAsynSerialPortConfigure(\"L0\",\"/dev/tty.PL2303-000013FA\",0,0,0)";

const ASYN_OPTION: &str = "asynSetOption(\"L0\", -1, \"baud\", \"9600\")
asynSetOption(\"L0\", -1, \"bits\", \"8\")
asynSetOption(\"L0\", -1, \"parity\", \"none\")
asynSetOption(\"L0\", -1, \"stop\", \"1\")
asynSetOption(\"L0\", -1, \"clocal\", \"Y\")
asynSetOption(\"L0\", -1, \"crtscts\", \"Y\")";

const ASYN_LOAD: &str =
    "dbLoadRecords(\"db/asynRecord.db\",\"P=xxx,R=:asyn,PORT=xxx,ADDR=xxx,IMAX=xxx,OMAX=xxx\")";

/// Transport section a template can be added for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateKind {
    Asyn,
    Stream,
}

impl TemplateKind {
    pub fn section(self) -> &'static str {
        match self {
            TemplateKind::Asyn => keys::ASYN,
            TemplateKind::Stream => keys::STREAM,
        }
    }
}

impl fmt::Display for TemplateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.section().to_lowercase())
    }
}

impl FromStr for TemplateKind {
    type Err = eyre::Report;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "asyn" => Ok(TemplateKind::Asyn),
            "stream" => Ok(TemplateKind::Stream),
            other => Err(eyre!("unknown template \"{other}\", expected \"asyn\" or \"stream\"")),
        }
    }
}

fn seed_raw(config: &mut ConfigStore) {
    for option in [
        keys::raw::CMD_BEFORE_DBLOAD,
        keys::raw::CMD_AT_DBLOAD,
        keys::raw::CMD_AFTER_IOCINIT,
        keys::raw::FILE_COPY,
    ] {
        config.set(keys::RAW, option, "");
    }
}

impl Project {
    /// Add a transport section filled with example port settings.
    ///
    /// Also adds an empty `RAW` section when missing.
    pub fn add_module_template(&mut self, kind: TemplateKind) -> Result<()> {
        let section = kind.section();
        if self.config.has_section(section) {
            bail!("section \"{section}\" already exists");
        }

        self.config.update(|config| {
            if !config.has_section(keys::RAW) {
                seed_raw(config);
            }
            config.set(section, keys::port::PORT_CONFIG, PORT_CONFIG);
            config.set(section, keys::port::ASYN_OPTION, ASYN_OPTION);
            config.set(section, keys::port::LOAD, ASYN_LOAD);
            if kind == TemplateKind::Stream {
                config.set(section, keys::port::PROTOCOL_FILE, "");
            }
        })?;
        tracing::info!(project = %self.paths.name, template = %kind, "template added");
        Ok(())
    }

    /// Add an empty `RAW` section.
    pub fn add_raw_template(&mut self) -> Result<()> {
        if self.config.has_section(keys::RAW) {
            bail!("section \"{}\" already exists", keys::RAW);
        }
        self.config.update(seed_raw)?;
        Ok(())
    }
}
