use super::Contributor;
use crate::pipeline::GenerationContext;

/// IOC health records.
pub struct DeviceStatus;

impl Contributor for DeviceStatus {
    fn contribute(&self, ctx: &mut GenerationContext<'_>) {
        let line = format!("dbLoadRecords(\"db/status_ioc.db\",\"IOC={}\")", ctx.paths.name);
        ctx.buffers.at_load.push_line(&line);
        ctx.copy_template("contribute", "db/status_ioc.db", ctx.paths.db.join("status_ioc.db"));
    }
}

/// Host health records.
pub struct HostStatus;

impl Contributor for HostStatus {
    fn contribute(&self, ctx: &mut GenerationContext<'_>) {
        let line = format!(
            "dbLoadRecords(\"db/status_OS.db\",\"HOST={}:docker\")",
            ctx.paths.name
        );
        ctx.buffers.at_load.push_line(&line);
        ctx.copy_template("contribute", "db/status_OS.db", ctx.paths.db.join("status_OS.db"));
    }
}
