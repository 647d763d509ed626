use iocman_config::keys;

use super::Contributor;
use crate::pipeline::GenerationContext;

const LOG_SERVER: &str = "127.0.0.1";
const LOG_PORT: u16 = 7004;

/// Access security and put logging.
pub struct AuditLog;

impl Contributor for AuditLog {
    fn contribute(&self, ctx: &mut GenerationContext<'_>) {
        let name = ctx.paths.name.clone();

        ctx.buffers
            .before_load
            .push_comment("caPutLog")
            .push_line(&format!(
                "asSetFilename(\"{}/{name}.acf\")",
                ctx.paths.container_settings
            ))
            .push_line(&format!("epicsEnvSet(\"EPICS_IOC_LOG_INET\",\"{LOG_SERVER}\")"))
            .push_line(&format!("iocLogPrefix(\"{name} \")"))
            .push_line("iocLogInit()")
            .push_blank();

        let init = if ctx.config.is(keys::SETTING, keys::setting::CAPUTLOG_JSON, "true") {
            "caPutJsonLogInit"
        } else {
            "caPutLogInit"
        };
        ctx.buffers
            .after_init
            .push_comment("caPutLog after iocInit")
            .push_line(&format!("{init} \"{LOG_SERVER}:{LOG_PORT}\" 0"))
            .push_blank();

        let dest = ctx.paths.settings.join(format!("{name}.acf"));
        ctx.copy_template("contribute", "template.acf", dest);
    }
}
