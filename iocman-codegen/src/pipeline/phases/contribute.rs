//! Contribute phase - interpreter boilerplate plus every enabled module.

use eyre::{Result, bail};
use iocman_config::keys;
use iocman_core::{parse_condition, split_lines};

use crate::{
    modules::ModuleKind,
    pipeline::{GenerationContext, Phase},
};

/// Phase that fills the three phase buffers.
pub struct ContributePhase;

impl ContributePhase {
    fn push_preamble(ctx: &mut GenerationContext<'_>) {
        let bin = ctx.config.get(keys::IOC, keys::ioc::BIN);
        let ioc_path = ctx.env.container_ioc_path.trim_end_matches('/');
        let name = &ctx.paths.name;

        ctx.buffers
            .before_load
            .push_line(&format!("#!{ioc_path}/{bin}/bin/linux-x86_64/{bin}"))
            .push_blank()
            .push_line(&format!("cd {ioc_path}/{bin}/iocBoot/ioc{bin}"))
            .push_line("< envPaths")
            .push_blank()
            .push_line("cd \"${TOP}\"")
            .push_line(&format!("dbLoadDatabase \"dbd/{bin}.dbd\""))
            .push_line(&format!(
                "{}_registerRecordDeviceDriver pdbbase",
                bin.replace('-', "_")
            ))
            .push_blank();

        ctx.buffers
            .at_load
            .push_line(&format!("cd {}", ctx.paths.container_startup))
            .push_line(&format!("dbLoadTemplate \"db/{name}.substitutions\""));

        ctx.buffers
            .after_init
            .push_blank()
            .push_line("iocInit")
            .push_blank();
    }

    fn push_settings(ctx: &mut GenerationContext<'_>) {
        let env = ctx.config.get(keys::SETTING, keys::setting::EPICS_ENV);
        let buffer = &mut ctx.buffers.before_load;
        buffer.push_comment("settings");
        for (name, value) in split_lines(&env).filter_map(parse_condition) {
            buffer.push_line(&format!("epicsEnvSet(\"{name}\",\"{value}\")"));
        }
        buffer.push_blank();
    }

    fn push_report(ctx: &mut GenerationContext<'_>) {
        let report = format!(
            "{}/{}/{}.info",
            ctx.env.container_run_path.trim_end_matches('/'),
            ctx.env.log_dir,
            ctx.paths.name
        );

        ctx.buffers
            .after_init
            .push_comment("report info")
            .push_line(&format!("system \"touch {report}\""))
            .push_line(&format!("system \"echo \\#date > {report}\""))
            .push_line(&format!("date >> {report}"))
            .push_line(&format!("system \"echo >> {report}\""))
            .push_line(&format!("system \"echo \\#ip >> {report}\""))
            .push_line(&format!("system \"hostname -I >> {report}\""))
            .push_line(&format!("system \"echo >> {report}\""))
            .push_line(&format!("system \"echo \\#pv list >> {report}\""))
            .push_line(&format!("dbl >> {report}"))
            .push_line(&format!("system \"echo >> {report}\""))
            .push_blank();
    }
}

impl Phase for ContributePhase {
    fn name(&self) -> &'static str {
        "contribute"
    }

    fn run(&self, ctx: &mut GenerationContext<'_>) -> Result<()> {
        Self::push_preamble(ctx);
        Self::push_settings(ctx);

        for kind in ModuleKind::enabled(&ctx.config) {
            tracing::debug!(module = %kind, "contributing module");
            kind.contributor().contribute(ctx);
        }

        if ctx.config.is(keys::SETTING, keys::setting::REPORT_INFO, "true") {
            Self::push_report(ctx);
        }

        if ctx.has_errors() {
            bail!("module contributions failed with {} error(s)", ctx.error_count());
        }
        Ok(())
    }
}
