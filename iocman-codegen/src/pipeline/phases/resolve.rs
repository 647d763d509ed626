//! Resolve phase - fills in defaults for mandatory settings.

use eyre::{Result, bail};
use iocman_config::keys;

use crate::pipeline::{Diagnostic, GenerationContext, Phase};

/// Phase that resolves an empty `IOC.bin` or `IOC.module`.
///
/// Defaults come from the environment and are applied when forced or
/// confirmed by the operator. An unresolved executable aborts the run;
/// without modules generation continues.
pub struct ResolvePhase;

impl ResolvePhase {
    fn accept_default(ctx: &GenerationContext<'_>, prompt: &str) -> bool {
        ctx.options.force_default || ctx.confirm.confirm(prompt)
    }
}

impl Phase for ResolvePhase {
    fn name(&self) -> &'static str {
        "resolve"
    }

    fn run(&self, ctx: &mut GenerationContext<'_>) -> Result<()> {
        if ctx.config.get(keys::IOC, keys::ioc::BIN).trim().is_empty() {
            let default = ctx.env.default_ioc.clone();
            let prompt =
                format!("Executable IOC not defined. Use default \"{default}\" to continue?");
            if !Self::accept_default(ctx, &prompt) {
                ctx.add_diagnostic(
                    Diagnostic::error(self.name(), "no executable IOC specified")
                        .at("IOC.bin")
                        .hint(format!("set IOC.bin or accept the default \"{default}\"")),
                );
                bail!("no executable IOC specified");
            }
            ctx.add_diagnostic(Diagnostic::info(
                self.name(),
                format!("executable IOC set to default \"{default}\""),
            ));
            ctx.config.set(keys::IOC, keys::ioc::BIN, default);
        }

        if ctx.config.get(keys::IOC, keys::ioc::MODULE).trim().is_empty() {
            let default = ctx.env.default_modules.clone();
            let prompt = format!(
                "Modules to be installed not defined. Use default \"{default}\" to continue?"
            );
            if Self::accept_default(ctx, &prompt) {
                ctx.add_diagnostic(Diagnostic::info(
                    self.name(),
                    format!("modules set to default \"{default}\""),
                ));
                ctx.config.set(keys::IOC, keys::ioc::MODULE, default);
            } else {
                ctx.add_diagnostic(Diagnostic::info(self.name(), "no module will be installed"));
            }
        }

        let needs_raw = ctx.config.has_section(keys::ASYN) || ctx.config.has_section(keys::STREAM);
        if needs_raw && !ctx.config.has_section(keys::RAW) {
            for option in [
                keys::raw::CMD_BEFORE_DBLOAD,
                keys::raw::CMD_AT_DBLOAD,
                keys::raw::CMD_AFTER_IOCINIT,
                keys::raw::FILE_COPY,
            ] {
                ctx.config.set(keys::RAW, option, "");
            }
            ctx.add_diagnostic(Diagnostic::info(self.name(), "added empty RAW section"));
        }

        Ok(())
    }
}
