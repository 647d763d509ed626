use iocman_config::{SourceKind, keys};
use iocman_core::{FileMode, split_list};

use super::Contributor;
use crate::pipeline::{Diagnostic, GenerationContext};

/// Port configuration and options shared by both transport sections.
fn push_port_setup(ctx: &mut GenerationContext<'_>, section: &str) {
    let port_config = ctx.config.get(section, keys::port::PORT_CONFIG);
    let asyn_option = ctx.config.get(section, keys::port::ASYN_OPTION);
    if port_config.trim().is_empty() {
        ctx.add_diagnostic(
            Diagnostic::warning("contribute", format!("no port configured in section {section}"))
                .at(format!("{section}.{}", keys::port::PORT_CONFIG)),
        );
    }

    ctx.buffers
        .before_load
        .push_lines(&port_config)
        .push_lines(&asyn_option)
        .push_blank();

    let load = ctx.config.get(section, keys::port::LOAD);
    ctx.buffers.at_load.push_lines(&load);
}

/// Serial or IP port driven devices.
pub struct SerialTransport;

impl Contributor for SerialTransport {
    fn contribute(&self, ctx: &mut GenerationContext<'_>) {
        ctx.buffers.before_load.push_comment("asyn");
        push_port_setup(ctx, keys::ASYN);
        ctx.copy_template("contribute", "db/asynRecord.db", ctx.paths.db.join("asynRecord.db"));
    }
}

/// Protocol driven devices. Protocol files come from the managed sources.
pub struct StreamingProtocol;

impl Contributor for StreamingProtocol {
    fn contribute(&self, ctx: &mut GenerationContext<'_>) {
        let protocol_path = format!(
            "epicsEnvSet(\"STREAM_PROTOCOL_PATH\",\"{}\")",
            ctx.paths.container_settings
        );
        ctx.buffers
            .before_load
            .push_comment("StreamDevice")
            .push_line(&protocol_path);
        push_port_setup(ctx, keys::STREAM);

        let protocols = ctx.config.get(keys::STREAM, keys::port::PROTOCOL_FILE);
        for protocol in split_list(&protocols) {
            if !ctx.sources.contains(SourceKind::Protocol, protocol) {
                ctx.add_diagnostic(
                    Diagnostic::error(
                        "contribute",
                        format!("protocol file \"{protocol}\" not found"),
                    )
                    .at(format!("{}.{}", keys::STREAM, keys::port::PROTOCOL_FILE))
                    .hint("import the protocol file into src/ first"),
                );
                continue;
            }
            let src = ctx.paths.src.join(protocol);
            let dest = ctx.paths.settings.join(protocol);
            ctx.copy_required("contribute", src, dest, FileMode::ReadOnly);
        }
    }
}
