use iocman_config::keys;
use iocman_core::split_lines;

use super::Contributor;
use crate::{
    directive::{CopyDirective, CopyRoot},
    pipeline::{Diagnostic, FileAction, GenerationContext},
};

/// Verbatim commands for every phase plus `file_copy` directives.
pub struct Raw;

impl Contributor for Raw {
    fn contribute(&self, ctx: &mut GenerationContext<'_>) {
        let before = ctx.config.get(keys::RAW, keys::raw::CMD_BEFORE_DBLOAD);
        let at = ctx.config.get(keys::RAW, keys::raw::CMD_AT_DBLOAD);
        let after = ctx.config.get(keys::RAW, keys::raw::CMD_AFTER_IOCINIT);

        if split_lines(&before).next().is_some() {
            ctx.buffers.before_load.push_lines(&before).push_blank();
        }
        ctx.buffers.at_load.push_lines(&at);
        ctx.buffers.after_init.push_lines(&after);

        let copies = ctx.config.get(keys::RAW, keys::raw::FILE_COPY);
        for item in split_lines(&copies) {
            schedule_copy(ctx, item);
        }
    }
}

/// Malformed or dangling directives are skipped with a warning.
fn schedule_copy(ctx: &mut GenerationContext<'_>, item: &str) {
    let location = format!("{}.{}", keys::RAW, keys::raw::FILE_COPY);
    let directive = match CopyDirective::parse(item) {
        Ok(directive) => directive,
        Err(err) => {
            ctx.add_diagnostic(
                Diagnostic::warning("contribute", format!("file copy \"{item}\" skipped: {err}"))
                    .at(location),
            );
            return;
        }
    };

    let src = match directive.root {
        CopyRoot::Source => ctx.paths.src.join(&directive.source),
        CopyRoot::Template => ctx.paths.template.join(&directive.source),
    };
    if !src.is_file() {
        ctx.add_diagnostic(
            Diagnostic::warning(
                "contribute",
                format!("file copy \"{item}\" skipped: '{}' not found", src.display()),
            )
            .at(location),
        );
        return;
    }

    let dest = ctx.runtime_path(&directive.dest);
    ctx.actions.push(FileAction::Copy {
        src,
        dest,
        mode: directive.mode,
    });
}
