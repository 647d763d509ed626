//! Substitute phase - turns `DB.load` into the substitution file.

use eyre::{Result, bail};
use iocman_config::{SourceKind, keys};
use iocman_core::{FileMode, split_lines};

use crate::{
    directive::LoadDirective,
    files::SubstitutionsFile,
    pipeline::{Diagnostic, FileAction, GenerationContext, Phase},
};

const LOCATION: &str = "DB.load";

/// Phase that parses every load directive and schedules the database
/// copies they reference.
///
/// All lines are checked before giving up, so one run reports every bad
/// directive.
pub struct SubstitutePhase;

impl Phase for SubstitutePhase {
    fn name(&self) -> &'static str {
        "substitute"
    }

    fn run(&self, ctx: &mut GenerationContext<'_>) -> Result<()> {
        let load = ctx.config.get(keys::DB, keys::db::LOAD);
        let lines: Vec<&str> = split_lines(&load).collect();
        if lines.is_empty() {
            ctx.add_diagnostic(
                Diagnostic::error(self.name(), "empty load string definition.")
                    .at(LOCATION)
                    .hint("add one 'file.db, key=value, ...' line per database"),
            );
            bail!("empty load string definition");
        }

        let mut directives = Vec::with_capacity(lines.len());
        for line in lines {
            let directive = match LoadDirective::parse(line) {
                Ok(directive) => directive,
                Err(e) => {
                    ctx.add_diagnostic(
                        Diagnostic::error(self.name(), format!("bad load string \"{line}\": {e}"))
                            .at(LOCATION),
                    );
                    continue;
                }
            };

            if !ctx.sources.contains(SourceKind::Database, &directive.file) {
                let message = format!("db file \"{}\" not found", directive.file);
                ctx.add_diagnostic(
                    Diagnostic::error(self.name(), message)
                        .at(LOCATION)
                        .hint(format!(
                            "import it into the source directory first (line \"{line}\")"
                        )),
                );
                continue;
            }
            directives.push(directive);
        }

        if ctx.has_errors() {
            bail!("invalid load definition with {} error(s)", ctx.error_count());
        }

        for directive in &directives {
            ctx.actions.push(FileAction::Copy {
                src: ctx.paths.src.join(&directive.file),
                dest: ctx.paths.db.join(&directive.file),
                mode: FileMode::ReadOnly,
            });
        }
        ctx.substitutions = Some(SubstitutionsFile::new(ctx.paths.name.clone(), directives));
        Ok(())
    }
}
