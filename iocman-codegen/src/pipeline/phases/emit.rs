//! Emit phase - the only phase that touches the filesystem.

use eyre::{Result, WrapErr, eyre};
use iocman_core::{GeneratedFile, StagedFile, fs::Backup};

use crate::{
    files::StartupScript,
    pipeline::{GenerationContext, Phase},
};

/// Phase that applies scheduled file actions and writes the startup
/// script and substitution file.
///
/// Both artifacts are rendered and staged before anything is replaced.
/// If any copy or write fails, every file replaced so far is restored.
pub struct EmitPhase;

impl Phase for EmitPhase {
    fn name(&self) -> &'static str {
        "emit"
    }

    fn run(&self, ctx: &mut GenerationContext<'_>) -> Result<()> {
        let substitutions = ctx
            .substitutions
            .take()
            .ok_or_else(|| eyre!("no substitution file was prepared"))?;
        let paths = ctx.paths;

        let staged = [
            substitutions
                .stage(&paths.db)
                .wrap_err("failed to prepare substitution file")?,
            StartupScript::new(ctx.buffers.render())
                .stage(&paths.boot)
                .wrap_err("failed to prepare startup script")?,
        ];

        let mut backup = Backup::default();
        if let Err(e) = apply(ctx, staged, &mut backup) {
            if backup.restore().is_err() {
                tracing::error!(
                    project = %paths.name,
                    "previous startup files could not be restored"
                );
            }
            ctx.written.clear();
            return Err(e);
        }

        tracing::info!(
            project = %paths.name,
            files = ctx.written.len(),
            actions = ctx.actions.len(),
            "startup files written"
        );
        ctx.substitutions = Some(substitutions);
        Ok(())
    }
}

fn apply(
    ctx: &mut GenerationContext<'_>,
    staged: [StagedFile; 2],
    backup: &mut Backup,
) -> Result<()> {
    ctx.execute_actions(backup)?;
    for file in staged {
        let path = file.path().to_path_buf();
        backup.save(&path)?;
        file.commit()?;
        ctx.written.push(path);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use iocman_core::FileMode;

    use super::*;
    use crate::{files::SubstitutionsFile, pipeline::FileAction, testing::Fixture};

    #[test]
    fn test_requires_substitutions() {
        let fixture = Fixture::new();
        let mut ctx = fixture.context(fixture.config(""));

        assert!(EmitPhase.run(&mut ctx).is_err());
        assert!(!fixture.paths.startup_script().exists());
    }

    #[test]
    fn test_failed_copy_keeps_previous_files() {
        let fixture = Fixture::new();
        fixture.source("a.db", "new").source("b.db", "new");
        let db = &fixture.paths.db;
        std::fs::create_dir_all(db.join("b.db")).unwrap();
        std::fs::write(db.join("b.db").join("keep"), "").unwrap();
        std::fs::write(db.join("a.db"), "old").unwrap();
        std::fs::write(fixture.paths.substitutions(), "old substitutions").unwrap();

        let mut ctx = fixture.context(fixture.config(""));
        ctx.buffers.before_load.push_line("#!interp");
        ctx.substitutions = Some(SubstitutionsFile::new("demo", Vec::new()));
        for name in ["a.db", "b.db"] {
            ctx.actions.push(FileAction::Copy {
                src: fixture.paths.src.join(name),
                dest: db.join(name),
                mode: FileMode::ReadOnly,
            });
        }

        assert!(EmitPhase.run(&mut ctx).is_err());

        assert!(ctx.written.is_empty());
        assert_eq!(std::fs::read_to_string(db.join("a.db")).unwrap(), "old");
        assert_eq!(
            std::fs::read_to_string(fixture.paths.substitutions()).unwrap(),
            "old substitutions"
        );
        assert!(!fixture.paths.startup_script().exists());
        assert!(db.join("b.db").join("keep").is_file());
    }

    #[test]
    fn test_writes_both_files() {
        let fixture = Fixture::new();
        let mut ctx = fixture.context(fixture.config(""));
        ctx.buffers.before_load.push_line("#!interp");
        ctx.substitutions = Some(SubstitutionsFile::new("demo", Vec::new()));

        EmitPhase.run(&mut ctx).unwrap();

        assert_eq!(
            ctx.written,
            vec![fixture.paths.substitutions(), fixture.paths.startup_script()]
        );
        assert_eq!(
            std::fs::read_to_string(fixture.paths.startup_script()).unwrap(),
            "#!interp\n"
        );
    }
}
