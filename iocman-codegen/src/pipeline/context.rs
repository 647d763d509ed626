//! Generation context passed through pipeline phases.

use std::path::{Path, PathBuf};

use eyre::{Result, WrapErr};
use iocman_config::{ConfigStore, EnvironmentConfig, ProjectPaths, SourceListing};
use iocman_core::{
    Confirm, FileMode,
    fs::{self, Backup},
};

use super::diagnostic::{Diagnostic, Severity};
use crate::{builder::PhaseBuffers, files::SubstitutionsFile};

/// Operator choices for one generation run.
#[derive(Debug, Clone, Copy, Default)]
pub struct GenerateOptions {
    /// Apply the environment defaults for an empty `IOC.bin` or
    /// `IOC.module` without asking.
    pub force_default: bool,
}

/// A filesystem side effect scheduled by a contributor.
///
/// Actions are only executed by the emit phase, after every blocking
/// check passed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileAction {
    CreateDir(PathBuf),
    Copy {
        src: PathBuf,
        dest: PathBuf,
        mode: FileMode,
    },
}

impl FileAction {
    pub fn execute(&self) -> Result<()> {
        match self {
            FileAction::CreateDir(dir) => fs::make_dirs(dir),
            FileAction::Copy { src, dest, mode } => fs::copy_file(src, dest, *mode),
        }
    }
}

/// Context passed through all pipeline phases.
///
/// Holds a working copy of the project configuration. Defaults resolved
/// during generation land in this copy; the project adopts it only when
/// the whole run succeeded.
pub struct GenerationContext<'a> {
    pub config: ConfigStore,
    pub env: &'a EnvironmentConfig,
    pub paths: &'a ProjectPaths,
    /// Classified content of the managed source directory.
    pub sources: SourceListing,
    pub options: GenerateOptions,
    pub confirm: &'a dyn Confirm,
    pub buffers: PhaseBuffers,
    pub actions: Vec<FileAction>,
    /// Populated by the substitute phase.
    pub substitutions: Option<SubstitutionsFile>,
    /// Files written by the emit phase.
    pub written: Vec<PathBuf>,
    pub diagnostics: Vec<Diagnostic>,
}

impl<'a> GenerationContext<'a> {
    pub fn new(
        config: ConfigStore,
        env: &'a EnvironmentConfig,
        paths: &'a ProjectPaths,
        sources: SourceListing,
        confirm: &'a dyn Confirm,
    ) -> Self {
        Self {
            config,
            env,
            paths,
            sources,
            options: GenerateOptions::default(),
            confirm,
            buffers: PhaseBuffers::default(),
            actions: Vec::new(),
            substitutions: None,
            written: Vec::new(),
            diagnostics: Vec::new(),
        }
    }

    pub fn with_options(mut self, options: GenerateOptions) -> Self {
        self.options = options;
        self
    }

    /// Check if any error diagnostics have been recorded.
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(|d| d.severity.is_error())
    }

    /// Check if any warning diagnostics have been recorded.
    pub fn has_warnings(&self) -> bool {
        self.diagnostics.iter().any(|d| d.severity.is_warning())
    }

    /// Count the number of error diagnostics.
    pub fn error_count(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity.is_error())
            .count()
    }

    /// Add a diagnostic.
    pub fn add_diagnostic(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    /// Get all error diagnostics.
    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| matches!(d.severity, Severity::Error))
    }

    /// Get all warning diagnostics.
    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| matches!(d.severity, Severity::Warning))
    }

    /// Schedule creation of `dir`.
    pub fn create_dir(&mut self, dir: PathBuf) {
        self.actions.push(FileAction::CreateDir(dir));
    }

    /// Schedule a copy, recording a blocking diagnostic from `phase` when
    /// the source is missing.
    pub fn copy_required(&mut self, phase: &str, src: PathBuf, dest: PathBuf, mode: FileMode) {
        if !src.is_file() {
            self.add_diagnostic(
                Diagnostic::error(phase, format!("support file '{}' not found", src.display()))
                    .hint("check the template area of the environment"),
            );
            return;
        }
        self.actions.push(FileAction::Copy { src, dest, mode });
    }

    /// Schedule a read-only copy of a template file.
    pub fn copy_template(&mut self, phase: &str, template: &str, dest: PathBuf) {
        let src = self.paths.template.join(template);
        self.copy_required(phase, src, dest, FileMode::ReadOnly);
    }

    /// Run every scheduled action in order, saving each copy destination
    /// into `backup` before it is replaced.
    pub fn execute_actions(&self, backup: &mut Backup) -> Result<()> {
        for action in &self.actions {
            if let FileAction::Copy { dest, .. } = action {
                backup.save(dest)?;
            }
            action
                .execute()
                .wrap_err_with(|| format!("failed to apply {action:?}"))?;
        }
        Ok(())
    }

    /// Path below the project runtime directory.
    pub fn runtime_path(&self, rel: impl AsRef<Path>) -> PathBuf {
        self.paths.runtime.join(rel)
    }
}

#[cfg(test)]
mod tests {
    use iocman_core::AlwaysNo;
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_context_diagnostics() {
        let env = EnvironmentConfig::default();
        let paths = ProjectPaths::derive(&env, Path::new("repo/demo"));
        let mut ctx = GenerationContext::new(
            ConfigStore::new(&paths.config_file),
            &env,
            &paths,
            SourceListing::default(),
            &AlwaysNo,
        );

        ctx.add_diagnostic(Diagnostic::error("test", "test error"));
        ctx.add_diagnostic(Diagnostic::warning("test", "test warning"));
        ctx.add_diagnostic(Diagnostic::info("test", "test info"));

        assert!(ctx.has_errors());
        assert!(ctx.has_warnings());
        assert_eq!(ctx.error_count(), 1);
        assert_eq!(ctx.warnings().count(), 1);
    }

    #[test]
    fn test_copy_required_blocks_on_missing_source() {
        let temp = TempDir::new().unwrap();
        let env = EnvironmentConfig::under_root(temp.path());
        let paths = ProjectPaths::derive(&env, &temp.path().join("demo"));
        let mut ctx = GenerationContext::new(
            ConfigStore::new(&paths.config_file),
            &env,
            &paths,
            SourceListing::default(),
            &AlwaysNo,
        );

        ctx.copy_template("contribute", "template.acf", paths.settings.join("demo.acf"));

        assert!(ctx.actions.is_empty());
        assert_eq!(ctx.error_count(), 1);
        assert!(ctx.errors().next().unwrap().message.contains("template.acf"));
    }

    #[test]
    fn test_execute_actions() {
        let temp = TempDir::new().unwrap();
        let src = temp.path().join("a.db");
        std::fs::write(&src, "record").unwrap();
        let env = EnvironmentConfig::under_root(temp.path());
        let paths = ProjectPaths::derive(&env, &temp.path().join("demo"));
        let mut ctx = GenerationContext::new(
            ConfigStore::new(&paths.config_file),
            &env,
            &paths,
            SourceListing::default(),
            &AlwaysNo,
        );

        ctx.create_dir(paths.log.join("autosave"));
        ctx.copy_required("test", src, paths.db.join("a.db"), FileMode::ReadOnly);
        let mut backup = Backup::default();
        ctx.execute_actions(&mut backup).unwrap();

        assert!(paths.log.join("autosave").is_dir());
        assert_eq!(std::fs::read_to_string(paths.db.join("a.db")).unwrap(), "record");

        backup.restore().unwrap();
        assert!(!paths.db.join("a.db").exists());
    }
}
