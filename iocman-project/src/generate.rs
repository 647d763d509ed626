//! Generation driver - runs the pipeline and applies its outcome.

use std::path::PathBuf;

use eyre::Result;
use iocman_codegen::{
    Diagnostic, GenerateOptions, GenerationContext, Pipeline, Severity, TracingPlugin,
};
use iocman_config::{SourceListing, keys};
use iocman_core::{AlwaysNo, Confirm, fs};

use crate::Project;

/// What a generation run produced.
#[derive(Debug, Clone, Default)]
pub struct GenerationOutcome {
    pub diagnostics: Vec<Diagnostic>,
    /// Files written. Empty when generation was blocked.
    pub written: Vec<PathBuf>,
}

impl GenerationOutcome {
    /// Whether blocking diagnostics stopped the run.
    pub fn is_blocked(&self) -> bool {
        self.diagnostics.iter().any(|d| d.severity.is_error())
    }
}

impl Project {
    /// Generate the startup files.
    ///
    /// Blocking diagnostics stop the run before anything is written and
    /// are recorded in the project state as warnings; the outcome is still
    /// returned so callers can show them. On success the resolved
    /// configuration is adopted, the status becomes `generated` and a new
    /// snapshot is taken.
    ///
    /// Any other failure leaves the previous startup files in place, is
    /// recorded in the project state and returned as an error.
    pub fn generate(
        &mut self,
        options: GenerateOptions,
        confirm: &dyn Confirm,
    ) -> Result<GenerationOutcome> {
        match self.run_generation(options, confirm) {
            Ok(outcome) => Ok(outcome),
            Err(e) => {
                let cause = format!("{e:#}");
                if let Err(escalation) = self.escalate(
                    Severity::Warning,
                    "startup files generating failed.",
                    Some(cause.as_str()),
                ) {
                    tracing::error!("failed to record generation failure: {escalation:#}");
                }
                Err(e.wrap_err(format!(
                    "failed to generate startup files for '{}'",
                    self.paths.name
                )))
            }
        }
    }

    fn run_generation(
        &mut self,
        options: GenerateOptions,
        confirm: &dyn Confirm,
    ) -> Result<GenerationOutcome> {
        let sources = self.sources().listing()?;
        let mut ctx = GenerationContext::new(
            self.config.clone(),
            &self.env,
            &self.paths,
            sources,
            confirm,
        )
        .with_options(options);

        let result = Pipeline::new().plugin(TracingPlugin).run(&mut ctx);
        let GenerationContext {
            config,
            diagnostics,
            written,
            ..
        } = ctx;
        let outcome = GenerationOutcome {
            diagnostics,
            written,
        };

        if outcome.is_blocked() {
            for diagnostic in outcome.diagnostics.iter().filter(|d| d.severity.is_error()) {
                self.escalate(
                    Severity::Warning,
                    &diagnostic.message,
                    diagnostic.hint.as_deref(),
                )?;
            }
            return Ok(GenerationOutcome {
                written: Vec::new(),
                ..outcome
            });
        }
        result?;

        self.config.update(|store| {
            store.replace_contents(config);
            store.set(keys::IOC, keys::ioc::STATUS, keys::status::GENERATED);
        })?;
        self.snapshot().capture()?;
        tracing::info!(project = %self.paths.name, "startup files generated");
        Ok(outcome)
    }

    /// Run the validation lints only. Never writes.
    pub fn validate(&self) -> Vec<Diagnostic> {
        let sources = fs::list_files(&self.paths.src)
            .map(|names| SourceListing::classify(&self.env, &names))
            .unwrap_or_default();
        let mut ctx = GenerationContext::new(
            self.config.clone(),
            &self.env,
            &self.paths,
            sources,
            &AlwaysNo,
        );
        if let Err(e) = Pipeline::validation().run(&mut ctx) {
            tracing::debug!("validation failed: {e}");
        }
        ctx.diagnostics
    }
}
