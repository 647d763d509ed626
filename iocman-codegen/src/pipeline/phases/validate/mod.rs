//! Validate phase - runs lints on the configuration.

mod lint;
pub mod lints;

use eyre::{Result, bail};
pub use lint::{Lint, LintInfo};
pub use lints::{EpicsEnvLint, ModuleTokenLint};

use crate::pipeline::{GenerationContext, Phase};

/// Phase that validates the configuration using configurable lints.
pub struct ValidatePhase {
    lints: Vec<Box<dyn Lint>>,
}

impl ValidatePhase {
    /// Create a new validate phase with default lints.
    pub fn new() -> Self {
        Self {
            lints: vec![Box::new(ModuleTokenLint), Box::new(EpicsEnvLint)],
        }
    }

    /// Create a validate phase with no lints.
    pub fn empty() -> Self {
        Self { lints: Vec::new() }
    }

    /// Add a custom lint to the validation phase.
    pub fn with_lint(mut self, lint: impl Lint + 'static) -> Self {
        self.lints.push(Box::new(lint));
        self
    }

    /// Get information about all lints that will be run.
    pub fn lint_info(&self) -> Vec<LintInfo> {
        self.lints.iter().map(|l| l.info()).collect()
    }
}

impl Default for ValidatePhase {
    fn default() -> Self {
        Self::new()
    }
}

impl Phase for ValidatePhase {
    fn name(&self) -> &'static str {
        "validate"
    }

    fn run(&self, ctx: &mut GenerationContext<'_>) -> Result<()> {
        for lint in &self.lints {
            lint.check(&ctx.config, &mut ctx.diagnostics);
        }

        // Fail if there are any errors (warnings are allowed)
        if ctx.has_errors() {
            bail!("validation failed with {} error(s)", ctx.error_count());
        }

        Ok(())
    }
}
