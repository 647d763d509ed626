//! Pipeline orchestrator.

use eyre::Result;

use super::{
    GenerationContext, Phase, Plugin,
    phases::{ContributePhase, EmitPhase, ResolvePhase, SubstitutePhase, ValidatePhase},
};

/// The generation pipeline orchestrator.
///
/// Runs its phases in order, followed by any user phases, calling plugin
/// hooks before and after each phase. The first failing phase stops the
/// run; its diagnostics stay in the context for the caller to report.
///
/// # Example
///
/// ```ignore
/// let pipeline = Pipeline::new().plugin(TracingPlugin);
/// let mut ctx = GenerationContext::new(config, &env, &paths, sources, &AlwaysYes);
///
/// if let Err(err) = pipeline.run(&mut ctx) {
///     for diag in ctx.errors() {
///         eprintln!("{diag}");
///     }
/// }
/// ```
pub struct Pipeline {
    builtin: Vec<Box<dyn Phase>>,
    phases: Vec<Box<dyn Phase>>,
    plugins: Vec<Box<dyn Plugin>>,
}

impl Pipeline {
    /// Create the full generation pipeline.
    pub fn new() -> Self {
        Self::with_builtin(vec![
            Box::new(ValidatePhase::new()),
            Box::new(ResolvePhase),
            Box::new(ContributePhase),
            Box::new(SubstitutePhase),
            Box::new(EmitPhase),
        ])
    }

    /// Create a pipeline that only runs the validation lints. Never writes.
    pub fn validation() -> Self {
        Self::with_builtin(vec![Box::new(ValidatePhase::new())])
    }

    fn with_builtin(builtin: Vec<Box<dyn Phase>>) -> Self {
        Self {
            builtin,
            phases: Vec::new(),
            plugins: Vec::new(),
        }
    }

    /// Add a phase to run after the built-in phases.
    pub fn phase(mut self, phase: impl Phase + 'static) -> Self {
        self.phases.push(Box::new(phase));
        self
    }

    /// Add a plugin to receive phase lifecycle hooks.
    pub fn plugin(mut self, plugin: impl Plugin + 'static) -> Self {
        self.plugins.push(Box::new(plugin));
        self
    }

    /// Names of the phases in execution order.
    pub fn phase_names(&self) -> Vec<&'static str> {
        self.builtin
            .iter()
            .chain(self.phases.iter())
            .map(|phase| phase.name())
            .collect()
    }

    /// Run every phase on `ctx`.
    ///
    /// # Errors
    ///
    /// Returns an error if any phase fails fatally.
    pub fn run(&self, ctx: &mut GenerationContext<'_>) -> Result<()> {
        for phase in self.builtin.iter().chain(self.phases.iter()) {
            self.run_phase(phase.as_ref(), ctx)?;
        }
        Ok(())
    }

    /// Run a single phase with plugin hooks.
    fn run_phase(&self, phase: &dyn Phase, ctx: &mut GenerationContext<'_>) -> Result<()> {
        let phase_name = phase.name();

        for plugin in &self.plugins {
            plugin.on_before_phase(phase_name, ctx)?;
        }

        phase.run(ctx)?;

        for plugin in &self.plugins {
            plugin.on_after_phase(phase_name, ctx)?;
        }

        Ok(())
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new()
    }
}
