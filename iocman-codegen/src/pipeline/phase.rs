//! Pipeline phase trait.

use eyre::Result;

use super::GenerationContext;

/// A phase in the generation pipeline.
///
/// Phases are executed in order by the pipeline. Each phase reads and
/// extends the generation context: phase buffers, scheduled file actions
/// or diagnostics.
///
/// Built-in phases:
/// - `ValidatePhase` - runs lints over the configuration
/// - `ResolvePhase` - fills in executable and module defaults
/// - `ContributePhase` - boilerplate plus every enabled module
/// - `SubstitutePhase` - expands the load directives
/// - `EmitPhase` - the only phase that writes files
pub trait Phase: Send + Sync {
    /// The name of this phase (used in diagnostics and plugin hooks).
    fn name(&self) -> &'static str;

    /// Run this phase on the generation context.
    ///
    /// # Errors
    ///
    /// Returns an error if the phase fails fatally. Non-fatal issues should
    /// be recorded as diagnostics instead.
    fn run(&self, ctx: &mut GenerationContext<'_>) -> Result<()>;
}
