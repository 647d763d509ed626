//! Pipeline plugin trait for extensibility.

use eyre::Result;

use super::GenerationContext;

/// A plugin that can hook into the generation pipeline.
///
/// Plugins receive callbacks before and after each phase runs, allowing
/// them to inspect or modify the generation context.
pub trait Plugin: Send + Sync {
    /// The name of this plugin (for debugging and logging).
    fn name(&self) -> &'static str;

    /// Called before a phase runs. Return an error to abort the pipeline.
    #[allow(unused_variables)]
    fn on_before_phase(&self, phase: &str, ctx: &mut GenerationContext<'_>) -> Result<()> {
        Ok(())
    }

    /// Called after a phase completes successfully. Return an error to
    /// abort the pipeline.
    #[allow(unused_variables)]
    fn on_after_phase(&self, phase: &str, ctx: &mut GenerationContext<'_>) -> Result<()> {
        Ok(())
    }
}

/// Logs phase progress and the diagnostics each phase added.
#[derive(Debug, Default)]
pub struct TracingPlugin;

impl Plugin for TracingPlugin {
    fn name(&self) -> &'static str {
        "tracing"
    }

    fn on_before_phase(&self, phase: &str, ctx: &mut GenerationContext<'_>) -> Result<()> {
        tracing::debug!(project = %ctx.paths.name, phase, "phase started");
        Ok(())
    }

    fn on_after_phase(&self, phase: &str, ctx: &mut GenerationContext<'_>) -> Result<()> {
        for diagnostic in ctx.diagnostics.iter().filter(|d| d.phase == phase) {
            match diagnostic.severity {
                super::Severity::Error => tracing::error!(phase, "{diagnostic}"),
                super::Severity::Warning => tracing::warn!(phase, "{diagnostic}"),
                super::Severity::Info => tracing::debug!(phase, "{diagnostic}"),
            }
        }
        tracing::debug!(
            project = %ctx.paths.name,
            phase,
            actions = ctx.actions.len(),
            "phase finished"
        );
        Ok(())
    }
}
