//! Operator confirmation capability.
//!
//! Operations that may need an explicit yes/no from the operator take a
//! `&dyn Confirm` instead of reading from a terminal themselves.

/// Something that can answer a yes/no question.
pub trait Confirm {
    /// Ask `prompt` and block until an answer is available.
    fn confirm(&self, prompt: &str) -> bool;
}

/// Non-interactive policy that answers every question with yes.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysYes;

impl Confirm for AlwaysYes {
    fn confirm(&self, prompt: &str) -> bool {
        tracing::debug!(prompt, "auto-confirmed");
        true
    }
}

/// Non-interactive policy that answers every question with no.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysNo;

impl Confirm for AlwaysNo {
    fn confirm(&self, prompt: &str) -> bool {
        tracing::debug!(prompt, "auto-declined");
        false
    }
}

impl<F> Confirm for F
where
    F: Fn(&str) -> bool,
{
    fn confirm(&self, prompt: &str) -> bool {
        self(prompt)
    }
}
