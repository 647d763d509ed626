use dialoguer::{Confirm as Prompt, theme::ColorfulTheme};
use iocman_core::Confirm;

/// Asks on the terminal. Anything but an explicit yes, including a
/// terminal that can't be read, counts as no.
pub struct TerminalConfirm;

impl Confirm for TerminalConfirm {
    fn confirm(&self, prompt: &str) -> bool {
        match Prompt::with_theme(&ColorfulTheme::default())
            .with_prompt(prompt)
            .default(false)
            .interact()
        {
            Ok(answer) => answer,
            Err(e) => {
                tracing::warn!("no answer from terminal, assuming no: {e}");
                false
            }
        }
    }
}
