//! Line builders for the generated startup script.

use iocman_core::split_lines;

/// Accumulates startup script lines.
///
/// ```
/// use iocman_codegen::builder::ScriptBuilder;
///
/// let mut builder = ScriptBuilder::new();
/// builder
///     .push_comment("autosave")
///     .push_line("save_restoreSet_NumSeqFiles(3)")
///     .push_blank();
///
/// assert_eq!(builder.build(), "#autosave\nsave_restoreSet_NumSeqFiles(3)\n\n");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScriptBuilder {
    buffer: String,
}

impl ScriptBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one line.
    pub fn push_line(&mut self, line: &str) -> &mut Self {
        self.buffer.push_str(line);
        self.buffer.push('\n');
        self
    }

    /// Add every non-blank line of a multi-line configuration value.
    pub fn push_lines(&mut self, value: &str) -> &mut Self {
        for line in split_lines(value) {
            self.push_line(line);
        }
        self
    }

    /// Add a blank line.
    pub fn push_blank(&mut self) -> &mut Self {
        self.buffer.push('\n');
        self
    }

    /// Add a `#` section marker.
    pub fn push_comment(&mut self, text: &str) -> &mut Self {
        self.buffer.push('#');
        self.push_line(text)
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.buffer
    }

    pub fn build(self) -> String {
        self.buffer
    }
}

/// The three ordered insertion points of the startup script.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PhaseBuffers {
    /// Setup before any database is loaded.
    pub before_load: ScriptBuilder,
    /// Database and record loading.
    pub at_load: ScriptBuilder,
    /// Actions after `iocInit`.
    pub after_init: ScriptBuilder,
}

impl PhaseBuffers {
    /// Concatenate the buffers in script order.
    pub fn render(&self) -> String {
        [&self.before_load, &self.at_load, &self.after_init]
            .iter()
            .map(|buffer| buffer.as_str())
            .collect()
    }
}
