//! Where reports are printed.

/// Sink for report lines.
///
/// Reports pick the kind of line; the sink picks how it looks.
pub trait Output {
    /// Project name heading, underlined on a terminal.
    fn title(&mut self, text: &str);

    fn section(&mut self, name: &str);

    fn key_value(&mut self, key: &str, value: &str);

    fn list_item(&mut self, text: &str);

    /// An imported or generated file.
    fn added_item(&mut self, text: &str);

    /// Non-blocking diagnostic. Goes to stderr.
    fn warning(&mut self, msg: &str);

    /// Blocking diagnostic. Goes to stderr.
    fn error(&mut self, msg: &str);

    fn divider(&mut self, label: &str);

    /// Multi-line text printed as is, such as the config dump or a
    /// snapshot diff.
    fn preformatted(&mut self, text: &str);

    fn newline(&mut self);
}

pub trait Report {
    fn render(&self, out: &mut dyn Output);
}

/// Prints to stdout, diagnostics to stderr.
pub struct TerminalOutput;

impl Output for TerminalOutput {
    fn title(&mut self, text: &str) {
        let rule = "=".repeat(text.chars().count());
        println!("{text}\n{rule}");
    }

    fn section(&mut self, name: &str) {
        println!("{name}:");
    }

    fn key_value(&mut self, key: &str, value: &str) {
        println!("{key}: {value}");
    }

    fn list_item(&mut self, text: &str) {
        println!("  - {text}");
    }

    fn added_item(&mut self, text: &str) {
        println!("  + {text}");
    }

    fn warning(&mut self, msg: &str) {
        eprintln!("warning: {msg}");
    }

    fn error(&mut self, msg: &str) {
        eprintln!("error: {msg}");
    }

    fn divider(&mut self, label: &str) {
        println!("── {label} ──");
    }

    fn preformatted(&mut self, text: &str) {
        println!("{text}");
    }

    fn newline(&mut self) {
        println!();
    }
}

/// Collects rendered lines for assertions.
#[cfg(test)]
#[derive(Default)]
pub(crate) struct RecordedOutput {
    pub lines: Vec<String>,
}

#[cfg(test)]
impl RecordedOutput {
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }
}

#[cfg(test)]
impl Output for RecordedOutput {
    fn title(&mut self, text: &str) {
        self.lines.push(format!("# {text}"));
    }

    fn section(&mut self, name: &str) {
        self.lines.push(format!("{name}:"));
    }

    fn key_value(&mut self, key: &str, value: &str) {
        self.lines.push(format!("{key}: {value}"));
    }

    fn list_item(&mut self, text: &str) {
        self.lines.push(format!("  - {text}"));
    }

    fn added_item(&mut self, text: &str) {
        self.lines.push(format!("  + {text}"));
    }

    fn warning(&mut self, msg: &str) {
        self.lines.push(format!("warning: {msg}"));
    }

    fn error(&mut self, msg: &str) {
        self.lines.push(format!("error: {msg}"));
    }

    fn divider(&mut self, label: &str) {
        self.lines.push(format!("-- {label} --"));
    }

    fn preformatted(&mut self, text: &str) {
        self.lines.push(text.to_string());
    }

    fn newline(&mut self) {
        self.lines.push(String::new());
    }
}
