//! Generate command report.

use iocman_project::GenerationOutcome;

use super::{
    check::render_diagnostic,
    output::{Output, Report},
};

#[derive(Debug)]
pub struct GenerateReport {
    pub project: String,
    pub outcome: GenerationOutcome,
}

impl Report for GenerateReport {
    fn render(&self, out: &mut dyn Output) {
        for diagnostic in &self.outcome.diagnostics {
            render_diagnostic(diagnostic, out);
        }

        if self.outcome.is_blocked() {
            out.newline();
            out.preformatted(&format!(
                "✗ nothing generated for \"{}\", fix the errors above and try again",
                self.project
            ));
            return;
        }

        out.section("Generated");
        for path in &self.outcome.written {
            out.added_item(&path.display().to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::reports::output::RecordedOutput;

    #[test]
    fn test_written_files() {
        let report = GenerateReport {
            project: "demo".to_string(),
            outcome: GenerationOutcome {
                diagnostics: Vec::new(),
                written: vec![
                    PathBuf::from("db/demo.substitutions"),
                    PathBuf::from("iocBoot/st.cmd"),
                ],
            },
        };

        let mut out = RecordedOutput::default();
        report.render(&mut out);

        assert_eq!(
            out.text(),
            "Generated:\n  + db/demo.substitutions\n  + iocBoot/st.cmd"
        );
    }
}
