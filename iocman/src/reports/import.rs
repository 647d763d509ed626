//! Import command report.

use iocman_project::ImportReport;

use super::output::{Output, Report};

impl Report for ImportReport {
    fn render(&self, out: &mut dyn Output) {
        if self.imported.is_empty() && self.skipped.is_empty() {
            out.preformatted("No new source files found.");
        }

        if !self.imported.is_empty() {
            out.section("Imported");
            for name in &self.imported {
                out.added_item(name);
            }
        }

        for name in &self.skipped {
            out.warning(&format!(
                "\"{name}\" is already managed and was not overwritten, \
                 check whether the files conflict"
            ));
        }

        if !self.ignored.is_empty() {
            out.section("Ignored (unknown suffix)");
            for name in &self.ignored {
                out.list_item(name);
            }
        }
    }
}
