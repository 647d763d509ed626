use std::path::{Path, PathBuf};

use iocman_core::{FileMode, FileRules, GeneratedFile};

use super::GENERATED_HEADER;
use crate::directive::LoadDirective;

/// The `<name>.substitutions` file, one block per load directive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubstitutionsFile {
    name: String,
    directives: Vec<LoadDirective>,
}

impl SubstitutionsFile {
    pub fn new(name: impl Into<String>, directives: Vec<LoadDirective>) -> Self {
        Self {
            name: name.into(),
            directives,
        }
    }

    pub fn directives(&self) -> &[LoadDirective] {
        &self.directives
    }
}

impl GeneratedFile for SubstitutionsFile {
    fn path(&self, base: &Path) -> PathBuf {
        base.join(format!("{}.substitutions", self.name))
    }

    fn rules(&self) -> FileRules {
        FileRules {
            mode: FileMode::ReadOnly,
            header: Some(GENERATED_HEADER),
        }
    }

    fn render(&self) -> String {
        self.directives
            .iter()
            .map(LoadDirective::render_block)
            .collect()
    }
}
