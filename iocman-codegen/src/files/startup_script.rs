use std::path::{Path, PathBuf};

use iocman_core::{FileMode, FileRules, GeneratedFile};

/// The `st.cmd` startup script.
///
/// Starts with an interpreter line, so it carries no header.
pub struct StartupScript {
    content: String,
}

impl StartupScript {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
        }
    }
}

impl GeneratedFile for StartupScript {
    fn path(&self, base: &Path) -> PathBuf {
        base.join("st.cmd")
    }

    fn rules(&self) -> FileRules {
        FileRules {
            mode: FileMode::ReadExecute,
            header: None,
        }
    }

    fn render(&self) -> String {
        self.content.clone()
    }
}
