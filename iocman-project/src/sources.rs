//! Managed source files.

use std::path::{Path, PathBuf};

use eyre::{Result, bail};
use iocman_codegen::Severity;
use iocman_config::{SourceKind, SourceListing};
use iocman_core::{FileMode, fs};
use serde::Serialize;

use crate::Project;

/// Outcome of an import.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ImportReport {
    /// Files copied into the source directory.
    pub imported: Vec<String>,
    /// Files whose name was already managed. Never overwritten.
    pub skipped: Vec<String>,
    /// Files with an unrecognized suffix.
    pub ignored: Vec<String>,
}

/// Keeps the `SRC` lists in line with the project's `src/` directory.
pub struct SourceFileRegistry<'p> {
    project: &'p mut Project,
}

impl<'p> SourceFileRegistry<'p> {
    pub(crate) fn new(project: &'p mut Project) -> Self {
        Self { project }
    }

    /// Classified content of the managed source directory.
    pub fn listing(&self) -> Result<SourceListing> {
        let names = fs::list_files(&self.project.paths.src)?;
        Ok(SourceListing::classify(&self.project.env, &names))
    }

    /// Rebuild the lists from the managed source directory.
    ///
    /// Files still present keep their recorded position, new ones are
    /// appended, vanished ones are dropped.
    pub fn rescan(&mut self) -> Result<SourceListing> {
        let src = self.project.paths.src.clone();
        self.ensure_exists(&src)?;
        let listing = self.merged_listing()?;
        self.project
            .config
            .update(|config| listing.write_to(config))?;
        Ok(listing)
    }

    /// Recorded lists reconciled with the directory content.
    fn merged_listing(&self) -> Result<SourceListing> {
        let scanned = self.listing()?;
        let recorded = SourceListing::from_store(&self.project.config);

        let mut listing = SourceListing::default();
        for kind in SourceKind::ALL {
            let kept = recorded
                .files(kind)
                .iter()
                .filter(|name| scanned.contains(kind, name));
            for name in kept.chain(scanned.files(kind)) {
                listing.insert(kind, name);
            }
        }

        if listing != recorded {
            tracing::debug!(project = %self.project.paths.name, "source lists updated from scan");
        }
        Ok(listing)
    }

    /// Copy the top-level files of `dir` into the managed source directory.
    ///
    /// Relative paths resolve against the current directory. Names that
    /// are already managed are skipped and reported, never overwritten.
    pub fn import(&mut self, dir: &Path) -> Result<ImportReport> {
        let dir = absolute(dir)?;
        self.ensure_exists(&dir)?;
        if same_dir(&dir, &self.project.paths.src) {
            self.rescan()?;
            return Ok(ImportReport::default());
        }

        let mut listing = self.merged_listing()?;
        let env = &self.project.env;
        let src = &self.project.paths.src;
        let mut report = ImportReport::default();

        for name in fs::list_files(&dir)? {
            let Some(kind) = SourceKind::classify(env, &name) else {
                report.ignored.push(name);
                continue;
            };
            if listing.contains(kind, &name) {
                tracing::warn!(
                    file = %name,
                    "file was already added, skipped. Check whether the files are conflicting"
                );
                report.skipped.push(name);
                continue;
            }
            fs::copy_file(&dir.join(&name), &src.join(&name), FileMode::ReadOnly)?;
            listing.insert(kind, &name);
            report.imported.push(name);
        }

        self.project
            .config
            .update(|config| listing.write_to(config))?;
        tracing::info!(
            project = %self.project.paths.name,
            imported = report.imported.len(),
            skipped = report.skipped.len(),
            "sources imported"
        );
        Ok(report)
    }

    fn ensure_exists(&mut self, dir: &Path) -> Result<()> {
        if dir.is_dir() {
            return Ok(());
        }
        self.project.escalate(
            Severity::Error,
            "source directory lost.",
            Some(&format!("'{}' does not exist", dir.display())),
        )?;
        bail!("source directory '{}' does not exist", dir.display());
    }
}

fn absolute(dir: &Path) -> Result<PathBuf> {
    Ok(if dir.is_absolute() {
        dir.to_path_buf()
    } else {
        std::env::current_dir()?.join(dir)
    })
}

fn same_dir(a: &Path, b: &Path) -> bool {
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}
