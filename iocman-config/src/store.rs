use std::{
    fmt,
    path::{Path, PathBuf},
};

use indexmap::IndexMap;
use iocman_core::{File, normalize_value, split_lines, toml_value_to_string};

use crate::{Error, Result};

type Options = IndexMap<String, String>;

/// Section-organized configuration backing one project.
///
/// Section names are upper-cased on every write and lookup, option names
/// are lower-cased. Lookups of unknown options return an empty string.
///
/// Mutating methods only touch memory. Callers go through
/// [`ConfigStore::update`] (or call [`ConfigStore::persist`]) so every
/// mutation is followed by a durable write.
#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: PathBuf,
    sections: IndexMap<String, Options>,
}

impl ConfigStore {
    /// Create an empty store backed by `path`. Nothing is written.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            sections: IndexMap::new(),
        }
    }

    /// Read the store from its backing file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(Box::new(Error::ConfigMissing {
                path: path.to_path_buf(),
            }));
        }
        let content = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        Self::parse(path, &content)
    }

    /// Parse `content` as the contents of the file at `path`.
    ///
    /// Every top-level table is a section. Scalars are read as strings and
    /// arrays become multi-line values.
    pub fn parse(path: impl Into<PathBuf>, content: &str) -> Result<Self> {
        let path = path.into();
        let raw: IndexMap<String, IndexMap<String, toml::Value>> = toml::from_str(content)
            .map_err(|e| Error::parse(e, content, &path.display().to_string()))?;

        let sections = raw
            .into_iter()
            .map(|(section, options)| {
                let options = options
                    .into_iter()
                    .map(|(option, value)| (option, toml_value_to_string(&value)))
                    .collect();
                (section, options)
            })
            .collect();

        Ok(Self { path, sections })
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Value of `option` in `section`, or `""` when absent.
    pub fn get(&self, section: &str, option: &str) -> String {
        self.sections
            .get(&section.to_uppercase())
            .and_then(|options| options.get(&option.to_lowercase()))
            .cloned()
            .unwrap_or_default()
    }

    /// Store `value` verbatim, creating the section if needed.
    pub fn set(&mut self, section: &str, option: &str, value: impl Into<String>) {
        self.sections
            .entry(section.to_uppercase())
            .or_default()
            .insert(option.to_lowercase(), value.into());
    }

    pub fn has(&self, section: &str, option: &str) -> bool {
        self.sections
            .get(&section.to_uppercase())
            .is_some_and(|options| options.contains_key(&option.to_lowercase()))
    }

    pub fn has_section(&self, section: &str) -> bool {
        self.sections.contains_key(&section.to_uppercase())
    }

    /// Whether `option` in `section` holds exactly `value`.
    pub fn is(&self, section: &str, option: &str, value: &str) -> bool {
        self.has(section, option) && self.get(section, option) == value
    }

    /// Create `section` without options. Returns `false` if it already existed.
    pub fn add_section(&mut self, section: &str) -> bool {
        let name = section.to_uppercase();
        if self.sections.contains_key(&name) {
            return false;
        }
        self.sections.insert(name, Options::new());
        true
    }

    /// Iterate over sections in file order.
    pub fn sections(&self) -> impl Iterator<Item = (&str, &Options)> {
        self.sections
            .iter()
            .map(|(name, options)| (name.as_str(), options))
    }

    /// Replace every section with the content of `other`, keeping this
    /// store's backing path.
    pub fn replace_contents(&mut self, other: ConfigStore) {
        self.sections = other.sections;
    }

    /// Canonicalize every section and value, then persist.
    ///
    /// Sections differing only in case are merged; later options win.
    pub fn normalize(&mut self) -> Result<()> {
        let mut normalized: IndexMap<String, Options> = IndexMap::new();
        for (section, options) in std::mem::take(&mut self.sections) {
            let target = normalized.entry(section.to_uppercase()).or_default();
            for (option, value) in options {
                target.insert(option.to_lowercase(), normalize_value(&value));
            }
        }
        self.sections = normalized;
        self.persist()
    }

    /// Apply several mutations and persist once.
    ///
    /// Returns only after the write succeeded.
    pub fn update<T>(&mut self, mutate: impl FnOnce(&mut Self) -> T) -> Result<T> {
        let value = mutate(self);
        self.persist()?;
        Ok(value)
    }

    /// Serialize to TOML.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string(&self.sections).map_err(|source| Box::new(Error::Serialize { source }))
    }

    /// Write the store to its backing file, replacing the previous content.
    pub fn persist(&self) -> Result<()> {
        let content = self.to_toml_string()?;
        File::new(&self.path, content).write().map_err(|report| {
            Box::new(Error::Write {
                path: self.path.clone(),
                reason: format!("{report:#}"),
            })
        })?;
        tracing::trace!(path = %self.path.display(), "config persisted");
        Ok(())
    }
}

impl fmt::Display for ConfigStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (section, options) in &self.sections {
            writeln!(f, "[{section}]")?;
            for (option, value) in options {
                let lines: Vec<&str> = split_lines(value).collect();
                if lines.len() > 1 {
                    writeln!(f, "{option}:")?;
                    for line in lines {
                        writeln!(f, "\t{line}")?;
                    }
                } else {
                    writeln!(f, "{option}: {}", value.trim())?;
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;
    use crate::keys;

    fn sample() -> &'static str {
        r#"
[ioc]
name = "demo"
module = "  autosave,  caputlog  "

[DB]
load = ["a.db, P=X", "  b.db  "]

[SETTING]
report_info = true
"#
    }

    #[test]
    fn test_parse_reads_values_as_strings() {
        let store = ConfigStore::parse("ioc.toml", sample()).unwrap();

        assert_eq!(store.get(keys::DB, keys::db::LOAD), "a.db, P=X\n  b.db  ");
        assert_eq!(store.get(keys::SETTING, keys::setting::REPORT_INFO), "true");
        assert!(store.is(keys::SETTING, keys::setting::REPORT_INFO, "true"));
    }

    #[test]
    fn test_unknown_lookups_return_empty() {
        let store = ConfigStore::parse("ioc.toml", sample()).unwrap();

        assert_eq!(store.get("NOPE", "name"), "");
        assert_eq!(store.get(keys::DB, "missing"), "");
        assert!(!store.has(keys::DB, "missing"));
        assert!(!store.is("NOPE", "name", ""));
    }

    #[test]
    fn test_set_upper_cases_section_and_keeps_value() {
        let mut store = ConfigStore::new("ioc.toml");
        store.set("raw", "cmd_at_dbload", "  keep me  ");

        assert!(store.has_section("RAW"));
        assert!(store.has("Raw", "cmd_at_dbload"));
        assert_eq!(store.get("RAW", "cmd_at_dbload"), "  keep me  ");
    }

    #[test]
    fn test_normalize_merges_sections_and_is_idempotent() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("ioc.toml");
        let mut store = ConfigStore::parse(&path, sample()).unwrap();

        store.normalize().unwrap();
        let sections: Vec<&str> = store.sections().map(|(name, _)| name).collect();
        assert_eq!(sections, vec!["IOC", "DB", "SETTING"]);
        assert_eq!(store.get(keys::IOC, keys::ioc::NAME), "demo");
        assert_eq!(store.get(keys::IOC, keys::ioc::MODULE), "autosave,  caputlog");
        assert_eq!(store.get(keys::DB, keys::db::LOAD), "a.db, P=X\nb.db");

        let first = std::fs::read_to_string(&path).unwrap();
        let mut reloaded = ConfigStore::load(&path).unwrap();
        reloaded.normalize().unwrap();
        let second = std::fs::read_to_string(&path).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_update_persists_once_after_mutations() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("ioc.toml");
        let mut store = ConfigStore::new(&path);

        store
            .update(|store| {
                store.set(keys::IOC, keys::ioc::NAME, "demo");
                store.set(keys::IOC, keys::ioc::STATUS, keys::status::CREATED);
            })
            .unwrap();

        let reloaded = ConfigStore::load(&path).unwrap();
        assert_eq!(reloaded.get(keys::IOC, keys::ioc::NAME), "demo");
        assert_eq!(reloaded.get(keys::IOC, keys::ioc::STATUS), "created");
    }

    #[test]
    fn test_multi_line_values_survive_round_trip() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("ioc.toml");
        let mut store = ConfigStore::new(&path);
        store.set(keys::DB, keys::db::LOAD, "a.db, P=X\nb.db");
        store.persist().unwrap();

        let reloaded = ConfigStore::load(&path).unwrap();
        assert_eq!(reloaded.get(keys::DB, keys::db::LOAD), "a.db, P=X\nb.db");
    }

    #[test]
    fn test_load_missing_file() {
        let temp = TempDir::new().unwrap();
        let err = ConfigStore::load(temp.path().join("ioc.toml")).unwrap_err();
        assert!(matches!(*err, Error::ConfigMissing { .. }));
    }

    #[test]
    fn test_parse_error_has_span() {
        let err = ConfigStore::parse("ioc.toml", "[IOC\nname = 1").unwrap_err();
        match *err {
            Error::Parse { span, .. } => assert!(span.is_some()),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_display_indents_multi_line_values() {
        let mut store = ConfigStore::new("ioc.toml");
        store.set(keys::IOC, keys::ioc::NAME, "demo");
        store.set(keys::DB, keys::db::LOAD, "a.db\nb.db");

        assert_eq!(
            store.to_string(),
            "[IOC]\nname: demo\n\n[DB]\nload:\n\ta.db\n\tb.db\n\n"
        );
    }
}
