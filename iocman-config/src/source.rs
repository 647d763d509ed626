use std::fmt;

use iocman_core::{join_list, split_list};

use crate::{ConfigStore, EnvironmentConfig, keys};

/// Kind of a managed source file, decided by its suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceKind {
    Database,
    Protocol,
    Other,
}

impl SourceKind {
    pub const ALL: [SourceKind; 3] =
        [SourceKind::Database, SourceKind::Protocol, SourceKind::Other];

    /// Classify `name`, or `None` when no configured suffix matches.
    pub fn classify(env: &EnvironmentConfig, name: &str) -> Option<Self> {
        if name.ends_with(&env.db_suffix) {
            Some(SourceKind::Database)
        } else if name.ends_with(&env.proto_suffix) {
            Some(SourceKind::Protocol)
        } else if env.other_suffixes.iter().any(|suffix| name.ends_with(suffix)) {
            Some(SourceKind::Other)
        } else {
            None
        }
    }

    /// Option of the `SRC` section holding this list.
    pub fn option(self) -> &'static str {
        match self {
            SourceKind::Database => keys::src::DB_FILE,
            SourceKind::Protocol => keys::src::PROTOCOL_FILE,
            SourceKind::Other => keys::src::OTHER_FILE,
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceKind::Database => write!(f, "db"),
            SourceKind::Protocol => write!(f, "protocol"),
            SourceKind::Other => write!(f, "other"),
        }
    }
}

/// The three disjoint source lists of a project.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceListing {
    pub db_files: Vec<String>,
    pub protocol_files: Vec<String>,
    pub other_files: Vec<String>,
}

impl SourceListing {
    /// Classify `names`, ignoring unknown suffixes and duplicates.
    pub fn classify<S: AsRef<str>>(env: &EnvironmentConfig, names: &[S]) -> Self {
        let mut listing = Self::default();
        for name in names {
            let name = name.as_ref();
            if let Some(kind) = SourceKind::classify(env, name) {
                listing.insert(kind, name);
            }
        }
        listing
    }

    /// Lists as currently recorded in the `SRC` section.
    pub fn from_store(store: &ConfigStore) -> Self {
        let read = |kind: SourceKind| {
            split_list(&store.get(keys::SRC, kind.option()))
                .into_iter()
                .map(str::to_string)
                .collect()
        };
        Self {
            db_files: read(SourceKind::Database),
            protocol_files: read(SourceKind::Protocol),
            other_files: read(SourceKind::Other),
        }
    }

    /// Record every list in the `SRC` section. Does not persist.
    pub fn write_to(&self, store: &mut ConfigStore) {
        for kind in SourceKind::ALL {
            store.set(keys::SRC, kind.option(), join_list(self.files(kind)));
        }
    }

    pub fn files(&self, kind: SourceKind) -> &[String] {
        match kind {
            SourceKind::Database => &self.db_files,
            SourceKind::Protocol => &self.protocol_files,
            SourceKind::Other => &self.other_files,
        }
    }

    pub fn contains(&self, kind: SourceKind, name: &str) -> bool {
        self.files(kind).iter().any(|file| file == name)
    }

    /// Append `name` to its list. Returns `false` if it was already listed.
    pub fn insert(&mut self, kind: SourceKind, name: &str) -> bool {
        if self.contains(kind, name) {
            return false;
        }
        let list = match kind {
            SourceKind::Database => &mut self.db_files,
            SourceKind::Protocol => &mut self.protocol_files,
            SourceKind::Other => &mut self.other_files,
        };
        list.push(name.to_string());
        true
    }

    pub fn is_empty(&self) -> bool {
        SourceKind::ALL
            .iter()
            .all(|kind| self.files(*kind).is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_by_suffix() {
        let env = EnvironmentConfig::default();

        assert_eq!(SourceKind::classify(&env, "a.db"), Some(SourceKind::Database));
        assert_eq!(SourceKind::classify(&env, "dev.proto"), Some(SourceKind::Protocol));
        assert_eq!(SourceKind::classify(&env, "notes.txt"), Some(SourceKind::Other));
        assert_eq!(SourceKind::classify(&env, "readme.md"), None);
    }

    #[test]
    fn test_listing_skips_duplicates_and_unknown() {
        let env = EnvironmentConfig::default();
        let listing = SourceListing::classify(&env, &["b.db", "a.db", "b.db", "x.md", "p.proto"]);

        assert_eq!(listing.db_files, vec!["b.db", "a.db"]);
        assert_eq!(listing.protocol_files, vec!["p.proto"]);
        assert!(listing.other_files.is_empty());
        assert!(listing.contains(SourceKind::Database, "a.db"));
        assert!(!listing.contains(SourceKind::Protocol, "a.db"));
    }

    #[test]
    fn test_store_round_trip() {
        let env = EnvironmentConfig::default();
        let listing = SourceListing::classify(&env, &["a.db", "b.db", "dev.proto"]);
        let mut store = ConfigStore::new("ioc.toml");

        listing.write_to(&mut store);

        assert_eq!(store.get(keys::SRC, keys::src::DB_FILE), "a.db, b.db");
        assert_eq!(store.get(keys::SRC, keys::src::OTHER_FILE), "");
        assert_eq!(SourceListing::from_store(&store), listing);
    }
}
