use std::{
    fs,
    path::{Path, PathBuf},
};

use iocman_codegen::GenerateOptions;
use iocman_config::{EnvironmentConfig, keys};
use iocman_core::{AlwaysNo, AlwaysYes};
use iocman_project::{Project, RemoveMode, SnapshotCheck, StateLevel};
use tempfile::TempDir;

struct Workspace {
    env: EnvironmentConfig,
    temp: TempDir,
}

impl Workspace {
    fn new() -> Self {
        let temp = TempDir::new().unwrap();
        let env = EnvironmentConfig::under_root(temp.path());
        fs::create_dir_all(&env.template_root).unwrap();
        fs::write(env.template_root.join("template.acf"), "ASG(DEFAULT) {}\n").unwrap();
        Self { env, temp }
    }

    fn create(&self, name: &str) -> Project {
        let dir = self.env.project_dir(name);
        fs::create_dir_all(&dir).unwrap();
        Project::create(&dir, &self.env).unwrap()
    }

    /// Directory with the given files, ready for import.
    fn incoming(&self, files: &[(&str, &str)]) -> PathBuf {
        let dir = self.temp.path().join("incoming");
        fs::create_dir_all(&dir).unwrap();
        for (name, content) in files {
            fs::write(dir.join(name), content).unwrap();
        }
        dir
    }
}

fn configured(ws: &Workspace, module: &str, load: &str) -> Project {
    let mut project = ws.create("demo");
    let incoming = ws.incoming(&[("a.db", "record(ai, \"$(P):ai\") {}\n")]);
    project.sources().import(&incoming).unwrap();
    project.set_option("IOC", "bin", "ST-IOC").unwrap();
    project.set_option("IOC", "module", module).unwrap();
    project.set_option("DB", "load", load).unwrap();
    project
}

#[test]
fn test_generate_autosave_project() {
    let ws = Workspace::new();
    let mut project = configured(&ws, "autosave", "a.db, P=X");
    assert_eq!(project.ioc(keys::ioc::STATUS), keys::status::CREATED);

    let outcome = project.generate(GenerateOptions::default(), &AlwaysNo).unwrap();

    assert!(!outcome.is_blocked());
    assert_eq!(outcome.written.len(), 2);
    assert_eq!(project.ioc(keys::ioc::STATUS), keys::status::GENERATED);

    let substitutions = fs::read_to_string(project.paths().substitutions()).unwrap();
    assert!(substitutions.contains("file db/a.db {\n    pattern { P }\n        { X }\n}\n"));

    let script = fs::read_to_string(project.paths().startup_script()).unwrap();
    let init = script.find("iocInit").unwrap();
    let setup = script.find("set_savefile_path(\"$(SAVE_DIR)\")").unwrap();
    let trigger = script.find("create_monitor_set(\"demo-automake.req\",10)").unwrap();
    assert!(setup < init && init < trigger);

    match project.snapshot().check().unwrap() {
        SnapshotCheck::Checked(report) => assert!(report.consistent, "{}", report.summary()),
        SnapshotCheck::NotTracked => panic!("generation must take a snapshot"),
    }
}

#[test]
fn test_missing_database_keeps_previous_script() {
    let ws = Workspace::new();
    let mut project = configured(&ws, "autosave", "a.db, P=X");
    project.generate(GenerateOptions::default(), &AlwaysNo).unwrap();
    let before = fs::read(project.paths().startup_script()).unwrap();

    project.set_option("DB", "load", "missing.db, P=X").unwrap();
    let outcome = project.generate(GenerateOptions::default(), &AlwaysNo).unwrap();

    assert!(outcome.is_blocked());
    assert!(outcome.written.is_empty());
    assert_eq!(fs::read(project.paths().startup_script()).unwrap(), before);
    assert_eq!(project.state().level, StateLevel::Warning);
    assert!(project.state().info.contains("db file \"missing.db\" not found"));
}

fn hidden_files(dir: &Path) -> Vec<String> {
    fs::read_dir(dir)
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .filter(|name| name.starts_with('.'))
        .collect()
}

#[test]
fn test_unwritable_runtime_records_failure() {
    let ws = Workspace::new();
    let mut project = configured(&ws, "autosave", "a.db, P=X");
    let db = project.paths().db.clone();
    fs::remove_dir_all(&db).unwrap();
    fs::write(&db, "not a directory").unwrap();

    let err = project
        .generate(GenerateOptions::default(), &AlwaysNo)
        .unwrap_err();

    assert!(format!("{err:#}").contains("failed to generate startup files for 'demo'"));
    assert_eq!(project.state().level, StateLevel::Warning);
    assert!(project.state().info.contains("startup files generating failed."));
    assert_eq!(project.ioc(keys::ioc::STATUS), keys::status::CREATED);
    assert!(!project.paths().startup_script().exists());

    let reopened = Project::open(&project.paths().dir, &ws.env).unwrap();
    assert_eq!(reopened.state().level, StateLevel::Warning);
}

#[test]
fn test_failed_write_keeps_previous_artifacts() {
    let ws = Workspace::new();
    let mut project = configured(&ws, "autosave", "a.db, P=X");
    project.generate(GenerateOptions::default(), &AlwaysNo).unwrap();
    let paths = project.paths().clone();
    let script = fs::read(paths.startup_script()).unwrap();
    let substitutions = fs::read(paths.substitutions()).unwrap();
    let database = fs::read(paths.db.join("a.db")).unwrap();

    fs::remove_file(paths.src.join("a.db")).unwrap();
    fs::write(paths.src.join("a.db"), "record(ao, \"$(P):ao\") {}\n").unwrap();
    fs::write(paths.src.join("b.db"), "record(bi, \"$(P):bi\") {}\n").unwrap();
    fs::create_dir_all(paths.db.join("b.db")).unwrap();
    fs::write(paths.db.join("b.db").join("stale"), "").unwrap();
    project.set_option("DB", "load", "a.db, P=Y\nb.db").unwrap();

    assert!(project.generate(GenerateOptions::default(), &AlwaysNo).is_err());

    assert_eq!(fs::read(paths.startup_script()).unwrap(), script);
    assert_eq!(fs::read(paths.substitutions()).unwrap(), substitutions);
    assert_eq!(fs::read(paths.db.join("a.db")).unwrap(), database);
    assert!(hidden_files(&paths.db).is_empty());
    assert!(hidden_files(&paths.boot).is_empty());
    assert_eq!(project.state().level, StateLevel::Warning);
    assert!(project.state().info.contains("startup files generating failed."));
    assert_eq!(project.ioc(keys::ioc::STATUS), keys::status::GENERATED);
}

#[test]
fn test_invalid_module_token_writes_nothing() {
    let ws = Workspace::new();
    let mut project = configured(&ws, "autosave, bogus", "a.db");

    let outcome = project.generate(GenerateOptions::default(), &AlwaysYes).unwrap();

    assert!(outcome.is_blocked());
    assert!(!project.paths().startup_script().exists());
    assert!(!project.paths().substitutions().exists());
    assert_eq!(project.ioc(keys::ioc::STATUS), keys::status::CREATED);
    assert!(project.state().info.contains("module \"bogus\" is not supported"));
    assert_eq!(project.validate().len(), 1);
}

#[test]
fn test_forced_defaults_are_adopted() {
    let ws = Workspace::new();
    let mut project = configured(&ws, "", "a.db");
    project.set_option("IOC", "bin", "").unwrap();

    let outcome = project
        .generate(GenerateOptions { force_default: true }, &AlwaysNo)
        .unwrap();

    assert!(!outcome.is_blocked());
    assert_eq!(project.ioc(keys::ioc::BIN), "ST-IOC");
    assert_eq!(project.ioc(keys::ioc::MODULE), "autosave, caputlog");
    assert!(project.paths().settings.join("demo.acf").is_file());
}

#[test]
fn test_duplicate_import_never_overwrites() {
    let ws = Workspace::new();
    let mut project = ws.create("demo");
    let incoming = ws.incoming(&[("a.db", "first")]);
    project.sources().import(&incoming).unwrap();

    fs::write(incoming.join("a.db"), "second").unwrap();
    let report = project.sources().import(&incoming).unwrap();

    assert_eq!(report.skipped, vec!["a.db"]);
    assert_eq!(project.config().get(keys::SRC, keys::src::DB_FILE), "a.db");
    assert_eq!(
        fs::read_to_string(project.paths().src.join("a.db")).unwrap(),
        "first"
    );
}

#[test]
fn test_open_heals_renamed_directory() {
    let ws = Workspace::new();
    let project = ws.create("demo");
    let renamed = ws.env.project_dir("renamed");
    fs::rename(&project.paths().dir, &renamed).unwrap();

    let project = Project::open(&renamed, &ws.env).unwrap();

    assert_eq!(project.name(), "renamed");
    assert_eq!(project.ioc(keys::ioc::NAME), "renamed");
}

#[test]
fn test_open_normalizes_idempotently() {
    let ws = Workspace::new();
    let dir = ws.env.project_dir("demo");
    fs::create_dir_all(dir.join("src")).unwrap();
    fs::write(
        dir.join("ioc.toml"),
        "[ioc]\nname = \"demo\"\nmodule = \"  autosave  \"\n\n\
         [db]\nload = [\"a.db, P=X\", \"  \", \" b.db \"]\n",
    )
    .unwrap();

    let project = Project::open(&dir, &ws.env).unwrap();
    assert_eq!(project.ioc(keys::ioc::MODULE), "autosave");
    assert_eq!(project.config().get(keys::DB, keys::db::LOAD), "a.db, P=X\nb.db");
    let once = fs::read(dir.join("ioc.toml")).unwrap();

    Project::open(&dir, &ws.env).unwrap();
    assert_eq!(fs::read(dir.join("ioc.toml")).unwrap(), once);
}

#[test]
fn test_error_state_is_absorbing() {
    let ws = Workspace::new();
    let mut project = configured(&ws, "bogus", "a.db");

    assert!(project.sources().import(&ws.temp.path().join("nowhere")).is_err());
    project.generate(GenerateOptions::default(), &AlwaysNo).unwrap();

    assert_eq!(project.state().level, StateLevel::Error);
    let reopened = Project::open(&project.paths().dir, &ws.env).unwrap();
    assert_eq!(reopened.state().level, StateLevel::Error);
}

#[test]
fn test_soft_remove_flags_status() {
    let ws = Workspace::new();
    let mut project = configured(&ws, "autosave", "a.db");
    project.generate(GenerateOptions::default(), &AlwaysNo).unwrap();

    project.remove(RemoveMode::Soft).unwrap();

    assert!(!project.paths().startup.exists());
    assert!(!project.paths().log.exists());
    assert!(project.paths().src.join("a.db").is_file());
    assert_eq!(project.ioc(keys::ioc::STATUS), keys::status::REMOVED);
}

#[test]
fn test_remove_all_deletes_snapshot() {
    let ws = Workspace::new();
    let mut project = configured(&ws, "autosave", "a.db");
    project.generate(GenerateOptions::default(), &AlwaysNo).unwrap();
    let snapshot = project.paths().snapshot.clone();
    assert!(snapshot.is_dir());

    project.remove(RemoveMode::All).unwrap();

    assert!(!snapshot.exists());
    assert!(!project.paths().dir.exists());
}
