use std::fs;

use iocman_codegen::{GenerationContext, Pipeline, Severity, TracingPlugin};
use iocman_config::{ConfigStore, EnvironmentConfig, ProjectPaths, SourceListing, keys};
use iocman_core::{AlwaysNo, fs::list_files};
use tempfile::TempDir;

struct Project {
    env: EnvironmentConfig,
    paths: ProjectPaths,
    _temp: TempDir,
}

impl Project {
    fn new(sources: &[(&str, &str)]) -> Self {
        let temp = TempDir::new().unwrap();
        let env = EnvironmentConfig::under_root(temp.path());
        let paths = ProjectPaths::derive(&env, &env.project_dir("demo"));
        fs::create_dir_all(&paths.src).unwrap();
        fs::create_dir_all(&env.template_root).unwrap();
        fs::write(env.template_root.join("template.acf"), "ASG(DEFAULT) {}\n").unwrap();
        for (name, content) in sources {
            fs::write(paths.src.join(name), content).unwrap();
        }
        Self {
            env,
            paths,
            _temp: temp,
        }
    }

    fn config(&self, module: &str, load: &str) -> ConfigStore {
        let mut config = ConfigStore::new(&self.paths.config_file);
        config.set(keys::IOC, keys::ioc::NAME, "demo");
        config.set(keys::IOC, keys::ioc::BIN, "ST-IOC");
        config.set(keys::IOC, keys::ioc::MODULE, module);
        config.set(keys::DB, keys::db::LOAD, load);
        config
    }

    fn context(&self, config: ConfigStore) -> GenerationContext<'_> {
        let names = list_files(&self.paths.src).unwrap();
        let sources = SourceListing::classify(&self.env, &names);
        GenerationContext::new(config, &self.env, &self.paths, sources, &AlwaysNo)
    }
}

#[test]
fn test_generates_autosave_project() {
    let project = Project::new(&[("a.db", "record(ai, \"$(P)\") {}\n")]);
    let mut ctx = project.context(project.config("autosave", "a.db, P=X"));

    Pipeline::new().plugin(TracingPlugin).run(&mut ctx).unwrap();

    let script = fs::read_to_string(project.paths.startup_script()).unwrap();
    insta::assert_snapshot!(script, @r##"
    #!/opt/EPICS/IOC/ST-IOC/bin/linux-x86_64/ST-IOC

    cd /opt/EPICS/IOC/ST-IOC/iocBoot/iocST-IOC
    < envPaths

    cd "${TOP}"
    dbLoadDatabase "dbd/ST-IOC.dbd"
    ST_IOC_registerRecordDeviceDriver pdbbase

    #settings

    #autosave
    epicsEnvSet REQ_DIR /opt/EPICS/RUN/demo/settings/autosave
    epicsEnvSet SAVE_DIR /opt/EPICS/RUN/demo/log/autosave
    set_requestfile_path("$(REQ_DIR)")
    set_savefile_path("$(SAVE_DIR)")
    set_pass0_restoreFile("demo-automake-pass0.sav")
    set_pass1_restoreFile("demo-automake.sav")
    save_restoreSet_DatedBackupFiles(1)
    save_restoreSet_NumSeqFiles(3)
    save_restoreSet_SeqPeriodInSeconds(600)
    save_restoreSet_RetrySeconds(60)
    save_restoreSet_CallbackTimeout(-1)

    cd /opt/EPICS/RUN/demo/startup
    dbLoadTemplate "db/demo.substitutions"

    iocInit

    #autosave after iocInit
    makeAutosaveFileFromDbInfo("$(REQ_DIR)/demo-automake-pass0.req","autosaveFields_pass0")
    makeAutosaveFileFromDbInfo("$(REQ_DIR)/demo-automake.req","autosaveFields")
    create_monitor_set("demo-automake-pass0.req",10)
    create_monitor_set("demo-automake.req",10)
    "##);

    let substitutions = fs::read_to_string(project.paths.substitutions()).unwrap();
    assert_eq!(
        substitutions,
        "# Generated by iocman. Do not edit.\n\n\
         file db/a.db {\n    pattern { P }\n        { X }\n}\n"
    );
    assert!(project.paths.db.join("a.db").is_file());
    assert!(project.paths.log.join("autosave").is_dir());
    assert!(project.paths.settings.join("autosave").is_dir());
}

#[test]
fn test_missing_database_writes_nothing() {
    let project = Project::new(&[]);
    let mut ctx = project.context(project.config("autosave", "a.db, P=X"));

    assert!(Pipeline::new().run(&mut ctx).is_err());

    assert!(ctx.errors().any(|d| d.message == "db file \"a.db\" not found"));
    assert!(!project.paths.startup_script().exists());
    assert!(!project.paths.log.join("autosave").exists());
}

#[test]
fn test_invalid_module_token_stops_before_contributions() {
    let project = Project::new(&[("a.db", "")]);
    let mut ctx = project.context(project.config("autosave, status", "a.db"));

    assert!(Pipeline::new().run(&mut ctx).is_err());

    let errors: Vec<_> = ctx.errors().collect();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].severity, Severity::Error);
    assert_eq!(errors[0].phase, "validate");
    assert!(ctx.buffers.before_load.is_empty());
    assert!(!project.paths.runtime.exists());
}

#[test]
fn test_missing_executable_needs_confirmation() {
    let project = Project::new(&[("a.db", "")]);
    let mut config = project.config("", "a.db");
    config.set(keys::IOC, keys::ioc::BIN, "");
    let mut ctx = project.context(config);

    assert!(Pipeline::new().run(&mut ctx).is_err());
    assert!(ctx.errors().any(|d| d.message == "no executable IOC specified"));

    let mut ctx = project
        .context(ctx.config.clone())
        .with_options(iocman_codegen::GenerateOptions { force_default: true });
    Pipeline::new().run(&mut ctx).unwrap();

    assert_eq!(ctx.config.get(keys::IOC, keys::ioc::BIN), "ST-IOC");
    assert_eq!(ctx.config.get(keys::IOC, keys::ioc::MODULE), "autosave, caputlog");
    assert!(project.paths.settings.join("demo.acf").is_file());
}
