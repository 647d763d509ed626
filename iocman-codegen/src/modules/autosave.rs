use super::Contributor;
use crate::pipeline::GenerationContext;

/// Save/restore setup before load, monitor sets after init.
pub struct Autosave;

impl Contributor for Autosave {
    fn contribute(&self, ctx: &mut GenerationContext<'_>) {
        let name = ctx.paths.name.clone();

        ctx.buffers
            .before_load
            .push_comment("autosave")
            .push_line(&format!(
                "epicsEnvSet REQ_DIR {}/autosave",
                ctx.paths.container_settings
            ))
            .push_line(&format!(
                "epicsEnvSet SAVE_DIR {}/autosave",
                ctx.paths.container_log
            ))
            .push_line("set_requestfile_path(\"$(REQ_DIR)\")")
            .push_line("set_savefile_path(\"$(SAVE_DIR)\")")
            .push_line(&format!("set_pass0_restoreFile(\"{name}-automake-pass0.sav\")"))
            .push_line(&format!("set_pass1_restoreFile(\"{name}-automake.sav\")"))
            .push_line("save_restoreSet_DatedBackupFiles(1)")
            .push_line("save_restoreSet_NumSeqFiles(3)")
            .push_line("save_restoreSet_SeqPeriodInSeconds(600)")
            .push_line("save_restoreSet_RetrySeconds(60)")
            .push_line("save_restoreSet_CallbackTimeout(-1)")
            .push_blank();

        ctx.buffers
            .after_init
            .push_comment("autosave after iocInit")
            .push_line(&format!(
                "makeAutosaveFileFromDbInfo(\"$(REQ_DIR)/{name}-automake-pass0.req\",\
                 \"autosaveFields_pass0\")"
            ))
            .push_line(&format!(
                "makeAutosaveFileFromDbInfo(\"$(REQ_DIR)/{name}-automake.req\",\"autosaveFields\")"
            ))
            .push_line(&format!("create_monitor_set(\"{name}-automake-pass0.req\",10)"))
            .push_line(&format!("create_monitor_set(\"{name}-automake.req\",10)"))
            .push_blank();

        ctx.create_dir(ctx.paths.log.join("autosave"));
        ctx.create_dir(ctx.paths.settings.join("autosave"));
    }
}
