mod background;
mod console;
mod repl;
mod runner;
mod workspace;

pub use background::{spawn_run, RunEvent, Worker};
pub use console::{Console, MAX_LINES};
pub use repl::run_interactive;
pub use runner::Debugger;
pub use workspace::{
    create_source_file, ensure_asm_extension, with_default_extension, Workspace, ASSEMBLING_DIR,
};
