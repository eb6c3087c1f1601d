/// How the session advances after the user acts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunMode {
    /// Paused, waiting for the next step or continue.
    #[default]
    Paused,
    /// One instruction at a time.
    Step,
    /// Run until a trap or program exit.
    Continue,
}

/// Status the execution engine reports after each instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecStatus {
    Running,
    Exited,
    ExitedWithFailure,
    TrapHit,
}

impl ExecStatus {
    /// Execution cannot continue after this status.
    pub fn is_exit(self) -> bool {
        matches!(self, ExecStatus::Exited | ExecStatus::ExitedWithFailure)
    }

    /// A continuous run stops on this status.
    pub fn stops_run(self) -> bool {
        self != ExecStatus::Running
    }
}
