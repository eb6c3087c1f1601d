use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::{Duration, Instant};

use log::{debug, error, info, warn};

use super::background::{spawn_run, RunEvent, Worker};
use super::console::Console;
use super::workspace::{with_default_extension, Workspace};
use crate::debugger::{
    memory_rows, parse_address, register_rows, Assembler, DebugContext, ExecStatus,
    ExecutionEngine, InstrumentedDocument, MemoryRow, RegisterRow, RunMode,
};
use crate::error::{DebugError, Result};
use crate::isa::{InstructionSet, Rv32Table};
use crate::prefs::Preferences;
use crate::surface::EditorSurface;

/// An assembled, not yet loaded, instrumented program.
struct Build {
    program: PathBuf,
    source: Vec<String>,
    doc: InstrumentedDocument,
}

/// Console text for a failed build: assembler output without the
/// error-kind prefix.
fn failure_detail(e: &DebugError) -> String {
    match e {
        DebugError::Assembly(detail) | DebugError::Load(detail) => detail.clone(),
        other => other.to_string(),
    }
}

/// Host-side driver of a debug session: owns the session context, the
/// engine and the assembler, and keeps an editor surface in sync.
pub struct Debugger<E, A>
where
    E: ExecutionEngine + 'static,
    A: Assembler,
{
    engine: Arc<Mutex<E>>,
    assembler: A,
    isa: Box<dyn InstructionSet + Send + Sync>,
    ctx: DebugContext,
    console: Console,
    worker: Option<Worker>,
    autosave_from: Option<Instant>,
}

impl<E, A> Debugger<E, A>
where
    E: ExecutionEngine + 'static,
    A: Assembler,
{
    pub fn new(engine: E, assembler: A) -> Self {
        Self::with_isa(engine, assembler, Rv32Table)
    }

    pub fn with_isa<I>(engine: E, assembler: A, isa: I) -> Self
    where
        I: InstructionSet + Send + Sync + 'static,
    {
        Self {
            engine: Arc::new(Mutex::new(engine)),
            assembler,
            isa: Box::new(isa),
            ctx: DebugContext::new(),
            console: Console::new(),
            worker: None,
            autosave_from: None,
        }
    }

    pub fn context(&self) -> &DebugContext {
        &self.ctx
    }

    pub fn console(&self) -> &Console {
        &self.console
    }

    pub fn console_mut(&mut self) -> &mut Console {
        &mut self.console
    }

    pub fn is_debugging(&self) -> bool {
        self.ctx.is_debugging()
    }

    pub fn is_running(&self) -> bool {
        self.worker.is_some()
    }

    fn engine(&self) -> MutexGuard<'_, E> {
        self.engine.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn pc(&self) -> u32 {
        self.engine().pc()
    }

    /// Load `path` into the editor.
    pub fn open<S: EditorSurface>(&mut self, path: &Path, surface: &mut S) -> Result<()> {
        let text = fs::read_to_string(path)?;
        surface.set_text(&text);
        self.ctx.set_source_path(path);
        self.autosave_from = None;
        info!("opened {}", path.display());
        Ok(())
    }

    /// [`Debugger::open`], then put the file at the top of the recent list.
    pub fn open_recent<S: EditorSurface>(
        &mut self,
        path: &Path,
        surface: &mut S,
        prefs: &mut Preferences,
    ) -> Result<()> {
        self.open(path, surface)?;
        prefs.add_recent_file(&path.display().to_string());
        Ok(())
    }

    /// Write the editor text back to the current file.
    pub fn save<S: EditorSurface>(&mut self, surface: &S) -> Result<PathBuf> {
        let path = self.ctx.source_path().ok_or(DebugError::NoFile)?.to_path_buf();
        fs::write(&path, surface.text())?;
        Ok(path)
    }

    /// Save under a new name and keep editing that file. A name without any
    /// extension gets `.asm`.
    pub fn save_as<S: EditorSurface>(&mut self, path: &Path, surface: &S) -> Result<PathBuf> {
        let path = with_default_extension(path);
        self.ctx.set_source_path(&path);
        let saved = self.save(surface)?;
        info!("saved as {}", saved.display());
        Ok(saved)
    }

    /// Save the open file if autosave is enabled and its interval has passed
    /// since the file was opened or last autosaved. Returns whether it saved.
    pub fn autosave_if_due<S: EditorSurface>(
        &mut self,
        now: Instant,
        prefs: &Preferences,
        surface: &S,
    ) -> Result<bool> {
        if !prefs.auto_save_enabled || prefs.auto_save_interval == 0 {
            return Ok(false);
        }
        if self.ctx.source_path().is_none() {
            return Ok(false);
        }
        let Some(from) = self.autosave_from else {
            self.autosave_from = Some(now);
            return Ok(false);
        };
        let interval = Duration::from_secs(u64::from(prefs.auto_save_interval));
        if now.saturating_duration_since(from) < interval {
            return Ok(false);
        }
        let path = self.save(surface)?;
        self.autosave_from = Some(now);
        debug!("autosaved {}", path.display());
        Ok(true)
    }

    /// Apply gutter clicks reported by the surface.
    pub fn sync_breakpoints<S: EditorSurface>(&mut self, surface: &mut S) {
        for line in surface.take_breakpoint_toggles() {
            self.ctx.toggle_breakpoint(line);
        }
        surface.show_breakpoints(self.ctx.breakpoints());
    }

    /// Toggle a breakpoint from the host side. Takes effect on the next
    /// start or hot reload.
    pub fn toggle_breakpoint<S: EditorSurface>(&mut self, line: usize, surface: &mut S) -> bool {
        let set = self.ctx.toggle_breakpoint(line);
        surface.show_breakpoints(self.ctx.breakpoints());
        set
    }

    /// Instrument the editor text, write it out and assemble it. The session
    /// context is left untouched.
    fn build<S: EditorSurface>(&mut self, surface: &mut S) -> Result<Build> {
        let path = self.save(surface)?;
        self.sync_breakpoints(surface);

        let (source, doc) = self.ctx.stage(&surface.text(), self.isa.as_ref());
        let workspace = Workspace::for_source(&path);
        let temp = workspace.write_instrumented(&doc.to_text()).map_err(|e| {
            self.console
                .push("Failed to create temporary file with breakpoints.");
            DebugError::Io(e)
        })?;

        let program = self
            .assembler
            .assemble(&temp, workspace.assembling_dir())
            .map_err(|e| {
                error!("assembly of {} failed: {:#}", temp.display(), e);
                DebugError::Assembly(format!("{:#}", e))
            })?;
        Ok(Build {
            program,
            source,
            doc,
        })
    }

    /// Start a debug session on the open file.
    pub fn start<S: EditorSurface>(&mut self, surface: &mut S) -> Result<()> {
        if self.ctx.is_debugging() {
            self.stop(surface);
        }
        self.console.clear();
        self.console.push("Assembling code with breakpoints...");

        let build = match self.build(surface) {
            Ok(build) => build,
            Err(e) => {
                let label = match e {
                    DebugError::Assembly(_) => "Assembly failed",
                    _ => "Debug failed",
                };
                self.console
                    .push(&format!("{}: {}", label, failure_detail(&e)));
                self.ctx.stop(false);
                return Err(e);
            }
        };
        self.console
            .push("Assembly successful.\nStarting debugger...");

        self.ctx.begin();
        let loaded = {
            let mut engine = self.engine();
            engine.reset();
            engine.load(&build.program)
        };
        if let Err(e) = loaded {
            self.console.push(&format!("Debug failed: {:#}", e));
            self.stop(surface);
            return Err(DebugError::Load(format!("{:#}", e)));
        }

        self.ctx.commit(build.source, build.doc);
        self.refresh_highlight(surface);
        self.console
            .push("Debug session started. Use Step or Continue.");
        Ok(())
    }

    fn ensure_paused(&self) -> Result<()> {
        if !self.ctx.is_debugging() {
            return Err(DebugError::NotDebugging);
        }
        if self.worker.is_some() {
            return Err(DebugError::Command("program is running".to_string()));
        }
        Ok(())
    }

    fn refresh_highlight<S: EditorSurface>(&mut self, surface: &mut S) -> Option<usize> {
        let (pc, base) = {
            let engine = self.engine();
            (engine.pc(), engine.text_base())
        };
        let line = self.ctx.update_highlight(pc, base, self.isa.as_ref());
        surface.highlight_line(line);
        line
    }

    /// Report `status` on the console and update the editor.
    fn apply_status<S: EditorSurface>(&mut self, status: ExecStatus, surface: &mut S) {
        let pc = self.pc();
        match status {
            ExecStatus::Exited => {
                self.console.push("Program exited normally");
                self.stop(surface);
            }
            ExecStatus::ExitedWithFailure => {
                self.console.push("Program exited with failure");
                self.stop(surface);
            }
            ExecStatus::TrapHit => {
                self.console.push(&format!("Breakpoint hit at 0x{:x}", pc));
                self.ctx.set_mode(RunMode::Paused);
                self.refresh_highlight(surface);
            }
            ExecStatus::Running => {
                self.console
                    .push(&format!("PC (4byte/instructions) = {}", pc));
                self.refresh_highlight(surface);
            }
        }
    }

    /// Execute one instruction.
    pub fn step<S: EditorSurface>(&mut self, surface: &mut S) -> Result<ExecStatus> {
        self.ensure_paused()?;
        self.ctx.set_mode(RunMode::Step);
        let status = self.engine().step();
        debug!("step -> {:?}", status);
        self.apply_status(status, surface);
        Ok(status)
    }

    /// Run on the calling thread until a trap or exit, or until `budget`
    /// instructions have executed.
    pub fn continue_run<S: EditorSurface>(
        &mut self,
        budget: Option<usize>,
        surface: &mut S,
    ) -> Result<ExecStatus> {
        self.ensure_paused()?;
        self.ctx.set_mode(RunMode::Continue);
        let mut steps = 0usize;
        let status = loop {
            let status = self.engine().step();
            steps += 1;
            if status.stops_run() || budget.is_some_and(|b| steps >= b) {
                break status;
            }
        };
        debug!("continue -> {:?} after {} step(s)", status, steps);
        self.apply_status(status, surface);
        Ok(status)
    }

    /// Run on a worker thread; the editor stays responsive and picks up the
    /// outcome through [`Debugger::poll`] or [`Debugger::wait`].
    pub fn continue_in_background(&mut self, budget: Option<usize>) -> Result<()> {
        self.ensure_paused()?;
        self.ctx.set_mode(RunMode::Continue);
        self.worker = Some(spawn_run(self.engine.clone(), budget));
        Ok(())
    }

    fn finish_run<S: EditorSurface>(&mut self, event: RunEvent, surface: &mut S) -> ExecStatus {
        if let Some(worker) = self.worker.take() {
            worker.cancel();
        }
        debug!(
            "background run -> {:?} at 0x{:x} after {} step(s)",
            event.status, event.pc, event.steps
        );
        self.apply_status(event.status, surface);
        event.status
    }

    /// Apply the background run's outcome if it has stopped.
    pub fn poll<S: EditorSurface>(&mut self, surface: &mut S) -> Option<ExecStatus> {
        let event = self.worker.as_ref()?.try_event()?;
        Some(self.finish_run(event, surface))
    }

    /// Block until the background run stops.
    pub fn wait<S: EditorSurface>(&mut self, surface: &mut S) -> Option<ExecStatus> {
        let event = self.worker.as_ref()?.wait()?;
        Some(self.finish_run(event, surface))
    }

    /// Reassemble the current editor text (with current breakpoints) and
    /// reload it without resetting the program counter.
    ///
    /// If assembly fails the engine keeps running the previous program and
    /// highlights keep mapping against it. If loading fails the engine has
    /// already been reset, so the session is stopped.
    pub fn hot_reload<S: EditorSurface>(&mut self, surface: &mut S) -> Result<()> {
        self.ensure_paused()?;
        let build = match self.build(surface) {
            Ok(build) => build,
            Err(e) => {
                warn!("hot reload failed: {}", e);
                self.console.push(&format!(
                    "Hot reload failed, error Assembling:\n {}",
                    failure_detail(&e)
                ));
                return Err(e);
            }
        };

        let loaded = {
            let mut engine = self.engine();
            let pc = engine.pc();
            engine.reset();
            let loaded = engine.load(&build.program);
            engine.set_pc(pc);
            loaded
        };
        if let Err(e) = loaded {
            self.console
                .push(&format!("Hot reload failed, error LoadingFile:\n {:#}", e));
            self.stop(surface);
            return Err(DebugError::Load(format!("{:#}", e)));
        }
        self.ctx.commit(build.source, build.doc);
        info!("hot reload complete");
        self.refresh_highlight(surface);
        Ok(())
    }

    /// End the session. Safe to call when nothing is running.
    pub fn stop<S: EditorSurface>(&mut self, surface: &mut S) {
        if let Some(worker) = self.worker.take() {
            worker.cancel();
        }
        if !self.ctx.is_debugging() {
            return;
        }
        self.ctx.stop(false);
        surface.highlight_line(None);
        self.console.push("Debug session stopped.");
    }

    /// Assemble the saved file unmodified and run it to completion, or for
    /// at most `budget` instructions.
    pub fn run<S: EditorSurface>(
        &mut self,
        budget: Option<usize>,
        surface: &mut S,
    ) -> Result<ExecStatus> {
        if self.ctx.is_debugging() {
            self.stop(surface);
        }
        let source = self.save(surface)?;
        let workspace = Workspace::for_source(&source);
        workspace.prepare()?;

        self.console.clear();
        self.console.push("Assembling code...");
        let program = self
            .assembler
            .assemble(&source, workspace.assembling_dir())
            .map_err(|e| {
                self.console.push(&format!("Assembly failed: {:#}", e));
                DebugError::Assembly(format!("{:#}", e))
            })?;
        self.console.push("Assembly successful.\nRunning code...");

        let mut engine = self.engine.lock().unwrap_or_else(|e| e.into_inner());
        engine.reset();
        if let Err(e) = engine.load(&program) {
            self.console.push(&format!("Execution failed: {:#}", e));
            return Err(DebugError::Load(format!("{:#}", e)));
        }
        let mut steps = 0usize;
        let status = loop {
            let status = engine.step();
            steps += 1;
            if status.is_exit() || budget.is_some_and(|b| steps >= b) {
                break status;
            }
        };
        drop(engine);
        self.console.push("Program execution finished.");
        Ok(status)
    }

    pub fn registers(&self) -> Result<Vec<RegisterRow>> {
        if !self.ctx.is_debugging() {
            return Err(DebugError::NotDebugging);
        }
        Ok(register_rows(&self.engine().registers()))
    }

    pub fn memory(&self, address: &str) -> Result<Vec<MemoryRow>> {
        if !self.ctx.is_debugging() {
            return Err(DebugError::NotDebugging);
        }
        let start = parse_address(address)?;
        Ok(memory_rows(&*self.engine(), start))
    }
}
