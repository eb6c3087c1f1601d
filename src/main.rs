use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use clap::{Args, Parser, Subcommand};
use log::{debug, LevelFilter};

use rv_debugger::build_instrumented_document;
use rv_debugger::debugger::{
    instruction_index, parse_address, resolve_in, BreakpointSet, InstrumentedDocument,
};
use rv_debugger::executor::{create_source_file, Workspace};
use rv_debugger::highlight::{highlight_line, render_ansi, Theme};
use rv_debugger::isa::Rv32Table;
use rv_debugger::parser::split_source;
use rv_debugger::prefs::{self, Preferences};

#[derive(Parser, Debug)]
#[command(author, version, about = "Breakpoint instrumentation and line mapping for RISC-V assembly")]
struct Cli {
    /// Preferences file (default: user config directory)
    #[arg(long, global = true, env = prefs::PREFS_ENV)]
    prefs: Option<PathBuf>,

    /// Append log output to this file instead of stderr
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    /// More log output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Args, Debug)]
struct SourceArgs {
    /// Assembly source file
    file: PathBuf,

    /// Breakpoint line (1-based), repeatable
    #[arg(short, long = "break", value_name = "LINE")]
    breakpoints: Vec<usize>,
}

impl SourceArgs {
    fn load(&self) -> Result<(Vec<String>, BreakpointSet)> {
        let text = fs::read_to_string(&self.file)
            .with_context(|| format!("failed to read {}", self.file.display()))?;
        let mut bp = BreakpointSet::new();
        for &line in &self.breakpoints {
            if line == 0 {
                return Err(anyhow!("line numbers start at 1"));
            }
            bp.add(line - 1);
        }
        Ok((split_source(&text), bp))
    }
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the source with trap instructions injected at breakpoints
    Instrument {
        #[command(flatten)]
        source: SourceArgs,

        /// Write the assembler input file next to the source and print its path
        #[arg(long)]
        write: bool,
    },
    /// Map instruction indices or program counters to source lines
    Resolve {
        #[command(flatten)]
        source: SourceArgs,

        /// 1-based instruction index, repeatable
        #[arg(short = 'k', long = "index")]
        indices: Vec<usize>,

        /// Program counter (hex), repeatable
        #[arg(long = "pc", value_parser = parse_hex)]
        pcs: Vec<u32>,

        /// Address of the first instruction (hex)
        #[arg(long, default_value = "0", value_parser = parse_hex)]
        base: u32,
    },
    /// Print the source with syntax colouring
    Highlight {
        file: PathBuf,

        /// Theme name; defaults to the preferences
        #[arg(long)]
        theme: Option<String>,
    },
    /// Create an empty source file and remember it
    New { dir: PathBuf, name: String },
    /// Show or change preferences
    Prefs {
        #[command(subcommand)]
        action: Option<PrefsAction>,
    },
}

#[derive(Subcommand, Debug)]
enum PrefsAction {
    Show,
    Reset,
    Recent { file: String },
    ClearRecent,
    Project { dir: String },
    Theme { name: String },
    Autosave {
        #[arg(value_parser = ["on", "off"])]
        state: String,
        seconds: Option<u32>,
    },
}

fn parse_hex(s: &str) -> std::result::Result<u32, String> {
    parse_address(s).map_err(|e| e.to_string())
}

fn init_logging(cli: &Cli) -> Result<()> {
    let level = match cli.verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    let mut builder = env_logger::Builder::new();
    builder.filter_level(level).parse_default_env();
    if let Some(path) = &cli.log_file {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("failed to open log file {}", path.display()))?;
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }
    builder.init();
    Ok(())
}

fn prefs_path(cli: &Cli) -> Result<PathBuf> {
    cli.prefs
        .clone()
        .or_else(prefs::default_path)
        .ok_or_else(|| anyhow!("cannot locate a config directory; pass --prefs"))
}

fn instrument(source: &SourceArgs, write: bool, out: &mut impl Write) -> Result<()> {
    let (lines, bp) = source.load()?;
    let doc = build_instrumented_document(&lines, &bp, &Rv32Table);
    if write {
        let path = Workspace::for_source(&source.file).write_instrumented(&doc.to_text())?;
        writeln!(out, "{}", path.display())?;
    } else {
        write!(out, "{}", doc.to_text())?;
    }
    Ok(())
}

fn print_resolved(
    doc: &InstrumentedDocument,
    label: &str,
    k: Option<usize>,
    out: &mut impl Write,
) -> Result<()> {
    match k.and_then(|k| resolve_in(doc, k, &Rv32Table)) {
        Some(line) => writeln!(out, "{} -> {}", label, line + 1)?,
        None => writeln!(out, "{} -> -", label)?,
    }
    Ok(())
}

fn resolve(
    source: &SourceArgs,
    indices: &[usize],
    pcs: &[u32],
    base: u32,
    out: &mut impl Write,
) -> Result<()> {
    let (lines, bp) = source.load()?;
    let doc = build_instrumented_document(&lines, &bp, &Rv32Table);
    debug!("{} trap(s) injected", doc.injected_count());
    for &k in indices {
        print_resolved(&doc, &format!("k={}", k), Some(k), out)?;
    }
    for &pc in pcs {
        print_resolved(&doc, &format!("pc=0x{:x}", pc), instruction_index(pc, base), out)?;
    }
    Ok(())
}

fn highlight(file: &Path, theme: Theme, out: &mut impl Write) -> Result<()> {
    let text =
        fs::read_to_string(file).with_context(|| format!("failed to read {}", file.display()))?;
    for line in split_source(&text) {
        let spans = highlight_line(&line, &Rv32Table);
        writeln!(out, "{}", render_ansi(&line, &spans, theme))?;
    }
    Ok(())
}

fn prefs_command(path: &Path, action: Option<&PrefsAction>, out: &mut impl Write) -> Result<()> {
    let mut prefs = Preferences::load_or_init(path)?;
    match action {
        None | Some(PrefsAction::Show) => {
            writeln!(out, "{}", serde_json::to_string_pretty(&prefs)?)?;
            return Ok(());
        }
        Some(PrefsAction::Reset) => prefs = Preferences::default(),
        Some(PrefsAction::Recent { file }) => prefs.add_recent_file(file),
        Some(PrefsAction::ClearRecent) => prefs.clear_recent_files(),
        Some(PrefsAction::Project { dir }) => prefs.set_last_opened_project(dir),
        Some(PrefsAction::Theme { name }) => {
            prefs.set_dark_mode(Theme::from_name(name) == Theme::Dark)
        }
        Some(PrefsAction::Autosave { state, seconds }) => {
            let interval = seconds.unwrap_or(prefs.auto_save_interval);
            prefs.set_auto_save(state == "on", interval);
        }
    }
    prefs.save(path)?;
    writeln!(out, "saved {}", path.display())?;
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match &cli.command {
        Command::Instrument { source, write } => instrument(source, *write, &mut out)?,
        Command::Resolve {
            source,
            indices,
            pcs,
            base,
        } => resolve(source, indices, pcs, *base, &mut out)?,
        Command::Highlight { file, theme } => {
            let theme = match theme {
                Some(name) => Theme::from_name(name),
                None => Preferences::load_or_init(&prefs_path(&cli)?)?.theme(),
            };
            highlight(file, theme, &mut out)?;
        }
        Command::New { dir, name } => {
            let path = create_source_file(dir, name)?;
            let prefs_file = prefs_path(&cli)?;
            let mut prefs = Preferences::load_or_init(&prefs_file)?;
            prefs.add_recent_file(&path.display().to_string());
            prefs.save(&prefs_file)?;
            writeln!(out, "{}", path.display())?;
        }
        Command::Prefs { action } => {
            prefs_command(&prefs_path(&cli)?, action.as_ref(), &mut out)?
        }
    }
    Ok(())
}
