use std::io::{self, BufRead, Write};

use super::runner::Debugger;
use crate::debugger::{Assembler, ExecutionEngine};
use crate::error::{DebugError, Result};
use crate::surface::{render_listing, EditorSurface};

const HELP: &str = "Commands: (s)tep, (c)ontinue, (b)reakpoint <line>, (r)egisters, \
(m)emory <addr>, reload, (l)ist, (q)uit";

fn flush_console<E, A, W>(dbg: &mut Debugger<E, A>, out: &mut W) -> io::Result<()>
where
    E: ExecutionEngine + 'static,
    A: Assembler,
    W: Write,
{
    for line in dbg.console_mut().take_unread() {
        writeln!(out, "{}", line)?;
    }
    out.flush()
}

fn parse_line_number(arg: &str) -> Result<usize> {
    match arg.parse::<usize>() {
        Ok(n) if n >= 1 => Ok(n - 1),
        _ => Err(DebugError::Command(format!("invalid line number: {}", arg))),
    }
}

/// Run one prompt command. Returns `false` when the loop should end.
fn dispatch<E, A, S, W>(
    words: &[&str],
    dbg: &mut Debugger<E, A>,
    surface: &mut S,
    out: &mut W,
) -> Result<bool>
where
    E: ExecutionEngine + 'static,
    A: Assembler,
    S: EditorSurface,
    W: Write,
{
    match words {
        [] | ["s"] | ["step"] => {
            dbg.step(surface)?;
        }
        ["c"] | ["continue"] => {
            dbg.continue_run(None, surface)?;
        }
        ["b", line] | ["break", line] => {
            let line = parse_line_number(line)?;
            if line >= dbg.context().source().len() {
                return Err(DebugError::InvalidLine(line + 1));
            }
            if dbg.toggle_breakpoint(line, surface) {
                writeln!(out, "Breakpoint set at line {} (applies on reload)", line + 1)?;
            } else {
                writeln!(out, "Breakpoint removed from line {}", line + 1)?;
            }
        }
        ["r"] | ["regs"] | ["registers"] => {
            for row in dbg.registers()? {
                writeln!(out, "{:<12} {}", row.name, row.value)?;
            }
        }
        ["m", addr] | ["mem", addr] | ["memory", addr] => {
            for row in dbg.memory(addr)? {
                writeln!(out, "{:<12} {:<6} {}", row.address, row.hex, row.ascii)?;
            }
        }
        ["reload"] => {
            dbg.hot_reload(surface)?;
        }
        ["l"] | ["list"] => {
            let ctx = dbg.context();
            let source = ctx.source();
            let listing = render_listing(source, ctx.breakpoints(), ctx.highlight(), 0..source.len());
            write!(out, "{}", listing)?;
        }
        ["q"] | ["quit"] => {
            dbg.stop(surface);
            return Ok(false);
        }
        ["h"] | ["help"] => {
            writeln!(out, "{}", HELP)?;
        }
        _ => {
            return Err(DebugError::Command(format!("unknown command: {}", words.join(" "))));
        }
    }
    Ok(true)
}

/// Terminal front end: start a session on the open file and read commands
/// from `input` until the program exits or the user quits.
pub fn run_interactive<E, A, S, R, W>(
    dbg: &mut Debugger<E, A>,
    surface: &mut S,
    input: R,
    out: &mut W,
) -> Result<()>
where
    E: ExecutionEngine + 'static,
    A: Assembler,
    S: EditorSurface,
    R: BufRead,
    W: Write,
{
    let started = dbg.start(surface);
    flush_console(dbg, out)?;
    started?;
    writeln!(out, "{}", HELP)?;

    let mut lines = input.lines();
    while dbg.is_debugging() {
        write!(out, "> ")?;
        out.flush()?;

        let Some(line) = lines.next() else {
            dbg.stop(surface);
            flush_console(dbg, out)?;
            break;
        };
        let line = line?;

        let result = match shlex::split(&line) {
            Some(words) => {
                let words: Vec<&str> = words.iter().map(String::as_str).collect();
                dispatch(&words, dbg, surface, out)
            }
            None => Err(DebugError::Command("unbalanced quotes".to_string())),
        };
        match result {
            Ok(true) => {}
            Ok(false) => {
                flush_console(dbg, out)?;
                break;
            }
            Err(DebugError::Io(e)) => return Err(DebugError::Io(e)),
            Err(e) => writeln!(out, "error: {}", e)?,
        }
        flush_console(dbg, out)?;
    }
    Ok(())
}
