//! Interactive read-eval-print loop

use std::sync::atomic::Ordering;

use anyhow::Context;
use lispy::{project, Interpreter, Output, OutputMode, Value, VERSION_INFO};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

const PROMPT: &str = "lispy> ";
const CONTINUATION: &str = "  ...> ";

/// Run the REPL until end of input.
///
/// Input is buffered until its brackets balance. Errors are reported and
/// the session continues with the next input.
pub fn run(interp: &Interpreter) -> anyhow::Result<()> {
    let mut editor = DefaultEditor::new()?;
    interrupt_on_ctrl_c(interp)?;
    println!("{}", VERSION_INFO);

    let mut buffer = String::new();
    loop {
        let prompt = if buffer.is_empty() { PROMPT } else { CONTINUATION };
        let line = match editor.readline(prompt) {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) if !buffer.is_empty() => {
                buffer.clear();
                continue;
            }
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => break,
            Err(err) => return Err(err.into()),
        };

        if !buffer.is_empty() {
            buffer.push('\n');
        }
        buffer.push_str(&line);
        if bracket_depth(&buffer) > 0 {
            continue;
        }

        let input = std::mem::take(&mut buffer);
        if input.trim().is_empty() {
            continue;
        }
        editor.add_history_entry(input.as_str())?;

        interp.context().reset_interrupt();
        match interp.evaluate(&input) {
            Ok(value) => {
                if let Some(output) = echo(value, interp.config().output) {
                    println!("{}", output);
                }
            }
            Err(err) => eprintln!("error: {}", err),
        }
    }
    Ok(())
}

/// Route SIGINT to the interpreter's interrupt flag.
///
/// While a line is being edited the terminal is in raw mode and Ctrl-C
/// reaches rustyline as a key instead; the signal only arrives while a
/// form is running, which then fails with `Interrupted`.
fn interrupt_on_ctrl_c(interp: &Interpreter) -> anyhow::Result<()> {
    let handle = interp.interrupt_handle();
    ctrlc::set_handler(move || handle.store(true, Ordering::Relaxed))
        .context("installing Ctrl-C handler")?;
    Ok(())
}

/// The REPL's rendering of `value`, or `None` when it is `null`.
///
/// Nullness is decided on the value itself, so a quoted `null` symbol
/// still echoes in every output mode.
pub fn echo(value: Value, mode: OutputMode) -> Option<Output> {
    (!value.is_null()).then(|| project(value, mode))
}

/// Count unclosed `[` in `source`, skipping strings and block comments.
///
/// A negative result means there are stray `]`; the reader reports those.
pub fn bracket_depth(source: &str) -> i64 {
    let mut depth = 0;
    let mut chars = source.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '[' => depth += 1,
            ']' => depth -= 1,
            '"' => {
                while let Some(c) = chars.next() {
                    match c {
                        '\\' => {
                            chars.next();
                        }
                        '"' => break,
                        _ => {}
                    }
                }
            }
            '/' if chars.peek() == Some(&'*') => {
                chars.next();
                let mut prev = '\0';
                for c in chars.by_ref() {
                    if prev == '*' && c == '/' {
                        break;
                    }
                    prev = c;
                }
            }
            _ => {}
        }
    }
    depth
}
