//! Lispy command-line runner
//!
//! Runs source files in order against one interpreter, evaluates a single
//! expression with `-e`, or starts an interactive REPL. With `-i` the
//! REPL opens after the files and expression have run, even when one of
//! them failed.

mod repl;

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use lispy::{Config, Interpreter, OutputMode};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "lispy")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Run lispy programs or start an interactive session", long_about = None)]
struct Args {
    /// Source files to run, in order
    #[arg(value_name = "FILE")]
    files: Vec<PathBuf>,

    /// Evaluate one expression and print its result
    #[arg(short = 'e', long = "eval", value_name = "EXPR")]
    expr: Option<String>,

    /// How results are printed (native or textual)
    #[arg(long, default_value_t = OutputMode::Native)]
    output: OutputMode,

    /// Directory searched for `<name>.lpy` on import
    #[arg(long, value_name = "DIR")]
    modules_dir: Option<PathBuf>,

    /// Maximum closure call depth
    #[arg(long, value_name = "N", default_value_t = 10_000)]
    max_call_depth: usize,

    /// Enter the REPL after running FILEs and EXPR, keeping their definitions
    #[arg(short, long)]
    interactive: bool,
}

impl Args {
    fn config(&self) -> Config {
        let mut config = Config::default()
            .with_output(self.output)
            .with_max_call_depth(self.max_call_depth);
        if let Some(dir) = &self.modules_dir {
            config = config.with_modules_dir(dir);
        }
        config
    }

    fn wants_repl(&self) -> bool {
        self.interactive || (self.files.is_empty() && self.expr.is_none())
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(true))
        .with(filter)
        .init();
}

fn main() -> anyhow::Result<ExitCode> {
    init_tracing();
    let args = Args::parse();
    tracing::debug!(?args, "starting");
    let interp = Interpreter::with_config(args.config());

    let batch = run_batch(&interp, &args);
    if let Err(err) = &batch {
        eprintln!("error: {:#}", err);
    }

    if args.wants_repl() {
        repl::run(&interp)?;
        return Ok(ExitCode::SUCCESS);
    }
    Ok(if batch.is_ok() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

/// Run the files in order, then `-e`, stopping at the first failure.
///
/// Definitions made before a failure stay in `interp`.
fn run_batch(interp: &Interpreter, args: &Args) -> anyhow::Result<()> {
    for path in &args.files {
        let source =
            fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
        interp
            .evaluate(&source)
            .with_context(|| format!("running {}", path.display()))?;
    }

    if let Some(expr) = &args.expr {
        let output = interp
            .evaluate_projected(expr)
            .context("evaluating expression")?;
        println!("{}", output);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_map_onto_config() {
        let args = Args::parse_from([
            "lispy",
            "--output",
            "textual",
            "--modules-dir",
            "mods",
            "--max-call-depth",
            "50",
            "-e",
            "[+ 1 2]",
        ]);
        let config = args.config();
        assert_eq!(config.output, OutputMode::Textual);
        assert_eq!(config.max_call_depth, 50);
        assert_eq!(config.modules_dir, Some(PathBuf::from("mods")));
        assert_eq!(args.expr.as_deref(), Some("[+ 1 2]"));
    }

    #[test]
    fn test_default_args() {
        let args = Args::parse_from(["lispy", "a.lpy", "b.lpy"]);
        assert_eq!(args.files.len(), 2);
        assert_eq!(args.config(), Config::default());
        assert!(!args.wants_repl());
    }

    #[test]
    fn test_interactive_flag() {
        assert!(Args::parse_from(["lispy"]).wants_repl());
        assert!(!Args::parse_from(["lispy", "-e", "1"]).wants_repl());
        assert!(Args::parse_from(["lispy", "-i", "prog.lpy"]).wants_repl());
        assert!(Args::parse_from(["lispy", "prog.lpy", "--interactive"]).wants_repl());
    }

    #[test]
    fn test_failed_file_keeps_earlier_definitions() {
        let source = "[def double [x] [* x 2]] [var y 1] [missing] [var z 2]";
        let name = format!("lispy-batch-{}.lpy", std::process::id());
        let path = std::env::temp_dir().join(name);
        fs::write(&path, source).unwrap();

        let file = path.to_string_lossy().into_owned();
        let args = Args::parse_from(["lispy", "-i", file.as_str()]);
        let interp = Interpreter::with_config(args.config());
        let err = run_batch(&interp, &args).unwrap_err();
        fs::remove_file(&path).unwrap();

        assert!(format!("{:#}", err).contains("missing"));
        assert_eq!(interp.evaluate("[double y]").unwrap(), lispy::Value::Int(2));
        assert!(interp.evaluate("z").is_err());
    }
}
