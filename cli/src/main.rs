//! Command-line interface for the lowering passes.

use anyhow::Context;
use clap::{Parser, ValueEnum};
use lync_lower::Pass;
use lync_syntax::Program;
use std::{
    fs,
    io::{self, Read, Write},
    path::PathBuf,
    process::ExitCode,
};

#[derive(Parser)]
#[clap(
    name = "Lync",
    bin_name = "lync",
    about = "Lower Lync programs for the assembler"
)]
enum Args {
    /// Read a program as JSON and print it lowered.
    Lower {
        /// The file to read. Defaults to standard input.
        input: Option<PathBuf>,

        /// Stop after this pass instead of running every pass.
        #[clap(long)]
        through: Option<Pass>,

        /// How to print the lowered program.
        #[clap(long, value_enum, default_value_t = Format::Json)]
        format: Format,

        /// Indent JSON output.
        #[clap(long)]
        pretty: bool,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Format {
    /// The same JSON representation as the input.
    Json,

    /// Readable source-like text.
    Text,
}

/// Nodes are tagged with their byte offset in the source file.
struct Driver;

impl lync_syntax::Driver for Driver {
    type Info = u32;
}

fn main() -> ExitCode {
    env_logger::init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("error: {error:#}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> anyhow::Result<()> {
    let args = Args::parse();

    match args {
        Args::Lower {
            input,
            through,
            format,
            pretty,
        } => {
            let program = read_program(input)?;
            log::debug!("read {} top-level statements", program.statements.len());

            let program = match through {
                Some(pass) => lync_lower::lower_through(program, pass),
                None => lync_lower::lower(program),
            };

            let mut stdout = io::stdout().lock();

            match format {
                Format::Json if pretty => serde_json::to_writer_pretty(&mut stdout, &program)?,
                Format::Json => serde_json::to_writer(&mut stdout, &program)?,
                Format::Text => write!(stdout, "{program}")?,
            }

            if let Format::Json = format {
                writeln!(stdout)?;
            }

            stdout.flush()?;
        }
    }

    Ok(())
}

fn read_program(input: Option<PathBuf>) -> anyhow::Result<Program<Driver>> {
    let (source, json) = match input {
        Some(path) => {
            let json = fs::read_to_string(&path)
                .with_context(|| format!("reading {}", path.display()))?;

            (path.display().to_string(), json)
        }
        None => {
            let mut json = String::new();
            io::stdin()
                .read_to_string(&mut json)
                .context("reading standard input")?;

            (String::from("standard input"), json)
        }
    };

    serde_json::from_str(&json).with_context(|| format!("parsing program from {source}"))
}
