//! Purpose: `csvjson` CLI entry point.
//! Role: Binary crate root; converts a CSV file (or stdin) to JSON on stdout.
//! Invariants: Non-interactive errors are emitted as JSON on stderr.
//! Invariants: Process exit code is derived from `core::error::to_exit_code`.
//! Invariants: stdout carries only the conversion result, never diagnostics.
use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use clap::Parser;
use tracing_subscriber::EnvFilter;

use csvjson::core::codec;
use csvjson::core::error::{Error, ErrorKind, to_exit_code};

#[derive(Parser, Debug)]
#[command(
    name = "csvjson",
    version,
    about = "Convert CSV to a JSON array of objects"
)]
struct Cli {
    /// CSV file to convert; reads stdin when omitted or `-`.
    file: Option<PathBuf>,

    /// Re-indent the output for human inspection.
    #[arg(long)]
    pretty: bool,
}

fn main() {
    init_tracing();
    let exit_code = match run() {
        Ok(()) => 0,
        Err(err) => {
            emit_error(&err);
            to_exit_code(err.kind())
        }
    };
    std::process::exit(exit_code);
}

fn run() -> Result<(), Error> {
    let cli = Cli::parse();
    let input = read_input(cli.file.as_deref().and_then(|p| {
        if p.as_os_str() == "-" { None } else { Some(p) }
    }))?;

    let json = codec::to_json(&input)?;
    let output = if cli.pretty { prettify(&json)? } else { json };

    let mut stdout = io::stdout().lock();
    stdout.write_all(&output).map_err(write_error)?;
    stdout.write_all(b"\n").map_err(write_error)?;
    Ok(())
}

fn read_input(file: Option<&Path>) -> Result<Vec<u8>, Error> {
    match file {
        Some(path) => fs::read(path).map_err(|err| {
            Error::new(ErrorKind::Io)
                .with_message(format!("failed to read {}", path.display()))
                .with_source(err)
        }),
        None => {
            let mut buffer = Vec::new();
            io::stdin()
                .lock()
                .read_to_end(&mut buffer)
                .map_err(|err| {
                    Error::new(ErrorKind::Io)
                        .with_message("failed to read stdin")
                        .with_source(err)
                })?;
            Ok(buffer)
        }
    }
}

/// The codec emits compact JSON only; pretty mode re-parses and
/// re-indents, which is fine off the hot path.
fn prettify(json: &[u8]) -> Result<Vec<u8>, Error> {
    let value: serde_json::Value = serde_json::from_slice(json).map_err(|err| {
        Error::new(ErrorKind::Internal)
            .with_message("codec produced unparseable json")
            .with_source(err)
    })?;
    serde_json::to_vec_pretty(&value).map_err(|err| {
        Error::new(ErrorKind::Internal)
            .with_message("failed to pretty-print json")
            .with_source(err)
    })
}

fn write_error(err: io::Error) -> Error {
    Error::new(ErrorKind::Io)
        .with_message("failed to write output")
        .with_source(err)
}

fn emit_error(err: &Error) {
    let json = String::from_utf8(codec::error_envelope(err)).unwrap_or_else(|_| {
        "{\"error\":{\"kind\":\"internal\",\"message\":\"envelope encode failed\"}}".to_string()
    });
    eprintln!("{json}");
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}
