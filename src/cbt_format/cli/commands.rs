use super::input::{decode_hex, read_rows};
use super::setup::{Cli, Commands};
use cbt_format::engine::ValueFormatting;
use cbt_format::error::Result;
use cbt_format::row::{print_row, print_row_in};
use chrono::Utc;
use clap::Parser;
use colored::*;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::debug;
use tracing_subscriber::EnvFilter;

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Check { format_file } => handle_check(&format_file),
        Commands::Render {
            format_file,
            utc,
            rows,
        } => handle_render(format_file, utc, &rows),
        Commands::Value {
            format_file,
            column,
            hex,
            text,
        } => handle_value(format_file, &column, hex, text),
    }
}

/// Logs go to stderr. `RUST_LOG` wins over `--verbose`.
fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn handle_check(format_file: &Path) -> Result<()> {
    let formatting = ValueFormatting::setup(Some(format_file))?;
    let message = format!(
        "Format file OK: {} message types",
        formatting.message_types().message_count()
    );
    println!("{}", message.green());
    Ok(())
}

fn handle_render(format_file: Option<PathBuf>, utc: bool, rows_path: &Path) -> Result<()> {
    let formatting = ValueFormatting::setup(format_file.as_deref())?;
    let rows = read_rows(rows_path)?;
    debug!(rows = rows.len(), "rendering row dump");

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    for row in &rows {
        if utc {
            print_row_in(&formatting, row, &mut out, &Utc)?;
        } else {
            print_row(&formatting, row, &mut out)?;
        }
        writeln!(out)?;
    }
    out.flush()?;
    Ok(())
}

fn handle_value(
    format_file: Option<PathBuf>,
    column: &str,
    hex: Option<String>,
    text: Option<String>,
) -> Result<()> {
    let formatting = ValueFormatting::setup(format_file.as_deref())?;
    let value = match (hex, text) {
        (Some(digits), _) => decode_hex(&digits)?,
        (None, Some(text)) => text.into_bytes(),
        (None, None) => Vec::new(),
    };
    let family = column.split(':').next().unwrap_or_default();
    print!("{}", formatting.format("", family, column, &value)?);
    Ok(())
}
