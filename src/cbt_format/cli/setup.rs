use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "cbt-format", bin_name = "cbt-format", version)]
#[command(about = "Format wide-column table cell values", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Load a format file and report problems
    #[command(display_order = 1)]
    Check {
        /// YAML format file
        #[arg(long, value_name = "FILE")]
        format_file: PathBuf,
    },

    /// Print rows from a JSON row dump
    #[command(display_order = 2)]
    Render {
        /// YAML format file (values print as quoted strings without one)
        #[arg(long, value_name = "FILE")]
        format_file: Option<PathBuf>,

        /// Show timestamps in UTC instead of local time
        #[arg(long)]
        utc: bool,

        /// Row dump: one row or an array of rows ("-" reads stdin)
        #[arg(value_name = "ROWS.json")]
        rows: PathBuf,
    },

    /// Format a single value
    #[command(display_order = 3)]
    Value {
        /// YAML format file
        #[arg(long, value_name = "FILE")]
        format_file: Option<PathBuf>,

        /// Qualified column name (family:qualifier)
        #[arg(long)]
        column: String,

        /// Value bytes as hex digits
        #[arg(long, conflicts_with = "text", required_unless_present = "text")]
        hex: Option<String>,

        /// Value bytes as UTF-8 text
        #[arg(long)]
        text: Option<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_render() {
        let cli = Cli::try_parse_from(["cbt-format", "-v", "render", "--utc", "rows.json"]).unwrap();
        assert!(cli.verbose);
        match cli.command {
            Commands::Render {
                format_file,
                utc,
                rows,
            } => {
                assert!(format_file.is_none());
                assert!(utc);
                assert_eq!(rows, PathBuf::from("rows.json"));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_value_needs_exactly_one_input() {
        assert!(Cli::try_parse_from(["cbt-format", "value", "--column", "f:c"]).is_err());
        assert!(Cli::try_parse_from([
            "cbt-format",
            "value",
            "--column",
            "f:c",
            "--hex",
            "00",
            "--text",
            "a"
        ])
        .is_err());
        assert!(
            Cli::try_parse_from(["cbt-format", "value", "--column", "f:c", "--text", "a"]).is_ok()
        );
    }

    #[test]
    fn test_check_requires_format_file() {
        assert!(Cli::try_parse_from(["cbt-format", "check"]).is_err());
    }
}
