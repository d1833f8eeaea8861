//! CLI argument definitions for the inventory scanner.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use inv_model::TextEncoding;

#[derive(Parser)]
#[command(
    name = "inv-scan",
    version,
    about = "Barcode inventory - mark catalogued items as seen by scanning them",
    long_about = "Mark catalogued items as seen by scanning their barcodes.\n\n\
                  Every newly scanned item is saved to the inventory file immediately,\n\
                  using write-then-rename so the file is never left half-written."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// JSON settings file (format, column layout, export directory).
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Text encoding of the inventory file (overrides the settings file).
    #[arg(long = "encoding", value_enum, global = true)]
    pub encoding: Option<EncodingArg>,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Scan barcodes from standard input, one per line.
    Scan(FileArgs),

    /// Show how many items have been scanned.
    Stats(FileArgs),

    /// List the items already scanned.
    Scanned(FileArgs),

    /// Write the items not yet scanned to a new file.
    Export(ExportArgs),
}

#[derive(Parser)]
pub struct FileArgs {
    /// Inventory file (semicolon-separated).
    #[arg(value_name = "FILE")]
    pub file: PathBuf,
}

#[derive(Parser)]
pub struct ExportArgs {
    /// Inventory file (semicolon-separated).
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Directory for the export (default: from settings, else the temp directory).
    #[arg(long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,
}

/// CLI text encoding choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum EncodingArg {
    Utf8Bom,
    Utf8,
    Windows1252,
}

impl From<EncodingArg> for TextEncoding {
    fn from(arg: EncodingArg) -> Self {
        match arg {
            EncodingArg::Utf8Bom => Self::Utf8Bom,
            EncodingArg::Utf8 => Self::Utf8,
            EncodingArg::Windows1252 => Self::Windows1252,
        }
    }
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "inv-scan",
            "export",
            "lista.csv",
            "--output-dir",
            "/tmp/out",
            "--encoding",
            "windows1252",
        ])
        .unwrap();
        assert!(matches!(cli.encoding, Some(EncodingArg::Windows1252)));
        match cli.command {
            Command::Export(args) => {
                assert_eq!(args.file, PathBuf::from("lista.csv"));
                assert_eq!(args.output_dir, Some(PathBuf::from("/tmp/out")));
            }
            _ => panic!("expected export"),
        }
    }
}
