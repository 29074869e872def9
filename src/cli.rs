// src/cli.rs

use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::error::ErrorKind;
use clap::{ArgAction, CommandFactory, Parser, ValueEnum, ValueHint};

use crate::table::Metric;

pub const DEFAULT_REFERENCE_FILE: &str = "Справочник.xlsx";

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Half-hour zone visit table for one date",
    long_about = None
)]
pub struct Args {
    /// Metric to display: entries or exits
    #[arg(long, value_enum, default_value_t = Metric::Entries)]
    pub metric: Metric,

    /// Zone reference workbook (.xlsx) with GUID and Наименование columns
    #[arg(
        long,
        default_value = DEFAULT_REFERENCE_FILE,
        value_hint = ValueHint::FilePath
    )]
    pub reference_file: PathBuf,

    /// API server as host[:port], e.g. 127.0.0.1:9006
    #[arg(long)]
    pub api_host: String,

    /// Report date as DD.MM.YYYY, e.g. 12.06.2020 (sent as is)
    #[arg(long)]
    pub date: String,

    /// Request timeout in seconds
    #[arg(long, default_value_t = 10, value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout: u64,

    /// When to style the table with ANSI colours
    #[arg(long, value_enum, default_value_t = ColorMode::Auto)]
    pub color: ColorMode,

    /// Debug logging
    #[arg(short, long, action = ArgAction::SetTrue)]
    pub verbose: bool,
}

impl Args {
    /// `Args::parse` plus the reference-file check; exits with a usage error like clap does.
    pub fn parse_checked() -> Self {
        let args = Args::parse();
        if let Err(msg) = args.check_reference_file() {
            Args::command()
                .error(ErrorKind::ValueValidation, msg)
                .exit();
        }
        args
    }

    /// `--reference-file` must name an existing file.
    pub fn check_reference_file(&self) -> Result<(), String> {
        existing_file(&self.reference_file)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
    Auto,
    Always,
    Never,
}

impl ColorMode {
    pub fn enabled(self) -> bool {
        match self {
            ColorMode::Auto => std::io::stdout().is_terminal(),
            ColorMode::Always => true,
            ColorMode::Never => false,
        }
    }
}

fn existing_file(path: &Path) -> Result<(), String> {
    if path.is_file() {
        Ok(())
    } else if path.exists() {
        Err(format!("reference file '{}' is not a file", path.display()))
    } else {
        Err(format!("reference file '{}' does not exist", path.display()))
    }
}
