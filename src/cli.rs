//! Command-line options. There is no config file; everything the screen can
//! be tuned with at startup lives here.

use std::path::PathBuf;

use clap::Parser;
use log::LevelFilter;
use thiserror::Error;

use crate::table::PAGE_SIZES;

#[derive(Debug, Parser)]
#[command(name = "employee-records", version, about = "Manage employee records in the terminal")]
pub struct Cli {
    /// Rows shown per table page (5, 10 or 25).
    #[arg(long, default_value_t = PAGE_SIZES[0], value_parser = parse_page_size)]
    pub page_size: usize,

    /// Start with an empty table instead of the demo roster.
    #[arg(long)]
    pub no_seed: bool,

    /// Log verbosity (off, error, warn, info, debug, trace).
    #[arg(long, default_value = "info")]
    pub log_level: LevelFilter,

    /// Write the log here instead of the platform cache directory.
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PageSizeError {
    #[error("'{0}' is not a number")]
    NotANumber(String),
    #[error("page size must be one of 5, 10 or 25 (got {0})")]
    Unsupported(usize),
}

fn parse_page_size(raw: &str) -> Result<usize, PageSizeError> {
    let size = raw
        .trim()
        .parse::<usize>()
        .map_err(|_| PageSizeError::NotANumber(raw.to_string()))?;
    if PAGE_SIZES.contains(&size) {
        Ok(size)
    } else {
        Err(PageSizeError::Unsupported(size))
    }
}
