pub mod init;
pub mod recent;
pub mod report;
pub mod status;
pub mod sum;

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use dialoguer::Select;

use crate::error::{AppError, Result};
use crate::settings::Settings;
use crate::sheet;
use crate::table::{build_table, TransactionTable};

#[derive(Parser)]
#[command(
    name = "myeongse",
    about = "Card-statement analyzer: keyword sums, category and monthly summaries."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write default settings and category rules.
    Init,
    /// Sum amounts for merchants matching the given keywords.
    Sum {
        /// Merchant keywords, OR-combined. No keywords = the whole statement.
        keywords: Vec<String>,
        /// Statement file (.xlsx/.xls/.csv). Default: most recent file.
        #[arg(long)]
        file: Option<String>,
        /// Choose the statement from the recent-files list.
        #[arg(long)]
        pick: bool,
        /// Write matched rows to a CSV in the export directory.
        #[arg(long)]
        export: bool,
    },
    /// Spending totals per category.
    Categories {
        #[arg(long)]
        file: Option<String>,
        #[arg(long)]
        pick: bool,
        /// Render a bar chart under the table.
        #[arg(long)]
        chart: bool,
        #[arg(long)]
        export: bool,
    },
    /// Spending totals per calendar month.
    Monthly {
        #[arg(long)]
        file: Option<String>,
        #[arg(long)]
        pick: bool,
        #[arg(long)]
        chart: bool,
        #[arg(long)]
        export: bool,
    },
    /// Show recently opened statement files.
    Recent,
    /// Show config paths and loaded configuration.
    Status,
}

/// Pick the statement to analyze: explicit --file wins, --pick prompts over
/// the recent list, otherwise the most recent file that still exists.
pub(crate) fn resolve_statement(file: Option<&str>, pick: bool) -> Result<PathBuf> {
    if let Some(f) = file {
        return Ok(PathBuf::from(f));
    }
    if pick {
        let options = crate::recent::usable();
        if options.is_empty() {
            return Err(AppError::NoFile);
        }
        let items: Vec<String> = options.iter().map(|p| p.display().to_string()).collect();
        let choice = Select::new()
            .with_prompt("분석할 명세서")
            .items(&items)
            .default(0)
            .interact()
            .map_err(|e| AppError::Other(e.to_string()))?;
        return Ok(options[choice].clone());
    }
    crate::recent::latest().ok_or(AppError::NoFile)
}

/// Load + normalize a statement and record it in the recent list.
pub(crate) fn load_statement(path: &Path, settings: &Settings) -> Result<TransactionTable> {
    let raw = sheet::load_table(path)?;
    let table = build_table(&raw, settings)?;
    crate::recent::push(path)?;
    tracing::info!("loaded {} rows from {}", table.rows.len(), path.display());
    Ok(table)
}
