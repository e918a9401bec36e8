use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};

use crate::aggregate::GroupTotal;
use crate::error::{AppError, Result};
use crate::table::StatementRow;

pub const TOTAL_LABEL: &str = "합계";
pub const ALL_LABEL: &str = "전체";
pub const CATEGORY_KIND: &str = "카테고리별";
pub const MONTHLY_KIND: &str = "월별";

/// Amounts are written bare (no grouping separators) so the file re-sums
/// cleanly in a spreadsheet.
fn format_amount(amount: f64) -> String {
    if amount.fract() == 0.0 {
        format!("{amount:.0}")
    } else {
        amount.to_string()
    }
}

fn sanitize(label: &str) -> String {
    label
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_whitespace() => '_',
            c => c,
        })
        .collect()
}

/// `{label}_{YYYYMMDD_HHMM}.csv` — minute granularity keeps repeated exports
/// within one run apart and sorts chronologically by name.
pub fn export_filename(label: &str, now: DateTime<Local>) -> String {
    format!("{}_{}.csv", sanitize(label), now.format("%Y%m%d_%H%M"))
}

pub fn filter_label(keywords: &[String]) -> String {
    if keywords.is_empty() {
        ALL_LABEL.to_string()
    } else {
        keywords.join("_")
    }
}

// Excel needs the BOM to pick UTF-8 for Korean text.
fn create_with_bom(path: &Path) -> Result<std::fs::File> {
    let mut file = std::fs::File::create(path)
        .map_err(|e| AppError::Export(format!("{}: {e}", path.display())))?;
    file.write_all("\u{feff}".as_bytes())
        .map_err(|e| AppError::Export(format!("{}: {e}", path.display())))?;
    Ok(file)
}

fn ensure_dir(dir: &Path) -> Result<()> {
    std::fs::create_dir_all(dir).map_err(|e| AppError::Export(format!("{}: {e}", dir.display())))
}

/// Write filtered rows with a trailing total row: label column 합계, amount
/// column the exact sum, the rest blank.
pub fn export_rows(
    dir: &Path,
    keywords: &[String],
    rows: &[&StatementRow],
    now: DateTime<Local>,
) -> Result<PathBuf> {
    ensure_dir(dir)?;
    let path = dir.join(export_filename(&filter_label(keywords), now));
    let file = create_with_bom(&path)?;
    let mut wtr = csv::Writer::from_writer(file);

    let to_export = |e: csv::Error| AppError::Export(format!("{}: {e}", path.display()));
    wtr.write_record(["일자", "가맹점", "금액"]).map_err(to_export)?;
    let mut total = 0.0;
    for row in rows {
        let date = row
            .date
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_default();
        let amount = format_amount(row.amount);
        wtr.write_record([date.as_str(), row.merchant.as_str(), amount.as_str()])
            .map_err(to_export)?;
        total += row.amount;
    }
    let grand_total = format_amount(total);
    wtr.write_record(["", TOTAL_LABEL, grand_total.as_str()])
        .map_err(to_export)?;
    wtr.flush()
        .map_err(|e| AppError::Export(format!("{}: {e}", path.display())))?;
    Ok(path)
}

/// Write aggregated groups with a trailing total row in the key column.
pub fn export_groups(
    dir: &Path,
    kind: &str,
    key_header: &str,
    groups: &[GroupTotal],
    now: DateTime<Local>,
) -> Result<PathBuf> {
    ensure_dir(dir)?;
    let path = dir.join(export_filename(kind, now));
    let file = create_with_bom(&path)?;
    let mut wtr = csv::Writer::from_writer(file);

    let to_export = |e: csv::Error| AppError::Export(format!("{}: {e}", path.display()));
    wtr.write_record([key_header, "금액"]).map_err(to_export)?;
    let mut total = 0.0;
    for group in groups {
        let amount = format_amount(group.total);
        wtr.write_record([group.key.as_str(), amount.as_str()])
            .map_err(to_export)?;
        total += group.total;
    }
    let grand_total = format_amount(total);
    wtr.write_record([TOTAL_LABEL, grand_total.as_str()])
        .map_err(to_export)?;
    wtr.flush()
        .map_err(|e| AppError::Export(format!("{}: {e}", path.display())))?;
    Ok(path)
}
