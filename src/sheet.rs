use std::io::BufReader;
use std::path::Path;

use calamine::{open_workbook_auto, Data, Reader};

use crate::error::{AppError, Result};

/// A spreadsheet cell after ingestion. Cells arrive untyped from the file
/// format; everything downstream works off this tagged variant instead of
/// re-guessing types.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Text(String),
    Number(f64),
    Missing,
}

/// The ingested statement before normalization: ordered column names plus
/// rows of cells in source order. Column names come from the sheet's second
/// row; the first row of these exports is decorative.
#[derive(Debug, Clone)]
pub struct RawTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<CellValue>>,
}

impl RawTable {
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }
}

pub fn load_table(path: &Path) -> Result<RawTable> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "xlsx" | "xls" | "xlsm" | "xlsb" | "ods" => read_workbook(path),
        "csv" => read_csv(path),
        other => Err(AppError::Load(format!(
            "unsupported statement format '.{other}' ({})",
            path.display()
        ))),
    }
}

/// Column names must be unique; the card exports occasionally repeat a
/// header, so later duplicates get a positional suffix.
fn dedupe_columns(names: Vec<String>) -> Vec<String> {
    let mut seen: Vec<String> = Vec::with_capacity(names.len());
    for (idx, name) in names.into_iter().enumerate() {
        let base = if name.is_empty() {
            format!("col{}", idx + 1)
        } else {
            name
        };
        let mut candidate = base.clone();
        let mut n = 2;
        while seen.contains(&candidate) {
            candidate = format!("{base}_{n}");
            n += 1;
        }
        seen.push(candidate);
    }
    seen
}

fn header_name(cell: &Data) -> String {
    match cell {
        Data::String(s) => s.trim().to_string(),
        Data::Empty => String::new(),
        other => other.to_string().trim().to_string(),
    }
}

fn convert_cell(cell: &Data) -> CellValue {
    match cell {
        Data::Empty => CellValue::Missing,
        Data::String(s) => {
            if s.trim().is_empty() {
                CellValue::Missing
            } else {
                CellValue::Text(s.clone())
            }
        }
        Data::Float(f) => CellValue::Number(*f),
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::DateTime(dt) => CellValue::Number(dt.as_f64()),
        Data::Bool(b) => CellValue::Text(b.to_string()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::Text(s.clone()),
        Data::Error(_) => CellValue::Missing,
    }
}

fn read_workbook(path: &Path) -> Result<RawTable> {
    let mut workbook = open_workbook_auto(path)
        .map_err(|e| AppError::Load(format!("{}: {e}", path.display())))?;
    let sheet = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| AppError::Load(format!("no sheets in {}", path.display())))?;
    let range = workbook
        .worksheet_range(&sheet)
        .map_err(|e| AppError::Load(format!("{}: {e}", path.display())))?;

    // The header row is the second sheet row. calamine trims leading blank
    // rows from the used range, so only skip one row when the decorative
    // first row actually made it into the range.
    let start_row = range.start().map(|(r, _)| r).unwrap_or(0);
    let mut rows = range.rows();
    if start_row == 0 {
        rows.next();
    }
    let header = rows
        .next()
        .ok_or_else(|| AppError::Load(format!("sheet '{sheet}' has no header row")))?;
    let columns = dedupe_columns(header.iter().map(header_name).collect());

    let width = columns.len();
    let data = rows
        .map(|row| {
            (0..width)
                .map(|i| row.get(i).map(convert_cell).unwrap_or(CellValue::Missing))
                .collect()
        })
        .collect();

    Ok(RawTable {
        columns,
        rows: data,
    })
}

fn csv_cell(field: &str) -> CellValue {
    let trimmed = field.trim();
    if trimmed.is_empty() {
        return CellValue::Missing;
    }
    match trimmed.parse::<f64>() {
        Ok(n) => CellValue::Number(n),
        Err(_) => CellValue::Text(field.to_string()),
    }
}

fn read_csv(path: &Path) -> Result<RawTable> {
    let file = std::fs::File::open(path)
        .map_err(|e| AppError::Load(format!("{}: {e}", path.display())))?;
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(BufReader::new(file));

    let mut records = rdr.records();
    // First row is decorative, same two-header-row layout as the workbooks.
    records.next();
    let header = match records.next() {
        Some(Ok(record)) => record,
        Some(Err(e)) => return Err(AppError::Load(format!("{}: {e}", path.display()))),
        None => {
            return Err(AppError::Load(format!(
                "{}: no header row",
                path.display()
            )))
        }
    };
    let columns = dedupe_columns(header.iter().map(|f| f.trim().to_string()).collect());

    let width = columns.len();
    let mut rows = Vec::new();
    for result in records {
        let Ok(record) = result else { continue };
        let row: Vec<CellValue> = (0..width)
            .map(|i| record.get(i).map(csv_cell).unwrap_or(CellValue::Missing))
            .collect();
        rows.push(row);
    }

    Ok(RawTable { columns, rows })
}
