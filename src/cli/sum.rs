use std::path::PathBuf;

use chrono::Local;
use colored::Colorize;
use comfy_table::{Cell, CellAlignment, Table};

use crate::cli::{load_statement, resolve_statement};
use crate::error::{AppError, Result};
use crate::export;
use crate::filter::{clean_keywords, filter_table};
use crate::fmt::won;
use crate::settings::load_settings;

pub fn run(keywords: &[String], file: Option<&str>, pick: bool, export_csv: bool) -> Result<()> {
    // Keywords given but all blank is a usage error; none at all means the
    // whole statement. Validate before touching the file.
    let cleaned = clean_keywords(keywords);
    if !keywords.is_empty() && cleaned.is_empty() {
        tracing::warn!("keyword input was blank");
        return Err(AppError::NoKeyword);
    }

    let settings = load_settings();
    let path = resolve_statement(file, pick)?;
    let table = load_statement(&path, &settings)?;

    let result = filter_table(&table, &cleaned);
    let label = export::filter_label(&result.keywords);

    if result.matched() == 0 {
        tracing::warn!("no merchants matched '{label}' in {}", path.display());
        println!(
            "{}",
            format!("'{label}' 키워드와 일치하는 가맹점이 없습니다.").yellow()
        );
        return Ok(());
    }

    let mut out = Table::new();
    out.set_header(vec!["일자", "가맹점", "금액"]);
    for row in &result.rows {
        let date = row
            .date
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_default();
        out.add_row(vec![
            Cell::new(date),
            Cell::new(&row.merchant),
            Cell::new(won(row.amount)).set_alignment(CellAlignment::Right),
        ]);
    }
    println!("{out}");
    println!(
        "'{}' 매칭 {}건, {}",
        label.cyan(),
        result.matched(),
        format!("합산 결과: {}", won(result.total)).bold()
    );
    tracing::info!(
        "keyword '{label}': {} rows matched, total {}",
        result.matched(),
        result.total
    );

    if export_csv {
        let dir = PathBuf::from(&settings.export_dir);
        let written = export::export_rows(&dir, &cleaned, &result.rows, Local::now())?;
        tracing::info!("exported {}", written.display());
        println!("내보내기 완료: {}", written.display());
    }

    Ok(())
}
