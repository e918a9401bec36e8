use std::path::PathBuf;

use chrono::Local;
use colored::Colorize;
use comfy_table::{Cell, CellAlignment, Table};

use crate::aggregate::{by_category, by_month, GroupTotal};
use crate::categorize::CategoryRules;
use crate::chart;
use crate::cli::{load_statement, resolve_statement};
use crate::error::Result;
use crate::export;
use crate::fmt::won;
use crate::settings::{categories_path, load_settings};

pub fn categories(file: Option<&str>, pick: bool, bars: bool, export_csv: bool) -> Result<()> {
    let settings = load_settings();
    let path = resolve_statement(file, pick)?;
    let table = load_statement(&path, &settings)?;
    let rules = CategoryRules::load(&categories_path())?;

    let groups = by_category(&table, &rules);
    render(&groups, "카테고리", bars);
    if export_csv && !groups.is_empty() {
        let dir = PathBuf::from(&settings.export_dir);
        let written =
            export::export_groups(&dir, export::CATEGORY_KIND, "카테고리", &groups, Local::now())?;
        tracing::info!("exported {}", written.display());
        println!("내보내기 완료: {}", written.display());
    }
    Ok(())
}

pub fn monthly(file: Option<&str>, pick: bool, bars: bool, export_csv: bool) -> Result<()> {
    let settings = load_settings();
    let path = resolve_statement(file, pick)?;
    let table = load_statement(&path, &settings)?;

    let groups = by_month(&table);
    render(&groups, "월", bars);
    if export_csv && !groups.is_empty() {
        let dir = PathBuf::from(&settings.export_dir);
        let written =
            export::export_groups(&dir, export::MONTHLY_KIND, "월", &groups, Local::now())?;
        tracing::info!("exported {}", written.display());
        println!("내보내기 완료: {}", written.display());
    }
    Ok(())
}

fn render(groups: &[GroupTotal], key_header: &str, bars: bool) {
    if groups.is_empty() {
        tracing::warn!("no transaction rows to aggregate");
        println!("{}", "집계할 거래가 없습니다.".yellow());
        return;
    }

    let mut out = Table::new();
    out.set_header(vec![key_header, "금액", "건수"]);
    let mut total = 0.0;
    let mut count = 0usize;
    for group in groups {
        out.add_row(vec![
            Cell::new(&group.key),
            Cell::new(won(group.total)).set_alignment(CellAlignment::Right),
            Cell::new(group.count).set_alignment(CellAlignment::Right),
        ]);
        total += group.total;
        count += group.count;
    }
    out.add_row(vec![
        Cell::new(export::TOTAL_LABEL),
        Cell::new(won(total)).set_alignment(CellAlignment::Right),
        Cell::new(count).set_alignment(CellAlignment::Right),
    ]);
    println!("{out}");

    if bars {
        print!("{}", chart::render(groups));
    }
}
