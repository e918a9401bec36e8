use chrono::NaiveDate;

use crate::error::{AppError, Result};
use crate::normalize::{cell_text, coerce_amount, resolve_date};
use crate::settings::Settings;
use crate::sheet::RawTable;

/// One statement row after normalization. `is_transaction` is advisory:
/// noise rows stay in the table, consumers decide whether to skip them.
#[derive(Debug, Clone)]
pub struct StatementRow {
    pub merchant: String,
    pub amount: f64,
    pub date: Option<NaiveDate>,
    pub is_transaction: bool,
}

/// The normalized statement. Row order equals source order; the table is
/// rebuilt wholesale on every load, never patched.
#[derive(Debug, Clone)]
pub struct TransactionTable {
    pub rows: Vec<StatementRow>,
}

impl TransactionTable {
    /// Rows the row classifier accepted as real transactions.
    pub fn transactions(&self) -> impl Iterator<Item = &StatementRow> {
        self.rows.iter().filter(|r| r.is_transaction)
    }
}

pub fn build_table(raw: &RawTable, settings: &Settings) -> Result<TransactionTable> {
    let mut missing = Vec::new();
    let merchant_idx = raw.column_index(&settings.merchant_column);
    let amount_idx = raw.column_index(&settings.amount_column);
    if merchant_idx.is_none() {
        missing.push(settings.merchant_column.as_str());
    }
    if amount_idx.is_none() {
        missing.push(settings.amount_column.as_str());
    }
    if !missing.is_empty() {
        return Err(AppError::MissingColumn(missing.join(", ")));
    }
    let (merchant_idx, amount_idx) = (merchant_idx.unwrap_or(0), amount_idx.unwrap_or(0));

    let rows = raw
        .rows
        .iter()
        .map(|cells| {
            let merchant = cells.get(merchant_idx).map(cell_text).unwrap_or_default();
            let amount = cells
                .get(amount_idx)
                .map(coerce_amount)
                .unwrap_or_default();
            let date = resolve_date(&raw.columns, cells, &settings.date_markers);
            let is_transaction = !merchant.is_empty()
                && amount != 0.0
                && !settings.skip_merchants.iter().any(|s| s == &merchant);
            StatementRow {
                merchant,
                amount,
                date,
                is_transaction,
            }
        })
        .collect();

    Ok(TransactionTable { rows })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sheet::CellValue;

    fn raw(columns: &[&str], rows: Vec<Vec<CellValue>>) -> RawTable {
        RawTable {
            columns: columns.iter().map(|c| c.to_string()).collect(),
            rows,
        }
    }

    fn text(s: &str) -> CellValue {
        CellValue::Text(s.to_string())
    }

    #[test]
    fn test_build_table_normalizes_and_resolves() {
        let settings = Settings::default();
        let raw = raw(
            &["이용일자", "이용하신 가맹점", "이용금액"],
            vec![
                vec![text("24.01.05"), text("스타\u{200b}벅스"), CellValue::Number(4500.0)],
                vec![CellValue::Number(44000.0), text("노래방"), text("15,000")],
            ],
        );
        let table = build_table(&raw, &settings).unwrap();
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[0].merchant, "스타벅스");
        assert_eq!(table.rows[0].amount, 4500.0);
        assert_eq!(table.rows[0].date, NaiveDate::from_ymd_opt(2024, 1, 5));
        assert_eq!(table.rows[1].amount, 15000.0);
        assert_eq!(table.rows[1].date, NaiveDate::from_ymd_opt(2020, 6, 18));
        assert!(table.rows.iter().all(|r| r.is_transaction));
    }

    #[test]
    fn test_missing_columns_reported_together() {
        let settings = Settings::default();
        let raw = raw(&["일자", "비고"], vec![]);
        let err = build_table(&raw, &settings).unwrap_err();
        match err {
            AppError::MissingColumn(cols) => {
                assert!(cols.contains("이용하신 가맹점"));
                assert!(cols.contains("이용금액"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_row_classifier_marks_noise() {
        let settings = Settings::default();
        let raw = raw(
            &["이용하신 가맹점", "이용금액"],
            vec![
                vec![text("카페베네"), CellValue::Number(6000.0)],
                // blank merchant
                vec![CellValue::Missing, CellValue::Number(1000.0)],
                // zero amount
                vec![text("포인트 적립"), CellValue::Number(0.0)],
                // sentinel: leaked header text
                vec![text("이용하신 가맹점"), CellValue::Number(100.0)],
                // sentinel: fee-waiver line
                vec![text("연회비 할인"), CellValue::Number(-10000.0)],
            ],
        );
        let table = build_table(&raw, &settings).unwrap();
        let flags: Vec<bool> = table.rows.iter().map(|r| r.is_transaction).collect();
        assert_eq!(flags, vec![true, false, false, false, false]);
        // Advisory only: nothing was dropped.
        assert_eq!(table.rows.len(), 5);
    }

    #[test]
    fn test_rows_keep_source_order() {
        let settings = Settings::default();
        let raw = raw(
            &["이용하신 가맹점", "이용금액"],
            vec![
                vec![text("나중"), CellValue::Number(1.0)],
                vec![text("먼저"), CellValue::Number(2.0)],
            ],
        );
        let table = build_table(&raw, &settings).unwrap();
        assert_eq!(table.rows[0].merchant, "나중");
        assert_eq!(table.rows[1].merchant, "먼저");
    }
}
