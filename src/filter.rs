use crate::table::{StatementRow, TransactionTable};

/// Result of one keyword filter pass. Recomputed per invocation, never
/// cached; export is the only way it leaves the session.
#[derive(Debug)]
pub struct FilterResult<'a> {
    pub rows: Vec<&'a StatementRow>,
    pub keywords: Vec<String>,
    pub total: f64,
}

impl FilterResult<'_> {
    pub fn matched(&self) -> usize {
        self.rows.len()
    }
}

/// Trim keyword inputs and drop the empty/whitespace-only ones.
pub fn clean_keywords(raw: &[String]) -> Vec<String> {
    raw.iter()
        .map(|k| k.trim().to_string())
        .filter(|k| !k.is_empty())
        .collect()
}

/// Filter the table by keywords, OR-combined, case-insensitive substring
/// match against the normalized merchant. An empty keyword set selects the
/// whole table. Row order is preserved; the sum uses the already-coerced
/// amount field.
pub fn filter_table<'a>(table: &'a TransactionTable, keywords: &[String]) -> FilterResult<'a> {
    let lowered: Vec<String> = keywords.iter().map(|k| k.to_lowercase()).collect();
    let rows: Vec<&StatementRow> = table
        .rows
        .iter()
        .filter(|row| {
            if lowered.is_empty() {
                return true;
            }
            let hay = row.merchant.to_lowercase();
            lowered.iter().any(|k| hay.contains(k))
        })
        .collect();
    let total = rows.iter().map(|r| r.amount).sum();
    FilterResult {
        rows,
        keywords: keywords.to_vec(),
        total,
    }
}
