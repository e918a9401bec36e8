use std::collections::{BTreeMap, HashMap};

use crate::categorize::CategoryRules;
use crate::table::TransactionTable;

/// One aggregation bucket: a category label or a YYYY-MM month key.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupTotal {
    pub key: String,
    pub total: f64,
    pub count: usize,
}

/// Group transaction rows by category and sum amounts. Output follows rule
/// declaration order (catch-all last); categories with no rows are omitted
/// — a strict groupby, not a reindex against all known categories.
pub fn by_category(table: &TransactionTable, rules: &CategoryRules) -> Vec<GroupTotal> {
    let mut totals: HashMap<&str, (f64, usize)> = HashMap::new();
    for row in table.transactions() {
        let label = rules.classify(&row.merchant);
        let entry = totals.entry(label).or_insert((0.0, 0));
        entry.0 += row.amount;
        entry.1 += 1;
    }
    rules
        .rules()
        .iter()
        .filter_map(|rule| {
            totals.get(rule.label.as_str()).map(|(total, count)| GroupTotal {
                key: rule.label.clone(),
                total: *total,
                count: *count,
            })
        })
        .collect()
}

/// Group transaction rows by calendar month, ascending. Rows without a
/// resolved date are silently excluded.
pub fn by_month(table: &TransactionTable) -> Vec<GroupTotal> {
    let mut totals: BTreeMap<String, (f64, usize)> = BTreeMap::new();
    for row in table.transactions() {
        let Some(date) = row.date else { continue };
        let key = date.format("%Y-%m").to_string();
        let entry = totals.entry(key).or_insert((0.0, 0));
        entry.0 += row.amount;
        entry.1 += 1;
    }
    totals
        .into_iter()
        .map(|(key, (total, count))| GroupTotal { key, total, count })
        .collect()
}
