use chrono::NaiveDate;
use regex::Regex;

use crate::sheet::CellValue;

// Invisible characters that show up in merchant names copied out of the
// card company's web export.
const ZERO_WIDTH: [char; 4] = ['\u{200b}', '\u{200c}', '\u{200d}', '\u{feff}'];

/// Clean a merchant-name string: drop zero-width characters, turn
/// non-breaking spaces into ordinary ones, collapse whitespace runs, trim.
pub fn clean_text(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        if ZERO_WIDTH.contains(&ch) {
            continue;
        }
        if ch == '\u{a0}' {
            out.push(' ');
        } else {
            out.push(ch);
        }
    }
    out.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Stringify a cell for the merchant field. Missing cells become the empty
/// string so blank rows fall through to the row classifier.
pub fn cell_text(cell: &CellValue) -> String {
    match cell {
        CellValue::Text(s) => clean_text(s),
        CellValue::Number(n) => {
            if n.fract() == 0.0 {
                format!("{n:.0}")
            } else {
                n.to_string()
            }
        }
        CellValue::Missing => String::new(),
    }
}

/// Coerce a cell to a monetary amount. Non-parsable or blank becomes 0.
pub fn coerce_amount(cell: &CellValue) -> f64 {
    match cell {
        CellValue::Number(n) => *n,
        CellValue::Missing => 0.0,
        CellValue::Text(s) => {
            let cleaned: String = s
                .chars()
                .filter(|c| !c.is_whitespace() && !matches!(c, ',' | '원' | '₩'))
                .collect();
            cleaned.parse().unwrap_or(0.0)
        }
    }
}

/// Spreadsheet serial date: day-count offset from 1899-12-30 (the epoch
/// that absorbs the 1900 leap-year bug).
pub fn serial_to_date(serial: f64) -> Option<NaiveDate> {
    let base = NaiveDate::from_ymd_opt(1899, 12, 30)?;
    let offset = chrono::Duration::try_days(serial as i64)?;
    base.checked_add_signed(offset)
}

/// Parse a textual statement date. The exports write dates as `YY.MM.DD`,
/// sometimes with 년/월/일 suffixes or a weekday tag; strip everything but
/// digits and separators, unify separators to dots, then parse.
pub fn parse_text_date(raw: &str) -> Option<NaiveDate> {
    let suffixed = raw.replace('년', ".").replace('월', ".").replace('일', "");
    let junk = Regex::new(r"[^0-9./-]").ok()?;
    let kept = junk.replace_all(&suffixed, "");
    let seps = Regex::new(r"[./-]+").ok()?;
    let dotted = seps.replace_all(&kept, ".");
    let trimmed = dotted.trim_matches('.');
    NaiveDate::parse_from_str(trimmed, "%y.%m.%d").ok()
}

/// Resolve one canonical date for a row. Candidate columns are those whose
/// name contains a date marker; the leftmost candidate that parses wins,
/// decided per row. Numeric cells are serial offsets, text cells go through
/// the `YY.MM.DD` path. No candidate parsing is not an error.
pub fn resolve_date(
    columns: &[String],
    cells: &[CellValue],
    markers: &[String],
) -> Option<NaiveDate> {
    for (idx, name) in columns.iter().enumerate() {
        if !markers.iter().any(|m| name.contains(m.as_str())) {
            continue;
        }
        let parsed = match cells.get(idx) {
            Some(CellValue::Number(n)) => serial_to_date(*n),
            Some(CellValue::Text(s)) => parse_text_date(s),
            _ => None,
        };
        if parsed.is_some() {
            return parsed;
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn markers() -> Vec<String> {
        vec!["일자".to_string(), "승인일".to_string(), "거래일".to_string()]
    }

    #[test]
    fn test_clean_text_zero_width_and_nbsp() {
        let dirty = "스타\u{200b}벅스\u{a0}\u{a0}강남점";
        let cleaned = clean_text(dirty);
        assert_eq!(cleaned, "스타벅스 강남점");
        assert!(!cleaned.contains('\u{200b}'));
        assert!(!cleaned.contains('\u{a0}'));
        assert!(!cleaned.contains("  "));
    }

    #[test]
    fn test_clean_text_collapses_and_trims() {
        assert_eq!(clean_text("  카페   베네  "), "카페 베네");
        assert_eq!(clean_text("\t노래방\n천국"), "노래방 천국");
    }

    #[test]
    fn test_cell_text_missing_is_empty() {
        assert_eq!(cell_text(&CellValue::Missing), "");
        assert_eq!(cell_text(&CellValue::Number(42.0)), "42");
        assert_eq!(cell_text(&CellValue::Number(1.5)), "1.5");
    }

    #[test]
    fn test_coerce_amount() {
        assert_eq!(coerce_amount(&CellValue::Number(4500.0)), 4500.0);
        assert_eq!(coerce_amount(&CellValue::Missing), 0.0);
        assert_eq!(coerce_amount(&CellValue::Text("1,234".to_string())), 1234.0);
        assert_eq!(coerce_amount(&CellValue::Text("4500원".to_string())), 4500.0);
        assert_eq!(coerce_amount(&CellValue::Text("-300".to_string())), -300.0);
        assert_eq!(coerce_amount(&CellValue::Text("가맹점".to_string())), 0.0);
    }

    #[test]
    fn test_serial_to_date() {
        assert_eq!(
            serial_to_date(44000.0),
            NaiveDate::from_ymd_opt(2020, 6, 18)
        );
        assert_eq!(
            serial_to_date(45667.0),
            NaiveDate::from_ymd_opt(2025, 1, 10)
        );
        // Corrupt cells far outside the representable range are not dates.
        assert_eq!(serial_to_date(9.0e18), None);
    }

    #[test]
    fn test_parse_text_date_variants() {
        let expected = NaiveDate::from_ymd_opt(2024, 3, 5);
        assert_eq!(parse_text_date("24.03.05"), expected);
        assert_eq!(parse_text_date("24-03-05"), expected);
        assert_eq!(parse_text_date("24/03/05"), expected);
        assert_eq!(parse_text_date("24년 3월 5일"), expected);
        assert_eq!(parse_text_date("24.03.05 (화)"), expected);
        assert_eq!(parse_text_date("승인완료"), None);
        assert_eq!(parse_text_date(""), None);
    }

    #[test]
    fn test_resolve_date_leftmost_parsed_wins() {
        let columns = vec![
            "이용일자".to_string(),
            "승인일".to_string(),
            "가맹점".to_string(),
        ];
        // Serial in the leftmost candidate and text in the second: both
        // parse, leftmost wins.
        let cells = vec![
            CellValue::Number(44000.0),
            CellValue::Text("20.06.18".to_string()),
            CellValue::Text("카페".to_string()),
        ];
        assert_eq!(
            resolve_date(&columns, &cells, &markers()),
            NaiveDate::from_ymd_opt(2020, 6, 18)
        );

        // Leftmost candidate unparsable: the next one is used.
        let cells = vec![
            CellValue::Text("취소".to_string()),
            CellValue::Text("21.01.02".to_string()),
            CellValue::Missing,
        ];
        assert_eq!(
            resolve_date(&columns, &cells, &markers()),
            NaiveDate::from_ymd_opt(2021, 1, 2)
        );
    }

    #[test]
    fn test_resolve_date_serial_and_text_agree() {
        // Same calendar date via the serial path and the text path.
        assert_eq!(serial_to_date(44000.0), parse_text_date("20.06.18"));
    }

    #[test]
    fn test_resolve_date_none_when_no_candidate() {
        let columns = vec!["가맹점".to_string(), "금액".to_string()];
        let cells = vec![
            CellValue::Text("카페".to_string()),
            CellValue::Number(4500.0),
        ];
        assert_eq!(resolve_date(&columns, &cells, &markers()), None);
    }
}
