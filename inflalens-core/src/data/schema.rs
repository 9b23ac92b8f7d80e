//! Column schema for correlation tables and tolerant cell parsing.
//!
//! Only `Symbol` is required. Every other column may be absent, in which case
//! the corresponding field is `None` for every row and the aggregator falls
//! back to its defaults.

use chrono::NaiveDate;

use super::ingest::DataError;

pub const SYMBOL: &str = "Symbol";
pub const PARAMETER: &str = "Parameter";
pub const CORRELATION: &str = "Correlation";
pub const DATE: &str = "Date";
pub const VALUE: &str = "Value";

/// Positions of the known columns within a header row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnMap {
    pub symbol: usize,
    pub parameter: Option<usize>,
    pub correlation: Option<usize>,
    pub date: Option<usize>,
    pub value: Option<usize>,
}

impl ColumnMap {
    /// Resolve column positions, matching names case-insensitively.
    pub fn resolve(table: &str, headers: &[String]) -> Result<Self, DataError> {
        let find = |name: &str| headers.iter().position(|h| same_column(h, name));
        let symbol = find(SYMBOL).ok_or_else(|| DataError::MissingColumn {
            table: table.to_string(),
            column: SYMBOL.to_string(),
        })?;
        Ok(Self {
            symbol,
            parameter: find(PARAMETER),
            correlation: find(CORRELATION),
            date: find(DATE),
            value: find(VALUE),
        })
    }
}

fn same_column(header: &str, name: &str) -> bool {
    header
        .trim_start_matches('\u{feff}')
        .trim()
        .eq_ignore_ascii_case(name)
}

/// Trimmed, non-empty text.
pub fn parse_text(cell: Option<&str>) -> Option<String> {
    let trimmed = cell?.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Numeric cell. Empty, unparseable and NaN cells are treated as missing.
pub fn parse_number(cell: Option<&str>) -> Option<f64> {
    let trimmed = cell?.trim();
    if trimmed.is_empty() {
        return None;
    }
    match trimmed.parse::<f64>() {
        Ok(v) if v.is_nan() => None,
        Ok(v) => Some(v),
        Err(_) => None,
    }
}

const DATE_FORMATS: [&str; 4] = ["%Y-%m-%d", "%d-%m-%Y", "%Y/%m/%d", "%d/%m/%Y"];

/// Date cell. Accepts plain dates and datetimes (time part ignored).
pub fn parse_date(cell: Option<&str>) -> Option<NaiveDate> {
    let trimmed = cell?.trim();
    if trimmed.is_empty() {
        return None;
    }
    for fmt in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, fmt) {
            return Some(date);
        }
    }
    // "2024-01-31 00:00:00" / "2024-01-31T00:00:00.000"
    let date_part = trimmed.split(|c| c == ' ' || c == 'T').next()?;
    if date_part.len() == trimmed.len() {
        return None;
    }
    parse_date(Some(date_part))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn resolves_all_columns() {
        let map = ColumnMap::resolve(
            "t",
            &headers(&["Symbol", "Parameter", "Correlation", "Date", "Value"]),
        )
        .unwrap();
        assert_eq!(map.symbol, 0);
        assert_eq!(map.parameter, Some(1));
        assert_eq!(map.correlation, Some(2));
        assert_eq!(map.date, Some(3));
        assert_eq!(map.value, Some(4));
    }

    #[test]
    fn header_match_ignores_case_whitespace_and_bom() {
        let map =
            ColumnMap::resolve("t", &headers(&["\u{feff}symbol", " CORRELATION "])).unwrap();
        assert_eq!(map.symbol, 0);
        assert_eq!(map.correlation, Some(1));
        assert_eq!(map.parameter, None);
    }

    #[test]
    fn missing_symbol_is_an_error() {
        let err = ColumnMap::resolve("prices", &headers(&["Parameter", "Correlation"]))
            .unwrap_err();
        assert!(matches!(err, DataError::MissingColumn { ref column, .. } if column == "Symbol"));
    }

    #[test]
    fn number_parsing() {
        assert_eq!(parse_number(Some(" 0.42 ")), Some(0.42));
        assert_eq!(parse_number(Some("-1")), Some(-1.0));
        assert_eq!(parse_number(Some("")), None);
        assert_eq!(parse_number(Some("n/a")), None);
        assert_eq!(parse_number(Some("NaN")), None);
        assert_eq!(parse_number(None), None);
    }

    #[test]
    fn date_parsing() {
        let expected = NaiveDate::from_ymd_opt(2024, 1, 31);
        assert_eq!(parse_date(Some("2024-01-31")), expected);
        assert_eq!(parse_date(Some("31-01-2024")), expected);
        assert_eq!(parse_date(Some("2024-01-31 00:00:00")), expected);
        assert_eq!(parse_date(Some("2024-01-31T00:00:00.000")), expected);
        assert_eq!(parse_date(Some("January")), None);
        assert_eq!(parse_date(Some("")), None);
    }

    #[test]
    fn text_parsing() {
        assert_eq!(parse_text(Some("  CPI ")), Some("CPI".to_string()));
        assert_eq!(parse_text(Some("   ")), None);
        assert_eq!(parse_text(None), None);
    }
}
