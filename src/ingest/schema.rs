//! Schema inference
//!
//! Per-cell detection order: empty -> absent, integer, real, timestamp,
//! boolean, text. A column's type is the most frequent per-cell type over the
//! sampled rows; ties go to the type that sorts first by name so the result
//! never depends on row order.

use std::collections::BTreeMap;
use std::sync::OnceLock;

use chrono::{NaiveDate, NaiveDateTime};
use regex::Regex;

use super::types::{ColumnType, Value};

const DATETIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S"];
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d"];

static INTEGER: OnceLock<Option<Regex>> = OnceLock::new();
static REAL: OnceLock<Option<Regex>> = OnceLock::new();

fn matches(pattern: &'static OnceLock<Option<Regex>>, source: &str, v: &str) -> bool {
    pattern
        .get_or_init(|| Regex::new(source).ok())
        .as_ref()
        .is_some_and(|re| re.is_match(v))
}

fn is_integer_literal(v: &str) -> bool {
    matches(&INTEGER, r"^[+-]?\d+$", v)
}

fn is_real_literal(v: &str) -> bool {
    matches(&REAL, r"^[+-]?(\d+\.\d*|\.\d+|\d+)([eE][+-]?\d+)?$", v)
}

/// Detects the type of a single raw cell.
pub fn detect_type(raw: &str) -> ColumnType {
    let v = raw.trim();
    if v.is_empty() {
        return ColumnType::Absent;
    }
    if is_integer_literal(v) && v.parse::<i64>().is_ok() {
        return ColumnType::Integer;
    }
    if is_real_literal(v) {
        return ColumnType::Real;
    }
    if parse_timestamp(v).is_some() {
        return ColumnType::Timestamp;
    }
    if v.eq_ignore_ascii_case("true") || v.eq_ignore_ascii_case("false") {
        return ColumnType::Boolean;
    }
    ColumnType::Text
}

/// Infers one type per column from the first `sample_rows` rows.
pub fn infer_column_types(
    header: &[String],
    rows: &[Vec<String>],
    sample_rows: usize,
) -> Vec<ColumnType> {
    let mut counters: Vec<BTreeMap<&'static str, (usize, ColumnType)>> =
        vec![BTreeMap::new(); header.len()];

    for row in rows.iter().take(sample_rows) {
        for (counter, cell) in counters.iter_mut().zip(row) {
            let detected = detect_type(cell);
            counter.entry(detected.type_name()).or_insert((0, detected)).0 += 1;
        }
    }

    counters
        .into_iter()
        .map(|counter| {
            // BTreeMap iterates by name, so a strict `>` keeps the first name on ties
            let mut best: Option<(usize, ColumnType)> = None;
            for (count, column_type) in counter.into_values() {
                if best.map_or(true, |(c, _)| count > c) {
                    best = Some((count, column_type));
                }
            }
            best.map_or(ColumnType::Absent, |(_, t)| t)
        })
        .collect()
}

/// Converts a raw cell to a value of the column type.
///
/// Cells that do not conform become absent; integer columns keep real-valued
/// cells as reals.
pub fn convert_cell(raw: &str, column_type: ColumnType) -> Value {
    let v = raw.trim();
    if v.is_empty() {
        return Value::Absent;
    }
    match column_type {
        ColumnType::Integer => match detect_type(v) {
            ColumnType::Integer => v.parse().map(Value::Integer).unwrap_or(Value::Absent),
            ColumnType::Real => parse_real(v),
            _ => Value::Absent,
        },
        ColumnType::Real => match detect_type(v) {
            ColumnType::Integer | ColumnType::Real => parse_real(v),
            _ => Value::Absent,
        },
        ColumnType::Timestamp => parse_timestamp(v).map_or(Value::Absent, Value::Timestamp),
        ColumnType::Boolean => {
            if v.eq_ignore_ascii_case("true") {
                Value::Boolean(true)
            } else if v.eq_ignore_ascii_case("false") {
                Value::Boolean(false)
            } else {
                Value::Absent
            }
        }
        ColumnType::Text => Value::Text(v.to_string()),
        ColumnType::Absent => Value::Absent,
    }
}

fn parse_real(v: &str) -> Value {
    match v.parse::<f64>() {
        Ok(f) if f.is_finite() => Value::Real(f),
        _ => Value::Absent,
    }
}

/// Parses the supported timestamp layouts into Unix seconds (UTC).
pub fn parse_timestamp(v: &str) -> Option<i64> {
    for format in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(v, format) {
            return Some(dt.and_utc().timestamp());
        }
    }
    for format in DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(v, format) {
            return d.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc().timestamp());
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_type_order() {
        assert_eq!(detect_type(""), ColumnType::Absent);
        assert_eq!(detect_type(" 42 "), ColumnType::Integer);
        assert_eq!(detect_type("-7"), ColumnType::Integer);
        assert_eq!(detect_type("3.14"), ColumnType::Real);
        assert_eq!(detect_type("1e5"), ColumnType::Real);
        assert_eq!(detect_type("2024-01-31"), ColumnType::Timestamp);
        assert_eq!(detect_type("2024/01/31"), ColumnType::Timestamp);
        assert_eq!(detect_type("2024-01-31T10:00:00"), ColumnType::Timestamp);
        assert_eq!(detect_type("TRUE"), ColumnType::Boolean);
        assert_eq!(detect_type("west"), ColumnType::Text);
    }

    #[test]
    fn test_non_finite_literals_are_text() {
        assert_eq!(detect_type("inf"), ColumnType::Text);
        assert_eq!(detect_type("NaN"), ColumnType::Text);
    }

    #[test]
    fn test_most_frequent_type_wins() {
        let header = vec!["a".to_string()];
        let rows: Vec<Vec<String>> = ["1", "2", "x", "3"]
            .iter()
            .map(|v| vec![v.to_string()])
            .collect();
        assert_eq!(infer_column_types(&header, &rows, 200), vec![ColumnType::Integer]);
    }

    #[test]
    fn test_tie_broken_by_type_name() {
        let header = vec!["a".to_string()];
        let rows = vec![vec!["x".to_string()], vec!["1".to_string()]];
        // "integer" sorts before "text"
        assert_eq!(infer_column_types(&header, &rows, 200), vec![ColumnType::Integer]);
    }

    #[test]
    fn test_sample_limit() {
        let header = vec!["a".to_string()];
        let rows = vec![vec!["x".to_string()], vec!["1".to_string()], vec!["2".to_string()]];
        assert_eq!(infer_column_types(&header, &rows, 1), vec![ColumnType::Text]);
    }

    #[test]
    fn test_convert_cell() {
        assert_eq!(convert_cell("5", ColumnType::Integer), Value::Integer(5));
        assert_eq!(convert_cell("5.5", ColumnType::Integer), Value::Real(5.5));
        assert_eq!(convert_cell("abc", ColumnType::Integer), Value::Absent);
        assert_eq!(convert_cell("5", ColumnType::Real), Value::Real(5.0));
        assert_eq!(convert_cell("false", ColumnType::Boolean), Value::Boolean(false));
        assert_eq!(convert_cell("1970-01-02", ColumnType::Timestamp), Value::Timestamp(86_400));
        assert_eq!(convert_cell("  ", ColumnType::Text), Value::Absent);
    }
}
