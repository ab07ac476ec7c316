//! Delimited text reader
//!
//! Comma-separated records with a mandatory header row. Fields may be wrapped
//! in double quotes; a doubled quote inside a quoted field is a literal quote.
//! Quoted fields may span lines. Blank lines are skipped.

use std::collections::BTreeSet;

use super::errors::{IngestError, IngestResult};

/// Header plus raw string rows
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawTable {
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// Parses the whole input. Stops after `max_rows` data rows if given.
///
/// # Errors
///
/// Fails on a missing header, duplicate header names, ragged rows and
/// unterminated quotes. Errors carry 1-based line numbers.
pub fn parse(input: &str, max_rows: Option<usize>) -> IngestResult<RawTable> {
    let mut records = Records::new(input);

    let header = match records.next_record()? {
        Some((_, fields)) => fields,
        None => return Err(IngestError::MissingHeader),
    };
    let mut seen = BTreeSet::new();
    for name in &header {
        if !seen.insert(name.as_str()) {
            return Err(IngestError::DuplicateColumn(name.clone()));
        }
    }

    let mut rows = Vec::new();
    while max_rows.map_or(true, |max| rows.len() < max) {
        let Some((line, fields)) = records.next_record()? else {
            break;
        };
        if fields.len() != header.len() {
            return Err(IngestError::RaggedRow {
                line,
                expected: header.len(),
                found: fields.len(),
            });
        }
        rows.push(fields);
    }

    Ok(RawTable { header, rows })
}

struct Records<'a> {
    chars: std::iter::Peekable<std::str::Chars<'a>>,
    line: usize,
}

impl<'a> Records<'a> {
    fn new(input: &'a str) -> Self {
        let input = input.strip_prefix('\u{feff}').unwrap_or(input);
        Self {
            chars: input.chars().peekable(),
            line: 1,
        }
    }

    /// Returns the next non-blank record and the line it started on.
    fn next_record(&mut self) -> IngestResult<Option<(usize, Vec<String>)>> {
        loop {
            if self.chars.peek().is_none() {
                return Ok(None);
            }
            let start = self.line;
            let fields = self.read_record()?;
            if fields.len() == 1 && fields[0].is_empty() {
                continue;
            }
            return Ok(Some((start, fields)));
        }
    }

    fn read_record(&mut self) -> IngestResult<Vec<String>> {
        let mut fields = Vec::new();
        let mut field = String::new();
        let mut quoted = false;
        let start = self.line;

        while let Some(c) = self.chars.next() {
            match c {
                '"' if quoted => {
                    if self.chars.peek() == Some(&'"') {
                        self.chars.next();
                        field.push('"');
                    } else {
                        quoted = false;
                    }
                }
                '"' if field.is_empty() => quoted = true,
                '\n' if quoted => {
                    self.line += 1;
                    field.push('\n');
                }
                ',' if !quoted => fields.push(std::mem::take(&mut field)),
                '\r' if !quoted && self.chars.peek() == Some(&'\n') => {}
                '\n' => {
                    self.line += 1;
                    fields.push(field);
                    return Ok(fields);
                }
                c => field.push(c),
            }
        }

        if quoted {
            return Err(IngestError::UnterminatedQuote { line: start });
        }
        fields.push(field);
        Ok(fields)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_table() {
        let table = parse("a,b\n1,2\n3,4\n", None).unwrap();
        assert_eq!(table.header, vec!["a", "b"]);
        assert_eq!(table.rows, vec![vec!["1", "2"], vec!["3", "4"]]);
    }

    #[test]
    fn test_quoted_fields() {
        let table = parse("name,note\n\"Smith, J\",\"said \"\"hi\"\"\"\n", None).unwrap();
        assert_eq!(table.rows[0], vec!["Smith, J", "said \"hi\""]);
    }

    #[test]
    fn test_crlf_and_blank_lines() {
        let table = parse("a,b\r\n1,2\r\n\r\n3,4", None).unwrap();
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[1], vec!["3", "4"]);
    }

    #[test]
    fn test_empty_trailing_field() {
        let table = parse("a,b\n1,\n", None).unwrap();
        assert_eq!(table.rows[0], vec!["1", ""]);
    }

    #[test]
    fn test_missing_header() {
        assert!(matches!(parse("", None), Err(IngestError::MissingHeader)));
    }

    #[test]
    fn test_duplicate_header() {
        assert!(matches!(
            parse("a,a\n1,2\n", None),
            Err(IngestError::DuplicateColumn(name)) if name == "a"
        ));
    }

    #[test]
    fn test_ragged_row_reports_line() {
        let err = parse("a,b\n1,2\n3\n", None).unwrap_err();
        assert!(matches!(err, IngestError::RaggedRow { line: 3, expected: 2, found: 1 }));
    }

    #[test]
    fn test_unterminated_quote() {
        let err = parse("a\n\"open\n", None).unwrap_err();
        assert!(matches!(err, IngestError::UnterminatedQuote { line: 2 }));
    }

    #[test]
    fn test_max_rows() {
        let table = parse("a\n1\n2\n3\n", Some(2)).unwrap();
        assert_eq!(table.rows.len(), 2);
    }
}
