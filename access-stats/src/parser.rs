use tracing::debug;

use crate::{
    error::{AppError, Result},
    models::LogRecord,
};

const FIELD_COUNT: usize = 5;

/// Parses every line into a record, stopping at the first bad row.
pub fn parse_records<S: AsRef<str>>(lines: &[S]) -> Result<Vec<LogRecord>> {
    let records = lines
        .iter()
        .enumerate()
        .map(|(i, line)| parse_log_line(i + 1, line.as_ref()))
        .collect::<Result<Vec<_>>>()?;
    debug!(records = records.len(), "parsed access log");
    Ok(records)
}

fn parse_log_line(line_no: usize, line: &str) -> Result<LogRecord> {
    let [path, timestamp, browser, status, size] =
        <[String; FIELD_COUNT]>::try_from(split_csv_line(line)).map_err(|fields| {
            AppError::MalformedRecord {
                line: line_no,
                found: fields.len(),
            }
        })?;
    Ok(LogRecord {
        path: path.into(),
        timestamp,
        browser: browser.into(),
        status: parse_int(line_no, "status", status)?,
        size: parse_int(line_no, "size", size)?,
    })
}

/// Base-10 integer, sign allowed, surrounding whitespace ignored.
fn parse_int(line: usize, field: &'static str, value: String) -> Result<i64> {
    match value.trim().parse() {
        Ok(n) => Ok(n),
        Err(_) => Err(AppError::FieldType { line, field, value }),
    }
}

/// Splits one CSV line. A field opening with `"` may hold commas, and `""`
/// inside it is a literal quote.
fn split_csv_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut at_field_start = true;
    let mut chars = line.chars().peekable();

    while let Some(ch) = chars.next() {
        if in_quotes {
            if ch == '"' {
                if chars.peek() == Some(&'"') {
                    current.push('"');
                    chars.next();
                } else {
                    in_quotes = false;
                }
            } else {
                current.push(ch);
            }
            continue;
        }
        match ch {
            '"' if at_field_start => in_quotes = true,
            ',' => {
                fields.push(std::mem::take(&mut current));
                at_field_start = true;
                continue;
            }
            _ => current.push(ch),
        }
        at_field_start = false;
    }
    fields.push(current);
    fields
}

#[cfg(test)]
mod tests {
    use super::*;
    use asserting::prelude::*;

    #[test]
    fn parse_log_line_valid() {
        let record =
            parse_log_line(1, "/img/a.png,2024-01-01 08:15:00,Mozilla Chrome/90,200,512").unwrap();
        assert_eq!(record.path.as_str(), "/img/a.png");
        assert_eq!(record.timestamp, "2024-01-01 08:15:00");
        assert_eq!(record.browser.as_str(), "Mozilla Chrome/90");
        assert_eq!(record.status, 200);
        assert_eq!(record.size, 512);
    }

    #[test]
    fn quoted_fields_keep_embedded_commas() {
        let line = r#"/search,2024-01-01 10:00:00,"Mozilla/5.0 (X11, Linux) ""Firefox""/95",404,0"#;
        let record = parse_log_line(1, line).unwrap();
        assert_eq!(
            record.browser.as_str(),
            r#"Mozilla/5.0 (X11, Linux) "Firefox"/95"#
        );
        assert_eq!(record.status, 404);
    }

    #[test]
    fn quote_inside_unquoted_field_is_literal() {
        assert_eq!(split_csv_line(r#"a"b,c"#), vec![r#"a"b"#, "c"]);
    }

    #[test]
    fn empty_fields_are_kept() {
        assert_eq!(split_csv_line(",,"), vec!["", "", ""]);
    }

    #[test]
    fn four_fields_is_malformed() {
        let result = parse_log_line(3, "/a,2024-01-01 00:00:00,Firefox,200");
        assert_that!(matches!(
            result,
            Err(AppError::MalformedRecord { line: 3, found: 4 })
        ))
        .is_true();
    }

    #[test]
    fn blank_line_is_malformed() {
        let result = parse_log_line(1, "");
        assert_that!(matches!(
            result,
            Err(AppError::MalformedRecord { found: 1, .. })
        ))
        .is_true();
    }

    #[test]
    fn non_integer_status_is_field_type_error() {
        let result = parse_log_line(2, "/a,2024-01-01 00:00:00,Firefox,OK,10");
        match result {
            Err(AppError::FieldType { line, field, value }) => {
                assert_eq!((line, field, value.as_str()), (2, "status", "OK"));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn signed_and_wide_integers_are_accepted() {
        let record = parse_log_line(1, "/a,2024-01-01 00:00:00,Firefox,70000,-1").unwrap();
        assert_eq!((record.status, record.size), (70000, -1));
        let record = parse_log_line(1, "/a,2024-01-01 00:00:00,Firefox,+301,0").unwrap();
        assert_eq!(record.status, 301);
    }

    #[test]
    fn integers_may_carry_surrounding_whitespace() {
        let record = parse_log_line(1, "/a,2024-01-01 00:00:00,Firefox, 200,512 ").unwrap();
        assert_eq!((record.status, record.size), (200, 512));
    }

    #[test]
    fn fractional_size_is_field_type_error() {
        let result = parse_log_line(1, "/a,2024-01-01 00:00:00,Firefox,200,1.5");
        match result {
            Err(AppError::FieldType { field, value, .. }) => {
                assert_eq!((field, value.as_str()), ("size", "1.5"));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn blank_status_is_field_type_error() {
        let result = parse_log_line(1, "/a,2024-01-01 00:00:00,Firefox,  ,1");
        assert_that!(matches!(
            result,
            Err(AppError::FieldType { field: "status", .. })
        ))
        .is_true();
    }

    #[test]
    fn one_bad_row_fails_the_whole_parse() {
        let lines = [
            "/a.png,2024-01-01 00:00:00,Firefox,200,1",
            "/b.png,2024-01-01 00:00:00,Firefox,200",
            "/c.png,2024-01-01 00:00:00,Firefox,200,1",
        ];
        assert_that!(matches!(
            parse_records(&lines),
            Err(AppError::MalformedRecord { line: 2, .. })
        ))
        .is_true();
    }

    #[test]
    fn bad_timestamp_still_parses() {
        let records = parse_records(&["/a,not-a-date,Safari,200,1"]).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].timestamp, "not-a-date");
    }
}
