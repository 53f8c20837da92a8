//! Minimal CSV reading: quote-aware splitting, header lookup and strict field parsing.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

/// Split a CSV line respecting quoted fields (handles commas inside quotes).
pub(crate) fn csv_split(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '"' => {
                if in_quotes {
                    // Escaped quote ("")
                    if chars.peek() == Some(&'"') {
                        current.push('"');
                        chars.next();
                    } else {
                        in_quotes = false;
                    }
                } else {
                    in_quotes = true;
                }
            }
            ',' if !in_quotes => fields.push(std::mem::take(&mut current)),
            _ => current.push(ch),
        }
    }
    fields.push(current);
    fields
}

/// Column names from a header row.
#[derive(Debug, Clone)]
pub(crate) struct Header {
    columns: Vec<String>,
}

impl Header {
    pub(crate) fn parse(line: &str) -> Self {
        let line = line.trim_start_matches('\u{feff}');
        Self {
            columns: csv_split(line)
                .into_iter()
                .map(|c| c.trim().to_string())
                .collect(),
        }
    }

    /// Index of a column, matched case-insensitively.
    pub(crate) fn index_of(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.eq_ignore_ascii_case(name))
    }

    pub(crate) fn len(&self) -> usize {
        self.columns.len()
    }
}

/// Borrow a field, failing if the row is too short.
pub(crate) fn field<'a>(fields: &'a [String], idx: usize, name: &str) -> Result<&'a str, String> {
    fields
        .get(idx)
        .map(|s| s.trim())
        .ok_or_else(|| format!("missing value for '{name}'"))
}

/// Non-empty text field.
pub(crate) fn parse_text(fields: &[String], idx: usize, name: &str) -> Result<String, String> {
    let s = field(fields, idx, name)?;
    if s.is_empty() {
        return Err(format!("empty value for '{name}'"));
    }
    Ok(s.to_string())
}

/// Finite, non-negative number. Empty cells and NaN are rejected.
pub(crate) fn parse_quantity(fields: &[String], idx: usize, name: &str) -> Result<f64, String> {
    let s = field(fields, idx, name)?;
    if s.is_empty() {
        return Err(format!("empty value for '{name}'"));
    }
    let v: f64 = s
        .parse()
        .map_err(|_| format!("'{name}' is not a number: '{s}'"))?;
    if !v.is_finite() {
        return Err(format!("'{name}' is not finite: '{s}'"));
    }
    if v < 0.0 {
        return Err(format!("'{name}' must be non-negative, got {v}"));
    }
    Ok(v)
}

/// Parse a timestamp field as UTC.
pub(crate) fn parse_timestamp(fields: &[String], idx: usize, name: &str) -> Result<DateTime<Utc>, String> {
    let s = field(fields, idx, name)?;
    parse_datetime_string(s).map_err(|e| format!("'{name}': {e}"))
}

/// Parse the date-time formats spreadsheet exports produce. Naive values are taken as UTC.
pub(crate) fn parse_datetime_string(s: &str) -> Result<DateTime<Utc>, String> {
    let s = s.trim().trim_matches('"');

    if s.is_empty() || s.eq_ignore_ascii_case("nan") || s.eq_ignore_ascii_case("nat") {
        return Err("empty timestamp".to_string());
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%:z") {
        return Ok(dt.with_timezone(&Utc));
    }

    for fmt in &[
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
    ] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Ok(dt.and_utc());
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        if let Some(dt) = date.and_hms_opt(0, 0, 0) {
            return Ok(dt.and_utc());
        }
    }

    Err(format!("cannot parse timestamp '{s}'"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn owned(fields: &[&str]) -> Vec<String> {
        fields.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn test_csv_split_handles_quotes() {
        assert_eq!(csv_split("a,b,c"), vec!["a", "b", "c"]);
        assert_eq!(csv_split(r#""Press, hydraulic",12.5"#), vec!["Press, hydraulic", "12.5"]);
        assert_eq!(csv_split(r#""say ""hi""",x"#), vec![r#"say "hi""#, "x"]);
        assert_eq!(csv_split("a,,c"), vec!["a", "", "c"]);
    }

    #[test]
    fn test_header_lookup_is_case_insensitive() {
        let header = Header::parse("\u{feff}machine, Cost_total_eur ,Downtime_total_h");
        assert_eq!(header.len(), 3);
        assert_eq!(header.index_of("MACHINE"), Some(0));
        assert_eq!(header.index_of("cost_total_eur"), Some(1));
        assert_eq!(header.index_of("Scrap_total"), None);
    }

    #[test]
    fn test_parse_quantity_rejects_bad_values() {
        let row = owned(&["1.5", "", "abc", "-2", "NaN"]);
        assert!((parse_quantity(&row, 0, "x").unwrap() - 1.5).abs() < f64::EPSILON);
        assert!(parse_quantity(&row, 1, "x").is_err());
        assert!(parse_quantity(&row, 2, "x").is_err());
        assert!(parse_quantity(&row, 3, "x").is_err());
        assert!(parse_quantity(&row, 4, "x").is_err());
        assert!(parse_quantity(&row, 9, "x").is_err());
    }

    #[test]
    fn test_parse_datetime_formats() {
        let expected = Utc.with_ymd_and_hms(2024, 3, 5, 14, 30, 0).unwrap();
        assert_eq!(parse_datetime_string("2024-03-05 14:30:00").unwrap(), expected);
        assert_eq!(parse_datetime_string("2024-03-05T14:30:00").unwrap(), expected);
        assert_eq!(parse_datetime_string("2024-03-05T14:30:00Z").unwrap(), expected);
        assert_eq!(parse_datetime_string("2024-03-05 15:30:00+01:00").unwrap(), expected);
        assert_eq!(
            parse_datetime_string("2024-03-05").unwrap(),
            Utc.with_ymd_and_hms(2024, 3, 5, 0, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_parse_datetime_rejects_garbage() {
        assert!(parse_datetime_string("").is_err());
        assert!(parse_datetime_string("NaT").is_err());
        assert!(parse_datetime_string("yesterday").is_err());
        assert!(parse_datetime_string("2024-13-40").is_err());
    }
}
