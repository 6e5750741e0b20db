//! Cell-level parsing into typed fields.
//!
//! Workbooks in the wild mix Excel date cells, ISO strings and Finnish
//! `d.m.yyyy` dates in the same column, and store ids and counts as either
//! numbers or text. Every parser here accepts all of these forms.

use chrono::{Days, NaiveDate, NaiveDateTime};

use super::workbook::CellValue;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FieldError {
    #[error("missing value in column {0}")]
    Missing(&'static str),

    #[error("unparseable date {value:?} in column {column}")]
    BadDate { column: &'static str, value: String },

    #[error("expected a non-negative whole number in column {column}, got {value:?}")]
    BadCount { column: &'static str, value: String },

    #[error("expected a year in column {column}, got {value:?}")]
    BadYear { column: &'static str, value: String },
}

// Two-digit years before four-digit ones: `%Y` would read "20" as year 20.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d.%m.%y", "%d.%m.%Y", "%d/%m/%Y", "%Y/%m/%d"];
const DATETIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S%.f"];

/// Largest serial Excel can represent (9999-12-31).
const MAX_EXCEL_SERIAL: f64 = 2_958_465.0;

/// Free text. Numbers are rendered without a trailing `.0`.
pub fn text(cell: &CellValue) -> Option<String> {
    match cell {
        CellValue::Empty | CellValue::Error(_) => None,
        CellValue::Text(s) => Some(s.clone()),
        CellValue::Int(i) => Some(i.to_string()),
        CellValue::Float(f) => Some(number_text(*f)),
        CellValue::Bool(b) => Some(b.to_string()),
        CellValue::DateTime(serial) => Some(number_text(*serial)),
    }
}

/// A required identifier. `2020.0` from a numeric cell becomes `"2020"`.
pub fn id(cell: &CellValue, column: &'static str) -> Result<String, FieldError> {
    text(cell).ok_or(FieldError::Missing(column))
}

pub fn required_text(cell: &CellValue, column: &'static str) -> Result<String, FieldError> {
    text(cell).ok_or(FieldError::Missing(column))
}

fn number_text(f: f64) -> String {
    if f.fract() == 0.0 && f.abs() < 1e15 {
        format!("{}", f as i64)
    } else {
        f.to_string()
    }
}

/// Optional date. Blank cells are `Ok(None)`; anything non-blank that does
/// not parse is an error.
pub fn date(cell: &CellValue, column: &'static str) -> Result<Option<NaiveDate>, FieldError> {
    let bad = || FieldError::BadDate {
        column,
        value: cell.render(),
    };
    match cell {
        CellValue::Empty => Ok(None),
        CellValue::DateTime(serial) | CellValue::Float(serial) => {
            excel_serial_date(*serial).map(Some).ok_or_else(bad)
        }
        CellValue::Int(i) => excel_serial_date(*i as f64).map(Some).ok_or_else(bad),
        CellValue::Text(s) => parse_date_text(s).map(Some).ok_or_else(bad),
        CellValue::Bool(_) | CellValue::Error(_) => Err(bad()),
    }
}

/// Convert an Excel serial (1900 date system, epoch 1899-12-30) to a date.
pub fn excel_serial_date(serial: f64) -> Option<NaiveDate> {
    if !serial.is_finite() || serial < 1.0 || serial > MAX_EXCEL_SERIAL {
        return None;
    }
    let epoch = NaiveDate::from_ymd_opt(1899, 12, 30)?;
    epoch.checked_add_days(Days::new(serial.floor() as u64))
}

/// Parse a textual date in any of the accepted layouts.
pub fn parse_date_text(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    for fmt in DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Some(d);
        }
    }
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.date());
        }
    }
    // Serial numbers that arrived as text.
    s.parse::<f64>().ok().and_then(excel_serial_date)
}

/// Optional non-negative whole number (goals, assists, jersey numbers).
pub fn count(cell: &CellValue, column: &'static str) -> Result<Option<u32>, FieldError> {
    let bad = || FieldError::BadCount {
        column,
        value: cell.render(),
    };
    match cell {
        CellValue::Empty => Ok(None),
        CellValue::Int(i) => u32::try_from(*i).map(Some).map_err(|_| bad()),
        CellValue::Float(f) => whole(*f).map(Some).ok_or_else(bad),
        CellValue::Text(s) => {
            let s = s.trim();
            if let Ok(n) = s.parse::<u32>() {
                return Ok(Some(n));
            }
            s.parse::<f64>().ok().and_then(whole).map(Some).ok_or_else(bad)
        }
        CellValue::Bool(_) | CellValue::DateTime(_) | CellValue::Error(_) => Err(bad()),
    }
}

/// Counting stat where a blank cell means zero.
pub fn count_or_zero(cell: &CellValue, column: &'static str) -> Result<u32, FieldError> {
    Ok(count(cell, column)?.unwrap_or(0))
}

fn whole(f: f64) -> Option<u32> {
    if f.is_finite() && f >= 0.0 && f.fract() == 0.0 && f <= u32::MAX as f64 {
        Some(f as u32)
    } else {
        None
    }
}

pub fn year(cell: &CellValue, column: &'static str) -> Result<i32, FieldError> {
    let value = text(cell).ok_or(FieldError::Missing(column))?;
    value
        .trim()
        .parse::<i32>()
        .ok()
        .filter(|y| (1800..=9999).contains(y))
        .ok_or(FieldError::BadYear { column, value })
}

/// Truthy cell: booleans, non-zero numbers, and yes/true/x/kyllä text.
pub fn flag(cell: &CellValue) -> bool {
    match cell {
        CellValue::Bool(b) => *b,
        CellValue::Int(i) => *i != 0,
        CellValue::Float(f) => *f != 0.0,
        CellValue::Text(s) => matches!(
            s.trim().to_lowercase().as_str(),
            "true" | "yes" | "y" | "x" | "1" | "kyllä" | "k"
        ),
        CellValue::Empty | CellValue::DateTime(_) | CellValue::Error(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn numeric_ids_lose_trailing_zero() {
        assert_eq!(id(&CellValue::Float(2020.0), "season_id").unwrap(), "2020");
        assert_eq!(id(&CellValue::Int(7), "player_id").unwrap(), "7");
        assert_eq!(id(&CellValue::Text("T1".into()), "team_id").unwrap(), "T1");
        assert_eq!(
            id(&CellValue::Empty, "team_id"),
            Err(FieldError::Missing("team_id"))
        );
    }

    #[test]
    fn dates_in_every_layout() {
        let expected = Some(ymd(2020, 1, 5));
        for raw in ["2020-01-05", "5.1.2020", "05.01.2020", "05/01/2020", "2020/01/05", "5.1.20"] {
            assert_eq!(date(&CellValue::Text(raw.into()), "date").unwrap(), expected, "{raw}");
        }
        assert_eq!(
            date(&CellValue::Text("2020-01-05T18:30:00".into()), "date").unwrap(),
            expected
        );
        // 43835 = 2020-01-05 in the 1900 date system
        assert_eq!(date(&CellValue::DateTime(43835.75), "date").unwrap(), expected);
        assert_eq!(date(&CellValue::Float(43835.0), "date").unwrap(), expected);
        assert_eq!(date(&CellValue::Text("43835".into()), "date").unwrap(), expected);
    }

    #[test]
    fn blank_date_is_none_garbage_is_error() {
        assert_eq!(date(&CellValue::Empty, "date").unwrap(), None);
        assert!(matches!(
            date(&CellValue::Text("next tuesday".into()), "date"),
            Err(FieldError::BadDate { .. })
        ));
        assert!(date(&CellValue::Float(-3.0), "date").is_err());
    }

    #[test]
    fn counts_accept_numbers_and_text() {
        assert_eq!(count(&CellValue::Int(3), "goals").unwrap(), Some(3));
        assert_eq!(count(&CellValue::Float(4.0), "goals").unwrap(), Some(4));
        assert_eq!(count(&CellValue::Text(" 5 ".into()), "goals").unwrap(), Some(5));
        assert_eq!(count(&CellValue::Text("6.0".into()), "goals").unwrap(), Some(6));
        assert_eq!(count(&CellValue::Empty, "goals").unwrap(), None);
        assert_eq!(count_or_zero(&CellValue::Empty, "goals").unwrap(), 0);
    }

    #[test]
    fn counts_reject_negative_and_fractional() {
        assert!(count(&CellValue::Int(-1), "goals").is_err());
        assert!(count(&CellValue::Float(2.5), "goals").is_err());
        assert!(count(&CellValue::Text("two".into()), "goals").is_err());
    }

    #[test]
    fn years_and_flags() {
        assert_eq!(year(&CellValue::Float(2019.0), "start_year").unwrap(), 2019);
        assert!(year(&CellValue::Text("soon".into()), "start_year").is_err());
        assert!(flag(&CellValue::Bool(true)));
        assert!(flag(&CellValue::Text("Kyllä".into())));
        assert!(flag(&CellValue::Int(1)));
        assert!(!flag(&CellValue::Text("no".into())));
        assert!(!flag(&CellValue::Empty));
    }
}
