//! Date ranges accepted by reports, exports and the HTTP API.

use crate::errors::{AppError, AppResult};
use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DateRange {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.start_date, self.end_date)
    }
}

pub fn parse_day(s: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").map_err(|_| AppError::InvalidDate(s.to_string()))
}

impl DateRange {
    pub fn new(start_date: NaiveDate, end_date: NaiveDate) -> AppResult<Self> {
        if start_date > end_date {
            return Err(AppError::InvalidRange(format!(
                "start date {start_date} is after end date {end_date}"
            )));
        }
        Ok(Self {
            start_date,
            end_date,
        })
    }

    pub fn single(day: NaiveDate) -> Self {
        Self {
            start_date: day,
            end_date: day,
        }
    }

    /// From `startDate`/`endDate` query values; both are required.
    pub fn from_bounds(start: Option<&str>, end: Option<&str>) -> AppResult<Self> {
        match (start, end) {
            (Some(s), Some(e)) => Self::new(parse_day(s)?, parse_day(e)?),
            _ => Err(AppError::InvalidRange(
                "both startDate and endDate are required".into(),
            )),
        }
    }

    /// Whole calendar month from `YYYY-MM`.
    pub fn month(ym: &str) -> AppResult<Self> {
        let (y, m) = parse_year_month(ym.trim())?;
        Ok(Self {
            start_date: first_day(y, m)?,
            end_date: last_day(y, m)?,
        })
    }

    /// Parse a CLI range expression:
    ///
    /// - `YYYY`, `YYYY-MM`, `YYYY-MM-DD`
    /// - `YYYY:YYYY`, `YYYY-MM:YYYY-MM`, `YYYY-MM-DD:YYYY-MM-DD`
    pub fn parse(r: &str) -> AppResult<Self> {
        if let Some((start_raw, end_raw)) = r.split_once(':') {
            let start = start_raw.trim();
            let end = end_raw.trim();

            if start.len() != end.len() {
                return Err(AppError::InvalidRange(
                    "start and end must have same format".into(),
                ));
            }

            let (s, _) = bounds_of(start)?;
            let (_, e) = bounds_of(end)?;
            Self::new(s, e)
        } else {
            let (s, e) = bounds_of(r.trim())?;
            Self::new(s, e)
        }
    }

    pub fn contains(&self, day: NaiveDate) -> bool {
        self.start_date <= day && day <= self.end_date
    }

    pub fn start_str(&self) -> String {
        self.start_date.format("%Y-%m-%d").to_string()
    }

    pub fn end_str(&self) -> String {
        self.end_date.format("%Y-%m-%d").to_string()
    }
}

/// First and last day covered by a single `YYYY`, `YYYY-MM` or `YYYY-MM-DD`.
fn bounds_of(p: &str) -> AppResult<(NaiveDate, NaiveDate)> {
    match p.len() {
        4 => {
            let y: i32 = p
                .parse()
                .map_err(|_| AppError::InvalidRange(format!("invalid year '{p}'")))?;
            Ok((first_day(y, 1)?, last_day(y, 12)?))
        }
        7 => {
            let (y, m) = parse_year_month(p)?;
            Ok((first_day(y, m)?, last_day(y, m)?))
        }
        10 => {
            let d = parse_day(p)?;
            Ok((d, d))
        }
        _ => Err(AppError::InvalidRange(format!("unsupported range format '{p}'"))),
    }
}

fn parse_year_month(p: &str) -> AppResult<(i32, u32)> {
    let invalid = || AppError::InvalidRange(format!("invalid month '{p}'"));

    let (y, m) = p.split_once('-').ok_or_else(invalid)?;
    if y.len() != 4 || m.len() != 2 {
        return Err(invalid());
    }
    let y: i32 = y.parse().map_err(|_| invalid())?;
    let m: u32 = m.parse().map_err(|_| invalid())?;
    if !(1..=12).contains(&m) {
        return Err(invalid());
    }
    Ok((y, m))
}

fn first_day(y: i32, m: u32) -> AppResult<NaiveDate> {
    NaiveDate::from_ymd_opt(y, m, 1)
        .ok_or_else(|| AppError::InvalidRange(format!("invalid month {y}-{m:02}")))
}

fn last_day(y: i32, m: u32) -> AppResult<NaiveDate> {
    let next = if m == 12 {
        NaiveDate::from_ymd_opt(y + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(y, m + 1, 1)
    };
    next.and_then(|d| d.pred_opt())
        .filter(|d| d.month() == m)
        .ok_or_else(|| AppError::InvalidRange(format!("invalid month {y}-{m:02}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn month_covers_leap_february() {
        let r = DateRange::month("2024-02").unwrap();
        assert_eq!(r.start_date, d("2024-02-01"));
        assert_eq!(r.end_date, d("2024-02-29"));
    }

    #[test]
    fn parse_accepts_year_month_and_day_ranges() {
        let r = DateRange::parse("2024-06:2024-07").unwrap();
        assert_eq!(r.start_date, d("2024-06-01"));
        assert_eq!(r.end_date, d("2024-07-31"));

        let r = DateRange::parse("2024").unwrap();
        assert_eq!(r.end_date, d("2024-12-31"));

        let r = DateRange::parse("2024-07-15").unwrap();
        assert_eq!(r.start_date, r.end_date);
    }

    #[test]
    fn inverted_or_malformed_ranges_are_rejected() {
        assert!(matches!(
            DateRange::parse("2024-07-20:2024-07-01"),
            Err(AppError::InvalidRange(_))
        ));
        assert!(DateRange::parse("2024-07:2024-07-01").is_err());
        assert!(DateRange::month("2024-13").is_err());
        assert!(matches!(
            DateRange::from_bounds(Some("15/07/2024"), Some("2024-07-20")),
            Err(AppError::InvalidDate(_))
        ));
        assert!(DateRange::from_bounds(Some("2024-07-01"), None).is_err());
    }
}
