//! Calendar periods used to filter time entries.

use serde::Deserialize;
use time::{Date, Month};

use crate::Error;

/// Query parameters that select a [Period].
///
/// Both are optional, see [Period::from_query] for how they combine.
#[derive(Debug, Default, Deserialize)]
pub struct PeriodQuery {
    pub year: Option<i32>,
    pub month: Option<u8>,
}

/// Query parameters that select a single calendar month.
#[derive(Debug, Deserialize)]
pub struct MonthQuery {
    pub year: i32,
    pub month: u8,
}

/// Query parameters that select a single calendar year.
#[derive(Debug, Deserialize)]
pub struct YearQuery {
    pub year: i32,
}

/// An inclusive range of dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: Date,
    pub end: Date,
}

/// The span of time a query or report covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Period {
    AllTime,
    Year(i32),
    Month { year: i32, month: Month },
}

impl Period {
    /// Select a period from an optional year and month.
    ///
    /// - year and month: that calendar month,
    /// - year only: that calendar year,
    /// - neither: all time.
    ///
    /// # Errors
    ///
    /// Returns [Error::InvalidPeriod] if the month is given without a year,
    /// the month is not in 1..=12, or the year is out of range.
    pub fn from_query(query: &PeriodQuery) -> Result<Self, Error> {
        match (query.year, query.month) {
            (Some(year), Some(month)) => {
                let month = parse_month(month)?;
                month_bounds(year, month)?;
                Ok(Self::Month { year, month })
            }
            (Some(year), None) => {
                year_bounds(year)?;
                Ok(Self::Year(year))
            }
            (None, Some(_)) => Err(Error::InvalidPeriod(
                "a month was given without a year".to_owned(),
            )),
            (None, None) => Ok(Self::AllTime),
        }
    }

    /// The dates covered by this period, or `None` for all time.
    ///
    /// Also `None` if the year is out of range, which [Period::from_query] rejects.
    pub fn date_range(&self) -> Option<DateRange> {
        match *self {
            Self::AllTime => None,
            Self::Year(year) => year_bounds(year).ok(),
            Self::Month { year, month } => month_bounds(year, month).ok(),
        }
    }
}

/// Convert a month number (1 = January) into a [Month].
///
/// # Errors
///
/// Returns [Error::InvalidPeriod] if `month` is not in 1..=12.
pub fn parse_month(month: u8) -> Result<Month, Error> {
    Month::try_from(month)
        .map_err(|_| Error::InvalidPeriod(format!("{month} is not a month, expected 1 to 12")))
}

/// The first and last day of a calendar month.
pub fn month_bounds(year: i32, month: Month) -> Result<DateRange, Error> {
    let start = Date::from_calendar_date(year, month, 1).map_err(invalid_year(year))?;
    let end = Date::from_calendar_date(year, month, days_in_month(year, month))
        .map_err(invalid_year(year))?;

    Ok(DateRange { start, end })
}

/// The first and last day of a calendar year.
pub fn year_bounds(year: i32) -> Result<DateRange, Error> {
    let start = Date::from_calendar_date(year, Month::January, 1).map_err(invalid_year(year))?;
    let end = Date::from_calendar_date(year, Month::December, 31).map_err(invalid_year(year))?;

    Ok(DateRange { start, end })
}

/// The number of days in `month` of `year`, accounting for leap years.
pub fn days_in_month(year: i32, month: Month) -> u8 {
    match month {
        Month::January
        | Month::March
        | Month::May
        | Month::July
        | Month::August
        | Month::October
        | Month::December => 31,
        Month::April | Month::June | Month::September | Month::November => 30,
        Month::February => {
            if is_leap_year(year) {
                29
            } else {
                28
            }
        }
    }
}

fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || (year % 400 == 0)
}

fn invalid_year(year: i32) -> impl Fn(time::error::ComponentRange) -> Error {
    move |_| Error::InvalidPeriod(format!("{year} is not a supported year"))
}
