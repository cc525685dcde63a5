//! Time entry aggregation for reports and charts.
//!
//! Every function here is a pure fold over [ReportRow]s that have already been
//! filtered to the period of interest.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use time::{Date, Month};

use crate::{
    Error,
    database_id::CategoryId,
    period::{days_in_month, month_bounds},
    report::query::ReportRow,
};

/// The label used for entries that have no category.
pub const UNCATEGORIZED_LABEL: &str = "Uncategorized";

/// The colour used for entries that have no category.
pub const DEFAULT_COLOR: &str = "#6B7280";

const MONTH_LABELS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Summary statistics over a period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Statistics {
    pub total_hours: f64,
    pub task_count: usize,
    pub average_hours_per_entry: f64,
    /// The number of distinct days with at least one entry.
    pub working_days: usize,
    pub average_hours_per_working_day: f64,
}

/// The hours logged against one category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryHours {
    /// `None` for the uncategorized bucket.
    pub category_id: Option<CategoryId>,
    pub category_name: String,
    pub color: String,
    pub hours: f64,
}

/// A row of the category distribution, see [category_distribution].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DistributionRow {
    pub category_id: Option<CategoryId>,
    pub category_name: String,
    pub color: String,
    pub hours: f64,
    /// Share of the period's total hours, from 0 to 100.
    pub percentage: f64,
}

/// The hours logged in one month of a year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthPoint {
    /// The month number, 1 = January.
    pub month: u8,
    /// The three letter month name, e.g. "Jan".
    pub label: String,
    pub hours: f64,
    pub categories: Vec<CategoryHours>,
}

/// The hours logged on one day of a month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayPoint {
    pub day: u8,
    pub date: Date,
    pub hours: f64,
    pub categories: Vec<CategoryHours>,
}

/// Calculates totals and averages over `rows`.
///
/// Averages are zero when there are no rows.
pub(super) fn monthly_statistics(rows: &[ReportRow]) -> Statistics {
    let total_hours: f64 = rows.iter().map(|row| row.hours).sum();
    let task_count = rows.len();
    let working_days = rows
        .iter()
        .map(|row| row.date)
        .collect::<HashSet<_>>()
        .len();

    Statistics {
        total_hours,
        task_count,
        average_hours_per_entry: average(total_hours, task_count),
        working_days,
        average_hours_per_working_day: average(total_hours, working_days),
    }
}

/// Sums the hours for each month of `year`.
///
/// Always returns 12 points, January first. Months without entries have zero
/// hours and no categories.
pub(super) fn annual_series(rows: &[ReportRow], year: i32) -> Vec<MonthPoint> {
    let mut rows_by_month: HashMap<Month, Vec<&ReportRow>> = HashMap::new();

    for row in rows.iter().filter(|row| row.date.year() == year) {
        rows_by_month.entry(row.date.month()).or_default().push(row);
    }

    (1..=12u8)
        .zip(MONTH_LABELS)
        .map(|(month_number, label)| {
            let month_rows = Month::try_from(month_number)
                .ok()
                .and_then(|month| rows_by_month.get(&month))
                .map(Vec::as_slice)
                .unwrap_or_default();

            MonthPoint {
                month: month_number,
                label: label.to_owned(),
                hours: month_rows.iter().map(|row| row.hours).sum(),
                categories: category_breakdown(month_rows.iter().copied()),
            }
        })
        .collect()
}

/// Sums the hours for each day of a month.
///
/// Returns one point per day of the month, so 29 points for February 2024.
/// Days without entries have zero hours and no categories.
///
/// # Errors
/// Returns [Error::InvalidPeriod] if `year` is out of range.
pub(super) fn daily_series(
    rows: &[ReportRow],
    year: i32,
    month: Month,
) -> Result<Vec<DayPoint>, Error> {
    let range = month_bounds(year, month)?;

    let mut rows_by_date: HashMap<Date, Vec<&ReportRow>> = HashMap::new();
    for row in rows
        .iter()
        .filter(|row| range.start <= row.date && row.date <= range.end)
    {
        rows_by_date.entry(row.date).or_default().push(row);
    }

    (1..=days_in_month(year, month))
        .map(|day| -> Result<DayPoint, Error> {
            let date = range
                .start
                .replace_day(day)
                .map_err(|error| Error::InvalidPeriod(error.to_string()))?;
            let day_rows = rows_by_date
                .get(&date)
                .map(Vec::as_slice)
                .unwrap_or_default();

            Ok(DayPoint {
                day,
                date,
                hours: day_rows.iter().map(|row| row.hours).sum(),
                categories: category_breakdown(day_rows.iter().copied()),
            })
        })
        .collect()
}

/// Splits the hours in `rows` by category.
///
/// Only categories with hours are included, and entries without a category
/// are grouped under [UNCATEGORIZED_LABEL]. Rows are ordered by hours, most
/// first, then by name.
pub(super) fn category_distribution(rows: &[ReportRow]) -> Vec<DistributionRow> {
    let total_hours: f64 = rows.iter().map(|row| row.hours).sum();

    category_breakdown(rows.iter())
        .into_iter()
        .map(|bucket| DistributionRow {
            percentage: if total_hours > 0.0 {
                bucket.hours * 100.0 / total_hours
            } else {
                0.0
            },
            category_id: bucket.category_id,
            category_name: bucket.category_name,
            color: bucket.color,
            hours: bucket.hours,
        })
        .collect()
}

/// Sums hours per category, keyed by category ID so that categories with
/// the same name are kept apart.
fn category_breakdown<'a>(rows: impl Iterator<Item = &'a ReportRow>) -> Vec<CategoryHours> {
    let mut buckets: HashMap<Option<CategoryId>, CategoryHours> = HashMap::new();

    for row in rows {
        buckets
            .entry(row.category_id)
            .or_insert_with(|| CategoryHours {
                category_id: row.category_id,
                category_name: row
                    .category_name
                    .clone()
                    .unwrap_or_else(|| UNCATEGORIZED_LABEL.to_owned()),
                color: row
                    .color
                    .clone()
                    .unwrap_or_else(|| DEFAULT_COLOR.to_owned()),
                hours: 0.0,
            })
            .hours += row.hours;
    }

    let mut breakdown: Vec<CategoryHours> = buckets
        .into_values()
        .filter(|bucket| bucket.hours > 0.0)
        .collect();

    breakdown.sort_by(|a, b| {
        b.hours
            .total_cmp(&a.hours)
            .then_with(|| a.category_name.cmp(&b.category_name))
            .then_with(|| a.category_id.cmp(&b.category_id))
    });

    breakdown
}

fn average(total: f64, count: usize) -> f64 {
    if count == 0 {
        0.0
    } else {
        total / count as f64
    }
}
