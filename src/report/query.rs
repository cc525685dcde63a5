//! Database queries for retrieving report data.
//!
//! Reports only need the date, hours and category of each entry, so they use
//! a lighter row type than [crate::entry::TimeEntry].

use rusqlite::{Connection, Row};
use time::Date;

use crate::{Error, database_id::CategoryId, period::Period};

/// A time entry reduced to the fields needed for aggregation.
#[derive(Debug, Clone, PartialEq)]
pub(super) struct ReportRow {
    pub date: Date,
    pub hours: f64,
    pub category_id: Option<CategoryId>,
    pub category_name: Option<String>,
    pub color: Option<String>,
}

/// Gets the report rows for every entry in `period`, archived categories included.
///
/// # Errors
/// Returns [Error::SqlError] if the query fails.
pub(super) fn get_report_rows(
    period: &Period,
    connection: &Connection,
) -> Result<Vec<ReportRow>, Error> {
    let base_query = "SELECT
            e.date,
            e.hours,
            c.id,
            c.name,
            c.color
        FROM time_entry e
        LEFT JOIN category c ON c.id = e.category_id";

    let rows = match period.date_range() {
        Some(range) => connection
            .prepare(&format!(
                "{base_query} WHERE e.date BETWEEN ?1 AND ?2 ORDER BY e.date ASC, e.id ASC"
            ))?
            .query_map((range.start, range.end), map_report_row)?
            .collect::<Result<Vec<ReportRow>, rusqlite::Error>>(),
        None => connection
            .prepare(&format!("{base_query} ORDER BY e.date ASC, e.id ASC"))?
            .query_map([], map_report_row)?
            .collect::<Result<Vec<ReportRow>, rusqlite::Error>>(),
    };

    rows.map_err(|error| error.into())
}

fn map_report_row(row: &Row) -> Result<ReportRow, rusqlite::Error> {
    Ok(ReportRow {
        date: row.get(0)?,
        hours: row.get(1)?,
        category_id: row.get(2)?,
        category_name: row.get(3)?,
        color: row.get(4)?,
    })
}
