//! Database operations for time entries.

use rusqlite::{Connection, Row};
use time::Month;

use crate::{
    Error,
    category::map_category_row_with_offset,
    database_id::{CategoryId, EntryId},
    entry::{NewEntry, TimeEntry},
    period::{DateRange, month_bounds, year_bounds},
};

/// Selects entries with their category resolved by a left join so that
/// entries without a category are still returned.
const SELECT_ENTRY: &str = "SELECT
        e.id, e.date, e.hours, e.description, e.category_id,
        c.id, c.name, c.color, c.is_archived, c.created_at
    FROM time_entry e
    LEFT JOIN category c ON c.id = e.category_id";

/// Create a new time entry in the database.
///
/// # Errors
/// This function will return a:
/// - [Error::InvalidCategory] if the category ID does not refer to a real category,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn create_entry(new_entry: NewEntry, connection: &Connection) -> Result<TimeEntry, Error> {
    let category_id = new_entry.category_id;

    let id: EntryId = connection
        .prepare(
            "INSERT INTO time_entry (date, hours, description, category_id)
             VALUES (?1, ?2, ?3, ?4)
             RETURNING id",
        )?
        .query_row(
            (
                new_entry.date,
                new_entry.hours.as_f64(),
                new_entry.description.as_ref(),
                category_id,
            ),
            |row| row.get(0),
        )
        .map_err(|error| map_foreign_key_error(error, category_id))?;

    get_entry(id, connection)
}

/// Retrieve a time entry and its category by the entry's `id`.
///
/// # Errors
/// This function will return a:
/// - [Error::NotFound] if `id` does not refer to a valid entry,
/// - or [Error::SqlError] there is some other SQL error.
pub fn get_entry(id: EntryId, connection: &Connection) -> Result<TimeEntry, Error> {
    let entry = connection
        .prepare(&format!("{SELECT_ENTRY} WHERE e.id = :id"))?
        .query_row(&[(":id", &id)], map_entry_row)?;

    Ok(entry)
}

/// Retrieve every time entry, most recent first.
pub fn get_all_entries(connection: &Connection) -> Result<Vec<TimeEntry>, Error> {
    connection
        .prepare(&format!("{SELECT_ENTRY} ORDER BY e.date DESC, e.id DESC"))?
        .query_map([], map_entry_row)?
        .map(|maybe_entry| maybe_entry.map_err(|error| error.into()))
        .collect()
}

/// Retrieve the time entries dated within a calendar month, oldest first.
///
/// # Errors
/// Returns [Error::InvalidPeriod] if `year` is out of range, or
/// [Error::SqlError] if there is an SQL error.
pub fn get_entries_in_month(
    year: i32,
    month: Month,
    connection: &Connection,
) -> Result<Vec<TimeEntry>, Error> {
    get_entries_in_range(month_bounds(year, month)?, connection)
}

/// Retrieve the time entries dated within a calendar year, oldest first.
///
/// # Errors
/// Returns [Error::InvalidPeriod] if `year` is out of range, or
/// [Error::SqlError] if there is an SQL error.
pub fn get_entries_in_year(year: i32, connection: &Connection) -> Result<Vec<TimeEntry>, Error> {
    get_entries_in_range(year_bounds(year)?, connection)
}

/// Retrieve the time entries dated within `range` (inclusive), oldest first.
pub fn get_entries_in_range(
    range: DateRange,
    connection: &Connection,
) -> Result<Vec<TimeEntry>, Error> {
    connection
        .prepare(&format!(
            "{SELECT_ENTRY} WHERE e.date BETWEEN ?1 AND ?2 ORDER BY e.date ASC, e.id ASC"
        ))?
        .query_map((range.start, range.end), map_entry_row)?
        .map(|maybe_entry| maybe_entry.map_err(|error| error.into()))
        .collect()
}

/// Replace every field of the time entry `id` with `entry`.
///
/// # Errors
/// This function will return a:
/// - [Error::UpdateMissingEntry] if no entry with `id` exists when the update runs,
/// - [Error::InvalidCategory] if the category ID does not refer to a real category,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn update_entry(id: EntryId, entry: NewEntry, connection: &Connection) -> Result<(), Error> {
    let category_id = entry.category_id;

    let rows_affected = connection
        .execute(
            "UPDATE time_entry
             SET date = ?1, hours = ?2, description = ?3, category_id = ?4
             WHERE id = ?5",
            (
                entry.date,
                entry.hours.as_f64(),
                entry.description.as_ref(),
                category_id,
                id,
            ),
        )
        .map_err(|error| map_foreign_key_error(error, category_id))?;

    if rows_affected == 0 {
        return Err(Error::UpdateMissingEntry);
    }

    Ok(())
}

/// Delete a time entry.
///
/// # Errors
/// This function will return a:
/// - [Error::DeleteMissingEntry] if `id` does not refer to a valid entry,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn delete_entry(id: EntryId, connection: &Connection) -> Result<(), Error> {
    let rows_affected = connection.execute("DELETE FROM time_entry WHERE id = ?1", [id])?;

    if rows_affected == 0 {
        return Err(Error::DeleteMissingEntry);
    }

    Ok(())
}

/// Get the total number of time entries in the database.
pub fn count_entries(connection: &Connection) -> Result<u32, Error> {
    connection
        .query_row("SELECT COUNT(id) FROM time_entry;", [], |row| row.get(0))
        .map_err(|error| error.into())
}

/// Create the time entry table in the database.
///
/// # Errors
/// Returns an error if the table cannot be created or if there is an SQL error.
pub fn create_entry_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS time_entry (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                date TEXT NOT NULL,
                hours REAL NOT NULL CHECK (hours > 0 AND hours <= 24),
                description TEXT NOT NULL,
                category_id INTEGER,
                FOREIGN KEY(category_id) REFERENCES category(id) ON UPDATE CASCADE ON DELETE SET NULL
                )",
        (),
    )?;

    // Add composite index used by the month queries and reports.
    connection.execute(
        "CREATE INDEX IF NOT EXISTS idx_time_entry_date_category ON time_entry(date, category_id);",
        (),
    )?;

    Ok(())
}

/// Map a row selected with [SELECT_ENTRY] to a [TimeEntry].
fn map_entry_row(row: &Row) -> Result<TimeEntry, rusqlite::Error> {
    let id = row.get(0)?;
    let date = row.get(1)?;
    let hours = row.get(2)?;
    let description = row.get(3)?;
    let category_id = row.get(4)?;

    let joined_category_id: Option<CategoryId> = row.get(5)?;
    let category = match joined_category_id {
        Some(_) => Some(map_category_row_with_offset(row, 5)?),
        None => None,
    };

    Ok(TimeEntry {
        id,
        date,
        hours,
        description,
        category_id,
        category,
    })
}

fn map_foreign_key_error(
    error: rusqlite::Error,
    category_id: Option<CategoryId>,
) -> Error {
    match error {
        rusqlite::Error::SqliteFailure(
            rusqlite::ffi::Error {
                code: _,
                extended_code: rusqlite::ffi::SQLITE_CONSTRAINT_FOREIGNKEY,
            },
            _,
        ) => Error::InvalidCategory(category_id),
        error => error.into(),
    }
}
