//! Endpoints for reading time entries.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, Path, Query, State, rejection::{PathRejection, QueryRejection}},
};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    database_id::EntryId,
    entry::{TimeEntry, get_all_entries, get_entries_in_month, get_entries_in_year, get_entry},
    period::{Period, PeriodQuery},
};

/// The state needed for reading time entries.
#[derive(Debug, Clone)]
pub struct EntryListState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for EntryListState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// List time entries, optionally limited to a year or a month.
///
/// Without a period the entries are listed newest first, otherwise they are
/// listed in date order.
pub async fn get_entries_endpoint(
    State(state): State<EntryListState>,
    query: Result<Query<PeriodQuery>, QueryRejection>,
) -> Result<Json<Vec<TimeEntry>>, Error> {
    let Query(query) = query?;
    let period = Period::from_query(&query)?;

    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let entries = match period {
        Period::AllTime => get_all_entries(&connection)?,
        Period::Year(year) => get_entries_in_year(year, &connection)?,
        Period::Month { year, month } => get_entries_in_month(year, month, &connection)?,
    };

    Ok(Json(entries))
}

/// Get a single time entry with its category.
pub async fn get_entry_endpoint(
    path: Result<Path<EntryId>, PathRejection>,
    State(state): State<EntryListState>,
) -> Result<Json<TimeEntry>, Error> {
    let Path(entry_id) = path?;

    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    get_entry(entry_id, &connection).map(Json)
}
