//! Time entry deletion endpoint.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Path, State, rejection::PathRejection},
    http::StatusCode,
};
use rusqlite::Connection;

use crate::{AppState, Error, database_id::EntryId, entry::delete_entry};

/// The state needed for deleting a time entry.
#[derive(Debug, Clone)]
pub struct DeleteEntryState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for DeleteEntryState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Delete a time entry.
pub async fn delete_entry_endpoint(
    path: Result<Path<EntryId>, PathRejection>,
    State(state): State<DeleteEntryState>,
) -> Result<StatusCode, Error> {
    let Path(entry_id) = path?;

    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    delete_entry(entry_id, &connection)?;

    Ok(StatusCode::NO_CONTENT)
}
