//! Time entry replace endpoint.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, Path, State, rejection::{JsonRejection, PathRejection}},
    http::StatusCode,
};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    database_id::{EntryId, check_ids_match},
    entry::{EntryData, NewEntry, update_entry},
};

/// The state needed for updating a time entry.
#[derive(Debug, Clone)]
pub struct UpdateEntryState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for UpdateEntryState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Replace a time entry with the entry in the request body.
///
/// The body must hold the whole entry, a missing `categoryId` clears the
/// entry's category. Responds with `204 No Content` on success.
pub async fn update_entry_endpoint(
    path: Result<Path<EntryId>, PathRejection>,
    State(state): State<UpdateEntryState>,
    payload: Result<Json<EntryData>, JsonRejection>,
) -> Result<StatusCode, Error> {
    let Path(entry_id) = path?;
    let Json(data) = payload?;

    check_ids_match(entry_id, data.id)?;
    let entry = NewEntry::try_from(data)?;

    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    update_entry(entry_id, entry, &connection)?;

    Ok(StatusCode::NO_CONTENT)
}
