//! Time entry creation endpoint.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, State, rejection::JsonRejection},
    http::{StatusCode, header::LOCATION},
    response::{IntoResponse, Response},
};
use rusqlite::Connection;

use crate::{
    AppState, Error, endpoints,
    entry::{EntryData, NewEntry, create_entry},
};

/// The state needed for creating a time entry.
#[derive(Debug, Clone)]
pub struct CreateEntryState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for CreateEntryState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Log a new time entry.
///
/// Responds with `201 Created`, the stored entry with its category, and the
/// entry's location. Any ID in the body is ignored.
pub async fn create_entry_endpoint(
    State(state): State<CreateEntryState>,
    payload: Result<Json<EntryData>, JsonRejection>,
) -> Result<Response, Error> {
    let Json(data) = payload?;
    let new_entry = NewEntry::try_from(data)?;

    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let entry = create_entry(new_entry, &connection)?;
    let location = endpoints::format_endpoint(endpoints::ENTRY, entry.id);

    Ok((StatusCode::CREATED, [(LOCATION, location)], Json(entry)).into_response())
}
