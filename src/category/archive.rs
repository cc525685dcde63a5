//! Endpoints for archiving and unarchiving categories.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Path, State, rejection::PathRejection},
    http::StatusCode,
};
use rusqlite::Connection;

use crate::{AppState, Error, category::set_category_archived, database_id::CategoryId};

/// The state needed for archiving a category.
#[derive(Debug, Clone)]
pub struct ArchiveCategoryState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for ArchiveCategoryState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Hide a category from the active list. Archiving twice is not an error.
pub async fn archive_category_endpoint(
    path: Result<Path<CategoryId>, PathRejection>,
    State(state): State<ArchiveCategoryState>,
) -> Result<StatusCode, Error> {
    let Path(category_id) = path?;

    set_archived(category_id, true, &state)
}

/// Return an archived category to the active list.
pub async fn unarchive_category_endpoint(
    path: Result<Path<CategoryId>, PathRejection>,
    State(state): State<ArchiveCategoryState>,
) -> Result<StatusCode, Error> {
    let Path(category_id) = path?;

    set_archived(category_id, false, &state)
}

fn set_archived(
    category_id: CategoryId,
    is_archived: bool,
    state: &ArchiveCategoryState,
) -> Result<StatusCode, Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    set_category_archived(category_id, is_archived, &connection)?;

    Ok(StatusCode::NO_CONTENT)
}
