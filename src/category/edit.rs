//! Category replace endpoint.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, Path, State, rejection::{JsonRejection, PathRejection}},
    http::StatusCode,
};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    category::{CategoryData, NewCategory, update_category},
    database_id::{CategoryId, check_ids_match},
};

/// The state needed for updating a category.
#[derive(Debug, Clone)]
pub struct UpdateCategoryState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for UpdateCategoryState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Replace a category's name, colour and archived flag.
///
/// An `isArchived` missing from the body unarchives the category. Responds
/// with `204 No Content` on success.
pub async fn update_category_endpoint(
    path: Result<Path<CategoryId>, PathRejection>,
    State(state): State<UpdateCategoryState>,
    payload: Result<Json<CategoryData>, JsonRejection>,
) -> Result<StatusCode, Error> {
    let Path(category_id) = path?;
    let Json(data) = payload?;

    check_ids_match(category_id, data.id)?;
    let category = NewCategory::try_from(data)?;

    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    update_category(category_id, category, &connection)?;

    Ok(StatusCode::NO_CONTENT)
}
