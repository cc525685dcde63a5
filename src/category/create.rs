//! Category creation endpoint.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, State, rejection::JsonRejection},
    http::{StatusCode, header::LOCATION},
    response::{IntoResponse, Response},
};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    category::{CategoryData, NewCategory, create_category},
    endpoints,
};

/// The state needed for creating a category.
#[derive(Debug, Clone)]
pub struct CreateCategoryState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for CreateCategoryState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Create a category from a JSON body with a name and colour.
///
/// Any ID or archived flag in the body is ignored. Responds with
/// `201 Created`, the new category and its location.
pub async fn create_category_endpoint(
    State(state): State<CreateCategoryState>,
    payload: Result<Json<CategoryData>, JsonRejection>,
) -> Result<Response, Error> {
    let Json(data) = payload?;
    let new_category = NewCategory::try_from(data)?;

    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let category = create_category(new_category, &connection)?;
    let location = endpoints::format_endpoint(endpoints::CATEGORY, category.id);

    Ok((StatusCode::CREATED, [(LOCATION, location)], Json(category)).into_response())
}
