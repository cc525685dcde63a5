//! Endpoints for reading categories.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, Path, Query, State, rejection::{PathRejection, QueryRejection}},
};
use rusqlite::Connection;
use serde::Deserialize;

use crate::{
    AppState, Error,
    category::{Category, get_active_categories, get_all_categories, get_category},
    database_id::CategoryId,
};

/// The state needed for reading categories.
#[derive(Debug, Clone)]
pub struct CategoryListState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for CategoryListState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Query parameters for listing categories.
#[derive(Debug, Default, Deserialize)]
pub struct CategoryListQuery {
    /// Only return categories that are not archived.
    #[serde(default)]
    pub active: bool,
}

/// List categories ordered by name. Pass `?active=true` to leave out archived categories.
pub async fn get_categories_endpoint(
    State(state): State<CategoryListState>,
    query: Result<Query<CategoryListQuery>, QueryRejection>,
) -> Result<Json<Vec<Category>>, Error> {
    let Query(query) = query?;

    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let categories = if query.active {
        get_active_categories(&connection)?
    } else {
        get_all_categories(&connection)?
    };

    Ok(Json(categories))
}

/// List the categories that are not archived.
pub async fn get_active_categories_endpoint(
    State(state): State<CategoryListState>,
) -> Result<Json<Vec<Category>>, Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    get_active_categories(&connection).map(Json)
}

/// Get a single category, archived or not.
pub async fn get_category_endpoint(
    path: Result<Path<CategoryId>, PathRejection>,
    State(state): State<CategoryListState>,
) -> Result<Json<Category>, Error> {
    let Path(category_id) = path?;

    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    get_category(category_id, &connection).map(Json)
}
