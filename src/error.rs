//! Defines the app level error type and its conversion to JSON error responses.

use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::database_id::{CategoryId, DatabaseId};

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The number of hours for a time entry was not in the range (0, 24].
    #[error("{0} is not a valid number of hours, hours must be greater than 0 and at most 24")]
    InvalidHours(f64),

    /// An empty string was used for a time entry description.
    #[error("Description cannot be empty")]
    EmptyDescription,

    /// The time entry description was longer than the allowed number of characters.
    #[error("Description cannot be longer than {0} characters")]
    DescriptionTooLong(usize),

    /// An empty string was used to create a category name.
    #[error("Category name cannot be empty")]
    EmptyCategoryName,

    /// The category name was longer than the allowed number of characters.
    #[error("Category name cannot be longer than {0} characters")]
    CategoryNameTooLong(usize),

    /// The category colour was not a hex colour code such as "#3B82F6".
    #[error("\"{0}\" is not a valid hex color, expected a value like \"#3B82F6\"")]
    InvalidColor(String),

    /// The category ID used to create or update a time entry did not match a
    /// category in the database.
    #[error("the category ID {0:?} does not refer to a valid category")]
    InvalidCategory(Option<CategoryId>),

    /// The year and month used to select a reporting period were invalid,
    /// e.g. month 13 or a month without a year.
    #[error("invalid period: {0}")]
    InvalidPeriod(String),

    /// The request path, body or query string could not be parsed, e.g. an ID
    /// is not an integer or a date is not formatted as YYYY-MM-DD.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// The ID in the request body did not match the ID in the request path.
    ///
    /// Updates replace a whole record, so the two IDs must agree before the
    /// store is touched.
    #[error("the ID in the request body ({body_id}) does not match the ID in the path ({path_id})")]
    IdMismatch {
        /// The ID taken from the request path.
        path_id: DatabaseId,
        /// The ID taken from the request body.
        body_id: DatabaseId,
    },

    /// The requested resource was not found.
    ///
    /// For HTTP request handlers, the client should check that the parameters
    /// (e.g., ID) are correct and that the resource has been created.
    ///
    /// Internally, this error may occur when a query returns no rows.
    #[error("the requested resource could not be found")]
    NotFound,

    /// Tried to update a time entry that does not exist
    #[error("tried to update a time entry that is not in the database")]
    UpdateMissingEntry,

    /// Tried to delete a time entry that does not exist
    #[error("tried to delete a time entry that is not in the database")]
    DeleteMissingEntry,

    /// Tried to update a category that does not exist
    #[error("tried to update a category that is not in the database")]
    UpdateMissingCategory,

    /// Tried to delete a category that does not exist
    #[error("tried to delete a category that is not in the database")]
    DeleteMissingCategory,

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),

    /// Could not acquire the database lock
    #[error("could not acquire the database lock")]
    DatabaseLockError,
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}

impl From<JsonRejection> for Error {
    fn from(rejection: JsonRejection) -> Self {
        Error::InvalidRequest(rejection.body_text())
    }
}

impl From<PathRejection> for Error {
    fn from(rejection: PathRejection) -> Self {
        Error::InvalidRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for Error {
    fn from(rejection: QueryRejection) -> Self {
        Error::InvalidRequest(rejection.body_text())
    }
}

impl Error {
    /// The HTTP status code and machine readable error code for this error.
    pub fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            Error::InvalidHours(_)
            | Error::EmptyDescription
            | Error::DescriptionTooLong(_)
            | Error::EmptyCategoryName
            | Error::CategoryNameTooLong(_)
            | Error::InvalidColor(_)
            | Error::InvalidCategory(_)
            | Error::InvalidPeriod(_)
            | Error::InvalidRequest(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            Error::IdMismatch { .. } => (StatusCode::BAD_REQUEST, "ID_MISMATCH"),
            Error::NotFound
            | Error::UpdateMissingEntry
            | Error::DeleteMissingEntry
            | Error::UpdateMissingCategory
            | Error::DeleteMissingCategory => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            Error::SqlError(_) | Error::DatabaseLockError => {
                (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR")
            }
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status_code, code) = self.status_and_code();

        let message = if status_code == StatusCode::INTERNAL_SERVER_ERROR {
            // Internal errors are not intended to be shown to the client.
            tracing::error!("An unexpected error occurred: {}", self);
            "An unexpected error occurred, check the server logs for more details.".to_owned()
        } else {
            self.to_string()
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status_code, Json(body)).into_response()
    }
}
