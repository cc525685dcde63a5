//! Database ID type definitions.

use crate::Error;

/// Alias for the integer type used for mapping to database IDs.
pub type DatabaseId = i64;

/// Database identifier for a time entry.
pub type EntryId = DatabaseId;

/// Database identifier for a category.
pub type CategoryId = DatabaseId;

/// Check that the ID in a request body, if given, agrees with the ID in the path.
///
/// # Errors
/// Returns [Error::IdMismatch] if `body_id` is set and differs from `path_id`.
pub fn check_ids_match(path_id: DatabaseId, body_id: Option<DatabaseId>) -> Result<(), Error> {
    match body_id {
        Some(body_id) if body_id != path_id => Err(Error::IdMismatch { path_id, body_id }),
        _ => Ok(()),
    }
}
