//! Core time entry domain types.

use serde::{Deserialize, Serialize};
use time::Date;
use unicode_segmentation::UnicodeSegmentation;

use crate::{
    Error,
    category::Category,
    database_id::{CategoryId, EntryId},
};

/// The max number of hours that can be logged in a single entry.
pub const MAX_HOURS: f64 = 24.0;

/// The max number of characters in an entry description.
pub const MAX_DESCRIPTION_LENGTH: usize = 500;

/// A number of hours in the range (0, [MAX_HOURS]].
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Hours(f64);

impl Hours {
    /// Create a validated number of hours.
    ///
    /// # Errors
    ///
    /// This function will return an [Error::InvalidHours] if `hours` is not a
    /// finite number greater than zero and at most [MAX_HOURS].
    pub fn new(hours: f64) -> Result<Self, Error> {
        if hours.is_finite() && hours > 0.0 && hours <= MAX_HOURS {
            Ok(Self(hours))
        } else {
            Err(Error::InvalidHours(hours))
        }
    }

    /// The number of hours as a float.
    pub fn as_f64(&self) -> f64 {
        self.0
    }
}

/// A validated, non-empty description of the work done for a time entry.
///
/// The text may contain markup for rendering by clients, it is stored as-is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Description(String);

impl Description {
    /// Create a description.
    ///
    /// # Errors
    ///
    /// This function will return:
    /// - [Error::EmptyDescription] if `description` is empty or only whitespace,
    /// - or [Error::DescriptionTooLong] if `description` has more than [MAX_DESCRIPTION_LENGTH] characters.
    pub fn new(description: &str) -> Result<Self, Error> {
        if description.trim().is_empty() {
            Err(Error::EmptyDescription)
        } else if description.graphemes(true).count() > MAX_DESCRIPTION_LENGTH {
            Err(Error::DescriptionTooLong(MAX_DESCRIPTION_LENGTH))
        } else {
            Ok(Self(description.to_string()))
        }
    }
}

impl AsRef<str> for Description {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A record of the hours worked on a given day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeEntry {
    /// The ID of the entry.
    pub id: EntryId,
    /// The day the work was done.
    pub date: Date,
    /// How long the work took.
    pub hours: f64,
    /// What the work was.
    pub description: String,
    /// The ID of the category the entry belongs to, if any.
    pub category_id: Option<CategoryId>,
    /// The category the entry belongs to, resolved from `category_id`.
    pub category: Option<Category>,
}

/// Request body for creating and replacing a time entry.
///
/// On replace, a missing `categoryId` clears the entry's category.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryData {
    #[serde(default)]
    pub id: Option<EntryId>,
    pub date: Date,
    pub hours: f64,
    pub description: String,
    #[serde(default)]
    pub category_id: Option<CategoryId>,
}

/// A validated time entry that has not been written to the database.
#[derive(Debug, Clone, PartialEq)]
pub struct NewEntry {
    pub date: Date,
    pub hours: Hours,
    pub description: Description,
    pub category_id: Option<CategoryId>,
}

impl NewEntry {
    /// Validate the fields for a time entry.
    ///
    /// # Errors
    ///
    /// Returns an error if `hours` or `description` are invalid, see
    /// [Hours::new] and [Description::new].
    pub fn new(
        date: Date,
        hours: f64,
        description: &str,
        category_id: Option<CategoryId>,
    ) -> Result<Self, Error> {
        Ok(Self {
            date,
            hours: Hours::new(hours)?,
            description: Description::new(description)?,
            category_id,
        })
    }
}

impl TryFrom<EntryData> for NewEntry {
    type Error = Error;

    fn try_from(data: EntryData) -> Result<Self, Self::Error> {
        NewEntry::new(data.date, data.hours, &data.description, data.category_id)
    }
}
