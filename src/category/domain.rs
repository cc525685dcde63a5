//! Core category domain types.

use std::fmt::Display;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use unicode_segmentation::UnicodeSegmentation;

use crate::{Error, database_id::CategoryId};

/// The max number of characters in a category name.
pub const MAX_CATEGORY_NAME_LENGTH: usize = 100;

/// A validated, non-empty category name of at most [MAX_CATEGORY_NAME_LENGTH] characters.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Hash)]
pub struct CategoryName(String);

impl CategoryName {
    /// Create a category name.
    ///
    /// Leading and trailing whitespace is removed before validation.
    ///
    /// # Errors
    ///
    /// This function will return:
    /// - [Error::EmptyCategoryName] if `name` is empty or only whitespace,
    /// - or [Error::CategoryNameTooLong] if `name` has more than [MAX_CATEGORY_NAME_LENGTH] characters.
    pub fn new(name: &str) -> Result<Self, Error> {
        let name = name.trim();

        if name.is_empty() {
            Err(Error::EmptyCategoryName)
        } else if name.graphemes(true).count() > MAX_CATEGORY_NAME_LENGTH {
            Err(Error::CategoryNameTooLong(MAX_CATEGORY_NAME_LENGTH))
        } else {
            Ok(Self(name.to_string()))
        }
    }

    /// Create a category name without validation.
    ///
    /// The caller should ensure that the string is not empty and not too long.
    pub fn new_unchecked(name: &str) -> Self {
        Self(name.to_string())
    }
}

impl AsRef<str> for CategoryName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Display for CategoryName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A hex colour code such as "#3B82F6".
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Hash)]
pub struct Color(String);

impl Color {
    /// Create a colour from a string of the form `#RRGGBB`.
    ///
    /// # Errors
    ///
    /// This function will return an [Error::InvalidColor] if `color` is not a
    /// '#' followed by exactly six hexadecimal digits.
    pub fn new(color: &str) -> Result<Self, Error> {
        let color = color.trim();

        let is_valid = color.len() == 7
            && color.starts_with('#')
            && color[1..].chars().all(|c| c.is_ascii_hexdigit());

        if is_valid {
            Ok(Self(color.to_string()))
        } else {
            Err(Error::InvalidColor(color.to_owned()))
        }
    }

    /// Create a colour without validation.
    pub fn new_unchecked(color: &str) -> Self {
        Self(color.to_string())
    }
}

impl AsRef<str> for Color {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A category for grouping time entries (e.g., 'Development', 'Meetings').
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Hash)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: CategoryId,
    pub name: CategoryName,
    pub color: Color,
    /// Archived categories are hidden from pickers but kept for reporting.
    pub is_archived: bool,
    /// When the category was created, set by the server.
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

/// Request body for creating and replacing a category.
///
/// `createdAt` is ignored if sent by a client. `isArchived` is ignored on
/// create and defaults to `false` on replace.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryData {
    #[serde(default)]
    pub id: Option<CategoryId>,
    pub name: String,
    pub color: String,
    #[serde(default)]
    pub is_archived: bool,
}

/// A validated [CategoryData].
#[derive(Debug, Clone, PartialEq)]
pub struct NewCategory {
    pub name: CategoryName,
    pub color: Color,
    pub is_archived: bool,
}

impl TryFrom<CategoryData> for NewCategory {
    type Error = Error;

    fn try_from(data: CategoryData) -> Result<Self, Self::Error> {
        Ok(Self {
            name: CategoryName::new(&data.name)?,
            color: Color::new(&data.color)?,
            is_archived: data.is_archived,
        })
    }
}

#[cfg(test)]
mod category_name_tests {
    use crate::{Error, category::CategoryName};

    use super::MAX_CATEGORY_NAME_LENGTH;

    #[test]
    fn new_fails_on_empty_string() {
        let name = CategoryName::new("");

        assert_eq!(name, Err(Error::EmptyCategoryName));
    }

    #[test]
    fn new_fails_on_just_whitespace() {
        let name = CategoryName::new("\n\t \r");

        assert_eq!(name, Err(Error::EmptyCategoryName));
    }

    #[test]
    fn new_trims_whitespace() {
        let name = CategoryName::new("  Development ").unwrap();

        assert_eq!(name.as_ref(), "Development");
    }

    #[test]
    fn new_accepts_max_length() {
        let name = "a".repeat(MAX_CATEGORY_NAME_LENGTH);

        assert!(CategoryName::new(&name).is_ok());
    }

    #[test]
    fn new_fails_when_too_long() {
        let name = "a".repeat(MAX_CATEGORY_NAME_LENGTH + 1);

        assert_eq!(
            CategoryName::new(&name),
            Err(Error::CategoryNameTooLong(MAX_CATEGORY_NAME_LENGTH))
        );
    }

    #[test]
    fn length_counts_graphemes_not_bytes() {
        let name = "🔥".repeat(MAX_CATEGORY_NAME_LENGTH);

        assert!(CategoryName::new(&name).is_ok());
    }
}
