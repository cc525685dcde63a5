//! Populates a fresh database with default categories and sample entries.

use rusqlite::Connection;
use time::macros::date;

use crate::{
    Error,
    category::{CategoryName, Color, NewCategory, count_categories, create_category},
    entry::{NewEntry, count_entries, create_entry},
};

const DEFAULT_CATEGORIES: [(&str, &str); 5] = [
    ("Development", "#3B82F6"),
    ("Meetings", "#10B981"),
    ("Research", "#F59E0B"),
    ("Admin", "#A855F7"),
    ("Learning", "#EC4899"),
];

/// Insert the default categories and a week of sample entries, but only if
/// the database has no categories and no entries.
///
/// Returns `true` if the database was seeded. Calling this again on a seeded
/// database does nothing and returns `false`.
///
/// # Errors
/// Returns an error if any of the inserts fail, in which case nothing is written.
pub fn seed_if_empty(connection: &Connection) -> Result<bool, Error> {
    if count_categories(connection)? > 0 || count_entries(connection)? > 0 {
        tracing::debug!("Database already has data, skipping seed");
        return Ok(false);
    }

    let transaction = connection.unchecked_transaction()?;

    let mut category_ids = Vec::with_capacity(DEFAULT_CATEGORIES.len());
    for (name, color) in DEFAULT_CATEGORIES {
        let category = create_category(
            NewCategory {
                name: CategoryName::new(name)?,
                color: Color::new(color)?,
                is_archived: false,
            },
            &transaction,
        )?;
        category_ids.push(category.id);
    }

    let (development, meetings, admin) = (category_ids[0], category_ids[1], category_ids[3]);

    let sample_entries = [
        (
            date!(2024 - 03 - 01),
            8.0,
            "Completed initial design mockups for project Alpha. Researched competitor UIs and \
            created wireframes for user flows.",
            development,
        ),
        (
            date!(2024 - 03 - 02),
            7.5,
            "Developed frontend components for user authentication. Implemented login and \
            registration forms.",
            development,
        ),
        (
            date!(2024 - 03 - 03),
            6.0,
            "Attended team stand-up and planning meeting. Reviewed sprint backlog and assigned \
            new tasks for the upcoming week.",
            meetings,
        ),
        (
            date!(2024 - 03 - 04),
            9.0,
            "Bug fixing and refactoring for the analytics module. Optimized database queries and \
            wrote unit tests for new features.",
            development,
        ),
        (
            date!(2024 - 03 - 05),
            7.0,
            "Prepared presentation for client demo. Gathered performance metrics and rehearsed \
            key talking points with the team.",
            admin,
        ),
        (
            date!(2024 - 03 - 06),
            8.0,
            "Integrated new payment gateway. Configured webhooks and tested transaction flows \
            end-to-end.",
            development,
        ),
        (
            date!(2024 - 03 - 07),
            7.0,
            "Conducted user acceptance testing for the latest release and reported the bugs \
            found to the development team.",
            admin,
        ),
    ];

    for (date, hours, description, category_id) in sample_entries {
        create_entry(
            NewEntry::new(date, hours, description, Some(category_id))?,
            &transaction,
        )?;
    }

    transaction.commit()?;

    tracing::info!(
        "Seeded database with {} categories and {} entries",
        DEFAULT_CATEGORIES.len(),
        sample_entries.len()
    );

    Ok(true)
}
