//! Database operations for categories.

use rusqlite::{Connection, Row};
use time::OffsetDateTime;

use crate::{
    Error,
    category::{Category, CategoryName, Color, NewCategory},
    database_id::CategoryId,
};

const SELECT_CATEGORY: &str = "SELECT id, name, color, is_archived, created_at FROM category";

/// Every listing uses this ordering so that endpoints never disagree.
const CATEGORY_ORDER: &str = "ORDER BY name COLLATE NOCASE ASC, id ASC";

/// Create a category and return it with its generated ID.
///
/// The creation time is set to the current UTC time and new categories are
/// never archived, whatever `new_category.is_archived` says.
pub fn create_category(
    new_category: NewCategory,
    connection: &Connection,
) -> Result<Category, Error> {
    let created_at = OffsetDateTime::now_utc();

    connection
        .prepare(
            "INSERT INTO category (name, color, is_archived, created_at)
             VALUES (?1, ?2, 0, ?3)
             RETURNING id, name, color, is_archived, created_at",
        )?
        .query_row(
            (
                new_category.name.as_ref(),
                new_category.color.as_ref(),
                created_at,
            ),
            map_category_row,
        )
        .map_err(|error| error.into())
}

/// Retrieve a single category by ID.
///
/// # Errors
/// Returns [Error::NotFound] if `category_id` does not refer to a category.
pub fn get_category(category_id: CategoryId, connection: &Connection) -> Result<Category, Error> {
    connection
        .prepare(&format!("{SELECT_CATEGORY} WHERE id = :id;"))?
        .query_row(&[(":id", &category_id)], map_category_row)
        .map_err(|error| error.into())
}

/// Retrieve all categories, archived or not, ordered by name.
pub fn get_all_categories(connection: &Connection) -> Result<Vec<Category>, Error> {
    connection
        .prepare(&format!("{SELECT_CATEGORY} {CATEGORY_ORDER};"))?
        .query_map([], map_category_row)?
        .map(|maybe_category| maybe_category.map_err(|error| error.into()))
        .collect()
}

/// Retrieve the categories that are not archived, ordered by name.
pub fn get_active_categories(connection: &Connection) -> Result<Vec<Category>, Error> {
    connection
        .prepare(&format!(
            "{SELECT_CATEGORY} WHERE is_archived = 0 {CATEGORY_ORDER};"
        ))?
        .query_map([], map_category_row)?
        .map(|maybe_category| maybe_category.map_err(|error| error.into()))
        .collect()
}

/// Replace a category's name, colour and archived flag.
///
/// The creation time is never changed.
///
/// # Errors
/// Returns [Error::UpdateMissingCategory] if the category doesn't exist.
pub fn update_category(
    category_id: CategoryId,
    category: NewCategory,
    connection: &Connection,
) -> Result<(), Error> {
    let rows_affected = connection.execute(
        "UPDATE category SET name = ?1, color = ?2, is_archived = ?3 WHERE id = ?4",
        (
            category.name.as_ref(),
            category.color.as_ref(),
            category.is_archived,
            category_id,
        ),
    )?;

    if rows_affected == 0 {
        return Err(Error::UpdateMissingCategory);
    }

    Ok(())
}

/// Archive or unarchive a category.
///
/// Setting the flag to the value it already has succeeds.
///
/// # Errors
/// Returns [Error::NotFound] if the category doesn't exist.
pub fn set_category_archived(
    category_id: CategoryId,
    is_archived: bool,
    connection: &Connection,
) -> Result<(), Error> {
    // SQLite counts rows matched by the WHERE clause, so an unchanged flag still affects one row.
    let rows_affected = connection.execute(
        "UPDATE category SET is_archived = ?1 WHERE id = ?2",
        (is_archived, category_id),
    )?;

    if rows_affected == 0 {
        return Err(Error::NotFound);
    }

    Ok(())
}

/// Delete a category by ID.
///
/// Time entries that reference the category are kept and have their category
/// cleared in the same transaction.
///
/// # Errors
/// Returns [Error::DeleteMissingCategory] if the category doesn't exist.
pub fn delete_category(category_id: CategoryId, connection: &Connection) -> Result<(), Error> {
    let transaction = connection.unchecked_transaction()?;

    let detached_entries = transaction.execute(
        "UPDATE time_entry SET category_id = NULL WHERE category_id = ?1",
        [category_id],
    )?;

    let rows_affected = transaction.execute("DELETE FROM category WHERE id = ?1", [category_id])?;

    if rows_affected == 0 {
        // Dropping the transaction rolls it back.
        return Err(Error::DeleteMissingCategory);
    }

    transaction.commit()?;

    tracing::debug!(
        "Deleted category {category_id} and cleared it from {detached_entries} time entries"
    );

    Ok(())
}

/// Count the categories in the database.
pub fn count_categories(connection: &Connection) -> Result<u32, Error> {
    connection
        .query_row("SELECT COUNT(id) FROM category;", [], |row| row.get(0))
        .map_err(|error| error.into())
}

/// Initialize the category table and indexes.
pub fn create_category_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute_batch(
        "CREATE TABLE IF NOT EXISTS category (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            color TEXT NOT NULL,
            is_archived INTEGER NOT NULL DEFAULT 0,
            created_at TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_category_name ON category(name);",
    )?;

    Ok(())
}

/// Map a database row to a [Category].
///
/// The row must contain the columns id, name, color, is_archived and
/// created_at, starting at `offset`.
pub(crate) fn map_category_row_with_offset(
    row: &Row,
    offset: usize,
) -> Result<Category, rusqlite::Error> {
    let id = row.get(offset)?;
    let raw_name: String = row.get(offset + 1)?;
    let raw_color: String = row.get(offset + 2)?;
    let is_archived = row.get(offset + 3)?;
    let created_at = row.get(offset + 4)?;

    Ok(Category {
        id,
        name: CategoryName::new_unchecked(&raw_name),
        color: Color::new_unchecked(&raw_color),
        is_archived,
        created_at,
    })
}

fn map_category_row(row: &Row) -> Result<Category, rusqlite::Error> {
    map_category_row_with_offset(row, 0)
}

#[cfg(test)]
mod category_query_tests {
    use rusqlite::Connection;
    use time::{OffsetDateTime, macros::date};

    use crate::{
        Error,
        category::{
            CategoryName, Color, NewCategory, create_category, delete_category,
            get_active_categories, get_all_categories, get_category, set_category_archived,
            update_category,
        },
        entry::{NewEntry, create_entry, get_entry},
        test_utils::get_test_connection,
    };

    use super::count_categories;

    fn new_category(name: &str) -> NewCategory {
        NewCategory {
            name: CategoryName::new_unchecked(name),
            color: Color::new_unchecked("#3B82F6"),
            is_archived: false,
        }
    }

    fn insert_category(name: &str, connection: &Connection) -> crate::category::Category {
        create_category(new_category(name), connection).expect("Could not create test category")
    }

    #[test]
    fn create_category_succeeds() {
        let connection = get_test_connection();
        let before = OffsetDateTime::now_utc();

        let category = create_category(new_category("Development"), &connection)
            .expect("Could not create category");

        assert!(category.id > 0);
        assert_eq!(category.name.as_ref(), "Development");
        assert_eq!(category.color.as_ref(), "#3B82F6");
        assert!(!category.is_archived);
        assert!(category.created_at >= before - time::Duration::seconds(1));
    }

    #[test]
    fn create_category_ignores_archived_flag() {
        let connection = get_test_connection();
        let mut archived = new_category("Development");
        archived.is_archived = true;

        let category = create_category(archived, &connection).expect("Could not create category");

        assert!(!category.is_archived);
    }

    #[test]
    fn get_category_succeeds() {
        let connection = get_test_connection();
        let inserted = insert_category("Meetings", &connection);

        let selected = get_category(inserted.id, &connection);

        assert_eq!(Ok(inserted), selected);
    }

    #[test]
    fn get_category_with_invalid_id_returns_not_found() {
        let connection = get_test_connection();
        let inserted = insert_category("Meetings", &connection);

        let selected = get_category(inserted.id + 123, &connection);

        assert_eq!(selected, Err(Error::NotFound));
    }

    #[test]
    fn get_all_categories_orders_by_name() {
        let connection = get_test_connection();
        let research = insert_category("research", &connection);
        let admin = insert_category("Admin", &connection);
        let meetings = insert_category("Meetings", &connection);
        set_category_archived(admin.id, true, &connection).unwrap();

        let ids: Vec<_> = get_all_categories(&connection)
            .expect("Could not get categories")
            .into_iter()
            .map(|category| category.id)
            .collect();

        assert_eq!(ids, vec![admin.id, meetings.id, research.id]);
    }

    #[test]
    fn get_active_categories_excludes_archived() {
        let connection = get_test_connection();
        let learning = insert_category("Learning", &connection);
        let admin = insert_category("Admin", &connection);
        set_category_archived(admin.id, true, &connection).unwrap();

        let active = get_active_categories(&connection).expect("Could not get categories");
        let all = get_all_categories(&connection).expect("Could not get categories");

        assert_eq!(active.len(), 1);
        assert_eq!(active[0].id, learning.id);
        assert_eq!(all.len(), 2);
        assert!(all.iter().any(|category| category.id == admin.id));
    }

    #[test]
    fn archive_is_idempotent() {
        let connection = get_test_connection();
        let category = insert_category("Admin", &connection);

        set_category_archived(category.id, true, &connection).unwrap();
        let result = set_category_archived(category.id, true, &connection);

        assert_eq!(result, Ok(()));
        assert!(get_category(category.id, &connection).unwrap().is_archived);
    }

    #[test]
    fn unarchive_restores_category() {
        let connection = get_test_connection();
        let category = insert_category("Admin", &connection);
        set_category_archived(category.id, true, &connection).unwrap();

        set_category_archived(category.id, false, &connection).unwrap();

        assert!(!get_category(category.id, &connection).unwrap().is_archived);
        assert_eq!(get_active_categories(&connection).unwrap().len(), 1);
    }

    #[test]
    fn archive_with_invalid_id_returns_not_found() {
        let connection = get_test_connection();

        let result = set_category_archived(999999, true, &connection);

        assert_eq!(result, Err(Error::NotFound));
    }

    #[test]
    fn update_category_replaces_fields_and_keeps_created_at() {
        let connection = get_test_connection();
        let category = insert_category("Original", &connection);

        update_category(
            category.id,
            NewCategory {
                name: CategoryName::new_unchecked("Updated"),
                color: Color::new_unchecked("#EC4899"),
                is_archived: true,
            },
            &connection,
        )
        .expect("Could not update category");

        let updated = get_category(category.id, &connection).unwrap();
        assert_eq!(updated.name.as_ref(), "Updated");
        assert_eq!(updated.color.as_ref(), "#EC4899");
        assert!(updated.is_archived);
        assert_eq!(updated.created_at, category.created_at);
    }

    #[test]
    fn update_category_with_invalid_id_returns_not_found() {
        let connection = get_test_connection();

        let result = update_category(999999, new_category("Updated"), &connection);

        assert_eq!(result, Err(Error::UpdateMissingCategory));
    }

    #[test]
    fn delete_category_succeeds() {
        let connection = get_test_connection();
        let category = insert_category("ToDelete", &connection);

        let result = delete_category(category.id, &connection);

        assert!(result.is_ok());
        assert_eq!(get_category(category.id, &connection), Err(Error::NotFound));
    }

    #[test]
    fn delete_category_with_invalid_id_returns_not_found() {
        let connection = get_test_connection();

        let result = delete_category(999999, &connection);

        assert_eq!(result, Err(Error::DeleteMissingCategory));
    }

    #[test]
    fn delete_category_clears_category_on_entries() {
        let connection = get_test_connection();
        let category = insert_category("Development", &connection);
        let entry = create_entry(
            NewEntry::new(date!(2024 - 03 - 01), 6.0, "Wrote the parser", Some(category.id))
                .unwrap(),
            &connection,
        )
        .expect("Could not create test entry");

        delete_category(category.id, &connection).expect("Could not delete category");

        let entry = get_entry(entry.id, &connection).expect("Entry should not be deleted");
        assert_eq!(entry.category_id, None);
        assert_eq!(entry.category, None);
        assert_eq!(count_categories(&connection), Ok(0));
    }
}
