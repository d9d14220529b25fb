//! Database operations for categories.

use rusqlite::Connection;

use crate::{Error, UserID, category::Category};

/// Create a category owned by `owner` and return it with its generated ID.
///
/// # Errors
///
/// Returns [Error::DuplicateCategory] if `owner` already has a category with
/// the same name, ignoring case.
pub fn create_category(
    owner: UserID,
    name: &str,
    color: &str,
    connection: &Connection,
) -> Result<Category, Error> {
    connection.execute(
        "INSERT INTO category (user_id, name, color) VALUES (?1, ?2, ?3)",
        (owner.as_i64(), name, color),
    )?;

    let id = connection.last_insert_rowid();

    Ok(Category {
        id,
        user_id: owner,
        name: name.to_owned(),
        color: color.to_owned(),
    })
}

/// Check whether `owner` has a category called `name`, ignoring case.
pub fn category_name_exists(
    owner: UserID,
    name: &str,
    connection: &Connection,
) -> Result<bool, Error> {
    connection
        .query_row(
            "SELECT EXISTS(SELECT 1 FROM category WHERE user_id = ?1 AND name = ?2 COLLATE NOCASE)",
            (owner.as_i64(), name),
            |row| row.get(0),
        )
        .map_err(|error| error.into())
}

/// Initialize the category table and indexes.
///
/// Deleting a user deletes their categories.
pub fn create_category_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute_batch(
        "CREATE TABLE IF NOT EXISTS category (
            id INTEGER PRIMARY KEY,
            user_id INTEGER NOT NULL,
            name TEXT NOT NULL CHECK (name <> ''),
            color TEXT NOT NULL CHECK (color <> ''),
            UNIQUE(user_id, name COLLATE NOCASE),
            FOREIGN KEY(user_id) REFERENCES user(id) ON UPDATE CASCADE ON DELETE CASCADE
        );

        CREATE INDEX IF NOT EXISTS idx_category_user_id ON category(user_id);",
    )?;

    Ok(())
}
