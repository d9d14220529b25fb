//! Queries for rows that belong to a single user.
//!
//! Every query here filters on the row ID and the owner's ID together, so a row
//! owned by someone else is indistinguishable from a row that does not exist.

use rusqlite::{Connection, Row};

use crate::{Error, UserID, database_id::DatabaseID};

/// A table whose rows are owned by a user through a `user_id` column.
pub trait OwnedRecord: Sized {
    /// The table name.
    const TABLE: &'static str;
    /// The columns selected for [OwnedRecord::map_row], in order.
    const COLUMNS: &'static str;
    /// The `ORDER BY` clause used when listing a user's rows.
    const ORDER_BY: &'static str;

    /// Build a record from a row selected with [OwnedRecord::COLUMNS].
    fn map_row(row: &Row) -> Result<Self, rusqlite::Error>;

    /// The error reported when the row is missing or owned by another user.
    fn not_found() -> Error;
}

/// Get the row `id` if it is owned by `owner`.
///
/// # Errors
///
/// Returns [OwnedRecord::not_found] if there is no such row for `owner`.
pub fn select_owned<T: OwnedRecord>(
    id: DatabaseID,
    owner: UserID,
    connection: &Connection,
) -> Result<T, Error> {
    let query = format!(
        "SELECT {} FROM \"{}\" WHERE id = ?1 AND user_id = ?2",
        T::COLUMNS,
        T::TABLE
    );

    connection
        .prepare(&query)?
        .query_row((id, owner.as_i64()), T::map_row)
        .map_err(|error| match error {
            rusqlite::Error::QueryReturnedNoRows => T::not_found(),
            error => error.into(),
        })
}

/// Get all of the rows owned by `owner`.
pub fn select_all_owned<T: OwnedRecord>(
    owner: UserID,
    connection: &Connection,
) -> Result<Vec<T>, Error> {
    let query = format!(
        "SELECT {} FROM \"{}\" WHERE user_id = ?1 ORDER BY {}",
        T::COLUMNS,
        T::TABLE,
        T::ORDER_BY
    );

    connection
        .prepare(&query)?
        .query_map((owner.as_i64(),), T::map_row)?
        .map(|maybe_record| maybe_record.map_err(Error::from))
        .collect()
}

/// Delete the row `id` if it is owned by `owner` and return it as it was
/// before deletion.
///
/// # Errors
///
/// Returns [OwnedRecord::not_found] if there is no such row for `owner`.
pub fn delete_owned<T: OwnedRecord>(
    id: DatabaseID,
    owner: UserID,
    connection: &Connection,
) -> Result<T, Error> {
    let query = format!(
        "DELETE FROM \"{}\" WHERE id = ?1 AND user_id = ?2 RETURNING {}",
        T::TABLE,
        T::COLUMNS
    );

    connection
        .prepare(&query)?
        .query_row((id, owner.as_i64()), T::map_row)
        .map_err(|error| match error {
            rusqlite::Error::QueryReturnedNoRows => T::not_found(),
            error => error.into(),
        })
}
