//! Core category domain types.

use rusqlite::Row;
use serde::Serialize;

use crate::{Error, UserID, database_id::CategoryID, owned::OwnedRecord};

/// A named, coloured group for a user's transactions (e.g., 'Groceries', 'Salary').
///
/// Names are unique per user, ignoring case.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Category {
    pub id: CategoryID,
    pub user_id: UserID,
    pub name: String,
    /// A freeform colour string chosen by the client, e.g. "#ff0000".
    pub color: String,
}

impl OwnedRecord for Category {
    const TABLE: &'static str = "category";
    const COLUMNS: &'static str = "id, user_id, name, color";
    const ORDER_BY: &'static str = "name COLLATE NOCASE ASC, id ASC";

    fn map_row(row: &Row) -> Result<Self, rusqlite::Error> {
        Ok(Self {
            id: row.get(0)?,
            user_id: UserID::new(row.get(1)?),
            name: row.get(2)?,
            color: row.get(3)?,
        })
    }

    fn not_found() -> Error {
        Error::CategoryNotFound
    }
}
