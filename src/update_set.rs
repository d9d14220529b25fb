//! Partial updates of owned rows.

use rusqlite::{Connection, ToSql};

use crate::{Error, UserID, database_id::DatabaseID, owned::OwnedRecord};

/// The validated columns to change in an owned row.
///
/// Columns are only ever added by validators with a fixed column name, so the
/// set doubles as the whitelist of updatable fields.
#[derive(Default)]
pub struct UpdateSet {
    columns: Vec<(&'static str, Box<dyn ToSql>)>,
}

impl UpdateSet {
    /// Create an empty update.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `column` to `value`, replacing any earlier value for the same column.
    pub fn set<V: ToSql + 'static>(&mut self, column: &'static str, value: V) {
        self.columns.retain(|(name, _)| *name != column);
        self.columns.push((column, Box::new(value)));
    }

    /// Whether the update would change anything.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// The columns that will be changed, in the order they were set.
    #[cfg(test)]
    pub fn column_names(&self) -> Vec<&'static str> {
        self.columns.iter().map(|(name, _)| *name).collect()
    }

    /// Write the update to row `id` of `T`'s table, but only if `owner` owns
    /// it, and return the updated row.
    ///
    /// The owner check and the write happen in one statement.
    ///
    /// # Errors
    ///
    /// Returns [Error::NoFieldsToUpdate] if the set is empty, or
    /// [OwnedRecord::not_found] if the row is gone or owned by another user.
    pub fn apply<T: OwnedRecord>(
        self,
        id: DatabaseID,
        owner: UserID,
        connection: &Connection,
    ) -> Result<T, Error> {
        if self.is_empty() {
            return Err(Error::NoFieldsToUpdate);
        }

        let assignments = self
            .columns
            .iter()
            .enumerate()
            .map(|(index, (name, _))| format!("{name} = ?{}", index + 1))
            .collect::<Vec<_>>()
            .join(", ");
        let id_index = self.columns.len() + 1;
        let query = format!(
            "UPDATE \"{}\" SET {assignments} WHERE id = ?{id_index} AND user_id = ?{} RETURNING {}",
            T::TABLE,
            id_index + 1,
            T::COLUMNS,
        );

        let owner_id = owner.as_i64();
        let mut params: Vec<&dyn ToSql> = self
            .columns
            .iter()
            .map(|(_, value)| value.as_ref() as &dyn ToSql)
            .collect();
        params.push(&id);
        params.push(&owner_id);

        connection
            .prepare(&query)?
            .query_row(params.as_slice(), T::map_row)
            .map_err(|error| match error {
                rusqlite::Error::QueryReturnedNoRows => T::not_found(),
                error => error.into(),
            })
    }
}
