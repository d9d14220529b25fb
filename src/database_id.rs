//! Database ID type definitions and parsing of IDs taken from request paths.

use crate::Error;

/// Alias for the integer type used for mapping to database IDs.
pub type DatabaseID = i64;
pub type CategoryID = DatabaseID;
pub type TransactionID = DatabaseID;

/// Parse the raw path segment `raw_id` as a database ID.
///
/// Returns `error` if `raw_id` is not an integer, so each resource can report
/// its own message.
pub fn parse_id(raw_id: &str, error: Error) -> Result<DatabaseID, Error> {
    raw_id.trim().parse().map_err(|_| error)
}
