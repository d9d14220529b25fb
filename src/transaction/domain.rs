//! Core transaction domain types.

use rusqlite::{
    Row, ToSql,
    types::{FromSql, FromSqlError, FromSqlResult, ToSqlOutput, ValueRef},
};
use serde::Serialize;
use serde_json::Value;
use time::{Date, OffsetDateTime};

use crate::{
    Error, UserID,
    database_id::{CategoryID, TransactionID},
    owned::OwnedRecord,
    transaction::Amount,
};

pub(crate) mod date_format {
    //! Calendar dates as "YYYY-MM-DD" strings.
    use serde::Serializer;
    use time::{
        Date, OffsetDateTime, format_description::BorrowedFormatItem,
        format_description::well_known::Rfc3339, macros::format_description,
    };

    const DATE_FORMAT: &[BorrowedFormatItem] = format_description!("[year]-[month]-[day]");

    pub fn serialize<S>(date: &Date, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let formatted = date
            .format(DATE_FORMAT)
            .map_err(serde::ser::Error::custom)?;
        serializer.serialize_str(&formatted)
    }

    /// Parse a "YYYY-MM-DD" date, or the date part of an RFC 3339 date-time
    /// in its own offset.
    pub fn parse(text: &str) -> Option<Date> {
        let text = text.trim();

        Date::parse(text, DATE_FORMAT)
            .ok()
            .or_else(|| OffsetDateTime::parse(text, &Rfc3339).ok().map(|dt| dt.date()))
    }
}

/// Whether money came in or went out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Deposit,
    Withdraw,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Deposit => "deposit",
            TransactionType::Withdraw => "withdraw",
        }
    }

    fn parse(text: &str) -> Option<Self> {
        match text {
            "deposit" => Some(TransactionType::Deposit),
            "withdraw" => Some(TransactionType::Withdraw),
            _ => None,
        }
    }

    /// Read a transaction type from a JSON value. Matching is case-sensitive.
    pub fn from_json(value: &Value) -> Result<Self, Error> {
        value
            .as_str()
            .and_then(Self::parse)
            .ok_or(Error::Validation("Invalid type of transaction"))
    }
}

impl ToSql for TransactionType {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for TransactionType {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        let text = value.as_str()?;

        Self::parse(text).ok_or_else(|| {
            FromSqlError::Other(format!("invalid transaction type {text:?}").into())
        })
    }
}

/// A deposit or withdrawal recorded by a user against one of their categories.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Transaction {
    pub id: TransactionID,
    pub user_id: UserID,
    pub amount: Amount,
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    pub category_id: CategoryID,
    pub description: Option<String>,
    /// When the money moved.
    #[serde(serialize_with = "date_format::serialize")]
    pub date: Date,
    /// When the transaction was recorded.
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl OwnedRecord for Transaction {
    const TABLE: &'static str = "transaction";
    const COLUMNS: &'static str =
        "id, user_id, amount, type, category_id, description, date, created_at";
    const ORDER_BY: &'static str = "date DESC, id DESC";

    fn map_row(row: &Row) -> Result<Self, rusqlite::Error> {
        Ok(Self {
            id: row.get(0)?,
            user_id: UserID::new(row.get(1)?),
            amount: row.get(2)?,
            transaction_type: row.get(3)?,
            category_id: row.get(4)?,
            description: row.get(5)?,
            date: row.get(6)?,
            created_at: row.get(7)?,
        })
    }

    fn not_found() -> Error {
        Error::TransactionNotFound
    }
}
