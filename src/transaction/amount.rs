//! Money amounts with two decimal places.

use std::{fmt::Display, str::FromStr};

use rusqlite::{
    ToSql,
    types::{FromSql, FromSqlError, FromSqlResult, ToSqlOutput, ValueRef},
};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Serialize, Serializer};
use serde_json::{Number, Value};

use crate::Error;

const NON_ZERO_AMOUNT_MSG: &str = "Amount must be a non-zero number";

/// A non-zero amount of money, rounded to cents.
///
/// Amounts are stored as text and serialized as strings, e.g. "50.00", so no
/// precision is lost on the way in or out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Amount(Decimal);

impl Amount {
    /// Round `value` half away from zero to two decimal places.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the rounded amount is zero.
    pub fn new(value: Decimal) -> Result<Self, Error> {
        let mut rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);

        if rounded.is_zero() {
            return Err(Error::Validation(NON_ZERO_AMOUNT_MSG));
        }

        rounded.rescale(2);

        Ok(Self(rounded))
    }

    /// Read an amount from a JSON value, which must be a number.
    ///
    /// # Errors
    ///
    /// Returns a validation error for non-numbers and amounts that are zero.
    pub fn from_json(value: &Value) -> Result<Self, Error> {
        match value {
            Value::Number(number) => Self::new(
                number_to_decimal(number).ok_or(Error::Validation(NON_ZERO_AMOUNT_MSG))?,
            ),
            _ => Err(Error::Validation(NON_ZERO_AMOUNT_MSG)),
        }
    }
}

fn number_to_decimal(number: &Number) -> Option<Decimal> {
    let text = number.to_string();

    Decimal::from_str(&text)
        .or_else(|_| Decimal::from_scientific(&text))
        .ok()
}

impl Display for Amount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl Serialize for Amount {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(&self.0)
    }
}

impl ToSql for Amount {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.0.to_string()))
    }
}

impl FromSql for Amount {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        value
            .as_str()?
            .parse::<Decimal>()
            .map(Self)
            .map_err(|error| FromSqlError::Other(Box::new(error)))
    }
}
