//! Validation of transaction request bodies.
//!
//! Bodies are read as raw JSON objects so that a field that is absent can be
//! told apart from one that is null or has the wrong type.

use serde_json::{Map, Value};
use time::Date;

use crate::{
    Error,
    database_id::CategoryID,
    transaction::{Amount, TransactionType, domain::date_format},
    update_set::UpdateSet,
};

/// Keys that can never be changed by a client, dropped before an update is read.
const PROTECTED_FIELDS: [&str; 5] = ["id", "user_id", "userId", "created_at", "createdAt"];

/// A validated transaction ready to be inserted.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTransaction {
    pub amount: Amount,
    pub date: Date,
    pub transaction_type: TransactionType,
    pub category_id: CategoryID,
    pub description: Option<String>,
}

/// The value if it counts as given, i.e. it is not absent, null, false, zero or "".
fn given(value: Option<&Value>) -> Option<&Value> {
    value.filter(|value| match value {
        Value::Null | Value::Bool(false) => false,
        Value::String(text) => !text.is_empty(),
        Value::Number(number) => number.as_f64() != Some(0.0),
        _ => true,
    })
}

fn parse_date(value: &Value) -> Result<Date, Error> {
    value
        .as_str()
        .and_then(date_format::parse)
        .ok_or(Error::Validation("Invalid date format"))
}

fn parse_category_id(value: &Value) -> Result<CategoryID, Error> {
    value
        .as_i64()
        .ok_or(Error::Validation("Category ID must be a number"))
}

/// Read an optional description, where null and "" both mean no description.
fn parse_description(value: Option<&Value>) -> Result<Option<String>, Error> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(text)) if text.is_empty() => Ok(None),
        Some(Value::String(text)) => Ok(Some(text.to_owned())),
        Some(_) => Err(Error::Validation("Description must be a string")),
    }
}

/// Validate the body of a create request. The first failing rule is reported.
///
/// # Errors
///
/// Returns a validation error for the first of `amount`, `date`, `type` and
/// `categoryId` that is missing or invalid.
pub fn validate_new_transaction(body: &Map<String, Value>) -> Result<NewTransaction, Error> {
    let amount = match body.get("amount") {
        None | Some(Value::Null) => {
            return Err(Error::Validation("Amount for transaction is required"));
        }
        Some(value) => Amount::from_json(value)?,
    };

    let date = match given(body.get("date")) {
        Some(value) => parse_date(value)?,
        None => return Err(Error::Validation("Date is required for transaction")),
    };

    let transaction_type = match given(body.get("type")) {
        Some(value) => TransactionType::from_json(value)?,
        None => return Err(Error::Validation("Transaction type is required")),
    };

    let category_id = match given(body.get("categoryId")) {
        Some(value) => parse_category_id(value)?,
        None => return Err(Error::Validation("Category ID is required")),
    };

    let description = parse_description(body.get("description"))?;

    Ok(NewTransaction {
        amount,
        date,
        transaction_type,
        category_id,
        description,
    })
}

/// A validated partial update of a transaction.
pub struct TransactionUpdate {
    pub columns: UpdateSet,
    /// The new category, which the caller must check belongs to the user.
    pub category_id: Option<CategoryID>,
}

/// Validate the fields present in the body of an update request.
///
/// Protected keys are stripped and unknown keys ignored. Fields are checked in
/// the same order as on creation.
pub fn validate_transaction_update(body: &Map<String, Value>) -> Result<TransactionUpdate, Error> {
    let body: Map<String, Value> = body
        .iter()
        .filter(|(key, _)| !PROTECTED_FIELDS.contains(&key.as_str()))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect();

    let mut columns = UpdateSet::new();

    if let Some(value) = body.get("amount") {
        columns.set("amount", Amount::from_json(value)?);
    }

    if let Some(value) = body.get("date") {
        columns.set("date", parse_date(value)?);
    }

    if let Some(value) = body.get("type") {
        columns.set("type", TransactionType::from_json(value)?);
    }

    let category_id = match body.get("categoryId").or_else(|| body.get("category_id")) {
        Some(value) => {
            let category_id = parse_category_id(value)?;
            columns.set("category_id", category_id);
            Some(category_id)
        }
        None => None,
    };

    if body.contains_key("description") {
        columns.set("description", parse_description(body.get("description"))?);
    }

    Ok(TransactionUpdate {
        columns,
        category_id,
    })
}


#[cfg(test)]
mod validate_transaction_update_tests {
    use serde_json::{Map, Value, json};

    use crate::Error;

    use super::validate_transaction_update;

    fn object(value: Value) -> Map<String, Value> {
        value.as_object().unwrap().clone()
    }

    #[test]
    fn protected_fields_are_stripped() {
        let update = validate_transaction_update(&object(json!({
            "id": 7,
            "user_id": 2,
            "userId": 2,
            "created_at": "2020-01-01T00:00:00Z",
            "createdAt": "2020-01-01T00:00:00Z",
        })))
        .unwrap();

        assert!(update.columns.is_empty());
        assert_eq!(update.category_id, None);
    }

    #[test]
    fn only_given_fields_are_set() {
        let update = validate_transaction_update(&object(json!({
            "description": "Lunch",
            "amount": -12.5,
            "colour": "red",
        })))
        .unwrap();

        assert_eq!(update.columns.column_names(), vec!["amount", "description"]);
    }

    #[test]
    fn either_category_key_is_accepted() {
        let camel = validate_transaction_update(&object(json!({ "categoryId": 3 }))).unwrap();
        let snake = validate_transaction_update(&object(json!({ "category_id": 3 }))).unwrap();

        assert_eq!(camel.category_id, Some(3));
        assert_eq!(snake.category_id, Some(3));
        assert_eq!(snake.columns.column_names(), vec!["category_id"]);
    }

    #[test]
    fn present_fields_are_validated() {
        let cases = [
            (json!({ "amount": 0 }), "Amount must be a non-zero number"),
            (json!({ "amount": null }), "Amount must be a non-zero number"),
            (json!({ "date": "2024-13-01" }), "Invalid date format"),
            (json!({ "date": null }), "Invalid date format"),
            (json!({ "type": "Deposit" }), "Invalid type of transaction"),
            (json!({ "categoryId": "abc" }), "Category ID must be a number"),
            (json!({ "description": [] }), "Description must be a string"),
        ];

        for (body, message) in cases {
            assert_eq!(
                validate_transaction_update(&object(body.clone())).err(),
                Some(Error::Validation(message)),
                "body {body}"
            );
        }
    }

    #[test]
    fn null_description_clears_it() {
        let update = validate_transaction_update(&object(json!({ "description": null }))).unwrap();

        assert_eq!(update.columns.column_names(), vec!["description"]);
    }
}
