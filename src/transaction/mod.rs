//! Deposits and withdrawals recorded against a user's categories.

mod amount;
mod create;
mod db;
mod delete;
mod domain;
mod edit;
mod fields;
mod read;

use std::sync::{Arc, Mutex};

use axum::extract::FromRef;
use rusqlite::Connection;

use crate::{
    AppState, Error,
    database_id::{TransactionID, parse_id},
};

pub use amount::Amount;
pub use create::create_transaction_endpoint;
pub use db::{create_transaction, create_transaction_table};
pub use delete::delete_transaction_endpoint;
pub use domain::{Transaction, TransactionType};
pub use edit::update_transaction_endpoint;
pub use fields::{NewTransaction, validate_new_transaction};
pub use read::{get_transaction_endpoint, get_transactions_endpoint};

/// The state needed by the transaction endpoints.
#[derive(Debug, Clone)]
pub struct TransactionState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for TransactionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

fn parse_transaction_id(raw_id: &str) -> Result<TransactionID, Error> {
    parse_id(raw_id, Error::Validation("Invalid transaction ID"))
}
