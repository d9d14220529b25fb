//! Spending categories that group a user's transactions.

mod create;
mod db;
mod delete;
mod domain;
mod edit;
mod read;

use std::sync::{Arc, Mutex};

use axum::extract::FromRef;
use rusqlite::Connection;

use crate::{
    AppState, Error,
    database_id::{CategoryID, parse_id},
};

pub use create::create_category_endpoint;
pub use db::{category_name_exists, create_category, create_category_table};
pub use delete::delete_category_endpoint;
pub use domain::Category;
pub use edit::update_category_endpoint;
pub use read::{get_categories_endpoint, get_category_endpoint};

/// The state needed by the category endpoints.
#[derive(Debug, Clone)]
pub struct CategoryState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for CategoryState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

fn parse_category_id(raw_id: &str) -> Result<CategoryID, Error> {
    parse_id(raw_id, Error::Validation("Invalid category ID"))
}
