//! Database operations for transactions.

use rusqlite::Connection;

use crate::{
    Error, UserID,
    db::now_utc,
    owned::OwnedRecord,
    transaction::{NewTransaction, Transaction},
};

/// Create a new transaction owned by `owner`.
///
/// The caller should check that `owner` also owns the category.
///
/// # Errors
/// This function will return a:
/// - [Error::CategoryNotFound] if the category does not exist,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn create_transaction(
    owner: UserID,
    transaction: NewTransaction,
    connection: &Connection,
) -> Result<Transaction, Error> {
    let query = format!(
        "INSERT INTO \"transaction\" (user_id, amount, type, category_id, description, date, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
         RETURNING {}",
        Transaction::COLUMNS
    );

    connection
        .prepare(&query)?
        .query_row(
            (
                owner.as_i64(),
                transaction.amount,
                transaction.transaction_type,
                transaction.category_id,
                transaction.description,
                transaction.date,
                now_utc(),
            ),
            Transaction::map_row,
        )
        .map_err(|error| error.into())
}

/// Initialize the transaction table and indexes.
///
/// Deleting a user or a category deletes the transactions that reference it.
pub fn create_transaction_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute_batch(
        "CREATE TABLE IF NOT EXISTS \"transaction\" (
            id INTEGER PRIMARY KEY,
            user_id INTEGER NOT NULL,
            amount TEXT NOT NULL,
            type TEXT NOT NULL CHECK (type IN ('deposit', 'withdraw')),
            category_id INTEGER NOT NULL,
            description TEXT,
            date TEXT NOT NULL,
            created_at TEXT NOT NULL,
            FOREIGN KEY(user_id) REFERENCES user(id) ON UPDATE CASCADE ON DELETE CASCADE,
            FOREIGN KEY(category_id) REFERENCES category(id) ON UPDATE CASCADE ON DELETE CASCADE
        );

        CREATE INDEX IF NOT EXISTS idx_transaction_user_date ON \"transaction\"(user_id, date);",
    )?;

    Ok(())
}

#[cfg(test)]
mod transaction_query_tests {
    use rusqlite::Connection;
    use serde_json::json;
    use time::macros::date;

    use crate::{
        Error, PasswordHash, UserID,
        category::create_category,
        db::initialize,
        owned::{select_all_owned, select_owned},
        transaction::{Amount, NewTransaction, Transaction, TransactionType},
        user::create_user,
    };

    use super::create_transaction;

    fn get_test_db_connection() -> (Connection, UserID, i64) {
        let connection = Connection::open_in_memory().unwrap();
        initialize(&connection).expect("Could not initialize database");
        let user_id = create_user("a@x.com", PasswordHash::new_unchecked("hash"), &connection)
            .unwrap()
            .id;
        let category = create_category(user_id, "Food", "#ff0000", &connection).unwrap();

        (connection, user_id, category.id)
    }

    fn new_transaction(category_id: i64, date: time::Date) -> NewTransaction {
        NewTransaction {
            amount: Amount::from_json(&json!(50)).unwrap(),
            date,
            transaction_type: TransactionType::Deposit,
            category_id,
            description: None,
        }
    }

    #[test]
    fn create_transaction_succeeds() {
        let (connection, user_id, category_id) = get_test_db_connection();

        let transaction = create_transaction(
            user_id,
            new_transaction(category_id, date!(2024 - 01 - 01)),
            &connection,
        )
        .unwrap();

        assert!(transaction.id > 0);
        assert_eq!(transaction.user_id, user_id);
        assert_eq!(transaction.amount.to_string(), "50.00");
        assert_eq!(
            select_owned::<Transaction>(transaction.id, user_id, &connection),
            Ok(transaction)
        );
    }

    #[test]
    fn create_transaction_with_missing_category_fails() {
        let (connection, user_id, category_id) = get_test_db_connection();

        let result = create_transaction(
            user_id,
            new_transaction(category_id + 1, date!(2024 - 01 - 01)),
            &connection,
        );

        assert_eq!(result, Err(Error::CategoryNotFound));
    }

    #[test]
    fn transactions_are_listed_newest_first() {
        let (connection, user_id, category_id) = get_test_db_connection();
        let dates = [
            date!(2024 - 01 - 02),
            date!(2024 - 03 - 01),
            date!(2024 - 01 - 02),
        ];
        let ids: Vec<i64> = dates
            .into_iter()
            .map(|date| {
                create_transaction(user_id, new_transaction(category_id, date), &connection)
                    .unwrap()
                    .id
            })
            .collect();

        let listed: Vec<i64> = select_all_owned::<Transaction>(user_id, &connection)
            .unwrap()
            .into_iter()
            .map(|transaction| transaction.id)
            .collect();

        assert_eq!(listed, vec![ids[1], ids[2], ids[0]]);
    }
}
