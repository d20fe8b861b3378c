//! Sets up the application's database.

use rusqlite::{Connection, Transaction as SqlTransaction, TransactionBehavior};

use crate::transaction::create_transaction_table;

/// Create the tables for the domain models if they do not exist yet.
///
/// All tables are created in a single exclusive transaction, so a failure leaves the database
/// untouched.
///
/// # Errors
/// Returns an error if a table cannot be created or the transaction cannot be committed.
pub fn initialize(connection: &Connection) -> Result<(), rusqlite::Error> {
    let transaction = SqlTransaction::new_unchecked(connection, TransactionBehavior::Exclusive)?;

    create_transaction_table(&transaction)?;

    transaction.commit()
}

#[cfg(test)]
mod tests {
    use rusqlite::Connection;

    use crate::db::initialize;

    #[test]
    fn creates_transaction_table() {
        let connection = Connection::open_in_memory().unwrap();

        initialize(&connection).unwrap();

        let table_count: i64 = connection
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = 'transaction'",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(table_count, 1);
    }

    #[test]
    fn can_initialize_twice() {
        let connection = Connection::open_in_memory().unwrap();

        initialize(&connection).unwrap();

        assert!(initialize(&connection).is_ok());
    }
}
