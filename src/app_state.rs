//! Implements a struct that holds the state of the server.

use std::sync::{Arc, Mutex};

use rusqlite::Connection;

use crate::{Error, db::initialize, money::MoneyFormat};

/// The state of the server.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The currency and locale used to show and parse amounts.
    pub money_format: MoneyFormat,

    /// The database connection
    pub db_connection: Arc<Mutex<Connection>>,
}

impl AppState {
    /// Create a new [AppState] with a SQLite database connection.
    ///
    /// This function will initialize the database by adding the tables for the domain models.
    ///
    /// # Errors
    /// Returns an error if the database cannot be initialized.
    pub fn new(db_connection: Connection, money_format: MoneyFormat) -> Result<Self, Error> {
        initialize(&db_connection)?;

        Ok(Self {
            money_format,
            db_connection: Arc::new(Mutex::new(db_connection)),
        })
    }
}
