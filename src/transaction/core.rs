//! Defines the core data models and database queries for transactions.

use std::{fmt::Display, str::FromStr};

use rusqlite::{Connection, Row, params, types::Type};
use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};

use crate::{
    Error,
    database_id::TransactionId,
    money::{Currency, MonetaryAmount, TransactionType},
};

// ============================================================================
// MODELS
// ============================================================================

/// What a transaction was for.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Groceries and eating out.
    #[default]
    Food,
    /// Public transport, fuel and rides.
    Transport,
    /// Leisure.
    Entertainment,
    /// Medicine and appointments.
    Health,
    /// Anything else.
    Other,
}

impl Category {
    /// Every category, in the order they are offered in forms.
    pub const ALL: [Category; 5] = [
        Category::Food,
        Category::Transport,
        Category::Entertainment,
        Category::Health,
        Category::Other,
    ];

    /// The lower-case name used in forms, the database and the JSON API.
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Food => "food",
            Category::Transport => "transport",
            Category::Entertainment => "entertainment",
            Category::Health => "health",
            Category::Other => "other",
        }
    }

    /// The text shown to users.
    pub fn label(self) -> &'static str {
        match self {
            Category::Food => "Alimentação",
            Category::Transport => "Transporte",
            Category::Entertainment => "Entretenimento",
            Category::Health => "Saúde",
            Category::Other => "Outros",
        }
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|category| category.as_str() == text)
            .ok_or_else(|| format!("invalid category {text:?}"))
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a transaction was paid.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    /// Notes and coins.
    #[default]
    Cash,
    /// Credit card.
    Credit,
    /// Debit card.
    Debit,
    /// An instant bank transfer.
    Pix,
}

impl PaymentMethod {
    /// Every payment method, in the order they are offered in forms.
    pub const ALL: [PaymentMethod; 4] = [
        PaymentMethod::Cash,
        PaymentMethod::Credit,
        PaymentMethod::Debit,
        PaymentMethod::Pix,
    ];

    /// The lower-case name used in forms, the database and the JSON API.
    pub fn as_str(self) -> &'static str {
        match self {
            PaymentMethod::Cash => "cash",
            PaymentMethod::Credit => "credit",
            PaymentMethod::Debit => "debit",
            PaymentMethod::Pix => "pix",
        }
    }

    /// The text shown to users.
    pub fn label(self) -> &'static str {
        match self {
            PaymentMethod::Cash => "Dinheiro",
            PaymentMethod::Credit => "Cartão de Crédito",
            PaymentMethod::Debit => "Cartão de Débito",
            PaymentMethod::Pix => "PIX",
        }
    }
}

impl FromStr for PaymentMethod {
    type Err = String;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        PaymentMethod::ALL
            .into_iter()
            .find(|method| method.as_str() == text)
            .ok_or_else(|| format!("invalid payment method {text:?}"))
    }
}

impl Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An expense or income, i.e. an event where money was either spent or earned.
///
/// To create a new `Transaction`, use [Transaction::build].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// The ID of the transaction.
    pub id: TransactionId,
    /// A short name for the transaction.
    pub title: String,
    /// The amount of money spent or earned, always positive for registered transactions.
    pub amount: MonetaryAmount,
    /// The currency of `amount`.
    pub currency: Currency,
    /// Whether the money was earned or spent.
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    /// What the transaction was for.
    pub category: Category,
    /// How the transaction was paid.
    pub payment_method: PaymentMethod,
    /// Optional notes.
    pub description: Option<String>,
    /// When the transaction happened.
    pub date: Date,
    /// When the transaction was registered.
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    /// When the transaction was last changed.
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl Transaction {
    /// Create a new transaction.
    ///
    /// Shortcut for [NewTransaction] for discoverability. The category, payment method and
    /// currency default to food, cash and BRL.
    pub fn build(
        title: &str,
        amount: MonetaryAmount,
        transaction_type: TransactionType,
        date: Date,
    ) -> NewTransaction {
        NewTransaction {
            title: title.to_owned(),
            amount,
            currency: Currency::Brl,
            transaction_type,
            category: Category::default(),
            payment_method: PaymentMethod::default(),
            description: None,
            date,
        }
    }
}

/// A transaction that has not been saved yet.
///
/// Create it with [Transaction::build] and the setters below.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTransaction {
    /// A short name for the transaction.
    pub title: String,
    /// The amount of money spent or earned.
    pub amount: MonetaryAmount,
    /// The currency of `amount`.
    pub currency: Currency,
    /// Whether the money was earned or spent.
    pub transaction_type: TransactionType,
    /// What the transaction was for.
    pub category: Category,
    /// How the transaction was paid.
    pub payment_method: PaymentMethod,
    /// Optional notes, `None` rather than an empty string.
    pub description: Option<String>,
    /// When the transaction happened.
    pub date: Date,
}

impl NewTransaction {
    /// Set the currency.
    pub fn currency(mut self, currency: Currency) -> Self {
        self.currency = currency;
        self
    }

    /// Set the category.
    pub fn category(mut self, category: Category) -> Self {
        self.category = category;
        self
    }

    /// Set the payment method.
    pub fn payment_method(mut self, payment_method: PaymentMethod) -> Self {
        self.payment_method = payment_method;
        self
    }

    /// Set the description. Empty text is stored as no description.
    pub fn description(mut self, description: Option<&str>) -> Self {
        self.description = description
            .map(str::trim)
            .filter(|description| !description.is_empty())
            .map(str::to_owned);
        self
    }
}

/// Filters and paging for [query_transactions].
#[derive(Debug, Default, Clone, PartialEq)]
pub struct TransactionQuery {
    /// Only transactions in this category.
    pub category: Option<Category>,
    /// Only transactions whose title contains this text, ignoring ASCII case.
    pub title: Option<String>,
    /// The most transactions to return.
    pub limit: u32,
    /// How many matching transactions to skip.
    pub skip: u32,
}

// ============================================================================
// DATABASE FUNCTIONS
// ============================================================================

/// Number of rows changed by an `UPDATE` or `DELETE`.
pub type RowsAffected = usize;

const TRANSACTION_COLUMNS: &str = "id, title, amount, currency, type, category, \
    payment_method, description, date, created_at, updated_at";

/// Create a new transaction in the database.
///
/// # Errors
/// This function will return a [Error::SqlError] if there is an SQL error.
pub fn create_transaction(
    new_transaction: NewTransaction,
    connection: &Connection,
) -> Result<Transaction, Error> {
    let now = OffsetDateTime::now_utc();

    connection
        .prepare(&format!(
            "INSERT INTO \"transaction\" \
                (title, amount, currency, type, category, payment_method, description, date, \
                created_at, updated_at) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?9) \
             RETURNING {TRANSACTION_COLUMNS}"
        ))?
        .query_row(
            params![
                new_transaction.title,
                new_transaction.amount.minor_units(),
                new_transaction.currency.code(),
                new_transaction.transaction_type.as_str(),
                new_transaction.category.as_str(),
                new_transaction.payment_method.as_str(),
                new_transaction.description,
                new_transaction.date,
                now,
            ],
            map_transaction_row,
        )
        .map_err(Error::from)
}

/// Retrieve a transaction from the database by its `id`.
///
/// # Errors
/// This function will return a:
/// - [Error::NotFound] if `id` does not refer to a valid transaction,
/// - or [Error::SqlError] there is some other SQL error.
pub fn get_transaction(id: TransactionId, connection: &Connection) -> Result<Transaction, Error> {
    connection
        .prepare(&format!(
            "SELECT {TRANSACTION_COLUMNS} FROM \"transaction\" WHERE id = :id"
        ))?
        .query_row(&[(":id", &id)], map_transaction_row)
        .map_err(Error::from)
}

/// Retrieve every transaction, newest date first and then most recently registered first.
///
/// # Errors
/// This function will return a [Error::SqlError] if there is an SQL error.
pub fn get_all_transactions(connection: &Connection) -> Result<Vec<Transaction>, Error> {
    connection
        .prepare(&format!(
            "SELECT {TRANSACTION_COLUMNS} FROM \"transaction\" ORDER BY date DESC, id DESC"
        ))?
        .query_map([], map_transaction_row)?
        .map(|transaction_result| transaction_result.map_err(Error::from))
        .collect()
}

/// Retrieve one page of the transactions matching `query` and the number of matches in total.
///
/// Transactions are ordered as in [get_all_transactions].
///
/// # Errors
/// This function will return a [Error::SqlError] if there is an SQL error.
pub fn query_transactions(
    query: &TransactionQuery,
    connection: &Connection,
) -> Result<(Vec<Transaction>, u64), Error> {
    const FILTER: &str = "(:category IS NULL OR category = :category) \
        AND (:title IS NULL OR instr(lower(title), lower(:title)) > 0)";

    let category = query.category.map(Category::as_str);
    let title = query.title.as_deref();

    let count = connection.query_row(
        &format!("SELECT COUNT(id) FROM \"transaction\" WHERE {FILTER}"),
        rusqlite::named_params! { ":category": category, ":title": title },
        |row| row.get::<_, usize>(0),
    )? as u64;

    let transactions = connection
        .prepare(&format!(
            "SELECT {TRANSACTION_COLUMNS} FROM \"transaction\" WHERE {FILTER} \
             ORDER BY date DESC, id DESC LIMIT :limit OFFSET :skip"
        ))?
        .query_map(
            rusqlite::named_params! {
                ":category": category,
                ":title": title,
                ":limit": query.limit,
                ":skip": query.skip,
            },
            map_transaction_row,
        )?
        .collect::<Result<Vec<_>, _>>()?;

    Ok((transactions, count))
}

/// Replace the fields of the transaction `id` with `new_transaction`.
///
/// The creation time is kept and the update time is set to now.
///
/// # Errors
/// This function will return a [Error::SqlError] if there is an SQL error.
pub fn update_transaction(
    id: TransactionId,
    new_transaction: &NewTransaction,
    connection: &Connection,
) -> Result<RowsAffected, Error> {
    connection
        .execute(
            "UPDATE \"transaction\" SET \
                title = ?1, \
                amount = ?2, \
                currency = ?3, \
                type = ?4, \
                category = ?5, \
                payment_method = ?6, \
                description = ?7, \
                date = ?8, \
                updated_at = ?9 \
            WHERE id = ?10",
            params![
                new_transaction.title,
                new_transaction.amount.minor_units(),
                new_transaction.currency.code(),
                new_transaction.transaction_type.as_str(),
                new_transaction.category.as_str(),
                new_transaction.payment_method.as_str(),
                new_transaction.description,
                new_transaction.date,
                OffsetDateTime::now_utc(),
                id,
            ],
        )
        .map_err(Error::from)
}

/// Delete the transaction `id`.
///
/// # Errors
/// This function will return a [Error::SqlError] if there is an SQL error.
pub fn delete_transaction(id: TransactionId, connection: &Connection) -> Result<RowsAffected, Error> {
    connection
        .execute("DELETE FROM \"transaction\" WHERE id = :id", &[(":id", &id)])
        .map_err(Error::from)
}

/// Get the total number of transactions in the database.
///
/// # Errors
/// This function will return a [Error::SqlError] there is some SQL error.
pub fn count_transactions(connection: &Connection) -> Result<u64, Error> {
    connection
        .query_row("SELECT COUNT(id) FROM \"transaction\";", [], |row| {
            row.get::<_, usize>(0)
        })
        .map(|count| count as u64)
        .map_err(Error::from)
}

/// Create the transaction table in the database.
///
/// # Errors
/// Returns an error if the table cannot be created or if there is an SQL error.
pub fn create_transaction_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS \"transaction\" (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                title TEXT NOT NULL,
                amount INTEGER NOT NULL,
                currency TEXT NOT NULL,
                type TEXT NOT NULL,
                category TEXT NOT NULL,
                payment_method TEXT NOT NULL,
                description TEXT,
                date TEXT NOT NULL,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
                )",
        (),
    )?;

    // Used by the dashboard totals.
    connection.execute(
        "CREATE INDEX IF NOT EXISTS idx_transaction_type_category \
            ON \"transaction\"(type, category);",
        (),
    )?;

    Ok(())
}

/// Map a database row to a Transaction.
pub fn map_transaction_row(row: &Row) -> Result<Transaction, rusqlite::Error> {
    Ok(Transaction {
        id: row.get(0)?,
        title: row.get(1)?,
        amount: MonetaryAmount::from_minor_units(row.get(2)?),
        currency: parse_column(row, 3)?,
        transaction_type: parse_column(row, 4)?,
        category: parse_column(row, 5)?,
        payment_method: parse_column(row, 6)?,
        description: row.get(7)?,
        date: row.get(8)?,
        created_at: row.get(9)?,
        updated_at: row.get(10)?,
    })
}

/// Read the text column `index` and parse it with [FromStr].
pub(crate) fn parse_column<T>(row: &Row, index: usize) -> Result<T, rusqlite::Error>
where
    T: FromStr,
    T::Err: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    let text: String = row.get(index)?;

    text.parse()
        .map_err(|error: T::Err| rusqlite::Error::FromSqlConversionFailure(index, Type::Text, error.into()))
}

/// The subtitle of a transaction in the list, e.g. "Alimentação • 28/08/2025".
pub fn transaction_subtitle(transaction: &Transaction) -> String {
    format!(
        "{} • {:02}/{:02}/{}",
        transaction.category.label(),
        transaction.date.day(),
        u8::from(transaction.date.month()),
        transaction.date.year()
    )
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod database_tests {
    use rusqlite::Connection;
    use time::macros::date;

    use crate::{
        Error,
        db::initialize,
        money::{Currency, MonetaryAmount, TransactionType},
        transaction::core::{
            Category, PaymentMethod, Transaction, TransactionQuery, count_transactions,
            create_transaction, delete_transaction, get_all_transactions, get_transaction,
            query_transactions, transaction_subtitle, update_transaction,
        },
    };

    fn get_test_connection() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();
        conn
    }

    fn amount(minor_units: i64) -> MonetaryAmount {
        MonetaryAmount::from_minor_units(minor_units)
    }

    #[test]
    fn create_succeeds() {
        let conn = get_test_connection();

        let result = create_transaction(
            Transaction::build("Mercado", amount(15000), TransactionType::Expense, date!(2025 - 08 - 28))
                .category(Category::Food)
                .payment_method(PaymentMethod::Pix)
                .currency(Currency::Eur)
                .description(Some("  compras da semana ")),
            &conn,
        );

        let transaction = result.expect("could not create transaction");
        assert_eq!(transaction.id, 1);
        assert_eq!(transaction.title, "Mercado");
        assert_eq!(transaction.amount, amount(15000));
        assert_eq!(transaction.currency, Currency::Eur);
        assert_eq!(transaction.transaction_type, TransactionType::Expense);
        assert_eq!(transaction.payment_method, PaymentMethod::Pix);
        assert_eq!(transaction.description.as_deref(), Some("compras da semana"));
        assert_eq!(transaction.created_at, transaction.updated_at);
    }

    #[test]
    fn empty_description_is_stored_as_none() {
        let conn = get_test_connection();

        let transaction = create_transaction(
            Transaction::build("Salário", amount(500000), TransactionType::Income, date!(2025 - 08 - 01))
                .description(Some("   ")),
            &conn,
        )
        .unwrap();

        assert_eq!(transaction.description, None);
    }

    #[test]
    fn get_returns_created_transaction() {
        let conn = get_test_connection();
        let want = create_transaction(
            Transaction::build("Ônibus", amount(450), TransactionType::Expense, date!(2025 - 08 - 02))
                .category(Category::Transport),
            &conn,
        )
        .unwrap();

        let got = get_transaction(want.id, &conn).expect("could not get transaction");

        assert_eq!(want, got);
    }

    #[test]
    fn get_missing_transaction_is_not_found() {
        let conn = get_test_connection();

        assert_eq!(get_transaction(42, &conn), Err(Error::NotFound));
    }

    #[test]
    fn get_all_orders_by_date_then_id() {
        let conn = get_test_connection();
        for (title, date) in [
            ("a", date!(2025 - 08 - 01)),
            ("b", date!(2025 - 08 - 03)),
            ("c", date!(2025 - 08 - 01)),
        ] {
            create_transaction(
                Transaction::build(title, amount(100), TransactionType::Expense, date),
                &conn,
            )
            .unwrap();
        }

        let titles: Vec<String> = get_all_transactions(&conn)
            .unwrap()
            .into_iter()
            .map(|transaction| transaction.title)
            .collect();

        assert_eq!(titles, vec!["b", "c", "a"]);
    }

    #[test]
    fn query_filters_and_pages() {
        let conn = get_test_connection();
        let cases = [
            ("Almoço", Category::Food),
            ("Jantar", Category::Food),
            ("Cinema", Category::Entertainment),
            ("almoço de domingo", Category::Food),
        ];
        for (title, category) in cases {
            create_transaction(
                Transaction::build(title, amount(100), TransactionType::Expense, date!(2025 - 08 - 01))
                    .category(category),
                &conn,
            )
            .unwrap();
        }

        let (page, count) = query_transactions(
            &TransactionQuery {
                category: Some(Category::Food),
                title: Some("ALMOÇO".to_owned()),
                limit: 10,
                skip: 0,
            },
            &conn,
        )
        .unwrap();
        // SQLite only folds ASCII case, so "Ç" does not match "ç".
        assert_eq!(count, 0, "got {page:?}");

        let (page, count) = query_transactions(
            &TransactionQuery {
                category: Some(Category::Food),
                title: Some("almo".to_owned()),
                limit: 1,
                skip: 1,
            },
            &conn,
        )
        .unwrap();
        assert_eq!(count, 2);
        assert_eq!(page.len(), 1);
        assert_eq!(page[0].title, "Almoço");
    }

    #[test]
    fn query_without_filters_returns_everything() {
        let conn = get_test_connection();
        for i in 1..=3 {
            create_transaction(
                Transaction::build(&format!("t{i}"), amount(i), TransactionType::Income, date!(2025 - 08 - 01)),
                &conn,
            )
            .unwrap();
        }

        let (page, count) = query_transactions(
            &TransactionQuery {
                limit: 10,
                ..Default::default()
            },
            &conn,
        )
        .unwrap();

        assert_eq!(count, 3);
        assert_eq!(page.len(), 3);
    }

    #[test]
    fn update_replaces_fields() {
        let conn = get_test_connection();
        let original = create_transaction(
            Transaction::build("Antes", amount(100), TransactionType::Income, date!(2025 - 08 - 01)),
            &conn,
        )
        .unwrap();
        let changes = Transaction::build("Depois", amount(250), TransactionType::Expense, date!(2025 - 08 - 05))
            .category(Category::Health)
            .payment_method(PaymentMethod::Debit);

        let rows_affected = update_transaction(original.id, &changes, &conn).unwrap();

        assert_eq!(rows_affected, 1);
        let got = get_transaction(original.id, &conn).unwrap();
        assert_eq!(got.title, "Depois");
        assert_eq!(got.amount, amount(250));
        assert_eq!(got.transaction_type, TransactionType::Expense);
        assert_eq!(got.category, Category::Health);
        assert_eq!(got.payment_method, PaymentMethod::Debit);
        assert_eq!(got.date, date!(2025 - 08 - 05));
        assert_eq!(got.created_at, original.created_at);
    }

    #[test]
    fn update_missing_transaction_affects_no_rows() {
        let conn = get_test_connection();
        let changes = Transaction::build("x", amount(1), TransactionType::Income, date!(2025 - 08 - 01));

        assert_eq!(update_transaction(99, &changes, &conn), Ok(0));
    }

    #[test]
    fn delete_removes_transaction() {
        let conn = get_test_connection();
        let transaction = create_transaction(
            Transaction::build("x", amount(1), TransactionType::Income, date!(2025 - 08 - 01)),
            &conn,
        )
        .unwrap();

        let rows_affected = delete_transaction(transaction.id, &conn).unwrap();

        assert_eq!(rows_affected, 1);
        assert_eq!(get_transaction(transaction.id, &conn), Err(Error::NotFound));
        assert_eq!(delete_transaction(transaction.id, &conn), Ok(0));
    }

    #[test]
    fn get_count() {
        let conn = get_test_connection();
        let want_count = 20;
        for i in 1..=want_count {
            create_transaction(
                Transaction::build("t", amount(i), TransactionType::Expense, date!(2025 - 10 - 05)),
                &conn,
            )
            .expect("Could not create transaction");
        }

        let got_count = count_transactions(&conn).expect("Could not get count");

        assert_eq!(want_count as u64, got_count);
    }

    #[test]
    fn subtitle_has_category_and_date() {
        let conn = get_test_connection();
        let transaction = create_transaction(
            Transaction::build("x", amount(1), TransactionType::Expense, date!(2025 - 08 - 28)),
            &conn,
        )
        .unwrap();

        assert_eq!(transaction_subtitle(&transaction), "Alimentação • 28/08/2025");
    }

    #[test]
    fn serializes_with_api_field_names() {
        let conn = get_test_connection();
        let transaction = create_transaction(
            Transaction::build("x", amount(1234), TransactionType::Expense, date!(2025 - 08 - 28))
                .payment_method(PaymentMethod::Credit),
            &conn,
        )
        .unwrap();

        let json = serde_json::to_value(&transaction).unwrap();

        assert_eq!(json["amount"], 1234);
        assert_eq!(json["currency"], "BRL");
        assert_eq!(json["type"], "expense");
        assert_eq!(json["paymentMethod"], "credit");
        assert_eq!(json["date"], "2025-08-28");
        assert!(json["createdAt"].is_string());
    }
}
