//! The JSON API for transactions, used by the command-line client.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{
        FromRef, Path, Query, State,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    http::StatusCode,
    response::{IntoResponse, Response},
};
use rusqlite::Connection;
use serde::{Deserialize, Serialize};
use time::Date;

use crate::{
    AppState, Error,
    database_id::TransactionId,
    money::{Currency, MonetaryAmount, MoneyFormat, TransactionType},
    transaction::{
        core::{
            Category, NewTransaction, PaymentMethod, Transaction, TransactionQuery,
            create_transaction, delete_transaction, get_transaction, query_transactions,
            update_transaction,
        },
        validation::validate_new_transaction,
    },
};

/// The number of transactions returned when the request does not set `limit`.
pub const DEFAULT_PAGE_LIMIT: u32 = 10;

/// The state needed by the transaction API.
#[derive(Debug, Clone)]
pub struct TransactionApiState {
    /// The database connection for managing transactions.
    pub db_connection: Arc<Mutex<Connection>>,
    /// Supplies the currency of new transactions that do not name one.
    pub money_format: MoneyFormat,
}

impl FromRef<AppState> for TransactionApiState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            money_format: state.money_format,
        }
    }
}

/// The filters applied to a page of transactions.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionFilters {
    /// Only transactions in this category.
    pub category: Option<Category>,
    /// Only transactions whose title contains this text.
    pub title: Option<String>,
}

/// Where a page of transactions sits among all the matching transactions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionPagination {
    /// The number of transactions matching the filters.
    pub count: u64,
    /// The most transactions in a page.
    pub limit: u32,
    /// The number of matching transactions before this page.
    pub skip: u32,
}

/// The response body of `GET /api/transactions`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionPage {
    /// The transactions in this page.
    pub data: Vec<Transaction>,
    /// The filters that were applied.
    pub filters: TransactionFilters,
    /// The size and position of the page.
    pub pagination: TransactionPagination,
}

/// The query string of `GET /api/transactions`.
#[derive(Debug, Default, Deserialize)]
pub struct TransactionListParams {
    category: Option<Category>,
    title: Option<String>,
    limit: Option<u32>,
    skip: Option<u32>,
}

/// The request body for creating or replacing a transaction.
///
/// `amount` is in minor units. When `currency` is missing the server's configured currency is
/// used.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionPayload {
    /// A short name for the transaction.
    pub title: String,
    /// The amount of money spent or earned.
    pub amount: MonetaryAmount,
    /// The currency of `amount`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<Currency>,
    /// Whether the money was earned or spent.
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    /// What the transaction was for.
    pub category: Category,
    /// How the transaction was paid.
    pub payment_method: PaymentMethod,
    /// Optional notes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// When the transaction happened.
    pub date: Date,
}

impl TransactionPayload {
    fn into_new_transaction(self, default_currency: Currency) -> NewTransaction {
        Transaction::build(&self.title, self.amount, self.transaction_type, self.date)
            .currency(self.currency.unwrap_or(default_currency))
            .category(self.category)
            .payment_method(self.payment_method)
            .description(self.description.as_deref())
    }
}

/// The request body for changing some fields of a transaction.
///
/// Missing fields keep their current value. An empty `description` removes the description.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionPatch {
    /// The new title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// The new amount in minor units.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<MonetaryAmount>,
    /// The new currency.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<Currency>,
    /// The new type.
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub transaction_type: Option<TransactionType>,
    /// The new category.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    /// The new payment method.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<PaymentMethod>,
    /// The new notes, or an empty string to remove them.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// The new date.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<Date>,
}

impl TransactionPatch {
    fn apply(self, transaction: Transaction) -> NewTransaction {
        let description = self.description.or(transaction.description);

        Transaction::build(
            self.title.as_deref().unwrap_or(&transaction.title),
            self.amount.unwrap_or(transaction.amount),
            self.transaction_type.unwrap_or(transaction.transaction_type),
            self.date.unwrap_or(transaction.date),
        )
        .currency(self.currency.unwrap_or(transaction.currency))
        .category(self.category.unwrap_or(transaction.category))
        .payment_method(self.payment_method.unwrap_or(transaction.payment_method))
        .description(description.as_deref())
    }
}

macro_rules! lock_or_respond {
    ($state:expr) => {
        match $state.db_connection.lock() {
            Ok(connection) => connection,
            Err(error) => {
                tracing::error!("could not acquire database lock: {error}");
                return Error::DatabaseLockError.into_json_response();
            }
        }
    };
}

fn rejected<R: std::fmt::Display>(rejection: R) -> Response {
    tracing::debug!("rejected API request: {rejection}");
    Error::InvalidRequest(rejection.to_string()).into_json_response()
}

/// A route handler for listing transactions, optionally filtered by category and title.
pub async fn list_transactions_api(
    State(state): State<TransactionApiState>,
    params: Result<Query<TransactionListParams>, QueryRejection>,
) -> Response {
    let Query(params) = match params {
        Ok(params) => params,
        Err(rejection) => return rejected(rejection),
    };

    let query = TransactionQuery {
        category: params.category,
        title: params.title.filter(|title| !title.is_empty()),
        limit: params.limit.unwrap_or(DEFAULT_PAGE_LIMIT),
        skip: params.skip.unwrap_or(0),
    };

    let connection = lock_or_respond!(state);

    match query_transactions(&query, &connection) {
        Ok((data, count)) => Json(TransactionPage {
            data,
            filters: TransactionFilters {
                category: query.category,
                title: query.title,
            },
            pagination: TransactionPagination {
                count,
                limit: query.limit,
                skip: query.skip,
            },
        })
        .into_response(),
        Err(error) => error.into_json_response(),
    }
}

/// A route handler for registering a transaction, responds with the new transaction.
pub async fn create_transaction_api(
    State(state): State<TransactionApiState>,
    payload: Result<Json<TransactionPayload>, JsonRejection>,
) -> Response {
    let Json(payload) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return rejected(rejection),
    };

    let new_transaction = payload.into_new_transaction(state.money_format.currency());
    if let Err(errors) = validate_new_transaction(&new_transaction) {
        return Error::InvalidTransaction(errors).into_json_response();
    }

    let connection = lock_or_respond!(state);

    match create_transaction(new_transaction, &connection) {
        Ok(transaction) => {
            tracing::info!("registered transaction {} via the API", transaction.id);
            (StatusCode::CREATED, Json(transaction)).into_response()
        }
        Err(error) => error.into_json_response(),
    }
}

/// A route handler for getting a single transaction.
pub async fn get_transaction_api(
    State(state): State<TransactionApiState>,
    transaction_id: Result<Path<TransactionId>, PathRejection>,
) -> Response {
    let Path(transaction_id) = match transaction_id {
        Ok(transaction_id) => transaction_id,
        Err(rejection) => return rejected(rejection),
    };

    let connection = lock_or_respond!(state);

    match get_transaction(transaction_id, &connection) {
        Ok(transaction) => Json(transaction).into_response(),
        Err(error) => error.into_json_response(),
    }
}

/// A route handler for replacing every field of a transaction.
pub async fn replace_transaction_api(
    State(state): State<TransactionApiState>,
    transaction_id: Result<Path<TransactionId>, PathRejection>,
    payload: Result<Json<TransactionPayload>, JsonRejection>,
) -> Response {
    let Path(transaction_id) = match transaction_id {
        Ok(transaction_id) => transaction_id,
        Err(rejection) => return rejected(rejection),
    };

    let Json(payload) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return rejected(rejection),
    };

    let changes = payload.into_new_transaction(state.money_format.currency());
    if let Err(errors) = validate_new_transaction(&changes) {
        return Error::InvalidTransaction(errors).into_json_response();
    }

    let connection = lock_or_respond!(state);

    save_changes(transaction_id, &changes, &connection)
}

/// A route handler for changing some fields of a transaction.
pub async fn patch_transaction_api(
    State(state): State<TransactionApiState>,
    transaction_id: Result<Path<TransactionId>, PathRejection>,
    patch: Result<Json<TransactionPatch>, JsonRejection>,
) -> Response {
    let Path(transaction_id) = match transaction_id {
        Ok(transaction_id) => transaction_id,
        Err(rejection) => return rejected(rejection),
    };

    let Json(patch) = match patch {
        Ok(patch) => patch,
        Err(rejection) => return rejected(rejection),
    };

    let connection = lock_or_respond!(state);

    let changes = match get_transaction(transaction_id, &connection) {
        Ok(transaction) => patch.apply(transaction),
        Err(Error::NotFound) => return Error::UpdateMissingTransaction.into_json_response(),
        Err(error) => return error.into_json_response(),
    };

    if let Err(errors) = validate_new_transaction(&changes) {
        return Error::InvalidTransaction(errors).into_json_response();
    }

    save_changes(transaction_id, &changes, &connection)
}

fn save_changes(
    transaction_id: TransactionId,
    changes: &NewTransaction,
    connection: &Connection,
) -> Response {
    match update_transaction(transaction_id, changes, connection) {
        Ok(0) => return Error::UpdateMissingTransaction.into_json_response(),
        Ok(_) => tracing::info!("updated transaction {transaction_id} via the API"),
        Err(error) => return error.into_json_response(),
    }

    match get_transaction(transaction_id, connection) {
        Ok(transaction) => Json(transaction).into_response(),
        Err(error) => error.into_json_response(),
    }
}

/// A route handler for deleting a transaction, responds with no content.
pub async fn delete_transaction_api(
    State(state): State<TransactionApiState>,
    transaction_id: Result<Path<TransactionId>, PathRejection>,
) -> Response {
    let Path(transaction_id) = match transaction_id {
        Ok(transaction_id) => transaction_id,
        Err(rejection) => return rejected(rejection),
    };

    let connection = lock_or_respond!(state);

    match delete_transaction(transaction_id, &connection) {
        Ok(0) => Error::DeleteMissingTransaction.into_json_response(),
        Ok(_) => {
            tracing::info!("deleted transaction {transaction_id} via the API");
            StatusCode::NO_CONTENT.into_response()
        }
        Err(error) => error.into_json_response(),
    }
}
