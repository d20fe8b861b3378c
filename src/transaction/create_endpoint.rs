//! Defines the endpoint for registering a new transaction from the home page form.
use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
// Must use axum_extra's Form since that parses an empty string as None instead
// of crashing like axum::Form.
use axum_extra::extract::Form;
use axum_htmx::HxRedirect;
use rusqlite::Connection;

use crate::{
    AppState, Error,
    home_page::{Notice, home_with_notice},
    money::MoneyFormat,
    transaction::{
        core::create_transaction,
        form::{FormAction, transaction_form_fields},
        validation::{FieldError, TransactionForm, validate_transaction_form},
    },
};

/// The state needed by the registration and edit forms.
#[derive(Debug, Clone)]
pub struct TransactionFormState {
    /// The database connection for managing transactions.
    pub db_connection: Arc<Mutex<Connection>>,
    /// The currency new transactions are registered in and how amounts are shown.
    pub money_format: MoneyFormat,
}

impl FromRef<AppState> for TransactionFormState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            money_format: state.money_format,
        }
    }
}

/// The form contents with an error under each invalid field.
pub(super) fn invalid_form_response(
    action: FormAction,
    form: &TransactionForm,
    errors: &[FieldError],
    money_format: &MoneyFormat,
) -> Response {
    tracing::debug!("rejected transaction form: {errors:?}");

    (
        StatusCode::UNPROCESSABLE_ENTITY,
        Html(transaction_form_fields(action, form, errors, money_format).into_string()),
    )
        .into_response()
}

/// A route handler for registering a new transaction, redirects to the home page on success.
pub async fn create_transaction_endpoint(
    State(state): State<TransactionFormState>,
    Form(form): Form<TransactionForm>,
) -> Response {
    let new_transaction = match validate_transaction_form(&form, state.money_format.currency()) {
        Ok(new_transaction) => new_transaction,
        Err(errors) => {
            return invalid_form_response(FormAction::Create, &form, &errors, &state.money_format);
        }
    };

    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_alert_response();
        }
    };

    match create_transaction(new_transaction, &connection) {
        Ok(transaction) => tracing::info!("registered transaction {}", transaction.id),
        Err(error) => {
            tracing::error!("could not create transaction: {error}");
            return error.into_alert_response();
        }
    }

    (
        HxRedirect(home_with_notice(Notice::Created)),
        StatusCode::SEE_OTHER,
    )
        .into_response()
}
