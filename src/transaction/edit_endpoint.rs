//! Defines the endpoint for updating an existing transaction.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_extra::extract::Form;
use axum_htmx::HxRedirect;

use crate::{
    Error,
    database_id::TransactionId,
    home_page::{Notice, home_with_notice},
    transaction::{
        core::{get_transaction, update_transaction},
        create_endpoint::{TransactionFormState, invalid_form_response},
        form::FormAction,
        validation::{TransactionForm, validate_transaction_form},
    },
};

/// A route handler for updating a transaction, redirects to the home page on success.
///
/// The transaction keeps the currency it was registered in.
pub async fn edit_transaction_endpoint(
    State(state): State<TransactionFormState>,
    Path(transaction_id): Path<TransactionId>,
    Form(form): Form<TransactionForm>,
) -> Response {
    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_alert_response();
        }
    };

    let currency = match get_transaction(transaction_id, &connection) {
        Ok(transaction) => transaction.currency,
        Err(Error::NotFound) => return Error::UpdateMissingTransaction.into_alert_response(),
        Err(error) => {
            tracing::error!("could not get transaction {transaction_id}: {error}");
            return error.into_alert_response();
        }
    };

    let changes = match validate_transaction_form(&form, currency) {
        Ok(changes) => changes,
        Err(errors) => {
            return invalid_form_response(
                FormAction::Edit(transaction_id),
                &form,
                &errors,
                &state.money_format.with_currency(currency),
            );
        }
    };

    match update_transaction(transaction_id, &changes, &connection) {
        Ok(0) => return Error::UpdateMissingTransaction.into_alert_response(),
        Ok(_) => tracing::info!("updated transaction {transaction_id}"),
        Err(error) => {
            tracing::error!("could not update transaction {transaction_id}: {error}");
            return error.into_alert_response();
        }
    }

    (
        HxRedirect(home_with_notice(Notice::Updated)),
        StatusCode::SEE_OTHER,
    )
        .into_response()
}
