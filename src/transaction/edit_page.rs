//! The page for editing an existing transaction.

use axum::{
    extract::{Path, State},
    response::{Html, IntoResponse, Response},
};
use maud::html;

use crate::{
    Error,
    database_id::TransactionId,
    html::{PAGE_CONTAINER_STYLE, base, card_container, page_title},
    texts::register,
    transaction::{
        core::get_transaction,
        create_endpoint::TransactionFormState,
        form::{FormAction, transaction_form},
        validation::TransactionForm,
    },
};

/// Renders the page for editing a transaction.
pub async fn get_edit_transaction_page(
    State(state): State<TransactionFormState>,
    Path(transaction_id): Path<TransactionId>,
) -> Response {
    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_response();
        }
    };

    let transaction = match get_transaction(transaction_id, &connection) {
        Ok(transaction) => transaction,
        Err(error) => {
            if error != Error::NotFound {
                tracing::error!("Failed to retrieve transaction {transaction_id}: {error}");
            }
            return error.into_response();
        }
    };

    let form = transaction_form(
        FormAction::Edit(transaction_id),
        &TransactionForm::from_transaction(&transaction),
        &[],
        &state.money_format.with_currency(transaction.currency),
    );

    let content = html! {
        main class=(PAGE_CONTAINER_STYLE)
        {
            (page_title(register::EDIT_TITLE))
            (card_container(None, &form))
        }
    };

    Html(base(register::EDIT_TITLE, &html! {}, &content).into_string()).into_response()
}
