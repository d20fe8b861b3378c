//! Carteira is a web app for keeping track of personal income and expenses.
//!
//! The server renders HTML pages directly and also exposes a JSON API for the command-line
//! client. At the heart of the app is the [money] module, which turns keystrokes typed into a
//! currency field into exact amounts and renders amounts for the configured locale.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum::{
    Json,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use axum_server::Handle;
use serde_json::json;
use tokio::signal;

mod app_state;
mod currency_input;
mod dashboard;
mod database_id;
mod db;
mod endpoints;
mod home_page;
mod html;
mod internal_server_error;
mod logging;
pub mod money;
mod not_found;
pub mod notification;
pub mod rest_client;
mod routing;
pub mod store;
mod texts;
mod transaction;

#[cfg(test)]
mod test_utils;

pub use app_state::AppState;
pub use database_id::TransactionId;
pub use db::initialize as initialize_db;
pub use logging::{LOG_BODY_LENGTH_LIMIT, logging_middleware};
pub use routing::build_router;
pub use transaction::{
    Category, FieldError, NewTransaction, PaymentMethod, Transaction, TransactionFilters,
    TransactionPage, TransactionPagination, TransactionPatch, TransactionPayload,
};

use crate::{
    internal_server_error::InternalServerError, not_found::get_404_not_found_response,
    notification::Notifications,
};

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        if let Err(error) = signal::ctrl_c().await {
            tracing::error!("failed to listen for Ctrl+C: {error}");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut terminate) => {
                terminate.recv().await;
            }
            Err(error) => {
                tracing::error!("failed to install the terminate signal handler: {error}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The locale tag is not one of the supported locales.
    ///
    /// This is a configuration error and should be reported at start up.
    #[error("the locale \"{0}\" is not supported")]
    UnsupportedLocale(String),

    /// The currency code is not one of the supported currencies.
    ///
    /// This is a configuration error and should be reported at start up.
    #[error("the currency \"{0}\" is not supported")]
    UnsupportedCurrency(String),

    /// The transaction did not pass validation.
    ///
    /// Holds one error for each field that failed.
    #[error("the transaction is invalid: {}", describe_field_errors(.0))]
    InvalidTransaction(Vec<FieldError>),

    /// The requested resource was not found.
    ///
    /// For HTTP request handlers, the client should check that the parameters
    /// (e.g., ID) are correct and that the resource has been created.
    ///
    /// Internally, this error may occur when a query returns no rows.
    #[error("the requested resource could not be found")]
    NotFound,

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),

    /// Could not acquire the database lock
    #[error("could not acquire the database lock")]
    DatabaseLockError,

    /// Tried to update a transaction that does not exist
    #[error("tried to update a transaction that is not in the database")]
    UpdateMissingTransaction,

    /// Tried to delete a transaction that does not exist
    #[error("tried to delete a transaction that is not in the database")]
    DeleteMissingTransaction,

    /// The body or query string of an API request could not be read.
    ///
    /// Holds the reason reported by the extractor.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// The HTTP client used by the REST client could not be created.
    #[error("could not create the HTTP client: {0}")]
    HttpClient(String),

    /// A request made by the REST client failed or returned an unexpected body.
    ///
    /// Holds the URL of the request. The cause is logged where the request is made.
    #[error("the request to {0} failed")]
    RequestFailed(String),
}

fn describe_field_errors(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|error| format!("{}: {}", error.field, error.message))
        .collect::<Vec<_>>()
        .join("; ")
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::NotFound => get_404_not_found_response(),
            Error::UnsupportedLocale(_) | Error::UnsupportedCurrency(_) => InternalServerError {
                description: "Configuração inválida",
                fix: "Verifique o idioma e a moeda configurados no servidor.",
            }
            .into_response(),
            Error::DatabaseLockError => InternalServerError::default().into_response(),
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                InternalServerError::default().into_response()
            }
        }
    }
}

impl Error {
    /// Render the error as a notification for htmx requests.
    ///
    /// The response body is swapped into the page's alert container.
    fn into_alert_response(self) -> Response {
        let (status, message) = match &self {
            Error::InvalidTransaction(_) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "Verifique os campos destacados e tente novamente.",
            ),
            Error::UpdateMissingTransaction => (
                StatusCode::NOT_FOUND,
                "Não foi possível atualizar a transação: ela não foi encontrada.",
            ),
            Error::DeleteMissingTransaction => (
                StatusCode::NOT_FOUND,
                "Não foi possível excluir a transação: ela não foi encontrada. \
                Atualize a página para ver se ela já foi excluída.",
            ),
            Error::NotFound => (
                StatusCode::NOT_FOUND,
                "O recurso solicitado não foi encontrado.",
            ),
            error => {
                tracing::error!("An unexpected error occurred: {error}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Ocorreu um erro inesperado. Verifique os logs do servidor.",
                )
            }
        };

        let mut notifications = Notifications::new();
        notifications.error(message);

        (
            status,
            Html(notification::notification_stack(&notifications).into_string()),
        )
            .into_response()
    }

    /// Render the error as a JSON body of the form `{ "error": message }`.
    ///
    /// Validation errors also list the failing fields under `"fields"`.
    fn into_json_response(self) -> Response {
        match self {
            Error::InvalidTransaction(field_errors) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(json!({
                    "error": "the transaction is invalid",
                    "fields": field_errors,
                })),
            )
                .into_response(),
            Error::NotFound | Error::UpdateMissingTransaction | Error::DeleteMissingTransaction => {
                (
                    StatusCode::NOT_FOUND,
                    Json(json!({ "error": self.to_string() })),
                )
                    .into_response()
            }
            Error::UnsupportedLocale(_)
            | Error::UnsupportedCurrency(_)
            | Error::InvalidRequest(_) => (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": self.to_string() })),
            )
                .into_response(),
            error => {
                tracing::error!("An unexpected error occurred: {error}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "an unexpected error occurred" })),
                )
                    .into_response()
            }
        }
    }
}
