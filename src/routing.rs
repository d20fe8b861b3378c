//! Application router configuration for the HTML pages and the JSON API.

use axum::{
    Router,
    routing::{get, post, put},
};
use tower_http::services::ServeDir;

use crate::{
    AppState,
    currency_input::currency_input_endpoint,
    endpoints,
    home_page::get_home_page,
    internal_server_error::get_internal_server_error_page,
    not_found::get_404_not_found,
    transaction::{
        create_transaction_api, create_transaction_endpoint, delete_transaction_api,
        delete_transaction_endpoint, edit_transaction_endpoint, get_edit_transaction_page,
        get_transaction_api, list_transactions_api, patch_transaction_api,
        replace_transaction_api,
    },
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    let page_routes = Router::new()
        .route(endpoints::ROOT, get(get_home_page))
        .route(endpoints::TRANSACTIONS_VIEW, post(create_transaction_endpoint))
        .route(
            endpoints::TRANSACTION_VIEW,
            put(edit_transaction_endpoint).delete(delete_transaction_endpoint),
        )
        .route(
            endpoints::EDIT_TRANSACTION_VIEW,
            get(get_edit_transaction_page),
        )
        .route(
            endpoints::INTERNAL_ERROR_VIEW,
            get(get_internal_server_error_page),
        );

    let api_routes = Router::new()
        .route(
            endpoints::TRANSACTIONS_API,
            get(list_transactions_api).post(create_transaction_api),
        )
        .route(
            endpoints::TRANSACTION_API,
            get(get_transaction_api)
                .put(replace_transaction_api)
                .patch(patch_transaction_api)
                .delete(delete_transaction_api),
        )
        .route(endpoints::MONEY_INPUT_API, post(currency_input_endpoint));

    page_routes
        .merge(api_routes)
        .nest_service(endpoints::STATIC, ServeDir::new("static/"))
        .fallback(get_404_not_found)
        .with_state(state)
}
