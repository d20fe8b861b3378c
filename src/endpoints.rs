//! The URIs of the app's pages and API routes.
//!
//! For endpoints that take a parameter, e.g., '/transactions/{transaction_id}', use
//! [format_endpoint].

/// The home page with the dashboard, the registration form and the transaction list.
pub const ROOT: &str = "/";
/// The route the registration form posts new transactions to.
pub const TRANSACTIONS_VIEW: &str = "/transactions";
/// The route for updating or deleting a transaction from the HTML pages.
pub const TRANSACTION_VIEW: &str = "/transactions/{transaction_id}";
/// The page for editing an existing transaction.
pub const EDIT_TRANSACTION_VIEW: &str = "/transactions/{transaction_id}/edit";
/// The page to display when an internal server error occurs.
pub const INTERNAL_ERROR_VIEW: &str = "/error";
/// The route for static files.
pub const STATIC: &str = "/static";

/// The JSON route to list and create transactions.
pub const TRANSACTIONS_API: &str = "/api/transactions";
/// The JSON route to get, update and delete a single transaction.
pub const TRANSACTION_API: &str = "/api/transactions/{transaction_id}";
/// The route that reformats a currency field after each keystroke.
pub const MONEY_INPUT_API: &str = "/api/money/input";

/// Replace the parameter in `endpoint_path` with `id`.
///
/// A parameter starts with '{' and ends with the next '}', for example '{transaction_id}' in
/// '/transactions/{transaction_id}/edit'. Only the first parameter is replaced.
///
/// If no parameter is found in `endpoint_path`, the original path is returned.
pub fn format_endpoint(endpoint_path: &str, id: i64) -> String {
    let Some(start) = endpoint_path.find('{') else {
        return endpoint_path.to_owned();
    };

    let end = endpoint_path[start..]
        .find('}')
        .map(|offset| start + offset + 1)
        .unwrap_or(endpoint_path.len());

    format!("{}{id}{}", &endpoint_path[..start], &endpoint_path[end..])
}
