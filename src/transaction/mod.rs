//! Transaction management for the personal finance application.
//!
//! This module contains everything related to transactions:
//! - The `Transaction` model and `NewTransaction` builder for creating transactions
//! - Database functions for storing, querying, and managing transactions
//! - Validation of the registration form
//! - View handlers for the HTML pages and the JSON API

mod api;
mod core;
mod create_endpoint;
mod delete_endpoint;
mod edit_endpoint;
mod edit_page;
mod form;
mod validation;
mod view;

pub use api::{
    TransactionFilters, TransactionPage, TransactionPagination,
    TransactionPatch, TransactionPayload, create_transaction_api, delete_transaction_api,
    get_transaction_api, list_transactions_api, patch_transaction_api, replace_transaction_api,
};
pub use core::{
    Category, NewTransaction, PaymentMethod, Transaction, create_transaction_table,
    get_all_transactions,
};
pub use create_endpoint::create_transaction_endpoint;
pub use delete_endpoint::delete_transaction_endpoint;
pub use edit_endpoint::edit_transaction_endpoint;
pub use edit_page::get_edit_transaction_page;
pub use form::{FormAction, transaction_form};
pub use validation::{FieldError, TransactionForm};
pub use view::transaction_list;

#[cfg(test)]
pub use core::create_transaction;
