//! The transaction list shown on the home page.

use maud::{Markup, html};

use crate::{
    endpoints::{self, format_endpoint},
    html::{BUTTON_DELETE_STYLE, BUTTON_LINK_STYLE, card_container},
    money::MoneyFormat,
    texts::list,
    transaction::core::{Transaction, transaction_subtitle},
};

/// The list of `transactions`, or a message saying there are none.
///
/// Each amount is shown in the currency it was registered in, using the locale of
/// `money_format`.
pub fn transaction_list(transactions: &[Transaction], money_format: &MoneyFormat) -> Markup {
    let content = html! {
        @if transactions.is_empty() {
            p class="py-4 text-center text-gray-500 dark:text-gray-400" { (list::EMPTY) }
        } @else {
            ul id="transaction-list" class="divide-y divide-gray-200 dark:divide-gray-700"
            {
                @for transaction in transactions {
                    (transaction_item(transaction, money_format))
                }
            }
        }
    };

    card_container(Some(list::TITLE), &content)
}

fn transaction_item(transaction: &Transaction, money_format: &MoneyFormat) -> Markup {
    let amount = money_format
        .with_currency(transaction.currency)
        .format_signed_minor_units(transaction.amount, transaction.transaction_type, true);

    html! {
        li
            id={ "transaction-" (transaction.id) }
            class="flex items-center justify-between gap-4 py-3"
        {
            div class="min-w-0"
            {
                p class="font-medium text-gray-900 dark:text-white truncate" { (transaction.title) }
                p class="text-sm text-gray-500 dark:text-gray-400" { (transaction_subtitle(transaction)) }
            }

            div class="flex items-center gap-4 shrink-0"
            {
                span class={ "font-semibold " (amount.color_class) } { (amount.text) }

                a
                    href=(format_endpoint(endpoints::EDIT_TRANSACTION_VIEW, transaction.id))
                    class=(BUTTON_LINK_STYLE)
                {
                    (list::EDIT)
                }

                button
                    type="button"
                    hx-delete=(format_endpoint(endpoints::TRANSACTION_VIEW, transaction.id))
                    hx-confirm=(list::DELETE_CONFIRMATION)
                    hx-target-error="#alert-container"
                    class=(BUTTON_DELETE_STYLE)
                {
                    (list::DELETE)
                }
            }
        }
    }
}
