//! Amounts shown in transaction lists, with the sign and colour given by the transaction type.

use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{
    Error,
    money::{MonetaryAmount, MoneyFormat},
};

/// Whether a transaction brought money in, took money out, or neither.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    /// Money earned.
    #[default]
    Income,
    /// Money spent.
    Expense,
    /// Money moved without changing the balance, e.g. between accounts.
    Neutral,
}

impl TransactionType {
    /// Every transaction type.
    pub const ALL: [TransactionType; 3] = [
        TransactionType::Income,
        TransactionType::Expense,
        TransactionType::Neutral,
    ];

    /// The lower-case name used in forms, the database and the JSON API.
    pub fn as_str(self) -> &'static str {
        match self {
            TransactionType::Income => "income",
            TransactionType::Expense => "expense",
            TransactionType::Neutral => "neutral",
        }
    }

    /// The text shown to users.
    pub fn label(self) -> &'static str {
        match self {
            TransactionType::Income => "Receita",
            TransactionType::Expense => "Despesa",
            TransactionType::Neutral => "Neutra",
        }
    }

    fn sign_prefix(self) -> &'static str {
        match self {
            TransactionType::Income => "+ ",
            TransactionType::Expense => "- ",
            TransactionType::Neutral => "",
        }
    }

    /// The CSS class for the colour of amounts of this type.
    pub fn color_class(self) -> &'static str {
        match self {
            TransactionType::Income => "text-green-600",
            TransactionType::Expense => "text-red-600",
            TransactionType::Neutral => "text-gray-900",
        }
    }
}

impl FromStr for TransactionType {
    type Err = String;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        TransactionType::ALL
            .into_iter()
            .find(|transaction_type| transaction_type.as_str() == text)
            .ok_or_else(|| format!("invalid transaction type {text:?}"))
    }
}

impl Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An amount formatted for a transaction row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SignedAmount {
    /// The formatted amount with the sign prefix of its transaction type.
    pub text: String,
    /// The CSS class for the colour the amount is shown in.
    pub color_class: &'static str,
}

/// Format `amount` in major units for a transaction of `transaction_type`.
///
/// Income is prefixed with "+ " and expenses with "- ". Neutral amounts have no prefix. The sign
/// of `amount` itself is ignored, so a negative expense is still written with a single "- ".
///
/// # Errors
/// Returns [Error::UnsupportedCurrency] or [Error::UnsupportedLocale] if the currency or locale
/// is not supported.
///
/// # Examples
/// ```
/// use carteira::money::{TransactionType, format_signed_transaction_amount};
///
/// let signed =
///     format_signed_transaction_amount(150.0, TransactionType::Expense, "BRL", "pt-BR", true)
///         .unwrap();
///
/// assert_eq!(signed.text, "- R$\u{a0}150,00");
/// assert_eq!(signed.color_class, "text-red-600");
/// ```
pub fn format_signed_transaction_amount(
    amount: f64,
    transaction_type: TransactionType,
    currency: &str,
    locale: &str,
    show_currency: bool,
) -> Result<SignedAmount, Error> {
    let money_format = MoneyFormat::new(currency, locale)?;

    Ok(money_format.format_signed(amount, transaction_type, show_currency))
}

impl MoneyFormat {
    /// Format `amount` in major units for a transaction row, see
    /// [format_signed_transaction_amount].
    pub fn format_signed(
        &self,
        amount: f64,
        transaction_type: TransactionType,
        show_currency: bool,
    ) -> SignedAmount {
        self.format_signed_minor_units(
            MonetaryAmount::from_major_units(amount),
            transaction_type,
            show_currency,
        )
    }

    /// Format an exact `amount` for a transaction row, see [format_signed_transaction_amount].
    pub fn format_signed_minor_units(
        &self,
        amount: MonetaryAmount,
        transaction_type: TransactionType,
        show_currency: bool,
    ) -> SignedAmount {
        let magnitude = self.format_minor_units(amount.abs(), show_currency);

        SignedAmount {
            text: format!("{}{magnitude}", transaction_type.sign_prefix()),
            color_class: transaction_type.color_class(),
        }
    }
}
