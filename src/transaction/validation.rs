//! The rules a transaction must satisfy before it is saved.

use serde::{Deserialize, Serialize};
use time::{Date, format_description::BorrowedFormatItem, macros::format_description};

use crate::{
    money::{Currency, MonetaryAmount, TransactionType},
    texts::validation,
    transaction::core::{Category, NewTransaction, PaymentMethod, Transaction},
};

const DATE_FORMAT: &[BorrowedFormatItem] = format_description!("[year]-[month]-[day]");

/// A validation failure for a single field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    /// The name of the field, as it appears in forms and the JSON API.
    pub field: &'static str,
    /// The message shown to the user.
    pub message: &'static str,
}

impl FieldError {
    fn new(field: &'static str, message: &'static str) -> Self {
        Self { field, message }
    }
}

/// The raw values submitted by the registration and edit forms.
///
/// Every field is kept as text so the form can be shown again exactly as the user left it.
/// `amount` is the minor-unit value of the live currency input.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TransactionForm {
    /// A short name for the transaction.
    pub title: String,
    /// The amount in minor units, e.g. "1234" for R$ 12,34.
    pub amount: String,
    /// "income" or "expense".
    #[serde(rename = "type")]
    pub transaction_type: String,
    /// One of the [Category] names.
    pub category: String,
    /// One of the [PaymentMethod] names.
    pub payment_method: String,
    /// An ISO 8601 date, e.g. "2025-08-28".
    pub date: String,
    /// Optional notes.
    pub description: String,
}

impl TransactionForm {
    /// The values of an empty registration form.
    pub fn initial(today: Date) -> Self {
        Self {
            title: String::new(),
            amount: "0".to_owned(),
            transaction_type: TransactionType::Income.as_str().to_owned(),
            category: Category::Food.as_str().to_owned(),
            payment_method: PaymentMethod::Cash.as_str().to_owned(),
            date: format_date(today),
            description: String::new(),
        }
    }

    /// The values of the edit form for an existing transaction.
    pub fn from_transaction(transaction: &Transaction) -> Self {
        Self {
            title: transaction.title.clone(),
            amount: transaction.amount.minor_units().to_string(),
            transaction_type: transaction.transaction_type.as_str().to_owned(),
            category: transaction.category.as_str().to_owned(),
            payment_method: transaction.payment_method.as_str().to_owned(),
            date: format_date(transaction.date),
            description: transaction.description.clone().unwrap_or_default(),
        }
    }

    /// The amount typed so far, or zero if the field does not hold a number.
    pub fn amount_or_zero(&self) -> MonetaryAmount {
        self.amount
            .trim()
            .parse()
            .map(MonetaryAmount::from_minor_units)
            .unwrap_or(MonetaryAmount::ZERO)
    }
}

fn format_date(date: Date) -> String {
    date.format(DATE_FORMAT).unwrap_or_default()
}

/// Check every field of `form` and build the transaction it describes.
///
/// All failing fields are reported together, in the order they appear on the form.
pub fn validate_transaction_form(
    form: &TransactionForm,
    currency: Currency,
) -> Result<NewTransaction, Vec<FieldError>> {
    let mut errors = Vec::new();

    let title = form.title.trim();
    if title.is_empty() {
        errors.push(FieldError::new("title", validation::TITLE_REQUIRED));
    }

    let amount = form.amount.trim();
    let amount = if amount.is_empty() {
        errors.push(FieldError::new("amount", validation::AMOUNT_REQUIRED));
        None
    } else {
        match amount.parse::<i64>() {
            Ok(minor_units) if minor_units > 0 => Some(MonetaryAmount::from_minor_units(minor_units)),
            _ => {
                errors.push(FieldError::new("amount", validation::AMOUNT_GREATER_THAN_ZERO));
                None
            }
        }
    };

    let transaction_type = match form.transaction_type.parse::<TransactionType>() {
        Ok(transaction_type @ (TransactionType::Income | TransactionType::Expense)) => {
            Some(transaction_type)
        }
        _ => {
            errors.push(FieldError::new("type", validation::TYPE_REQUIRED));
            None
        }
    };

    let category = form.category.parse::<Category>().ok();
    if category.is_none() {
        errors.push(FieldError::new("category", validation::CATEGORY_REQUIRED));
    }

    let payment_method = form.payment_method.parse::<PaymentMethod>().ok();
    if payment_method.is_none() {
        errors.push(FieldError::new(
            "paymentMethod",
            validation::PAYMENT_METHOD_REQUIRED,
        ));
    }

    let date = form.date.trim();
    let date = if date.is_empty() {
        errors.push(FieldError::new("date", validation::DATE_REQUIRED));
        None
    } else {
        match Date::parse(date, DATE_FORMAT) {
            Ok(date) => Some(date),
            Err(error) => {
                tracing::debug!("could not parse date {date:?}: {error}");
                errors.push(FieldError::new("date", validation::DATE_INVALID));
                None
            }
        }
    };

    match (amount, transaction_type, category, payment_method, date) {
        (Some(amount), Some(transaction_type), Some(category), Some(payment_method), Some(date))
            if errors.is_empty() =>
        {
            Ok(Transaction::build(title, amount, transaction_type, date)
                .currency(currency)
                .category(category)
                .payment_method(payment_method)
                .description(Some(&form.description)))
        }
        _ => Err(errors),
    }
}

/// Check a transaction that did not come from a form, e.g. from the JSON API.
///
/// Neutral transactions are accepted here so that imported data round-trips.
pub fn validate_new_transaction(new_transaction: &NewTransaction) -> Result<(), Vec<FieldError>> {
    let mut errors = Vec::new();

    if new_transaction.title.trim().is_empty() {
        errors.push(FieldError::new("title", validation::TITLE_REQUIRED));
    }

    if !new_transaction.amount.is_positive() {
        errors.push(FieldError::new("amount", validation::AMOUNT_GREATER_THAN_ZERO));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use time::macros::date;

    use crate::{
        money::{Currency, MonetaryAmount, TransactionType},
        texts::validation,
        transaction::{
            core::{Category, PaymentMethod, Transaction},
            validation::{
                FieldError, TransactionForm, validate_new_transaction, validate_transaction_form,
            },
        },
    };

    fn valid_form() -> TransactionForm {
        TransactionForm {
            title: "  Mercado ".to_owned(),
            amount: "15000".to_owned(),
            transaction_type: "expense".to_owned(),
            category: "food".to_owned(),
            payment_method: "pix".to_owned(),
            date: "2025-08-28".to_owned(),
            description: String::new(),
        }
    }

    #[test]
    fn valid_form_builds_transaction() {
        let got = validate_transaction_form(&valid_form(), Currency::Brl);

        let want = Transaction::build(
            "Mercado",
            MonetaryAmount::from_minor_units(15000),
            TransactionType::Expense,
            date!(2025 - 08 - 28),
        )
        .category(Category::Food)
        .payment_method(PaymentMethod::Pix);
        assert_eq!(got, Ok(want));
    }

    #[test]
    fn empty_form_reports_every_field() {
        let got = validate_transaction_form(&TransactionForm::default(), Currency::Brl);

        let fields: Vec<&str> = got
            .expect_err("want validation errors")
            .iter()
            .map(|error| error.field)
            .collect();
        assert_eq!(
            fields,
            vec!["title", "amount", "type", "category", "paymentMethod", "date"]
        );
    }

    #[test]
    fn zero_amount_must_be_greater_than_zero() {
        let form = TransactionForm {
            amount: "0".to_owned(),
            ..valid_form()
        };

        let got = validate_transaction_form(&form, Currency::Brl);

        assert_eq!(
            got,
            Err(vec![FieldError {
                field: "amount",
                message: validation::AMOUNT_GREATER_THAN_ZERO
            }])
        );
    }

    #[test]
    fn blank_title_is_required() {
        let form = TransactionForm {
            title: "   ".to_owned(),
            ..valid_form()
        };

        let got = validate_transaction_form(&form, Currency::Brl);

        assert_eq!(
            got,
            Err(vec![FieldError {
                field: "title",
                message: validation::TITLE_REQUIRED
            }])
        );
    }

    #[test]
    fn neutral_type_is_rejected_by_form() {
        let form = TransactionForm {
            transaction_type: "neutral".to_owned(),
            ..valid_form()
        };

        let got = validate_transaction_form(&form, Currency::Brl);

        assert_eq!(
            got,
            Err(vec![FieldError {
                field: "type",
                message: validation::TYPE_REQUIRED
            }])
        );
    }

    #[test]
    fn invalid_date_is_reported() {
        let form = TransactionForm {
            date: "28/08/2025".to_owned(),
            ..valid_form()
        };

        let got = validate_transaction_form(&form, Currency::Brl);

        assert_eq!(
            got,
            Err(vec![FieldError {
                field: "date",
                message: validation::DATE_INVALID
            }])
        );
    }

    #[test]
    fn description_is_kept_when_present() {
        let form = TransactionForm {
            description: "compras".to_owned(),
            ..valid_form()
        };

        let got = validate_transaction_form(&form, Currency::Eur).unwrap();

        assert_eq!(got.description.as_deref(), Some("compras"));
        assert_eq!(got.currency, Currency::Eur);
    }

    #[test]
    fn initial_form_has_defaults() {
        let form = TransactionForm::initial(date!(2025 - 08 - 28));

        assert_eq!(form.title, "");
        assert_eq!(form.amount, "0");
        assert_eq!(form.transaction_type, "income");
        assert_eq!(form.category, "food");
        assert_eq!(form.payment_method, "cash");
        assert_eq!(form.date, "2025-08-28");
        assert_eq!(form.description, "");
    }

    #[test]
    fn new_transaction_needs_title_and_positive_amount() {
        let new_transaction = Transaction::build(
            "",
            MonetaryAmount::ZERO,
            TransactionType::Neutral,
            date!(2025 - 08 - 28),
        );

        let errors = validate_new_transaction(&new_transaction).unwrap_err();

        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].field, "title");
        assert_eq!(errors[1].field, "amount");
    }

    #[test]
    fn neutral_new_transaction_is_accepted() {
        let new_transaction = Transaction::build(
            "Transferência",
            MonetaryAmount::from_minor_units(100),
            TransactionType::Neutral,
            date!(2025 - 08 - 28),
        );

        assert_eq!(validate_new_transaction(&new_transaction), Ok(()));
    }
}
