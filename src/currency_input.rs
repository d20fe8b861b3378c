//! The live currency field: a text input that is reformatted on every keystroke.
//!
//! The visible input holds the formatted text, e.g. "R$ 1.234,56", and a hidden input next to
//! it holds the amount in minor units, which is what forms submit.

use axum::{
    extract::{FromRef, State},
    response::{Html, IntoResponse, Response},
};
use axum_extra::extract::Form;
use maud::{Markup, html};
use serde::Deserialize;
use serde_json::json;

use crate::{
    AppState, endpoints,
    html::{FORM_ERROR_STYLE, FORM_LABEL_STYLE, FORM_TEXT_INPUT_ERROR_STYLE, FORM_TEXT_INPUT_STYLE},
    money::{Currency, MonetaryAmount, MoneyFormat},
};

/// Everything needed to render a currency field.
#[derive(Debug, Clone, PartialEq)]
pub struct CurrencyInputField<'a> {
    /// The id of the visible input.
    pub id: &'a str,
    /// The form name of the hidden minor-unit input.
    pub name: &'a str,
    pub label: &'a str,
    pub placeholder: &'a str,
    pub error: Option<&'a str>,
    /// The formatted text shown in the visible input.
    pub display_text: String,
    /// The value submitted with the form.
    pub amount: MonetaryAmount,
    /// The currency the display text is written in, sent back on each keystroke.
    pub currency: Currency,
}

impl<'a> CurrencyInputField<'a> {
    /// A field showing `amount`. Zero is shown as an empty input so the placeholder is visible.
    pub fn new(
        id: &'a str,
        name: &'a str,
        label: &'a str,
        amount: MonetaryAmount,
        money_format: &MoneyFormat,
    ) -> Self {
        let display_text = if amount.is_zero() {
            String::new()
        } else {
            money_format.format_minor_units(amount, true)
        };

        Self {
            id,
            name,
            label,
            placeholder: "",
            error: None,
            display_text,
            amount,
            currency: money_format.currency(),
        }
    }

    /// A field initialised from an amount in major units, e.g. `12.34`.
    pub fn from_major_units(
        id: &'a str,
        name: &'a str,
        label: &'a str,
        value: f64,
        money_format: &MoneyFormat,
    ) -> Self {
        let mut field = Self::new(
            id,
            name,
            label,
            MonetaryAmount::from_major_units(value),
            money_format,
        );

        if value != 0.0 {
            field.display_text = money_format.format_amount(value, true);
        }

        field
    }

    /// Set the placeholder.
    pub fn placeholder(mut self, placeholder: &'a str) -> Self {
        self.placeholder = placeholder;
        self
    }

    /// Set the error message shown under the input.
    pub fn error(mut self, error: Option<&'a str>) -> Self {
        self.error = error;
        self
    }
}

/// Render a currency field.
///
/// Each keystroke posts the visible text to the reformatting endpoint, which responds with the
/// whole field rendered again.
pub fn currency_input(field: &CurrencyInputField<'_>) -> Markup {
    let container_id = format!("{}-field", field.id);
    let hx_vals = json!({
        "id": field.id,
        "name": field.name,
        "label": field.label,
        "placeholder": field.placeholder,
        "currency": field.currency,
    })
    .to_string();
    let input_style = if field.error.is_some() {
        FORM_TEXT_INPUT_ERROR_STYLE
    } else {
        FORM_TEXT_INPUT_STYLE
    };

    html! {
        div id=(container_id)
        {
            label for=(field.id) class=(FORM_LABEL_STYLE) { (field.label) }

            input
                id=(field.id)
                name="raw"
                type="text"
                inputmode="numeric"
                autocomplete="off"
                required
                placeholder=(field.placeholder)
                value=(field.display_text)
                hx-post=(endpoints::MONEY_INPUT_API)
                hx-trigger="keyup changed"
                hx-sync="this:replace"
                hx-target={ "#" (container_id) }
                hx-swap="outerHTML"
                hx-vals=(hx_vals)
                class=(input_style);

            input type="hidden" name=(field.name) value=(field.amount.minor_units());

            @if let Some(error) = field.error {
                p class=(FORM_ERROR_STYLE) { (error) }
            }
        }
    }
}

/// The data posted by a currency field on each keystroke.
#[derive(Debug, Deserialize)]
pub struct CurrencyInputForm {
    /// The text in the visible input, including any formatting from the last render.
    #[serde(default)]
    pub raw: String,
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub placeholder: String,
    /// The currency of the field, the configured currency when missing.
    #[serde(default)]
    pub currency: Option<Currency>,
}

impl FromRef<AppState> for MoneyFormat {
    fn from_ref(state: &AppState) -> Self {
        state.money_format
    }
}

/// A route handler that reformats a currency field after a keystroke.
pub async fn currency_input_endpoint(
    State(money_format): State<MoneyFormat>,
    Form(form): Form<CurrencyInputForm>,
) -> Response {
    let money_format = match form.currency {
        Some(currency) => money_format.with_currency(currency),
        None => money_format,
    };
    let parsed = money_format.parse_input(&form.raw);

    let field = CurrencyInputField {
        id: &form.id,
        name: &form.name,
        label: &form.label,
        placeholder: &form.placeholder,
        error: None,
        display_text: parsed.display_text,
        amount: parsed.amount,
        currency: money_format.currency(),
    };

    Html(currency_input(&field).into_string()).into_response()
}
