//! The markup of the transaction registration and edit forms.

use maud::{Markup, html};

use crate::{
    currency_input::{CurrencyInputField, currency_input},
    database_id::TransactionId,
    endpoints::{self, format_endpoint},
    html::{
        BUTTON_PRIMARY_STYLE, BUTTON_SECONDARY_STYLE, FORM_ERROR_STYLE, FORM_LABEL_STYLE,
        FORM_TEXT_INPUT_ERROR_STYLE, FORM_TEXT_INPUT_STYLE,
    },
    money::{MoneyFormat, TransactionType},
    texts::register,
    transaction::{
        core::{Category, PaymentMethod},
        validation::{FieldError, TransactionForm},
    },
};

/// Whether the form registers a new transaction or changes an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormAction {
    /// `POST` to the registration route.
    Create,
    /// `PUT` to the route of the transaction.
    Edit(TransactionId),
}

/// The complete form element.
///
/// Validation errors (422) replace the contents of the form, any other error is shown as a
/// notification.
pub fn transaction_form(
    action: FormAction,
    form: &TransactionForm,
    errors: &[FieldError],
    money_format: &MoneyFormat,
) -> Markup {
    let fields = transaction_form_fields(action, form, errors, money_format);

    match action {
        FormAction::Create => html! {
            form
                id="transaction-form"
                hx-post=(endpoints::TRANSACTIONS_VIEW)
                hx-target-422="this"
                hx-target-error="#alert-container"
                class="space-y-4"
            {
                (fields)
            }
        },
        FormAction::Edit(id) => html! {
            form
                id="transaction-form"
                hx-put=(format_endpoint(endpoints::TRANSACTION_VIEW, id))
                hx-target-422="this"
                hx-target-error="#alert-container"
                class="space-y-4"
            {
                (fields)
            }
        },
    }
}

/// The inputs and buttons inside the form, also sent back alone when validation fails.
pub fn transaction_form_fields(
    action: FormAction,
    form: &TransactionForm,
    errors: &[FieldError],
    money_format: &MoneyFormat,
) -> Markup {
    let value_field = CurrencyInputField::new(
        "value",
        "amount",
        register::VALUE,
        form.amount_or_zero(),
        money_format,
    )
    .placeholder(register::VALUE_PLACEHOLDER)
    .error(field_error(errors, "amount"));

    let type_options: Vec<(&str, &str)> = [TransactionType::Income, TransactionType::Expense]
        .into_iter()
        .map(|transaction_type| (transaction_type.as_str(), transaction_type.label()))
        .collect();
    let category_options: Vec<(&str, &str)> = Category::ALL
        .into_iter()
        .map(|category| (category.as_str(), category.label()))
        .collect();
    let payment_method_options: Vec<(&str, &str)> = PaymentMethod::ALL
        .into_iter()
        .map(|method| (method.as_str(), method.label()))
        .collect();

    html! {
        (text_field(
            "title",
            "title",
            register::TRANSACTION_TITLE,
            register::TRANSACTION_TITLE_PLACEHOLDER,
            &form.title,
            field_error(errors, "title"),
        ))

        (currency_input(&value_field))

        (select_field("type", "type", register::TYPE, &type_options, &form.transaction_type, field_error(errors, "type")))

        (select_field("category", "category", register::CATEGORY, &category_options, &form.category, field_error(errors, "category")))

        (select_field(
            "paymentMethod",
            "paymentMethod",
            register::PAYMENT_METHOD,
            &payment_method_options,
            &form.payment_method,
            field_error(errors, "paymentMethod"),
        ))

        div
        {
            label for="date" class=(FORM_LABEL_STYLE) { (register::DATE) }

            input
                id="date"
                name="date"
                type="date"
                required
                value=(form.date)
                class=(input_style(field_error(errors, "date")));

            @if let Some(error) = field_error(errors, "date") {
                p class=(FORM_ERROR_STYLE) { (error) }
            }
        }

        div
        {
            label for="description" class=(FORM_LABEL_STYLE) { (register::DESCRIPTION) }

            textarea
                id="description"
                name="description"
                rows="3"
                placeholder=(register::DESCRIPTION_PLACEHOLDER)
                class=(FORM_TEXT_INPUT_STYLE)
            {
                (form.description)
            }
        }

        div class="flex gap-4"
        {
            @if let FormAction::Edit(_) = action {
                a href=(endpoints::ROOT) class=(BUTTON_SECONDARY_STYLE) { (register::CANCEL) }
            }

            button type="submit" class=(BUTTON_PRIMARY_STYLE) { (register::SAVE) }
        }
    }
}

fn field_error(errors: &[FieldError], field: &str) -> Option<&'static str> {
    errors
        .iter()
        .find(|error| error.field == field)
        .map(|error| error.message)
}

fn input_style(error: Option<&str>) -> &'static str {
    if error.is_some() {
        FORM_TEXT_INPUT_ERROR_STYLE
    } else {
        FORM_TEXT_INPUT_STYLE
    }
}

fn text_field(
    id: &str,
    name: &str,
    label: &str,
    placeholder: &str,
    value: &str,
    error: Option<&str>,
) -> Markup {
    html! {
        div
        {
            label for=(id) class=(FORM_LABEL_STYLE) { (label) }

            input
                id=(id)
                name=(name)
                type="text"
                required
                placeholder=(placeholder)
                value=(value)
                class=(input_style(error));

            @if let Some(error) = error {
                p class=(FORM_ERROR_STYLE) { (error) }
            }
        }
    }
}

fn select_field(
    id: &str,
    name: &str,
    label: &str,
    options: &[(&str, &str)],
    selected: &str,
    error: Option<&str>,
) -> Markup {
    html! {
        div
        {
            label for=(id) class=(FORM_LABEL_STYLE) { (label) }

            select id=(id) name=(name) required class=(input_style(error))
            {
                @for (value, text) in options {
                    option value=(value) selected[*value == selected] { (text) }
                }
            }

            @if let Some(error) = error {
                p class=(FORM_ERROR_STYLE) { (error) }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use scraper::{Html, Selector};
    use time::macros::date;

    use crate::{
        html::FORM_TEXT_INPUT_ERROR_STYLE,
        money::MoneyFormat,
        test_utils::{
            assert_form_input, assert_form_submit_button_with_text, assert_hx_endpoint,
            assert_select_value, must_get_form,
        },
        texts::validation,
        transaction::{
            form::{FormAction, transaction_form},
            validation::{FieldError, TransactionForm},
        },
    };

    fn render(action: FormAction, form: &TransactionForm, errors: &[FieldError]) -> Html {
        let markup = transaction_form(action, form, errors, &MoneyFormat::default());
        Html::parse_fragment(&markup.into_string())
    }

    #[test]
    fn create_form_posts_to_transactions() {
        let html = render(
            FormAction::Create,
            &TransactionForm::initial(date!(2025 - 08 - 28)),
            &[],
        );

        let form = must_get_form(&html);
        assert_hx_endpoint(&form, "/transactions", "hx-post");
        assert_form_input(&form, "title", "text");
        assert_form_input(&form, "raw", "text");
        assert_form_input(&form, "date", "date");
        assert_form_submit_button_with_text(&form, "Salvar");
    }

    #[test]
    fn initial_values_are_selected() {
        let html = render(
            FormAction::Create,
            &TransactionForm::initial(date!(2025 - 08 - 28)),
            &[],
        );

        let form = must_get_form(&html);
        assert_select_value(&form, "type", "income");
        assert_select_value(&form, "category", "food");
        assert_select_value(&form, "paymentMethod", "cash");
    }

    #[test]
    fn edit_form_puts_to_transaction() {
        let form = TransactionForm {
            category: "health".to_owned(),
            ..TransactionForm::initial(date!(2025 - 08 - 28))
        };

        let html = render(FormAction::Edit(7), &form, &[]);

        let form = must_get_form(&html);
        assert_hx_endpoint(&form, "/transactions/7", "hx-put");
        assert_select_value(&form, "category", "health");
        let cancel = form
            .select(&Selector::parse("a").unwrap())
            .next()
            .expect("no cancel link");
        assert_eq!(cancel.value().attr("href"), Some("/"));
    }

    #[test]
    fn field_errors_are_shown_next_to_fields() {
        let errors = [
            FieldError {
                field: "title",
                message: validation::TITLE_REQUIRED,
            },
            FieldError {
                field: "amount",
                message: validation::AMOUNT_GREATER_THAN_ZERO,
            },
        ];

        let html = render(FormAction::Create, &TransactionForm::default(), &errors);

        let messages: Vec<String> = html
            .select(&Selector::parse("p.text-red-600").unwrap())
            .map(|p| p.text().collect())
            .collect();
        assert_eq!(
            messages,
            vec![validation::TITLE_REQUIRED, validation::AMOUNT_GREATER_THAN_ZERO]
        );
        let title = html
            .select(&Selector::parse("#title").unwrap())
            .next()
            .unwrap();
        assert_eq!(title.value().attr("class"), Some(FORM_TEXT_INPUT_ERROR_STYLE));
    }
}
