//! The dashboard at the top of the home page: balance, income and expense totals.

use maud::{Markup, html};

use crate::{
    html::card_container,
    money::{MonetaryAmount, MoneyFormat, TransactionType},
    texts::dashboard,
    transaction::{Category, Transaction},
};

/// Totals over every registered transaction.
///
/// Amounts are summed as stored, whatever currency they were registered in.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DashboardSummary {
    /// The sum of all income.
    pub income: MonetaryAmount,
    /// The sum of all expenses, as a positive amount.
    pub expenses: MonetaryAmount,
    /// Income minus expenses.
    pub balance: MonetaryAmount,
}

impl DashboardSummary {
    /// Add up `transactions`. Neutral transactions are not counted.
    pub fn from_transactions(transactions: &[Transaction]) -> Self {
        let mut income = MonetaryAmount::ZERO;
        let mut expenses = MonetaryAmount::ZERO;

        for transaction in transactions {
            match transaction.transaction_type {
                TransactionType::Income => income += transaction.amount.abs(),
                TransactionType::Expense => expenses += transaction.amount.abs(),
                TransactionType::Neutral => {}
            }
        }

        Self {
            income,
            expenses,
            balance: income - expenses,
        }
    }
}

/// The total spent in one category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryExpense {
    pub category: Category,
    pub total: MonetaryAmount,
}

/// The expense total of each category that has expenses, largest first.
///
/// Categories with equal totals keep the order of [Category::ALL].
pub fn expenses_by_category(transactions: &[Transaction]) -> Vec<CategoryExpense> {
    let mut totals: Vec<CategoryExpense> = Category::ALL
        .into_iter()
        .map(|category| CategoryExpense {
            category,
            total: transactions
                .iter()
                .filter(|transaction| {
                    transaction.transaction_type == TransactionType::Expense
                        && transaction.category == category
                })
                .map(|transaction| transaction.amount.abs())
                .sum(),
        })
        .filter(|expense| !expense.total.is_zero())
        .collect();

    totals.sort_by(|a, b| b.total.cmp(&a.total));

    totals
}

/// The colour scheme of an info card.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum CardVariant {
    #[default]
    Primary,
    Success,
    Danger,
    Warning,
    Info,
}

impl CardVariant {
    /// The background and left border of the card.
    pub fn container_class(self) -> &'static str {
        match self {
            CardVariant::Primary => "bg-blue-50 border-l-blue-500",
            CardVariant::Success => "bg-green-50 border-l-green-500",
            CardVariant::Danger => "bg-red-50 border-l-red-500",
            CardVariant::Warning => "bg-yellow-50 border-l-yellow-500",
            CardVariant::Info => "bg-cyan-50 border-l-cyan-500",
        }
    }

    pub fn title_class(self) -> &'static str {
        match self {
            CardVariant::Primary => "text-blue-700",
            CardVariant::Success => "text-green-700",
            CardVariant::Danger => "text-red-700",
            CardVariant::Warning => "text-yellow-700",
            CardVariant::Info => "text-cyan-700",
        }
    }

    pub fn value_class(self) -> &'static str {
        match self {
            CardVariant::Primary => "text-blue-900",
            CardVariant::Success => "text-green-900",
            CardVariant::Danger => "text-red-900",
            CardVariant::Warning => "text-yellow-900",
            CardVariant::Info => "text-cyan-900",
        }
    }
}

/// What an info card shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardValue<'a> {
    /// An amount, formatted with the configured currency.
    Amount(MonetaryAmount),
    /// Literal text, e.g. "N/A".
    Text(&'a str),
}

/// A small card with a title and a single value, the CardInfo component.
pub fn card_info(
    title: &str,
    value: CardValue<'_>,
    variant: CardVariant,
    money_format: &MoneyFormat,
) -> Markup {
    let value = match value {
        CardValue::Amount(amount) => money_format.format_minor_units(amount, true),
        CardValue::Text(text) => text.to_owned(),
    };

    html! {
        div class={ "p-4 rounded-lg border-l-4 shadow-sm " (variant.container_class()) }
        {
            p class={ "text-sm font-medium " (variant.title_class()) } { (title) }
            p class={ "mt-1 text-2xl font-bold " (variant.value_class()) } { (value) }
        }
    }
}

/// The summary cards followed by the expenses of each category.
pub fn dashboard_view(transactions: &[Transaction], money_format: &MoneyFormat) -> Markup {
    let summary = DashboardSummary::from_transactions(transactions);
    let by_category = expenses_by_category(transactions);

    let categories = html! {
        @if by_category.is_empty() {
            p class="text-sm text-gray-500 dark:text-gray-400" { (dashboard::NO_EXPENSES) }
        } @else {
            ul class="space-y-2"
            {
                @for expense in &by_category {
                    li class="flex justify-between text-sm"
                    {
                        span { (expense.category.label()) }
                        span class="font-medium" { (money_format.format_minor_units(expense.total, true)) }
                    }
                }
            }
        }
    };

    html! {
        section id="dashboard" class="flex flex-col gap-4"
        {
            div class="grid grid-cols-1 gap-4 md:grid-cols-3"
            {
                (card_info(dashboard::CURRENT_BALANCE, CardValue::Amount(summary.balance), CardVariant::Info, money_format))
                (card_info(dashboard::INCOME, CardValue::Amount(summary.income), CardVariant::Success, money_format))
                (card_info(dashboard::EXPENSES, CardValue::Amount(summary.expenses), CardVariant::Danger, money_format))
            }

            (card_container(Some(dashboard::EXPENSES_BY_CATEGORY), &categories))
        }
    }
}
