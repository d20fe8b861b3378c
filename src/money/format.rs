//! Renders amounts as locale formatted text.

use std::sync::OnceLock;

use numfmt::{Formatter, Precision};

use crate::{
    Error,
    money::{MINOR_UNITS_PER_MAJOR, MonetaryAmount, MoneyFormat, NumberFormat, SymbolPosition},
};

/// Format `amount` in major units as text for `currency` in `locale`.
///
/// With `show_currency` the currency symbol is placed according to the locale, otherwise only
/// the number is written. Either way the number uses the locale's digit grouping and decimal
/// separator with exactly two fraction digits.
///
/// # Errors
/// Returns [Error::UnsupportedCurrency] or [Error::UnsupportedLocale] if the currency or locale
/// is not supported.
///
/// # Examples
/// ```
/// use carteira::money::format_amount;
///
/// assert_eq!(format_amount(1000.0, "USD", "en-US", true).unwrap(), "$1,000.00");
/// assert_eq!(format_amount(1234.56, "BRL", "pt-BR", false).unwrap(), "1.234,56");
/// ```
pub fn format_amount(
    amount: f64,
    currency: &str,
    locale: &str,
    show_currency: bool,
) -> Result<String, Error> {
    let money_format = MoneyFormat::new(currency, locale)?;

    Ok(money_format.format_amount(amount, show_currency))
}

impl MoneyFormat {
    /// Format `amount` in major units, see [format_amount].
    ///
    /// The amount is rounded to the nearest minor unit before formatting.
    pub fn format_amount(&self, amount: f64, show_currency: bool) -> String {
        self.format_minor_units(MonetaryAmount::from_major_units(amount), show_currency)
    }

    /// Format an exact `amount`, see [format_amount].
    ///
    /// Negative amounts are written with a leading `-` in front of the whole text, including
    /// any currency symbol.
    pub fn format_minor_units(&self, amount: MonetaryAmount, show_currency: bool) -> String {
        let number_format = self.locale().number_format();
        let number = format_magnitude(amount.minor_units().unsigned_abs(), number_format);

        let text = if show_currency {
            let symbol = self.currency().symbol(self.locale());
            let spacing = number_format.symbol_spacing;

            match number_format.symbol_position {
                SymbolPosition::Prefix => format!("{symbol}{spacing}{number}"),
                SymbolPosition::Suffix => format!("{number}{spacing}{symbol}"),
            }
        } else {
            number
        };

        if amount.is_negative() {
            format!("-{text}")
        } else {
            text
        }
    }
}

/// Write `minor_units` as a grouped integer part, the decimal separator, and two fraction digits.
fn format_magnitude(minor_units: u64, number_format: &NumberFormat) -> String {
    let per_major = MINOR_UNITS_PER_MAJOR as u64;
    let whole = group_digits(minor_units / per_major, number_format.grouping_separator);
    let fraction = minor_units % per_major;

    format!("{whole}{}{fraction:02}", number_format.decimal_separator)
}

/// numfmt switches to scientific notation from 10^12, so larger integer parts are split here and
/// only the leading digits go through the formatter.
const GROUPED_TAIL: u64 = 1_000_000_000;

/// Write `whole` with `separator` between each group of three digits.
///
/// numfmt drops trailing zeros from fractions, so it is only given the integer part and the
/// fraction digits are written by [format_magnitude].
fn group_digits(whole: u64, separator: char) -> String {
    if whole < GROUPED_TAIL {
        return group_leading_digits(whole, separator);
    }

    let head = group_leading_digits(whole / GROUPED_TAIL, separator);
    let tail = whole % GROUPED_TAIL;

    format!(
        "{head}{separator}{:03}{separator}{:03}{separator}{:03}",
        tail / 1_000_000,
        tail / 1_000 % 1_000,
        tail % 1_000
    )
}

fn group_leading_digits(whole: u64, separator: char) -> String {
    if whole == 0 {
        return "0".to_owned();
    }

    match thousands_formatter(separator) {
        Some(formatter) => formatter.fmt_string(whole as f64),
        None => whole.to_string(),
    }
}

fn thousands_formatter(separator: char) -> Option<&'static Formatter> {
    static COMMA_FMT: OnceLock<Option<Formatter>> = OnceLock::new();
    static PERIOD_FMT: OnceLock<Option<Formatter>> = OnceLock::new();

    let cell = match separator {
        ',' => &COMMA_FMT,
        '.' => &PERIOD_FMT,
        _ => {
            tracing::warn!("no digit grouping formatter for the separator {separator:?}");
            return None;
        }
    };

    cell.get_or_init(|| match Formatter::new().separator(separator) {
        Ok(formatter) => Some(formatter.precision(Precision::Decimals(0))),
        Err(error) => {
            tracing::error!("could not create formatter with separator {separator:?}: {error:?}");
            None
        }
    })
    .as_ref()
}
