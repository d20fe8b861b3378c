//! Turns the text typed into a currency field into an amount and the text to show in its place.

use serde::Serialize;

use crate::money::{MonetaryAmount, MoneyFormat};

/// The most digits kept from a currency field.
///
/// When more digits are typed, only the right-most (most recently typed) ones are kept. Fifteen
/// digits keeps every amount exactly representable as both an `i64` and an `f64`.
pub const MAX_INPUT_DIGITS: usize = 15;

/// The result of reading a currency field after a keystroke.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParsedInput {
    /// The amount in minor units, e.g. 12345 for 123.45.
    pub amount: MonetaryAmount,
    /// The formatted amount, with the currency symbol, to put back into the field.
    pub display_text: String,
}

/// Read the `raw` text of a currency field formatted with `money_format`.
///
/// Every character that is not an ASCII digit is dropped, including separators, currency
/// symbols and signs. The remaining digits are the amount in minor units, so the last two
/// digits typed are always the cents. For example "1.234.567,89" is 123456789 minor units and
/// "123,456" is 123456 minor units (1,234.56), regardless of where the separator was typed.
///
/// Text without digits is zero. This never fails: any text results in a valid amount.
///
/// # Examples
/// ```
/// use carteira::money::{Locale, MoneyFormat, parse_monetary_input};
///
/// let parsed = parse_monetary_input("R$ 1.500,00", &MoneyFormat::for_locale(Locale::PtBr));
///
/// assert_eq!(parsed.amount.minor_units(), 150000);
/// assert_eq!(parsed.display_text, "R$\u{a0}1.500,00");
/// ```
pub fn parse_monetary_input(raw: &str, money_format: &MoneyFormat) -> ParsedInput {
    let digits: Vec<u8> = raw
        .bytes()
        .filter(u8::is_ascii_digit)
        .map(|digit| digit - b'0')
        .collect();

    let kept = &digits[digits.len().saturating_sub(MAX_INPUT_DIGITS)..];

    if kept.len() < digits.len() {
        tracing::debug!(
            "currency input had {} digits, keeping the last {MAX_INPUT_DIGITS}",
            digits.len()
        );
    }

    let minor_units = kept
        .iter()
        .fold(0i64, |total, &digit| total * 10 + i64::from(digit));
    let amount = MonetaryAmount::from_minor_units(minor_units);

    ParsedInput {
        amount,
        display_text: money_format.format_minor_units(amount, true),
    }
}

impl MoneyFormat {
    /// Read the raw text of a currency field, see [parse_monetary_input].
    pub fn parse_input(&self, raw: &str) -> ParsedInput {
        parse_monetary_input(raw, self)
    }
}

#[cfg(test)]
mod tests {
    use crate::money::{
        Currency, Locale, MAX_INPUT_DIGITS, MonetaryAmount, MoneyFormat, parse_monetary_input,
    };

    fn parse_minor_units(raw: &str) -> i64 {
        parse_monetary_input(raw, &MoneyFormat::default())
            .amount
            .minor_units()
    }

    #[test]
    fn empty_input_is_zero() {
        let got = parse_monetary_input("", &MoneyFormat::default());

        assert_eq!(got.amount, MonetaryAmount::ZERO);
        assert_eq!(got.display_text, "R$\u{a0}0,00");
    }

    #[test]
    fn zero_is_the_same_however_it_is_typed() {
        assert_eq!(parse_minor_units(""), 0);
        assert_eq!(parse_minor_units("0"), 0);
        assert_eq!(parse_minor_units("0,00"), 0);
        assert_eq!(parse_minor_units("R$ 0,00"), 0);
    }

    #[test]
    fn text_without_digits_is_zero() {
        assert_eq!(parse_minor_units("abc"), 0);
        assert_eq!(parse_minor_units("R$ ,."), 0);
        assert_eq!(parse_minor_units("-"), 0);
    }

    #[test]
    fn leading_zeros_are_ignored() {
        assert_eq!(parse_minor_units("00012345"), 12345);
        assert_eq!(parse_minor_units("12345"), 12345);
    }

    #[test]
    fn digits_are_minor_units() {
        let got = parse_monetary_input("123", &MoneyFormat::default());

        assert_eq!(got.amount.minor_units(), 123);
        assert_eq!(got.amount.to_major_units(), 1.23);
        assert_eq!(got.display_text, "R$\u{a0}1,23");
    }

    #[test]
    fn separator_then_digits_is_cents() {
        assert_eq!(parse_minor_units(",50"), 50);
    }

    #[test]
    fn all_separators_are_dropped() {
        assert_eq!(parse_minor_units("1.234.567,89"), 123456789);
        assert_eq!(parse_minor_units("1,234,567.89"), 123456789);
    }

    #[test]
    fn separator_position_does_not_move_the_decimal_point() {
        let got = parse_monetary_input("123,456", &MoneyFormat::default());

        assert_eq!(got.amount.minor_units(), 123456);
        assert_eq!(got.display_text, "R$\u{a0}1.234,56");
    }

    #[test]
    fn minus_sign_is_dropped() {
        assert_eq!(parse_minor_units("-500"), 500);
    }

    #[test]
    fn non_ascii_digits_are_dropped() {
        assert_eq!(parse_minor_units("١٢٣45"), 45);
    }

    #[test]
    fn keeps_the_most_recently_typed_digits() {
        let raw = "9876543210123456789";

        let got = parse_minor_units(raw);

        assert_eq!(got, 543_210_123_456_789);
        assert_eq!(got.to_string().len(), MAX_INPUT_DIGITS);
    }

    #[test]
    fn accepts_exactly_the_maximum_number_of_digits() {
        let raw = "9".repeat(MAX_INPUT_DIGITS);

        assert_eq!(parse_minor_units(&raw), 999_999_999_999_999);
    }

    #[test]
    fn typing_one_more_digit_shifts_the_amount() {
        let money_format = MoneyFormat::for_locale(Locale::EnUs);

        let first = money_format.parse_input("1");
        let second = money_format.parse_input(&format!("{}5", first.display_text));
        let third = money_format.parse_input(&format!("{}0", second.display_text));

        assert_eq!(first.display_text, "$0.01");
        assert_eq!(second.display_text, "$0.15");
        assert_eq!(third.display_text, "$1.50");
    }

    #[test]
    fn deleting_the_last_digit_shifts_the_amount_back() {
        let money_format = MoneyFormat::for_locale(Locale::DeDe);

        let got = money_format.parse_input("1.234,5");

        assert_eq!(got.amount.minor_units(), 12345);
        assert_eq!(got.display_text, "123,45\u{a0}€");
    }

    #[test]
    fn formatted_amount_parses_to_the_same_amount() {
        let amounts = [
            0,
            1,
            10,
            99,
            100,
            12345,
            150000,
            123456789,
            999_999_999_999_999,
        ];

        for locale in Locale::ALL {
            for currency in Currency::ALL {
                let money_format = MoneyFormat::from_parts(currency, locale);

                for minor_units in amounts {
                    let major_units = minor_units as f64 / 100.0;
                    let text = money_format.format_amount(major_units, true);

                    let got = money_format.parse_input(&text).amount.minor_units();

                    assert_eq!(
                        got, minor_units,
                        "want {text:?} ({currency}/{locale}) to parse as {minor_units}, got {got}"
                    );
                }
            }
        }
    }

    #[test]
    fn display_text_parses_to_the_same_amount() {
        let money_format = MoneyFormat::for_locale(Locale::EnGb);
        let first = money_format.parse_input("£12,345.67");

        let second = money_format.parse_input(&first.display_text);

        assert_eq!(first, second);
    }
}
