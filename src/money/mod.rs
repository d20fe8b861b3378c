//! Monetary amounts and their locale-aware parsing and formatting.
//!
//! Amounts are held as an integer count of minor units (cents) in [MonetaryAmount]. Text typed
//! into a currency field is turned into an amount by [parse_monetary_input], and amounts are
//! turned back into text by [format_amount] and [format_signed_transaction_amount].
//!
//! Everything in this module is a pure function of its inputs. The only fallible step is
//! resolving a currency code and locale tag into a [MoneyFormat], which should be done once at
//! start up so that an unsupported pair is reported before any input is processed.

mod format;
mod input;
mod locale;
mod signed;

use std::{
    iter::Sum,
    ops::{Add, AddAssign, Sub},
};

use serde::{Deserialize, Serialize};

use crate::Error;

pub use format::format_amount;
pub use input::{MAX_INPUT_DIGITS, ParsedInput, parse_monetary_input};
pub use locale::{Currency, Locale, NumberFormat, SymbolPosition};
pub use signed::{SignedAmount, TransactionType, format_signed_transaction_amount};

/// The number of minor units in one major unit for every supported currency.
pub const MINOR_UNITS_PER_MAJOR: i64 = 100;

/// An amount of money as a whole number of minor currency units, e.g. cents.
///
/// Negative amounts are allowed. The amount never has a fractional part, so sums of amounts
/// are exact.
#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct MonetaryAmount(i64);

impl MonetaryAmount {
    /// The amount zero.
    pub const ZERO: MonetaryAmount = MonetaryAmount(0);

    /// Create an amount from a count of minor units, e.g. `12345` for 123.45.
    pub const fn from_minor_units(minor_units: i64) -> Self {
        Self(minor_units)
    }

    /// Create an amount from a value in major units, e.g. `123.45`.
    ///
    /// The value is rounded to the nearest minor unit. NaN is treated as zero and infinite
    /// values saturate.
    pub fn from_major_units(major_units: f64) -> Self {
        Self((major_units * MINOR_UNITS_PER_MAJOR as f64).round() as i64)
    }

    /// The amount as a count of minor units.
    pub const fn minor_units(self) -> i64 {
        self.0
    }

    /// The amount in major units, e.g. `123.45` for 12345 minor units.
    pub fn to_major_units(self) -> f64 {
        self.0 as f64 / MINOR_UNITS_PER_MAJOR as f64
    }

    /// The magnitude of the amount.
    pub const fn abs(self) -> Self {
        Self(self.0.saturating_abs())
    }

    /// Whether the amount is zero.
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Whether the amount is strictly greater than zero.
    pub const fn is_positive(self) -> bool {
        self.0 > 0
    }

    /// Whether the amount is strictly less than zero.
    pub const fn is_negative(self) -> bool {
        self.0 < 0
    }
}

impl Add for MonetaryAmount {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }
}

impl AddAssign for MonetaryAmount {
    fn add_assign(&mut self, other: Self) {
        *self = *self + other;
    }
}

impl Sub for MonetaryAmount {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self(self.0.saturating_sub(other.0))
    }
}

impl Sum for MonetaryAmount {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

/// A currency and the locale whose conventions are used to write amounts of it.
///
/// This is the configured formatting context for currency fields and amount displays.
/// Create it with [MoneyFormat::new] to resolve user supplied codes, or
/// [MoneyFormat::from_parts] when the currency and locale are already known.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MoneyFormat {
    currency: Currency,
    locale: Locale,
}

impl MoneyFormat {
    /// Resolve an ISO 4217 `currency` code and a BCP-47 `locale` tag.
    ///
    /// # Errors
    /// Returns [Error::UnsupportedCurrency] or [Error::UnsupportedLocale] if either is not one
    /// of the supported values.
    pub fn new(currency: &str, locale: &str) -> Result<Self, Error> {
        Ok(Self {
            currency: currency.parse()?,
            locale: locale.parse()?,
        })
    }

    /// Create a format from an already resolved currency and locale.
    pub const fn from_parts(currency: Currency, locale: Locale) -> Self {
        Self { currency, locale }
    }

    /// The format for `locale` and the currency used in its region.
    pub fn for_locale(locale: Locale) -> Self {
        Self::from_parts(locale.home_currency(), locale)
    }

    /// The currency amounts are formatted in.
    pub const fn currency(&self) -> Currency {
        self.currency
    }

    /// The locale whose conventions are used.
    pub const fn locale(&self) -> Locale {
        self.locale
    }

    /// The same locale formatting a different currency.
    ///
    /// Used to display stored amounts that carry their own currency.
    pub const fn with_currency(self, currency: Currency) -> Self {
        Self {
            currency,
            locale: self.locale,
        }
    }
}

impl Default for MoneyFormat {
    fn default() -> Self {
        Self::for_locale(Locale::PtBr)
    }
}
