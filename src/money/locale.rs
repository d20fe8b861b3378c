//! The supported locales and currencies, and the number formatting conventions of each locale.
//!
//! Formatting rules are looked up from static [NumberFormat] records instead of being spread
//! across the formatting code, so adding a locale means adding a record and a [Locale] variant.

use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::Error;

/// A BCP-47 locale tag supported by the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Locale {
    /// Brazilian Portuguese, e.g. `R$ 1.500,00`.
    #[serde(rename = "pt-BR")]
    PtBr,
    /// American English, e.g. `$1,500.00`.
    #[serde(rename = "en-US")]
    EnUs,
    /// German (Germany), e.g. `1.500,00 €`.
    #[serde(rename = "de-DE")]
    DeDe,
    /// British English, e.g. `£1,500.00`.
    #[serde(rename = "en-GB")]
    EnGb,
}

impl Locale {
    /// Every supported locale.
    pub const ALL: [Locale; 4] = [Locale::PtBr, Locale::EnUs, Locale::DeDe, Locale::EnGb];

    /// The canonical BCP-47 tag, e.g. "pt-BR".
    pub fn tag(self) -> &'static str {
        match self {
            Locale::PtBr => "pt-BR",
            Locale::EnUs => "en-US",
            Locale::DeDe => "de-DE",
            Locale::EnGb => "en-GB",
        }
    }

    /// The currency used in the locale's region.
    pub fn home_currency(self) -> Currency {
        match self {
            Locale::PtBr => Currency::Brl,
            Locale::EnUs => Currency::Usd,
            Locale::DeDe => Currency::Eur,
            Locale::EnGb => Currency::Gbp,
        }
    }

    /// The grouping, decimal and currency symbol conventions for the locale.
    pub fn number_format(self) -> &'static NumberFormat {
        match self {
            Locale::PtBr => &PT_BR,
            Locale::EnUs => &EN_US,
            Locale::DeDe => &DE_DE,
            Locale::EnGb => &EN_GB,
        }
    }
}

impl FromStr for Locale {
    type Err = Error;

    /// Parse a locale tag such as "pt-BR".
    ///
    /// Matching ignores case and accepts an underscore in place of the hyphen, so "pt_br" is
    /// also understood as "pt-BR".
    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        let normalized = tag.trim().replace('_', "-");

        Locale::ALL
            .into_iter()
            .find(|locale| locale.tag().eq_ignore_ascii_case(&normalized))
            .ok_or_else(|| Error::UnsupportedLocale(tag.to_owned()))
    }
}

impl Display for Locale {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.tag())
    }
}

/// An ISO 4217 currency supported by the application.
///
/// All supported currencies have 100 minor units per major unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Currency {
    /// Brazilian real.
    #[serde(rename = "BRL")]
    Brl,
    /// United States dollar.
    #[serde(rename = "USD")]
    Usd,
    /// Euro.
    #[serde(rename = "EUR")]
    Eur,
    /// Pound sterling.
    #[serde(rename = "GBP")]
    Gbp,
}

impl Currency {
    /// Every supported currency.
    pub const ALL: [Currency; 4] = [Currency::Brl, Currency::Usd, Currency::Eur, Currency::Gbp];

    /// The three letter ISO 4217 code, e.g. "BRL".
    pub fn code(self) -> &'static str {
        match self {
            Currency::Brl => "BRL",
            Currency::Usd => "USD",
            Currency::Eur => "EUR",
            Currency::Gbp => "GBP",
        }
    }

    /// The symbol used for this currency when formatting for `locale`.
    ///
    /// A locale uses the short symbol for its own currency. The dollar is written "US$" in
    /// locales where "$" alone would be ambiguous or refer to another currency.
    pub fn symbol(self, locale: Locale) -> &'static str {
        match (self, locale) {
            (Currency::Usd, Locale::PtBr | Locale::EnGb) => "US$",
            (Currency::Usd, Locale::EnUs | Locale::DeDe) => "$",
            (Currency::Brl, _) => "R$",
            (Currency::Eur, _) => "€",
            (Currency::Gbp, _) => "£",
        }
    }
}

impl FromStr for Currency {
    type Err = Error;

    /// Parse an ISO 4217 code, ignoring case.
    fn from_str(code: &str) -> Result<Self, Self::Err> {
        let code = code.trim();

        Currency::ALL
            .into_iter()
            .find(|currency| currency.code().eq_ignore_ascii_case(code))
            .ok_or_else(|| Error::UnsupportedCurrency(code.to_owned()))
    }
}

impl Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

/// Where the currency symbol goes relative to the number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolPosition {
    /// Before the number, e.g. `$1.00`.
    Prefix,
    /// After the number, e.g. `1,00 €`.
    Suffix,
}

/// The conventions a locale uses to write numbers and currency amounts.
#[derive(Debug, PartialEq, Eq)]
pub struct NumberFormat {
    /// Separates groups of three digits in the integer part.
    pub grouping_separator: char,
    /// Separates the integer part from the fraction digits.
    pub decimal_separator: char,
    /// Which side of the number the currency symbol is placed on.
    pub symbol_position: SymbolPosition,
    /// Text placed between the currency symbol and the number.
    pub symbol_spacing: &'static str,
}

const NO_BREAK_SPACE: &str = "\u{a0}";

const PT_BR: NumberFormat = NumberFormat {
    grouping_separator: '.',
    decimal_separator: ',',
    symbol_position: SymbolPosition::Prefix,
    symbol_spacing: NO_BREAK_SPACE,
};

const EN_US: NumberFormat = NumberFormat {
    grouping_separator: ',',
    decimal_separator: '.',
    symbol_position: SymbolPosition::Prefix,
    symbol_spacing: "",
};

const DE_DE: NumberFormat = NumberFormat {
    grouping_separator: '.',
    decimal_separator: ',',
    symbol_position: SymbolPosition::Suffix,
    symbol_spacing: NO_BREAK_SPACE,
};

const EN_GB: NumberFormat = NumberFormat {
    grouping_separator: ',',
    decimal_separator: '.',
    symbol_position: SymbolPosition::Prefix,
    symbol_spacing: "",
};
