//! Number Formatting
//!
//! Locale-aware decimal and grouping separators for numbers rendered into
//! messages.

use crate::Locale;

/// Number formatting configuration.
#[derive(Debug, Clone)]
pub struct NumberFormatter {
    /// Minimum fraction digits
    pub min_fraction_digits: usize,
    /// Maximum fraction digits
    pub max_fraction_digits: usize,
    /// Use grouping separators
    pub use_grouping: bool,
}

impl Default for NumberFormatter {
    fn default() -> Self {
        Self {
            min_fraction_digits: 0,
            max_fraction_digits: 3,
            use_grouping: true,
        }
    }
}

impl NumberFormatter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn min_fraction_digits(mut self, digits: usize) -> Self {
        self.min_fraction_digits = digits;
        self
    }

    pub fn max_fraction_digits(mut self, digits: usize) -> Self {
        self.max_fraction_digits = digits;
        self
    }

    pub fn use_grouping(mut self, use_grouping: bool) -> Self {
        self.use_grouping = use_grouping;
        self
    }

    /// Format a floating point number for the given locale.
    ///
    /// Rounds to `max_fraction_digits`, then drops trailing zeros down to
    /// `min_fraction_digits`. Non-finite values use their plain spelling.
    pub fn format(&self, n: f64, locale: &Locale) -> String {
        if !n.is_finite() {
            return n.to_string();
        }

        let digits = self.max_fraction_digits.max(self.min_fraction_digits);
        let formatted = format!("{:.1$}", n.abs(), digits);
        let (integer_part, fraction_part) = match formatted.split_once('.') {
            Some((int, frac)) => (int, frac),
            None => (formatted.as_str(), ""),
        };

        let mut fraction = fraction_part.trim_end_matches('0');
        if fraction.len() < self.min_fraction_digits {
            fraction = &fraction_part[..self.min_fraction_digits];
        }

        let negative = n < 0.0 && (integer_part.bytes().any(|b| b != b'0') || !fraction.is_empty());
        self.assemble(negative, integer_part, fraction, locale)
    }

    /// Format an integer for the given locale without going through `f64`.
    pub fn format_integer(&self, n: i128, locale: &Locale) -> String {
        let digits = n.unsigned_abs().to_string();
        let zeros = "0".repeat(self.min_fraction_digits);
        self.assemble(n < 0, &digits, &zeros, locale)
    }

    fn assemble(&self, negative: bool, integer: &str, fraction: &str, locale: &Locale) -> String {
        let (decimal_sep, group_sep) = number_separators(locale);

        let mut out = String::with_capacity(integer.len() + fraction.len() + 8);
        if negative {
            out.push('-');
        }
        if self.use_grouping {
            out.push_str(&add_grouping(integer, group_sep));
        } else {
            out.push_str(integer);
        }
        if !fraction.is_empty() {
            out.push_str(decimal_sep);
            out.push_str(fraction);
        }
        out
    }
}

/// Format a number for a locale with up to three fraction digits.
///
/// # Example
///
/// ```
/// use arbiter_i18n::{format_number, Locale};
///
/// assert_eq!(format_number(1234567.891, &Locale::en()), "1,234,567.891");
/// assert_eq!(format_number(1234567.891, &Locale::pt_br()), "1.234.567,891");
/// assert_eq!(format_number(2.50, &Locale::pt_br()), "2,5");
/// ```
pub fn format_number(n: f64, locale: &Locale) -> String {
    NumberFormatter::default().format(n, locale)
}

/// Format an integer for a locale.
///
/// ```
/// use arbiter_i18n::{format_integer, Locale};
///
/// assert_eq!(format_integer(-10_000, &Locale::en()), "-10,000");
/// assert_eq!(format_integer(10_000, &Locale::pt_br()), "10.000");
/// ```
pub fn format_integer(n: i128, locale: &Locale) -> String {
    NumberFormatter::default().format_integer(n, locale)
}

/// Decimal and grouping separators for a locale.
///
/// The root locale uses the English separators.
pub fn number_separators(locale: &Locale) -> (&'static str, &'static str) {
    match locale.language.as_str() {
        // Comma decimal, period grouping
        "de" | "es" | "it" | "pt" | "nl" | "da" | "no" | "pl" | "ro" | "el" | "tr" | "id"
        | "vi" => (",", "."),

        // Comma decimal, space grouping
        "fr" | "sv" | "fi" | "cs" | "sk" | "hu" | "bg" | "ru" | "uk" => (",", "\u{a0}"),

        _ => (".", ","),
    }
}

/// Add grouping separators to a string of ASCII digits.
fn add_grouping(digits: &str, sep: &str) -> String {
    let len = digits.len();
    if len <= 3 {
        return digits.to_string();
    }

    let mut result = String::with_capacity(len + (len - 1) / 3 * sep.len());
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            result.push_str(sep);
        }
        result.push(c);
    }
    result
}
