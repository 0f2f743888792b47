//! Display formatting for evaluated formula results
//!
//! Numbers are rendered in the product locale (ru-RU: comma decimal
//! separator, space-grouped thousands) with a fixed count of fractional
//! digits, then decorated according to the formula's output type.

use gridcol_core::{Currency, OutputType};

/// Decimal and grouping separators of a display locale
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumberLocale {
    pub decimal_sep: char,
    pub thousands_sep: char,
}

impl NumberLocale {
    /// The single locale the product renders numbers in
    pub fn ru_ru() -> Self {
        Self {
            decimal_sep: ',',
            thousands_sep: ' ',
        }
    }
}

impl Default for NumberLocale {
    fn default() -> Self {
        Self::ru_ru()
    }
}

/// Format a number with grouped thousands and exactly `precision`
/// fractional digits
///
/// # Example
/// ```rust
/// use gridcol_formula::{format_number, NumberLocale};
///
/// let locale = NumberLocale::ru_ru();
/// assert_eq!(format_number(135045.0, 2, &locale), "135 045,00");
/// assert_eq!(format_number(-1234.5, 1, &locale), "-1 234,5");
/// ```
pub fn format_number(value: f64, precision: u8, locale: &NumberLocale) -> String {
    let prec = precision as usize;
    let fixed = format!("{value:.prec$}");

    let (sign, unsigned) = match fixed.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", fixed.as_str()),
    };

    let (int_part, frac_part) = match unsigned.split_once('.') {
        Some((int, frac)) => (int, Some(frac)),
        None => (unsigned, None),
    };

    let mut out = String::with_capacity(fixed.len() + int_part.len() / 3);
    out.push_str(sign);
    out.push_str(&group_thousands(int_part, locale.thousands_sep));
    if let Some(frac) = frac_part {
        out.push(locale.decimal_sep);
        out.push_str(frac);
    }

    out
}

/// Apply output-type decoration to an already rounded numeric result
pub fn format_output(
    value: f64,
    precision: u8,
    output_type: OutputType,
    currency: Option<&Currency>,
    locale: &NumberLocale,
) -> String {
    let number = format_number(value, precision, locale);
    match output_type {
        OutputType::Number => number,
        OutputType::Percent => format!("{number}%"),
        OutputType::Currency => {
            let symbol = currency.unwrap_or(&Currency::Rub).symbol();
            format!("{number} {symbol}")
        }
    }
}

fn group_thousands(int_part: &str, sep: char) -> String {
    let len = int_part.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in int_part.chars().enumerate() {
        let pos_from_end = len - i;
        out.push(ch);
        if pos_from_end > 1 && pos_from_end % 3 == 1 {
            out.push(sep);
        }
    }
    out
}
