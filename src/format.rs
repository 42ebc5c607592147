//! Number formatting for human-readable output.

use std::sync::OnceLock;

use numfmt::{Formatter, Precision};

/// Format `number` as dollars and cents, e.g. "$1,234.50" or "-$3.00".
///
/// Amounts are rounded to the nearest cent first, so anything smaller than
/// half a cent is "$0.00".
pub fn format_currency(number: f64) -> String {
    static DOLLARS_FMT: OnceLock<Formatter> = OnceLock::new();

    let cents = (number.abs() * 100.0).round();
    if cents == 0.0 {
        return "$0.00".to_owned();
    }

    let dollars = (cents / 100.0).trunc();
    let remainder = cents - dollars * 100.0;
    let sign = if number < 0.0 { "-" } else { "" };

    let dollars = if dollars == 0.0 {
        // numfmt renders zero as a bare "0"
        "$0".to_owned()
    } else {
        DOLLARS_FMT
            .get_or_init(|| currency_formatter("$", 0))
            .fmt_string(dollars)
    };

    format!("{sign}{dollars}.{remainder:02.0}")
}

/// Format `number` rounded to whole dollars, e.g. "$1,235".
pub fn format_currency_rounded(number: f64) -> String {
    static POSITIVE_FMT: OnceLock<Formatter> = OnceLock::new();
    static NEGATIVE_FMT: OnceLock<Formatter> = OnceLock::new();

    let number = number.round();

    if number < 0.0 {
        NEGATIVE_FMT
            .get_or_init(|| currency_formatter("-$", 0))
            .fmt_string(number.abs())
    } else if number > 0.0 {
        POSITIVE_FMT
            .get_or_init(|| currency_formatter("$", 0))
            .fmt_string(number)
    } else {
        "$0".to_owned()
    }
}

/// Format a share of a whole, e.g. "80%". Never renders "-0%".
pub fn format_percentage(value: f64) -> String {
    let rounded = value.round();

    if rounded.abs() < 0.5 {
        "0%".to_owned()
    } else {
        format!("{rounded:.0}%")
    }
}

fn currency_formatter(symbol: &'static str, decimals: u8) -> Formatter {
    Formatter::currency(symbol)
        .expect("currency symbol should be short enough for numfmt")
        .precision(Precision::Decimals(decimals))
}
