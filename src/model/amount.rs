//! Formatting helpers for amount cells.
//!
//! The grid stores amounts as whole numbers of the ledger currency. While an amount cell has focus
//! it holds digits only; once it loses focus the digits are grouped with commas for display.
//!
//! # Examples
//!
//! ```
//! # use ledger_grid::model::{format_amount, strip_separators};
//! assert_eq!(format_amount("1234567"), "1,234,567");
//! assert_eq!(format_amount("12a3"), "123");
//! assert_eq!(strip_separators(&format_amount("1234567")), "1234567");
//! ```

/// The thousands separator used for display.
pub const SEPARATOR: char = ',';

/// Removes every character that is not an ASCII digit.
pub fn digits_only(raw: &str) -> String {
    raw.chars().filter(char::is_ascii_digit).collect()
}

/// Removes thousands separators and nothing else.
pub fn strip_separators(raw: &str) -> String {
    raw.chars().filter(|c| *c != SEPARATOR).collect()
}

/// Strips all non-digits from `raw`, then inserts a separator every three digits from the right.
pub fn format_amount(raw: &str) -> String {
    group_thousands(&digits_only(raw))
}

/// Formatting used by the single-entry panel, which accepts up to two decimal places.
///
/// Commas are dropped, only digits and dots survive, any dot after the first is removed, the
/// integer part is grouped and the fractional part is cut to two digits.
pub fn format_decimal_amount(raw: &str) -> String {
    let kept: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();

    let (integer, fraction) = match kept.split_once('.') {
        Some((integer, rest)) => (integer.to_string(), Some(rest.replace('.', ""))),
        None => (kept, None),
    };

    let integer = group_thousands(&integer);
    match fraction {
        Some(fraction) => {
            let fraction: String = fraction.chars().take(2).collect();
            format!("{integer}.{fraction}")
        }
        None => integer,
    }
}

/// Inserts a separator every three characters from the right. `digits` must be ASCII.
fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (ix, c) in digits.chars().enumerate() {
        if ix > 0 && (len - ix) % 3 == 0 {
            out.push(SEPARATOR);
        }
        out.push(c);
    }
    out
}
