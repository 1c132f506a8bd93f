//! Price normalization.
//!
//! The catalog source returns prices as currency-formatted strings
//! ("₹1,234.50"), bare numbers, or nothing at all. Every arithmetic
//! operation downstream goes through [`normalize`] first, so malformed
//! input degrades to 0.0 instead of propagating.

use crate::models::RawPrice;

/// Coerce an upstream price into a canonical numeric value.
///
/// Never panics and never returns NaN: absent, empty, or digit-free
/// input yields 0.0, and non-finite numeric input yields 0.0.
pub fn normalize(raw: Option<&RawPrice>) -> f64 {
    match raw {
        None => 0.0,
        Some(RawPrice::Number(n)) => {
            if n.is_finite() {
                *n
            } else {
                0.0
            }
        }
        Some(RawPrice::Text(s)) => parse_text(s),
    }
}

/// Strip everything that is not a digit or decimal point, then parse
/// the longest valid numeric prefix (a second `.` terminates the
/// number, matching upstream parseFloat behavior).
fn parse_text(s: &str) -> f64 {
    let mut cleaned = String::with_capacity(s.len());
    let mut seen_dot = false;
    for c in s.chars() {
        if c.is_ascii_digit() {
            cleaned.push(c);
        } else if c == '.' {
            if seen_dot {
                break;
            }
            seen_dot = true;
            cleaned.push(c);
        }
    }

    if cleaned.is_empty() || cleaned == "." {
        return 0.0;
    }

    cleaned.parse::<f64>().unwrap_or(0.0)
}
