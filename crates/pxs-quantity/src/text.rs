//! Keystroke filter for the quantity edit buffer.

use regex::Regex;
use std::sync::OnceLock;

/// Digits, an optional single decimal point, optional trailing digits.
/// ASCII digits only; the empty string is allowed while typing.
const PARTIAL_DECIMAL: &str = r"^[0-9]*\.?[0-9]*$";

fn partial_decimal() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(PARTIAL_DECIMAL).expect("PARTIAL_DECIMAL is a valid pattern"))
}

/// `true` when `raw` may be held in the edit buffer.
pub fn is_partial_decimal(raw: &str) -> bool {
    partial_decimal().is_match(raw)
}
