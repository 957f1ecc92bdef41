//! Fixed-point quantity type.
//!
//! Quantities are kept in hundredths (`Quantity(250)` is 2.5 units) so that
//! the "rounded to 2 decimal places" invariant is a property of the type
//! rather than something every caller has to remember. Rounding happens
//! exactly once, when a float crosses into [`Quantity::from_f64_rounded`].
//!
//! There is intentionally no `From<i64>` / `From<f64>`: callers must say
//! whether a raw number is already in hundredths or is a decimal value.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Hundredths per unit.
pub const QUANTITY_SCALE: i64 = 100;

/// A purchase quantity with exactly two decimal places of precision.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Quantity(i64);

impl Quantity {
    pub const ZERO: Quantity = Quantity(0);
    pub const ONE: Quantity = Quantity(QUANTITY_SCALE);

    /// Construct from a raw count of hundredths.
    #[inline]
    pub const fn from_hundredths(raw: i64) -> Self {
        Quantity(raw)
    }

    /// Construct from whole units.
    #[inline]
    pub const fn from_units(units: i64) -> Self {
        Quantity(units * QUANTITY_SCALE)
    }

    /// Underlying count of hundredths.
    #[inline]
    pub const fn hundredths(self) -> i64 {
        self.0
    }

    /// `round2(v)`: half away from zero at the second decimal.
    ///
    /// Returns `None` for NaN, infinities and magnitudes that do not fit.
    pub fn from_f64_rounded(v: f64) -> Option<Quantity> {
        if !v.is_finite() {
            return None;
        }
        let scaled = (v * QUANTITY_SCALE as f64).round();
        if !scaled.is_finite() || scaled.abs() >= i64::MAX as f64 {
            return None;
        }
        Some(Quantity(scaled as i64))
    }

    #[inline]
    pub fn to_f64(self) -> f64 {
        self.0 as f64 / QUANTITY_SCALE as f64
    }

    #[inline]
    pub fn is_positive(self) -> bool {
        self.0 > 0
    }

    #[inline]
    pub fn saturating_add(self, rhs: Quantity) -> Quantity {
        Quantity(self.0.saturating_add(rhs.0))
    }

    #[inline]
    pub fn saturating_sub(self, rhs: Quantity) -> Quantity {
        Quantity(self.0.saturating_sub(rhs.0))
    }
}

impl std::fmt::Display for Quantity {
    /// Trimmed display form: `2`, `2.5`, `2.05`.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        let scale = QUANTITY_SCALE as u64;
        let whole = abs / scale;
        let frac = abs % scale;
        if frac == 0 {
            write!(f, "{sign}{whole}")
        } else if frac % 10 == 0 {
            write!(f, "{sign}{whole}.{}", frac / 10)
        } else {
            write!(f, "{sign}{whole}.{frac:02}")
        }
    }
}

// Wire form is a plain JSON number.
impl Serialize for Quantity {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.to_f64())
    }
}

impl<'de> Deserialize<'de> for Quantity {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let v = f64::deserialize(deserializer)?;
        Quantity::from_f64_rounded(v)
            .ok_or_else(|| serde::de::Error::custom(format!("quantity out of range: {v}")))
    }
}

/// Display formatting for a raw quantity value.
///
/// Renders with exactly two decimals, then strips trailing zeros and a
/// dangling decimal point: `2.00 -> 2`, `2.50 -> 2.5`.
pub fn format_quantity(value: f64) -> String {
    let fixed = format!("{value:.2}");
    let trimmed = if fixed.contains('.') {
        fixed.trim_end_matches('0').trim_end_matches('.')
    } else {
        fixed.as_str()
    };
    // `-0.001` renders as "-0.00"; never show a signed zero.
    if trimmed == "-0" {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}
