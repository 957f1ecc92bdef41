//! Fixed-point money type.
//!
//! # Scale
//!
//! Amounts are `i64` micros: 1 currency unit = `Money::new(1_000_000)`.
//! Prices arrive from the backend as JSON numbers and are converted once, at
//! the boundary, with [`Money::from_f64`]. After that every sum is exact.
//!
//! # Arithmetic
//!
//! Arithmetic saturates at the `i64` extremes.
//! - [`Money::saturating_add`] and the `Sum` impl build totals.
//! - [`Money::mul_quantity`] multiplies a unit price by a two-decimal
//!   [`Quantity`], rounding half away from zero to the micro and saturating.

use pxs_quantity::{Quantity, QUANTITY_SCALE};

/// Micros per currency unit.
pub const MICROS_PER_UNIT: i64 = 1_000_000;

/// A monetary amount at 1e-6 scale.
///
/// No `From<i64>`: callers must be explicit about the scale of a raw
/// integer.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(i64);

impl Money {
    pub const ZERO: Money = Money(0);
    pub const MAX: Money = Money(i64::MAX);
    pub const MIN: Money = Money(i64::MIN);

    /// From raw micros.
    #[inline]
    pub const fn new(raw_micros: i64) -> Self {
        Money(raw_micros)
    }

    /// From whole currency units.
    #[inline]
    pub const fn from_units(units: i64) -> Self {
        Money(units * MICROS_PER_UNIT)
    }

    #[inline]
    pub const fn raw(self) -> i64 {
        self.0
    }

    /// Convert a wire number. `None` for NaN, infinities and out-of-range
    /// magnitudes.
    pub fn from_f64(v: f64) -> Option<Money> {
        if !v.is_finite() {
            return None;
        }
        let scaled = (v * MICROS_PER_UNIT as f64).round();
        if !scaled.is_finite() || scaled.abs() >= i64::MAX as f64 {
            return None;
        }
        Some(Money(scaled as i64))
    }

    #[inline]
    pub fn to_f64(self) -> f64 {
        self.0 as f64 / MICROS_PER_UNIT as f64
    }

    #[inline]
    pub fn is_negative(self) -> bool {
        self.0 < 0
    }

    #[inline]
    pub fn is_non_negative(self) -> bool {
        self.0 >= 0
    }

    #[inline]
    pub fn saturating_add(self, rhs: Money) -> Money {
        Money(self.0.saturating_add(rhs.0))
    }

    /// `self × qty`, or `None` if the result does not fit in `i64`.
    pub fn checked_mul_quantity(self, qty: Quantity) -> Option<Money> {
        let product = self.0 as i128 * qty.hundredths() as i128;
        let scale = QUANTITY_SCALE as i128;
        let mut whole = product / scale;
        let rem = product % scale;
        if rem.abs() * 2 >= scale {
            whole += product.signum();
        }
        i64::try_from(whole).ok().map(Money)
    }

    /// `self × qty`, saturating at [`Money::MAX`] / [`Money::MIN`].
    pub fn mul_quantity(self, qty: Quantity) -> Money {
        self.checked_mul_quantity(qty).unwrap_or_else(|| {
            if (self.0 < 0) != (qty.hundredths() < 0) {
                Money::MIN
            } else {
                Money::MAX
            }
        })
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::ZERO, Money::saturating_add)
    }
}

impl std::fmt::Display for Money {
    /// Shortest exact decimal: `35000`, `12.5`, `0.000001`.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        let scale = MICROS_PER_UNIT as u64;
        let whole = abs / scale;
        let frac = abs % scale;
        if frac == 0 {
            return write!(f, "{sign}{whole}");
        }
        let digits = format!("{frac:06}");
        write!(f, "{sign}{whole}.{}", digits.trim_end_matches('0'))
    }
}
