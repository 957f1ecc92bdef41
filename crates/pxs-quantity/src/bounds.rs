use crate::fixed::Quantity;

/// Direction of a step button press.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum StepDirection {
    Increase,
    Decrease,
}

/// Returned when bounds cannot satisfy `0 < min <= max`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoundsError {
    /// `min` must be strictly positive (it is also the step).
    NonPositiveMin { min: String },
    /// `min` exceeds `max`.
    Inverted { min: String, max: String },
    /// A float bound was NaN, infinite or out of range.
    NotRepresentable { value: String },
}

impl std::fmt::Display for BoundsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BoundsError::NonPositiveMin { min } => {
                write!(f, "quantity bounds: min must be > 0 (got {min})")
            }
            BoundsError::Inverted { min, max } => {
                write!(f, "quantity bounds: min {min} exceeds max {max}")
            }
            BoundsError::NotRepresentable { value } => {
                write!(f, "quantity bounds: value {value} is not a finite quantity")
            }
        }
    }
}

impl std::error::Error for BoundsError {}

/// Inclusive `[min, max]` range for a purchase quantity.
///
/// `min` is also the step size used by the increase/decrease buttons.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct QuantityBounds {
    min: Quantity,
    max: Quantity,
}

impl QuantityBounds {
    pub fn new(min: Quantity, max: Quantity) -> Result<Self, BoundsError> {
        if !min.is_positive() {
            return Err(BoundsError::NonPositiveMin {
                min: min.to_string(),
            });
        }
        if min > max {
            return Err(BoundsError::Inverted {
                min: min.to_string(),
                max: max.to_string(),
            });
        }
        Ok(Self { min, max })
    }

    /// Build from decimal bounds (as read from config).
    pub fn from_f64(min: f64, max: f64) -> Result<Self, BoundsError> {
        let min_q = Quantity::from_f64_rounded(min).ok_or(BoundsError::NotRepresentable {
            value: min.to_string(),
        })?;
        let max_q = Quantity::from_f64_rounded(max).ok_or(BoundsError::NotRepresentable {
            value: max.to_string(),
        })?;
        Self::new(min_q, max_q)
    }

    #[inline]
    pub fn min(&self) -> Quantity {
        self.min
    }

    #[inline]
    pub fn max(&self) -> Quantity {
        self.max
    }

    #[inline]
    pub fn step_size(&self) -> Quantity {
        self.min
    }

    pub fn contains(&self, q: Quantity) -> bool {
        q >= self.min && q <= self.max
    }

    pub fn clamp(&self, q: Quantity) -> Quantity {
        q.clamp(self.min, self.max)
    }

    /// Step rule. Decrease: `max(min, value - step)`. Increase:
    /// `min(max, value + step)`.
    pub fn step(&self, value: Quantity, direction: StepDirection) -> Quantity {
        match direction {
            StepDirection::Decrease => value.saturating_sub(self.step_size()).max(self.min),
            StepDirection::Increase => value.saturating_add(self.step_size()).min(self.max),
        }
    }

    /// Commit rule for a parsed decimal.
    ///
    /// NaN, infinities (from overlong digit strings) and values `<= 0` reset
    /// to `min`; everything else is clamped then rounded.
    pub fn normalize(&self, value: f64) -> Quantity {
        if value.is_nan() || value <= 0.0 {
            return self.min;
        }
        let clamped = value.clamp(self.min.to_f64(), self.max.to_f64());
        Quantity::from_f64_rounded(clamped)
            .map(|q| self.clamp(q))
            .unwrap_or(self.min)
    }

    /// Parse an edit buffer and apply [`normalize`](Self::normalize).
    pub fn normalize_text(&self, raw: &str) -> Quantity {
        match raw.trim().parse::<f64>() {
            Ok(v) => self.normalize(v),
            Err(_) => self.min,
        }
    }
}
