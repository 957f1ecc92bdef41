//! pxs-quantity
//!
//! Quantity selection for purchase line items.
//! - `Quantity`: two-decimal fixed-point amount (hundredths in an `i64`)
//! - `QuantityBounds`: `[min, max]` with `min` doubling as the step
//! - `QuantityInput`: edit-buffer state of a quantity widget
//! - `ControlStyle`: presentation-only size/variant knobs
//!
//! Pure logic: no IO, no time, no rendering. Invalid input is never an error
//! here; it is normalized to a value inside the bounds.

mod bounds;
mod fixed;
mod input;

pub mod style;
pub mod text;

pub use bounds::{BoundsError, QuantityBounds, StepDirection};
pub use fixed::{format_quantity, Quantity, QUANTITY_SCALE};
pub use input::{QuantityCell, QuantityField, QuantityInput, QuantityMsg};
pub use style::{ControlSize, ControlStyle, ControlVariant};
