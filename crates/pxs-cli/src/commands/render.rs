//! Text rendering of the quantity control for terminal output.

use pxs_quantity::{ControlStyle, QuantityInput};

/// `[ - | 2.5 | + ]`, shaped by the configured size and variant.
pub fn render_control(style: &ControlStyle, input: &QuantityInput) -> String {
    let (open, close) = style.variant.delimiters();
    let pad = " ".repeat(style.size.padding());
    format!(
        "{open}{pad}-{pad}|{pad}{buf}{pad}|{pad}+{pad}{close}",
        buf = input.buffer()
    )
}
