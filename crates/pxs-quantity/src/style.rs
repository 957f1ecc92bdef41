//! Presentation knobs for quantity controls.
//!
//! Only a rendering layer reads these; nothing in the quantity logic depends
//! on them.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ControlSize {
    Small,
    #[default]
    Medium,
    Large,
}

impl ControlSize {
    /// Horizontal padding (in cells) around the value.
    pub fn padding(&self) -> usize {
        match self {
            ControlSize::Small => 0,
            ControlSize::Medium => 1,
            ControlSize::Large => 2,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ControlVariant {
    #[default]
    Solid,
    Outline,
    Ghost,
}

impl ControlVariant {
    /// Opening/closing delimiters for a button label.
    pub fn delimiters(&self) -> (&'static str, &'static str) {
        match self {
            ControlVariant::Solid => ("[", "]"),
            ControlVariant::Outline => ("(", ")"),
            ControlVariant::Ghost => (" ", " "),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControlStyle {
    #[serde(default)]
    pub size: ControlSize,
    #[serde(default)]
    pub variant: ControlVariant,
}
