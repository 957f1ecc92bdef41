//! Quantity widget state with explicit ownership.
//!
//! # Ownership
//!
//! The committed value belongs to the owner ([`QuantityCell`] or anything
//! that embeds one). The widget ([`QuantityInput`]) owns only the edit
//! buffer and the editing flag. The two talk through messages:
//!
//! ```text
//!   owner ── observe(committed) ──► widget      (buffer sync when idle)
//!   owner ── update(committed, msg) ► widget
//!   owner ◄── Some(commit) ───────── widget      (owner applies it)
//! ```
//!
//! The widget never writes the committed value itself; a step press or a
//! blur only *returns* the value the owner should commit.

use crate::bounds::{QuantityBounds, StepDirection};
use crate::fixed::Quantity;
use crate::text::is_partial_decimal;

/// Discrete user events delivered to a [`QuantityInput`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuantityMsg {
    /// Increase/decrease button.
    Step(StepDirection),
    /// The full proposed buffer contents after a keystroke.
    Input(String),
    Focus,
    Blur,
}

/// Edit-buffer half of the quantity widget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuantityInput {
    bounds: QuantityBounds,
    buffer: String,
    editing: bool,
}

impl QuantityInput {
    pub fn new(bounds: QuantityBounds, committed: Quantity) -> Self {
        Self {
            bounds,
            buffer: committed.to_string(),
            editing: false,
        }
    }

    pub fn bounds(&self) -> QuantityBounds {
        self.bounds
    }

    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    pub fn is_editing(&self) -> bool {
        self.editing
    }

    /// Owner-to-widget sync. Ignored while the user is editing so a
    /// half-typed value is never overwritten.
    pub fn observe(&mut self, committed: Quantity) {
        if !self.editing {
            self.buffer = committed.to_string();
        }
    }

    /// Value the owner should commit for a step press. Does not touch the
    /// buffer; the owner's next `observe` does that.
    pub fn step(&self, committed: Quantity, direction: StepDirection) -> Quantity {
        self.bounds.step(committed, direction)
    }

    /// Returns `false` (and leaves the buffer alone) when `raw` is not a
    /// partial decimal.
    pub fn on_text_input(&mut self, raw: &str) -> bool {
        if !is_partial_decimal(raw) {
            return false;
        }
        self.buffer.clear();
        self.buffer.push_str(raw);
        true
    }

    pub fn on_focus(&mut self) {
        self.editing = true;
    }

    /// Leave edit mode and return the value to commit. The buffer is
    /// reformatted to the committed value's display form.
    pub fn on_blur(&mut self) -> Quantity {
        self.editing = false;
        let committed = self.bounds.normalize_text(&self.buffer);
        self.buffer = committed.to_string();
        committed
    }

    /// Message entry point. `Some` is a commit for the owner.
    pub fn update(&mut self, committed: Quantity, msg: QuantityMsg) -> Option<Quantity> {
        match msg {
            QuantityMsg::Step(direction) => Some(self.step(committed, direction)),
            QuantityMsg::Input(raw) => {
                self.on_text_input(&raw);
                None
            }
            QuantityMsg::Focus => {
                self.on_focus();
                None
            }
            QuantityMsg::Blur => Some(self.on_blur()),
        }
    }
}

/// Minimal owner of a committed quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuantityCell {
    value: Quantity,
}

impl QuantityCell {
    /// The initial value is clamped into `bounds`.
    pub fn new(bounds: &QuantityBounds, initial: Quantity) -> Self {
        Self {
            value: bounds.clamp(initial),
        }
    }

    pub fn get(&self) -> Quantity {
        self.value
    }

    pub fn commit(&mut self, value: Quantity) {
        self.value = value;
    }
}

/// An owner and its widget wired together.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuantityField {
    cell: QuantityCell,
    input: QuantityInput,
}

impl QuantityField {
    pub fn new(bounds: QuantityBounds, initial: Quantity) -> Self {
        let cell = QuantityCell::new(&bounds, initial);
        let input = QuantityInput::new(bounds, cell.get());
        Self { cell, input }
    }

    pub fn value(&self) -> Quantity {
        self.cell.get()
    }

    pub fn input(&self) -> &QuantityInput {
        &self.input
    }

    /// Route a message through the widget, apply any commit, then sync the
    /// buffer. Returns the commit, if one happened.
    pub fn dispatch(&mut self, msg: QuantityMsg) -> Option<Quantity> {
        let commit = self.input.update(self.cell.get(), msg);
        if let Some(value) = commit {
            self.cell.commit(value);
            self.input.observe(value);
        }
        commit
    }
}
