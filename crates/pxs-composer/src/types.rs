use pxs_quantity::Quantity;
use pxs_schemas::ProductId;

use crate::money::Money;

/// One selected product inside a draft.
///
/// `quantity` is always > 0; `unit_price` is always >= 0.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LineItem {
    pub id: ProductId,
    pub name: String,
    pub unit: String,
    pub unit_price: Money,
    pub quantity: Quantity,
    pub store_name: Option<String>,
}

impl LineItem {
    /// `unit_price × quantity`.
    pub fn line_total(&self) -> Money {
        self.unit_price.mul_quantity(self.quantity)
    }
}

/// Why a selection was ignored.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RejectReason {
    NonPositiveQuantity,
    OutOfStock,
    /// Wire price was NaN, infinite, negative or out of range.
    InvalidPrice,
    /// Re-quantify or step on an id that is not in the draft.
    NotInDraft,
}

impl RejectReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            RejectReason::NonPositiveQuantity => "NON_POSITIVE_QUANTITY",
            RejectReason::OutOfStock => "OUT_OF_STOCK",
            RejectReason::InvalidPrice => "INVALID_PRICE",
            RejectReason::NotInDraft => "NOT_IN_DRAFT",
        }
    }
}

/// Result of a select/update on the draft. Rejections leave the draft
/// untouched.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SelectOutcome {
    Inserted,
    Updated { previous: Quantity },
    Rejected(RejectReason),
}

impl SelectOutcome {
    pub fn is_applied(&self) -> bool {
        !matches!(self, SelectOutcome::Rejected(_))
    }
}

/// Aggregates derived from a draft at a point in time.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DraftTotals {
    pub item_count: usize,
    /// Σ unit_price × quantity.
    pub total_product_price: Money,
    pub proxy_fee: Money,
    /// total_product_price + proxy_fee.
    pub grand_total: Money,
}
