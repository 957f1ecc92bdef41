//! Working selection of a proxy shopper.
//!
//! Items are keyed by product id in a `BTreeMap`, so iteration order is by
//! id and never depends on the order products were picked. Totals are not
//! stored anywhere: [`OrderDraft::compute_totals`] walks the items every
//! time.

use std::collections::BTreeMap;

use pxs_quantity::{Quantity, QuantityBounds, StepDirection};
use pxs_schemas::{ProductHit, ProductId};

use crate::money::Money;
use crate::proposal::ComposeError;
use crate::types::{DraftTotals, LineItem, RejectReason, SelectOutcome};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct OrderDraft {
    items: BTreeMap<ProductId, LineItem>,
    proxy_fee: Money,
    note: String,
}

impl OrderDraft {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `hit` with `quantity`, or replace the quantity if the id is
    /// already present.
    ///
    /// No-op for a non-positive quantity, an out-of-stock product or an
    /// unusable price.
    pub fn select_or_update(&mut self, hit: &ProductHit, quantity: Quantity) -> SelectOutcome {
        if !quantity.is_positive() {
            return SelectOutcome::Rejected(RejectReason::NonPositiveQuantity);
        }
        if !hit.in_stock {
            return SelectOutcome::Rejected(RejectReason::OutOfStock);
        }
        let unit_price = match Money::from_f64(hit.price) {
            Some(p) if p.is_non_negative() => p,
            _ => return SelectOutcome::Rejected(RejectReason::InvalidPrice),
        };

        if let Some(existing) = self.items.get_mut(&hit.id) {
            let previous = existing.quantity;
            existing.quantity = quantity;
            return SelectOutcome::Updated { previous };
        }

        self.items.insert(
            hit.id,
            LineItem {
                id: hit.id,
                name: hit.name.clone(),
                unit: hit.unit.clone(),
                unit_price,
                quantity,
                store_name: hit.store_name.clone(),
            },
        );
        SelectOutcome::Inserted
    }

    /// Re-quantify an item already in the draft.
    pub fn update_quantity(&mut self, id: ProductId, quantity: Quantity) -> SelectOutcome {
        if !quantity.is_positive() {
            return SelectOutcome::Rejected(RejectReason::NonPositiveQuantity);
        }
        match self.items.get_mut(&id) {
            Some(item) => {
                let previous = item.quantity;
                item.quantity = quantity;
                SelectOutcome::Updated { previous }
            }
            None => SelectOutcome::Rejected(RejectReason::NotInDraft),
        }
    }

    /// Apply the quantity step rule to one item. Returns the new quantity.
    pub fn step_item(
        &mut self,
        id: ProductId,
        direction: StepDirection,
        bounds: &QuantityBounds,
    ) -> Option<Quantity> {
        let item = self.items.get_mut(&id)?;
        item.quantity = bounds.step(item.quantity, direction);
        Some(item.quantity)
    }

    /// Idempotent.
    pub fn remove(&mut self, id: ProductId) -> Option<LineItem> {
        self.items.remove(&id)
    }

    pub fn get(&self, id: ProductId) -> Option<&LineItem> {
        self.items.get(&id)
    }

    pub fn contains(&self, id: ProductId) -> bool {
        self.items.contains_key(&id)
    }

    pub fn items(&self) -> impl Iterator<Item = &LineItem> {
        self.items.values()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn proxy_fee(&self) -> Money {
        self.proxy_fee
    }

    pub fn set_proxy_fee(&mut self, fee: Money) -> Result<(), ComposeError> {
        if fee.is_negative() {
            return Err(ComposeError::InvalidProxyFee {
                value: fee.to_string(),
            });
        }
        self.proxy_fee = fee;
        Ok(())
    }

    pub fn note(&self) -> &str {
        &self.note
    }

    pub fn set_note(&mut self, note: impl Into<String>) {
        self.note = note.into();
    }

    pub fn compute_totals(&self) -> DraftTotals {
        let total_product_price: Money = self.items.values().map(LineItem::line_total).sum();
        DraftTotals {
            item_count: self.items.len(),
            total_product_price,
            proxy_fee: self.proxy_fee,
            grand_total: total_product_price.saturating_add(self.proxy_fee),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hit(id: i64, price: f64) -> ProductHit {
        ProductHit {
            id: ProductId(id),
            name: format!("product-{id}"),
            price,
            unit: "kg".to_string(),
            store_name: Some("Sạp A".to_string()),
            seller_reputation: None,
            purchase_count: None,
            in_stock: true,
        }
    }

    #[test]
    fn insert_then_update_replaces_quantity() {
        let mut d = OrderDraft::new();
        assert_eq!(
            d.select_or_update(&hit(1, 10000.0), Quantity::from_units(2)),
            SelectOutcome::Inserted
        );
        assert_eq!(
            d.select_or_update(&hit(1, 10000.0), Quantity::from_units(5)),
            SelectOutcome::Updated {
                previous: Quantity::from_units(2)
            }
        );
        assert_eq!(d.len(), 1);
        assert_eq!(d.get(ProductId(1)).unwrap().quantity, Quantity::from_units(5));
    }

    #[test]
    fn rejects_leave_draft_untouched() {
        let mut d = OrderDraft::new();
        let mut out_of_stock = hit(2, 5000.0);
        out_of_stock.in_stock = false;

        assert_eq!(
            d.select_or_update(&out_of_stock, Quantity::from_units(1)),
            SelectOutcome::Rejected(RejectReason::OutOfStock)
        );
        assert_eq!(
            d.select_or_update(&hit(3, 5000.0), Quantity::ZERO),
            SelectOutcome::Rejected(RejectReason::NonPositiveQuantity)
        );
        assert_eq!(
            d.select_or_update(&hit(4, f64::NAN), Quantity::ONE),
            SelectOutcome::Rejected(RejectReason::InvalidPrice)
        );
        assert_eq!(
            d.select_or_update(&hit(5, -1.0), Quantity::ONE),
            SelectOutcome::Rejected(RejectReason::InvalidPrice)
        );
        assert!(d.is_empty());
    }

    #[test]
    fn outcome_reports_whether_applied() {
        let mut d = OrderDraft::new();
        assert!(d.select_or_update(&hit(1, 100.0), Quantity::ONE).is_applied());
        assert!(d.select_or_update(&hit(1, 100.0), Quantity::from_units(2)).is_applied());
        let mut sold_out = hit(2, 100.0);
        sold_out.in_stock = false;
        match d.select_or_update(&sold_out, Quantity::ONE) {
            SelectOutcome::Rejected(reason) => assert_eq!(reason.as_str(), "OUT_OF_STOCK"),
            other => panic!("expected rejection, got {other:?}"),
        }
    }

    #[test]
    fn update_quantity_requires_presence() {
        let mut d = OrderDraft::new();
        assert_eq!(
            d.update_quantity(ProductId(9), Quantity::ONE),
            SelectOutcome::Rejected(RejectReason::NotInDraft)
        );
    }

    #[test]
    fn remove_is_idempotent() {
        let mut d = OrderDraft::new();
        d.select_or_update(&hit(1, 1.0), Quantity::ONE);
        assert!(d.remove(ProductId(1)).is_some());
        assert!(d.remove(ProductId(1)).is_none());
        assert!(d.is_empty());
    }

    #[test]
    fn step_item_respects_bounds() {
        let bounds = QuantityBounds::from_f64(0.5, 2.0).unwrap();
        let mut d = OrderDraft::new();
        d.select_or_update(&hit(1, 1.0), Quantity::from_hundredths(150));
        assert_eq!(
            d.step_item(ProductId(1), StepDirection::Increase, &bounds),
            Some(Quantity::from_units(2))
        );
        assert_eq!(
            d.step_item(ProductId(1), StepDirection::Increase, &bounds),
            Some(Quantity::from_units(2))
        );
        assert_eq!(d.step_item(ProductId(7), StepDirection::Increase, &bounds), None);
    }

    #[test]
    fn negative_fee_is_refused() {
        let mut d = OrderDraft::new();
        assert!(d.set_proxy_fee(Money::from_units(-1)).is_err());
        assert_eq!(d.proxy_fee(), Money::ZERO);
        d.set_proxy_fee(Money::from_units(15_000)).unwrap();
        assert_eq!(d.compute_totals().proxy_fee, Money::from_units(15_000));
    }
}
