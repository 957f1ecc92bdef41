use proptest::prelude::*;
use pxs_composer::{Money, OrderDraft, SelectOutcome};
use pxs_quantity::Quantity;
use pxs_schemas::{ProductHit, ProductId};

fn hit(id: i64, price: f64) -> ProductHit {
    ProductHit {
        id: ProductId(id),
        name: format!("mặt hàng {id}"),
        price,
        unit: "kg".to_string(),
        store_name: None,
        seller_reputation: None,
        purchase_count: None,
        in_stock: true,
    }
}

#[test]
fn scenario_two_products_total_35000() {
    let mut d = OrderDraft::new();
    d.select_or_update(&hit(1, 10_000.0), Quantity::from_units(2));
    d.select_or_update(&hit(2, 5_000.0), Quantity::from_units(3));

    let t = d.compute_totals();
    assert_eq!(t.item_count, 2);
    assert_eq!(t.total_product_price, Money::from_units(35_000));
    assert_eq!(t.grand_total, Money::from_units(35_000));
}

#[test]
fn scenario_reselect_replaces_not_duplicates() {
    let mut d = OrderDraft::new();
    d.select_or_update(&hit(1, 10_000.0), Quantity::from_units(2));
    let out = d.select_or_update(&hit(1, 10_000.0), Quantity::from_units(4));
    assert!(matches!(out, SelectOutcome::Updated { .. }));

    assert_eq!(d.len(), 1);
    assert_eq!(d.compute_totals().total_product_price, Money::from_units(40_000));
}

#[test]
fn scenario_fractional_quantity_rounds_to_micro() {
    let mut d = OrderDraft::new();
    // 3333.333333 x 1.5 = 4999.9999995 -> 5000.000000 (half away from zero)
    d.select_or_update(&hit(1, 3_333.333_333), Quantity::from_hundredths(150));
    assert_eq!(d.compute_totals().total_product_price, Money::from_units(5_000));
}

#[derive(Clone, Debug)]
enum Op {
    Select { id: i64, price_units: i64, qty_hundredths: i64 },
    Remove { id: i64 },
}

fn arb_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => (1i64..6, 0i64..200_000, 1i64..100_000).prop_map(|(id, price_units, qty_hundredths)| {
            Op::Select { id, price_units, qty_hundredths }
        }),
        1 => (1i64..6).prop_map(|id| Op::Remove { id }),
    ]
}

fn apply(d: &mut OrderDraft, op: &Op) {
    match op {
        Op::Select { id, price_units, qty_hundredths } => {
            d.select_or_update(
                &hit(*id, *price_units as f64),
                Quantity::from_hundredths(*qty_hundredths),
            );
        }
        Op::Remove { id } => {
            d.remove(ProductId(*id));
        }
    }
}

/// Reference sum in hundredths of a unit, exact for integer prices.
fn expected_micros(d: &OrderDraft) -> i64 {
    d.items()
        .map(|item| item.unit_price.raw() / 100 * item.quantity.hundredths())
        .sum()
}

proptest! {
    #[test]
    fn totals_match_sum_of_line_totals(ops in prop::collection::vec(arb_op(), 0..40)) {
        let mut d = OrderDraft::new();
        for op in &ops {
            apply(&mut d, op);
            let t = d.compute_totals();
            prop_assert_eq!(t.total_product_price.raw(), expected_micros(&d));
            prop_assert_eq!(t.item_count, d.len());
        }
    }

    #[test]
    fn totals_independent_of_insertion_order(
        picks in prop::collection::btree_map(1i64..50, (0i64..100_000, 1i64..10_000), 0..12)
    ) {
        let forward: Vec<_> = picks.iter().collect();
        let mut a = OrderDraft::new();
        for (id, (price, qty)) in &forward {
            a.select_or_update(&hit(**id, *price as f64), Quantity::from_hundredths(*qty));
        }
        let mut b = OrderDraft::new();
        for (id, (price, qty)) in forward.iter().rev() {
            b.select_or_update(&hit(**id, *price as f64), Quantity::from_hundredths(*qty));
        }
        prop_assert_eq!(a.compute_totals(), b.compute_totals());
        prop_assert_eq!(a, b);
    }
}
