//! `pxs quantity ...`: drive the quantity widget from the terminal.

use anyhow::Result;
use pxs_quantity::text::is_partial_decimal;
use pxs_quantity::{format_quantity, Quantity, QuantityField, QuantityMsg, StepDirection};

use super::render::render_control;
use super::BoundsArgs;

pub fn format(value: f64) {
    println!("formatted={}", format_quantity(value));
}

pub fn step(value: f64, direction: StepDirection, bounds_args: &BoundsArgs) -> Result<()> {
    let (bounds, cfg) = bounds_args.resolve()?;
    let initial = bounds.normalize(value);
    let mut field = QuantityField::new(bounds, initial);
    let committed = field.dispatch(QuantityMsg::Step(direction));

    println!("min={} max={}", bounds.min(), bounds.max());
    println!("previous={initial}");
    println!("value={}", field.value());
    println!("changed={}", committed.is_some_and(|q| q != initial));
    println!(
        "control={}",
        render_control(&cfg.quantity.style, field.input())
    );
    Ok(())
}

pub fn edit(inputs: &[String], value: Option<f64>, bounds_args: &BoundsArgs) -> Result<()> {
    let (bounds, cfg) = bounds_args.resolve()?;
    let initial = value.map(|v| bounds.normalize(v)).unwrap_or_else(|| bounds.min());
    let mut field = QuantityField::new(bounds, initial);

    field.dispatch(QuantityMsg::Focus);
    for (i, raw) in inputs.iter().enumerate() {
        let accepted = is_partial_decimal(raw);
        field.dispatch(QuantityMsg::Input(raw.clone()));
        println!(
            "input[{i}] raw={raw:?} accepted={accepted} buffer={:?}",
            field.input().buffer()
        );
    }
    let committed: Option<Quantity> = field.dispatch(QuantityMsg::Blur);

    println!("committed={}", committed.unwrap_or_else(|| field.value()));
    println!("buffer={}", field.input().buffer());
    println!(
        "control={}",
        render_control(&cfg.quantity.style, field.input())
    );
    Ok(())
}
