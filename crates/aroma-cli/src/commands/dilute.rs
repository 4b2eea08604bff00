use aroma_core::dilution::{calculate, reference_ranges};
use aroma_core::error::AromaError;
use rust_decimal::Decimal;

pub fn run(total_ml: Decimal, pct: Decimal, drops_per_ml: u32) -> Result<(), AromaError> {
    let result = calculate(total_ml, pct, drops_per_ml);
    println!("{}\n", result.message);

    println!("Reference ranges:");
    for r in reference_ranges() {
        let marker = if pct >= r.min && pct <= r.max { " <" } else { "" };
        match r.note {
            Some(note) => println!("  {:<10} {}-{}%  ({}){}", r.range, r.min, r.max, note, marker),
            None => println!("  {:<10} {}-{}%{}", r.range, r.min, r.max, marker),
        }
    }
    Ok(())
}
