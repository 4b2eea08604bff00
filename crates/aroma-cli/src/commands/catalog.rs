use aroma_core::classify::classify_formula;
use aroma_core::error::AromaError;
use aroma_core::usage::daily::{total_oil_ml, usage_days};
use aroma_core::usage::skin_contact_daily_amount;
use std::path::Path;

pub fn list(catalog: Option<&Path>, limits: Option<&Path>) -> Result<(), AromaError> {
    let catalog = super::load_catalog(catalog)?;
    let limits = super::load_limits(limits)?;

    println!("{} formulas:\n", catalog.len());
    println!(
        "  {:<12} {:<16} {:>9} {:>6} {:>11}  Name",
        "Id", "Medium", "Oil (ml)", "Days", "Skin ml/day"
    );
    println!("  {}", "-".repeat(72));

    for formula in catalog.iter() {
        let medium = classify_formula(formula);
        println!(
            "  {:<12} {:<16} {:>9.2} {:>6} {:>11.3}  {}",
            formula.id,
            medium.as_str(),
            total_oil_ml(formula, &limits),
            usage_days(formula, &limits),
            skin_contact_daily_amount(formula, &limits),
            formula.name
        );
    }
    println!();
    Ok(())
}
