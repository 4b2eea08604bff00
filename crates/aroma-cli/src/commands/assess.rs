use aroma_core::error::AromaError;
use aroma_core::{assess_formula, recipe_from_formula};
use std::path::Path;

use crate::output;

pub fn run(
    formula_id: &str,
    catalog: Option<&Path>,
    limits: Option<&Path>,
    output_format: &str,
) -> Result<(), AromaError> {
    let catalog = super::load_catalog(catalog)?;
    let limits = super::load_limits(limits)?;
    let formula = catalog.require(formula_id)?;

    let recipe = recipe_from_formula(formula, &limits);
    let assessment = assess_formula(formula, &limits);

    match output_format {
        "json" => output::json::print(&assessment)?,
        _ => output::table::print_assessment(formula, &recipe, &assessment),
    }
    Ok(())
}
