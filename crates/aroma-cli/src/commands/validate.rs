use aroma_core::error::AromaError;
use aroma_core::plan::{parse_plan_text, validate};
use std::path::Path;

use crate::output;

/// Runs the validator directly so both errors and warnings are shown; a
/// plan with errors exits non-zero.
pub fn run(
    plan_file: &Path,
    usage_types: &[String],
    catalog: Option<&Path>,
    output_format: &str,
) -> Result<(), AromaError> {
    let catalog = super::load_catalog(catalog)?;
    let raw = std::fs::read_to_string(plan_file)?;
    let (value, repaired) = parse_plan_text(&raw)?;
    let result = validate(&value, &catalog.ids(), usage_types);

    match output_format {
        "json" => output::json::print(&result)?,
        _ => output::table::print_validation(&result, repaired),
    }

    if result.is_rejected() {
        return Err(AromaError::PlanRejected {
            errors: result.errors,
        });
    }
    Ok(())
}
