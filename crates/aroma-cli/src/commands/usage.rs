use aroma_core::error::AromaError;
use aroma_core::plan::parse_plan_text;
use aroma_core::plan::schema::CandidatePlan;
use aroma_core::usage::{aggregate_plan, aggregate_scenario, DailyUsageResult};
use std::path::Path;

use crate::output;

pub fn run(
    plan_file: &Path,
    catalog: Option<&Path>,
    limits: Option<&Path>,
    output_format: &str,
) -> Result<(), AromaError> {
    let catalog = super::load_catalog(catalog)?;
    let limits = super::load_limits(limits)?;

    let raw = std::fs::read_to_string(plan_file)?;
    let (value, _) = parse_plan_text(&raw)?;
    let plan: CandidatePlan =
        serde_json::from_value(value).map_err(|e| AromaError::PlanParse(e.to_string()))?;

    let mut results: Vec<DailyUsageResult> = plan
        .scenarios
        .iter()
        .map(|s| aggregate_scenario(s, &catalog, &limits))
        .collect();
    if plan.scenarios.len() > 1 {
        results.push(aggregate_plan(&plan, &catalog, &limits));
    }

    match output_format {
        "json" => output::json::print(&results)?,
        _ => output::table::print_usage(&results, &limits),
    }
    Ok(())
}
