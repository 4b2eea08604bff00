use aroma_core::model::{Formula, Recipe};
use aroma_core::plan::ValidationResult;
use aroma_core::rules::schema::LimitsDef;
use aroma_core::safety::SafetyAssessment;
use aroma_core::usage::{DailyUsageResult, UsageWarningLevel};

pub fn print_assessment(formula: &Formula, recipe: &Recipe, assessment: &SafetyAssessment) {
    println!("=== {} ({}) ===\n", formula.name, formula.id);

    if !assessment.is_assessed() {
        println!("  Status: {} (no oils or no concentration)\n", assessment.level.label());
        return;
    }

    let medium = assessment
        .medium_type
        .map(|m| m.display_name())
        .unwrap_or("-");
    let limit = assessment
        .medium_limit
        .map(|l| format!("{l}%"))
        .unwrap_or_else(|| "-".into());
    println!("  Status: {}", assessment.level.label());
    println!("  Medium: {}  (ceiling {})", medium, limit);
    println!("  Concentration: {:.2}%  in {:.2} total\n", recipe.dilution, recipe.total);

    let max_name = recipe
        .oils
        .iter()
        .map(|o| o.name.chars().count())
        .max()
        .unwrap_or(4);
    for oil in &recipe.oils {
        let pad = max_name - oil.name.chars().count();
        println!("    {}{}  {:.2} ml", oil.name, " ".repeat(pad * 2), oil.amount);
    }
    println!();

    if !assessment.problems.is_empty() {
        println!("  Problems:");
        for p in &assessment.problems {
            println!("    - {}", p);
        }
    }
    if !assessment.warnings.is_empty() {
        println!("  Warnings:");
        for w in &assessment.warnings {
            println!("    - {}", w);
        }
    }
    if !assessment.problems.is_empty() || !assessment.warnings.is_empty() {
        println!();
    }
}

pub fn print_usage(results: &[DailyUsageResult], limits: &LimitsDef) {
    for result in results {
        let title = result.scenario_name.as_deref().unwrap_or("全部场景");
        println!("=== {} ===\n", title);

        let status = if !result.is_safe {
            "OVER LIMIT"
        } else if result.is_warning {
            "near limit"
        } else {
            "ok"
        };
        println!(
            "  Skin contact: {:.3} ml/day of {} ml  ({})",
            result.skin_contact_total, limits.daily.skin_contact_ceiling_ml, status
        );
        println!("  All media:    {:.3} ml/day\n", result.total);

        if !result.per_formula.is_empty() {
            let max_id = result
                .per_formula
                .iter()
                .map(|u| u.id.len())
                .max()
                .unwrap_or(10);
            for usage in &result.per_formula {
                let marker = if usage.is_skin_contact() { "" } else { "  (not counted)" };
                println!(
                    "    {:<width$}  {:<16} {:>7.3} ml  {}{}",
                    usage.id,
                    usage.medium_type.as_str(),
                    usage.amount_ml,
                    usage.name,
                    marker,
                    width = max_id
                );
            }
            println!();
        }

        for warning in &result.warnings {
            let tag = match warning.level {
                UsageWarningLevel::Danger => "DANGER",
                UsageWarningLevel::Warning => "WARNING",
            };
            println!("  {}: {}", tag, warning.message);
        }
        if !result.warnings.is_empty() {
            println!();
        }
    }
}

pub fn print_validation(result: &ValidationResult, repaired: bool) {
    if repaired {
        println!("Note: plan was extracted from surrounding text\n");
    }
    if result.valid {
        println!("Plan is valid.");
    } else {
        println!("Plan is invalid ({} errors).", result.errors.len());
    }

    if !result.errors.is_empty() {
        println!("\nErrors:");
        for e in &result.errors {
            println!("  - {}", e);
        }
    }
    if !result.warnings.is_empty() {
        println!("\nWarnings:");
        for w in &result.warnings {
            println!("  - {}", w);
        }
    }
    println!();
}
