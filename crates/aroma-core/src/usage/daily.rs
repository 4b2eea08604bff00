use crate::catalog::FormulaCatalog;
use crate::classify::classify_formula;
use crate::model::Formula;
use crate::parsing::{base_quantity, is_not_counted, normalize_ml, oil_volume_ml};
use crate::plan::schema::{CandidatePlan, Scenario};
use crate::rules::schema::LimitsDef;
use crate::usage::outcome::{DailyUsageResult, FormulaUsage, UsageWarning, UsageWarningLevel};
use crate::usage::period::estimate_days;
use rust_decimal::Decimal;
use std::collections::HashSet;
use tracing::{debug, warn};

const UNNAMED_SCENARIO: &str = "未知场景";

/// Total essential-oil volume of one batch in ml.
pub fn total_oil_ml(formula: &Formula, limits: &LimitsDef) -> Decimal {
    formula
        .oils()
        .map(|ing| oil_volume_ml(&ing.amount_text, limits.drop_volume_ml))
        .fold(Decimal::ZERO, Decimal::saturating_add)
}

/// Combined carrier/base quantity of one batch (g or ml).
///
/// Falls back to the configured default when no base line has a quantity.
pub fn base_amount(formula: &Formula, limits: &LimitsDef) -> Decimal {
    let sum: Decimal = formula
        .bases()
        .filter_map(|ing| base_quantity(&ing.amount_text))
        .fold(Decimal::ZERO, Decimal::saturating_add);
    if sum > Decimal::ZERO {
        sum
    } else {
        limits.default_base_amount
    }
}

/// Days one batch of this formula lasts.
pub fn usage_days(formula: &Formula, limits: &LimitsDef) -> u32 {
    estimate_days(
        classify_formula(formula),
        base_amount(formula, limits),
        &limits.usage_periods,
    )
}

/// Oil consumed per day in ml, regardless of skin contact.
///
/// A stated daily amount is used when it parses to a non-zero value;
/// otherwise the batch volume is spread over its usage period.
pub fn daily_dose(formula: &Formula, limits: &LimitsDef) -> Decimal {
    if let Some(text) = formula.daily_amount_text.as_deref() {
        let stated = normalize_ml(text);
        if stated > Decimal::ZERO {
            return stated;
        }
    }

    let total = total_oil_ml(formula, limits);
    if total <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    let days = usage_days(formula, limits);
    let dose = total / Decimal::from(days);
    debug!(formula = %formula.id, %total, days, %dose, "estimated daily dose");
    dose
}

/// Oil reaching the skin per day in ml.
///
/// Zero for diffused and alcohol-spray media and for formulas whose stated
/// daily amount is marked as not counted.
pub fn skin_contact_daily_amount(formula: &Formula, limits: &LimitsDef) -> Decimal {
    if !classify_formula(formula).is_skin_contact() {
        return Decimal::ZERO;
    }
    if formula
        .daily_amount_text
        .as_deref()
        .is_some_and(is_not_counted)
    {
        return Decimal::ZERO;
    }
    daily_dose(formula, limits)
}

/// Aggregate the daily exposure of a set of formulas used on the same day.
///
/// Formulas are de-duplicated by id: a daily dose already spans the whole
/// usage period, so using a formula twice in a day does not double it.
pub fn aggregate<'a, I>(formulas: I, limits: &LimitsDef) -> DailyUsageResult
where
    I: IntoIterator<Item = &'a Formula>,
{
    let mut seen = HashSet::new();
    let mut per_formula = Vec::new();

    for formula in formulas {
        if !seen.insert(formula.id.as_str()) {
            continue;
        }
        per_formula.push(FormulaUsage {
            id: formula.id.clone(),
            name: formula.name.clone(),
            amount_ml: daily_dose(formula, limits),
            medium_type: classify_formula(formula),
        });
    }

    let total = per_formula
        .iter()
        .map(|u| u.amount_ml)
        .fold(Decimal::ZERO, Decimal::saturating_add);
    let skin_contact_total = per_formula
        .iter()
        .filter(|u| u.is_skin_contact())
        .map(|u| u.amount_ml)
        .fold(Decimal::ZERO, Decimal::saturating_add);

    let ceiling = limits.daily.skin_contact_ceiling_ml;
    let advisory = limits.daily.advisory_threshold_ml;

    let mut warnings = Vec::new();
    if skin_contact_total > ceiling {
        warnings.push(UsageWarning {
            level: UsageWarningLevel::Danger,
            message: format!(
                "每日皮肤接触精油用量 {:.3}ml 超过安全上限(≤{}ml)！请减少配方使用量。",
                skin_contact_total, ceiling
            ),
        });
    } else if skin_contact_total > advisory {
        warnings.push(UsageWarning {
            level: UsageWarningLevel::Warning,
            message: format!(
                "每日皮肤接触精油用量 {:.3}ml 接近安全上限(≤{}ml)，请谨慎使用。",
                skin_contact_total, ceiling
            ),
        });
    }

    if !warnings.is_empty() {
        warn!(%skin_contact_total, %ceiling, "daily skin contact above advisory threshold");
    }

    DailyUsageResult {
        scenario_name: None,
        total,
        skin_contact_total,
        per_formula,
        warnings,
        is_safe: skin_contact_total <= ceiling,
        is_warning: skin_contact_total > advisory && skin_contact_total <= ceiling,
    }
}

/// Aggregate every formula referenced anywhere in one scenario's timeline.
///
/// Ids missing from the catalog are skipped.
pub fn aggregate_scenario(
    scenario: &Scenario,
    catalog: &FormulaCatalog,
    limits: &LimitsDef,
) -> DailyUsageResult {
    let formulas = resolve(std::slice::from_ref(scenario), catalog);
    let mut result = aggregate(formulas, limits);
    result.scenario_name = Some(scenario_label(scenario));
    result
}

/// Aggregate across all scenarios of a plan, each formula counted once.
pub fn aggregate_plan(
    plan: &CandidatePlan,
    catalog: &FormulaCatalog,
    limits: &LimitsDef,
) -> DailyUsageResult {
    aggregate(resolve(&plan.scenarios, catalog), limits)
}

fn resolve<'a>(scenarios: &[Scenario], catalog: &'a FormulaCatalog) -> Vec<&'a Formula> {
    scenarios
        .iter()
        .flat_map(|s| &s.timeline)
        .flat_map(|slot| &slot.formulas)
        .filter_map(|entry| {
            let formula = catalog.get(&entry.formula_id);
            if formula.is_none() {
                debug!(formula_id = %entry.formula_id, "formula not in catalog, skipped");
            }
            formula
        })
        .collect()
}

fn scenario_label(scenario: &Scenario) -> String {
    if scenario.name.trim().is_empty() {
        UNNAMED_SCENARIO.to_string()
    } else {
        scenario.name.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Ingredient, MediumType};
    use crate::plan::schema::{PlanFormula, TimelineSlot};
    use crate::rules::builtin::default_limits;
    use rust_decimal_macros::dec;

    fn formula(id: &str, name: &str, ingredients: &[(&str, &str)], daily: Option<&str>) -> Formula {
        Formula {
            id: id.into(),
            name: name.into(),
            subtitle: String::new(),
            ingredients: ingredients
                .iter()
                .map(|(n, a)| Ingredient::new(*n, *a))
                .collect(),
            daily_amount_text: daily.map(String::from),
            concentration_text: None,
        }
    }

    fn handcream() -> Formula {
        formula("hc", "薰衣草护手霜", &[("薰衣草精油", "12滴")], None)
    }

    fn diffuser() -> Formula {
        formula(
            "df",
            "办公室扩香",
            &[("迷迭香精油", "3滴"), ("甜橙精油", "4滴")],
            Some("不计入每日精油皮肤接触量"),
        )
    }

    fn slot(time: &str, ids: &[&str]) -> TimelineSlot {
        TimelineSlot {
            time: time.into(),
            title: String::new(),
            formulas: ids
                .iter()
                .map(|id| PlanFormula {
                    formula_id: id.to_string(),
                    usage_type: "涂抹".into(),
                    reason: String::new(),
                })
                .collect(),
        }
    }

    #[test]
    fn test_handcream_reference_example() {
        let limits = default_limits();
        let f = handcream();
        assert_eq!(total_oil_ml(&f, &limits), dec!(0.6));
        assert_eq!(base_amount(&f, &limits), dec!(50));
        assert_eq!(usage_days(&f, &limits), 30);
        assert_eq!(daily_dose(&f, &limits), dec!(0.02));
    }

    #[test]
    fn test_base_amount_sums_carrier_lines() {
        let limits = default_limits();
        let f = formula(
            "x",
            "按摩油",
            &[("甜杏仁油", "20ml"), ("荷荷巴油", "10ml"), ("热水", "适量")],
            None,
        );
        assert_eq!(base_amount(&f, &limits), dec!(30));
    }

    #[test]
    fn test_stated_daily_amount_overrides() {
        let limits = default_limits();
        let f = formula("x", "身体乳", &[("姜精油", "6滴")], Some("每次约0.27ml"));
        assert_eq!(daily_dose(&f, &limits), dec!(0.27));
    }

    #[test]
    fn test_zero_stated_amount_falls_through() {
        let limits = default_limits();
        let f = formula("x", "护手霜", &[("姜精油", "12滴")], Some("请参考详细说明"));
        assert_eq!(daily_dose(&f, &limits), dec!(0.02));
    }

    #[test]
    fn test_skin_contact_amount_zero_for_not_counted() {
        let limits = default_limits();
        assert_eq!(skin_contact_daily_amount(&diffuser(), &limits), Decimal::ZERO);

        let marked = formula("m", "按摩油", &[("姜精油", "2滴")], Some("不计入"));
        assert_eq!(skin_contact_daily_amount(&marked, &limits), Decimal::ZERO);

        assert_eq!(skin_contact_daily_amount(&handcream(), &limits), dec!(0.02));
    }

    #[test]
    fn test_no_oil_is_zero() {
        let limits = default_limits();
        let f = formula("x", "护手霜", &[("基底", "50g")], None);
        assert_eq!(daily_dose(&f, &limits), Decimal::ZERO);
    }

    #[test]
    fn test_aggregate_excludes_non_contact() {
        let limits = default_limits();
        let hc = handcream();
        let df = diffuser();
        let result = aggregate([&hc, &df], &limits);

        assert_eq!(result.skin_contact_total, dec!(0.02));
        // 7 drops diffused in a single session
        assert_eq!(result.total, dec!(0.37));
        assert!(result.is_safe);
        assert!(!result.is_warning);
        assert!(result.warnings.is_empty());
        assert_eq!(result.per_formula[1].medium_type, MediumType::Diffuser);
    }

    #[test]
    fn test_aggregate_deduplicates_by_id() {
        let limits = default_limits();
        let hc = handcream();
        let result = aggregate([&hc, &hc, &hc], &limits);
        assert_eq!(result.per_formula.len(), 1);
        assert_eq!(result.total, dec!(0.02));
    }

    #[test]
    fn test_warning_band() {
        let limits = default_limits();
        let a = formula("a", "按摩油", &[], Some("约0.3ml"));
        let b = formula("b", "按摩油", &[], Some("约0.25ml"));
        let result = aggregate([&a, &b], &limits);
        assert_eq!(result.skin_contact_total, dec!(0.55));
        assert!(result.is_safe);
        assert!(result.is_warning);
        assert_eq!(result.warnings.len(), 1);
        assert_eq!(result.warnings[0].level, UsageWarningLevel::Warning);
    }

    #[test]
    fn test_danger_above_ceiling() {
        let limits = default_limits();
        let a = formula("a", "按摩油", &[], Some("约0.4ml"));
        let b = formula("b", "身体乳", &[], Some("每次约0.3ml"));
        let result = aggregate([&a, &b], &limits);
        assert!(!result.is_safe);
        assert!(!result.is_warning);
        assert_eq!(result.warnings[0].level, UsageWarningLevel::Danger);
        assert!(result.warnings[0].message.contains("0.700ml"));
    }

    #[test]
    fn test_exactly_at_ceiling_is_warning_not_danger() {
        let limits = default_limits();
        let a = formula("a", "按摩油", &[], Some("约0.6ml"));
        let result = aggregate([&a], &limits);
        assert!(result.is_safe);
        assert_eq!(result.warnings[0].level, UsageWarningLevel::Warning);
    }

    #[test]
    fn test_scenario_aggregation_is_idempotent() {
        let limits = default_limits();
        let catalog = FormulaCatalog::from_formulas(vec![handcream(), diffuser()]).unwrap();
        let scenario = Scenario {
            name: "工作日".into(),
            description: String::new(),
            timeline: vec![
                slot("09:00", &["hc", "df"]),
                slot("14:00", &["hc", "missing"]),
            ],
        };

        let first = aggregate_scenario(&scenario, &catalog, &limits);
        let second = aggregate_scenario(&scenario, &catalog, &limits);
        assert_eq!(first, second);
        assert_eq!(first.scenario_name.as_deref(), Some("工作日"));
        assert_eq!(first.per_formula.len(), 2);
        assert!(first.skin_contact_total <= first.total);
    }

    #[test]
    fn test_unnamed_scenario_label() {
        let limits = default_limits();
        let catalog = FormulaCatalog::from_formulas(vec![handcream()]).unwrap();
        let scenario = Scenario {
            name: String::new(),
            description: String::new(),
            timeline: vec![slot("09:00", &["hc"])],
        };
        let result = aggregate_scenario(&scenario, &catalog, &limits);
        assert_eq!(result.scenario_name.as_deref(), Some("未知场景"));
    }

    #[test]
    fn test_plan_aggregation_counts_shared_formula_once() {
        let limits = default_limits();
        let catalog = FormulaCatalog::from_formulas(vec![handcream(), diffuser()]).unwrap();
        let plan = CandidatePlan {
            scenarios: vec![
                Scenario {
                    name: "A".into(),
                    description: String::new(),
                    timeline: vec![slot("09:00", &["hc"])],
                },
                Scenario {
                    name: "B".into(),
                    description: String::new(),
                    timeline: vec![slot("10:00", &["hc", "df"])],
                },
            ],
        };
        let result = aggregate_plan(&plan, &catalog, &limits);
        assert_eq!(result.per_formula.len(), 2);
        assert_eq!(result.skin_contact_total, dec!(0.02));
        assert_eq!(result.scenario_name, None);
    }

    #[test]
    fn test_totals_by_medium() {
        let limits = default_limits();
        let hc = handcream();
        let df = diffuser();
        let result = aggregate([&hc, &df], &limits);
        let totals = result.totals_by_medium();
        assert_eq!(totals[0], (MediumType::Handcream, dec!(0.02)));
        assert_eq!(totals[1], (MediumType::Diffuser, dec!(0.35)));
    }

    #[test]
    fn test_oversized_base_saturates() {
        let limits = default_limits();
        let f = formula(
            "big",
            "按摩油",
            &[("甜杏仁油", "70000000000000000000000000000ml"), ("薰衣草精油", "10滴")],
            None,
        );
        assert_eq!(usage_days(&f, &limits), u32::MAX);
        let dose = daily_dose(&f, &limits);
        assert!(dose > Decimal::ZERO && dose < dec!(0.001));

        let twice = formula(
            "big2",
            "按摩油",
            &[("甜杏仁油", "70000000000000000000000000000ml"), ("荷荷巴油", "70000000000000000000000000000ml")],
            None,
        );
        assert_eq!(base_amount(&twice, &limits), Decimal::MAX);
    }

    #[test]
    fn test_oversized_stated_amounts_saturate_totals() {
        let limits = default_limits();
        let a = formula("a", "护手霜", &[("薰衣草精油", "1滴")], Some("70000000000000000000000000000ml"));
        let b = formula("b", "身体乳", &[("薰衣草精油", "1滴")], Some("70000000000000000000000000000ml"));
        let result = aggregate([&a, &b], &limits);
        assert_eq!(result.total, Decimal::MAX);
        assert_eq!(result.skin_contact_total, Decimal::MAX);
        assert!(!result.is_safe);
        assert_eq!(result.totals_by_medium().len(), 2);
    }
}
