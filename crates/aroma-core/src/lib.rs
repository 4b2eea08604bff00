pub mod catalog;
pub mod classify;
pub mod dilution;
pub mod error;
pub mod model;
pub mod parsing;
pub mod plan;
pub mod rules;
pub mod safety;
pub mod usage;

pub use plan::accept_plan;

use model::{Formula, Recipe, RecipeOil};
use rules::schema::LimitsDef;
use rust_decimal::Decimal;
use safety::{SafetyAssessment, SafetyEvaluator};

/// Build the safety evaluator's input from a catalog formula.
///
/// Oil amounts are in ml. The stated concentration is used as the dilution
/// when present; otherwise it is computed from oil volume over batch size.
pub fn recipe_from_formula(formula: &Formula, limits: &LimitsDef) -> Recipe {
    let oils: Vec<RecipeOil> = formula
        .oils()
        .map(|ing| RecipeOil {
            name: parsing::normalize_oil_name(&ing.name),
            amount: parsing::oil_volume_ml(&ing.amount_text, limits.drop_volume_ml),
        })
        .filter(|oil| oil.amount > Decimal::ZERO)
        .collect();

    let oil_ml = oils
        .iter()
        .map(|o| o.amount)
        .fold(Decimal::ZERO, Decimal::saturating_add);
    let total = usage::daily::base_amount(formula, limits).saturating_add(oil_ml);
    let dilution = formula
        .concentration_text
        .as_deref()
        .and_then(parsing::parse_percent)
        .unwrap_or_else(|| {
            if total > Decimal::ZERO {
                oil_ml / total * Decimal::ONE_HUNDRED
            } else {
                Decimal::ZERO
            }
        });

    Recipe {
        name: formula.name.clone(),
        purpose: formula.subtitle.clone(),
        medium_type: Some(classify::classify_formula(formula)),
        total,
        dilution,
        oils,
        ..Default::default()
    }
}

/// Safety assessment of a catalog formula.
pub fn assess_formula(formula: &Formula, limits: &LimitsDef) -> SafetyAssessment {
    SafetyEvaluator::new(limits).evaluate(&recipe_from_formula(formula, limits))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Ingredient, MediumType};
    use crate::rules::builtin::default_limits;
    use crate::safety::SafetyLevel;
    use rust_decimal_macros::dec;

    fn formula(ingredients: &[(&str, &str)], concentration: Option<&str>) -> Formula {
        Formula {
            id: "t".into(),
            name: "测试护手霜".into(),
            subtitle: "日常".into(),
            ingredients: ingredients
                .iter()
                .map(|(n, a)| Ingredient::new(*n, *a))
                .collect(),
            daily_amount_text: None,
            concentration_text: concentration.map(String::from),
        }
    }

    #[test]
    fn test_recipe_from_formula_computes_dilution() {
        let limits = default_limits();
        let f = formula(&[("无香护手霜基底", "48g"), ("甜橙精油", "12滴")], None);
        let r = recipe_from_formula(&f, &limits);
        assert_eq!(r.total, dec!(48.6));
        assert_eq!(r.oils, vec![RecipeOil { name: "甜橙".into(), amount: dec!(0.6) }]);
        assert_eq!(r.medium_type, Some(MediumType::Handcream));
        assert!(r.dilution > dec!(1.23) && r.dilution < dec!(1.24));
    }

    #[test]
    fn test_stated_concentration_wins() {
        let limits = default_limits();
        let f = formula(&[("基底", "50g"), ("甜橙精油", "2滴")], Some("1.8%"));
        assert_eq!(recipe_from_formula(&f, &limits).dilution, dec!(1.8));
    }

    #[test]
    fn test_assess_formula_flags_oil_cap() {
        let limits = default_limits();
        let f = formula(&[("基底", "50g"), ("中国肉桂精油", "2滴")], None);
        let a = assess_formula(&f, &limits);
        assert_eq!(a.level, SafetyLevel::Red);
        assert!(a.problems[0].starts_with("中国肉桂: 超上限 0.1%"));
    }

    #[test]
    fn test_formula_without_oils_is_unassessed() {
        let limits = default_limits();
        let f = formula(&[("基底", "50g")], None);
        assert_eq!(assess_formula(&f, &limits).level, SafetyLevel::Unassessed);
    }
}
