use crate::model::{Formula, MediumType, Recipe};
use tracing::debug;

const DIFFUSER_KEYWORDS: &[&str] = &["扩香", "diffuser"];
const FOOTBATH_KEYWORDS: &[&str] = &["泡脚", "泡澡", "footbath", "bath"];
const HANDCREAM_KEYWORDS: &[&str] = &["护手霜", "handcream"];
const BODYLOTION_KEYWORDS: &[&str] = &["身体乳", "bodylotion"];
const ROSEWATER_KEYWORDS: &[&str] = &["纯露", "rosewater"];
const SPRAY_KEYWORDS: &[&str] = &["喷雾", "spray"];
const ALCOHOL_KEYWORDS: &[&str] = &["乙醇", "酒精", "双脱醛", "alcohol", "ethanol"];

/// Lower-cased text the formula rules look at.
struct FormulaSignals {
    /// Name and subtitle.
    text: String,
    has_handcream: bool,
    has_bodylotion: bool,
    has_rosewater: bool,
    has_alcohol: bool,
}

impl FormulaSignals {
    fn new(formula: &Formula) -> Self {
        let text = format!("{} {}", formula.name, formula.subtitle).to_lowercase();
        let names: Vec<String> = formula
            .ingredients
            .iter()
            .map(|i| i.name.to_lowercase())
            .collect();
        let any_ingredient = |pred: fn(&str) -> bool| names.iter().any(|n| pred(n.as_str()));

        Self {
            has_handcream: any_ingredient(|n| n.contains("护手霜")),
            has_bodylotion: any_ingredient(|n| n.contains("身体乳")),
            has_rosewater: any_ingredient(|n| {
                n.contains("纯露") || (n.contains("玫瑰") && n.contains('水'))
            }),
            has_alcohol: any_ingredient(|n| contains_any(n, ALCOHOL_KEYWORDS)),
            text,
        }
    }

    fn mentions(&self, keywords: &[&str]) -> bool {
        contains_any(&self.text, keywords)
    }

    fn is_rosewater(&self) -> bool {
        self.has_rosewater || self.mentions(ROSEWATER_KEYWORDS)
    }
}

type FormulaRule = (fn(&FormulaSignals) -> bool, MediumType);

/// Evaluated top to bottom; the first matching rule decides.
///
/// Order matters: "bath" also matches "footbath", and rosewater or alcohol
/// formulas usually mention "喷雾" too.
const FORMULA_RULES: &[FormulaRule] = &[
    (|s| s.mentions(DIFFUSER_KEYWORDS), MediumType::Diffuser),
    (|s| s.mentions(FOOTBATH_KEYWORDS), MediumType::Footbath),
    (
        |s| s.has_handcream || s.mentions(HANDCREAM_KEYWORDS),
        MediumType::Handcream,
    ),
    (
        |s| s.has_bodylotion || s.mentions(BODYLOTION_KEYWORDS),
        MediumType::Bodylotion,
    ),
    (
        |s| s.is_rosewater() && s.mentions(SPRAY_KEYWORDS),
        MediumType::RosewaterSpray,
    ),
    (|s| s.is_rosewater(), MediumType::Rosewater),
    (
        |s| s.has_alcohol && s.mentions(SPRAY_KEYWORDS),
        MediumType::AlcoholSpray,
    ),
    (|s| s.mentions(SPRAY_KEYWORDS), MediumType::Spray),
];

/// Infer the delivery medium of a catalog formula from its name, subtitle
/// and ingredient names. Falls back to base oil.
pub fn classify_formula(formula: &Formula) -> MediumType {
    let signals = FormulaSignals::new(formula);
    let medium = FORMULA_RULES
        .iter()
        .find(|(matches, _)| matches(&signals))
        .map(|(_, medium)| *medium)
        .unwrap_or(MediumType::BaseOil);
    debug!(formula = %formula.id, %medium, "classified formula medium");
    medium
}

struct RecipeSignals {
    name: String,
    purpose: String,
    carrier: String,
    solvent: String,
}

type RecipeRule = (fn(&RecipeSignals) -> bool, MediumType);

const RECIPE_RULES: &[RecipeRule] = &[
    (
        |s| contains_any(&s.name, DIFFUSER_KEYWORDS) || s.purpose.contains("扩香"),
        MediumType::Diffuser,
    ),
    (|s| contains_any(&s.name, SPRAY_KEYWORDS), MediumType::Spray),
    (
        |s| contains_any(&s.name, FOOTBATH_KEYWORDS),
        MediumType::Footbath,
    ),
    (
        |s| contains_any(&s.name, HANDCREAM_KEYWORDS),
        MediumType::Handcream,
    ),
    (
        |s| contains_any(&s.name, BODYLOTION_KEYWORDS),
        MediumType::Bodylotion,
    ),
    (
        |s| s.solvent.contains("玫瑰") || s.solvent.contains("纯露") || s.carrier.contains("玫瑰"),
        MediumType::Rosewater,
    ),
    (
        |s| contains_any(&s.solvent, &["乙醇", "alcohol", "酒精"]),
        MediumType::Alcohol,
    ),
];

/// Medium of a recipe handed to the safety evaluator.
///
/// An explicit `medium_type` wins; otherwise the name, purpose, carrier and
/// solvent text decide, defaulting to base oil.
pub fn classify_recipe(recipe: &Recipe) -> MediumType {
    if let Some(medium) = recipe.medium_type {
        return medium;
    }
    let signals = RecipeSignals {
        name: recipe.name.to_lowercase(),
        purpose: recipe.purpose.to_lowercase(),
        carrier: recipe.carrier.to_lowercase(),
        solvent: recipe.solvent.to_lowercase(),
    };
    RECIPE_RULES
        .iter()
        .find(|(matches, _)| matches(&signals))
        .map(|(_, medium)| *medium)
        .unwrap_or(MediumType::BaseOil)
}

fn contains_any(text: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|k| text.contains(k))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Ingredient;

    fn formula(name: &str, subtitle: &str, ingredients: &[(&str, &str)]) -> Formula {
        Formula {
            id: "t".into(),
            name: name.into(),
            subtitle: subtitle.into(),
            ingredients: ingredients
                .iter()
                .map(|(n, a)| Ingredient::new(*n, *a))
                .collect(),
            daily_amount_text: None,
            concentration_text: None,
        }
    }

    #[test]
    fn test_diffuser_wins_over_everything() {
        let f = formula("办公室提神扩香", "喷雾也可", &[("玫瑰纯露", "50ml")]);
        assert_eq!(classify_formula(&f), MediumType::Diffuser);
    }

    #[test]
    fn test_footbath_and_bath() {
        assert_eq!(
            classify_formula(&formula("温阳循环泡脚液", "", &[])),
            MediumType::Footbath
        );
        assert_eq!(
            classify_formula(&formula("Relaxing Bath Soak", "", &[])),
            MediumType::Footbath
        );
    }

    #[test]
    fn test_handcream_from_ingredient() {
        let f = formula("理气清神", "", &[("无香护手霜基底", "50g"), ("甜橙精油", "2滴")]);
        assert_eq!(classify_formula(&f), MediumType::Handcream);
    }

    #[test]
    fn test_bodylotion_from_name() {
        let f = formula("温阳循环身体乳", "", &[]);
        assert_eq!(classify_formula(&f), MediumType::Bodylotion);
    }

    #[test]
    fn test_rosewater_spray_split() {
        let spray = formula("深度助眠喷雾", "", &[("玫瑰纯露", "50ml")]);
        assert_eq!(classify_formula(&spray), MediumType::RosewaterSpray);

        let plain = formula("舒缓爽肤", "", &[("玫瑰花水", "100ml")]);
        assert_eq!(classify_formula(&plain), MediumType::Rosewater);
    }

    #[test]
    fn test_alcohol_spray_requires_spray_keyword() {
        let spray = formula("提神醒脑喷雾", "", &[("双脱醛乙醇", "50ml")]);
        assert_eq!(classify_formula(&spray), MediumType::AlcoholSpray);

        let no_spray = formula("香水", "", &[("95%乙醇", "10ml")]);
        assert_eq!(classify_formula(&no_spray), MediumType::BaseOil);
    }

    #[test]
    fn test_plain_spray() {
        let f = formula("Room Spray", "", &[("纯净水", "50ml")]);
        assert_eq!(classify_formula(&f), MediumType::Spray);
    }

    #[test]
    fn test_default_base_oil() {
        let f = formula("肩颈按摩油", "", &[("甜杏仁油", "30ml")]);
        assert_eq!(classify_formula(&f), MediumType::BaseOil);
    }

    #[test]
    fn test_case_insensitive() {
        let f = formula("HandCream Blend", "", &[]);
        assert_eq!(classify_formula(&f), MediumType::Handcream);
    }

    #[test]
    fn test_recipe_explicit_medium() {
        let r = Recipe {
            name: "扩香".into(),
            medium_type: Some(MediumType::Handcream),
            ..Default::default()
        };
        assert_eq!(classify_recipe(&r), MediumType::Handcream);
    }

    #[test]
    fn test_recipe_inference() {
        let diffuser = Recipe {
            name: "晨间".into(),
            purpose: "扩香提神".into(),
            ..Default::default()
        };
        assert_eq!(classify_recipe(&diffuser), MediumType::Diffuser);

        let rosewater = Recipe {
            name: "爽肤".into(),
            solvent: "玫瑰纯露".into(),
            ..Default::default()
        };
        assert_eq!(classify_recipe(&rosewater), MediumType::Rosewater);

        let alcohol = Recipe {
            name: "香水".into(),
            solvent: "95%酒精".into(),
            ..Default::default()
        };
        assert_eq!(classify_recipe(&alcohol), MediumType::Alcohol);

        let plain = Recipe {
            name: "按摩".into(),
            carrier: "荷荷巴油".into(),
            ..Default::default()
        };
        assert_eq!(classify_recipe(&plain), MediumType::BaseOil);
    }
}
