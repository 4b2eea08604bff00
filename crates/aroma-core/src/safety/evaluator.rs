use crate::classify::classify_recipe;
use crate::model::{MediumType, Recipe};
use crate::parsing::normalize_oil_name;
use crate::rules::schema::LimitsDef;
use crate::safety::outcome::SafetyAssessment;
use rust_decimal::Decimal;
use tracing::debug;

/// Checks recipes against the medium ceilings and per-oil caps of a limits
/// table.
pub struct SafetyEvaluator<'a> {
    limits: &'a LimitsDef,
}

impl<'a> SafetyEvaluator<'a> {
    pub fn new(limits: &'a LimitsDef) -> Self {
        Self { limits }
    }

    /// Assess a recipe.
    ///
    /// Returns an unassessed result when the dilution is not positive or
    /// there are no oils. Each oil's effective concentration is the overall
    /// dilution scaled by its share of the summed oil amounts.
    pub fn evaluate(&self, recipe: &Recipe) -> SafetyAssessment {
        if recipe.dilution <= Decimal::ZERO || recipe.oils.is_empty() {
            return SafetyAssessment::unassessed();
        }

        let medium = classify_recipe(recipe);
        let medium_limit = self.limits.medium_ceiling(medium);
        let mut problems = Vec::new();
        let mut warnings = Vec::new();

        if medium != MediumType::Diffuser {
            self.check_total(recipe.dilution, medium, medium_limit, &mut problems, &mut warnings);
        }

        let mut sum = recipe
            .oils
            .iter()
            .map(|o| o.amount)
            .fold(Decimal::ZERO, Decimal::saturating_add);
        if sum.is_zero() {
            sum = Decimal::ONE;
        }

        for oil in &recipe.oils {
            // share first when the product does not fit
            let pct = recipe
                .dilution
                .checked_mul(oil.amount)
                .and_then(|v| v.checked_div(sum))
                .unwrap_or_else(|| oil.amount / sum * recipe.dilution);
            self.check_oil(&oil.name, pct, medium, &mut problems, &mut warnings);
        }

        let assessment = SafetyAssessment::from_findings(medium, medium_limit, problems, warnings);
        debug!(
            recipe = %recipe.name,
            %medium,
            dilution = %recipe.dilution,
            level = ?assessment.level,
            "evaluated recipe safety"
        );
        assessment
    }

    fn check_total(
        &self,
        dilution: Decimal,
        medium: MediumType,
        limit: Decimal,
        problems: &mut Vec<String>,
        warnings: &mut Vec<String>,
    ) {
        let name = medium.display_name();
        if dilution > limit {
            problems.push(format!(
                "总浓度 {:.2}% 超过{}的安全上限(≤{}%)",
                dilution, name, limit
            ));
        } else if dilution > limit * self.limits.warning_fraction {
            warnings.push(format!(
                "总浓度 {:.2}% 接近{}的安全上限(≤{}%)",
                dilution, name, limit
            ));
        }
    }

    fn check_oil(
        &self,
        raw_name: &str,
        pct: Decimal,
        medium: MediumType,
        problems: &mut Vec<String>,
        warnings: &mut Vec<String>,
    ) {
        let name = normalize_oil_name(raw_name);
        match self.limits.oil_cap(&name) {
            Some(cap) if cap.is_zero() => {
                if pct > Decimal::ZERO {
                    problems.push(format!("{name}: 配方不建议皮肤应用（当前≈{pct:.2}%）"));
                }
            }
            Some(cap) => {
                if pct > cap {
                    problems.push(format!("{name}: 超上限 {cap}%（当前≈{pct:.2}%）"));
                } else if pct > cap * self.limits.warning_fraction {
                    warnings.push(format!("{name}: 接近上限 {cap}%（当前≈{pct:.2}%）"));
                }
            }
            None => {
                let limit = self.limits.conservative_limit(medium);
                if pct > limit {
                    warnings.push(format!(
                        "{name}: 超过{}的保守参考 {limit}%（当前≈{pct:.2}%）",
                        medium.display_name()
                    ));
                }
            }
        }
    }
}
