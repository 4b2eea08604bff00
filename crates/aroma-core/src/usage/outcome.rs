use crate::model::MediumType;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UsageWarningLevel {
    /// Above the daily skin-contact ceiling.
    Danger,
    /// Above the advisory threshold, within the ceiling.
    Warning,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageWarning {
    pub level: UsageWarningLevel,
    pub message: String,
}

/// Daily dose contributed by one formula.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormulaUsage {
    pub id: String,
    pub name: String,
    /// Oil consumed per day in ml.
    pub amount_ml: Decimal,
    pub medium_type: MediumType,
}

impl FormulaUsage {
    pub fn is_skin_contact(&self) -> bool {
        self.medium_type.is_skin_contact()
    }
}

/// Combined daily exposure of every formula used in one day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyUsageResult {
    /// Scenario the formulas came from, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scenario_name: Option<String>,
    /// Sum over all formulas in ml/day.
    pub total: Decimal,
    /// Sum over skin-contact formulas only.
    pub skin_contact_total: Decimal,
    pub per_formula: Vec<FormulaUsage>,
    pub warnings: Vec<UsageWarning>,
    /// Skin-contact total within the daily ceiling.
    pub is_safe: bool,
    /// Skin-contact total in the advisory band below the ceiling.
    pub is_warning: bool,
}

impl DailyUsageResult {
    /// Daily oil per medium, in first-seen order.
    pub fn totals_by_medium(&self) -> Vec<(MediumType, Decimal)> {
        let mut totals: Vec<(MediumType, Decimal)> = Vec::new();
        for usage in &self.per_formula {
            match totals.iter_mut().find(|(m, _)| *m == usage.medium_type) {
                Some((_, sum)) => *sum = sum.saturating_add(usage.amount_ml),
                None => totals.push((usage.medium_type, usage.amount_ml)),
            }
        }
        totals
    }
}
