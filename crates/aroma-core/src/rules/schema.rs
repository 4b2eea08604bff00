use crate::model::MediumType;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Reference limits used by the estimator, aggregator and evaluator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LimitsDef {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub version: String,
    pub daily: DailyLimitsDef,
    /// Volume of one drop in ml.
    pub drop_volume_ml: Decimal,
    /// Base quantity assumed when no carrier line can be parsed.
    pub default_base_amount: Decimal,
    /// Total-concentration ceiling (%) per medium.
    pub medium_ceilings: BTreeMap<MediumType, Decimal>,
    /// Ceiling for media missing from `medium_ceilings`.
    pub default_ceiling: Decimal,
    /// Fraction of a ceiling or cap above which a warning is raised.
    pub warning_fraction: Decimal,
    /// Per-oil concentration cap (%). A cap of 0 means not for skin use.
    pub oil_caps: BTreeMap<String, Decimal>,
    /// Fallback cap (%) per medium for oils without a documented cap.
    #[serde(default)]
    pub conservative_limits: BTreeMap<MediumType, Decimal>,
    pub conservative_default: Decimal,
    pub usage_periods: UsagePeriodsDef,
    /// Annotated entries for display only.
    #[serde(default)]
    pub references: Vec<ReferenceLimitDef>,
}

/// Daily skin-contact ceilings in ml.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyLimitsDef {
    pub skin_contact_ceiling_ml: Decimal,
    pub advisory_threshold_ml: Decimal,
}

/// Proportional scaling anchored at a reference pack size.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct UsagePeriodDef {
    pub reference_pack: Decimal,
    pub reference_days: Decimal,
    pub floor_days: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UsagePeriodsDef {
    pub handcream: UsagePeriodDef,
    pub bodylotion: UsagePeriodDef,
    /// Base oil below `roll_on_below` (roll-on bottles).
    pub roll_on: UsagePeriodDef,
    /// Base oil at or above `roll_on_below` (massage oil).
    pub massage_oil: UsagePeriodDef,
    pub roll_on_below: Decimal,
    /// Also used for rosewater sprays.
    pub spray: UsagePeriodDef,
    pub rosewater: UsagePeriodDef,
    pub alcohol: UsagePeriodDef,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReferenceLimitDef {
    pub name: String,
    pub max: Decimal,
    #[serde(default)]
    pub note: Option<String>,
}

impl LimitsDef {
    pub fn medium_ceiling(&self, medium: MediumType) -> Decimal {
        self.medium_ceilings
            .get(&medium)
            .copied()
            .unwrap_or(self.default_ceiling)
    }

    pub fn conservative_limit(&self, medium: MediumType) -> Decimal {
        self.conservative_limits
            .get(&medium)
            .copied()
            .unwrap_or(self.conservative_default)
    }

    /// Exact cap-table lookup; callers normalize the name first.
    pub fn oil_cap(&self, name: &str) -> Option<Decimal> {
        self.oil_caps.get(name).copied()
    }
}
