pub mod builtin;
pub mod schema;

use crate::error::AromaError;
use rust_decimal::Decimal;
use schema::{LimitsDef, UsagePeriodDef};
use std::path::Path;

/// Load a limits table from a JSON file.
pub fn load_limits(path: &Path) -> Result<LimitsDef, AromaError> {
    let content = std::fs::read_to_string(path).map_err(|e| AromaError::LimitsLoad {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    parse_limits(&content, path)
}

/// Parse a limits table from a JSON string.
pub fn parse_limits(json: &str, source: &Path) -> Result<LimitsDef, AromaError> {
    let limits: LimitsDef = serde_json::from_str(json).map_err(|e| AromaError::LimitsLoad {
        path: source.to_path_buf(),
        reason: e.to_string(),
    })?;
    validate_limits(&limits)?;
    Ok(limits)
}

/// Parse a limits table from a JSON string (no file path context).
pub fn parse_limits_str(json: &str) -> Result<LimitsDef, AromaError> {
    let limits: LimitsDef = serde_json::from_str(json).map_err(AromaError::Json)?;
    validate_limits(&limits)?;
    Ok(limits)
}

/// Validate that a limits table is internally consistent.
pub fn validate_limits(limits: &LimitsDef) -> Result<(), AromaError> {
    let daily = &limits.daily;
    if daily.skin_contact_ceiling_ml <= Decimal::ZERO {
        return Err(AromaError::LimitsInvalid(
            "daily skin contact ceiling must be positive".into(),
        ));
    }
    if daily.advisory_threshold_ml < Decimal::ZERO
        || daily.advisory_threshold_ml > daily.skin_contact_ceiling_ml
    {
        return Err(AromaError::LimitsInvalid(format!(
            "advisory threshold {} must lie between 0 and the ceiling {}",
            daily.advisory_threshold_ml, daily.skin_contact_ceiling_ml
        )));
    }

    if limits.drop_volume_ml <= Decimal::ZERO {
        return Err(AromaError::LimitsInvalid(
            "drop volume must be positive".into(),
        ));
    }
    if limits.default_base_amount <= Decimal::ZERO {
        return Err(AromaError::LimitsInvalid(
            "default base amount must be positive".into(),
        ));
    }

    if limits.warning_fraction <= Decimal::ZERO || limits.warning_fraction > Decimal::ONE {
        return Err(AromaError::LimitsInvalid(format!(
            "warning fraction {} must be in (0, 1]",
            limits.warning_fraction
        )));
    }

    if limits.default_ceiling < Decimal::ZERO {
        return Err(AromaError::LimitsInvalid(
            "default ceiling must not be negative".into(),
        ));
    }
    for (medium, ceiling) in &limits.medium_ceilings {
        if *ceiling < Decimal::ZERO {
            return Err(AromaError::LimitsInvalid(format!(
                "medium '{}' has negative ceiling {}",
                medium, ceiling
            )));
        }
    }

    for (oil, cap) in &limits.oil_caps {
        if oil.trim().is_empty() {
            return Err(AromaError::LimitsInvalid(
                "oil name must not be empty".into(),
            ));
        }
        if *cap < Decimal::ZERO {
            return Err(AromaError::LimitsInvalid(format!(
                "oil '{}' has negative cap {}",
                oil, cap
            )));
        }
    }

    if limits.conservative_default < Decimal::ZERO
        || limits.conservative_limits.values().any(|v| *v < Decimal::ZERO)
    {
        return Err(AromaError::LimitsInvalid(
            "conservative limits must not be negative".into(),
        ));
    }

    let periods = &limits.usage_periods;
    let named = [
        ("handcream", &periods.handcream),
        ("bodylotion", &periods.bodylotion),
        ("roll_on", &periods.roll_on),
        ("massage_oil", &periods.massage_oil),
        ("spray", &periods.spray),
        ("rosewater", &periods.rosewater),
        ("alcohol", &periods.alcohol),
    ];
    for (name, period) in named {
        validate_period(name, period)?;
    }
    if periods.roll_on_below <= Decimal::ZERO {
        return Err(AromaError::LimitsInvalid(
            "roll_on_below must be positive".into(),
        ));
    }

    Ok(())
}

fn validate_period(name: &str, period: &UsagePeriodDef) -> Result<(), AromaError> {
    if period.reference_pack <= Decimal::ZERO || period.reference_days <= Decimal::ZERO {
        return Err(AromaError::LimitsInvalid(format!(
            "usage period '{}' needs a positive reference pack and days",
            name
        )));
    }
    if period.floor_days == 0 {
        return Err(AromaError::LimitsInvalid(format!(
            "usage period '{}' must have a floor of at least 1 day",
            name
        )));
    }
    Ok(())
}
