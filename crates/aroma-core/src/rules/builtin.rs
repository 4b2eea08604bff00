use crate::error::AromaError;
use crate::rules::schema::LimitsDef;

const DEFAULT_LIMITS_JSON: &str = include_str!("../../../../rules/default-limits.json");

/// Available predefined limits tables.
pub const PRESETS: &[&str] = &["default"];

/// Load a predefined limits table by name.
pub fn load_preset(name: &str) -> Result<LimitsDef, AromaError> {
    match name {
        "default" => {
            let limits: LimitsDef = serde_json::from_str(DEFAULT_LIMITS_JSON)?;
            Ok(limits)
        }
        _ => Err(AromaError::UnknownPreset(format!(
            "unknown preset '{}'. Available: {}",
            name,
            PRESETS.join(", ")
        ))),
    }
}

/// The default reference table.
pub fn default_limits() -> LimitsDef {
    serde_json::from_str(DEFAULT_LIMITS_JSON).expect("embedded default-limits.json is valid")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::MediumType;
    use rust_decimal_macros::dec;

    #[test]
    fn test_load_default_preset() {
        let limits = load_preset("default").unwrap();
        assert_eq!(limits.daily.skin_contact_ceiling_ml, dec!(0.6));
        assert_eq!(limits.daily.advisory_threshold_ml, dec!(0.5));
        assert_eq!(limits.drop_volume_ml, dec!(0.05));
        assert_eq!(limits.oil_caps.len(), 30);
        assert!(!limits.references.is_empty());
    }

    #[test]
    fn test_default_preset_is_valid() {
        crate::rules::validate_limits(&default_limits()).unwrap();
    }

    #[test]
    fn test_medium_ceilings() {
        let limits = default_limits();
        assert_eq!(limits.medium_ceiling(MediumType::BaseOil), dec!(3));
        assert_eq!(limits.medium_ceiling(MediumType::Rosewater), dec!(1.5));
        assert_eq!(limits.medium_ceiling(MediumType::Footbath), dec!(0.5));
        assert_eq!(limits.medium_ceiling(MediumType::Diffuser), dec!(100));
        // Not in the table: falls back to the default ceiling
        assert_eq!(limits.medium_ceiling(MediumType::RosewaterSpray), dec!(2));
        assert_eq!(limits.medium_ceiling(MediumType::AlcoholSpray), dec!(2));
    }

    #[test]
    fn test_conservative_limits() {
        let limits = default_limits();
        assert_eq!(limits.conservative_limit(MediumType::Alcohol), dec!(5));
        assert_eq!(limits.conservative_limit(MediumType::Footbath), dec!(0.3));
        assert_eq!(limits.conservative_limit(MediumType::Handcream), dec!(2));
    }

    #[test]
    fn test_documented_caps() {
        let limits = default_limits();
        assert_eq!(limits.oil_cap("中国肉桂"), Some(dec!(0.1)));
        assert_eq!(limits.oil_cap("佛手柑"), Some(dec!(0.4)));
        assert_eq!(limits.oil_cap("欧薄荷"), Some(dec!(5.4)));
        assert_eq!(limits.oil_cap("不存在"), None);
    }

    #[test]
    fn test_unknown_preset() {
        assert!(load_preset("strict").is_err());
    }
}
