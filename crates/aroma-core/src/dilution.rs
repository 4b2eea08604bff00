//! Dilution arithmetic for preparing a blend by hand.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

/// Drops per ml assumed when the dropper is not specified.
pub const DEFAULT_DROPS_PER_ML: u32 = 20;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DilutionResult {
    /// Essential oil needed, in ml.
    pub eo_ml: Decimal,
    pub drops: u32,
    pub message: String,
}

/// A recommended concentration band for a kind of use.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReferenceRange {
    pub range: &'static str,
    pub min: Decimal,
    pub max: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<&'static str>,
}

/// Oil volume and drop count for `total_ml` of blend at `dilution_pct`.
///
/// Any non-positive input yields zeros and a prompt to fill in the values.
pub fn calculate(total_ml: Decimal, dilution_pct: Decimal, drops_per_ml: u32) -> DilutionResult {
    if total_ml <= Decimal::ZERO || dilution_pct <= Decimal::ZERO || drops_per_ml == 0 {
        return DilutionResult {
            eo_ml: Decimal::ZERO,
            drops: 0,
            message: "请输入总量和稀释浓度".to_string(),
        };
    }

    let eo_ml = (total_ml / Decimal::ONE_HUNDRED).saturating_mul(dilution_pct);
    let drops = ml_to_drops(eo_ml, drops_per_ml);
    DilutionResult {
        eo_ml,
        drops,
        message: format!(
            "{}% 的配方中：精油≈ {:.2} mL ≈ {} 滴（按 {} 滴/mL）",
            dilution_pct.normalize(),
            eo_ml,
            drops,
            drops_per_ml
        ),
    }
}

pub fn drops_to_ml(drops: u32, drops_per_ml: u32) -> Decimal {
    if drops_per_ml == 0 {
        return Decimal::ZERO;
    }
    Decimal::from(drops) / Decimal::from(drops_per_ml)
}

/// Rounded to the nearest whole drop, saturating at `u32::MAX`.
pub fn ml_to_drops(ml: Decimal, drops_per_ml: u32) -> u32 {
    if ml <= Decimal::ZERO {
        return 0;
    }
    ml.saturating_mul(Decimal::from(drops_per_ml))
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_u32()
        .unwrap_or(u32::MAX)
}

/// Concentration in % of `drops` in `total_ml` of blend; 0 for an empty
/// total.
pub fn concentration_from_drops(drops: u32, total_ml: Decimal, drops_per_ml: u32) -> Decimal {
    if total_ml <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    drops_to_ml(drops, drops_per_ml)
        .checked_div(total_ml)
        .map_or(Decimal::MAX, |share| share.saturating_mul(Decimal::ONE_HUNDRED))
}

pub fn reference_ranges() -> Vec<ReferenceRange> {
    vec![
        ReferenceRange {
            range: "面部/敏感",
            min: Decimal::new(5, 1),
            max: Decimal::ONE,
            note: None,
        },
        ReferenceRange {
            range: "全身日常",
            min: Decimal::ONE,
            max: Decimal::TWO,
            note: None,
        },
        ReferenceRange {
            range: "短期局部",
            min: Decimal::from(3),
            max: Decimal::from(5),
            note: None,
        },
        ReferenceRange {
            range: "香水/点涂",
            min: Decimal::from(5),
            max: Decimal::TEN,
            note: Some("注意个别油的上限"),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_calculate_two_percent_of_thirty() {
        let r = calculate(dec!(30), dec!(2), DEFAULT_DROPS_PER_ML);
        assert_eq!(r.eo_ml, dec!(0.6));
        assert_eq!(r.drops, 12);
        assert_eq!(r.message, "2% 的配方中：精油≈ 0.60 mL ≈ 12 滴（按 20 滴/mL）");
    }

    #[test]
    fn test_calculate_rounds_drops() {
        // 10ml at 1.5% = 0.15ml = 3 drops; 10ml at 1.25% = 2.5 drops -> 3
        assert_eq!(calculate(dec!(10), dec!(1.5), 20).drops, 3);
        assert_eq!(calculate(dec!(10), dec!(1.25), 20).drops, 3);
    }

    #[test]
    fn test_calculate_missing_input() {
        let r = calculate(Decimal::ZERO, dec!(2), 20);
        assert_eq!(r.eo_ml, Decimal::ZERO);
        assert_eq!(r.drops, 0);
        assert_eq!(r.message, "请输入总量和稀释浓度");
        assert_eq!(calculate(dec!(10), dec!(2), 0).drops, 0);
    }

    #[test]
    fn test_drop_conversions() {
        assert_eq!(drops_to_ml(12, 20), dec!(0.6));
        assert_eq!(ml_to_drops(dec!(0.6), 20), 12);
        assert_eq!(ml_to_drops(dec!(0.33), 20), 7);
        assert_eq!(drops_to_ml(5, 0), Decimal::ZERO);
    }

    #[test]
    fn test_concentration_from_drops() {
        assert_eq!(concentration_from_drops(12, dec!(30), 20), dec!(2));
        assert_eq!(concentration_from_drops(12, Decimal::ZERO, 20), Decimal::ZERO);
    }

    #[test]
    fn test_reference_ranges_ordered() {
        let ranges = reference_ranges();
        assert_eq!(ranges.len(), 4);
        assert_eq!(ranges[0].min, dec!(0.5));
        assert!(ranges.windows(2).all(|w| w[0].max <= w[1].min || w[0].min < w[1].min));
        assert_eq!(ranges[3].note, Some("注意个别油的上限"));
    }

    #[test]
    fn test_oversized_values_saturate() {
        assert_eq!(ml_to_drops(Decimal::MAX, 20), u32::MAX);
        assert_eq!(ml_to_drops(dec!(-1), 20), 0);

        let r = calculate(Decimal::MAX, dec!(200), 20);
        assert_eq!(r.eo_ml, Decimal::MAX);
        assert_eq!(r.drops, u32::MAX);

        let tiny = Decimal::new(1, 28);
        assert_eq!(concentration_from_drops(12, tiny, 20), Decimal::MAX);
    }
}
