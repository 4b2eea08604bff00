use crate::model::MediumType;
use crate::rules::schema::{UsagePeriodDef, UsagePeriodsDef};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

/// Estimate how many days a prepared batch lasts.
///
/// `base_amount` is the carrier/base quantity (g or ml). The result is
/// `max(floor, round(base_amount / reference_pack * reference_days))` for
/// stored media and exactly 1 for single-use media (footbath, diffuser,
/// alcohol spray). A non-positive base amount yields the floor.
pub fn estimate_days(medium: MediumType, base_amount: Decimal, periods: &UsagePeriodsDef) -> u32 {
    if medium.is_single_use() {
        return 1;
    }
    let period = period_for(medium, base_amount, periods);
    if base_amount <= Decimal::ZERO {
        return period.floor_days;
    }
    scaled_days(base_amount, period).max(period.floor_days)
}

fn period_for(medium: MediumType, base_amount: Decimal, periods: &UsagePeriodsDef) -> &UsagePeriodDef {
    match medium {
        MediumType::Handcream => &periods.handcream,
        MediumType::Bodylotion => &periods.bodylotion,
        MediumType::Spray | MediumType::RosewaterSpray => &periods.spray,
        MediumType::Rosewater => &periods.rosewater,
        MediumType::Alcohol => &periods.alcohol,
        // Base oil and anything unexpected: roll-on vs massage oil by size
        _ => {
            if base_amount < periods.roll_on_below {
                &periods.roll_on
            } else {
                &periods.massage_oil
            }
        }
    }
}

fn scaled_days(base_amount: Decimal, period: &UsagePeriodDef) -> u32 {
    base_amount
        .checked_div(period.reference_pack)
        .and_then(|packs| packs.checked_mul(period.reference_days))
        .map(|days| days.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero))
        .and_then(|days| days.to_u32())
        .unwrap_or(u32::MAX)
}
