pub mod daily;
pub mod outcome;
pub mod period;

pub use daily::{
    aggregate, aggregate_plan, aggregate_scenario, daily_dose, skin_contact_daily_amount,
};
pub use outcome::{DailyUsageResult, FormulaUsage, UsageWarning, UsageWarningLevel};
pub use period::estimate_days;
