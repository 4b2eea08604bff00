pub mod intake;
pub mod schema;
pub mod validate;

pub use intake::{accept_plan, parse_plan_text, AcceptedPlan};
pub use schema::{CandidatePlan, PlanFormula, Scenario, TimelineSlot};
pub use validate::{validate, Severity, ValidationResult};
