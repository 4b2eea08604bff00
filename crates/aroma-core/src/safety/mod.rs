pub mod evaluator;
pub mod outcome;

pub use evaluator::SafetyEvaluator;
pub use outcome::{SafetyAssessment, SafetyLevel};
