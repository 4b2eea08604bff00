use crate::error::AromaError;
use crate::plan::schema::CandidatePlan;
use crate::plan::validate::{validate, ValidationResult};
use regex::Regex;
use serde_json::Value;
use std::collections::HashSet;
use std::sync::LazyLock;
use tracing::{info, warn};

/// First `{` through last `}`.
///
/// Stray braces in surrounding prose can widen the span past the intended
/// object; such input then fails to parse and is rejected.
static OBJECT_SPAN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\{.*\}").expect("valid regex"));

/// A plan that passed validation, with any non-fatal findings.
#[derive(Debug, Clone)]
pub struct AcceptedPlan {
    pub plan: CandidatePlan,
    pub validation: ValidationResult,
    /// The object had to be cut out of surrounding text.
    pub repaired: bool,
}

/// Parse the raw text returned by the recommendation service.
///
/// Markdown code fences are stripped before a direct parse. If that fails,
/// the outermost `{...}` span of the raw text is parsed instead. Returns the
/// JSON value and whether the fallback was used.
pub fn parse_plan_text(raw: &str) -> Result<(Value, bool), AromaError> {
    let cleaned = raw.replace("```json", "").replace("```", "");
    match serde_json::from_str::<Value>(cleaned.trim()) {
        Ok(value) => Ok((value, false)),
        Err(direct) => {
            let span = OBJECT_SPAN
                .find(raw)
                .ok_or_else(|| AromaError::PlanParse(format!("no JSON object found: {direct}")))?;
            let value = serde_json::from_str::<Value>(span.as_str())
                .map_err(|e| AromaError::PlanParse(e.to_string()))?;
            warn!(direct_error = %direct, "plan text was not pure JSON, extracted object span");
            Ok((value, true))
        }
    }
}

/// Parse, validate and type a candidate plan in one step.
///
/// A plan is accepted or discarded as a whole: any validation error rejects
/// it with [`AromaError::PlanRejected`]. Warnings are returned alongside the
/// accepted plan.
pub fn accept_plan<S: AsRef<str>>(
    raw: &str,
    available: &HashSet<&str>,
    usage_types: &[S],
) -> Result<AcceptedPlan, AromaError> {
    let (value, repaired) = parse_plan_text(raw)?;
    let validation = validate(&value, available, usage_types);

    if validation.is_rejected() {
        warn!(errors = ?validation.errors, "plan rejected");
        return Err(AromaError::PlanRejected {
            errors: validation.errors,
        });
    }

    let plan: CandidatePlan =
        serde_json::from_value(value).map_err(|e| AromaError::PlanParse(e.to_string()))?;
    info!(
        scenarios = plan.scenarios.len(),
        warnings = validation.warnings.len(),
        repaired,
        "plan accepted"
    );
    Ok(AcceptedPlan {
        plan,
        validation,
        repaired,
    })
}
