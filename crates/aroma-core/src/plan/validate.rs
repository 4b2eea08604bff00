use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashSet;
use std::sync::LazyLock;

static HH_MM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{2}:[0-9]{2}$").expect("valid regex"));

/// Soft cap on formulas sharing one usage type at one time-point.
const MAX_PER_USAGE_TYPE: usize = 2;
const MIN_SCENARIOS: usize = 2;
const MIN_TIME_POINTS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    /// True iff `errors` is empty.
    pub valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    pub severity: Severity,
}

impl ValidationResult {
    fn fatal(message: &str) -> Self {
        Self {
            valid: false,
            errors: vec![message.to_string()],
            warnings: Vec::new(),
            severity: Severity::Error,
        }
    }

    pub fn is_rejected(&self) -> bool {
        self.severity == Severity::Error
    }
}

/// Check a candidate plan against the formula catalog and the usage types
/// the user selected.
///
/// Works on the raw JSON so that structural defects (missing or mistyped
/// fields) can be reported rather than failing deserialization. Structural
/// defects and unknown formula ids are errors and skip the rest of their
/// branch; content-quality issues are warnings.
pub fn validate<S: AsRef<str>>(
    plan: &Value,
    available: &HashSet<&str>,
    usage_types: &[S],
) -> ValidationResult {
    let scenarios = match plan.get("scenarios") {
        None | Some(Value::Null) | Some(Value::Bool(false)) => {
            return ValidationResult::fatal("响应中缺少scenarios字段")
        }
        Some(Value::Array(items)) => items,
        Some(_) => return ValidationResult::fatal("scenarios必须是数组"),
    };
    if scenarios.is_empty() {
        return ValidationResult::fatal("scenarios数组为空");
    }

    let mut check = PlanCheck {
        available,
        usage_types: usage_types.iter().map(|u| u.as_ref()).collect(),
        errors: Vec::new(),
        warnings: Vec::new(),
    };

    if scenarios.len() < MIN_SCENARIOS {
        check
            .warnings
            .push("只生成了1个场景，建议生成2个不同的场景".to_string());
    }
    for (i, scenario) in scenarios.iter().enumerate() {
        check.scenario(i + 1, scenario);
    }

    let severity = if check.errors.is_empty() {
        Severity::Warning
    } else {
        Severity::Error
    };
    ValidationResult {
        valid: check.errors.is_empty(),
        errors: check.errors,
        warnings: check.warnings,
        severity,
    }
}

struct PlanCheck<'a> {
    available: &'a HashSet<&'a str>,
    usage_types: Vec<&'a str>,
    errors: Vec<String>,
    warnings: Vec<String>,
}

impl PlanCheck<'_> {
    fn scenario(&mut self, n: usize, scenario: &Value) {
        if text(scenario.get("name")).is_none() || text(scenario.get("description")).is_none() {
            self.warnings.push(format!("场景{n}缺少名称或描述"));
        }

        let Some(timeline) = scenario.get("timeline").and_then(Value::as_array) else {
            self.errors
                .push(format!("场景{n}缺少timeline或timeline不是数组"));
            return;
        };
        if timeline.is_empty() {
            self.errors.push(format!("场景{n}的timeline为空"));
            return;
        }
        if timeline.len() < MIN_TIME_POINTS {
            self.warnings.push(format!("场景{n}的时间点过少（少于3个）"));
        }

        for (j, slot) in timeline.iter().enumerate() {
            self.time_point(n, j + 1, slot);
        }
    }

    fn time_point(&mut self, n: usize, m: usize, slot: &Value) {
        let time_ok = slot
            .get("time")
            .and_then(Value::as_str)
            .is_some_and(|t| HH_MM.is_match(t));
        if !time_ok {
            self.errors.push(format!(
                "场景{n}的时间点{m}的时间格式不正确（应为HH:MM格式）"
            ));
        }

        let Some(formulas) = slot.get("formulas").and_then(Value::as_array) else {
            self.errors
                .push(format!("场景{n}的时间点{m}缺少formulas或formulas不是数组"));
            return;
        };
        if formulas.is_empty() {
            self.errors.push(format!("场景{n}的时间点{m}的formulas为空"));
            return;
        }

        // (usage type, count) in first-seen order
        let mut per_usage: Vec<(String, usize)> = Vec::new();
        for (idx, entry) in formulas.iter().enumerate() {
            let k = idx + 1;
            let Some(id) = text(entry.get("formulaId")) else {
                self.errors
                    .push(format!("场景{n}的时间点{m}的配方{k}缺少formulaId"));
                continue;
            };
            if !self.available.contains(id.as_str()) {
                self.errors
                    .push(format!("场景{n}的时间点{m}使用了不存在的配方ID: {id}"));
                continue;
            }
            let Some(usage) = text(entry.get("usageType")) else {
                self.errors
                    .push(format!("场景{n}的时间点{m}的配方{k}缺少usageType"));
                continue;
            };
            if !self.usage_types.contains(&usage.as_str()) {
                self.warnings
                    .push(format!("场景{n}的时间点{m}使用了未选择的使用方式: {usage}"));
            }
            match per_usage.iter_mut().find(|(u, _)| *u == usage) {
                Some((_, count)) => *count += 1,
                None => per_usage.push((usage, 1)),
            }
        }

        for (usage, count) in per_usage {
            if count > MAX_PER_USAGE_TYPE {
                self.warnings.push(format!(
                    "场景{n}的时间点{m}的{usage}使用方式推荐了{count}个配方，建议最多2个"
                ));
            }
        }
    }
}

/// Non-empty text of a string or numeric field.
fn text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
