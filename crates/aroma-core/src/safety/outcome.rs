use crate::model::MediumType;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Overall verdict of a safety assessment.
///
/// Ordered from least to most severe so verdicts can be compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SafetyLevel {
    /// Not enough input to judge (no dilution or no oils).
    Unassessed,
    Green,
    Yellow,
    Red,
}

impl SafetyLevel {
    /// Status label shown next to a formula.
    pub fn label(&self) -> &'static str {
        match self {
            SafetyLevel::Unassessed => "未评估",
            SafetyLevel::Green => "安全范围",
            SafetyLevel::Yellow => "接近上限",
            SafetyLevel::Red => "超出上限",
        }
    }
}

/// Result of checking one recipe against the medium ceiling and oil caps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SafetyAssessment {
    /// Derived from `problems` and `warnings`, never set independently.
    pub level: SafetyLevel,
    /// Threshold breaches.
    pub problems: Vec<String>,
    /// Values close to a threshold, or above a conservative fallback.
    pub warnings: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub medium_type: Option<MediumType>,
    /// Total-concentration ceiling in % for the medium.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub medium_limit: Option<Decimal>,
}

impl SafetyAssessment {
    pub fn unassessed() -> Self {
        Self {
            level: SafetyLevel::Unassessed,
            problems: Vec::new(),
            warnings: Vec::new(),
            medium_type: None,
            medium_limit: None,
        }
    }

    pub(crate) fn from_findings(
        medium_type: MediumType,
        medium_limit: Decimal,
        problems: Vec<String>,
        warnings: Vec<String>,
    ) -> Self {
        let level = if !problems.is_empty() {
            SafetyLevel::Red
        } else if !warnings.is_empty() {
            SafetyLevel::Yellow
        } else {
            SafetyLevel::Green
        };
        Self {
            level,
            problems,
            warnings,
            medium_type: Some(medium_type),
            medium_limit: Some(medium_limit),
        }
    }

    /// Problems then warnings, one per line.
    pub fn message(&self) -> String {
        self.problems
            .iter()
            .chain(&self.warnings)
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn is_assessed(&self) -> bool {
        self.level != SafetyLevel::Unassessed
    }
}
