use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum AromaError {
    #[error("failed to load formula catalog from {path}: {reason}")]
    CatalogLoad { path: PathBuf, reason: String },

    #[error("invalid formula catalog: {0}")]
    CatalogInvalid(String),

    #[error("formula '{0}' not found in catalog")]
    UnknownFormula(String),

    #[error("failed to load limits from {path}: {reason}")]
    LimitsLoad { path: PathBuf, reason: String },

    #[error("invalid limits table: {0}")]
    LimitsInvalid(String),

    #[error("{0}")]
    UnknownPreset(String),

    #[error("failed to parse plan: {0}")]
    PlanParse(String),

    #[error("plan rejected: {}", errors.join("; "))]
    PlanRejected { errors: Vec<String> },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
