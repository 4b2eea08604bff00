pub mod assess;
pub mod catalog;
pub mod dilute;
pub mod limits;
pub mod usage;
pub mod validate;

use aroma_core::catalog::FormulaCatalog;
use aroma_core::error::AromaError;
use aroma_core::rules::builtin::default_limits;
use aroma_core::rules::schema::LimitsDef;
use std::path::Path;

/// Catalog from a file, or the built-in one.
fn load_catalog(path: Option<&Path>) -> Result<FormulaCatalog, AromaError> {
    match path {
        Some(p) => aroma_core::catalog::load_catalog(p),
        None => Ok(aroma_core::catalog::builtin().clone()),
    }
}

/// Limits table from a file, or the built-in default.
fn load_limits(path: Option<&Path>) -> Result<LimitsDef, AromaError> {
    match path {
        Some(p) => aroma_core::rules::load_limits(p),
        None => Ok(default_limits()),
    }
}
