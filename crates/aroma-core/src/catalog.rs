//! Formula catalog: the read-only library of formulas plans may reference.

use crate::error::AromaError;
use crate::model::Formula;
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::path::Path;
use std::sync::LazyLock;

const BUILTIN_CATALOG_JSON: &str = include_str!("../../../catalog/formulas.json");

static BUILTIN: LazyLock<FormulaCatalog> = LazyLock::new(|| {
    parse_catalog_str(BUILTIN_CATALOG_JSON).expect("embedded formulas.json is valid")
});

/// Accepted on-disk shapes: a plain list, or an object keyed by id.
#[derive(Deserialize)]
#[serde(untagged)]
enum CatalogDocument {
    List(Vec<Formula>),
    Keyed(BTreeMap<String, Formula>),
}

#[derive(Debug, Clone)]
pub struct FormulaCatalog {
    formulas: Vec<Formula>,
    index: HashMap<String, usize>,
}

impl FormulaCatalog {
    /// Build a catalog, rejecting empty or duplicate ids and unnamed
    /// ingredients.
    pub fn from_formulas(formulas: Vec<Formula>) -> Result<Self, AromaError> {
        let mut index = HashMap::with_capacity(formulas.len());
        for (i, formula) in formulas.iter().enumerate() {
            if formula.id.trim().is_empty() {
                return Err(AromaError::CatalogInvalid(format!(
                    "formula '{}' has no id",
                    formula.name
                )));
            }
            if formula.ingredients.iter().any(|ing| ing.name.trim().is_empty()) {
                return Err(AromaError::CatalogInvalid(format!(
                    "formula '{}' has an ingredient without a name",
                    formula.id
                )));
            }
            if index.insert(formula.id.clone(), i).is_some() {
                return Err(AromaError::CatalogInvalid(format!(
                    "duplicate formula id '{}'",
                    formula.id
                )));
            }
        }
        Ok(Self { formulas, index })
    }

    pub fn get(&self, id: &str) -> Option<&Formula> {
        self.index.get(id).map(|&i| &self.formulas[i])
    }

    /// Like [`get`](Self::get), but a missing id is an error.
    pub fn require(&self, id: &str) -> Result<&Formula, AromaError> {
        self.get(id)
            .ok_or_else(|| AromaError::UnknownFormula(id.to_string()))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Formula> {
        self.formulas.iter()
    }

    pub fn len(&self) -> usize {
        self.formulas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.formulas.is_empty()
    }

    /// Id set handed to the plan validator.
    pub fn ids(&self) -> HashSet<&str> {
        self.formulas.iter().map(|f| f.id.as_str()).collect()
    }
}

/// The reference catalog embedded in the crate.
pub fn builtin() -> &'static FormulaCatalog {
    &BUILTIN
}

/// Load a catalog from a JSON file.
pub fn load_catalog(path: &Path) -> Result<FormulaCatalog, AromaError> {
    let content = std::fs::read_to_string(path).map_err(|e| AromaError::CatalogLoad {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    let document: CatalogDocument =
        serde_json::from_str(&content).map_err(|e| AromaError::CatalogLoad {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
    from_document(document)
}

/// Parse a catalog from a JSON string.
pub fn parse_catalog_str(json: &str) -> Result<FormulaCatalog, AromaError> {
    let document: CatalogDocument = serde_json::from_str(json)?;
    from_document(document)
}

fn from_document(document: CatalogDocument) -> Result<FormulaCatalog, AromaError> {
    let formulas = match document {
        CatalogDocument::List(formulas) => formulas,
        CatalogDocument::Keyed(map) => map
            .into_iter()
            .map(|(key, mut formula)| {
                if formula.id.is_empty() {
                    formula.id = key;
                } else if formula.id != key {
                    return Err(AromaError::CatalogInvalid(format!(
                        "formula keyed '{}' declares id '{}'",
                        key, formula.id
                    )));
                }
                Ok(formula)
            })
            .collect::<Result<Vec<_>, _>>()?,
    };
    FormulaCatalog::from_formulas(formulas)
}
