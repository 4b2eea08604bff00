use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// A multi-scenario daily usage schedule proposed by the recommendation
/// service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidatePlan {
    pub scenarios: Vec<Scenario>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scenario {
    #[serde(default, deserialize_with = "lenient_text")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub description: String,
    #[serde(default)]
    pub timeline: Vec<TimelineSlot>,
}

/// One time-of-day entry in a scenario.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineSlot {
    /// "HH:MM".
    pub time: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub title: String,
    #[serde(default)]
    pub formulas: Vec<PlanFormula>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanFormula {
    #[serde(deserialize_with = "lenient_text")]
    pub formula_id: String,
    #[serde(deserialize_with = "lenient_text")]
    pub usage_type: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub reason: String,
}

/// Text fields as the validator reads them: numbers become their decimal
/// text, null and any other non-string become empty.
fn lenient_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        _ => String::new(),
    })
}

impl CandidatePlan {
    /// Every referenced formula id, first occurrence order, without repeats.
    pub fn formula_ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = Vec::new();
        for entry in self
            .scenarios
            .iter()
            .flat_map(|s| &s.timeline)
            .flat_map(|t| &t.formulas)
        {
            if !ids.contains(&entry.formula_id.as_str()) {
                ids.push(&entry.formula_id);
            }
        }
        ids
    }
}
