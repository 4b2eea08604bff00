use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// Substring that marks an ingredient line as an essential oil.
pub const OIL_MARKER: &str = "精油";

/// Delivery vehicle of a formula.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MediumType {
    BaseOil,
    Handcream,
    Bodylotion,
    Footbath,
    Diffuser,
    Spray,
    Rosewater,
    RosewaterSpray,
    AlcoholSpray,
    Alcohol,
}

impl MediumType {
    pub const ALL: [MediumType; 10] = [
        MediumType::BaseOil,
        MediumType::Handcream,
        MediumType::Bodylotion,
        MediumType::Footbath,
        MediumType::Diffuser,
        MediumType::Spray,
        MediumType::Rosewater,
        MediumType::RosewaterSpray,
        MediumType::AlcoholSpray,
        MediumType::Alcohol,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MediumType::BaseOil => "base-oil",
            MediumType::Handcream => "handcream",
            MediumType::Bodylotion => "bodylotion",
            MediumType::Footbath => "footbath",
            MediumType::Diffuser => "diffuser",
            MediumType::Spray => "spray",
            MediumType::Rosewater => "rosewater",
            MediumType::RosewaterSpray => "rosewater-spray",
            MediumType::AlcoholSpray => "alcohol-spray",
            MediumType::Alcohol => "alcohol",
        }
    }

    /// Whether a dose in this medium counts toward daily skin-contact exposure.
    ///
    /// Diffused oil and alcohol sprays evaporate before reaching skin.
    pub fn is_skin_contact(&self) -> bool {
        !matches!(self, MediumType::Diffuser | MediumType::AlcoholSpray)
    }

    /// Freshly mixed per session, never stored between days.
    pub fn is_single_use(&self) -> bool {
        matches!(
            self,
            MediumType::Footbath | MediumType::Diffuser | MediumType::AlcoholSpray
        )
    }

    /// Name shown to users in assessment messages.
    pub fn display_name(&self) -> &'static str {
        match self {
            MediumType::BaseOil => "基础油",
            MediumType::Handcream => "护手霜",
            MediumType::Bodylotion => "身体乳",
            MediumType::Footbath => "泡脚/泡澡",
            MediumType::Diffuser => "扩香",
            MediumType::Spray => "喷雾",
            MediumType::Rosewater => "玫瑰水",
            MediumType::RosewaterSpray => "纯露喷雾",
            MediumType::AlcoholSpray => "乙醇喷雾",
            MediumType::Alcohol => "酒精",
        }
    }
}

impl fmt::Display for MediumType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MediumType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        MediumType::ALL
            .into_iter()
            .find(|m| m.as_str() == lower)
            .ok_or_else(|| format!("unknown medium type '{}'", s.trim()))
    }
}

/// One line of a formula's ingredient list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ingredient {
    pub name: String,
    /// Free-text quantity, e.g. "3滴(约0.15ml)" or "50g".
    #[serde(
        rename = "amount",
        default,
        deserialize_with = "deserialize_amount_text"
    )]
    pub amount_text: String,
}

impl Ingredient {
    pub fn new(name: impl Into<String>, amount_text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            amount_text: amount_text.into(),
        }
    }

    pub fn is_oil(&self) -> bool {
        self.name.contains(OIL_MARKER)
    }
}

/// Catalogs written by hand sometimes carry bare numbers ("amount": 50).
fn deserialize_amount_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::String(s) => s,
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    })
}

/// A catalog formula. Read-only once loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Formula {
    #[serde(default)]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub subtitle: String,
    #[serde(default)]
    pub ingredients: Vec<Ingredient>,
    /// Stated daily oil amount, e.g. "每次约0.27ml" or "不计入每日精油皮肤接触量".
    #[serde(
        rename = "dailyAmount",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub daily_amount_text: Option<String>,
    /// Stated overall concentration, e.g. "1.8%".
    #[serde(
        rename = "concentration",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub concentration_text: Option<String>,
}

impl Formula {
    pub fn oils(&self) -> impl Iterator<Item = &Ingredient> {
        self.ingredients.iter().filter(|i| i.is_oil())
    }

    pub fn bases(&self) -> impl Iterator<Item = &Ingredient> {
        self.ingredients.iter().filter(|i| !i.is_oil())
    }
}

/// A single oil line of a [`Recipe`], amount in any consistent unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeOil {
    pub name: String,
    pub amount: Decimal,
}

/// Input of the safety evaluator: one mixed formula with its overall dilution.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipe {
    pub name: String,
    #[serde(default)]
    pub purpose: String,
    #[serde(default)]
    pub carrier: String,
    #[serde(default)]
    pub solvent: String,
    /// Explicit medium; inferred from the text fields when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub medium_type: Option<MediumType>,
    /// Total batch quantity (g or ml).
    #[serde(default)]
    pub total: Decimal,
    /// Overall essential-oil concentration in percent.
    #[serde(default)]
    pub dilution: Decimal,
    #[serde(default)]
    pub oils: Vec<RecipeOil>,
}
