use serde::{Deserialize, Serialize};

pub const DEFAULT_TITLE: &str = "Cocktail Menu";
pub const DEFAULT_FONT_FAMILY: &str = "Inconsolata, monospace";

/// Labels of the per-cocktail field block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldLabels {
    pub preparation: String,
    pub garnish: String,
    pub glassware: String,
    pub page: String,
    pub ice_type: String,
    pub observation: String,
}

impl Default for FieldLabels {
    fn default() -> Self {
        Self {
            preparation: "Preparation".to_string(),
            garnish: "Garnish".to_string(),
            glassware: "Glassware".to_string(),
            page: "Page".to_string(),
            ice_type: "Ice Type".to_string(),
            observation: "Observation".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MenuSettings {
    pub title: String,
    pub font_family: String,
    pub labels: FieldLabels,
}

impl Default for MenuSettings {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            font_family: DEFAULT_FONT_FAMILY.to_string(),
            labels: FieldLabels::default(),
        }
    }
}
