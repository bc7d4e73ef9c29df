use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

/// Display colors offered by the layout controls.
pub const PALETTE: [&str; 6] = [
    "#34D399", // emerald
    "#FBBF24", // amber
    "#60A5FA", // blue
    "#F87171", // red
    "#A78BFA", // violet
    "#F472B6", // pink
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "PascalCase")]
pub enum PlantType {
    Vegetable,
    Fruit,
    Herb,
    Flower,
}

impl fmt::Display for PlantType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            PlantType::Vegetable => "Vegetable",
            PlantType::Fruit => "Fruit",
            PlantType::Herb => "Herb",
            PlantType::Flower => "Flower",
        };
        f.write_str(label)
    }
}

/// What occupies one plot of the farm grid. Replaced wholesale, never edited in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PlantAssignment {
    pub name: String,
    pub description: String,
    #[serde(rename = "type")]
    pub plant_type: PlantType,
    pub color: String,
}

/// A form field rejected by validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {message}")]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// The "current plant" used when clicking empty plots in Add mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PlantTemplate {
    pub name: String,
    pub description: String,
    #[serde(rename = "type")]
    pub plant_type: PlantType,
    pub color: String,
}

impl Default for PlantTemplate {
    fn default() -> Self {
        Self {
            name: "Heirloom Tomato".into(),
            description: "Rich, full-flavored tomatoes perfect for salads and sauces.".into(),
            plant_type: PlantType::Vegetable,
            color: PALETTE[0].into(),
        }
    }
}

impl PlantTemplate {
    /// Checks every field and builds the assignment to place.
    pub fn validate(&self) -> Result<PlantAssignment, ValidationError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(ValidationError::new("name", "Plant name is required."));
        }
        let description = self.description.trim();
        if description.is_empty() {
            return Err(ValidationError::new(
                "description",
                "Plant description is required.",
            ));
        }
        if !is_hex_color(&self.color) {
            return Err(ValidationError::new(
                "color",
                format!("'{}' is not a hex color such as #34D399.", self.color),
            ));
        }
        Ok(PlantAssignment {
            name: name.to_string(),
            description: description.to_string(),
            plant_type: self.plant_type,
            color: self.color.clone(),
        })
    }
}

/// Accepts `#RGB` and `#RRGGBB`.
pub fn is_hex_color(value: &str) -> bool {
    match value.strip_prefix('#') {
        Some(hex) => (hex.len() == 3 || hex.len() == 6) && hex.chars().all(|c| c.is_ascii_hexdigit()),
        None => false,
    }
}
