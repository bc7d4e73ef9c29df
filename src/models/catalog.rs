use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;
use utoipa::ToSchema;

use crate::models::plant::ValidationError;

const PLACEHOLDER_IMAGE: &str = "https://placehold.co/600x400.png";

/// A plant listed in the shared catalog.
#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CatalogPlant {
    pub id: String,
    pub name: String,
    /// Free-form category label; the catalog form does not require it.
    #[serde(rename = "type")]
    pub plant_type: Option<String>,
    pub description: String,
    pub image: String,
    pub ai_hint: Option<String>,
}

impl CatalogPlant {
    /// Case-insensitive substring match on name or description.
    pub fn matches(&self, needle: &str) -> bool {
        let needle = needle.to_lowercase();
        self.name.to_lowercase().contains(&needle)
            || self.description.to_lowercase().contains(&needle)
    }
}

/// Body of a catalog addition.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewCatalogPlant {
    pub name: String,
    #[serde(rename = "type", default)]
    pub plant_type: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub ai_hint: Option<String>,
}

impl NewCatalogPlant {
    pub fn validate(self, id: String) -> Result<CatalogPlant, ValidationError> {
        let name = self.name.trim();
        if name.chars().count() < 2 {
            return Err(ValidationError::new(
                "name",
                "Name must be at least 2 characters.",
            ));
        }
        Ok(CatalogPlant {
            id,
            name: name.to_string(),
            plant_type: non_blank(self.plant_type),
            description: self.description.unwrap_or_default(),
            image: non_blank(self.image).unwrap_or_else(|| PLACEHOLDER_IMAGE.into()),
            ai_hint: non_blank(self.ai_hint),
        })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Plants every catalog starts with.
pub fn seed_plants() -> Vec<CatalogPlant> {
    let seed = |id: &str, name: &str, plant_type: &str, hint: &str, description: &str| {
        CatalogPlant {
            id: id.into(),
            name: name.into(),
            plant_type: Some(plant_type.into()),
            description: description.into(),
            image: PLACEHOLDER_IMAGE.into(),
            ai_hint: Some(hint.into()),
        }
    };
    vec![
        seed(
            "1",
            "Heirloom Tomato",
            "Vegetable",
            "tomato plant",
            "Rich, full-flavored tomatoes perfect for salads and sauces. Requires full sun and regular watering.",
        ),
        seed(
            "2",
            "Butterhead Lettuce",
            "Vegetable",
            "lettuce field",
            "Soft, buttery leaves that form a loose head. Ideal for cool weather and partial shade.",
        ),
        seed(
            "3",
            "Sweet Basil",
            "Herb",
            "basil pot",
            "Aromatic herb essential for Italian cuisine. Thrives in warm, sunny locations.",
        ),
        seed(
            "4",
            "Bell Pepper",
            "Vegetable",
            "bell pepper",
            "Sweet and crunchy peppers available in various colors. Needs a long, warm growing season.",
        ),
        seed(
            "5",
            "Lavender",
            "Flower",
            "lavender field",
            "Fragrant purple flowers known for their calming properties. Prefers dry, sunny conditions.",
        ),
        seed(
            "6",
            "Mint",
            "Herb",
            "mint plant",
            "A fast-spreading herb perfect for teas and cocktails. Best grown in containers to control its spread.",
        ),
    ]
}
