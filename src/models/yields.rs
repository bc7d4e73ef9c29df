use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;
use utoipa::ToSchema;

use crate::models::plant::ValidationError;

pub const MIN_YIELD: f64 = 0.1;

/// One recorded harvest.
#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct YieldEntry {
    pub id: String,
    pub crop: String,
    #[serde(rename = "yield")]
    pub amount: f64,
    pub harvest_date: NaiveDate,
    pub notes: Option<String>,
}

/// Body used both to add and to edit a harvest.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct YieldForm {
    pub crop: String,
    #[serde(rename = "yield")]
    pub amount: f64,
    pub harvest_date: NaiveDate,
    #[serde(default)]
    pub notes: Option<String>,
}

impl YieldForm {
    pub fn validate(self, id: String) -> Result<YieldEntry, ValidationError> {
        let crop = self.crop.trim();
        if crop.chars().count() < 2 {
            return Err(ValidationError::new(
                "crop",
                "Crop name must be at least 2 characters.",
            ));
        }
        if !self.amount.is_finite() || self.amount < MIN_YIELD {
            return Err(ValidationError::new(
                "yield",
                "Yield must be a positive number.",
            ));
        }
        Ok(YieldEntry {
            id,
            crop: crop.to_string(),
            amount: self.amount,
            harvest_date: self.harvest_date,
            notes: self.notes.filter(|n| !n.trim().is_empty()),
        })
    }
}

/// Total harvested per crop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CropTotal {
    pub crop: String,
    pub total: f64,
    pub harvests: usize,
}
