use std::sync::Arc;

use log::info;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::{
    error::RecordError,
    models::catalog::{seed_plants, CatalogPlant, NewCatalogPlant},
    storage::{read_json, write_json, DocumentStore, StorageError},
};

const CATALOG_COLLECTION: &str = "catalog";
const CATALOG_KEY: &str = "plants";

/// Shared plant catalog, kept in memory and written through to the store.
pub struct PlantCatalog {
    store: Arc<dyn DocumentStore>,
    plants: RwLock<Vec<CatalogPlant>>,
}

impl PlantCatalog {
    /// Reads the stored catalog, falling back to the seed plants.
    pub async fn open(store: Arc<dyn DocumentStore>) -> Result<Self, StorageError> {
        let plants = match read_json(store.as_ref(), CATALOG_COLLECTION, CATALOG_KEY).await? {
            Some(plants) => plants,
            None => {
                info!("no stored plant catalog, using the seed plants");
                seed_plants()
            }
        };
        Ok(Self {
            store,
            plants: RwLock::new(plants),
        })
    }

    /// All plants whose name or description contains `search` (case-insensitive).
    pub async fn list(&self, search: Option<&str>) -> Vec<CatalogPlant> {
        let plants = self.plants.read().await;
        match search.map(str::trim).filter(|s| !s.is_empty()) {
            Some(needle) => plants.iter().filter(|p| p.matches(needle)).cloned().collect(),
            None => plants.clone(),
        }
    }

    pub async fn get(&self, id: &str) -> Option<CatalogPlant> {
        self.plants.read().await.iter().find(|p| p.id == id).cloned()
    }

    pub async fn add(&self, new_plant: NewCatalogPlant) -> Result<CatalogPlant, RecordError> {
        let plant = new_plant.validate(Uuid::new_v4().to_string())?;
        let mut plants = self.plants.write().await;
        let mut next = plants.clone();
        next.push(plant.clone());
        write_json(self.store.as_ref(), CATALOG_COLLECTION, CATALOG_KEY, &next).await?;
        *plants = next;
        info!("added '{}' to the plant catalog", plant.name);
        Ok(plant)
    }

    pub async fn set_image(&self, id: &str, image: String) -> Result<CatalogPlant, RecordError> {
        let mut plants = self.plants.write().await;
        let mut next = plants.clone();
        let plant = next
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| RecordError::NotFound {
                kind: "plant",
                id: id.to_string(),
            })?;
        plant.image = image;
        let updated = plant.clone();
        write_json(self.store.as_ref(), CATALOG_COLLECTION, CATALOG_KEY, &next).await?;
        *plants = next;
        Ok(updated)
    }
}
