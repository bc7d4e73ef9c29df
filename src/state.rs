use std::sync::Arc;

use crate::{
    logic::{
        catalog::PlantCatalog, discussion::DiscussionBoard, session::LayoutService,
        yields::YieldLedger,
    },
    storage::{DocumentStore, LayoutPersistence, StorageError},
};

/// Services shared by every request handler.
pub struct AppState {
    pub layouts: LayoutService,
    pub catalog: PlantCatalog,
    pub yields: YieldLedger,
    pub discussion: DiscussionBoard,
}

impl AppState {
    pub async fn open(store: Arc<dyn DocumentStore>) -> Result<Self, StorageError> {
        Ok(Self {
            layouts: LayoutService::new(LayoutPersistence::new(store.clone())),
            catalog: PlantCatalog::open(store.clone()).await?,
            yields: YieldLedger::new(store.clone()),
            discussion: DiscussionBoard::open(store).await?,
        })
    }
}
