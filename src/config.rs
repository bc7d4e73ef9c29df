use std::{env, path::PathBuf, sync::Arc};

use log::{info, warn};

use crate::storage::{DocumentStore, FileDocumentStore, MemoryDocumentStore};

pub const DEFAULT_BIND: &str = "0.0.0.0:8080";
pub const DEFAULT_DATA_DIR: &str = "./data";

/// Which document backend the server persists to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreKind {
    Memory,
    File(PathBuf),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub bind_addr: String,
    pub store: StoreKind,
}

impl AppConfig {
    /// Reads `FARMGRID_BIND`, `FARMGRID_STORE` (`memory` or `file`) and
    /// `FARMGRID_DATA_DIR`, after loading a `.env` file when one exists.
    pub fn from_env() -> Self {
        if dotenvy::dotenv().is_ok() {
            info!("loaded settings from .env");
        }
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let bind_addr = lookup("FARMGRID_BIND").unwrap_or_else(|| DEFAULT_BIND.into());
        let data_dir = lookup("FARMGRID_DATA_DIR").unwrap_or_else(|| DEFAULT_DATA_DIR.into());
        let store = match lookup("FARMGRID_STORE").as_deref().map(str::trim) {
            Some("file") => StoreKind::File(PathBuf::from(data_dir)),
            None | Some("") | Some("memory") => StoreKind::Memory,
            Some(other) => {
                warn!("unknown FARMGRID_STORE '{other}', using the in-memory store");
                StoreKind::Memory
            }
        };
        Self { bind_addr, store }
    }

    pub fn document_store(&self) -> Arc<dyn DocumentStore> {
        match &self.store {
            StoreKind::Memory => Arc::new(MemoryDocumentStore::default()),
            StoreKind::File(dir) => Arc::new(FileDocumentStore::new(dir.clone())),
        }
    }
}
