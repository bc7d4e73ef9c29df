use std::{collections::HashMap, sync::Arc};

use tokio::sync::{Mutex, RwLock};
use uuid::Uuid;

use crate::{
    error::RecordError,
    models::yields::{CropTotal, YieldEntry, YieldForm},
    storage::{read_json, write_json, DocumentStore},
};

const YIELD_COLLECTION: &str = "yields";

/// `None` until the user's ledger has been read from the store.
type Ledger = Arc<Mutex<Option<Vec<YieldEntry>>>>;

/// Harvest records per user. Each user's ledger is read from the store on first
/// use and written back whole on every change. Changes for one user are
/// serialized: the ledger stays locked until the store write completes.
pub struct YieldLedger {
    store: Arc<dyn DocumentStore>,
    ledgers: RwLock<HashMap<String, Ledger>>,
}

impl YieldLedger {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            store,
            ledgers: RwLock::new(HashMap::new()),
        }
    }

    async fn ledger(&self, user: &str) -> Ledger {
        if let Some(ledger) = self.ledgers.read().await.get(user) {
            return ledger.clone();
        }
        self.ledgers
            .write()
            .await
            .entry(user.to_string())
            .or_default()
            .clone()
    }

    async fn loaded<'a>(
        &self,
        user: &str,
        slot: &'a mut Option<Vec<YieldEntry>>,
    ) -> Result<&'a mut Vec<YieldEntry>, RecordError> {
        if slot.is_none() {
            let stored: Vec<YieldEntry> = read_json(self.store.as_ref(), YIELD_COLLECTION, user)
                .await?
                .unwrap_or_default();
            *slot = Some(stored);
        }
        Ok(slot.get_or_insert_with(Vec::new))
    }

    async fn entries(&self, user: &str) -> Result<Vec<YieldEntry>, RecordError> {
        let ledger = self.ledger(user).await;
        let mut slot = ledger.lock().await;
        Ok(self.loaded(user, &mut *slot).await?.clone())
    }

    /// Applies `change` to a copy of the user's ledger, writes the copy and only
    /// then makes it current.
    async fn modify<T>(
        &self,
        user: &str,
        change: impl FnOnce(&mut Vec<YieldEntry>) -> Result<T, RecordError>,
    ) -> Result<T, RecordError> {
        let ledger = self.ledger(user).await;
        let mut slot = ledger.lock().await;
        let current = self.loaded(user, &mut *slot).await?;
        let mut next = current.clone();
        let out = change(&mut next)?;
        write_json(self.store.as_ref(), YIELD_COLLECTION, user, &next).await?;
        *current = next;
        Ok(out)
    }

    /// Newest harvest first.
    pub async fn list(&self, user: &str) -> Result<Vec<YieldEntry>, RecordError> {
        let mut entries = self.entries(user).await?;
        entries.sort_by(|a, b| b.harvest_date.cmp(&a.harvest_date));
        Ok(entries)
    }

    pub async fn add(&self, user: &str, form: YieldForm) -> Result<YieldEntry, RecordError> {
        let entry = form.validate(Uuid::new_v4().to_string())?;
        self.modify(user, |entries| {
            entries.insert(0, entry.clone());
            Ok(entry)
        })
        .await
    }

    pub async fn update(
        &self,
        user: &str,
        id: &str,
        form: YieldForm,
    ) -> Result<YieldEntry, RecordError> {
        let updated = form.validate(id.to_string())?;
        self.modify(user, |entries| {
            let slot = entries
                .iter_mut()
                .find(|e| e.id == id)
                .ok_or_else(|| not_found(id))?;
            *slot = updated.clone();
            Ok(updated)
        })
        .await
    }

    pub async fn delete(&self, user: &str, id: &str) -> Result<YieldEntry, RecordError> {
        self.modify(user, |entries| {
            let pos = entries
                .iter()
                .position(|e| e.id == id)
                .ok_or_else(|| not_found(id))?;
            Ok(entries.remove(pos))
        })
        .await
    }

    /// Sum of harvested amounts per crop, ordered by crop name.
    pub async fn totals(&self, user: &str) -> Result<Vec<CropTotal>, RecordError> {
        let mut totals: Vec<CropTotal> = Vec::new();
        for entry in self.entries(user).await? {
            match totals.iter_mut().find(|t| t.crop == entry.crop) {
                Some(total) => {
                    total.total += entry.amount;
                    total.harvests += 1;
                }
                None => totals.push(CropTotal {
                    crop: entry.crop,
                    total: entry.amount,
                    harvests: 1,
                }),
            }
        }
        totals.sort_by(|a, b| a.crop.cmp(&b.crop));
        Ok(totals)
    }
}

fn not_found(id: &str) -> RecordError {
    RecordError::NotFound {
        kind: "yield entry",
        id: id.to_string(),
    }
}
