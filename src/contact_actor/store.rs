//! Persistence of the contact directory.
//!
//! Two slots are kept: the saved entries and the selected entry. Reading never
//! fails; a missing or unreadable slot comes back empty. Writing may fail, and
//! the caller decides what to do about it.

use crate::model::{ContactSnapshot, PhoneEntry};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::path::PathBuf;
use thiserror::Error;
use tokio::fs;
use tokio::sync::Mutex;
use tracing::{debug, warn};

pub const SAVED_PHONES_FILE: &str = "saved_phones.json";
pub const SELECTED_PHONE_FILE: &str = "selected_phone.json";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Store I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Store encoding error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Durable key-value capability the directory is persisted through.
#[async_trait]
pub trait ContactStore: Send + Sync {
    /// Reads both slots. Missing or malformed slots degrade to empty.
    async fn load(&self) -> ContactSnapshot;

    /// Writes both slots.
    async fn save(&self, snapshot: &ContactSnapshot) -> Result<(), StoreError>;
}

/// Stores the two slots as JSON files inside a directory.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    async fn read_slot<T: DeserializeOwned>(&self, file: &str) -> Result<Option<T>, StoreError> {
        let path = self.dir.join(file);
        if !fs::try_exists(&path).await? {
            return Ok(None);
        }
        let content = fs::read_to_string(&path).await?;
        Ok(serde_json::from_str(&content)?)
    }
}

#[async_trait]
impl ContactStore for JsonFileStore {
    async fn load(&self) -> ContactSnapshot {
        let entries: Vec<PhoneEntry> = match self.read_slot(SAVED_PHONES_FILE).await {
            Ok(entries) => entries.unwrap_or_default(),
            Err(e) => {
                warn!(file = SAVED_PHONES_FILE, error = %e, "Ignoring unreadable slot");
                Vec::new()
            }
        };
        let selected: Option<PhoneEntry> = match self.read_slot(SELECTED_PHONE_FILE).await {
            Ok(selected) => selected,
            Err(e) => {
                warn!(file = SELECTED_PHONE_FILE, error = %e, "Ignoring unreadable slot");
                None
            }
        };
        debug!(entries = entries.len(), selected = selected.is_some(), "Loaded contacts");
        ContactSnapshot { entries, selected }
    }

    async fn save(&self, snapshot: &ContactSnapshot) -> Result<(), StoreError> {
        fs::create_dir_all(&self.dir).await?;
        let entries = serde_json::to_string_pretty(&snapshot.entries)?;
        fs::write(self.dir.join(SAVED_PHONES_FILE), entries).await?;
        let selected = serde_json::to_string_pretty(&snapshot.selected)?;
        fs::write(self.dir.join(SELECTED_PHONE_FILE), selected).await?;
        Ok(())
    }
}

/// Keeps the slots in memory. Shared between systems to simulate a restart.
#[derive(Debug, Default)]
pub struct MemoryStore {
    snapshot: Mutex<ContactSnapshot>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_snapshot(snapshot: ContactSnapshot) -> Self {
        Self {
            snapshot: Mutex::new(snapshot),
        }
    }

    /// What was last saved.
    pub async fn snapshot(&self) -> ContactSnapshot {
        self.snapshot.lock().await.clone()
    }
}

#[async_trait]
impl ContactStore for MemoryStore {
    async fn load(&self) -> ContactSnapshot {
        self.snapshot.lock().await.clone()
    }

    async fn save(&self, snapshot: &ContactSnapshot) -> Result<(), StoreError> {
        *self.snapshot.lock().await = snapshot.clone();
        Ok(())
    }
}
