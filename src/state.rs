use crate::model::{Category, Collection, IdGenerator, Item, ItemId};
use crate::snapshot;
use crate::storage::KeyValueStore;
use crate::writer::SnapshotWriter;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, error, info, warn};

/// Storage key of the snapshot unless configured otherwise.
pub const DEFAULT_STORAGE_KEY: &str = "@toDos";

/// What [`StateManager::load`] found in storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// A snapshot with this many items replaced the collection.
    Loaded(usize),
    /// Nothing stored yet.
    Empty,
    /// The stored snapshot could not be read or parsed; collection untouched.
    Failed,
}

/// Pending deletion awaiting confirmation. Resolve it with
/// [`StateManager::confirm_delete`] or [`StateManager::cancel_delete`].
#[derive(Debug, PartialEq, Eq)]
#[must_use = "a delete request does nothing until it is confirmed"]
pub struct DeleteToken {
    id: ItemId,
}

impl DeleteToken {
    pub fn id(&self) -> &ItemId {
        &self.id
    }
}

/// Owns the items and the active mode, and mirrors every change to storage.
pub struct StateManager<S: KeyValueStore> {
    store: Arc<S>,
    key: String,
    items: Collection,
    mode: Category,
    ids: IdGenerator,
    writer: SnapshotWriter,
    changes: watch::Sender<u64>,
}

impl<S: KeyValueStore> StateManager<S> {
    /// Create an empty manager. Must be called from within a tokio runtime.
    pub fn new(store: Arc<S>, key: impl Into<String>) -> Self {
        let key = key.into();
        let writer = SnapshotWriter::spawn(store.clone(), key.clone());
        let (changes, _) = watch::channel(0);
        Self {
            store,
            key,
            items: Collection::new(),
            mode: Category::default(),
            ids: IdGenerator::new(),
            writer,
            changes,
        }
    }

    pub fn mode(&self) -> Category {
        self.mode
    }

    pub fn items(&self) -> &Collection {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Receiver that observes a new revision after every change.
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.changes.subscribe()
    }

    pub fn set_mode(&mut self, mode: Category) {
        if self.mode != mode {
            debug!(mode = mode.label(), "mode switched");
            self.mode = mode;
            self.notify();
        }
    }

    pub fn toggle_mode(&mut self) {
        self.set_mode(self.mode.toggle());
    }

    /// Hydrate the collection from storage. Never fails; problems are logged.
    pub async fn load(&mut self) -> LoadOutcome {
        let raw = match self.store.get(&self.key).await {
            Ok(Some(raw)) if !raw.is_empty() => raw,
            Ok(_) => {
                info!(key = %self.key, "no stored snapshot");
                return LoadOutcome::Empty;
            }
            Err(e) => {
                warn!(key = %self.key, "could not read snapshot: {}", e.user_message());
                return LoadOutcome::Failed;
            }
        };

        match snapshot::decode(&raw) {
            Ok(items) => {
                let count = items.len();
                self.ids.observe(&items);
                self.items = items;
                info!(count, "snapshot loaded");
                self.notify();
                LoadOutcome::Loaded(count)
            }
            Err(e) => {
                warn!(key = %self.key, "ignoring snapshot: {}", e.user_message());
                LoadOutcome::Failed
            }
        }
    }

    /// Add an item in the active mode. Blank text is ignored.
    pub fn add(&mut self, text: &str) -> Option<ItemId> {
        if text.trim().is_empty() {
            return None;
        }
        let id = self.ids.next();
        let item = Item {
            id: id.clone(),
            text: text.to_string(),
            category: self.mode,
        };
        debug!(id = %id, category = self.mode.label(), "item added");
        self.items.insert(id.clone(), item);
        self.persist();
        self.notify();
        Some(id)
    }

    /// Remove an item. Unknown ids are ignored but still flush a snapshot.
    pub fn remove(&mut self, id: &ItemId) {
        if self.items.remove(id).is_some() {
            debug!(id = %id, "item removed");
        } else {
            debug!(id = %id, "remove of unknown id");
        }
        self.persist();
        self.notify();
    }

    /// First step of a delete. `None` if the id is not in the collection.
    pub fn request_delete(&self, id: &ItemId) -> Option<DeleteToken> {
        self.items
            .contains_key(id)
            .then(|| DeleteToken { id: id.clone() })
    }

    pub fn confirm_delete(&mut self, token: DeleteToken) {
        self.remove(&token.id);
    }

    pub fn cancel_delete(&self, token: DeleteToken) {
        debug!(id = %token.id, "delete cancelled");
    }

    /// Items of the active category, in collection order.
    pub fn visible_items(&self) -> impl Iterator<Item = &Item> {
        let mode = self.mode;
        self.items.values().filter(move |item| item.category == mode)
    }

    /// Wait for every queued snapshot write to finish.
    pub async fn shutdown(self) {
        self.writer.shutdown().await;
    }

    fn persist(&self) {
        let encoded = match snapshot::encode(&self.items) {
            Ok(s) => s,
            Err(e) => {
                error!("could not encode snapshot: {}", e.user_message());
                return;
            }
        };
        if let Err(e) = self.writer.submit(encoded) {
            error!("could not queue snapshot: {}", e.user_message());
        }
    }

    fn notify(&self) {
        self.changes.send_modify(|rev| *rev += 1);
    }
}
