//! Serialized form of the whole collection.
//!
//! A JSON object keyed by item id:
//!
//! ```json
//! {"1700000000000": {"text": "Buy milk", "work": true}}
//! ```
//!
//! `work` is `true` for Cheering items and `false` for Travel items. There is
//! no version field; changing the item shape breaks existing snapshots.

use crate::error::StoreError;
use crate::model::{Category, Collection, Item, ItemId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Serialize, Deserialize)]
struct StoredItem {
    text: String,
    work: bool,
}

impl From<&Item> for StoredItem {
    fn from(item: &Item) -> Self {
        Self {
            text: item.text.clone(),
            work: item.category == Category::Cheering,
        }
    }
}

pub fn encode(items: &Collection) -> Result<String, StoreError> {
    let stored: BTreeMap<&str, StoredItem> = items
        .iter()
        .map(|(id, item)| (id.as_str(), StoredItem::from(item)))
        .collect();
    Ok(serde_json::to_string(&stored)?)
}

pub fn decode(raw: &str) -> Result<Collection, StoreError> {
    let stored: BTreeMap<String, StoredItem> = serde_json::from_str(raw)?;
    Ok(stored
        .into_iter()
        .map(|(key, value)| {
            let id = ItemId::new(key);
            let category = if value.work {
                Category::Cheering
            } else {
                Category::Travel
            };
            let item = Item {
                id: id.clone(),
                text: value.text,
                category,
            };
            (id, item)
        })
        .collect())
}
