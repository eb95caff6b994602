use std::collections::BTreeMap;
use std::sync::RwLock;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use colegio_core::RecordId;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum StoreError {
    #[error("record not found")]
    NotFound,
}

/// A record together with its store-assigned surrogate id.
///
/// The id flattens next to the record fields on the wire, so responses look
/// like the flat collection rows clients already consume.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stored<T> {
    pub id: RecordId,
    #[serde(flatten)]
    pub record: T,
}

/// One resource collection: an RwLock'd map from surrogate id to record.
///
/// Ids are assigned on insert and never change. UUIDv7 keys keep the map in
/// insertion order, so `list` is deterministic. A poisoned lock degrades to
/// a miss instead of propagating the panic.
#[derive(Debug)]
pub struct Collection<T> {
    inner: RwLock<BTreeMap<RecordId, T>>,
}

impl<T: Clone> Collection<T> {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(BTreeMap::new()),
        }
    }

    /// Insert a record, assigning its surrogate id.
    pub fn insert(&self, record: T) -> Stored<T> {
        let id = RecordId::new();
        if let Ok(mut map) = self.inner.write() {
            map.insert(id, record.clone());
        }
        Stored { id, record }
    }

    pub fn get(&self, id: RecordId) -> Option<Stored<T>> {
        let map = self.inner.read().ok()?;
        map.get(&id).map(|record| Stored {
            id,
            record: record.clone(),
        })
    }

    pub fn list(&self) -> Vec<Stored<T>> {
        let map = match self.inner.read() {
            Ok(m) => m,
            Err(_) => return Vec::new(),
        };
        map.iter()
            .map(|(id, record)| Stored {
                id: *id,
                record: record.clone(),
            })
            .collect()
    }

    /// Replace the record behind an existing id.
    pub fn update(&self, id: RecordId, record: T) -> Result<Stored<T>, StoreError> {
        let mut map = self.inner.write().map_err(|_| StoreError::NotFound)?;
        match map.get_mut(&id) {
            Some(slot) => {
                *slot = record.clone();
                Ok(Stored { id, record })
            }
            None => Err(StoreError::NotFound),
        }
    }

    pub fn remove(&self, id: RecordId) -> Result<Stored<T>, StoreError> {
        let mut map = self.inner.write().map_err(|_| StoreError::NotFound)?;
        map.remove(&id)
            .map(|record| Stored { id, record })
            .ok_or(StoreError::NotFound)
    }

    /// First record matching the predicate, in id order.
    pub fn find(&self, pred: impl Fn(&T) -> bool) -> Option<Stored<T>> {
        let map = self.inner.read().ok()?;
        map.iter().find(|(_, r)| pred(r)).map(|(id, record)| Stored {
            id: *id,
            record: record.clone(),
        })
    }

    pub fn filter(&self, pred: impl Fn(&T) -> bool) -> Vec<Stored<T>> {
        let map = match self.inner.read() {
            Ok(m) => m,
            Err(_) => return Vec::new(),
        };
        map.iter()
            .filter(|(_, r)| pred(r))
            .map(|(id, record)| Stored {
                id: *id,
                record: record.clone(),
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.inner.read().map(|m| m.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Remove every record matching the predicate, returning how many went.
    pub fn remove_where(&self, pred: impl Fn(&T) -> bool) -> usize {
        let Ok(mut map) = self.inner.write() else {
            return 0;
        };
        let before = map.len();
        map.retain(|_, r| !pred(r));
        before - map.len()
    }
}

impl<T: Clone> Default for Collection<T> {
    fn default() -> Self {
        Self::new()
    }
}
