use std::sync::RwLock;

use crate::collection::RecordCollection;
use crate::errors::DeskError;
use crate::record::Kind;

/// A collection that can be shared between request handlers. Readers
/// proceed concurrently; each mutation holds the lock for its whole
/// duration, so the collection is never seen half-changed.
#[derive(Debug)]
pub struct SharedCollection<K: Kind> {
    inner: RwLock<RecordCollection<K>>,
}

impl<K: Kind> Default for SharedCollection<K> {
    fn default() -> Self {
        SharedCollection::new(RecordCollection::new())
    }
}

impl<K: Kind> SharedCollection<K> {
    pub fn new(collection: RecordCollection<K>) -> Self {
        SharedCollection {
            inner: RwLock::new(collection),
        }
    }

    /// Runs `f` with shared access to the collection.
    pub fn read<T>(&self, f: impl FnOnce(&RecordCollection<K>) -> T) -> Result<T, DeskError> {
        let guard = self.inner.read().map_err(|_| DeskError::LockPoisoned)?;
        Ok(f(&guard))
    }

    /// Runs `f` with exclusive access to the collection.
    pub fn write<T>(&self, f: impl FnOnce(&mut RecordCollection<K>) -> T) -> Result<T, DeskError> {
        let mut guard = self.inner.write().map_err(|_| DeskError::LockPoisoned)?;
        Ok(f(&mut guard))
    }
}
