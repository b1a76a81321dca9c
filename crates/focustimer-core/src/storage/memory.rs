use tracing::warn;

use super::{document, PersistenceSink};
use crate::durations::DurationPolicy;
use crate::error::StorageError;
use crate::session::SessionLog;

/// In-memory store using the same JSON encoding as [`super::JsonStore`].
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    document: Option<String>,
    saves: usize,
    failing: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing JSON document.
    pub fn with_document(json: impl Into<String>) -> Self {
        Self {
            document: Some(json.into()),
            ..Self::default()
        }
    }

    /// Make every following save fail.
    pub fn set_failing(&mut self, failing: bool) {
        self.failing = failing;
    }

    /// Successful saves so far.
    pub fn saves(&self) -> usize {
        self.saves
    }

    pub fn document(&self) -> Option<&str> {
        self.document.as_deref()
    }

    fn try_save(&mut self, policy: &DurationPolicy, log: &SessionLog) -> Result<(), StorageError> {
        if self.failing {
            return Err(StorageError::Unavailable("memory store set to fail".into()));
        }
        self.document = Some(document::encode(policy, log)?);
        self.saves += 1;
        Ok(())
    }
}

impl PersistenceSink for MemoryStore {
    fn save(&mut self, policy: &DurationPolicy, log: &SessionLog) {
        if let Err(err) = self.try_save(policy, log) {
            warn!(error = %err, "failed to save store");
        }
    }

    fn load(&self) -> (DurationPolicy, SessionLog) {
        let Some(json) = &self.document else {
            return Default::default();
        };
        document::decode(json).unwrap_or_else(|err| {
            warn!(error = %err, "store unreadable, using defaults");
            Default::default()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_store_loads_defaults() {
        let (policy, log) = MemoryStore::new().load();
        assert_eq!(policy, DurationPolicy::default());
        assert!(log.is_empty());
    }

    #[test]
    fn failing_store_keeps_previous_document() {
        let mut store = MemoryStore::new();
        let policy = DurationPolicy::new(30, 5, 60).unwrap();
        store.save(&policy, &SessionLog::new());
        store.set_failing(true);
        store.save(&DurationPolicy::default(), &SessionLog::new());

        assert_eq!(store.saves(), 1);
        assert_eq!(store.load().0, policy);
    }

    #[test]
    fn garbage_document_loads_defaults() {
        let store = MemoryStore::with_document("[]");
        assert_eq!(store.load().0, DurationPolicy::default());
    }
}
