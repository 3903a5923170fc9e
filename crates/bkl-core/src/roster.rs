use tracing::warn;

use crate::error::StoreError;
use crate::model::{RegistrationRecord, Status};
use crate::store::RegistrationStore;

/// The first 100 participants by creation order receive a gift.
pub const GIFT_LIMIT: usize = 100;

/// Case-insensitive substring match against name, mobile, registration
/// number and address (logical OR).
pub fn matches_term(record: &RegistrationRecord, term: &str) -> bool {
    let term = term.to_lowercase();
    record.name.to_lowercase().contains(&term)
        || record.mobile.contains(&term)
        || record.registration_number.to_lowercase().contains(&term)
        || record.address.to_lowercase().contains(&term)
}

/// Admin-facing view over the full registration set.
///
/// Holds the full set newest-first; filtering is always recomputed against
/// the full set, and gift rank is defined only relative to it.
pub struct RegistrationRoster<S> {
    store: S,
    records: Vec<RegistrationRecord>,
}

impl<S: RegistrationStore> RegistrationRoster<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            records: Vec::new(),
        }
    }

    /// Fetch the full ordered collection. On failure the previously loaded
    /// set is left unchanged.
    pub async fn load(&mut self) -> Result<(), StoreError> {
        match self.store.list_all().await {
            Ok(records) => {
                self.records = records;
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "failed to load registrations");
                Err(e)
            }
        }
    }

    /// The full set, creation-time descending.
    pub fn records(&self) -> &[RegistrationRecord] {
        &self.records
    }

    /// The visible set for a search term. Pure; an empty term shows
    /// everything.
    pub fn filter(&self, term: &str) -> Vec<&RegistrationRecord> {
        if term.trim().is_empty() {
            return self.records.iter().collect();
        }
        self.records
            .iter()
            .filter(|r| matches_term(r, term))
            .collect()
    }

    /// 0-indexed position in the creation-descending full set. Presentation
    /// data, recomputed whenever the list changes; never derived from a
    /// filtered view.
    pub fn gift_rank(&self, storage_key: &str) -> Option<usize> {
        self.records.iter().position(|r| r.id == storage_key)
    }

    pub fn is_gift_eligible(&self, storage_key: &str) -> bool {
        self.gift_rank(storage_key)
            .is_some_and(|rank| rank < GIFT_LIMIT)
    }

    /// Update one record's status. The local copy is mutated only after the
    /// store accepts the write; re-applying the same status is a no-op
    /// change.
    pub async fn set_status(&mut self, storage_key: &str, status: Status) -> Result<(), StoreError> {
        self.store.update_status(storage_key, status).await?;
        if let Some(record) = self.records.iter_mut().find(|r| r.id == storage_key) {
            record.status = status;
        }
        Ok(())
    }

    /// Permanently delete one record. The local set is mutated only after
    /// the store accepts the delete; callers are expected to have obtained
    /// explicit confirmation first.
    pub async fn delete(&mut self, storage_key: &str) -> Result<(), StoreError> {
        self.store.remove(storage_key).await?;
        self.records.retain(|r| r.id != storage_key);
        Ok(())
    }
}
