use async_trait::async_trait;

use crate::error::StoreError;
use crate::model::{NewRegistration, RegistrationRecord, Status, StoredRegistration};

/// The persistent-collection collaborator.
///
/// Every operation is single-record and atomic: either the full record is
/// visible to subsequent reads or none of it is. No transaction spans
/// multiple records.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait RegistrationStore {
    /// Append a record. The store assigns the creation time and the
    /// registration identifier at write time; the identifier never changes
    /// afterwards.
    async fn append(&self, record: NewRegistration) -> Result<StoredRegistration, StoreError>;

    /// Every record currently stored, newest first.
    async fn list_all(&self) -> Result<Vec<RegistrationRecord>, StoreError>;

    /// Partial mutation; status is the only mutable field in this system.
    async fn update_status(&self, storage_key: &str, status: Status) -> Result<(), StoreError>;

    /// Permanent delete. No tombstone, no undo.
    async fn remove(&self, storage_key: &str) -> Result<(), StoreError>;
}
