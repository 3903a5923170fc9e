//! In-memory fakes of the two collaborator traits.

use std::sync::atomic::{AtomicBool, AtomicI64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use bkl_core::error::{ChallengeError, ConfirmError, StoreError};
use bkl_core::model::{NewRegistration, RegistrationRecord, Status, StoredRegistration};
use bkl_core::regnum;
use bkl_core::store::RegistrationStore;
use bkl_core::verify::{PendingChallenge, PhoneVerifier, Verified};

/// Fake OTP provider. Issues sequentially numbered challenges that accept a
/// single fixed code; a confirmed challenge is single-use.
pub struct MemoryVerifier {
    pub code: String,
    pub fail_requests: AtomicBool,
    pub request_calls: AtomicUsize,
    pub confirm_calls: AtomicUsize,
    next_id: AtomicUsize,
    consumed: Mutex<Vec<String>>,
}

impl MemoryVerifier {
    pub fn new(code: &str) -> SharedVerifier {
        SharedVerifier(Arc::new(Self {
            code: code.to_string(),
            fail_requests: AtomicBool::new(false),
            request_calls: AtomicUsize::new(0),
            confirm_calls: AtomicUsize::new(0),
            next_id: AtomicUsize::new(1),
            consumed: Mutex::new(Vec::new()),
        }))
    }
}

/// Cloneable shared handle the tests pass to the workflow while retaining a
/// copy to inspect. Delegates the trait to the inner `MemoryVerifier`.
#[derive(Clone)]
pub struct SharedVerifier(Arc<MemoryVerifier>);

impl std::ops::Deref for SharedVerifier {
    type Target = MemoryVerifier;
    fn deref(&self) -> &MemoryVerifier {
        &self.0
    }
}

#[async_trait]
impl PhoneVerifier for SharedVerifier {
    async fn request_challenge(&self, mobile: &str) -> Result<PendingChallenge, ChallengeError> {
        self.0.request_challenge(mobile).await
    }

    async fn confirm_challenge(
        &self,
        challenge: &PendingChallenge,
        code: &str,
    ) -> Result<Verified, ConfirmError> {
        self.0.confirm_challenge(challenge, code).await
    }
}

#[async_trait]
impl PhoneVerifier for MemoryVerifier {
    async fn request_challenge(&self, mobile: &str) -> Result<PendingChallenge, ChallengeError> {
        self.request_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_requests.load(Ordering::SeqCst) {
            return Err(ChallengeError::Provider("provider down".into()));
        }
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        Ok(PendingChallenge {
            id: format!("challenge-{id}"),
            mobile: mobile.to_string(),
        })
    }

    async fn confirm_challenge(
        &self,
        challenge: &PendingChallenge,
        code: &str,
    ) -> Result<Verified, ConfirmError> {
        self.confirm_calls.fetch_add(1, Ordering::SeqCst);
        let mut consumed = self.consumed.lock().expect("lock");
        if consumed.contains(&challenge.id) {
            return Err(ConfirmError::Expired);
        }
        if code != self.code {
            return Err(ConfirmError::WrongCode);
        }
        consumed.push(challenge.id.clone());
        Ok(Verified)
    }
}

/// Fake registration store with a deterministic millisecond clock.
pub struct MemoryStore {
    pub fail_appends: AtomicBool,
    pub fail_lists: AtomicBool,
    pub fail_updates: AtomicBool,
    pub fail_removes: AtomicBool,
    pub append_calls: AtomicUsize,
    clock_millis: AtomicI64,
    next_key: AtomicUsize,
    records: Mutex<Vec<RegistrationRecord>>,
}

impl MemoryStore {
    pub fn new() -> SharedStore {
        SharedStore(Arc::new(Self {
            fail_appends: AtomicBool::new(false),
            fail_lists: AtomicBool::new(false),
            fail_updates: AtomicBool::new(false),
            fail_removes: AtomicBool::new(false),
            append_calls: AtomicUsize::new(0),
            clock_millis: AtomicI64::new(1_754_000_000_000),
            next_key: AtomicUsize::new(1),
            records: Mutex::new(Vec::new()),
        }))
    }

    /// Seed `count` records directly, bypassing the workflow.
    pub fn seed(&self, count: usize) {
        let mut records = self.records.lock().expect("lock");
        for _ in 0..count {
            let millis = self.clock_millis.fetch_add(1_000, Ordering::SeqCst);
            let key = self.next_key.fetch_add(1, Ordering::SeqCst);
            records.push(RegistrationRecord {
                id: format!("key-{key}"),
                name: format!("Participant {key}"),
                age: "16".into(),
                gender: bkl_core::model::Gender::Other,
                address: format!("Ward {key}, Guwahati"),
                mobile: format!("98{key:08}"),
                phone_verified: true,
                registration_number: regnum::registration_number(millis),
                status: Status::Registered,
                created_at: Some(millis / 1_000),
            });
        }
    }

    pub fn snapshot(&self) -> Vec<RegistrationRecord> {
        let mut records = self.records.lock().expect("lock").clone();
        records.reverse();
        records
    }
}

/// Cloneable shared handle the tests pass to the roster/workflow while
/// retaining a copy to inspect. Delegates the trait to the inner `MemoryStore`.
#[derive(Clone)]
pub struct SharedStore(Arc<MemoryStore>);

impl std::ops::Deref for SharedStore {
    type Target = MemoryStore;
    fn deref(&self) -> &MemoryStore {
        &self.0
    }
}

#[async_trait]
impl RegistrationStore for SharedStore {
    async fn append(&self, record: NewRegistration) -> Result<StoredRegistration, StoreError> {
        self.0.append(record).await
    }

    async fn list_all(&self) -> Result<Vec<RegistrationRecord>, StoreError> {
        self.0.list_all().await
    }

    async fn update_status(&self, storage_key: &str, status: Status) -> Result<(), StoreError> {
        self.0.update_status(storage_key, status).await
    }

    async fn remove(&self, storage_key: &str) -> Result<(), StoreError> {
        self.0.remove(storage_key).await
    }
}

#[async_trait]
impl RegistrationStore for MemoryStore {
    async fn append(&self, record: NewRegistration) -> Result<StoredRegistration, StoreError> {
        self.append_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_appends.load(Ordering::SeqCst) {
            return Err(StoreError::Backend("append rejected".into()));
        }
        let millis = self.clock_millis.fetch_add(1_000, Ordering::SeqCst);
        let key = self.next_key.fetch_add(1, Ordering::SeqCst);
        let stored = StoredRegistration {
            registration_number: regnum::registration_number(millis),
            storage_key: format!("key-{key}"),
        };
        self.records.lock().expect("lock").push(RegistrationRecord {
            id: stored.storage_key.clone(),
            name: record.name,
            age: record.age,
            gender: record.gender,
            address: record.address,
            mobile: record.mobile,
            phone_verified: record.phone_verified,
            registration_number: stored.registration_number.clone(),
            status: Status::default(),
            created_at: Some(millis / 1_000),
        });
        Ok(stored)
    }

    async fn list_all(&self) -> Result<Vec<RegistrationRecord>, StoreError> {
        if self.fail_lists.load(Ordering::SeqCst) {
            return Err(StoreError::Backend("list rejected".into()));
        }
        Ok(self.snapshot())
    }

    async fn update_status(&self, storage_key: &str, status: Status) -> Result<(), StoreError> {
        if self.fail_updates.load(Ordering::SeqCst) {
            return Err(StoreError::Backend("update rejected".into()));
        }
        let mut records = self.records.lock().expect("lock");
        let Some(record) = records.iter_mut().find(|r| r.id == storage_key) else {
            return Err(StoreError::NotFound);
        };
        record.status = status;
        Ok(())
    }

    async fn remove(&self, storage_key: &str) -> Result<(), StoreError> {
        if self.fail_removes.load(Ordering::SeqCst) {
            return Err(StoreError::Backend("remove rejected".into()));
        }
        let mut records = self.records.lock().expect("lock");
        let before = records.len();
        records.retain(|r| r.id != storage_key);
        if records.len() == before {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }
}

/// A filled, valid form.
pub fn valid_form() -> bkl_core::RegistrationForm {
    bkl_core::RegistrationForm {
        name: "Bikash Kalita".into(),
        age: "17".into(),
        gender: "male".into(),
        address: "Six Mile, Guwahati".into(),
        mobile: "9876543210".into(),
    }
}
