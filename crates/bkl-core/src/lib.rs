//! Domain logic for the Brahmaputra Karate League registration service.
//!
//! Everything here is independent of the HTTP runtime: the submission
//! workflow, the admin roster and session gate, validation, identifier
//! generation and CSV export all compile and test natively. The two external
//! collaborators (the phone-verification provider and the registration
//! store) are trait seams implemented by the worker crate.

pub mod csv;
pub mod error;
pub mod form;
pub mod model;
pub mod regnum;
pub mod roster;
pub mod session;
pub mod store;
pub mod verify;
pub mod workflow;

pub use error::{
    ChallengeError, ConfirmError, FailureReason, StoreError, SubmitError, ValidationError,
};
pub use form::{normalize_mobile, RegistrationForm};
pub use model::{Gender, NewRegistration, RegistrationRecord, Status, StoredRegistration};
pub use roster::RegistrationRoster;
pub use store::RegistrationStore;
pub use verify::{PendingChallenge, PhoneVerifier, Verified};
pub use workflow::{SubmissionWorkflow, WorkflowState};
