use thiserror::Error;

/// Field-level failures caught locally, before any backend call is made.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{0} cannot be blank")]
    EmptyField(&'static str),

    #[error("Mobile number must be exactly 10 digits")]
    MobileLength,

    #[error("Age must be a non-negative number")]
    BadAge,

    #[error("Gender must be male, female or other")]
    BadGender,
}

/// OTP issuance failed. Recoverable by retrying from the form state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChallengeError {
    #[error("Phone number rejected by the verification provider")]
    InvalidNumber,

    #[error("Verification provider quota exceeded")]
    Quota,

    #[error("Verification provider error: {0}")]
    Provider(String),
}

/// Code confirmation failed. Recoverable by re-entering the code or
/// re-requesting a challenge.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfirmError {
    #[error("Wrong verification code")]
    WrongCode,

    #[error("Verification challenge expired")]
    Expired,

    #[error("Verification provider error: {0}")]
    Provider(String),
}

/// A store operation failed. Each operation is single-record and atomic, so
/// no partial state survives a failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("Record not found")]
    NotFound,

    #[error("Store error: {0}")]
    Backend(String),
}

/// Terminal-but-recoverable workflow failure reasons, stable strings shown
/// to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureReason {
    ChallengeRequestFailed,
    BadCode,
    PersistFailed,
}

impl FailureReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureReason::ChallengeRequestFailed => "challenge-request-failed",
            FailureReason::BadCode => "bad-code",
            FailureReason::PersistFailed => "persist-failed",
        }
    }
}

impl std::fmt::Display for FailureReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything the submission workflow can surface to its caller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Challenge(#[from] ChallengeError),

    #[error(transparent)]
    Confirm(#[from] ConfirmError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("Operation is not valid in the {0} state")]
    InvalidState(&'static str),
}
