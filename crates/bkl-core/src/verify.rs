use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::{ChallengeError, ConfirmError};

/// Handle to an issued, not-yet-confirmed OTP challenge.
///
/// Opaque to the workflow; the verifier that issued it is the only party
/// that can interpret `id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingChallenge {
    pub id: String,
    /// The 10-digit national number the code was delivered to.
    pub mobile: String,
}

/// Marker minted by a successful code confirmation.
#[derive(Debug)]
pub struct Verified;

/// The phone-verification collaborator.
///
/// Challenges are single-use: once a confirmation succeeds, the same
/// challenge cannot be confirmed again.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait PhoneVerifier {
    /// Issue a challenge for a 10-digit national number, triggering an
    /// out-of-band code delivery. The international prefix is applied at the
    /// provider boundary, never stored.
    async fn request_challenge(&self, mobile: &str) -> Result<PendingChallenge, ChallengeError>;

    /// Confirm a user-entered code against an issued challenge.
    async fn confirm_challenge(
        &self,
        challenge: &PendingChallenge,
        code: &str,
    ) -> Result<Verified, ConfirmError>;
}
