use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, Set};
use worker::Env;

use bkl_core::error::{ChallengeError, ConfirmError};
use bkl_core::verify::{PendingChallenge, PhoneVerifier, Verified};

use entity::otp_challenge;

use crate::worker_wasm::crypto;
use crate::worker_wasm::sms::send_sms;
use crate::worker_wasm::util::{generate_challenge_id, generate_otp_code, now_ts, random_bytes};

/// Challenges expire after five minutes.
const CHALLENGE_TTL_SECS: i64 = 300;

/// `PhoneVerifier` backed by an `otp_challenges` row per challenge and SMS
/// delivery through Brevo.
///
/// The Worker is stateless between the send-code and verify requests, so
/// everything a confirmation needs lives in the row: the salted code hash,
/// the target mobile, the expiry and the consumed flag.
pub struct SmsVerifier<'a> {
    env: &'a Env,
    db: &'a DatabaseConnection,
}

impl<'a> SmsVerifier<'a> {
    pub fn new(env: &'a Env, db: &'a DatabaseConnection) -> Self {
        Self { env, db }
    }
}

#[async_trait(?Send)]
impl PhoneVerifier for SmsVerifier<'_> {
    async fn request_challenge(&self, mobile: &str) -> Result<PendingChallenge, ChallengeError> {
        if mobile.len() != 10 || !mobile.chars().all(|c| c.is_ascii_digit()) {
            return Err(ChallengeError::InvalidNumber);
        }

        let code = generate_otp_code();
        let salt = random_bytes(32);
        let now = now_ts();

        let challenge = PendingChallenge {
            id: generate_challenge_id(),
            mobile: mobile.to_string(),
        };

        let active = otp_challenge::ActiveModel {
            id: Set(challenge.id.clone()),
            mobile: Set(challenge.mobile.clone()),
            code_hash: Set(crypto::hash_code(&code, &salt)),
            salt: Set(salt),
            consumed: Set(false),
            created_at: Set(now),
            expires_at: Set(now + CHALLENGE_TTL_SECS),
        };

        active
            .insert(self.db)
            .await
            .map_err(|e| ChallengeError::Provider(e.to_string()))?;

        let content = format!(
            "{code} is your Brahmaputra Karate League verification code. It expires in 5 minutes."
        );
        if let Err(e) = send_sms(self.env, &challenge.mobile, &content).await {
            worker::console_log!("SMS dispatch failed: {e}");
            let msg = e.to_string();
            if msg.contains("status=429") {
                return Err(ChallengeError::Quota);
            }
            return Err(ChallengeError::Provider(msg));
        }

        Ok(challenge)
    }

    async fn confirm_challenge(
        &self,
        challenge: &PendingChallenge,
        code: &str,
    ) -> Result<Verified, ConfirmError> {
        let found = otp_challenge::Entity::find_by_id(challenge.id.clone())
            .one(self.db)
            .await
            .map_err(|e| ConfirmError::Provider(e.to_string()))?;

        // An unknown id means the challenge was never issued or has been
        // cleaned up; either way it is no longer confirmable.
        let Some(row) = found else {
            return Err(ConfirmError::Expired);
        };

        if row.consumed || row.expires_at <= now_ts() {
            return Err(ConfirmError::Expired);
        }
        if row.mobile != challenge.mobile {
            return Err(ConfirmError::WrongCode);
        }
        if !crypto::verify_code(code.trim(), &row.salt, &row.code_hash) {
            return Err(ConfirmError::WrongCode);
        }

        // Single-use: burn the challenge before reporting success.
        let mut active: otp_challenge::ActiveModel = row.into();
        active.consumed = Set(true);
        active
            .update(self.db)
            .await
            .map_err(|e| ConfirmError::Provider(e.to_string()))?;

        Ok(Verified)
    }
}
