use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Phone-verification challenges backing the registration OTP flow.
///
/// Challenges live in libSQL rather than provider-side session state, so the
/// Worker stays stateless between the send-code and verify requests. The
/// code itself is never stored; only a salted hash is.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "otp_challenges")]
pub struct Model {
    /// Opaque challenge token (hex).
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    /// 10-digit national number the code was delivered to.
    pub mobile: String,

    /// PBKDF2 hash of the delivered code.
    pub code_hash: Vec<u8>,

    pub salt: Vec<u8>,

    /// Set on successful confirmation; challenges are single-use.
    pub consumed: bool,

    /// Unix timestamp (seconds).
    pub created_at: i64,

    /// Unix timestamp (seconds).
    pub expires_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
