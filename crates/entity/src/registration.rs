use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(8))")]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    #[sea_orm(string_value = "male")]
    Male,
    #[sea_orm(string_value = "female")]
    Female,
    #[sea_orm(string_value = "other")]
    Other,
}

/// Moderation status; mutated only by admin actions, no automatic
/// transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "lowercase")]
#[derive(Default)]
pub enum Status {
    #[sea_orm(string_value = "registered")]
    #[default]
    Registered,
    #[sea_orm(string_value = "confirmed")]
    Confirmed,
    #[sea_orm(string_value = "cancelled")]
    Cancelled,
}

/// One participant registration.
///
/// `registration_number` is assigned at insert time and never rewritten.
/// It is intentionally not unique: identifiers derive from the creation-time
/// millisecond clock, and colliding windows are accepted as-is.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "registrations")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    pub name: String,

    /// Text-encoded non-negative integer, as entered.
    pub age: String,

    pub gender: Gender,

    pub address: String,

    /// Exactly 10 digits, national subscriber number. The international
    /// prefix is applied at the OTP-provider boundary only.
    pub mobile: String,

    /// True only after a successful OTP confirmation for the same
    /// submission attempt.
    pub phone_verified: bool,

    pub registration_number: String,

    pub status: Status,

    /// Unix timestamp (seconds), server-assigned, immutable. Descending
    /// order defines display order and gift-eligibility rank.
    pub created_at: Option<i64>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
