use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Opaque admin bearer tokens. A row's presence is the session marker;
/// sessions do not expire and are removed on logout.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "admin_sessions")]
pub struct Model {
    /// 256-bit token, hex-encoded.
    #[sea_orm(primary_key, auto_increment = false)]
    pub token: String,

    /// Unix timestamp (seconds).
    pub created_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
