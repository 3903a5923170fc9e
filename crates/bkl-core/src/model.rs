use chrono::{TimeZone, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "male" => Some(Gender::Male),
            "female" => Some(Gender::Female),
            "other" => Some(Gender::Other),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
            Gender::Other => "other",
        }
    }
}

/// Moderation status. Mutable only by an authenticated admin; there are no
/// automatic transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    #[default]
    Registered,
    Confirmed,
    Cancelled,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Registered => "registered",
            Status::Confirmed => "confirmed",
            Status::Cancelled => "cancelled",
        }
    }
}

/// One persisted participant record.
///
/// `registration_number` is assigned exactly once, at first successful
/// persistence. `created_at` (Unix seconds, server-assigned) is immutable and
/// its descending order defines both display order and gift-eligibility rank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationRecord {
    /// Storage key of the record.
    pub id: String,
    pub name: String,
    /// Text-encoded non-negative integer, as entered.
    pub age: String,
    pub gender: Gender,
    pub address: String,
    /// Exactly 10 digits, national subscriber number. The international
    /// prefix is never stored.
    pub mobile: String,
    pub phone_verified: bool,
    pub registration_number: String,
    pub status: Status,
    /// Unix timestamp (seconds). Absent only on rows written before the
    /// server clock was recorded.
    pub created_at: Option<i64>,
}

impl RegistrationRecord {
    /// Creation date for display and export, `N/A` when absent.
    pub fn created_date(&self) -> String {
        match self.created_at.and_then(|ts| Utc.timestamp_opt(ts, 0).single()) {
            Some(dt) => dt.format("%d/%m/%Y").to_string(),
            None => "N/A".to_string(),
        }
    }
}

/// A validated submission, ready to append. The store assigns the
/// registration number, storage key and creation time at write time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewRegistration {
    pub name: String,
    pub age: String,
    pub gender: Gender,
    pub address: String,
    pub mobile: String,
    pub phone_verified: bool,
}

/// What `append` hands back to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredRegistration {
    pub registration_number: String,
    pub storage_key: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gender_parses_case_insensitively() {
        assert_eq!(Gender::parse("Male"), Some(Gender::Male));
        assert_eq!(Gender::parse(" female "), Some(Gender::Female));
        assert_eq!(Gender::parse("unknown"), None);
        assert_eq!(Gender::parse(""), None);
    }

    #[test]
    fn created_date_renders_or_falls_back() {
        let mut rec = RegistrationRecord {
            id: "k1".into(),
            name: "A".into(),
            age: "12".into(),
            gender: Gender::Male,
            address: "Guwahati".into(),
            mobile: "9876543210".into(),
            phone_verified: true,
            registration_number: "BKL000001".into(),
            status: Status::Registered,
            // 2026-08-06 00:00:00 UTC
            created_at: Some(1_785_974_400),
        };
        assert_eq!(rec.created_date(), "06/08/2026");

        rec.created_at = None;
        assert_eq!(rec.created_date(), "N/A");
    }
}
