use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::model::{Gender, NewRegistration};

/// National subscriber numbers are exactly 10 digits.
pub const MOBILE_LEN: usize = 10;

/// Normalize user input to the stored mobile format: strip everything that is
/// not a digit and truncate to 10 digits.
pub fn normalize_mobile(raw: &str) -> String {
    raw.chars()
        .filter(|c| c.is_ascii_digit())
        .take(MOBILE_LEN)
        .collect()
}

/// The five user-entered fields of a submission attempt, pre-validation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RegistrationForm {
    pub name: String,
    pub age: String,
    pub gender: String,
    pub address: String,
    pub mobile: String,
}

impl RegistrationForm {
    /// Replace the mobile field with the normalized rendition of `raw`.
    pub fn set_mobile(&mut self, raw: &str) {
        self.mobile = normalize_mobile(raw);
    }

    /// Check every precondition of the send-code and submit-code transitions.
    ///
    /// Fails locally; no backend call is made on behalf of an invalid form.
    pub fn validate(&self) -> Result<NewRegistration, ValidationError> {
        if self.mobile.len() != MOBILE_LEN || !self.mobile.chars().all(|c| c.is_ascii_digit()) {
            return Err(ValidationError::MobileLength);
        }
        let name = self.name.trim();
        if name.is_empty() {
            return Err(ValidationError::EmptyField("Name"));
        }
        let age = self.age.trim();
        if age.is_empty() {
            return Err(ValidationError::EmptyField("Age"));
        }
        if !age.chars().all(|c| c.is_ascii_digit()) {
            return Err(ValidationError::BadAge);
        }
        if self.gender.trim().is_empty() {
            return Err(ValidationError::EmptyField("Gender"));
        }
        let Some(gender) = Gender::parse(&self.gender) else {
            return Err(ValidationError::BadGender);
        };
        let address = self.address.trim();
        if address.is_empty() {
            return Err(ValidationError::EmptyField("Address"));
        }

        Ok(NewRegistration {
            name: name.to_string(),
            age: age.to_string(),
            gender,
            address: address.to_string(),
            mobile: self.mobile.clone(),
            phone_verified: false,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> RegistrationForm {
        RegistrationForm {
            name: "Ankita Das".into(),
            age: "14".into(),
            gender: "female".into(),
            address: "Maligaon, Guwahati".into(),
            mobile: "9876543210".into(),
        }
    }

    #[test]
    fn normalization_strips_and_truncates() {
        assert_eq!(normalize_mobile("98-765 43210x"), "9876543210");
        assert_eq!(normalize_mobile("+91 98765 43210"), "9198765432");
        assert_eq!(normalize_mobile(""), "");
    }

    #[test]
    fn valid_form_passes() {
        let rec = filled().validate().expect("valid form");
        assert_eq!(rec.gender, Gender::Female);
        assert!(!rec.phone_verified);
    }

    #[test]
    fn short_mobile_is_rejected() {
        let mut form = filled();
        form.mobile = "12345".into();
        assert_eq!(form.validate(), Err(ValidationError::MobileLength));
    }

    #[test]
    fn each_empty_field_is_rejected() {
        for (field, label) in [
            ("name", "Name"),
            ("age", "Age"),
            ("gender", "Gender"),
            ("address", "Address"),
        ] {
            let mut form = filled();
            match field {
                "name" => form.name.clear(),
                "age" => form.age.clear(),
                "gender" => form.gender.clear(),
                _ => form.address.clear(),
            }
            assert_eq!(
                form.validate(),
                Err(ValidationError::EmptyField(label)),
                "field {field}"
            );
        }
    }

    #[test]
    fn malformed_age_and_gender_are_rejected() {
        let mut form = filled();
        form.age = "twelve".into();
        assert_eq!(form.validate(), Err(ValidationError::BadAge));

        let mut form = filled();
        form.gender = "unspecified".into();
        assert_eq!(form.validate(), Err(ValidationError::BadGender));
    }
}
