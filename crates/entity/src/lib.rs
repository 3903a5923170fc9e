pub mod admin_session;
pub mod otp_challenge;
pub mod registration;

pub use admin_session::Entity as AdminSession;
pub use otp_challenge::Entity as OtpChallenge;
pub use registration::Entity as Registration;
