/// Registration identifier prefix shown to participants.
pub const PREFIX: &str = "BKL";

/// Produce a registration identifier from a millisecond timestamp: `BKL`
/// followed by the six least-significant decimal digits, zero-padded.
///
/// Two records persisted within the same millisecond-modulo-10^6 window get
/// the same identifier; the store does not detect or reject the collision.
/// The format is an externally visible artifact and is kept exactly.
pub fn registration_number(millis: i64) -> String {
    format!("{PREFIX}{:06}", millis.rem_euclid(1_000_000))
}
