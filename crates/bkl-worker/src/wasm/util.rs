use chrono::Utc;

use getrandom::fill;

pub fn now_ts() -> i64 {
    Utc::now().timestamp()
}

/// Millisecond clock reading; registration identifiers derive from it.
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

pub fn today() -> chrono::NaiveDate {
    Utc::now().date_naive()
}

pub fn random_bytes(len: usize) -> Vec<u8> {
    let mut out = vec![0u8; len];
    fill(&mut out).expect("Failed to generate random bytes");
    out
}

pub fn hex_encode(bytes: &[u8]) -> String {
    const LUT: &[u8; 16] = b"0123456789abcdef";
    let mut out = String::with_capacity(bytes.len() * 2);
    for b in bytes {
        out.push(LUT[(b >> 4) as usize] as char);
        out.push(LUT[(b & 0x0f) as usize] as char);
    }
    out
}

/// Opaque admin session token. 256-bit, hex-encoded.
pub fn generate_session_token() -> String {
    hex_encode(&random_bytes(32))
}

/// Opaque challenge id. 128-bit, hex-encoded.
pub fn generate_challenge_id() -> String {
    hex_encode(&random_bytes(16))
}

/// Six-digit OTP code, zero-padded.
pub fn generate_otp_code() -> String {
    let bytes = random_bytes(4);
    let n = u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
    format!("{:06}", n % 1_000_000)
}

pub fn uuid_v4() -> String {
    // Generate a UUIDv4 string without pulling in an additional dependency.
    // Format: 8-4-4-4-12 hex characters.
    let mut b = random_bytes(16);

    // Set version = 4.
    b[6] = (b[6] & 0x0f) | 0x40;
    // Set variant = RFC4122.
    b[8] = (b[8] & 0x3f) | 0x80;

    const LUT: &[u8; 16] = b"0123456789abcdef";
    let mut out = String::with_capacity(36);

    for (i, byte) in b.iter().enumerate() {
        if i == 4 || i == 6 || i == 8 || i == 10 {
            out.push('-');
        }
        out.push(LUT[(byte >> 4) as usize] as char);
        out.push(LUT[(byte & 0x0f) as usize] as char);
    }

    out
}
