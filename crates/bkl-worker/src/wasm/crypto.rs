use std::num::NonZeroU32;

use pbkdf2::pbkdf2_hmac;
use sha2::Sha256;

const OUTPUT_LEN: usize = 32;

/// OTP codes are low-entropy, so the stored hash gets a real work factor.
const CODE_ITERATIONS: u32 = 10_000;

/// Hash a delivered OTP code with its per-challenge salt. The plaintext code
/// is never persisted.
pub fn hash_code(code: &str, salt: &[u8]) -> Vec<u8> {
    let mut out = vec![0u8; OUTPUT_LEN];
    let iterations = NonZeroU32::new(CODE_ITERATIONS).expect("Iterations must be non-zero");
    pbkdf2_hmac::<Sha256>(code.as_bytes(), salt, iterations.get(), &mut out);
    out
}

pub fn verify_code(code: &str, salt: &[u8], expected: &[u8]) -> bool {
    if expected.len() != OUTPUT_LEN {
        return false;
    }

    // Derive and constant-time compare.
    let derived = hash_code(code, salt);
    subtle::ConstantTimeEq::ct_eq(derived.as_slice(), expected).into()
}
