//! # Generated Codes
//!
//! Random numeric codes (OTPs, first-login passwords) and hex tokens
//! (API keys and secrets, session ids).
//!
//! `numeric_code` and `hex_token` take the RNG as a parameter; the
//! `generate_*` helpers use the thread-local RNG.

use rand::Rng;

use crate::{GENERATED_PASSWORD_LENGTH, OTP_LENGTH};

/// Generates a numeric code of exactly `len` digits (leading zeros allowed).
///
/// ```rust
/// use fh_core::codes::numeric_code;
///
/// let code = numeric_code(&mut rand::thread_rng(), 6);
/// assert_eq!(code.len(), 6);
/// assert!(code.chars().all(|c| c.is_ascii_digit()));
/// ```
pub fn numeric_code<R: Rng + ?Sized>(rng: &mut R, len: usize) -> String {
    (0..len)
        .map(|_| char::from(b'0' + rng.gen_range(0..10u8)))
        .collect()
}

/// Generates a lowercase hex token of `len` characters.
pub fn hex_token<R: Rng + ?Sized>(rng: &mut R, len: usize) -> String {
    const HEX: &[u8; 16] = b"0123456789abcdef";
    (0..len)
        .map(|_| char::from(HEX[rng.gen_range(0..16usize)]))
        .collect()
}

/// A fresh 6-digit OTP.
pub fn generate_otp() -> String {
    numeric_code(&mut rand::thread_rng(), OTP_LENGTH)
}

/// A fresh 4-digit password sent to newly registered customers.
pub fn generate_password() -> String {
    numeric_code(&mut rand::thread_rng(), GENERATED_PASSWORD_LENGTH)
}

/// A fresh API key or secret.
pub fn generate_api_token() -> String {
    hex_token(&mut rand::thread_rng(), crate::API_TOKEN_LENGTH)
}

/// A fresh customer document name, `CUST-` plus 8 uppercase hex digits.
pub fn generate_customer_name() -> String {
    format!(
        "CUST-{}",
        hex_token(&mut rand::thread_rng(), 8).to_uppercase()
    )
}

/// A fresh session id.
pub fn generate_sid() -> String {
    hex_token(&mut rand::thread_rng(), 56)
}
