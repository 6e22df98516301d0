// src/utils/token.rs
use base64::{engine::general_purpose, Engine as _};
use rand::rngs::OsRng;
use rand::RngCore;

const SESSION_ID_BYTES: usize = 32;

/// Random identifier for a form session cookie.
pub fn generate_session_id() -> String {
    let mut random_bytes = [0u8; SESSION_ID_BYTES];
    OsRng.fill_bytes(&mut random_bytes);
    hex::encode(random_bytes)
}

/// URL-safe random token of `len` bytes before encoding.
pub fn generate_url_token(len: usize) -> String {
    let mut random_bytes = vec![0u8; len];
    OsRng.fill_bytes(&mut random_bytes);
    general_purpose::URL_SAFE_NO_PAD.encode(&random_bytes)
}

/// Session ids are produced by [`generate_session_id`]; anything else is rejected
/// before touching the store.
pub fn is_session_id(candidate: &str) -> bool {
    candidate.len() == SESSION_ID_BYTES * 2 && candidate.chars().all(|c| c.is_ascii_hexdigit())
}
