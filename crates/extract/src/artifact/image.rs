//! Image encoding.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};

/// Standard, padded base64 of raw image bytes.
pub fn encode_base64(bytes: &[u8]) -> String {
    BASE64.encode(bytes)
}
