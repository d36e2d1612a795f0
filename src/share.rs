//! Score-share links
//!
//! Encodes a finished run as a URL-safe string so players can paste a
//! result anywhere. The payload is JSON wrapped in unpadded base64url;
//! decoding is defensive and hands back `None` for anything that is not a
//! well-formed payload carrying all four fields with the right types.

use serde::{Deserialize, Serialize};

/// The four fields a shared score carries
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShareData {
    pub player_name: String,
    pub score: f64,
    /// Level display name, e.g. "Cozy Bedroom"
    pub level: String,
    pub difficulty: String,
}

/// Encode a share payload as a URL-safe string
pub fn encode(data: &ShareData) -> String {
    match serde_json::to_vec(data) {
        Ok(bytes) => base64url_encode(&bytes),
        Err(e) => {
            // Unreachable for this plain struct, but never worth a panic
            log::warn!("share payload serialization failed: {e}");
            String::new()
        }
    }
}

/// Decode a shared string; `None` for garbage, missing fields, or type
/// mismatches
pub fn decode(encoded: &str) -> Option<ShareData> {
    let bytes = base64url_decode(encoded)?;
    serde_json::from_slice(&bytes).ok()
}

const ALPHABET: &[u8; 64] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789-_";

fn base64url_encode(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len().div_ceil(3) * 4);
    for chunk in bytes.chunks(3) {
        let b0 = chunk[0] as u32;
        let b1 = chunk.get(1).copied().unwrap_or(0) as u32;
        let b2 = chunk.get(2).copied().unwrap_or(0) as u32;
        let word = (b0 << 16) | (b1 << 8) | b2;

        out.push(ALPHABET[(word >> 18) as usize & 63] as char);
        out.push(ALPHABET[(word >> 12) as usize & 63] as char);
        if chunk.len() > 1 {
            out.push(ALPHABET[(word >> 6) as usize & 63] as char);
        }
        if chunk.len() > 2 {
            out.push(ALPHABET[word as usize & 63] as char);
        }
    }
    out
}

fn decode_char(c: u8) -> Option<u32> {
    match c {
        b'A'..=b'Z' => Some((c - b'A') as u32),
        b'a'..=b'z' => Some((c - b'a') as u32 + 26),
        b'0'..=b'9' => Some((c - b'0') as u32 + 52),
        b'-' => Some(62),
        b'_' => Some(63),
        _ => None,
    }
}

fn base64url_decode(s: &str) -> Option<Vec<u8>> {
    // A single trailing symbol encodes fewer than 8 bits; never valid
    if s.len() % 4 == 1 {
        return None;
    }
    let mut out = Vec::with_capacity(s.len() / 4 * 3 + 2);
    for chunk in s.as_bytes().chunks(4) {
        let mut word: u32 = 0;
        for &c in chunk {
            word = (word << 6) | decode_char(c)?;
        }
        word <<= 6 * (4 - chunk.len()) as u32;
        out.push((word >> 16) as u8);
        if chunk.len() > 2 {
            out.push((word >> 8) as u8);
        }
        if chunk.len() > 3 {
            out.push(word as u8);
        }
    }
    Some(out)
}
