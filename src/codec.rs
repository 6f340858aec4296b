use crate::{errors::GateError, sandbox::Instance};

/// Per-byte XOR with a single-byte key. Applying it twice with the same key is the identity.
#[must_use]
pub fn xor_decode(bytes: &[u8], key: u8) -> Vec<u8> {
    bytes.iter().map(|b| b ^ key).collect()
}

pub fn xor_in_place(bytes: &mut [u8], key: u8) {
    for b in bytes {
        *b ^= key;
    }
}

/// A validator payload as stored, plus what it takes to make it loadable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObfuscatedPayload {
    raw: &'static [u8],
    key: u8,
    decode_on_load: bool,
}

impl ObfuscatedPayload {
    #[must_use]
    pub const fn obscured(raw: &'static [u8], key: u8) -> Self {
        Self { raw, key, decode_on_load: true }
    }

    #[must_use]
    pub const fn plain(raw: &'static [u8]) -> Self {
        Self { raw, key: 0, decode_on_load: false }
    }

    #[must_use]
    pub const fn raw(&self) -> &'static [u8] { self.raw }

    #[must_use]
    pub const fn key(&self) -> u8 { self.key }

    /// Loadable bytes. Consumes the payload so one value is never decoded twice.
    #[must_use]
    pub fn into_plaintext(self) -> Vec<u8> {
        if self.decode_on_load {
            xor_decode(self.raw, self.key)
        } else {
            self.raw.to_vec()
        }
    }
}

/// Run every byte of `payload` through the oracle's exported single-byte transform.
///
/// # Errors
///
/// Returns any sandbox error raised by the oracle call.
pub fn decode_with_oracle(payload: &[u8], oracle: &Instance, export: &str) -> Result<Vec<u8>, GateError> {
    payload
        .iter()
        .map(|&b| oracle.call(export, i32::from(b)).map(|v| v.to_le_bytes()[0]))
        .collect()
}
