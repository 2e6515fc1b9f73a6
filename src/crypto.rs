use bech32::{FromBase32, ToBase32, Variant};
use serde::{Serialize, Serializer};
use std::fmt;
use thiserror::Error;

pub const ADDR_LEN: usize = 20;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AddressError {
    #[error("empty address string is not allowed")]
    Empty,
    #[error("decoding bech32 failed: {0}")]
    Bech32(String),
    #[error("invalid Bech32 prefix; expected {expected}, got {got}")]
    Prefix { expected: String, got: String },
    #[error("incorrect address length (expected: 20, actual: {0})")]
    Length(usize),
    #[error("invalid Bech32 prefix `{0}`")]
    BadPrefix(String),
}

// Account address: raw 20 bytes plus the HRP it was decoded under, so it can be
// written back into the amino JSON of a message unchanged.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AccAddress {
    bytes:   [u8; ADDR_LEN],
    prefix:  String,
    encoded: String,
}

impl AccAddress {
    /// Builds an address from raw bytes. The prefix must be a lower-case
    /// bech32 HRP.
    pub fn new(bytes: [u8; ADDR_LEN], prefix: &str) -> Result<Self, AddressError> {
        if prefix.bytes().any(|b| b.is_ascii_uppercase()) {
            return Err(AddressError::BadPrefix(prefix.to_owned()));
        }
        let encoded = bech32::encode(prefix, bytes.to_base32(), Variant::Bech32)
            .map_err(|_| AddressError::BadPrefix(prefix.to_owned()))?;
        Ok(AccAddress { bytes, prefix: prefix.to_owned(), encoded })
    }

    pub fn from_bech32(s: &str, expected_prefix: &str) -> Result<Self, AddressError> {
        let s = s.trim();
        if s.is_empty() {
            return Err(AddressError::Empty);
        }

        let (hrp, data, variant) = bech32::decode(s)
            .map_err(|e| AddressError::Bech32(e.to_string()))?;
        if variant != Variant::Bech32 {
            return Err(AddressError::Bech32("unexpected bech32m checksum".into()));
        }
        if hrp != expected_prefix {
            return Err(AddressError::Prefix {
                expected: expected_prefix.to_owned(),
                got:      hrp,
            });
        }

        let raw = Vec::<u8>::from_base32(&data)
            .map_err(|e| AddressError::Bech32(e.to_string()))?;
        let bytes: [u8; ADDR_LEN] = raw
            .as_slice()
            .try_into()
            .map_err(|_| AddressError::Length(raw.len()))?;

        // re-encode rather than keep `s`: decode accepts an all upper-case string
        Self::new(bytes, &hrp)
    }

    pub fn to_bech32(&self) -> &str {
        &self.encoded
    }

    pub fn as_bytes(&self) -> &[u8; ADDR_LEN] {
        &self.bytes
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn to_hex(&self) -> String {
        hex::encode_upper(self.bytes)
    }

    /// True for the all-zero address, which no key can sign for.
    pub fn is_empty(&self) -> bool {
        self.bytes.iter().all(|b| *b == 0)
    }
}

impl fmt::Display for AccAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encoded)
    }
}

impl Serialize for AccAddress {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.encoded)
    }
}

// Canonical JSON (sorted keys, no whitespace) of anything the client is expected to sign.
pub fn sign_bytes<T: Serialize>(doc: &T) -> anyhow::Result<Vec<u8>> {
    use anyhow::Context;
    serde_jcs::to_vec(doc).context("serialising canonical JSON (JCS)")
}
