//! # Domain Value Objects
//!
//! Immutable value types: hashes, root handles, commission, identities and
//! the raw CLValue envelope returned by dictionary lookups.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

use super::errors::{MarketplaceError, Result};

/// Length of account and contract hashes in bytes.
pub const HASH_LENGTH: usize = 32;

/// Formatted-key prefix for account hashes.
pub const ACCOUNT_HASH_PREFIX: &str = "account-hash-";

/// Formatted-key prefix for contract hashes.
pub const CONTRACT_HASH_PREFIX: &str = "hash-";

/// Upper bound of the commission percentage.
pub const MAX_COMMISSION: u8 = 100;

/// Failure to parse a 32-byte hash from text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HashParseError {
    /// Wrong number of hex characters.
    #[error("expected 64 hex characters, got {0}")]
    Length(usize),
    /// Not valid hex.
    #[error("invalid hex: {0}")]
    Hex(String),
}

fn parse_hash32(s: &str, prefix: &str) -> std::result::Result<[u8; HASH_LENGTH], HashParseError> {
    let s = s.trim();
    let s = s.strip_prefix(prefix).unwrap_or(s);
    if s.len() != HASH_LENGTH * 2 {
        return Err(HashParseError::Length(s.len()));
    }
    let mut out = [0u8; HASH_LENGTH];
    hex::decode_to_slice(s, &mut out).map_err(|e| HashParseError::Hex(e.to_string()))?;
    Ok(out)
}

macro_rules! hash_newtype {
    ($name:ident, $prefix:expr) => {
        impl $name {
            /// Raw bytes.
            pub fn as_bytes(&self) -> &[u8; HASH_LENGTH] {
                &self.0
            }

            /// Lowercase hex without prefix.
            pub fn to_hex(&self) -> String {
                hex::encode(self.0)
            }

            /// Formatted key string (`<prefix><hex>`) as used on the wire.
            pub fn to_formatted_string(&self) -> String {
                format!("{}{}", $prefix, self.to_hex())
            }
        }

        impl FromStr for $name {
            type Err = HashParseError;

            /// Accepts bare hex or the formatted-key form.
            fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
                parse_hash32(s, $prefix).map(Self)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.to_hex())
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.to_hex())
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
                serializer.serialize_str(&self.to_hex())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
                let s = String::deserialize(deserializer)?;
                s.parse().map_err(serde::de::Error::custom)
            }
        }
    };
}

/// 32-byte account hash (public identifier of an account).
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AccountHash(pub [u8; HASH_LENGTH]);

hash_newtype!(AccountHash, ACCOUNT_HASH_PREFIX);

/// 32-byte contract hash.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContractHash(pub [u8; HASH_LENGTH]);

hash_newtype!(ContractHash, CONTRACT_HASH_PREFIX);

/// Snapshot identifier of global state.
///
/// Obtained fresh before every query and dropped afterwards.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RootHandle(String);

impl RootHandle {
    /// Wrap a state root hash as returned by the node.
    pub fn new(hash: impl Into<String>) -> Self {
        Self(hash.into())
    }

    /// Root hash string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RootHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Commission percentage in `0..=100`.
///
/// The wire type is a plain `u8`; the range is a marketplace rule.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Commission(u8);

impl Commission {
    /// Validate a commission percentage.
    pub fn new(value: u8) -> Result<Self> {
        if value > MAX_COMMISSION {
            return Err(MarketplaceError::ArgumentOutOfRange {
                argument: "comission",
                value: value.to_string(),
                bound: format!("0..={MAX_COMMISSION}"),
            });
        }
        Ok(Self(value))
    }

    /// Percentage value.
    pub fn value(self) -> u8 {
        self.0
    }
}

/// Opaque handle to signing material (path of a PEM secret key).
///
/// The client never reads the key; it only passes the handle to the signer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SecretKeyRef(PathBuf);

impl SecretKeyRef {
    /// Create a handle from a key path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self(path.into())
    }

    /// Path handed to the signer.
    pub fn path(&self) -> &std::path::Path {
        &self.0
    }
}

/// Account identity known to the client.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountIdentity {
    /// Display name (e.g. `acc1`).
    pub name: String,
    /// Public account hash.
    pub account_hash: AccountHash,
    /// Handle to the signing key.
    pub secret_key: SecretKeyRef,
}

/// Raw CLValue envelope returned by a dictionary lookup.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct StoredClValue {
    /// Declared CLType (kept verbatim).
    #[serde(default)]
    pub cl_type: serde_json::Value,
    /// Hex of the serialized value.
    #[serde(default)]
    pub bytes: String,
    /// Human-readable rendering provided by the node.
    #[serde(default)]
    pub parsed: serde_json::Value,
}

impl StoredClValue {
    /// Value carrying only a parsed representation.
    pub fn parsed(cl_type: &str, parsed: serde_json::Value) -> Self {
        Self {
            cl_type: serde_json::Value::String(cl_type.to_string()),
            bytes: String::new(),
            parsed,
        }
    }

    /// Value carrying only raw bytes.
    pub fn raw(bytes_hex: impl Into<String>) -> Self {
        Self {
            cl_type: serde_json::Value::Null,
            bytes: bytes_hex.into(),
            parsed: serde_json::Value::Null,
        }
    }
}
