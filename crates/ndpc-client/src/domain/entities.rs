//! # Domain Entities
//!
//! Marketplace records as the client sees them. All of them are
//! request-scoped copies of remote state; nothing here is authoritative.

use primitive_types::U256;
use serde::{Deserialize, Serialize, Serializer};

use super::errors::{MarketplaceError, Result};
use super::value_objects::AccountHash;

/// Serialize a 256-bit integer as a decimal string.
fn serialize_decimal<S: Serializer>(value: &U256, serializer: S) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_str(&value.to_string())
}

/// Token metadata as supplied to `mint` (the JSON metadata file).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenMetadata {
    /// Token name.
    pub name: String,
    /// Token URI.
    pub token_uri: String,
    /// Content checksum.
    pub checksum: String,
}

impl TokenMetadata {
    /// Create metadata from its three fields.
    pub fn new(
        name: impl Into<String>,
        token_uri: impl Into<String>,
        checksum: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            token_uri: token_uri.into(),
            checksum: checksum.into(),
        }
    }

    /// Parse a metadata JSON document.
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| MarketplaceError::InvalidArgument {
            argument: "metadata",
            reason: e.to_string(),
        })
    }
}

/// A minted token, read from the `metadatas` dictionary.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Token {
    /// Token name.
    pub name: String,
    /// Token URI.
    pub token_uri: String,
    /// Content checksum.
    pub checksum: String,
    /// Unit price in motes.
    #[serde(serialize_with = "serialize_decimal")]
    pub price: U256,
    /// Commission percentage.
    pub commission: u8,
}

/// Fractional ownership record as stored in the `holders` dictionary.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct HolderRecord {
    /// Amount not yet offered to publishers.
    pub remaining_amount: u64,
    /// Total amount held.
    pub amount: u64,
    /// Token this holding refers to.
    pub token_id: u64,
}

/// Holder record joined with its token.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Holder {
    /// Amount not yet offered to publishers.
    pub remaining_amount: u64,
    /// Total amount held.
    pub amount: u64,
    /// Token id.
    pub token_id: u64,
    /// Joined token metadata.
    pub token: Token,
}

impl Holder {
    /// Join a decoded holder record with its token.
    pub fn join(record: HolderRecord, token: Token) -> Self {
        Self {
            remaining_amount: record.remaining_amount,
            amount: record.amount,
            token_id: record.token_id,
            token,
        }
    }
}

/// Pending offer to transfer part of a holding from a publisher to a
/// producer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RequestObject {
    /// Holding the request refers to.
    pub holder_id: u64,
    /// Requested amount.
    pub amount: u64,
    /// Commission percentage asked by the publisher.
    pub commission: u8,
    /// Account that owns the holding.
    pub producer: AccountHash,
    /// Account that published the request.
    pub publisher: AccountHash,
}

/// Approved request, read from the `approved` dictionary.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ApprovedHolding {
    /// Holding the approval was carved from.
    pub holder_id: u64,
    /// Amount still available for purchase.
    pub amount: u64,
    /// Producer account.
    pub owner: AccountHash,
    /// Publisher account.
    pub publisher: AccountHash,
    /// Token id.
    pub token_id: u64,
    /// Commission percentage.
    pub percentage: u8,
}
