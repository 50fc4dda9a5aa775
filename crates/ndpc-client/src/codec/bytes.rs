//! # Structured-Bytes Decoding
//!
//! Fixed little-endian layouts written by the contract's `ToBytes`
//! implementations. Trailing bytes beyond the layout are ignored, matching
//! what the node returns for these values.

use crate::domain::{
    AccountHash, ApprovedHolding, HolderRecord, MarketplaceError, Result, HASH_LENGTH,
};

/// Size of an encoded holder: three little-endian u64s.
pub const HOLDER_RECORD_LEN: usize = 24;

/// Size of an encoded approved holding: 3 x u64 + 2 x hash + u8.
pub const APPROVED_RECORD_LEN: usize = 8 + 8 + HASH_LENGTH + HASH_LENGTH + 8 + 1;

fn decode_hex(record: &'static str, hex_str: &str) -> Result<Vec<u8>> {
    hex::decode(hex_str.trim()).map_err(|_| MarketplaceError::InvalidField {
        record,
        field: "bytes",
        value: hex_str.to_string(),
    })
}

fn require_len(record: &'static str, bytes: &[u8], expected: usize) -> Result<()> {
    if bytes.len() < expected {
        return Err(MarketplaceError::TruncatedRecord {
            record,
            expected,
            got: bytes.len(),
        });
    }
    Ok(())
}

/// Sequential little-endian reader over a length-checked buffer.
struct LeReader<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> LeReader<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }

    fn take<const N: usize>(&mut self) -> [u8; N] {
        let mut out = [0u8; N];
        out.copy_from_slice(&self.bytes[self.pos..self.pos + N]);
        self.pos += N;
        out
    }

    fn u64(&mut self) -> u64 {
        u64::from_le_bytes(self.take::<8>())
    }

    fn u8(&mut self) -> u8 {
        self.take::<1>()[0]
    }

    fn account_hash(&mut self) -> AccountHash {
        AccountHash(self.take::<HASH_LENGTH>())
    }
}

/// Decode a holder record from the hex of its CLValue bytes.
pub fn decode_holder(hex_str: &str) -> Result<HolderRecord> {
    let bytes = decode_hex("holder", hex_str)?;
    require_len("holder", &bytes, HOLDER_RECORD_LEN)?;

    let mut reader = LeReader::new(&bytes);
    Ok(HolderRecord {
        remaining_amount: reader.u64(),
        amount: reader.u64(),
        token_id: reader.u64(),
    })
}

/// Encode a holder record into the hex layout read by [`decode_holder`].
pub fn encode_holder(remaining_amount: u64, amount: u64, token_id: u64) -> String {
    let mut bytes = Vec::with_capacity(HOLDER_RECORD_LEN);
    bytes.extend_from_slice(&remaining_amount.to_le_bytes());
    bytes.extend_from_slice(&amount.to_le_bytes());
    bytes.extend_from_slice(&token_id.to_le_bytes());
    hex::encode(bytes)
}

/// Decode an approved holding from the hex of its CLValue bytes.
pub fn decode_approved(hex_str: &str) -> Result<ApprovedHolding> {
    let bytes = decode_hex("approved", hex_str)?;
    require_len("approved", &bytes, APPROVED_RECORD_LEN)?;

    let mut reader = LeReader::new(&bytes);
    Ok(ApprovedHolding {
        holder_id: reader.u64(),
        amount: reader.u64(),
        owner: reader.account_hash(),
        publisher: reader.account_hash(),
        token_id: reader.u64(),
        percentage: reader.u8(),
    })
}
