//! # Record Codec
//!
//! Decoders for the two on-chain record families:
//!
//! - structured bytes (`holders`, `approved`)
//! - delimited text (`metadatas`, `request_objects`) and `List<U64>` id lists

pub mod bytes;
pub mod delimited;

pub use bytes::{decode_approved, decode_holder, encode_holder, APPROVED_RECORD_LEN, HOLDER_RECORD_LEN};
pub use delimited::{decode_id_list, decode_request, decode_token, REQUEST_FIELDS, TOKEN_FIELDS};
