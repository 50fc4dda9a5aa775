//! # Domain Errors
//!
//! Error kinds surfaced by the query service, the record decoders, the
//! repository and the transaction builder. Nothing below the shell recovers
//! from these; they are propagated to the caller unchanged.

use thiserror::Error;

/// Marketplace client error types.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MarketplaceError {
    /// The node could not be reached, timed out, or did not answer with a
    /// usable envelope for a root request.
    #[error("Node unavailable: {0}")]
    NodeUnavailable(String),

    /// The dictionary has no entry for the requested key.
    #[error("Not found: {dictionary}[{key}]")]
    NotFound {
        /// Dictionary that was queried.
        dictionary: String,
        /// Item key that was absent.
        key: String,
    },

    /// The response envelope lacks the expected fields.
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// The node answered with a JSON-RPC error that is not a missing key.
    #[error("Node rejected request ({code}): {message}")]
    NodeRejected {
        /// JSON-RPC error code.
        code: i64,
        /// Error message reported by the node.
        message: String,
    },

    /// A structured-bytes record is shorter than its fixed layout.
    #[error("Truncated {record} record: expected {expected} bytes, got {got}")]
    TruncatedRecord {
        /// Record kind being decoded.
        record: &'static str,
        /// Bytes required by the layout.
        expected: usize,
        /// Bytes actually supplied.
        got: usize,
    },

    /// A delimited-text record has the wrong number of fields.
    #[error("Field count mismatch in {record} record: expected {expected}, got {got}")]
    FieldCountMismatch {
        /// Record kind being decoded.
        record: &'static str,
        /// Arity of the record kind.
        expected: usize,
        /// Fields actually present.
        got: usize,
    },

    /// A single field of a record could not be parsed.
    #[error("Invalid {field} in {record} record: {value:?}")]
    InvalidField {
        /// Record kind being decoded.
        record: &'static str,
        /// Field name.
        field: &'static str,
        /// Offending raw value.
        value: String,
    },

    /// A transaction argument exceeds its declared bit width or fails its
    /// domain range.
    #[error("Argument {argument} out of range: {value:?} ({bound})")]
    ArgumentOutOfRange {
        /// Wire argument name.
        argument: &'static str,
        /// Raw value supplied by the caller.
        value: String,
        /// Description of the accepted range.
        bound: String,
    },

    /// A transaction argument is malformed for reasons other than range.
    #[error("Invalid argument {argument}: {reason}")]
    InvalidArgument {
        /// Wire argument name.
        argument: &'static str,
        /// Why it was rejected.
        reason: String,
    },

    /// The identity selector has no identity in the requested slot.
    #[error("Unknown identity: {0}")]
    UnknownIdentity(String),
}

impl MarketplaceError {
    /// Short, stable name of the error kind (used by the shell when
    /// displaying failures).
    pub fn kind(&self) -> &'static str {
        match self {
            Self::NodeUnavailable(_) => "NodeUnavailable",
            Self::NotFound { .. } => "NotFound",
            Self::MalformedResponse(_) => "MalformedResponse",
            Self::NodeRejected { .. } => "NodeRejected",
            Self::TruncatedRecord { .. } => "TruncatedRecord",
            Self::FieldCountMismatch { .. } => "FieldCountMismatch",
            Self::InvalidField { .. } => "InvalidField",
            Self::ArgumentOutOfRange { .. } => "ArgumentOutOfRange",
            Self::InvalidArgument { .. } => "InvalidArgument",
            Self::UnknownIdentity(_) => "UnknownIdentity",
        }
    }

    /// Shorthand for a missing dictionary entry.
    pub fn not_found(dictionary: impl Into<String>, key: impl Into<String>) -> Self {
        Self::NotFound {
            dictionary: dictionary.into(),
            key: key.into(),
        }
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, MarketplaceError>;
