//! # Dictionary Names
//!
//! Named dictionaries exposed by the marketplace contract. These strings are
//! part of the wire contract and are reproduced verbatim, including the
//! on-chain spelling of `publiser_requests`.

/// Request id -> delimited request record.
pub const REQUEST_OBJECTS: &str = "request_objects";

/// Producer account -> list of incoming request ids.
pub const PRODUCER_REQUESTS: &str = "producer_requests";

/// Publisher account -> list of outgoing request ids.
pub const PUBLISHER_REQUESTS: &str = "publiser_requests";

/// Token id -> delimited token record.
pub const METADATAS: &str = "metadatas";

/// Holder id -> 24-byte holder record.
pub const HOLDERS: &str = "holders";

/// Account -> list of holder ids.
pub const OWNERS: &str = "owners";

/// Approved id -> 89-byte approved record.
pub const APPROVED: &str = "approved";

/// Publisher account -> list of approved ids.
pub const PUBLISHERS_APPROVED: &str = "publishers_approved";

/// Producer account -> list of approved ids.
pub const PRODUCERS_APPROVED: &str = "producers_approved";
