//! # NDPC Client
//!
//! Client for the NDPC NFT marketplace contract on a Casper network.
//!
//! **Architecture:** Hexagonal (DDD + Ports/Adapters)
//!
//! ## Purpose
//!
//! - Read marketplace state (tokens, holders, requests, approved holdings)
//!   out of the contract's dictionaries over the node's JSON-RPC API
//! - Decode the two on-chain record families (fixed-layout bytes and
//!   comma-delimited text)
//! - Build unsigned deploy descriptions for every marketplace operation
//!
//! ## Read Model
//!
//! | Rule | Description |
//! |------|-------------|
//! | Fresh root | Every dictionary lookup fetches its own state root |
//! | No defaults | A record that fails to decode is an error, never a partial value |
//! | Holder join | A holder read is holder record first, then its token |
//!
//! ## Module Structure
//!
//! ```text
//! ndpc-client/
//! ├── domain/          # Entities, value objects, dictionary names, errors
//! ├── codec/           # Byte-record and delimited-text decoders
//! ├── ports/           # MarketplaceReader (inbound), StateQueryService (outbound)
//! ├── adapters/        # CasperRpcNode (JSON-RPC over reqwest)
//! ├── application/     # MarketplaceRepository, IdentityRegistry
//! ├── transactions/    # Runtime args, deploy descriptions, builder
//! └── config.rs        # ClientConfig
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod adapters;
pub mod application;
pub mod codec;
pub mod config;
pub mod domain;
pub mod ports;
pub mod transactions;

// Re-exports
pub use adapters::CasperRpcNode;
pub use application::{IdentityRegistry, MarketplaceRepository};
pub use config::{ClientConfig, ConfigError};
pub use domain::{
    AccountHash, AccountIdentity, ApprovedHolding, Commission, ContractHash, Holder,
    HolderRecord, MarketplaceError, RequestObject, RootHandle, SecretKeyRef, StoredClValue,
    Token, TokenMetadata,
};
pub use ports::{MarketplaceReader, MockStateNode, StateQueryService};
pub use transactions::{
    BuyRequest, DeployDescription, DeployTarget, DisapproveRequest, MintRequest, PublishRequest,
    TransactionBuilder,
};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
