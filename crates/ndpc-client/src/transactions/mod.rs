//! # Transactions
//!
//! Typed session arguments, deploy descriptions and the builder that
//! produces them. Nothing here signs or submits.

pub mod args;
pub mod builder;
pub mod deploy;

pub use args::{parse_u256, parse_u64, parse_u8, ArgValue, NamedArg, RuntimeArgs};
pub use builder::{BuyRequest, DisapproveRequest, MintRequest, PublishRequest, TransactionBuilder};
pub use deploy::{DeployDescription, DeployTarget};
