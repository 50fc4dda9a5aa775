//! # Application Layer
//!
//! Services composed from the ports: typed reads and identity selection.

pub mod identity;
pub mod repository;

pub use identity::IdentityRegistry;
pub use repository::MarketplaceRepository;
