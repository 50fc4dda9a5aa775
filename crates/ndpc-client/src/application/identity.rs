//! # Identity Registry
//!
//! Closed mapping from user slots (`1`, `2`, ...) to account identities.
//! Built once from configuration and passed to the shell.

use crate::config::ClientConfig;
use crate::domain::{AccountHash, AccountIdentity, MarketplaceError, Result};

/// Identities selectable by slot, in configuration order.
#[derive(Clone, Debug, Default)]
pub struct IdentityRegistry {
    identities: Vec<AccountIdentity>,
}

impl IdentityRegistry {
    /// Registry over `identities`; slot `n` is the `n`-th entry.
    pub fn new(identities: Vec<AccountIdentity>) -> Self {
        Self { identities }
    }

    /// Registry over the configured identities.
    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(config.identities.clone())
    }

    /// Resolve a slot as typed by the user.
    ///
    /// Accepts a 1-based slot number or an identity name.
    pub fn select(&self, slot: &str) -> Result<&AccountIdentity> {
        let slot = slot.trim();
        let by_index = slot
            .parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .and_then(|i| self.identities.get(i));

        by_index
            .or_else(|| self.identities.iter().find(|id| id.name == slot))
            .ok_or_else(|| MarketplaceError::UnknownIdentity(slot.to_string()))
    }

    /// Identity owning `hash`, if known.
    pub fn by_hash(&self, hash: &AccountHash) -> Option<&AccountIdentity> {
        self.identities.iter().find(|id| id.account_hash == *hash)
    }

    /// `hash` annotated with its identity name when known.
    pub fn display_name(&self, hash: &AccountHash) -> String {
        match self.by_hash(hash) {
            Some(identity) => format!("{} ({})", hash, identity.name),
            None => hash.to_string(),
        }
    }

    /// Identities in slot order.
    pub fn iter(&self) -> impl Iterator<Item = &AccountIdentity> {
        self.identities.iter()
    }

    /// Number of slots.
    pub fn len(&self) -> usize {
        self.identities.len()
    }

    /// True when no identity is configured.
    pub fn is_empty(&self) -> bool {
        self.identities.is_empty()
    }
}
