//! # Outbound Ports
//!
//! The node's query interface as consumed by the repository, plus an
//! in-memory implementation used by tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::domain::{
    AccountHash, ContractHash, MarketplaceError, Result, RootHandle, StoredClValue,
};

/// State query service - outbound port.
///
/// Implementations must honour a caller-supplied timeout and report it as
/// `NodeUnavailable`.
#[async_trait]
pub trait StateQueryService: Send + Sync {
    /// Fetch the current state root.
    async fn current_root(&self) -> Result<RootHandle>;

    /// Look up an item of a contract dictionary under `root`.
    async fn dictionary_lookup(
        &self,
        root: &RootHandle,
        dictionary: &str,
        item_key: &str,
        contract: &ContractHash,
    ) -> Result<StoredClValue>;

    /// Resolve a named key of an account under `root`, returning the raw
    /// `stored_value` JSON.
    async fn query_named_key(
        &self,
        root: &RootHandle,
        account: &AccountHash,
        path: &[String],
    ) -> Result<serde_json::Value>;

    /// Identifier of the backing node, for logging.
    fn node_id(&self) -> &str;
}

// =============================================================================
// Mock Implementation for Testing
// =============================================================================

/// A recorded call against [`MockStateNode`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MockCall {
    /// `current_root` was called.
    Root,
    /// `dictionary_lookup` was called with (root, dictionary, key).
    Lookup {
        /// Root handle passed in.
        root: String,
        /// Dictionary name.
        dictionary: String,
        /// Item key.
        key: String,
    },
    /// `query_named_key` was called.
    NamedKey {
        /// Account queried.
        account: AccountHash,
        /// Path under the account.
        path: Vec<String>,
    },
}

/// In-memory node holding dictionary items.
///
/// Every `current_root` call yields a new root (`root-1`, `root-2`, ...) so
/// tests can check that each lookup used a freshly fetched root.
#[derive(Default)]
pub struct MockStateNode {
    pub(crate) items: HashMap<(String, String), StoredClValue>,
    pub(crate) named_keys: HashMap<(AccountHash, Vec<String>), serde_json::Value>,
    pub(crate) roots: AtomicU64,
    pub(crate) calls: Mutex<Vec<MockCall>>,
    /// When set, every call fails with `NodeUnavailable`.
    pub should_fail: bool,
}

impl MockStateNode {
    /// Empty node.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a dictionary item.
    pub fn insert(&mut self, dictionary: &str, key: impl Into<String>, value: StoredClValue) {
        self.items.insert((dictionary.to_string(), key.into()), value);
    }

    /// Insert a text-valued item (`parsed` holds a JSON string).
    pub fn insert_text(&mut self, dictionary: &str, key: impl Into<String>, text: &str) {
        self.insert(
            dictionary,
            key,
            StoredClValue::parsed("String", serde_json::Value::String(text.to_string())),
        );
    }

    /// Insert a raw-bytes item.
    pub fn insert_bytes(&mut self, dictionary: &str, key: impl Into<String>, hex_bytes: &str) {
        self.insert(dictionary, key, StoredClValue::raw(hex_bytes));
    }

    /// Insert a `List<U64>` item.
    pub fn insert_id_list(&mut self, dictionary: &str, key: impl Into<String>, ids: &[u64]) {
        self.insert(
            dictionary,
            key,
            StoredClValue::parsed("List<U64>", serde_json::json!(ids)),
        );
    }

    /// Insert a named-key value for an account.
    pub fn insert_named_key(&mut self, account: AccountHash, path: &[&str], value: serde_json::Value) {
        let path = path.iter().map(|p| p.to_string()).collect();
        self.named_keys.insert((account, path), value);
    }

    /// Calls received so far, in order.
    pub fn calls(&self) -> Vec<MockCall> {
        self.calls.lock().clone()
    }

    /// Dictionary lookups received so far, as (dictionary, key) pairs.
    pub fn lookups(&self) -> Vec<(String, String)> {
        self.calls
            .lock()
            .iter()
            .filter_map(|call| match call {
                MockCall::Lookup { dictionary, key, .. } => Some((dictionary.clone(), key.clone())),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: MockCall) {
        self.calls.lock().push(call);
    }

    fn check_available(&self) -> Result<()> {
        if self.should_fail {
            return Err(MarketplaceError::NodeUnavailable("Mock failure".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl StateQueryService for MockStateNode {
    async fn current_root(&self) -> Result<RootHandle> {
        self.record(MockCall::Root);
        self.check_available()?;
        let n = self.roots.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(RootHandle::new(format!("root-{n}")))
    }

    async fn dictionary_lookup(
        &self,
        root: &RootHandle,
        dictionary: &str,
        item_key: &str,
        _contract: &ContractHash,
    ) -> Result<StoredClValue> {
        self.record(MockCall::Lookup {
            root: root.as_str().to_string(),
            dictionary: dictionary.to_string(),
            key: item_key.to_string(),
        });
        self.check_available()?;
        self.items
            .get(&(dictionary.to_string(), item_key.to_string()))
            .cloned()
            .ok_or_else(|| MarketplaceError::not_found(dictionary, item_key))
    }

    async fn query_named_key(
        &self,
        _root: &RootHandle,
        account: &AccountHash,
        path: &[String],
    ) -> Result<serde_json::Value> {
        self.record(MockCall::NamedKey {
            account: *account,
            path: path.to_vec(),
        });
        self.check_available()?;
        self.named_keys
            .get(&(*account, path.to_vec()))
            .cloned()
            .ok_or_else(|| MarketplaceError::not_found(account.to_formatted_string(), path.join("/")))
    }

    fn node_id(&self) -> &str {
        "mock-node"
    }
}
