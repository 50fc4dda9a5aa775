//! # Marketplace Repository
//!
//! Typed reads composed from the state query service and the record
//! decoders. Every dictionary lookup is preceded by its own root fetch; no
//! root is reused between lookups.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::codec::{decode_approved, decode_holder, decode_id_list, decode_request, decode_token};
use crate::domain::dictionaries::{
    APPROVED, HOLDERS, METADATAS, OWNERS, PRODUCERS_APPROVED, PRODUCER_REQUESTS,
    PUBLISHERS_APPROVED, PUBLISHER_REQUESTS, REQUEST_OBJECTS,
};
use crate::domain::{
    AccountHash, ApprovedHolding, ContractHash, Holder, HolderRecord, MarketplaceError,
    RequestObject, Result, StoredClValue, Token,
};
use crate::ports::{MarketplaceReader, StateQueryService};

/// Marketplace repository over a state query service.
pub struct MarketplaceRepository<Q: StateQueryService> {
    /// Node query service.
    query: Arc<Q>,
    /// Marketplace contract owning the dictionaries.
    contract: ContractHash,
}

impl<Q: StateQueryService> MarketplaceRepository<Q> {
    /// Create a repository reading dictionaries of `contract`.
    pub fn new(query: Arc<Q>, contract: ContractHash) -> Self {
        Self { query, contract }
    }

    /// Contract this repository reads from.
    pub fn contract(&self) -> &ContractHash {
        &self.contract
    }

    /// Fetch a fresh root and look up one dictionary item under it.
    async fn lookup(&self, dictionary: &str, key: &str) -> Result<StoredClValue> {
        let root = self.query.current_root().await?;
        debug!(
            "[ndpc] {}[{}] at root {} via {}",
            dictionary,
            key,
            root,
            self.query.node_id()
        );
        self.query
            .dictionary_lookup(&root, dictionary, key, &self.contract)
            .await
    }

    async fn lookup_id_list(&self, dictionary: &str, account: &AccountHash) -> Result<Vec<u64>> {
        let value = self.lookup(dictionary, &account.to_hex()).await?;
        decode_id_list(&value.parsed)
    }

    /// Holder pipeline, step 1: the raw holder record.
    async fn fetch_holder_record(&self, holder_id: u64) -> Result<HolderRecord> {
        let value = self.lookup(HOLDERS, &holder_id.to_string()).await?;
        decode_holder(&value.bytes)
    }
}

/// Text carried in the `parsed` member of a string-typed value.
fn parsed_text<'a>(record: &'static str, value: &'a StoredClValue) -> Result<&'a str> {
    value
        .parsed
        .as_str()
        .ok_or_else(|| MarketplaceError::InvalidField {
            record,
            field: "parsed",
            value: value.parsed.to_string(),
        })
}

#[async_trait]
impl<Q: StateQueryService + 'static> MarketplaceReader for MarketplaceRepository<Q> {
    async fn get_token(&self, token_id: u64) -> Result<Token> {
        let value = self.lookup(METADATAS, &token_id.to_string()).await?;
        decode_token(parsed_text("token", &value)?)
    }

    async fn get_holder(&self, holder_id: u64) -> Result<Holder> {
        // Step 2 depends on the token id decoded in step 1; a failing step 1
        // never reaches the token lookup.
        let record = self.fetch_holder_record(holder_id).await?;
        let token = self.get_token(record.token_id).await?;
        Ok(Holder::join(record, token))
    }

    async fn get_request(&self, request_id: u64) -> Result<RequestObject> {
        let value = self.lookup(REQUEST_OBJECTS, &request_id.to_string()).await?;
        decode_request(parsed_text("request", &value)?)
    }

    async fn get_approved(&self, approved_id: u64) -> Result<ApprovedHolding> {
        let value = self.lookup(APPROVED, &approved_id.to_string()).await?;
        decode_approved(&value.bytes)
    }

    async fn list_producer_requests(&self, account: &AccountHash) -> Result<Vec<u64>> {
        self.lookup_id_list(PRODUCER_REQUESTS, account).await
    }

    async fn list_publisher_requests(&self, account: &AccountHash) -> Result<Vec<u64>> {
        self.lookup_id_list(PUBLISHER_REQUESTS, account).await
    }

    async fn list_holder_ids(&self, account: &AccountHash) -> Result<Vec<u64>> {
        self.lookup_id_list(OWNERS, account).await
    }

    async fn list_publisher_approved(&self, account: &AccountHash) -> Result<Vec<u64>> {
        self.lookup_id_list(PUBLISHERS_APPROVED, account).await
    }

    async fn list_producer_approved(&self, account: &AccountHash) -> Result<Vec<u64>> {
        self.lookup_id_list(PRODUCERS_APPROVED, account).await
    }

    async fn named_key_value(&self, account: &AccountHash, name: &str) -> Result<serde_json::Value> {
        let root = self.query.current_root().await?;
        debug!("[ndpc] {} named key {} at root {}", account, name, root);
        self.query
            .query_named_key(&root, account, &[name.to_string()])
            .await
    }
}
