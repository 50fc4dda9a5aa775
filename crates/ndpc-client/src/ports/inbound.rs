//! # Inbound Ports
//!
//! Typed read API offered to the shell and other callers.

use async_trait::async_trait;

use crate::domain::{AccountHash, ApprovedHolding, Holder, RequestObject, Result, Token};

/// Marketplace read API - inbound port.
#[async_trait]
pub trait MarketplaceReader: Send + Sync {
    /// Token metadata by token id (`metadatas`).
    async fn get_token(&self, token_id: u64) -> Result<Token>;

    /// Holder by id (`holders`), joined with its token.
    async fn get_holder(&self, holder_id: u64) -> Result<Holder>;

    /// Request object by id (`request_objects`).
    async fn get_request(&self, request_id: u64) -> Result<RequestObject>;

    /// Approved holding by id (`approved`).
    async fn get_approved(&self, approved_id: u64) -> Result<ApprovedHolding>;

    /// Incoming request ids of a producer (`producer_requests`).
    async fn list_producer_requests(&self, account: &AccountHash) -> Result<Vec<u64>>;

    /// Outgoing request ids of a publisher (`publiser_requests`).
    async fn list_publisher_requests(&self, account: &AccountHash) -> Result<Vec<u64>>;

    /// Holder ids owned by an account (`owners`).
    async fn list_holder_ids(&self, account: &AccountHash) -> Result<Vec<u64>>;

    /// Approved ids where the account is the publisher.
    async fn list_publisher_approved(&self, account: &AccountHash) -> Result<Vec<u64>>;

    /// Approved ids where the account is the producer.
    async fn list_producer_approved(&self, account: &AccountHash) -> Result<Vec<u64>>;

    /// Raw `stored_value` of a named key under an account (e.g. the
    /// contract package installed by that account).
    async fn named_key_value(&self, account: &AccountHash, name: &str) -> Result<serde_json::Value>;

    /// Every holding of an account, each joined with its token.
    ///
    /// Stops at the first failing holder.
    async fn holdings_of(&self, account: &AccountHash) -> Result<Vec<(u64, Holder)>> {
        let mut holdings = Vec::new();
        for holder_id in self.list_holder_ids(account).await? {
            holdings.push((holder_id, self.get_holder(holder_id).await?));
        }
        Ok(holdings)
    }

    /// Incoming requests of a producer with their records.
    async fn incoming_requests(&self, account: &AccountHash) -> Result<Vec<(u64, RequestObject)>> {
        let mut requests = Vec::new();
        for request_id in self.list_producer_requests(account).await? {
            requests.push((request_id, self.get_request(request_id).await?));
        }
        Ok(requests)
    }

    /// Outgoing requests of a publisher with their records.
    async fn outgoing_requests(&self, account: &AccountHash) -> Result<Vec<(u64, RequestObject)>> {
        let mut requests = Vec::new();
        for request_id in self.list_publisher_requests(account).await? {
            requests.push((request_id, self.get_request(request_id).await?));
        }
        Ok(requests)
    }
}
