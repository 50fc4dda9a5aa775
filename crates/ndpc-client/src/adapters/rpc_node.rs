//! Casper JSON-RPC Node Adapter
//!
//! Implements `StateQueryService` over HTTP JSON-RPC:
//!
//! - `chain_get_state_root_hash` -> `result.state_root_hash`
//! - `state_get_dictionary_item` -> `result.stored_value.CLValue`
//! - `query_global_state` -> `result.stored_value`

use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::{debug, warn};

use crate::config::NodeConfig;
use crate::domain::{
    AccountHash, ContractHash, MarketplaceError, Result, RootHandle, StoredClValue,
};
use crate::ports::outbound::StateQueryService;

/// JSON-RPC request structure.
#[derive(Debug, Serialize)]
struct JsonRpcRequest<'a> {
    jsonrpc: &'static str,
    method: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    params: Option<Value>,
    id: u64,
}

/// JSON-RPC response structure.
#[derive(Debug, Deserialize)]
struct JsonRpcResponse {
    #[serde(default)]
    result: Option<Value>,
    #[serde(default)]
    error: Option<JsonRpcError>,
}

/// JSON-RPC error structure.
#[derive(Debug, Deserialize)]
struct JsonRpcError {
    code: i64,
    message: String,
    #[serde(default)]
    data: Option<Value>,
}

impl JsonRpcError {
    /// The node reports every failed query under one code (`-32003`); only a
    /// `ValueNotFound` cause means the key is absent. `RootNotFound` and the
    /// rest are rejections.
    fn is_missing_value(&self) -> bool {
        let data = self.data.as_ref().map(Value::to_string).unwrap_or_default();
        self.message.contains("ValueNotFound") || data.contains("ValueNotFound")
    }
}

/// What a failed call was trying to read, for error mapping.
enum Target<'a> {
    Root,
    Item { dictionary: &'a str, key: &'a str },
}

/// HTTP-based Casper node connection.
pub struct CasperRpcNode {
    client: Client,
    rpc_url: String,
    request_id: AtomicU64,
}

impl CasperRpcNode {
    /// Create a node connection from configuration.
    ///
    /// The configured request timeout bounds every call.
    pub fn new(config: &NodeConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout())
            .connect_timeout(config.connect_timeout())
            .build()
            .map_err(|e| MarketplaceError::NodeUnavailable(format!("HTTP client: {e}")))?;

        Ok(Self {
            client,
            rpc_url: config.rpc_url(),
            request_id: AtomicU64::new(1),
        })
    }

    /// Get the next request ID.
    fn next_id(&self) -> u64 {
        self.request_id.fetch_add(1, Ordering::Relaxed)
    }

    /// Make a JSON-RPC call and return the `result` member.
    async fn call(&self, method: &str, params: Option<Value>, target: Target<'_>) -> Result<Value> {
        let request = JsonRpcRequest {
            jsonrpc: "2.0",
            method,
            params,
            id: self.next_id(),
        };
        debug!("[ndpc] RPC {} -> {}", method, self.rpc_url);

        let response = self
            .client
            .post(&self.rpc_url)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    MarketplaceError::NodeUnavailable(format!("{method} timed out"))
                } else if e.is_connect() {
                    MarketplaceError::NodeUnavailable(format!("cannot connect to {}", self.rpc_url))
                } else {
                    MarketplaceError::NodeUnavailable(e.to_string())
                }
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            if e.is_timeout() {
                MarketplaceError::NodeUnavailable(format!("{method} timed out"))
            } else {
                MarketplaceError::NodeUnavailable(e.to_string())
            }
        })?;

        let rpc_response: JsonRpcResponse = match serde_json::from_str(&body) {
            Ok(envelope) => envelope,
            Err(_) if !status.is_success() => {
                warn!("[ndpc] {} failed with HTTP {}", method, status);
                return Err(MarketplaceError::NodeUnavailable(format!(
                    "{method}: HTTP {status}"
                )));
            }
            Err(e) => {
                return Err(MarketplaceError::MalformedResponse(format!(
                    "{method}: not a JSON-RPC envelope: {e}"
                )))
            }
        };

        if !status.is_success() && rpc_response.error.is_none() {
            return Err(MarketplaceError::NodeUnavailable(format!(
                "{method}: HTTP {status}"
            )));
        }

        if let Some(error) = rpc_response.error {
            return Err(match target {
                Target::Item { dictionary, key } if error.is_missing_value() => {
                    debug!("[ndpc] {}[{}] absent", dictionary, key);
                    MarketplaceError::not_found(dictionary, key)
                }
                _ => {
                    warn!("[ndpc] {} rejected ({}): {}", method, error.code, error.message);
                    MarketplaceError::NodeRejected {
                        code: error.code,
                        message: error.message,
                    }
                }
            });
        }

        rpc_response
            .result
            .ok_or_else(|| MarketplaceError::MalformedResponse(format!("{method}: missing result")))
    }
}

/// Navigate to `result.stored_value` and require it to be an object.
fn stored_value(result: Value, method: &str) -> Result<Value> {
    match result.get("stored_value") {
        Some(value) if value.is_object() => Ok(value.clone()),
        _ => Err(MarketplaceError::MalformedResponse(format!(
            "{method}: missing result.stored_value"
        ))),
    }
}

#[async_trait]
impl StateQueryService for CasperRpcNode {
    async fn current_root(&self) -> Result<RootHandle> {
        let result = self.call("chain_get_state_root_hash", None, Target::Root).await;

        // A root request that cannot be answered leaves nothing to query against
        let result = result.map_err(|e| match e {
            MarketplaceError::MalformedResponse(msg) => MarketplaceError::NodeUnavailable(msg),
            other => other,
        })?;

        result
            .get("state_root_hash")
            .and_then(Value::as_str)
            .filter(|hash| !hash.is_empty())
            .map(RootHandle::new)
            .ok_or_else(|| {
                MarketplaceError::NodeUnavailable("no state_root_hash in response".to_string())
            })
    }

    async fn dictionary_lookup(
        &self,
        root: &RootHandle,
        dictionary: &str,
        item_key: &str,
        contract: &ContractHash,
    ) -> Result<StoredClValue> {
        let params = json!({
            "state_root_hash": root.as_str(),
            "dictionary_identifier": {
                "ContractNamedKey": {
                    "key": contract.to_formatted_string(),
                    "dictionary_name": dictionary,
                    "dictionary_item_key": item_key,
                }
            }
        });

        let result = self
            .call(
                "state_get_dictionary_item",
                Some(params),
                Target::Item {
                    dictionary,
                    key: item_key,
                },
            )
            .await?;

        let stored = stored_value(result, "state_get_dictionary_item")?;
        let cl_value = stored.get("CLValue").cloned().ok_or_else(|| {
            MarketplaceError::MalformedResponse(format!(
                "{dictionary}[{item_key}]: stored value is not a CLValue"
            ))
        })?;

        serde_json::from_value(cl_value).map_err(|e| {
            MarketplaceError::MalformedResponse(format!("{dictionary}[{item_key}]: {e}"))
        })
    }

    async fn query_named_key(
        &self,
        root: &RootHandle,
        account: &AccountHash,
        path: &[String],
    ) -> Result<Value> {
        let params = json!({
            "state_identifier": { "StateRootHash": root.as_str() },
            "key": account.to_formatted_string(),
            "path": path,
        });
        let account_key = account.to_formatted_string();
        let joined = path.join("/");

        let result = self
            .call(
                "query_global_state",
                Some(params),
                Target::Item {
                    dictionary: &account_key,
                    key: &joined,
                },
            )
            .await?;

        stored_value(result, "query_global_state")
    }

    fn node_id(&self) -> &str {
        &self.rpc_url
    }
}
