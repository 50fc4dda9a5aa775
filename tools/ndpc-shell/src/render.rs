//! JSON views of marketplace records.
//!
//! Account hashes are annotated with identity names when the registry knows
//! them.

use ndpc_client::{AccountHash, ApprovedHolding, Holder, IdentityRegistry, RequestObject, Token};
use serde_json::{json, Value};

fn account(registry: &IdentityRegistry, hash: &AccountHash) -> Value {
    Value::String(registry.display_name(hash))
}

/// Token view.
pub fn token(token: &Token) -> serde_json::Result<Value> {
    serde_json::to_value(token)
}

/// Holder view, token nested.
pub fn holder(holder: &Holder) -> serde_json::Result<Value> {
    serde_json::to_value(holder)
}

/// Request view keyed by its id.
pub fn request(registry: &IdentityRegistry, request_id: u64, request: &RequestObject) -> Value {
    json!({
        "request_id": request_id,
        "holder_id": request.holder_id,
        "amount": request.amount,
        "comission": request.commission,
        "producer": account(registry, &request.producer),
        "publisher": account(registry, &request.publisher),
    })
}

/// Approved holding view keyed by its id.
pub fn approved(registry: &IdentityRegistry, approved_id: u64, holding: &ApprovedHolding) -> Value {
    json!({
        "approved_id": approved_id,
        "holder_id": holding.holder_id,
        "amount": holding.amount,
        "owner": account(registry, &holding.owner),
        "publisher": account(registry, &holding.publisher),
        "token_id": holding.token_id,
        "percentage": holding.percentage,
    })
}
