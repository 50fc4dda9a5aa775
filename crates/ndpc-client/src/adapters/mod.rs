//! # Adapters
//!
//! Concrete implementations of outbound ports.

pub mod rpc_node;

pub use rpc_node::CasperRpcNode;
