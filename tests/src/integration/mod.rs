//! # Integration Flows
//!
//! - `read_flows`: typed reads against seeded dictionaries
//! - `rpc_flows`: the same reads through the JSON-RPC adapter
//! - `deploy_flows`: deploy construction from a loaded configuration

pub mod deploy_flows;
pub mod read_flows;
pub mod rpc_flows;
