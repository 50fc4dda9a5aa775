//! # NDPC Client Test Suite
//!
//! Cross-module flows that exercise the client the way the shell does.
//!
//! ## Structure
//!
//! ```text
//! tests/
//! ├── benches/
//! │   └── codec_benchmarks.rs   # Record decoding throughput
//! └── src/integration/
//!     ├── read_flows.rs         # Repository over the in-memory node
//!     ├── rpc_flows.rs          # Repository over CasperRpcNode + mock HTTP node
//!     └── deploy_flows.rs       # Config -> identities -> builder -> command
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p ndpc-tests
//! cargo test -p ndpc-tests integration::rpc_flows
//! cargo bench -p ndpc-tests
//! ```

#![allow(dead_code)]

pub mod integration;
