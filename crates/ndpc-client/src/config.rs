//! # Client Configuration
//!
//! Node endpoint, contract location, deploy artifacts, payment budgets and
//! the identity registry. Loaded from TOML with environment overrides.
//!
//! ```toml
//! chain_name = "casper-test"
//! contract_hash = "7f2fb764e619c0143040becc8b46e1861e7b72d31f4e55cea249435fee05eb80"
//!
//! [node]
//! address = "http://127.0.0.1:7777"
//! request_timeout_ms = 10000
//!
//! [[identities]]
//! name = "acc1"
//! account_hash = "95dcc50ad49351dd97aab4678d9926de18981ab611903c145341df252300e88a"
//! secret_key = "keys/acc1_secret_key.pem"
//! ```

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use crate::domain::{AccountHash, AccountIdentity, ContractHash, SecretKeyRef};

/// Default node address (Casper testnet node used by the marketplace).
pub const DEFAULT_NODE_ADDRESS: &str = "http://195.201.174.222:7777";

/// Default chain name.
pub const DEFAULT_CHAIN_NAME: &str = "casper-test";

/// Deployed marketplace contract
/// (`hash-7f2fb764e619c0143040becc8b46e1861e7b72d31f4e55cea249435fee05eb80`).
pub const DEFAULT_CONTRACT_HASH: ContractHash = ContractHash([
    0x7f, 0x2f, 0xb7, 0x64, 0xe6, 0x19, 0xc0, 0x14, 0x30, 0x40, 0xbe, 0xcc, 0x8b, 0x46, 0xe1, 0x86,
    0x1e, 0x7b, 0x72, 0xd3, 0x1f, 0x4e, 0x55, 0xce, 0xa2, 0x49, 0x43, 0x5f, 0xee, 0x05, 0xeb, 0x80,
]);

/// Built-in demo accounts, in login-slot order.
const DEMO_ACCOUNTS: [(&str, [u8; 32]); 3] = [
    (
        "acc1",
        [
            0x95, 0xdc, 0xc5, 0x0a, 0xd4, 0x93, 0x51, 0xdd, 0x97, 0xaa, 0xb4, 0x67, 0x8d, 0x99, 0x26,
            0xde, 0x18, 0x98, 0x1a, 0xb6, 0x11, 0x90, 0x3c, 0x14, 0x53, 0x41, 0xdf, 0x25, 0x23, 0x00,
            0xe8, 0x8a,
        ],
    ),
    (
        "acc2",
        [
            0x8e, 0x11, 0xeb, 0xbc, 0xdf, 0x47, 0xec, 0xc0, 0xfc, 0xdf, 0x19, 0x08, 0x82, 0xa1, 0xc2,
            0x55, 0x02, 0xa4, 0xee, 0x17, 0xb1, 0xeb, 0xf4, 0x9d, 0xf0, 0xc0, 0x76, 0x47, 0x8b, 0xbc,
            0xaf, 0x7d,
        ],
    ),
    (
        "acc3",
        [
            0x87, 0xb6, 0x7c, 0x36, 0x0a, 0xa7, 0xd4, 0x71, 0x8d, 0x0a, 0x47, 0xca, 0xa2, 0xc9, 0x65,
            0x3d, 0x0b, 0xeb, 0xe3, 0x5f, 0xcc, 0xcf, 0x7f, 0x98, 0xda, 0x5d, 0xf9, 0xd8, 0xa6, 0x8e,
            0x6b, 0x1b,
        ],
    ),
];

/// Errors that can occur while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// File could not be read.
    #[error("Failed to read config {path}: {error}")]
    Io {
        /// Path of the file.
        path: String,
        /// Underlying I/O error.
        error: String,
    },
    /// TOML could not be parsed.
    #[error("Failed to parse config: {0}")]
    Parse(String),
    /// A value is present but unusable.
    #[error("Invalid config value {field}: {reason}")]
    Invalid {
        /// Offending field.
        field: &'static str,
        /// Why it was rejected.
        reason: String,
    },
}

/// Top-level client configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Node connection settings.
    pub node: NodeConfig,
    /// Chain name passed to the submitter.
    pub chain_name: String,
    /// Marketplace contract hash.
    pub contract_hash: ContractHash,
    /// Wasm artifacts for session deploys.
    pub artifacts: ArtifactsConfig,
    /// Payment budget per operation.
    pub payments: PaymentSchedule,
    /// Identities selectable at login.
    pub identities: Vec<AccountIdentity>,
}

/// Node connection settings.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct NodeConfig {
    /// Node base address (without `/rpc`).
    pub address: String,
    /// Per-request timeout in milliseconds.
    pub request_timeout_ms: u64,
    /// Connect timeout in milliseconds.
    pub connect_timeout_ms: u64,
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            address: DEFAULT_NODE_ADDRESS.to_string(),
            request_timeout_ms: 10_000,
            connect_timeout_ms: 3_000,
        }
    }
}

impl NodeConfig {
    /// JSON-RPC endpoint of the node.
    pub fn rpc_url(&self) -> String {
        format!("{}/rpc", self.address.trim_end_matches('/'))
    }

    /// Per-request timeout.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    /// Connect timeout.
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_millis(self.connect_timeout_ms)
    }
}

/// Session wasm paths.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct ArtifactsConfig {
    /// Contract installer wasm.
    pub contract_wasm: PathBuf,
    /// Buy session wasm.
    pub session_wasm: PathBuf,
}

impl Default for ArtifactsConfig {
    fn default() -> Self {
        Self {
            contract_wasm: PathBuf::from("deploy/contract.wasm"),
            session_wasm: PathBuf::from("deploy/session.wasm"),
        }
    }
}

/// Payment budget per operation, in motes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaymentSchedule {
    /// Contract installation.
    pub deploy_contract: u64,
    /// `mint`.
    pub mint: u64,
    /// `publish_request`.
    pub publish_request: u64,
    /// `approve`.
    pub approve_request: u64,
    /// Buy session.
    pub buy: u64,
    /// `cancel_request`.
    pub cancel_request: u64,
    /// `disapprove`.
    pub disapprove: u64,
}

impl Default for PaymentSchedule {
    fn default() -> Self {
        Self {
            deploy_contract: 130_420_060_000,
            mint: 5_300_000_000,
            publish_request: 3_500_000_000,
            approve_request: 8_931_000_000,
            buy: 15_013_050_000,
            cancel_request: 8_931_000_000,
            disapprove: 8_931_000_000,
        }
    }
}

fn demo_identity(name: &str, hash: [u8; 32]) -> AccountIdentity {
    AccountIdentity {
        name: name.to_string(),
        account_hash: AccountHash(hash),
        secret_key: SecretKeyRef::new(format!("keys/{name}_secret_key.pem")),
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            node: NodeConfig::default(),
            chain_name: DEFAULT_CHAIN_NAME.to_string(),
            contract_hash: DEFAULT_CONTRACT_HASH,
            artifacts: ArtifactsConfig::default(),
            payments: PaymentSchedule::default(),
            identities: DEMO_ACCOUNTS
                .iter()
                .map(|(name, hash)| demo_identity(name, *hash))
                .collect(),
        }
    }
}

impl ClientConfig {
    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be read or parsed.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| ConfigError::Io {
            path: path.as_ref().display().to_string(),
            error: e.to_string(),
        })?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string. Missing fields take defaults.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Apply `NDPC_*` environment overrides.
    pub fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(address) = lookup("NDPC_NODE_ADDRESS") {
            info!("[ndpc] Node address overridden from environment");
            self.node.address = address;
        }
        if let Some(chain) = lookup("NDPC_CHAIN_NAME") {
            self.chain_name = chain;
        }
        if let Some(hash) = lookup("NDPC_CONTRACT_HASH") {
            self.contract_hash = hash.parse().map_err(|e| ConfigError::Invalid {
                field: "NDPC_CONTRACT_HASH",
                reason: format!("{e}"),
            })?;
        }
        if let Some(timeout) = lookup("NDPC_TIMEOUT_MS") {
            self.node.request_timeout_ms = timeout.parse().map_err(|_| ConfigError::Invalid {
                field: "NDPC_TIMEOUT_MS",
                reason: format!("not a number: {timeout}"),
            })?;
        }
        Ok(())
    }

    /// Validate configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.node.address.trim().is_empty() {
            return Err(ConfigError::Invalid {
                field: "node.address",
                reason: "cannot be empty".into(),
            });
        }
        if self.node.request_timeout_ms == 0 {
            return Err(ConfigError::Invalid {
                field: "node.request_timeout_ms",
                reason: "cannot be 0".into(),
            });
        }
        if self.chain_name.trim().is_empty() {
            return Err(ConfigError::Invalid {
                field: "chain_name",
                reason: "cannot be empty".into(),
            });
        }
        if self.identities.is_empty() {
            return Err(ConfigError::Invalid {
                field: "identities",
                reason: "at least one identity is required".into(),
            });
        }

        let mut names = HashSet::new();
        for identity in &self.identities {
            if !names.insert(identity.name.as_str()) {
                return Err(ConfigError::Invalid {
                    field: "identities",
                    reason: format!("duplicate name {}", identity.name),
                });
            }
        }
        Ok(())
    }
}
