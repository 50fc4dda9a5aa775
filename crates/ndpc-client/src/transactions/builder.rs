//! # Transaction Builder
//!
//! Pure construction of deploy descriptions for every marketplace
//! operation. Each operation validates all of its inputs before building
//! anything, so a failure never yields a partial argument list.
//!
//! | Operation | Entry point | Payment field |
//! |-----------|-------------|---------------|
//! | `deploy_contract` | session wasm | `deploy_contract` |
//! | `mint` | `mint` | `mint` |
//! | `publish_request` | `publish_request` | `publish_request` |
//! | `approve_request` | `approve` | `approve_request` |
//! | `buy` | session wasm | `buy` |
//! | `cancel_request` | `cancel_request` | `cancel_request` |
//! | `disapprove` | `disapprove` | `disapprove` |

use primitive_types::U256;
use tracing::info;

use super::args::{parse_u256, parse_u64, parse_u8, ArgValue, RuntimeArgs};
use super::deploy::{DeployDescription, DeployTarget};
use crate::config::{ArtifactsConfig, ClientConfig, PaymentSchedule};
use crate::domain::{
    AccountHash, Commission, ContractHash, MarketplaceError, Result, SecretKeyRef, TokenMetadata,
};

/// Characters that would corrupt the metadata literal or the stored
/// comma-delimited token record.
const RESERVED_METADATA_CHARS: &[char] = &['"', '\'', ',', '\\'];

/// Inputs of `mint`.
#[derive(Clone, Debug)]
pub struct MintRequest {
    /// Token metadata.
    pub metadata: TokenMetadata,
    /// Unit price (decimal, u256).
    pub price: String,
    /// Units to mint (decimal, u64).
    pub amount: String,
    /// Account receiving the minted holding.
    pub recipient: AccountHash,
}

/// Inputs of `publish_request`.
#[derive(Clone, Debug)]
pub struct PublishRequest {
    /// Producer account hash, with or without the `account-hash-` prefix.
    pub producer: String,
    /// Units requested (decimal, u64).
    pub amount: String,
    /// Holder the units come from (decimal, u64).
    pub holder_id: String,
    /// Commission percentage (decimal, `0..=100`).
    pub commission: String,
}

/// Inputs of `buy`.
#[derive(Clone, Debug)]
pub struct BuyRequest {
    /// Units to buy (decimal, u64).
    pub amount: String,
    /// Approved holding to buy from (decimal, u64).
    pub approved_id: String,
    /// Unit price (decimal, u256).
    pub price: String,
}

/// Inputs of `disapprove`.
#[derive(Clone, Debug)]
pub struct DisapproveRequest {
    /// Units to return (decimal, u64).
    pub amount: String,
    /// Approved holding (decimal, u64).
    pub approved_id: String,
    /// Publisher account hash.
    pub publisher: String,
}

/// Builds unsigned deploys against one contract and chain.
#[derive(Clone, Debug)]
pub struct TransactionBuilder {
    chain_name: String,
    node_address: String,
    contract: ContractHash,
    artifacts: ArtifactsConfig,
    payments: PaymentSchedule,
}

impl TransactionBuilder {
    /// Builder using the chain, contract, artifacts and payments of `config`.
    pub fn new(config: &ClientConfig) -> Self {
        Self {
            chain_name: config.chain_name.clone(),
            node_address: config.node.address.clone(),
            contract: config.contract_hash,
            artifacts: config.artifacts.clone(),
            payments: config.payments.clone(),
        }
    }

    fn describe(
        &self,
        signer: &SecretKeyRef,
        payment: u64,
        target: DeployTarget,
        args: RuntimeArgs,
    ) -> DeployDescription {
        DeployDescription {
            chain_name: self.chain_name.clone(),
            node_address: self.node_address.clone(),
            signer: signer.clone(),
            payment,
            target,
            args,
        }
    }

    fn call(&self, signer: &SecretKeyRef, payment: u64, entry_point: &str, args: RuntimeArgs) -> DeployDescription {
        info!(
            "[ndpc] Built {} deploy ({} args, payment {})",
            entry_point,
            args.len(),
            payment
        );
        let target = DeployTarget::StoredContract {
            contract: self.contract,
            entry_point: entry_point.to_string(),
        };
        self.describe(signer, payment, target, args)
    }

    /// Install the marketplace contract.
    pub fn deploy_contract(&self, signer: &SecretKeyRef) -> DeployDescription {
        info!("[ndpc] Built contract installation deploy");
        let target = DeployTarget::SessionWasm {
            path: self.artifacts.contract_wasm.clone(),
        };
        self.describe(signer, self.payments.deploy_contract, target, RuntimeArgs::new())
    }

    /// Mint `amount` units of a new token to `recipient`.
    pub fn mint(&self, signer: &SecretKeyRef, request: &MintRequest) -> Result<DeployDescription> {
        let metadata = metadata_literal(&request.metadata)?;
        let price = parse_u256("price", &request.price)?;
        let amount = parse_u64("amount", &request.amount)?;

        let mut args = RuntimeArgs::new();
        args.insert("metadata", ArgValue::String(metadata));
        args.insert("price", ArgValue::U256(price));
        args.insert("amount", ArgValue::U64(amount));
        args.insert("recipient", ArgValue::AccountKey(request.recipient));
        Ok(self.call(signer, self.payments.mint, "mint", args))
    }

    /// Ask a producer for units of one of their holdings.
    pub fn publish_request(
        &self,
        signer: &SecretKeyRef,
        request: &PublishRequest,
    ) -> Result<DeployDescription> {
        let producer = parse_account("producer-account", &request.producer)?;
        let amount = parse_u64("amount", &request.amount)?;
        let holder_id = parse_u64("holder_id", &request.holder_id)?;
        let commission = Commission::new(parse_u8("comission", &request.commission)?)?;

        let mut args = RuntimeArgs::new();
        args.insert("producer-account", ArgValue::AccountKey(producer));
        args.insert("amount", ArgValue::U64(amount));
        args.insert("holder_id", ArgValue::U64(holder_id));
        args.insert("comission", ArgValue::U8(commission.value()));
        Ok(self.call(signer, self.payments.publish_request, "publish_request", args))
    }

    /// Approve an incoming request.
    pub fn approve_request(&self, signer: &SecretKeyRef, request_id: &str) -> Result<DeployDescription> {
        let request_id = parse_u64("request_id", request_id)?;

        let mut args = RuntimeArgs::new();
        args.insert("request_id", ArgValue::U64(request_id));
        Ok(self.call(signer, self.payments.approve_request, "approve", args))
    }

    /// Buy units of an approved holding through the session wasm.
    ///
    /// The transferred total is `amount * price`, carried as `u512`.
    pub fn buy(&self, signer: &SecretKeyRef, request: &BuyRequest) -> Result<DeployDescription> {
        let amount = parse_u64("amount", &request.amount)?;
        let approved_id = parse_u64("approved_id", &request.approved_id)?;
        let price = parse_u256("price", &request.price)?;
        let total = U256::from(amount).full_mul(price);

        let mut args = RuntimeArgs::new();
        args.insert("amount", ArgValue::U512(total));
        args.insert("approved_id", ArgValue::U64(approved_id));
        args.insert("contract_hash", ArgValue::ContractKey(self.contract));
        args.insert("cnt", ArgValue::U64(amount));

        info!("[ndpc] Built buy deploy (approved_id {}, total {})", approved_id, total);
        let target = DeployTarget::SessionWasm {
            path: self.artifacts.session_wasm.clone(),
        };
        Ok(self.describe(signer, self.payments.buy, target, args))
    }

    /// Withdraw an outgoing request.
    pub fn cancel_request(&self, signer: &SecretKeyRef, request_id: &str) -> Result<DeployDescription> {
        let request_id = parse_u64("request_id", request_id)?;

        let mut args = RuntimeArgs::new();
        args.insert("request_id", ArgValue::U64(request_id));
        Ok(self.call(signer, self.payments.cancel_request, "cancel_request", args))
    }

    /// Return units of an approved holding to its publisher.
    pub fn disapprove(
        &self,
        signer: &SecretKeyRef,
        request: &DisapproveRequest,
    ) -> Result<DeployDescription> {
        let amount = parse_u64("amount", &request.amount)?;
        let approved_id = parse_u64("approved_id", &request.approved_id)?;
        let publisher = parse_account("publisher-account", &request.publisher)?;

        let mut args = RuntimeArgs::new();
        args.insert("amount", ArgValue::U64(amount));
        args.insert("approved_id", ArgValue::U64(approved_id));
        args.insert("publisher-account", ArgValue::AccountKey(publisher));
        Ok(self.call(signer, self.payments.disapprove, "disapprove", args))
    }
}

fn parse_account(argument: &'static str, value: &str) -> Result<AccountHash> {
    value
        .trim()
        .parse()
        .map_err(|e| MarketplaceError::InvalidArgument {
            argument,
            reason: format!("{e}"),
        })
}

/// Compact JSON literal of the metadata.
///
/// The contract splits this literal on `"` and stores the fields joined by
/// commas, so any reserved character in a field is rejected.
fn metadata_literal(metadata: &TokenMetadata) -> Result<String> {
    let fields = [
        ("name", &metadata.name),
        ("token_uri", &metadata.token_uri),
        ("checksum", &metadata.checksum),
    ];
    for (field, value) in fields {
        if let Some(c) = value
            .chars()
            .find(|c| RESERVED_METADATA_CHARS.contains(c) || c.is_control())
        {
            return Err(MarketplaceError::InvalidArgument {
                argument: "metadata",
                reason: format!("{field} contains reserved character {c:?}"),
            });
        }
    }
    serde_json::to_string(metadata).map_err(|e| MarketplaceError::InvalidArgument {
        argument: "metadata",
        reason: e.to_string(),
    })
}
