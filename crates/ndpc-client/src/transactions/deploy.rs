//! # Deploy Description
//!
//! Everything an external signer needs to build, sign and send one deploy.
//! The client never signs or submits; it serializes the description to JSON
//! or renders it as a `casper-client put-deploy` invocation.

use std::path::PathBuf;

use serde::Serialize;

use super::args::RuntimeArgs;
use crate::domain::{ContractHash, SecretKeyRef};

/// Executable part of a deploy.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DeployTarget {
    /// Entry point of an installed contract.
    StoredContract {
        /// Contract hash.
        contract: ContractHash,
        /// Entry point name.
        entry_point: String,
    },
    /// Session wasm executed in the caller's context.
    SessionWasm {
        /// Path of the wasm module.
        path: PathBuf,
    },
}

/// Unsigned deploy handed to the submitter.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DeployDescription {
    /// Chain name.
    pub chain_name: String,
    /// Node the submitter should send to.
    pub node_address: String,
    /// Signing key handle.
    pub signer: SecretKeyRef,
    /// Payment budget in motes.
    pub payment: u64,
    /// Contract entry point or session wasm.
    pub target: DeployTarget,
    /// Session arguments.
    pub args: RuntimeArgs,
}

impl DeployDescription {
    /// Entry point name, if the target is a stored contract.
    pub fn entry_point(&self) -> Option<&str> {
        match &self.target {
            DeployTarget::StoredContract { entry_point, .. } => Some(entry_point),
            DeployTarget::SessionWasm { .. } => None,
        }
    }

    /// Argument vector for `casper-client` (without the program name).
    pub fn to_casper_client_args(&self) -> Vec<String> {
        let mut argv: Vec<String> = vec![
            "put-deploy".into(),
            "--node-address".into(),
            self.node_address.clone(),
            "--chain-name".into(),
            self.chain_name.clone(),
            "--secret-key".into(),
            self.signer.path().display().to_string(),
            "--payment-amount".into(),
            self.payment.to_string(),
        ];

        match &self.target {
            DeployTarget::StoredContract {
                contract,
                entry_point,
            } => {
                argv.push("--session-hash".into());
                argv.push(contract.to_formatted_string());
                argv.push("--session-entry-point".into());
                argv.push(entry_point.clone());
            }
            DeployTarget::SessionWasm { path } => {
                argv.push("--session-path".into());
                argv.push(path.display().to_string());
            }
        }

        for arg in self.args.iter() {
            argv.push("--session-arg".into());
            argv.push(arg.to_simple_arg());
        }
        argv
    }

    /// Single-line shell command, quoted for copy and paste.
    pub fn render_command(&self) -> String {
        let mut line = String::from("casper-client");
        for arg in self.to_casper_client_args() {
            line.push(' ');
            line.push_str(&shell_quote(&arg));
        }
        line
    }
}

/// Quote `word` for a POSIX shell when it contains anything unsafe.
///
/// Single quotes suppress every expansion, history `!` included. An embedded
/// `'` closes the quote, is escaped, and reopens it.
fn shell_quote(word: &str) -> String {
    let safe = !word.is_empty()
        && word
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "-_./:=@%+,".contains(c));
    if safe {
        return word.to_string();
    }
    format!("'{}'", word.replace('\'', r"'\''"))
}
