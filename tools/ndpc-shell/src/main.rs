//! NDPC Shell: interactive marketplace client
//!
//! Log in with one of the configured identities, browse marketplace state
//! and copy the printed `casper-client` commands to change it.

use std::io::{self, IsTerminal};
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use ndpc_client::{
    CasperRpcNode, ClientConfig, IdentityRegistry, MarketplaceRepository, TransactionBuilder,
};
use ndpc_shell::Shell;

/// NDPC Shell: NFT marketplace client
#[derive(Parser, Debug)]
#[command(name = "ndpc-shell")]
#[command(about = "Interactive client for the NDPC NFT marketplace contract")]
struct Args {
    /// TOML configuration file (built-in testnet defaults when omitted)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Node address, overriding configuration and environment
    #[arg(short, long)]
    node: Option<String>,

    /// Log in with this identity slot or name instead of prompting
    #[arg(short, long)]
    user: Option<String>,

    /// Debug logging on stderr
    #[arg(short, long)]
    verbose: bool,
}

fn init_logging(verbose: bool) -> Result<()> {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .context("invalid log filter")?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(io::stderr)
        .init();
    Ok(())
}

fn load_config(args: &Args) -> Result<ClientConfig> {
    let mut config = match &args.config {
        Some(path) => ClientConfig::load(path)?,
        None => ClientConfig::default(),
    };
    config.apply_env_overrides()?;
    if let Some(node) = &args.node {
        config.node.address = node.clone();
    }
    config.validate()?;
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose)?;

    let config = load_config(&args)?;
    info!(
        "[ndpc] Using node {} on {} (contract {})",
        config.node.address, config.chain_name, config.contract_hash
    );

    let node = CasperRpcNode::new(&config.node).context("failed to create RPC client")?;
    let repository = MarketplaceRepository::new(Arc::new(node), config.contract_hash);

    let stdin = io::stdin();
    let stdout = io::stdout();
    let colored = stdout.is_terminal();
    let mut shell = Shell::new(
        repository,
        TransactionBuilder::new(&config),
        IdentityRegistry::from_config(&config),
        stdin.lock(),
        stdout.lock(),
    )
    .with_colors(colored);

    shell.run(args.user.as_deref()).await?;
    Ok(())
}
