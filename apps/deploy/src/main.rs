//! One-shot deployer for the Mudded NFT contract.
//!
//! Reads the compiled artifact (ABI + creation bytecode), deploys with the
//! metadata base URL and whitelist contract address as constructor arguments,
//! waits for inclusion, and prints the deployed address. Exits 0 on success,
//! 1 on any error.

use std::env;
use std::path::PathBuf;

use clap::Parser;
use ethers::abi::Abi;
use ethers::contract::ContractFactory;
use ethers::types::{Address, Bytes};
use eyre::Context;
use serde::Deserialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

use mudded_client::provider::ChainClient;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[arg(short, long)]
    rpc_url: Option<String>,

    /// Compiled contract artifact (JSON with `abi` and `bytecode`).
    #[arg(long)]
    artifact: PathBuf,

    /// Address of the previously deployed whitelist contract.
    #[arg(long)]
    whitelist_address: String,

    /// Base URL the contract serves token metadata from.
    #[arg(long)]
    metadata_url: String,
}

#[derive(Debug, Deserialize)]
struct Artifact {
    abi: Abi,
    bytecode: Bytes,
}

fn get_private_key() -> String {
    env::var("DEPLOYER_PRIVATE_KEY").expect("DEPLOYER_PRIVATE_KEY not found in environment")
}

#[tokio::main]
async fn main() -> eyre::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let rpc_url = cli.rpc_url.unwrap_or("http://localhost:8545".to_owned());
    let whitelist_address: Address = cli
        .whitelist_address
        .parse()
        .context("Invalid whitelist contract address")?;

    let raw = tokio::fs::read(&cli.artifact)
        .await
        .with_context(|| format!("Failed to read artifact {}", cli.artifact.display()))?;
    let artifact: Artifact =
        serde_json::from_slice(&raw).context("Failed to parse contract artifact")?;

    let chain = ChainClient::connect(&rpc_url, get_private_key)
        .await
        .context("Failed to connect to the Ethereum client")?;
    info!(deployer = ?chain.address(), chain_id = chain.chain_id(), "deploying");

    let factory = ContractFactory::new(artifact.abi, artifact.bytecode, chain.signer());
    let contract = factory
        .deploy((cli.metadata_url.clone(), whitelist_address))
        .context("Failed to build the deploy transaction")?
        .send()
        .await
        .context("Failed to deploy the contract")?;

    println!("Mudded NFT contract address: {:?}", contract.address());
    Ok(())
}
