//! Definitions of CLI arguments and commands for deploy scripts

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::{
    artifacts::ContractRegistry,
    client::DeployClient,
    commands::{
        check_token, deploy_governance, deploy_liquidity_token, deploy_seraphim_proxy,
        deploy_seraphim_token,
    },
    constants::{
        DEFAULT_ARTIFACTS_DIR, DEFAULT_DEVNET_PKEY, DEFAULT_DEVNET_RPC_URL, DEFAULT_PROXY_ARTIFACT,
    },
    errors::DeployError,
};

/// Deploy the Seraphim contracts to an EVM chain
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Private key of the deployer, defaults to the first Anvil dev account
    #[arg(short, long, env = "PKEY", default_value = DEFAULT_DEVNET_PKEY)]
    pub priv_key: String,

    /// Network RPC URL
    #[arg(short, long, env = "RPC_URL", default_value = DEFAULT_DEVNET_RPC_URL)]
    pub rpc_url: String,

    /// Directory containing the compiled contract artifacts
    #[arg(short, long, env = "ARTIFACTS_DIR", default_value = DEFAULT_ARTIFACTS_DIR)]
    pub artifacts: PathBuf,

    /// Artifact of the upgradeable proxy, used in place of one under the
    /// artifacts directory when the file exists
    #[arg(long, env = "PROXY_ARTIFACT", default_value = DEFAULT_PROXY_ARTIFACT)]
    pub proxy_artifact: PathBuf,

    /// Path to a JSON file in which deployed addresses are recorded
    #[arg(short, long, env = "DEPLOYMENTS_PATH")]
    pub deployments: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Deploy the liquidity token contract
    DeployLiquidityToken,
    /// Deploy the governance contract
    DeployGovernance,
    /// Deploy the liquidity token, the governance contract, and the Seraphim
    /// token proxy initialized with both
    DeploySeraphimToken(DeploySeraphimTokenArgs),
    /// Deploy only the Seraphim token proxy, against existing liquidity token
    /// and governance contracts
    DeploySeraphimProxy(DeploySeraphimProxyArgs),
    /// Check the name and symbol reported by a deployed Seraphim token
    CheckToken(CheckTokenArgs),
}

impl Command {
    pub async fn run(
        self,
        client: &impl DeployClient,
        registry: &impl ContractRegistry,
        deployments_path: Option<PathBuf>,
    ) -> Result<(), DeployError> {
        let deployments_path = deployments_path.as_deref();
        match self {
            Command::DeployLiquidityToken => {
                deploy_liquidity_token(client, registry, deployments_path).await
            }
            Command::DeployGovernance => {
                deploy_governance(client, registry, deployments_path).await
            }
            Command::DeploySeraphimToken(args) => {
                deploy_seraphim_token(args, client, registry, deployments_path).await
            }
            Command::DeploySeraphimProxy(args) => {
                deploy_seraphim_proxy(args, client, registry, deployments_path).await
            }
            Command::CheckToken(args) => {
                check_token(args, client, registry, deployments_path).await
            }
        }
    }
}

/// The admins with which to initialize the Seraphim token
#[derive(Args)]
pub struct AdminArgs {
    /// Address of the token admin, defaults to the deployer
    #[arg(long)]
    pub admin: Option<String>,

    /// Address of the second token admin, defaults to the deployer
    #[arg(long)]
    pub second_admin: Option<String>,
}

/// Deploy every Seraphim contract.
///
/// The token is a [`TransparentUpgradeableProxy`](https://docs.openzeppelin.com/contracts/5.x/api/proxy#transparent_proxy),
/// which itself deploys a `ProxyAdmin` contract owned by the deployer.
#[derive(Args)]
pub struct DeploySeraphimTokenArgs {
    #[command(flatten)]
    pub admins: AdminArgs,
}

/// Deploy the Seraphim token proxy.
///
/// Liquidity token and governance addresses not given are read from the
/// deployments file.
#[derive(Args)]
pub struct DeploySeraphimProxyArgs {
    #[command(flatten)]
    pub admins: AdminArgs,

    /// Liquidity token contract address in hex
    #[arg(long)]
    pub liquidity_token: Option<String>,

    /// Governance contract address in hex
    #[arg(long)]
    pub governance: Option<String>,
}

/// Check a deployed Seraphim token
#[derive(Args)]
pub struct CheckTokenArgs {
    /// Address of the token proxy, defaults to the one in the deployments file
    #[arg(long)]
    pub proxy: Option<String>,
}
