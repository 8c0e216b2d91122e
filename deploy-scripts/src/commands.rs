//! Implementations of the various deploy scripts

use std::{path::Path, str::FromStr};

use alloy_primitives::Address;
use tracing::{info, warn};

use crate::{
    artifacts::ContractRegistry,
    cli::{AdminArgs, CheckTokenArgs, DeploySeraphimProxyArgs, DeploySeraphimTokenArgs},
    client::DeployClient,
    constants::{
        GOVERNANCE_DEPLOYMENT_KEY, LIQUIDITY_TOKEN_DEPLOYMENT_KEY,
        SERAPHIM_IMPLEMENTATION_DEPLOYMENT_KEY, SERAPHIM_PROXY_ADMIN_DEPLOYMENT_KEY,
        SERAPHIM_TOKEN_DEPLOYMENT_KEY, SERAPHIM_TOKEN_NAME, SERAPHIM_TOKEN_SYMBOL,
    },
    coordinator::{DeployedProxy, Deployer, SeraphimInitArgs},
    deployments::{read_deployment, write_deployment},
    errors::DeployError,
};

pub async fn deploy_liquidity_token(
    client: &impl DeployClient,
    registry: &impl ContractRegistry,
    deployments_path: Option<&Path>,
) -> Result<(), DeployError> {
    let deployer = Deployer::new(client, registry);
    log_deployer(deployer.deployer_address());

    let liquidity_token = deployer.deploy_liquidity_token().await?;
    record(
        deployments_path,
        &[(LIQUIDITY_TOKEN_DEPLOYMENT_KEY, liquidity_token.address)],
    )
}

pub async fn deploy_governance(
    client: &impl DeployClient,
    registry: &impl ContractRegistry,
    deployments_path: Option<&Path>,
) -> Result<(), DeployError> {
    let deployer = Deployer::new(client, registry);
    log_deployer(deployer.deployer_address());

    let governance = deployer.deploy_governance().await?;
    record(
        deployments_path,
        &[(GOVERNANCE_DEPLOYMENT_KEY, governance.address)],
    )
}

pub async fn deploy_seraphim_token(
    args: DeploySeraphimTokenArgs,
    client: &impl DeployClient,
    registry: &impl ContractRegistry,
    deployments_path: Option<&Path>,
) -> Result<(), DeployError> {
    let deployer = Deployer::new(client, registry);
    log_deployer(deployer.deployer_address());

    let (admin, second_admin) = parse_admins(&args.admins, deployer.deployer_address())?;
    let deployment = deployer.run(admin, second_admin).await?;

    let mut entries = vec![
        (LIQUIDITY_TOKEN_DEPLOYMENT_KEY, deployment.liquidity_token.address),
        (GOVERNANCE_DEPLOYMENT_KEY, deployment.governance.address),
    ];
    entries.extend(proxy_entries(&deployment.seraphim_token));
    record(deployments_path, &entries)
}

pub async fn deploy_seraphim_proxy(
    args: DeploySeraphimProxyArgs,
    client: &impl DeployClient,
    registry: &impl ContractRegistry,
    deployments_path: Option<&Path>,
) -> Result<(), DeployError> {
    let deployer = Deployer::new(client, registry);
    log_deployer(deployer.deployer_address());

    let (admin, second_admin) = parse_admins(&args.admins, deployer.deployer_address())?;
    let liquidity_token = address_arg_or_deployment(
        args.liquidity_token.as_deref(),
        LIQUIDITY_TOKEN_DEPLOYMENT_KEY,
        deployments_path,
    )?;
    let governance = address_arg_or_deployment(
        args.governance.as_deref(),
        GOVERNANCE_DEPLOYMENT_KEY,
        deployments_path,
    )?;

    let proxy = deployer
        .deploy_seraphim_proxy(SeraphimInitArgs {
            admin,
            liquidity_token,
            governance,
            second_admin,
        })
        .await?;

    record(deployments_path, &proxy_entries(&proxy))
}

pub async fn check_token(
    args: CheckTokenArgs,
    client: &impl DeployClient,
    registry: &impl ContractRegistry,
    deployments_path: Option<&Path>,
) -> Result<(), DeployError> {
    let deployer = Deployer::new(client, registry);
    log_deployer(deployer.deployer_address());

    let proxy = address_arg_or_deployment(
        args.proxy.as_deref(),
        SERAPHIM_TOKEN_DEPLOYMENT_KEY,
        deployments_path,
    )?;

    let metadata = deployer.token_metadata(proxy).await?;
    info!(
        "Token at {:#x}: name = {}, symbol = {}",
        proxy, metadata.name, metadata.symbol
    );

    if metadata.name != SERAPHIM_TOKEN_NAME || metadata.symbol != SERAPHIM_TOKEN_SYMBOL {
        return Err(DeployError::TokenMismatch(format!(
            "expected {}/{}, got {}/{}",
            SERAPHIM_TOKEN_NAME, SERAPHIM_TOKEN_SYMBOL, metadata.name, metadata.symbol
        )));
    }

    Ok(())
}

// -----------
// | Helpers |
// -----------

/// Log the account the contracts are deployed with
fn log_deployer(deployer: Address) {
    info!("Deploying contracts with the account: {:#x}", deployer);
}

/// Parse an address given on the command line
fn parse_address(address: &str) -> Result<Address, DeployError> {
    Address::from_str(address).map_err(|e| DeployError::CalldataConstruction(e.to_string()))
}

/// Parse the token admins, defaulting each to the deployer
fn parse_admins(admins: &AdminArgs, deployer: Address) -> Result<(Address, Address), DeployError> {
    let admin = match &admins.admin {
        Some(admin) => parse_address(admin)?,
        None => {
            warn!("No admin given, defaulting to the deployer");
            deployer
        }
    };
    let second_admin = match &admins.second_admin {
        Some(second_admin) => parse_address(second_admin)?,
        None => {
            warn!("No second admin given, defaulting to the deployer");
            deployer
        }
    };

    Ok((admin, second_admin))
}

/// Use the address given on the command line, falling back to the one stored
/// under `key` in the deployments file
fn address_arg_or_deployment(
    arg: Option<&str>,
    key: &str,
    deployments_path: Option<&Path>,
) -> Result<Address, DeployError> {
    match (arg, deployments_path) {
        (Some(address), _) => parse_address(address),
        (None, Some(path)) => read_deployment(key, path),
        (None, None) => Err(DeployError::CalldataConstruction(format!(
            "no {key} address given and no deployments file configured"
        ))),
    }
}

/// The deployments file entries for a deployed Seraphim token proxy
fn proxy_entries(proxy: &DeployedProxy) -> Vec<(&'static str, Address)> {
    vec![
        (SERAPHIM_TOKEN_DEPLOYMENT_KEY, proxy.proxy),
        (SERAPHIM_IMPLEMENTATION_DEPLOYMENT_KEY, proxy.implementation),
        (SERAPHIM_PROXY_ADMIN_DEPLOYMENT_KEY, proxy.proxy_admin),
    ]
}

/// Record deployed addresses in the deployments file, if one is configured
fn record(
    deployments_path: Option<&Path>,
    entries: &[(&str, Address)],
) -> Result<(), DeployError> {
    let Some(path) = deployments_path else {
        return Ok(());
    };

    for (key, address) in entries {
        write_deployment(path, key, *address)?;
    }
    info!("Recorded deployments in {}", path.display());

    Ok(())
}
