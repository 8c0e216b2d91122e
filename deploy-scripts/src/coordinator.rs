//! Deploys the Seraphim contracts in dependency order.
//!
//! `LiquidityToken` and `Governance` are deployed first, and their addresses
//! are passed to the initializer of the `SeraphimToken`, which lives behind a
//! [`TransparentUpgradeableProxy`](https://docs.openzeppelin.com/contracts/5.x/api/proxy#transparent_proxy).
//! The proxy calls the initializer from its constructor, so the token is
//! initialized in the same transaction that deploys it.

use std::str::FromStr;

use alloy_primitives::{Address, Bytes, B256};
use alloy_sol_types::{SolCall, SolValue};
use tracing::{debug, info};

use crate::{
    artifacts::{ContractFactory, ContractRegistry},
    client::DeployClient,
    constants::{
        GOVERNANCE_CONTRACT, LIQUIDITY_TOKEN_CONTRACT, PROXY_ADMIN_STORAGE_SLOT,
        PROXY_CONSTRUCTOR_ARITY, PROXY_CONTRACT, SERAPHIM_TOKEN_CONTRACT,
    },
    errors::DeployError,
    solidity::{initializeCall, nameCall, symbolCall},
};

/// A contract deployed and confirmed on chain
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeployedContract {
    /// The name of the contract
    pub name: String,
    /// The address of the contract
    pub address: Address,
}

/// The Seraphim token, deployed behind an upgradeable proxy
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeployedProxy {
    /// The address of the proxy, through which the token is used
    pub proxy: Address,
    /// The address of the implementation contract
    pub implementation: Address,
    /// The address of the `ProxyAdmin` contract created by the proxy
    pub proxy_admin: Address,
}

/// The arguments to the Seraphim token's `initialize` method
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeraphimInitArgs {
    /// The token admin
    pub admin: Address,
    /// The liquidity token contract
    pub liquidity_token: Address,
    /// The governance contract
    pub governance: Address,
    /// The second token admin
    pub second_admin: Address,
}

impl SeraphimInitArgs {
    /// ABI-encode a call to `initialize` with these arguments
    pub fn calldata(&self) -> Vec<u8> {
        initializeCall {
            admin: self.admin,
            liquidityToken: self.liquidity_token,
            governance: self.governance,
            secondAdmin: self.second_admin,
        }
        .abi_encode()
    }
}

/// The addresses produced by a full deployment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeploymentRecord {
    /// The liquidity token contract
    pub liquidity_token: DeployedContract,
    /// The governance contract
    pub governance: DeployedContract,
    /// The Seraphim token proxy
    pub seraphim_token: DeployedProxy,
}

/// The metadata reported by a deployed token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenMetadata {
    /// The token name
    pub name: String,
    /// The token symbol
    pub symbol: String,
}

/// The factories needed for a full deployment, resolved before any
/// transaction is sent
#[derive(Debug, Clone)]
pub struct SeraphimFactories {
    /// The liquidity token factory
    pub liquidity_token: ContractFactory,
    /// The governance factory
    pub governance: ContractFactory,
    /// The Seraphim token implementation factory
    pub seraphim_token: ContractFactory,
    /// The upgradeable proxy factory
    pub proxy: ContractFactory,
}

/// Deploys contracts resolved from a registry through a chain client
pub struct Deployer<'a, C, R> {
    /// The client through which transactions are sent
    client: &'a C,
    /// The registry from which contract factories are resolved
    registry: &'a R,
}

impl<'a, C: DeployClient, R: ContractRegistry> Deployer<'a, C, R> {
    /// Create a deployer over the given client and registry
    pub fn new(client: &'a C, registry: &'a R) -> Self {
        Self { client, registry }
    }

    /// The address of the account deploying the contracts
    pub fn deployer_address(&self) -> Address {
        self.client.sender()
    }

    /// Resolve every factory of a full deployment and check their
    /// constructors against the arguments they will be deployed with
    pub fn resolve_factories(&self) -> Result<SeraphimFactories, DeployError> {
        let factories = SeraphimFactories {
            liquidity_token: self.registry.resolve(LIQUIDITY_TOKEN_CONTRACT)?,
            governance: self.registry.resolve(GOVERNANCE_CONTRACT)?,
            seraphim_token: self.registry.resolve(SERAPHIM_TOKEN_CONTRACT)?,
            proxy: self.registry.resolve(PROXY_CONTRACT)?,
        };

        factories.liquidity_token.check_arity(0 /* num_args */)?;
        factories.governance.check_arity(0 /* num_args */)?;
        factories.seraphim_token.check_arity(0 /* num_args */)?;
        factories.proxy.check_arity(PROXY_CONSTRUCTOR_ARITY)?;

        Ok(factories)
    }

    /// Deploy the liquidity token contract
    pub async fn deploy_liquidity_token(&self) -> Result<DeployedContract, DeployError> {
        let factory = self.registry.resolve(LIQUIDITY_TOKEN_CONTRACT)?;
        self.deploy_liquidity_token_from(&factory).await
    }

    /// Deploy the governance contract
    pub async fn deploy_governance(&self) -> Result<DeployedContract, DeployError> {
        let factory = self.registry.resolve(GOVERNANCE_CONTRACT)?;
        self.deploy_governance_from(&factory).await
    }

    /// Deploy the Seraphim token implementation behind an upgradeable proxy,
    /// initializing it with the given arguments
    pub async fn deploy_seraphim_proxy(
        &self,
        args: SeraphimInitArgs,
    ) -> Result<DeployedProxy, DeployError> {
        let proxy_factory = self.registry.resolve(PROXY_CONTRACT)?;
        proxy_factory.check_arity(PROXY_CONSTRUCTOR_ARITY)?;
        let implementation_factory = self.registry.resolve(SERAPHIM_TOKEN_CONTRACT)?;

        self.deploy_seraphim_proxy_from(&implementation_factory, &proxy_factory, args)
            .await
    }

    /// Deploy every contract in order, initializing the Seraphim token with
    /// the freshly deployed liquidity token and governance contracts.
    ///
    /// All factories are resolved up front, so a missing artifact aborts the
    /// run before anything is deployed.
    pub async fn run(
        &self,
        admin: Address,
        second_admin: Address,
    ) -> Result<DeploymentRecord, DeployError> {
        let factories = self.resolve_factories()?;

        let liquidity_token = self
            .deploy_liquidity_token_from(&factories.liquidity_token)
            .await?;
        let governance = self.deploy_governance_from(&factories.governance).await?;

        let seraphim_token = self
            .deploy_seraphim_proxy_from(
                &factories.seraphim_token,
                &factories.proxy,
                SeraphimInitArgs {
                    admin,
                    liquidity_token: liquidity_token.address,
                    governance: governance.address,
                    second_admin,
                },
            )
            .await?;

        Ok(DeploymentRecord {
            liquidity_token,
            governance,
            seraphim_token,
        })
    }

    /// Read the name and symbol of a deployed token
    pub async fn token_metadata(&self, token: Address) -> Result<TokenMetadata, DeployError> {
        let name = self
            .client
            .call(token, nameCall {}.abi_encode().into())
            .await?;
        let name = nameCall::abi_decode_returns(&name, true)
            .map_err(|e| DeployError::ContractInteraction(e.to_string()))?
            ._0;

        let symbol = self
            .client
            .call(token, symbolCall {}.abi_encode().into())
            .await?;
        let symbol = symbolCall::abi_decode_returns(&symbol, true)
            .map_err(|e| DeployError::ContractInteraction(e.to_string()))?
            ._0;

        Ok(TokenMetadata { name, symbol })
    }

    // -----------
    // | Helpers |
    // -----------

    /// Deploy the liquidity token from its factory
    async fn deploy_liquidity_token_from(
        &self,
        factory: &ContractFactory,
    ) -> Result<DeployedContract, DeployError> {
        let contract = self.deploy_factory(factory).await?;
        info!("LiquidityToken deployed to: {:#x}", contract.address);
        Ok(contract)
    }

    /// Deploy the governance contract from its factory
    async fn deploy_governance_from(
        &self,
        factory: &ContractFactory,
    ) -> Result<DeployedContract, DeployError> {
        let contract = self.deploy_factory(factory).await?;
        info!("Governance contract deployed to: {:#x}", contract.address);
        Ok(contract)
    }

    /// Deploy the implementation, then the proxy in front of it
    async fn deploy_seraphim_proxy_from(
        &self,
        implementation_factory: &ContractFactory,
        proxy_factory: &ContractFactory,
        args: SeraphimInitArgs,
    ) -> Result<DeployedProxy, DeployError> {
        let implementation = self.deploy_factory(implementation_factory).await?;
        debug!(
            "SeraphimToken implementation deployed to: {:#x}",
            implementation.address
        );

        // The proxy admin is owned by the deployer
        let constructor_args = (
            implementation.address,
            self.client.sender(),
            Bytes::from(args.calldata()),
        )
            .abi_encode_params();
        let code = proxy_factory.deploy_code(PROXY_CONSTRUCTOR_ARITY, &constructor_args)?;
        let proxy = self.client.deploy(code).await?;

        let proxy_admin = self.proxy_admin(proxy).await?;
        info!("SeraphimToken deployed to: {:#x}", proxy);
        debug!("SeraphimToken proxy admin deployed to: {:#x}", proxy_admin);

        Ok(DeployedProxy {
            proxy,
            implementation: implementation.address,
            proxy_admin,
        })
    }

    /// Deploy a contract which takes no constructor arguments
    async fn deploy_factory(
        &self,
        factory: &ContractFactory,
    ) -> Result<DeployedContract, DeployError> {
        debug!(
            "Deploying {} ({} bytes of bytecode)",
            factory.name,
            factory.bytecode.len()
        );

        let code = factory.deploy_code(0 /* num_args */, &[])?;
        let address = self.client.deploy(code).await?;

        Ok(DeployedContract {
            name: factory.name.clone(),
            address,
        })
    }

    /// Get the proxy admin address from the proxy's EIP-1967 admin slot.
    ///
    /// This is the recommended way to get the proxy admin address:
    /// https://github.com/OpenZeppelin/openzeppelin-contracts/blob/v5.0.0/contracts/proxy/ERC1967/ERC1967Utils.sol#L104-L106
    async fn proxy_admin(&self, proxy: Address) -> Result<Address, DeployError> {
        let slot = B256::from_str(PROXY_ADMIN_STORAGE_SLOT)
            .map_err(|e| DeployError::ContractInteraction(e.to_string()))?;
        let word = self.client.storage_at(proxy, slot).await?;

        Ok(Address::from_word(word))
    }
}
