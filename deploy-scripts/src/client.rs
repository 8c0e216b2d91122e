//! The chain client through which contracts are deployed and queried

use std::str::FromStr;

use alloy::{
    network::{Ethereum, EthereumWallet, TransactionBuilder},
    providers::{DynProvider, Provider, ProviderBuilder},
    rpc::types::TransactionRequest,
    signers::local::PrivateKeySigner,
    transports::http::reqwest::Url,
};
use alloy_primitives::{Address, Bytes, B256, U256};
use tracing::debug;

use crate::{constants::NUM_DEPLOY_CONFIRMATIONS, errors::DeployError};

/// The account and network primitives needed to deploy contracts
#[allow(async_fn_in_trait)]
pub trait DeployClient {
    /// The address of the account signing deployments
    fn sender(&self) -> Address;

    /// Send a contract creation transaction with the given creation code and
    /// wait for it to be confirmed, returning the address of the new contract
    async fn deploy(&self, code: Bytes) -> Result<Address, DeployError>;

    /// Read a storage slot of the given contract
    async fn storage_at(&self, address: Address, slot: B256) -> Result<B256, DeployError>;

    /// Make a read-only call to the given contract
    async fn call(&self, to: Address, data: Bytes) -> Result<Bytes, DeployError>;
}

/// A [`DeployClient`] backed by a JSON-RPC node
#[derive(Clone)]
pub struct RpcClient {
    /// The provider, with the deployer's wallet attached
    provider: DynProvider<Ethereum>,
    /// The deployer's address
    sender: Address,
}

impl RpcClient {
    /// The underlying provider
    pub fn provider(&self) -> &DynProvider<Ethereum> {
        &self.provider
    }
}

/// Sets up the client with which to deploy contracts, signing with the given
/// private key against the given RPC url
pub async fn setup_client(priv_key: &str, rpc_url: &str) -> Result<RpcClient, DeployError> {
    let signer = PrivateKeySigner::from_str(priv_key)
        .map_err(|e| DeployError::ClientInitialization(e.to_string()))?;
    let url = Url::parse(rpc_url).map_err(|e| DeployError::ClientInitialization(e.to_string()))?;

    let sender = signer.address();
    let provider = ProviderBuilder::new()
        .wallet(EthereumWallet::from(signer))
        .on_http(url);

    let chain_id = provider
        .get_chain_id()
        .await
        .map_err(|e| DeployError::ClientInitialization(e.to_string()))?;
    debug!("Connected to {} (chain id {})", rpc_url, chain_id);

    Ok(RpcClient {
        provider: DynProvider::new(provider),
        sender,
    })
}

impl DeployClient for RpcClient {
    fn sender(&self) -> Address {
        self.sender
    }

    async fn deploy(&self, code: Bytes) -> Result<Address, DeployError> {
        let tx = TransactionRequest::default()
            .with_from(self.sender)
            .with_deploy_code(code);

        let receipt = self
            .provider
            .send_transaction(tx)
            .await
            .map_err(|e| DeployError::ContractDeployment(e.to_string()))?
            .with_required_confirmations(NUM_DEPLOY_CONFIRMATIONS)
            .get_receipt()
            .await
            .map_err(|e| DeployError::ContractDeployment(e.to_string()))?;

        debug!(
            "Deployment tx {:#x} included in block {:?}",
            receipt.transaction_hash, receipt.block_number
        );

        if !receipt.status() {
            return Err(DeployError::ContractDeployment(format!(
                "deployment tx {:#x} reverted",
                receipt.transaction_hash
            )));
        }

        receipt.contract_address.ok_or_else(|| {
            DeployError::ContractDeployment(format!(
                "no contract created by tx {:#x}",
                receipt.transaction_hash
            ))
        })
    }

    async fn storage_at(&self, address: Address, slot: B256) -> Result<B256, DeployError> {
        let value: U256 = self
            .provider
            .get_storage_at(address, U256::from_be_bytes(slot.0))
            .await
            .map_err(|e| DeployError::ContractInteraction(e.to_string()))?;

        Ok(B256::from(value.to_be_bytes::<32>()))
    }

    async fn call(&self, to: Address, data: Bytes) -> Result<Bytes, DeployError> {
        let tx = TransactionRequest::default().with_to(to).with_input(data);

        self.provider
            .call(&tx)
            .await
            .map_err(|e| DeployError::ContractInteraction(e.to_string()))
    }
}
