//! An in-memory chain that emulates the Seraphim contracts, for testing the
//! deploy scripts without a node
#![allow(dead_code)]

use std::{
    collections::HashMap,
    str::FromStr,
    sync::{Mutex, MutexGuard},
};

use alloy_primitives::{Address, Bytes, B256};
use alloy_sol_types::{SolCall, SolValue};
use deploy_scripts::{
    artifacts::ContractFactory,
    client::DeployClient,
    constants::{
        GOVERNANCE_CONTRACT, LIQUIDITY_TOKEN_CONTRACT, PROXY_ADMIN_STORAGE_SLOT, PROXY_CONTRACT,
        SERAPHIM_TOKEN_CONTRACT, SERAPHIM_TOKEN_NAME, SERAPHIM_TOKEN_SYMBOL,
    },
    coordinator::SeraphimInitArgs,
    errors::DeployError,
    solidity::{initializeCall, nameCall, symbolCall},
};

/// The bytecode of the mock proxy contract
const PROXY_BYTECODE: &[u8] = &[0xfe, 0xfe, 0xfe];

/// The error returned for an injected deployment failure
pub const INSUFFICIENT_FUNDS: &str = "insufficient funds for gas * price + value";

/// A registry holding stand-in bytecode for each contract
pub fn mock_registry() -> HashMap<String, ContractFactory> {
    let factory = |name: &str, constructor_inputs: usize, bytecode: &[u8]| {
        (
            name.to_string(),
            ContractFactory {
                name: name.to_string(),
                constructor_inputs,
                bytecode: Bytes::copy_from_slice(bytecode),
            },
        )
    };

    HashMap::from([
        factory(LIQUIDITY_TOKEN_CONTRACT, 0, &[0x01]),
        factory(GOVERNANCE_CONTRACT, 0, &[0x02]),
        factory(SERAPHIM_TOKEN_CONTRACT, 0, &[0x03]),
        factory(PROXY_CONTRACT, 3, PROXY_BYTECODE),
    ])
}

/// An initialized Seraphim token proxy
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockProxy {
    /// The implementation the proxy delegates to
    pub implementation: Address,
    /// The owner of the proxy admin
    pub owner: Address,
    /// The proxy admin created by the proxy
    pub admin: Address,
    /// The arguments the token was initialized with
    pub init: SeraphimInitArgs,
}

#[derive(Default)]
struct ChainState {
    /// The deployer's nonce
    nonce: u64,
    /// The number of deployments attempted
    attempts: usize,
    /// The code deployed at each address
    code: HashMap<Address, Bytes>,
    /// The initialized proxies
    proxies: HashMap<Address, MockProxy>,
}

/// A [`DeployClient`] over an in-memory chain
pub struct MockChain {
    /// The deployer
    sender: Address,
    /// The (1-based) deployment attempt that fails, if any
    fail_at: Option<usize>,
    /// The chain state
    state: Mutex<ChainState>,
}

impl MockChain {
    /// A chain on which every deployment succeeds
    pub fn new() -> Self {
        Self {
            sender: Address::repeat_byte(0xd0),
            fail_at: None,
            state: Mutex::default(),
        }
    }

    /// A chain on which the given deployment attempt fails
    pub fn failing_at(attempt: usize) -> Self {
        Self {
            fail_at: Some(attempt),
            ..Self::new()
        }
    }

    fn state(&self) -> MutexGuard<'_, ChainState> {
        self.state.lock().unwrap()
    }

    /// The number of deployments attempted
    pub fn attempts(&self) -> usize {
        self.state().attempts
    }

    /// The number of contracts deployed
    pub fn num_contracts(&self) -> usize {
        self.state().code.len()
    }

    /// The proxy at the given address, if any
    pub fn proxy(&self, address: Address) -> Option<MockProxy> {
        self.state().proxies.get(&address).cloned()
    }

    /// Run the proxy constructor, calling the initializer on the implementation
    fn construct_proxy(
        state: &ChainState,
        proxy: Address,
        constructor_args: &[u8],
    ) -> Result<MockProxy, DeployError> {
        let (implementation, owner, data) =
            <(Address, Address, Bytes)>::abi_decode_params(constructor_args, true)
                .map_err(|e| DeployError::ContractDeployment(e.to_string()))?;

        if !state.code.contains_key(&implementation) {
            return Err(revert("ERC1967InvalidImplementation"));
        }

        let init =
            initializeCall::abi_decode(&data, true).map_err(|_| revert("unknown selector"))?;
        let init = SeraphimInitArgs {
            admin: init.admin,
            liquidity_token: init.liquidityToken,
            governance: init.governance,
            second_admin: init.secondAdmin,
        };
        let addresses = [
            init.admin,
            init.liquidity_token,
            init.governance,
            init.second_admin,
        ];
        if addresses.contains(&Address::ZERO) {
            return Err(revert("invalid address"));
        }

        Ok(MockProxy {
            implementation,
            owner,
            admin: proxy.create(1),
            init,
        })
    }
}

/// A reverted deployment
fn revert(reason: &str) -> DeployError {
    DeployError::ContractDeployment(format!("execution reverted: {reason}"))
}

impl DeployClient for MockChain {
    fn sender(&self) -> Address {
        self.sender
    }

    async fn deploy(&self, code: Bytes) -> Result<Address, DeployError> {
        let mut state = self.state();
        state.attempts += 1;
        if self.fail_at == Some(state.attempts) {
            return Err(DeployError::ContractDeployment(INSUFFICIENT_FUNDS.to_string()));
        }

        let address = self.sender.create(state.nonce);
        state.nonce += 1;

        if let Some(args) = code.strip_prefix(PROXY_BYTECODE) {
            let proxy = Self::construct_proxy(&state, address, args)?;
            state.proxies.insert(address, proxy);
        }
        state.code.insert(address, code);

        Ok(address)
    }

    async fn storage_at(&self, address: Address, slot: B256) -> Result<B256, DeployError> {
        let admin_slot = B256::from_str(PROXY_ADMIN_STORAGE_SLOT).unwrap();
        let value = match self.proxy(address) {
            Some(proxy) if slot == admin_slot => proxy.admin.into_word(),
            _ => B256::ZERO,
        };

        Ok(value)
    }

    async fn call(&self, to: Address, data: Bytes) -> Result<Bytes, DeployError> {
        let reverted = || DeployError::ContractInteraction("execution reverted".to_string());
        if self.proxy(to).is_none() {
            return Err(reverted());
        }

        let ret = if data.starts_with(&nameCall::SELECTOR) {
            nameCall::abi_encode_returns(&(SERAPHIM_TOKEN_NAME.to_string(),))
        } else if data.starts_with(&symbolCall::SELECTOR) {
            symbolCall::abi_encode_returns(&(SERAPHIM_TOKEN_SYMBOL.to_string(),))
        } else {
            return Err(reverted());
        };

        Ok(ret.into())
    }
}
