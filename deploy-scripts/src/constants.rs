//! Constants used in the deploy scripts

/// The default private key, the first default account in an Anvil node
pub const DEFAULT_DEVNET_PKEY: &str =
    "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

/// The default RPC url, a local Anvil node
pub const DEFAULT_DEVNET_RPC_URL: &str = "http://127.0.0.1:8545";

/// The default directory holding compiled contract artifacts
pub const DEFAULT_ARTIFACTS_DIR: &str = "artifacts";

/// The proxy artifact shipped with the OpenZeppelin upgrades plugin, relative
/// to the project root
pub const DEFAULT_PROXY_ARTIFACT: &str = "node_modules/@openzeppelin/upgrades-core/artifacts/@openzeppelin/contracts-v5/proxy/transparent/TransparentUpgradeableProxy.sol/TransparentUpgradeableProxy.json";

/// The number of confirmations to wait for on a contract deployment transaction
pub const NUM_DEPLOY_CONFIRMATIONS: u64 = 1;

/// The storage slot containing the proxy admin contract address in the upgradeable proxy.
///
/// This is specified in EIP1967: https://eips.ethereum.org/EIPS/eip-1967#admin-address
pub const PROXY_ADMIN_STORAGE_SLOT: &str =
    "0xb53127684a568b3173ae13b9f8a6016e243e63b6e8ee1178d6a717850b5d6103";

/// The number of constructor arguments taken by the upgradeable proxy:
/// the implementation, the initial owner of its `ProxyAdmin`, and the
/// initializer calldata
pub const PROXY_CONSTRUCTOR_ARITY: usize = 3;

// ------------------
// | Contract names |
// ------------------

/// The name of the liquidity token contract artifact
pub const LIQUIDITY_TOKEN_CONTRACT: &str = "LiquidityToken";

/// The name of the governance contract artifact
pub const GOVERNANCE_CONTRACT: &str = "Governance";

/// The name of the Seraphim token implementation contract artifact
pub const SERAPHIM_TOKEN_CONTRACT: &str = "SeraphimToken";

/// The name of the upgradeable proxy contract artifact.
///
/// Compiled from https://github.com/OpenZeppelin/openzeppelin-contracts/blob/v5.0.0/contracts/proxy/transparent/TransparentUpgradeableProxy.sol
pub const PROXY_CONTRACT: &str = "TransparentUpgradeableProxy";

// ---------------------
// | Deployments keys |
// ---------------------

/// The liquidity token key in the deployments file
pub const LIQUIDITY_TOKEN_DEPLOYMENT_KEY: &str = "LiquidityToken";

/// The governance contract key in the deployments file
pub const GOVERNANCE_DEPLOYMENT_KEY: &str = "Governance";

/// The Seraphim token proxy key in the deployments file
pub const SERAPHIM_TOKEN_DEPLOYMENT_KEY: &str = "SeraphimToken";

/// The Seraphim token implementation key in the deployments file
pub const SERAPHIM_IMPLEMENTATION_DEPLOYMENT_KEY: &str = "SeraphimTokenImplementation";

/// The Seraphim token proxy admin key in the deployments file
pub const SERAPHIM_PROXY_ADMIN_DEPLOYMENT_KEY: &str = "SeraphimTokenProxyAdmin";

// ------------------
// | Token metadata |
// ------------------

/// The name reported by an initialized Seraphim token
pub const SERAPHIM_TOKEN_NAME: &str = "Seraphim";

/// The symbol reported by an initialized Seraphim token
pub const SERAPHIM_TOKEN_SYMBOL: &str = "SRP";
