//! Definitions of Solidity functions called during deployment

use alloy_sol_types::sol;

sol! {
    function initialize(address admin, address liquidityToken, address governance, address secondAdmin) external;
    function name() external view returns (string memory);
    function symbol() external view returns (string memory);
}
