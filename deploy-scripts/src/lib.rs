//! Scripts for deploying and initializing the Seraphim smart contracts.
//!
//! The liquidity token and governance contracts are deployed first, then the
//! Seraphim token behind an upgradeable proxy, initialized with both.

pub mod artifacts;
pub mod cli;
pub mod client;
mod commands;
pub mod constants;
pub mod coordinator;
pub mod deployments;
pub mod errors;
pub mod solidity;
