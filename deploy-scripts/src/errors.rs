//! Definitions of errors that can occur during deployment of the contracts

use std::{
    error::Error,
    fmt::{self, Display, Formatter},
};

/// Errors that can occur while deploying or checking the Seraphim contracts
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeployError {
    /// Error initializing the RPC client
    ClientInitialization(String),
    /// No compiled artifact exists for the requested contract
    ArtifactNotFound(String),
    /// More than one compiled artifact matches the requested contract
    AmbiguousArtifact(String),
    /// Error parsing a compilation artifact
    ArtifactParsing(String),
    /// Error constructing calldata or constructor arguments
    CalldataConstruction(String),
    /// Error deploying a contract
    ContractDeployment(String),
    /// Error calling a contract method
    ContractInteraction(String),
    /// Error reading the deployments file
    ReadDeployments(String),
    /// Error writing the deployments file
    WriteDeployments(String),
    /// A deployed token reported unexpected metadata
    TokenMismatch(String),
}

impl Display for DeployError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            DeployError::ClientInitialization(s) => write!(f, "error initializing client: {}", s),
            DeployError::ArtifactNotFound(s) => write!(f, "artifact not found: {}", s),
            DeployError::AmbiguousArtifact(s) => write!(f, "ambiguous artifact: {}", s),
            DeployError::ArtifactParsing(s) => write!(f, "error parsing artifact: {}", s),
            DeployError::CalldataConstruction(s) => write!(f, "error constructing calldata: {}", s),
            DeployError::ContractDeployment(s) => write!(f, "error deploying contract: {}", s),
            DeployError::ContractInteraction(s) => {
                write!(f, "error interacting with contract: {}", s)
            }
            DeployError::ReadDeployments(s) => write!(f, "error reading deployments: {}", s),
            DeployError::WriteDeployments(s) => write!(f, "error writing deployments: {}", s),
            DeployError::TokenMismatch(s) => write!(f, "unexpected token metadata: {}", s),
        }
    }
}

impl Error for DeployError {}
