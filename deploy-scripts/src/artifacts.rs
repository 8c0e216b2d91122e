//! Resolution of contract names to deployable factories, backed by compiled
//! contract artifacts.
//!
//! Both Hardhat (`artifacts/contracts/Foo.sol/Foo.json`, string `bytecode`)
//! and Foundry (`out/Foo.sol/Foo.json`, `bytecode.object`) layouts are read.

use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
    str::FromStr,
};

use alloy_primitives::Bytes;
use serde::Deserialize;
use tracing::debug;

use crate::errors::DeployError;

/// The extension of a compiled artifact file
const ARTIFACT_EXTENSION: &str = "json";

/// A named template from which contract instances can be deployed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractFactory {
    /// The name of the contract
    pub name: String,
    /// The number of parameters the contract's constructor takes
    pub constructor_inputs: usize,
    /// The contract's creation bytecode, without constructor arguments
    pub bytecode: Bytes,
}

impl ContractFactory {
    /// Build the creation code for a deployment, appending the ABI-encoded
    /// constructor arguments to the bytecode.
    ///
    /// `num_args` is the number of constructor arguments encoded in
    /// `encoded_args`, and must match the contract's constructor.
    pub fn deploy_code(&self, num_args: usize, encoded_args: &[u8]) -> Result<Bytes, DeployError> {
        self.check_arity(num_args)?;

        let mut code = self.bytecode.to_vec();
        code.extend_from_slice(encoded_args);
        Ok(code.into())
    }

    /// Check that the contract's constructor takes `num_args` arguments
    pub fn check_arity(&self, num_args: usize) -> Result<(), DeployError> {
        if num_args != self.constructor_inputs {
            return Err(DeployError::CalldataConstruction(format!(
                "{} constructor takes {} arguments, got {}",
                self.name, self.constructor_inputs, num_args
            )));
        }

        Ok(())
    }
}

/// A registry resolving contract names to factories
pub trait ContractRegistry {
    /// Resolve the factory for the contract with the given name
    fn resolve(&self, name: &str) -> Result<ContractFactory, DeployError>;
}

impl ContractRegistry for HashMap<String, ContractFactory> {
    fn resolve(&self, name: &str) -> Result<ContractFactory, DeployError> {
        self.get(name)
            .cloned()
            .ok_or_else(|| DeployError::ArtifactNotFound(name.to_string()))
    }
}

// -------------------
// | Artifact format |
// -------------------

/// The subset of a compiled artifact needed for deployment
#[derive(Deserialize)]
struct Artifact {
    /// The contract ABI
    abi: Vec<AbiItem>,
    /// The creation bytecode
    bytecode: ArtifactBytecode,
}

/// An entry in a contract ABI
#[derive(Deserialize)]
struct AbiItem {
    /// The kind of entry, e.g. `function` or `constructor`
    #[serde(rename = "type")]
    kind: String,
    /// The entry's parameters
    #[serde(default)]
    inputs: Vec<serde_json::Value>,
}

/// Bytecode as emitted by Hardhat (a hex string) or Foundry (an object)
#[derive(Deserialize)]
#[serde(untagged)]
enum ArtifactBytecode {
    /// Hardhat-style bytecode
    Hex(String),
    /// Foundry-style bytecode
    Object {
        /// The hex-encoded bytecode
        object: String,
    },
}

impl ArtifactBytecode {
    /// The hex-encoded bytecode
    fn hex(&self) -> &str {
        match self {
            ArtifactBytecode::Hex(s) => s,
            ArtifactBytecode::Object { object } => object,
        }
    }
}

/// Parse a compiled artifact into a factory for the named contract
pub fn parse_artifact(name: &str, contents: &str) -> Result<ContractFactory, DeployError> {
    let artifact: Artifact = serde_json::from_str(contents)
        .map_err(|e| DeployError::ArtifactParsing(format!("{name}: {e}")))?;

    let bytecode = Bytes::from_str(artifact.bytecode.hex())
        .map_err(|e| DeployError::ArtifactParsing(format!("{name}: {e}")))?;
    // Interfaces and abstract contracts compile to empty bytecode
    if bytecode.is_empty() {
        return Err(DeployError::ArtifactParsing(format!(
            "{name} has no bytecode, is it abstract?"
        )));
    }

    let constructor_inputs = artifact
        .abi
        .iter()
        .find(|item| item.kind == "constructor")
        .map(|item| item.inputs.len())
        .unwrap_or_default();

    Ok(ContractFactory {
        name: name.to_string(),
        constructor_inputs,
        bytecode,
    })
}

// ----------------------
// | Artifact directory |
// ----------------------

/// A directory of compiled artifacts, searched recursively by contract name.
///
/// Individual contracts can be pinned to an artifact file outside the tree,
/// e.g. the proxy artifact shipped with the OpenZeppelin upgrades plugin.
#[derive(Debug, Clone)]
pub struct ArtifactDirectory {
    /// The root of the artifacts tree
    root: PathBuf,
    /// Artifact files to use for specific contracts, when present
    pinned: HashMap<String, PathBuf>,
}

impl ArtifactDirectory {
    /// Create a registry over the artifacts under `root`
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            pinned: HashMap::new(),
        }
    }

    /// Pin the artifact of the named contract to the given file.
    ///
    /// If the file doesn't exist the contract is looked up under the root.
    pub fn with_artifact(mut self, name: &str, path: impl Into<PathBuf>) -> Self {
        self.pinned.insert(name.to_string(), path.into());
        self
    }

    /// Find every artifact file named `<name>.json` under the root
    fn find(&self, name: &str) -> Result<Vec<PathBuf>, DeployError> {
        let file_name = format!("{name}.{ARTIFACT_EXTENSION}");
        let mut found = Vec::new();
        let mut pending = vec![self.root.clone()];

        while let Some(dir) = pending.pop() {
            let entries = fs::read_dir(&dir).map_err(|e| {
                DeployError::ArtifactNotFound(format!("{}: {}", dir.display(), e))
            })?;

            for entry in entries {
                let path = entry
                    .map_err(|e| DeployError::ArtifactNotFound(e.to_string()))?
                    .path();
                if path.is_dir() {
                    pending.push(path);
                } else if path.file_name().is_some_and(|f| f == file_name.as_str()) {
                    found.push(path);
                }
            }
        }

        found.sort();
        Ok(found)
    }
}

impl ContractRegistry for ArtifactDirectory {
    fn resolve(&self, name: &str) -> Result<ContractFactory, DeployError> {
        if let Some(path) = self.pinned.get(name).filter(|p| p.is_file()) {
            debug!("Using pinned {} artifact at {}", name, path.display());
            return read_artifact(name, path);
        }

        let path = match self.find(name)?.as_slice() {
            [] => {
                return Err(DeployError::ArtifactNotFound(format!(
                    "{} under {}",
                    name,
                    self.root.display()
                )))
            }
            [path] => path.clone(),
            paths => {
                let paths = paths
                    .iter()
                    .map(|p| p.display().to_string())
                    .collect::<Vec<_>>()
                    .join(", ");
                return Err(DeployError::AmbiguousArtifact(format!("{name}: {paths}")));
            }
        };

        debug!("Resolved {} artifact at {}", name, path.display());
        read_artifact(name, &path)
    }
}

/// Read and parse the artifact at the given path
fn read_artifact(name: &str, path: &Path) -> Result<ContractFactory, DeployError> {
    let contents = fs::read_to_string(path)
        .map_err(|e| DeployError::ArtifactParsing(format!("{}: {}", path.display(), e)))?;
    parse_artifact(name, &contents)
}
