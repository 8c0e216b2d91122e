//! Utilities for reading and writing deployed addresses in a JSON file

use std::{fs, path::Path, str::FromStr};

use alloy_primitives::Address;
use serde_json::{Map, Value};

use crate::errors::DeployError;

/// Read the deployments file as a JSON object
fn read_deployments(deployments_path: &Path) -> Result<Map<String, Value>, DeployError> {
    let content = fs::read_to_string(deployments_path).map_err(|e| {
        DeployError::ReadDeployments(format!("{}: {}", deployments_path.display(), e))
    })?;

    match serde_json::from_str(&content) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Err(DeployError::ReadDeployments(format!(
            "{} is not a JSON object",
            deployments_path.display()
        ))),
        Err(e) => Err(DeployError::ReadDeployments(e.to_string())),
    }
}

/// Read an address from the deployments file
///
/// Returns the address for the given key, or an error if not found
pub fn read_deployment(key: &str, deployments_path: &Path) -> Result<Address, DeployError> {
    let deployments = read_deployments(deployments_path)?;

    let addr_str = deployments
        .get(key)
        .and_then(|v| v.as_str())
        .ok_or_else(|| {
            DeployError::ReadDeployments(format!("key {} not found in deployments file", key))
        })?;

    Address::from_str(addr_str)
        .map_err(|e| DeployError::ReadDeployments(format!("invalid address {addr_str}: {e}")))
}

/// Write an address to the deployments file under the given key, creating the
/// file if it doesn't exist and keeping any other entries
pub fn write_deployment(
    deployments_path: &Path,
    key: &str,
    address: Address,
) -> Result<(), DeployError> {
    let mut deployments = if deployments_path.exists() {
        read_deployments(deployments_path)?
    } else {
        Map::new()
    };

    deployments.insert(key.to_string(), Value::String(format!("{address:#x}")));

    let content = serde_json::to_string_pretty(&Value::Object(deployments))
        .map_err(|e| DeployError::WriteDeployments(e.to_string()))?;
    fs::write(deployments_path, content).map_err(|e| {
        DeployError::WriteDeployments(format!("{}: {}", deployments_path.display(), e))
    })
}
