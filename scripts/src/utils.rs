//! Utilities for the deploy scripts.

use std::{fmt::Display, fs, path::Path, str::FromStr};

use alloy::{
    primitives::Address,
    providers::{DynProvider, Provider, ProviderBuilder},
    transports::http::reqwest::Url,
};
use serde_json::{json, Value};
use tracing::debug;

use crate::{constants::DEPLOYMENTS_KEY, errors::ScriptError, networks::NetworkProfile};

/// Sets up a signing client for the given network profile, checking that the
/// node it connects to serves the profile's chain
pub async fn setup_client(profile: &NetworkProfile) -> Result<DynProvider, ScriptError> {
    let url =
        Url::parse(&profile.url).map_err(|e| ScriptError::ClientInitialization(e.to_string()))?;
    let signer = profile.deployer()?;

    let provider = ProviderBuilder::new().wallet(signer).connect_http(url);
    let chain_id = provider
        .get_chain_id()
        .await
        .map_err(|e| ScriptError::ClientInitialization(e.to_string()))?;
    profile.check_chain_id(chain_id)?;
    debug!("connected to {} (chain ID {chain_id})", profile.network);

    Ok(DynProvider::new(provider))
}

/// Read a deployed address from the deployments file
pub fn read_deployed_address(file_path: &Path, contract_key: &str) -> Result<Address, ScriptError> {
    let contents =
        fs::read_to_string(file_path).map_err(|e| ScriptError::ReadDeployments(e.to_string()))?;
    let parsed_json: Value = serde_json::from_str(&contents)
        .map_err(|e| ScriptError::ReadDeployments(e.to_string()))?;

    let addr_str = parsed_json[DEPLOYMENTS_KEY][contract_key]
        .as_str()
        .ok_or_else(|| {
            ScriptError::ReadDeployments(format!("no {contract_key} entry in deployments file"))
        })?;

    Address::from_str(addr_str).map_err(|e| ScriptError::ReadDeployments(e.to_string()))
}

/// Record a deployed address in the deployments file, creating the file if
/// it does not exist. Other entries are preserved.
pub fn write_deployed_address(
    file_path: &Path,
    contract_key: &str,
    address: Address,
) -> Result<(), ScriptError> {
    let write_err = |e: &dyn Display| {
        ScriptError::WriteDeployments(format!("{}: {}", file_path.display(), e))
    };

    let mut parsed_json = if file_path.exists() {
        let contents = fs::read_to_string(file_path).map_err(|e| write_err(&e))?;
        serde_json::from_str(&contents).map_err(|e| write_err(&e))?
    } else {
        json!({})
    };

    if !parsed_json.is_object() {
        return Err(write_err(&"not a JSON object"));
    }
    if !parsed_json[DEPLOYMENTS_KEY].is_object() {
        parsed_json[DEPLOYMENTS_KEY] = json!({});
    }
    parsed_json[DEPLOYMENTS_KEY][contract_key] = Value::String(format!("{address:#x}"));

    let contents = serde_json::to_string_pretty(&parsed_json).map_err(|e| write_err(&e))?;
    fs::write(file_path, contents).map_err(|e| write_err(&e))
}
