//! Implementations of the deploy scripts

use std::{io::Write, path::Path};

use tracing::{info, warn};

use crate::{
    errors::ScriptError,
    factory::{BlueprintResolver, ContractFactory},
    networks::NetworkProfile,
    types::{DeploymentRequest, DeploymentResult},
    utils::write_deployed_address,
};

/// The exit status of a successful run
pub const EXIT_SUCCESS: u8 = 0;

/// The exit status of a failed run
pub const EXIT_FAILURE: u8 = 1;

/// Deploy the requested blueprint.
///
/// Resolves the blueprint's factory and submits exactly one creation
/// transaction, waiting until it is confirmed.
pub async fn deploy<R: BlueprintResolver>(
    request: &DeploymentRequest,
    resolver: &R,
) -> Result<DeploymentResult, ScriptError> {
    let factory = resolver.factory(&request.blueprint)?;

    info!(
        "deploying {} with {} constructor arguments",
        request.blueprint,
        request.args.len()
    );
    let address = factory.deploy(&request.abi_values()).await?;
    info!("{} deployment confirmed at {address:#x}", request.blueprint);

    Ok(DeploymentResult { address })
}

/// Deploy the requested blueprint and report the deployed address on `out`,
/// recording it in the deployments file if one is given.
///
/// Failing to record the address is logged and does not turn the deployment
/// into an error.
pub async fn deploy_and_report<R: BlueprintResolver>(
    request: &DeploymentRequest,
    resolver: &R,
    deployments_path: Option<&Path>,
    out: &mut impl Write,
) -> Result<DeploymentResult, ScriptError> {
    let result = deploy(request, resolver).await?;

    writeln!(out, "{} deployed to: {}", request.blueprint, result.address)
        .map_err(|e| ScriptError::Output(e.to_string()))?;

    // The contract exists at this point, so a failed record does not fail the run
    if let Some(path) = deployments_path {
        match write_deployed_address(path, &request.blueprint, result.address) {
            Ok(()) => info!("recorded deployment in {}", path.display()),
            Err(e) => warn!("deployment not recorded in {}: {e}", path.display()),
        }
    }

    Ok(result)
}

/// Print the address of each signer configured for the network
pub fn list_accounts(profile: &NetworkProfile, out: &mut impl Write) -> Result<(), ScriptError> {
    for address in profile.addresses() {
        writeln!(out, "{address}").map_err(|e| ScriptError::Output(e.to_string()))?;
    }

    Ok(())
}

/// Map the outcome of a run to the process exit status, writing the error to
/// `err` on failure
pub fn report_outcome<T>(outcome: Result<T, ScriptError>, err: &mut impl Write) -> u8 {
    match outcome {
        Ok(_) => EXIT_SUCCESS,
        Err(e) => {
            // Nothing else can be reported if the error stream is gone
            let _ = writeln!(err, "Error: {e}");
            EXIT_FAILURE
        }
    }
}
