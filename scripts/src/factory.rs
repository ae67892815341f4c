//! Contract factories: the handles used to submit creation transactions

use alloy::{
    contract::RawCallBuilder,
    dyn_abi::DynSolValue,
    primitives::{Address, TxHash},
    providers::{DynProvider, Provider},
    rpc::types::TransactionReceipt,
};
use async_trait::async_trait;
use tracing::{debug, info};

use crate::{
    artifacts::{Artifact, ArtifactStore},
    constants::RECEIPT_POLL_INTERVAL,
    errors::ScriptError,
};

/// Submits creation transactions for a single blueprint
#[async_trait]
pub trait ContractFactory: Send + Sync {
    /// Deploy a new instance of the blueprint with the given constructor
    /// arguments, returning its address once the deployment is confirmed
    async fn deploy(&self, args: &[DynSolValue]) -> Result<Address, ScriptError>;
}

/// Resolves blueprint names to factories
pub trait BlueprintResolver {
    /// The factory type produced by the resolver
    type Factory: ContractFactory;

    /// Get a factory for the named blueprint
    fn factory(&self, blueprint: &str) -> Result<Self::Factory, ScriptError>;
}

/// A factory that deploys a compiled artifact over RPC
pub struct RpcContractFactory {
    /// The compiled blueprint
    artifact: Artifact,
    /// The signing provider the deployment is sent through
    client: DynProvider,
}

impl RpcContractFactory {
    /// Create a factory for the artifact, sending through the given client
    pub fn new(artifact: Artifact, client: DynProvider) -> Self {
        Self { artifact, client }
    }

    /// Poll the client until the transaction's receipt is available.
    ///
    /// There is no attempt limit, a deployment is waited on until it is mined.
    async fn wait_for_receipt(&self, tx_hash: TxHash) -> Result<TransactionReceipt, ScriptError> {
        loop {
            let receipt = self
                .client
                .get_transaction_receipt(tx_hash)
                .await
                .map_err(|e| ScriptError::ContractDeployment(e.to_string()))?;

            match receipt {
                Some(receipt) => return Ok(receipt),
                None => {
                    debug!("no receipt yet for {tx_hash:#x}");
                    tokio::time::sleep(RECEIPT_POLL_INTERVAL).await;
                }
            }
        }
    }
}

#[async_trait]
impl ContractFactory for RpcContractFactory {
    async fn deploy(&self, args: &[DynSolValue]) -> Result<Address, ScriptError> {
        let creation_code = self.artifact.creation_code(args)?;

        let pending_tx = RawCallBuilder::new_raw_deploy(self.client.clone(), creation_code)
            .send()
            .await
            .map_err(|e| ScriptError::ContractDeployment(e.to_string()))?;

        let tx_hash = *pending_tx.tx_hash();
        info!(
            "submitted {} deployment in transaction {tx_hash:#x}",
            self.artifact.contract_name
        );

        let receipt = self.wait_for_receipt(tx_hash).await?;

        if !receipt.status() {
            return Err(ScriptError::ContractDeployment(format!(
                "transaction {tx_hash:#x} reverted"
            )));
        }

        receipt.contract_address.ok_or_else(|| {
            ScriptError::ContractDeployment(format!(
                "receipt for {tx_hash:#x} has no contract address"
            ))
        })
    }
}

/// Resolves blueprints from an artifacts directory into RPC factories
pub struct ArtifactResolver {
    /// The compiled artifacts
    artifacts: ArtifactStore,
    /// The signing provider handed to each factory
    client: DynProvider,
}

impl ArtifactResolver {
    /// Create a resolver over the given artifacts and client
    pub fn new(artifacts: ArtifactStore, client: DynProvider) -> Self {
        Self { artifacts, client }
    }
}

impl BlueprintResolver for ArtifactResolver {
    type Factory = RpcContractFactory;

    fn factory(&self, blueprint: &str) -> Result<RpcContractFactory, ScriptError> {
        let artifact = self.artifacts.load(blueprint)?;
        Ok(RpcContractFactory::new(artifact, self.client.clone()))
    }
}
