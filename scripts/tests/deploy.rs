//! Tests of the deployment driver against a mocked factory

use std::sync::{Arc, Mutex};

use alloy::{
    dyn_abi::DynSolValue,
    primitives::{address, Address, U256},
};
use async_trait::async_trait;
use eyre::Result;
use nft_scripts::{
    commands::{deploy, deploy_and_report, report_outcome, EXIT_FAILURE, EXIT_SUCCESS},
    constants::NFT_CONSTRUCTOR_ADDRESS,
    errors::ScriptError,
    factory::{BlueprintResolver, ContractFactory},
    types::{DeploymentRequest, MintConfig},
    utils::read_deployed_address,
};
use tempfile::TempDir;

/// The address the mock factory reports deployments at
const DEPLOYED_ADDRESS: Address = address!("5fbdb2315678afecb367f032d93f642f64180aa3");

/// The message the mock factory rejects deployments with
const REJECTION: &str = "could not detect network (event=\"noNetwork\")";

// ---------
// | Mocks |
// ---------

/// A factory that records every deployment it is asked for
#[derive(Clone)]
struct MockFactory {
    /// The argument lists of each deploy call
    calls: Arc<Mutex<Vec<Vec<DynSolValue>>>>,
    /// Whether deployments succeed
    succeed: bool,
}

#[async_trait]
impl ContractFactory for MockFactory {
    async fn deploy(&self, args: &[DynSolValue]) -> Result<Address, ScriptError> {
        self.calls.lock().unwrap().push(args.to_vec());

        if self.succeed {
            Ok(DEPLOYED_ADDRESS)
        } else {
            Err(ScriptError::ContractDeployment(REJECTION.to_string()))
        }
    }
}

/// A resolver that knows a single blueprint
struct MockResolver {
    /// The only blueprint that resolves
    blueprint: &'static str,
    /// The factory handed out for it
    factory: MockFactory,
}

impl MockResolver {
    /// A resolver for `NFT` whose deployments succeed or fail
    fn new(succeed: bool) -> Self {
        Self {
            blueprint: "NFT",
            factory: MockFactory {
                calls: Arc::new(Mutex::new(Vec::new())),
                succeed,
            },
        }
    }

    /// The argument lists the factory was called with
    fn calls(&self) -> Vec<Vec<DynSolValue>> {
        self.factory.calls.lock().unwrap().clone()
    }
}

impl BlueprintResolver for MockResolver {
    type Factory = MockFactory;

    fn factory(&self, blueprint: &str) -> Result<MockFactory, ScriptError> {
        if blueprint != self.blueprint {
            return Err(ScriptError::ArtifactResolution(format!(
                "no artifact for {blueprint}"
            )));
        }

        Ok(self.factory.clone())
    }
}

/// Run a deployment the way the binary does, returning the exit status and
/// what was written to stdout and stderr
async fn run(request: &DeploymentRequest, resolver: &MockResolver) -> (u8, String, String) {
    let mut out = Vec::new();
    let mut err = Vec::new();

    let outcome = deploy_and_report(request, resolver, None, &mut out).await;
    let code = report_outcome(outcome, &mut err);

    (
        code,
        String::from_utf8(out).unwrap(),
        String::from_utf8(err).unwrap(),
    )
}

// ---------
// | Tests |
// ---------

#[tokio::test]
async fn test_successful_deployment() -> Result<()> {
    let resolver = MockResolver::new(true);
    let request = DeploymentRequest::new("NFT", MintConfig::ScheduledMint);

    let (code, out, err) = run(&request, &resolver).await;

    assert_eq!(code, EXIT_SUCCESS);
    assert_eq!(
        out,
        "NFT deployed to: 0x5FbDB2315678afecb367f032d93F642f64180aa3\n"
    );
    assert!(err.is_empty());

    Ok(())
}

#[tokio::test]
async fn test_rejected_deployment() -> Result<()> {
    let resolver = MockResolver::new(false);
    let request = DeploymentRequest::new("NFT", MintConfig::ScheduledMint);

    let (code, out, err) = run(&request, &resolver).await;

    assert_eq!(code, EXIT_FAILURE);
    assert!(out.is_empty());
    assert!(err.contains(REJECTION));

    Ok(())
}

#[tokio::test]
async fn test_unresolved_blueprint() -> Result<()> {
    let resolver = MockResolver::new(true);
    let request = DeploymentRequest::new("Token", MintConfig::Basic);

    let (code, out, err) = run(&request, &resolver).await;

    assert_eq!(code, EXIT_FAILURE);
    assert!(out.is_empty());
    assert!(err.contains("no artifact for Token"));
    assert!(resolver.calls().is_empty());

    Ok(())
}

#[tokio::test]
async fn test_scheduled_mint_arguments() -> Result<()> {
    let resolver = MockResolver::new(true);
    let request = DeploymentRequest::new("NFT", MintConfig::ScheduledMint);

    deploy(&request, &resolver).await?;

    let expected = vec![
        DynSolValue::String("https://example.com/".to_string()),
        DynSolValue::String("https://example.com/".to_string()),
        DynSolValue::Address(NFT_CONSTRUCTOR_ADDRESS),
        DynSolValue::Uint(U256::from(100), 256),
        DynSolValue::Uint(U256::from(1650326400), 256),
        DynSolValue::Uint(U256::from(1650412800), 256),
    ];
    assert_eq!(resolver.calls(), vec![expected]);

    Ok(())
}

#[tokio::test]
async fn test_basic_arguments() -> Result<()> {
    let resolver = MockResolver::new(true);
    let request = DeploymentRequest::new("NFT", MintConfig::Basic);

    deploy(&request, &resolver).await?;

    let expected = vec![
        DynSolValue::String("https://example.com/".to_string()),
        DynSolValue::Address(NFT_CONSTRUCTOR_ADDRESS),
        DynSolValue::Uint(U256::from(100), 256),
    ];
    assert_eq!(resolver.calls(), vec![expected]);

    Ok(())
}

#[tokio::test]
async fn test_single_attempt() -> Result<()> {
    for succeed in [true, false] {
        let resolver = MockResolver::new(succeed);
        let request = DeploymentRequest::new("NFT", MintConfig::Basic);

        run(&request, &resolver).await;

        assert_eq!(resolver.calls().len(), 1);
    }

    Ok(())
}

#[tokio::test]
async fn test_exit_status_is_exclusive() -> Result<()> {
    for config in [MintConfig::ScheduledMint, MintConfig::Basic] {
        let request = DeploymentRequest::new("NFT", config);

        let (code, ..) = run(&request, &MockResolver::new(true)).await;
        assert_eq!(code, EXIT_SUCCESS);
        assert_ne!(code, EXIT_FAILURE);

        let (code, ..) = run(&request, &MockResolver::new(false)).await;
        assert_eq!(code, EXIT_FAILURE);
        assert_ne!(code, EXIT_SUCCESS);
    }

    Ok(())
}

#[tokio::test]
async fn test_deployment_recorded() -> Result<()> {
    let dir = TempDir::new()?;
    let path = dir.path().join("deployments.json");
    let resolver = MockResolver::new(true);
    let request = DeploymentRequest::new("NFT", MintConfig::Basic);

    let mut out = Vec::new();
    deploy_and_report(&request, &resolver, Some(path.as_path()), &mut out).await?;

    assert_eq!(read_deployed_address(&path, "NFT")?, DEPLOYED_ADDRESS);

    Ok(())
}

#[tokio::test]
async fn test_failed_deployment_not_recorded() -> Result<()> {
    let dir = TempDir::new()?;
    let path = dir.path().join("deployments.json");
    let resolver = MockResolver::new(false);
    let request = DeploymentRequest::new("NFT", MintConfig::Basic);

    let mut out = Vec::new();
    let res = deploy_and_report(&request, &resolver, Some(path.as_path()), &mut out).await;

    assert!(res.is_err());
    assert!(!path.exists());

    Ok(())
}

#[tokio::test]
async fn test_unrecorded_deployment_still_succeeds() -> Result<()> {
    let dir = TempDir::new()?;
    let resolver = MockResolver::new(true);
    let request = DeploymentRequest::new("NFT", MintConfig::Basic);

    // A directory cannot be written as the deployments file
    let mut out = Vec::new();
    let mut err = Vec::new();
    let outcome = deploy_and_report(&request, &resolver, Some(dir.path()), &mut out).await;
    let code = report_outcome(outcome, &mut err);

    assert_eq!(code, EXIT_SUCCESS);
    assert_eq!(
        String::from_utf8(out)?,
        "NFT deployed to: 0x5FbDB2315678afecb367f032d93F642f64180aa3\n"
    );
    assert!(err.is_empty());
    assert_eq!(resolver.calls().len(), 1);

    Ok(())
}
