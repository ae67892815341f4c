//! Definitions of CLI arguments and commands for the deploy scripts

use std::{io::Write, path::PathBuf};

use clap::{error::ErrorKind, Args, Parser, Subcommand};

use crate::{
    artifacts::ArtifactStore,
    commands::{deploy_and_report, list_accounts, EXIT_FAILURE, EXIT_SUCCESS},
    constants::{DEFAULT_ARTIFACTS_DIR, DEFAULT_BLUEPRINT},
    errors::ScriptError,
    factory::ArtifactResolver,
    networks::{Network, NetworkProfile},
    types::{DeploymentRequest, MintConfig},
    utils::setup_client,
};

/// Deploy the NFT contract to an EVM chain
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// The network profile to use
    #[arg(short, long, env = "NETWORK", value_enum, default_value_t = Network::Hardhat)]
    pub network: Network,

    /// Network RPC URL, overrides the profile's URL
    #[arg(short, long, env = "RPC_URL")]
    pub rpc_url: Option<String>,

    /// Private key of the deployer
    #[arg(short, long, env = "PRIVATE_KEY", hide_env_values = true)]
    pub priv_key: Option<String>,

    /// Infura API key, used to build the URL of public networks
    #[arg(long, env = "INFURA_API_KEY", hide_env_values = true)]
    pub infura_api_key: Option<String>,

    /// Directory containing the compiled contract artifacts
    #[arg(short, long, default_value = DEFAULT_ARTIFACTS_DIR)]
    pub artifacts: PathBuf,

    /// The command to run
    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Resolve the network profile and run the selected command
    pub async fn run(self, out: &mut impl Write) -> Result<(), ScriptError> {
        let profile = NetworkProfile::resolve(
            self.network,
            self.rpc_url.as_deref(),
            self.priv_key.as_deref(),
            self.infura_api_key.as_deref(),
        )?;

        self.command.run(&profile, self.artifacts, out).await
    }
}

/// The exit status for a command line that could not be parsed.
///
/// Help and version requests surface as parse errors but are not failures.
pub fn usage_error_status(err: &clap::Error) -> u8 {
    match err.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => EXIT_SUCCESS,
        _ => EXIT_FAILURE,
    }
}

/// The commands the scripts support
#[derive(Subcommand)]
pub enum Command {
    /// Deploy a blueprint with one of the named constructor configurations
    Deploy(DeployArgs),
    /// Print the accounts configured for the network
    Accounts,
}

impl Command {
    /// Run the command against the given network
    pub async fn run(
        self,
        profile: &NetworkProfile,
        artifacts: PathBuf,
        out: &mut impl Write,
    ) -> Result<(), ScriptError> {
        match self {
            Command::Deploy(args) => {
                let client = setup_client(profile).await?;
                let resolver = ArtifactResolver::new(ArtifactStore::new(artifacts), client);
                let request = DeploymentRequest::new(args.blueprint, args.config);

                deploy_and_report(&request, &resolver, args.deployments_path.as_deref(), out)
                    .await
                    .map(|_| ())
            }
            Command::Accounts => list_accounts(profile, out),
        }
    }
}

/// Deploy a blueprint
#[derive(Args)]
pub struct DeployArgs {
    /// The constructor argument list to deploy with
    #[arg(short, long, value_enum)]
    pub config: MintConfig,

    /// The blueprint to deploy, either a contract name or a fully qualified
    /// `<source>:<contract>` name
    #[arg(short, long, default_value = DEFAULT_BLUEPRINT)]
    pub blueprint: String,

    /// A JSON file to record the deployed address in
    #[arg(short, long)]
    pub deployments_path: Option<PathBuf>,
}
