//! Named network profiles the scripts can deploy to

use std::{
    fmt::{self, Display},
    str::FromStr,
};

use alloy::{
    primitives::Address,
    signers::local::{coins_bip39::English, MnemonicBuilder, PrivateKeySigner},
};
use clap::ValueEnum;

use crate::{
    constants::{
        DEV_ACCOUNT_COUNT, DEV_MNEMONIC, LOCAL_CHAIN_ID, LOCAL_NODE_URL, MAINNET_CHAIN_ID,
        MAINNET_INFURA_URL, RINKEBY_CHAIN_ID, RINKEBY_INFURA_URL,
    },
    errors::ScriptError,
};

/// The networks a profile exists for
#[derive(ValueEnum, Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Network {
    /// A local development node
    #[default]
    Hardhat,
    /// The Rinkeby testnet
    Rinkeby,
    /// Ethereum mainnet
    Mainnet,
}

impl Network {
    /// The chain ID the network's node is expected to report
    pub fn chain_id(&self) -> u64 {
        match self {
            Network::Hardhat => LOCAL_CHAIN_ID,
            Network::Rinkeby => RINKEBY_CHAIN_ID,
            Network::Mainnet => MAINNET_CHAIN_ID,
        }
    }

    /// The Infura endpoint for a public network, `None` for the local node
    fn infura_url(&self) -> Option<&'static str> {
        match self {
            Network::Hardhat => None,
            Network::Rinkeby => Some(RINKEBY_INFURA_URL),
            Network::Mainnet => Some(MAINNET_INFURA_URL),
        }
    }
}

impl Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Network::Hardhat => write!(f, "hardhat"),
            Network::Rinkeby => write!(f, "rinkeby"),
            Network::Mainnet => write!(f, "mainnet"),
        }
    }
}

/// A resolved network profile: where to connect and who signs
#[derive(Clone, Debug)]
pub struct NetworkProfile {
    /// The network this profile is for
    pub network: Network,
    /// The RPC URL of the network
    pub url: String,
    /// The chain ID the node must report
    pub chain_id: u64,
    /// The signers available on the network, deployer first
    pub accounts: Vec<PrivateKeySigner>,
}

impl NetworkProfile {
    /// Build the profile for `network` from the externally supplied settings.
    ///
    /// `rpc_url` overrides the network's default URL. Public networks need a
    /// private key, and an Infura API key unless an RPC URL is given.
    pub fn resolve(
        network: Network,
        rpc_url: Option<&str>,
        priv_key: Option<&str>,
        infura_api_key: Option<&str>,
    ) -> Result<Self, ScriptError> {
        let url = match (rpc_url, network.infura_url()) {
            (Some(url), _) => url.to_string(),
            (None, None) => LOCAL_NODE_URL.to_string(),
            (None, Some(infura_url)) => {
                let key = infura_api_key.ok_or_else(|| {
                    ScriptError::Config(format!(
                        "an Infura API key or RPC URL is required for {network}"
                    ))
                })?;
                format!("{infura_url}{key}")
            }
        };

        let accounts = match (priv_key, network) {
            (Some(key), _) => {
                let signer = PrivateKeySigner::from_str(key)
                    .map_err(|e| ScriptError::Config(e.to_string()))?;
                vec![signer]
            }
            (None, Network::Hardhat) => dev_accounts()?,
            (None, _) => {
                return Err(ScriptError::Config(format!(
                    "a private key is required for {network}"
                )))
            }
        };

        Ok(Self {
            network,
            url,
            chain_id: network.chain_id(),
            accounts,
        })
    }

    /// The signer deployments are sent from
    pub fn deployer(&self) -> Result<PrivateKeySigner, ScriptError> {
        self.accounts.first().cloned().ok_or_else(|| {
            ScriptError::Config(format!("no accounts configured for {}", self.network))
        })
    }

    /// The addresses of the configured signers
    pub fn addresses(&self) -> Vec<Address> {
        self.accounts.iter().map(PrivateKeySigner::address).collect()
    }

    /// Check the chain ID reported by the node against the profile
    pub fn check_chain_id(&self, reported: u64) -> Result<(), ScriptError> {
        if reported != self.chain_id {
            return Err(ScriptError::Config(format!(
                "{} expects chain ID {} but the node at {} reported {}",
                self.network, self.chain_id, self.url, reported
            )));
        }

        Ok(())
    }
}

/// The accounts a local development node funds, in derivation order
fn dev_accounts() -> Result<Vec<PrivateKeySigner>, ScriptError> {
    (0..DEV_ACCOUNT_COUNT)
        .map(|index| {
            MnemonicBuilder::<English>::default()
                .phrase(DEV_MNEMONIC)
                .index(index)
                .and_then(|builder| builder.build())
                .map_err(|e| ScriptError::Config(e.to_string()))
        })
        .collect()
}
