//! Type definitions used throughout the scripts

use std::fmt::{self, Display};

use alloy::{
    dyn_abi::DynSolValue,
    primitives::{Address, U256},
};
use clap::ValueEnum;

use crate::constants::{
    ALLOW_MINT_START, BASE_URI, MAX_SUPPLY, NFT_CONSTRUCTOR_ADDRESS, NOT_REVEALED_URI,
    PUBLIC_MINT_START,
};

/// The named constructor argument lists the NFT blueprint has been deployed with.
///
/// The blueprint's constructor changed between versions, so each list is
/// kept as its own configuration and one must be picked explicitly.
#[derive(ValueEnum, Copy, Clone, Debug, PartialEq, Eq)]
pub enum MintConfig {
    /// Base URI, not-revealed URI, address, max supply,
    /// allow-mint start and public-mint start
    ScheduledMint,
    /// Base URI, address and max supply
    Basic,
}

impl MintConfig {
    /// The constructor arguments for this configuration, in order
    pub fn constructor_args(&self) -> Vec<ConstructorArg> {
        match self {
            MintConfig::ScheduledMint => vec![
                ConstructorArg::String(BASE_URI.to_string()),
                ConstructorArg::String(NOT_REVEALED_URI.to_string()),
                ConstructorArg::Address(NFT_CONSTRUCTOR_ADDRESS),
                ConstructorArg::Uint(MAX_SUPPLY),
                ConstructorArg::Uint(ALLOW_MINT_START),
                ConstructorArg::Uint(PUBLIC_MINT_START),
            ],
            MintConfig::Basic => vec![
                ConstructorArg::String(BASE_URI.to_string()),
                ConstructorArg::Address(NFT_CONSTRUCTOR_ADDRESS),
                ConstructorArg::Uint(MAX_SUPPLY),
            ],
        }
    }
}

impl Display for MintConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MintConfig::ScheduledMint => write!(f, "scheduled-mint"),
            MintConfig::Basic => write!(f, "basic"),
        }
    }
}

/// A single literal constructor argument
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConstructorArg {
    /// A Solidity `string`
    String(String),
    /// A Solidity `address`
    Address(Address),
    /// A Solidity `uint256`
    Uint(u64),
}

// Integers are given full width here and narrowed to the constructor's
// parameter types when the creation code is encoded
impl From<&ConstructorArg> for DynSolValue {
    fn from(arg: &ConstructorArg) -> Self {
        match arg {
            ConstructorArg::String(s) => DynSolValue::String(s.clone()),
            ConstructorArg::Address(a) => DynSolValue::Address(*a),
            ConstructorArg::Uint(n) => DynSolValue::Uint(U256::from(*n), 256),
        }
    }
}

/// A blueprint bound to the ordered arguments it will be constructed with
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeploymentRequest {
    /// The name of the blueprint to deploy
    pub blueprint: String,
    /// The constructor arguments, in order
    pub args: Vec<ConstructorArg>,
}

impl DeploymentRequest {
    /// Bind the arguments of the given configuration to a blueprint
    pub fn new(blueprint: impl Into<String>, config: MintConfig) -> Self {
        Self {
            blueprint: blueprint.into(),
            args: config.constructor_args(),
        }
    }

    /// The constructor arguments as ABI values
    pub fn abi_values(&self) -> Vec<DynSolValue> {
        self.args.iter().map(DynSolValue::from).collect()
    }
}

/// The outcome of a confirmed deployment
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct DeploymentResult {
    /// The address of the newly created contract
    pub address: Address,
}
