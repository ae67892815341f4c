//! Constants used in the deploy scripts

use std::time::Duration;

use alloy::primitives::{address, Address};

/// The name of the blueprint deployed when none is given
pub const DEFAULT_BLUEPRINT: &str = "NFT";

/// The default directory holding compiled contract artifacts
pub const DEFAULT_ARTIFACTS_DIR: &str = "artifacts";

/// The extension of a compiled artifact file
pub const ARTIFACT_EXTENSION: &str = "json";

/// The extension of a Solidity source directory in the artifacts tree
pub const SOLIDITY_SOURCE_EXTENSION: &str = "sol";

/// The separator between source path and contract name in a
/// fully qualified blueprint name, e.g. `contracts/NFT.sol:NFT`
pub const FULLY_QUALIFIED_NAME_SEPARATOR: char = ':';

/// The deployments key in the deployments file
pub const DEPLOYMENTS_KEY: &str = "deployments";

// ------------
// | Networks |
// ------------

/// The URL of a locally running development node
pub const LOCAL_NODE_URL: &str = "http://127.0.0.1:8545";

/// The chain ID of a local development node
pub const LOCAL_CHAIN_ID: u64 = 31337;

/// The chain ID of Ethereum mainnet
pub const MAINNET_CHAIN_ID: u64 = 1;

/// The chain ID of the Rinkeby testnet
pub const RINKEBY_CHAIN_ID: u64 = 4;

/// The Infura endpoint for Ethereum mainnet, without the API key
pub const MAINNET_INFURA_URL: &str = "https://mainnet.infura.io/v3/";

/// The Infura endpoint for the Rinkeby testnet, without the API key
pub const RINKEBY_INFURA_URL: &str = "https://rinkeby.infura.io/v3/";

/// The mnemonic a local development node derives its funded accounts from
pub const DEV_MNEMONIC: &str = "test test test test test test test test test test test junk";

/// The number of accounts a local development node funds
pub const DEV_ACCOUNT_COUNT: u32 = 20;

/// The interval between polls for a deployment's receipt
pub const RECEIPT_POLL_INTERVAL: Duration = Duration::from_millis(500);

// ------------------------
// | Constructor literals |
// ------------------------

/// The base token URI the collection is deployed with
pub const BASE_URI: &str = "https://example.com/";

/// The URI served for tokens before the collection is revealed
pub const NOT_REVEALED_URI: &str = "https://example.com/";

/// The address passed to the NFT constructor
pub const NFT_CONSTRUCTOR_ADDRESS: Address = address!("a6431d80240c3a3fef54dd2179b2bdc13feec467");

/// The maximum number of tokens in the collection
pub const MAX_SUPPLY: u64 = 100;

/// The start of the allow-list mint, 2022-04-19 00:00:00 UTC
pub const ALLOW_MINT_START: u64 = 1650326400;

/// The start of the public mint, 2022-04-20 00:00:00 UTC
pub const PUBLIC_MINT_START: u64 = 1650412800;
