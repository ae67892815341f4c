//! Scripts for deploying the NFT contract.

#![deny(missing_docs)]
#![deny(clippy::missing_docs_in_private_items)]

pub mod artifacts;
pub mod cli;
pub mod commands;
pub mod constants;
pub mod errors;
pub mod factory;
pub mod networks;
pub mod types;
pub mod utils;
