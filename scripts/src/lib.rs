//! Scripts for deploying and wiring the ENS DAO contracts.

#![deny(missing_docs)]
#![deny(clippy::missing_docs_in_private_items)]

pub mod cli;
pub mod commands;
pub mod constants;
pub mod deployer;
pub mod deployments;
pub mod errors;
mod solidity;
pub mod types;
pub mod utils;

#[cfg(test)]
mod test_utils;
