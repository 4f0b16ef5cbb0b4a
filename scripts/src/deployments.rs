//! The deployments file, recording the address of every contract deployed by
//! the scripts on each network so that redeploying an unchanged contract is a
//! no-op

use std::{collections::BTreeMap, fs, path::Path};

use alloy_primitives::{keccak256, Address, B256};
use serde::{Deserialize, Serialize};

use crate::errors::ScriptError;

/// A record of a single contract deployment
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentRecord {
    /// The address at which the contract was deployed
    pub address: Address,
    /// The hash of the creation bytecode and constructor arguments
    pub deploy_data_hash: B256,
}

/// The deployments recorded on a single network, keyed by contract name
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkDeployments {
    /// The recorded deployments
    #[serde(default)]
    deployments: BTreeMap<String, DeploymentRecord>,
}

/// The contents of a deployments file, keyed by chain id.
///
/// A record only ever applies to the network it was made on, the same
/// signer and nonce yield the same address on every fresh devnet.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Deployments {
    /// The deployments of each network
    networks: BTreeMap<u64, NetworkDeployments>,
}

impl Deployments {
    /// Load the deployments file at the given path, or an empty set of
    /// deployments if the file does not exist yet
    pub fn load(path: &Path) -> Result<Self, ScriptError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents =
            fs::read_to_string(path).map_err(|e| ScriptError::ReadDeployments(e.to_string()))?;
        serde_json::from_str(&contents).map_err(|e| ScriptError::ReadDeployments(e.to_string()))
    }

    /// Write the deployments to the file at the given path
    pub fn save(&self, path: &Path) -> Result<(), ScriptError> {
        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| ScriptError::WriteDeployments(e.to_string()))?;
        fs::write(path, contents).map_err(|e| ScriptError::WriteDeployments(e.to_string()))
    }

    /// Get the deployment record of the given contract on the given chain
    pub fn get(&self, chain_id: u64, contract: &str) -> Option<&DeploymentRecord> {
        self.networks
            .get(&chain_id)
            .and_then(|network| network.deployments.get(contract))
    }

    /// Get the address of the given contract on the given chain, failing if
    /// it was never deployed there
    pub fn address(&self, chain_id: u64, contract: &str) -> Result<Address, ScriptError> {
        self.get(chain_id, contract)
            .map(|record| record.address)
            .ok_or_else(|| {
                ScriptError::ReadDeployments(format!(
                    "no deployment recorded for {contract} on chain {chain_id}"
                ))
            })
    }

    /// Get the address of a previous deployment of the contract on the given
    /// chain, if one was recorded with the same bytecode and constructor
    /// arguments
    pub fn find(&self, chain_id: u64, contract: &str, deploy_data_hash: B256) -> Option<Address> {
        self.get(chain_id, contract)
            .filter(|record| record.deploy_data_hash == deploy_data_hash)
            .map(|record| record.address)
    }

    /// Record a deployment, replacing any previous record for the contract on
    /// the same chain
    pub fn record(
        &mut self,
        chain_id: u64,
        contract: &str,
        address: Address,
        deploy_data_hash: B256,
    ) {
        self.networks.entry(chain_id).or_default().deployments.insert(
            contract.to_string(),
            DeploymentRecord {
                address,
                deploy_data_hash,
            },
        );
    }
}

/// Hash the creation bytecode of a contract together with its encoded
/// constructor arguments
pub fn deploy_data_hash(bytecode: &[u8], constructor_args: &[u8]) -> B256 {
    let mut deploy_data = Vec::with_capacity(bytecode.len() + constructor_args.len());
    deploy_data.extend_from_slice(bytecode);
    deploy_data.extend_from_slice(constructor_args);
    keccak256(deploy_data)
}
