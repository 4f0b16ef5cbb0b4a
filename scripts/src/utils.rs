//! Utilities for the deploy scripts.

use std::{fs, path::Path, str::FromStr};

use alloy_primitives::{keccak256, Address, Bytes, B256};
use serde_json::Value;

use crate::{
    constants::{ARTIFACT_BYTECODE_KEY, ARTIFACT_BYTECODE_OBJECT_KEY, ARTIFACT_EXTENSION, ETH_TLD},
    errors::ScriptError,
};

// ------------
// | Namehash |
// ------------

/// Compute the ENS namehash of a dot-separated domain name, as defined in
/// EIP-137.
///
/// Labels are hashed as given, the name is not normalized. The empty name
/// hashes to the zero node, any other empty label is rejected.
pub fn namehash(name: &str) -> Result<B256, ScriptError> {
    if name.is_empty() {
        return Ok(B256::ZERO);
    }

    name.rsplit('.').try_fold(B256::ZERO, |node, label| {
        if label.is_empty() {
            return Err(ScriptError::InvalidInput(format!(
                "empty label in domain name `{name}`"
            )));
        }

        let label_hash = keccak256(label.as_bytes());
        Ok(keccak256([node.as_slice(), label_hash.as_slice()].concat()))
    })
}

/// Compute the namehash of `{name}.eth`
pub fn eth_node(name: &str) -> Result<B256, ScriptError> {
    if name.is_empty() || name.contains('.') {
        return Err(ScriptError::InvalidInput(format!(
            "`{name}` is not a single domain label"
        )));
    }

    namehash(&format!("{name}.{ETH_TLD}"))
}

// -----------
// | Parsing |
// -----------

/// Parse a hex address provided on the command line
pub fn parse_address(address: &str) -> Result<Address, ScriptError> {
    Address::from_str(address)
        .map_err(|e| ScriptError::InvalidInput(format!("address `{address}`: {e}")))
}

/// Parse an optional hex address provided on the command line
pub fn parse_optional_address(address: Option<&str>) -> Result<Option<Address>, ScriptError> {
    address.map(parse_address).transpose()
}

// -------------
// | Artifacts |
// -------------

/// Read the creation bytecode of a contract from its compiled artifact.
///
/// Both the Hardhat artifact format, where `bytecode` is a hex string, and the
/// Foundry format, where the hex string is nested under `bytecode.object`, are
/// accepted.
pub fn read_artifact_bytecode(artifacts_dir: &Path, contract: &str) -> Result<Bytes, ScriptError> {
    let path = artifacts_dir
        .join(contract)
        .with_extension(ARTIFACT_EXTENSION);

    let contents = fs::read_to_string(&path)
        .map_err(|e| ScriptError::ReadArtifact(format!("{}: {}", path.display(), e)))?;
    let artifact: Value =
        serde_json::from_str(&contents).map_err(|e| ScriptError::ArtifactParsing(e.to_string()))?;

    parse_artifact_bytecode(&artifact, contract)
}

/// Extract the creation bytecode from a parsed artifact
fn parse_artifact_bytecode(artifact: &Value, contract: &str) -> Result<Bytes, ScriptError> {
    let bytecode_hex = match &artifact[ARTIFACT_BYTECODE_KEY] {
        Value::String(hex) => hex.as_str(),
        Value::Object(obj) => obj
            .get(ARTIFACT_BYTECODE_OBJECT_KEY)
            .and_then(Value::as_str)
            .ok_or_else(|| {
                ScriptError::ArtifactParsing(format!("{contract}: missing bytecode object"))
            })?,
        _ => {
            return Err(ScriptError::ArtifactParsing(format!(
                "{contract}: missing bytecode"
            )))
        }
    };

    let bytecode = Bytes::from_str(bytecode_hex)
        .map_err(|e| ScriptError::ArtifactParsing(format!("{contract}: {e}")))?;
    if bytecode.is_empty() {
        return Err(ScriptError::ArtifactParsing(format!(
            "{contract}: artifact has no creation bytecode"
        )));
    }

    Ok(bytecode)
}
