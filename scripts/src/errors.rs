//! Definitions of errors that can occur during the execution of the deploy scripts

use std::{
    error::Error,
    fmt::{self, Display, Formatter},
};

use alloy_primitives::Address;

use crate::types::{EnsDaoContracts, WiringStep};

/// Errors that can occur during the execution of the deploy scripts
#[derive(Debug)]
pub enum ScriptError {
    /// A required input was not provided
    MissingInput(&'static str),
    /// An input could not be parsed or is malformed
    InvalidInput(String),
    /// Error initializing the RPC client
    ClientInitialization(String),
    /// Error reading a compiled contract artifact
    ReadArtifact(String),
    /// Error parsing a compiled contract artifact
    ArtifactParsing(String),
    /// Error reading the `deployments.json` file
    ReadDeployments(String),
    /// Error writing the `deployments.json` file
    WriteDeployments(String),
    /// Error deploying a contract
    ContractDeployment(String),
    /// Error calling a contract method
    ContractInteraction(String),
    /// Error decoding the return data of a contract call
    CallDecoding(String),
    /// The contracts were deployed but a wiring transaction failed,
    /// leaving the roles between them unset
    IncompleteSetup {
        /// The wiring step that failed
        step: WiringStep,
        /// The contracts that were deployed before the failure
        contracts: EnsDaoContracts,
        /// The underlying failure
        reason: String,
    },
    /// A role read back from a deployed contract does not point at the registrar
    WiringMismatch {
        /// The role that was checked
        step: WiringStep,
        /// The registrar address the role should hold
        expected: Address,
        /// The address the role actually holds
        actual: Address,
    },
}

impl Display for ScriptError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ScriptError::MissingInput(s) => write!(f, "missing required input: {}", s),
            ScriptError::InvalidInput(s) => write!(f, "invalid input: {}", s),
            ScriptError::ClientInitialization(s) => write!(f, "error initializing client: {}", s),
            ScriptError::ReadArtifact(s) => write!(f, "error reading artifact: {}", s),
            ScriptError::ArtifactParsing(s) => write!(f, "error parsing artifact: {}", s),
            ScriptError::ReadDeployments(s) => write!(f, "error reading deployments: {}", s),
            ScriptError::WriteDeployments(s) => write!(f, "error writing deployments: {}", s),
            ScriptError::ContractDeployment(s) => write!(f, "error deploying contract: {}", s),
            ScriptError::ContractInteraction(s) => {
                write!(f, "error interacting with contract: {}", s)
            }
            ScriptError::CallDecoding(s) => write!(f, "error decoding call result: {}", s),
            ScriptError::IncompleteSetup {
                step,
                contracts,
                reason,
            } => write!(
                f,
                "incomplete setup, {} failed after deploying token {:#x}, label booker {:#x}, \
                 registrar {:#x}: {}",
                step, contracts.token, contracts.label_booker, contracts.registrar, reason
            ),
            ScriptError::WiringMismatch {
                step,
                expected,
                actual,
            } => write!(
                f,
                "{} not wired: expected {:#x}, found {:#x}",
                step, expected, actual
            ),
        }
    }
}

impl Error for ScriptError {}
