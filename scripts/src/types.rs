//! Type definitions used throughout the scripts

use std::{
    collections::BTreeMap,
    fmt::{self, Display},
};

use alloy_primitives::Address;

use crate::{
    constants::{
        DEFAULT_DOMAIN_NAME, DEFAULT_RESERVATION_DURATION, DEFAULT_TOKEN_BASE_URI,
        DEFAULT_TOKEN_SYMBOL,
    },
    errors::ScriptError,
};

// ------------------
// | Configurations |
// ------------------

/// The configuration of an ENS DAO deployment, as provided by the caller.
///
/// Every field but `ens` and `resolver` is optional and falls back to a
/// default when the configuration is resolved:
/// - `name_wrapper`: the zero address, i.e. no name wrapper support
/// - `name`: [`DEFAULT_DOMAIN_NAME`]
/// - `symbol`: [`DEFAULT_TOKEN_SYMBOL`]
/// - `base_uri`: [`DEFAULT_TOKEN_BASE_URI`]
/// - `owner`: the address of the signer deploying the contracts
/// - `reservation_duration`: [`DEFAULT_RESERVATION_DURATION`] (4 weeks)
#[derive(Clone, Debug, Default)]
pub struct EnsDaoConfig {
    /// The ENS registry address
    pub ens: Option<Address>,
    /// The public resolver address
    pub resolver: Option<Address>,
    /// The name wrapper address
    pub name_wrapper: Option<Address>,
    /// The name of the `.eth` domain, the token is named `{name}.eth DAO`
    pub name: Option<String>,
    /// The symbol of the DAO token
    pub symbol: Option<String>,
    /// The metadata base URI of the DAO token
    pub base_uri: Option<String>,
    /// The owner of the deployed contracts
    pub owner: Option<Address>,
    /// The reservation duration of the registrar, in seconds
    pub reservation_duration: Option<u64>,
    /// Whether to log the deployment
    pub log: bool,
}

impl EnsDaoConfig {
    /// Resolve the configuration against the signer, filling in defaults.
    ///
    /// Fails if the ENS registry or the resolver address is absent.
    pub fn resolve(self, signer: Address) -> Result<EnsDaoParams, ScriptError> {
        let ens = self.ens.ok_or(ScriptError::MissingInput("ens"))?;
        let resolver = self.resolver.ok_or(ScriptError::MissingInput("resolver"))?;

        Ok(EnsDaoParams {
            ens,
            resolver,
            name_wrapper: self.name_wrapper.unwrap_or(Address::ZERO),
            name: self.name.unwrap_or_else(|| DEFAULT_DOMAIN_NAME.to_string()),
            symbol: self
                .symbol
                .unwrap_or_else(|| DEFAULT_TOKEN_SYMBOL.to_string()),
            base_uri: self
                .base_uri
                .unwrap_or_else(|| DEFAULT_TOKEN_BASE_URI.to_string()),
            owner: self.owner.unwrap_or(signer),
            reservation_duration: self
                .reservation_duration
                .unwrap_or(DEFAULT_RESERVATION_DURATION),
            log: self.log,
        })
    }
}

/// A fully resolved ENS DAO deployment configuration
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EnsDaoParams {
    /// The ENS registry address
    pub ens: Address,
    /// The public resolver address
    pub resolver: Address,
    /// The name wrapper address
    pub name_wrapper: Address,
    /// The name of the `.eth` domain
    pub name: String,
    /// The symbol of the DAO token
    pub symbol: String,
    /// The metadata base URI of the DAO token
    pub base_uri: String,
    /// The owner of the deployed contracts
    pub owner: Address,
    /// The reservation duration of the registrar, in seconds
    pub reservation_duration: u64,
    /// Whether to log the deployment
    pub log: bool,
}

impl EnsDaoParams {
    /// The display name of the DAO token
    pub fn token_name(&self) -> String {
        format!("{}.eth DAO", self.name)
    }
}

/// The configuration of a full ENS stack deployment
#[derive(Clone, Copy, Debug, Default)]
pub struct EnsFullConfig {
    /// Whether to additionally deploy the ENS DAO contracts
    pub ens_dao: bool,
    /// Whether to log the deployment
    pub log: bool,
}

// ----------------------
// | Deployment Results |
// ----------------------

/// The logical role of a contract in a deployment result
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ContractRole {
    /// The ENS registry
    Registry,
    /// The `.eth` registrar
    Registrar,
    /// The reverse registrar
    ReverseRegistrar,
    /// The public resolver
    PublicResolver,
    /// The name wrapper
    NameWrapper,
    /// The ENS DAO registrar
    EnsDaoRegistrar,
    /// The ENS DAO token
    EnsDaoToken,
    /// The ENS DAO label booker
    EnsDaoLabelBooker,
}

impl Display for ContractRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContractRole::Registry => write!(f, "registry"),
            ContractRole::Registrar => write!(f, "registrar"),
            ContractRole::ReverseRegistrar => write!(f, "reverseRegistrar"),
            ContractRole::PublicResolver => write!(f, "publicResolver"),
            ContractRole::NameWrapper => write!(f, "nameWrapper"),
            ContractRole::EnsDaoRegistrar => write!(f, "ensDaoRegistrar"),
            ContractRole::EnsDaoToken => write!(f, "ensDaoToken"),
            ContractRole::EnsDaoLabelBooker => write!(f, "ensDaoLabelBooker"),
        }
    }
}

/// A set of deployed contracts, keyed by their role
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DeployedContracts(BTreeMap<ContractRole, Address>);

impl DeployedContracts {
    /// Record the address of the contract fulfilling the given role
    pub fn insert(&mut self, role: ContractRole, address: Address) {
        self.0.insert(role, address);
    }

    /// Get the address of the contract fulfilling the given role
    pub fn get(&self, role: ContractRole) -> Option<Address> {
        self.0.get(&role).copied()
    }

    /// Iterate over the contracts in role order
    pub fn iter(&self) -> impl Iterator<Item = (ContractRole, Address)> + '_ {
        self.0.iter().map(|(role, addr)| (*role, *addr))
    }

    /// Merge another set of contracts into this one
    pub fn extend(&mut self, other: DeployedContracts) {
        self.0.extend(other.0);
    }
}

/// The contracts deployed by an ENS DAO deployment.
///
/// Their ABI bindings are the `sol!` interfaces in `solidity.rs`, invoked
/// through [`Deployer::send_call`] and [`Deployer::read_call`].
///
/// [`Deployer::send_call`]: crate::deployer::Deployer::send_call
/// [`Deployer::read_call`]: crate::deployer::Deployer::read_call
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EnsDaoContracts {
    /// The ENS DAO registrar
    pub registrar: Address,
    /// The ENS DAO token
    pub token: Address,
    /// The ENS DAO label booker
    pub label_booker: Address,
}

impl From<EnsDaoContracts> for DeployedContracts {
    fn from(contracts: EnsDaoContracts) -> Self {
        let mut set = DeployedContracts::default();
        set.insert(ContractRole::EnsDaoRegistrar, contracts.registrar);
        set.insert(ContractRole::EnsDaoToken, contracts.token);
        set.insert(ContractRole::EnsDaoLabelBooker, contracts.label_booker);
        set
    }
}

/// The result of a full ENS stack deployment
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EnsFullDeployment {
    /// The aggregate deployer from which the ENS contracts were resolved
    pub ens_deployer: Address,
    /// The ENS contracts, and the ENS DAO contracts if they were deployed
    pub contracts: DeployedContracts,
}

/// A post-deployment transaction granting the registrar a role
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WiringStep {
    /// Setting the label booker's registrar
    LabelBookerRegistrar,
    /// Setting the token's minter
    TokenMinter,
}

impl Display for WiringStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WiringStep::LabelBookerRegistrar => write!(f, "label booker registrar"),
            WiringStep::TokenMinter => write!(f, "token minter"),
        }
    }
}
