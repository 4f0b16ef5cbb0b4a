//! An in-memory chain used to test the deploy scripts

use std::{
    cell::RefCell,
    collections::{HashMap, HashSet},
};

use alloy_primitives::{Address, Bytes};
use alloy_sol_types::{SolCall, SolValue};

use crate::{
    constants::ENS_DEPLOYER_CONTRACT,
    deployer::Deployer,
    deployments::Deployments,
    errors::ScriptError,
    solidity::{IENSDaoToken, IENSDeployer, IENSLabelBooker},
};

/// The signer of the mock chain, the first default Anvil account
const MOCK_SIGNER: Address = Address::new([
    0xf3, 0x9f, 0xd6, 0xe5, 0x1a, 0xad, 0x88, 0xf6, 0xf4, 0xce, 0x6a, 0xb8, 0x82, 0x72, 0x79, 0xcf,
    0xff, 0xb9, 0x22, 0x66,
]);

/// The chain id of the mock chain, that of a local anvil node
pub const MOCK_CHAIN_ID: u64 = 31337;

/// An operation with side effects issued against the mock chain
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ChainOp {
    /// A contract deployment transaction
    Deploy(String),
    /// A transaction invoking the method with the given selector
    Send(Address, [u8; 4]),
}

/// The contracts instantiated by the aggregate ENS deployer
#[derive(Clone, Copy, Debug)]
pub struct EnsStack {
    /// The ENS registry
    pub registry: Address,
    /// The `.eth` registrar
    pub registrar: Address,
    /// The reverse registrar
    pub reverse_registrar: Address,
    /// The public resolver
    pub public_resolver: Address,
    /// The name wrapper
    pub name_wrapper: Address,
}

/// A chain that understands just enough of the ENS DAO contracts to exercise
/// the deploy scripts
pub struct MockChain {
    /// The signer's address
    signer: Address,
    /// The chain id
    chain_id: u64,
    /// The signer's nonce, used to derive contract addresses
    nonce: u64,
    /// The deployment ledger
    deployments: Deployments,
    /// The deployment ledger as of its last save
    saved: RefCell<Deployments>,
    /// The addresses holding code
    code: HashSet<Address>,
    /// The constructor arguments of the latest deployment of each contract
    constructor_args: HashMap<String, Vec<u8>>,
    /// The side-effecting operations issued so far
    ops: Vec<ChainOp>,
    /// The registrar set on each label booker
    booker_registrars: HashMap<Address, Address>,
    /// The minter set on each token
    token_minters: HashMap<Address, Address>,
    /// The stack instantiated by each aggregate deployer
    ens_stacks: HashMap<Address, EnsStack>,
    /// A contract whose deployment fails
    failing_deploy: Option<&'static str>,
    /// A method selector whose transactions fail
    failing_send: Option<[u8; 4]>,
}

impl MockChain {
    /// Create an empty chain
    pub fn new() -> Self {
        Self {
            signer: MOCK_SIGNER,
            chain_id: MOCK_CHAIN_ID,
            nonce: 0,
            deployments: Deployments::default(),
            saved: RefCell::new(Deployments::default()),
            code: HashSet::new(),
            constructor_args: HashMap::new(),
            ops: Vec::new(),
            booker_registrars: HashMap::new(),
            token_minters: HashMap::new(),
            ens_stacks: HashMap::new(),
            failing_deploy: None,
            failing_send: None,
        }
    }

    /// Create a fresh chain with the given id, reusing this chain's saved
    /// deployment ledger
    pub fn on_chain(&self, chain_id: u64) -> Self {
        let deployments = self.saved_deployments();
        Self {
            chain_id,
            saved: RefCell::new(deployments.clone()),
            deployments,
            ..Self::new()
        }
    }

    /// Remove the code deployed at an address, as a restarted devnet would
    pub fn wipe_code(&mut self, address: Address) {
        self.code.remove(&address);
    }

    /// The deployment ledger as of its last save
    pub fn saved_deployments(&self) -> Deployments {
        self.saved.borrow().clone()
    }

    /// Make deployments of the given contract fail
    pub fn fail_deploy(mut self, contract: &'static str) -> Self {
        self.failing_deploy = Some(contract);
        self
    }

    /// Make transactions invoking the given method fail
    pub fn fail_send(mut self, selector: [u8; 4]) -> Self {
        self.failing_send = Some(selector);
        self
    }

    /// The signer's address
    pub fn signer_address(&self) -> Address {
        self.signer
    }

    /// The side-effecting operations issued so far
    pub fn ops(&self) -> &[ChainOp] {
        &self.ops
    }

    /// The number of deployment transactions issued so far
    pub fn num_deployments(&self) -> usize {
        self.ops
            .iter()
            .filter(|op| matches!(op, ChainOp::Deploy(_)))
            .count()
    }

    /// The constructor arguments of the latest deployment of a contract
    pub fn constructor_args(&self, contract: &str) -> Option<Vec<u8>> {
        self.constructor_args.get(contract).cloned()
    }

    /// The registrar set on a label booker
    pub fn label_booker_registrar(&self, label_booker: Address) -> Option<Address> {
        self.booker_registrars.get(&label_booker).copied()
    }

    /// The minter set on a token
    pub fn token_minter(&self, token: Address) -> Option<Address> {
        self.token_minters.get(&token).copied()
    }

    /// The stack instantiated by an aggregate deployer
    pub fn ens_stack(&self, ens_deployer: Address) -> Option<EnsStack> {
        self.ens_stacks.get(&ens_deployer).copied()
    }

    /// Derive the address of the next contract created by `creator`
    fn next_address(&mut self, creator: Address) -> Address {
        let address = creator.create(self.nonce);
        self.nonce += 1;
        address
    }

    /// Instantiate the ENS contracts created by an aggregate deployer
    fn create_ens_stack(&mut self, ens_deployer: Address) {
        let stack = EnsStack {
            registry: self.next_address(ens_deployer),
            registrar: self.next_address(ens_deployer),
            reverse_registrar: self.next_address(ens_deployer),
            public_resolver: self.next_address(ens_deployer),
            name_wrapper: self.next_address(ens_deployer),
        };
        self.ens_stacks.insert(ens_deployer, stack);
    }
}

/// Extract the method selector from calldata
fn selector(calldata: &[u8]) -> Result<[u8; 4], ScriptError> {
    calldata
        .get(..4)
        .and_then(|s| s.try_into().ok())
        .ok_or_else(|| ScriptError::ContractInteraction("calldata too short".to_string()))
}

impl Deployer for MockChain {
    fn signer(&self) -> Address {
        self.signer
    }

    fn chain_id(&self) -> u64 {
        self.chain_id
    }

    fn deployments(&self) -> &Deployments {
        &self.deployments
    }

    fn deployments_mut(&mut self) -> &mut Deployments {
        &mut self.deployments
    }

    fn save_deployments(&self) -> Result<(), ScriptError> {
        *self.saved.borrow_mut() = self.deployments.clone();
        Ok(())
    }

    fn bytecode(&self, contract: &str) -> Result<Bytes, ScriptError> {
        // The contract name stands in for its bytecode
        Ok(Bytes::copy_from_slice(contract.as_bytes()))
    }

    async fn has_code(&self, address: Address) -> Result<bool, ScriptError> {
        Ok(self.code.contains(&address))
    }

    async fn create(
        &mut self,
        contract: &str,
        _bytecode: Bytes,
        constructor_args: Vec<u8>,
    ) -> Result<Address, ScriptError> {
        if self.failing_deploy == Some(contract) {
            return Err(ScriptError::ContractDeployment(format!("{contract} reverted")));
        }

        let address = self.next_address(self.signer);
        self.ops.push(ChainOp::Deploy(contract.to_string()));
        self.code.insert(address);
        self.constructor_args
            .insert(contract.to_string(), constructor_args);

        if contract == ENS_DEPLOYER_CONTRACT {
            self.create_ens_stack(address);
        }

        Ok(address)
    }

    async fn send(&mut self, to: Address, calldata: Vec<u8>) -> Result<(), ScriptError> {
        let selector = selector(&calldata)?;
        if self.failing_send == Some(selector) {
            return Err(ScriptError::ContractInteraction("tx reverted".to_string()));
        }

        match selector {
            IENSLabelBooker::setRegistrarCall::SELECTOR => {
                let call = IENSLabelBooker::setRegistrarCall::abi_decode(&calldata, true)
                    .map_err(|e| ScriptError::ContractInteraction(e.to_string()))?;
                self.booker_registrars.insert(to, call.registrar);
            }
            IENSDaoToken::setMinterCall::SELECTOR => {
                let call = IENSDaoToken::setMinterCall::abi_decode(&calldata, true)
                    .map_err(|e| ScriptError::ContractInteraction(e.to_string()))?;
                self.token_minters.insert(to, call.minter);
            }
            _ => {
                return Err(ScriptError::ContractInteraction(
                    "unknown method".to_string(),
                ))
            }
        }

        self.ops.push(ChainOp::Send(to, selector));
        Ok(())
    }

    async fn call(&self, to: Address, calldata: Vec<u8>) -> Result<Bytes, ScriptError> {
        let selector = selector(&calldata)?;
        let stack = self.ens_stacks.get(&to);
        let unknown = || ScriptError::ContractInteraction(format!("no such view on {to:#x}"));

        let address = match selector {
            IENSLabelBooker::registrarCall::SELECTOR => {
                self.booker_registrars.get(&to).copied().unwrap_or_default()
            }
            IENSDaoToken::minterCall::SELECTOR => {
                self.token_minters.get(&to).copied().unwrap_or_default()
            }
            IENSDeployer::ensCall::SELECTOR => stack.ok_or_else(unknown)?.registry,
            IENSDeployer::ethRegistrarCall::SELECTOR => stack.ok_or_else(unknown)?.registrar,
            IENSDeployer::reverseRegistrarCall::SELECTOR => {
                stack.ok_or_else(unknown)?.reverse_registrar
            }
            IENSDeployer::publicResolverCall::SELECTOR => {
                stack.ok_or_else(unknown)?.public_resolver
            }
            IENSDeployer::nameWrapperCall::SELECTOR => stack.ok_or_else(unknown)?.name_wrapper,
            _ => return Err(unknown()),
        };

        Ok(Bytes::from(address.abi_encode()))
    }
}
