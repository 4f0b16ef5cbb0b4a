//! The chain access used by the deploy scripts, and its RPC implementation

use std::path::PathBuf;
use std::str::FromStr;

use alloy::{
    network::{EthereumWallet, TransactionBuilder},
    providers::{DynProvider, Provider, ProviderBuilder},
    rpc::types::TransactionRequest,
    signers::local::PrivateKeySigner,
    transports::http::reqwest::Url,
};
use alloy_primitives::{Address, Bytes};
use alloy_sol_types::SolCall;
use tracing::{debug, info, warn};

use crate::{
    deployments::{deploy_data_hash, Deployments},
    errors::ScriptError,
    utils::read_artifact_bytecode,
};

/// The operations the deploy scripts perform against a chain.
///
/// Every method resolves only once its effects are final, i.e. deployments
/// and transactions have been included in a block, so that callers can issue
/// dependent operations strictly in sequence.
#[allow(async_fn_in_trait)]
pub trait Deployer {
    /// The address of the account signing deployments and transactions
    fn signer(&self) -> Address;

    /// The id of the chain deployed to
    fn chain_id(&self) -> u64;

    /// The deployments recorded so far, across all chains
    fn deployments(&self) -> &Deployments;

    /// A mutable reference to the recorded deployments
    fn deployments_mut(&mut self) -> &mut Deployments;

    /// Persist the recorded deployments
    fn save_deployments(&self) -> Result<(), ScriptError>;

    /// The creation bytecode of the named contract
    fn bytecode(&self, contract: &str) -> Result<Bytes, ScriptError>;

    /// Whether code is deployed at the given address
    async fn has_code(&self, address: Address) -> Result<bool, ScriptError>;

    /// Send a contract creation transaction, returning the address of the
    /// created contract
    async fn create(
        &mut self,
        contract: &str,
        bytecode: Bytes,
        constructor_args: Vec<u8>,
    ) -> Result<Address, ScriptError>;

    /// Send a transaction with the given calldata, waiting for a successful
    /// receipt
    async fn send(&mut self, to: Address, calldata: Vec<u8>) -> Result<(), ScriptError>;

    /// Execute a read-only call, returning the raw return data
    async fn call(&self, to: Address, calldata: Vec<u8>) -> Result<Bytes, ScriptError>;

    /// Deploy the named contract with the given ABI-encoded constructor
    /// arguments, returning its address.
    ///
    /// If the contract was already deployed on this chain with the same
    /// bytecode and arguments, and code is still deployed at the recorded
    /// address, that address is returned and nothing is sent. Otherwise the
    /// contract is created and the record replaced.
    async fn deploy(
        &mut self,
        contract: &str,
        constructor_args: Vec<u8>,
    ) -> Result<Address, ScriptError> {
        let bytecode = self.bytecode(contract)?;
        let hash = deploy_data_hash(&bytecode, &constructor_args);
        let chain_id = self.chain_id();

        // A local devnet may have been restarted since the record was written
        if let Some(address) = self.deployments().find(chain_id, contract, hash) {
            if self.has_code(address).await? {
                debug!("reusing {} deployed at {:#x}", contract, address);
                return Ok(address);
            }
            warn!("{} recorded at {:#x} has no code, redeploying", contract, address);
        }

        let address = self.create(contract, bytecode, constructor_args).await?;
        debug!("deployed {} at {:#x}", contract, address);

        self.deployments_mut()
            .record(chain_id, contract, address, hash);
        self.save_deployments()?;

        Ok(address)
    }

    /// Send a transaction invoking the given contract method
    async fn send_call<C: SolCall>(&mut self, to: Address, call: C) -> Result<(), ScriptError> {
        self.send(to, call.abi_encode()).await
    }

    /// Invoke the given view method, decoding its return data
    async fn read_call<C: SolCall>(&self, to: Address, call: C) -> Result<C::Return, ScriptError> {
        let data = self.call(to, call.abi_encode()).await?;
        C::abi_decode_returns(&data, true /* validate */)
            .map_err(|e| ScriptError::CallDecoding(e.to_string()))
    }
}

/// Sets up an RPC client signing with the given private key
pub fn setup_client(priv_key: &str, rpc_url: &str) -> Result<(DynProvider, Address), ScriptError> {
    let signer = PrivateKeySigner::from_str(priv_key)
        .map_err(|e| ScriptError::ClientInitialization(e.to_string()))?;
    let signer_address = signer.address();

    let url = Url::parse(rpc_url).map_err(|e| ScriptError::ClientInitialization(e.to_string()))?;
    let provider = ProviderBuilder::new()
        .wallet(EthereumWallet::from(signer))
        .on_http(url);

    Ok((DynProvider::new(provider), signer_address))
}

/// A [`Deployer`] backed by a JSON-RPC node.
///
/// Creation bytecode is read from the artifacts directory and every
/// deployment is recorded in the deployments file, under the chain id
/// reported by the node.
pub struct RpcDeployer {
    /// The RPC client, with the signer's wallet attached
    provider: DynProvider,
    /// The address of the signer
    signer: Address,
    /// The id of the chain the node is connected to
    chain_id: u64,
    /// The directory containing the compiled contract artifacts
    artifacts_dir: PathBuf,
    /// The path of the deployments file
    deployments_path: PathBuf,
    /// The deployments recorded so far
    deployments: Deployments,
}

impl RpcDeployer {
    /// Create a new deployer, loading any deployments already recorded
    pub async fn new(
        priv_key: &str,
        rpc_url: &str,
        artifacts_dir: PathBuf,
        deployments_path: PathBuf,
    ) -> Result<Self, ScriptError> {
        let (provider, signer) = setup_client(priv_key, rpc_url)?;
        let chain_id = provider
            .get_chain_id()
            .await
            .map_err(|e| ScriptError::ClientInitialization(e.to_string()))?;
        let deployments = Deployments::load(&deployments_path)?;

        Ok(Self {
            provider,
            signer,
            chain_id,
            artifacts_dir,
            deployments_path,
            deployments,
        })
    }

    /// Log the network being deployed to and the signer's balance.
    ///
    /// Failures to query the node are logged and otherwise ignored.
    pub async fn log_network(&self) {
        info!("Deploying to chain {}", self.chain_id);

        match self.provider.get_balance(self.signer).await {
            Ok(balance) => info!("Deployer: {:#x} (balance: {} wei)", self.signer, balance),
            Err(e) => warn!("could not fetch deployer balance: {}", e),
        }
    }
}

impl Deployer for RpcDeployer {
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
        self.deployments.save(&self.deployments_path)
    }

    fn bytecode(&self, contract: &str) -> Result<Bytes, ScriptError> {
        read_artifact_bytecode(&self.artifacts_dir, contract)
    }

    async fn has_code(&self, address: Address) -> Result<bool, ScriptError> {
        let code = self
            .provider
            .get_code_at(address)
            .await
            .map_err(|e| ScriptError::ContractInteraction(e.to_string()))?;
        Ok(!code.is_empty())
    }

    async fn create(
        &mut self,
        contract: &str,
        bytecode: Bytes,
        constructor_args: Vec<u8>,
    ) -> Result<Address, ScriptError> {
        let mut deploy_code = bytecode.to_vec();
        deploy_code.extend_from_slice(&constructor_args);
        let tx = TransactionRequest::default()
            .with_from(self.signer)
            .with_deploy_code(deploy_code);

        let receipt = self
            .provider
            .send_transaction(tx)
            .await
            .map_err(|e| ScriptError::ContractDeployment(format!("{contract}: {e}")))?
            .get_receipt()
            .await
            .map_err(|e| ScriptError::ContractDeployment(format!("{contract}: {e}")))?;

        if !receipt.status() {
            return Err(ScriptError::ContractDeployment(format!(
                "{} deployment reverted in tx {:#x}",
                contract, receipt.transaction_hash
            )));
        }

        receipt.contract_address.ok_or_else(|| {
            ScriptError::ContractDeployment(format!("{contract}: no contract address in receipt"))
        })
    }

    async fn send(&mut self, to: Address, calldata: Vec<u8>) -> Result<(), ScriptError> {
        let tx = TransactionRequest::default()
            .with_from(self.signer)
            .with_to(to)
            .with_input(calldata);

        let receipt = self
            .provider
            .send_transaction(tx)
            .await
            .map_err(|e| ScriptError::ContractInteraction(e.to_string()))?
            .get_receipt()
            .await
            .map_err(|e| ScriptError::ContractInteraction(e.to_string()))?;

        if !receipt.status() {
            return Err(ScriptError::ContractInteraction(format!(
                "tx {:#x} to {:#x} reverted",
                receipt.transaction_hash, to
            )));
        }

        Ok(())
    }

    async fn call(&self, to: Address, calldata: Vec<u8>) -> Result<Bytes, ScriptError> {
        let tx = TransactionRequest::default()
            .with_from(self.signer)
            .with_to(to)
            .with_input(calldata);

        self.provider
            .call(&tx)
            .await
            .map_err(|e| ScriptError::ContractInteraction(e.to_string()))
    }
}
