//! Definitions of CLI arguments and commands for deploy scripts

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use tracing::info;

use crate::{
    commands::{deploy_ens_dao, deploy_ens_full, verify_ens_dao_wiring},
    constants::{
        DEFAULT_ARTIFACTS_DIR, DEFAULT_DEPLOYMENTS_PATH, ENS_DAO_REGISTRAR_CONTRACT,
        ENS_DAO_TOKEN_CONTRACT, ENS_LABEL_BOOKER_CONTRACT,
    },
    deployer::{Deployer, RpcDeployer},
    errors::ScriptError,
    types::{EnsDaoConfig, EnsDaoContracts, EnsFullConfig},
    utils::parse_optional_address,
};

/// Deploy the ENS DAO contracts
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Private key of the deployer
    #[arg(short, long, env = "PKEY")]
    pub priv_key: String,

    /// Network RPC URL
    #[arg(short, long, env = "RPC_URL")]
    pub rpc_url: String,

    /// Path to a `deployments.json` file
    #[arg(short, long, default_value = DEFAULT_DEPLOYMENTS_PATH)]
    pub deployments_path: PathBuf,

    /// Directory containing the compiled contract artifacts
    #[arg(short, long, default_value = DEFAULT_ARTIFACTS_DIR)]
    pub artifacts_dir: PathBuf,

    /// The command to run
    #[command(subcommand)]
    pub command: Command,
}

/// The possible CLI commands
#[derive(Subcommand)]
pub enum Command {
    /// Deploy the ENS DAO token, label booker and registrar
    DeployEnsDao(DeployEnsDaoArgs),
    /// Deploy a full ENS stack, and optionally the ENS DAO on top of it
    DeployEnsFull(DeployEnsFullArgs),
    /// Check that the recorded ENS DAO contracts are wired to the registrar
    VerifyEnsDao,
}

impl Command {
    /// Run the command against the given deployer
    pub async fn run(self, deployer: &mut RpcDeployer) -> Result<(), ScriptError> {
        match self {
            Command::DeployEnsDao(args) => {
                if args.log {
                    deployer.log_network().await;
                }

                let config = args.into_config()?;
                deploy_ens_dao(deployer, config).await?;
            }
            Command::DeployEnsFull(args) => {
                if args.log {
                    deployer.log_network().await;
                }

                deploy_ens_full(deployer, args.into()).await?;
            }
            Command::VerifyEnsDao => {
                let chain_id = deployer.chain_id();
                let deployments = deployer.deployments();
                let contracts = EnsDaoContracts {
                    registrar: deployments.address(chain_id, ENS_DAO_REGISTRAR_CONTRACT)?,
                    token: deployments.address(chain_id, ENS_DAO_TOKEN_CONTRACT)?,
                    label_booker: deployments.address(chain_id, ENS_LABEL_BOOKER_CONTRACT)?,
                };

                verify_ens_dao_wiring(&*deployer, &contracts).await?;
                info!("ENS DAO contracts are wired to {:#x}", contracts.registrar);
            }
        }

        Ok(())
    }
}

/// Deploy the ENS DAO contracts.
///
/// The registrar is granted the right to book labels on the label booker and
/// to mint the DAO token.
#[derive(Args)]
pub struct DeployEnsDaoArgs {
    /// ENS registry address
    #[arg(long)]
    pub ens: Option<String>,

    /// Public resolver address
    #[arg(long)]
    pub resolver: Option<String>,

    /// Name wrapper address, defaults to the zero address
    #[arg(long)]
    pub name_wrapper: Option<String>,

    /// Name of the `.eth` domain, the DAO token is named `{name}.eth DAO`
    #[arg(long)]
    pub name: Option<String>,

    /// Symbol of the DAO token
    #[arg(long)]
    pub symbol: Option<String>,

    /// Metadata base URI of the DAO token
    #[arg(long)]
    pub base_uri: Option<String>,

    /// Owner of the contracts, defaults to the deployer
    #[arg(long)]
    pub owner: Option<String>,

    /// Reservation duration of the registrar, in seconds
    #[arg(long)]
    pub reservation_duration: Option<u64>,

    /// Log the deployment
    #[arg(long)]
    pub log: bool,
}

impl DeployEnsDaoArgs {
    /// Parse the arguments into a deployment configuration
    pub fn into_config(self) -> Result<EnsDaoConfig, ScriptError> {
        Ok(EnsDaoConfig {
            ens: parse_optional_address(self.ens.as_deref())?,
            resolver: parse_optional_address(self.resolver.as_deref())?,
            name_wrapper: parse_optional_address(self.name_wrapper.as_deref())?,
            name: self.name,
            symbol: self.symbol,
            base_uri: self.base_uri,
            owner: parse_optional_address(self.owner.as_deref())?,
            reservation_duration: self.reservation_duration,
            log: self.log,
        })
    }
}

/// Deploy a full ENS stack through the aggregate ENS deployer
#[derive(Args)]
pub struct DeployEnsFullArgs {
    /// Additionally deploy the ENS DAO contracts
    #[arg(long)]
    pub ens_dao: bool,

    /// Log the deployment
    #[arg(long)]
    pub log: bool,
}

impl From<DeployEnsFullArgs> for EnsFullConfig {
    fn from(args: DeployEnsFullArgs) -> Self {
        EnsFullConfig {
            ens_dao: args.ens_dao,
            log: args.log,
        }
    }
}
