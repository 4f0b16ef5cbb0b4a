//! Implementations of the deploy scripts

use alloy_primitives::{Address, U256};
use alloy_sol_types::SolValue;
use tracing::{debug, info};

use crate::{
    constants::{
        DEFAULT_DOMAIN_NAME, ENS_DAO_REGISTRAR_CONTRACT, ENS_DAO_TOKEN_CONTRACT,
        ENS_DEPLOYER_CONTRACT, ENS_LABEL_BOOKER_CONTRACT, FULL_STACK_TOKEN_SYMBOL,
    },
    deployer::Deployer,
    errors::ScriptError,
    solidity::{IENSDaoToken, IENSDeployer, IENSLabelBooker},
    types::{
        ContractRole, DeployedContracts, EnsDaoConfig, EnsDaoContracts, EnsFullConfig,
        EnsFullDeployment, WiringStep,
    },
    utils::eth_node,
};

// -----------
// | ENS DAO |
// -----------

/// Deploy the ENS DAO token, label booker and registrar, and grant the
/// registrar the right to book labels and mint tokens.
///
/// Each deployment and transaction is awaited before the next one is issued,
/// as the registrar's constructor references the token and label booker and
/// the wiring transactions reference the registrar.
///
/// If a wiring transaction fails, the contracts remain deployed and an
/// [`ScriptError::IncompleteSetup`] error carrying their addresses is
/// returned.
pub async fn deploy_ens_dao<D: Deployer>(
    deployer: &mut D,
    config: EnsDaoConfig,
) -> Result<EnsDaoContracts, ScriptError> {
    let params = config.resolve(deployer.signer())?;
    let node = eth_node(&params.name)?;
    debug!("deploying ENS DAO for {}.eth (node {})", params.name, node);

    let token_args = (
        params.token_name(),
        params.symbol.clone(),
        params.base_uri.clone(),
        params.owner,
    )
        .abi_encode_params();
    let token = deployer.deploy(ENS_DAO_TOKEN_CONTRACT, token_args).await?;

    let label_booker_args = (params.ens, node, params.owner).abi_encode_params();
    let label_booker = deployer
        .deploy(ENS_LABEL_BOOKER_CONTRACT, label_booker_args)
        .await?;

    let registrar_args = (
        params.ens,
        params.resolver,
        params.name_wrapper,
        token,
        label_booker,
        node,
        params.name.clone(),
        params.owner,
        U256::from(params.reservation_duration),
    )
        .abi_encode_params();
    let registrar = deployer
        .deploy(ENS_DAO_REGISTRAR_CONTRACT, registrar_args)
        .await?;

    let contracts = EnsDaoContracts {
        registrar,
        token,
        label_booker,
    };

    deployer
        .send_call(label_booker, IENSLabelBooker::setRegistrarCall { registrar })
        .await
        .map_err(|e| incomplete_setup(WiringStep::LabelBookerRegistrar, contracts, e))?;

    deployer
        .send_call(token, IENSDaoToken::setMinterCall { minter: registrar })
        .await
        .map_err(|e| incomplete_setup(WiringStep::TokenMinter, contracts, e))?;

    if params.log {
        info!("Deployed ENS DAO Token: {:#x}", token);
        info!("Deployed ENS DAO Label Booker: {:#x}", label_booker);
        info!("Deployed ENS DAO Registrar: {:#x}", registrar);
    }

    Ok(contracts)
}

/// Check that the label booker and the token both grant their role to the
/// registrar
pub async fn verify_ens_dao_wiring<D: Deployer>(
    deployer: &D,
    contracts: &EnsDaoContracts,
) -> Result<(), ScriptError> {
    let booker_registrar = deployer
        .read_call(contracts.label_booker, IENSLabelBooker::registrarCall {})
        .await?
        ._0;
    check_wiring(
        WiringStep::LabelBookerRegistrar,
        contracts.registrar,
        booker_registrar,
    )?;

    let token_minter = deployer
        .read_call(contracts.token, IENSDaoToken::minterCall {})
        .await?
        ._0;
    check_wiring(WiringStep::TokenMinter, contracts.registrar, token_minter)
}

/// Wrap the failure of a wiring transaction
fn incomplete_setup(
    step: WiringStep,
    contracts: EnsDaoContracts,
    err: ScriptError,
) -> ScriptError {
    ScriptError::IncompleteSetup {
        step,
        contracts,
        reason: err.to_string(),
    }
}

/// Compare a role read back from a contract against the registrar
fn check_wiring(step: WiringStep, expected: Address, actual: Address) -> Result<(), ScriptError> {
    if expected != actual {
        return Err(ScriptError::WiringMismatch {
            step,
            expected,
            actual,
        });
    }

    Ok(())
}

// -------------------
// | Full ENS Stack |
// -------------------

/// Deploy a full ENS stack through the aggregate ENS deployer, and optionally
/// the ENS DAO on top of it.
///
/// The DAO is always deployed for the `sismo.eth` domain, against the
/// registry, public resolver and name wrapper resolved from the aggregate
/// deployer.
pub async fn deploy_ens_full<D: Deployer>(
    deployer: &mut D,
    config: EnsFullConfig,
) -> Result<EnsFullDeployment, ScriptError> {
    let ens_deployer = deployer.deploy(ENS_DEPLOYER_CONTRACT, Vec::new()).await?;

    let registry = deployer
        .read_call(ens_deployer, IENSDeployer::ensCall {})
        .await?
        ._0;
    let registrar = deployer
        .read_call(ens_deployer, IENSDeployer::ethRegistrarCall {})
        .await?
        ._0;
    let reverse_registrar = deployer
        .read_call(ens_deployer, IENSDeployer::reverseRegistrarCall {})
        .await?
        ._0;
    let public_resolver = deployer
        .read_call(ens_deployer, IENSDeployer::publicResolverCall {})
        .await?
        ._0;
    let name_wrapper = deployer
        .read_call(ens_deployer, IENSDeployer::nameWrapperCall {})
        .await?
        ._0;

    let mut contracts = DeployedContracts::default();
    contracts.insert(ContractRole::Registry, registry);
    contracts.insert(ContractRole::Registrar, registrar);
    contracts.insert(ContractRole::ReverseRegistrar, reverse_registrar);
    contracts.insert(ContractRole::PublicResolver, public_resolver);
    contracts.insert(ContractRole::NameWrapper, name_wrapper);

    if config.log {
        info!("Deployed by {:#x}", deployer.signer());
        info!("ensDeployer: {:#x}", ens_deployer);
        for (role, address) in contracts.iter() {
            info!("{}: {:#x}", role, address);
        }
    }

    if config.ens_dao {
        let dao_config = EnsDaoConfig {
            ens: Some(registry),
            resolver: Some(public_resolver),
            name_wrapper: Some(name_wrapper),
            name: Some(DEFAULT_DOMAIN_NAME.to_string()),
            symbol: Some(FULL_STACK_TOKEN_SYMBOL.to_string()),
            log: config.log,
            ..Default::default()
        };

        let dao = deploy_ens_dao(deployer, dao_config).await?;
        contracts.extend(dao.into());
    }

    Ok(EnsFullDeployment {
        ens_deployer,
        contracts,
    })
}
