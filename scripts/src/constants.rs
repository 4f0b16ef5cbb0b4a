//! Constants used in the deploy scripts

/// The name of the ENS DAO token contract artifact
pub const ENS_DAO_TOKEN_CONTRACT: &str = "ENSDaoToken";

/// The name of the ENS label booker contract artifact
pub const ENS_LABEL_BOOKER_CONTRACT: &str = "ENSLabelBooker";

/// The name of the ENS DAO registrar contract artifact
pub const ENS_DAO_REGISTRAR_CONTRACT: &str = "ENSDaoRegistrar";

/// The name of the aggregate ENS deployer contract artifact.
///
/// Constructing this contract deploys the ENS registry, the `.eth` registrar,
/// the reverse registrar, the public resolver and the name wrapper.
pub const ENS_DEPLOYER_CONTRACT: &str = "ENSDeployer";

/// The top level domain under which the DAO domain is registered
pub const ETH_TLD: &str = "eth";

/// The default `.eth` domain name of the DAO
pub const DEFAULT_DOMAIN_NAME: &str = "sismo";

/// The default symbol of the DAO token
pub const DEFAULT_TOKEN_SYMBOL: &str = "SDAO";

/// The symbol of the DAO token when deployed alongside a full ENS stack
pub const FULL_STACK_TOKEN_SYMBOL: &str = "SISMO";

/// The default metadata base URI of the DAO token
pub const DEFAULT_TOKEN_BASE_URI: &str = "https://tokens.sismo.io/";

/// The default reservation duration of the registrar, in seconds (4 weeks)
pub const DEFAULT_RESERVATION_DURATION: u64 = 4 * 7 * 24 * 3600;

/// The default path of the deployments file
pub const DEFAULT_DEPLOYMENTS_PATH: &str = "deployments.json";

/// The default directory containing the compiled contract artifacts
pub const DEFAULT_ARTIFACTS_DIR: &str = "artifacts";

/// The extension of a compiled contract artifact
pub const ARTIFACT_EXTENSION: &str = "json";

/// The bytecode key in a compiled contract artifact
pub const ARTIFACT_BYTECODE_KEY: &str = "bytecode";

/// The key under which Foundry nests the bytecode hex in an artifact
pub const ARTIFACT_BYTECODE_OBJECT_KEY: &str = "object";
