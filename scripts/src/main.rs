use clap::Parser;
use ens_dao_scripts::{cli::Cli, deployer::RpcDeployer, errors::ScriptError};

#[tokio::main]
async fn main() -> Result<(), ScriptError> {
    let Cli {
        priv_key,
        rpc_url,
        deployments_path,
        artifacts_dir,
        command,
    } = Cli::parse();

    tracing_subscriber::fmt().pretty().init();

    let mut deployer = RpcDeployer::new(&priv_key, &rpc_url, artifacts_dir, deployments_path).await?;

    command.run(&mut deployer).await
}
