use std::process;

use clap::Parser;
use deploy_scripts::{
    artifacts::ArtifactDirectory, cli::Cli, client::setup_client, constants::PROXY_CONTRACT,
};
use tracing::error;

#[tokio::main]
async fn main() {
    let Cli {
        priv_key,
        rpc_url,
        artifacts,
        proxy_artifact,
        deployments,
        command,
    } = Cli::parse();

    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    let registry =
        ArtifactDirectory::new(artifacts).with_artifact(PROXY_CONTRACT, proxy_artifact);
    let res = match setup_client(&priv_key, &rpc_url).await {
        Ok(client) => command.run(&client, &registry, deployments).await,
        Err(e) => Err(e),
    };

    if let Err(e) = res {
        error!("{e}");
        process::exit(1);
    }
}
