use cosmos_quickstart::{execute, Config, CosmosClient};
use std::io;
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() {
    let subscriber = FmtSubscriber::builder().with_writer(io::stderr).finish();
    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    let mut stdout = io::stdout();
    execute(
        Config::from_env(),
        |config| CosmosClient::builder(config).build(),
        &mut stdout,
    )
    .await;
}
