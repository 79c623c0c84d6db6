use anyhow::Context;
use order_server::utils::init_logger;
use order_server::{Config, Server};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env is optional; real deployments set the environment directly
    let _ = dotenvy::dotenv();

    let config = Config::from_env().context("failed to load configuration")?;
    init_logger(&config.log_level, config.log_dir.as_deref());

    tracing::info!(
        environment = %config.environment,
        port = config.http_port,
        "Order server starting"
    );

    let server = Server::new(config);
    if let Err(e) = server.run().await {
        tracing::error!("Server error: {e}");
        return Err(e).context("server terminated");
    }

    Ok(())
}
