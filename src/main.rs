use devhabit::prelude::*;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::from_env()?;

    // RUST_LOG wins over the configured level
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let module = DevHabitModule::new();
    if config.seed_demo_data {
        seed_demo_data(module.stores()).await?;
    }

    ServerBuilder::new()
        .with_config(config)
        .register_module(module)
        .serve()
        .await
}
