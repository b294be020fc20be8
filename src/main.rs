use wheelbot::alpaca::AlpacaClient;
use wheelbot::config::AppConfig;
use wheelbot::engine;
use wheelbot::journal::StrategyJournal;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = AppConfig::from_env()?;
    tracing::info!(
        live = config.live,
        symbols = config.allowed_symbols.len(),
        budget = %config.buying_power_limit,
        "Starting wheel cycle"
    );

    let broker = AlpacaClient::new(
        config.api_key_id.clone(),
        config.api_secret_key.clone(),
        config.live,
        config.strategy.max_dte,
    );
    let journal = config
        .journal_dir
        .clone()
        .map(StrategyJournal::new);

    engine::run_cycle(&broker, &config, journal.as_ref()).await;

    if let Some(journal) = &journal {
        let path = journal.save().await?;
        tracing::info!(path = %path.display(), "Run record written");
    }

    Ok(())
}

fn init_tracing() {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(fmt::layer())
        .init();
}
