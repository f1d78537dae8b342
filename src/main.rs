use anyhow::Result;
use tri_arb_detector::{
    aggregator::ScanReporter, cex, config::AppConfig, engine::ArbitrageEngine, utils,
};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    utils::init_logging();

    let config = AppConfig::load()?;
    tracing::info!(
        exchange_info_url = %config.exchange_info_url,
        ticker_ws_url = %config.ticker_ws_url,
        min_profit_pct = config.scan.min_profit_pct,
        history_capacity = config.scan.history_capacity,
        "[INIT] tri-arb-detector starting"
    );

    // Metadata and triangles are built once, before any tick is consumed
    let index = cex::load_metadata_index(&config.exchange_info_url).await?;
    let mut engine = ArbitrageEngine::new(index, config.scan.clone());
    tracing::info!(
        symbols = engine.symbol_count(),
        triangles = engine.triangle_count(),
        "[INIT] triangles built"
    );

    let mut reporter = ScanReporter::new(config.heartbeat_every);
    cex::run_feed(
        &config.ticker_ws_url,
        &config.reconnect,
        &mut engine,
        |engine, report| {
            reporter.observe(engine, report);
        },
        utils::shutdown_signal(),
    )
    .await?;

    tracing::info!(
        scans = reporter.scans(),
        history = engine.history_len(),
        "[INIT] terminated by user"
    );
    Ok(())
}
