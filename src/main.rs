use clap::Parser;
use lobx_agg::cli::Args;
use lobx_agg::config::Settings;
use lobx_agg::market_data::router;
use lobx_agg::telemetry;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok(); // load .env

    // bad --qty exits here with clap's usage error, never falls back to the default
    let args = Args::parse();
    let settings = Settings::load()?;

    telemetry::init_tracing(&settings.log_filter);
    telemetry::init_metrics(settings.metrics_port)?;

    let qty = args.qty.unwrap_or(settings.default_qty);
    tracing::info!(qty, asset = %settings.base_asset, "Estimating market order cost");

    let sources = router::default_sources(&settings)?;
    let estimate = router::run(&sources, qty, &settings.base_asset).await;

    println!("{}", estimate);
    Ok(())
}
