//! Web API server CLI command.

use anyhow::Result;
use clap::Args;
use std::sync::Arc;
use stock_insight_analytics::AnalysisService;
use stock_insight_core::ConfigLoader;
use stock_insight_market_data::{
    AlphaVantageClient, AlphaVantageClientConfig, FredClient, FredClientConfig,
    MacroDataProvider, MarketDataProvider,
};
use stock_insight_web_api::{ApiServer, AppState};

/// Arguments for the server command.
#[derive(Args, Debug, Clone)]
pub struct ServerArgs {
    /// Server address; overrides the configured host and port
    #[arg(short, long)]
    pub addr: Option<String>,
}

/// Runs the web API server until interrupted.
///
/// # Errors
/// Returns an error if configuration or client construction fails, or if
/// the server cannot bind its address.
pub async fn run_server(args: ServerArgs) -> Result<()> {
    let config = ConfigLoader::load()?;
    let addr = args
        .addr
        .unwrap_or_else(|| format!("{}:{}", config.server.host, config.server.port));

    let market: Arc<dyn MarketDataProvider> = Arc::new(AlphaVantageClient::new(
        AlphaVantageClientConfig::from(&config.alpha_vantage),
    )?);
    let macro_data: Arc<dyn MacroDataProvider> =
        Arc::new(FredClient::new(FredClientConfig::from(&config.fred))?);

    let state = Arc::new(AppState {
        analysis: AnalysisService::new(market.clone(), macro_data),
        market,
        payoff: config.payoff,
    });

    ApiServer::new(state).serve(&addr).await
}
