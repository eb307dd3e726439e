use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub alpha_vantage: AlphaVantageConfig,
    pub fred: FredConfig,
    pub payoff: PayoffConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlphaVantageConfig {
    pub base_url: String,
    /// Usually supplied via `STOCK_INSIGHT_ALPHA_VANTAGE__API_KEY`.
    pub api_key: String,
    pub requests_per_minute: u32,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FredConfig {
    pub base_url: String,
    pub api_key: String,
    pub timeout_secs: u64,
}

/// Presentation defaults for payoff charting. The engine always takes
/// explicit ranges; these only seed the chart when the user gives none.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayoffConfig {
    /// Shares per option contract.
    pub contract_size: u32,
    /// Symmetric default chart range around the reference price, in percent.
    pub default_range_pct: Decimal,
    /// Samples per rendered curve.
    pub curve_samples: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 8080,
            },
            alpha_vantage: AlphaVantageConfig {
                base_url: "https://www.alphavantage.co/query".to_string(),
                api_key: String::new(),
                requests_per_minute: 75,
                timeout_secs: 10,
            },
            fred: FredConfig {
                base_url: "https://api.stlouisfed.org/fred".to_string(),
                api_key: String::new(),
                timeout_secs: 10,
            },
            payoff: PayoffConfig {
                contract_size: 100,
                default_range_pct: Decimal::from(50),
                curve_samples: 101,
            },
        }
    }
}
