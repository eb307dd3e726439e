pub mod config;
pub mod config_loader;
pub mod sector;

pub use config::{AlphaVantageConfig, AppConfig, FredConfig, PayoffConfig, ServerConfig};
pub use config_loader::ConfigLoader;
pub use sector::Sector;
