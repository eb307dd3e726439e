//! CLI commands for the stock insight dashboard.

pub mod analyze;
pub mod payoff;
pub mod server;

pub use analyze::{run_analyze, AnalyzeArgs};
pub use payoff::{run_payoff, PayoffArgs};
pub use server::{run_server, ServerArgs};
