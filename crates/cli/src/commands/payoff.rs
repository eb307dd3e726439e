//! Payoff curve CLI command.
//!
//! Reads a position from a JSON file, computes its expiration P/L curve
//! and break-even prices, and prints them. No network access: when no
//! range is given, one is derived from the position's own cost basis or
//! strikes.

use anyhow::{Context, Result};
use clap::Args;
use rust_decimal::Decimal;
use stock_insight_core::ConfigLoader;
use stock_insight_payoff::{
    break_even_points, default_price_range, generate_curve, Position, PriceRange,
};

/// Arguments for the payoff command.
#[derive(Args, Debug, Clone)]
pub struct PayoffArgs {
    /// Path to a JSON file describing the position
    pub position: String,

    /// Low bound of the price range (derived from the position if omitted)
    #[arg(long)]
    pub low: Option<Decimal>,

    /// High bound of the price range (derived from the position if omitted)
    #[arg(long)]
    pub high: Option<Decimal>,

    /// Number of curve samples
    #[arg(long)]
    pub samples: Option<usize>,

    /// Print the curve as JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

/// Runs the payoff command.
///
/// # Errors
/// Returns an error if the position file cannot be read or parsed, or if
/// the position or range fails engine validation.
pub fn run_payoff(args: PayoffArgs) -> Result<()> {
    let config = ConfigLoader::load()?;

    let raw = std::fs::read_to_string(&args.position)
        .with_context(|| format!("failed to read position file {}", args.position))?;
    let position: Position =
        serde_json::from_str(&raw).context("position file is not valid position JSON")?;

    let range = match (args.low, args.high) {
        (Some(low), Some(high)) => PriceRange::new(low, high)?,
        (None, None) => default_price_range(&position, None, config.payoff.default_range_pct)?,
        _ => anyhow::bail!("--low and --high must be given together"),
    };
    let samples = args.samples.unwrap_or(config.payoff.curve_samples);

    let curve = generate_curve(&position, range, samples)?;
    let break_evens = break_even_points(&position, range)?;

    if args.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({
                "low": range.low,
                "high": range.high,
                "points": curve,
                "break_evens": break_evens,
            }))?
        );
        return Ok(());
    }

    println!(
        "\nPayoff for {} over [{}, {}]",
        position.ticker, range.low, range.high
    );
    println!("{:>12} {:>14}", "Price", "P/L");
    for point in &curve {
        println!("{:>12} {:>14}", point.price.round_dp(2), point.payoff.round_dp(2));
    }

    if break_evens.is_empty() {
        println!("\nNo break-even prices inside the range.");
    } else {
        let formatted: Vec<String> = break_evens
            .iter()
            .map(|p| p.round_dp(2).to_string())
            .collect();
        println!("\nBreak-even prices: {}", formatted.join(", "));
    }

    Ok(())
}
