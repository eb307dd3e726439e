//! Ticker analysis CLI command.
//!
//! Runs the three analysis pipelines against live providers and prints the
//! report as tables, or as JSON with `--json`.

use anyhow::Result;
use clap::Args;
use std::sync::Arc;
use stock_insight_analytics::{AnalysisReport, AnalysisService, Section};
use stock_insight_analytics::macro_data::MacroReport;
use stock_insight_core::ConfigLoader;
use stock_insight_market_data::{
    AlphaVantageClient, AlphaVantageClientConfig, FredClient, FredClientConfig,
    MacroDataProvider, MarketDataProvider,
};

/// Arguments for the analyze command.
#[derive(Args, Debug, Clone)]
pub struct AnalyzeArgs {
    /// Ticker symbol to analyze (e.g., "GOOGL")
    pub ticker: String,

    /// Print the report as JSON instead of tables
    #[arg(long)]
    pub json: bool,
}

/// Runs the analyze command.
///
/// # Errors
/// Returns an error if configuration or client construction fails. Upstream
/// data failures degrade to per-section errors in the printed report.
pub async fn run_analyze(args: AnalyzeArgs) -> Result<()> {
    let config = ConfigLoader::load()?;
    tracing::info!("Analyzing {}", args.ticker);

    let market: Arc<dyn MarketDataProvider> = Arc::new(AlphaVantageClient::new(
        AlphaVantageClientConfig::from(&config.alpha_vantage),
    )?);
    let macro_data: Arc<dyn MacroDataProvider> =
        Arc::new(FredClient::new(FredClientConfig::from(&config.fred))?);

    let service = AnalysisService::new(market, macro_data);
    let report = service.analyze(&args.ticker).await;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }

    Ok(())
}

fn print_report(report: &AnalysisReport) {
    match &report.company_name {
        Some(name) => println!("\n=== {} ({}) ===", name, report.ticker),
        None => println!("\n=== {} ===", report.ticker),
    }

    print_earnings(&report.earnings);
    print_sector(&report.sector);
    print_macro(&report.macro_data);
}

fn print_earnings(section: &Section<stock_insight_analytics::EarningsReport>) {
    println!("\n--- Earnings ---");
    let Some(earnings) = &section.data else {
        print_section_error(section.error.as_deref());
        return;
    };

    println!(
        "{:<12} {:>16} {:>10} {:>10}",
        "Quarter", "Revenue", "QoQ %", "YoY %"
    );
    for row in &earnings.revenue.rows {
        println!(
            "{:<12} {:>16} {:>10} {:>10}",
            row.fiscal_date_ending,
            row.revenue,
            fmt_opt_pct(row.qoq_pct),
            fmt_opt_pct(row.yoy_pct),
        );
    }

    println!(
        "\n{:<12} {:>10} {:>10} {:>12} {:>6}",
        "Quarter", "EPS", "Estimate", "Surprise %", "Beat"
    );
    for row in &earnings.eps.rows {
        println!(
            "{:<12} {:>10} {:>10} {:>12} {:>6}",
            row.fiscal_date_ending,
            row.reported,
            row.estimated.map_or_else(|| "N/A".to_string(), |v| v.to_string()),
            fmt_opt_pct(row.surprise_pct),
            match row.beat {
                Some(true) => "yes",
                Some(false) => "no",
                None => "-",
            },
        );
    }

    if let Some(date) = earnings.next_report_date {
        println!("\nNext report: {date}");
    }
    println!("\n{}", earnings.outlook);
}

fn print_sector(section: &Section<stock_insight_analytics::SectorReport>) {
    println!("\n--- Sector ({}) ---", section.data.as_ref().map_or_else(
        || "unknown".to_string(),
        |s| s.sector.to_string(),
    ));
    let Some(sector) = &section.data else {
        print_section_error(section.error.as_deref());
        return;
    };

    println!("{:<8} {:>12} {:>12} {:>10}", "Symbol", "Prev", "Last", "1d %");
    for row in &sector.rows {
        println!(
            "{:<8} {:>12} {:>12} {:>10}",
            row.symbol,
            row.prev_close,
            row.last_close,
            row.change_pct.round_dp(2),
        );
    }
    println!("\n{}", sector.summary);
}

fn print_macro(section: &Section<MacroReport>) {
    println!("\n--- Macro ---");
    let Some(report) = &section.data else {
        print_section_error(section.error.as_deref());
        return;
    };

    match report {
        MacroReport::NotCovered { sector } => {
            println!("No macro indicators tracked for the {sector} sector yet.");
        }
        MacroReport::Covered {
            rows,
            expectation_text,
            ..
        } => {
            for row in rows {
                println!(
                    "{} (as of {}): MoM {}%, YoY {}%",
                    row.indicator,
                    row.snapshot.latest_date,
                    row.snapshot.mom_pct.round_dp(2),
                    row.snapshot.yoy_pct.round_dp(2),
                );
                println!("  {}", row.narrative);
            }
            println!("\n{expectation_text}");
        }
    }
}

fn print_section_error(error: Option<&str>) {
    println!("unavailable: {}", error.unwrap_or("unknown error"));
}

fn fmt_opt_pct(value: Option<rust_decimal::Decimal>) -> String {
    value.map_or_else(|| "N/A".to_string(), |v| format!("{}", v.round_dp(2)))
}
