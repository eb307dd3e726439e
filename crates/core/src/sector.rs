//! GICS sector taxonomy and curated per-sector peer lists.
//!
//! Providers spell sectors inconsistently ("TECHNOLOGY", "Information
//! Technology", "consumer-cyclical"), so classification is keyword-based
//! over a normalized string rather than an exact match.

use serde::{Deserialize, Serialize};

/// The eleven GICS sectors, plus a catch-all for unclassified tickers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sector {
    CommunicationServices,
    ConsumerDiscretionary,
    ConsumerStaples,
    Energy,
    Financials,
    HealthCare,
    Industrials,
    InformationTechnology,
    Materials,
    RealEstate,
    Utilities,
    Unknown,
}

impl Sector {
    /// Classifies a provider-supplied sector string.
    ///
    /// Returns `Sector::Unknown` when nothing matches; never fails.
    #[must_use]
    pub fn classify(raw: &str) -> Self {
        let s = raw.trim().to_lowercase();
        if s.is_empty() {
            return Self::Unknown;
        }

        if s.contains("communication") || s.contains("telecom") || s.contains("media") {
            Self::CommunicationServices
        } else if s.contains("consumer cyclical")
            || s.contains("consumer-cyclical")
            || s.contains("consumer discretionary")
            || s.contains("retail trade")
        {
            Self::ConsumerDiscretionary
        } else if s.contains("consumer defensive")
            || s.contains("consumer-defensive")
            || s.contains("consumer staples")
        {
            Self::ConsumerStaples
        } else if s.contains("energy") || s.contains("oil") || s.contains("petroleum") {
            Self::Energy
        } else if s.contains("financ") || s.contains("bank") || s.contains("insurance") {
            Self::Financials
        } else if s.contains("health") || s.contains("life sciences") || s.contains("pharma") {
            Self::HealthCare
        } else if s.contains("industrial") || s.contains("manufacturing") {
            Self::Industrials
        } else if s.contains("technology") || s.contains("software") || s.contains("semiconductor")
        {
            Self::InformationTechnology
        } else if s.contains("material") || s.contains("basic-materials") || s.contains("mining") {
            Self::Materials
        } else if s.contains("real estate") || s.contains("real-estate") || s.contains("reit") {
            Self::RealEstate
        } else if s.contains("utilit") {
            Self::Utilities
        } else {
            Self::Unknown
        }
    }

    /// Curated large-cap leaders for each sector, used as the peer set for
    /// same-sector performance comparison.
    #[must_use]
    pub fn leaders(self) -> &'static [&'static str] {
        match self {
            Self::CommunicationServices => &["META", "GOOGL", "TMUS", "VZ"],
            Self::ConsumerDiscretionary => &["AMZN", "TSLA", "F", "HD"],
            Self::ConsumerStaples => &["COST", "PG", "WMT", "KO"],
            Self::Energy => &["XOM", "CVX", "COP", "SLB"],
            Self::Financials => &["JPM", "BAC", "GS", "MS"],
            Self::HealthCare => &["JNJ", "PFE", "UNH", "ABBV"],
            Self::Industrials => &["GE", "HON", "UPS", "CAT"],
            Self::InformationTechnology => &["AAPL", "MSFT", "NVDA", "PLTR"],
            Self::Materials => &["NEM", "LIN", "APD", "FCX"],
            Self::RealEstate => &["PLD", "SPG", "CCI", "O"],
            Self::Utilities => &["NEE", "DUK", "SO", "EXC"],
            Self::Unknown => &[],
        }
    }
}

impl std::fmt::Display for Sector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::CommunicationServices => "Communication Services",
            Self::ConsumerDiscretionary => "Consumer Discretionary",
            Self::ConsumerStaples => "Consumer Staples",
            Self::Energy => "Energy",
            Self::Financials => "Financials",
            Self::HealthCare => "Health Care",
            Self::Industrials => "Industrials",
            Self::InformationTechnology => "Information Technology",
            Self::Materials => "Materials",
            Self::RealEstate => "Real Estate",
            Self::Utilities => "Utilities",
            Self::Unknown => "Unknown",
        };
        write!(f, "{name}")
    }
}
