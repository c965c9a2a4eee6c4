use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Ticker symbol accepted by the tools (e.g. `AAPL`, `BRK.B`, `^GSPC`)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct Symbol(pub String);

impl Symbol {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Technical indicators exposed as tools
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum IndicatorKind {
    Rsi,
    Sma,
}

impl IndicatorKind {
    /// Upstream `type` query value and output `indicator` field
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Rsi => "rsi",
            Self::Sma => "sma",
        }
    }

    pub fn default_period(&self) -> u32 {
        match self {
            Self::Rsi => 14,
            Self::Sma => 20,
        }
    }

    pub fn tool_name(&self) -> &'static str {
        match self {
            Self::Rsi => "get_rsi",
            Self::Sma => "get_sma",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Rsi => "Relative Strength Index (RSI)",
            Self::Sma => "Simple Moving Average (SMA)",
        }
    }
}

impl std::fmt::Display for IndicatorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// Output models

/// Earnings report with surprise data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct EarningsReport {
    pub symbol: String,
    pub date: String,
    /// Actual EPS
    pub eps: f64,
    /// Consensus EPS estimate
    pub eps_estimated: f64,
    pub time: Option<String>,
    pub revenue: Option<f64>,
    pub revenue_estimated: Option<f64>,
    pub updated_from_date: Option<String>,
    /// `eps - eps_estimated`
    pub surprise: Option<f64>,
    pub surprise_percentage: Option<f64>,
    pub quarter: Option<i64>,
    pub year: Option<i64>,
}

/// Single technical indicator value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct IndicatorValue {
    pub date: String,
    pub value: f64,
}

/// Technical indicator series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct IndicatorOutput {
    pub symbol: String,
    pub indicator: IndicatorKind,
    pub time_period: u32,
    pub values: Vec<IndicatorValue>,
}

/// Individual analyst price target
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AnalystRating {
    pub analyst_name: Option<String>,
    pub analyst_company: Option<String>,
    pub date: String,
    pub rating: String,
    pub price_target: f64,
}

/// Price target consensus
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AnalystConsensus {
    pub symbol: String,
    pub target_consensus: f64,
    pub target_high: f64,
    pub target_low: f64,
    pub target_median: Option<f64>,
    pub number_of_analysts: u32,
    pub last_analyst_consensus_date: String,
    pub rating_consensus: Option<String>,
    /// `None` when the per-analyst lookup failed
    pub ratings: Option<Vec<AnalystRating>>,
}

/// Insider trading transaction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct InsiderActivity {
    pub symbol: String,
    pub filing_date: String,
    pub transaction_date: String,
    pub reporter_name: String,
    pub reporter_title: String,
    pub transaction_type: String,
    pub shares: f64,
    pub price: Option<f64>,
    pub value: Option<f64>,
    pub url: Option<String>,
}

/// Earnings calendar event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct EarningsCalendarEvent {
    pub symbol: String,
    pub date: String,
    pub eps: Option<f64>,
    pub eps_estimated: Option<f64>,
    pub time: Option<String>,
    pub revenue: Option<f64>,
    pub revenue_estimated: Option<f64>,
    pub quarter: Option<i64>,
    pub year: Option<i64>,
}
