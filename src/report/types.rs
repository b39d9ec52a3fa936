//! Report value types shared by the aggregators and the presenter.

use crate::data::{
    CategoryAmount, DatedValue, FundingRecord, InvestorMatch, MonthlyMetric, ProcessorError,
    YearAmount,
};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error(transparent)]
    Processor(#[from] ProcessorError),
}

/// Tunables for the aggregations.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReportOptions {
    /// Entries kept in ranked breakdowns before bucketing into "Other".
    pub top_n: usize,
    /// Records shown in the investor's recent-investments table.
    pub recent_limit: usize,
    pub investor_match: InvestorMatch,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            top_n: 5,
            recent_limit: 5,
            investor_match: InvestorMatch::Substring,
        }
    }
}

/// Which report to produce.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    Overall,
    Startup(String),
    Investor(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Report {
    Overall(OverallReport),
    Startup(StartupReport),
    Investor(InvestorReport),
}

impl Report {
    pub fn title(&self) -> String {
        match self {
            Report::Overall(_) => "Overall Analysis".to_string(),
            Report::Startup(report) => format!("{} Analysis", report.startup),
            Report::Investor(report) => format!("{} Investments Overview", report.investor()),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct OverallReport {
    /// Grand total, rounded half to even.
    pub total_investment: f64,
    /// Startup holding the largest single funding amount.
    pub max_funding: Option<CategoryAmount>,
    /// Mean of per-startup totals, rounded half to even.
    pub average_investment: f64,
    pub funded_startups: usize,
    pub monthly_metric: MonthlyMetric,
    /// Empty when nothing survived grouping.
    pub monthly: Vec<DatedValue>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum InvestorReport {
    /// No record mentions the investor.
    NotFound { investor: String },
    /// Matches exist but their amounts sum to zero; only the table is shown.
    Insignificant {
        investor: String,
        recent: Vec<FundingRecord>,
    },
    Complete(Box<InvestorBreakdown>),
}

impl InvestorReport {
    pub fn investor(&self) -> &str {
        match self {
            InvestorReport::NotFound { investor } => investor,
            InvestorReport::Insignificant { investor, .. } => investor,
            InvestorReport::Complete(breakdown) => &breakdown.investor,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct InvestorBreakdown {
    pub investor: String,
    /// First records in table order, not sorted by date.
    pub recent: Vec<FundingRecord>,
    pub biggest: Vec<CategoryAmount>,
    pub sectors: Vec<CategoryAmount>,
    pub stages: Vec<CategoryAmount>,
    pub cities: Vec<CategoryAmount>,
    pub yearly: Vec<YearAmount>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StartupReport {
    pub startup: String,
    /// Newest first.
    pub records: Vec<FundingRecord>,
    /// Oldest first.
    pub funding_series: Vec<DatedValue>,
    pub total_funding: f64,
    pub funding_rounds: usize,
}
