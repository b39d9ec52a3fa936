//! Report module - aggregations behind the three dashboard views

mod investor;
mod overall;
mod startup;
mod types;

pub use crate::data::{InvestorMatch, MonthlyMetric};
pub use investor::investor_report;
pub use overall::overall_report;
pub use startup::startup_report;
pub use types::{
    InvestorBreakdown, InvestorReport, OverallReport, Report, ReportError, ReportOptions,
    Selection, StartupReport,
};

use crate::data::FundingTable;
use tracing::info;

/// Recompute the report for `selection` from the full table.
pub fn build_report(
    table: &FundingTable,
    selection: &Selection,
    monthly_metric: MonthlyMetric,
    options: &ReportOptions,
) -> Result<Report, ReportError> {
    info!(?selection, "Building report");
    let report = match selection {
        Selection::Overall => Report::Overall(overall_report(table, monthly_metric)?),
        Selection::Startup(name) => Report::Startup(startup_report(table, name)?),
        Selection::Investor(name) => Report::Investor(investor_report(table, name, options)?),
    };
    Ok(report)
}
