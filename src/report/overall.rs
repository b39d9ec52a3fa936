//! Overall market analysis.

use crate::data::{DataProcessor, FundingTable, MonthlyMetric};
use crate::report::types::{OverallReport, ReportError};
use statrs::statistics::Statistics;
use tracing::debug;

/// Build the market-wide report with the month-on-month series for `metric`.
pub fn overall_report(
    table: &FundingTable,
    metric: MonthlyMetric,
) -> Result<OverallReport, ReportError> {
    let df = table.dataframe();

    let total = DataProcessor::total_amount(df)?;
    let max_funding = DataProcessor::max_by(df, "startup")?.into_iter().next();

    let per_startup = DataProcessor::sum_by(df, "startup")?;
    let average = if per_startup.is_empty() {
        0.0
    } else {
        per_startup.iter().map(|entry| entry.amount).mean()
    };

    let funded_startups = DataProcessor::distinct_count(df, "startup")?;
    let monthly = DataProcessor::monthly_series(df, metric)?;
    debug!(months = monthly.len(), ?metric, "Built overall report");

    Ok(OverallReport {
        total_investment: total.round_ties_even(),
        max_funding,
        average_investment: average.round_ties_even(),
        funded_startups,
        monthly_metric: metric,
        monthly,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{CategoryAmount, FundingLoader};

    const CSV: &str = "\
date,startup,vertical,city,round,amount,investors
2015-01-10,A,Tech,Pune,Seed,10.5,X
2015-01-20,B,Food,Delhi,Seed,2,Y
2015-03-01,A,Tech,Pune,Series A,20,Y
bad,C,Food,Delhi,Seed,1000,Z
";

    #[test]
    fn test_headline_metrics() {
        let table = FundingLoader::from_reader(CSV).expect("load");
        let report = overall_report(&table, MonthlyMetric::Total).expect("report");

        assert_eq!(report.total_investment, 32.0);
        assert_eq!(report.max_funding, Some(CategoryAmount::new("A", 20.0)));
        // per-startup totals 30.5 and 2 -> mean 16.25
        assert_eq!(report.average_investment, 16.0);
        assert_eq!(report.funded_startups, 2);
    }

    #[test]
    fn test_monthly_series_fills_first_of_month() {
        let table = FundingLoader::from_reader(CSV).expect("load");
        let report = overall_report(&table, MonthlyMetric::Count).expect("report");
        let points: Vec<(String, f64)> = report
            .monthly
            .iter()
            .map(|p| (p.date.to_string(), p.value))
            .collect();
        assert_eq!(
            points,
            vec![("2015-01-01".to_string(), 2.0), ("2015-03-01".to_string(), 1.0)]
        );
    }

    #[test]
    fn test_empty_table_has_no_monthly_data() {
        let csv = "date,startup,vertical,city,round,amount,investors\nnope,A,T,P,S,1,X\n";
        let table = FundingLoader::from_reader(csv).expect("load");
        let report = overall_report(&table, MonthlyMetric::Total).expect("report");
        assert!(report.monthly.is_empty());
        assert_eq!(report.max_funding, None);
        assert_eq!(report.total_investment, 0.0);
        assert_eq!(report.average_investment, 0.0);
        assert_eq!(report.funded_startups, 0);
    }

    #[test]
    fn test_rounding_is_half_to_even() {
        let csv = "\
date,startup,vertical,city,round,amount,investors
2015-01-10,A,Tech,Pune,Seed,2.5,X
";
        let table = FundingLoader::from_reader(csv).expect("load");
        let report = overall_report(&table, MonthlyMetric::Total).expect("report");
        assert_eq!(report.total_investment, 2.0);
    }
}
