//! Per-startup analysis.

use crate::data::{DataProcessor, DatedValue, FundingTable};
use crate::report::types::{ReportError, StartupReport};
use tracing::debug;

/// Build the report for records whose startup name equals `startup` exactly.
pub fn startup_report(table: &FundingTable, startup: &str) -> Result<StartupReport, ReportError> {
    let matched = DataProcessor::filter_startup(table.dataframe(), startup)?;
    debug!(startup, matched = matched.height(), "Filtered startup records");

    let records = DataProcessor::records(&DataProcessor::sort_by_date(&matched, true)?)?;
    let funding_series = DataProcessor::records(&DataProcessor::sort_by_date(&matched, false)?)?
        .into_iter()
        .map(|record| DatedValue {
            date: record.date,
            value: record.amount,
        })
        .collect();

    Ok(StartupReport {
        startup: startup.to_string(),
        records,
        funding_series,
        total_funding: DataProcessor::total_amount(&matched)?,
        funding_rounds: DataProcessor::distinct_count(&matched, "round")?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::FundingLoader;

    #[test]
    fn test_two_round_example() {
        let csv = "\
date,startup,vertical,city,round,amount,investors
2015-01-01,A,Tech,Pune,Seed,10,X
2015-02-01,A,Tech,Pune,SeriesA,20,Y
";
        let table = FundingLoader::from_reader(csv).expect("load");
        let report = startup_report(&table, "A").expect("report");

        assert_eq!(report.total_funding, 30.0);
        assert_eq!(report.funding_rounds, 2);
        let series: Vec<f64> = report.funding_series.iter().map(|p| p.value).collect();
        assert_eq!(series, vec![10.0, 20.0]);
        assert_eq!(report.records[0].round, "SeriesA");
    }

    #[test]
    fn test_records_newest_first_and_series_chronological() {
        let csv = "\
date,startup,vertical,city,round,amount,investors
2016-06-01,Ola,Transport,Bengaluru,Series B,40,X
2015-01-01,Ola,Transport,Bengaluru,Seed,5,Y
2017-03-01,Ola,Transport,Bengaluru,Series B,90,Z
2017-03-01,Olacabs,Transport,Bengaluru,Seed,1,Z
";
        let table = FundingLoader::from_reader(csv).expect("load");
        let report = startup_report(&table, "Ola").expect("report");

        let dates: Vec<String> = report.records.iter().map(|r| r.date.to_string()).collect();
        assert_eq!(dates, vec!["2017-03-01", "2016-06-01", "2015-01-01"]);

        let series: Vec<f64> = report.funding_series.iter().map(|p| p.value).collect();
        assert_eq!(series, vec![5.0, 40.0, 90.0]);
        assert_eq!(report.funding_rounds, 2);
        assert_eq!(report.total_funding, 135.0);
    }

    #[test]
    fn test_unknown_startup_is_empty() {
        let csv = "date,startup,vertical,city,round,amount,investors\n2015-01-01,A,T,P,S,1,X\n";
        let table = FundingLoader::from_reader(csv).expect("load");
        let report = startup_report(&table, "Z").expect("report");
        assert!(report.records.is_empty());
        assert_eq!(report.total_funding, 0.0);
        assert_eq!(report.funding_rounds, 0);
    }
}
