//! Per-investor analysis.

use crate::data::{DataProcessor, FundingTable};
use crate::report::types::{InvestorBreakdown, InvestorReport, ReportError, ReportOptions};
use tracing::debug;

/// Build the report for every record whose investor list matches `investor`.
///
/// Degrades to [`InvestorReport::NotFound`] when nothing matches and to
/// [`InvestorReport::Insignificant`] when the matches sum to zero.
pub fn investor_report(
    table: &FundingTable,
    investor: &str,
    options: &ReportOptions,
) -> Result<InvestorReport, ReportError> {
    let matched =
        DataProcessor::filter_investor(table.dataframe(), investor, options.investor_match)?;
    debug!(investor, matched = matched.height(), "Filtered investor records");

    if matched.height() == 0 {
        return Ok(InvestorReport::NotFound {
            investor: investor.to_string(),
        });
    }

    let recent = DataProcessor::records(&matched.head(Some(options.recent_limit)))?;

    if DataProcessor::total_amount(&matched)? == 0.0 {
        return Ok(InvestorReport::Insignificant {
            investor: investor.to_string(),
            recent,
        });
    }

    let mut biggest = DataProcessor::sum_by(&matched, "startup")?;
    biggest.truncate(options.top_n);

    let breakdown = |key: &str| {
        DataProcessor::sum_by(&matched, key)
            .map(|sums| DataProcessor::top_n_with_other(sums, options.top_n))
    };

    Ok(InvestorReport::Complete(Box::new(InvestorBreakdown {
        investor: investor.to_string(),
        recent,
        biggest,
        sectors: breakdown("vertical")?,
        stages: breakdown("round")?,
        cities: breakdown("city")?,
        yearly: DataProcessor::yearly_totals(&matched)?,
    })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{CategoryAmount, FundingLoader, InvestorMatch, YearAmount, OTHER_LABEL};

    fn table() -> FundingTable {
        let csv = "\
date,startup,vertical,city,round,amount,investors
2019-05-01,S1,V1,C1,Seed,70,Sequoia Capital
2018-02-01,S2,V2,C2,Seed,60,\"Accel, Sequoia Capital India\"
2019-07-01,S3,V3,C3,Series A,50,Sequoia Capital
2017-01-01,S4,V4,C4,Series A,40,Sequoia Capital
2019-01-01,S5,V5,C5,Series B,30,Sequoia Capital
2016-01-01,S6,V6,C6,Series C,20,Sequoia Capital
2016-06-01,S7,V7,C7,Series D,10,Sequoia Capital
2016-06-01,S8,V1,C1,Seed,0,Ghost
2016-06-01,S9,V1,C1,Seed,5,
";
        FundingLoader::from_reader(csv).expect("load")
    }

    #[test]
    fn test_no_match_is_not_found() {
        let report =
            investor_report(&table(), "Nobody", &ReportOptions::default()).expect("report");
        assert_eq!(
            report,
            InvestorReport::NotFound {
                investor: "Nobody".to_string()
            }
        );
    }

    #[test]
    fn test_zero_sum_is_insignificant() {
        let report = investor_report(&table(), "Ghost", &ReportOptions::default()).expect("report");
        match report {
            InvestorReport::Insignificant { recent, .. } => {
                assert_eq!(recent.len(), 1);
                assert_eq!(recent[0].startup, "S8");
            }
            other => panic!("expected insignificant report, got {other:?}"),
        }
    }

    #[test]
    fn test_complete_breakdown() {
        let report =
            investor_report(&table(), "Sequoia Capital", &ReportOptions::default()).expect("report");
        let InvestorReport::Complete(breakdown) = report else {
            panic!("expected complete report");
        };

        // recent keeps table order
        let recent: Vec<&str> = breakdown.recent.iter().map(|r| r.startup.as_str()).collect();
        assert_eq!(recent, vec!["S1", "S2", "S3", "S4", "S5"]);

        let biggest: Vec<&str> = breakdown.biggest.iter().map(|c| c.label.as_str()).collect();
        assert_eq!(biggest, vec!["S1", "S2", "S3", "S4", "S5"]);

        assert_eq!(breakdown.sectors.len(), 6);
        assert_eq!(breakdown.sectors[5], CategoryAmount::new(OTHER_LABEL, 30.0));
        assert_eq!(breakdown.cities.len(), 6);

        // five distinct rounds -> no Other bucket
        assert_eq!(breakdown.stages.len(), 5);
        assert_eq!(breakdown.stages[0], CategoryAmount::new("Seed", 130.0));

        assert_eq!(
            breakdown.yearly,
            vec![
                YearAmount { year: 2016, amount: 30.0 },
                YearAmount { year: 2017, amount: 40.0 },
                YearAmount { year: 2018, amount: 60.0 },
                YearAmount { year: 2019, amount: 150.0 },
            ]
        );
    }

    #[test]
    fn test_token_match_excludes_longer_names() {
        let options = ReportOptions {
            investor_match: InvestorMatch::Token,
            ..Default::default()
        };
        let report = investor_report(&table(), "Sequoia Capital", &options).expect("report");
        let InvestorReport::Complete(breakdown) = report else {
            panic!("expected complete report");
        };
        assert!(breakdown.recent.iter().all(|r| r.startup != "S2"));
    }
}
