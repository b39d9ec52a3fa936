use funding_dashboard::charts::{chart_specs, ChartSpec};
use funding_dashboard::data::{DataProcessor, FundingLoader, FundingTable, OTHER_LABEL};
use funding_dashboard::report::{
    build_report, InvestorReport, MonthlyMetric, Report, ReportOptions, Selection,
};

const SAMPLE: &str = "tests/data/funding_sample.csv";

fn load() -> FundingTable {
    FundingLoader::load_csv(SAMPLE).expect("Failed to load test data")
}

fn report(table: &FundingTable, selection: Selection) -> Report {
    build_report(
        table,
        &selection,
        MonthlyMetric::Total,
        &ReportOptions::default(),
    )
    .expect("report failed")
}

#[test]
fn test_rows_with_bad_dates_are_dropped() {
    let table = load();
    assert_eq!(table.height(), 12);
    assert!(!table.startups().contains(&"Ghost".to_string()));
}

#[test]
fn test_startup_totals_add_up_to_grand_total() {
    let table = load();
    let df = table.dataframe();

    let grand_total = DataProcessor::total_amount(df).expect("total");
    let per_startup: f64 = DataProcessor::sum_by(df, "startup")
        .expect("sum_by")
        .iter()
        .map(|entry| entry.amount)
        .sum();
    assert!((grand_total - per_startup).abs() < 1e-9);
    assert!((grand_total - 170.5).abs() < 1e-9);
}

#[test]
fn test_overall_report() {
    let table = load();
    let Report::Overall(overall) = report(&table, Selection::Overall) else {
        panic!("expected overall report");
    };

    // Ghost's 999 sits on an unparseable date and must not count
    assert_eq!(overall.funded_startups, table.startups().len());
    assert_eq!(overall.funded_startups, 11);
    let max = overall.max_funding.expect("max funding");
    assert_eq!(max.label, "Zomato");
    assert_eq!(max.amount, 40.0);

    // months in chronological order
    let dates: Vec<_> = overall.monthly.iter().map(|p| p.date).collect();
    let mut sorted = dates.clone();
    sorted.sort();
    assert_eq!(dates, sorted);
}

#[test]
fn test_monthly_count_covers_every_row() {
    let table = load();
    let report = build_report(
        &table,
        &Selection::Overall,
        MonthlyMetric::Count,
        &ReportOptions::default(),
    )
    .expect("report failed");
    let Report::Overall(overall) = report else {
        panic!("expected overall report");
    };

    let counted: f64 = overall.monthly.iter().map(|p| p.value).sum();
    assert_eq!(counted, 12.0);
}

#[test]
fn test_startup_report() {
    let table = load();
    let Report::Startup(startup) = report(&table, Selection::Startup("Ola".to_string())) else {
        panic!("expected startup report");
    };

    assert_eq!(startup.total_funding, 30.0);
    assert_eq!(startup.funding_rounds, 2);
    let series: Vec<f64> = startup.funding_series.iter().map(|p| p.value).collect();
    assert_eq!(series, vec![10.0, 20.0]);
    assert_eq!(startup.records[0].round, "Series A");
}

#[test]
fn test_unknown_investor_has_no_charts() {
    let table = load();
    let result = report(&table, Selection::Investor("Nobody".to_string()));
    assert!(matches!(
        result,
        Report::Investor(InvestorReport::NotFound { .. })
    ));
    assert!(chart_specs(&result).is_empty());
}

#[test]
fn test_zero_amount_investor_is_insignificant() {
    let table = load();
    let result = report(&table, Selection::Investor("Lightspeed".to_string()));
    let Report::Investor(InvestorReport::Insignificant { recent, .. }) = &result else {
        panic!("expected insignificant investor report");
    };
    assert_eq!(recent.len(), 1);
    assert_eq!(recent[0].startup, "Udaan");
    assert!(chart_specs(&result).is_empty());
}

#[test]
fn test_investor_breakdown_buckets_tail_into_other() {
    let table = load();
    let result = report(&table, Selection::Investor("Sequoia Capital".to_string()));
    let Report::Investor(InvestorReport::Complete(breakdown)) = &result else {
        panic!("expected complete investor report");
    };

    assert_eq!(breakdown.recent.len(), 5);
    assert_eq!(breakdown.biggest.len(), 5);
    assert_eq!(breakdown.biggest[0].label, "Zomato");

    // seven sectors: five kept, Fintech 5 is fifth, Logistics 3 + Manufacturing 2 folded
    assert_eq!(breakdown.sectors.len(), 6);
    let other = breakdown.sectors.last().expect("other");
    assert_eq!(other.label, OTHER_LABEL);
    assert_eq!(other.amount, 5.0);

    let years: Vec<i32> = breakdown.yearly.iter().map(|y| y.year).collect();
    assert_eq!(years, vec![2015, 2016, 2017, 2018]);

    let specs = chart_specs(&result);
    assert_eq!(specs.len(), 5);
    assert!(matches!(specs[0], ChartSpec::Bar(_)));
}

#[test]
fn test_investor_charts_are_listed_in_display_order() {
    let table = load();
    let result = report(&table, Selection::Investor("Sequoia Capital".to_string()));

    let ids: Vec<&str> = chart_specs(&result).iter().map(ChartSpec::id).collect();
    assert_eq!(
        ids,
        vec!["biggest_investments", "sectors", "stages", "cities", "year_over_year"]
    );
}
