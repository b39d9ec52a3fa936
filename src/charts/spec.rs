//! Chart descriptions drawn by the interactive viewer.

use crate::data::CategoryAmount;
use crate::report::{InvestorReport, Report};
use chrono::{Datelike, NaiveDate};

/// RGB triple, converted to each backend's color type at draw time.
pub type Rgb = (u8, u8, u8);

pub const ACCENT: Rgb = (78, 115, 223); // #4e73df
pub const SECONDARY: Rgb = (46, 134, 193); // #2E86C1

/// Slice colors for pie charts.
pub const PALETTE: [Rgb; 10] = [
    (231, 76, 60),  // Red
    (46, 204, 113), // Green
    (155, 89, 182), // Purple
    (243, 156, 18), // Orange
    (26, 188, 156), // Teal
    (233, 30, 99),  // Pink
    (0, 188, 212),  // Cyan
    (255, 87, 34),  // Deep Orange
    (121, 85, 72),  // Brown
    (96, 125, 139), // Blue Grey
];

/// How x values of a line chart map back to labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum XAxis {
    /// Days from CE, labelled `YYYY-MM`
    Month,
    /// Days from CE, labelled `YYYY-MM-DD`
    Day,
    /// Plain calendar year
    Year,
}

impl XAxis {
    pub fn date_value(date: NaiveDate) -> f64 {
        date.num_days_from_ce() as f64
    }

    pub fn format(self, value: f64) -> String {
        match self {
            XAxis::Month | XAxis::Day => {
                let Some(date) = NaiveDate::from_num_days_from_ce_opt(value.round() as i32) else {
                    return String::new();
                };
                if self == XAxis::Month {
                    date.format("%Y-%m").to_string()
                } else {
                    date.format("%Y-%m-%d").to_string()
                }
            }
            XAxis::Year => {
                if (value - value.round()).abs() < 1e-6 {
                    format!("{:.0}", value)
                } else {
                    String::new()
                }
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LineChart {
    pub id: &'static str,
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub x_axis: XAxis,
    pub color: Rgb,
    pub points: Vec<[f64; 2]>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CategoryChart {
    pub id: &'static str,
    pub title: String,
    pub entries: Vec<CategoryAmount>,
}

impl CategoryChart {
    /// Percentage share of each entry; all zero when the total is zero.
    pub fn shares(&self) -> Vec<f64> {
        let total: f64 = self.entries.iter().map(|e| e.amount).sum();
        self.entries
            .iter()
            .map(|e| if total > 0.0 { e.amount / total * 100.0 } else { 0.0 })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ChartSpec {
    Line(LineChart),
    Bar(CategoryChart),
    Pie(CategoryChart),
}

impl ChartSpec {
    pub fn id(&self) -> &'static str {
        match self {
            ChartSpec::Line(chart) => chart.id,
            ChartSpec::Bar(chart) | ChartSpec::Pie(chart) => chart.id,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            ChartSpec::Line(chart) => &chart.title,
            ChartSpec::Bar(chart) | ChartSpec::Pie(chart) => &chart.title,
        }
    }
}

/// Amount text as shown in tiles and tables: whole numbers without decimals.
pub fn format_amount(amount: f64) -> String {
    if amount.fract() == 0.0 {
        format!("{:.0}", amount)
    } else {
        let text = format!("{:.2}", amount);
        text.trim_end_matches('0').trim_end_matches('.').to_string()
    }
}

/// Every chart a report draws, in display order.
pub fn chart_specs(report: &Report) -> Vec<ChartSpec> {
    match report {
        Report::Overall(overall) => {
            if overall.monthly.is_empty() {
                return Vec::new();
            }
            vec![ChartSpec::Line(LineChart {
                id: "month_on_month",
                title: "Month on Month Investment".to_string(),
                x_label: "Month-Year".to_string(),
                y_label: overall.monthly_metric.axis_label().to_string(),
                x_axis: XAxis::Month,
                color: ACCENT,
                points: overall
                    .monthly
                    .iter()
                    .map(|p| [XAxis::date_value(p.date), p.value])
                    .collect(),
            })]
        }
        Report::Startup(startup) => {
            if startup.funding_series.is_empty() {
                return Vec::new();
            }
            vec![ChartSpec::Line(LineChart {
                id: "funding_over_time",
                title: "Funding Over Time".to_string(),
                x_label: "Date".to_string(),
                y_label: "Funding Amount (in cr)".to_string(),
                x_axis: XAxis::Day,
                color: SECONDARY,
                points: startup
                    .funding_series
                    .iter()
                    .map(|p| [XAxis::date_value(p.date), p.value])
                    .collect(),
            })]
        }
        Report::Investor(InvestorReport::Complete(breakdown)) => vec![
            ChartSpec::Bar(CategoryChart {
                id: "biggest_investments",
                title: "Biggest Investments".to_string(),
                entries: breakdown.biggest.clone(),
            }),
            ChartSpec::Pie(CategoryChart {
                id: "sectors",
                title: "Sectors Invested In".to_string(),
                entries: breakdown.sectors.clone(),
            }),
            ChartSpec::Pie(CategoryChart {
                id: "stages",
                title: "Investment Stages".to_string(),
                entries: breakdown.stages.clone(),
            }),
            ChartSpec::Pie(CategoryChart {
                id: "cities",
                title: "Cities Invested In".to_string(),
                entries: breakdown.cities.clone(),
            }),
            ChartSpec::Line(LineChart {
                id: "year_over_year",
                title: "Year-over-Year Investments".to_string(),
                x_label: "Year".to_string(),
                y_label: "Investment Amount".to_string(),
                x_axis: XAxis::Year,
                color: ACCENT,
                points: breakdown
                    .yearly
                    .iter()
                    .map(|y| [y.year as f64, y.amount])
                    .collect(),
            }),
        ],
        Report::Investor(_) => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{DatedValue, MonthlyMetric};
    use crate::report::OverallReport;

    #[test]
    fn test_x_axis_labels() {
        let date = NaiveDate::from_ymd_opt(2015, 3, 1).unwrap();
        let x = XAxis::date_value(date);
        assert_eq!(XAxis::Month.format(x), "2015-03");
        assert_eq!(XAxis::Day.format(x), "2015-03-01");
        assert_eq!(XAxis::Year.format(2019.0), "2019");
        assert_eq!(XAxis::Year.format(2019.5), "");
    }

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(30.0), "30");
        assert_eq!(format_amount(12.5), "12.5");
        assert_eq!(format_amount(0.126), "0.13");
    }

    #[test]
    fn test_shares_sum_to_hundred() {
        let chart = CategoryChart {
            id: "t",
            title: "t".to_string(),
            entries: vec![CategoryAmount::new("a", 3.0), CategoryAmount::new("b", 1.0)],
        };
        assert_eq!(chart.shares(), vec![75.0, 25.0]);
    }

    #[test]
    fn test_overall_without_months_has_no_chart() {
        let report = Report::Overall(OverallReport {
            total_investment: 0.0,
            max_funding: None,
            average_investment: 0.0,
            funded_startups: 0,
            monthly_metric: MonthlyMetric::Total,
            monthly: Vec::new(),
        });
        assert!(chart_specs(&report).is_empty());
    }

    #[test]
    fn test_overall_line_uses_metric_axis_label() {
        let report = Report::Overall(OverallReport {
            total_investment: 1.0,
            max_funding: None,
            average_investment: 1.0,
            funded_startups: 1,
            monthly_metric: MonthlyMetric::Count,
            monthly: vec![DatedValue {
                date: NaiveDate::from_ymd_opt(2015, 1, 1).unwrap(),
                value: 1.0,
            }],
        });
        let specs = chart_specs(&report);
        assert_eq!(specs.len(), 1);
        let ChartSpec::Line(line) = &specs[0] else {
            panic!("expected line chart");
        };
        assert_eq!(line.y_label, "Number of Investments");
    }

    #[test]
    fn test_placeholder_investor_reports_have_no_charts() {
        let not_found = Report::Investor(InvestorReport::NotFound {
            investor: "X".to_string(),
        });
        let insignificant = Report::Investor(InvestorReport::Insignificant {
            investor: "X".to_string(),
            recent: Vec::new(),
        });
        assert!(chart_specs(&not_found).is_empty());
        assert!(chart_specs(&insignificant).is_empty());
    }
}
