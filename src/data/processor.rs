//! Data Processor Module
//! Selection filters and group-by aggregations over the funding table.

use crate::data::loader::ISO_DATE;
use crate::data::record::{CategoryAmount, DatedValue, FundingRecord, YearAmount};
use chrono::NaiveDate;
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Label of the bucket holding everything outside the top entries.
pub const OTHER_LABEL: &str = "Other";

#[derive(Error, Debug)]
pub enum ProcessorError {
    #[error("Polars error: {0}")]
    PolarsError(#[from] PolarsError),
    #[error("Invalid stored date: {0}")]
    InvalidDate(String),
}

/// How an investor selection is matched against the investor-list text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvestorMatch {
    /// Any record whose list contains the name as a substring.
    #[default]
    Substring,
    /// Any record whose comma-separated list has the name as a whole entry.
    Token,
}

impl InvestorMatch {
    pub fn matches(self, investors: &str, name: &str) -> bool {
        match self {
            InvestorMatch::Substring => investors.contains(name),
            InvestorMatch::Token => {
                let name = name.trim();
                investors.split(',').any(|entry| entry.trim() == name)
            }
        }
    }
}

/// What the month-on-month series measures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MonthlyMetric {
    /// Summed amount per month
    #[default]
    Total,
    /// Number of records per month
    Count,
}

impl MonthlyMetric {
    pub const ALL: [MonthlyMetric; 2] = [MonthlyMetric::Total, MonthlyMetric::Count];

    pub fn label(self) -> &'static str {
        match self {
            MonthlyMetric::Total => "Total",
            MonthlyMetric::Count => "Count",
        }
    }

    pub fn axis_label(self) -> &'static str {
        match self {
            MonthlyMetric::Total => "Investment Amount",
            MonthlyMetric::Count => "Number of Investments",
        }
    }
}

/// Handles filtering and aggregation operations.
pub struct DataProcessor;

impl DataProcessor {
    /// Records whose startup name equals `startup` exactly.
    pub fn filter_startup(df: &DataFrame, startup: &str) -> Result<DataFrame, ProcessorError> {
        let filtered = df
            .clone()
            .lazy()
            .filter(col("startup").eq(lit(startup)))
            .collect()?;
        Ok(filtered)
    }

    /// Records whose investor list matches `investor` under `mode`.
    /// Records without an investor list never match.
    pub fn filter_investor(
        df: &DataFrame,
        investor: &str,
        mode: InvestorMatch,
    ) -> Result<DataFrame, ProcessorError> {
        let mask: BooleanChunked = Self::str_column(df, "investors")?
            .into_iter()
            .map(|value| Some(value.is_some_and(|list| mode.matches(list, investor))))
            .collect();
        Ok(df.filter(&mask)?)
    }

    /// Sort by date, keeping load order among equal dates.
    pub fn sort_by_date(df: &DataFrame, descending: bool) -> Result<DataFrame, ProcessorError> {
        let sorted = df.sort(
            ["date"],
            SortMultipleOptions::default()
                .with_order_descending(descending)
                .with_maintain_order(true),
        )?;
        Ok(sorted)
    }

    /// Sum of the amount column.
    pub fn total_amount(df: &DataFrame) -> Result<f64, ProcessorError> {
        Ok(Self::f64_column(df, "amount")?.sum().unwrap_or(0.0))
    }

    /// Number of distinct non-null values in `column`.
    pub fn distinct_count(df: &DataFrame, column: &str) -> Result<usize, ProcessorError> {
        Ok(df
            .column(column)?
            .as_materialized_series()
            .drop_nulls()
            .n_unique()?)
    }

    /// Amount summed per `key`, largest first. Null keys are skipped.
    pub fn sum_by(df: &DataFrame, key: &str) -> Result<Vec<CategoryAmount>, ProcessorError> {
        Self::grouped_amounts(df, key, col("amount").sum())
    }

    /// Largest single amount per `key`, largest first.
    pub fn max_by(df: &DataFrame, key: &str) -> Result<Vec<CategoryAmount>, ProcessorError> {
        Self::grouped_amounts(df, key, col("amount").max())
    }

    fn grouped_amounts(
        df: &DataFrame,
        key: &str,
        aggregation: Expr,
    ) -> Result<Vec<CategoryAmount>, ProcessorError> {
        let grouped = df
            .clone()
            .lazy()
            .filter(col(key).is_not_null())
            .group_by([col(key)])
            .agg([aggregation.alias("amount")])
            .sort_by_exprs(
                [col("amount"), col(key)],
                SortMultipleOptions::default().with_order_descending_multi([true, false]),
            )
            .collect()?;

        let labels = Self::str_column(&grouped, key)?;
        let amounts = Self::f64_column(&grouped, "amount")?;
        Ok(labels
            .into_iter()
            .zip(amounts)
            .filter_map(|(label, amount)| {
                label.map(|label| CategoryAmount::new(label, amount.unwrap_or(0.0)))
            })
            .collect())
    }

    /// Keep the first `n` entries and fold the remainder into one "Other" entry.
    ///
    /// Expects `items` sorted largest first, as returned by [`Self::sum_by`].
    pub fn top_n_with_other(mut items: Vec<CategoryAmount>, n: usize) -> Vec<CategoryAmount> {
        if items.len() <= n {
            return items;
        }
        let rest: f64 = items[n..].iter().map(|item| item.amount).sum();
        items.truncate(n);
        items.push(CategoryAmount::new(OTHER_LABEL, rest));
        items
    }

    /// Month-on-month series in (year, month) order, keyed by first-of-month.
    pub fn monthly_series(
        df: &DataFrame,
        metric: MonthlyMetric,
    ) -> Result<Vec<DatedValue>, ProcessorError> {
        let value = match metric {
            MonthlyMetric::Total => col("amount").sum(),
            MonthlyMetric::Count => col("amount").count().cast(DataType::Float64),
        };

        let grouped = df
            .clone()
            .lazy()
            .group_by([col("year"), col("month")])
            .agg([value.alias("value")])
            .sort_by_exprs([col("year"), col("month")], SortMultipleOptions::default())
            .collect()?;

        let years = Self::i32_column(&grouped, "year")?;
        let months = Self::i32_column(&grouped, "month")?;
        let values = Self::f64_column(&grouped, "value")?;

        Ok(years
            .into_iter()
            .zip(months)
            .zip(values)
            .filter_map(|((year, month), value)| {
                let date = NaiveDate::from_ymd_opt(year?, u32::try_from(month?).ok()?, 1)?;
                Some(DatedValue {
                    date,
                    value: value.unwrap_or(0.0),
                })
            })
            .collect())
    }

    /// Amount summed per year, oldest first.
    pub fn yearly_totals(df: &DataFrame) -> Result<Vec<YearAmount>, ProcessorError> {
        let grouped = df
            .clone()
            .lazy()
            .group_by([col("year")])
            .agg([col("amount").sum()])
            .sort(["year"], SortMultipleOptions::default())
            .collect()?;

        let years = Self::i32_column(&grouped, "year")?;
        let amounts = Self::f64_column(&grouped, "amount")?;
        Ok(years
            .into_iter()
            .zip(amounts)
            .filter_map(|(year, amount)| {
                Some(YearAmount {
                    year: year?,
                    amount: amount.unwrap_or(0.0),
                })
            })
            .collect())
    }

    /// Extract typed records in table order.
    pub fn records(df: &DataFrame) -> Result<Vec<FundingRecord>, ProcessorError> {
        let dates = Self::str_column(df, "date")?;
        let startups = Self::str_column(df, "startup")?;
        let verticals = Self::str_column(df, "vertical")?;
        let cities = Self::str_column(df, "city")?;
        let rounds = Self::str_column(df, "round")?;
        let amounts = Self::f64_column(df, "amount")?;
        let investors = Self::str_column(df, "investors")?;

        let text = |value: Option<&str>| value.unwrap_or_default().to_string();

        (0..df.height())
            .map(|i| {
                let raw_date = dates.get(i).unwrap_or_default();
                let date = NaiveDate::parse_from_str(raw_date, ISO_DATE)
                    .map_err(|_| ProcessorError::InvalidDate(raw_date.to_string()))?;
                Ok(FundingRecord {
                    date,
                    startup: text(startups.get(i)),
                    vertical: text(verticals.get(i)),
                    city: text(cities.get(i)),
                    round: text(rounds.get(i)),
                    amount: amounts.get(i).unwrap_or(0.0),
                    investors: text(investors.get(i)),
                })
            })
            .collect()
    }

    fn str_column<'a>(df: &'a DataFrame, name: &str) -> Result<&'a StringChunked, ProcessorError> {
        Ok(df.column(name)?.as_materialized_series().str()?)
    }

    fn f64_column<'a>(df: &'a DataFrame, name: &str) -> Result<&'a Float64Chunked, ProcessorError> {
        Ok(df.column(name)?.as_materialized_series().f64()?)
    }

    fn i32_column<'a>(df: &'a DataFrame, name: &str) -> Result<&'a Int32Chunked, ProcessorError> {
        Ok(df.column(name)?.as_materialized_series().i32()?)
    }
}
