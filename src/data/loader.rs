//! Funding CSV Loader Module
//! Reads the funding CSV with Polars, normalizes dates and derives year/month.

use crate::data::processor::{DataProcessor, ProcessorError};
use crate::data::record::FundingRecord;
use chrono::{Datelike, NaiveDate, NaiveDateTime};
use polars::prelude::*;
use std::collections::BTreeSet;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Columns every funding CSV must provide.
pub const REQUIRED_COLUMNS: [&str; 7] = [
    "date",
    "startup",
    "vertical",
    "city",
    "round",
    "amount",
    "investors",
];

/// Storage format of the normalized `date` column.
pub const ISO_DATE: &str = "%Y-%m-%d";

const DATE_FORMATS: [&str; 6] = [
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%d/%m/%Y",
    "%d-%m-%Y",
    "%d.%m.%Y",
];

const DATETIME_FORMATS: [&str; 3] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S%.f"];

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Failed to load CSV: {0}")]
    CsvError(#[from] PolarsError),
    #[error("Failed to read file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Missing required column: {0}")]
    MissingColumn(String),
    #[error(transparent)]
    Processor(#[from] ProcessorError),
}

/// Parse a calendar date in any of the accepted layouts.
///
/// Month-first wins for ambiguous `a/b/yyyy` values; day-first is only tried
/// when the first field cannot be a month.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
                .map(|dt| dt.date())
        })
}

/// The loaded, read-only funding table.
///
/// Columns: date (ISO text), startup, vertical, city, round, amount (f64),
/// investors, year (i32), month (i32). Every row has a valid date.
#[derive(Debug, Clone)]
pub struct FundingTable {
    df: DataFrame,
    source: Option<PathBuf>,
}

impl FundingTable {
    /// Get a reference to the underlying DataFrame.
    pub fn dataframe(&self) -> &DataFrame {
        &self.df
    }

    /// Number of records that survived date parsing.
    pub fn height(&self) -> usize {
        self.df.height()
    }

    pub fn is_empty(&self) -> bool {
        self.df.height() == 0
    }

    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// Sorted distinct startup names.
    pub fn startups(&self) -> Vec<String> {
        self.df
            .column("startup")
            .ok()
            .and_then(|col| col.as_materialized_series().str().ok().cloned())
            .map(|ca| {
                ca.into_iter()
                    .flatten()
                    .map(str::to_string)
                    .collect::<BTreeSet<_>>()
                    .into_iter()
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Sorted distinct investor names, split out of the comma-separated lists.
    pub fn investors(&self) -> Vec<String> {
        self.df
            .column("investors")
            .ok()
            .and_then(|col| col.as_materialized_series().str().ok().cloned())
            .map(|ca| {
                ca.into_iter()
                    .flatten()
                    .flat_map(|list| list.split(','))
                    .map(str::trim)
                    .filter(|name| !name.is_empty())
                    .map(str::to_string)
                    .collect::<BTreeSet<_>>()
                    .into_iter()
                    .collect()
            })
            .unwrap_or_default()
    }

    /// First `limit` records in load order.
    pub fn rows(&self, limit: usize) -> Result<Vec<FundingRecord>, ProcessorError> {
        DataProcessor::records(&self.df.head(Some(limit)))
    }
}

/// Handles CSV loading with Polars.
pub struct FundingLoader;

impl FundingLoader {
    /// Load a funding CSV from disk.
    ///
    /// A row with more fields than the header fails the load; short rows are
    /// padded with nulls.
    pub fn load_csv(path: impl AsRef<Path>) -> Result<FundingTable, LoaderError> {
        let path = path.as_ref();
        // Surface a plain io error for missing files before Polars does.
        std::fs::metadata(path)?;

        info!(path = %path.display(), "Loading funding CSV");
        let df = LazyCsvReader::new(path)
            .with_has_header(true)
            .with_infer_schema_length(Some(10000))
            .finish()?
            .collect()?;

        let mut table = Self::prepare(df)?;
        table.source = Some(path.to_path_buf());
        Ok(table)
    }

    /// Load a funding CSV from in-memory bytes.
    pub fn from_reader(bytes: impl Into<Vec<u8>>) -> Result<FundingTable, LoaderError> {
        let df = CsvReadOptions::default()
            .with_has_header(true)
            .with_infer_schema_length(Some(10000))
            .into_reader_with_file_handle(Cursor::new(bytes.into()))
            .finish()?;
        Self::prepare(df)
    }

    /// Normalize column types, parse dates and drop rows without a valid date.
    fn prepare(raw: DataFrame) -> Result<FundingTable, LoaderError> {
        let columns: Vec<String> = raw
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect();
        if let Some(missing) = REQUIRED_COLUMNS
            .iter()
            .find(|name| !columns.iter().any(|c| c == *name))
        {
            return Err(LoaderError::MissingColumn(missing.to_string()));
        }

        let mut df = raw
            .lazy()
            .select([
                col("date").cast(DataType::String),
                col("startup").cast(DataType::String),
                col("vertical").cast(DataType::String),
                col("city").cast(DataType::String),
                col("round").cast(DataType::String),
                col("amount")
                    .cast(DataType::Float64)
                    .fill_nan(lit(0.0))
                    .fill_null(lit(0.0)),
                col("investors").cast(DataType::String),
            ])
            .collect()?;

        let parsed: Vec<Option<NaiveDate>> = df
            .column("date")?
            .as_materialized_series()
            .str()?
            .into_iter()
            .map(|value| value.and_then(parse_date))
            .collect();

        let dates: Vec<Option<String>> = parsed
            .iter()
            .map(|d| d.map(|d| d.format(ISO_DATE).to_string()))
            .collect();
        let years: Vec<Option<i32>> = parsed.iter().map(|d| d.map(|d| d.year())).collect();
        let months: Vec<Option<i32>> = parsed
            .iter()
            .map(|d| d.map(|d| d.month() as i32))
            .collect();

        df.with_column(Column::new("date".into(), dates))?;
        df.with_column(Column::new("year".into(), years))?;
        df.with_column(Column::new("month".into(), months))?;

        let loaded = df.height();
        let df = df.lazy().filter(col("date").is_not_null()).collect()?;

        let dropped = loaded - df.height();
        if dropped > 0 {
            warn!(dropped, "Dropped rows with unparseable dates");
        }
        debug!(rows = df.height(), "Funding table ready");

        Ok(FundingTable { df, source: None })
    }
}
