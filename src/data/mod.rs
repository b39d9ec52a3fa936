//! Data module - CSV loading and table processing

mod loader;
mod processor;
mod record;

pub use loader::{parse_date, FundingLoader, FundingTable, LoaderError, ISO_DATE, REQUIRED_COLUMNS};
pub use processor::{DataProcessor, InvestorMatch, MonthlyMetric, ProcessorError, OTHER_LABEL};
pub use record::{CategoryAmount, DatedValue, FundingRecord, YearAmount};
