//! Typed rows extracted from the funding table.

use chrono::NaiveDate;

/// One funding record as shown in report tables.
#[derive(Debug, Clone, PartialEq)]
pub struct FundingRecord {
    pub date: NaiveDate,
    pub startup: String,
    pub vertical: String,
    pub city: String,
    pub round: String,
    pub amount: f64,
    pub investors: String,
}

/// A category label with its aggregated amount (in cr).
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryAmount {
    pub label: String,
    pub amount: f64,
}

impl CategoryAmount {
    pub fn new(label: impl Into<String>, amount: f64) -> Self {
        Self {
            label: label.into(),
            amount,
        }
    }
}

/// A value at a calendar date (first-of-month for monthly series).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DatedValue {
    pub date: NaiveDate,
    pub value: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct YearAmount {
    pub year: i32,
    pub amount: f64,
}
