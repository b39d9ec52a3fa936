//! Startup Funding Dashboard
//!
//! Loads a cleaned funding CSV and presents overall, per-startup and
//! per-investor reports as tables, metric tiles and charts.

pub mod charts;
pub mod config;
pub mod data;
pub mod gui;
pub mod report;
