//! Charts module - Chart descriptions and interactive drawing

mod plotter;
mod spec;

pub use plotter::{ChartPlotter, RecordColumn};
pub use spec::{
    chart_specs, format_amount, CategoryChart, ChartSpec, LineChart, XAxis, ACCENT, PALETTE,
    SECONDARY,
};
