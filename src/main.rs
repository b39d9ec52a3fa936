//! Startup Funding Dashboard - desktop entry point
//!
//! Usage: `funding_dashboard [path/to/cleaned_startup_data.csv]`

use anyhow::{anyhow, Result};
use eframe::egui;
use funding_dashboard::config::{DashboardConfig, CONFIG_FILE};
use funding_dashboard::gui::DashboardApp;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    init_logging();

    let config = DashboardConfig::load_or_default(CONFIG_FILE)?.with_args(std::env::args().skip(1));
    info!(data = %config.data_path.display(), "Starting funding dashboard");

    // Configure native options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(config.window_size)
            .with_min_inner_size([1000.0, 600.0])
            .with_title("StartUp Analysis"),
        ..Default::default()
    };

    eframe::run_native(
        "StartUp Analysis",
        options,
        Box::new(move |cc| Ok(Box::new(DashboardApp::new(cc, config)))),
    )
    .map_err(|e| anyhow!("GUI failed: {e}"))
}
