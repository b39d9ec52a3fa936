//! Funding Dashboard Main Application
//! Main window with control panel and report viewer.

use crate::config::DashboardConfig;
use crate::data::{FundingLoader, FundingTable};
use crate::gui::{ControlPanel, ControlPanelAction, ReportKind, ReportViewer, ReportViewerAction};
use crate::report::{build_report, ReportOptions, Selection};
use egui::SidePanel;
use std::path::Path;
use tracing::{error, info, warn};

/// Rows shown in the collapsible data preview.
const PREVIEW_ROWS: usize = 200;

/// Main application window.
pub struct DashboardApp {
    config: DashboardConfig,
    options: ReportOptions,
    table: Option<FundingTable>,
    control_panel: ControlPanel,
    report_viewer: ReportViewer,
}

impl DashboardApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, config: DashboardConfig) -> Self {
        let mut app = Self {
            options: config.report_options(),
            config,
            table: None,
            control_panel: ControlPanel::new(),
            report_viewer: ReportViewer::new(),
        };
        let path = app.config.data_path.clone();
        app.load_table(&path);
        app
    }

    /// Load a CSV and reset the sidebar choices; failures replace the report area.
    fn load_table(&mut self, path: &Path) {
        self.control_panel.source_label = path
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());

        let table = match FundingLoader::load_csv(path) {
            Ok(table) => table,
            Err(e) => {
                error!(path = %path.display(), error = %e, "Failed to load funding data");
                self.table = None;
                self.report_viewer.clear();
                self.report_viewer.error =
                    Some(format!("Could not load {}: {}", path.display(), e));
                self.control_panel.update_selections(Vec::new(), Vec::new());
                self.control_panel.set_status(format!("Error: {}", e));
                return;
            }
        };

        info!(rows = table.height(), "Funding data ready");
        self.control_panel
            .update_selections(table.startups(), table.investors());
        match table.rows(PREVIEW_ROWS) {
            Ok(rows) => self.report_viewer.set_preview(rows),
            Err(e) => {
                warn!(error = %e, "Could not build data preview");
                self.report_viewer.set_preview(Vec::new());
            }
        }
        self.report_viewer.error = None;
        self.control_panel
            .set_status(format!("Loaded {} rows", table.height()));
        self.table = Some(table);
        self.refresh_for_kind();
    }

    fn handle_open_csv(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("CSV Files", &["csv"])
            .pick_file()
        {
            self.load_table(&path);
        }
    }

    /// Overall renders straight away; the other views wait for their button.
    fn refresh_for_kind(&mut self) {
        self.report_viewer.clear_report();
        if self.control_panel.kind == ReportKind::Overall {
            self.run_report(Selection::Overall);
        }
    }

    fn run_report(&mut self, selection: Selection) {
        let Some(table) = &self.table else {
            self.control_panel.set_status("No data loaded");
            return;
        };

        match build_report(
            table,
            &selection,
            self.report_viewer.monthly_metric,
            &self.options,
        ) {
            Ok(report) => self.report_viewer.set_report(report),
            Err(e) => {
                error!(?selection, error = %e, "Report failed");
                self.report_viewer.clear_report();
                self.control_panel.set_status(format!("Error: {}", e));
            }
        }
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Left panel - Control Panel
        SidePanel::left("control_panel")
            .min_width(300.0)
            .max_width(350.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    let action = self.control_panel.show(ui);

                    match action {
                        ControlPanelAction::OpenCsv => self.handle_open_csv(),
                        ControlPanelAction::KindChanged => self.refresh_for_kind(),
                        ControlPanelAction::FindStartup => {
                            let name = self.control_panel.selected_startup.clone();
                            self.run_report(Selection::Startup(name));
                        }
                        ControlPanelAction::FindInvestor => {
                            let name = self.control_panel.selected_investor.clone();
                            self.run_report(Selection::Investor(name));
                        }
                        ControlPanelAction::None => {}
                    }
                });
            });

        // Central panel - Report Viewer
        egui::CentralPanel::default().show(ctx, |ui| {
            if self.report_viewer.show(ui) == ReportViewerAction::MonthlyMetricChanged {
                self.run_report(Selection::Overall);
            }
        });
    }
}
