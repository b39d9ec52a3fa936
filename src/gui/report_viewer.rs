//! Report Viewer Widget
//! Central scrollable panel: raw data preview plus the selected report.

use crate::charts::{chart_specs, format_amount, ChartPlotter, ChartSpec, RecordColumn};
use crate::data::{FundingRecord, MonthlyMetric};
use crate::report::{InvestorBreakdown, InvestorReport, OverallReport, Report, StartupReport};
use egui::{Color32, ComboBox, RichText, ScrollArea};

const SECTION_SPACING: f32 = 15.0;

const PREVIEW_COLUMNS: [RecordColumn; 7] = [
    RecordColumn::Date,
    RecordColumn::Startup,
    RecordColumn::Vertical,
    RecordColumn::City,
    RecordColumn::Round,
    RecordColumn::Amount,
    RecordColumn::Investors,
];

const RECENT_COLUMNS: [RecordColumn; 6] = [
    RecordColumn::Date,
    RecordColumn::Startup,
    RecordColumn::Vertical,
    RecordColumn::City,
    RecordColumn::Round,
    RecordColumn::Amount,
];

const STARTUP_COLUMNS: [RecordColumn; 6] = [
    RecordColumn::Date,
    RecordColumn::Amount,
    RecordColumn::Vertical,
    RecordColumn::City,
    RecordColumn::Round,
    RecordColumn::Investors,
];

fn find_chart<'a>(charts: &'a [ChartSpec], id: &str) -> Option<&'a ChartSpec> {
    charts.iter().find(|spec| spec.id() == id)
}

/// Scrollable report area.
#[derive(Default)]
pub struct ReportViewer {
    pub report: Option<Report>,
    pub monthly_metric: MonthlyMetric,
    /// Shown instead of any report, e.g. when the CSV failed to load.
    pub error: Option<String>,
    preview: Vec<FundingRecord>,
    charts: Vec<ChartSpec>,
}

impl ReportViewer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_report(&mut self, report: Report) {
        self.charts = chart_specs(&report);
        self.report = Some(report);
    }

    pub fn has_charts(&self) -> bool {
        !self.charts.is_empty()
    }

    pub fn set_preview(&mut self, rows: Vec<FundingRecord>) {
        self.preview = rows;
    }

    /// Clear the current report, keeping the preview.
    pub fn clear_report(&mut self) {
        self.report = None;
        self.charts.clear();
    }

    pub fn clear(&mut self) {
        self.clear_report();
        self.preview.clear();
    }

    /// Draw the viewer
    pub fn show(&mut self, ui: &mut egui::Ui) -> ReportViewerAction {
        let mut action = ReportViewerAction::None;
        let Self {
            report,
            monthly_metric,
            error,
            preview,
            charts,
        } = self;

        ScrollArea::vertical().show(ui, |ui| {
            ui.label(
                RichText::new("📊 Startup Funding Analysis Dashboard")
                    .size(26.0)
                    .strong(),
            );
            ui.add_space(SECTION_SPACING);

            if let Some(error) = error {
                ui.label(
                    RichText::new(error.as_str())
                        .size(14.0)
                        .color(Color32::from_rgb(220, 53, 69)),
                );
                return;
            }

            egui::CollapsingHeader::new(format!("Data preview ({} rows)", preview.len()))
                .default_open(false)
                .show(ui, |ui| {
                    ChartPlotter::draw_records_table(ui, "preview", preview, &PREVIEW_COLUMNS);
                });
            ui.add_space(SECTION_SPACING);

            match report {
                None => {
                    ui.label(
                        RichText::new("Choose a report in the sidebar.")
                            .size(14.0)
                            .color(Color32::GRAY),
                    );
                }
                Some(Report::Overall(report)) => {
                    if Self::show_overall(ui, report, charts, monthly_metric) {
                        action = ReportViewerAction::MonthlyMetricChanged;
                    }
                }
                Some(Report::Startup(report)) => Self::show_startup(ui, report, charts),
                Some(Report::Investor(report)) => Self::show_investor(ui, report, charts),
            }
        });

        action
    }

    fn heading(ui: &mut egui::Ui, text: &str) {
        ui.label(RichText::new(text).size(22.0).strong());
        ui.add_space(8.0);
    }

    fn subheading(ui: &mut egui::Ui, text: &str) {
        ui.add_space(SECTION_SPACING);
        ui.label(RichText::new(text).size(17.0).strong());
        ui.add_space(5.0);
    }

    fn placeholder(ui: &mut egui::Ui, text: &str) {
        ui.label(RichText::new(text).size(14.0).color(Color32::GRAY));
    }

    /// Returns true when the month-on-month metric changed.
    fn show_overall(
        ui: &mut egui::Ui,
        report: &OverallReport,
        charts: &[ChartSpec],
        monthly_metric: &mut MonthlyMetric,
    ) -> bool {
        Self::heading(ui, "Overall Analysis");

        ui.columns(4, |cols| {
            ChartPlotter::draw_metric(
                &mut cols[0],
                "Total Investment",
                &format!("{} cr", format_amount(report.total_investment)),
            );
            match &report.max_funding {
                Some(max) => {
                    ChartPlotter::draw_metric(
                        &mut cols[1],
                        "Maximum Funding in a Startup",
                        &format!("{} cr", format_amount(max.amount)),
                    );
                    cols[1].label(RichText::new(&max.label).size(12.0).color(Color32::GRAY));
                }
                None => ChartPlotter::draw_metric(&mut cols[1], "Maximum Funding in a Startup", "-"),
            }
            ChartPlotter::draw_metric(
                &mut cols[2],
                "Average Investment",
                &format!("{} cr", format_amount(report.average_investment)),
            );
            ChartPlotter::draw_metric(
                &mut cols[3],
                "Number of Funded StartUps",
                &report.funded_startups.to_string(),
            );
        });

        Self::subheading(ui, "Month on Month Investment");
        let before = *monthly_metric;
        ComboBox::from_id_salt("monthly_metric")
            .selected_text(monthly_metric.label())
            .show_ui(ui, |ui| {
                for metric in MonthlyMetric::ALL {
                    ui.selectable_value(monthly_metric, metric, metric.label());
                }
            });
        ui.add_space(5.0);

        match find_chart(charts, "month_on_month") {
            Some(spec) => ChartPlotter::draw(ui, spec),
            None => Self::placeholder(ui, "No data available for the selected option."),
        }

        before != *monthly_metric
    }

    fn show_startup(ui: &mut egui::Ui, report: &StartupReport, charts: &[ChartSpec]) {
        Self::heading(ui, &format!("{} Analysis", report.startup));

        if report.records.is_empty() {
            Self::placeholder(ui, "No funding records found for this startup.");
            return;
        }

        Self::subheading(ui, "Startup Overview");
        ChartPlotter::draw_records_table(ui, "startup_records", &report.records, &STARTUP_COLUMNS);

        if let Some(spec) = find_chart(charts, "funding_over_time") {
            ui.add_space(SECTION_SPACING);
            ChartPlotter::draw(ui, spec);
        }

        ui.add_space(SECTION_SPACING);
        ui.columns(2, |cols| {
            ChartPlotter::draw_metric(
                &mut cols[0],
                "Total Funding",
                &format!("{} cr", format_amount(report.total_funding)),
            );
            ChartPlotter::draw_metric(
                &mut cols[1],
                "Number of Funding Rounds",
                &report.funding_rounds.to_string(),
            );
        });
    }

    fn show_investor(ui: &mut egui::Ui, report: &InvestorReport, charts: &[ChartSpec]) {
        Self::heading(ui, &format!("{} Investments Overview", report.investor()));

        match report {
            InvestorReport::NotFound { .. } => {
                Self::placeholder(ui, "No investments found for this investor.");
            }
            InvestorReport::Insignificant { recent, .. } => {
                Self::subheading(ui, "Most Recent Investments");
                ChartPlotter::draw_records_table(ui, "investor_recent", recent, &RECENT_COLUMNS);
                ui.add_space(SECTION_SPACING);
                Self::placeholder(ui, "No significant investment amounts found for this investor.");
            }
            InvestorReport::Complete(breakdown) => Self::show_breakdown(ui, breakdown, charts),
        }
    }

    fn show_breakdown(ui: &mut egui::Ui, breakdown: &InvestorBreakdown, charts: &[ChartSpec]) {
        Self::subheading(ui, "Most Recent Investments");
        ChartPlotter::draw_records_table(
            ui,
            "investor_recent",
            &breakdown.recent,
            &RECENT_COLUMNS,
        );

        ui.add_space(SECTION_SPACING);
        ui.columns(2, |cols| {
            cols[0].label(RichText::new("Biggest Investments").size(17.0).strong());
            ChartPlotter::draw_amounts_table(
                &mut cols[0],
                "biggest_table",
                "startup",
                &breakdown.biggest,
            );
            if let Some(spec) = find_chart(charts, "biggest_investments") {
                cols[0].add_space(8.0);
                ChartPlotter::draw(&mut cols[0], spec);
            }
            if let Some(spec) = find_chart(charts, "sectors") {
                ChartPlotter::draw(&mut cols[1], spec);
            }
        });

        ui.add_space(SECTION_SPACING);
        ui.columns(2, |cols| {
            if let Some(spec) = find_chart(charts, "stages") {
                ChartPlotter::draw(&mut cols[0], spec);
            }
            if let Some(spec) = find_chart(charts, "cities") {
                ChartPlotter::draw(&mut cols[1], spec);
            }
        });

        if let Some(spec) = find_chart(charts, "year_over_year") {
            ui.add_space(SECTION_SPACING);
            ChartPlotter::draw(ui, spec);
        }
    }
}

/// Actions triggered from inside the report area
#[derive(Debug, Clone, PartialEq)]
pub enum ReportViewerAction {
    None,
    MonthlyMetricChanged,
}
