//! Chart Plotter Module
//! Creates interactive visualizations using egui_plot and the egui painter.

use crate::charts::spec::{
    format_amount, CategoryChart, ChartSpec, LineChart, Rgb, PALETTE, SECONDARY,
};
use crate::data::{CategoryAmount, FundingRecord};
use egui::{Align2, Color32, FontId, Pos2, RichText, Sense, Shape, Stroke};
use egui_plot::{Bar, BarChart, Line, Plot, PlotPoints, Points};
use std::f32::consts::TAU;

const LINE_HEIGHT: f32 = 320.0;
const PIE_HEIGHT: f32 = 300.0;

/// Table columns a record table can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordColumn {
    Date,
    Startup,
    Vertical,
    City,
    Round,
    Amount,
    Investors,
}

impl RecordColumn {
    pub fn header(self) -> &'static str {
        match self {
            RecordColumn::Date => "date",
            RecordColumn::Startup => "startup",
            RecordColumn::Vertical => "vertical",
            RecordColumn::City => "city",
            RecordColumn::Round => "round",
            RecordColumn::Amount => "amount",
            RecordColumn::Investors => "investors",
        }
    }

    fn cell(self, record: &FundingRecord) -> String {
        match self {
            RecordColumn::Date => record.date.to_string(),
            RecordColumn::Startup => record.startup.clone(),
            RecordColumn::Vertical => record.vertical.clone(),
            RecordColumn::City => record.city.clone(),
            RecordColumn::Round => record.round.clone(),
            RecordColumn::Amount => format_amount(record.amount),
            RecordColumn::Investors => record.investors.clone(),
        }
    }
}

fn color32((r, g, b): Rgb) -> Color32 {
    Color32::from_rgb(r, g, b)
}

/// Draws chart specs, metric tiles and tables into egui.
pub struct ChartPlotter;

impl ChartPlotter {
    /// Get color for a slice.
    pub fn slice_color(index: usize) -> Color32 {
        color32(PALETTE[index % PALETTE.len()])
    }

    pub fn draw(ui: &mut egui::Ui, spec: &ChartSpec) {
        ui.label(RichText::new(spec.title()).size(16.0).strong());
        match spec {
            ChartSpec::Line(chart) => Self::draw_line_chart(ui, chart),
            ChartSpec::Bar(chart) => Self::draw_bar_chart(ui, chart),
            ChartSpec::Pie(chart) => Self::draw_pie_chart(ui, chart),
        }
    }

    /// Line with point markers; x labels follow the chart's axis kind.
    pub fn draw_line_chart(ui: &mut egui::Ui, chart: &LineChart) {
        let x_axis = chart.x_axis;
        let color = color32(chart.color);

        Plot::new(chart.id)
            .height(LINE_HEIGHT)
            .allow_scroll(false)
            .x_axis_label(chart.x_label.clone())
            .y_axis_label(chart.y_label.clone())
            .x_axis_formatter(move |mark, _range| x_axis.format(mark.value))
            .label_formatter(move |_name, point| {
                format!("{}\n{}", x_axis.format(point.x), format_amount(point.y))
            })
            .show(ui, |plot_ui| {
                plot_ui.line(
                    Line::new(PlotPoints::from_iter(chart.points.iter().copied()))
                        .color(color)
                        .width(2.0),
                );
                plot_ui.points(
                    Points::new(PlotPoints::from_iter(chart.points.iter().copied()))
                        .radius(4.0)
                        .color(color),
                );
            });
    }

    /// Vertical bars, one per category, labelled on the x axis.
    pub fn draw_bar_chart(ui: &mut egui::Ui, chart: &CategoryChart) {
        let labels: Vec<String> = chart.entries.iter().map(|e| e.label.clone()).collect();
        let bars: Vec<Bar> = chart
            .entries
            .iter()
            .enumerate()
            .map(|(i, entry)| {
                Bar::new(i as f64, entry.amount)
                    .width(0.6)
                    .name(&entry.label)
            })
            .collect();

        Plot::new(chart.id)
            .height(LINE_HEIGHT)
            .allow_scroll(false)
            .allow_drag(false)
            .y_axis_label("Amount (in cr)")
            .x_axis_formatter(move |mark, _range| {
                let idx = mark.value.round();
                if (mark.value - idx).abs() > 1e-6 || idx < 0.0 {
                    return String::new();
                }
                labels.get(idx as usize).cloned().unwrap_or_default()
            })
            .show(ui, |plot_ui| {
                plot_ui.bar_chart(BarChart::new(bars).color(color32(SECONDARY)));
            });
    }

    /// Pie with percentage labels and a legend beside it.
    pub fn draw_pie_chart(ui: &mut egui::Ui, chart: &CategoryChart) {
        let shares = chart.shares();

        ui.horizontal(|ui| {
            let size = egui::vec2(PIE_HEIGHT, PIE_HEIGHT);
            let (response, painter) = ui.allocate_painter(size, Sense::hover());
            let center = response.rect.center();
            let radius = PIE_HEIGHT * 0.45;

            let mut start = -TAU / 4.0;
            for (idx, share) in shares.iter().enumerate() {
                let sweep = (*share as f32) / 100.0 * TAU;
                let color = Self::slice_color(idx);

                // convex_polygon needs convex pieces, so split into <= 90 degree wedges
                let wedges = ((sweep / (TAU / 4.0)).ceil() as usize).max(1);
                for wedge in 0..wedges {
                    let from = start + sweep * wedge as f32 / wedges as f32;
                    let to = start + sweep * (wedge + 1) as f32 / wedges as f32;
                    let steps = 24;
                    let mut points = vec![center];
                    for step in 0..=steps {
                        let angle = from + (to - from) * step as f32 / steps as f32;
                        points.push(Self::on_circle(center, radius, angle));
                    }
                    painter.add(Shape::convex_polygon(points, color, Stroke::NONE));
                }

                let mid = start + sweep / 2.0;
                painter.text(
                    Self::on_circle(center, radius * 0.65, mid),
                    Align2::CENTER_CENTER,
                    format!("{:.1}%", share),
                    FontId::proportional(12.0),
                    Color32::WHITE,
                );
                start += sweep;
            }

            ui.vertical(|ui| {
                for (idx, entry) in chart.entries.iter().enumerate() {
                    ui.horizontal(|ui| {
                        let (rect, _) =
                            ui.allocate_exact_size(egui::vec2(14.0, 14.0), Sense::hover());
                        ui.painter().rect_filled(rect, 3.0, Self::slice_color(idx));
                        ui.label(RichText::new(&entry.label).size(13.0));
                    });
                }
            });
        });
    }

    fn on_circle(center: Pos2, radius: f32, angle: f32) -> Pos2 {
        Pos2::new(center.x + radius * angle.cos(), center.y + radius * angle.sin())
    }

    /// Numeric metric tile.
    pub fn draw_metric(ui: &mut egui::Ui, label: &str, value: &str) {
        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(8.0)
            .inner_margin(12.0)
            .show(ui, |ui| {
                ui.vertical(|ui| {
                    ui.label(RichText::new(label).size(13.0).color(Color32::GRAY));
                    ui.label(RichText::new(value).size(26.0).strong());
                });
            });
    }

    /// Striped table of funding records.
    pub fn draw_records_table(
        ui: &mut egui::Ui,
        id: &str,
        records: &[FundingRecord],
        columns: &[RecordColumn],
    ) {
        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                egui::Grid::new(ui.make_persistent_id(id))
                    .striped(true)
                    .min_col_width(60.0)
                    .spacing([12.0, 4.0])
                    .show(ui, |ui| {
                        for column in columns {
                            ui.label(RichText::new(column.header()).strong().size(12.0));
                        }
                        ui.end_row();

                        for record in records {
                            for column in columns {
                                ui.label(RichText::new(column.cell(record)).size(12.0));
                            }
                            ui.end_row();
                        }
                    });
            });
    }

    /// Two-column table of category totals.
    pub fn draw_amounts_table(ui: &mut egui::Ui, id: &str, key: &str, entries: &[CategoryAmount]) {
        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                egui::Grid::new(ui.make_persistent_id(id))
                    .striped(true)
                    .min_col_width(80.0)
                    .show(ui, |ui| {
                        ui.label(RichText::new(key).strong().size(12.0));
                        ui.label(RichText::new("amount").strong().size(12.0));
                        ui.end_row();

                        for entry in entries {
                            ui.label(RichText::new(&entry.label).size(12.0));
                            ui.label(RichText::new(format_amount(entry.amount)).size(12.0));
                            ui.end_row();
                        }
                    });
            });
    }
}
