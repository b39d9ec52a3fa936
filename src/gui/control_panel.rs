//! Control Panel Widget
//! Left side panel with the data source, report selector and triggers.

use egui::{Color32, ComboBox, RichText};

/// Report chosen in the sidebar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportKind {
    #[default]
    Overall,
    Startup,
    Investor,
}

impl ReportKind {
    pub const ALL: [ReportKind; 3] = [ReportKind::Overall, ReportKind::Startup, ReportKind::Investor];

    pub fn label(self) -> &'static str {
        match self {
            ReportKind::Overall => "Overall Analysis",
            ReportKind::Startup => "StartUp",
            ReportKind::Investor => "Investor",
        }
    }
}

/// Left side control panel.
pub struct ControlPanel {
    pub kind: ReportKind,
    pub startups: Vec<String>,
    pub investors: Vec<String>,
    pub selected_startup: String,
    pub selected_investor: String,
    pub source_label: String,
    pub status: String,
}

impl Default for ControlPanel {
    fn default() -> Self {
        Self {
            kind: ReportKind::default(),
            startups: Vec::new(),
            investors: Vec::new(),
            selected_startup: String::new(),
            selected_investor: String::new(),
            source_label: "No file loaded".to_string(),
            status: "Ready".to_string(),
        }
    }
}

impl ControlPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the selectable startups and investors after a load.
    pub fn update_selections(&mut self, startups: Vec<String>, investors: Vec<String>) {
        if !startups.contains(&self.selected_startup) {
            self.selected_startup = startups.first().cloned().unwrap_or_default();
        }
        if !investors.contains(&self.selected_investor) {
            self.selected_investor = investors.first().cloned().unwrap_or_default();
        }
        self.startups = startups;
        self.investors = investors;
    }

    pub fn set_status(&mut self, status: impl Into<String>) {
        self.status = status.into();
    }

    /// Draw the control panel
    pub fn show(&mut self, ui: &mut egui::Ui) -> ControlPanelAction {
        let mut action = ControlPanelAction::None;

        ui.vertical_centered(|ui| {
            ui.add_space(5.0);
            ui.label(
                RichText::new("Startup Funding Analysis")
                    .size(20.0)
                    .color(Color32::from_rgb(78, 115, 223)),
            );
        });
        ui.add_space(10.0);
        ui.separator();
        ui.add_space(5.0);

        // ===== Data Source =====
        ui.label(RichText::new("📁 Data Source").size(14.0).strong());
        ui.add_space(5.0);
        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    ui.label(RichText::new(&self.source_label).size(12.0));
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.button("📂 Open CSV…").clicked() {
                            action = ControlPanelAction::OpenCsv;
                        }
                    });
                });
            });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Report Selection =====
        ComboBox::from_label("Select one")
            .selected_text(self.kind.label())
            .show_ui(ui, |ui| {
                for kind in ReportKind::ALL {
                    if ui
                        .selectable_value(&mut self.kind, kind, kind.label())
                        .clicked()
                    {
                        action = ControlPanelAction::KindChanged;
                    }
                }
            });

        ui.add_space(10.0);

        match self.kind {
            ReportKind::Overall => {}
            ReportKind::Startup => {
                Self::value_selector(ui, "Select StartUp", &self.startups, &mut self.selected_startup);
                ui.add_space(8.0);
                let enabled = !self.selected_startup.is_empty();
                if ui
                    .add_enabled(enabled, egui::Button::new("Find StartUp Details"))
                    .clicked()
                {
                    action = ControlPanelAction::FindStartup;
                }
            }
            ReportKind::Investor => {
                Self::value_selector(
                    ui,
                    "Select Investor",
                    &self.investors,
                    &mut self.selected_investor,
                );
                ui.add_space(8.0);
                let enabled = !self.selected_investor.is_empty();
                if ui
                    .add_enabled(enabled, egui::Button::new("Find Investor Details"))
                    .clicked()
                {
                    action = ControlPanelAction::FindInvestor;
                }
            }
        }

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        let status_color = if self.status.contains("Error") {
            Color32::from_rgb(220, 53, 69)
        } else {
            Color32::GRAY
        };
        ui.label(RichText::new(&self.status).size(11.0).color(status_color));

        action
    }

    fn value_selector(ui: &mut egui::Ui, label: &str, values: &[String], selected: &mut String) {
        ComboBox::from_label(label)
            .width(200.0)
            .selected_text(selected.as_str())
            .show_ui(ui, |ui| {
                egui::ScrollArea::vertical().max_height(300.0).show(ui, |ui| {
                    for value in values {
                        ui.selectable_value(selected, value.clone(), value);
                    }
                });
            });
    }
}

/// Actions triggered by control panel
#[derive(Debug, Clone, PartialEq)]
pub enum ControlPanelAction {
    None,
    OpenCsv,
    KindChanged,
    FindStartup,
    FindInvestor,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_selections_keeps_valid_choice() {
        let mut panel = ControlPanel::new();
        panel.update_selections(
            vec!["Ola".to_string(), "Paytm".to_string()],
            vec!["SoftBank".to_string()],
        );
        assert_eq!(panel.selected_startup, "Ola");
        assert_eq!(panel.selected_investor, "SoftBank");

        panel.selected_startup = "Paytm".to_string();
        panel.update_selections(
            vec!["Paytm".to_string(), "Zomato".to_string()],
            Vec::new(),
        );
        assert_eq!(panel.selected_startup, "Paytm");
        assert_eq!(panel.selected_investor, "");
    }
}
