use eframe::egui;

use crate::config::Settings;
use crate::state::AppState;
use crate::ui::{panels, table};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct CsvFilterApp {
    pub state: AppState,
}

impl CsvFilterApp {
    pub fn new(settings: Settings) -> Self {
        Self {
            state: AppState::new(settings),
        }
    }
}

impl eframe::App for CsvFilterApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar + status ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: inputs and criteria grid ----
        egui::SidePanel::left("criteria_panel")
            .default_width(480.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: result preview ----
        egui::CentralPanel::default().show(ctx, |ui| {
            table::result_table(ui, &self.state);
        });
    }
}
