mod app;
mod config;
mod data;
mod state;
mod ui;

use app::CsvFilterApp;
use config::Settings;
use eframe::egui;

fn main() -> eframe::Result {
    env_logger::init();

    let settings = Settings::load().unwrap_or_else(|e| {
        log::error!("Ignoring settings file: {e:#}");
        Settings::default()
    });

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(settings.window_size)
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "CSV Filter",
        options,
        Box::new(|_cc| Ok(Box::new(CsvFilterApp::new(settings)))),
    )
}
