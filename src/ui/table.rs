use eframe::egui::{RichText, Ui};
use egui_extras::{Column, TableBuilder};

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Result preview (central panel)
// ---------------------------------------------------------------------------

/// Render the last filter result as a read-only table.
pub fn result_table(ui: &mut Ui, state: &AppState) {
    let result = match &state.result {
        Some(rs) => rs,
        None => {
            ui.centered_and_justified(|ui: &mut Ui| {
                ui.heading("Pick a data file, enter criteria, then  Filter and save");
            });
            return;
        }
    };

    let columns = result.columns();
    let row_height = ui.text_style_height(&eframe::egui::TextStyle::Body) + 4.0;

    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .columns(Column::auto().at_least(90.0), columns.len().saturating_sub(1))
        .column(Column::remainder())
        .header(row_height + 4.0, |mut header| {
            for name in columns {
                header.col(|ui: &mut Ui| {
                    ui.label(RichText::new(name).strong());
                });
            }
        })
        .body(|body| {
            body.rows(row_height, result.len(), |mut row| {
                let record = &result.rows()[row.index()];
                for value in record.values() {
                    row.col(|ui: &mut Ui| {
                        ui.label(value);
                    });
                }
            });
        });
}
