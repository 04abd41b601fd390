use std::path::Path;

use eframe::egui::{self, Color32, RichText, ScrollArea, TextEdit, Ui};

use crate::state::{AppState, Severity};

// ---------------------------------------------------------------------------
// Left side panel – file inputs and criteria grid
// ---------------------------------------------------------------------------

/// Render the left panel: file pickers, the criteria editor and the
/// filter button.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Input");
    ui.separator();

    egui::Grid::new("file_inputs")
        .num_columns(3)
        .spacing([8.0, 6.0])
        .show(ui, |ui: &mut Ui| {
            ui.label("Data CSV file:");
            ui.label(path_label(state.data_path.as_deref()));
            if ui.button("Browse").clicked() {
                open_data_dialog(state);
            }
            ui.end_row();

            ui.label("Criteria CSV file:");
            ui.label(path_label(state.criteria_path.as_deref()));
            if ui.button("Browse").clicked() {
                open_criteria_dialog(state);
            }
            ui.end_row();
        });

    ui.add_space(8.0);
    ui.heading("Criteria");
    ui.label(
        RichText::new("Rows are OR-combined, columns within a row are AND-combined.")
            .small()
            .weak(),
    );
    ui.separator();

    criteria_grid(ui, state);

    ui.horizontal(|ui: &mut Ui| {
        if ui.button("Add row").clicked() {
            state.criteria.add_row();
        }
        if ui
            .add_enabled(state.criteria.row_count() > 0, egui::Button::new("Delete row"))
            .clicked()
        {
            state.criteria.delete_row();
        }
        if ui.button("Add column").clicked() {
            let name = format!("Column {}", state.criteria.columns.len() + 1);
            state.criteria.add_column(name);
        }
    });

    ui.add_space(12.0);
    ui.vertical_centered(|ui: &mut Ui| {
        if ui
            .button(RichText::new("Filter and save").strong())
            .clicked()
        {
            filter_and_save(state);
        }
    });
}

/// Editable header row plus one text field per criteria cell.
fn criteria_grid(ui: &mut Ui, state: &mut AppState) {
    let mut remove: Option<usize> = None;

    ScrollArea::both()
        .max_height(360.0)
        .auto_shrink([false, true])
        .show(ui, |ui: &mut Ui| {
            egui::Grid::new("criteria_grid")
                .striped(true)
                .show(ui, |ui: &mut Ui| {
                    for (i, name) in state.criteria.columns.iter_mut().enumerate() {
                        ui.horizontal(|ui: &mut Ui| {
                            ui.add(TextEdit::singleline(name).desired_width(110.0));
                            if ui.small_button("✖").on_hover_text("Remove column").clicked() {
                                remove = Some(i);
                            }
                        });
                    }
                    ui.end_row();

                    for row in state.criteria.rows.iter_mut() {
                        for cell in row.iter_mut() {
                            ui.add(TextEdit::singleline(cell).desired_width(130.0));
                        }
                        ui.end_row();
                    }
                });
        });

    if let Some(i) = remove {
        state.criteria.remove_column(i);
    }
}

fn path_label(path: Option<&Path>) -> RichText {
    match path {
        Some(p) => RichText::new(p.display().to_string()).monospace(),
        None => RichText::new("(none)").weak(),
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open data…").clicked() {
                open_data_dialog(state);
                ui.close_menu();
            }
            if ui.button("Open criteria…").clicked() {
                open_criteria_dialog(state);
                ui.close_menu();
            }
            if ui.button("Filter and save…").clicked() {
                filter_and_save(state);
                ui.close_menu();
            }
            ui.separator();
            if ui.button("Quit").clicked() {
                ui.ctx().send_viewport_cmd(egui::ViewportCommand::Close);
            }
        });

        ui.separator();

        if let Some(result) = &state.result {
            ui.label(format!("{} rows in result", result.len()));
            ui.separator();
        }

        if let Some(msg) = &state.status_message {
            let color = match msg.severity {
                Severity::Info => Color32::LIGHT_GREEN,
                Severity::Warning => Color32::YELLOW,
                Severity::Error => Color32::RED,
            };
            ui.label(RichText::new(&msg.text).color(color));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_data_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Select data CSV file")
        .add_filter("CSV files", &["csv"])
        .pick_file();

    if let Some(path) = file {
        log::info!("Selected data file {}", path.display());
        state.set_data_path(path);
    }
}

pub fn open_criteria_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Select criteria CSV file")
        .add_filter("CSV files", &["csv"])
        .pick_file();

    if let Some(path) = file {
        state.load_criteria(path);
    }
}

/// Run the filter and, if anything matched, ask where to save it.
pub fn filter_and_save(state: &mut AppState) {
    let Some(result) = state.run_filter() else {
        return;
    };

    let target = rfd::FileDialog::new()
        .set_title("Save filtered data")
        .add_filter("CSV files", &["csv"])
        .set_file_name("filtered.csv")
        .save_file();

    if let Some(path) = target {
        state.save_result(&result, &path);
    }
}
