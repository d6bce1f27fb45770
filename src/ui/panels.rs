use eframe::egui::{self, Color32, RichText, Ui};
use egui_extras::DatePickerButton;

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel: date range and search term.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filter options");
    ui.separator();

    let Some((min, max)) = state.dataset.as_ref().and_then(|ds| ds.date_bounds()) else {
        ui.label("No dataset loaded.");
        return;
    };

    ui.strong("Start date");
    let mut start = state.query.start;
    ui.add(DatePickerButton::new(&mut start).id_salt("start_date"));
    state.set_start_date(start);

    ui.add_space(4.0);
    ui.strong("End date");
    let mut end = state.query.end;
    ui.add(DatePickerButton::new(&mut end).id_salt("end_date"));
    state.set_end_date(end);

    ui.label(RichText::new(format!("Data covers {min} to {max}")).small().weak());
    if state.query.start > state.query.end {
        ui.label(RichText::new("Start date is after end date.").color(Color32::YELLOW));
    }

    ui.separator();
    ui.strong("Search term");
    let mut term = state.query.term.clone();
    ui.text_edit_singleline(&mut term);
    state.set_search_term(&term);
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(analysis) = &state.analysis {
            ui.label(format!(
                "{} articles loaded, {} in range",
                analysis.total,
                analysis.date_filtered
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open article data")
        .add_filter("Supported files", &["parquet", "pq", "json", "csv"])
        .add_filter("Parquet", &["parquet", "pq"])
        .add_filter("JSON", &["json"])
        .add_filter("CSV", &["csv"])
        .pick_file();

    if let Some(path) = file {
        match crate::data::loader::load_file(&path) {
            Ok(dataset) => state.set_dataset(dataset),
            Err(e) => {
                log::error!("Failed to load file: {e:#}");
                state.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}
