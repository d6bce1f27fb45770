use eframe::egui::{Color32, RichText, Ui};

pub mod panels;
pub mod plot;
pub mod tables;

/// Informational (non-error) notice, e.g. "enter a search term".
pub fn info(ui: &mut Ui, text: impl Into<String>) {
    ui.label(RichText::new(text).color(Color32::LIGHT_BLUE));
}

/// Something the user should notice, e.g. a term that matched nothing.
pub fn warning(ui: &mut Ui, text: impl Into<String>) {
    ui.label(RichText::new(text).color(Color32::YELLOW));
}
