use eframe::egui::{self, ScrollArea, Ui};

use crate::state::AppState;
use crate::ui::{panels, plot, tables};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct ExplorerApp {
    pub state: AppState,
}

impl ExplorerApp {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

impl eframe::App for ExplorerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: filters ----
        egui::SidePanel::left("filter_panel")
            .default_width(220.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: charts and tables ----
        egui::CentralPanel::default().show(ctx, |ui| {
            let Some(dataset) = &self.state.dataset else {
                ui.centered_and_justified(|ui: &mut Ui| {
                    ui.heading("Open a file to explore articles  (File → Open…)");
                });
                return;
            };
            if dataset.is_empty() {
                ui.heading("The loaded file contains no articles.");
                return;
            }

            ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui: &mut Ui| {
                    plot::percentage_plot(ui, &self.state);
                    ui.separator();
                    tables::metrics_comparison(ui, &self.state);
                    ui.separator();
                    tables::top_posts(ui, &mut self.state);
                    ui.separator();
                    if let Some(dataset) = &self.state.dataset {
                        tables::data_preview(ui, dataset);
                    }
                });
        });
    }
}
