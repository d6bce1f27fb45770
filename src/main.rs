mod analysis;
mod app;
mod color;
mod config;
mod data;
mod state;
mod ui;

use anyhow::Context;
use app::ExplorerApp;
use clap::Parser;
use config::Cli;
use eframe::egui;
use state::AppState;

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let mut state = AppState::from_cli(&cli);
    if let Some(path) = &cli.data {
        let dataset = data::loader::load_file(path).context("startup dataset")?;
        state.set_dataset(dataset);
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 900.0])
            .with_min_inner_size([700.0, 500.0]),
        ..Default::default()
    };

    eframe::run_native(
        "RT Explorer – Article Analysis",
        options,
        Box::new(|_cc| Ok(Box::new(ExplorerApp::new(state)))),
    )
    .map_err(|e| anyhow::anyhow!("{e}"))
}
