mod app;
mod color;
mod config;
mod data;
mod figure;
mod projection;
mod state;
mod ui;

use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use app::DashboardApp;
use config::DashboardConfig;
use eframe::egui;
use projection::Engine;
use state::AppState;

fn main() -> Result<()> {
    env_logger::init();

    let config = DashboardConfig::default();

    // The window only opens once the dataset is in memory.
    let dataset = match data::loader::load_url(&config.data_url) {
        Ok(ds) => ds,
        Err(e) => {
            log::error!("Failed to load dataset: {e}");
            return Err(e).with_context(|| format!("loading {}", config.data_url));
        }
    };
    log::info!(
        "Loaded {} records: {} careers, {} years, {} states",
        dataset.len(),
        dataset.careers().len(),
        dataset.years().len(),
        dataset.states().len()
    );

    let window_size = config.window_size;
    let engine = Engine::new(Arc::new(dataset), config);
    let state = AppState::new(engine)?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(window_size)
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Sueldos profesionistas – México",
        options,
        Box::new(|_cc| Ok(Box::new(DashboardApp::new(state)))),
    )
    .map_err(|e| anyhow!("running dashboard window: {e}"))
}
