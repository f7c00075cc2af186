mod app;
mod color;
mod config;
mod data;
mod state;
mod ui;

use app::SatelliteExplorerApp;
use config::Config;
use eframe::egui;

fn main() -> eframe::Result {
    env_logger::init();

    let config = Config::from_env();
    log::info!("Dataset path: {}", config.data_path.display());

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 900.0])
            .with_min_inner_size([700.0, 500.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Satellite Launch Explorer",
        options,
        Box::new(move |_cc| Ok(Box::new(SatelliteExplorerApp::new(&config)))),
    )
}
