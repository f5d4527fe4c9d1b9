#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod app;
mod effects;
mod logging;
mod persistence;
mod ui;

fn main() -> eframe::Result {
    logging::initialize(logging::LogDestination::File);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([700.0, 460.0])
            .with_min_inner_size([620.0, 400.0]),
        ..Default::default()
    };
    eframe::run_native(
        "PDF Batch Highlighter",
        options,
        Box::new(|cc| Ok(Box::new(app::MarkerApp::new(cc)))),
    )
}
