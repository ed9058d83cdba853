mod app;
mod color;
mod data;
mod state;
mod ui;

use std::path::Path;

use app::HashscopeApp;
use eframe::egui;

fn main() -> eframe::Result {
    env_logger::init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Hashscope – Collision Benchmark Viewer",
        options,
        Box::new(|_cc| {
            let mut app = HashscopeApp::default();

            // Pick up the simulator's conventional output name when it sits
            // next to the binary, so the common case needs no dialog.
            let default_input = Path::new("results_data.csv");
            if default_input.exists() {
                app.state.load_path(default_input);
            }

            Ok(Box::new(app))
        }),
    )
}
