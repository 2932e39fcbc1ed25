#![warn(clippy::all, rust_2018_idioms)]
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")] // hide console window on Windows in release

use eframe_vector::{CanvasConfig, VectorApp};

#[cfg(not(target_arch = "wasm32"))]
/// Optional first argument: path to a JSON canvas config.
fn config_from_args() -> Option<CanvasConfig> {
    let path = std::env::args().nth(1)?;
    match CanvasConfig::load(&path) {
        Ok(config) => {
            log::info!("Loaded canvas config from {path}");
            Some(config)
        }
        Err(err) => {
            log::warn!("Ignoring config {path}: {err}");
            None
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> eframe::Result {
    env_logger::init(); // Log to stderr (if you run with `RUST_LOG=debug`).

    let config = config_from_args();
    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1024.0, 768.0])
            .with_min_inner_size([400.0, 300.0])
            .with_title("Vector Canvas"),
        ..Default::default()
    };
    eframe::run_native(
        "eframe_vector",
        native_options,
        Box::new(|cc| Ok(Box::new(VectorApp::new(cc, config)))),
    )
}

// The canvas is a native app; the library still builds for wasm32.
#[cfg(target_arch = "wasm32")]
fn main() {}
