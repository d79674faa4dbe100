//! Bourracho - desktop chat client for the bourracho conversation service
//!
//! Architecture:
//! - Main thread: runs the egui UI
//! - Engine thread: runs a single-threaded Tokio runtime that polls and sends
//! - Communication via channels (tokio mpsc to the engine, crossbeam back)

use bourracho_client::app::BourrachoApp;
use bourracho_client::{config, logging};
use eframe::egui;

fn main() -> eframe::Result<()> {
    logging::init_tracing();
    let settings = config::load_settings();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Bourracho")
            .with_inner_size([900.0, 640.0])
            .with_min_inner_size([400.0, 300.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Bourracho",
        options,
        Box::new(|cc| Ok(Box::new(BourrachoApp::new(cc, settings)))),
    )
}
