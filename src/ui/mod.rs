//! GUI implementation with egui/eframe
//!
//! This module provides the desktop user interface for Habla using the
//! eframe framework.

mod app;
mod components;
mod state;
mod theme;

pub use app::HablaApp;
pub use state::{Alert, AppState, CatalogState, DebugInfo, PendingSend, EMPTY_INPUT_NOTICE};
pub use theme::Theme;

use crate::config::AppConfig;

/// Run the Habla application
pub fn run(config: AppConfig) -> eframe::Result<()> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([900.0, 700.0])
            .with_min_inner_size([600.0, 400.0])
            .with_title("Habla Voice Chat"),
        ..Default::default()
    };

    eframe::run_native(
        "Habla",
        options,
        Box::new(|cc| Ok(Box::new(HablaApp::new(cc, config)))),
    )
}
