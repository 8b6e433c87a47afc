//! Debug panel component
//!
//! Shows worker status and recent log lines for troubleshooting.

use crate::backend::SessionState;
use crate::ui::state::{AppState, CatalogState};
use crate::ui::theme::Theme;
use egui::{self, RichText};

/// Side panel with diagnostics
pub struct DebugPanel<'a> {
    state: &'a AppState,
    theme: &'a Theme,
}

impl<'a> DebugPanel<'a> {
    pub fn new(state: &'a AppState, theme: &'a Theme) -> Self {
        Self { state, theme }
    }

    pub fn show(self, ui: &mut egui::Ui) {
        ui.label(
            RichText::new("Diagnostics")
                .size(16.0)
                .strong()
                .color(self.theme.text_primary),
        );
        ui.add_space(self.theme.spacing_sm);

        self.show_row(ui, "Session", self.session_status());
        self.show_row(ui, "Voices", self.catalog_status());
        self.show_row(
            ui,
            "Selected voice",
            self.state.selected_voice_id.clone(),
        );
        self.show_row(
            ui,
            "Last round trip",
            match self.state.debug_info.last_round_trip_ms {
                Some(ms) => format!("{ms} ms"),
                None => "—".to_string(),
            },
        );
        self.show_row(ui, "FPS", format!("{:.0}", self.state.debug_info.fps));

        ui.add_space(self.theme.spacing);
        ui.separator();

        ui.label(
            RichText::new("Log")
                .size(13.0)
                .strong()
                .color(self.theme.text_secondary),
        );

        egui::ScrollArea::vertical()
            .stick_to_bottom(true)
            .show(ui, |ui| {
                for line in &self.state.debug_info.log_messages {
                    ui.label(
                        RichText::new(line)
                            .size(11.0)
                            .family(egui::FontFamily::Monospace)
                            .color(self.theme.text_muted),
                    );
                }
            });
    }

    fn show_row(&self, ui: &mut egui::Ui, name: &str, value: String) {
        ui.horizontal(|ui| {
            ui.label(
                RichText::new(name)
                    .size(12.0)
                    .color(self.theme.text_muted),
            );
            ui.label(
                RichText::new(value)
                    .size(12.0)
                    .family(egui::FontFamily::Monospace)
                    .color(self.theme.text_secondary),
            );
        });
    }

    fn session_status(&self) -> String {
        match &self.state.session {
            SessionState::Pending => "pending".to_string(),
            SessionState::Ready(id) => format!("ready ({id})"),
            SessionState::Failed(reason) => format!("failed: {reason}"),
        }
    }

    fn catalog_status(&self) -> String {
        match &self.state.catalog {
            CatalogState::Loading => "loading".to_string(),
            CatalogState::Loaded(voices) => format!("{} voices", voices.len()),
            CatalogState::Failed(reason) => format!("failed: {reason}"),
        }
    }
}
