//! Voice picker dialog
//!
//! Lists the catalog fetched at startup; picking a voice stores the selection
//! and closes the dialog without any network call.

use crate::ui::state::{AppState, CatalogState};
use crate::ui::theme::Theme;
use egui::{self, Align2, RichText, Vec2};

/// Modal voice selection dialog
pub struct VoicePicker<'a> {
    state: &'a mut AppState,
    theme: &'a Theme,
}

impl<'a> VoicePicker<'a> {
    pub fn new(state: &'a mut AppState, theme: &'a Theme) -> Self {
        Self { state, theme }
    }

    pub fn show(mut self, ctx: &egui::Context) {
        if !self.state.show_voice_picker {
            return;
        }

        let mut open = self.state.show_voice_picker;
        let mut picked: Option<String> = None;

        egui::Window::new("Choose a voice")
            .open(&mut open)
            .collapsible(false)
            .resizable(false)
            .anchor(Align2::CENTER_CENTER, Vec2::ZERO)
            .default_width(320.0)
            .show(ctx, |ui| match &self.state.catalog {
                CatalogState::Loading => {
                    ui.horizontal(|ui| {
                        ui.spinner();
                        ui.label(
                            RichText::new("Loading voices…").color(self.theme.text_muted),
                        );
                    });
                }
                CatalogState::Failed(reason) => {
                    ui.label(RichText::new(reason).color(self.theme.warning));
                    ui.label(
                        RichText::new("The default voice stays selected.")
                            .size(12.0)
                            .color(self.theme.text_muted),
                    );
                }
                CatalogState::Loaded(voices) => {
                    egui::ScrollArea::vertical()
                        .max_height(320.0)
                        .show(ui, |ui| {
                            for voice in voices {
                                let selected =
                                    voice.voice_id == self.state.selected_voice_id;

                                let label = if selected {
                                    format!("● {}", voice.name)
                                } else {
                                    format!("○ {}", voice.name)
                                };

                                let row = ui.selectable_label(
                                    selected,
                                    RichText::new(label).color(if selected {
                                        self.theme.primary
                                    } else {
                                        self.theme.text_primary
                                    }),
                                );

                                let labels = voice.label_line();
                                if !labels.is_empty() {
                                    ui.label(
                                        RichText::new(labels)
                                            .size(11.0)
                                            .color(self.theme.text_muted),
                                    );
                                }
                                ui.add_space(self.theme.spacing_sm);

                                if row.clicked() {
                                    picked = Some(voice.voice_id.clone());
                                }
                            }
                        });
                }
            });

        self.state.show_voice_picker = open;
        if let Some(voice_id) = picked {
            self.state.select_voice(voice_id);
        }
    }
}
