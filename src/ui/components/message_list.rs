//! Message list component
//!
//! Displays the conversation history as chat bubbles, with playback controls
//! on assistant entries that carry audio.

use crate::messages::{Message, Origin};
use crate::ui::state::{AppState, PendingSend};
use crate::ui::theme::Theme;
use egui::{self, Align, Color32, RichText, Vec2};
use uuid::Uuid;

/// Action requested by the list this frame
enum ListAction {
    Play(Message),
    Stop,
}

/// Message list component
pub struct MessageList<'a> {
    state: &'a mut AppState,
    theme: &'a Theme,
}

impl<'a> MessageList<'a> {
    pub fn new(state: &'a mut AppState, theme: &'a Theme) -> Self {
        Self { state, theme }
    }

    pub fn show(mut self, ui: &mut egui::Ui) {
        let messages = self.state.messages.snapshot();
        let pending = self.state.pending_send.clone();
        let playing = self.state.playing_message;
        let mut action = None;

        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .stick_to_bottom(true)
            .show(ui, |ui| {
                ui.vertical(|ui| {
                    ui.add_space(self.theme.spacing);

                    if messages.is_empty() && pending.is_none() {
                        self.show_empty_state(ui);
                    } else {
                        for message in &messages {
                            if let Some(a) = self.show_message(ui, message, playing) {
                                action = Some(a);
                            }
                            ui.add_space(self.theme.spacing_sm);
                        }

                        if let Some(pending) = &pending {
                            self.show_pending_exchange(ui, pending);
                        }
                    }

                    ui.add_space(self.theme.spacing);
                });
            });

        match action {
            Some(ListAction::Play(message)) => self.state.play_message(&message),
            Some(ListAction::Stop) => self.state.stop_playback(),
            None => {}
        }
    }

    fn show_empty_state(&self, ui: &mut egui::Ui) {
        ui.vertical_centered(|ui| {
            ui.add_space(100.0);

            ui.label(
                RichText::new("Welcome to Habla")
                    .size(24.0)
                    .color(self.theme.text_primary),
            );

            ui.add_space(self.theme.spacing);

            ui.label(
                RichText::new("Ask a question and the assistant will answer out loud.")
                    .size(14.0)
                    .color(self.theme.text_muted),
            );

            ui.add_space(self.theme.spacing_lg);

            ui.horizontal(|ui| {
                ui.spacing_mut().item_spacing = Vec2::splat(self.theme.spacing);

                self.show_hint_card(ui, "Ask", "Type your question below");
                self.show_hint_card(ui, "Listen", "Replies play automatically");
                self.show_hint_card(ui, "Voices", "Pick a voice from the header");
            });
        });
    }

    fn show_hint_card(&self, ui: &mut egui::Ui, title: &str, description: &str) {
        egui::Frame::none()
            .fill(self.theme.bg_secondary)
            .rounding(self.theme.card_rounding)
            .inner_margin(self.theme.spacing)
            .show(ui, |ui| {
                ui.set_width(150.0);
                ui.vertical(|ui| {
                    ui.label(
                        RichText::new(title)
                            .size(14.0)
                            .strong()
                            .color(self.theme.primary),
                    );
                    ui.label(
                        RichText::new(description)
                            .size(12.0)
                            .color(self.theme.text_muted),
                    );
                });
            });
    }

    fn show_message(
        &self,
        ui: &mut egui::Ui,
        message: &Message,
        playing: Option<Uuid>,
    ) -> Option<ListAction> {
        let is_user = message.origin == Origin::User;
        let bubble_color = if is_user {
            self.theme.user_bubble
        } else {
            self.theme.assistant_bubble
        };

        let text_color = if is_user {
            Color32::WHITE
        } else {
            self.theme.text_primary
        };

        let align = if is_user { Align::RIGHT } else { Align::LEFT };
        let mut action = None;

        ui.with_layout(egui::Layout::top_down(align), |ui| {
            // Sender label
            ui.label(
                RichText::new(if is_user { "You" } else { "Habla" })
                    .size(12.0)
                    .color(self.theme.text_muted),
            );

            ui.add_space(2.0);

            let max_width = ui.available_width() * 0.75;

            egui::Frame::none()
                .fill(bubble_color)
                .rounding(self.theme.bubble_rounding)
                .inner_margin(egui::Margin::symmetric(12.0, 8.0))
                .show(ui, |ui| {
                    ui.set_max_width(max_width);

                    ui.label(RichText::new(&message.text).color(text_color));

                    if message.has_audio() {
                        ui.add_space(4.0);
                        action = self.show_audio_controls(ui, message, playing, text_color);
                    }
                });

            // Timestamp
            let time_str = message.timestamp.format("%H:%M").to_string();
            ui.label(
                RichText::new(time_str)
                    .size(10.0)
                    .color(self.theme.text_muted),
            );
        });

        action
    }

    fn show_audio_controls(
        &self,
        ui: &mut egui::Ui,
        message: &Message,
        playing: Option<Uuid>,
        text_color: Color32,
    ) -> Option<ListAction> {
        let is_playing = playing == Some(message.id);
        let mut action = None;

        ui.horizontal(|ui| {
            let (icon, color) = if is_playing {
                ("⏹", self.theme.playing)
            } else {
                ("▶", text_color)
            };

            let button = ui.add(
                egui::Button::new(RichText::new(icon).size(14.0).color(color))
                    .min_size(Vec2::splat(28.0))
                    .rounding(self.theme.button_rounding),
            );

            if button.clicked() {
                action = if is_playing {
                    Some(ListAction::Stop)
                } else {
                    Some(ListAction::Play(message.clone()))
                };
            }

            let caption = if is_playing { "Playing…" } else { "Spoken reply" };
            ui.label(
                RichText::new(caption)
                    .size(11.0)
                    .color(text_color.gamma_multiply(0.8)),
            );
        });

        action
    }

    fn show_pending_exchange(&self, ui: &mut egui::Ui, pending: &PendingSend) {
        // Echo the submitted text right-aligned while the reply is pending
        ui.with_layout(egui::Layout::top_down(Align::RIGHT), |ui| {
            ui.label(
                RichText::new("You")
                    .size(12.0)
                    .color(self.theme.text_muted),
            );

            ui.add_space(2.0);

            let max_width = ui.available_width() * 0.75;

            egui::Frame::none()
                .fill(self.theme.user_bubble.gamma_multiply(0.6))
                .rounding(self.theme.bubble_rounding)
                .inner_margin(egui::Margin::symmetric(12.0, 8.0))
                .show(ui, |ui| {
                    ui.set_max_width(max_width);
                    ui.label(RichText::new(&pending.text).color(Color32::WHITE));
                });
        });

        ui.add_space(self.theme.spacing_sm);

        // Typing indicator for the reply
        ui.with_layout(egui::Layout::top_down(Align::LEFT), |ui| {
            ui.label(
                RichText::new("Habla")
                    .size(12.0)
                    .color(self.theme.text_muted),
            );

            ui.add_space(2.0);

            egui::Frame::none()
                .fill(self.theme.assistant_bubble)
                .rounding(self.theme.bubble_rounding)
                .inner_margin(egui::Margin::symmetric(12.0, 8.0))
                .show(ui, |ui| {
                    ui.horizontal(|ui| {
                        for i in 0..3 {
                            let t = ui.ctx().input(|input| input.time);
                            let alpha = ((t * 3.0 + i as f64 * 0.5).sin() * 0.5 + 0.5) as f32;
                            ui.label(
                                RichText::new("●")
                                    .size(10.0)
                                    .color(self.theme.text_muted.gamma_multiply(alpha)),
                            );
                        }
                    });
                });
        });

        ui.ctx().request_repaint();
    }
}
