//! Input bar component
//!
//! Provides the text input and send control. The send affordance is disabled
//! while an exchange is pending or before a session exists.

use crate::ui::state::AppState;
use crate::ui::theme::Theme;
use egui::{self, Key, RichText, Vec2};

/// Input bar component for composing messages
pub struct InputBar<'a> {
    state: &'a mut AppState,
    theme: &'a Theme,
}

impl<'a> InputBar<'a> {
    pub fn new(state: &'a mut AppState, theme: &'a Theme) -> Self {
        Self { state, theme }
    }

    pub fn show(mut self, ui: &mut egui::Ui) {
        egui::Frame::none()
            .fill(self.theme.bg_secondary)
            .rounding(self.theme.card_rounding)
            .inner_margin(self.theme.spacing)
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    self.show_text_input(ui);
                    ui.add_space(self.theme.spacing_sm);
                    self.show_send_button(ui);
                });
            });
    }

    fn show_text_input(&mut self, ui: &mut egui::Ui) {
        let is_sending = self.state.pending_send.is_some();

        // Reserve space for the send button
        let available_width = ui.available_width() - 60.0;

        let text_edit = egui::TextEdit::singleline(&mut self.state.input_text)
            .hint_text("Type a question…")
            .desired_width(available_width)
            .font(egui::TextStyle::Body)
            .margin(egui::Margin::symmetric(12.0, 8.0));

        let response = ui.add_enabled(!is_sending, text_edit);

        // Enter submits; validation of empty input happens in submit()
        if response.has_focus() {
            let enter_pressed = ui.input(|i| i.key_pressed(Key::Enter));
            if enter_pressed && !is_sending {
                self.state.submit();
            }
        }

        if !is_sending {
            response.request_focus();
        }
    }

    fn show_send_button(&mut self, ui: &mut egui::Ui) {
        let is_sending = self.state.pending_send.is_some();
        // The button stays enabled on empty input so a click surfaces the
        // validation alert; only a pending send or a missing session disable
        // the affordance.
        let enabled = !is_sending && self.state.session.is_ready();

        let icon = if is_sending { "⏳" } else { "➤" };
        let tooltip = if is_sending {
            "Waiting for the reply…"
        } else if !self.state.session.is_ready() {
            "Waiting for a session"
        } else {
            "Send message (Enter)"
        };

        let button_color = if self.state.can_submit() {
            self.theme.primary
        } else {
            self.theme.text_muted
        };

        let button = egui::Button::new(RichText::new(icon).size(18.0).color(egui::Color32::WHITE))
            .min_size(Vec2::splat(44.0))
            .rounding(self.theme.button_rounding)
            .fill(button_color);

        let response = ui.add_enabled(enabled, button);

        if response.clicked() {
            self.state.submit();
        }

        response.on_hover_text(tooltip);
    }
}
