//! Main application struct and eframe integration
//!
//! This module contains the main HablaApp that implements eframe::App and
//! wires the worker pipelines into the UI state.

use crate::audio::PlaybackPipeline;
use crate::backend::{ChatCommand, ChatPipeline, SessionState};
use crate::config::AppConfig;
use crate::ui::components::{DebugPanel, InputBar, MessageList, VoicePicker};
use crate::ui::state::AppState;
use crate::ui::theme::Theme;
use crate::voices::CatalogFetcher;
use egui::{self, Align2, CentralPanel, RichText, SidePanel, TopBottomPanel, Vec2};
use std::time::Instant;
use tracing::warn;

/// Main Habla application
pub struct HablaApp {
    /// Application state
    state: AppState,
    /// Visual theme
    theme: Theme,
    /// Last frame time for FPS calculation
    last_frame_time: Instant,
    /// Whether the app has been initialized
    initialized: bool,
}

impl HablaApp {
    /// Create a new Habla application and start the worker pipelines
    pub fn new(cc: &eframe::CreationContext<'_>, config: AppConfig) -> Self {
        let theme = Theme::dark();
        theme.apply(&cc.egui_ctx);

        let mut state = AppState::new(&config);

        // Chat worker: owns the session and the exchange loop
        let chat = ChatPipeline::new(config.clone());
        state.chat_command_tx = Some(chat.command_sender());
        state.chat_event_rx = Some(chat.event_receiver());
        if chat.start_worker().is_ok() {
            if let Some(tx) = &state.chat_command_tx {
                let _ = tx.send(ChatCommand::FetchSession);
            }
        } else {
            warn!("Chat worker failed to start");
        }

        // One-shot voice catalog fetch
        let catalog = CatalogFetcher::new(config.clone());
        state.catalog_event_rx = Some(catalog.event_receiver());
        if catalog.start().is_err() {
            warn!("Voice catalog fetch failed to start");
        }

        // Playback worker
        let playback = PlaybackPipeline::new(config);
        state.playback_command_tx = Some(playback.command_sender());
        state.playback_event_rx = Some(playback.event_receiver());
        if playback.start_worker().is_err() {
            warn!("Playback worker failed to start");
        }

        Self {
            state,
            theme,
            last_frame_time: Instant::now(),
            initialized: false,
        }
    }

    /// One-time setup on the first frame
    fn initialize(&mut self) {
        if self.initialized {
            return;
        }

        self.state.debug_info.add_log("Habla UI initialized".to_string());
        self.initialized = true;
    }

    /// Show the top header bar
    fn show_header(&mut self, ctx: &egui::Context) {
        TopBottomPanel::top("header")
            .frame(
                egui::Frame::none()
                    .fill(self.theme.bg_secondary)
                    .inner_margin(12.0),
            )
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.label(
                        RichText::new("Habla")
                            .size(20.0)
                            .strong()
                            .color(self.theme.text_primary),
                    );

                    ui.label(
                        RichText::new("Voice Chat")
                            .size(14.0)
                            .color(self.theme.text_muted),
                    );

                    ui.add_space(self.theme.spacing);
                    self.show_session_status(ui);

                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        // Debug toggle
                        if ui.button("🔍").on_hover_text("Toggle debug panel").clicked() {
                            self.state.show_debug_panel = !self.state.show_debug_panel;
                        }

                        // Voice picker
                        if ui.button("🗣").on_hover_text("Choose a voice").clicked() {
                            self.state.show_voice_picker = true;
                        }

                        // Auto-play toggle
                        let auto_label = if self.state.auto_play {
                            "🔊 Auto-play on"
                        } else {
                            "🔇 Auto-play off"
                        };
                        if ui
                            .button(auto_label)
                            .on_hover_text("Play replies automatically")
                            .clicked()
                        {
                            self.state.toggle_auto_play();
                        }
                    });
                });
            });
    }

    fn show_session_status(&mut self, ui: &mut egui::Ui) {
        let (color, label) = match &self.state.session {
            SessionState::Pending => (self.theme.warning, self.state.session.label()),
            SessionState::Ready(_) => (self.theme.success, self.state.session.label()),
            SessionState::Failed(_) => (self.theme.error, self.state.session.label()),
        };

        ui.label(RichText::new("●").size(10.0).color(color));
        ui.label(RichText::new(label).size(12.0).color(self.theme.text_muted));

        if self.state.session.is_failed() && ui.small_button("Retry").clicked() {
            self.state.retry_session();
        }
    }

    /// Show the bottom input area
    fn show_input_area(&mut self, ctx: &egui::Context) {
        TopBottomPanel::bottom("input_area")
            .frame(
                egui::Frame::none()
                    .fill(self.theme.bg_primary)
                    .inner_margin(self.theme.spacing),
            )
            .show(ctx, |ui| {
                InputBar::new(&mut self.state, &self.theme).show(ui);
            });
    }

    /// Show the debug panel on the side
    fn show_debug_panel(&mut self, ctx: &egui::Context) {
        if !self.state.show_debug_panel {
            return;
        }

        SidePanel::right("debug_panel")
            .resizable(true)
            .default_width(300.0)
            .min_width(250.0)
            .max_width(500.0)
            .frame(
                egui::Frame::none()
                    .fill(self.theme.bg_primary)
                    .inner_margin(self.theme.spacing),
            )
            .show(ctx, |ui| {
                DebugPanel::new(&self.state, &self.theme).show(ui);
            });
    }

    /// Show the main content area (message list)
    fn show_content(&mut self, ctx: &egui::Context) {
        CentralPanel::default()
            .frame(egui::Frame::none().fill(self.theme.bg_primary))
            .show(ctx, |ui| {
                MessageList::new(&mut self.state, &self.theme).show(ui);
            });
    }

    /// Show the modal alert, if any
    fn show_alert(&mut self, ctx: &egui::Context) {
        let Some(alert) = self.state.alert.clone() else {
            return;
        };

        let mut dismissed = false;

        egui::Window::new(alert.title.clone())
            .collapsible(false)
            .resizable(false)
            .anchor(Align2::CENTER_CENTER, Vec2::ZERO)
            .show(ctx, |ui| {
                ui.label(RichText::new(&alert.body).color(self.theme.text_primary));
                ui.add_space(self.theme.spacing_sm);
                ui.vertical_centered(|ui| {
                    if ui.button("OK").clicked() {
                        dismissed = true;
                    }
                });
            });

        if dismissed {
            self.state.alert = None;
        }
    }
}

impl eframe::App for HablaApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Calculate delta time for FPS
        let now = Instant::now();
        let delta = now.duration_since(self.last_frame_time).as_secs_f64();
        self.last_frame_time = now;
        self.state.update_fps(delta);

        // Initialize on first frame
        self.initialize();

        // Poll worker events
        self.state.poll_events();

        // Render UI
        self.show_header(ctx);
        self.show_debug_panel(ctx);
        self.show_input_area(ctx);
        self.show_content(ctx);
        VoicePicker::new(&mut self.state, &self.theme).show(ctx);
        self.show_alert(ctx);

        // Keep polling while work is in flight
        if self.state.pending_send.is_some() || self.state.playing_message.is_some() {
            ctx.request_repaint();
        }
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        self.state.debug_info.add_log("Habla shutting down".to_string());
    }
}
