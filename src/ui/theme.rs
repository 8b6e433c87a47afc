//! Theme and styling for the Habla UI
//!
//! This module provides colors and visual styling for the application.

use egui::{Color32, Rounding, Visuals};

/// Application theme configuration
#[derive(Clone, Debug)]
pub struct Theme {
    /// Primary accent color
    pub primary: Color32,
    /// Success color (green)
    pub success: Color32,
    /// Warning color (yellow/orange)
    pub warning: Color32,
    /// Error color (red)
    pub error: Color32,

    /// Background colors
    pub bg_primary: Color32,
    pub bg_secondary: Color32,
    pub bg_tertiary: Color32,

    /// Text colors
    pub text_primary: Color32,
    pub text_secondary: Color32,
    pub text_muted: Color32,

    /// Chat bubble fills
    pub user_bubble: Color32,
    pub assistant_bubble: Color32,

    /// Indicator for the clip currently playing
    pub playing: Color32,

    /// Border radius for buttons
    pub button_rounding: Rounding,
    /// Border radius for cards/panels
    pub card_rounding: Rounding,
    /// Border radius for chat bubbles
    pub bubble_rounding: Rounding,

    /// Standard spacing
    pub spacing: f32,
    /// Large spacing
    pub spacing_lg: f32,
    /// Small spacing
    pub spacing_sm: f32,
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

impl Theme {
    /// Create a dark theme
    pub fn dark() -> Self {
        Self {
            primary: Color32::from_rgb(20, 184, 166),   // Teal
            success: Color32::from_rgb(34, 197, 94),    // Green
            warning: Color32::from_rgb(234, 179, 8),    // Yellow
            error: Color32::from_rgb(239, 68, 68),      // Red

            bg_primary: Color32::from_rgb(15, 23, 42),   // Dark slate
            bg_secondary: Color32::from_rgb(30, 41, 59), // Lighter slate
            bg_tertiary: Color32::from_rgb(51, 65, 85),  // Even lighter

            text_primary: Color32::from_rgb(248, 250, 252),   // Almost white
            text_secondary: Color32::from_rgb(203, 213, 225), // Light gray
            text_muted: Color32::from_rgb(148, 163, 184),     // Medium gray

            user_bubble: Color32::from_rgb(13, 148, 136),     // Teal, darker
            assistant_bubble: Color32::from_rgb(51, 65, 85),  // Slate

            playing: Color32::from_rgb(45, 212, 191), // Bright teal

            button_rounding: Rounding::same(8.0),
            card_rounding: Rounding::same(12.0),
            bubble_rounding: Rounding::same(10.0),

            spacing: 16.0,
            spacing_lg: 24.0,
            spacing_sm: 8.0,
        }
    }

    /// Apply this theme to egui
    pub fn apply(&self, ctx: &egui::Context) {
        let mut visuals = Visuals::dark();
        visuals.panel_fill = self.bg_primary;
        visuals.window_fill = self.bg_secondary;
        visuals.window_rounding = self.card_rounding;
        visuals.widgets.noninteractive.bg_fill = self.bg_secondary;
        visuals.widgets.inactive.bg_fill = self.bg_tertiary;
        visuals.selection.bg_fill = self.primary.gamma_multiply(0.4);
        ctx.set_visuals(visuals);
    }
}
