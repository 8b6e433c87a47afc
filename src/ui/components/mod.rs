//! Reusable UI components

mod debug_panel;
mod input_bar;
mod message_list;
mod voice_picker;

pub use debug_panel::DebugPanel;
pub use input_bar::InputBar;
pub use message_list::MessageList;
pub use voice_picker::VoicePicker;
