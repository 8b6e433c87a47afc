//! Audio playback of remote resources
//!
//! Spoken replies arrive as URLs; the playback worker downloads the bytes,
//! decodes them, and plays them on the default output device.

mod playback;

pub use playback::{PlaybackCommand, PlaybackEvent, PlaybackPipeline};
