//! Synthesis voice catalog
//!
//! The catalog is fetched once at startup from the text-to-speech provider.
//! A pre-set default voice is used until the user picks another; the pick is
//! purely local and is only sent along with subsequent chat requests.

mod catalog;

pub use catalog::{CatalogEvent, CatalogFetcher, Voice, VoiceLabels};

/// Voice used before the user has picked one from the catalog.
pub const DEFAULT_VOICE_ID: &str = "21m00Tcm4TlvDq8ikWAM";
