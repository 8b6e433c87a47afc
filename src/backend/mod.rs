//! Chat backend integration
//!
//! The backend owns all conversational state: the client fetches a session
//! identifier once per launch and then exchanges single request/response
//! messages. Network work runs on a dedicated worker thread behind
//! command/event channels so the UI never blocks.

mod client;
mod pipeline;
mod session;
mod types;

pub use client::BackendClient;
pub use pipeline::{ChatCommand, ChatEvent, ChatPipeline};
pub use session::SessionState;
pub use types::{ChatReply, ChatRequest, ChatResponse, NewSessionResponse};
