//! Tutor sessions.
//!
//! A `Tutor` binds a student to a subject, a persona and an accumulated
//! conversation history. Every `send` forwards the (compressed) history
//! to chat completion and appends the exchange to storage.

mod chat;
mod compression;
mod manager;
mod types;


pub use manager::Tutor;
pub use types::{CompressionSettings, TutorOptions};
