//! Channel layer: output buffering and prompt patterns.
//!
//! Shared by every transport: received bytes are accumulated in a
//! [`PatternBuffer`] (ANSI escapes stripped) and searched for the prompt
//! patterns defined in [`patterns`].

mod buffer;
pub mod patterns;

pub use buffer::PatternBuffer;
pub use patterns::{PromptKind, prompt_kind};
