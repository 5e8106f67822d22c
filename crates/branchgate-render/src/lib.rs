//! Rendering utilities for the surfaces a gate decision reaches (PR summaries, push hooks).

#![forbid(unsafe_code)]

mod hook;
mod markdown;

pub use hook::render_hook_message;
pub use markdown::render_markdown;
