//! Settings parsing and rule translation.
//!
//! This crate is IO-free: it parses settings provided as strings and turns the platform's
//! numbered fields into the ordered rule list the gates consume.

#![forbid(unsafe_code)]

mod drafts;
mod model;
mod resolve;

pub use drafts::{rule_draft, rule_drafts, rule_drafts_lenient};
pub use model::{RawSettings, SettingValue, SettingsError};
pub use resolve::{Overrides, ResolvedConfig};

use anyhow::Context;

/// Parse a TOML settings file into the raw field map.
pub fn parse_settings_toml(input: &str) -> anyhow::Result<RawSettings> {
    let raw: RawSettings = toml::from_str(input).context("parse settings TOML")?;
    Ok(raw)
}

/// Parse a JSON settings object (the shape the platform's settings form submits).
pub fn parse_settings_json(input: &str) -> anyhow::Result<RawSettings> {
    let raw: RawSettings = serde_json::from_str(input).context("parse settings JSON")?;
    Ok(raw)
}

/// Resolve the effective config used by the gates (rules + veto policy + overrides).
pub fn resolve_config(raw: &RawSettings, overrides: Overrides) -> anyhow::Result<ResolvedConfig> {
    resolve::resolve_config(raw, overrides)
}
