//! Parsing of the snapshots the hosting platform hands to a gate invocation.

use anyhow::Context;
use branchgate_domain::model::{PullRequest, RefChange};
use branchgate_domain::ports::InMemoryDirectory;
use branchgate_settings::RawSettings;
use camino::Utf8Path;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SettingsFormat {
    Toml,
    Json,
}

impl SettingsFormat {
    /// `.json` files are JSON; everything else is read as TOML.
    pub fn from_path(path: &Utf8Path) -> Self {
        match path.extension() {
            Some(ext) if ext.eq_ignore_ascii_case("json") => SettingsFormat::Json,
            _ => SettingsFormat::Toml,
        }
    }
}

/// Parse settings text. Empty text yields empty settings (every rule disabled).
pub fn parse_settings(text: &str, format: SettingsFormat) -> anyhow::Result<RawSettings> {
    if text.trim().is_empty() {
        return Ok(RawSettings::default());
    }
    match format {
        SettingsFormat::Toml => branchgate_settings::parse_settings_toml(text),
        SettingsFormat::Json => branchgate_settings::parse_settings_json(text),
    }
}

pub fn parse_directory_json(text: &str) -> anyhow::Result<InMemoryDirectory> {
    serde_json::from_str(text).context("parse directory json")
}

pub fn parse_pull_request_json(text: &str) -> anyhow::Result<PullRequest> {
    serde_json::from_str(text).context("parse pull request json")
}

/// Reference changes of one push: a JSON array of `{"ref_id": "..."}` objects.
pub fn parse_ref_changes_json(text: &str) -> anyhow::Result<Vec<RefChange>> {
    serde_json::from_str(text).context("parse ref changes json")
}
