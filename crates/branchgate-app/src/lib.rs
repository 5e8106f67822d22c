//! Use case orchestration for branchgate.
//!
//! This crate provides the application layer: use cases that coordinate the settings, domain and
//! render layers. It is intentionally thin and delegates heavy lifting to the appropriate layers.
//!
//! The CLI crate depends on this; it only handles argument parsing and I/O.

#![forbid(unsafe_code)]

mod check;
mod explain;
mod input;
mod report;

pub use check::{
    run_merge_check, run_push_check, run_validate, verdict_exit_code, MergeCheckInput,
    PushCheckInput, ValidateInput,
};
pub use explain::{format_explanation, format_not_found, run_explain, ExplainOutput};
pub use input::{
    parse_directory_json, parse_pull_request_json, parse_ref_changes_json, parse_settings,
    SettingsFormat,
};
pub use report::{parse_report_json, runtime_error_report, serialize_report, tool_meta};

pub use branchgate_render::{render_hook_message, render_markdown};
