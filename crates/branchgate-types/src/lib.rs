//! Stable DTOs and IDs used across the branchgate workspace.
//!
//! This crate is intentionally boring:
//! - data types for the emitted gate report
//! - stable string IDs and codes
//! - the numbered settings field keys used at the platform boundary
//! - explain registry for remediation guidance

#![forbid(unsafe_code)]

pub mod explain;
pub mod fields;
pub mod ids;
pub mod receipt;

pub use explain::{lookup_explanation, ExamplePair, Explanation};
pub use fields::{FieldKind, MAX_RULES};
pub use receipt::{
    FieldError, GateData, GateKind, GateReport, ToolMeta, Verdict, Veto, SCHEMA_REPORT_V1,
};
