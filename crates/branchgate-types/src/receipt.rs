use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use time::OffsetDateTime;

/// Stable schema identifier for branchgate reports.
pub const SCHEMA_REPORT_V1: &str = "branchgate.report.v1";

/// Which platform trigger produced the report.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum GateKind {
    Merge,
    Push,
    Settings,
}

impl GateKind {
    pub fn gate_id(self) -> &'static str {
        match self {
            GateKind::Merge => crate::ids::GATE_MERGE,
            GateKind::Push => crate::ids::GATE_PUSH,
            GateKind::Settings => crate::ids::GATE_SETTINGS,
        }
    }
}

/// The decision is binary: a gate either lets the change through or blocks it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Accept,
    Veto,
}

/// One blocking outcome raised by a rule.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Veto {
    /// Rule slot (1-based) that raised the veto; absent for tool-level failures.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rule: Option<u8>,
    pub code: String,
    /// Short title shown by the platform (e.g. "Merge denied").
    pub summary: String,
    /// Detail message shown to the user.
    pub message: String,

    #[serde(default, skip_serializing_if = "serde_json::Value::is_null")]
    pub data: JsonValue,
}

/// Validation problem attached to one settings field (e.g. `branch2`).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct FieldError {
    pub field: String,
    pub code: String,
    pub message: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ToolMeta {
    pub name: String,
    pub version: String,
}

/// Gate-specific summary payload for the report.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema, Default)]
pub struct GateData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repository: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pull_request: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub veto_policy: Option<String>,

    pub rules_enabled: u32,
    /// Rules whose protected branch matched the event.
    pub rules_applied: u32,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub ref_changes: Option<u32>,
}

/// The report envelope written for every gate invocation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct GateReport {
    /// Versioned schema identifier for the envelope shape.
    pub schema: String,
    pub tool: ToolMeta,
    #[schemars(with = "String")]
    #[serde(with = "time::serde::rfc3339")]
    pub started_at: OffsetDateTime,
    #[schemars(with = "String")]
    #[serde(with = "time::serde::rfc3339")]
    pub finished_at: OffsetDateTime,
    pub gate: GateKind,
    pub verdict: Verdict,
    #[serde(default)]
    pub vetoes: Vec<Veto>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub field_errors: Vec<FieldError>,
    pub data: GateData,
}
