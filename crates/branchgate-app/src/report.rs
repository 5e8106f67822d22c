use anyhow::Context;
use branchgate_types::{
    GateData, GateKind, GateReport, SCHEMA_REPORT_V1, ToolMeta, Verdict, Veto, ids,
};
use time::OffsetDateTime;

pub const RUNTIME_ERROR_SUMMARY: &str = "Gate error";

pub fn tool_meta() -> ToolMeta {
    ToolMeta {
        name: "branchgate".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    }
}

/// Report written when the gate could not reach a decision. It always vetoes.
pub fn runtime_error_report(gate: GateKind, message: &str) -> GateReport {
    let now = OffsetDateTime::now_utc();
    GateReport {
        schema: SCHEMA_REPORT_V1.to_string(),
        tool: tool_meta(),
        started_at: now,
        finished_at: now,
        gate,
        verdict: Verdict::Veto,
        vetoes: vec![Veto {
            rule: None,
            code: ids::CODE_RUNTIME_ERROR.to_string(),
            summary: RUNTIME_ERROR_SUMMARY.to_string(),
            message: message.to_string(),
            data: serde_json::json!({ "gate_id": gate.gate_id() }),
        }],
        field_errors: Vec::new(),
        data: GateData::default(),
    }
}

pub fn serialize_report(report: &GateReport) -> anyhow::Result<Vec<u8>> {
    serde_json::to_vec_pretty(report).context("serialize gate report")
}

pub fn parse_report_json(text: &str) -> anyhow::Result<GateReport> {
    let value: serde_json::Value = serde_json::from_str(text).context("parse report json")?;

    let schema = value
        .get("schema")
        .and_then(|v| v.as_str())
        .unwrap_or_default()
        .to_string();
    if schema != SCHEMA_REPORT_V1 {
        anyhow::bail!("unknown report schema: {schema}");
    }

    serde_json::from_value(value).context("parse branchgate v1 report")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn runtime_error_report_vetoes_without_rule() {
        let report = runtime_error_report(GateKind::Push, "rule 1: approver 'zed' is not a known user");
        assert_eq!(report.verdict, Verdict::Veto);
        assert_eq!(report.gate, GateKind::Push);
        assert_eq!(report.vetoes.len(), 1);
        assert_eq!(report.vetoes[0].rule, None);
        assert_eq!(report.vetoes[0].code, ids::CODE_RUNTIME_ERROR);
        assert_eq!(report.vetoes[0].data["gate_id"], ids::GATE_PUSH);
        assert_eq!(report.tool.name, "branchgate");
    }

    #[test]
    fn serialized_report_parses_back() {
        let report = runtime_error_report(GateKind::Merge, "boom");
        let bytes = serialize_report(&report).expect("serialize");
        let text = String::from_utf8(bytes).expect("utf8");
        let parsed = parse_report_json(&text).expect("parse");
        assert_eq!(parsed.vetoes, report.vetoes);
        assert_eq!(parsed.gate, GateKind::Merge);
    }

    #[test]
    fn rejects_foreign_schema() {
        let err = parse_report_json(r#"{"schema":"other.report.v1"}"#).unwrap_err();
        assert!(err.to_string().contains("unknown report schema"));
    }
}
