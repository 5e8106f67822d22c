//! The gate use cases: resolve settings, evaluate a gate, and produce a report.

use crate::report::tool_meta;
use anyhow::Context;
use branchgate_domain::model::{PullRequest, RefChange, Repository};
use branchgate_domain::ports::InMemoryDirectory;
use branchgate_domain::report::{PushDecision, RuleOutcome};
use branchgate_settings::{Overrides, RawSettings};
use branchgate_types::{
    FieldKind, GateData, GateKind, GateReport, SCHEMA_REPORT_V1, Verdict, Veto, ids,
};
use serde_json::json;
use time::OffsetDateTime;
use tracing::{debug, info, info_span, warn};

pub const PUSH_REJECTED_SUMMARY: &str = "Push rejected";

/// Input for the merge check use case.
#[derive(Clone, Debug)]
pub struct MergeCheckInput<'a> {
    pub settings: &'a RawSettings,
    /// CLI overrides.
    pub overrides: Overrides,
    pub directory: &'a InMemoryDirectory,
    pub pull_request: &'a PullRequest,
}

/// Input for the push check use case.
#[derive(Clone, Debug)]
pub struct PushCheckInput<'a> {
    pub settings: &'a RawSettings,
    pub overrides: Overrides,
    pub directory: &'a InMemoryDirectory,
    pub repository: &'a Repository,
    pub changes: &'a [RefChange],
}

/// Input for the settings validation use case.
#[derive(Clone, Debug)]
pub struct ValidateInput<'a> {
    pub settings: &'a RawSettings,
    pub directory: &'a InMemoryDirectory,
    pub repository: &'a Repository,
}

/// Run the merge gate against a pull request snapshot.
///
/// A lookup failure while evaluating is returned as an error, never as an accepted report.
pub fn run_merge_check(input: MergeCheckInput<'_>) -> anyhow::Result<GateReport> {
    let started_at = OffsetDateTime::now_utc();
    let pr = input.pull_request;
    let repository = &pr.to_ref.repository;

    let span = info_span!(
        "merge_check",
        repository = %repository,
        pull_request = pr.id
    );
    let _enter = span.enter();

    let resolved = branchgate_settings::resolve_config(input.settings, input.overrides)
        .context("resolve settings")?;
    let cfg = &resolved.effective;

    let evaluation = branchgate_domain::evaluate_merge(cfg, pr, input.directory.lookups())
        .inspect_err(|err| warn!(rule = err.slot(), error = %err, "lookup failed"))
        .context("evaluate merge gate")?;

    for (slot, outcome) in &evaluation.outcomes {
        match outcome {
            RuleOutcome::Vetoed(veto) => {
                info!(rule = slot, code = %veto.code, detail = %veto.message, "merge vetoed")
            }
            other => debug!(rule = slot, outcome = ?other, "rule evaluated"),
        }
    }

    let vetoes = evaluation.decision.vetoes().to_vec();
    Ok(GateReport {
        schema: SCHEMA_REPORT_V1.to_string(),
        tool: tool_meta(),
        started_at,
        finished_at: OffsetDateTime::now_utc(),
        gate: GateKind::Merge,
        verdict: evaluation.decision.verdict(),
        vetoes,
        field_errors: Vec::new(),
        data: GateData {
            repository: Some(repository.to_string()),
            pull_request: Some(pr.id),
            veto_policy: Some(cfg.veto_policy.to_string()),
            rules_enabled: cfg.rules.enabled().count() as u32,
            rules_applied: evaluation.rules_applied(),
            ref_changes: None,
        },
    })
}

/// Run the push gate against the reference changes of one push.
pub fn run_push_check(input: PushCheckInput<'_>) -> anyhow::Result<GateReport> {
    let started_at = OffsetDateTime::now_utc();
    let span = info_span!(
        "push_check",
        repository = %input.repository,
        ref_changes = input.changes.len()
    );
    let _enter = span.enter();

    let resolved = branchgate_settings::resolve_config(input.settings, input.overrides)
        .context("resolve settings")?;
    let cfg = &resolved.effective;

    let evaluation = branchgate_domain::evaluate_push(
        cfg,
        input.repository,
        input.changes,
        input.directory.lookups(),
    )
    .inspect_err(|err| warn!(rule = err.slot(), error = %err, "lookup failed"))
    .context("evaluate push gate")?;

    let vetoes = match &evaluation.decision {
        PushDecision::Accepted => {
            debug!(rules_checked = evaluation.rules_checked, "push accepted");
            Vec::new()
        }
        PushDecision::Rejected { rule, ref_id } => {
            info!(rule, ref_id = %ref_id, "push rejected");
            vec![Veto {
                rule: Some(*rule),
                code: ids::CODE_PROTECTED_BRANCH_PUSH.to_string(),
                summary: PUSH_REJECTED_SUMMARY.to_string(),
                message: format!(
                    "{ref_id} is protected by rule {rule}; changes must be merged through an approved pull request"
                ),
                data: json!({ "ref_id": ref_id }),
            }]
        }
    };

    Ok(GateReport {
        schema: SCHEMA_REPORT_V1.to_string(),
        tool: tool_meta(),
        started_at,
        finished_at: OffsetDateTime::now_utc(),
        gate: GateKind::Push,
        verdict: evaluation.decision.verdict(),
        vetoes,
        field_errors: Vec::new(),
        data: GateData {
            repository: Some(input.repository.to_string()),
            pull_request: None,
            veto_policy: None,
            rules_enabled: cfg.rules.enabled().count() as u32,
            rules_applied: evaluation.rules_checked,
            ref_changes: Some(input.changes.len() as u32),
        },
    })
}

/// Validate candidate settings before they are persisted.
///
/// Wrongly typed fields become `invalid_value` errors; the rule checks then run on whatever
/// could be read, without repeating errors for fields already reported.
pub fn run_validate(input: ValidateInput<'_>) -> anyhow::Result<GateReport> {
    let started_at = OffsetDateTime::now_utc();
    let span = info_span!("validate", repository = %input.repository);
    let _enter = span.enter();

    let (drafts, mut field_errors) = branchgate_settings::rule_drafts_lenient(input.settings);
    let unreadable: Vec<String> = field_errors.iter().map(|e| e.field.clone()).collect();

    let checked = branchgate_domain::validate(&drafts, input.repository, input.directory.lookups());
    field_errors.extend(
        checked
            .into_iter()
            .filter(|e| !unreadable.contains(&e.field)),
    );
    field_errors.sort_by_key(|e| FieldKind::parse_key(&e.field).map(|(_, slot)| slot));

    let mut veto_policy = None;
    if let Some(policy) = input.settings.veto_policy.as_deref() {
        match policy.parse::<branchgate_domain::policy::VetoPolicy>() {
            Ok(p) => veto_policy = Some(p.to_string()),
            Err(message) => field_errors.push(branchgate_types::FieldError {
                field: branchgate_types::fields::FIELD_VETO_POLICY.to_string(),
                code: ids::CODE_INVALID_VALUE.to_string(),
                message: format!("Error: {message}"),
            }),
        }
    }

    for e in &field_errors {
        info!(field = %e.field, code = %e.code, "invalid setting");
    }

    let enabled = drafts.iter().filter(|d| d.enabled).count() as u32;
    let verdict = if field_errors.is_empty() {
        Verdict::Accept
    } else {
        Verdict::Veto
    };

    Ok(GateReport {
        schema: SCHEMA_REPORT_V1.to_string(),
        tool: tool_meta(),
        started_at,
        finished_at: OffsetDateTime::now_utc(),
        gate: GateKind::Settings,
        verdict,
        vetoes: Vec::new(),
        field_errors,
        data: GateData {
            repository: Some(input.repository.to_string()),
            pull_request: None,
            veto_policy,
            rules_enabled: enabled,
            rules_applied: enabled,
            ref_changes: None,
        },
    })
}

/// Map verdict to exit code: 0 = accept, 2 = veto.
pub fn verdict_exit_code(verdict: Verdict) -> i32 {
    match verdict {
        Verdict::Accept => 0,
        Verdict::Veto => 2,
    }
}
