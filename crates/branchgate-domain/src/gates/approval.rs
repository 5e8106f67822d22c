//! Approval gate: decides whether a pull request into a protected branch may merge.

use super::{resolve_approvers, resolve_branch};
use crate::error::EvalError;
use crate::model::{PullRequest, Reference, Rule, User, UserId};
use crate::ports::Lookups;
use crate::report::RuleOutcome;
use branchgate_types::{Veto, ids};
use serde_json::json;
use std::collections::BTreeSet;

pub const CLOSED_SUMMARY: &str = "Request closed";
pub const CLOSED_MESSAGE: &str = "This pull request is already closed";
pub const DENIED_SUMMARY: &str = "Merge denied";
pub const MISSING_APPROVALS_PREFIX: &str = "Still require approvals from the following users: ";

/// Approval accounting for one rule against one pull request.
///
/// The required list is never modified. Satisfied approvers are computed as a set of identities
/// (author first, then approving reviewers, then approving participants), so each required
/// approver counts at most once however many roles they hold.
#[derive(Clone, Debug)]
pub struct ApprovalTally<'a> {
    required: &'a [User],
    distinct: usize,
    satisfied: BTreeSet<&'a UserId>,
}

impl<'a> ApprovalTally<'a> {
    pub fn compute(required: &'a [User], pr: &PullRequest) -> Self {
        let wanted: BTreeSet<&'a UserId> = required.iter().map(|u| &u.name).collect();

        // The author implicitly approves their own change.
        let author = std::iter::once(&pr.author.user.name);
        let explicit = pr
            .reviewers
            .iter()
            .chain(&pr.participants)
            .filter(|p| p.approved)
            .map(|p| &p.user.name);

        let satisfied = author
            .chain(explicit)
            .filter_map(|id| wanted.get(id).copied())
            .collect();

        Self {
            required,
            distinct: wanted.len(),
            satisfied,
        }
    }

    /// Number of distinct required approvers who approved.
    pub fn approvals(&self) -> usize {
        self.satisfied.len()
    }

    /// Number of distinct identities in the required list.
    pub fn distinct_required(&self) -> usize {
        self.distinct
    }

    /// Required approvers still missing, in configured order.
    pub fn outstanding(&self) -> Vec<&'a User> {
        self.required
            .iter()
            .filter(|u| !self.satisfied.contains(&u.name))
            .collect()
    }
}

pub(crate) fn check_rule(
    rule: &Rule,
    pr: &PullRequest,
    lookups: Lookups<'_>,
) -> Result<RuleOutcome, EvalError> {
    if !rule.enabled {
        return Ok(RuleOutcome::Disabled);
    }

    let target = resolve_branch(rule, &pr.to_ref.repository, lookups)?;
    if target.id != pr.to_ref.id {
        return Ok(RuleOutcome::NotApplicable);
    }

    if pr.is_closed() {
        return Ok(RuleOutcome::Vetoed(closed_veto(rule, &target)));
    }

    let required = resolve_approvers(rule, lookups)?;
    let tally = ApprovalTally::compute(&required, pr);
    let min = rule.effective_min(tally.distinct_required());

    if tally.approvals() >= min {
        return Ok(RuleOutcome::Passed {
            approvals: tally.approvals(),
            required: min,
        });
    }

    Ok(RuleOutcome::Vetoed(missing_approvals_veto(
        rule, &target, &tally, min,
    )))
}

fn closed_veto(rule: &Rule, target: &Reference) -> Veto {
    Veto {
        rule: Some(rule.slot),
        code: ids::CODE_REQUEST_CLOSED.to_string(),
        summary: CLOSED_SUMMARY.to_string(),
        message: CLOSED_MESSAGE.to_string(),
        data: json!({ "branch": target.display_id }),
    }
}

fn missing_approvals_veto(
    rule: &Rule,
    target: &Reference,
    tally: &ApprovalTally<'_>,
    min: usize,
) -> Veto {
    let outstanding = tally.outstanding();
    let names = outstanding
        .iter()
        .map(|u| u.display_name.as_str())
        .collect::<Vec<_>>()
        .join(", ");

    Veto {
        rule: Some(rule.slot),
        code: ids::CODE_MISSING_APPROVALS.to_string(),
        summary: DENIED_SUMMARY.to_string(),
        message: format!("{MISSING_APPROVALS_PREFIX}{names}"),
        data: json!({
            "branch": target.display_id,
            "approvals": tally.approvals(),
            "required": min,
            "outstanding": outstanding.iter().map(|u| u.name.as_str()).collect::<Vec<_>>(),
        }),
    }
}
