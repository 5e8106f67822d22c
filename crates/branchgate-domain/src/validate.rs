//! Rule settings validation, run before the platform persists a configuration.
//!
//! Uses the same lookups and approver splitting as the gates, so settings that pass here
//! resolve during evaluation as long as users and branches still exist.

use crate::model::{Repository, RuleDraft, split_approvers};
use crate::ports::Lookups;
use branchgate_types::{FieldError, FieldKind, ids};
use std::collections::BTreeSet;

pub const MSG_DUPLICATE_BRANCH: &str = "Error: Multiple rules referring to branch";
pub const MSG_UNKNOWN_REFERENCE: &str = "Error: Unknown reference";
pub const MSG_NOT_A_BRANCH: &str = "Error: Reference is not a branch";
pub const MSG_NO_BRANCH_SELECTED: &str = "Error: No branch selected";
pub const MSG_NO_APPROVERS: &str = "Error: No approvers specified";
pub const MSG_MIN_NEGATIVE: &str = "Error: At least one approver should be required (or 0 for all)";
pub const MSG_MIN_EXCEEDS_APPROVERS: &str =
    "Error: Cannot have a count higher than the number of approvers specified";

/// Validate candidate rules. Returns field errors in slot order; empty means valid.
///
/// Disabled drafts are not checked. A branch claimed by an earlier enabled draft is reported on
/// every later draft naming it, and is not resolved again.
pub fn validate(
    drafts: &[RuleDraft],
    repository: &Repository,
    lookups: Lookups<'_>,
) -> Vec<FieldError> {
    let mut errors = Vec::new();
    let mut claimed: BTreeSet<&str> = BTreeSet::new();

    for draft in drafts.iter().filter(|d| d.enabled) {
        check_branch(draft, repository, lookups, &mut claimed, &mut errors);
        check_approvers(draft, lookups, &mut errors);
        check_min(draft, &mut errors);
    }

    errors
}

fn check_branch<'d>(
    draft: &'d RuleDraft,
    repository: &Repository,
    lookups: Lookups<'_>,
    claimed: &mut BTreeSet<&'d str>,
    errors: &mut Vec<FieldError>,
) {
    let field = FieldKind::Branch.key(draft.slot);

    let Some(branch) = draft.branch.as_deref().filter(|b| !b.is_empty()) else {
        errors.push(error(field, ids::CODE_NO_BRANCH_SELECTED, MSG_NO_BRANCH_SELECTED));
        return;
    };

    if !claimed.insert(branch) {
        errors.push(error(field, ids::CODE_DUPLICATE_BRANCH, MSG_DUPLICATE_BRANCH));
        return;
    }

    match lookups.refs.resolve_ref(repository, branch) {
        None => errors.push(error(field, ids::CODE_UNKNOWN_REFERENCE, MSG_UNKNOWN_REFERENCE)),
        Some(reference) if !reference.is_branch() => {
            errors.push(error(field, ids::CODE_NOT_A_BRANCH, MSG_NOT_A_BRANCH))
        }
        Some(_) => {}
    }
}

fn check_approvers(draft: &RuleDraft, lookups: Lookups<'_>, errors: &mut Vec<FieldError>) {
    let field = FieldKind::Approvers.key(draft.slot);

    // "," splits to nothing, which is as empty as a blank field.
    let tokens = draft
        .approvers
        .as_deref()
        .filter(|a| !a.is_empty())
        .map(split_approvers)
        .unwrap_or_default();
    if tokens.is_empty() {
        errors.push(error(field, ids::CODE_NO_APPROVERS, MSG_NO_APPROVERS));
        return;
    }

    for name in tokens {
        if lookups.users.lookup_user(&name).is_none() {
            errors.push(FieldError {
                field: field.clone(),
                code: ids::CODE_UNKNOWN_USER.to_string(),
                message: format!("Error: User '{name}' unknown"),
            });
        }
    }
}

fn check_min(draft: &RuleDraft, errors: &mut Vec<FieldError>) {
    let field = FieldKind::Min.key(draft.slot);
    let min = draft.min_approvals.unwrap_or(0);

    if min < 0 {
        errors.push(error(field, ids::CODE_MIN_NEGATIVE, MSG_MIN_NEGATIVE));
        return;
    }

    // An absent approvers field is already reported above; only compare against a real list.
    if let Some(approvers) = draft.approvers.as_deref() {
        let tokens = split_approvers(approvers).len() as i64;
        if min > tokens {
            errors.push(error(
                field,
                ids::CODE_MIN_EXCEEDS_APPROVERS,
                MSG_MIN_EXCEEDS_APPROVERS,
            ));
        }
    }
}

fn error(field: String, code: &str, message: &str) -> FieldError {
    FieldError {
        field,
        code: code.to_string(),
        message: message.to_string(),
    }
}
