use crate::error::EvalError;
use crate::model::{Reference, Repository, Rule, User};
use crate::ports::Lookups;

pub mod approval;
pub mod push;


/// Resolve the rule's protected branch, failing loudly when it no longer exists.
pub(crate) fn resolve_branch(
    rule: &Rule,
    repository: &Repository,
    lookups: Lookups<'_>,
) -> Result<Reference, EvalError> {
    lookups
        .refs
        .resolve_ref(repository, &rule.branch)
        .ok_or_else(|| EvalError::UnknownReference {
            slot: rule.slot,
            branch: rule.branch.clone(),
            repository: repository.to_string(),
        })
}

/// Resolve every approver token in list order. Unknown names are errors, never skipped.
pub(crate) fn resolve_approvers(rule: &Rule, lookups: Lookups<'_>) -> Result<Vec<User>, EvalError> {
    rule.approvers
        .iter()
        .map(|name| {
            lookups
                .users
                .lookup_user(name)
                .ok_or_else(|| EvalError::UnknownUser {
                    slot: rule.slot,
                    name: name.clone(),
                })
        })
        .collect()
}
