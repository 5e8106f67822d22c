//! Push gate: rejects pushes that update a protected branch directly.

use super::resolve_branch;
use crate::error::EvalError;
use crate::model::{RefChange, Repository, Rule};
use crate::ports::Lookups;

/// Returns the id of the first change that touches the rule's branch, if any.
pub(crate) fn check_rule<'c>(
    rule: &Rule,
    repository: &Repository,
    changes: &'c [RefChange],
    lookups: Lookups<'_>,
) -> Result<Option<&'c str>, EvalError> {
    let protected = resolve_branch(rule, repository, lookups)?;
    Ok(changes
        .iter()
        .find(|c| c.ref_id == protected.id)
        .map(|c| c.ref_id.as_str()))
}
