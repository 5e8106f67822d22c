use crate::error::EvalError;
use crate::gates::{approval, push};
use crate::model::{PullRequest, RefChange, Repository};
use crate::policy::{EffectiveConfig, VetoPolicy};
use crate::ports::Lookups;
use crate::report::{MergeDecision, MergeEvaluation, PushDecision, PushEvaluation, RuleOutcome};

/// Evaluate every rule against a pull request, in ascending slot order.
///
/// Vetoes are combined according to `cfg.veto_policy`. With [`VetoPolicy::First`] evaluation
/// stops at the first veto; the other policies evaluate every rule, so a lookup failure in a
/// later rule still fails the whole check.
pub fn evaluate_merge(
    cfg: &EffectiveConfig,
    pr: &PullRequest,
    lookups: Lookups<'_>,
) -> Result<MergeEvaluation, EvalError> {
    let mut outcomes = Vec::new();
    let mut vetoes = Vec::new();

    for rule in cfg.rules.rules() {
        let outcome = approval::check_rule(rule, pr, lookups)?;
        if let RuleOutcome::Vetoed(veto) = &outcome {
            match cfg.veto_policy {
                VetoPolicy::Last => vetoes = vec![veto.clone()],
                VetoPolicy::First | VetoPolicy::All => vetoes.push(veto.clone()),
            }
        }
        outcomes.push((rule.slot, outcome));

        if cfg.veto_policy == VetoPolicy::First && !vetoes.is_empty() {
            break;
        }
    }

    let decision = if vetoes.is_empty() {
        MergeDecision::Accepted
    } else {
        MergeDecision::Vetoed(vetoes)
    };

    Ok(MergeEvaluation { decision, outcomes })
}

/// Evaluate every enabled rule against the references a push updates.
///
/// The first rule whose branch is touched rejects the whole push; later rules are not checked.
pub fn evaluate_push(
    cfg: &EffectiveConfig,
    repository: &Repository,
    changes: &[RefChange],
    lookups: Lookups<'_>,
) -> Result<PushEvaluation, EvalError> {
    let mut rules_checked = 0;

    for rule in cfg.rules.enabled() {
        rules_checked += 1;
        if let Some(ref_id) = push::check_rule(rule, repository, changes, lookups)? {
            return Ok(PushEvaluation {
                decision: PushDecision::Rejected {
                    rule: rule.slot,
                    ref_id: ref_id.to_string(),
                },
                rules_checked,
            });
        }
    }

    Ok(PushEvaluation {
        decision: PushDecision::Accepted,
        rules_checked,
    })
}
