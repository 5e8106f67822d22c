use thiserror::Error;

/// A lookup failed while a gate was evaluating a rule.
///
/// Evaluation stops at the first failure: a rule that cannot be resolved is never treated as
/// satisfied.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum EvalError {
    #[error("rule {slot}: approver '{name}' is not a known user")]
    UnknownUser { slot: u8, name: String },

    #[error("rule {slot}: branch '{branch}' does not resolve in {repository}")]
    UnknownReference {
        slot: u8,
        branch: String,
        repository: String,
    },
}

impl EvalError {
    pub fn slot(&self) -> u8 {
        match self {
            EvalError::UnknownUser { slot, .. } | EvalError::UnknownReference { slot, .. } => *slot,
        }
    }
}

/// A rule configuration cannot be represented as a [`crate::model::RuleSet`].
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum RuleSetError {
    #[error("at most {max} rules are supported, got {count}", max = branchgate_types::MAX_RULES)]
    TooManyRules { count: usize },

    #[error("rule slot {slot} is outside 1..={max}", max = branchgate_types::MAX_RULES)]
    SlotOutOfRange { slot: u8 },

    #[error("rule slot {slot} is configured twice")]
    DuplicateSlot { slot: u8 },

    #[error("rule {slot}: no branch selected")]
    MissingBranch { slot: u8 },

    #[error("rule {slot}: no approvers specified")]
    MissingApprovers { slot: u8 },

    #[error("rule {slot}: minimum approvals must be 0 or more, got {value}")]
    InvalidMin { slot: u8, value: i64 },
}
