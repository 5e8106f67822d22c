use branchgate_types::{Verdict, Veto};

#[derive(Clone, Debug, PartialEq)]
pub enum MergeDecision {
    Accepted,
    /// Never empty.
    Vetoed(Vec<Veto>),
}

impl MergeDecision {
    pub fn verdict(&self) -> Verdict {
        match self {
            MergeDecision::Accepted => Verdict::Accept,
            MergeDecision::Vetoed(_) => Verdict::Veto,
        }
    }

    pub fn vetoes(&self) -> &[Veto] {
        match self {
            MergeDecision::Accepted => &[],
            MergeDecision::Vetoed(v) => v,
        }
    }
}

/// Push decisions carry no message; the platform words its own rejection.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PushDecision {
    Accepted,
    Rejected { rule: u8, ref_id: String },
}

impl PushDecision {
    pub fn verdict(&self) -> Verdict {
        match self {
            PushDecision::Accepted => Verdict::Accept,
            PushDecision::Rejected { .. } => Verdict::Veto,
        }
    }
}

/// Per-rule outcome, kept for logging and report data.
#[derive(Clone, Debug, PartialEq)]
pub enum RuleOutcome {
    Disabled,
    /// The rule protects a different branch.
    NotApplicable,
    Passed { approvals: usize, required: usize },
    Vetoed(Veto),
}

#[derive(Clone, Debug, PartialEq)]
pub struct MergeEvaluation {
    pub decision: MergeDecision,
    /// `(slot, outcome)` for every rule that was evaluated, in slot order.
    pub outcomes: Vec<(u8, RuleOutcome)>,
}

impl MergeEvaluation {
    pub fn rules_applied(&self) -> u32 {
        self.outcomes
            .iter()
            .filter(|(_, o)| matches!(o, RuleOutcome::Passed { .. } | RuleOutcome::Vetoed(_)))
            .count() as u32
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PushEvaluation {
    pub decision: PushDecision,
    /// Enabled rules checked before the decision was reached.
    pub rules_checked: u32,
}
