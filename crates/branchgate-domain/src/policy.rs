use crate::model::RuleSet;
use std::fmt;
use std::str::FromStr;

/// How the merge gate combines vetoes when several rules block the same pull request.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum VetoPolicy {
    /// Stop at the first vetoing rule.
    First,
    /// Evaluate every rule; the last veto replaces earlier ones.
    Last,
    /// Evaluate every rule and report every veto.
    #[default]
    All,
}

impl VetoPolicy {
    pub fn as_str(self) -> &'static str {
        match self {
            VetoPolicy::First => "first",
            VetoPolicy::Last => "last",
            VetoPolicy::All => "all",
        }
    }
}

impl fmt::Display for VetoPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VetoPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "first" => Ok(VetoPolicy::First),
            "last" => Ok(VetoPolicy::Last),
            "all" => Ok(VetoPolicy::All),
            other => Err(format!(
                "unknown veto policy: {other} (expected first|last|all)"
            )),
        }
    }
}

/// Everything the gates need from configuration.
#[derive(Clone, Debug, Default)]
pub struct EffectiveConfig {
    pub rules: RuleSet,
    pub veto_policy: VetoPolicy,
}
