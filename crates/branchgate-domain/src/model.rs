use crate::error::RuleSetError;
use branchgate_types::MAX_RULES;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Login name identifying a user. Approver matching compares these, never display names.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub name: UserId,
    pub display_name: String,
}

impl User {
    pub fn new(name: &str, display_name: &str) -> Self {
        Self {
            name: UserId::new(name),
            display_name: display_name.to_string(),
        }
    }
}

/// Repository coordinates as the platform addresses them (`PROJECT/slug`).
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Repository {
    pub project: String,
    pub slug: String,
}

impl Repository {
    pub fn new(project: &str, slug: &str) -> Self {
        Self {
            project: project.to_string(),
            slug: slug.to_string(),
        }
    }
}

impl fmt::Display for Repository {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.project, self.slug)
    }
}

impl FromStr for Repository {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once('/') {
            Some((project, slug))
                if !project.is_empty() && !slug.is_empty() && !slug.contains('/') =>
            {
                Ok(Repository::new(project, slug))
            }
            _ => Err(format!("expected PROJECT/slug, got '{s}'")),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RefKind {
    Branch,
    Tag,
    Other,
}

/// A resolved reference. `id` is the fully qualified name (`refs/heads/main`) and is what
/// gates compare; `display_id` is the short name users type (`main`).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reference {
    pub id: String,
    pub display_id: String,
    pub kind: RefKind,
}

impl Reference {
    pub fn branch(display_id: &str) -> Self {
        Self {
            id: format!("refs/heads/{display_id}"),
            display_id: display_id.to_string(),
            kind: RefKind::Branch,
        }
    }

    pub fn tag(display_id: &str) -> Self {
        Self {
            id: format!("refs/tags/{display_id}"),
            display_id: display_id.to_string(),
            kind: RefKind::Tag,
        }
    }

    pub fn is_branch(&self) -> bool {
        self.kind == RefKind::Branch
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    pub user: User,
    #[serde(default)]
    pub approved: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PullRequestState {
    Open,
    Merged,
    Declined,
}

/// Target side of a pull request.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PullRequestRef {
    pub id: String,
    pub repository: Repository,
}

/// Read-only pull request snapshot supplied per merge check.
///
/// Reviewer and participant order is the order the platform supplied.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PullRequest {
    pub id: u64,
    pub author: Participant,
    pub to_ref: PullRequestRef,
    pub state: PullRequestState,
    #[serde(default)]
    pub reviewers: Vec<Participant>,
    #[serde(default)]
    pub participants: Vec<Participant>,
}

impl PullRequest {
    pub fn is_closed(&self) -> bool {
        self.state != PullRequestState::Open
    }
}

/// One reference updated by an incoming push.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefChange {
    pub ref_id: String,
}

/// Split an approvers field the way the platform's settings splitter does.
///
/// Tokens are not trimmed or de-duplicated. A field without commas is a single token (even when
/// empty); otherwise trailing empty tokens are dropped while inner empty tokens are kept.
pub fn split_approvers(raw: &str) -> Vec<String> {
    if !raw.contains(',') {
        return vec![raw.to_string()];
    }
    let mut tokens: Vec<String> = raw.split(',').map(str::to_string).collect();
    while tokens.last().is_some_and(|t| t.is_empty()) {
        tokens.pop();
    }
    tokens
}

/// One protection rule in typed form.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Rule {
    /// 1-based position; rules are evaluated in ascending slot order.
    pub slot: u8,
    pub enabled: bool,
    pub branch: String,
    pub approvers: Vec<String>,
    /// 0 means every approver must approve.
    pub min_approvals: u32,
}

impl Rule {
    /// Approvals needed given `available` distinct approvers: 0 means all of them, anything
    /// larger than `available` is clamped down.
    pub fn effective_min(&self, available: usize) -> usize {
        match self.min_approvals as usize {
            0 => available,
            n => n.min(available),
        }
    }
}

/// A rule exactly as entered, before validation. Used by the validator so that settings can be
/// checked before they are persisted.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RuleDraft {
    pub slot: u8,
    pub enabled: bool,
    pub branch: Option<String>,
    pub approvers: Option<String>,
    pub min_approvals: Option<i64>,
}

impl RuleDraft {
    /// Convert into a typed rule. Disabled drafts convert without further checks.
    pub fn into_rule(self) -> Result<Rule, RuleSetError> {
        let slot = self.slot;
        if !self.enabled {
            return Ok(Rule {
                slot,
                enabled: false,
                branch: self.branch.unwrap_or_default(),
                approvers: self
                    .approvers
                    .as_deref()
                    .map(split_approvers)
                    .unwrap_or_default(),
                min_approvals: self
                    .min_approvals
                    .and_then(|m| u32::try_from(m).ok())
                    .unwrap_or(0),
            });
        }

        let branch = self
            .branch
            .filter(|b| !b.is_empty())
            .ok_or(RuleSetError::MissingBranch { slot })?;
        let approvers = self
            .approvers
            .filter(|a| !a.is_empty())
            .map(|a| split_approvers(&a))
            .filter(|tokens| !tokens.is_empty())
            .ok_or(RuleSetError::MissingApprovers { slot })?;
        let min = self.min_approvals.unwrap_or(0);
        let min_approvals =
            u32::try_from(min).map_err(|_| RuleSetError::InvalidMin { slot, value: min })?;

        Ok(Rule {
            slot,
            enabled: true,
            branch,
            approvers,
            min_approvals,
        })
    }
}

/// Ordered list of at most [`MAX_RULES`] rules with unique slots.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RuleSet {
    rules: Vec<Rule>,
}

impl RuleSet {
    pub fn new(mut rules: Vec<Rule>) -> Result<Self, RuleSetError> {
        if rules.len() > MAX_RULES as usize {
            return Err(RuleSetError::TooManyRules { count: rules.len() });
        }
        rules.sort_by_key(|r| r.slot);
        for (i, rule) in rules.iter().enumerate() {
            if !(1..=MAX_RULES).contains(&rule.slot) {
                return Err(RuleSetError::SlotOutOfRange { slot: rule.slot });
            }
            if i > 0 && rules[i - 1].slot == rule.slot {
                return Err(RuleSetError::DuplicateSlot { slot: rule.slot });
            }
            if rule.enabled && rule.approvers.is_empty() {
                return Err(RuleSetError::MissingApprovers { slot: rule.slot });
            }
        }
        Ok(Self { rules })
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn enabled(&self) -> impl Iterator<Item = &Rule> {
        self.rules.iter().filter(|r| r.enabled)
    }
}
