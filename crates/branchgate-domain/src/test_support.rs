use crate::model::{
    Participant, PullRequest, PullRequestRef, PullRequestState, Reference, Repository, Rule,
    RuleDraft, RuleSet, User,
};
use crate::policy::{EffectiveConfig, VetoPolicy};
use crate::ports::InMemoryDirectory;

pub fn repo() -> Repository {
    Repository::new("PROJ", "app")
}

/// alice, bob, carol and dave; branches `main`, `develop`, `release`; tag `v1.0`.
pub fn directory() -> InMemoryDirectory {
    let repo = repo();
    InMemoryDirectory::default()
        .with_user("alice", "Alice Liddell")
        .with_user("bob", "Bob Builder")
        .with_user("carol", "Carol Danvers")
        .with_user("dave", "Dave Lister")
        .with_ref(&repo, Reference::branch("main"))
        .with_ref(&repo, Reference::branch("develop"))
        .with_ref(&repo, Reference::branch("release"))
        .with_ref(&repo, Reference::tag("v1.0"))
}

pub fn draft(slot: u8, branch: &str, approvers: &str, min: Option<i64>) -> RuleDraft {
    RuleDraft {
        slot,
        enabled: true,
        branch: Some(branch.to_string()),
        approvers: Some(approvers.to_string()),
        min_approvals: min,
    }
}

pub fn rule(slot: u8, branch: &str, approvers: &[&str], min: u32) -> Rule {
    Rule {
        slot,
        enabled: true,
        branch: branch.to_string(),
        approvers: approvers.iter().map(|a| a.to_string()).collect(),
        min_approvals: min,
    }
}

pub fn config(rules: Vec<Rule>) -> EffectiveConfig {
    config_with_policy(rules, VetoPolicy::All)
}

pub fn config_with_policy(rules: Vec<Rule>, veto_policy: VetoPolicy) -> EffectiveConfig {
    EffectiveConfig {
        rules: RuleSet::new(rules).expect("valid rule set"),
        veto_policy,
    }
}

pub fn participant(name: &str, approved: bool) -> Participant {
    let dir = directory();
    let user = dir
        .users
        .iter()
        .find(|u| u.name.as_str() == name)
        .cloned()
        .unwrap_or_else(|| User::new(name, name));
    Participant { user, approved }
}

/// Open pull request by `author` into `branch` with no reviewers yet.
pub fn pull_request(author: &str, branch: &str) -> PullRequest {
    PullRequest {
        id: 7,
        author: participant(author, false),
        to_ref: PullRequestRef {
            id: format!("refs/heads/{branch}"),
            repository: repo(),
        },
        state: PullRequestState::Open,
        reviewers: Vec::new(),
        participants: Vec::new(),
    }
}
