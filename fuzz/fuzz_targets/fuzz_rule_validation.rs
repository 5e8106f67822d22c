//! Fuzz target for approver splitting and rule validation.
//!
//! Goals:
//! - `split_approvers` never yields a trailing empty token for comma-separated input
//! - a draft that validates cleanly always converts into a rule
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_rule_validation
//! ```

#![no_main]

use arbitrary::Arbitrary;
use branchgate_domain::model::{Reference, Repository, RuleDraft, split_approvers};
use branchgate_domain::ports::InMemoryDirectory;
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
struct Input {
    branch: Option<String>,
    approvers: Option<String>,
    min: Option<i64>,
}

fuzz_target!(|input: Input| {
    if let Some(raw) = input.approvers.as_deref() {
        let tokens = split_approvers(raw);
        if raw.contains(',') {
            assert!(tokens.last().is_none_or(|t| !t.is_empty()));
        } else {
            assert_eq!(tokens, vec![raw.to_string()]);
        }
    }

    let repo = Repository::new("PROJ", "app");
    let dir = InMemoryDirectory::default()
        .with_user("alice", "Alice")
        .with_user("bob", "Bob")
        .with_ref(&repo, Reference::branch("main"))
        .with_ref(&repo, Reference::tag("v1"));

    let draft = RuleDraft {
        slot: 1,
        enabled: true,
        branch: input.branch,
        approvers: input.approvers,
        min_approvals: input.min,
    };

    let errors = branchgate_domain::validate(std::slice::from_ref(&draft), &repo, dir.lookups());
    if errors.is_empty() {
        assert!(draft.into_rule().is_ok());
    }
});
