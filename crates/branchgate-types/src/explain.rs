//! Explain registry for gates and codes.
//!
//! Maps gate IDs and codes to human-readable explanations with remediation guidance.

use crate::ids;

/// Explanation entry for a gate or code.
#[derive(Debug, Clone)]
pub struct Explanation {
    /// Short description of the gate/code.
    pub title: &'static str,
    /// What the gate does and why it exists.
    pub description: &'static str,
    /// How to resolve a veto or settings error.
    pub remediation: &'static str,
    /// Before/after settings examples.
    pub examples: ExamplePair,
}

/// Before and after settings examples.
#[derive(Debug, Clone)]
pub struct ExamplePair {
    /// Settings that would trigger the code.
    pub before: &'static str,
    /// Settings that pass.
    pub after: &'static str,
}

/// Look up an explanation by gate_id or code.
///
/// Returns `None` if the identifier is not recognized.
pub fn lookup_explanation(identifier: &str) -> Option<Explanation> {
    match identifier {
        // Gate IDs
        ids::GATE_MERGE => Some(explain_merge_gate()),
        ids::GATE_PUSH => Some(explain_push_gate()),
        ids::GATE_SETTINGS => Some(explain_settings_gate()),

        // Codes
        ids::CODE_REQUEST_CLOSED => Some(explain_request_closed()),
        ids::CODE_MISSING_APPROVALS => Some(explain_missing_approvals()),
        ids::CODE_PROTECTED_BRANCH_PUSH => Some(explain_protected_branch_push()),
        ids::CODE_NO_BRANCH_SELECTED => Some(explain_no_branch_selected()),
        ids::CODE_UNKNOWN_REFERENCE => Some(explain_unknown_reference()),
        ids::CODE_NOT_A_BRANCH => Some(explain_not_a_branch()),
        ids::CODE_DUPLICATE_BRANCH => Some(explain_duplicate_branch()),
        ids::CODE_NO_APPROVERS => Some(explain_no_approvers()),
        ids::CODE_UNKNOWN_USER => Some(explain_unknown_user()),
        ids::CODE_MIN_NEGATIVE => Some(explain_min_negative()),
        ids::CODE_MIN_EXCEEDS_APPROVERS => Some(explain_min_exceeds_approvers()),
        ids::CODE_INVALID_VALUE => Some(explain_invalid_value()),

        _ => None,
    }
}

/// List all known gate IDs.
pub fn all_gate_ids() -> &'static [&'static str] {
    &[ids::GATE_MERGE, ids::GATE_PUSH, ids::GATE_SETTINGS]
}

/// List all known codes.
pub fn all_codes() -> &'static [&'static str] {
    &[
        ids::CODE_REQUEST_CLOSED,
        ids::CODE_MISSING_APPROVALS,
        ids::CODE_PROTECTED_BRANCH_PUSH,
        ids::CODE_NO_BRANCH_SELECTED,
        ids::CODE_UNKNOWN_REFERENCE,
        ids::CODE_NOT_A_BRANCH,
        ids::CODE_DUPLICATE_BRANCH,
        ids::CODE_NO_APPROVERS,
        ids::CODE_UNKNOWN_USER,
        ids::CODE_MIN_NEGATIVE,
        ids::CODE_MIN_EXCEEDS_APPROVERS,
        ids::CODE_INVALID_VALUE,
    ]
}

// --- Gate-level explanations ---

fn explain_merge_gate() -> Explanation {
    Explanation {
        title: "Merge Approval Gate",
        description: "\
Runs when the platform asks whether a pull request may be merged.

Every enabled rule whose protected branch is the pull request's target branch is checked:
- a closed pull request is always vetoed
- otherwise the rule's approvers must have approved, at least `min` of them
  (0 means all of them)

The author of the pull request counts as an implicit approval when listed as an approver.",
        remediation: "\
Ask the outstanding approvers named in the veto message to review and approve the
pull request, or adjust the rule's approvers or minimum count.",
        examples: ExamplePair {
            before: r#"enable1 = true
branch1 = "main"
approvers1 = "alice,bob,carol"
min1 = 0"#,
            after: r#"enable1 = true
branch1 = "main"
approvers1 = "alice,bob,carol"
min1 = 2"#,
        },
    }
}

fn explain_push_gate() -> Explanation {
    Explanation {
        title: "Protected Branch Push Gate",
        description: "\
Runs before the platform accepts a push.

If any reference updated by the push is the protected branch of an enabled rule, the
whole push is rejected. Protected branches only change through approved pull requests.",
        remediation: "\
Push to a feature branch and open a pull request against the protected branch.",
        examples: ExamplePair {
            before: "git push origin HEAD:main",
            after: "git push origin HEAD:feature/my-change",
        },
    }
}

fn explain_settings_gate() -> Explanation {
    Explanation {
        title: "Rule Settings Validation",
        description: "\
Runs when an administrator saves rule settings.

Each enabled rule must name an existing branch that no other enabled rule claims, list
known approvers, and use a minimum count between 0 and the number of approvers.",
        remediation: "\
Fix the fields named in the error list and save again.",
        examples: ExamplePair {
            before: r#"enable1 = true
branch1 = ""
approvers1 = """#,
            after: r#"enable1 = true
branch1 = "main"
approvers1 = "alice,bob""#,
        },
    }
}

// --- Code-level explanations ---

fn explain_request_closed() -> Explanation {
    Explanation {
        title: "Pull Request Closed",
        description: "\
The pull request targets a protected branch but is no longer open (merged or declined).
Closed requests are vetoed regardless of their approvals.",
        remediation: "\
Reopen the pull request or open a new one.",
        examples: ExamplePair {
            before: "state = \"DECLINED\"",
            after: "state = \"OPEN\"",
        },
    }
}

fn explain_missing_approvals() -> Explanation {
    Explanation {
        title: "Missing Approvals",
        description: "\
Fewer of the rule's approvers have approved than the rule requires.

Only approvals from listed approvers count. Each approver counts once, whether they
approved as a reviewer, as a participant, or implicitly as the author.",
        remediation: "\
Ask the users named in the veto message to approve the pull request.",
        examples: ExamplePair {
            before: r#"approvers1 = "alice,bob"
min1 = 0   # both must approve"#,
            after: r#"approvers1 = "alice,bob"
min1 = 1   # either may approve"#,
        },
    }
}

fn explain_protected_branch_push() -> Explanation {
    Explanation {
        title: "Push To Protected Branch",
        description: "\
The push updates a branch protected by an enabled rule. Direct pushes would bypass
the approval requirements, so the whole push is rejected.",
        remediation: "\
Push the change to another branch and merge it through a pull request.",
        examples: ExamplePair {
            before: "git push origin main",
            after: "git push origin feature/my-change",
        },
    }
}

fn explain_no_branch_selected() -> Explanation {
    Explanation {
        title: "No Branch Selected",
        description: "\
An enabled rule has an empty branch field.",
        remediation: "\
Select the branch the rule protects, or disable the rule.",
        examples: ExamplePair {
            before: r#"enable1 = true
branch1 = """#,
            after: r#"enable1 = true
branch1 = "main""#,
        },
    }
}

fn explain_unknown_reference() -> Explanation {
    Explanation {
        title: "Unknown Reference",
        description: "\
The branch named by an enabled rule does not exist in the repository.",
        remediation: "\
Create the branch first or fix the branch name.",
        examples: ExamplePair {
            before: r#"branch1 = "mian""#,
            after: r#"branch1 = "main""#,
        },
    }
}

fn explain_not_a_branch() -> Explanation {
    Explanation {
        title: "Reference Is Not A Branch",
        description: "\
The reference named by an enabled rule exists but is a tag or another kind of
reference. Only branches can be protected.",
        remediation: "\
Name a branch instead of a tag.",
        examples: ExamplePair {
            before: r#"branch1 = "v1.0.0""#,
            after: r#"branch1 = "release/1.0""#,
        },
    }
}

fn explain_duplicate_branch() -> Explanation {
    Explanation {
        title: "Multiple Rules For One Branch",
        description: "\
Two enabled rules name the same branch. Each branch may be protected by one rule only;
the error is reported on the second and later rules.",
        remediation: "\
Merge the approvers into a single rule or disable the duplicate.",
        examples: ExamplePair {
            before: r#"branch1 = "main"
branch2 = "main""#,
            after: r#"branch1 = "main"
branch2 = "develop""#,
        },
    }
}

fn explain_no_approvers() -> Explanation {
    Explanation {
        title: "No Approvers Specified",
        description: "\
An enabled rule has an empty approvers field. A rule without approvers could never be
satisfied.",
        remediation: "\
List one or more user names, separated by commas without spaces.",
        examples: ExamplePair {
            before: r#"approvers1 = """#,
            after: r#"approvers1 = "alice,bob""#,
        },
    }
}

fn explain_unknown_user() -> Explanation {
    Explanation {
        title: "Unknown Approver",
        description: "\
An approver name does not match any user in the directory. Names are split on commas
exactly as written, so a space after a comma becomes part of the next name.",
        remediation: "\
Use the user's login name and remove spaces around commas.",
        examples: ExamplePair {
            before: r#"approvers1 = "alice, bob""#,
            after: r#"approvers1 = "alice,bob""#,
        },
    }
}

fn explain_min_negative() -> Explanation {
    Explanation {
        title: "Negative Minimum Approvals",
        description: "\
The minimum approval count is negative.",
        remediation: "\
Require at least one approver, or use 0 to require all of them.",
        examples: ExamplePair {
            before: "min1 = -1",
            after: "min1 = 0",
        },
    }
}

fn explain_min_exceeds_approvers() -> Explanation {
    Explanation {
        title: "Minimum Exceeds Approvers",
        description: "\
The minimum approval count is larger than the number of approvers listed.",
        remediation: "\
Lower the minimum or list more approvers.",
        examples: ExamplePair {
            before: r#"approvers1 = "alice,bob"
min1 = 3"#,
            after: r#"approvers1 = "alice,bob"
min1 = 2"#,
        },
    }
}

fn explain_invalid_value() -> Explanation {
    Explanation {
        title: "Invalid Field Value",
        description: "\
A settings field holds a value of the wrong type, for example text where the
minimum approval count expects a number.",
        remediation: "\
Use a boolean for `enableN`, text for `branchN` and `approversN`, and a whole
number for `minN`.",
        examples: ExamplePair {
            before: r#"min1 = "two""#,
            after: "min1 = 2",
        },
    }
}
