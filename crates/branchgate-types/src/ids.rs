//! Stable identifiers for gates and decision codes.
//!
//! `gate_id` is a dotted namespace. `code` is a short snake_case discriminator.

// Gates
pub const GATE_MERGE: &str = "gate.merge";
pub const GATE_PUSH: &str = "gate.push";
pub const GATE_SETTINGS: &str = "gate.settings";

// Codes: gate.merge
pub const CODE_REQUEST_CLOSED: &str = "request_closed";
pub const CODE_MISSING_APPROVALS: &str = "missing_approvals";

// Codes: gate.push
pub const CODE_PROTECTED_BRANCH_PUSH: &str = "protected_branch_push";

// Codes: gate.settings
pub const CODE_NO_BRANCH_SELECTED: &str = "no_branch_selected";
pub const CODE_UNKNOWN_REFERENCE: &str = "unknown_reference";
pub const CODE_NOT_A_BRANCH: &str = "not_a_branch";
pub const CODE_DUPLICATE_BRANCH: &str = "duplicate_branch";
pub const CODE_NO_APPROVERS: &str = "no_approvers";
pub const CODE_UNKNOWN_USER: &str = "unknown_user";
pub const CODE_MIN_NEGATIVE: &str = "min_negative";
pub const CODE_MIN_EXCEEDS_APPROVERS: &str = "min_exceeds_approvers";
pub const CODE_INVALID_VALUE: &str = "invalid_value";

// Tool-level
pub const CODE_RUNTIME_ERROR: &str = "runtime_error";
