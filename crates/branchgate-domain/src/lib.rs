//! Pure gate evaluation (no IO).
//!
//! Input: a resolved rule configuration, an event snapshot supplied by the hosting platform, and
//! the platform's user/reference lookups behind the [`ports`] traits.
//! Output: an accept/veto decision plus summary data.

#![forbid(unsafe_code)]

pub mod error;
pub mod model;
pub mod policy;
pub mod ports;
pub mod report;

mod engine;
mod gates;
mod validate;

pub use engine::{evaluate_merge, evaluate_push};
pub use error::{EvalError, RuleSetError};
pub use gates::approval::ApprovalTally;
pub use validate::validate;

#[cfg(test)]
mod test_support;
