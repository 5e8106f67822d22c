//! Numbered fields -> rule drafts.
//!
//! This is the only place the `enableN` / `branchN` / `approversN` / `minN` layout is known.

use crate::model::{RawSettings, SettingsError};
use branchgate_domain::model::RuleDraft;
use branchgate_types::fields::slots;
use branchgate_types::{FieldError, FieldKind, ids};

/// Read the four fields of one rule slot. A missing `enableN` means disabled.
pub fn rule_draft(raw: &RawSettings, slot: u8) -> Result<RuleDraft, SettingsError> {
    Ok(RuleDraft {
        slot,
        enabled: raw
            .get_bool(&FieldKind::Enable.key(slot))?
            .unwrap_or(false),
        branch: raw.get_string(&FieldKind::Branch.key(slot))?,
        approvers: raw.get_string(&FieldKind::Approvers.key(slot))?,
        min_approvals: raw.get_int(&FieldKind::Min.key(slot))?,
    })
}

/// Drafts for every slot, in slot order. Fails on the first wrongly typed field.
pub fn rule_drafts(raw: &RawSettings) -> Result<Vec<RuleDraft>, SettingsError> {
    slots().map(|slot| rule_draft(raw, slot)).collect()
}

/// Drafts for every slot, turning wrongly typed fields into `invalid_value` field errors.
///
/// A field that fails to read is left unset in its draft.
pub fn rule_drafts_lenient(raw: &RawSettings) -> (Vec<RuleDraft>, Vec<FieldError>) {
    let mut errors = Vec::new();
    let drafts = slots()
        .map(|slot| RuleDraft {
            slot,
            enabled: keep(&mut errors, raw.get_bool(&FieldKind::Enable.key(slot)))
                .unwrap_or(false),
            branch: keep(&mut errors, raw.get_string(&FieldKind::Branch.key(slot))),
            approvers: keep(&mut errors, raw.get_string(&FieldKind::Approvers.key(slot))),
            min_approvals: keep(&mut errors, raw.get_int(&FieldKind::Min.key(slot))),
        })
        .collect();

    (drafts, errors)
}

fn keep<T>(errors: &mut Vec<FieldError>, result: Result<Option<T>, SettingsError>) -> Option<T> {
    result.unwrap_or_else(|err| {
        errors.push(FieldError {
            field: err.key().to_string(),
            code: ids::CODE_INVALID_VALUE.to_string(),
            message: format!("Error: {err}"),
        });
        None
    })
}
