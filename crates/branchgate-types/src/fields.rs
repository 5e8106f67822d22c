//! Settings field keys as the hosting platform stores them.
//!
//! The platform persists rule configuration as flat, numbered keys (`enable1`, `branch1`,
//! `approvers1`, `min1`, ... up to `min5`). Everything past the settings boundary works with
//! an ordered list of rules instead; these helpers only exist to name fields in that format.

/// Fixed number of rule slots a repository can configure.
pub const MAX_RULES: u8 = 5;

/// Key selecting how the merge gate combines vetoes from several rules.
pub const FIELD_VETO_POLICY: &str = "veto_policy";

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FieldKind {
    Enable,
    Branch,
    Approvers,
    Min,
}

impl FieldKind {
    pub const ALL: [FieldKind; 4] = [
        FieldKind::Enable,
        FieldKind::Branch,
        FieldKind::Approvers,
        FieldKind::Min,
    ];

    pub fn prefix(self) -> &'static str {
        match self {
            FieldKind::Enable => "enable",
            FieldKind::Branch => "branch",
            FieldKind::Approvers => "approvers",
            FieldKind::Min => "min",
        }
    }

    /// Settings key for this field in rule `slot` (1-based).
    pub fn key(self, slot: u8) -> String {
        format!("{}{}", self.prefix(), slot)
    }

    /// Parse a numbered key such as `approvers3` back into its kind and slot.
    ///
    /// Returns `None` for keys outside the numbered format or slots outside `1..=MAX_RULES`.
    pub fn parse_key(key: &str) -> Option<(FieldKind, u8)> {
        FieldKind::ALL.into_iter().find_map(|kind| {
            let digits = key.strip_prefix(kind.prefix())?;
            let slot: u8 = digits.parse().ok()?;
            (1..=MAX_RULES).contains(&slot).then_some((kind, slot))
        })
    }
}

/// Iterate the valid rule slots in evaluation order.
pub fn slots() -> impl Iterator<Item = u8> {
    1..=MAX_RULES
}
