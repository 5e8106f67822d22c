use crate::drafts::rule_drafts;
use crate::model::RawSettings;
use anyhow::Context;
use branchgate_domain::model::RuleSet;
use branchgate_domain::policy::{EffectiveConfig, VetoPolicy};

#[derive(Clone, Debug, Default)]
pub struct Overrides {
    pub veto_policy: Option<String>,
}

#[derive(Clone, Debug)]
pub struct ResolvedConfig {
    pub effective: EffectiveConfig,
}

pub fn resolve_config(raw: &RawSettings, overrides: Overrides) -> anyhow::Result<ResolvedConfig> {
    let drafts = rule_drafts(raw)?;

    let rules = drafts
        .into_iter()
        .map(|draft| {
            let slot = draft.slot;
            draft
                .into_rule()
                .with_context(|| format!("invalid settings for rule {slot}"))
        })
        .collect::<anyhow::Result<Vec<_>>>()?;
    let rules = RuleSet::new(rules)?;

    let veto_policy = match overrides.veto_policy.as_deref().or(raw.veto_policy.as_deref()) {
        Some(v) => parse_veto_policy(v)?,
        None => VetoPolicy::default(),
    };

    Ok(ResolvedConfig {
        effective: EffectiveConfig { rules, veto_policy },
    })
}

fn parse_veto_policy(v: &str) -> anyhow::Result<VetoPolicy> {
    v.parse::<VetoPolicy>().map_err(anyhow::Error::msg)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{parse_settings_json, parse_settings_toml};

    const SETTINGS: &str = r#"
veto_policy = "last"

enable1 = true
branch1 = "main"
approvers1 = "alice,bob,carol"
min1 = 2

enable2 = false
branch2 = "develop"
approvers2 = "dave"
"#;

    #[test]
    fn resolves_rules_and_policy_from_toml() {
        let raw = parse_settings_toml(SETTINGS).expect("parse");
        let resolved = resolve_config(&raw, Overrides::default()).expect("resolve");
        let cfg = resolved.effective;

        assert_eq!(cfg.veto_policy, VetoPolicy::Last);
        assert_eq!(cfg.rules.rules().len(), 5);

        let enabled: Vec<_> = cfg.rules.enabled().collect();
        assert_eq!(enabled.len(), 1);
        assert_eq!(enabled[0].slot, 1);
        assert_eq!(enabled[0].branch, "main");
        assert_eq!(enabled[0].approvers, vec!["alice", "bob", "carol"]);
        assert_eq!(enabled[0].min_approvals, 2);
    }

    #[test]
    fn override_wins_over_file_policy() {
        let raw = parse_settings_toml(SETTINGS).expect("parse");
        let resolved = resolve_config(
            &raw,
            Overrides {
                veto_policy: Some("first".to_string()),
            },
        )
        .expect("resolve");
        assert_eq!(resolved.effective.veto_policy, VetoPolicy::First);
    }

    #[test]
    fn empty_settings_resolve_to_all_disabled() {
        let raw = parse_settings_json("{}").expect("parse");
        let cfg = resolve_config(&raw, Overrides::default())
            .expect("resolve")
            .effective;
        assert_eq!(cfg.veto_policy, VetoPolicy::All);
        assert_eq!(cfg.rules.enabled().count(), 0);
    }

    #[test]
    fn rejects_unknown_veto_policy() {
        let raw = parse_settings_json(r#"{"veto_policy":"some"}"#).expect("parse");
        let err = resolve_config(&raw, Overrides::default()).unwrap_err();
        assert!(err.to_string().contains("unknown veto policy: some"));
    }

    #[test]
    fn enabled_rule_without_approvers_fails_with_slot_context() {
        let raw = parse_settings_json(r#"{"enable2":true,"branch2":"main"}"#).expect("parse");
        let err = resolve_config(&raw, Overrides::default()).unwrap_err();
        assert_eq!(err.to_string(), "invalid settings for rule 2");
    }

    #[test]
    fn wrong_typed_field_fails_resolution() {
        let raw = parse_settings_json(r#"{"enable1":true,"branch1":"main","approvers1":"a","min1":"x"}"#)
            .expect("parse");
        let err = resolve_config(&raw, Overrides::default()).unwrap_err();
        assert!(err.to_string().contains("min1"));
    }

    #[test]
    fn json_numeric_strings_are_accepted_for_min() {
        let raw = parse_settings_json(
            r#"{"enable1":true,"branch1":"main","approvers1":"alice,bob","min1":"1"}"#,
        )
        .expect("parse");
        let cfg = resolve_config(&raw, Overrides::default())
            .expect("resolve")
            .effective;
        assert_eq!(cfg.rules.rules()[0].min_approvals, 1);
    }
}
