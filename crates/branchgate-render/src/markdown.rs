use branchgate_types::{GateKind, GateReport, Verdict};

pub fn render_markdown(report: &GateReport) -> String {
    let mut out = String::new();

    out.push_str("# Branchgate report\n\n");
    let gate = match report.gate {
        GateKind::Merge => "merge",
        GateKind::Push => "push",
        GateKind::Settings => "settings",
    };
    let verdict = match report.verdict {
        Verdict::Accept => "ACCEPT",
        Verdict::Veto => "VETO",
    };
    out.push_str(&format!("- Gate: `{}`\n- Verdict: **{}**\n", gate, verdict));

    let data = &report.data;
    if let Some(repo) = &data.repository {
        out.push_str(&format!("- Repository: `{}`\n", repo));
    }
    if let Some(pr) = data.pull_request {
        out.push_str(&format!("- Pull request: #{}\n", pr));
    }
    if let Some(changes) = data.ref_changes {
        out.push_str(&format!("- Reference changes: {}\n", changes));
    }
    if let Some(policy) = &data.veto_policy {
        out.push_str(&format!("- Veto policy: `{}`\n", policy));
    }
    out.push_str(&format!(
        "- Rules: {} (applied) / {} (enabled)\n\n",
        data.rules_applied, data.rules_enabled
    ));

    if report.vetoes.is_empty() && report.field_errors.is_empty() {
        out.push_str("No vetoes.\n");
        return out;
    }

    if !report.vetoes.is_empty() {
        out.push_str("## Vetoes\n\n");
        for v in &report.vetoes {
            match v.rule {
                Some(slot) => out.push_str(&format!(
                    "- Rule {} `{}`: **{}**: {}\n",
                    slot, v.code, v.summary, v.message
                )),
                None => out.push_str(&format!(
                    "- `{}`: **{}**: {}\n",
                    v.code, v.summary, v.message
                )),
            }
        }
    }

    if !report.field_errors.is_empty() {
        if !report.vetoes.is_empty() {
            out.push('\n');
        }
        out.push_str("## Field errors\n\n");
        for e in &report.field_errors {
            out.push_str(&format!("- `{}` `{}`: {}\n", e.field, e.code, e.message));
        }
    }

    out
}
