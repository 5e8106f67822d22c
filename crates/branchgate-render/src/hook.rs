use branchgate_types::GateReport;

/// Plain text a pre-receive hook or merge check prints back to the user.
///
/// One line per veto (`summary: message`), then one line per field error (`field: message`).
/// An accepted report renders as the empty string.
pub fn render_hook_message(report: &GateReport) -> String {
    let mut out = String::new();
    for v in &report.vetoes {
        out.push_str(&format!("{}: {}\n", v.summary, v.message));
    }
    for e in &report.field_errors {
        out.push_str(&format!("{}: {}\n", e.field, e.message));
    }
    out
}
