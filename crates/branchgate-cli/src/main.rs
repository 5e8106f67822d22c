//! CLI entry point for branchgate.
//!
//! This module is intentionally thin: it handles argument parsing, I/O, logging setup, and exit
//! codes. All business logic lives in the `branchgate-app` crate.

use anyhow::Context;
use branchgate_app::{
    ExplainOutput, MergeCheckInput, PushCheckInput, SettingsFormat, ValidateInput,
    parse_directory_json, parse_pull_request_json, parse_ref_changes_json, parse_report_json,
    parse_settings, render_hook_message, render_markdown, run_explain, run_merge_check,
    run_push_check, run_validate, runtime_error_report, serialize_report, verdict_exit_code,
};
use branchgate_domain::model::Repository;
use branchgate_domain::ports::InMemoryDirectory;
use branchgate_settings::{Overrides, RawSettings};
use branchgate_types::{GateKind, GateReport};
use camino::{Utf8Path, Utf8PathBuf};
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(
    name = "branchgate",
    version,
    about = "Branch protection and approval gates for pull requests and pushes"
)]
struct Cli {
    /// Repository settings file (TOML, or JSON when the extension is `.json`).
    #[arg(long, global = true, default_value = "branchgate.toml")]
    settings: Utf8PathBuf,

    /// JSON snapshot of the platform's users and references.
    #[arg(long, global = true, default_value = "directory.json")]
    directory: Utf8PathBuf,

    /// Override how merge vetoes combine (first|last|all).
    #[arg(long, global = true)]
    veto_policy: Option<String>,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Decide whether a pull request may merge.
    MergeCheck {
        /// Pull request snapshot (JSON).
        #[arg(long)]
        pull_request: Utf8PathBuf,

        /// Where to write the JSON report.
        #[arg(long, default_value = "artifacts/branchgate/report.json")]
        report_out: Utf8PathBuf,

        /// Also write a Markdown summary here.
        #[arg(long)]
        markdown_out: Option<Utf8PathBuf>,
    },

    /// Decide whether a push may update the given references.
    PushCheck {
        /// Repository as PROJECT/slug.
        #[arg(long)]
        repository: Repository,

        /// Reference changes of the push (JSON array of {"ref_id": ...}).
        #[arg(long)]
        changes: Utf8PathBuf,

        /// Where to write the JSON report.
        #[arg(long, default_value = "artifacts/branchgate/report.json")]
        report_out: Utf8PathBuf,
    },

    /// Validate repository settings before saving them.
    Validate {
        /// Repository as PROJECT/slug.
        #[arg(long)]
        repository: Repository,

        /// Where to write the JSON report.
        #[arg(long, default_value = "artifacts/branchgate/report.json")]
        report_out: Utf8PathBuf,
    },

    /// Render Markdown from an existing JSON report.
    Md {
        /// Path to the JSON report file.
        #[arg(long, default_value = "artifacts/branchgate/report.json")]
        report: Utf8PathBuf,

        /// Where to write the Markdown output (if not specified, prints to stdout).
        #[arg(long, short)]
        output: Option<Utf8PathBuf>,
    },

    /// Explain a gate id or code with remediation guidance.
    Explain {
        /// The gate id (e.g. "gate.merge") or code (e.g. "missing_approvals") to explain.
        identifier: String,
    },
}

fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();

    match &cli.cmd {
        Commands::MergeCheck {
            pull_request,
            report_out,
            markdown_out,
        } => cmd_merge_check(&cli, pull_request, report_out, markdown_out.as_deref()),
        Commands::PushCheck {
            repository,
            changes,
            report_out,
        } => cmd_push_check(&cli, repository, changes, report_out),
        Commands::Validate {
            repository,
            report_out,
        } => cmd_validate(&cli, repository, report_out),
        Commands::Md { report, output } => cmd_md(report, output.as_deref()),
        Commands::Explain { identifier } => cmd_explain(identifier),
    }
}

/// Logs go to stderr; stdout carries the hook message and rendered output.
fn init_logging() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn cmd_merge_check(
    cli: &Cli,
    pull_request: &Utf8Path,
    report_out: &Utf8Path,
    markdown_out: Option<&Utf8Path>,
) -> anyhow::Result<()> {
    run_gate(GateKind::Merge, report_out, || {
        let settings = load_settings(&cli.settings)?;
        let directory = load_directory(&cli.directory)?;
        let pr = parse_pull_request_json(&read_text(pull_request, "pull request")?)?;

        let report = run_merge_check(MergeCheckInput {
            settings: &settings,
            overrides: overrides(cli),
            directory: &directory,
            pull_request: &pr,
        })?;

        if let Some(path) = markdown_out {
            write_text_file(path, &render_markdown(&report)).context("write markdown")?;
        }
        Ok(report)
    })
}

fn cmd_push_check(
    cli: &Cli,
    repository: &Repository,
    changes: &Utf8Path,
    report_out: &Utf8Path,
) -> anyhow::Result<()> {
    run_gate(GateKind::Push, report_out, || {
        let settings = load_settings(&cli.settings)?;
        let directory = load_directory(&cli.directory)?;
        let changes = parse_ref_changes_json(&read_text(changes, "ref changes")?)?;

        run_push_check(PushCheckInput {
            settings: &settings,
            overrides: overrides(cli),
            directory: &directory,
            repository,
            changes: &changes,
        })
    })
}

fn cmd_validate(cli: &Cli, repository: &Repository, report_out: &Utf8Path) -> anyhow::Result<()> {
    run_gate(GateKind::Settings, report_out, || {
        let settings = load_settings(&cli.settings)?;
        let directory = load_directory(&cli.directory)?;

        run_validate(ValidateInput {
            settings: &settings,
            directory: &directory,
            repository,
        })
    })
}

/// Run one gate, write its report, print the hook message and exit with the verdict's code.
///
/// Any error is fail-closed: an error report is still written and the process exits with 1.
fn run_gate(
    gate: GateKind,
    report_out: &Utf8Path,
    evaluate: impl FnOnce() -> anyhow::Result<GateReport>,
) -> anyhow::Result<()> {
    let result = evaluate().and_then(|report| {
        write_report_file(report_out, &report).context("write report json")?;
        Ok(report)
    });

    match result {
        Ok(report) => {
            print!("{}", render_hook_message(&report));
            let code = verdict_exit_code(report.verdict);
            if code != 0 {
                std::process::exit(code);
            }
            Ok(())
        }
        Err(err) => {
            let report = runtime_error_report(gate, &format!("{err:#}"));
            let _ = write_report_file(report_out, &report);
            eprintln!("branchgate error: {err:#}");
            std::process::exit(1);
        }
    }
}

fn overrides(cli: &Cli) -> Overrides {
    Overrides {
        veto_policy: cli.veto_policy.clone(),
    }
}

/// A missing settings file means no rules are configured.
fn load_settings(path: &Utf8Path) -> anyhow::Result<RawSettings> {
    if !path.exists() {
        tracing::debug!(path = %path, "settings file not found; all rules disabled");
        return Ok(RawSettings::default());
    }
    let text = read_text(path, "settings")?;
    parse_settings(&text, SettingsFormat::from_path(path))
        .with_context(|| format!("load settings: {path}"))
}

fn load_directory(path: &Utf8Path) -> anyhow::Result<InMemoryDirectory> {
    parse_directory_json(&read_text(path, "directory")?)
}

fn read_text(path: &Utf8Path, what: &str) -> anyhow::Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("read {what}: {path}"))
}

fn write_report_file(path: &Utf8Path, report: &GateReport) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_str().is_empty()) {
        std::fs::create_dir_all(parent).with_context(|| format!("create directory: {parent}"))?;
    }
    let data = serialize_report(report).context("serialize report")?;
    std::fs::write(path, data).with_context(|| format!("write report: {path}"))?;
    Ok(())
}

fn write_text_file(path: &Utf8Path, text: &str) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_str().is_empty()) {
        std::fs::create_dir_all(parent).with_context(|| format!("create directory: {parent}"))?;
    }
    std::fs::write(path, text).with_context(|| format!("write text: {path}"))?;
    Ok(())
}

fn cmd_md(report_path: &Utf8Path, output: Option<&Utf8Path>) -> anyhow::Result<()> {
    let report = parse_report_json(&read_text(report_path, "report")?)?;
    let md = render_markdown(&report);

    if let Some(out_path) = output {
        write_text_file(out_path, &md).context("write markdown output")?;
    } else {
        print!("{md}");
    }

    Ok(())
}

fn cmd_explain(identifier: &str) -> anyhow::Result<()> {
    match run_explain(identifier) {
        ExplainOutput::Found(exp) => {
            print!("{}", branchgate_app::format_explanation(&exp));
            Ok(())
        }
        ExplainOutput::NotFound {
            identifier,
            available_gate_ids,
            available_codes,
        } => {
            eprint!(
                "{}",
                branchgate_app::format_not_found(&identifier, available_gate_ids, available_codes)
            );
            std::process::exit(1);
        }
    }
}
