//! Developer tasks (schema generation, fixture conformance, explain coverage).
//!
//! Keeping this separate avoids bloating the end-user CLI.

use anyhow::{Context, bail};
use branchgate_types::explain;
use schemars::schema_for;
use std::fs;
use std::path::PathBuf;

/// Get the project root (parent of xtask directory).
fn project_root() -> anyhow::Result<PathBuf> {
    let manifest_dir = match std::env::var("CARGO_MANIFEST_DIR") {
        Ok(dir) => PathBuf::from(dir),
        Err(_) => std::env::current_dir().context("Cannot determine current directory")?,
    };

    if manifest_dir.ends_with("xtask") {
        manifest_dir
            .parent()
            .map(PathBuf::from)
            .context("xtask has no parent")
    } else {
        Ok(manifest_dir)
    }
}

fn schemas_dir() -> anyhow::Result<PathBuf> {
    Ok(project_root()?.join("schemas"))
}

fn fixtures_dir() -> anyhow::Result<PathBuf> {
    Ok(project_root()?.join("tests").join("fixtures"))
}

/// Schema definition with its target filename.
struct SchemaSpec {
    filename: &'static str,
    generate: fn() -> schemars::Schema,
}

fn generate_report_schema() -> schemars::Schema {
    schema_for!(branchgate_types::GateReport)
}

fn generate_settings_schema() -> schemars::Schema {
    schema_for!(branchgate_settings::RawSettings)
}

fn schema_specs() -> Vec<SchemaSpec> {
    vec![
        SchemaSpec {
            filename: "branchgate.report.v1.json",
            generate: generate_report_schema,
        },
        SchemaSpec {
            filename: "branchgate.settings.v1.json",
            generate: generate_settings_schema,
        },
    ]
}

/// Serialize a schema to pretty-printed JSON with trailing newline.
fn serialize_schema(schema: &schemars::Schema) -> anyhow::Result<String> {
    let mut json = serde_json::to_string_pretty(schema).context("Failed to serialize schema")?;
    json.push('\n');
    Ok(json)
}

fn emit_schemas() -> anyhow::Result<()> {
    let dir = schemas_dir()?;
    fs::create_dir_all(&dir).context("Failed to create schemas directory")?;

    for entry in schema_specs() {
        let json = serialize_schema(&(entry.generate)())?;
        let path = dir.join(entry.filename);
        fs::write(&path, &json)
            .with_context(|| format!("Failed to write schema to {}", path.display()))?;
        println!("Wrote {}", path.display());
    }

    println!("\nSchemas emitted successfully.");
    Ok(())
}

/// Check that schemas in the repo match what would be generated.
fn validate_schemas() -> anyhow::Result<()> {
    let dir = schemas_dir()?;
    let mut missing = Vec::new();
    let mut mismatched = Vec::new();

    for entry in schema_specs() {
        let path = dir.join(entry.filename);
        if !path.exists() {
            missing.push(entry.filename);
            continue;
        }

        let expected = serialize_schema(&(entry.generate)())?;
        let actual = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        if expected != actual {
            mismatched.push(entry.filename);
        }
    }

    if missing.is_empty() && mismatched.is_empty() {
        println!("All schemas are up to date.");
        return Ok(());
    }

    if !missing.is_empty() {
        eprintln!("Missing schemas:");
        for name in &missing {
            eprintln!("  - {}", name);
        }
    }
    if !mismatched.is_empty() {
        eprintln!("Schemas out of date:");
        for name in &mismatched {
            eprintln!("  - {}", name);
        }
    }
    eprintln!("\nRun `cargo xtask emit-schemas` to regenerate.");
    bail!("Schema validation failed")
}

/// Validate every fixture's settings and expected report against the generated schemas.
fn conform() -> anyhow::Result<()> {
    let report_schema = serde_json::to_value(generate_report_schema())?;
    let settings_schema = serde_json::to_value(generate_settings_schema())?;
    let report_validator = jsonschema::validator_for(&report_schema)
        .map_err(|e| anyhow::anyhow!("Failed to compile report schema: {}", e))?;
    let settings_validator = jsonschema::validator_for(&settings_schema)
        .map_err(|e| anyhow::anyhow!("Failed to compile settings schema: {}", e))?;

    let dir = fixtures_dir()?;
    let mut fixture_count = 0;
    let mut errors = Vec::new();

    let mut entries = fs::read_dir(&dir)
        .with_context(|| format!("Failed to read {}", dir.display()))?
        .collect::<Result<Vec<_>, _>>()?;
    entries.sort_by_key(|e| e.file_name());

    for entry in entries {
        let path = entry.path();
        if !path.is_dir() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().to_string();

        let report_path = path.join("expected.report.json");
        if report_path.exists() {
            fixture_count += 1;
            let text = fs::read_to_string(&report_path)
                .with_context(|| format!("Failed to read {}", report_path.display()))?;
            let value: serde_json::Value = serde_json::from_str(&text)
                .with_context(|| format!("Failed to parse {}", report_path.display()))?;
            for err in report_validator.iter_errors(&value) {
                errors.push(format!("{name}/expected.report.json: {err}"));
            }
        }

        let settings_path = path.join("settings.toml");
        if settings_path.exists() {
            let text = fs::read_to_string(&settings_path)
                .with_context(|| format!("Failed to read {}", settings_path.display()))?;
            let raw = branchgate_settings::parse_settings_toml(&text)
                .with_context(|| format!("{name}/settings.toml"))?;
            let value = serde_json::to_value(&raw)?;
            for err in settings_validator.iter_errors(&value) {
                errors.push(format!("{name}/settings.toml: {err}"));
            }
        }
    }

    if errors.is_empty() {
        println!("✓ {} fixture reports conform to the report schema", fixture_count);
        Ok(())
    } else {
        for error in &errors {
            eprintln!("  - {}", error);
        }
        bail!("Fixture conformance failed with {} errors", errors.len())
    }
}

/// Validate that all gate IDs and codes have explanations.
fn explain_coverage() -> anyhow::Result<()> {
    let gate_ids = explain::all_gate_ids();
    let codes = explain::all_codes();
    let mut errors = Vec::new();

    for (kind, id) in gate_ids
        .iter()
        .map(|id| ("Gate ID", id))
        .chain(codes.iter().map(|code| ("Code", code)))
    {
        match explain::lookup_explanation(id) {
            Some(exp) => {
                if exp.title.is_empty() {
                    errors.push(format!("{kind} '{id}' has empty title"));
                }
                if exp.description.is_empty() {
                    errors.push(format!("{kind} '{id}' has empty description"));
                }
                if exp.remediation.is_empty() {
                    errors.push(format!("{kind} '{id}' has empty remediation"));
                }
            }
            None => errors.push(format!("{kind} '{id}' has no explanation")),
        }
    }

    if errors.is_empty() {
        println!("✓ {} gate IDs have explanations", gate_ids.len());
        println!("✓ {} codes have explanations", codes.len());
        println!("\n✓ All explain coverage checks passed!");
        Ok(())
    } else {
        for error in &errors {
            eprintln!("  - {}", error);
        }
        bail!(
            "Explain coverage validation failed with {} errors",
            errors.len()
        )
    }
}

fn print_help() {
    eprintln!("xtask commands:");
    eprintln!("  help              Show this message");
    eprintln!("  emit-schemas      Generate JSON schemas from Rust types to schemas/");
    eprintln!("  validate-schemas  Check if schemas/ matches generated output (for CI)");
    eprintln!("  print-schema-ids  Print known schema IDs");
    eprintln!("  conform           Validate fixture reports and settings against the schemas");
    eprintln!("  explain-coverage  Validate all gate IDs and codes have explanations");
}

fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let cmd = args.get(1).map(|s| s.as_str()).unwrap_or("help");

    match cmd {
        "help" | "--help" | "-h" => {
            print_help();
            Ok(())
        }
        "emit-schemas" => emit_schemas(),
        "validate-schemas" => validate_schemas(),
        "conform" => conform(),
        "explain-coverage" => explain_coverage(),
        "print-schema-ids" => {
            for entry in schema_specs() {
                println!("{}", entry.filename.trim_end_matches(".json"));
            }
            Ok(())
        }
        other => bail!("unknown xtask command: {other}\n\nRun `cargo xtask help` for usage."),
    }
    .context("xtask failed")
}
