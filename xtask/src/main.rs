//! Developer tasks (schema generation, fixture validation, explain coverage).
//!
//! Keeping this separate avoids bloating the end-user CLI.

use anyhow::{Context, bail};
use schemars::schema_for;
use std::fs;
use std::path::{Path, PathBuf};

/// Get the project root (parent of xtask directory).
fn project_root() -> PathBuf {
    let manifest_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    manifest_dir
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or(manifest_dir)
}

fn schemas_dir() -> PathBuf {
    project_root().join("schemas")
}

fn fixtures_dir() -> PathBuf {
    project_root().join("tests").join("fixtures")
}

/// Schema definition with its target filename.
struct SchemaSpec {
    filename: &'static str,
    generate: fn() -> schemars::Schema,
}

fn schema_specs() -> Vec<SchemaSpec> {
    vec![
        SchemaSpec {
            filename: "tracereq.report.v1.json",
            generate: || schema_for!(tracereq_types::TracereqReport),
        },
        SchemaSpec {
            filename: "tracereq.requirements.v1.json",
            generate: || schema_for!(tracereq_settings::RequirementsConfigV1),
        },
        SchemaSpec {
            filename: "tracereq.trace.v1.json",
            generate: || schema_for!(tracereq_trace::TraceDescriptor),
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
    let dir = schemas_dir();
    fs::create_dir_all(&dir).context("Failed to create schemas directory")?;

    for spec in schema_specs() {
        let json = serialize_schema(&(spec.generate)())?;
        let path = dir.join(spec.filename);
        fs::write(&path, &json)
            .with_context(|| format!("Failed to write schema to {}", path.display()))?;
        println!("Wrote {}", path.display());
    }

    println!("\nSchemas emitted successfully.");
    Ok(())
}

/// Check that schemas in the repo match what would be generated.
fn validate_schemas() -> anyhow::Result<()> {
    let dir = schemas_dir();
    let mut missing = Vec::new();
    let mut mismatched = Vec::new();

    for spec in schema_specs() {
        let path = dir.join(spec.filename);
        let Ok(actual) = fs::read_to_string(&path) else {
            missing.push(spec.filename);
            continue;
        };
        if serialize_schema(&(spec.generate)())? != actual {
            mismatched.push(spec.filename);
        }
    }

    if missing.is_empty() && mismatched.is_empty() {
        println!("All schemas are up to date.");
        return Ok(());
    }
    for name in &missing {
        eprintln!("  - missing: {}", name);
    }
    for name in &mismatched {
        eprintln!("  - out of date: {}", name);
    }
    eprintln!("\nRun `cargo xtask emit-schemas` to regenerate.");
    bail!("Schema validation failed")
}

fn compile(schema: schemars::Schema) -> anyhow::Result<jsonschema::Validator> {
    let value = serde_json::to_value(&schema).context("Failed to convert schema")?;
    jsonschema::validator_for(&value).map_err(|e| anyhow::anyhow!("Failed to compile schema: {}", e))
}

/// Read a fixture file as JSON, whatever its on-disk format.
fn fixture_value(path: &Path) -> anyhow::Result<serde_json::Value> {
    let text =
        fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    match path.extension().and_then(|e| e.to_str()) {
        Some("toml") => toml::from_str(&text)
            .with_context(|| format!("Failed to parse {} as TOML", path.display())),
        _ => serde_json::from_str(&text)
            .with_context(|| format!("Failed to parse {} as JSON", path.display())),
    }
}

/// Validate every fixture file against the schema for its role.
fn validate_fixtures() -> anyhow::Result<()> {
    let report = compile(schema_for!(tracereq_types::TracereqReport))?;
    let requirements = compile(schema_for!(tracereq_settings::RequirementsConfigV1))?;
    let trace = compile(schema_for!(tracereq_trace::TraceDescriptor))?;

    let mut checked = 0;
    let mut errors = Vec::new();

    let mut fixtures: Vec<PathBuf> = fs::read_dir(fixtures_dir())
        .context("Failed to read tests/fixtures/")?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| p.is_dir())
        .collect();
    fixtures.sort();

    for fixture in fixtures {
        let mut files: Vec<PathBuf> = fs::read_dir(&fixture)?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .collect();
        files.sort();

        for file in files {
            let name = file
                .file_name()
                .unwrap_or_default()
                .to_string_lossy()
                .to_string();
            let validator = match name.as_str() {
                "expected.report.json" => &report,
                "tracereq.toml" => &requirements,
                _ if name.ends_with(".toml") || name.ends_with(".json") => &trace,
                _ => continue,
            };
            let value = fixture_value(&file)?;
            for err in validator.iter_errors(&value) {
                errors.push(format!("{}: {}", file.display(), err));
            }
            checked += 1;
        }
    }

    if errors.is_empty() {
        println!("✓ {} fixture files match their schemas", checked);
        Ok(())
    } else {
        for error in &errors {
            eprintln!("  - {}", error);
        }
        bail!("Fixture validation failed with {} errors", errors.len())
    }
}

/// Validate that all priority levels and requirement kinds have explanations.
fn explain_coverage() -> anyhow::Result<()> {
    let levels = tracereq_types::explain::all_levels();
    let kinds = tracereq_types::explain::all_kinds();

    let mut errors = Vec::new();
    for id in levels.iter().chain(kinds) {
        match tracereq_types::lookup_explanation(id) {
            Some(exp) => {
                if exp.title.is_empty() || exp.description.is_empty() || exp.guidance.is_empty() {
                    errors.push(format!("'{}' has an incomplete explanation", id));
                }
                if toml::from_str::<toml::Table>(exp.example).is_err() {
                    errors.push(format!("'{}' example is not valid TOML", id));
                }
            }
            None => errors.push(format!("'{}' has no explanation", id)),
        }
    }

    if errors.is_empty() {
        println!("✓ {} priority levels have explanations", levels.len());
        println!("✓ {} requirement kinds have explanations", kinds.len());
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
    eprintln!("  help               Show this message");
    eprintln!("  emit-schemas       Generate JSON schemas from Rust types to schemas/");
    eprintln!("  validate-schemas   Check if schemas/ matches generated output (for CI)");
    eprintln!("  validate-fixtures  Check tests/fixtures/ files against the generated schemas");
    eprintln!("  print-schema-ids   Print known schema IDs");
    eprintln!("  explain-coverage   Validate all levels and kinds have explanations");
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
        "validate-fixtures" => validate_fixtures(),
        "explain-coverage" => explain_coverage(),
        "print-schema-ids" => {
            for spec in schema_specs() {
                println!("{}", spec.filename.trim_end_matches(".json"));
            }
            Ok(())
        }
        other => bail!("unknown xtask command: {other}\n\nRun `cargo xtask help` for usage."),
    }
    .context("xtask failed")
}
