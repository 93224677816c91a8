//! CLI entry point for tracereq.
//!
//! This module is intentionally thin: it handles argument parsing, I/O, and exit codes.
//! All business logic lives in the `tracereq-app` crate.

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use clap::{ArgAction, Parser, Subcommand};
use tracereq_app::{
    CheckInput, ExplainOutput, parse_report_json, render_markdown, render_summary, run_check,
    run_explain, runtime_error_report, serialize_report, to_renderable, verdict_exit_code,
};
use tracereq_settings::Overrides;
use tracereq_types::{TracereqReport, Verdict};

/// Environment variable holding a `tracing` filter directive (e.g. `tracereq_domain=trace`).
const LOG_ENV: &str = "TRACEREQ_LOG";

#[derive(Parser, Debug)]
#[command(
    name = "tracereq",
    version,
    about = "Check whether traces satisfy an analysis' requirements"
)]
struct Cli {
    /// Verbosity (-v, -vv, -vvv). Ignored when TRACEREQ_LOG is set.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Evaluate a requirement definition against traces and write artifacts.
    Check {
        /// Path to the requirement definition TOML.
        #[arg(long, default_value = "tracereq.toml")]
        requirements: Utf8PathBuf,

        /// Trace descriptor file (TOML, or JSON by `.json` extension). Repeatable.
        #[arg(long = "trace", required = true)]
        traces: Vec<Utf8PathBuf>,

        /// Override the root requirement to evaluate.
        #[arg(long)]
        root: Option<String>,

        /// Where to write the JSON report.
        #[arg(long, default_value = "artifacts/tracereq/report.json")]
        report_out: Utf8PathBuf,

        /// Write a Markdown report alongside the JSON.
        #[arg(long)]
        write_markdown: bool,

        /// Where to write the Markdown report (if enabled).
        #[arg(long, default_value = "artifacts/tracereq/comment.md")]
        markdown_out: Utf8PathBuf,
    },

    /// Render markdown from an existing JSON report.
    Md {
        /// Path to the JSON report file.
        #[arg(long, default_value = "artifacts/tracereq/report.json")]
        report: Utf8PathBuf,

        /// Where to write the Markdown output (if not specified, prints to stdout).
        #[arg(long, short)]
        output: Option<Utf8PathBuf>,
    },

    /// Explain a priority level or requirement kind.
    Explain {
        /// A priority level (e.g. "all_or_nothing") or requirement kind (e.g. "event_fields").
        identifier: String,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    match cli.cmd {
        Commands::Check {
            requirements,
            traces,
            root,
            report_out,
            write_markdown,
            markdown_out,
        } => cmd_check(
            &requirements,
            &traces,
            Overrides { root },
            &report_out,
            write_markdown.then_some(markdown_out.as_path()),
        ),
        Commands::Md { report, output } => cmd_md(&report, output.as_deref()),
        Commands::Explain { identifier } => cmd_explain(&identifier),
    }
}

fn setup_logging(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = tracing_subscriber::EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn cmd_check(
    requirements: &Utf8Path,
    traces: &[Utf8PathBuf],
    overrides: Overrides,
    report_out: &Utf8Path,
    markdown_out: Option<&Utf8Path>,
) -> anyhow::Result<()> {
    let result = (|| -> anyhow::Result<Verdict> {
        let requirements_text = std::fs::read_to_string(requirements)
            .with_context(|| format!("read requirements: {}", requirements))?;

        let output = run_check(CheckInput {
            requirements_text: &requirements_text,
            trace_paths: traces,
            overrides,
        })?;

        write_artifacts(&output.report, report_out, markdown_out)?;
        print!("{}", render_summary(&to_renderable(&output.report)));
        Ok(output.report.verdict)
    })();

    match result {
        Ok(verdict) => {
            let code = verdict_exit_code(verdict);
            if code != 0 {
                std::process::exit(code);
            }
            Ok(())
        }
        Err(err) => {
            tracing::debug!(error = ?err, "check failed");
            let report = runtime_error_report(&format!("{err:#}"));
            let _ = write_artifacts(&report, report_out, markdown_out);
            eprintln!("tracereq error: {err:#}");
            std::process::exit(verdict_exit_code(Verdict::Error));
        }
    }
}

fn write_artifacts(
    report: &TracereqReport,
    report_out: &Utf8Path,
    markdown_out: Option<&Utf8Path>,
) -> anyhow::Result<()> {
    write_report_file(report_out, report).context("write report json")?;
    if let Some(path) = markdown_out {
        let md = render_markdown(&to_renderable(report));
        write_text_file(path, &md).context("write markdown")?;
    }
    Ok(())
}

fn write_report_file(path: &Utf8Path, report: &TracereqReport) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).with_context(|| format!("create directory: {}", parent))?;
    }
    let data = serialize_report(report)?;
    std::fs::write(path, data).with_context(|| format!("write report: {}", path))?;
    Ok(())
}

fn write_text_file(path: &Utf8Path, text: &str) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).with_context(|| format!("create directory: {}", parent))?;
    }
    std::fs::write(path, text).with_context(|| format!("write text: {}", path))?;
    Ok(())
}

fn cmd_md(report_path: &Utf8Path, output: Option<&Utf8Path>) -> anyhow::Result<()> {
    let report_text = std::fs::read_to_string(report_path)
        .with_context(|| format!("read report: {}", report_path))?;
    let report = parse_report_json(&report_text)?;
    let md = render_markdown(&to_renderable(&report));

    if let Some(out_path) = output {
        write_text_file(out_path, &md).context("write markdown output")?;
    } else {
        print!("{}", md);
    }

    Ok(())
}

fn cmd_explain(identifier: &str) -> anyhow::Result<()> {
    match run_explain(identifier) {
        ExplainOutput::Found(exp) => {
            print!("{}", tracereq_app::format_explanation(&exp));
            Ok(())
        }
        ExplainOutput::NotFound {
            identifier,
            available_levels,
            available_kinds,
        } => {
            eprint!(
                "{}",
                tracereq_app::format_not_found(&identifier, available_levels, available_kinds)
            );
            std::process::exit(1);
        }
    }
}
