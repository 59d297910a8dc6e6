use std::collections::BTreeMap;

use serde::Serialize;

use namespec_core::{Diagnostic, RenameOutcome, Report, Status};

use crate::args::OutputFormat;

// The wire shape is pinned here rather than on the library types, so
// the library can evolve without breaking scripted consumers.
#[derive(Serialize)]
struct JsonCheckOut<'a> {
    ok: bool,
    statuses: BTreeMap<&'a str, Status>,
    invalid: Vec<&'a str>,
    needs_review: Vec<&'a str>,
    diagnostics: &'a [Diagnostic],
    summary: JsonCheckSummary,
}

#[derive(Serialize)]
struct JsonCheckSummary {
    total: usize,
    invalid_count: usize,
    needs_review_count: usize,
}

#[derive(Serialize)]
struct JsonRenameOut<'a> {
    ok: bool,
    renames: Vec<JsonRename<'a>>,
    summary: JsonRenameSummary,
}

#[derive(Serialize)]
struct JsonRename<'a> {
    from: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    to: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

#[derive(Serialize)]
struct JsonRenameSummary {
    total: usize,
    failed_count: usize,
}

pub fn render_check(report: &Report, format: OutputFormat, verbosity: u8, quiet: bool) -> String {
    match format {
        OutputFormat::Human => render_check_human(report, verbosity, quiet),
        OutputFormat::Json => render_check_json(report),
    }
}

fn render_check_json(report: &Report) -> String {
    let invalid = report.invalid_names();
    let needs_review = report.needs_review_names();

    let out = JsonCheckOut {
        ok: invalid.is_empty(),
        statuses: report.statuses().collect(),
        invalid: invalid.clone(),
        needs_review: needs_review.clone(),
        diagnostics: report.diagnostics(),
        summary: JsonCheckSummary {
            total: report.statuses().count(),
            invalid_count: invalid.len(),
            needs_review_count: needs_review.len(),
        },
    };

    // a serialize failure here is a programmer error; still return
    // something scripts can parse
    serde_json::to_string_pretty(&out).unwrap_or_else(|_| "{\"ok\":false}".to_string())
}

fn render_check_human(report: &Report, verbosity: u8, quiet: bool) -> String {
    let mut out = String::new();

    if quiet {
        for name in report.invalid_names() {
            out.push_str(name);
            out.push('\n');
        }
        return out;
    }

    // structure-level findings first; they apply to every name
    for d in report.diagnostics().iter().filter(|d| d.name.is_empty()) {
        out.push_str(&format!("{} {}: {}\n", d.severity, d.code, d.message));
    }

    let total = report.statuses().count();
    let invalid = report.invalid_names();
    let needs_review = report.needs_review_names();

    if invalid.is_empty() && needs_review.is_empty() {
        out.push_str(&format!("OK: {total} names match the structure\n"));
        return out;
    }

    for name in &needs_review {
        out.push_str(&format!("review: {name}\n"));
    }
    for name in &invalid {
        out.push_str(&format!("invalid: {name}\n"));
    }

    if verbosity > 0 {
        for d in report.diagnostics().iter().filter(|d| !d.name.is_empty()) {
            out.push_str(&format!("{} {} {}: {}\n", d.severity, d.code, d.name, d.message));
        }
        out.push_str(&format!(
            "summary: total={total} invalid={} review={}\n",
            invalid.len(),
            needs_review.len()
        ));
    }

    out
}

pub fn render_rename(
    outcomes: &[RenameOutcome],
    format: OutputFormat,
    verbosity: u8,
    quiet: bool,
) -> String {
    match format {
        OutputFormat::Human => render_rename_human(outcomes, verbosity, quiet),
        OutputFormat::Json => render_rename_json(outcomes),
    }
}

fn render_rename_json(outcomes: &[RenameOutcome]) -> String {
    let failed = outcomes.iter().filter(|o| o.outcome.is_err()).count();

    let out = JsonRenameOut {
        ok: failed == 0,
        renames: outcomes
            .iter()
            .map(|o| match &o.outcome {
                Ok(name) => JsonRename {
                    from: &o.original,
                    to: Some(name.as_str()),
                    error: None,
                },
                Err(e) => JsonRename {
                    from: &o.original,
                    to: None,
                    error: Some(e.to_string()),
                },
            })
            .collect(),
        summary: JsonRenameSummary {
            total: outcomes.len(),
            failed_count: failed,
        },
    };

    serde_json::to_string_pretty(&out).unwrap_or_else(|_| "{\"ok\":false}".to_string())
}

fn render_rename_human(outcomes: &[RenameOutcome], verbosity: u8, quiet: bool) -> String {
    let mut out = String::new();

    if quiet {
        for o in outcomes {
            if let Ok(name) = &o.outcome {
                out.push_str(name);
                out.push('\n');
            }
        }
        return out;
    }

    let mut failed = 0usize;
    for o in outcomes {
        match &o.outcome {
            Ok(name) => out.push_str(&format!("{} -> {name}\n", o.original)),
            Err(e) => {
                failed += 1;
                out.push_str(&format!("{}: {e}\n", o.original));
            }
        }
    }

    if verbosity > 0 {
        out.push_str(&format!(
            "summary: total={} failed={failed}\n",
            outcomes.len()
        ));
    }

    out
}
