mod config;
mod error;
mod generator;
mod matcher;
mod registry;
mod report;
mod severity;
mod spec;
mod structure;

pub use config::{
    parse_custom_list, NamingConfig, OptionalTokens, OrientationCodes, ZoneCodes, DEFAULT_TEMPLATE,
};
pub use error::Error;
pub use generator::{
    apply_edit, generate, Counters, GenerationRequest, RenameEdit, RenameOutcome, TokenValue,
};
pub use matcher::{match_name, MatchProblem, MatchResult};
pub use report::{Diagnostic, Report, Status};
pub use severity::Severity;
pub use spec::{AdjacencyWarning, Category, NameStructure, Segment, Slot};
pub use structure::parse_structure;

use tracing::debug;

/// Classify a batch of names against the structure.
///
/// Duplicate names are classified once. Structure-level adjacency
/// warnings are attached as diagnostics with an empty name so hosts
/// can surface them alongside per-name findings.
pub fn classify_names<'a>(
    structure: &NameStructure,
    config: &NamingConfig,
    names: impl IntoIterator<Item = &'a str>,
    default_severity: Severity,
) -> Result<Report, Error> {
    config.validate()?;
    debug!(template = %structure.template, "classifying names");

    let mut report = Report::default();

    for warning in &structure.warnings {
        report.push_diagnostic(Diagnostic {
            code: "ambiguous_adjacency",
            severity: Severity::Warning,
            name: String::new(),
            message: format!(
                "[{}] next to [{}] draw from overlapping characters; matching is \
                 greedy right-to-left",
                warning.first, warning.second
            ),
        });
    }

    for name in names {
        if report.is_classified(name) {
            continue;
        }

        let matched = match_name(structure, config, name);
        if matched.is_valid() {
            match matched.value(Category::Name) {
                Some(word) if config.lexicon_contains(word) == Some(false) => {
                    report.set_status(name, Status::NeedsReview);
                    report.push_diagnostic(Diagnostic {
                        code: "unlisted_word",
                        severity: Severity::Warning,
                        name: name.to_string(),
                        message: format!("base word {word:?} is not in the lexicon"),
                    });
                }
                _ => report.set_status(name, Status::Valid),
            }
        } else {
            report.set_status(name, Status::Invalid);
            for problem in matched.problems() {
                report.push_diagnostic(Diagnostic {
                    code: problem.code,
                    severity: default_severity,
                    name: name.to_string(),
                    message: problem.message.clone(),
                });
            }
        }
    }

    Ok(report)
}

/// Apply one edit across a batch of names. Outcomes keep the input
/// order, and auto increments draw from one shared counter pair so a
/// batch never repeats a value.
pub fn propose_renames<'a>(
    structure: &NameStructure,
    config: &NamingConfig,
    names: impl IntoIterator<Item = &'a str>,
    edit: &RenameEdit,
) -> Result<Vec<RenameOutcome>, Error> {
    config.validate()?;
    debug!(template = %structure.template, "proposing renames");

    let mut counters = Counters::default();
    Ok(names
        .into_iter()
        .map(|name| RenameOutcome {
            original: name.to_string(),
            outcome: apply_edit(structure, config, name, edit, &mut counters),
        })
        .collect())
}
