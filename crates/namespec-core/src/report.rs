use std::collections::BTreeMap;

use serde::Serialize;

use crate::severity::Severity;

/// Classification of one scanned name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Valid,
    /// Structurally valid, but the base word is not in the lexicon.
    NeedsReview,
    Invalid,
}

/// One finding attached to a scanned name (or to the structure
/// itself, in which case `name` is empty).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub code: &'static str,
    pub severity: Severity,
    pub name: String,
    pub message: String,
}

/// Outcome of classifying a batch of names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Report {
    statuses: BTreeMap<String, Status>,
    diagnostics: Vec<Diagnostic>,
}

impl Report {
    pub fn set_status(&mut self, name: &str, status: Status) {
        self.statuses.insert(name.to_string(), status);
    }

    pub fn status_of(&self, name: &str) -> Option<Status> {
        self.statuses.get(name).copied()
    }

    pub fn is_classified(&self, name: &str) -> bool {
        self.statuses.contains_key(name)
    }

    pub fn is_valid(&self, name: &str) -> bool {
        self.status_of(name) == Some(Status::Valid)
    }

    pub fn needs_review(&self, name: &str) -> bool {
        self.status_of(name) == Some(Status::NeedsReview)
    }

    pub fn is_invalid(&self, name: &str) -> bool {
        self.status_of(name) == Some(Status::Invalid)
    }

    pub fn statuses(&self) -> impl Iterator<Item = (&str, Status)> {
        self.statuses.iter().map(|(n, s)| (n.as_str(), *s))
    }

    pub fn invalid_names(&self) -> Vec<&str> {
        self.names_with(Status::Invalid)
    }

    pub fn needs_review_names(&self) -> Vec<&str> {
        self.names_with(Status::NeedsReview)
    }

    fn names_with(&self, wanted: Status) -> Vec<&str> {
        self.statuses
            .iter()
            .filter(|(_, s)| **s == wanted)
            .map(|(n, _)| n.as_str())
            .collect()
    }

    pub fn push_diagnostic(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn has_invalid(&self) -> bool {
        self.statuses.values().any(|s| *s == Status::Invalid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statuses_are_keyed_by_exact_name() {
        let mut report = Report::default();
        report.set_status("L_arm_grp", Status::Valid);
        report.set_status("l_arm_grp", Status::Invalid);

        assert!(report.is_valid("L_arm_grp"));
        assert!(report.is_invalid("l_arm_grp"));
        assert_eq!(report.status_of("L_ARM_GRP"), None);
    }

    #[test]
    fn invalid_names_are_sorted() {
        let mut report = Report::default();
        report.set_status("b_name", Status::Invalid);
        report.set_status("a_name", Status::Invalid);
        report.set_status("c_name", Status::Valid);

        assert_eq!(report.invalid_names(), vec!["a_name", "b_name"]);
        assert!(report.has_invalid());
    }

    #[test]
    fn diagnostics_keep_insertion_order() {
        let mut report = Report::default();
        report.push_diagnostic(Diagnostic {
            code: "invalid_value",
            severity: Severity::Error,
            name: "x".to_string(),
            message: "first".to_string(),
        });
        report.push_diagnostic(Diagnostic {
            code: "unlisted_word",
            severity: Severity::Warning,
            name: "y".to_string(),
            message: "second".to_string(),
        });

        let codes: Vec<_> = report.diagnostics().iter().map(|d| d.code).collect();
        assert_eq!(codes, vec!["invalid_value", "unlisted_word"]);
    }

    #[test]
    fn reclassification_overwrites() {
        let mut report = Report::default();
        report.set_status("arm", Status::Invalid);
        report.set_status("arm", Status::NeedsReview);
        assert!(report.needs_review("arm"));
        assert_eq!(report.needs_review_names(), vec!["arm"]);
    }
}
