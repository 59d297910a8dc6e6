use std::collections::BTreeMap;

use crate::config::NamingConfig;
use crate::registry;
use crate::spec::{Category, NameStructure, Segment};

/// Why a candidate name failed to line up with the structure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchProblem {
    pub code: &'static str, // e.g. "invalid_value", "extra_segments"
    pub category: Option<Category>,
    pub message: String,
}

/// Decomposition of one candidate name against a structure.
///
/// The values map is populated for every slot that consumed input,
/// even when the overall match is invalid, so hosts can badge the
/// offending token rather than the whole name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchResult {
    values: BTreeMap<Category, String>,
    problems: Vec<MatchProblem>,
}

impl MatchResult {
    pub fn is_valid(&self) -> bool {
        self.problems.is_empty()
    }

    pub fn value(&self, category: Category) -> Option<&str> {
        self.values.get(&category).map(String::as_str)
    }

    pub fn values(&self) -> impl Iterator<Item = (Category, &str)> {
        self.values.iter().map(|(c, v)| (*c, v.as_str()))
    }

    pub fn problems(&self) -> &[MatchProblem] {
        &self.problems
    }

    fn set(&mut self, category: Category, value: &str) {
        self.values.insert(category, value.to_string());
    }

    fn problem(&mut self, code: &'static str, category: Option<Category>, message: String) {
        self.problems.push(MatchProblem {
            code,
            category,
            message,
        });
    }
}

/// Decompose `candidate` against the structure.
///
/// Pure and idempotent: same inputs, same result, no side effects.
pub fn match_name(
    structure: &NameStructure,
    config: &NamingConfig,
    candidate: &str,
) -> MatchResult {
    let mut result = MatchResult::default();

    let parts: Vec<&str> = candidate.split('_').collect();

    if parts.iter().any(|p| p.is_empty()) {
        result.problem(
            "empty_segment",
            None,
            "empty segment (leading, trailing, or doubled underscore)".to_string(),
        );
        return result;
    }

    let n = parts.len();
    let m = structure.segments.len();
    let k = structure.mandatory_segment_count(config);

    if n < k {
        // Too few segments to attribute anything reliably; treat the
        // whole candidate as the name so hosts can offer token edits.
        result.set(Category::Name, candidate);
        result.problem(
            "missing_segments",
            None,
            format!("expected at least {k} underscore-separated segments, found {n}"),
        );
        return result;
    }

    if n > m {
        result.problem(
            "extra_segments",
            None,
            format!("expected at most {m} underscore-separated segments, found {n}"),
        );
        return result;
    }

    // Exactly m - n optional segments must be skipped. Skips are spent
    // on optional segments that fail to accept their part, left to
    // right; once none remain, segments claim their part anyway and
    // record problems against the offending token.
    let mut skips_left = m - n;
    let mut pi = 0usize;

    for (si, segment) in structure.segments.iter().enumerate() {
        let optional = segment.is_optional(config);

        if pi >= n {
            if !optional {
                result.problem(
                    "missing_segments",
                    segment.slots.first().map(|s| s.category),
                    format!("no segment left for {}", describe_segment(segment)),
                );
            }
            continue;
        }

        let part = parts[pi];
        let parts_left = n - pi;
        let mandatory_after = structure.segments[si + 1..]
            .iter()
            .filter(|s| !s.is_optional(config))
            .count();

        // An optional segment never consumes a part that a later
        // mandatory segment would then be starved of.
        if optional && parts_left <= mandatory_after {
            continue;
        }

        if optional && skips_left > 0 && !segment_accepts(segment, config, part) {
            skips_left -= 1;
            continue;
        }

        decompose_segment(segment, config, part, &mut result);
        pi += 1;
    }

    if pi < n {
        result.problem(
            "extra_segments",
            None,
            format!("could not attribute trailing segment {:?}", parts[pi]),
        );
    }

    result
}

/// True when the segment decomposes the part with no problems.
fn segment_accepts(segment: &Segment, config: &NamingConfig, part: &str) -> bool {
    let mut scratch = MatchResult::default();
    decompose_segment(segment, config, part, &mut scratch);
    scratch.problems.is_empty()
}

/// Split one underscore-free part among the segment's slots.
///
/// The name slot anchors the split: slots before it consume from the
/// start in order, slots after it consume from the end in reverse
/// order, and the name keeps the middle. Segments without a name slot
/// consume from the start and must leave nothing over.
fn decompose_segment(
    segment: &Segment,
    config: &NamingConfig,
    part: &str,
    out: &mut MatchResult,
) {
    if let [slot] = segment.slots.as_slice() {
        out.set(slot.category, part);
        if !registry::validate_value(slot.category, config, part) {
            out.problem(
                "invalid_value",
                Some(slot.category),
                format!(
                    "{part:?} is not a valid {} ({})",
                    slot.category,
                    registry::describe_expected(slot.category, config)
                ),
            );
        }
        return;
    }

    let mut start = 0usize;
    let mut end = part.len();

    match segment.anchor_index() {
        Some(anchor) => {
            for slot in &segment.slots[..anchor] {
                let text = &part[start..end];
                match registry::take_prefix(slot.category, config, text) {
                    // A claim that would leave the anchor empty yields.
                    Some(len) if len < text.len() => {
                        out.set(slot.category, &text[..len]);
                        start += len;
                    }
                    _ => report_unconsumed(slot.category, config, out),
                }
            }

            for slot in segment.slots[anchor + 1..].iter().rev() {
                let text = &part[start..end];
                match registry::take_suffix(slot.category, config, text) {
                    Some(len) if len < text.len() => {
                        out.set(slot.category, &text[text.len() - len..]);
                        end -= len;
                    }
                    _ => report_unconsumed(slot.category, config, out),
                }
            }

            let middle = &part[start..end];
            out.set(Category::Name, middle);
            if !registry::validate_value(Category::Name, config, middle) {
                out.problem(
                    "invalid_value",
                    Some(Category::Name),
                    format!(
                        "{middle:?} is not a valid name ({})",
                        registry::describe_expected(Category::Name, config)
                    ),
                );
            }
        }
        None => {
            for slot in &segment.slots {
                let text = &part[start..end];
                match registry::take_prefix(slot.category, config, text) {
                    Some(len) => {
                        out.set(slot.category, &text[..len]);
                        start += len;
                    }
                    None => report_unconsumed(slot.category, config, out),
                }
            }
            if start < end {
                out.problem(
                    "unattributed_text",
                    None,
                    format!("could not attribute {:?} to any token", &part[start..end]),
                );
            }
        }
    }
}

fn report_unconsumed(category: Category, config: &NamingConfig, out: &mut MatchResult) {
    if config.is_optional(category) {
        return;
    }
    out.problem(
        "missing_value",
        Some(category),
        format!(
            "no {} value found ({})",
            category,
            registry::describe_expected(category, config)
        ),
    );
}

fn describe_segment(segment: &Segment) -> String {
    segment
        .slots
        .iter()
        .map(|s| format!("[{}]", s.category))
        .collect::<String>()
}
