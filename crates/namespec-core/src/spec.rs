//! Core data structures for parsed naming structures.
//!
//! These types represent the *meaning* of a structure template,
//! independent of how it was parsed or how it will be evaluated.
//!
//! Resolution code produces these structures.
//! Matching and generation code consume them.

use namespec_template::Span;

use crate::config::NamingConfig;

/// The fixed set of category tokens a structure may reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Category {
    Symmetry,
    Type,
    Name,
    Zoning,
    Orientation,
    AlphabeticalInc,
    NumericalInc,
}

impl Category {
    pub const ALL: [Category; 7] = [
        Category::Symmetry,
        Category::Type,
        Category::Name,
        Category::Zoning,
        Category::Orientation,
        Category::AlphabeticalInc,
        Category::NumericalInc,
    ];

    /// Identifier used inside template brackets, e.g. `[numerical_inc]`.
    pub fn ident(self) -> &'static str {
        match self {
            Category::Symmetry => "symmetry",
            Category::Type => "type",
            Category::Name => "name",
            Category::Zoning => "zoning",
            Category::Orientation => "orientation",
            Category::AlphabeticalInc => "alphabetical_inc",
            Category::NumericalInc => "numerical_inc",
        }
    }

    pub fn from_ident(ident: &str) -> Option<Category> {
        Category::ALL.iter().copied().find(|c| c.ident() == ident)
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.ident())
    }
}

/// One position in a parsed structure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slot {
    pub category: Category,

    /// Span of the `[ ... ]` token in the template, for diagnostics.
    pub span: Span,
}

/// A maximal run of adjacent slots with no separator between them.
///
/// Segments are joined by single underscores in both templates and
/// candidate names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub slots: Vec<Slot>,
}

impl Segment {
    /// Index of the `name` slot within this segment, if present.
    pub fn anchor_index(&self) -> Option<usize> {
        self.slots
            .iter()
            .position(|s| s.category == Category::Name)
    }

    /// A segment is optional when every slot in it is optional; a name
    /// can then omit the whole segment and its separator.
    pub fn is_optional(&self, config: &NamingConfig) -> bool {
        self.slots.iter().all(|s| config.is_optional(s.category))
    }
}

/// A structure template with overlapping alphabets between two
/// adjacent slots. Decomposition there is a deterministic greedy
/// heuristic, not a guaranteed-unique split.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdjacencyWarning {
    pub first: Category,
    pub second: Category,
    pub span: Span,
}

/// A parsed structure template: ordered segments of ordered slots.
///
/// Pure function of the template string. Hosts rebuild it whenever the
/// user edits the template; it carries no persistent identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameStructure {
    pub template: String,
    pub segments: Vec<Segment>,
    pub warnings: Vec<AdjacencyWarning>,
}

impl NameStructure {
    pub fn slots(&self) -> impl Iterator<Item = &Slot> {
        self.segments.iter().flat_map(|seg| seg.slots.iter())
    }

    pub fn has(&self, category: Category) -> bool {
        self.slots().any(|s| s.category == category)
    }

    /// Number of segments a candidate name must provide.
    pub fn mandatory_segment_count(&self, config: &NamingConfig) -> usize {
        self.segments
            .iter()
            .filter(|seg| !seg.is_optional(config))
            .count()
    }
}
