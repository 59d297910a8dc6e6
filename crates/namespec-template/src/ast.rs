// namespec-template/src/ast.rs

/// Parsed form of one structure template string.
///
/// The node list preserves the exact surface layout: every bracketed
/// token and every single separator underscore, in order. Semantic
/// rules (which idents are known, separator placement, uniqueness)
/// are not enforced here; the engine resolves them with access to the
/// token registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateAst {
    pub nodes: Vec<Node>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Token(TokenNode),
    /// One separator underscore. Doubled separators appear as two
    /// consecutive nodes.
    Separator(Span),
}

/// A bracketed token, e.g. `[symmetry]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenNode {
    pub ident: String,
    pub ident_span: Span,
    /// Span of the entire `[ ... ]` including brackets.
    pub span: Span,
}

impl Node {
    pub fn span(&self) -> Span {
        match self {
            Node::Token(t) => t.span,
            Node::Separator(s) => *s,
        }
    }
}

/// Byte span in the original template string.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Span {
    pub start: usize, // inclusive
    pub end: usize,   // exclusive
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn join(a: Span, b: Span) -> Span {
        Span {
            start: a.start.min(b.start),
            end: a.end.max(b.end),
        }
    }
}
