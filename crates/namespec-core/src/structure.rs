use namespec_template::{parse_template, Node, TemplateAst};

use crate::error::Error;
use crate::spec::{AdjacencyWarning, Category, NameStructure, Segment, Slot};

/// Parse and resolve a structure template string.
///
/// Syntax errors come from the template crate; this layer enforces the
/// semantic rules: known categories only, each category at most once,
/// exactly one `[name]`, and no leading, trailing, or doubled
/// separators.
pub fn parse_structure(template: &str) -> Result<NameStructure, Error> {
    let ast = parse_template(template)?;
    resolve(template, &ast)
}

pub(crate) fn resolve(template: &str, ast: &TemplateAst) -> Result<NameStructure, Error> {
    check_separators(ast)?;

    let mut segments: Vec<Segment> = Vec::new();
    let mut current: Vec<Slot> = Vec::new();
    let mut seen: Vec<Category> = Vec::new();

    for node in &ast.nodes {
        match node {
            Node::Token(t) => {
                let category = Category::from_ident(&t.ident).ok_or_else(|| {
                    Error::UnknownToken {
                        ident: t.ident.clone(),
                        at: t.ident_span.start,
                    }
                })?;
                if seen.contains(&category) {
                    return Err(Error::DuplicateToken { category });
                }
                seen.push(category);
                current.push(Slot {
                    category,
                    span: t.span,
                });
            }
            Node::Separator(_) => {
                // check_separators guarantees a token on both sides
                segments.push(Segment {
                    slots: std::mem::take(&mut current),
                });
            }
        }
    }
    if !current.is_empty() {
        segments.push(Segment { slots: current });
    }

    if !seen.contains(&Category::Name) {
        return Err(Error::MissingNameToken);
    }

    let warnings = adjacency_warnings(&segments);

    Ok(NameStructure {
        template: template.to_string(),
        segments,
        warnings,
    })
}

fn check_separators(ast: &TemplateAst) -> Result<(), Error> {
    for (i, node) in ast.nodes.iter().enumerate() {
        let Node::Separator(span) = node else {
            continue;
        };
        if i == 0 {
            return Err(Error::MalformedSeparator {
                at: span.start,
                message: "structure must not start with a separator".into(),
            });
        }
        if i == ast.nodes.len() - 1 {
            return Err(Error::MalformedSeparator {
                at: span.start,
                message: "structure must not end with a separator".into(),
            });
        }
        if matches!(ast.nodes[i - 1], Node::Separator(_)) {
            return Err(Error::MalformedSeparator {
                at: span.start,
                message: "doubled separator".into(),
            });
        }
    }
    Ok(())
}

/// Adjacent slots whose alphabets can overlap make decomposition a
/// greedy heuristic rather than a unique split; surface that to the
/// host once per structure.
fn adjacency_warnings(segments: &[Segment]) -> Vec<AdjacencyWarning> {
    let mut warnings = Vec::new();
    for segment in segments {
        for pair in segment.slots.windows(2) {
            let (a, b) = (&pair[0], &pair[1]);
            if alphabets_overlap(a.category, b.category) {
                warnings.push(AdjacencyWarning {
                    first: a.category,
                    second: b.category,
                    span: namespec_template::Span::join(a.span, b.span),
                });
            }
        }
    }
    warnings
}

#[derive(PartialEq)]
enum Alphabet {
    Letters,
    UpperLetters,
    Digits,
    LettersAndDigits,
}

fn alphabet(category: Category) -> Alphabet {
    match category {
        Category::Name => Alphabet::LettersAndDigits,
        Category::Symmetry | Category::Type | Category::Zoning | Category::Orientation => {
            Alphabet::Letters
        }
        Category::AlphabeticalInc => Alphabet::UpperLetters,
        Category::NumericalInc => Alphabet::Digits,
    }
}

fn alphabets_overlap(a: Category, b: Category) -> bool {
    use Alphabet::*;
    match (alphabet(a), alphabet(b)) {
        (LettersAndDigits, _) | (_, LettersAndDigits) => true,
        (Digits, other) | (other, Digits) => other == Digits,
        // letters vs letters, with or without the uppercase restriction
        _ => true,
    }
}
