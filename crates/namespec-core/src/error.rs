use crate::spec::Category;

/// Errors surfaced by structure parsing, matching, and generation.
///
/// All variants are recoverable: hosts render the message next to the
/// offending template or object and keep going.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// Template string failed to tokenize or parse.
    #[error("template syntax error at byte {at}: {message}")]
    Syntax { at: usize, message: String },

    /// A bracketed token does not name a known category.
    #[error("unknown token [{ident}] at byte {at}")]
    UnknownToken { ident: String, at: usize },

    /// A category appears more than once in the template.
    #[error("duplicate token [{}]", category.ident())]
    DuplicateToken { category: Category },

    /// The template has no `[name]` token.
    #[error("structure must contain a [name] token")]
    MissingNameToken,

    /// Leading, trailing, or doubled separator in the template.
    #[error("malformed separator at byte {at}: {message}")]
    MalformedSeparator { at: usize, message: String },

    /// A value does not satisfy its token's character class or
    /// configured value set.
    #[error("invalid {} value {value:?}: {message}", category.ident())]
    InvalidTokenValue {
        category: Category,
        value: String,
        message: String,
    },

    /// Generation needs a value for a mandatory token and none was
    /// supplied.
    #[error("missing value for mandatory token [{}]", category.ident())]
    MissingRequiredValue { category: Category },

    /// The numeric counter cannot advance without exceeding the
    /// configured digit width.
    #[error("numerical increment overflow: {value} does not fit in {digits} digits")]
    IncrementOverflow { value: u32, digits: u32 },

    /// Host-supplied configuration failed validation.
    #[error("invalid configuration: {message}")]
    InvalidConfig { message: String },
}

impl From<namespec_template::ParseError> for Error {
    fn from(e: namespec_template::ParseError) -> Self {
        Error::Syntax {
            at: e.at,
            message: e.message,
        }
    }
}
