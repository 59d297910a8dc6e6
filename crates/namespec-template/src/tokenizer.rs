// namespec-template/src/tokenizer.rs

use std::fmt;

/// Token kinds produced by the template tokenizer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    LBracket, // '['
    RBracket, // ']'

    /// A single separator underscore outside brackets. Runs of
    /// underscores produce one token per underscore so the resolver
    /// can reject doubled separators with exact offsets.
    Underscore,

    /// An identifier inside brackets, e.g. `name` or `numerical_inc`.
    /// Underscores inside brackets belong to the identifier, never to
    /// the separator layer.
    Ident(String),
}

/// Token with span information (byte offsets in the original input).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpannedToken {
    pub token: Token,
    pub start: usize, // inclusive
    pub end: usize,   // exclusive
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenizeErrorKind {
    UnmatchedCloseBracket,
    UnexpectedChar(char),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenizeError {
    pub kind: TokenizeErrorKind,
    pub at: usize, // byte offset
}

impl fmt::Display for TokenizeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use TokenizeErrorKind::*;
        match self.kind {
            UnmatchedCloseBracket => write!(f, "unmatched ']' at byte {}", self.at),
            UnexpectedChar(c) => write!(f, "unexpected character {:?} at byte {}", c, self.at),
        }
    }
}

impl std::error::Error for TokenizeError {}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum Mode {
    OutsideBrackets,
    InsideBrackets,
}

/// Tokenizer for a naming-structure template string.
///
/// Key behaviors (per grammar):
/// - Outside brackets:
///   - `[` => LBracket (switch to inside-brackets mode)
///   - `_` => Underscore (one token per underscore)
///   - anything else, including `]`, is an error
/// - Inside brackets:
///   - whitespace is skipped (tolerant formatting)
///   - `]` => RBracket (switch back to outside mode)
///   - IDENT => Ident (letters, digits, underscores)
///
/// A missing `]` is not a tokenizer error; the parser reports it as an
/// unexpected end of input.
pub struct Tokenizer<'a> {
    input: &'a str,
    pos: usize, // byte offset
    mode: Mode,
}

impl<'a> Tokenizer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            pos: 0,
            mode: Mode::OutsideBrackets,
        }
    }

    pub fn tokenize_all(mut self) -> Result<Vec<SpannedToken>, TokenizeError> {
        let mut out = Vec::new();
        while let Some(tok) = self.next_token()? {
            out.push(tok);
        }
        Ok(out)
    }

    /// Returns next spanned token, or Ok(None) at end-of-input.
    pub fn next_token(&mut self) -> Result<Option<SpannedToken>, TokenizeError> {
        if self.pos >= self.input.len() {
            return Ok(None);
        }

        match self.mode {
            Mode::OutsideBrackets => self.next_outside(),
            Mode::InsideBrackets => self.next_inside(),
        }
    }

    fn next_outside(&mut self) -> Result<Option<SpannedToken>, TokenizeError> {
        let b = self.peek_byte().unwrap();
        let start = self.pos;

        match b {
            b'[' => {
                self.pos += 1;
                self.mode = Mode::InsideBrackets;
                Ok(Some(SpannedToken {
                    token: Token::LBracket,
                    start,
                    end: self.pos,
                }))
            }
            b'_' => {
                self.pos += 1;
                Ok(Some(SpannedToken {
                    token: Token::Underscore,
                    start,
                    end: self.pos,
                }))
            }
            b']' => Err(TokenizeError {
                kind: TokenizeErrorKind::UnmatchedCloseBracket,
                at: self.pos,
            }),
            _ => {
                let ch = self.peek_char().unwrap_or('\0');
                Err(TokenizeError {
                    kind: TokenizeErrorKind::UnexpectedChar(ch),
                    at: self.pos,
                })
            }
        }
    }

    fn next_inside(&mut self) -> Result<Option<SpannedToken>, TokenizeError> {
        // Skip whitespace (tolerant inside brackets)
        self.skip_ws();
        if self.pos >= self.input.len() {
            return Ok(None);
        }

        let start = self.pos;
        let b = self.peek_byte().unwrap();

        if b == b']' {
            self.pos += 1;
            self.mode = Mode::OutsideBrackets;
            return Ok(Some(SpannedToken {
                token: Token::RBracket,
                start,
                end: self.pos,
            }));
        }

        if is_ident_start(b) {
            let end = self.scan_while(is_ident_continue);
            let ident = self.input[start..end].to_string();
            self.pos = end;
            return Ok(Some(SpannedToken {
                token: Token::Ident(ident),
                start,
                end,
            }));
        }

        // Any other char inside brackets is unexpected (WS already skipped)
        let ch = self.peek_char().unwrap_or('\0');
        Err(TokenizeError {
            kind: TokenizeErrorKind::UnexpectedChar(ch),
            at: self.pos,
        })
    }

    fn skip_ws(&mut self) {
        while self.pos < self.input.len() {
            let b = self.peek_byte().unwrap();
            if b == b' ' || b == b'\t' || b == b'\n' || b == b'\r' {
                self.pos += 1;
            } else {
                break;
            }
        }
    }

    fn scan_while<F>(&self, mut pred: F) -> usize
    where
        F: FnMut(u8) -> bool,
    {
        let mut i = self.pos;
        while i < self.input.len() {
            let b = self.input.as_bytes()[i];
            if !pred(b) {
                break;
            }
            i += 1;
        }
        i
    }

    fn peek_byte(&self) -> Option<u8> {
        self.input.as_bytes().get(self.pos).copied()
    }

    fn peek_char(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }
}

// Helpers: ASCII-only, which covers every template the engine accepts.
fn is_ident_start(b: u8) -> bool {
    b.is_ascii_lowercase() || b.is_ascii_uppercase() || b == b'_'
}

fn is_ident_continue(b: u8) -> bool {
    is_ident_start(b) || b.is_ascii_digit()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn toks(input: &str) -> Vec<Token> {
        Tokenizer::new(input)
            .tokenize_all()
            .unwrap()
            .into_iter()
            .map(|t| t.token)
            .collect()
    }

    #[test]
    fn bracketed_ident() {
        assert_eq!(
            toks("[name]"),
            vec![
                Token::LBracket,
                Token::Ident("name".into()),
                Token::RBracket,
            ]
        );
    }

    #[test]
    fn separator_between_tokens() {
        assert_eq!(
            toks("[symmetry]_[name]"),
            vec![
                Token::LBracket,
                Token::Ident("symmetry".into()),
                Token::RBracket,
                Token::Underscore,
                Token::LBracket,
                Token::Ident("name".into()),
                Token::RBracket,
            ]
        );
    }

    #[test]
    fn underscore_inside_brackets_is_part_of_ident() {
        assert_eq!(
            toks("[numerical_inc]"),
            vec![
                Token::LBracket,
                Token::Ident("numerical_inc".into()),
                Token::RBracket,
            ]
        );
    }

    #[test]
    fn doubled_underscore_yields_two_tokens() {
        assert_eq!(
            toks("[a]__[b]"),
            vec![
                Token::LBracket,
                Token::Ident("a".into()),
                Token::RBracket,
                Token::Underscore,
                Token::Underscore,
                Token::LBracket,
                Token::Ident("b".into()),
                Token::RBracket,
            ]
        );
    }

    #[test]
    fn whitespace_tolerated_inside_brackets() {
        assert_eq!(
            toks("[ name ]"),
            vec![
                Token::LBracket,
                Token::Ident("name".into()),
                Token::RBracket,
            ]
        );
    }

    #[test]
    fn spans_are_byte_offsets() {
        let spanned = Tokenizer::new("[ab]_[c]").tokenize_all().unwrap();
        let spans: Vec<(usize, usize)> = spanned.iter().map(|t| (t.start, t.end)).collect();
        assert_eq!(spans, vec![(0, 1), (1, 3), (3, 4), (4, 5), (5, 6), (6, 7), (7, 8)]);
    }

    #[test]
    fn unmatched_close_bracket_is_error() {
        let err = Tokenizer::new("]").tokenize_all().unwrap_err();
        assert_eq!(err.kind, TokenizeErrorKind::UnmatchedCloseBracket);
    }

    #[test]
    fn stray_text_outside_brackets_is_error() {
        let err = Tokenizer::new("abc_[name]").tokenize_all().unwrap_err();
        assert_eq!(err.kind, TokenizeErrorKind::UnexpectedChar('a'));
        assert_eq!(err.at, 0);
    }

    #[test]
    fn unterminated_bracket_is_not_a_tokenizer_error() {
        let spanned = Tokenizer::new("[name").tokenize_all().unwrap();
        assert_eq!(spanned.len(), 2);
    }
}
