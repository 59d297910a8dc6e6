// namespec-template/src/parser.rs

use crate::ast::*;
use crate::tokenizer::{SpannedToken, Token, TokenizeError, Tokenizer};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseErrorKind {
    TokenizeFailed,
    UnexpectedEof,
    UnexpectedToken,
    ExpectedToken(&'static str),
    EmptyBrackets,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub at: usize,          // byte offset
    pub span: Option<Span>, // token span if available
    pub message: String,
}

impl ParseError {
    fn new(
        kind: ParseErrorKind,
        at: usize,
        span: Option<Span>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            at,
            span,
            message: message.into(),
        }
    }

    fn from_tokenize(err: TokenizeError) -> Self {
        Self {
            kind: ParseErrorKind::TokenizeFailed,
            at: err.at,
            span: Some(Span::new(err.at, err.at + 1)),
            message: format!("{}", err),
        }
    }
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} (at byte {})", self.message, self.at)
    }
}

impl std::error::Error for ParseError {}

/// Parse a structure template string into a TemplateAst.
pub fn parse_template(input: &str) -> Result<TemplateAst, ParseError> {
    let tokens = Tokenizer::new(input)
        .tokenize_all()
        .map_err(ParseError::from_tokenize)?;

    let mut c = Cursor::new(&tokens);

    let mut nodes: Vec<Node> = Vec::new();

    while !c.is_eof() {
        let t = c.peek().ok_or_else(|| {
            ParseError::new(
                ParseErrorKind::UnexpectedEof,
                input.len(),
                None,
                "unexpected end of input",
            )
        })?;

        match &t.token {
            Token::Underscore => {
                let span = Span::new(t.start, t.end);
                c.bump();
                nodes.push(Node::Separator(span));
            }
            Token::LBracket => {
                let tok = parse_bracketed(&mut c)?;
                nodes.push(Node::Token(tok));
            }

            // These never appear outside brackets if the tokenizer is correct.
            other => {
                return Err(ParseError::new(
                    ParseErrorKind::UnexpectedToken,
                    t.start,
                    Some(Span::new(t.start, t.end)),
                    format!("unexpected token outside brackets: {:?}", other),
                ));
            }
        }
    }

    Ok(TemplateAst { nodes })
}

fn parse_bracketed(c: &mut Cursor<'_>) -> Result<TokenNode, ParseError> {
    let lbracket = c.expect_token("'['", |t| matches!(t, Token::LBracket))?;
    let lspan = Span::new(lbracket.start, lbracket.end);

    let first = c.peek().ok_or_else(|| {
        ParseError::new(
            ParseErrorKind::UnexpectedEof,
            lbracket.end,
            Some(lspan),
            "unexpected end of input after '['",
        )
    })?;

    if matches!(first.token, Token::RBracket) {
        let r = c.bump().ok_or_else(|| {
            ParseError::new(
                ParseErrorKind::UnexpectedEof,
                first.start,
                Some(lspan),
                "unexpected end of input after '['",
            )
        })?;
        let full_span = Span::join(lspan, Span::new(r.start, r.end));
        return Err(ParseError::new(
            ParseErrorKind::EmptyBrackets,
            first.start,
            Some(full_span),
            "empty brackets '[]' are not allowed",
        ));
    }

    let (ident, ident_span) = match &first.token {
        Token::Ident(s) => {
            let sp = Span::new(first.start, first.end);
            let value = s.clone();
            c.bump();
            (value, sp)
        }
        _ => {
            return Err(ParseError::new(
                ParseErrorKind::UnexpectedToken,
                first.start,
                Some(Span::new(first.start, first.end)),
                "expected token name inside '[...]'",
            ));
        }
    };

    let rbracket = c.expect_token("']'", |t| matches!(t, Token::RBracket))?;
    let full_span = Span::join(lspan, Span::new(rbracket.start, rbracket.end));

    Ok(TokenNode {
        ident,
        ident_span,
        span: full_span,
    })
}

/// Simple cursor over spanned tokens.
struct Cursor<'a> {
    toks: &'a [SpannedToken],
    i: usize,
}

impl<'a> Cursor<'a> {
    fn new(toks: &'a [SpannedToken]) -> Self {
        Self { toks, i: 0 }
    }

    fn is_eof(&self) -> bool {
        self.i >= self.toks.len()
    }

    fn peek(&self) -> Option<&'a SpannedToken> {
        self.toks.get(self.i)
    }

    fn bump(&mut self) -> Option<&'a SpannedToken> {
        let t = self.toks.get(self.i);
        if t.is_some() {
            self.i += 1;
        }
        t
    }

    fn expect_token<F>(
        &mut self,
        expected: &'static str,
        pred: F,
    ) -> Result<&'a SpannedToken, ParseError>
    where
        F: Fn(&Token) -> bool,
    {
        let t = self.peek().ok_or_else(|| {
            ParseError::new(
                ParseErrorKind::UnexpectedEof,
                self.toks.last().map(|t| t.end).unwrap_or(0),
                None,
                format!("expected {}", expected),
            )
        })?;

        if pred(&t.token) {
            // peek() just confirmed the token is present
            Ok(self.bump().unwrap())
        } else {
            Err(ParseError::new(
                ParseErrorKind::ExpectedToken(expected),
                t.start,
                Some(Span::new(t.start, t.end)),
                format!("expected {}, got {:?}", expected, t.token),
            ))
        }
    }
}
