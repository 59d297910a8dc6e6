pub mod ast;
pub mod parser;
pub mod tokenizer;

pub use ast::*;
pub use parser::{parse_template, ParseError, ParseErrorKind};
