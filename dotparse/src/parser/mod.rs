//! GraphViz file format parser.

pub mod ast;
pub mod error;
pub mod lexer;
pub mod options;
#[allow(clippy::module_inception)]
pub mod parser;
pub mod printer;
pub mod visit;

pub use error::{Error, LexError, ParseError};
pub use lexer::Lexer;
pub use lexer::Token;
pub use lexer::TokenKind;
pub use options::ParseOptions;
pub use parser::DotParser;
pub use printer::dump_ast;
