//! Errors reported by the lexer and the parser.
//!
//! Both kinds carry the 1-based line and column of the token that could not be
//! handled. There is no recovery: the first error aborts the parse.

use std::fmt;

/// A malformed token.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LexError {
    #[error("{line}:{col}: unterminated string")]
    UnterminatedString { line: usize, col: usize },
    #[error("{line}:{col}: unterminated block comment")]
    UnterminatedComment { line: usize, col: usize },
    #[error("{line}:{col}: unterminated html string")]
    UnterminatedHtml { line: usize, col: usize },
    #[error("{line}:{col}: unexpected character {ch:?}")]
    UnexpectedChar { ch: char, line: usize, col: usize },
    #[error("{line}:{col}: invalid number `{text}`")]
    InvalidNumber { text: String, line: usize, col: usize },
}

impl LexError {
    pub fn line(&self) -> usize {
        match self {
            Self::UnterminatedString { line, .. }
            | Self::UnterminatedComment { line, .. }
            | Self::UnterminatedHtml { line, .. }
            | Self::UnexpectedChar { line, .. }
            | Self::InvalidNumber { line, .. } => *line,
        }
    }

    pub fn col(&self) -> usize {
        match self {
            Self::UnterminatedString { col, .. }
            | Self::UnterminatedComment { col, .. }
            | Self::UnterminatedHtml { col, .. }
            | Self::UnexpectedChar { col, .. }
            | Self::InvalidNumber { col, .. } => *col,
        }
    }
}

/// A token sequence that does not match the grammar at this position.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{line}:{col}: expected {}, found {found}", join_expected(.expected))]
pub struct ParseError {
    /// Descriptions of the tokens that would have been accepted.
    pub expected: Vec<String>,
    pub found: String,
    pub line: usize,
    pub col: usize,
}

fn join_expected(expected: &[String]) -> String {
    match expected.len() {
        0 => "nothing".to_string(),
        1 => expected[0].clone(),
        _ => format!("one of {}", expected.join(", ")),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Lex(#[from] LexError),
    #[error(transparent)]
    Parse(#[from] ParseError),
}

impl Error {
    pub fn line(&self) -> usize {
        match self {
            Self::Lex(e) => e.line(),
            Self::Parse(e) => e.line,
        }
    }

    pub fn col(&self) -> usize {
        match self {
            Self::Lex(e) => e.col(),
            Self::Parse(e) => e.col,
        }
    }

    /// Renders the source line that contains the error, with a '^' marker
    /// under the offending column, followed by the error message.
    pub fn annotate(&self, source: &str) -> String {
        Annotated {
            error: self,
            source,
        }
        .to_string()
    }
}

/// An error shown under the source line it points at.
pub struct Annotated<'a> {
    pub error: &'a Error,
    pub source: &'a str,
}

impl fmt::Display for Annotated<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let line = self.error.line().saturating_sub(1);
        if let Some(text) = self.source.split('\n').nth(line) {
            let text = text.strip_suffix('\r').unwrap_or(text);
            writeln!(f, "{}", text)?;
            let col = self.error.col().saturating_sub(1);
            writeln!(f, "{:1$}^", "", col)?;
        }
        write!(f, "Error: {}", self.error)
    }
}

pub type Result<T> = std::result::Result<T, Error>;
