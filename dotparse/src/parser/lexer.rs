//! The Lexer implementation for the GraphViz file format.

use super::error::LexError;

const BYTE_ORDER_MARK: char = '\u{FEFF}';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Keyword {
    Graph,
    Digraph,
    Subgraph,
    Node,
    Edge,
    Strict,
}

impl Keyword {
    /// Keywords are case-independent in DOT.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "graph" => Some(Self::Graph),
            "digraph" => Some(Self::Digraph),
            "subgraph" => Some(Self::Subgraph),
            "node" => Some(Self::Node),
            "edge" => Some(Self::Edge),
            "strict" => Some(Self::Strict),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Graph => "graph",
            Self::Digraph => "digraph",
            Self::Subgraph => "subgraph",
            Self::Node => "node",
            Self::Edge => "edge",
            Self::Strict => "strict",
        }
    }
}

// (-> | --)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeOp {
    Directed,
    Undirected,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    EOF,
    Identifier(String),
    QuotedString(String),
    Html(String),
    Number(f64),
    Keyword(Keyword),
    EdgeOp(EdgeOp),
    Equal,
    Colon,
    Comma,
    Semicolon,
    Plus,
    OpenBracket,
    CloseBracket,
    OpenBrace,
    CloseBrace,
}

impl TokenKind {
    /// A short description used in error messages.
    pub fn describe(&self) -> String {
        match self {
            Self::EOF => "end of input".to_string(),
            Self::Identifier(s) => format!("identifier `{}`", s),
            Self::QuotedString(s) => format!("string \"{}\"", s),
            Self::Html(_) => "html string".to_string(),
            Self::Number(n) => format!("number {}", n),
            Self::Keyword(k) => format!("keyword `{}`", k.as_str()),
            Self::EdgeOp(EdgeOp::Directed) => "'->'".to_string(),
            Self::EdgeOp(EdgeOp::Undirected) => "'--'".to_string(),
            Self::Equal => "'='".to_string(),
            Self::Colon => "':'".to_string(),
            Self::Comma => "','".to_string(),
            Self::Semicolon => "';'".to_string(),
            Self::Plus => "'+'".to_string(),
            Self::OpenBracket => "'['".to_string(),
            Self::CloseBracket => "']'".to_string(),
            Self::OpenBrace => "'{'".to_string(),
            Self::CloseBrace => "'}'".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    /// The raw source text of the token.
    pub text: String,
    pub line: usize,
    pub col: usize,
}

/// Turns DOT source into tokens, one `next_token` call at a time. The
/// character cursor stays internal:
///
/// ```compile_fail
/// let mut lexer = dotparse::parser::Lexer::from_string("a");
/// lexer.read_char();
/// ```
#[derive(Debug, Clone)]
pub struct Lexer {
    input: Vec<char>,
    pos: usize,
    ch: char,
    eof: bool,
    // Location of 'ch'.
    line: usize,
    col: usize,
    // Set once the iterator handed out EOF or an error.
    done: bool,
}

impl Lexer {
    pub fn from_string(input: &str) -> Self {
        let chars = input.chars().collect();
        Lexer::new(chars)
    }

    pub fn new(input: Vec<char>) -> Self {
        let mut l = Self {
            input,
            pos: 0,
            ch: '\0',
            eof: false,
            line: 1,
            col: 0,
            done: false,
        };
        l.read_char();
        if l.ch == BYTE_ORDER_MARK {
            l.read_char();
            l.col = 1;
        }
        l
    }

    /// Lexes the whole input, including the trailing EOF token.
    pub fn tokenize(input: &str) -> Result<Vec<Token>, LexError> {
        Lexer::from_string(input).collect()
    }

    /// Restarts the token stream from the beginning of the input.
    pub fn reset(&mut self) {
        let input = std::mem::take(&mut self.input);
        *self = Lexer::new(input);
    }

    fn has_next(&self) -> bool {
        self.pos < self.input.len()
    }

    fn peek(&self) -> Option<char> {
        self.input.get(self.pos).copied()
    }

    fn read_char(&mut self) {
        if self.ch == '\n' && !self.eof {
            self.line += 1;
            self.col = 0;
        }
        if !self.has_next() {
            self.ch = '\0';
            self.eof = true;
            self.col += 1;
        } else {
            self.ch = self.input[self.pos];
            self.pos += 1;
            self.col += 1;
        }
    }

    fn text_from(&self, start: usize) -> String {
        // 'pos' points one char after 'ch'.
        let end = if self.eof { self.input.len() } else { self.pos - 1 };
        self.input[start..end].iter().collect()
    }

    // The index of 'ch' in the input.
    fn offset(&self) -> usize {
        if self.eof {
            self.input.len()
        } else {
            self.pos - 1
        }
    }

    fn skip_whitespace(&mut self) -> bool {
        let mut changed = false;
        while !self.eof && self.ch.is_ascii_whitespace() {
            self.read_char();
            changed = true;
        }
        changed
    }

    fn skip_comment(&mut self) -> Result<bool, LexError> {
        if self.eof {
            return Ok(false);
        }

        // Lines that start with '#' are preprocessor output.
        if self.ch == '#' && self.col == 1 {
            while !self.eof && self.ch != '\n' {
                self.read_char();
            }
            return Ok(true);
        }

        if self.ch != '/' {
            return Ok(false);
        }

        match self.peek() {
            Some('/') => {
                while !self.eof && self.ch != '\n' {
                    self.read_char();
                }
                Ok(true)
            }
            Some('*') => {
                let (line, col) = (self.line, self.col);
                self.read_char();
                self.read_char();
                loop {
                    if self.eof {
                        return Err(LexError::UnterminatedComment { line, col });
                    }
                    if self.ch == '*' && self.peek() == Some('/') {
                        self.read_char();
                        self.read_char();
                        return Ok(true);
                    }
                    self.read_char();
                }
            }
            _ => Ok(false),
        }
    }

    fn is_id_start(ch: char) -> bool {
        ch.is_ascii_alphabetic() || ch == '_' || !ch.is_ascii()
    }

    fn is_id_char(ch: char) -> bool {
        ch.is_ascii_alphanumeric() || ch == '_' || !ch.is_ascii()
    }

    fn read_identifier(&mut self) -> String {
        let mut result = String::new();
        while !self.eof && Self::is_id_char(self.ch) {
            result.push(self.ch);
            self.read_char();
        }
        result
    }

    // -?( '.' [0-9]+ | [0-9]+ ( '.' [0-9]* )? )
    fn read_number(&mut self) -> String {
        let mut result = String::new();
        if self.ch == '-' {
            result.push('-');
            self.read_char();
        }
        let mut period = false;
        while !self.eof && (self.ch.is_ascii_digit() || self.ch == '.') {
            // Only allow one period in each number.
            if self.ch == '.' {
                if period {
                    break;
                }
                period = true;
            }
            result.push(self.ch);
            self.read_char();
        }
        result
    }

    // Only \" is an escape sequence. A backslash before a newline continues
    // the string on the next line. Everything else is kept as written.
    fn read_string(&mut self) -> Result<String, LexError> {
        let (line, col) = (self.line, self.col);
        let mut result = String::new();
        // Consume the opening quote.
        self.read_char();
        loop {
            if self.eof {
                return Err(LexError::UnterminatedString { line, col });
            }
            match self.ch {
                '"' => {
                    self.read_char();
                    return Ok(result);
                }
                '\\' => {
                    self.read_char();
                    if self.eof {
                        return Err(LexError::UnterminatedString { line, col });
                    }
                    match self.ch {
                        '"' => result.push('"'),
                        '\n' => {}
                        '\r' if self.peek() == Some('\n') => {
                            self.read_char();
                        }
                        other => {
                            result.push('\\');
                            result.push(other);
                        }
                    }
                    self.read_char();
                }
                other => {
                    result.push(other);
                    self.read_char();
                }
            }
        }
    }

    // Reads '<' ... '>' with balanced inner angle brackets.
    fn read_html(&mut self) -> Result<String, LexError> {
        let (line, col) = (self.line, self.col);
        let mut result = String::new();
        let mut bracket_balance = 1;
        self.read_char();
        loop {
            if self.eof {
                return Err(LexError::UnterminatedHtml { line, col });
            }
            if self.ch == '<' {
                bracket_balance += 1;
            } else if self.ch == '>' {
                bracket_balance -= 1;
                if bracket_balance == 0 {
                    self.read_char();
                    return Ok(result);
                }
            }
            result.push(self.ch);
            self.read_char();
        }
    }

    fn number_token(&mut self) -> Result<TokenKind, LexError> {
        let (line, col) = (self.line, self.col);
        let text = self.read_number();
        // Too many digits for an f64 parse to infinity.
        match text.parse::<f64>() {
            Ok(n) if n.is_finite() => Ok(TokenKind::Number(n)),
            _ => Err(LexError::InvalidNumber { text, line, col }),
        }
    }

    pub fn next_token(&mut self) -> Result<Token, LexError> {
        while self.skip_comment()? || self.skip_whitespace() {}

        let (line, col) = (self.line, self.col);
        let start = self.offset();

        if self.eof {
            return Ok(Token {
                kind: TokenKind::EOF,
                text: String::new(),
                line,
                col,
            });
        }

        let single = match self.ch {
            '=' => Some(TokenKind::Equal),
            ';' => Some(TokenKind::Semicolon),
            ':' => Some(TokenKind::Colon),
            ',' => Some(TokenKind::Comma),
            '+' => Some(TokenKind::Plus),
            '[' => Some(TokenKind::OpenBracket),
            ']' => Some(TokenKind::CloseBracket),
            '{' => Some(TokenKind::OpenBrace),
            '}' => Some(TokenKind::CloseBrace),
            _ => None,
        };

        let kind = if let Some(kind) = single {
            self.read_char();
            kind
        } else {
            match self.ch {
                '"' => TokenKind::QuotedString(self.read_string()?),
                '<' => TokenKind::Html(self.read_html()?),
                '-' => match self.peek() {
                    Some('>') => {
                        self.read_char();
                        self.read_char();
                        TokenKind::EdgeOp(EdgeOp::Directed)
                    }
                    Some('-') => {
                        self.read_char();
                        self.read_char();
                        TokenKind::EdgeOp(EdgeOp::Undirected)
                    }
                    Some(c) if c.is_ascii_digit() || c == '.' => {
                        self.number_token()?
                    }
                    _ => {
                        return Err(LexError::UnexpectedChar {
                            ch: '-',
                            line,
                            col,
                        });
                    }
                },
                c if c.is_ascii_digit() || c == '.' => self.number_token()?,
                c if Self::is_id_start(c) => {
                    let name = self.read_identifier();
                    match Keyword::from_name(&name) {
                        Some(kw) => TokenKind::Keyword(kw),
                        None => TokenKind::Identifier(name),
                    }
                }
                ch => {
                    return Err(LexError::UnexpectedChar { ch, line, col });
                }
            }
        };

        Ok(Token {
            kind,
            text: self.text_from(start),
            line,
            col,
        })
    }
}

impl Iterator for Lexer {
    type Item = Result<Token, LexError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let res = self.next_token();
        match &res {
            Ok(Token {
                kind: TokenKind::EOF,
                ..
            })
            | Err(_) => self.done = true,
            _ => {}
        }
        Some(res)
    }
}
