use super::ast;
use super::error::{ParseError, Result};
use super::lexer::{Keyword, Lexer, Token, TokenKind};
use super::options::ParseOptions;

#[derive(Debug, Clone)]
pub struct DotParser {
    lexer: Lexer,
    tok: Token,
    options: ParseOptions,
    // Number of subgraphs that enclose the current statement.
    depth: usize,
}

impl DotParser {
    pub fn new(input: &str) -> Self {
        Self::with_options(input, ParseOptions::default())
    }

    pub fn with_options(input: &str, options: ParseOptions) -> Self {
        Self {
            lexer: Lexer::from_string(input),
            tok: Token {
                kind: TokenKind::EOF,
                text: String::new(),
                line: 1,
                col: 1,
            },
            options,
            depth: 0,
        }
    }

    /// Lex the next token.
    pub fn lex(&mut self) -> Result<()> {
        self.tok = self.lexer.next_token()?;
        Ok(())
    }

    /// Creates an error that reports the current token.
    fn error<T>(&self, expected: &[&str]) -> Result<T> {
        Err(ParseError {
            expected: expected.iter().map(|s| s.to_string()).collect(),
            found: self.tok.kind.describe(),
            line: self.tok.line,
            col: self.tok.col,
        }
        .into())
    }

    fn expect(&mut self, kind: TokenKind, what: &str) -> Result<()> {
        if self.tok.kind == kind {
            self.lex()
        } else {
            self.error(&[what])
        }
    }

    fn is_id_token(&self) -> bool {
        matches!(
            self.tok.kind,
            TokenKind::Identifier(_)
                | TokenKind::QuotedString(_)
                | TokenKind::Number(_)
                | TokenKind::Html(_)
        )
    }

    fn is_edge_token(&self) -> bool {
        matches!(self.tok.kind, TokenKind::EdgeOp(_))
    }

    // graph : [ strict ] (graph | digraph) [ ID ] '{' stmt_list '}'
    pub fn parse_graph(&mut self) -> Result<ast::Graph> {
        let mut strict = false;
        if let TokenKind::Keyword(Keyword::Strict) = self.tok.kind {
            strict = true;
            self.lex()?;
        }

        let kind = match self.tok.kind {
            TokenKind::Keyword(Keyword::Graph) => ast::GraphKind::Graph,
            TokenKind::Keyword(Keyword::Digraph) => ast::GraphKind::Digraph,
            _ if strict => {
                return self.error(&["'graph'", "'digraph'"]);
            }
            _ => {
                return self.error(&["'strict'", "'graph'", "'digraph'"]);
            }
        };
        self.lex()?;

        let mut graph = ast::Graph::new(kind);
        graph.strict = strict;
        graph.id = self.parse_optional_id()?;
        self.expect(TokenKind::OpenBrace, "'{'")?;
        graph.children = self.parse_stmt_list()?;

        #[cfg(feature = "log")]
        log::trace!(
            "Parsed graph {:?} with {} statements.",
            graph.id,
            graph.children.len()
        );
        Ok(graph)
    }

    // stmt_list : [ stmt [ ';' ] stmt_list ]
    pub fn parse_stmt_list(&mut self) -> Result<Vec<ast::Stmt>> {
        let mut lst = Vec::new();

        loop {
            match self.tok.kind {
                TokenKind::Semicolon => {
                    self.lex()?;
                }
                TokenKind::CloseBrace => {
                    // Consume the '}' and exit.
                    self.lex()?;
                    return Ok(lst);
                }
                TokenKind::EOF => {
                    return self.error(&["'}'"]);
                }
                _ => {
                    let stmt = self.parse_stmt()?;
                    lst.push(stmt);
                }
            }
        }
    }

    // stmt : node_stmt | edge_stmt | attr_stmt | ID '=' ID | subgraph
    pub fn parse_stmt(&mut self) -> Result<ast::Stmt> {
        match self.tok.kind {
            TokenKind::Keyword(Keyword::Graph) => {
                self.parse_attr_stmt(ast::AttrTarget::Graph)
            }
            TokenKind::Keyword(Keyword::Node) => {
                self.parse_attr_stmt(ast::AttrTarget::Node)
            }
            TokenKind::Keyword(Keyword::Edge) => {
                self.parse_attr_stmt(ast::AttrTarget::Edge)
            }
            TokenKind::Keyword(Keyword::Subgraph) | TokenKind::OpenBrace => {
                let subgraph = self.parse_subgraph()?;
                if self.is_edge_token() {
                    let from = ast::Endpoint::Subgraph(subgraph);
                    let es = self.parse_edge_stmt(from)?;
                    return Ok(ast::Stmt::Edge(es));
                }
                Ok(ast::Stmt::Subgraph(subgraph))
            }
            _ if self.is_id_token() => {
                let id = self.parse_id()?;

                if let TokenKind::Equal = self.tok.kind {
                    self.lex()?;
                    let eq = self.parse_id()?;
                    let assignment = ast::Assignment { id, eq };
                    return Ok(ast::Stmt::Assignment(assignment));
                }

                let node_id = self.parse_node_id(id)?;
                if self.is_edge_token() {
                    let from = ast::Endpoint::Node(node_id);
                    let es = self.parse_edge_stmt(from)?;
                    return Ok(ast::Stmt::Edge(es));
                }
                let list = self.parse_attr_list()?;
                Ok(ast::Stmt::Node(ast::NodeStmt::new_with_list(node_id, list)))
            }
            _ => self.error(&[
                "identifier",
                "'{'",
                "'}'",
                "'graph'",
                "'node'",
                "'edge'",
                "'subgraph'",
            ]),
        }
    }

    //attr_stmt : (graph | node | edge) attr_list
    fn parse_attr_stmt(
        &mut self,
        target: ast::AttrTarget,
    ) -> Result<ast::Stmt> {
        // Consume the keyword.
        self.lex()?;
        if !matches!(self.tok.kind, TokenKind::OpenBracket) {
            return self.error(&["'['"]);
        }
        let list = self.parse_attr_list()?;
        Ok(ast::Stmt::Attr(ast::AttrStmt::new(target, list)))
    }

    //attr_list : '[' [ a_list ] ']' [ attr_list ]
    //a_list : ID '=' ID [ (';' | ',') ] [ a_list ]
    pub fn parse_attr_list(&mut self) -> Result<ast::AttributeList> {
        let mut lst = ast::AttributeList::new();

        while let TokenKind::OpenBracket = self.tok.kind {
            self.lex()?;

            while !matches!(self.tok.kind, TokenKind::CloseBracket) {
                if !self.is_id_token() {
                    return self.error(&["attribute name", "']'"]);
                }
                let key = self.parse_id()?;
                self.expect(TokenKind::Equal, "'='")?;
                let value = self.parse_id()?;
                lst.add_attr(key, value);

                // Skip the separator.
                let kind = &self.tok.kind;
                if matches!(kind, TokenKind::Semicolon | TokenKind::Comma) {
                    self.lex()?;
                }
            }
            // Consume the ']'.
            self.lex()?;
        }
        Ok(lst)
    }

    //edge_stmt : (node_id | subgraph) edgeRHS [ attr_list ]
    //edgeRHS : edgeop (node_id | subgraph) [ edgeRHS ]
    pub fn parse_edge_stmt(
        &mut self,
        from: ast::Endpoint,
    ) -> Result<ast::EdgeStmt> {
        let mut es = ast::EdgeStmt::new(from);

        while self.is_edge_token() {
            // Consume the arrow.
            self.lex()?;
            let to = self.parse_endpoint()?;
            es.insert(to);
        }
        es.attr_list = self.parse_attr_list()?;
        Ok(es)
    }

    fn parse_endpoint(&mut self) -> Result<ast::Endpoint> {
        match self.tok.kind {
            TokenKind::Keyword(Keyword::Subgraph) | TokenKind::OpenBrace => {
                Ok(ast::Endpoint::Subgraph(self.parse_subgraph()?))
            }
            _ if self.is_id_token() => {
                let id = self.parse_id()?;
                Ok(ast::Endpoint::Node(self.parse_node_id(id)?))
            }
            _ => self.error(&["identifier", "'{'", "'subgraph'"]),
        }
    }

    //subgraph : [ subgraph [ ID ] ] '{' stmt_list '}'
    pub fn parse_subgraph(&mut self) -> Result<ast::Subgraph> {
        if self.depth >= self.options.max_depth {
            return Err(ParseError {
                expected: vec![format!(
                    "at most {} nested subgraphs",
                    self.options.max_depth
                )],
                found: self.tok.kind.describe(),
                line: self.tok.line,
                col: self.tok.col,
            }
            .into());
        }

        let mut subgraph = ast::Subgraph::new(None);
        if let TokenKind::Keyword(Keyword::Subgraph) = self.tok.kind {
            self.lex()?;
            subgraph.id = self.parse_optional_id()?;
        }
        self.expect(TokenKind::OpenBrace, "'{'")?;

        self.depth += 1;
        let children = self.parse_stmt_list();
        self.depth -= 1;
        subgraph.children = children?;
        Ok(subgraph)
    }

    //node_id : ID [ ':' ID [ ':' ID ] ]
    pub fn parse_node_id(&mut self, id: ast::Id) -> Result<ast::NodeId> {
        if !matches!(self.tok.kind, TokenKind::Colon) {
            return Ok(ast::NodeId::new(id, None));
        }
        // Consume the colon.
        self.lex()?;
        let port = self.parse_id()?;

        let mut compass = None;
        if let TokenKind::Colon = self.tok.kind {
            self.lex()?;
            compass = Some(self.parse_id()?);
        }
        Ok(ast::NodeId::new(id, Some(ast::Port { id: port, compass })))
    }

    fn parse_optional_id(&mut self) -> Result<Option<ast::Id>> {
        if self.is_id_token() {
            Ok(Some(self.parse_id()?))
        } else {
            Ok(None)
        }
    }

    // ID : identifier | numeral | html | string [ '+' string ... ]
    pub fn parse_id(&mut self) -> Result<ast::Id> {
        let id = match &self.tok.kind {
            TokenKind::Identifier(name) => ast::Id::Str(name.clone()),
            TokenKind::Number(n) => ast::Id::Number(*n),
            TokenKind::Html(html) => ast::Id::Html(html.clone()),
            TokenKind::QuotedString(s) => {
                let mut value = s.clone();
                self.lex()?;
                // "a" + "b" is the string "ab".
                while let TokenKind::Plus = self.tok.kind {
                    self.lex()?;
                    match &self.tok.kind {
                        TokenKind::QuotedString(s) => value.push_str(s),
                        _ => return self.error(&["string"]),
                    }
                    self.lex()?;
                }
                return Ok(ast::Id::Str(value));
            }
            _ => return self.error(&["identifier"]),
        };
        // Consume the identifier.
        self.lex()?;
        Ok(id)
    }

    /// Parses every top-level graph in the input, as specified here:
    /// <https://graphviz.org/doc/info/lang.html>
    pub fn process(&mut self) -> Result<Vec<ast::Graph>> {
        self.lexer.reset();
        self.depth = 0;
        self.lex()?;

        let mut graphs = Vec::new();
        loop {
            graphs.push(self.parse_graph()?);
            if let TokenKind::EOF = self.tok.kind {
                break;
            }
        }

        #[cfg(feature = "log")]
        log::debug!("Parsed {} graph(s).", graphs.len());
        Ok(graphs)
    }
}
