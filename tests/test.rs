#[cfg(test)]
mod lexer_tests {

    use dotparse::parser::lexer::{EdgeOp, Keyword};
    use dotparse::parser::{LexError, Lexer, TokenKind};

    fn kinds(program: &str) -> Vec<TokenKind> {
        Lexer::tokenize(program)
            .unwrap()
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    fn ident(name: &str) -> TokenKind {
        TokenKind::Identifier(name.to_string())
    }

    fn string(s: &str) -> TokenKind {
        TokenKind::QuotedString(s.to_string())
    }

    #[test]
    fn simple() {
        let mut lexer = Lexer::from_string("a -> b");
        let t0 = lexer.next_token().unwrap();
        let t1 = lexer.next_token().unwrap();
        let t2 = lexer.next_token().unwrap();
        let t3 = lexer.next_token().unwrap();
        assert_eq!(t0.kind, ident("a"));
        assert_eq!(t1.kind, TokenKind::EdgeOp(EdgeOp::Directed));
        assert_eq!(t2.kind, ident("b"));
        assert_eq!(t3.kind, TokenKind::EOF);
    }

    #[test]
    fn simple_number() {
        let num = |n: f64| vec![TokenKind::Number(n), TokenKind::EOF];
        assert_eq!(kinds("-12345"), num(-12345.));
        assert_eq!(kinds("1.12"), num(1.12));
        assert_eq!(kinds(".5"), num(0.5));
        assert_eq!(kinds("-.5"), num(-0.5));
        assert_eq!(kinds("7."), num(7.));
    }

    #[test]
    fn numbers_next_to_edges() {
        assert_eq!(
            kinds("1->2--3"),
            vec![
                TokenKind::Number(1.),
                TokenKind::EdgeOp(EdgeOp::Directed),
                TokenKind::Number(2.),
                TokenKind::EdgeOp(EdgeOp::Undirected),
                TokenKind::Number(3.),
                TokenKind::EOF
            ]
        );
    }

    #[test]
    fn simple_program() {
        assert_eq!(
            kinds("digraph { a -> b; } "),
            vec![
                TokenKind::Keyword(Keyword::Digraph),
                TokenKind::OpenBrace,
                ident("a"),
                TokenKind::EdgeOp(EdgeOp::Directed),
                ident("b"),
                TokenKind::Semicolon,
                TokenKind::CloseBrace,
                TokenKind::EOF
            ]
        );
    }

    #[test]
    fn keywords_ignore_case() {
        let tokens = Lexer::tokenize("DiGraph STRICT Node").unwrap();
        assert_eq!(tokens[0].kind, TokenKind::Keyword(Keyword::Digraph));
        assert_eq!(tokens[0].text, "DiGraph");
        assert_eq!(tokens[1].kind, TokenKind::Keyword(Keyword::Strict));
        assert_eq!(tokens[2].kind, TokenKind::Keyword(Keyword::Node));
    }

    #[test]
    fn token_positions() {
        let tokens = Lexer::tokenize("digraph {\n  a -> b\n}").unwrap();
        let pos: Vec<(usize, usize)> =
            tokens.iter().map(|t| (t.line, t.col)).collect();
        assert_eq!(
            pos,
            vec![(1, 1), (1, 9), (2, 3), (2, 5), (2, 8), (3, 1), (3, 2)]
        );
    }

    #[test]
    fn token_text_is_raw_source() {
        let tokens = Lexer::tokenize("\"a b\" -> x_1").unwrap();
        assert_eq!(tokens[0].kind, string("a b"));
        assert_eq!(tokens[0].text, "\"a b\"");
        assert_eq!(tokens[1].text, "->");
        assert_eq!(tokens[2].text, "x_1");
    }

    #[test]
    fn whitespace_inside_brackets() {
        assert_eq!(
            kinds("[ \r\t\n ]"),
            vec![
                TokenKind::OpenBracket,
                TokenKind::CloseBracket,
                TokenKind::EOF
            ]
        );
    }

    #[test]
    fn comments_are_skipped() {
        assert_eq!(
            kinds("a // line\n /* block\n comment */ b"),
            vec![ident("a"), ident("b"), TokenKind::EOF]
        );
        assert_eq!(
            kinds("# 1 \"file.gv\"\ngraph"),
            vec![TokenKind::Keyword(Keyword::Graph), TokenKind::EOF]
        );
    }

    #[test]
    fn only_escaped_quotes_are_resolved() {
        assert_eq!(kinds(r#""A\"""#)[0], string("A\""));
        assert_eq!(kinds(r#""A\\""#)[0], string(r"A\\"));
        assert_eq!(kinds(r#""a\nb\tc""#)[0], string(r"a\nb\tc"));
    }

    #[test]
    fn line_continuation_in_strings() {
        assert_eq!(kinds("\"ab\\\ncd\"")[0], string("abcd"));
        assert_eq!(kinds("\"ab\\\r\ncd\"")[0], string("abcd"));
    }

    #[test]
    fn unicode_identifiers() {
        assert_eq!(kinds("графы"), vec![ident("графы"), TokenKind::EOF]);
        assert_eq!(
            kinds("中文 Ünï_2"),
            vec![ident("中文"), ident("Ünï_2"), TokenKind::EOF]
        );
    }

    #[test]
    fn html_strings() {
        assert_eq!(
            kinds("<<b>bold</b> text>"),
            vec![
                TokenKind::Html("<b>bold</b> text".to_string()),
                TokenKind::EOF
            ]
        );
    }

    #[test]
    fn lex_errors() {
        assert_eq!(
            Lexer::tokenize("graph { \"abc"),
            Err(LexError::UnterminatedString { line: 1, col: 9 })
        );
        assert_eq!(
            Lexer::tokenize("a - b"),
            Err(LexError::UnexpectedChar { ch: '-', line: 1, col: 3 })
        );
        assert_eq!(
            Lexer::tokenize("a\n  @"),
            Err(LexError::UnexpectedChar { ch: '@', line: 2, col: 3 })
        );
        assert_eq!(
            Lexer::tokenize("/* abc"),
            Err(LexError::UnterminatedComment { line: 1, col: 1 })
        );
        assert_eq!(
            Lexer::tokenize("<a <b>"),
            Err(LexError::UnterminatedHtml { line: 1, col: 1 })
        );
        assert!(matches!(
            Lexer::tokenize("."),
            Err(LexError::InvalidNumber { .. })
        ));
    }

    #[test]
    fn numbers_must_be_finite() {
        // Overflows f64 and would parse to infinity.
        let huge = "9".repeat(400);
        assert!(matches!(
            Lexer::tokenize(&huge),
            Err(LexError::InvalidNumber { line: 1, col: 1, .. })
        ));
        let negative = format!("a -- -{}", huge);
        assert!(matches!(
            Lexer::tokenize(&negative),
            Err(LexError::InvalidNumber { line: 1, col: 6, .. })
        ));
        let big = format!("1{}", "0".repeat(300));
        assert_eq!(
            kinds(&big),
            vec![TokenKind::Number(1e300), TokenKind::EOF]
        );
    }

    #[test]
    fn iterator_stops_after_eof_or_error() {
        assert_eq!(Lexer::from_string("a b").count(), 3);
        assert_eq!(Lexer::from_string("").count(), 1);
        let items: Vec<_> = Lexer::from_string("a \"b").collect();
        assert_eq!(items.len(), 2);
        assert!(items[1].is_err());
    }

    #[test]
    fn reset_restarts_the_stream() {
        let mut lexer = Lexer::from_string("graph { a }");
        let first: Vec<_> = lexer.by_ref().collect();
        lexer.reset();
        let second: Vec<_> = lexer.collect();
        assert_eq!(first, second);
        assert_eq!(first.len(), 5);
    }
}

#[cfg(test)]
mod parser_tests {

    use dotparse::ast::*;
    use dotparse::parser::visit::GraphStats;
    use dotparse::parser::DotParser;
    use dotparse::{parse, parse_with_options, Error, LexError, ParseOptions};

    fn parse_one(program: &str) -> Graph {
        let mut graphs = parse(program).unwrap();
        assert_eq!(graphs.len(), 1);
        graphs.remove(0)
    }

    fn node_name(e: &Endpoint) -> Id {
        match e {
            Endpoint::Node(n) => n.id.clone(),
            Endpoint::Subgraph(_) => panic!("expected a node endpoint"),
        }
    }

    fn parse_error(program: &str) -> dotparse::ParseError {
        match parse(program) {
            Err(Error::Parse(err)) => err,
            other => panic!("expected a parse error, got {:?}", other),
        }
    }

    #[test]
    fn empty_graph() {
        let g = parse_one("graph {}");
        assert_eq!(g.kind, GraphKind::Graph);
        assert_eq!(g.id, None);
        assert!(!g.strict);
        assert!(!g.has_children());
    }

    #[test]
    fn graph_ids() {
        assert_eq!(parse_one("graph \"G\" {}").id, Some(Id::from("G")));
        assert_eq!(parse_one("graph 42 {}").id, Some(Id::Number(42.)));
        let g = parse_one("digraph графы {}");
        assert_eq!(g.id, Some(Id::from("графы")));
        assert_eq!(parse_one(r#"graph "A\"" {}"#).id, Some(Id::from("A\"")));
        assert_eq!(parse_one(r#"graph "A\\" {}"#).id, Some(Id::from(r"A\\")));
    }

    #[test]
    fn strict_flag() {
        let g = parse_one("strict digraph G { }");
        assert!(g.strict);
        assert!(g.is_directed());
        assert!(!parse_one("digraph G { }").strict);
    }

    #[test]
    fn edge_chain_is_one_statement() {
        let g = parse_one("graph {a -> b -> c}");
        assert_eq!(g.children.len(), 1);
        if let Stmt::Edge(e) = &g.children[0] {
            let names: Vec<Id> =
                e.edge_list.iter().map(node_name).collect();
            assert_eq!(
                names,
                vec![Id::from("a"), Id::from("b"), Id::from("c")]
            );
            assert!(e.attr_list.is_empty());
        } else {
            panic!("expected an edge statement");
        }
    }

    #[test]
    fn mixed_statements() {
        let g = parse_one("graph {a -> b; c}");
        let types: Vec<&str> =
            g.children.iter().map(|s| s.type_name()).collect();
        assert_eq!(types, vec!["edge_stmt", "node_stmt"]);
    }

    #[test]
    fn multiple_graphs() {
        let graphs = parse("graph a {}\rgraph b {}").unwrap();
        assert_eq!(graphs.len(), 2);
        assert_eq!(graphs[0].id, Some(Id::from("a")));
        assert_eq!(graphs[1].id, Some(Id::from("b")));
    }

    #[test]
    fn whitespace_only_attribute_list() {
        let g = parse_one("digraph { graph [\r]}");
        assert_eq!(g.children.len(), 1);
        if let Stmt::Attr(a) = &g.children[0] {
            assert_eq!(a.target, AttrTarget::Graph);
            assert!(a.attr_list.is_empty());
        } else {
            panic!("expected an attribute statement");
        }
        let g = parse_one("digraph { node [ /* nothing */ ] }");
        assert_eq!(g.children[0].type_name(), "attr_stmt");
    }

    #[test]
    fn ten_thousand_edges() {
        let mut program = String::from("digraph {\n");
        for i in 0..10000 {
            program.push_str(&format!("{} -> {}\n", i, i + 1));
        }
        program.push('}');

        let g = parse_one(&program);
        assert_eq!(g.children.len(), 10000);
        assert!(g.children.iter().all(|s| matches!(s, Stmt::Edge(_))));
        if let Stmt::Edge(e) = &g.children[9999] {
            assert_eq!(node_name(&e.edge_list[1]), Id::Number(10000.));
        }
    }

    #[test]
    fn long_edge_chain() {
        let chain: Vec<String> =
            (0..20000).map(|i| format!("n{}", i)).collect();
        let program = format!("graph {{ {} }}", chain.join(" -- "));
        let g = parse_one(&program);
        if let Stmt::Edge(e) = &g.children[0] {
            assert_eq!(e.edge_list.len(), 20000);
        } else {
            panic!("expected an edge statement");
        }
    }

    #[test]
    fn node_ports() {
        let g = parse_one("digraph { a:p:n [color=red]; b:q }");
        if let Stmt::Node(n) = &g.children[0] {
            assert_eq!(n.node_id.id, Id::from("a"));
            let port = n.node_id.port.as_ref().unwrap();
            assert_eq!(port.id, Id::from("p"));
            assert_eq!(port.compass, Some(Id::from("n")));
            assert_eq!(n.attr_list.get("color"), Some(&Id::from("red")));
        } else {
            panic!("expected a node statement");
        }
        if let Stmt::Node(n) = &g.children[1] {
            let port = n.node_id.port.as_ref().unwrap();
            assert_eq!(port.id, Id::from("q"));
            assert_eq!(port.compass, None);
        } else {
            panic!("expected a node statement");
        }
    }

    #[test]
    fn attribute_groups_keep_order_and_duplicates() {
        let g = parse_one("graph { a [x=1, y=2; z=3][w=4 x=5] }");
        if let Stmt::Node(n) = &g.children[0] {
            let keys: Vec<String> =
                n.attr_list.iter().map(|a| a.key.to_string()).collect();
            assert_eq!(keys, vec!["x", "y", "z", "w", "x"]);
            assert_eq!(n.attr_list.list[0].value, Id::Number(1.));
            assert_eq!(n.attr_list.get("x"), Some(&Id::Number(5.)));
        } else {
            panic!("expected a node statement");
        }
    }

    #[test]
    fn assignments_and_attr_stmts() {
        let g = parse_one(
            "digraph { rankdir = LR; node [shape=box]; edge [color=\"red\"] }",
        );
        assert_eq!(
            g.children[0],
            Stmt::Assignment(Assignment {
                id: Id::from("rankdir"),
                eq: Id::from("LR")
            })
        );
        let targets: Vec<AttrTarget> = g.children[1..]
            .iter()
            .map(|s| match s {
                Stmt::Attr(a) => a.target,
                _ => panic!("expected an attribute statement"),
            })
            .collect();
        assert_eq!(targets, vec![AttrTarget::Node, AttrTarget::Edge]);
    }

    #[test]
    fn subgraphs() {
        let g = parse_one("digraph { subgraph cluster_0 { a; b } { c d } }");
        assert_eq!(g.children.len(), 2);
        if let Stmt::Subgraph(s) = &g.children[0] {
            assert_eq!(s.id, Some(Id::from("cluster_0")));
            assert_eq!(s.children.len(), 2);
        } else {
            panic!("expected a subgraph");
        }
        if let Stmt::Subgraph(s) = &g.children[1] {
            assert_eq!(s.id, None);
            assert_eq!(s.children.len(), 2);
        } else {
            panic!("expected a subgraph");
        }
    }

    #[test]
    fn subgraph_endpoints() {
        let g = parse_one("digraph { a -> {b c} -> subgraph s {d} [w=1] }");
        if let Stmt::Edge(e) = &g.children[0] {
            assert_eq!(e.edge_list.len(), 3);
            assert_eq!(node_name(&e.edge_list[0]), Id::from("a"));
            match &e.edge_list[1] {
                Endpoint::Subgraph(s) => {
                    assert_eq!(s.id, None);
                    assert_eq!(s.children.len(), 2);
                }
                _ => panic!("expected a subgraph"),
            }
            match &e.edge_list[2] {
                Endpoint::Subgraph(s) => assert_eq!(s.id, Some(Id::from("s"))),
                _ => panic!("expected a subgraph"),
            }
            assert_eq!(e.attr_list.len(), 1);
        } else {
            panic!("expected an edge statement");
        }

        let g = parse_one("graph { {a b} -- c }");
        if let Stmt::Edge(e) = &g.children[0] {
            assert!(matches!(e.edge_list[0], Endpoint::Subgraph(_)));
            assert_eq!(node_name(&e.edge_list[1]), Id::from("c"));
        } else {
            panic!("expected an edge statement");
        }
    }

    #[test]
    fn undirected_edges_in_a_digraph() {
        let g = parse_one("digraph { a -- b }");
        assert_eq!(g.children[0].type_name(), "edge_stmt");
    }

    #[test]
    fn html_and_concatenated_ids() {
        let g = parse_one(
            "digraph { a [label=<<b>bold</b>>]; \
             b [label=\"x\" + \"y\" + \"z\"] }",
        );
        if let Stmt::Node(n) = &g.children[0] {
            assert_eq!(
                n.attr_list.get("label"),
                Some(&Id::Html("<b>bold</b>".to_string()))
            );
        }
        if let Stmt::Node(n) = &g.children[1] {
            assert_eq!(n.attr_list.get("label"), Some(&Id::from("xyz")));
        }
    }

    #[test]
    fn negative_and_float_ids() {
        let g = parse_one("graph { -1 -- 2.5 }");
        if let Stmt::Edge(e) = &g.children[0] {
            assert_eq!(node_name(&e.edge_list[0]), Id::Number(-1.));
            assert_eq!(node_name(&e.edge_list[1]), Id::Number(2.5));
        } else {
            panic!("expected an edge statement");
        }
    }

    #[test]
    fn separators_are_optional() {
        let g = parse_one("graph { ; a;; b; }");
        assert_eq!(g.children.len(), 2);
    }

    #[test]
    fn byte_order_mark() {
        assert_eq!(parse_one("\u{FEFF}graph x {}").id, Some(Id::from("x")));
    }

    #[test]
    fn parsing_is_deterministic() {
        let program = "digraph G { a -> {b c}; d [x=1]; subgraph s { e } }";
        assert_eq!(parse(program).unwrap(), parse(program).unwrap());

        let mut parser = DotParser::new(program);
        let first = parser.process().unwrap();
        let second = parser.process().unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn unterminated_body() {
        let err = parse_error("graph {");
        assert_eq!(err.expected, vec!["'}'"]);
        assert_eq!(err.found, "end of input");
        assert_eq!((err.line, err.col), (1, 8));
    }

    #[test]
    fn parse_program_fail() {
        let err = parse_error("graph { } s");
        assert_eq!(err.found, "identifier `s`");
        assert_eq!(err.col, 11);
        assert!(parse("").is_err());
        assert!(parse("digraph strict {}").is_err());
        assert!(parse("graph { a -> }").is_err());
        assert!(parse("graph { a [b] }").is_err());
    }

    #[test]
    fn oversized_numeral_is_rejected() {
        let program = format!("graph {{ a -- {} }}", "9".repeat(400));
        assert!(matches!(
            parse(&program),
            Err(Error::Lex(LexError::InvalidNumber { line: 1, col: 14, .. }))
        ));
        let program = format!("graph {} {{}}", "9".repeat(400));
        assert!(matches!(
            parse(&program),
            Err(Error::Lex(LexError::InvalidNumber { .. }))
        ));
    }

    #[test]
    fn attr_stmt_needs_brackets() {
        let err = parse_error("graph { node; }");
        assert_eq!(err.expected, vec!["'['"]);
        assert_eq!(err.found, "';'");
    }

    #[test]
    fn lex_errors_abort_the_parse() {
        assert_eq!(
            parse("graph { \"abc"),
            Err(Error::Lex(LexError::UnterminatedString { line: 1, col: 9 }))
        );
    }

    #[test]
    fn nesting_limit() {
        let options = ParseOptions::new().with_max_depth(1);
        assert!(parse_with_options("graph { { a } }", options).is_ok());
        match parse_with_options("graph { { { a } } }", options) {
            Err(Error::Parse(err)) => {
                assert_eq!(err.expected, vec!["at most 1 nested subgraphs"]);
                assert_eq!(err.col, 11);
            }
            other => panic!("expected a parse error, got {:?}", other),
        }

        let nested = |n: usize| {
            format!("graph {}{}", "{".repeat(n + 1), "}".repeat(n + 1))
        };
        assert!(parse(&nested(100)).is_ok());
        assert!(parse(&nested(1000)).is_err());
    }

    #[test]
    fn error_annotation() {
        let program = "digraph {\n  a -> ;\n}";
        let err = parse(program).unwrap_err();
        assert_eq!((err.line(), err.col()), (2, 8));
        assert_eq!(
            err.annotate(program),
            "  a -> ;\n       ^\nError: 2:8: expected one of identifier, \
             '{', 'subgraph', found ';'"
        );
    }

    #[test]
    fn graph_stats() {
        let g = parse_one(
            "digraph { a; a -> b -> c; subgraph { d -> e } node [x=1]; k=v }",
        );
        let stats = GraphStats::from_graph(&g);
        assert_eq!(stats.node_stmts, 1);
        assert_eq!(stats.edge_stmts, 2);
        assert_eq!(stats.edges, 3);
        assert_eq!(stats.attr_stmts, 1);
        assert_eq!(stats.assignments, 1);
        assert_eq!(stats.subgraphs, 1);
    }

    #[test]
    fn dump_ast_outline() {
        use dotparse::parser::printer::ast_to_string;
        let g = parse_one("digraph G { a -> b [color=red]; }");
        assert_eq!(
            ast_to_string(&g),
            "digraph G:\n Edge:\n  a\n  ->\n  b\n  0)\"color\" = \"red\"\n"
        );
    }

    #[test]
    fn outline_formats_nested_statements() {
        use dotparse::parser::printer::{ast_to_string, AstOutline};
        let g = parse_one(
            "strict graph \"x\" { k=v; node [s=1]; \
             subgraph s { p:q:n -- {r} } }",
        );
        let expected = "strict graph x:\n \
            Assign \"k\" = \"v\"\n \
            Attribute Node:\n  0)\"s\" = \"1\"\n \
            Subgraph: s\n  Edge:\n   p:q:n\n   --\n   Subgraph:\n    Node r\n";
        assert_eq!(ast_to_string(&g), expected);
        assert_eq!(format!("{}", AstOutline(&g)), expected);
    }

    #[test]
    fn parse_threads_independently() {
        let handles: Vec<_> = (0..4)
            .map(|i| {
                std::thread::spawn(move || {
                    let program = format!("graph g{} {{ a -- b }}", i);
                    parse(&program).unwrap()
                })
            })
            .collect();
        for (i, h) in handles.into_iter().enumerate() {
            let graphs = h.join().unwrap();
            assert_eq!(graphs[0].id, Some(Id::Str(format!("g{}", i))));
        }
    }
}

#[cfg(test)]
mod json_tests {

    use serde_json::json;

    fn to_json(program: &str) -> serde_json::Value {
        serde_json::to_value(dotparse::parse(program).unwrap()).unwrap()
    }

    #[test]
    fn empty_graph_has_null_children() {
        assert_eq!(
            to_json("graph {}"),
            json!([{
                "type": "graph",
                "strict": false,
                "id": null,
                "children": null
            }])
        );
    }

    #[test]
    fn separator_only_body_is_empty() {
        let graphs = dotparse::parse("graph { ; ;; }").unwrap();
        assert!(!graphs[0].has_children());
        assert_eq!(to_json("graph { ; }")[0]["children"], json!(null));
        assert_eq!(
            to_json("graph { {;} }")[0]["children"][0]["children"],
            json!([])
        );
    }

    #[test]
    fn numeric_id_is_a_number() {
        assert_eq!(to_json("graph 42 {}")[0]["id"], json!(42));
        assert_eq!(to_json("graph 4.5 {}")[0]["id"], json!(4.5));
    }

    #[test]
    fn statement_shapes() {
        let v = to_json("digraph { a -> b [color=red]; c:p; x = y; {} }");
        let children = &v[0]["children"];
        assert_eq!(
            children[0],
            json!({
                "type": "edge_stmt",
                "edge_list": [
                    {"type": "node_id", "id": "a", "port": null},
                    {"type": "node_id", "id": "b", "port": null}
                ],
                "attr_list": [{"key": "color", "value": "red"}]
            })
        );
        assert_eq!(
            children[1],
            json!({
                "type": "node_stmt",
                "id": "c",
                "port": {"id": "p", "compass": null},
                "attr_list": []
            })
        );
        assert_eq!(
            children[2],
            json!({"type": "assignment", "id": "x", "eq": "y"})
        );
        assert_eq!(
            children[3],
            json!({"type": "subgraph", "id": null, "children": []})
        );
    }

    #[test]
    fn attr_stmt_and_html_shapes() {
        let v = to_json("graph { node [label=<x>] }");
        assert_eq!(
            v[0]["children"][0],
            json!({
                "type": "attr_stmt",
                "target": "node",
                "attr_list": [{"key": "label", "value": {"html": "x"}}]
            })
        );
    }
}
