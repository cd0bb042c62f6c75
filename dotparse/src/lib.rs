/*!
This crate provides a parser for the GraphViz DOT language. It turns DOT
source text into an owned abstract syntax tree that other tools can walk to
render or analyze graphs. The parser handles nested and anonymous subgraphs,
edge chains, attribute lists, ports and compass points, quoted, numeric, html
and unicode identifiers, and any number of graphs in one input.

The crate does not read files and does not lay out or render anything.

# Parser example: parse a dot string

```rust
    let contents = "digraph { a -> b -> c [label=\"foo\"]; }";
    let graphs = dotparse::parse(contents).unwrap();
    assert_eq!(graphs.len(), 1);

    let g = &graphs[0];
    assert!(g.is_directed());
    dotparse::parser::dump_ast(g);
```

Errors carry the position of the offending token and can render it:

```rust
    let contents = "digraph {\n  a -> ;\n}";
    let err = dotparse::parse(contents).unwrap_err();
    assert_eq!((err.line(), err.col()), (2, 8));
    println!("{}", err.annotate(contents));
```

which prints:

```txt
  a -> ;
       ^
Error: 2:8: expected one of identifier, '{', 'subgraph', found ';'
```
*/

pub mod parser;

pub use parser::ast;
pub use parser::error::{Error, LexError, ParseError};
pub use parser::options::ParseOptions;

/// Parses every graph in `source`.
pub fn parse(source: &str) -> Result<Vec<ast::Graph>, Error> {
    parse_with_options(source, ParseOptions::default())
}

pub fn parse_with_options(
    source: &str,
    options: ParseOptions,
) -> Result<Vec<ast::Graph>, Error> {
    parser::DotParser::with_options(source, options).process()
}
