//! A collection of methods for printing the AST.

use super::ast;
use std::fmt::{self, Write};

fn indent(out: &mut impl Write, indent: usize) -> fmt::Result {
    write!(out, "{:1$}", "", indent)
}

fn print_node_id(out: &mut impl Write, n: &ast::NodeId) -> fmt::Result {
    write!(out, "{}", n.id)?;
    if let Some(port) = &n.port {
        write!(out, ":{}", port.id)?;
        if let Some(compass) = &port.compass {
            write!(out, ":{}", compass)?;
        }
    }
    Ok(())
}

fn print_attribute_list(
    out: &mut impl Write,
    ll: &ast::AttributeList,
    ind: usize,
) -> fmt::Result {
    for (i, att) in ll.iter().enumerate() {
        indent(out, ind)?;
        writeln!(out, "{})\"{}\" = \"{}\"", i, att.key, att.value)?;
    }
    Ok(())
}

fn print_edge(
    out: &mut impl Write,
    e: &ast::EdgeStmt,
    arrow: &str,
    ind: usize,
) -> fmt::Result {
    indent(out, ind)?;
    out.write_str("Edge:\n")?;
    for (i, endpoint) in e.edge_list.iter().enumerate() {
        if i > 0 {
            indent(out, ind + 1)?;
            writeln!(out, "{}", arrow)?;
        }
        match endpoint {
            ast::Endpoint::Node(n) => {
                indent(out, ind + 1)?;
                print_node_id(out, n)?;
                out.write_char('\n')?;
            }
            ast::Endpoint::Subgraph(g) => {
                print_subgraph(out, g, arrow, ind + 1)?;
            }
        }
    }
    print_attribute_list(out, &e.attr_list, ind + 1)
}

fn print_node(
    out: &mut impl Write,
    n: &ast::NodeStmt,
    ind: usize,
) -> fmt::Result {
    indent(out, ind)?;
    out.write_str("Node ")?;
    print_node_id(out, &n.node_id)?;
    out.write_char('\n')?;
    print_attribute_list(out, &n.attr_list, ind + 1)
}

fn print_att(
    out: &mut impl Write,
    att: &ast::AttrStmt,
    ind: usize,
) -> fmt::Result {
    indent(out, ind)?;
    match att.target {
        ast::AttrTarget::Graph => out.write_str("Attribute Graph:\n")?,
        ast::AttrTarget::Node => out.write_str("Attribute Node:\n")?,
        ast::AttrTarget::Edge => out.write_str("Attribute Edge:\n")?,
    }
    print_attribute_list(out, &att.attr_list, ind + 1)
}

fn print_stmt(
    out: &mut impl Write,
    stmt: &ast::Stmt,
    arrow: &str,
    ind: usize,
) -> fmt::Result {
    match stmt {
        ast::Stmt::Edge(e) => print_edge(out, e, arrow, ind),
        ast::Stmt::Node(n) => print_node(out, n, ind),
        ast::Stmt::Attr(a) => print_att(out, a, ind),
        ast::Stmt::Assignment(a) => {
            indent(out, ind)?;
            writeln!(out, "Assign \"{}\" = \"{}\"", a.id, a.eq)
        }
        ast::Stmt::Subgraph(g) => print_subgraph(out, g, arrow, ind),
    }
}

fn print_subgraph(
    out: &mut impl Write,
    g: &ast::Subgraph,
    arrow: &str,
    ind: usize,
) -> fmt::Result {
    indent(out, ind)?;
    match &g.id {
        Some(id) => writeln!(out, "Subgraph: {}", id)?,
        None => out.write_str("Subgraph:\n")?,
    }
    for stmt in &g.children {
        print_stmt(out, stmt, arrow, ind + 1)?;
    }
    Ok(())
}

/// An indented outline of a graph, one line per statement.
pub struct AstOutline<'a>(pub &'a ast::Graph);

impl fmt::Display for AstOutline<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let graph = self.0;
        let (kind, arrow) = match graph.kind {
            ast::GraphKind::Graph => ("graph", "--"),
            ast::GraphKind::Digraph => ("digraph", "->"),
        };
        if graph.strict {
            f.write_str("strict ")?;
        }
        f.write_str(kind)?;
        if let Some(id) = &graph.id {
            write!(f, " {}", id)?;
        }
        f.write_str(":\n")?;
        for stmt in &graph.children {
            print_stmt(f, stmt, arrow, 1)?;
        }
        Ok(())
    }
}

/// Renders an indented outline of the graph, one line per statement.
pub fn ast_to_string(graph: &ast::Graph) -> String {
    AstOutline(graph).to_string()
}

pub fn dump_ast(graph: &ast::Graph) {
    print!("{}", AstOutline(graph));
}
