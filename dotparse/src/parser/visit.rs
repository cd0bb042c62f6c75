//! Read-only traversal of the AST.
//!
//! Implement the `visit_*` hooks you care about; the default methods walk into
//! the children, so an override that wants to keep descending calls the
//! matching `walk_*` function.

use super::ast;

pub trait Visitor {
    fn visit_graph(&mut self, graph: &ast::Graph) {
        walk_graph(self, graph);
    }

    fn visit_stmt(&mut self, stmt: &ast::Stmt) {
        walk_stmt(self, stmt);
    }

    fn visit_node(&mut self, _n: &ast::NodeStmt) {}

    fn visit_edge(&mut self, e: &ast::EdgeStmt) {
        walk_edge(self, e);
    }

    fn visit_node_id(&mut self, _n: &ast::NodeId) {}

    fn visit_att(&mut self, _att: &ast::AttrStmt) {}

    fn visit_assignment(&mut self, _a: &ast::Assignment) {}

    fn visit_subgraph(&mut self, g: &ast::Subgraph) {
        walk_subgraph(self, g);
    }
}

pub fn walk_graph<V: Visitor + ?Sized>(v: &mut V, graph: &ast::Graph) {
    for stmt in &graph.children {
        v.visit_stmt(stmt);
    }
}

pub fn walk_stmt<V: Visitor + ?Sized>(v: &mut V, stmt: &ast::Stmt) {
    match stmt {
        ast::Stmt::Edge(e) => v.visit_edge(e),
        ast::Stmt::Node(n) => v.visit_node(n),
        ast::Stmt::Attr(a) => v.visit_att(a),
        ast::Stmt::Assignment(a) => v.visit_assignment(a),
        ast::Stmt::Subgraph(g) => v.visit_subgraph(g),
    }
}

pub fn walk_edge<V: Visitor + ?Sized>(v: &mut V, e: &ast::EdgeStmt) {
    for endpoint in &e.edge_list {
        match endpoint {
            ast::Endpoint::Node(n) => v.visit_node_id(n),
            ast::Endpoint::Subgraph(g) => v.visit_subgraph(g),
        }
    }
}

pub fn walk_subgraph<V: Visitor + ?Sized>(v: &mut V, g: &ast::Subgraph) {
    for stmt in &g.children {
        v.visit_stmt(stmt);
    }
}

/// Statement counts for a parsed graph.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GraphStats {
    pub node_stmts: usize,
    pub edge_stmts: usize,
    /// Every consecutive pair in an edge chain is one edge.
    pub edges: usize,
    pub attr_stmts: usize,
    pub assignments: usize,
    pub subgraphs: usize,
}

impl GraphStats {
    pub fn from_graph(graph: &ast::Graph) -> Self {
        let mut stats = Self::default();
        stats.visit_graph(graph);
        stats
    }
}

impl Visitor for GraphStats {
    fn visit_node(&mut self, _n: &ast::NodeStmt) {
        self.node_stmts += 1;
    }

    fn visit_edge(&mut self, e: &ast::EdgeStmt) {
        self.edge_stmts += 1;
        self.edges += e.edge_list.len().saturating_sub(1);
        walk_edge(self, e);
    }

    fn visit_att(&mut self, _att: &ast::AttrStmt) {
        self.attr_stmts += 1;
    }

    fn visit_assignment(&mut self, _a: &ast::Assignment) {
        self.assignments += 1;
    }

    fn visit_subgraph(&mut self, g: &ast::Subgraph) {
        self.subgraphs += 1;
        walk_subgraph(self, g);
    }
}
