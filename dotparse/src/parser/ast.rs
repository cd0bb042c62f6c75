//! An AST that represents the GraphViz file format.
//!
//! The tree is fully built by a single parse call and owned by the caller.
//! With the `serde` feature every node serializes with a `type` tag
//! (`graph`, `digraph`, `node_stmt`, `edge_stmt`, `attr_stmt`, `assignment`,
//! `subgraph`, `node_id`).

#[cfg(feature = "serde")]
use serde::{Serialize, Serializer};

/// An identifier: a bare or quoted name, a numeral or an html string.
#[derive(Debug, Clone, PartialEq)]
pub enum Id {
    Str(String),
    Number(f64),
    Html(String),
}

impl Id {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }
}

impl From<&str> for Id {
    fn from(s: &str) -> Self {
        Self::Str(s.to_string())
    }
}

impl std::fmt::Display for Id {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Str(x) => write!(f, "{}", x),
            Self::Number(n) => write!(f, "{}", n),
            Self::Html(x) => write!(f, "<{}>", x),
        }
    }
}

// Integral numbers serialize without a fraction: `graph 42 {}` has id 42.
#[cfg(feature = "serde")]
impl Serialize for Id {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        const MAX_EXACT: f64 = 9007199254740992.0;
        match self {
            Self::Str(x) => s.serialize_str(x),
            Self::Number(n) if n.fract() == 0.0 && n.abs() < MAX_EXACT => {
                s.serialize_i64(*n as i64)
            }
            Self::Number(n) => s.serialize_f64(*n),
            Self::Html(x) => {
                use serde::ser::SerializeMap;
                let mut map = s.serialize_map(Some(1))?;
                map.serialize_entry("html", x)?;
                map.end()
            }
        }
    }
}

// "name:port:compass"
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Port {
    pub id: Id,
    pub compass: Option<Id>,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct NodeId {
    pub id: Id,
    pub port: Option<Port>,
}

impl NodeId {
    pub fn new(id: Id, port: Option<Port>) -> Self {
        Self { id, port }
    }
}

// key = value
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Attribute {
    pub key: Id,
    pub value: Id,
}

// [a=b; c=d; ... ]
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize), serde(transparent))]
pub struct AttributeList {
    pub list: Vec<Attribute>,
}

impl AttributeList {
    pub fn new() -> Self {
        Self { list: Vec::new() }
    }

    pub fn add_attr(&mut self, key: Id, value: Id) {
        self.list.push(Attribute { key, value });
    }

    /// Returns the value of the last attribute named `key`. Later entries
    /// override earlier ones, but every entry is kept in `list`.
    pub fn get(&self, key: &str) -> Option<&Id> {
        self.list
            .iter()
            .rev()
            .find(|a| a.key.as_str() == Some(key))
            .map(|a| &a.value)
    }

    pub fn len(&self) -> usize {
        self.list.len()
    }

    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Attribute> {
        self.list.iter()
    }
}

// (graph | node | edge)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize),
    serde(rename_all = "lowercase")
)]
pub enum AttrTarget {
    Graph,
    Node,
    Edge,
}

// (graph | node | edge) [ ... ]
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct AttrStmt {
    pub target: AttrTarget,
    pub attr_list: AttributeList,
}

impl AttrStmt {
    pub fn new(target: AttrTarget, attr_list: AttributeList) -> Self {
        Self { target, attr_list }
    }
}

// ID '=' ID
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Assignment {
    pub id: Id,
    pub eq: Id,
}

// node-name [ ... ]
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct NodeStmt {
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub node_id: NodeId,
    pub attr_list: AttributeList,
}

impl NodeStmt {
    pub fn new_with_list(node_id: NodeId, attr_list: AttributeList) -> Self {
        Self { node_id, attr_list }
    }
}

/// One side of an edge: a node or a whole subgraph.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize), serde(tag = "type"))]
pub enum Endpoint {
    #[cfg_attr(feature = "serde", serde(rename = "node_id"))]
    Node(NodeId),
    #[cfg_attr(feature = "serde", serde(rename = "subgraph"))]
    Subgraph(Subgraph),
}

// a -> b -> c [...]
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct EdgeStmt {
    pub edge_list: Vec<Endpoint>,
    pub attr_list: AttributeList,
}

impl EdgeStmt {
    pub fn new(from: Endpoint) -> Self {
        Self {
            edge_list: vec![from],
            attr_list: AttributeList::new(),
        }
    }

    pub fn insert(&mut self, to: Endpoint) {
        self.edge_list.push(to);
    }
}

// subgraph [ID] { ... }
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Subgraph {
    pub id: Option<Id>,
    pub children: Vec<Stmt>,
}

impl Subgraph {
    pub fn new(id: Option<Id>) -> Self {
        Self {
            id,
            children: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize), serde(tag = "type"))]
pub enum Stmt {
    #[cfg_attr(feature = "serde", serde(rename = "node_stmt"))]
    Node(NodeStmt),
    #[cfg_attr(feature = "serde", serde(rename = "edge_stmt"))]
    Edge(EdgeStmt),
    #[cfg_attr(feature = "serde", serde(rename = "attr_stmt"))]
    Attr(AttrStmt),
    #[cfg_attr(feature = "serde", serde(rename = "assignment"))]
    Assignment(Assignment),
    #[cfg_attr(feature = "serde", serde(rename = "subgraph"))]
    Subgraph(Subgraph),
}

impl Stmt {
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Node(_) => "node_stmt",
            Self::Edge(_) => "edge_stmt",
            Self::Attr(_) => "attr_stmt",
            Self::Assignment(_) => "assignment",
            Self::Subgraph(_) => "subgraph",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize),
    serde(rename_all = "lowercase")
)]
pub enum GraphKind {
    Graph,
    Digraph,
}

/// A top-level graph. `children` is always present; an empty body is told
/// apart with `has_children` and serializes as `null`. A body made only of
/// `;` separators holds no statements, so `graph { ; }` is empty too.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Graph {
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub kind: GraphKind,
    pub strict: bool,
    pub id: Option<Id>,
    #[cfg_attr(feature = "serde", serde(serialize_with = "children_or_null"))]
    pub children: Vec<Stmt>,
}

impl Graph {
    pub fn new(kind: GraphKind) -> Self {
        Self {
            kind,
            strict: false,
            id: None,
            children: Vec::new(),
        }
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    pub fn is_directed(&self) -> bool {
        self.kind == GraphKind::Digraph
    }
}

#[cfg(feature = "serde")]
fn children_or_null<S: Serializer>(
    children: &[Stmt],
    s: S,
) -> Result<S::Ok, S::Error> {
    if children.is_empty() {
        s.serialize_none()
    } else {
        s.collect_seq(children)
    }
}
