//! Concrete syntax tree arena and rendering
//!
//! The parser builds its tree bottom-up: children exist before their parent
//! does. Nodes therefore live in an append-only arena and refer to each other
//! by index, never by owning pointer; every child index is strictly smaller
//! than its parent's.

use crate::frontend::lexer::Token;
use std::fmt;

/// Arena index of a CST node.
pub type NodeId = usize;

/// CST node tags: the five grammar nonterminals, the two leaf shapes, and
/// the marker for an epsilon match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CstKind {
    // Nonterminals
    E,
    A,
    B,
    F,
    T,
    // Leaves
    Number,
    Operator,
    // Epsilon production
    Empty,
}

/// One node of the concrete syntax tree.
///
/// `token` is populated only for leaves that actually matched an input token;
/// a leaf left tokenless records a terminal the recovery loop never found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CstNode {
    pub kind: CstKind,
    pub children: Vec<NodeId>,
    pub token: Option<Token>,
}

impl CstNode {
    /// Interior node for a nonterminal, with its already-built children.
    pub fn interior(kind: CstKind, children: Vec<NodeId>) -> Self {
        Self {
            kind,
            children,
            token: None,
        }
    }

    /// Leaf node carrying the input token it matched.
    pub fn leaf(kind: CstKind, token: Token) -> Self {
        Self {
            kind,
            children: Vec::new(),
            token: Some(token),
        }
    }

    /// Leaf node for a terminal the parser ran out of input looking for.
    pub fn missing(kind: CstKind) -> Self {
        Self {
            kind,
            children: Vec::new(),
            token: None,
        }
    }

    /// Marker node for an epsilon match.
    pub fn empty() -> Self {
        Self {
            kind: CstKind::Empty,
            children: Vec::new(),
            token: None,
        }
    }
}

impl fmt::Display for CstNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            CstKind::E => write!(f, "(E, )"),
            CstKind::A => write!(f, "(A, )"),
            CstKind::B => write!(f, "(B, )"),
            CstKind::F => write!(f, "(F, )"),
            CstKind::T => write!(f, "(T, )"),
            CstKind::Number | CstKind::Operator => match &self.token {
                Some(token) => write!(f, "{}", token),
                None => write!(f, "(missing)"),
            },
            CstKind::Empty => write!(f, "(empty, epsilon)"),
        }
    }
}

/// Append-only CST arena plus the designated root index.
///
/// The root is recorded once, after top-level parsing finishes; until then it
/// points at slot 0.
#[derive(Debug, Default)]
pub struct Cst {
    nodes: Vec<CstNode>,
    root: NodeId,
}

impl Cst {
    /// Create an empty arena.
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            root: 0,
        }
    }

    /// Append a node and return its index.
    pub fn push(&mut self, node: CstNode) -> NodeId {
        debug_assert!(node.children.iter().all(|&child| child < self.nodes.len()));
        self.nodes.push(node);
        self.nodes.len() - 1
    }

    /// Record the root index.
    pub fn set_root(&mut self, root: NodeId) {
        self.root = root;
    }

    /// The designated root index.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// All nodes, in append order.
    pub fn nodes(&self) -> &[CstNode] {
        &self.nodes
    }

    /// Node at `id`. Panics on an out-of-range index, which the parser never
    /// produces.
    pub fn node(&self, id: NodeId) -> &CstNode {
        &self.nodes[id]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Render the tree as indented text, root first.
    ///
    /// Each child line is indented six spaces per level below the root and
    /// prefixed with `|-- `, or `+-- ` for the last child of its parent.
    pub fn render(&self) -> String {
        let mut out = String::new();
        if !self.nodes.is_empty() {
            self.render_node(self.root, 0, false, &mut out);
        }
        out
    }

    fn render_node(&self, id: NodeId, depth: usize, is_last: bool, out: &mut String) {
        if depth > 0 {
            out.push_str(&" ".repeat((depth - 1) * 6));
            out.push_str(if is_last { "+-- " } else { "|-- " });
        }
        out.push_str(&self.nodes[id].to_string());
        out.push('\n');

        let children = &self.nodes[id].children;
        for (i, &child) in children.iter().enumerate() {
            self.render_node(child, depth + 1, i + 1 == children.len(), out);
        }
    }
}
