//! Arena-backed concrete syntax tree.

use qcsim_lang::{Point, Range, SyntaxNode};
use std::fmt;

#[derive(Debug, Clone)]
pub(crate) struct NodeData {
    pub(crate) kind: &'static str,
    pub(crate) named: bool,
    pub(crate) range: Range,
    pub(crate) children: Vec<usize>,
    pub(crate) fields: Vec<(&'static str, usize)>,
    pub(crate) parent: Option<usize>,
    /// Index among the parent's children.
    pub(crate) position: usize,
}

/// A parsed program.
///
/// Every token is a leaf, so the tree covers the source exactly, punctuation
/// included. Anonymous leaves take their literal text as their kind.
#[derive(Debug, Clone)]
pub struct SyntaxTree {
    source: String,
    nodes: Vec<NodeData>,
    root: usize,
}

impl SyntaxTree {
    pub(crate) fn new(source: &str, nodes: Vec<NodeData>, root: usize) -> Self {
        Self {
            source: source.to_string(),
            nodes,
            root,
        }
    }

    /// The text this tree was parsed from.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// The `source_file` node.
    pub fn root(&self) -> Node<'_> {
        self.node(self.root)
    }

    /// Total number of nodes, leaves included.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Render the named nodes as an S-expression, e.g.
    /// `(source_file (measure (uint)))`.
    pub fn to_sexp(&self) -> String {
        let mut out = String::new();
        // Some(id) opens a node, None closes the most recent one.
        let mut stack = vec![Some(self.root)];
        while let Some(entry) = stack.pop() {
            let Some(id) = entry else {
                out.push(')');
                continue;
            };
            let data = &self.nodes[id];
            if id != self.root {
                out.push(' ');
            }
            out.push('(');
            out.push_str(data.kind);
            stack.push(None);
            stack.extend(
                data.children
                    .iter()
                    .rev()
                    .filter(|&&child| self.nodes[child].named)
                    .map(|&child| Some(child)),
            );
        }
        out
    }

    fn node(&self, id: usize) -> Node<'_> {
        Node { tree: self, id }
    }
}

/// A handle to one node of a [`SyntaxTree`].
#[derive(Clone, Copy)]
pub struct Node<'t> {
    tree: &'t SyntaxTree,
    id: usize,
}

impl<'t> Node<'t> {
    fn data(&self) -> &'t NodeData {
        &self.tree.nodes[self.id]
    }

    /// Whether the node is named (a grammar rule or a named leaf) rather than
    /// bare punctuation or a keyword.
    pub fn is_named(&self) -> bool {
        self.data().named
    }

    /// Source text covered by the node.
    pub fn text(&self) -> &'t str {
        let range = self.data().range;
        self.tree
            .source
            .get(range.start_byte..range.end_byte)
            .unwrap_or_default()
    }

    pub fn parent(&self) -> Option<Node<'t>> {
        self.data().parent.map(|id| self.tree.node(id))
    }

    pub fn start_point(&self) -> Point {
        self.data().range.start_point
    }
}

impl fmt::Debug for Node<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let range = self.data().range;
        write!(
            f,
            "{} [{}, {}] - [{}, {}]",
            self.data().kind,
            range.start_point.row,
            range.start_point.column,
            range.end_point.row,
            range.end_point.column
        )
    }
}

impl SyntaxNode for Node<'_> {
    fn kind(&self) -> &str {
        self.data().kind
    }

    fn children(&self) -> Vec<Self> {
        self.data()
            .children
            .iter()
            .map(|&id| self.tree.node(id))
            .collect()
    }

    fn child_by_field_name(&self, name: &str) -> Option<Self> {
        self.data()
            .fields
            .iter()
            .find(|(field, _)| *field == name)
            .map(|&(_, id)| self.tree.node(id))
    }

    fn next_sibling(&self) -> Option<Self> {
        let data = self.data();
        let parent = &self.tree.nodes[data.parent?];
        parent
            .children
            .get(data.position + 1)
            .map(|&id| self.tree.node(id))
    }

    fn range(&self) -> Range {
        self.data().range
    }
}
