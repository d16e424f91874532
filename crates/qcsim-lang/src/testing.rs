//! A hand-assembled syntax tree for unit tests.
//!
//! Tokens are appended to a growing source string so every node carries a
//! real range that slices back to its text.

use crate::syntax::{Point, Range, SyntaxNode};

#[derive(Debug)]
struct NodeData {
    kind: String,
    range: Range,
    children: Vec<usize>,
    fields: Vec<(String, usize)>,
    parent: Option<usize>,
}

#[derive(Debug, Default)]
pub(crate) struct TestTree {
    source: String,
    row: usize,
    column: usize,
    nodes: Vec<NodeData>,
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct TestNode<'t> {
    tree: &'t TestTree,
    id: usize,
}

impl TestTree {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn source(&self) -> &str {
        &self.source
    }

    pub(crate) fn node(&self, id: usize) -> TestNode<'_> {
        TestNode { tree: self, id }
    }

    /// Append `text` as a leaf of the given kind, followed by a space.
    pub(crate) fn token(&mut self, kind: &str, text: &str) -> usize {
        let start = Point::new(self.row, self.column);
        let start_byte = self.source.len();
        self.source.push_str(text);
        self.column += text.len();
        let range = Range {
            start_byte,
            end_byte: self.source.len(),
            start_point: start,
            end_point: Point::new(self.row, self.column),
        };
        self.source.push(' ');
        self.column += 1;
        self.push(kind, range, vec![])
    }

    pub(crate) fn newline(&mut self) {
        self.source.push('\n');
        self.row += 1;
        self.column = 0;
    }

    /// Wrap existing nodes in a parent of the given kind.
    pub(crate) fn wrap(&mut self, kind: &str, children: &[usize]) -> usize {
        let range = match (children.first(), children.last()) {
            (Some(&first), Some(&last)) => Range {
                start_byte: self.nodes[first].range.start_byte,
                end_byte: self.nodes[last].range.end_byte,
                start_point: self.nodes[first].range.start_point,
                end_point: self.nodes[last].range.end_point,
            },
            _ => Range::default(),
        };
        let id = self.push(kind, range, children.to_vec());
        for &child in children {
            self.nodes[child].parent = Some(id);
        }
        id
    }

    pub(crate) fn set_field(&mut self, node: usize, name: &str, child: usize) {
        self.nodes[node].fields.push((name.to_string(), child));
    }

    /// `lhs <op> rhs` with fields `arg1` and `arg2`.
    pub(crate) fn binary(&mut self, kind: &str, lhs: usize, op: &str, rhs: usize) -> usize {
        let op = self.token(op, op);
        let id = self.wrap(kind, &[lhs, op, rhs]);
        self.set_field(id, "arg1", lhs);
        self.set_field(id, "arg2", rhs);
        id
    }

    /// `name(arg)` with field `arg`.
    pub(crate) fn call(&mut self, kind: &str, build_arg: impl FnOnce(&mut Self) -> usize) -> usize {
        let name = self.token(kind, kind);
        let open = self.token("(", "(");
        let arg = build_arg(self);
        let close = self.token(")", ")");
        let id = self.wrap(kind, &[name, open, arg, close]);
        self.set_field(id, "arg", arg);
        id
    }

    pub(crate) fn number(&mut self, text: &str) -> usize {
        self.token("number", text)
    }

    fn push(&mut self, kind: &str, range: Range, children: Vec<usize>) -> usize {
        self.nodes.push(NodeData {
            kind: kind.to_string(),
            range,
            children,
            fields: vec![],
            parent: None,
        });
        self.nodes.len() - 1
    }
}

impl SyntaxNode for TestNode<'_> {
    fn kind(&self) -> &str {
        &self.tree.nodes[self.id].kind
    }

    fn children(&self) -> Vec<Self> {
        self.tree.nodes[self.id]
            .children
            .iter()
            .map(|&id| self.tree.node(id))
            .collect()
    }

    fn child_by_field_name(&self, name: &str) -> Option<Self> {
        self.tree.nodes[self.id]
            .fields
            .iter()
            .find(|(field, _)| field == name)
            .map(|&(_, id)| self.tree.node(id))
    }

    fn next_sibling(&self) -> Option<Self> {
        let parent = self.tree.nodes[self.id].parent?;
        let siblings = &self.tree.nodes[parent].children;
        let position = siblings.iter().position(|&id| id == self.id)?;
        siblings.get(position + 1).map(|&id| self.tree.node(id))
    }

    fn range(&self) -> Range {
        self.tree.nodes[self.id].range
    }
}
