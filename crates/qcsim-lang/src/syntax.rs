//! Read-only view of a parsed program.
//!
//! The builder and evaluator never see a concrete parser. They work against
//! [`SyntaxNode`], which any tree can implement as long as it exposes node
//! kinds, ordered children, named fields, sibling links and source ranges.
//! Node kinds are matched once, at the boundary, into the closed
//! [`StatementKind`] and [`ExprKind`] enums.

use qcsim_state::StandardGate;

use crate::error::{LangError, LangResult};
use crate::instruction::InstructionKind;

/// Node kind names produced by a conforming tree.
pub mod kind {
    pub const SOURCE_FILE: &str = "source_file";
    pub const VARIABLE_DECLARATION: &str = "variable_declaration";
    pub const VAR_NAME: &str = "var_name";
    pub const QUBIT_EXPR: &str = "qubit_expr";
    pub const QUBIT_ZERO: &str = "qubit_zero";
    pub const QUBIT_ONE: &str = "qubit_one";
    pub const UINT: &str = "uint";

    pub const MEASURE: &str = "measure";
    pub const PAULI_X: &str = "pauli_x";
    pub const PAULI_Y: &str = "pauli_y";
    pub const PAULI_Z: &str = "pauli_z";
    pub const HADAMARD: &str = "hadamard";
    pub const PHASE: &str = "phase";
    pub const PI_BY_8: &str = "pi_by_8";
    pub const CONTROLLED_NOT: &str = "controlled_not";
    pub const CONTROLLED_Z: &str = "controlled_z";
    pub const SWAP: &str = "swap";
    pub const TOFFOLI: &str = "toffoli";

    pub const NUMBER: &str = "number";
    pub const PI: &str = "pi";
    pub const IMAG: &str = "imag";
    pub const EULER: &str = "euler";
    pub const ADD: &str = "add";
    pub const SUB: &str = "sub";
    pub const MUL: &str = "mul";
    pub const DIV: &str = "div";
    pub const EXP: &str = "exp";
    pub const SIN: &str = "sin";
    pub const COS: &str = "cos";
    pub const TAN: &str = "tan";
    pub const ROOT: &str = "root";

    pub const KET_ZERO: &str = "|0>";
    pub const KET_ONE: &str = "|1>";
    pub const LPAREN: &str = "(";
}

/// Field names used by expression nodes.
pub mod field {
    pub const ARG: &str = "arg";
    pub const ARG1: &str = "arg1";
    pub const ARG2: &str = "arg2";
}

/// A zero-based row/column position. Columns count bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, PartialOrd, Ord)]
pub struct Point {
    pub row: usize,
    pub column: usize,
}

impl Point {
    pub fn new(row: usize, column: usize) -> Self {
        Self { row, column }
    }
}

/// The source span covered by a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Range {
    pub start_byte: usize,
    pub end_byte: usize,
    pub start_point: Point,
    pub end_point: Point,
}

/// A node in a parsed program.
///
/// Implementations are expected to be cheap handles (an index into an arena,
/// a cursor into a foreign tree), so the methods hand out owned values.
pub trait SyntaxNode: Clone {
    /// The grammar name of this node, e.g. `variable_declaration` or `(`.
    fn kind(&self) -> &str;

    /// All children, named and anonymous, in source order.
    fn children(&self) -> Vec<Self>;

    /// The child stored under `name`, if any.
    fn child_by_field_name(&self, name: &str) -> Option<Self>;

    /// The next node under the same parent, if any.
    fn next_sibling(&self) -> Option<Self>;

    /// Source range covered by this node.
    fn range(&self) -> Range;
}

/// Statements the builder acts on. Every other node is a container and is
/// descended into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatementKind {
    VariableDeclaration,
    Instruction(InstructionKind),
}

impl StatementKind {
    pub fn from_kind(kind: &str) -> Option<Self> {
        let instruction = |gate| Some(Self::Instruction(InstructionKind::Gate(gate)));
        match kind {
            kind::VARIABLE_DECLARATION => Some(Self::VariableDeclaration),
            kind::MEASURE => Some(Self::Instruction(InstructionKind::Measure)),
            kind::PAULI_X => instruction(StandardGate::PauliX),
            kind::PAULI_Y => instruction(StandardGate::PauliY),
            kind::PAULI_Z => instruction(StandardGate::PauliZ),
            kind::HADAMARD => instruction(StandardGate::Hadamard),
            kind::PHASE => instruction(StandardGate::Phase),
            kind::PI_BY_8 => instruction(StandardGate::PiBy8),
            kind::CONTROLLED_NOT => instruction(StandardGate::ControlledNot),
            kind::CONTROLLED_Z => instruction(StandardGate::ControlledZ),
            kind::SWAP => instruction(StandardGate::Swap),
            kind::TOFFOLI => instruction(StandardGate::Toffoli),
            _ => None,
        }
    }
}

/// Binary arithmetic operators, read from fields `arg1` and `arg2`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    /// Complex power.
    Exp,
}

/// Unary functions, read from field `arg`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryFn {
    Sin,
    Cos,
    Tan,
}

/// Expression node kinds the evaluator understands.
///
/// Anything else (parentheses, commas, unknown wrappers) is skipped over to
/// its next sibling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExprKind {
    Number,
    Pi,
    Imag,
    Euler,
    Binary(BinaryOp),
    Unary(UnaryFn),
    /// `arg1^(1/arg2)`.
    Root,
    /// `|0>` or `|1>`.
    Ket,
}

impl ExprKind {
    pub fn from_kind(kind: &str) -> Option<Self> {
        match kind {
            kind::NUMBER => Some(Self::Number),
            kind::PI => Some(Self::Pi),
            kind::IMAG => Some(Self::Imag),
            kind::EULER => Some(Self::Euler),
            kind::ADD => Some(Self::Binary(BinaryOp::Add)),
            kind::SUB => Some(Self::Binary(BinaryOp::Sub)),
            kind::MUL => Some(Self::Binary(BinaryOp::Mul)),
            kind::DIV => Some(Self::Binary(BinaryOp::Div)),
            kind::EXP => Some(Self::Binary(BinaryOp::Exp)),
            kind::SIN => Some(Self::Unary(UnaryFn::Sin)),
            kind::COS => Some(Self::Unary(UnaryFn::Cos)),
            kind::TAN => Some(Self::Unary(UnaryFn::Tan)),
            kind::ROOT => Some(Self::Root),
            kind::KET_ZERO | kind::KET_ONE => Some(Self::Ket),
            _ => None,
        }
    }
}

/// Program text addressed by node ranges.
#[derive(Debug, Clone, Copy)]
pub struct SourceText<'s> {
    text: &'s str,
}

impl<'s> SourceText<'s> {
    pub fn new(text: &'s str) -> Self {
        Self { text }
    }

    /// The text covered by `range`.
    ///
    /// Single-line ranges are cut by row and column. Ranges spanning several
    /// lines fall back to the byte offsets.
    pub fn slice(&self, range: &Range) -> LangResult<&'s str> {
        let (start, end) = (range.start_point, range.end_point);
        let sliced = if start.row == end.row {
            self.text
                .split('\n')
                .nth(start.row)
                .and_then(|line| line.get(start.column..end.column))
        } else {
            self.text.get(range.start_byte..range.end_byte)
        };

        sliced.ok_or_else(|| {
            LangError::Structural(format!(
                "node range {}:{}-{}:{} lies outside the source text",
                start.row + 1,
                start.column + 1,
                end.row + 1,
                end.column + 1
            ))
        })
    }

    /// Text of `node`.
    pub fn text_of<N: SyntaxNode>(&self, node: &N) -> LangResult<&'s str> {
        self.slice(&node.range())
    }
}
