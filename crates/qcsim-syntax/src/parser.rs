//! Recursive-descent parser for the circuit language.
//!
//! The tree mirrors a tree-sitter grammar: every token becomes a leaf, rules
//! become named nodes, and expression operands are reachable through the
//! `arg`, `arg1` and `arg2` fields.

use qcsim_lang::syntax::{field, kind};
use qcsim_lang::{Point, Range};
use tracing::debug;

use crate::error::{SyntaxError, SyntaxResult};
use crate::lexer::{SpannedToken, Token, tokenize};
use crate::tree::{NodeData, SyntaxTree};

/// Deepest recursion the expression parser accepts.
pub const MAX_NESTING: usize = 256;

/// Statement keywords and the node kind each one produces.
const STATEMENT_KEYWORDS: [(&str, &str); 11] = [
    ("measure", kind::MEASURE),
    ("x", kind::PAULI_X),
    ("y", kind::PAULI_Y),
    ("z", kind::PAULI_Z),
    ("hadamard", kind::HADAMARD),
    ("phase", kind::PHASE),
    ("pi_8", kind::PI_BY_8),
    ("cnot", kind::CONTROLLED_NOT),
    ("cz", kind::CONTROLLED_Z),
    ("swap", kind::SWAP),
    ("toffoli", kind::TOFFOLI),
];

/// Parse source text into a [`SyntaxTree`].
pub fn parse(source: &str) -> SyntaxResult<SyntaxTree> {
    let mut parser = Parser::new(source)?;
    let root = parser.parse_source_file()?;
    let num_tokens = parser.tokens.len();
    let tree = SyntaxTree::new(source, parser.nodes, root);
    debug!("Parsed {} tokens into {} nodes", num_tokens, tree.node_count());
    Ok(tree)
}

/// An expression as it sits inside its parent.
///
/// `nodes` are spliced into the parent's children and `head` is what a field
/// points at. A parenthesised expression is spliced in together with its
/// parentheses and its head is the opening `(`.
struct Operand {
    head: usize,
    nodes: Vec<usize>,
}

impl Operand {
    fn single(id: usize) -> Self {
        Self {
            head: id,
            nodes: vec![id],
        }
    }
}

/// Maps byte offsets to rows and columns.
struct LineIndex {
    starts: Vec<usize>,
}

impl LineIndex {
    fn new(source: &str) -> Self {
        let starts = std::iter::once(0)
            .chain(source.match_indices('\n').map(|(i, _)| i + 1))
            .collect();
        Self { starts }
    }

    fn point(&self, byte: usize) -> Point {
        let row = self.starts.partition_point(|&s| s <= byte).saturating_sub(1);
        Point::new(row, byte - self.starts[row])
    }
}

struct Parser<'s> {
    source: &'s str,
    tokens: Vec<SpannedToken>,
    pos: usize,
    lines: LineIndex,
    nodes: Vec<NodeData>,
    depth: usize,
}

impl<'s> Parser<'s> {
    fn new(source: &'s str) -> SyntaxResult<Self> {
        let lines = LineIndex::new(source);
        let mut tokens = Vec::new();

        for result in tokenize(source) {
            match result {
                Ok(t) => tokens.push(t),
                Err((span, message)) => {
                    let at = lines.point(span.start);
                    return Err(SyntaxError::Lexer {
                        line: at.row + 1,
                        column: at.column + 1,
                        message,
                    });
                }
            }
        }

        Ok(Self {
            source,
            tokens,
            pos: 0,
            lines,
            nodes: Vec::new(),
            depth: 0,
        })
    }

    fn is_eof(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos).map(|t| &t.token)
    }

    fn peek_nth(&self, n: usize) -> Option<&Token> {
        self.tokens.get(self.pos + n).map(|t| &t.token)
    }

    fn current(&self, expected: &str) -> SyntaxResult<SpannedToken> {
        self.tokens
            .get(self.pos)
            .cloned()
            .ok_or_else(|| SyntaxError::UnexpectedEof(expected.to_string()))
    }

    fn advance(&mut self, expected: &str) -> SyntaxResult<SpannedToken> {
        let token = self.current(expected)?;
        self.pos += 1;
        Ok(token)
    }

    fn check(&self, token: &Token) -> bool {
        self.peek()
            .is_some_and(|t| std::mem::discriminant(t) == std::mem::discriminant(token))
    }

    /// Consume `expected` as an anonymous leaf.
    #[allow(clippy::needless_pass_by_value)]
    fn expect(&mut self, expected: Token) -> SyntaxResult<usize> {
        let description = format!("'{expected}'");
        let found = self.advance(&description)?;
        if std::mem::discriminant(&found.token) != std::mem::discriminant(&expected) {
            return Err(self.unexpected(&found, &description));
        }
        Ok(self.leaf(found.token.literal(), false, &found.span))
    }

    fn unexpected(&self, found: &SpannedToken, expected: &str) -> SyntaxError {
        let at = self.lines.point(found.span.start);
        SyntaxError::UnexpectedToken {
            line: at.row + 1,
            column: at.column + 1,
            expected: expected.to_string(),
            found: self.source[found.span.clone()].to_string(),
        }
    }

    fn range(&self, span: &std::ops::Range<usize>) -> Range {
        Range {
            start_byte: span.start,
            end_byte: span.end,
            start_point: self.lines.point(span.start),
            end_point: self.lines.point(span.end),
        }
    }

    fn leaf(
        &mut self,
        node_kind: &'static str,
        named: bool,
        span: &std::ops::Range<usize>,
    ) -> usize {
        let range = self.range(span);
        self.push(node_kind, named, range, vec![], vec![])
    }

    /// A named node spanning its children.
    fn branch(
        &mut self,
        node_kind: &'static str,
        children: Vec<usize>,
        fields: Vec<(&'static str, usize)>,
    ) -> usize {
        let range = match (children.first(), children.last()) {
            (Some(&first), Some(&last)) => Range {
                start_byte: self.nodes[first].range.start_byte,
                end_byte: self.nodes[last].range.end_byte,
                start_point: self.nodes[first].range.start_point,
                end_point: self.nodes[last].range.end_point,
            },
            _ => Range::default(),
        };
        self.push(node_kind, true, range, children, fields)
    }

    fn push(
        &mut self,
        node_kind: &'static str,
        named: bool,
        range: Range,
        children: Vec<usize>,
        fields: Vec<(&'static str, usize)>,
    ) -> usize {
        let id = self.nodes.len();
        for (position, &child) in children.iter().enumerate() {
            self.nodes[child].parent = Some(id);
            self.nodes[child].position = position;
        }
        self.nodes.push(NodeData {
            kind: node_kind,
            named,
            range,
            children,
            fields,
            parent: None,
            position: 0,
        });
        id
    }

    fn parse_source_file(&mut self) -> SyntaxResult<usize> {
        let mut children = Vec::new();
        while !self.is_eof() {
            children.push(self.parse_statement()?);
            if self.check(&Token::Semicolon) {
                children.push(self.expect(Token::Semicolon)?);
            }
        }

        let range = self.range(&(0..self.source.len()));
        Ok(self.push(kind::SOURCE_FILE, true, range, children, vec![]))
    }

    fn parse_statement(&mut self) -> SyntaxResult<usize> {
        let token = self.current("statement")?;
        let Token::Identifier(word) = &token.token else {
            return Err(self.unexpected(&token, "statement"));
        };

        if matches!(self.peek_nth(1), Some(Token::Eq)) {
            return self.parse_declaration();
        }

        match STATEMENT_KEYWORDS.iter().find(|(keyword, _)| *keyword == word.as_str()) {
            Some(&(keyword, node_kind)) => self.parse_call_statement(keyword, node_kind),
            None => Err(self.unexpected(&token, "gate, measure or variable declaration")),
        }
    }

    /// `name = qubit_expr`
    fn parse_declaration(&mut self) -> SyntaxResult<usize> {
        let name = self.parse_var_name()?;
        let eq = self.expect(Token::Eq)?;
        let value = self.parse_qubit_expr()?;
        Ok(self.branch(kind::VARIABLE_DECLARATION, vec![name, eq, value], vec![]))
    }

    fn parse_var_name(&mut self) -> SyntaxResult<usize> {
        let token = self.advance("variable name")?;
        match token.token {
            Token::Identifier(_) => Ok(self.leaf(kind::VAR_NAME, true, &token.span)),
            _ => Err(self.unexpected(&token, "variable name")),
        }
    }

    /// `qubit_term ("+" qubit_term)?`
    fn parse_qubit_expr(&mut self) -> SyntaxResult<usize> {
        let mut children = vec![self.parse_qubit_term()?];
        if self.check(&Token::Plus) {
            children.push(self.expect(Token::Plus)?);
            children.push(self.parse_qubit_term()?);
        }
        Ok(self.branch(kind::QUBIT_EXPR, children, vec![]))
    }

    /// `[coefficient] ("|0>" | "|1>")`
    fn parse_qubit_term(&mut self) -> SyntaxResult<usize> {
        let mut children = Vec::new();
        if !self.check(&Token::KetZero) && !self.check(&Token::KetOne) {
            children.extend(self.parse_expression()?.nodes);
        }

        let expected = "'|0>' or '|1>'";
        let ket = self.advance(expected)?;
        let term_kind = match ket.token {
            Token::KetZero => kind::QUBIT_ZERO,
            Token::KetOne => kind::QUBIT_ONE,
            _ => return Err(self.unexpected(&ket, expected)),
        };
        children.push(self.leaf(ket.token.literal(), false, &ket.span));
        Ok(self.branch(term_kind, children, vec![]))
    }

    /// `keyword "(" args ")"`. Measurements take an optional integer, gates
    /// a comma-separated list of variable names. Gate arity is left to the
    /// program builder.
    fn parse_call_statement(
        &mut self,
        keyword: &'static str,
        node_kind: &'static str,
    ) -> SyntaxResult<usize> {
        let token = self.advance(keyword)?;
        let mut children = vec![self.leaf(keyword, false, &token.span)];
        children.push(self.expect(Token::LParen)?);

        if node_kind == kind::MEASURE {
            if self.check(&Token::Number) {
                let count = self.advance("integer")?;
                children.push(self.leaf(kind::UINT, true, &count.span));
            }
        } else if !self.check(&Token::RParen) {
            children.push(self.parse_var_name()?);
            while self.check(&Token::Comma) {
                children.push(self.expect(Token::Comma)?);
                children.push(self.parse_var_name()?);
            }
        }

        children.push(self.expect(Token::RParen)?);
        Ok(self.branch(node_kind, children, vec![]))
    }

    fn parse_expression(&mut self) -> SyntaxResult<Operand> {
        self.parse_binary_expr(0)
    }

    /// Precedence climbing; `^` is right-associative.
    fn parse_binary_expr(&mut self, min_prec: u8) -> SyntaxResult<Operand> {
        self.depth += 1;
        if self.depth > MAX_NESTING {
            let line = self
                .tokens
                .get(self.pos)
                .map_or(0, |t| self.lines.point(t.span.start).row + 1);
            return Err(SyntaxError::NestingTooDeep {
                line,
                limit: MAX_NESTING,
            });
        }

        let mut left = self.parse_primary_expr()?;
        while let Some((op_kind, prec, right_assoc)) = self.peek().and_then(binary_op) {
            if prec < min_prec {
                break;
            }
            let op_token = self.advance("operator")?;
            let op = self.leaf(op_token.token.literal(), false, &op_token.span);
            let right = self.parse_binary_expr(if right_assoc { prec } else { prec + 1 })?;

            let Operand {
                head: lhs,
                nodes: mut children,
            } = left;
            children.push(op);
            children.extend(right.nodes);
            let id = self.branch(
                op_kind,
                children,
                vec![(field::ARG1, lhs), (field::ARG2, right.head)],
            );
            left = Operand::single(id);
        }

        self.depth -= 1;
        Ok(left)
    }

    fn parse_primary_expr(&mut self) -> SyntaxResult<Operand> {
        let token = self.current("expression")?;
        match &token.token {
            Token::Number => {
                self.pos += 1;
                Ok(Operand::single(self.leaf(kind::NUMBER, true, &token.span)))
            }
            Token::LParen => {
                let open = self.expect(Token::LParen)?;
                let inner = self.parse_expression()?;
                let close = self.expect(Token::RParen)?;

                let mut nodes = vec![open];
                nodes.extend(inner.nodes);
                nodes.push(close);
                Ok(Operand { head: open, nodes })
            }
            Token::Identifier(word) => {
                let constant = match word.as_str() {
                    "pi" => Some(kind::PI),
                    "i" => Some(kind::IMAG),
                    "e" => Some(kind::EULER),
                    _ => None,
                };
                if let Some(constant) = constant {
                    self.pos += 1;
                    return Ok(Operand::single(self.leaf(constant, true, &token.span)));
                }

                match word.as_str() {
                    "sin" => self.parse_function(kind::SIN, 1),
                    "cos" => self.parse_function(kind::COS, 1),
                    "tan" => self.parse_function(kind::TAN, 1),
                    "root" => self.parse_function(kind::ROOT, 2),
                    _ => Err(self.unexpected(&token, "expression")),
                }
            }
            _ => Err(self.unexpected(&token, "expression")),
        }
    }

    /// `name "(" expr ")"` with field `arg`, or `name "(" expr "," expr ")"`
    /// with fields `arg1` and `arg2`.
    fn parse_function(&mut self, func_kind: &'static str, arity: usize) -> SyntaxResult<Operand> {
        let name_token = self.advance(func_kind)?;
        let mut children = vec![self.leaf(func_kind, false, &name_token.span)];
        children.push(self.expect(Token::LParen)?);

        let first = self.parse_expression()?;
        children.extend(first.nodes);
        let fields = if arity == 2 {
            children.push(self.expect(Token::Comma)?);
            let second = self.parse_expression()?;
            children.extend(second.nodes);
            vec![(field::ARG1, first.head), (field::ARG2, second.head)]
        } else {
            vec![(field::ARG, first.head)]
        };

        children.push(self.expect(Token::RParen)?);
        Ok(Operand::single(self.branch(func_kind, children, fields)))
    }
}

/// Node kind, precedence and right-associativity of a binary operator.
fn binary_op(token: &Token) -> Option<(&'static str, u8, bool)> {
    match token {
        Token::Plus => Some((kind::ADD, 1, false)),
        Token::Minus => Some((kind::SUB, 1, false)),
        Token::Star => Some((kind::MUL, 2, false)),
        Token::Slash => Some((kind::DIV, 2, false)),
        Token::Caret => Some((kind::EXP, 3, true)),
        _ => None,
    }
}
