//! Complex-valued expression evaluation.

use num_complex::Complex64;
use std::f64::consts::{E, PI};

use crate::error::{LangError, LangResult};
use crate::syntax::{BinaryOp, ExprKind, SourceText, SyntaxNode, UnaryFn, field, kind};

const ONE: Complex64 = Complex64::new(1.0, 0.0);

/// Reduces expression nodes to complex scalars.
///
/// Evaluation is pure: the same tree and source always give the same value.
#[derive(Debug, Clone, Copy)]
pub struct Evaluator<'s> {
    source: SourceText<'s>,
}

/// Pending work while walking an expression.
enum Task<N> {
    /// Evaluate the node and push its value.
    Visit(N),
    /// Pop operand values and push the combined result.
    Combine(Combine),
}

#[derive(Debug, Clone, Copy)]
enum Combine {
    Binary(BinaryOp),
    Unary(UnaryFn),
    Root,
}

impl<'s> Evaluator<'s> {
    pub fn new(source: &'s str) -> Self {
        Self {
            source: SourceText::new(source),
        }
    }

    /// Evaluate the expression rooted at `node`.
    ///
    /// Nodes of an unrecognised kind stand in for their next sibling, which is
    /// how parentheses and other punctuation are stepped over. The walk uses
    /// an explicit stack, so arbitrarily long operator chains are fine.
    pub fn evaluate<N: SyntaxNode>(&self, node: &N) -> LangResult<Complex64> {
        let mut tasks = vec![Task::Visit(node.clone())];
        let mut values: Vec<Complex64> = Vec::new();

        while let Some(task) = tasks.pop() {
            match task {
                Task::Visit(node) => self.visit(node, &mut tasks, &mut values)?,
                Task::Combine(step) => {
                    let value = match step {
                        Combine::Binary(op) => {
                            let rhs = pop(&mut values)?;
                            let lhs = pop(&mut values)?;
                            match op {
                                BinaryOp::Add => lhs + rhs,
                                BinaryOp::Sub => lhs - rhs,
                                BinaryOp::Mul => lhs * rhs,
                                BinaryOp::Div => lhs / rhs,
                                BinaryOp::Exp => lhs.powc(rhs),
                            }
                        }
                        Combine::Unary(func) => {
                            let arg = pop(&mut values)?;
                            match func {
                                UnaryFn::Sin => arg.sin(),
                                UnaryFn::Cos => arg.cos(),
                                UnaryFn::Tan => arg.tan(),
                            }
                        }
                        Combine::Root => {
                            let degree = pop(&mut values)?;
                            let radicand = pop(&mut values)?;
                            radicand.powc(ONE / degree)
                        }
                    };
                    values.push(value);
                }
            }
        }

        match values.as_slice() {
            [value] => Ok(*value),
            _ => Err(LangError::Structural(
                "expression did not reduce to a single value".into(),
            )),
        }
    }

    /// Amplitude of a `qubit_zero`/`qubit_one` term given its children.
    ///
    /// A bare ket means a coefficient of one. Otherwise the first child that
    /// is not an opening parenthesis is the coefficient expression.
    pub fn coefficient<N: SyntaxNode>(&self, children: &[N]) -> LangResult<Complex64> {
        let first = children
            .first()
            .ok_or_else(|| LangError::Structural("qubit term has no children".into()))?;
        if ExprKind::from_kind(first.kind()) == Some(ExprKind::Ket) {
            return Ok(ONE);
        }

        let expr = children
            .iter()
            .find(|child| child.kind() != kind::LPAREN)
            .ok_or_else(|| LangError::Structural("qubit term has no coefficient".into()))?;
        self.evaluate(expr)
    }

    /// Resolve `node` to an expression and either push its value or schedule
    /// its operands followed by the step that combines them.
    fn visit<N: SyntaxNode>(
        &self,
        mut node: N,
        tasks: &mut Vec<Task<N>>,
        values: &mut Vec<Complex64>,
    ) -> LangResult<()> {
        let expr = loop {
            if let Some(expr) = ExprKind::from_kind(node.kind()) {
                break expr;
            }
            match node.next_sibling() {
                Some(next) => node = next,
                None => {
                    return Err(LangError::Structural(format!(
                        "expected an expression after '{}'",
                        node.kind()
                    )));
                }
            }
        };

        let (step, operands) = match expr {
            ExprKind::Number => {
                values.push(self.number(&node)?);
                return Ok(());
            }
            ExprKind::Pi => {
                values.push(Complex64::new(PI, 0.0));
                return Ok(());
            }
            ExprKind::Imag => {
                values.push(Complex64::i());
                return Ok(());
            }
            ExprKind::Euler => {
                values.push(Complex64::new(E, 0.0));
                return Ok(());
            }
            ExprKind::Ket => {
                values.push(ONE);
                return Ok(());
            }
            ExprKind::Binary(op) => (
                Combine::Binary(op),
                vec![operand(&node, field::ARG1)?, operand(&node, field::ARG2)?],
            ),
            ExprKind::Unary(func) => (Combine::Unary(func), vec![operand(&node, field::ARG)?]),
            ExprKind::Root => (
                Combine::Root,
                vec![operand(&node, field::ARG1)?, operand(&node, field::ARG2)?],
            ),
        };

        // Operands are popped left to right, so their values land in order.
        tasks.push(Task::Combine(step));
        tasks.extend(operands.into_iter().rev().map(Task::Visit));
        Ok(())
    }

    fn number<N: SyntaxNode>(&self, node: &N) -> LangResult<Complex64> {
        let text = self.source.text_of(node)?;
        text.parse::<Complex64>()
            .map_err(|e| LangError::LiteralFormat {
                literal: text.to_string(),
                message: e.to_string(),
            })
    }
}

fn operand<N: SyntaxNode>(node: &N, name: &str) -> LangResult<N> {
    node.child_by_field_name(name).ok_or_else(|| {
        LangError::Structural(format!("'{}' node has no '{name}' field", node.kind()))
    })
}

fn pop(values: &mut Vec<Complex64>) -> LangResult<Complex64> {
    values
        .pop()
        .ok_or_else(|| LangError::Structural("missing operand value".into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::TestTree;
    use std::f64::consts::FRAC_1_SQRT_2;

    fn eval(tree: &TestTree, id: usize) -> LangResult<Complex64> {
        Evaluator::new(tree.source()).evaluate(&tree.node(id))
    }

    fn assert_close(actual: Complex64, expected: Complex64) {
        assert!(
            (actual - expected).norm() < 1e-12,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_number_literals() {
        let mut tree = TestTree::new();
        let real = tree.number("0.25");
        let imag = tree.number("2i");
        let sci = tree.number("1e-3");
        assert_close(eval(&tree, real).unwrap(), Complex64::new(0.25, 0.0));
        assert_close(eval(&tree, imag).unwrap(), Complex64::new(0.0, 2.0));
        assert_close(eval(&tree, sci).unwrap(), Complex64::new(0.001, 0.0));
    }

    #[test]
    fn test_malformed_number() {
        let mut tree = TestTree::new();
        let bad = tree.number("1.2.3");
        assert!(matches!(
            eval(&tree, bad),
            Err(LangError::LiteralFormat { literal, .. }) if literal == "1.2.3"
        ));
    }

    #[test]
    fn test_constants() {
        let mut tree = TestTree::new();
        let pi = tree.token("pi", "pi");
        let i = tree.token("imag", "i");
        let e = tree.token("euler", "e");
        assert_close(eval(&tree, pi).unwrap(), Complex64::new(PI, 0.0));
        assert_close(eval(&tree, i).unwrap(), Complex64::new(0.0, 1.0));
        assert_close(eval(&tree, e).unwrap(), Complex64::new(E, 0.0));
    }

    #[test]
    fn test_binary_operators() {
        let cases = [
            ("add", "+", Complex64::new(5.0, 0.0)),
            ("sub", "-", Complex64::new(-1.0, 0.0)),
            ("mul", "*", Complex64::new(6.0, 0.0)),
            ("div", "/", Complex64::new(2.0 / 3.0, 0.0)),
            ("exp", "^", Complex64::new(8.0, 0.0)),
        ];
        for (kind, op, expected) in cases {
            let mut tree = TestTree::new();
            let lhs = tree.number("2");
            let rhs = tree.number("3");
            let node = tree.binary(kind, lhs, op, rhs);
            assert_close(eval(&tree, node).unwrap(), expected);
        }
    }

    #[test]
    fn test_complex_power() {
        // i^2 = -1
        let mut tree = TestTree::new();
        let i = tree.token("imag", "i");
        let two = tree.number("2");
        let node = tree.binary("exp", i, "^", two);
        assert_close(eval(&tree, node).unwrap(), Complex64::new(-1.0, 0.0));
    }

    #[test]
    fn test_trig_functions() {
        let mut tree = TestTree::new();
        let sin = tree.call("sin", |t| t.token("pi", "pi"));
        let cos = tree.call("cos", |t| t.number("0"));
        let tan = tree.call("tan", |t| t.number("0"));
        assert_close(eval(&tree, sin).unwrap(), Complex64::new(0.0, 0.0));
        assert_close(eval(&tree, cos).unwrap(), Complex64::new(1.0, 0.0));
        assert_close(eval(&tree, tan).unwrap(), Complex64::new(0.0, 0.0));
    }

    #[test]
    fn test_root() {
        let mut tree = TestTree::new();
        let name = tree.token("root", "root");
        let open = tree.token("(", "(");
        let radicand = tree.number("2");
        let comma = tree.token(",", ",");
        let degree = tree.number("2");
        let close = tree.token(")", ")");
        let root = tree.wrap("root", &[name, open, radicand, comma, degree, close]);
        tree.set_field(root, "arg1", radicand);
        tree.set_field(root, "arg2", degree);

        let value = eval(&tree, root).unwrap();
        assert_close(value, Complex64::new(std::f64::consts::SQRT_2, 0.0));
    }

    #[test]
    fn test_parenthesised_operand_skips_to_sibling() {
        // 1 / (1 + 1), with arg2 pointing at the '(' token
        let mut tree = TestTree::new();
        let one = tree.number("1");
        let slash = tree.token("/", "/");
        let open = tree.token("(", "(");
        let a = tree.number("1");
        let b = tree.number("1");
        let inner = tree.binary("add", a, "+", b);
        let close = tree.token(")", ")");
        let div = tree.wrap("div", &[one, slash, open, inner, close]);
        tree.set_field(div, "arg1", one);
        tree.set_field(div, "arg2", open);

        assert_close(eval(&tree, div).unwrap(), Complex64::new(0.5, 0.0));
    }

    #[test]
    fn test_unknown_kind_without_sibling() {
        let mut tree = TestTree::new();
        let stray = tree.token(")", ")");
        tree.wrap("group", &[stray]);
        assert!(matches!(eval(&tree, stray), Err(LangError::Structural(_))));
    }

    #[test]
    fn test_missing_field() {
        let mut tree = TestTree::new();
        let lhs = tree.number("1");
        let op = tree.token("+", "+");
        let add = tree.wrap("add", &[lhs, op]);
        tree.set_field(add, "arg1", lhs);
        assert!(matches!(eval(&tree, add), Err(LangError::Structural(_))));
    }

    #[test]
    fn test_deeply_nested_functions() {
        let mut tree = TestTree::new();
        let mut node = tree.number("0");
        for _ in 0..50_000 {
            let outer = tree.wrap("sin", &[node]);
            tree.set_field(outer, "arg", node);
            node = outer;
        }
        assert_close(eval(&tree, node).unwrap(), Complex64::new(0.0, 0.0));
    }

    #[test]
    fn test_long_left_spine() {
        // ((1 - 1) - 1) - ... with the first operand as the deep side
        let mut tree = TestTree::new();
        let mut node = tree.number("1");
        for _ in 0..20_000 {
            let rhs = tree.number("1");
            node = tree.binary("sub", node, "-", rhs);
        }
        assert_close(eval(&tree, node).unwrap(), Complex64::new(-19_999.0, 0.0));
    }

    #[test]
    fn test_coefficient_from_term() {
        // (1 / root(2, 2)) |0>
        let mut tree = TestTree::new();
        let open = tree.token("(", "(");
        let one = tree.number("1");
        let sqrt2 = tree.number("1.4142135623730951");
        let div = tree.binary("div", one, "/", sqrt2);
        let close = tree.token(")", ")");
        let ket = tree.token("|0>", "|0>");
        let evaluator = Evaluator::new(tree.source());

        let children: Vec<_> = [open, div, close, ket].map(|id| tree.node(id)).into();
        let amplitude = evaluator.coefficient(&children).unwrap();
        assert_close(amplitude, Complex64::new(FRAC_1_SQRT_2, 0.0));

        let bare = [tree.node(ket)];
        assert_close(evaluator.coefficient(&bare).unwrap(), ONE);
    }

    #[test]
    fn test_evaluation_is_deterministic() {
        let mut tree = TestTree::new();
        let z = tree.number("0.3");
        let arg = tree.call("cos", |_| z);
        let first = eval(&tree, arg).unwrap();
        let second = eval(&tree, arg).unwrap();
        assert_eq!(first, second);
    }
}
