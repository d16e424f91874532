//! Turns a syntax tree into declared variables and an instruction list.

use num_complex::Complex64;
use qcsim_state::Qubit;
use serde::Serialize;
use tracing::{debug, warn};

use crate::error::{LangError, LangResult};
use crate::eval::Evaluator;
use crate::instruction::{Instruction, InstructionKind};
use crate::syntax::{SourceText, StatementKind, SyntaxNode, kind};

/// A named qubit declared in the source.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Variable {
    pub name: String,
    pub qubit: Qubit,
}

/// The result of building: variables in declaration order and instructions in
/// source order.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Program {
    pub variables: Vec<Variable>,
    pub instructions: Vec<Instruction>,
}

impl Program {
    pub fn new(variables: Vec<Variable>, instructions: Vec<Instruction>) -> Self {
        Self {
            variables,
            instructions,
        }
    }

    /// Register index of the first variable called `name`.
    pub fn variable_index(&self, name: &str) -> Option<usize> {
        self.variables.iter().position(|v| v.name == name)
    }

    /// Initial qubits, one per variable, in register order.
    pub fn qubits(&self) -> Vec<Qubit> {
        self.variables.iter().map(|v| v.qubit).collect()
    }
}

/// Build a [`Program`] from the tree rooted at `root`.
pub fn build<N: SyntaxNode>(source: &str, root: &N) -> LangResult<Program> {
    Builder::new(source).build(root)
}

/// Walks a syntax tree and collects declarations and instructions.
#[derive(Debug, Clone, Copy)]
pub struct Builder<'s> {
    source: SourceText<'s>,
    evaluator: Evaluator<'s>,
}

impl<'s> Builder<'s> {
    pub fn new(source: &'s str) -> Self {
        Self {
            source: SourceText::new(source),
            evaluator: Evaluator::new(source),
        }
    }

    /// Depth-first, left-to-right walk. Any node that is not a declaration or
    /// an instruction is descended into, however deeply statements are
    /// wrapped.
    pub fn build<N: SyntaxNode>(&self, root: &N) -> LangResult<Program> {
        let mut program = Program::default();
        let mut stack = vec![root.clone()];

        while let Some(node) = stack.pop() {
            match StatementKind::from_kind(node.kind()) {
                Some(StatementKind::VariableDeclaration) => {
                    let variable = self.declaration(&node)?;
                    debug!("Declared {} = {}", variable.name, variable.qubit);
                    program.variables.push(variable);
                }
                Some(StatementKind::Instruction(instr_kind)) => {
                    let instruction = self.instruction(instr_kind, &node)?;
                    debug!("Built instruction {}", instruction);
                    program.instructions.push(instruction);
                }
                None => stack.extend(node.children().into_iter().rev()),
            }
        }

        debug!(
            "Built program: {} variables, {} instructions",
            program.variables.len(),
            program.instructions.len()
        );
        Ok(program)
    }

    fn declaration<N: SyntaxNode>(&self, node: &N) -> LangResult<Variable> {
        let children = node.children();
        let (Some(name_node), Some(value)) = (children.first(), children.get(2)) else {
            return Err(LangError::Structural(
                "variable declaration needs a name and a value".into(),
            ));
        };
        let name = self.source.text_of(name_node)?.to_string();

        let terms = match value.kind() {
            kind::QUBIT_ZERO | kind::QUBIT_ONE => vec![value.clone()],
            _ => value.children(),
        };

        let mut zero = Complex64::new(0.0, 0.0);
        let mut one = Complex64::new(0.0, 0.0);
        for term in &terms {
            match term.kind() {
                kind::QUBIT_ZERO => zero = self.evaluator.coefficient(&term.children())?,
                kind::QUBIT_ONE => one = self.evaluator.coefficient(&term.children())?,
                _ => {}
            }
        }

        let qubit = Qubit::new(zero, one).map_err(|source| LangError::InvalidQubit {
            name: name.clone(),
            source,
        })?;
        Ok(Variable { name, qubit })
    }

    fn instruction<N: SyntaxNode>(
        &self,
        instr_kind: InstructionKind,
        node: &N,
    ) -> LangResult<Instruction> {
        let children = node.children();

        let args = match instr_kind {
            InstructionKind::Measure => {
                let mut args = Vec::new();
                for child in children.iter().filter(|c| c.kind() == kind::UINT) {
                    let text = self.source.text_of(child)?;
                    if text.parse::<u64>().is_ok() {
                        args.push(text.to_string());
                    } else {
                        warn!("Ignoring measure count '{}': not a non-negative integer", text);
                    }
                }
                if args.len() > 1 {
                    return Err(LangError::WrongArgumentCount {
                        instruction: instr_kind.name().to_string(),
                        expected: 1,
                        got: args.len(),
                    });
                }
                args
            }
            InstructionKind::Gate(gate) => {
                let args = children
                    .iter()
                    .filter(|c| c.kind() == kind::VAR_NAME)
                    .map(|c| self.source.text_of(c).map(str::to_string))
                    .collect::<LangResult<Vec<_>>>()?;
                if args.len() != gate.num_qubits() {
                    return Err(LangError::WrongArgumentCount {
                        instruction: gate.name().to_string(),
                        expected: gate.num_qubits(),
                        got: args.len(),
                    });
                }
                args
            }
        };

        Ok(Instruction::new(instr_kind, args))
    }
}
