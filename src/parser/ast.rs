// AST (Abstract Syntax Tree) definitions for the expression language

use std::fmt;

/// Source location information for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceLocation {
    pub line: usize,
    pub column: usize,
}

impl SourceLocation {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl Default for SourceLocation {
    fn default() -> Self {
        Self::new(1, 1)
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

/// Binary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
}

impl BinOp {
    pub fn symbol(self) -> char {
        match self {
            BinOp::Add => '+',
            BinOp::Sub => '-',
            BinOp::Mul => '*',
            BinOp::Div => '/',
        }
    }
}

impl fmt::Display for BinOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// A single parsed statement.
///
/// Every interior node owns its children through a `Box`, so a tree has no
/// sharing and no cycles and is dropped as a unit.
#[derive(Debug, Clone, PartialEq)]
pub enum AstNode {
    /// Numeric literal
    Number(f64),

    /// Reference to a variable in the environment
    Variable(String),

    /// Binary arithmetic operation
    BinaryOp {
        op: BinOp,
        left: Box<AstNode>,
        right: Box<AstNode>,
    },

    /// `name = value`
    Assignment { name: String, value: Box<AstNode> },
}

impl AstNode {
    pub fn binary(op: BinOp, left: AstNode, right: AstNode) -> Self {
        AstNode::BinaryOp {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn assignment(name: impl Into<String>, value: AstNode) -> Self {
        AstNode::Assignment {
            name: name.into(),
            value: Box::new(value),
        }
    }

    /// Unary minus is desugared to `0 - operand`.
    pub fn negate(operand: AstNode) -> Self {
        AstNode::binary(BinOp::Sub, AstNode::Number(0.0), operand)
    }

    /// Number of nodes in the tree
    pub fn node_count(&self) -> usize {
        match self {
            AstNode::Number(_) | AstNode::Variable(_) => 1,
            AstNode::BinaryOp { left, right, .. } => {
                1 + left.node_count() + right.node_count()
            }
            AstNode::Assignment { value, .. } => 1 + value.node_count(),
        }
    }

    fn write_tree(&self, f: &mut fmt::Formatter<'_>, indent: usize) -> fmt::Result {
        write!(f, "{:width$}", "", width = indent * 2)?;
        match self {
            AstNode::Number(value) => writeln!(f, "Number: {:.6}", value),
            AstNode::Variable(name) => writeln!(f, "Variable: {}", name),
            AstNode::BinaryOp { op, left, right } => {
                writeln!(f, "BinaryOp: {}", op)?;
                left.write_tree(f, indent + 1)?;
                right.write_tree(f, indent + 1)
            }
            AstNode::Assignment { name, value } => {
                writeln!(f, "Assignment: {}", name)?;
                value.write_tree(f, indent + 1)
            }
        }
    }
}

/// Renders the tree one node per line, two spaces per nesting level.
/// Numbers are printed with six decimal places.
impl fmt::Display for AstNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_tree(f, 0)
    }
}
