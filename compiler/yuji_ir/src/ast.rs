//! Expression tree produced by the front end.
//!
//! The tree is immutable once built. Function declarations are reference
//! counted so a runtime `Function` value can point at its declaration
//! without copying the body.

use std::rc::Rc;

use crate::{BinaryOp, Name};

/// Shared handle to a function declaration.
pub type SharedFunction = Rc<FunctionDecl>;

/// An expression node.
///
/// Statements (`let`, `while`, `return`, ...) are expressions too; each one
/// evaluates to a value (usually `null`).
#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    // Literals
    Int(i64),
    Float(f64),
    Str(String),
    Bool(bool),
    Null,

    /// Variable reference.
    Ident(Name),
    /// `left op right`. Both sides are always evaluated.
    Binary {
        op: BinaryOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    /// `let name = value`, declares in the current scope.
    Let { name: Name, value: Box<Expr> },
    /// `name = value`, rebinds an existing variable.
    Assign { name: Name, value: Box<Expr> },
    /// `{ ... }`, evaluated in a fresh scope.
    Block(Block),
    /// `fn name(params) { body }`, or an anonymous function when unnamed.
    Function(SharedFunction),
    /// `callee(args)`.
    Call { callee: Name, args: Vec<Expr> },
    /// `use "path/to/module"`.
    Use(String),
    While { condition: Box<Expr>, body: Block },
    /// `if`/`elif` chain with an optional `else`.
    If {
        branches: Vec<IfBranch>,
        else_body: Option<Block>,
    },
    Return(Option<Box<Expr>>),
    Break,
    Continue,
    /// `[a, b, c]`.
    Array(Vec<Expr>),
    /// `object[index]`.
    Index { object: Box<Expr>, index: Box<Expr> },
    /// `object[index] = value`.
    IndexAssign {
        object: Box<Expr>,
        index: Box<Expr>,
        value: Box<Expr>,
    },
}

impl Expr {
    /// Short node-kind label for tracing and diagnostics.
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Expr::Int(_) => "int",
            Expr::Float(_) => "float",
            Expr::Str(_) => "string",
            Expr::Bool(_) => "bool",
            Expr::Null => "null",
            Expr::Ident(_) => "identifier",
            Expr::Binary { .. } => "binop",
            Expr::Let { .. } => "let",
            Expr::Assign { .. } => "assign",
            Expr::Block(_) => "block",
            Expr::Function(_) => "fn",
            Expr::Call { .. } => "call",
            Expr::Use(_) => "use",
            Expr::While { .. } => "while",
            Expr::If { .. } => "if",
            Expr::Return(_) => "return",
            Expr::Break => "break",
            Expr::Continue => "continue",
            Expr::Array(_) => "array",
            Expr::Index { .. } => "index_access",
            Expr::IndexAssign { .. } => "index_assign",
        }
    }
}

/// Ordered list of expressions sharing one scope.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Block {
    pub exprs: Vec<Expr>,
}

impl Block {
    pub fn new(exprs: Vec<Expr>) -> Self {
        Block { exprs }
    }

    pub fn is_empty(&self) -> bool {
        self.exprs.is_empty()
    }
}

/// A function declaration.
#[derive(Clone, Debug, PartialEq)]
pub struct FunctionDecl {
    /// `None` for anonymous functions.
    pub name: Option<Name>,
    pub params: Vec<Name>,
    pub body: Block,
}

impl FunctionDecl {
    /// Number of declared parameters.
    #[inline]
    pub fn arity(&self) -> usize {
        self.params.len()
    }

    /// Name used in call-stack traces.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("<anonymous>")
    }
}

/// One `if`/`elif` arm.
#[derive(Clone, Debug, PartialEq)]
pub struct IfBranch {
    pub condition: Expr,
    pub body: Block,
}

/// Top-level sequence of expressions produced from one source file.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Program {
    pub items: Vec<Expr>,
}

impl Program {
    pub fn new(items: Vec<Expr>) -> Self {
        Program { items }
    }
}
