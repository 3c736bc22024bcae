//! Yuji IR - AST node taxonomy consumed by the evaluator.
//!
//! The lexer and parser live outside this workspace; they produce a
//! [`Program`] made of [`Expr`] nodes. The evaluator never mutates the tree,
//! so function nodes are shared through [`SharedFunction`] and may be
//! referenced by any number of runtime values.
//!
//! The [`build`] module offers plain constructors for assembling trees by
//! hand (embedders and tests).

mod ast;
pub mod build;
mod name;
mod operator;

pub use ast::{Block, Expr, FunctionDecl, IfBranch, Program, SharedFunction};
pub use name::Name;
pub use operator::BinaryOp;
