//! Constructors for assembling expression trees without a parser.
//!
//! ```
//! use yuji_ir::build::*;
//! use yuji_ir::BinaryOp;
//!
//! // fn add(a, b) { return a + b }  add(1, 2)
//! let program = program(vec![
//!     function("add", &["a", "b"], vec![ret(binary(ident("a"), BinaryOp::Add, ident("b")))]),
//!     call("add", vec![int(1), int(2)]),
//! ]);
//! assert_eq!(program.items.len(), 2);
//! ```

use std::rc::Rc;

use crate::{BinaryOp, Block, Expr, FunctionDecl, IfBranch, Name, Program};

pub fn program(items: Vec<Expr>) -> Program {
    Program::new(items)
}

pub fn int(value: i64) -> Expr {
    Expr::Int(value)
}

pub fn float(value: f64) -> Expr {
    Expr::Float(value)
}

pub fn string(value: &str) -> Expr {
    Expr::Str(value.to_string())
}

pub fn boolean(value: bool) -> Expr {
    Expr::Bool(value)
}

pub fn null() -> Expr {
    Expr::Null
}

pub fn ident(name: impl Into<Name>) -> Expr {
    Expr::Ident(name.into())
}

pub fn binary(left: Expr, op: BinaryOp, right: Expr) -> Expr {
    Expr::Binary {
        op,
        left: Box::new(left),
        right: Box::new(right),
    }
}

pub fn let_(name: impl Into<Name>, value: Expr) -> Expr {
    Expr::Let {
        name: name.into(),
        value: Box::new(value),
    }
}

pub fn assign(name: impl Into<Name>, value: Expr) -> Expr {
    Expr::Assign {
        name: name.into(),
        value: Box::new(value),
    }
}

pub fn block(exprs: Vec<Expr>) -> Expr {
    Expr::Block(Block::new(exprs))
}

/// Named function declaration.
pub fn function(name: impl Into<Name>, params: &[&str], body: Vec<Expr>) -> Expr {
    Expr::Function(Rc::new(FunctionDecl {
        name: Some(name.into()),
        params: params.iter().copied().map(Name::new).collect(),
        body: Block::new(body),
    }))
}

/// Anonymous function; evaluates to a function value.
pub fn lambda(params: &[&str], body: Vec<Expr>) -> Expr {
    Expr::Function(Rc::new(FunctionDecl {
        name: None,
        params: params.iter().copied().map(Name::new).collect(),
        body: Block::new(body),
    }))
}

pub fn call(callee: impl Into<Name>, args: Vec<Expr>) -> Expr {
    Expr::Call {
        callee: callee.into(),
        args,
    }
}

pub fn use_module(path: &str) -> Expr {
    Expr::Use(path.to_string())
}

pub fn while_loop(condition: Expr, body: Vec<Expr>) -> Expr {
    Expr::While {
        condition: Box::new(condition),
        body: Block::new(body),
    }
}

/// `if` chain: each `(condition, body)` pair is one `if`/`elif` arm.
pub fn if_else(branches: Vec<(Expr, Vec<Expr>)>, else_body: Option<Vec<Expr>>) -> Expr {
    Expr::If {
        branches: branches
            .into_iter()
            .map(|(condition, body)| IfBranch {
                condition,
                body: Block::new(body),
            })
            .collect(),
        else_body: else_body.map(Block::new),
    }
}

pub fn ret(value: Expr) -> Expr {
    Expr::Return(Some(Box::new(value)))
}

/// Bare `return`.
pub fn ret_null() -> Expr {
    Expr::Return(None)
}

pub fn brk() -> Expr {
    Expr::Break
}

pub fn cont() -> Expr {
    Expr::Continue
}

pub fn array(elements: Vec<Expr>) -> Expr {
    Expr::Array(elements)
}

pub fn index(object: Expr, index: Expr) -> Expr {
    Expr::Index {
        object: Box::new(object),
        index: Box::new(index),
    }
}

pub fn index_assign(object: Expr, index: Expr, value: Expr) -> Expr {
    Expr::IndexAssign {
        object: Box::new(object),
        index: Box::new(index),
        value: Box::new(value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_function_params_become_names() {
        let Expr::Function(decl) = function("f", &["a", "b"], vec![]) else {
            panic!("expected function node");
        };
        assert_eq!(decl.name.as_deref(), Some("f"));
        assert_eq!(decl.params, vec![Name::new("a"), Name::new("b")]);
        assert_eq!(decl.arity(), 2);
    }

    #[test]
    fn test_lambda_display_name() {
        let Expr::Function(decl) = lambda(&[], vec![]) else {
            panic!("expected function node");
        };
        assert_eq!(decl.display_name(), "<anonymous>");
    }

    #[test]
    fn test_if_else_shape() {
        let node = if_else(
            vec![(boolean(false), vec![int(1)]), (boolean(true), vec![int(2)])],
            Some(vec![int(3)]),
        );
        let Expr::If {
            branches,
            else_body,
        } = node
        else {
            panic!("expected if node");
        };
        assert_eq!(branches.len(), 2);
        assert_eq!(branches[1].body.exprs, vec![int(2)]);
        assert_eq!(else_body, Some(Block::new(vec![int(3)])));
    }

    #[test]
    fn test_kind_names() {
        assert_eq!(index(ident("a"), int(0)).kind_name(), "index_access");
        assert_eq!(ret_null().kind_name(), "return");
        assert_eq!(use_module("std/io").kind_name(), "use");
    }
}
