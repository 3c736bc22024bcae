//! Whole programs run against the standard library.

#![allow(clippy::unwrap_used)]

use pretty_assertions::assert_eq;
use yuji_eval::yuji_ir::build::*;
use yuji_eval::yuji_ir::{BinaryOp, Expr};
use yuji_eval::{buffer_handler, EvalError, Interpreter, Value};

fn run(items: Vec<Expr>) -> (Result<Value, EvalError>, String) {
    let builder = Interpreter::builder().print_handler(buffer_handler());
    let mut interp = yuji_std::install(builder).unwrap().build().unwrap();
    let result = interp.eval_program(&program(items));
    (result, interp.get_print_output())
}

fn is_divisible(n: Expr, by: i64) -> Expr {
    binary(binary(n, BinaryOp::Mod, int(by)), BinaryOp::Eq, int(0))
}

#[test]
fn fizzbuzz() {
    let body = vec![
        if_else(
            vec![
                (
                    is_divisible(ident("i"), 15),
                    vec![call("println", vec![string("FizzBuzz")])],
                ),
                (
                    is_divisible(ident("i"), 3),
                    vec![call("println", vec![string("Fizz")])],
                ),
                (
                    is_divisible(ident("i"), 5),
                    vec![call("println", vec![string("Buzz")])],
                ),
            ],
            Some(vec![call("println", vec![ident("i")])]),
        ),
        assign("i", binary(ident("i"), BinaryOp::Add, int(1))),
    ];
    let (result, output) = run(vec![
        use_module("std/io"),
        let_("i", int(1)),
        while_loop(binary(ident("i"), BinaryOp::LtEq, int(15)), body),
    ]);
    result.unwrap();
    assert_eq!(
        output,
        "1\n2\nFizz\n4\nBuzz\nFizz\n7\n8\nFizz\nBuzz\n11\nFizz\n13\n14\nFizzBuzz\n"
    );
}

#[test]
fn collect_squares_into_array() {
    let (result, output) = run(vec![
        use_module("std/io"),
        use_module("std/array"),
        let_("squares", array(vec![])),
        let_("n", int(0)),
        while_loop(
            boolean(true),
            vec![
                assign("n", binary(ident("n"), BinaryOp::Add, int(1))),
                if_else(
                    vec![(binary(ident("n"), BinaryOp::Gt, int(5)), vec![brk()])],
                    None,
                ),
                if_else(
                    vec![(is_divisible(ident("n"), 2), vec![cont()])],
                    None,
                ),
                call(
                    "push",
                    vec![ident("squares"), binary(ident("n"), BinaryOp::Mul, ident("n"))],
                ),
            ],
        ),
        call(
            "println",
            vec![call(
                "format",
                vec![
                    string("{} odd squares: {}"),
                    call("len", vec![ident("squares")]),
                    ident("squares"),
                ],
            )],
        ),
        index(ident("squares"), int(2)),
    ]);
    assert_eq!(result.unwrap(), Value::int(25));
    assert_eq!(output, "3 odd squares: [1, 9, 25]\n");
}

#[test]
fn recursive_fibonacci_with_math() {
    let fib = function(
        "fib",
        &["n"],
        vec![
            if_else(
                vec![(binary(ident("n"), BinaryOp::Lt, int(2)), vec![ret(ident("n"))])],
                None,
            ),
            binary(
                call("fib", vec![binary(ident("n"), BinaryOp::Sub, int(1))]),
                BinaryOp::Add,
                call("fib", vec![binary(ident("n"), BinaryOp::Sub, int(2))]),
            ),
        ],
    );
    let (result, _) = run(vec![
        use_module("std/math"),
        fib,
        call("sqrt", vec![call("fib", vec![int(12)])]),
    ]);
    assert_eq!(result.unwrap(), Value::float(12.0));
}

#[test]
fn failed_assertion_reports_backtrace() {
    let check = function(
        "check",
        &["x"],
        vec![call(
            "assert",
            vec![binary(ident("x"), BinaryOp::Gt, int(0)), string("x must be positive")],
        )],
    );
    let (result, _) = run(vec![
        use_module("std/core"),
        check,
        call("check", vec![int(1)]),
        call("check", vec![int(-1)]),
    ]);
    let err = result.unwrap_err();
    assert_eq!(
        err.report(),
        "error: Assertion failed: x must be positive\n\
         stack backtrace:\n  0: in function 'assert'\n  1: in function 'check'\n"
    );
}

#[test]
fn imports_are_block_scoped() {
    let (result, output) = run(vec![
        block(vec![
            use_module("std/io"),
            call("print", vec![string("inside")]),
        ]),
        call("print", vec![string("outside")]),
    ]);
    assert_eq!(result.unwrap_err().message, "undefined function: print");
    assert_eq!(output, "inside");
}

#[test]
fn unknown_std_module() {
    let (result, _) = run(vec![use_module("std/net")]);
    assert_eq!(
        result.unwrap_err().message,
        "submodule net not found in module std"
    );
}
