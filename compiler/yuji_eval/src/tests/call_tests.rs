//! User-defined and native function calls.

use super::{interpreter, run, run_err};
use crate::errors::EvalErrorKind;
use crate::native::{Arity, NativeContext};
use crate::{buffer_handler, EvalResult, Interpreter, Value};
use pretty_assertions::assert_eq;
use yuji_ir::build::*;
use yuji_ir::{BinaryOp, Expr};

fn sideeffect(ctx: &mut NativeContext<'_>, _: &[Value]) -> EvalResult {
    ctx.print_handler().print("called;");
    Ok(Value::Bool(true))
}

/// Prints its argument and hands it back.
fn echo(ctx: &mut NativeContext<'_>, args: &[Value]) -> EvalResult {
    ctx.print_handler().print(&args[0].display_value());
    Ok(args[0].clone())
}

fn count_args(_: &mut NativeContext<'_>, args: &[Value]) -> EvalResult {
    Ok(Value::int(i64::try_from(args.len()).unwrap()))
}

fn peek_secret(ctx: &mut NativeContext<'_>, _: &[Value]) -> EvalResult {
    Ok(ctx.scope().borrow().lookup("secret").unwrap_or(Value::Null))
}

fn host() -> Interpreter {
    let mut interp = interpreter();
    interp.define_global("sideeffect", Value::native("sideeffect", Arity::Fixed(0), sideeffect));
    interp.define_global("echo", Value::native("echo", Arity::Fixed(1), echo));
    interp.define_global("count", Value::native("count", Arity::Variadic, count_args));
    interp.define_global("peek", Value::native("peek", Arity::Fixed(0), peek_secret));
    interp
}

fn factorial() -> Expr {
    function(
        "fact",
        &["n"],
        vec![if_else(
            vec![(binary(ident("n"), BinaryOp::LtEq, int(1)), vec![ret(int(1))])],
            Some(vec![ret(binary(
                ident("n"),
                BinaryOp::Mul,
                call("fact", vec![binary(ident("n"), BinaryOp::Sub, int(1))]),
            ))]),
        )],
    )
}

#[test]
fn test_user_function_with_return() {
    let result = run(vec![
        function("add", &["a", "b"], vec![ret(binary(ident("a"), BinaryOp::Add, ident("b")))]),
        call("add", vec![int(1), int(2)]),
    ])
    .unwrap();
    assert_eq!(result, Value::int(3));
}

#[test]
fn test_function_result_without_return_is_last_value() {
    let result = run(vec![
        function("twice", &["x"], vec![binary(ident("x"), BinaryOp::Mul, int(2))]),
        call("twice", vec![int(21)]),
    ])
    .unwrap();
    assert_eq!(result, Value::int(42));
}

#[test]
fn test_named_function_declaration_yields_null() {
    assert_eq!(run(vec![function("f", &[], vec![])]).unwrap(), Value::Null);
}

#[test]
fn test_function_redeclaration_is_error() {
    let err = run_err(vec![function("f", &[], vec![]), function("f", &[], vec![])]);
    assert_eq!(err.message, "function f already exists");
}

#[test]
fn test_recursion() {
    let result = run(vec![factorial(), call("fact", vec![int(10)])]).unwrap();
    assert_eq!(result, Value::int(3_628_800));
}

#[test]
fn test_user_arity_mismatch() {
    let err = run_err(vec![
        function("pair", &["a", "b"], vec![]),
        call("pair", vec![int(1)]),
    ]);
    assert_eq!(
        err.kind,
        EvalErrorKind::ArityMismatch {
            name: "pair".to_string(),
            expected: 2,
            got: 1
        }
    );
}

#[test]
fn test_native_arity_mismatch_checked_before_arguments() {
    let mut interp = host();
    let program = program(vec![call("echo", vec![call("echo", vec![int(1)]), int(2)])]);
    let err = interp.eval_program(&program).unwrap_err();
    assert_eq!(err.message, "function 'echo' expects 1 argument, got 2");
    assert_eq!(interp.get_print_output(), "");
}

#[test]
fn test_variadic_native_takes_any_count() {
    let mut interp = host();
    let program = program(vec![call("count", vec![int(1), string("a"), null()])]);
    assert_eq!(interp.eval_program(&program).unwrap(), Value::int(3));
}

#[test]
fn test_calling_a_non_function() {
    let err = run_err(vec![let_("x", int(1)), call("x", vec![])]);
    assert_eq!(
        err.kind,
        EvalErrorKind::NotCallable {
            name: "x".to_string(),
            type_name: "int"
        }
    );
}

#[test]
fn test_calling_an_unknown_name() {
    let err = run_err(vec![call("ghost", vec![])]);
    assert_eq!(err.message, "undefined function: ghost");
}

#[test]
fn test_function_value_called_through_other_name() {
    let result = run(vec![
        let_("inc", lambda(&["x"], vec![binary(ident("x"), BinaryOp::Add, int(1))])),
        call("inc", vec![int(4)]),
    ])
    .unwrap();
    assert_eq!(result, Value::int(5));
}

#[test]
fn test_free_identifiers_resolve_at_call_site() {
    let result = run(vec![
        function("show", &[], vec![ident("y")]),
        block(vec![let_("y", int(5)), call("show", vec![])]),
    ])
    .unwrap();
    assert_eq!(result, Value::int(5));
}

#[test]
fn test_definition_scope_is_not_captured() {
    let err = run_err(vec![
        let_(
            "get",
            block(vec![
                let_("hidden", int(1)),
                lambda(&[], vec![ident("hidden")]),
            ]),
        ),
        call("get", vec![]),
    ]);
    assert_eq!(
        err.kind,
        EvalErrorKind::UndefinedVariable {
            name: "hidden".to_string()
        }
    );
}

#[test]
fn test_parameters_do_not_leak_to_caller() {
    let err = run_err(vec![
        function("f", &["param"], vec![]),
        call("f", vec![int(1)]),
        ident("param"),
    ]);
    assert_eq!(
        err.kind,
        EvalErrorKind::UndefinedVariable {
            name: "param".to_string()
        }
    );
}

#[test]
fn test_logical_operators_do_not_short_circuit() {
    let mut interp = host();
    let and = program(vec![binary(boolean(false), BinaryOp::And, call("sideeffect", vec![]))]);
    assert_eq!(interp.eval_program(&and).unwrap(), Value::Bool(false));
    assert_eq!(interp.get_print_output(), "called;");

    let mut interp = host();
    let or = program(vec![binary(boolean(true), BinaryOp::Or, call("sideeffect", vec![]))]);
    assert_eq!(interp.eval_program(&or).unwrap(), Value::Bool(true));
    assert_eq!(interp.get_print_output(), "called;");
}

#[test]
fn test_arguments_evaluated_left_to_right() {
    let mut interp = host();
    let program = program(vec![
        function("pair", &["a", "b"], vec![array(vec![ident("a"), ident("b")])]),
        call("pair", vec![call("echo", vec![int(1)]), call("echo", vec![int(2)])]),
    ]);
    let result = interp.eval_program(&program).unwrap();
    assert_eq!(interp.get_print_output(), "12");
    assert_eq!(result, Value::array(vec![Value::int(1), Value::int(2)]));
}

#[test]
fn test_later_arguments_see_earlier_parameters() {
    let result = run(vec![
        let_("a", int(10)),
        function("f", &["a", "b"], vec![ident("b")]),
        call("f", vec![int(1), ident("a")]),
    ])
    .unwrap();
    assert_eq!(result, Value::int(1));
}

#[test]
fn test_argument_reads_caller_binding_before_shadowing() {
    let result = run(vec![
        let_("a", int(10)),
        function("f", &["b", "a"], vec![ident("b")]),
        call("f", vec![ident("a"), int(1)]),
    ])
    .unwrap();
    assert_eq!(result, Value::int(10));
}

#[test]
fn test_native_sees_caller_scope() {
    let mut interp = host();
    let program = program(vec![block(vec![let_("secret", int(99)), call("peek", vec![])])]);
    assert_eq!(interp.eval_program(&program).unwrap(), Value::int(99));
}

#[test]
fn test_stack_overflow_is_reported() {
    let mut interp = Interpreter::builder()
        .max_stack_size(50)
        .print_handler(buffer_handler())
        .build()
        .unwrap();
    let program = program(vec![
        function("forever", &[], vec![call("forever", vec![])]),
        call("forever", vec![]),
    ]);
    let err = interp.eval_program(&program).unwrap_err();
    assert_eq!(err.kind, EvalErrorKind::StackOverflow { depth: 50 });
    assert_eq!(err.backtrace.map(|t| t.len()), Some(50));
    assert!(interp.call_stack().is_empty());
    assert_eq!(interp.env().depth(), 1);
}

#[test]
fn test_deep_recursion_within_default_limit() {
    let countdown = function(
        "down",
        &["n"],
        vec![if_else(
            vec![(binary(ident("n"), BinaryOp::Eq, int(0)), vec![ret(int(0))])],
            Some(vec![ret(call("down", vec![binary(ident("n"), BinaryOp::Sub, int(1))]))]),
        )],
    );
    let result = run(vec![countdown, call("down", vec![int(9_000)])]).unwrap();
    assert_eq!(result, Value::int(0));
}

#[test]
fn test_backtrace_lists_most_recent_call_first() {
    let err = run_err(vec![
        function("inner", &[], vec![binary(int(1), BinaryOp::Div, int(0))]),
        function("outer", &[], vec![call("inner", vec![])]),
        call("outer", vec![]),
    ]);
    assert_eq!(err.kind, EvalErrorKind::DivisionByZero);
    let trace = err.backtrace.as_ref().unwrap();
    assert_eq!(trace.names(), vec!["inner", "outer"]);
    assert_eq!(
        err.report(),
        "error: division by zero\nstack backtrace:\n  0: in function 'inner'\n  1: in function 'outer'\n"
    );
}

#[test]
fn test_native_error_carries_native_frame() {
    fn fail(ctx: &mut NativeContext<'_>, _: &[Value]) -> EvalResult {
        Err(ctx.error("boom"))
    }
    let mut interp = interpreter();
    interp.define_global("fail", Value::native("fail", Arity::Fixed(0), fail));
    let err = interp
        .eval_program(&program(vec![call("fail", vec![])]))
        .unwrap_err();
    assert_eq!(err.message, "fail: boom");
    assert_eq!(err.backtrace.unwrap().names(), vec!["fail"]);
    assert!(interp.call_stack().is_empty());
}
