//! `use` and the module registry.

use crate::errors::EvalErrorKind;
use crate::native::{Arity, NativeContext};
use crate::{buffer_handler, EvalResult, Interpreter, Module, Value};
use pretty_assertions::assert_eq;
use yuji_ir::build::*;

fn shout(ctx: &mut NativeContext<'_>, args: &[Value]) -> EvalResult {
    let text = ctx.str_arg(args, 0)?;
    ctx.print_handler().println(&text.to_uppercase());
    Ok(Value::Null)
}

fn with_modules() -> Interpreter {
    let mut io = Module::new("io");
    io.define_native("shout", Arity::Fixed(1), shout).unwrap();
    io.define("stdout", Value::int(1)).unwrap();

    let mut std = Module::new("std");
    std.define("version", Value::string("0.1")).unwrap();
    std.add_submodule(io).unwrap();

    Interpreter::builder()
        .print_handler(buffer_handler())
        .module(std)
        .build()
        .unwrap()
}

#[test]
fn test_use_merges_submodule_bindings() {
    let mut interp = with_modules();
    let result = interp
        .eval_program(&program(vec![
            use_module("std/io"),
            call("shout", vec![string("hi")]),
            ident("stdout"),
        ]))
        .unwrap();
    assert_eq!(result, Value::int(1));
    assert_eq!(interp.get_print_output(), "HI\n");
}

#[test]
fn test_use_does_not_pull_in_submodules_or_parents() {
    let mut interp = with_modules();
    interp.eval(&use_module("std")).unwrap();
    assert_eq!(interp.lookup("version"), Some(Value::string("0.1")));
    assert_eq!(interp.lookup("shout"), None);
}

#[test]
fn test_use_in_block_is_scoped() {
    let mut interp = with_modules();
    let err = interp
        .eval_program(&program(vec![
            block(vec![use_module("std/io")]),
            call("shout", vec![string("x")]),
        ]))
        .unwrap_err();
    assert_eq!(err.message, "undefined function: shout");
}

#[test]
fn test_use_unknown_module() {
    let mut interp = with_modules();
    let err = interp.eval(&use_module("net")).unwrap_err();
    assert_eq!(err.message, "module net not found");
}

#[test]
fn test_use_unknown_submodule() {
    let mut interp = with_modules();
    let err = interp.eval(&use_module("std/fs")).unwrap_err();
    assert_eq!(
        err.kind,
        EvalErrorKind::SubmoduleNotFound {
            module: "std".to_string(),
            name: "fs".to_string()
        }
    );
}

#[test]
fn test_rebinding_after_use_leaves_module_intact() {
    let mut interp = with_modules();
    interp
        .eval_program(&program(vec![
            use_module("std/io"),
            assign("stdout", int(7)),
        ]))
        .unwrap();
    assert_eq!(interp.lookup("stdout"), Some(Value::int(7)));
    let io = interp.modules().resolve("std/io").unwrap();
    assert_eq!(io.lookup("stdout"), Some(Value::int(1)));
}

#[test]
fn test_use_overwrites_existing_local() {
    let mut interp = with_modules();
    let result = interp
        .eval_program(&program(vec![
            let_("stdout", string("mine")),
            use_module("std/io"),
            ident("stdout"),
        ]))
        .unwrap();
    assert_eq!(result, Value::int(1));
}

#[test]
fn test_imported_native_shares_module_value() {
    let mut interp = with_modules();
    interp.eval(&use_module("std/io")).unwrap();
    let io = interp.modules().resolve("std/io").unwrap();
    let (Some(Value::NativeFunction(imported)), Some(Value::NativeFunction(stored))) =
        (interp.lookup("shout"), io.lookup("shout"))
    else {
        panic!("shout should be a native function");
    };
    assert!(crate::Heap::ptr_eq(&imported, &stored));
}

#[test]
fn test_duplicate_module_fails_build() {
    let result = Interpreter::builder()
        .print_handler(buffer_handler())
        .module(Module::new("std"))
        .module(Module::new("std"))
        .build();
    let Err(err) = result else {
        panic!("duplicate module should be rejected");
    };
    assert_eq!(
        err.kind,
        EvalErrorKind::DuplicateModule {
            name: "std".to_string()
        }
    );
}
