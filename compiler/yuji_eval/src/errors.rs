//! Runtime errors raised by the evaluator and native functions.
//!
//! Every fault is fatal to the running program: it travels up as an
//! `EvalError` to whoever drove the evaluation. Factory functions below are
//! the public way to build one; each fills in both the structured `kind`
//! and the human-readable `message`.

use std::fmt;

use yuji_ir::BinaryOp;

use crate::value::Value;

/// Result of evaluating an expression.
pub type EvalResult = Result<Value, EvalError>;

/// Typed error category.
///
/// Matching on the kind is how embedders and tests tell failures apart;
/// the message is derived from it through `Display`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EvalErrorKind {
    // Names and bindings
    UndefinedVariable {
        name: String,
    },
    UndefinedFunction {
        name: String,
    },
    Redeclaration {
        what: &'static str,
        name: String,
    },

    // Calls
    ArityMismatch {
        name: String,
        expected: usize,
        got: usize,
    },
    NotCallable {
        name: String,
        type_name: &'static str,
    },
    StackOverflow {
        depth: usize,
    },

    // Operators
    InvalidOperands {
        op: BinaryOp,
        left: &'static str,
        right: &'static str,
    },
    DivisionByZero,
    ModuloByZero,
    IntegerOverflow {
        operation: &'static str,
    },
    UnknownOperator {
        symbol: String,
    },

    // Arrays
    NotIndexable {
        type_name: &'static str,
    },
    InvalidIndexType {
        type_name: &'static str,
    },
    IndexOutOfBounds {
        index: i64,
        len: usize,
    },

    // Control flow
    ReturnOutsideFunction,
    BreakOutsideLoop,
    ContinueOutsideLoop,

    // Modules
    ModuleNotFound {
        name: String,
    },
    SubmoduleNotFound {
        module: String,
        name: String,
    },
    DuplicateModule {
        name: String,
    },
    DuplicateBinding {
        module: String,
        name: String,
    },

    // Native functions
    WrongArgType {
        function: String,
        position: usize,
        expected: &'static str,
        got: &'static str,
    },
    AssertionFailed {
        message: String,
    },
    Native {
        function: String,
        message: String,
    },
}

impl fmt::Display for EvalErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UndefinedVariable { name } => write!(f, "undefined variable: {name}"),
            Self::UndefinedFunction { name } => write!(f, "undefined function: {name}"),
            Self::Redeclaration { what, name } => write!(f, "{what} {name} already exists"),

            Self::ArityMismatch {
                name,
                expected,
                got,
            } => {
                let arg_word = if *expected == 1 {
                    "argument"
                } else {
                    "arguments"
                };
                write!(f, "function '{name}' expects {expected} {arg_word}, got {got}")
            }
            Self::NotCallable { name, type_name } => {
                write!(f, "'{name}' is not a function (got '{type_name}')")
            }
            Self::StackOverflow { depth } => {
                write!(f, "stack overflow: call depth exceeded {depth}")
            }

            Self::InvalidOperands { op, left, right } => write!(
                f,
                "operator `{}` cannot be applied to {left} and {right}",
                op.as_symbol()
            ),
            Self::DivisionByZero => write!(f, "division by zero"),
            Self::ModuloByZero => write!(f, "modulo by zero"),
            Self::IntegerOverflow { operation } => {
                write!(f, "integer overflow in {operation}")
            }
            Self::UnknownOperator { symbol } => write!(f, "unknown operator: {symbol}"),

            Self::NotIndexable { type_name } => {
                write!(f, "cannot index non-array type {type_name}")
            }
            Self::InvalidIndexType { type_name } => {
                write!(f, "array index must be an integer, got {type_name}")
            }
            Self::IndexOutOfBounds { index, len } => {
                write!(f, "array index out of bounds: {index} (length {len})")
            }

            Self::ReturnOutsideFunction => write!(f, "cannot return from top-level code"),
            Self::BreakOutsideLoop => write!(f, "cannot break outside of a loop"),
            Self::ContinueOutsideLoop => write!(f, "cannot continue outside of a loop"),

            Self::ModuleNotFound { name } => write!(f, "module {name} not found"),
            Self::SubmoduleNotFound { module, name } => {
                write!(f, "submodule {name} not found in module {module}")
            }
            Self::DuplicateModule { name } => write!(f, "module {name} is already registered"),
            Self::DuplicateBinding { module, name } => {
                write!(f, "module {module} already defines {name}")
            }

            Self::WrongArgType {
                function,
                position,
                expected,
                got,
            } => write!(
                f,
                "{function}: argument {position} must be {expected}, got {got}"
            ),
            Self::AssertionFailed { message } => write!(f, "Assertion failed: {message}"),
            Self::Native { function, message } => write!(f, "{function}: {message}"),
        }
    }
}

/// A single frame in an evaluation backtrace.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BacktraceFrame {
    /// Called function's name.
    pub name: String,
}

/// Snapshot of the call stack at an error site, most recent call first.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EvalBacktrace {
    frames: Vec<BacktraceFrame>,
}

impl EvalBacktrace {
    pub fn new(frames: Vec<BacktraceFrame>) -> Self {
        Self { frames }
    }

    pub fn frames(&self) -> &[BacktraceFrame] {
        &self.frames
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Function names, most recent first.
    pub fn names(&self) -> Vec<&str> {
        self.frames.iter().map(|frame| frame.name.as_str()).collect()
    }
}

impl fmt::Display for EvalBacktrace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.frames.is_empty() {
            return Ok(());
        }
        writeln!(f, "stack backtrace:")?;
        for (i, frame) in self.frames.iter().enumerate() {
            writeln!(f, "  {i}: in function '{}'", frame.name)?;
        }
        Ok(())
    }
}

/// Evaluation error.
#[derive(Clone, Debug)]
pub struct EvalError {
    /// Structured error category.
    pub kind: EvalErrorKind,
    /// Human-readable message; equals `kind.to_string()`.
    pub message: String,
    /// Call stack at the innermost failing call, if any call was active.
    pub backtrace: Option<EvalBacktrace>,
}

impl EvalError {
    fn from_kind(kind: EvalErrorKind) -> Self {
        let message = kind.to_string();
        Self {
            kind,
            message,
            backtrace: None,
        }
    }

    /// Attach a backtrace to this error.
    #[must_use]
    pub fn with_backtrace(mut self, backtrace: EvalBacktrace) -> Self {
        self.backtrace = Some(backtrace);
        self
    }

    /// Message followed by the backtrace, as a driver prints it before exiting.
    pub fn report(&self) -> String {
        match &self.backtrace {
            Some(trace) if !trace.is_empty() => format!("error: {}\n{trace}", self.message),
            _ => format!("error: {}\n", self.message),
        }
    }
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for EvalError {}

// Name and binding errors

#[cold]
pub fn undefined_variable(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UndefinedVariable {
        name: name.to_string(),
    })
}

#[cold]
pub fn undefined_function(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UndefinedFunction {
        name: name.to_string(),
    })
}

/// `let` of a name already bound in the same scope.
#[cold]
pub fn variable_exists(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::Redeclaration {
        what: "variable",
        name: name.to_string(),
    })
}

/// Named `fn` whose name is already bound in the same scope.
#[cold]
pub fn function_exists(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::Redeclaration {
        what: "function",
        name: name.to_string(),
    })
}

// Call errors

#[cold]
pub fn arity_mismatch(name: &str, expected: usize, got: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::ArityMismatch {
        name: name.to_string(),
        expected,
        got,
    })
}

#[cold]
pub fn not_callable(name: &str, type_name: &'static str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::NotCallable {
        name: name.to_string(),
        type_name,
    })
}

#[cold]
pub fn stack_overflow(depth: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::StackOverflow { depth })
}

// Operator errors

#[cold]
pub fn invalid_operands(op: BinaryOp, left: &'static str, right: &'static str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::InvalidOperands { op, left, right })
}

#[cold]
pub fn division_by_zero() -> EvalError {
    EvalError::from_kind(EvalErrorKind::DivisionByZero)
}

#[cold]
pub fn modulo_by_zero() -> EvalError {
    EvalError::from_kind(EvalErrorKind::ModuloByZero)
}

#[cold]
pub fn integer_overflow(operation: &'static str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::IntegerOverflow { operation })
}

/// Operator token with no `BinaryOp` mapping; raised by front ends.
#[cold]
pub fn unknown_operator(symbol: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UnknownOperator {
        symbol: symbol.to_string(),
    })
}

// Array errors

#[cold]
pub fn not_indexable(type_name: &'static str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::NotIndexable { type_name })
}

#[cold]
pub fn invalid_index_type(type_name: &'static str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::InvalidIndexType { type_name })
}

#[cold]
pub fn index_out_of_bounds(index: i64, len: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::IndexOutOfBounds { index, len })
}

// Control flow errors

#[cold]
pub fn return_outside_function() -> EvalError {
    EvalError::from_kind(EvalErrorKind::ReturnOutsideFunction)
}

#[cold]
pub fn break_outside_loop() -> EvalError {
    EvalError::from_kind(EvalErrorKind::BreakOutsideLoop)
}

#[cold]
pub fn continue_outside_loop() -> EvalError {
    EvalError::from_kind(EvalErrorKind::ContinueOutsideLoop)
}

// Module errors

#[cold]
pub fn module_not_found(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::ModuleNotFound {
        name: name.to_string(),
    })
}

#[cold]
pub fn submodule_not_found(module: &str, name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::SubmoduleNotFound {
        module: module.to_string(),
        name: name.to_string(),
    })
}

#[cold]
pub fn duplicate_module(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::DuplicateModule {
        name: name.to_string(),
    })
}

#[cold]
pub fn duplicate_binding(module: &str, name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::DuplicateBinding {
        module: module.to_string(),
        name: name.to_string(),
    })
}

// Native function errors

/// Argument `position` (1-based) of `function` has the wrong type.
#[cold]
pub fn wrong_arg_type(
    function: &str,
    position: usize,
    expected: &'static str,
    got: &Value,
) -> EvalError {
    EvalError::from_kind(EvalErrorKind::WrongArgType {
        function: function.to_string(),
        position,
        expected,
        got: got.type_name(),
    })
}

#[cold]
pub fn assertion_failed(message: impl Into<String>) -> EvalError {
    EvalError::from_kind(EvalErrorKind::AssertionFailed {
        message: message.into(),
    })
}

/// Domain error reported by a native function (bad mode, empty array, I/O).
#[cold]
pub fn native_error(function: &str, message: impl Into<String>) -> EvalError {
    EvalError::from_kind(EvalErrorKind::Native {
        function: function.to_string(),
        message: message.into(),
    })
}
