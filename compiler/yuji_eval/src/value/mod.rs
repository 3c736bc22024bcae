//! Runtime values for the Yuji interpreter.
//!
//! Primitives (`Int`, `Float`, `Bool`, `Null`) live inline and are copied on
//! every evaluation. Strings, arrays and native functions sit behind
//! [`Heap`], so cloning a `Value` retains the payload and dropping it
//! releases it. Function values point at their shared AST declaration.
//!
//! There is no cycle collection. The language cannot make an array contain
//! itself, so reference counting alone reclaims everything.

mod heap;

use std::cell::RefCell;
use std::fmt;

use yuji_ir::{Name, SharedFunction};

use crate::native::{Arity, NativeFn, NativeFunction};

pub use heap::Heap;

/// Backing storage of an array value; shared and mutable in place.
pub type ArrayBuf = RefCell<Vec<Value>>;

/// Runtime value.
#[derive(Clone)]
pub enum Value {
    Int(i64),
    Float(f64),
    Bool(bool),
    Null,
    Str(Heap<String>),
    Array(Heap<ArrayBuf>),
    /// User-defined function; the declaration is owned by the AST.
    Function(SharedFunction),
    NativeFunction(Heap<NativeFunction>),
}

impl Value {
    #[inline]
    pub fn int(n: i64) -> Self {
        Value::Int(n)
    }

    #[inline]
    pub fn float(f: f64) -> Self {
        Value::Float(f)
    }

    #[inline]
    pub fn string(s: impl Into<String>) -> Self {
        Value::Str(Heap::new(s.into()))
    }

    #[inline]
    pub fn array(items: Vec<Value>) -> Self {
        Value::Array(Heap::new(RefCell::new(items)))
    }

    #[inline]
    pub fn function(decl: SharedFunction) -> Self {
        Value::Function(decl)
    }

    /// Wrap a host callback as a callable value.
    pub fn native(name: impl Into<Name>, arity: Arity, func: NativeFn) -> Self {
        Value::NativeFunction(Heap::new(NativeFunction {
            name: name.into(),
            arity,
            func,
        }))
    }

    /// Truthiness used by `if`, `while`, `&&` and `||`.
    ///
    /// Numbers are true when nonzero and strings when nonempty. Arrays,
    /// `null` and functions are always false.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Int(n) => *n != 0,
            Value::Float(f) => *f != 0.0,
            Value::Bool(b) => *b,
            Value::Str(s) => !s.is_empty(),
            Value::Null | Value::Array(_) | Value::Function(_) | Value::NativeFunction(_) => false,
        }
    }

    /// Name of the runtime type, as reported by `typeof` and in errors.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Bool(_) => "bool",
            Value::Null => "null",
            Value::Str(_) => "string",
            Value::Array(_) => "array",
            Value::Function(_) | Value::NativeFunction(_) => "function",
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// Numeric value widened to `f64`; `None` for non-numbers.
    #[expect(
        clippy::cast_precision_loss,
        reason = "mixed int/float arithmetic promotes to double"
    )]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Int(n) => Some(*n as f64),
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&Heap<ArrayBuf>> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    /// Number of live owners of this value's payload.
    ///
    /// Inline primitives are independently owned, so they always report 1.
    /// Function values count the AST's own reference as well.
    pub fn ref_count(&self) -> usize {
        match self {
            Value::Int(_) | Value::Float(_) | Value::Bool(_) | Value::Null => 1,
            Value::Str(s) => Heap::ref_count(s),
            Value::Array(items) => Heap::ref_count(items),
            Value::Function(decl) => std::rc::Rc::strong_count(decl),
            Value::NativeFunction(native) => Heap::ref_count(native),
        }
    }

    /// Display string for user output (`print`, `format`, array elements).
    pub fn display_value(&self) -> String {
        match self {
            Value::Int(n) => n.to_string(),
            Value::Float(f) => format_float(*f),
            Value::Bool(b) => b.to_string(),
            Value::Null => "null".to_string(),
            Value::Str(s) => s.to_string(),
            Value::Array(items) => {
                let inner: Vec<_> = items.borrow().iter().map(Value::display_value).collect();
                format!("[{}]", inner.join(", "))
            }
            Value::Function(decl) => format!("<function:{:p}>", std::rc::Rc::as_ptr(decl)),
            Value::NativeFunction(native) => format!("<function:{:p}>", Heap::as_ptr(native)),
        }
    }
}

/// Format a float with up to six fractional digits, dropping trailing zeros
/// and the point itself when nothing is left after it.
fn format_float(f: f64) -> String {
    if !f.is_finite() {
        return f.to_string();
    }
    let mut text = format!("{f:.6}");
    if text.contains('.') {
        let trimmed = text.trim_end_matches('0').trim_end_matches('.').len();
        text.truncate(trimmed);
    }
    if text == "-0" {
        text.remove(0);
    }
    text
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display_value())
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(n) => write!(f, "Int({n})"),
            Value::Float(x) => write!(f, "Float({x})"),
            Value::Bool(b) => write!(f, "Bool({b})"),
            Value::Null => write!(f, "Null"),
            Value::Str(s) => write!(f, "Str({:?})", s.as_str()),
            Value::Array(items) => f.debug_list().entries(items.borrow().iter()).finish(),
            Value::Function(decl) => write!(f, "Function({})", decl.display_name()),
            Value::NativeFunction(native) => write!(f, "NativeFunction({})", native.name),
        }
    }
}

/// Structural equality for tests and `==` on non-numeric operands.
///
/// Numbers of different kinds are not equal here; the `==` operator
/// promotes them before comparing. Functions compare by identity.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Null, Value::Null) => true,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => {
                Heap::ptr_eq(a, b) || *a.borrow() == *b.borrow()
            }
            (Value::Function(a), Value::Function(b)) => std::rc::Rc::ptr_eq(a, b),
            (Value::NativeFunction(a), Value::NativeFunction(b)) => Heap::ptr_eq(a, b),
            _ => false,
        }
    }
}
