//! `std/io`: console output, line input, `format`, and file descriptors.
//!
//! Descriptors 0, 1 and 2 are the process's standard streams; writes to 1
//! go through the interpreter's print handler so they can be captured.
//! `open` hands out descriptors from 3 upward, tracked per thread.

use std::cell::RefCell;
use std::fs::{File, OpenOptions};
use std::io::{self, BufRead, Read, Write};

use rustc_hash::FxHashMap;
use tracing::debug;

use yuji_eval::{Arity, EvalError, EvalResult, Module, NativeContext, Value};

const STDIN: i64 = 0;
const STDOUT: i64 = 1;
const STDERR: i64 = 2;

/// Files opened by scripts on this thread.
#[derive(Default)]
struct FileTable {
    files: FxHashMap<i64, File>,
    next_fd: i64,
}

impl FileTable {
    fn insert(&mut self, file: File) -> i64 {
        let fd = self.next_fd.max(STDERR + 1);
        self.next_fd = fd + 1;
        self.files.insert(fd, file);
        fd
    }
}

thread_local! {
    static FILES: RefCell<FileTable> = RefCell::new(FileTable::default());
}

pub(crate) fn module() -> Result<Module, EvalError> {
    let mut module = Module::new("io");
    module.define("stdin", Value::int(STDIN))?;
    module.define("stdout", Value::int(STDOUT))?;
    module.define("stderr", Value::int(STDERR))?;

    module.define_native("print", Arity::Variadic, print)?;
    module.define_native("println", Arity::Variadic, println)?;
    module.define_native("input", Arity::Fixed(1), input)?;
    module.define_native("format", Arity::Variadic, format)?;
    module.define_native("open", Arity::Fixed(2), open)?;
    module.define_native("close", Arity::Fixed(1), close)?;
    module.define_native("write", Arity::Fixed(2), write)?;
    module.define_native("read", Arity::Fixed(1), read)?;
    Ok(module)
}

/// Display strings of all arguments, concatenated.
fn joined(ctx: &NativeContext<'_>, args: &[Value]) -> Result<String, EvalError> {
    if args.is_empty() {
        return Err(ctx.error("requires at least one argument"));
    }
    Ok(args.iter().map(Value::display_value).collect())
}

fn print(ctx: &mut NativeContext<'_>, args: &[Value]) -> EvalResult {
    let text = joined(ctx, args)?;
    ctx.print_handler().print(&text);
    Ok(Value::Null)
}

fn println(ctx: &mut NativeContext<'_>, args: &[Value]) -> EvalResult {
    let text = joined(ctx, args)?;
    ctx.print_handler().println(&text);
    Ok(Value::Null)
}

/// Print the prompt, then read one line from stdin without its line ending.
/// End of input yields an empty string.
fn input(ctx: &mut NativeContext<'_>, args: &[Value]) -> EvalResult {
    let prompt = ctx.arg(args, 0)?.display_value();
    ctx.print_handler().print(&prompt);
    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .map_err(|err| ctx.error(err.to_string()))?;
    let trimmed = line.trim_end_matches(['\n', '\r']).len();
    line.truncate(trimmed);
    Ok(Value::string(line))
}

/// `format(template, ...)`: each `{}` takes the next argument's display
/// string.
fn format(ctx: &mut NativeContext<'_>, args: &[Value]) -> EvalResult {
    let template = ctx.str_arg(args, 0)?;
    let mut values = args.get(1..).unwrap_or_default().iter();
    let mut out = String::with_capacity(template.len());
    let mut chars = template.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '{' && chars.peek() == Some(&'}') {
            chars.next();
            let value = values
                .next()
                .ok_or_else(|| ctx.error("not enough arguments for placeholders"))?;
            out.push_str(&value.display_value());
        } else {
            out.push(c);
        }
    }
    Ok(Value::string(out))
}

/// Translate an fopen-style mode string.
fn open_options(mode: &str) -> Option<OpenOptions> {
    let mut options = OpenOptions::new();
    match mode {
        "r" => options.read(true),
        "r+" => options.read(true).write(true),
        "w" => options.write(true).create(true).truncate(true),
        "w+" => options.read(true).write(true).create(true).truncate(true),
        "a" => options.append(true).create(true),
        "a+" => options.read(true).append(true).create(true),
        _ => return None,
    };
    Some(options)
}

fn open(ctx: &mut NativeContext<'_>, args: &[Value]) -> EvalResult {
    let path = ctx.str_arg(args, 0)?;
    let mode = ctx.str_arg(args, 1)?;
    let options = open_options(mode).ok_or_else(|| ctx.error(format!("invalid open mode '{mode}'")))?;
    let file = options
        .open(path)
        .map_err(|err| ctx.error(format!("open failed: {err}")))?;
    let fd = FILES.with(|table| table.borrow_mut().insert(file));
    debug!(path, mode, fd, "opened file");
    Ok(Value::int(fd))
}

/// Closing a standard stream is a no-op.
fn close(ctx: &mut NativeContext<'_>, args: &[Value]) -> EvalResult {
    let fd = ctx.int_arg(args, 0)?;
    if (STDIN..=STDERR).contains(&fd) {
        return Ok(Value::Null);
    }
    match FILES.with(|table| table.borrow_mut().files.remove(&fd)) {
        Some(_) => Ok(Value::Null),
        None => Err(ctx.error(format!("bad file descriptor {fd}"))),
    }
}

/// Run `op` on an open file, mapping a missing descriptor and I/O failures
/// to errors.
fn with_file<T>(
    ctx: &NativeContext<'_>,
    fd: i64,
    op: impl FnOnce(&mut File) -> io::Result<T>,
) -> Result<T, EvalError> {
    FILES.with(|table| {
        let mut table = table.borrow_mut();
        let file = table
            .files
            .get_mut(&fd)
            .ok_or_else(|| ctx.error(format!("bad file descriptor {fd}")))?;
        op(file).map_err(|err| ctx.error(err.to_string()))
    })
}

fn write(ctx: &mut NativeContext<'_>, args: &[Value]) -> EvalResult {
    let fd = ctx.int_arg(args, 0)?;
    let data = ctx.str_arg(args, 1)?;
    match fd {
        STDOUT => ctx.print_handler().print(data),
        STDERR => {
            let mut stderr = io::stderr().lock();
            stderr
                .write_all(data.as_bytes())
                .and_then(|()| stderr.flush())
                .map_err(|err| ctx.error(format!("write failed: {err}")))?;
        }
        STDIN => return Err(ctx.error("cannot write to stdin")),
        _ => with_file(ctx, fd, |file| {
            file.write_all(data.as_bytes())?;
            file.sync_data()
        })?,
    }
    Ok(Value::Null)
}

/// Read everything remaining on the descriptor.
fn read(ctx: &mut NativeContext<'_>, args: &[Value]) -> EvalResult {
    let fd = ctx.int_arg(args, 0)?;
    let mut contents = String::new();
    match fd {
        STDIN => {
            io::stdin()
                .read_to_string(&mut contents)
                .map_err(|err| ctx.error(format!("read failed: {err}")))?;
        }
        STDOUT | STDERR => return Err(ctx.error(format!("cannot read from descriptor {fd}"))),
        _ => {
            with_file(ctx, fd, |file| file.read_to_string(&mut contents))?;
        }
    }
    Ok(Value::string(contents))
}
