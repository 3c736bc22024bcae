//! Where script output goes.
//!
//! `print`, `println` and `write` to fd 1 all route through the
//! interpreter's handler, so embedders can capture or drop what a script
//! prints without touching the process's stdout.

use std::cell::RefCell;
use std::io::{self, Write};
use std::rc::Rc;

/// Output sink shared by the interpreter and its native functions.
#[derive(Debug)]
pub enum PrintHandler {
    /// Straight to the process's stdout.
    Stdout,
    /// Accumulated in memory; read back with [`PrintHandler::get_output`].
    Buffer(RefCell<String>),
    /// Dropped.
    Silent,
}

impl PrintHandler {
    /// Write `text` as is. Stdout is flushed so prompts show before `input`.
    pub fn print(&self, text: &str) {
        match self {
            PrintHandler::Stdout => {
                let mut out = io::stdout().lock();
                // A closed stdout must not abort the script.
                let _ = out.write_all(text.as_bytes()).and_then(|()| out.flush());
            }
            PrintHandler::Buffer(buffer) => buffer.borrow_mut().push_str(text),
            PrintHandler::Silent => {}
        }
    }

    pub fn println(&self, text: &str) {
        match self {
            PrintHandler::Stdout => {
                let mut out = io::stdout().lock();
                let _ = writeln!(out, "{text}");
            }
            PrintHandler::Buffer(buffer) => {
                let mut buffer = buffer.borrow_mut();
                buffer.push_str(text);
                buffer.push('\n');
            }
            PrintHandler::Silent => {}
        }
    }

    /// Everything captured so far. Only a buffer captures anything.
    pub fn get_output(&self) -> String {
        match self {
            PrintHandler::Buffer(buffer) => buffer.borrow().clone(),
            PrintHandler::Stdout | PrintHandler::Silent => String::new(),
        }
    }
}

pub type SharedPrintHandler = Rc<PrintHandler>;

pub fn stdout_handler() -> SharedPrintHandler {
    Rc::new(PrintHandler::Stdout)
}

pub fn buffer_handler() -> SharedPrintHandler {
    Rc::new(PrintHandler::Buffer(RefCell::default()))
}

pub fn silent_handler() -> SharedPrintHandler {
    Rc::new(PrintHandler::Silent)
}
