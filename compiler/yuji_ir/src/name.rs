//! Identifier names shared between the AST and runtime scopes.

use std::borrow::Borrow;
use std::fmt;
use std::ops::Deref;
use std::rc::Rc;

/// Identifier for a variable, function, parameter or module binding.
///
/// Cloning is a reference-count bump. Hashing and equality go through the
/// underlying `str`, so maps keyed by `Name` can be queried with `&str`.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct Name(Rc<str>);

impl Name {
    /// Create a name from a string slice.
    #[inline]
    pub fn new(text: &str) -> Self {
        Name(Rc::from(text))
    }

    /// The name as a string slice.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Name {
    #[inline]
    fn from(text: &str) -> Self {
        Name::new(text)
    }
}

impl From<String> for Name {
    #[inline]
    fn from(text: String) -> Self {
        Name(Rc::from(text))
    }
}

impl Borrow<str> for Name {
    #[inline]
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Name {
    #[inline]
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Deref for Name {
    type Target = str;

    #[inline]
    fn deref(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Name({:?})", &*self.0)
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_name_equality_is_textual() {
        assert_eq!(Name::new("x"), Name::from("x".to_string()));
        assert_ne!(Name::new("x"), Name::new("y"));
    }

    #[test]
    fn test_name_borrow_as_str_key() {
        let mut map = HashMap::new();
        map.insert(Name::new("answer"), 42);
        assert_eq!(map.get("answer"), Some(&42));
        assert_eq!(map.get("question"), None);
    }

    #[test]
    fn test_name_display() {
        assert_eq!(Name::new("print").to_string(), "print");
        assert_eq!(format!("{:?}", Name::new("f")), "Name(\"f\")");
    }
}
