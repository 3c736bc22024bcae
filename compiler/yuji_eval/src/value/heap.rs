//! Reference-counted payload wrapper for heap-backed values.

use std::fmt;
use std::ops::Deref;
use std::rc::Rc;

/// Shared, reference-counted payload of a `Value`.
///
/// The constructor is restricted to the `value` module so every heap value
/// is created through a `Value` factory (`Value::string`, `Value::array`,
/// `Value::native`). Cloning retains; dropping releases, and the payload is
/// freed (recursively, for arrays) when the last owner lets go.
#[repr(transparent)]
pub struct Heap<T: ?Sized>(Rc<T>);

impl<T> Heap<T> {
    #[inline]
    pub(super) fn new(value: T) -> Self {
        Heap(Rc::new(value))
    }
}

impl<T: ?Sized> Heap<T> {
    /// Number of live owners of this allocation.
    #[inline]
    pub fn ref_count(this: &Self) -> usize {
        Rc::strong_count(&this.0)
    }

    /// True if both handles point at the same allocation.
    #[inline]
    pub fn ptr_eq(this: &Self, other: &Self) -> bool {
        Rc::ptr_eq(&this.0, &other.0)
    }

    /// Address of the allocation, used for opaque display tags.
    #[inline]
    pub(super) fn as_ptr(this: &Self) -> *const T {
        Rc::as_ptr(&this.0)
    }
}

impl<T: ?Sized> Clone for Heap<T> {
    #[inline]
    fn clone(&self) -> Self {
        Heap(Rc::clone(&self.0))
    }
}

impl<T: ?Sized> Deref for Heap<T> {
    type Target = T;

    #[inline]
    fn deref(&self) -> &T {
        &self.0
    }
}

impl<T: ?Sized + PartialEq> PartialEq for Heap<T> {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0) || *self.0 == *other.0
    }
}

impl<T: ?Sized + fmt::Debug> fmt::Debug for Heap<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
