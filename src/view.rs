//! Opaque view values.
//!
//! A screen coordinator holds exactly one application-supplied renderable.
//! The engine never inspects it; it only stores the value and hands it back
//! to the host for display. [`ViewValue`] is a cheaply clonable type-erased
//! handle so the same view can be surfaced to the host from multiple
//! projection passes without copying application data.

use std::any::Any;
use std::fmt;
use std::rc::Rc;

/// Type-erased, reference-counted handle to an application view value.
#[derive(Clone)]
pub struct ViewValue {
    inner: Rc<dyn Any>,
}

impl ViewValue {
    /// Wrap an arbitrary application renderable.
    pub fn new<T: 'static>(value: T) -> Self {
        Self {
            inner: Rc::new(value),
        }
    }

    /// Borrow the underlying value back at its concrete type.
    ///
    /// Returns `None` when the stored value is of a different type; the host
    /// is expected to know what it handed in.
    pub fn downcast_ref<T: 'static>(&self) -> Option<&T> {
        self.inner.downcast_ref::<T>()
    }
}

impl fmt::Debug for ViewValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ViewValue(..)")
    }
}
