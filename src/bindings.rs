//! Binding declarations: flag name + writable slot, or flag name + action
//!
//! Bindings are registered explicitly with the [`CommandLine`](crate::CommandLine)
//! context; registration order is the discovery order used when applying
//! matched flags. A binding's name is immutable after construction and an
//! empty or whitespace-only name is rejected up front.

use std::cell::RefCell;
use std::rc::Rc;

use crate::errors::{BindError, Result};
use crate::readers::{type_name, Value};

/// Shared writable storage for one bound value.
///
/// Stands in for the original's writable static fields: the application
/// keeps one handle, the binding keeps a clone, and `init` writes through
/// it. `Rc`-based and deliberately not `Send` - the whole pipeline is
/// single-threaded.
pub struct Slot<T> {
    inner: Rc<RefCell<T>>,
}

impl<T> Slot<T> {
    pub fn new(value: T) -> Self {
        Self {
            inner: Rc::new(RefCell::new(value)),
        }
    }

    pub fn set(&self, value: T) {
        *self.inner.borrow_mut() = value;
    }
}

impl<T: Clone> Slot<T> {
    pub fn get(&self) -> T {
        self.inner.borrow().clone()
    }
}

impl<T> Clone for Slot<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T: Default> Default for Slot<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for Slot<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Slot").field(&self.inner.borrow()).finish()
    }
}

/// Built-in slot types, mapped to the semantic type name of their default
/// reader.
pub trait BindTarget: 'static {
    const TYPE_NAME: &'static str;
}

impl BindTarget for String {
    const TYPE_NAME: &'static str = type_name::STRING;
}

impl BindTarget for i64 {
    const TYPE_NAME: &'static str = type_name::INT;
}

impl BindTarget for f64 {
    const TYPE_NAME: &'static str = type_name::FLOAT;
}

impl BindTarget for bool {
    const TYPE_NAME: &'static str = type_name::BOOL;
}

impl BindTarget for u8 {
    const TYPE_NAME: &'static str = type_name::BYTE;
}

/// Enumerated slot types, converted through the `int` reader and then
/// reinterpreted numerically.
///
/// The engine never bounds-checks the representation: `from_repr` receives
/// whatever integer the reader produced, including values outside the
/// enum's declared members.
pub trait EnumRepr: 'static {
    fn from_repr(repr: i64) -> Self;
}

pub(crate) enum TargetKind {
    /// Plain value looked up by semantic type name.
    Value,
    /// Enum slot: converted via the `int` reader, skipped silently when
    /// that reader is unavailable.
    Enum,
}

/// One configurable flag: `-name value` writes a converted value into the
/// bound slot.
pub struct ArgumentBinding {
    name: String,
    description: String,
    type_name: String,
    kind: TargetKind,
    store: Box<dyn FnMut(Value) -> bool>,
}

impl ArgumentBinding {
    /// Bind a flag to a slot of a built-in type.
    pub fn new<T: BindTarget>(
        name: impl Into<String>,
        description: impl Into<String>,
        slot: &Slot<T>,
    ) -> Result<Self> {
        Self::with_reader(name, description, T::TYPE_NAME, slot)
    }

    /// Bind a flag to a slot whose values come from a custom registered
    /// reader, looked up by `type_name`.
    pub fn with_reader<T: 'static>(
        name: impl Into<String>,
        description: impl Into<String>,
        type_name: impl Into<String>,
        slot: &Slot<T>,
    ) -> Result<Self> {
        let slot = slot.clone();
        Ok(Self {
            name: validated(name.into())?,
            description: description.into(),
            type_name: type_name.into(),
            kind: TargetKind::Value,
            store: Box::new(move |value| match value.downcast::<T>() {
                Some(v) => {
                    slot.set(v);
                    true
                }
                None => false,
            }),
        })
    }

    /// Bind a flag to an enumerated slot. The raw text is converted with
    /// the `int` reader and mapped onto the enum via [`EnumRepr::from_repr`].
    pub fn enumeration<E: EnumRepr>(
        name: impl Into<String>,
        description: impl Into<String>,
        slot: &Slot<E>,
    ) -> Result<Self> {
        let slot = slot.clone();
        Ok(Self {
            name: validated(name.into())?,
            description: description.into(),
            type_name: type_name::INT.to_string(),
            kind: TargetKind::Enum,
            store: Box::new(move |value| match value.downcast::<i64>() {
                Some(repr) => {
                    slot.set(E::from_repr(repr));
                    true
                }
                None => false,
            }),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub(crate) fn is_enum(&self) -> bool {
        matches!(self.kind, TargetKind::Enum)
    }

    /// Write a converted value into the slot. False means the value's
    /// concrete type did not match the slot.
    pub(crate) fn store(&mut self, value: Value) -> bool {
        (self.store)(value)
    }
}

impl std::fmt::Debug for ArgumentBinding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ArgumentBinding")
            .field("name", &self.name)
            .field("description", &self.description)
            .field("type_name", &self.type_name)
            .finish_non_exhaustive()
    }
}

/// One zero-argument action invoked when its flag is present. Command flags
/// never consume a value.
pub struct CommandBinding {
    name: String,
    description: String,
    action: Box<dyn FnMut() -> anyhow::Result<()>>,
}

impl CommandBinding {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        action: impl FnMut() -> anyhow::Result<()> + 'static,
    ) -> Result<Self> {
        Ok(Self {
            name: validated(name.into())?,
            description: description.into(),
            action: Box::new(action),
        })
    }

    /// Bind an action that cannot fail.
    pub fn from_fn(
        name: impl Into<String>,
        description: impl Into<String>,
        mut action: impl FnMut() + 'static,
    ) -> Result<Self> {
        Self::new(name, description, move || {
            action();
            Ok(())
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub(crate) fn invoke(&mut self) -> anyhow::Result<()> {
        (self.action)()
    }
}

impl std::fmt::Debug for CommandBinding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommandBinding")
            .field("name", &self.name)
            .field("description", &self.description)
            .finish_non_exhaustive()
    }
}

fn validated(name: String) -> Result<String> {
    if name.trim().is_empty() {
        return Err(BindError::EmptyName);
    }
    Ok(name)
}
