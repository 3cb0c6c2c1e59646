//! Type conversion: readers turn raw flag values into typed values
//!
//! Every reader is total over arbitrary input text: empty or unparsable
//! input yields the type's documented default instead of an error. A silent
//! default is the designed behavior here, not a missing error path - one
//! malformed flag degrades to a default value, never a failed run.

use std::any::Any;

use indexmap::IndexMap;

/// Semantic type names the default registry is seeded with.
pub mod type_name {
    pub const STRING: &str = "string";
    pub const INT: &str = "int";
    pub const FLOAT: &str = "float";
    pub const BOOL: &str = "bool";
    pub const BYTE: &str = "byte";
}

/// A converted flag value.
///
/// The built-in variants cover the seeded readers; `Other` carries values
/// produced by custom readers registered at runtime.
pub enum Value {
    Str(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    Byte(u8),
    Other(Box<dyn Any>),
}

impl Value {
    /// Recover the concrete value, whichever variant holds it.
    pub fn downcast<T: 'static>(self) -> Option<T> {
        let boxed: Box<dyn Any> = match self {
            Value::Str(v) => Box::new(v),
            Value::Int(v) => Box::new(v),
            Value::Float(v) => Box::new(v),
            Value::Bool(v) => Box::new(v),
            Value::Byte(v) => Box::new(v),
            Value::Other(v) => v,
        };
        boxed.downcast::<T>().ok().map(|v| *v)
    }

    /// Variant label for diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Str(_) => "string",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Bool(_) => "bool",
            Value::Byte(_) => "byte",
            Value::Other(_) => "other",
        }
    }
}

impl std::fmt::Debug for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Str(v) => f.debug_tuple("Str").field(v).finish(),
            Value::Int(v) => f.debug_tuple("Int").field(v).finish(),
            Value::Float(v) => f.debug_tuple("Float").field(v).finish(),
            Value::Bool(v) => f.debug_tuple("Bool").field(v).finish(),
            Value::Byte(v) => f.debug_tuple("Byte").field(v).finish(),
            Value::Other(_) => f.write_str("Other(..)"),
        }
    }
}

/// Converter from raw text to one semantic value type.
///
/// Implementations must be total: return the type's default for input they
/// cannot parse.
pub trait TypeReader {
    fn read(&self, input: &str) -> Value;
}

impl<F> TypeReader for F
where
    F: Fn(&str) -> Value,
{
    fn read(&self, input: &str) -> Value {
        self(input)
    }
}

/// Default reader for `string`: the input unchanged, including empty.
pub struct StringReader;

impl TypeReader for StringReader {
    fn read(&self, input: &str) -> Value {
        Value::Str(input.to_string())
    }
}

/// Default reader for `int`: locale-invariant parse, 0 on failure.
pub struct IntReader;

impl TypeReader for IntReader {
    fn read(&self, input: &str) -> Value {
        Value::Int(input.trim().parse().unwrap_or(0))
    }
}

/// Default reader for `float`: locale-invariant parse, 0.0 on failure.
pub struct FloatReader;

impl TypeReader for FloatReader {
    fn read(&self, input: &str) -> Value {
        Value::Float(input.trim().parse().unwrap_or(0.0))
    }
}

/// Default reader for `bool`: case-insensitive true/false, false on failure.
pub struct BoolReader;

impl TypeReader for BoolReader {
    fn read(&self, input: &str) -> Value {
        Value::Bool(input.trim().to_ascii_lowercase().parse().unwrap_or(false))
    }
}

/// Default reader for `byte`: locale-invariant parse, 0 on failure.
pub struct ByteReader;

impl TypeReader for ByteReader {
    fn read(&self, input: &str) -> Value {
        Value::Byte(input.trim().parse().unwrap_or(0))
    }
}

/// Mapping from semantic type name to reader.
///
/// `register` is insert-or-replace with no error on override - last write
/// wins. The registry lives in the [`CommandLine`](crate::CommandLine)
/// context and persists across `init` calls.
pub struct ReaderRegistry {
    readers: IndexMap<String, Box<dyn TypeReader>>,
}

impl ReaderRegistry {
    /// Empty registry with no readers at all.
    pub fn empty() -> Self {
        Self {
            readers: IndexMap::new(),
        }
    }

    /// Registry seeded with the five default readers.
    pub fn with_defaults() -> Self {
        let mut registry = Self::empty();
        registry.register(type_name::STRING, Box::new(StringReader));
        registry.register(type_name::INT, Box::new(IntReader));
        registry.register(type_name::FLOAT, Box::new(FloatReader));
        registry.register(type_name::BOOL, Box::new(BoolReader));
        registry.register(type_name::BYTE, Box::new(ByteReader));
        registry
    }

    /// Insert or replace the reader for a semantic type.
    pub fn register(&mut self, type_name: impl Into<String>, reader: Box<dyn TypeReader>) {
        self.readers.insert(type_name.into(), reader);
    }

    /// Remove the reader for a semantic type, if any.
    pub fn unregister(&mut self, type_name: &str) -> bool {
        self.readers.shift_remove(type_name).is_some()
    }

    pub fn lookup(&self, type_name: &str) -> Option<&dyn TypeReader> {
        self.readers.get(type_name).map(|r| r.as_ref())
    }
}

impl Default for ReaderRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}
