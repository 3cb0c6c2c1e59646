//! argbind library interface
//!
//! Declarative `-flag value` binding for embedded applications: declare
//! which flags write which slots (or trigger which actions), then hand the
//! process argument vector to [`CommandLine::init`]. One malformed flag
//! degrades that one binding; it never aborts the run.
//!
//! # Module Organization
//!
//! - [`errors`] - Configuration error types (BindError, Result)
//! - [`readers`] - Type conversion registry (TypeReader, ReaderRegistry, Value)
//! - [`bindings`] - Binding declarations (ArgumentBinding, CommandBinding, Slot)
//! - [`tokenizer`] - Argument vector scan and flag matching
//! - [`binder`] - Apply/dispatch pass and the InitReport
//! - [`parser`] - The CommandLine entry point
//!
//! # Example
//!
//! ```
//! use argbind::{ArgumentBinding, CommandLine, Slot};
//!
//! let name = Slot::new(String::new());
//! let count = Slot::new(0i64);
//!
//! let mut cli = CommandLine::new();
//! cli.argument(ArgumentBinding::new("name", "player name", &name)?);
//! cli.argument(ArgumentBinding::new("count", "spawn count", &count)?);
//!
//! let report = cli.init_with(["-name", "alice", "-count", "7"])?;
//! assert!(report.is_clean());
//! assert_eq!(name.get(), "alice");
//! assert_eq!(count.get(), 7);
//! # Ok::<(), argbind::BindError>(())
//! ```

pub mod binder;
pub mod bindings;
pub mod errors;
pub mod parser;
pub mod readers;
pub mod tokenizer;

pub use binder::{Failure, FailureKind, InitReport};
pub use bindings::{ArgumentBinding, BindTarget, CommandBinding, EnumRepr, Slot};
pub use errors::{BindError, BindingKind, Result};
pub use parser::CommandLine;
pub use readers::{ReaderRegistry, TypeReader, Value};
