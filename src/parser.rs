//! The `CommandLine` context: registry ownership and the init pipeline
//!
//! Each `init` call is an independent discover -> tokenize -> apply pass.
//! Only the reader registry survives between calls; there is no cursor or
//! partial state to leak out of a failed pass.

use std::collections::HashSet;

use tracing::debug;

use crate::binder::{apply_arguments, dispatch_commands, InitReport};
use crate::bindings::{ArgumentBinding, CommandBinding};
use crate::errors::{BindError, BindingKind, Result};
use crate::readers::{ReaderRegistry, TypeReader};
use crate::tokenizer::scan;

/// Process-wide binder context.
///
/// Owns the type-reader registry (seeded with defaults before any embedding
/// code runs) and the declared bindings. Registration order is the
/// discovery order: arguments are applied and commands dispatched in the
/// order they were declared, and all argument bindings complete before the
/// first command runs.
pub struct CommandLine {
    readers: ReaderRegistry,
    arguments: Vec<ArgumentBinding>,
    commands: Vec<CommandBinding>,
}

impl CommandLine {
    /// New context with the default readers registered.
    pub fn new() -> Self {
        Self {
            readers: ReaderRegistry::with_defaults(),
            arguments: Vec::new(),
            commands: Vec::new(),
        }
    }

    /// Extend or override conversion for a semantic type. Last write wins;
    /// the change affects subsequent `init` calls, never values already
    /// applied.
    pub fn register_reader(&mut self, type_name: impl Into<String>, reader: Box<dyn TypeReader>) {
        self.readers.register(type_name, reader);
    }

    /// Remove the reader for a semantic type.
    pub fn unregister_reader(&mut self, type_name: &str) -> bool {
        self.readers.unregister(type_name)
    }

    /// Declare an argument binding.
    pub fn argument(&mut self, binding: ArgumentBinding) -> &mut Self {
        self.arguments.push(binding);
        self
    }

    /// Declare a command binding.
    pub fn command(&mut self, binding: CommandBinding) -> &mut Self {
        self.commands.push(binding);
        self
    }

    /// Parse the host process's own argument vector.
    ///
    /// The program name in `argv[0]` is not flag-shaped and falls out of
    /// the scan as an unrecognized token.
    pub fn init(&mut self) -> Result<InitReport> {
        self.init_with(std::env::args())
    }

    /// Parse an explicitly supplied argument vector. The primary entry
    /// point for tests.
    ///
    /// Returns `Err` only for configuration conflicts (duplicate binding
    /// names); per-binding runtime failures are reported through the
    /// [`InitReport`].
    pub fn init_with<I, S>(&mut self, args: I) -> Result<InitReport>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let argument_names = unique_names(
            self.arguments.iter().map(|b| b.name()),
            BindingKind::Argument,
        )?;
        let command_names =
            unique_names(self.commands.iter().map(|b| b.name()), BindingKind::Command)?;

        let args: Vec<String> = args.into_iter().map(Into::into).collect();
        debug!(
            tokens = args.len(),
            arguments = argument_names.len(),
            commands = command_names.len(),
            "Parsing argument vector"
        );

        let matches = scan(&args, &argument_names, &command_names);

        let mut report = InitReport::default();
        apply_arguments(&self.readers, &mut self.arguments, &matches, &mut report);
        dispatch_commands(&mut self.commands, &matches, &mut report);

        debug!(
            applied = report.applied.len(),
            dispatched = report.dispatched.len(),
            failures = report.failures.len(),
            "Init pass complete"
        );
        Ok(report)
    }
}

impl Default for CommandLine {
    fn default() -> Self {
        Self::new()
    }
}

/// Collect binding names for one kind, failing the pass on the first
/// duplicate. Two independently written modules must not silently fight
/// over the same flag.
fn unique_names<'a>(
    names: impl Iterator<Item = &'a str>,
    kind: BindingKind,
) -> Result<HashSet<String>> {
    let mut set = HashSet::new();
    for name in names {
        if !set.insert(name.to_string()) {
            return Err(BindError::DuplicateBinding {
                name: name.to_string(),
                kind,
            });
        }
    }
    Ok(set)
}
