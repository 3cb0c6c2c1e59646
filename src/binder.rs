//! Applying matched flags to bindings and dispatching commands
//!
//! Every binding is isolated: a missing reader, a mismatched value, or a
//! failing action degrades that one binding and the pass moves on. Argument
//! bindings complete before any command is dispatched, and both run in
//! registration order, not input order.

use thiserror::Error;
use tracing::{debug, warn};

use crate::bindings::{ArgumentBinding, CommandBinding};
use crate::readers::ReaderRegistry;
use crate::tokenizer::Matches;

/// Why one binding was skipped or failed. The pass itself never fails on
/// these.
#[derive(Error, Debug)]
pub enum FailureKind {
    #[error("No reader registered for type '{type_name}'")]
    UnsupportedType { type_name: String },

    #[error("Reader for type '{type_name}' produced a value the slot cannot hold")]
    ValueMismatch { type_name: String },

    #[error("Command action failed: {message}")]
    ActionFailed { message: String },
}

/// One per-binding failure, reported rather than raised.
#[derive(Debug)]
pub struct Failure {
    /// Name of the binding that failed.
    pub binding: String,
    pub kind: FailureKind,
}

/// Structured outcome of one `init` pass.
///
/// This is the reporting surface: the engine records what happened and
/// emits `tracing` events, but never formats or prints anything itself.
#[derive(Debug, Default)]
pub struct InitReport {
    /// Argument bindings whose slot was written, in application order.
    pub applied: Vec<String>,
    /// Command bindings whose action ran to completion, in dispatch order.
    pub dispatched: Vec<String>,
    /// Per-binding failures. Never fatal to the pass.
    pub failures: Vec<Failure>,
}

impl InitReport {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    fn fail(&mut self, binding: &str, kind: FailureKind) {
        warn!(binding = %binding, %kind, "Binding failed");
        self.failures.push(Failure {
            binding: binding.to_string(),
            kind,
        });
    }
}

/// Apply every matched argument binding, in registration order.
pub(crate) fn apply_arguments(
    registry: &ReaderRegistry,
    bindings: &mut [ArgumentBinding],
    matches: &Matches,
    report: &mut InitReport,
) {
    for binding in bindings {
        let raw = match matches.arguments.get(binding.name()) {
            Some(Some(raw)) => raw,
            Some(None) => {
                // Flag present without a value: the slot keeps its prior
                // value.
                debug!(binding = %binding.name(), "Flag present with no value, slot unchanged");
                continue;
            }
            None => continue,
        };

        let reader = match registry.lookup(binding.type_name()) {
            Some(reader) => reader,
            None if binding.is_enum() => {
                // Enum bindings resolve their underlying integer reader;
                // if it is gone they are skipped without a report entry.
                debug!(binding = %binding.name(), "Underlying int reader unavailable, skipping enum binding");
                continue;
            }
            None => {
                report.fail(
                    binding.name(),
                    FailureKind::UnsupportedType {
                        type_name: binding.type_name().to_string(),
                    },
                );
                continue;
            }
        };

        let value = reader.read(raw);
        debug!(binding = %binding.name(), raw = %raw, value = ?value, "Converted flag value");

        if binding.store(value) {
            report.applied.push(binding.name().to_string());
        } else {
            let type_name = binding.type_name().to_string();
            report.fail(binding.name(), FailureKind::ValueMismatch { type_name });
        }
    }
}

/// Dispatch every present command binding, in registration order.
pub(crate) fn dispatch_commands(
    bindings: &mut [CommandBinding],
    matches: &Matches,
    report: &mut InitReport,
) {
    for binding in bindings {
        if !matches.commands.contains(binding.name()) {
            continue;
        }

        match binding.invoke() {
            Ok(()) => {
                debug!(command = %binding.name(), "Dispatched command");
                report.dispatched.push(binding.name().to_string());
            }
            Err(err) => {
                report.fail(
                    binding.name(),
                    FailureKind::ActionFailed {
                        message: err.to_string(),
                    },
                );
            }
        }
    }
}
