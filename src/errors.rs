//! Error types for argbind

use thiserror::Error;

/// Which binding table a flag name belongs to.
///
/// Duplicate detection runs independently for each kind: an argument
/// binding and a command binding may legally share a name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindingKind {
    Argument,
    Command,
}

impl std::fmt::Display for BindingKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BindingKind::Argument => write!(f, "argument"),
            BindingKind::Command => write!(f, "command"),
        }
    }
}

/// Configuration errors - these indicate a broken build-time setup, not bad
/// runtime input, and are the only errors `init` ever returns.
#[derive(Error, Debug)]
pub enum BindError {
    #[error("Binding name must not be empty or whitespace-only")]
    EmptyName,

    #[error("Duplicate {kind} binding name: -{name}")]
    DuplicateBinding { name: String, kind: BindingKind },
}

pub type Result<T> = std::result::Result<T, BindError>;
