pub mod builtins;
pub mod store;

use once_cell::sync::Lazy;
use pipit_core::error::RegistryError;
use pipit_core::{Builtin, Registry};

// Re-export builtins for convenience
pub use builtins::*;
pub use store::MemoryDirStore;

/// Build the standard builtin table.
///
/// Registration order is fixed, so [`Registry::names`] lists builtins the
/// same way on every run.
pub fn standard_registry() -> Result<Registry, RegistryError> {
    let table = [
        // Values
        Builtin::raw(":", builtin_nop),
        Builtin::raw("true", builtin_nop),
        Builtin::raw("put", builtin_put),
        Builtin::variadic("put-all", builtin_put_all),
        Builtin::fixed("unpack", builtin_unpack),
        Builtin::raw("typeof", builtin_typeof),
        Builtin::fixed("rat", builtin_rat),
        Builtin::raw("=", builtin_eq),
        // Byte stream and view conversion
        Builtin::variadic("print", builtin_print),
        Builtin::variadic("println", builtin_println),
        Builtin::fixed("into-lines", builtin_into_lines),
        Builtin::fixed("from-lines", builtin_from_lines),
        Builtin::fixed("from-json", builtin_from_json),
        Builtin::fixed("-stack", builtin_stack),
        // Control flow
        Builtin::fixed("failure", builtin_failure),
        Builtin::fixed("return", builtin_return),
        Builtin::fixed("break", builtin_break),
        Builtin::fixed("continue", builtin_continue),
        Builtin::fixed("each", builtin_each),
        // Arithmetic
        Builtin::variadic("+", builtin_plus),
        Builtin::variadic("-", builtin_minus),
        Builtin::variadic("*", builtin_times),
        Builtin::variadic("/", builtin_divide),
        // Directories
        Builtin::raw("cd", builtin_cd),
        Builtin::fixed("visited-dirs", builtin_visited_dirs),
        Builtin::fixed("jump-dir", builtin_jump_dir),
        // Host collaborators
        Builtin::fixed("bind", builtin_bind),
        Builtin::variadic("le", builtin_le),
        Builtin::fixed("source", builtin_source),
    ];

    let mut registry = Registry::new();
    for builtin in table {
        registry.register(builtin)?;
    }
    tracing::debug!(count = registry.len(), "standard builtins registered");
    Ok(registry)
}

static STANDARD: Lazy<Registry> = Lazy::new(|| {
    standard_registry().unwrap_or_else(|err| panic!("invalid standard builtin table: {err}"))
});

/// The process-wide standard registry, built on first use.
pub fn registry() -> &'static Registry {
    &STANDARD
}
