pub mod adapter;
pub mod config;
pub mod context;
pub mod error;
pub mod external;
pub mod number;
pub mod pipeline;
pub mod port;
pub mod registry;
pub mod signal;
pub mod value;

#[doc(hidden)]
pub mod test_utils;

// Re-export commonly used types for convenience
pub use adapter::{Builtin, Rest};
pub use context::{Context, Env};
pub use error::BuiltinError;
pub use registry::Registry;
pub use signal::{Flow, Signal};
pub use value::{Closure, List, Map, TypeTag, Value};
