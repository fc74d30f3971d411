//! # safenav — Null-Safe Navigation for Dynamic Values
//!
//! Chainable property access over loosely structured data that never panics:
//! absence flows through the chain as a normal state and is only observed
//! when the caller unwraps.
//!
//! ## Design Principles
//!
//! 1. **Absence is a value, not an error**: a missing key, an out-of-range
//!    index, and `Value::Null` all navigate to the same absent state
//! 2. **Unwrap is identity**: `resolve()` hands back the very reference that
//!    was wrapped, with no coercion and no copying
//! 3. **Per-segment laziness**: each `get` reads exactly one level deeper;
//!    nothing is batched, nothing is memoized
//! 4. **Receiver-correct callables**: a function pulled off a map stays
//!    bound to the map it came from
//!
//! ## Quick Start
//!
//! ```rust
//! use safenav::{wrap, Value};
//!
//! let profile = Value::from(vec![
//!     ("user", Value::from(vec![("name", "Ada"), ("city", "London")])),
//! ]);
//!
//! // Present path: unwrap sees the real value.
//! let name = wrap(&profile).get("user").get("name").resolve();
//! assert_eq!(name, Some(&Value::from("Ada")));
//!
//! // Missing path: arbitrarily deep, never panics.
//! let nope = wrap(&profile).get("non").get("existent").get("property").resolve();
//! assert_eq!(nope, None);
//!
//! // Typed extraction with a proper error channel.
//! let city: String = wrap(&profile).get("user").get("city").resolve_as().unwrap();
//! assert_eq!(city, "London");
//! ```
//!
//! ## Navigation Surfaces
//!
//! | Surface | Operation | Failure mode |
//! |---------|-----------|--------------|
//! | `get` / `at` | one navigation step | none; absence flows forward |
//! | `resolve` | unwrap the raw value | none; `None` means absent |
//! | `resolve_as::<T>` | unwrap + convert | `NotFound` / `TypeError` |
//! | `call` | invoke a callable target | `NotCallable` / `CallError` |
//! | `at_path` | textual path (`a.b[2].c`) | `PathSyntax` |

// ============================================================================
// Modules
// ============================================================================

pub mod model;
pub mod nav;
pub mod path;
pub mod json;

// ============================================================================
// Re-exports: Model (the dynamic values)
// ============================================================================

pub use model::{Value, Map, Func};

// ============================================================================
// Re-exports: Navigation
// ============================================================================

pub use nav::{wrap, Nav, FromValue};

// ============================================================================
// Re-exports: Textual paths
// ============================================================================

pub use path::{parse_path, Segment, Segments};

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Path syntax error at position {position}: {message}")]
    PathSyntax { position: usize, message: String },

    #[error("Type error: expected {expected}, got {got}")]
    TypeError { expected: String, got: String },

    #[error("Not callable: {got}")]
    NotCallable { got: String },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Call error: {0}")]
    CallError(String),
}

pub type Result<T> = std::result::Result<T, Error>;
