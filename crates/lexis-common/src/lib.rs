//! # Lexis Common
//!
//! Shared types, error handling, logging setup and test utilities used by
//! every crate in the lexis workspace.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod logging;
pub mod types;
pub mod utils;

#[cfg(any(test, feature = "testing"))]
pub mod test_utils;

pub use error::{LexisError, Result};
pub use logging::{init_default_logging, init_logging, LoggingConfig};
pub use types::*;
pub use utils::*;
