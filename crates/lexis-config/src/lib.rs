//! # Lexis Config
//!
//! Type-safe configuration for hosts embedding lexis catalogs.
//!
//! This crate provides the configuration schema, defaults, TOML loading with
//! environment overrides, and validation.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod defaults;
pub mod loader;
pub mod schema;
pub mod validator;

pub use defaults::*;
pub use loader::*;
pub use schema::*;
pub use validator::*;
