//! Application target selection.
//!
//! Decides which applications of a manifest a command operates on:
//! - [`paths`]: matches a query path to the application containing it
//! - [`order`]: orders all applications so dependencies come first
//! - [`select`]: picks single-target or whole-manifest mode

pub mod order;
pub mod paths;
pub mod select;
mod types;

pub use order::order_by_deps;
pub use select::{SelectRequest, each_app, select};
pub use types::*;
