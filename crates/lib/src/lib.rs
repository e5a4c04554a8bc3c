//! stackup-lib: Core types and logic for stackup
//!
//! This crate decides which applications of a deployment manifest a command
//! acts on, and in what order:
//! - `Manifest`: the declared applications, keyed by relative path
//! - `target::paths`: lexical matching of a query path to one application
//! - `target::order`: dependency-first ordering with cycle detection
//! - `target::select`: single-target vs whole-manifest selection

pub mod consts;
pub mod manifest;
pub mod target;
#[cfg(test)]
mod util;
