//! Deployment manifest types and storage.
//!
//! A manifest declares the applications of a deployment, keyed by their path
//! relative to the manifest file's directory. Target selection only reads
//! manifests; `Manifest::set_app_field` and `store::save` handle edits.

pub mod store;
mod types;

pub use types::*;
