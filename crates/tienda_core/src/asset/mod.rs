//! Binary asset storage under a configured content root.
//!
//! # Responsibility
//! - Validate, name, persist and delete uploaded files.
//!
//! # Invariants
//! - This layer has no knowledge of entities or row identity; it stores
//!   path-addressed blobs only.
//! - Validation never touches disk.

pub mod store;
