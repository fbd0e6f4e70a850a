//! # regmock-common
//!
//! Shared error definitions, response payload types, and lifecycle
//! configuration for the regmock workspace.
//!
//! This crate is the leaf of the dependency graph — it depends on no other
//! internal crate and provides the primitives the server crate builds upon.

pub mod config;
pub mod error;
pub mod types;
