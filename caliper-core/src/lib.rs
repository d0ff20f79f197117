//! Caliper Core - Fundamental types
//!
//! This crate provides the types shared across Caliper:
//! - `CaliperError`: structured, user-displayable errors

mod error;

pub use error::{CaliperError, Severity, codes};
