//! LeadOps Common - Shared building blocks for the outreach core
//!
//! This crate provides the pieces both engines agree on:
//! - Entity identifiers
//! - Repository error type and the error taxonomy
//! - Configuration model (TOML)
//! - Tracing subscriber setup
//!
//! # Architecture
//!
//! The deduplication engine and the timing scheduler are pure computation
//! layers. Persistence is reached only through repository ports, whose
//! failures are described by [`RepositoryError`] and classified by
//! [`ErrorKind`].

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod domain;
pub mod error;
pub mod telemetry;

pub use config::*;
pub use domain::*;
pub use error::*;
