//! Infrastructure layer
//!
//! Concrete adapters for the outbound ports.

pub mod persistence;

pub use persistence::InMemoryLeadRepository;
