//! Value Objects module
//!
//! Immutable, normalized contact primitives.

pub mod contact_field;
pub mod email;
pub mod phone;
pub mod scope;

pub use contact_field::FieldStatus;
pub use email::{EmailAddress, EmailError};
pub use leadops_common::EntityId;
pub use phone::{PhoneError, PhoneNumber};
pub use scope::AnalysisScope;
