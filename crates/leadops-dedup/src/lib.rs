//! LeadOps Deduplication & Data-Quality Engine
//!
//! Identity resolution across noisy lead records, following Domain-Driven
//! Design and hexagonal architecture.
//!
//! ## Architecture
//!
//! - **Domain Layer**: lead aggregate, normalized phone/email value objects,
//!   classification, duplicate analysis and removal planning (all pure)
//! - **Application Layer**: `DeduplicationService`, removal results
//! - **Ports Layer**: `LeadRepository` (outbound), `LeadQualityUseCases` (inbound)
//! - **Infrastructure Layer**: in-memory lead store
//!
//! ## Features
//!
//! - Phone and email normalization with placeholder handling
//! - Contactability buckets and data-quality issue tagging
//! - Duplicate groups by normalized phone and email, scoped per campaign or
//!   account-wide
//! - Best-effort bulk remediation: collapse duplicates, delete uncontactable
//!   leads, skip leads protected by referential constraints

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod ports;

// Re-exports for convenience
pub use application::{BatchFailure, DedupError, DeduplicationService, RemovalOutcome, RemovalResult, SkippedLead};
pub use domain::aggregates::Lead;
pub use domain::services::{
    AnalysisReport, Contactability, DuplicateAnalyzer, DuplicateField, DuplicateGroup, IssueKind,
    LeadClassifier, LeadQuality, RemovalPlan,
};
pub use domain::value_objects::{AnalysisScope, EmailAddress, EntityId, FieldStatus, PhoneNumber};
pub use infrastructure::InMemoryLeadRepository;
pub use ports::inbound::LeadQualityUseCases;
pub use ports::outbound::LeadRepository;
