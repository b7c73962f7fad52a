//! Domain services module

pub mod analysis;
pub mod classification;
pub mod removal_plan;

pub use analysis::{AnalysisReport, DuplicateAnalyzer, DuplicateField, DuplicateGroup, InvalidRecord, LeadIssues};
pub use classification::{Contactability, IssueKind, LeadClassifier, LeadQuality};
pub use removal_plan::{GroupRemoval, RemovalPlan};
