//! Underwriting decision engine: coverage schedule resolution, bind readiness
//! validation, and renewal pricing over one shared submission data model.
//!
//! Everything here is synchronous, side-effect-free computation over records
//! the caller supplies. The one seam to the outside is the `SubmissionStore`
//! trait, which the data-access layer implements; the engine never issues its
//! own queries and never caches.

pub mod bind;
pub mod coverage;
pub mod domain;
pub mod renewal;
pub mod repository;
pub mod service;

#[cfg(test)]
mod tests;

pub use bind::{
    bind_readiness, validate_can_bind, BindReadiness, BindRuleCode, QuoteReadiness, QuoteTab,
    ValidationIssue, ValidationResult,
};
pub use coverage::{
    CatalogError, CatalogFile, CatalogProvider, CoverageCatalog, CoverageChange,
    CoverageChangeSet, CoverageClass, CoverageDefinition, CoverageInput, CoverageSchedule,
    FixedCatalog, PolicyForm, SymbolicCoverageValue,
};
pub use domain::{
    AccountRef, BrokerContact, ClaimStatus, LossRecord, StatusConflict, Subjectivity,
    SubjectivityStatus, Submission, SubmissionId, SubmissionOutcome, SubmissionStatus, Tower,
    TowerId, TowerLayer, TowerPosition,
};
pub use renewal::{
    calculate_loss_ratio, recommend_renewal_rate, LossRatioAssessment, LossRatioReport,
    MultiYearLossRatio, NoDataReason, RateAssessment, RateRecommendation, RenewalError,
};
pub use repository::{StoreError, SubmissionStore};
pub use service::{EngineError, UnderwritingService};
