//! Underwriting decision engine for insurance submissions.
//!
//! Three decision components share one submission data model: the coverage
//! schedule resolver (symbolic configuration to concrete dollar limits), the
//! bind readiness validator (itemized pass/fail verdicts gating the bind
//! transition), and the renewal pricing pipeline (loss-ratio calculator
//! feeding the rate recommender). The engine is pure business logic over
//! records the caller assembles; UI, storage, and document pipelines are
//! external collaborators behind the `SubmissionStore` and `CatalogProvider`
//! seams.

pub mod config;
pub mod workflows;

pub use workflows::underwriting::{
    BindReadiness, CoverageCatalog, CoverageSchedule, EngineError, LossRatioAssessment,
    PolicyForm, RateAssessment, Submission, SubmissionId, SubmissionStore, UnderwritingService,
    ValidationResult,
};
