use std::sync::Arc;

use super::bind::{bind_readiness, validate_can_bind, BindReadiness, ValidationResult};
use super::coverage::{
    resolve, CatalogError, CatalogProvider, CoverageSchedule, PolicyForm,
};
use super::domain::{Submission, SubmissionId, Tower, TowerId};
use super::renewal::{
    load_chain, recommend_renewal_rate, LossRatioAssessment, RateAssessment, RenewalError,
    DEFAULT_TREND_FACTOR,
};
use super::repository::{StoreError, SubmissionStore};

/// Service composing the submission store, the coverage catalog provider, and
/// the decision components. Every call is a short, synchronous computation
/// over data fetched fresh from the store; nothing is cached here, so a
/// caller that mutates a quote simply calls again.
pub struct UnderwritingService<S, C> {
    store: Arc<S>,
    catalog: Arc<C>,
    trend_factor: f64,
}

impl<S, C> UnderwritingService<S, C>
where
    S: SubmissionStore + 'static,
    C: CatalogProvider + 'static,
{
    pub fn new(store: Arc<S>, catalog: Arc<C>) -> Self {
        Self::with_trend_factor(store, catalog, DEFAULT_TREND_FACTOR)
    }

    pub fn with_trend_factor(store: Arc<S>, catalog: Arc<C>, trend_factor: f64) -> Self {
        Self {
            store,
            catalog,
            trend_factor,
        }
    }

    /// Materialize a concrete coverage schedule for a form and limit.
    /// The catalog is fetched from the provider per call, so catalog edits
    /// take effect without restarting the caller.
    pub fn resolve_coverages(
        &self,
        policy_form: PolicyForm,
        aggregate_limit: u64,
    ) -> Result<CoverageSchedule, EngineError> {
        let catalog = self.catalog.catalog()?;
        Ok(resolve(&catalog, policy_form, aggregate_limit))
    }

    /// The canonical schedule for one stored quote, with the legacy coverage
    /// payload migrated on read.
    pub fn quote_schedule(
        &self,
        submission_id: &SubmissionId,
        tower_id: &TowerId,
    ) -> Result<CoverageSchedule, EngineError> {
        let submission = self.fetch_submission(submission_id)?;
        let tower = find_tower(&submission, tower_id)?;
        let catalog = self.catalog.catalog()?;
        Ok(tower
            .coverages
            .normalize(&catalog, tower.policy_form, tower.aggregate_limit))
    }

    /// Bind readiness verdict for one quote tower.
    pub fn validate_quote(
        &self,
        submission_id: &SubmissionId,
        tower_id: &TowerId,
    ) -> Result<ValidationResult, EngineError> {
        let submission = self.fetch_submission(submission_id)?;
        let tower = find_tower(&submission, tower_id)?;
        let result = validate_can_bind(&submission, tower);
        tracing::info!(
            submission = %submission_id.0,
            tower = %tower_id.0,
            can_bind = result.can_bind,
            errors = result.errors.len(),
            warnings = result.warnings.len(),
            "bind readiness evaluated"
        );
        Ok(result)
    }

    /// Per-quote readiness across the whole submission.
    pub fn bind_readiness(
        &self,
        submission_id: &SubmissionId,
    ) -> Result<BindReadiness, EngineError> {
        let submission = self.fetch_submission(submission_id)?;
        let readiness = bind_readiness(&submission);
        tracing::info!(
            submission = %submission_id.0,
            any_can_bind = readiness.any_can_bind,
            quotes = readiness.quotes.len(),
            "submission bind readiness evaluated"
        );
        Ok(readiness)
    }

    /// Loss experience for the policy this submission renews.
    pub fn loss_ratio(
        &self,
        submission_id: &SubmissionId,
    ) -> Result<LossRatioAssessment, EngineError> {
        let chain = self.load_chain(submission_id)?;
        let assessment = super::renewal::calculate_loss_ratio(&chain);
        if let LossRatioAssessment::Report(report) = &assessment {
            tracing::debug!(
                submission = %submission_id.0,
                incurred_loss_ratio = report.incurred_loss_ratio,
                experience_factor = report.experience_factor,
                "loss ratio calculated"
            );
        }
        Ok(assessment)
    }

    /// Renewal premium recommendation, using the service trend factor unless
    /// the caller overrides it.
    pub fn renewal_rate(
        &self,
        submission_id: &SubmissionId,
        proposed_premium: Option<u64>,
        trend_factor: Option<f64>,
    ) -> Result<RateAssessment, EngineError> {
        let chain = self.load_chain(submission_id)?;
        let trend = trend_factor.unwrap_or(self.trend_factor);
        let assessment = recommend_renewal_rate(&chain, proposed_premium, trend);
        if let RateAssessment::Recommendation(recommendation) = &assessment {
            tracing::info!(
                submission = %submission_id.0,
                expiring = recommendation.expiring_premium,
                recommended = recommendation.recommended_premium,
                rate_change = recommendation.rate_change_from_expiring,
                "renewal rate recommended"
            );
        }
        Ok(assessment)
    }

    fn fetch_submission(&self, submission_id: &SubmissionId) -> Result<Submission, EngineError> {
        self.store
            .fetch(submission_id)?
            .ok_or_else(|| EngineError::SubmissionNotFound(submission_id.clone()))
    }

    fn load_chain(&self, submission_id: &SubmissionId) -> Result<Vec<Submission>, EngineError> {
        let first = self.fetch_submission(submission_id)?;
        Ok(load_chain(self.store.as_ref(), first)?)
    }
}

fn find_tower<'a>(submission: &'a Submission, tower_id: &TowerId) -> Result<&'a Tower, EngineError> {
    submission
        .towers
        .iter()
        .find(|tower| &tower.id == tower_id)
        .ok_or_else(|| EngineError::QuoteNotFound(tower_id.clone()))
}

/// Error raised by the underwriting service for truly exceptional conditions.
/// Business-rule failures are data (`ValidationResult`, the assessments) and
/// never surface here.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("submission {} not found", .0 .0)]
    SubmissionNotFound(SubmissionId),
    #[error("quote {} not found", .0 .0)]
    QuoteNotFound(TowerId),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error(transparent)]
    Renewal(#[from] RenewalError),
}
