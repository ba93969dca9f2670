use serde::{Deserialize, Serialize};

use super::chain::bound_years;
use crate::workflows::underwriting::domain::{Submission, SubmissionId};

/// Why no loss ratio could be produced. Input incompleteness is reported as
/// data, not raised: callers branch on the assessment variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoDataReason {
    NoBoundPolicy,
    MissingBoundPremium,
}

impl NoDataReason {
    pub const fn summary(self) -> &'static str {
        match self {
            NoDataReason::NoBoundPolicy => "no bound policy exists for this submission yet",
            NoDataReason::MissingBoundPremium => "the evaluated policy has no bound premium",
        }
    }
}

/// Multi-year experience across the renewal chain. Aggregated as total losses
/// over total earned premium, not an average of per-year ratios, so a
/// low-premium year cannot swing the result.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MultiYearLossRatio {
    pub years: usize,
    pub total_premium: u64,
    pub total_paid: u64,
    pub total_incurred: u64,
    pub paid_loss_ratio: f64,
    pub incurred_loss_ratio: f64,
}

/// Loss experience for the evaluated (expiring or self) policy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LossRatioReport {
    pub evaluated: SubmissionId,
    pub claim_count: usize,
    pub total_paid: u64,
    pub total_reserved: u64,
    pub total_incurred: u64,
    pub earned_premium: u64,
    pub paid_loss_ratio: f64,
    pub incurred_loss_ratio: f64,
    pub multi_year: Option<MultiYearLossRatio>,
    pub experience_factor: f64,
}

impl LossRatioReport {
    /// Ratio the experience factor was derived from: multi-year incurred when
    /// two or more bound years exist, else the single-year incurred ratio.
    pub fn reference_loss_ratio(&self) -> f64 {
        self.multi_year
            .map(|aggregate| aggregate.incurred_loss_ratio)
            .unwrap_or(self.incurred_loss_ratio)
    }
}

/// Outcome of the loss-ratio calculator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum LossRatioAssessment {
    Report(LossRatioReport),
    NoData(NoDataReason),
}

/// Walk a materialized renewal chain (newest first, `chain[0]` being the
/// submission under renewal) and derive the loss experience of the policy it
/// renews.
pub fn calculate_loss_ratio(chain: &[Submission]) -> LossRatioAssessment {
    let current = match chain.first() {
        Some(submission) => submission,
        None => return LossRatioAssessment::NoData(NoDataReason::NoBoundPolicy),
    };

    // Evaluate the expiring prior when one exists; otherwise the submission
    // itself must already be bound.
    let evaluated_index = if current.prior_submission_id.is_some() {
        1
    } else if current.is_bound() {
        0
    } else {
        return LossRatioAssessment::NoData(NoDataReason::NoBoundPolicy);
    };

    let evaluated = match chain.get(evaluated_index) {
        Some(submission) => submission,
        None => return LossRatioAssessment::NoData(NoDataReason::NoBoundPolicy),
    };

    let earned_premium = match evaluated.bound_premium() {
        Some(premium) => premium,
        None => return LossRatioAssessment::NoData(NoDataReason::MissingBoundPremium),
    };

    let claim_count = evaluated.loss_history.len();
    let total_paid: u64 = evaluated.loss_history.iter().map(|record| record.paid).sum();
    let total_reserved: u64 = evaluated
        .loss_history
        .iter()
        .map(|record| record.reserve)
        .sum();
    let total_incurred = total_paid + total_reserved;

    let paid_loss_ratio = ratio(total_paid, earned_premium);
    let incurred_loss_ratio = ratio(total_incurred, earned_premium);

    let years = bound_years(&chain[evaluated_index..]);
    let multi_year = if years.len() >= 2 {
        let total_premium: u64 = years.iter().map(|year| year.premium).sum();
        let paid: u64 = years.iter().map(|year| year.paid).sum();
        let incurred: u64 = years.iter().map(|year| year.incurred).sum();
        Some(MultiYearLossRatio {
            years: years.len(),
            total_premium,
            total_paid: paid,
            total_incurred: incurred,
            paid_loss_ratio: ratio(paid, total_premium),
            incurred_loss_ratio: ratio(incurred, total_premium),
        })
    } else {
        None
    };

    let reference = multi_year
        .map(|aggregate| aggregate.incurred_loss_ratio)
        .unwrap_or(incurred_loss_ratio);

    LossRatioAssessment::Report(LossRatioReport {
        evaluated: evaluated.id.clone(),
        claim_count,
        total_paid,
        total_reserved,
        total_incurred,
        earned_premium,
        paid_loss_ratio,
        incurred_loss_ratio,
        multi_year,
        experience_factor: experience_factor(reference),
    })
}

/// Fixed experience-factor schedule. Lower-inclusive half-open tiers, except
/// that a ratio of exactly zero (no claims) is its own tier with a smaller
/// credit than the excellent-but-nonzero band.
pub fn experience_factor(incurred_loss_ratio: f64) -> f64 {
    if incurred_loss_ratio <= 0.0 {
        return -0.10;
    }
    if incurred_loss_ratio < 0.20 {
        return -0.15;
    }
    if incurred_loss_ratio < 0.30 {
        return -0.10;
    }
    if incurred_loss_ratio < 0.40 {
        return -0.05;
    }
    if incurred_loss_ratio < 0.50 {
        return 0.0;
    }
    if incurred_loss_ratio < 0.60 {
        return 0.05;
    }
    if incurred_loss_ratio < 0.70 {
        return 0.10;
    }
    // The formula continues the +0.15 tier continuously at 0.80; taking the
    // boundary here keeps the factor exact instead of 0.5 * 0.30 in floats.
    if incurred_loss_ratio <= 0.80 {
        return 0.15;
    }
    (0.5 * (incurred_loss_ratio - 0.50)).min(0.30)
}

fn ratio(losses: u64, earned_premium: u64) -> f64 {
    if earned_premium == 0 {
        return 0.0;
    }
    round4(losses as f64 / earned_premium as f64)
}

fn round4(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}
