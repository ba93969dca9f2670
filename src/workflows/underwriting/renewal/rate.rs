use serde::{Deserialize, Serialize};

use super::loss_ratio::{calculate_loss_ratio, LossRatioAssessment, LossRatioReport, NoDataReason};
use crate::workflows::underwriting::domain::Submission;

/// Default year-over-year market trend applied to expiring premium.
pub const DEFAULT_TREND_FACTOR: f64 = 0.05;

const REVENUE_CHANGE_THRESHOLD: f64 = 0.10;
const REVENUE_CHANGE_WEIGHT: f64 = 0.5;
const EMPLOYEE_CHANGE_THRESHOLD: f64 = 0.15;
const EMPLOYEE_CHANGE_WEIGHT: f64 = 0.25;
const EXPOSURE_FACTOR_FLOOR: f64 = -0.15;
const EXPOSURE_FACTOR_CEILING: f64 = 0.25;

/// One labeled pricing factor, for display alongside the recommendation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateFactor {
    pub label: String,
    pub value: f64,
}

/// Recommended renewal pricing with its supporting justification. The
/// narrative order (claims, trend, exposure, multi-year) is part of the
/// contract: downstream display renders the lines verbatim, in order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateRecommendation {
    pub expiring_premium: u64,
    pub technical_premium: u64,
    pub recommended_premium: u64,
    pub trend_factor: f64,
    pub experience_factor: f64,
    pub exposure_factor: f64,
    pub rate_change_from_expiring: f64,
    pub rate_change_from_proposed: Option<f64>,
    pub factors: Vec<RateFactor>,
    pub narrative: Vec<String>,
    pub loss_ratio: LossRatioReport,
}

/// Outcome of the rate recommender.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RateAssessment {
    Recommendation(Box<RateRecommendation>),
    NoData(NoDataReason),
}

/// Recommend a renewal premium for the submission at the head of a
/// materialized renewal chain. Requires a successful loss-ratio calculation;
/// otherwise the calculator's reason is passed through untouched.
pub fn recommend_renewal_rate(
    chain: &[Submission],
    proposed_premium: Option<u64>,
    trend_factor: f64,
) -> RateAssessment {
    let report = match calculate_loss_ratio(chain) {
        LossRatioAssessment::Report(report) => report,
        LossRatioAssessment::NoData(reason) => return RateAssessment::NoData(reason),
    };

    let expiring_premium = report.earned_premium;
    let exposure = match (chain.first(), chain.get(1)) {
        (Some(current), Some(prior)) => exposure_adjustment(current, prior),
        _ => ExposureAdjustment::default(),
    };

    let experience_factor = report.experience_factor;
    let technical_premium = scale_premium(expiring_premium, 1.0 + trend_factor);
    let recommended_premium = scale_premium(
        expiring_premium,
        1.0 + trend_factor + experience_factor + exposure.factor,
    );

    let rate_change_from_expiring = percent_change(expiring_premium, recommended_premium);
    let rate_change_from_proposed =
        proposed_premium.map(|proposed| percent_change(proposed, recommended_premium));

    let mut factors = vec![
        RateFactor {
            label: "market trend".to_string(),
            value: trend_factor,
        },
        RateFactor {
            label: "loss experience".to_string(),
            value: experience_factor,
        },
    ];
    if exposure.factor != 0.0 {
        factors.push(RateFactor {
            label: "exposure change".to_string(),
            value: exposure.factor,
        });
    }

    let narrative = build_narrative(&report, trend_factor, &exposure);

    RateAssessment::Recommendation(Box::new(RateRecommendation {
        expiring_premium,
        technical_premium,
        recommended_premium,
        trend_factor,
        experience_factor,
        exposure_factor: exposure.factor,
        rate_change_from_expiring,
        rate_change_from_proposed,
        factors,
        narrative,
        loss_ratio: report,
    }))
}

#[derive(Debug, Clone, Copy, Default)]
struct ExposureAdjustment {
    factor: f64,
    revenue_change: Option<f64>,
    employee_change: Option<f64>,
}

/// Compare current against prior exposure. The thresholds keep noise-level
/// drift in revenue or headcount from moving the premium at all.
fn exposure_adjustment(current: &Submission, prior: &Submission) -> ExposureAdjustment {
    let mut adjustment = ExposureAdjustment::default();

    if let (Some(current_revenue), Some(prior_revenue)) =
        (current.annual_revenue, prior.annual_revenue)
    {
        if prior_revenue > 0 {
            let change = (current_revenue as f64 - prior_revenue as f64) / prior_revenue as f64;
            if change.abs() > REVENUE_CHANGE_THRESHOLD {
                adjustment.factor += REVENUE_CHANGE_WEIGHT * change;
                adjustment.revenue_change = Some(change);
            }
        }
    }

    if let (Some(current_count), Some(prior_count)) =
        (current.employee_count, prior.employee_count)
    {
        if prior_count > 0 {
            let change = (current_count as f64 - prior_count as f64) / prior_count as f64;
            if change.abs() > EMPLOYEE_CHANGE_THRESHOLD {
                adjustment.factor += EMPLOYEE_CHANGE_WEIGHT * change;
                adjustment.employee_change = Some(change);
            }
        }
    }

    adjustment.factor = adjustment
        .factor
        .clamp(EXPOSURE_FACTOR_FLOOR, EXPOSURE_FACTOR_CEILING);
    adjustment
}

fn build_narrative(
    report: &LossRatioReport,
    trend_factor: f64,
    exposure: &ExposureAdjustment,
) -> Vec<String> {
    let mut lines = Vec::new();

    if report.claim_count == 0 {
        lines.push("No reported claims on the expiring policy.".to_string());
    } else {
        lines.push(format!(
            "{} claim(s) with ${} incurred against ${} earned premium ({:.1}% incurred loss ratio).",
            report.claim_count,
            report.total_incurred,
            report.earned_premium,
            report.incurred_loss_ratio * 100.0
        ));
    }

    lines.push(format!(
        "Market trend applied at {:+.1}%.",
        trend_factor * 100.0
    ));

    if let Some(change) = exposure.revenue_change {
        lines.push(format!(
            "Annual revenue moved {:+.1}% against the expiring year.",
            change * 100.0
        ));
    }
    if let Some(change) = exposure.employee_change {
        lines.push(format!(
            "Employee count moved {:+.1}% against the expiring year.",
            change * 100.0
        ));
    }

    if let Some(aggregate) = report.multi_year {
        lines.push(format!(
            "{}-year incurred loss ratio {:.1}% across ${} earned premium.",
            aggregate.years,
            aggregate.incurred_loss_ratio * 100.0,
            aggregate.total_premium
        ));
    }

    lines
}

fn scale_premium(premium: u64, multiplier: f64) -> u64 {
    (premium as f64 * multiplier).round().max(0.0) as u64
}

fn percent_change(baseline: u64, value: u64) -> f64 {
    if baseline == 0 {
        return 0.0;
    }
    let change = (value as f64 - baseline as f64) / baseline as f64 * 100.0;
    (change * 10.0).round() / 10.0
}
