use super::common::*;
use crate::workflows::underwriting::renewal::{
    recommend_renewal_rate, NoDataReason, RateAssessment, DEFAULT_TREND_FACTOR,
};

fn clean_renewal_chain(expiring_premium: u64) -> Vec<crate::workflows::underwriting::domain::Submission> {
    let prior = bound_submission("rate-prior", expiring_premium, Vec::new(), None);
    let mut current = complete_submission("rate-current");
    current.prior_submission_id = Some(prior.id.clone());
    // Exposure held flat so only trend and experience move the premium.
    current.annual_revenue = prior.annual_revenue;
    current.employee_count = prior.employee_count;
    vec![current, prior]
}

#[test]
fn zero_claims_and_flat_exposure_discount_the_premium() {
    let chain = clean_renewal_chain(100_000);

    let assessment = recommend_renewal_rate(&chain, None, DEFAULT_TREND_FACTOR);

    match assessment {
        RateAssessment::Recommendation(recommendation) => {
            assert_eq!(recommendation.expiring_premium, 100_000);
            assert_eq!(recommendation.technical_premium, 105_000);
            // 100,000 x (1 + 0.05 - 0.10) = 95,000
            assert_eq!(recommendation.recommended_premium, 95_000);
            assert_eq!(recommendation.experience_factor, -0.10);
            assert_eq!(recommendation.exposure_factor, 0.0);
            assert_eq!(recommendation.rate_change_from_expiring, -5.0);
            assert!(recommendation.rate_change_from_proposed.is_none());
        }
        other => panic!("expected recommendation, got {other:?}"),
    }
}

#[test]
fn exposure_inside_the_dead_band_contributes_nothing() {
    let mut chain = clean_renewal_chain(100_000);
    // Exactly +10% revenue and +15% headcount: at the threshold, not past it.
    chain[1].annual_revenue = Some(1_000_000);
    chain[1].employee_count = Some(100);
    chain[0].annual_revenue = Some(1_100_000);
    chain[0].employee_count = Some(115);

    let assessment = recommend_renewal_rate(&chain, None, DEFAULT_TREND_FACTOR);

    match assessment {
        RateAssessment::Recommendation(recommendation) => {
            assert_eq!(recommendation.exposure_factor, 0.0);
            assert!(recommendation
                .factors
                .iter()
                .all(|factor| factor.label != "exposure change"));
        }
        other => panic!("expected recommendation, got {other:?}"),
    }
}

#[test]
fn revenue_growth_past_the_threshold_raises_the_premium() {
    let mut chain = clean_renewal_chain(100_000);
    chain[1].annual_revenue = Some(1_000_000);
    chain[0].annual_revenue = Some(1_200_000);

    let assessment = recommend_renewal_rate(&chain, None, DEFAULT_TREND_FACTOR);

    match assessment {
        RateAssessment::Recommendation(recommendation) => {
            // 0.5 x 20% revenue growth
            assert!((recommendation.exposure_factor - 0.10).abs() < 1e-9);
            // 100,000 x (1 + 0.05 - 0.10 + 0.10) = 105,000
            assert_eq!(recommendation.recommended_premium, 105_000);
            assert!(recommendation
                .factors
                .iter()
                .any(|factor| factor.label == "exposure change"));
        }
        other => panic!("expected recommendation, got {other:?}"),
    }
}

#[test]
fn exposure_factor_is_clamped_at_the_floor() {
    let mut chain = clean_renewal_chain(100_000);
    chain[1].annual_revenue = Some(1_000_000);
    chain[0].annual_revenue = Some(400_000);

    let assessment = recommend_renewal_rate(&chain, None, DEFAULT_TREND_FACTOR);

    match assessment {
        RateAssessment::Recommendation(recommendation) => {
            // 0.5 x -60% would be -0.30; the floor holds at -0.15.
            assert_eq!(recommendation.exposure_factor, -0.15);
        }
        other => panic!("expected recommendation, got {other:?}"),
    }
}

#[test]
fn proposed_premium_comparison_is_reported() {
    let chain = clean_renewal_chain(100_000);

    let assessment = recommend_renewal_rate(&chain, Some(90_000), DEFAULT_TREND_FACTOR);

    match assessment {
        RateAssessment::Recommendation(recommendation) => {
            // 95,000 vs proposed 90,000 = +5.6%
            assert_eq!(recommendation.rate_change_from_proposed, Some(5.6));
        }
        other => panic!("expected recommendation, got {other:?}"),
    }
}

#[test]
fn narrative_lines_keep_their_contractual_order() {
    let mut chain = clean_renewal_chain(100_000);
    chain[1].annual_revenue = Some(1_000_000);
    chain[0].annual_revenue = Some(1_200_000);
    // Add an older bound year so the multi-year line appears.
    chain[1].prior_submission_id = Some(crate::workflows::underwriting::domain::SubmissionId(
        "rate-oldest".to_string(),
    ));
    chain.push(bound_submission("rate-oldest", 80_000, vec![loss(8_000, 0)], None));

    let assessment = recommend_renewal_rate(&chain, None, DEFAULT_TREND_FACTOR);

    match assessment {
        RateAssessment::Recommendation(recommendation) => {
            let narrative = &recommendation.narrative;
            assert_eq!(narrative.len(), 4);
            assert!(narrative[0].contains("No reported claims"));
            assert!(narrative[1].contains("Market trend"));
            assert!(narrative[2].contains("revenue"));
            assert!(narrative[3].contains("2-year"));
        }
        other => panic!("expected recommendation, got {other:?}"),
    }
}

#[test]
fn calculator_failure_passes_through_as_no_data() {
    let current = complete_submission("rate-nodata");

    let assessment = recommend_renewal_rate(&[current], None, DEFAULT_TREND_FACTOR);

    match assessment {
        RateAssessment::NoData(NoDataReason::NoBoundPolicy) => {}
        other => panic!("expected no-data passthrough, got {other:?}"),
    }
}

#[test]
fn claims_commentary_reports_the_incurred_ratio() {
    let prior = bound_submission("rate-claims-prior", 100_000, vec![loss(30_000, 25_000)], None);
    let mut current = complete_submission("rate-claims");
    current.prior_submission_id = Some(prior.id.clone());
    current.annual_revenue = prior.annual_revenue;
    current.employee_count = prior.employee_count;

    let assessment = recommend_renewal_rate(&[current, prior], None, DEFAULT_TREND_FACTOR);

    match assessment {
        RateAssessment::Recommendation(recommendation) => {
            assert!(recommendation.narrative[0].contains("1 claim(s)"));
            assert!(recommendation.narrative[0].contains("55.0%"));
            // 55% incurred sits in the 50-60% tier.
            assert_eq!(recommendation.experience_factor, 0.05);
            assert_eq!(recommendation.recommended_premium, 110_000);
        }
        other => panic!("expected recommendation, got {other:?}"),
    }
}
