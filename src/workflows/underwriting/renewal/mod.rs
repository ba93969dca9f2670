//! Renewal pricing: loss-history aggregation over the renewal chain and the
//! premium recommendation derived from it.

pub mod chain;
pub mod loss_ratio;
pub mod rate;

pub use chain::{bound_years, load_chain, BoundYear, RenewalError};
pub use loss_ratio::{
    calculate_loss_ratio, experience_factor, LossRatioAssessment, LossRatioReport,
    MultiYearLossRatio, NoDataReason,
};
pub use rate::{
    recommend_renewal_rate, RateAssessment, RateFactor, RateRecommendation, DEFAULT_TREND_FACTOR,
};
