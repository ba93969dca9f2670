pub mod ratesheet;
pub mod underwriting;
