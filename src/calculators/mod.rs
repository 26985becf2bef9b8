//! Standalone planning calculators that sit beside the projection engine

pub mod funding;
pub mod funnel;

pub use funding::{apply_round, dilution, dilution_path, post_money, FundingRound, OwnershipStep};
pub use funnel::{conversion_rates, overall_conversion, FunnelStage, StageConversion};
