pub mod assessment;
pub mod engine;
pub mod expected;
pub mod lookup;
pub mod progress;
pub mod recommendation;
pub mod standards;

pub use crate::domain::model::{
    ExpectedGrowth, GrowthAssessment, GrowthRecord, GrowthStandardRow, ProgressResult,
    RecommendationBundle,
};
pub use crate::domain::ports::{ConfigProvider, StandardsSource};
pub use crate::utils::error::Result;
