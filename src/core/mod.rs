pub mod etl;
pub mod report;

pub use crate::app::pipelines::dashboard_pipeline::DashboardPipeline;
pub use crate::domain::model::{DashboardInputs, Report, RunOutcome, TransformResult};
pub use crate::domain::ports::{
    ConfigProvider, DirectorySource, LedgerSource, Pipeline, RateSource, Storage,
};
pub use crate::utils::error::Result;
