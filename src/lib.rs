pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::{CliConfig, LogFormat};

pub use app::pipelines::dashboard_pipeline::{DashboardPipeline, LocalDashboardPipeline};
pub use config::{cli::LocalStorage, DashboardConfig};
pub use core::{etl::DashboardEngine, report::ReportRenderer};
pub use domain::model::RunOutcome;
pub use utils::error::{DashboardError, Result};
