use crate::core::Pipeline;
use crate::domain::model::{RunOutcome, TransformResult};
use crate::utils::error::Result;

/// Runs a pipeline once: extract, decide, and load when there is a report.
pub struct DashboardEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> DashboardEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub async fn run(&self) -> Result<RunOutcome> {
        tracing::info!("🔄 Starting Dashboard Engine...");

        // Extract
        let inputs = self.pipeline.extract().await?;
        tracing::debug!(
            "Extracted sources (ledger ok: {}, directory ok: {}, rate ok: {})",
            !inputs.sales.is_failed(),
            !inputs.customers.is_failed(),
            !inputs.rate.is_failed()
        );

        // Transform
        let report = match self.pipeline.transform(inputs).await? {
            TransformResult::Render(report) => report,
            TransformResult::Abort { reason } => {
                tracing::warn!("⚠️ {}. Dashboard not generated.", reason);
                return Ok(RunOutcome::Skipped { reason });
            }
        };

        // Load
        let path = self.pipeline.load(report).await?;
        tracing::info!("🚀 DASHBOARD LIVE: Check {}", path);

        Ok(RunOutcome::Rendered { path })
    }
}
