use crate::domain::model::{CustomerCount, DashboardInputs, ExchangeRate, Report, SalesSummary, TransformResult};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::path::Path;

pub trait Storage: Send + Sync {
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
    /// Human-readable location of `path`, used in operator messages.
    fn location(&self, path: &str) -> String;
}

pub trait ConfigProvider: Send + Sync {
    fn ledger_path(&self) -> &Path;
    fn collection_name(&self) -> &str;
    fn credentials_path(&self) -> &Path;
    fn base_currency(&self) -> &str;
    fn output_file_name(&self) -> &str;
    fn strict(&self) -> bool;
}

/// Local tabular file of deals.
pub trait LedgerSource: Send + Sync {
    fn read(&self, path: &Path) -> Result<SalesSummary>;
}

/// Remote customer directory backed by a spreadsheet.
#[async_trait]
pub trait DirectorySource: Send + Sync {
    async fn count(&self, collection_name: &str, credentials_path: &Path) -> Result<CustomerCount>;
}

#[async_trait]
pub trait RateSource: Send + Sync {
    async fn fetch_rate(&self, base_currency: &str) -> Result<ExchangeRate>;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<DashboardInputs>;
    async fn transform(&self, inputs: DashboardInputs) -> Result<TransformResult>;
    async fn load(&self, report: Report) -> Result<String>;
}
