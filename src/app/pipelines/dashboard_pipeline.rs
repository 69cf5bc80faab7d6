use crate::adapters::{CsvLedgerReader, HttpRateClient, SheetsDirectoryClient};
use crate::config::cli::LocalStorage;
use crate::config::DashboardConfig;
use crate::core::report::ReportRenderer;
use crate::core::{
    ConfigProvider, DirectorySource, LedgerSource, Pipeline, RateSource, Storage,
};
use crate::domain::model::{DashboardInputs, FetchOutcome, Report, TransformResult};
use crate::utils::error::Result;

/// 儀表板 ETL：讀取三個來源，決定是否產生報表，寫入儲存
pub struct DashboardPipeline<S, C, L, D, R> {
    pub(crate) storage: S,
    pub(crate) config: C,
    pub(crate) ledger: L,
    pub(crate) directory: D,
    pub(crate) rates: R,
    pub(crate) renderer: ReportRenderer,
}

impl<S, C, L, D, R> DashboardPipeline<S, C, L, D, R>
where
    S: Storage,
    C: ConfigProvider,
    L: LedgerSource,
    D: DirectorySource,
    R: RateSource,
{
    pub fn new(storage: S, config: C, ledger: L, directory: D, rates: R) -> Self {
        let renderer = ReportRenderer::new(config.output_file_name());
        Self {
            storage,
            config,
            ledger,
            directory,
            rates,
            renderer,
        }
    }
}

/// 使用真實來源與本地儲存的組合
pub type LocalDashboardPipeline = DashboardPipeline<
    LocalStorage,
    DashboardConfig,
    CsvLedgerReader,
    SheetsDirectoryClient,
    HttpRateClient,
>;

impl LocalDashboardPipeline {
    pub fn from_config(config: DashboardConfig) -> Self {
        let storage = LocalStorage::new(config.output_path());
        let directory = SheetsDirectoryClient::new(config.directory_endpoints());
        let rates = HttpRateClient::new(config.rates.api_base.clone());
        Self::new(storage, config, CsvLedgerReader::new(), directory, rates)
    }
}

#[async_trait::async_trait]
impl<S, C, L, D, R> Pipeline for DashboardPipeline<S, C, L, D, R>
where
    S: Storage,
    C: ConfigProvider,
    L: LedgerSource,
    D: DirectorySource,
    R: RateSource,
{
    async fn extract(&self) -> Result<DashboardInputs> {
        // 依序讀取：帳本、客戶名單、匯率
        let sales = FetchOutcome::from(self.ledger.read(self.config.ledger_path()));
        if let Some(reason) = sales.failure_reason() {
            tracing::error!("❌ Ledger error: {}", reason);
        }

        let customers = FetchOutcome::from(
            self.directory
                .count(self.config.collection_name(), self.config.credentials_path())
                .await,
        );
        if let Some(reason) = customers.failure_reason() {
            tracing::error!("❌ Directory error: {}", reason);
        }

        let rate = FetchOutcome::from(self.rates.fetch_rate(self.config.base_currency()).await);
        if let Some(reason) = rate.failure_reason() {
            tracing::error!("❌ API error: {}", reason);
        }

        Ok(DashboardInputs {
            sales,
            customers,
            rate,
        })
    }

    async fn transform(&self, inputs: DashboardInputs) -> Result<TransformResult> {
        if self.config.strict() {
            let failed: Vec<&str> = [
                ("ledger", inputs.sales.is_failed()),
                ("directory", inputs.customers.is_failed()),
            ]
            .iter()
            .filter(|(_, failed)| *failed)
            .map(|(name, _)| *name)
            .collect();

            if !failed.is_empty() {
                return Ok(TransformResult::Abort {
                    reason: format!("strict mode: {} fetch failed", failed.join(" and ")),
                });
            }
        }

        let rate = match inputs.rate.ok() {
            Some(rate) => rate,
            None => {
                return Ok(TransformResult::Abort {
                    reason: "Failed to fetch API data".to_string(),
                })
            }
        };

        let sales = inputs.sales.value_or_default();
        let customers = inputs.customers.value_or_default();
        tracing::debug!(
            "Rendering with revenue={}, deals={}, customers={}, rate={}",
            sales.total_revenue,
            sales.closed_deal_count,
            customers.count,
            rate.value
        );

        let report = self.renderer.render(&sales, &customers, &rate)?;
        Ok(TransformResult::Render(report))
    }

    async fn load(&self, report: Report) -> Result<String> {
        tracing::debug!(
            "Writing report ({} bytes) to storage",
            report.html.len()
        );
        self.storage
            .write_file(&report.file_name, report.html.as_bytes())
            .await?;

        Ok(self.storage.location(&report.file_name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{CustomerCount, ExchangeRate, SalesSummary};
    use crate::utils::error::DashboardError;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::path::{Path, PathBuf};
    use std::sync::Arc;
    use tokio::sync::Mutex;

    #[derive(Clone)]
    struct MockStorage {
        files: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    }

    impl MockStorage {
        fn new() -> Self {
            Self {
                files: Arc::new(Mutex::new(HashMap::new())),
            }
        }

        async fn get_file(&self, path: &str) -> Option<Vec<u8>> {
            let files = self.files.lock().await;
            files.get(path).cloned()
        }
    }

    impl Storage for MockStorage {
        async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
            let mut files = self.files.lock().await;
            files.insert(path.to_string(), data.to_vec());
            Ok(())
        }

        fn location(&self, path: &str) -> String {
            format!("memory://{}", path)
        }
    }

    struct MockConfig {
        ledger_path: PathBuf,
        credentials_path: PathBuf,
        strict: bool,
    }

    impl MockConfig {
        fn new() -> Self {
            Self {
                ledger_path: PathBuf::from("sales_data.csv"),
                credentials_path: PathBuf::from("credentials.json"),
                strict: false,
            }
        }
    }

    impl ConfigProvider for MockConfig {
        fn ledger_path(&self) -> &Path {
            &self.ledger_path
        }

        fn collection_name(&self) -> &str {
            "Customer List"
        }

        fn credentials_path(&self) -> &Path {
            &self.credentials_path
        }

        fn base_currency(&self) -> &str {
            "USD"
        }

        fn output_file_name(&self) -> &str {
            "dashboard.html"
        }

        fn strict(&self) -> bool {
            self.strict
        }
    }

    struct FixedLedger(Option<SalesSummary>);

    impl LedgerSource for FixedLedger {
        fn read(&self, path: &Path) -> Result<SalesSummary> {
            self.0.ok_or_else(|| {
                DashboardError::IoError(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    path.display().to_string(),
                ))
            })
        }
    }

    struct FixedDirectory(Option<u64>);

    #[async_trait]
    impl DirectorySource for FixedDirectory {
        async fn count(&self, collection_name: &str, _credentials_path: &Path) -> Result<CustomerCount> {
            assert_eq!(collection_name, "Customer List");
            self.0
                .map(|count| CustomerCount { count })
                .ok_or_else(|| DashboardError::DirectoryError {
                    message: "invalid_grant".to_string(),
                })
        }
    }

    struct FixedRate(Option<f64>);

    #[async_trait]
    impl RateSource for FixedRate {
        async fn fetch_rate(&self, base_currency: &str) -> Result<ExchangeRate> {
            self.0
                .and_then(|v| ExchangeRate::new(base_currency, v))
                .ok_or_else(|| DashboardError::RateError {
                    message: "no rates.EUR".to_string(),
                })
        }
    }

    fn closed_deals() -> Option<SalesSummary> {
        Some(SalesSummary {
            total_revenue: 300,
            closed_deal_count: 2,
        })
    }

    #[tokio::test]
    async fn test_extract_keeps_failures_tagged() {
        let pipeline = DashboardPipeline::new(
            MockStorage::new(),
            MockConfig::new(),
            FixedLedger(None),
            FixedDirectory(Some(5)),
            FixedRate(Some(0.85)),
        );

        let inputs = pipeline.extract().await.unwrap();
        assert!(inputs.sales.is_failed());
        assert_eq!(inputs.customers.ok(), Some(CustomerCount { count: 5 }));
        assert!(!inputs.rate.is_failed());
    }

    #[tokio::test]
    async fn test_transform_renders_with_rate() {
        let pipeline = DashboardPipeline::new(
            MockStorage::new(),
            MockConfig::new(),
            FixedLedger(closed_deals()),
            FixedDirectory(Some(12)),
            FixedRate(Some(0.85)),
        );

        let inputs = pipeline.extract().await.unwrap();
        match pipeline.transform(inputs).await.unwrap() {
            TransformResult::Render(report) => {
                assert!(report.html.contains("$300"));
                assert!(report.html.contains("Current Rate: 0.85"));
            }
            other => panic!("expected a report, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_transform_aborts_without_rate() {
        let pipeline = DashboardPipeline::new(
            MockStorage::new(),
            MockConfig::new(),
            FixedLedger(closed_deals()),
            FixedDirectory(Some(12)),
            FixedRate(None),
        );

        let inputs = pipeline.extract().await.unwrap();
        assert!(matches!(
            pipeline.transform(inputs).await.unwrap(),
            TransformResult::Abort { .. }
        ));
    }

    #[tokio::test]
    async fn test_degraded_sources_render_zeroes() {
        let pipeline = DashboardPipeline::new(
            MockStorage::new(),
            MockConfig::new(),
            FixedLedger(None),
            FixedDirectory(None),
            FixedRate(Some(0.9)),
        );

        let inputs = pipeline.extract().await.unwrap();
        match pipeline.transform(inputs).await.unwrap() {
            TransformResult::Render(report) => {
                assert!(report.html.contains(">$0</div>"));
                assert!(report.html.contains(">0</div>"));
            }
            other => panic!("expected a report, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_strict_mode_aborts_on_directory_failure() {
        let mut config = MockConfig::new();
        config.strict = true;
        let pipeline = DashboardPipeline::new(
            MockStorage::new(),
            config,
            FixedLedger(closed_deals()),
            FixedDirectory(None),
            FixedRate(Some(0.9)),
        );

        let inputs = pipeline.extract().await.unwrap();
        match pipeline.transform(inputs).await.unwrap() {
            TransformResult::Abort { reason } => assert!(reason.contains("directory")),
            other => panic!("expected abort, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_load_writes_report() {
        let storage = MockStorage::new();
        let pipeline = DashboardPipeline::new(
            storage.clone(),
            MockConfig::new(),
            FixedLedger(closed_deals()),
            FixedDirectory(Some(1)),
            FixedRate(Some(0.85)),
        );

        let report = Report {
            file_name: "dashboard.html".to_string(),
            html: "<html></html>".to_string(),
        };
        let location = pipeline.load(report).await.unwrap();

        assert_eq!(location, "memory://dashboard.html");
        assert_eq!(
            storage.get_file("dashboard.html").await.unwrap(),
            b"<html></html>".to_vec()
        );
    }

    #[tokio::test]
    async fn test_load_overwrites_previous_report() {
        let storage = MockStorage::new();
        storage
            .write_file("dashboard.html", b"stale report")
            .await
            .unwrap();
        let pipeline = DashboardPipeline::new(
            storage.clone(),
            MockConfig::new(),
            FixedLedger(closed_deals()),
            FixedDirectory(Some(1)),
            FixedRate(Some(0.85)),
        );

        let report = Report {
            file_name: "dashboard.html".to_string(),
            html: "<html>fresh</html>".to_string(),
        };
        pipeline.load(report).await.unwrap();

        assert_eq!(
            storage.get_file("dashboard.html").await.unwrap(),
            b"<html>fresh</html>".to_vec()
        );
    }
}
