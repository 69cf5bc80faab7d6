use crate::domain::model::SalesSummary;
use crate::domain::ports::LedgerSource;
use crate::utils::error::{DashboardError, Result};
use std::fs::File;
use std::io::Read;
use std::path::Path;

const STATUS_COLUMN: &str = "status";
const AMOUNT_COLUMN: &str = "amount";
const CLOSED_STATUS: &str = "closed";

/// 讀取本地 CSV 帳本並彙總已成交的交易
#[derive(Debug, Clone, Default)]
pub struct CsvLedgerReader;

impl CsvLedgerReader {
    pub fn new() -> Self {
        Self
    }

    pub fn summarize<R: Read>(&self, reader: R) -> Result<SalesSummary> {
        // 多出來的欄位不影響計算，缺少的欄位才算錯誤
        let mut csv_reader = csv::ReaderBuilder::new()
            .flexible(true)
            .from_reader(reader);

        let headers = csv_reader.headers()?.clone();
        let column = |name: &str| {
            headers
                .iter()
                .position(|h| h == name)
                .ok_or_else(|| DashboardError::LedgerError {
                    message: format!("missing '{}' column", name),
                })
        };
        let status_idx = column(STATUS_COLUMN)?;
        let amount_idx = column(AMOUNT_COLUMN)?;

        let mut summary = SalesSummary::default();

        for (line_num, result) in csv_reader.records().enumerate() {
            let record = result?;
            let line = line_num + 2; // header + 1-based

            let field = |idx: usize, name: &str| {
                record.get(idx).ok_or_else(|| DashboardError::LedgerError {
                    message: format!("line {}: missing '{}' field", line, name),
                })
            };

            if !is_closed(field(status_idx, STATUS_COLUMN)?) {
                continue;
            }

            let amount_str = field(amount_idx, AMOUNT_COLUMN)?;
            let amount: i64 =
                amount_str
                    .trim()
                    .parse()
                    .map_err(|_| DashboardError::LedgerError {
                        message: format!("line {}: amount '{}' is not an integer", line, amount_str),
                    })?;

            summary.total_revenue = summary.total_revenue.checked_add(amount).ok_or_else(|| {
                DashboardError::LedgerError {
                    message: format!("line {}: revenue overflows", line),
                }
            })?;
            summary.closed_deal_count += 1;
        }

        Ok(summary)
    }
}

impl LedgerSource for CsvLedgerReader {
    fn read(&self, path: &Path) -> Result<SalesSummary> {
        tracing::debug!("Reading ledger from: {}", path.display());
        let file = File::open(path)?;
        let summary = self.summarize(file)?;
        tracing::debug!(
            "Ledger summary: revenue={}, closed deals={}",
            summary.total_revenue,
            summary.closed_deal_count
        );
        Ok(summary)
    }
}

fn is_closed(status: &str) -> bool {
    status.trim().to_lowercase() == CLOSED_STATUS
}
