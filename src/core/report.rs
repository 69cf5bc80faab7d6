use crate::domain::model::{
    CustomerCount, ExchangeRate, Report, SalesSummary, TrendSeries, SAMPLE_COMPANY_REVENUE,
};
use crate::utils::error::{DashboardError, Result};
use crate::utils::{escape, format};
use regex::Regex;

pub const DEFAULT_REPORT_FILE: &str = "dashboard.html";

const TEMPLATE: &str = include_str!("../../templates/dashboard.html");

/// 將彙總數據套入固定的 HTML 儀表板模板
#[derive(Debug, Clone)]
pub struct ReportRenderer {
    file_name: String,
}

impl Default for ReportRenderer {
    fn default() -> Self {
        Self::new(DEFAULT_REPORT_FILE)
    }
}

impl ReportRenderer {
    pub fn new(file_name: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
        }
    }

    pub fn render(
        &self,
        sales: &SalesSummary,
        customers: &CustomerCount,
        rate: &ExchangeRate,
    ) -> Result<Report> {
        let trend = TrendSeries::from_rate(rate);
        let (company_labels, company_revenue): (Vec<&str>, Vec<i64>) =
            SAMPLE_COMPANY_REVENUE.iter().copied().unzip();

        let substitutions = [
            ("TOTAL_REVENUE", escape::html_text(&format::currency(sales.total_revenue))),
            ("DEALS_CLOSED", escape::html_text(&sales.closed_deal_count.to_string())),
            ("TOTAL_CUSTOMERS", escape::html_text(&customers.count.to_string())),
            ("RATE_PAIR", escape::html_text(&rate.pair())),
            ("CURRENT_RATE", escape::html_text(&format::rate(rate.value))),
            ("REVENUE_LABELS", escape::script_json(&company_labels)?),
            ("REVENUE_DATA", escape::script_json(&company_revenue)?),
            ("TREND_LABELS", escape::script_json(&trend.labels)?),
            ("TREND_DATA", escape::script_json(&trend.points)?),
        ];

        let mut html = TEMPLATE.to_string();
        for (key, value) in &substitutions {
            let placeholder = format!("{{{{{}}}}}", key);
            html = html.replace(&placeholder, value);
        }

        // 檢查是否還有未替換的佔位符
        let unresolved = Regex::new(r"\{\{[A-Z_]+\}\}").map_err(|e| DashboardError::RenderError {
            message: e.to_string(),
        })?;
        if let Some(found) = unresolved.find(&html) {
            return Err(DashboardError::RenderError {
                message: format!("Unresolved placeholder in template: {}", found.as_str()),
            });
        }

        Ok(Report {
            file_name: self.file_name.clone(),
            html,
        })
    }
}
