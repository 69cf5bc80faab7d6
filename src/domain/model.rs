use serde::Serialize;

/// Bar chart figures shown next to the revenue card.
///
/// These are placeholder numbers, not an aggregate of the ledger. Wiring the
/// chart to real per-customer revenue means replacing this constant with a
/// value computed by the ledger reader.
pub const SAMPLE_COMPANY_REVENUE: [(&str, i64); 4] = [
    ("TechNebula", 9000),
    ("Innovixus", 3000),
    ("Quantum", 7000),
    ("ByteBridge", 2000),
];

/// Offsets applied to the live rate to draw the weekly trend line.
pub const TREND_OFFSETS: [f64; 7] = [-0.02, -0.01, 0.01, 0.0, -0.01, 0.02, 0.0];

pub const TREND_LABELS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

/// Quote currency of every fetched rate.
pub const QUOTE_CURRENCY: &str = "EUR";

/// Aggregate of closed deals in the ledger.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SalesSummary {
    pub total_revenue: i64,
    pub closed_deal_count: u64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CustomerCount {
    pub count: u64,
}

/// A positive conversion rate from `base` to [`QUOTE_CURRENCY`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExchangeRate {
    pub base: String,
    pub value: f64,
}

impl ExchangeRate {
    pub fn new(base: impl Into<String>, value: f64) -> Option<Self> {
        if value.is_finite() && value > 0.0 {
            Some(Self {
                base: base.into(),
                value,
            })
        } else {
            None
        }
    }

    pub fn pair(&self) -> String {
        format!("{} to {}", self.base, QUOTE_CURRENCY)
    }
}

/// 以即時匯率合成的七日走勢，僅供圖表使用
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendSeries {
    pub labels: Vec<&'static str>,
    pub points: Vec<f64>,
}

impl TrendSeries {
    pub fn from_rate(rate: &ExchangeRate) -> Self {
        Self {
            labels: TREND_LABELS.to_vec(),
            points: TREND_OFFSETS
                .iter()
                .map(|offset| rate.value + offset)
                .collect(),
        }
    }
}

/// Result of one source fetch. The reason is kept for the operator; the
/// pipeline decides whether a failure degrades to a default or aborts.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome<T> {
    Success(T),
    Failed { reason: String },
}

impl<T> FetchOutcome<T> {
    pub fn is_failed(&self) -> bool {
        matches!(self, FetchOutcome::Failed { .. })
    }

    pub fn ok(self) -> Option<T> {
        match self {
            FetchOutcome::Success(value) => Some(value),
            FetchOutcome::Failed { .. } => None,
        }
    }

    pub fn failure_reason(&self) -> Option<&str> {
        match self {
            FetchOutcome::Success(_) => None,
            FetchOutcome::Failed { reason } => Some(reason.as_str()),
        }
    }
}

impl<T: Default> FetchOutcome<T> {
    pub fn value_or_default(self) -> T {
        self.ok().unwrap_or_default()
    }
}

impl<T> From<crate::utils::error::Result<T>> for FetchOutcome<T> {
    fn from(result: crate::utils::error::Result<T>) -> Self {
        match result {
            Ok(value) => FetchOutcome::Success(value),
            Err(e) => FetchOutcome::Failed {
                reason: e.to_string(),
            },
        }
    }
}

/// Everything the extract step gathered.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardInputs {
    pub sales: FetchOutcome<SalesSummary>,
    pub customers: FetchOutcome<CustomerCount>,
    pub rate: FetchOutcome<ExchangeRate>,
}

/// Rendered report waiting to be written.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub file_name: String,
    pub html: String,
}

/// What the transform step decided to do with the inputs.
#[derive(Debug, Clone, PartialEq)]
pub enum TransformResult {
    Render(Report),
    Abort { reason: String },
}

/// Observable result of one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    Rendered { path: String },
    Skipped { reason: String },
}

impl RunOutcome {
    pub fn is_rendered(&self) -> bool {
        matches!(self, RunOutcome::Rendered { .. })
    }
}
