// Adapters layer: concrete implementations of the domain ports for the
// ledger file, the spreadsheet directory and the exchange-rate API.

pub mod ledger;
pub mod rates;
pub mod sheets;

pub use ledger::CsvLedgerReader;
pub use rates::HttpRateClient;
pub use sheets::{DirectoryEndpoints, ServiceAccountKey, SheetsDirectoryClient};
