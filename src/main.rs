use clap::Parser;
use dashboard_etl::core::ConfigProvider;
use dashboard_etl::utils::{logger, validation::Validate};
use dashboard_etl::{
    CliConfig, DashboardConfig, DashboardEngine, LocalDashboardPipeline, LogFormat, RunOutcome,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 初始化日誌
    match cli.log_format {
        LogFormat::Compact => logger::init_cli_logger(cli.verbose),
        LogFormat::Json => logger::init_json_logger(cli.verbose),
    }

    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    // 載入並驗證配置
    let config = match cli.resolve().and_then(|config| config.validate().map(|_| config)) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("❌ Configuration failed: {}", e);
            tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(1);
        }
    };

    if cli.dry_run {
        display_config_summary(&config);
        return Ok(());
    }

    let pipeline = LocalDashboardPipeline::from_config(config);
    let engine = DashboardEngine::new(pipeline);

    // 失敗只透過訊息回報，不改變退出碼
    match engine.run().await {
        Ok(RunOutcome::Rendered { path }) => {
            println!("🚀 DASHBOARD LIVE: Check {}", path);
        }
        Ok(RunOutcome::Skipped { reason }) => {
            println!("⚠️ {}. Dashboard not generated.", reason);
        }
        Err(e) => {
            tracing::error!(
                "❌ Dashboard generation failed: {} (Category: {:?})",
                e,
                e.category()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
            eprintln!("❌ {}", e.user_friendly_message());
        }
    }

    Ok(())
}

fn display_config_summary(config: &DashboardConfig) {
    println!("📋 Configuration Summary:");
    println!("  Ledger: {}", config.ledger_path().display());
    println!(
        "  Directory: '{}' (credentials: {})",
        config.collection_name(),
        config.credentials_path().display()
    );
    println!("  Drive API: {}", config.directory.drive_api_base);
    println!("  Sheets API: {}", config.directory.sheets_api_base);
    println!(
        "  Rate API: {}/v4/latest/{}",
        config.rates.api_base.trim_end_matches('/'),
        config.base_currency()
    );
    println!(
        "  Output: {}",
        config.output_path().join(config.output_file_name()).display()
    );
    println!("  Strict: {}", config.strict());
    println!();
    println!("🔍 DRY RUN MODE - nothing was fetched or written");
}
