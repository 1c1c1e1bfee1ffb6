use clap::Parser;
use cocktail_menu::core::ConfigProvider;
use cocktail_menu::utils::{logger, validation::Validate};
use cocktail_menu::{CalamineWorkbook, CliConfig, LocalStorage, MenuEngine, MenuPipeline};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    // 初始化日誌
    logger::init_cli_logger(config.verbose);

    tracing::info!("Starting cocktail-menu");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(e.exit_code());
    }

    let monitor_enabled = config.monitor;
    if monitor_enabled {
        tracing::info!("🔍 System monitoring enabled");
    }

    let workbook = CalamineWorkbook::new(config.input_path());
    let storage = LocalStorage::new(config.output_path().to_string());
    let pipeline = MenuPipeline::new(workbook, storage, config);

    let engine = MenuEngine::new_with_monitoring(pipeline, monitor_enabled);

    match engine.run().await {
        Ok(output_path) => {
            tracing::info!("✅ Menu generated successfully!");
            println!("📁 Menu saved to: {}", output_path);
        }
        Err(e) => {
            tracing::error!(
                "❌ Menu generation failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());

            std::process::exit(e.exit_code());
        }
    }

    Ok(())
}
