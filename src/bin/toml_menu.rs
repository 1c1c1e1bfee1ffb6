use clap::Parser;
use cocktail_menu::config::toml_config::TomlConfig;
use cocktail_menu::core::ConfigProvider;
use cocktail_menu::utils::{logger, validation::Validate};
use cocktail_menu::{CalamineWorkbook, LocalStorage, MenuEngine, MenuPipeline};

#[derive(Parser)]
#[command(name = "toml-menu")]
#[command(about = "Cocktail menu generator with TOML configuration support")]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "menu.toml")]
    config: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Override monitoring setting from config
    #[arg(long)]
    monitor: Option<bool>,

    /// Read and compose the menu without writing the PDF
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // 載入 TOML 配置
    let config = match TomlConfig::from_file(&args.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load config file '{}': {}", args.config, e);
            eprintln!("💡 Make sure the file exists and is valid TOML format");
            std::process::exit(e.exit_code());
        }
    };

    // 初始化日誌
    if config.json_logs() {
        logger::init_json_logger(args.verbose);
    } else {
        logger::init_cli_logger(args.verbose);
    }

    tracing::info!("🚀 Starting TOML-based menu generator");
    tracing::info!("📁 Loaded configuration from: {}", args.config);

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(e.exit_code());
    }

    display_config_summary(&config);

    let monitor_enabled = args.monitor.unwrap_or_else(|| config.monitoring_enabled());
    if monitor_enabled {
        tracing::info!("🔍 System monitoring enabled");
    }

    let workbook = CalamineWorkbook::new(config.input_path());
    let storage = LocalStorage::new(config.output_path().to_string());
    let pipeline = MenuPipeline::new(workbook, storage, config);
    let engine = MenuEngine::new_with_monitoring(pipeline, monitor_enabled);

    let result = if args.dry_run {
        tracing::info!("🔍 DRY RUN MODE - No PDF will be written");
        engine.dry_run().await.map(|count| {
            println!("🍸 {} cocktails would be printed", count);
        })
    } else {
        engine.run().await.map(|output_path| {
            tracing::info!("✅ Menu generated successfully!");
            println!("📁 Menu saved to: {}", output_path);
        })
    };

    if let Err(e) = result {
        tracing::error!(
            "❌ Menu generation failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());
        std::process::exit(e.exit_code());
    }

    Ok(())
}

fn display_config_summary(config: &TomlConfig) {
    tracing::info!("📋 Configuration Summary:");
    tracing::info!("  Workbook: {}", config.input_path());
    tracing::info!(
        "  Sheets: {} / {}",
        config.recipes_table(),
        config.ingredients_table()
    );
    tracing::info!(
        "  Output: {}/{}",
        config.output_path(),
        config.output_file()
    );
    tracing::info!("  Title: {}", config.menu.title);
}
