use cities_etl::config::toml_config::TomlConfig;
use cities_etl::core::ConfigProvider;
use cities_etl::utils::{logger, validation::Validate};
use cities_etl::{CityPipeline, EtlEngine, LocalStorage};
use clap::Parser;

#[derive(Parser)]
#[command(name = "toml-etl")]
#[command(about = "Dataset normalizer driven by a TOML profile")]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "etl-config.toml")]
    config: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Override monitoring setting from config
    #[arg(long)]
    monitor: Option<bool>,

    /// Override the continent merge setting from config
    #[arg(long)]
    merge_continent: Option<bool>,

    /// Dry run - show what would be processed without executing
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // 初始化日誌
    logger::init_cli_logger(args.verbose);

    tracing::info!("🚀 Starting TOML-based dataset normalizer");
    tracing::info!("📁 Loading configuration from: {}", args.config);

    // 載入 TOML 配置
    let mut config = match TomlConfig::from_file(&args.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load config file '{}': {}", args.config, e);
            eprintln!("💡 Make sure the file exists and is valid TOML format");
            std::process::exit(1);
        }
    };

    // 應用命令列覆蓋設定
    if let Some(merge) = args.merge_continent {
        config.continent.get_or_insert_with(Default::default).enabled = Some(merge);
        tracing::info!("🔧 Continent merge overridden to: {}", merge);
    }

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    tracing::info!("✅ Configuration loaded and validated successfully");

    // 顯示配置摘要
    display_config_summary(&config, &args);

    if args.dry_run {
        tracing::info!("🔍 DRY RUN MODE - No actual processing will occur");
        perform_dry_run(&config);
        return Ok(());
    }

    // 決定監控設定
    let monitor_enabled = args.monitor.unwrap_or_else(|| config.monitoring_enabled());

    if monitor_enabled {
        tracing::info!("🔍 System monitoring enabled");
    }

    // 創建存儲和管道
    let storage = LocalStorage::new(config.data_dir().to_string());
    let pipeline = CityPipeline::new(storage, config);

    // 創建 ETL 引擎並運行
    let engine = EtlEngine::new_with_monitoring(pipeline, monitor_enabled);

    match engine.run().await {
        Ok(output_path) => {
            tracing::info!("✅ ETL process completed successfully!");
            tracing::info!("📁 Output saved to: {}", output_path);
            println!("✅ ETL process completed successfully!");
            println!("📁 Output saved to: {}", output_path);
        }
        Err(e) => {
            // 記錄詳細錯誤信息
            tracing::error!(
                "❌ ETL process failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            // 輸出用戶友好的錯誤信息
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 建議: {}", e.recovery_suggestion());

            // 根據錯誤嚴重程度決定退出碼
            let exit_code = match e.severity() {
                cities_etl::utils::error::ErrorSeverity::Low => 0, // 警告，但成功
                cities_etl::utils::error::ErrorSeverity::Medium => 2, // 配置錯誤
                cities_etl::utils::error::ErrorSeverity::High => 1, // 處理錯誤
                cities_etl::utils::error::ErrorSeverity::Critical => 3, // 系統錯誤
            };

            if exit_code > 0 {
                std::process::exit(exit_code);
            }
        }
    }

    Ok(())
}

fn display_config_summary(config: &TomlConfig, args: &Args) {
    println!("📋 Configuration Summary:");
    println!(
        "  Pipeline: {} v{}",
        config.pipeline.name, config.pipeline.version
    );
    println!(
        "  Source: {} ({})",
        config.input_path(),
        config.source_format()
    );
    println!("  Data directory: {}", config.data_dir());
    println!("  Continent merge: {}", config.continent_merge_enabled());

    if args.dry_run {
        println!("  🔍 DRY RUN MODE ENABLED");
    }

    println!();
}

fn perform_dry_run(config: &TomlConfig) {
    println!("🔍 Dry Run Analysis:");
    println!();

    // 資料來源分析
    println!("📡 Data Source Analysis:");
    println!("  Format: {}", config.source_format());
    println!("  File: {}", config.input_path());

    // 合併分析
    println!();
    println!("🌍 Continent Merge:");
    match config.continent_path() {
        Some(path) => {
            println!("  ✅ Enabled, lookup file: {}", path);
            println!(
                "  📊 Will write: {} and {}",
                config.cities_filename(),
                config.database_filename()
            );
        }
        None => {
            println!("  ⏭️ Disabled");
            println!("  📊 Will write: {} only", config.cities_filename());
        }
    }

    // 輸出分析
    println!();
    println!("💾 Output Configuration:");
    println!("  Directory: {}", config.data_dir());
    println!("  Cities file: {}", config.cities_filename());
    println!("  Database file: {}", config.database_filename());

    println!();
    println!("✅ Dry run analysis complete. Use --verbose for more details during actual run.");
}
