use clap::Parser;
use number_migrator::core::ConfigProvider;
use number_migrator::utils::{logger, validation::Validate};
use number_migrator::{LocalStorage, MigrationEngine, MigrationPipeline, TomlConfig};

#[derive(Parser)]
#[command(name = "toml-migrator")]
#[command(about = "Migration eligibility check driven by a TOML job file")]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "migration.toml")]
    config: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Override the region from the config file
    #[arg(long)]
    region: Option<String>,

    /// Dry run - show what would be processed without executing
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // 載入 TOML 配置
    let mut config = match TomlConfig::from_file(&args.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load config file '{}': {}", args.config, e);
            eprintln!("💡 Make sure the file exists and is valid TOML format");
            std::process::exit(e.exit_code());
        }
    };

    let verbose = args.verbose || config.verbose_logging();
    if config.json_logging() {
        logger::init_json_logger(verbose);
    } else {
        logger::init_cli_logger(verbose);
    }
    tracing::info!("📁 Loaded configuration from: {}", args.config);

    // 應用命令列覆蓋設定
    if let Some(region) = args.region {
        tracing::info!("🔧 Region overridden to: {}", region);
        config.job.region = region;
    }

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(e.exit_code());
    }

    display_config_summary(&config);

    if args.dry_run {
        tracing::info!("🔍 DRY RUN MODE - No files will be read or written");
        return Ok(());
    }

    let storage = LocalStorage::new(String::new());
    let pipeline = MigrationPipeline::new(storage, config);
    let engine = MigrationEngine::new(pipeline);

    match engine.run().await {
        Ok(output_path) => {
            println!("✅ Migration check completed");
            println!("📁 Report saved to: {}", output_path);
        }
        Err(e) => {
            tracing::error!(
                "❌ Migration check failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(e.exit_code());
        }
    }

    Ok(())
}

fn display_config_summary(config: &TomlConfig) {
    tracing::info!("📋 Job: {}", config.job_name());
    tracing::info!("   Region: {}", config.region_code());
    tracing::info!("   Recipes: {}", config.recipes_file());
    if let Some(numbers) = config.numbers_file() {
        tracing::info!("   Numbers file: {}", numbers);
    }
    if !config.inline_numbers().is_empty() {
        tracing::info!("   Inline numbers: {}", config.inline_numbers().len());
    }
    if let Some(key) = config.recipe_key() {
        tracing::info!("   Recipe key: {}", key);
    }
    tracing::info!(
        "   Output: {} ({})",
        config.output_path(),
        config.output_format()
    );
}
