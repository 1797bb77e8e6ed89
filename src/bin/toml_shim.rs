use clap::Parser;
use tienda_kit::domain::ports::ShimSettings;
use tienda_kit::utils::{logger, validation::Validate};
use tienda_kit::{shim, TomlConfig};

#[derive(Parser)]
#[command(name = "toml-shim")]
#[command(about = "Payment callback redirect shim driven by a TOML file")]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "redirect-shim.toml")]
    config: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Override the target port from the config
    #[arg(long)]
    target_port: Option<u16>,

    /// Print the resolved routing and exit
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // 載入 TOML 配置
    let mut config = match TomlConfig::from_file(&args.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load config file '{}': {}", args.config, e);
            eprintln!("💡 Make sure the file exists and is valid TOML format");
            std::process::exit(1);
        }
    };

    // 初始化日誌
    if config.json_logging() {
        logger::init_json_logger(config.log_level());
    } else {
        logger::init_cli_logger(args.verbose);
    }

    tracing::info!("📁 Loaded configuration from: {}", args.config);

    // 應用命令列覆蓋設定
    if let Some(port) = args.target_port {
        config.target.port = port;
        tracing::info!("🔧 Target port overridden to: {}", port);
    }

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(e.exit_code());
    }

    if args.dry_run {
        println!("🔍 DRY RUN - routing summary");
        println!(
            "   listen   : {}:{}",
            config.listen_host(),
            config.listen_port()
        );
        println!("   target   : {}", config.target_origin());
        println!(
            "   callback : {} (delay {:?})",
            config.callback_path(),
            config.redirect_delay()
        );
        return Ok(());
    }

    if let Err(e) = shim::run(&config).await {
        tracing::error!("❌ Redirect shim failed: {}", e);
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());
        std::process::exit(e.exit_code());
    }

    Ok(())
}
