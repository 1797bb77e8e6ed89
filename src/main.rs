use clap::Parser;
use tienda_kit::config::cli::{Command, RutCommand};
use tienda_kit::utils::{logger, validation::Validate};
use tienda_kit::{format_rut, parse_rut, shim, CliConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    match config.command {
        Command::Serve(args) => {
            // 初始化日誌
            logger::init_cli_logger(args.verbose);

            tracing::info!("Starting tienda-kit redirect shim");
            if args.verbose {
                tracing::debug!("Shim args: {:?}", args);
            }

            // 驗證配置
            if let Err(e) = args.validate() {
                tracing::error!("❌ Configuration validation failed: {}", e);
                tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
                eprintln!("❌ {}", e.user_friendly_message());
                std::process::exit(e.exit_code());
            }

            if let Err(e) = shim::run(&args).await {
                tracing::error!(
                    "❌ Redirect shim failed: {} (Category: {:?}, Severity: {:?})",
                    e,
                    e.category(),
                    e.severity()
                );
                eprintln!("❌ {}", e.user_friendly_message());
                eprintln!("💡 {}", e.recovery_suggestion());
                std::process::exit(e.exit_code());
            }
        }
        Command::Rut(RutCommand::Format { value }) => {
            println!("{}", format_rut(&value));
        }
        Command::Rut(RutCommand::Validate { value }) => match parse_rut(&value) {
            Ok(rut) => println!("✅ {} is valid", rut),
            Err(e) => {
                println!("❌ {}: {}", format_rut(&value), e);
                std::process::exit(1);
            }
        },
    }

    Ok(())
}
