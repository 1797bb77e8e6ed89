#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
use clap::Parser;

pub const DEFAULT_LISTEN_HOST: &str = "0.0.0.0";
/// Port the payment gateway is configured to call back to.
pub const DEFAULT_LISTEN_PORT: u16 = 5173;
pub const DEFAULT_TARGET_SCHEME: &str = "http";
pub const DEFAULT_TARGET_HOST: &str = "localhost";
/// Port the storefront dev server actually runs on.
pub const DEFAULT_TARGET_PORT: u16 = 5174;
pub const DEFAULT_CALLBACK_PATH: &str = "/pago/resultado";
pub const DEFAULT_REDIRECT_DELAY_MS: u64 = 1500;
pub const MAX_REDIRECT_DELAY_MS: u64 = 60_000;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "tienda-kit")]
#[command(about = "Storefront dev tooling: payment callback redirect shim and RUT helpers")]
pub struct CliConfig {
    #[command(subcommand)]
    pub command: cli::Command,
}
