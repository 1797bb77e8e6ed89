use crate::config::{
    DEFAULT_CALLBACK_PATH, DEFAULT_LISTEN_HOST, DEFAULT_LISTEN_PORT, DEFAULT_REDIRECT_DELAY_MS,
    DEFAULT_TARGET_HOST, DEFAULT_TARGET_PORT, DEFAULT_TARGET_SCHEME, MAX_REDIRECT_DELAY_MS,
};
use crate::domain::ports::ShimSettings;
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use clap::{Args, Subcommand};
use std::time::Duration;

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Run the payment callback redirect shim
    Serve(ShimArgs),

    /// Format or validate a Chilean RUT
    #[command(subcommand)]
    Rut(RutCommand),
}

#[derive(Debug, Clone, Subcommand)]
pub enum RutCommand {
    /// Print the RUT as NN.NNN.NNN-D
    Format { value: String },

    /// Check the verification digit (exit code 1 when invalid)
    Validate { value: String },
}

#[derive(Debug, Clone, Args)]
pub struct ShimArgs {
    #[arg(long, default_value = DEFAULT_LISTEN_HOST)]
    pub listen_host: String,

    #[arg(long, default_value_t = DEFAULT_LISTEN_PORT)]
    pub listen_port: u16,

    #[arg(long, default_value = DEFAULT_TARGET_SCHEME)]
    pub target_scheme: String,

    #[arg(long, default_value = DEFAULT_TARGET_HOST)]
    pub target_host: String,

    #[arg(long, default_value_t = DEFAULT_TARGET_PORT)]
    pub target_port: u16,

    #[arg(long, default_value = DEFAULT_CALLBACK_PATH)]
    pub callback_path: String,

    #[arg(long, default_value_t = DEFAULT_REDIRECT_DELAY_MS, help = "Delay before the callback page navigates")]
    pub delay_ms: u64,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl ShimSettings for ShimArgs {
    fn listen_host(&self) -> &str {
        &self.listen_host
    }

    fn listen_port(&self) -> u16 {
        self.listen_port
    }

    fn target_origin(&self) -> String {
        format!(
            "{}://{}:{}",
            self.target_scheme, self.target_host, self.target_port
        )
    }

    fn callback_path(&self) -> &str {
        &self.callback_path
    }

    fn redirect_delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }
}

impl Validate for ShimArgs {
    fn validate(&self) -> Result<()> {
        validation::validate_non_empty_string("listen_host", &self.listen_host)?;
        validation::validate_port("listen_port", self.listen_port)?;
        validation::validate_port("target_port", self.target_port)?;
        validation::validate_url("target", &self.target_origin())?;
        validation::validate_route_path("callback_path", &self.callback_path)?;
        validation::validate_range("delay_ms", self.delay_ms, 0, MAX_REDIRECT_DELAY_MS)?;
        Ok(())
    }
}
