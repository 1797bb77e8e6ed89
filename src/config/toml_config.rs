use crate::config::{
    DEFAULT_CALLBACK_PATH, DEFAULT_LISTEN_HOST, DEFAULT_LISTEN_PORT, DEFAULT_REDIRECT_DELAY_MS,
    DEFAULT_TARGET_HOST, DEFAULT_TARGET_PORT, DEFAULT_TARGET_SCHEME, MAX_REDIRECT_DELAY_MS,
};
use crate::domain::ports::ShimSettings;
use crate::utils::error::{KitError, Result};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::OnceLock;
use std::time::Duration;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub target: TargetConfig,
    #[serde(default)]
    pub callback: CallbackConfig,
    pub logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_listen_host")]
    pub host: String,
    #[serde(default = "default_listen_port")]
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TargetConfig {
    #[serde(default = "default_target_scheme")]
    pub scheme: String,
    #[serde(default = "default_target_host")]
    pub host: String,
    #[serde(default = "default_target_port")]
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CallbackConfig {
    #[serde(default = "default_callback_path")]
    pub path: String,
    #[serde(default = "default_delay_ms")]
    pub delay_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: Option<String>,
    /// `compact` (default) or `json`
    pub format: Option<String>,
}

fn default_listen_host() -> String {
    DEFAULT_LISTEN_HOST.to_string()
}

fn default_listen_port() -> u16 {
    DEFAULT_LISTEN_PORT
}

fn default_target_scheme() -> String {
    DEFAULT_TARGET_SCHEME.to_string()
}

fn default_target_host() -> String {
    DEFAULT_TARGET_HOST.to_string()
}

fn default_target_port() -> u16 {
    DEFAULT_TARGET_PORT
}

fn default_callback_path() -> String {
    DEFAULT_CALLBACK_PATH.to_string()
}

fn default_delay_ms() -> u64 {
    DEFAULT_REDIRECT_DELAY_MS
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_listen_host(),
            port: default_listen_port(),
        }
    }
}

impl Default for TargetConfig {
    fn default() -> Self {
        Self {
            scheme: default_target_scheme(),
            host: default_target_host(),
            port: default_target_port(),
        }
    }
}

impl Default for CallbackConfig {
    fn default() -> Self {
        Self {
            path: default_callback_path(),
            delay_ms: default_delay_ms(),
        }
    }
}

fn env_var_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\$\{([^}]+)\}").expect("env var pattern is valid"))
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(KitError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| KitError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${TARGET_PORT})，未設定的保持原樣
    fn substitute_env_vars(content: &str) -> String {
        env_var_pattern()
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }

    pub fn validate_config(&self) -> Result<()> {
        validation::validate_non_empty_string("server.host", &self.server.host)?;
        validation::validate_port("server.port", self.server.port)?;
        validation::validate_port("target.port", self.target.port)?;
        validation::validate_url("target", &self.target_origin())?;
        validation::validate_route_path("callback.path", &self.callback.path)?;
        validation::validate_range(
            "callback.delay_ms",
            self.callback.delay_ms,
            0,
            MAX_REDIRECT_DELAY_MS,
        )?;

        if let Some(format) = self.logging.as_ref().and_then(|l| l.format.as_deref()) {
            if !matches!(format, "compact" | "json") {
                return Err(KitError::InvalidConfigValueError {
                    field: "logging.format".to_string(),
                    value: format.to_string(),
                    reason: "Valid formats: compact, json".to_string(),
                });
            }
        }

        Ok(())
    }

    pub fn json_logging(&self) -> bool {
        self.logging
            .as_ref()
            .and_then(|l| l.format.as_deref())
            .is_some_and(|f| f == "json")
    }

    pub fn log_level(&self) -> Option<&str> {
        self.logging.as_ref().and_then(|l| l.level.as_deref())
    }
}

impl ShimSettings for TomlConfig {
    fn listen_host(&self) -> &str {
        &self.server.host
    }

    fn listen_port(&self) -> u16 {
        self.server.port
    }

    fn target_origin(&self) -> String {
        format!(
            "{}://{}:{}",
            self.target.scheme, self.target.host, self.target.port
        )
    }

    fn callback_path(&self) -> &str {
        &self.callback.path
    }

    fn redirect_delay(&self) -> Duration {
        Duration::from_millis(self.callback.delay_ms)
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
