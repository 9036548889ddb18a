use config::{Config as ConfigBuilder, ConfigError, Environment, File};
use folio_notification::{
    EMAIL_ADDRESS_VAR, EmailConfig, GMAIL_PASSKEY_VAR, Secrets, TELEGRAM_API_URL,
    TELEGRAM_BOT_TOKEN_VAR, TELEGRAM_CHAT_ID_VAR,
};
use serde::Deserialize;
use std::{env, time::Duration};

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub contact: ContactConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

#[derive(Deserialize, Clone)]
pub struct ContactConfig {
    #[serde(default)]
    pub email_address: String,
    #[serde(default)]
    pub gmail_passkey: String,
    #[serde(default)]
    pub telegram_bot_token: String,
    #[serde(default)]
    pub telegram_chat_id: String,
    #[serde(default = "default_smtp_host")]
    pub smtp_host: String,
    #[serde(default = "default_smtp_port")]
    pub smtp_port: u16,
    #[serde(default = "default_smtp_tls")]
    pub smtp_tls: bool,
    #[serde(default = "default_telegram_api_url")]
    pub telegram_api_url: String,
    #[serde(default = "default_from_name")]
    pub from_name: String,
    /// Per-channel delivery bound in seconds; 0 disables it.
    #[serde(default = "default_delivery_timeout_secs")]
    pub delivery_timeout_secs: u64,
}

impl Default for ContactConfig {
    fn default() -> Self {
        Self {
            email_address: String::new(),
            gmail_passkey: String::new(),
            telegram_bot_token: String::new(),
            telegram_chat_id: String::new(),
            smtp_host: default_smtp_host(),
            smtp_port: default_smtp_port(),
            smtp_tls: default_smtp_tls(),
            telegram_api_url: default_telegram_api_url(),
            from_name: default_from_name(),
            delivery_timeout_secs: default_delivery_timeout_secs(),
        }
    }
}

// Secrets stay out of Debug output; the config is logged at startup.
impl std::fmt::Debug for ContactConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContactConfig")
            .field("secrets", &self.secrets())
            .field("smtp_host", &self.smtp_host)
            .field("smtp_port", &self.smtp_port)
            .field("smtp_tls", &self.smtp_tls)
            .field("telegram_api_url", &self.telegram_api_url)
            .field("from_name", &self.from_name)
            .field("delivery_timeout_secs", &self.delivery_timeout_secs)
            .finish()
    }
}

fn default_smtp_host() -> String {
    "smtp.gmail.com".to_string()
}

fn default_smtp_port() -> u16 {
    587
}

fn default_smtp_tls() -> bool {
    true
}

fn default_telegram_api_url() -> String {
    TELEGRAM_API_URL.to_string()
}

fn default_from_name() -> String {
    "Portfolio Contact".to_string()
}

fn default_delivery_timeout_secs() -> u64 {
    30
}

impl ContactConfig {
    pub fn secrets(&self) -> Secrets {
        Secrets {
            email_address: self.email_address.to_owned(),
            gmail_passkey: self.gmail_passkey.to_owned(),
            telegram_bot_token: self.telegram_bot_token.to_owned(),
            telegram_chat_id: self.telegram_chat_id.to_owned(),
        }
    }

    pub fn email(&self) -> EmailConfig {
        EmailConfig {
            smtp_host: self.smtp_host.to_owned(),
            smtp_port: self.smtp_port,
            smtp_tls: self.smtp_tls,
            from_name: self.from_name.to_owned(),
        }
    }

    pub fn delivery_timeout(&self) -> Option<Duration> {
        match self.delivery_timeout_secs {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        }
    }
}

impl Config {
    /// Load configuration from file and environment variables
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (FOLIO__SERVER__PORT, etc.)
    /// 2. Config file specified by path
    /// 3. Hardcoded defaults
    pub fn load(config_path: Option<String>) -> Result<Self, ConfigError> {
        let mut builder = ConfigBuilder::builder();

        builder = builder
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 3000)?;

        let config_file_path = config_path
            .or_else(|| env::var("CONFIG_PATH").ok())
            .unwrap_or_else(|| "config/default.toml".to_string());

        // Try to load config file (optional - ignore if not found)
        if std::path::Path::new(&config_file_path).exists() {
            builder = builder.add_source(File::with_name(&config_file_path));
        }

        builder = builder.add_source(
            Environment::with_prefix("FOLIO")
                .separator("__")
                .try_parsing(true),
        );

        // Also support the bare variable names the deployment already uses
        for (var, key) in [
            (EMAIL_ADDRESS_VAR, "contact.email_address"),
            (GMAIL_PASSKEY_VAR, "contact.gmail_passkey"),
            (TELEGRAM_BOT_TOKEN_VAR, "contact.telegram_bot_token"),
            (TELEGRAM_CHAT_ID_VAR, "contact.telegram_chat_id"),
        ] {
            if let Ok(value) = env::var(var) {
                builder = builder.set_override(key, value)?;
            }
        }

        builder.build()?.try_deserialize()
    }

    /// Validate configuration
    ///
    /// Missing contact secrets are not a startup error: every request checks
    /// them again and answers with a configuration failure.
    pub fn validate(&self) -> Result<(), String> {
        if self.server.port == 0 {
            return Err("Server port must be greater than 0".to_string());
        }
        if !matches!(self.logging.format.as_str(), "pretty" | "json") {
            return Err(format!(
                "Unknown logging format '{}', expected 'pretty' or 'json'",
                self.logging.format
            ));
        }
        if self.contact.smtp_port == 0 {
            return Err("SMTP port must be greater than 0".to_string());
        }
        Ok(())
    }
}
