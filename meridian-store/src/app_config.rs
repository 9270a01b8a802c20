use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub paystack: PaystackConfig,
    pub mail: MailConfig,
    pub auth: AuthConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

fn default_max_connections() -> u32 {
    5
}

#[derive(Debug, Deserialize, Clone)]
pub struct PaystackConfig {
    pub secret_key: String,
    #[serde(default = "default_paystack_base_url")]
    pub base_url: String,
    /// Where the hosted checkout redirects the customer afterwards; the
    /// verify endpoint lives behind this page.
    pub callback_url: String,
}

fn default_paystack_base_url() -> String {
    "https://api.paystack.co".to_string()
}

#[derive(Debug, Deserialize, Clone)]
pub struct MailConfig {
    pub api_key: String,
    #[serde(default = "default_mail_base_url")]
    pub base_url: String,
    pub from_email: String,
    pub from_name: String,
    #[serde(default)]
    pub reply_to: Option<String>,
}

fn default_mail_base_url() -> String {
    "https://api.resend.com".to_string()
}

#[derive(Debug, Deserialize, Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = config::Config::builder()
            .add_source(config::File::with_name("config/default"))
            // Environment-specific file, optional
            .add_source(config::File::with_name(&format!("config/{}", run_mode)).required(false))
            // Local overrides, not checked in
            .add_source(config::File::with_name("config/local").required(false))
            // Env overrides, e.g. MERIDIAN__PAYSTACK__SECRET_KEY
            .add_source(config::Environment::with_prefix("MERIDIAN").separator("__"))
            .build()?;

        s.try_deserialize()
    }
}
