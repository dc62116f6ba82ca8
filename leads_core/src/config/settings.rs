use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_CRM_BASE_URL: &str = "https://crm2.actifyzone.com/crm-uat";
pub const DEFAULT_CONTACT_PATH: &str = "/Crm/Portal/User/websitecontacts";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub crm: CrmConfig,
    pub form: FormConfig,
    pub cors: CorsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrmConfig {
    pub base_url: String,
    pub contact_path: String,
    pub request_timeout_seconds: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormConfig {
    pub redirect_delay_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
        }
    }
}

impl Default for CrmConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_CRM_BASE_URL.to_string(),
            contact_path: DEFAULT_CONTACT_PATH.to_string(),
            request_timeout_seconds: 20,
        }
    }
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            redirect_delay_ms: 2000,
        }
    }
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: vec![
                "http://localhost:5173".to_string(),
                "http://localhost:3000".to_string(),
                "http://127.0.0.1:5173".to_string(),
            ],
        }
    }
}

impl CrmConfig {
    pub fn contact_url(&self) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            self.contact_path.trim_start_matches('/')
        )
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds)
    }
}

impl FormConfig {
    pub fn redirect_delay(&self) -> Duration {
        Duration::from_millis(self.redirect_delay_ms)
    }
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from("config")
    }

    /// Defaults, then `<file_stem>.toml` when present, then `APP_*` variables
    /// (`APP_CRM__REQUEST_TIMEOUT_SECONDS=30`).
    pub fn load_from(file_stem: &str) -> Result<Self, ConfigError> {
        let mut builder = Config::builder()
            .add_source(Config::try_from(&AppConfig::default())?);

        if std::path::Path::new(&format!("{}.toml", file_stem)).exists() {
            builder = builder.add_source(File::with_name(file_stem));
        }

        builder = builder.add_source(
            Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__")
                .list_separator(",")
                .with_list_parse_key("cors.allowed_origins")
                .try_parsing(true),
        );

        let config = builder.build()?;
        let app_config: AppConfig = config.try_deserialize()?;

        app_config.validate()?;

        Ok(app_config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Message("Server port cannot be 0".to_string()));
        }

        let base_url = self.crm.base_url.trim();
        if base_url.is_empty() {
            return Err(ConfigError::Message("CRM base URL cannot be empty".to_string()));
        }

        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(ConfigError::Message(format!(
                "CRM base URL must be http(s): {}",
                base_url
            )));
        }

        if self.crm.contact_path.trim().is_empty() {
            return Err(ConfigError::Message("CRM contact path cannot be empty".to_string()));
        }

        if self.crm.request_timeout_seconds == 0 {
            return Err(ConfigError::Message(
                "CRM request timeout must be greater than 0".to_string(),
            ));
        }

        if self.cors.allowed_origins.iter().any(|origin| origin.trim().is_empty()) {
            return Err(ConfigError::Message("CORS origins cannot be empty".to_string()));
        }

        if !self.crm.base_url.starts_with("https://") {
            tracing::warn!("CRM base URL is not using TLS: {}", self.crm.base_url);
        }

        Ok(())
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
