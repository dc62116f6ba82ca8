pub mod settings;

pub use settings::{AppConfig, CorsConfig, CrmConfig, FormConfig, ServerConfig};
