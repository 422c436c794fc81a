// ============================================================================
// CONFIG - Configuración de la app (resuelta en tiempo de compilación)
// ============================================================================

use serde::{Deserialize, Serialize};

const DEFAULT_API_URL_DEVELOPMENT: &str = "http://localhost:8000";
const DEFAULT_API_URL_PRODUCTION: &str = "https://api.laundry-booking.app";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AppConfig {
    /// URL explícita del API, tiene prioridad sobre la del entorno
    pub api_url_override: Option<String>,
    pub api_url_development: String,
    pub api_url_production: String,
    pub environment: String,
    pub enable_logging: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_url_override: None,
            api_url_development: DEFAULT_API_URL_DEVELOPMENT.to_string(),
            api_url_production: DEFAULT_API_URL_PRODUCTION.to_string(),
            environment: "development".to_string(),
            enable_logging: true,
        }
    }
}

impl AppConfig {
    /// Carga la configuración desde variables de entorno en tiempo de compilación
    pub fn from_env() -> Self {
        Self {
            api_url_override: option_env!("API_URL").map(|s| s.to_string()),
            api_url_development: option_env!("API_URL_DEVELOPMENT")
                .unwrap_or(DEFAULT_API_URL_DEVELOPMENT)
                .to_string(),
            api_url_production: option_env!("API_URL_PRODUCTION")
                .unwrap_or(DEFAULT_API_URL_PRODUCTION)
                .to_string(),
            environment: option_env!("ENVIRONMENT").unwrap_or("development").to_string(),
            enable_logging: option_env!("ENABLE_LOGGING")
                .unwrap_or("true")
                .parse()
                .unwrap_or(true),
        }
    }

    /// URL base del API según el entorno, sin barra final
    pub fn api_url(&self) -> &str {
        let url = match (&self.api_url_override, self.environment.as_str()) {
            (Some(url), _) => url.as_str(),
            (None, "production") => self.api_url_production.as_str(),
            (None, _) => self.api_url_development.as_str(),
        };
        url.trim_end_matches('/')
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// Nivel de log para wasm-logger
    pub fn log_level(&self) -> log::Level {
        if self.enable_logging {
            log::Level::Info
        } else {
            log::Level::Warn
        }
    }
}

// Configuración global estática
lazy_static::lazy_static! {
    pub static ref CONFIG: AppConfig = AppConfig::from_env();
}
