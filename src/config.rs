use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Development,
    Production,
}

impl Environment {
    pub fn parse(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "production" | "prod" => Environment::Production,
            _ => Environment::Development,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub api_url: String,
    pub environment: Environment,
    pub enable_logging: bool,
    pub access_token_days: u32,
    pub refresh_token_days: u32,
    pub page_size: u32,
    pub redirect_delay_ms: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_url: "http://localhost:8080/api".to_string(),
            environment: Environment::Development,
            enable_logging: true,
            access_token_days: 7,
            refresh_token_days: 30,
            page_size: 10,
            redirect_delay_ms: 500,
        }
    }
}

impl AppConfig {
    /// Carga la configuración desde variables de entorno en tiempo de compilación
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            api_url: option_env!("API_URL")
                .map(|s| s.trim_end_matches('/').to_string())
                .unwrap_or(defaults.api_url),
            environment: Environment::parse(option_env!("ENVIRONMENT").unwrap_or("development")),
            enable_logging: option_env!("ENABLE_LOGGING")
                .unwrap_or("true").parse().unwrap_or(true),
            access_token_days: option_env!("ACCESS_TOKEN_DAYS")
                .unwrap_or("7").parse().unwrap_or(defaults.access_token_days),
            refresh_token_days: option_env!("REFRESH_TOKEN_DAYS")
                .unwrap_or("30").parse().unwrap_or(defaults.refresh_token_days),
            page_size: option_env!("PAGE_SIZE")
                .unwrap_or("10").parse().unwrap_or(defaults.page_size),
            redirect_delay_ms: option_env!("REDIRECT_DELAY_MS")
                .unwrap_or("500").parse().unwrap_or(defaults.redirect_delay_ms),
        }
    }

    pub fn is_production(&self) -> bool {
        self.environment == Environment::Production
    }

    pub fn log_level(&self) -> log::Level {
        if self.enable_logging {
            log::Level::Debug
        } else {
            log::Level::Warn
        }
    }
}

// Configuración global estática
lazy_static::lazy_static! {
    pub static ref CONFIG: AppConfig = AppConfig::from_env();
}
