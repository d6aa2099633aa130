use crate::errors::AppError;

/// Default OpenRouter model. Overridable via OPENROUTER_MODEL.
pub const DEFAULT_MODEL: &str = "google/gemini-2.5-pro-exp-03-25:free";

/// Application configuration loaded from environment variables.
/// A missing API key is fatal before any network call is made.
#[derive(Debug, Clone)]
pub struct Config {
    pub openrouter_api_key: String,
    pub model: String,
    /// Optional OpenRouter ranking header (HTTP-Referer).
    pub site_url: Option<String>,
    /// Optional OpenRouter ranking header (X-Title).
    pub site_name: Option<String>,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            openrouter_api_key: require_env("OPENROUTER_API_KEY")?,
            model: std::env::var("OPENROUTER_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string()),
            site_url: optional_env("SITE_URL"),
            site_name: optional_env("SITE_NAME"),
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String, AppError> {
    std::env::var(key).map_err(|_| {
        AppError::Configuration(format!("Required environment variable '{key}' is not set"))
    })
}

/// Returns None for unset *and* empty variables — an empty ranking header
/// must not be sent at all.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}
