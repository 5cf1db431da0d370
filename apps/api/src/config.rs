use anyhow::{Context, Result};

const DEFAULT_SMTP_HOST: &str = "smtp.gmail.com";
const DEFAULT_FRONTEND_ORIGIN: &str = "http://localhost:5173";
const DEFAULT_BACKEND_URI: &str = "http://localhost:5051";

/// Application configuration loaded from environment variables.
/// Startup fails if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub gemini_api_key: String,
    pub email_user: String,
    pub email_pass: String,
    pub smtp_host: String,
    /// The single origin allowed by the CORS policy.
    pub frontend_origin: String,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            gemini_api_key: require_env("GEMINI_API_KEY")?,
            email_user: require_env("EMAIL_USER")?,
            email_pass: require_env("EMAIL_PASS")?,
            smtp_host: env_or("SMTP_HOST", DEFAULT_SMTP_HOST),
            frontend_origin: env_or("FRONTEND_ORIGIN", DEFAULT_FRONTEND_ORIGIN),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "5051".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: env_or("RUST_LOG", "info"),
        })
    }

    /// Base URL the client-side `BackendClient` talks to. Needs none of the
    /// server secrets, so it is read separately from `from_env`.
    pub fn backend_uri_from_env() -> String {
        dotenvy::dotenv().ok();
        env_or("BACKEND_URI", DEFAULT_BACKEND_URI)
            .trim_end_matches('/')
            .to_string()
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
