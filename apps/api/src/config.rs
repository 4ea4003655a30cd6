use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Startup fails if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub db_max_connections: u32,
    /// Postgres role assumed inside admin-scoped transactions so row-level
    /// security policies apply. `None` keeps the connection's own role.
    pub db_rls_role: Option<String>,
    pub anthropic_api_key: String,
    pub session: SessionConfig,
    pub payment: PaymentConfig,
    pub port: u16,
    pub rust_log: String,
    pub json_logs: bool,
}

/// Verification settings for JWTs issued by the hosted auth service.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub jwt_secret: String,
    pub audience: String,
}

#[derive(Debug, Clone)]
pub struct PaymentConfig {
    /// Both halves of the API credential; `None` disables premium reports.
    pub credentials: Option<(String, String)>,
    pub api_base: String,
    pub premium_price_minor: i64,
    pub currency: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let credentials = match (optional_env("PAYMENT_KEY_ID"), optional_env("PAYMENT_KEY_SECRET")) {
            (Some(id), Some(secret)) => Some((id, secret)),
            _ => None,
        };

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            db_max_connections: parse_env("DB_MAX_CONNECTIONS", 10)?,
            db_rls_role: optional_env("DB_RLS_ROLE"),
            anthropic_api_key: require_env("ANTHROPIC_API_KEY")?,
            session: SessionConfig {
                jwt_secret: require_env("SESSION_JWT_SECRET")?,
                audience: optional_env("SESSION_JWT_AUDIENCE")
                    .unwrap_or_else(|| "authenticated".to_string()),
            },
            payment: PaymentConfig {
                credentials,
                api_base: optional_env("PAYMENT_API_BASE")
                    .unwrap_or_else(|| "https://api.razorpay.com/v1".to_string()),
                premium_price_minor: parse_env("PREMIUM_PRICE_MINOR", 49_900)?,
                currency: optional_env("PREMIUM_CURRENCY").unwrap_or_else(|| "INR".to_string()),
            },
            port: parse_env("PORT", 8080)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            json_logs: std::env::var("LOG_FORMAT")
                .map(|v| v.eq_ignore_ascii_case("json"))
                .unwrap_or(false),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match optional_env(key) {
        Some(raw) => raw
            .parse::<T>()
            .with_context(|| format!("{key} must be a valid number, got '{raw}'")),
        None => Ok(default),
    }
}
