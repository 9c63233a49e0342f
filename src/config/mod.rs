//! # ماژول تنظیمات (Configuration)
//!
//! تنظیمات از متغیرهای محیطی خونده میشن (بعد از لود `.env` با dotenvy).
//! برای تست‌ها `ConfigBuilder` هست.

use std::env;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// آدرس پیش‌فرض دیتابیس
pub const DEFAULT_DATABASE_URL: &str = "sqlite://data/university.db?mode=rwc";

/// تنظیمات اصلی برنامه
///
/// # مثال
/// ```rust
/// use uni_records::config::Config;
///
/// let config = Config::default();
/// assert_eq!(config.port, 8000);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// آدرس هاست سرور
    pub host: String,

    /// پورت سرور
    pub port: u16,

    /// آدرس اتصال به دیتابیس SQLite
    pub database_url: String,

    /// محیط اجرا (development, testing, production)
    pub environment: Environment,
}

/// محیط اجرای برنامه
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Testing,
    Production,
}

impl Environment {
    #[must_use]
    pub fn is_production(&self) -> bool {
        matches!(self, Environment::Production)
    }
}

/// تبدیل String به Environment؛ مقدار ناشناخته یعنی development
impl From<String> for Environment {
    fn from(s: String) -> Self {
        match s.to_lowercase().as_str() {
            "production" | "prod" => Environment::Production,
            "testing" | "test" => Environment::Testing,
            _ => Environment::Development,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8000,
            database_url: DEFAULT_DATABASE_URL.to_string(),
            environment: Environment::Development,
        }
    }
}

impl Config {
    /// ساخت تنظیمات از متغیرهای محیطی
    ///
    /// متغیرها: `HOST`، `PORT`، `DATABASE_URL`، `ENVIRONMENT`
    ///
    /// # Errors
    /// اگه `PORT` عدد معتبری نباشه
    pub fn from_env() -> Result<Self> {
        let get_env = |key: &str, default: &str| -> String {
            env::var(key).unwrap_or_else(|_| default.to_string())
        };

        let port = match env::var("PORT") {
            Ok(raw) => raw
                .parse::<u16>()
                .map_err(|e| AppError::Config(format!("invalid PORT '{raw}': {e}")))?,
            Err(_) => 8000,
        };

        let config = Self {
            host: get_env("HOST", "127.0.0.1"),
            port,
            database_url: get_env("DATABASE_URL", DEFAULT_DATABASE_URL),
            environment: get_env("ENVIRONMENT", "development").into(),
        };
        config.validate()?;

        Ok(config)
    }

    /// اعتبارسنجی تنظیمات
    ///
    /// # Errors
    /// - پورت صفر
    /// - دیتابیس in-memory در محیط production (داده‌ها با ری‌استارت از بین میرن)
    pub fn validate(&self) -> Result<()> {
        if self.port == 0 {
            return Err(AppError::Config("PORT cannot be 0".to_string()));
        }

        if self.environment.is_production() && self.database_url.contains(":memory:") {
            return Err(AppError::Config(
                "an in-memory DATABASE_URL cannot be used in production".to_string(),
            ));
        }

        Ok(())
    }

    /// آدرس کامل سرور برای bind
    #[must_use]
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

// =====================================
// Builder Pattern
// =====================================
/// ساخت Config با Builder Pattern
///
/// ```rust
/// use uni_records::config::ConfigBuilder;
///
/// let config = ConfigBuilder::new()
///     .port(8080)
///     .host("0.0.0.0")
///     .build();
/// assert_eq!(config.server_addr(), "0.0.0.0:8080");
/// ```
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self {
            config: Config::default(),
        }
    }

    #[must_use]
    pub fn port(mut self, port: u16) -> Self {
        self.config.port = port;
        self
    }

    #[must_use]
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.config.host = host.into();
        self
    }

    #[must_use]
    pub fn database_url(mut self, url: impl Into<String>) -> Self {
        self.config.database_url = url.into();
        self
    }

    #[must_use]
    pub fn environment(mut self, env: Environment) -> Self {
        self.config.environment = env;
        self
    }

    #[must_use]
    pub fn build(self) -> Config {
        self.config
    }

    /// ساخت Config با اعتبارسنجی
    ///
    /// # Errors
    /// خطا برمیگردونه اگه اعتبارسنجی fail بشه
    pub fn build_validated(self) -> Result<Config> {
        let config = self.build();
        config.validate()?;
        Ok(config)
    }
}

// =====================================
// Tests
// =====================================
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.port, 8000);
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.database_url, DEFAULT_DATABASE_URL);
    }

    #[test]
    fn test_environment_from_string() {
        assert_eq!(Environment::from("production".to_string()), Environment::Production);
        assert_eq!(Environment::from("PROD".to_string()), Environment::Production);
        assert_eq!(Environment::from("test".to_string()), Environment::Testing);
        assert_eq!(Environment::from("unknown".to_string()), Environment::Development);
    }

    #[test]
    fn test_validation_rejects_memory_database_in_production() {
        let result = ConfigBuilder::new()
            .environment(Environment::Production)
            .database_url("sqlite::memory:")
            .build_validated();
        assert!(matches!(result, Err(AppError::Config(_))));

        let config = ConfigBuilder::new()
            .environment(Environment::Testing)
            .database_url("sqlite::memory:")
            .build_validated();
        assert!(config.is_ok());
    }

    #[test]
    fn test_validation_rejects_port_zero() {
        assert!(ConfigBuilder::new().port(0).build_validated().is_err());
    }
}
