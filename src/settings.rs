use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use dotenv::dotenv;
use std::{env, fmt, str::FromStr};
use zeroize::Zeroizing;

pub const MEMORY_STORE_URL: &str = "memory://";

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum AppEnvironment {
    Development,
    Production,
    Testing,
}

impl FromStr for AppEnvironment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "development" => Ok(AppEnvironment::Development),
            "production" => Ok(AppEnvironment::Production),
            "testing" => Ok(AppEnvironment::Testing),
            _ => Err(ConfigError::Message(format!("Invalid environment: {}", s))),
        }
    }
}

#[derive(Deserialize, Clone)]
#[serde(rename_all = "snake_case")]
pub struct AppConfig {
    #[serde(default = "default_env")]
    pub env: AppEnvironment,

    #[serde(default = "default_name")]
    pub name: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_worker_count")]
    pub worker_count: usize,

    #[serde(default)]
    pub database_url: String,

    /// Empty means every origin is allowed.
    #[serde(default)]
    pub cors_allowed_origins: Vec<String>,

    #[serde(default)]
    pub admin_token: String,

    #[serde(default = "default_smtp_host")]
    pub smtp_host: String,

    #[serde(default)]
    pub email_user: String,

    #[serde(default)]
    pub email_password: String,

    #[serde(default)]
    pub github_token: Option<String>,

    #[serde(default)]
    pub github_username: Option<String>,

    #[serde(default = "default_github_api_url")]
    pub github_api_url: String,
}

fn default_env() -> AppEnvironment {
    AppEnvironment::Development
}
fn default_name() -> String {
    "Portfolio-Showcase-API".to_string()
}
fn default_port() -> u16 {
    4000
}
fn default_host() -> String {
    "127.0.0.1".to_string()
}
fn default_worker_count() -> usize {
    num_cpus::get()
}
fn default_smtp_host() -> String {
    "smtp.gmail.com".to_string()
}
fn default_github_api_url() -> String {
    "https://api.github.com".to_string()
}

impl AppConfig {
    pub fn new() -> Result<Self, ConfigError> {
        dotenv().ok();

        let raw_env = env::var("APP_ENV").unwrap_or_else(|_| "development".into());
        let env_name = AppEnvironment::from_str(&raw_env)
            .map_err(|_| ConfigError::Message(format!("Invalid APP_ENV value: {}", raw_env)))?;

        let builder = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env_name.to_string().to_lowercase())).required(false))
            .add_source(
                Environment::with_prefix("APP")
                    .prefix_separator("_")
                    .ignore_empty(true)
                    .list_separator(",")
                    .with_list_parse_key("cors_allowed_origins")
                    .try_parsing(true),
            );

        let mut config: Self = builder.build()?.try_deserialize()?;

        config.env = env_name;

        // Variable names used by earlier deployments
        config.database_url = fill_or_env(config.database_url, "DATABASE_URL")?;
        config.admin_token = fill_or_legacy(config.admin_token, "ADMIN_PASSWORD");
        config.email_user = fill_or_legacy(config.email_user, "EMAIL_USER");
        config.email_password = fill_or_legacy(config.email_password, "EMAIL_PASSWORD");

        if config.github_token.is_none() {
            config.github_token = env::var("GITHUB_TOKEN").ok().filter(|v| !v.trim().is_empty());
        }
        if config.github_username.is_none() {
            config.github_username = env::var("GITHUB_USERNAME").ok().filter(|v| !v.trim().is_empty());
        }
        if config.cors_allowed_origins.is_empty() {
            if let Ok(origins) = env::var("CORS_ORIGIN") {
                config.cors_allowed_origins = vec![origins];
            }
        }
        if env::var("APP_PORT").is_err() {
            if let Some(port) = env::var("PORT").ok().and_then(|p| p.parse().ok()) {
                config.port = port;
            }
        }

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let mut errors = Vec::new();

        if self.database_url.trim().is_empty() {
            errors.push("DATABASE_URL cannot be empty");
        }
        if self.is_production() && self.uses_memory_store() {
            errors.push("The in-memory store is not allowed in production");
        }
        if self.is_production() && self.admin_token.trim().is_empty() {
            errors.push("ADMIN_TOKEN must be set in production");
        }
        if self.is_production() && self.cors_origins().iter().any(|o| o == "*") {
            errors.push("Wildcard CORS (*) is not allowed in production");
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Message(errors.join(", ")))
        }
    }

    pub fn is_production(&self) -> bool {
        self.env == AppEnvironment::Production
    }

    pub fn cors_origins(&self) -> Vec<String> {
        self.cors_allowed_origins
            .iter()
            .flat_map(|origin| origin.split(','))
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect()
    }

    /// `memory://` keeps projects in process instead of Postgres.
    pub fn uses_memory_store(&self) -> bool {
        self.database_url.trim().starts_with(MEMORY_STORE_URL)
    }

    pub fn admin_secret(&self) -> Zeroizing<String> {
        Zeroizing::new(self.admin_token.clone())
    }

    /// Both values must be present for a sync to be attempted.
    pub fn github_credentials(&self) -> Option<(String, String)> {
        let username = self.github_username.as_deref().map(str::trim).filter(|s| !s.is_empty())?;
        let token = self.github_token.as_deref().map(str::trim).filter(|s| !s.is_empty())?;
        Some((username.to_string(), token.to_string()))
    }
}

fn fill_or_env(current: String, env_key: &str) -> Result<String, ConfigError> {
    if current.trim().is_empty() {
        env::var(env_key).map_err(|_| ConfigError::Message(format!("{env_key} must be set")))
    } else {
        Ok(current)
    }
}

fn fill_or_legacy(current: String, env_key: &str) -> String {
    if current.trim().is_empty() {
        env::var(env_key).unwrap_or_default()
    } else {
        current
    }
}

impl fmt::Display for AppEnvironment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            AppEnvironment::Development => "development",
            AppEnvironment::Production => "production",
            AppEnvironment::Testing => "testing",
        };
        write!(f, "{s}")
    }
}

trait Redact {
    fn redact(&self) -> &str;
}

impl Redact for str {
    fn redact(&self) -> &str {
        if self.is_empty() {
            "[MISSING]"
        } else {
            "[REDACTED]"
        }
    }
}

impl Redact for String {
    fn redact(&self) -> &str {
        self.as_str().redact()
    }
}

impl Redact for Option<String> {
    fn redact(&self) -> &str {
        self.as_deref().unwrap_or_default().redact()
    }
}

impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("name", &self.name)
            .field("port", &self.port)
            .field("host", &self.host)
            .field("worker_count", &self.worker_count)
            .field("database_url", &self.database_url.redact())
            .field("cors_allowed_origins", &self.cors_allowed_origins)
            .field("admin_token", &self.admin_token.redact())
            .field("smtp_host", &self.smtp_host)
            .field("email_user", &self.email_user)
            .field("email_password", &self.email_password.redact())
            .field("github_token", &self.github_token.redact())
            .field("github_username", &self.github_username)
            .field("github_api_url", &self.github_api_url)
            .finish()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub fn test_config() -> AppConfig {
        AppConfig {
            env: AppEnvironment::Testing,
            name: "Portfolio Showcase Test".to_string(),
            port: 0,
            host: "127.0.0.1".to_string(),
            worker_count: 1,
            database_url: "postgres://localhost/test_db".into(),
            cors_allowed_origins: vec![],
            admin_token: "s3cret-admin".into(),
            smtp_host: default_smtp_host(),
            email_user: "owner@example.com".into(),
            email_password: "app-password".into(),
            github_token: None,
            github_username: None,
            github_api_url: default_github_api_url(),
        }
    }

    #[test]
    fn cors_origins_split_on_commas() {
        let mut config = test_config();
        config.cors_allowed_origins = vec!["https://a.dev, https://b.dev".into(), " ".into()];

        assert_eq!(config.cors_origins(), vec!["https://a.dev", "https://b.dev"]);
    }

    #[test]
    fn wildcard_cors_rejected_in_production() {
        let mut config = test_config();
        config.env = AppEnvironment::Production;
        config.cors_allowed_origins = vec!["*".into()];

        assert!(config.validate().is_err());
    }

    #[test]
    fn production_requires_admin_token() {
        let mut config = test_config();
        config.env = AppEnvironment::Production;
        config.admin_token = String::new();

        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("ADMIN_TOKEN"));
    }

    #[test]
    fn github_credentials_need_both_values() {
        let mut config = test_config();
        config.github_username = Some("octocat".into());
        assert!(config.github_credentials().is_none());

        config.github_token = Some("  ".into());
        assert!(config.github_credentials().is_none());

        config.github_token = Some("ghp_x".into());
        assert_eq!(config.github_credentials(), Some(("octocat".into(), "ghp_x".into())));
    }

    #[test]
    fn debug_output_redacts_secrets() {
        let output = format!("{:?}", test_config());
        assert!(!output.contains("s3cret-admin"));
        assert!(!output.contains("app-password"));
        assert!(output.contains("[REDACTED]"));
    }
}
