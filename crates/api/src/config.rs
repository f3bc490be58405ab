use std::fmt;

use trackshare_store::AppwriteConfig;

/// Errors raised while loading configuration at startup.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{var} has an invalid value: {value}")]
    Invalid { var: &'static str, value: String },
}

/// Server configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// Share table location and credentials.
    pub store: StoreConfig,
}

/// Connection settings for the share table.
#[derive(Clone)]
pub struct StoreConfig {
    pub endpoint: String,
    pub project_id: String,
    pub database_id: String,
    pub shares_table: String,
    /// Server key used when creating shares. Lookups use the caller's key.
    pub api_key: String,
}

impl fmt::Debug for StoreConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StoreConfig")
            .field("endpoint", &self.endpoint)
            .field("project_id", &self.project_id)
            .field("database_id", &self.database_id)
            .field("shares_table", &self.shares_table)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

impl StoreConfig {
    pub fn appwrite(&self) -> AppwriteConfig {
        AppwriteConfig {
            endpoint: self.endpoint.clone(),
            project_id: self.project_id.clone(),
            database_id: self.database_id.clone(),
            table_id: self.shares_table.clone(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// | Env Var                      | Default                          |
    /// |------------------------------|----------------------------------|
    /// | `HOST`                       | `0.0.0.0`                        |
    /// | `PORT`                       | `3000`                           |
    /// | `CORS_ORIGINS`               | `http://localhost:5173`          |
    /// | `APPWRITE_ENDPOINT`          | `APPWRITE_FUNCTION_API_ENDPOINT` |
    /// | `APPWRITE_PROJECT_ID`        | `APPWRITE_FUNCTION_PROJECT_ID`   |
    /// | `APPWRITE_API_KEY`           | required                         |
    /// | `APPWRITE_DATABASE_ID`       | required                         |
    /// | `APPWRITE_SHARES_TABLE_NAME` | required                         |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let required = |name: &'static str| var(name).ok_or(ConfigError::Missing(name));

        let host = var("HOST").unwrap_or_else(|| "0.0.0.0".into());

        let port: u16 = match var("PORT") {
            Some(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid {
                var: "PORT",
                value: raw.clone(),
            })?,
            None => 3000,
        };

        let cors_origins: Vec<String> = var("CORS_ORIGINS")
            .unwrap_or_else(|| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let endpoint = var("APPWRITE_ENDPOINT")
            .or_else(|| var("APPWRITE_FUNCTION_API_ENDPOINT"))
            .ok_or(ConfigError::Missing("APPWRITE_ENDPOINT"))?;
        let project_id = var("APPWRITE_PROJECT_ID")
            .or_else(|| var("APPWRITE_FUNCTION_PROJECT_ID"))
            .ok_or(ConfigError::Missing("APPWRITE_PROJECT_ID"))?;

        let store = StoreConfig {
            endpoint,
            project_id,
            database_id: required("APPWRITE_DATABASE_ID")?,
            shares_table: required("APPWRITE_SHARES_TABLE_NAME")?,
            api_key: required("APPWRITE_API_KEY")?,
        };

        Ok(Self {
            host,
            port,
            cors_origins,
            store,
        })
    }
}
