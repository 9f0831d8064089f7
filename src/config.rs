use crate::utils::ConfigError;
use std::env;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 5000;
const DEFAULT_CLUSTER: &str = "cluster0.5cjch2a.mongodb.net";
const DEFAULT_APP_NAME: &str = "Cluster0";
const DEFAULT_DB_NAME: &str = "bhromonkariDB";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    MongoDB,
    /// Process-local store, nothing survives a restart
    Memory,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub backend: StoreBackend,
    pub database_url: String,
    pub database_name: String,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from any key/value source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let host = get("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port = match get("PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|_| ConfigError::Invalid { key: "PORT", value: raw })?,
            None => DEFAULT_PORT,
        };

        let backend = match get("STORE_BACKEND").as_deref().map(str::to_ascii_lowercase) {
            None => StoreBackend::MongoDB,
            Some(value) if value == "mongodb" => StoreBackend::MongoDB,
            Some(value) if value == "memory" => StoreBackend::Memory,
            Some(value) => return Err(ConfigError::Invalid { key: "STORE_BACKEND", value }),
        };

        let database_name = get("DB_NAME").unwrap_or_else(|| DEFAULT_DB_NAME.to_string());

        let database_url = match (backend, get("DATABASE_URL")) {
            (_, Some(url)) => url,
            (StoreBackend::Memory, None) => String::new(),
            (StoreBackend::MongoDB, None) => {
                let user = get("DB_USER").ok_or(ConfigError::Missing("DB_USER"))?;
                let pass = get("DB_PASS").ok_or(ConfigError::Missing("DB_PASS"))?;
                let cluster = get("DB_CLUSTER").unwrap_or_else(|| DEFAULT_CLUSTER.to_string());
                let app_name = get("DB_APP_NAME").unwrap_or_else(|| DEFAULT_APP_NAME.to_string());
                build_atlas_uri(&user, &pass, &cluster, &app_name)
            }
        };

        Ok(Self {
            host,
            port,
            backend,
            database_url,
            database_name,
        })
    }

    /// Connection string with the password masked, for logs
    pub fn redacted_database_url(&self) -> String {
        redact_credentials(&self.database_url)
    }
}

fn build_atlas_uri(user: &str, pass: &str, cluster: &str, app_name: &str) -> String {
    format!(
        "mongodb+srv://{}:{}@{}/?retryWrites=true&w=majority&appName={}",
        urlencoding::encode(user),
        urlencoding::encode(pass),
        cluster,
        urlencoding::encode(app_name),
    )
}

fn redact_credentials(uri: &str) -> String {
    let Some((scheme, rest)) = uri.split_once("://") else {
        return uri.to_string();
    };
    match rest.split_once('@') {
        Some((userinfo, host)) => {
            let user = userinfo.split(':').next().unwrap_or_default();
            format!("{}://{}:****@{}", scheme, user, host)
        }
        None => uri.to_string(),
    }
}
