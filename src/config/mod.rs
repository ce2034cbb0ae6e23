#[cfg(feature = "cli")]
pub mod cli;

use crate::domain::model::{Contact, ExtractionPipeline, RawTable, UpsertMode};
use crate::utils::error::{ExtPipesError, Result};
use crate::utils::validation::{validate_non_empty, validate_schedule, validate_url, Validate};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::env;
use std::path::Path;

pub const DEFAULT_BASE_URL: &str = "https://api.cognitedata.com";
pub const DEFAULT_LIST_LIMIT: usize = 100;
pub const MAX_LIST_LIMIT: usize = 1000;

/// Credentials for the API: a legacy api-key or a bearer token. Exactly one
/// must be configured.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Credentials {
    ApiKey(String),
    Token(String),
}

/// Connection settings shared by every endpoint call.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub project: String,
    pub base_url: String,
    pub credentials: Credentials,
    /// Sent as the `x-cdp-app` header so the platform can attribute traffic.
    pub client_name: String,
    pub list_limit: usize,
    pub max_retries: u32,
    pub retry_delay_ms: u64,
    pub upsert_mode: UpsertMode,
}

impl ClientConfig {
    pub fn new(project: impl Into<String>, credentials: Credentials) -> Self {
        Self {
            project: project.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            credentials,
            client_name: concat!("cdf-extpipes/", env!("CARGO_PKG_VERSION")).to_string(),
            list_limit: DEFAULT_LIST_LIMIT,
            max_retries: 3,
            retry_delay_ms: 500,
            upsert_mode: UpsertMode::Update,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_list_limit(mut self, limit: usize) -> Self {
        self.list_limit = limit;
        self
    }

    pub fn with_upsert_mode(mut self, mode: UpsertMode) -> Self {
        self.upsert_mode = mode;
        self
    }

    /// Reads `CDF_PROJECT`, `CDF_BASE_URL`, `CDF_API_KEY` / `CDF_TOKEN` and
    /// `CDF_CLIENT_NAME` from the environment.
    pub fn from_env() -> Result<Self> {
        let project = env::var("CDF_PROJECT")
            .map_err(|_| ExtPipesError::config("CDF_PROJECT is not set"))?;
        let credentials = match (env::var("CDF_API_KEY"), env::var("CDF_TOKEN")) {
            (Ok(_), Ok(_)) => {
                return Err(ExtPipesError::config(
                    "Set either CDF_API_KEY or CDF_TOKEN, not both",
                ))
            }
            (Ok(key), _) => Credentials::ApiKey(key),
            (_, Ok(token)) => Credentials::Token(token),
            _ => {
                return Err(ExtPipesError::config(
                    "Neither CDF_API_KEY nor CDF_TOKEN is set",
                ))
            }
        };

        let mut config = ClientConfig::new(project, credentials);
        if let Ok(base_url) = env::var("CDF_BASE_URL") {
            config.base_url = base_url;
        }
        if let Ok(client_name) = env::var("CDF_CLIENT_NAME") {
            config.client_name = client_name;
        }
        config.validate()?;
        Ok(config)
    }

    pub fn from_toml_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        let file: ClientConfigFile =
            toml::from_str(&content).map_err(|e| ExtPipesError::Config {
                message: format!("Failed to parse config file: {}", e),
            })?;
        let config: ClientConfig = file.try_into()?;
        config.validate()?;
        Ok(config)
    }
}

impl Validate for ClientConfig {
    fn validate(&self) -> Result<()> {
        validate_non_empty("project", &self.project)?;
        validate_url("base_url", &self.base_url)?;
        match &self.credentials {
            Credentials::ApiKey(key) => validate_non_empty("api_key", key)?,
            Credentials::Token(token) => validate_non_empty("token", token)?,
        }
        if self.list_limit == 0 || self.list_limit > MAX_LIST_LIMIT {
            return Err(ExtPipesError::Validation {
                field: "list_limit".to_string(),
                value: self.list_limit.to_string(),
                reason: format!("Limit must be between 1 and {}", MAX_LIST_LIMIT),
            });
        }
        Ok(())
    }
}

// --- TOML file representation -----------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ClientConfigFile {
    client: ClientSection,
    auth: AuthSection,
    limits: Option<LimitsSection>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ClientSection {
    project: String,
    base_url: Option<String>,
    client_name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct AuthSection {
    api_key: Option<String>,
    token: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct LimitsSection {
    list_limit: Option<usize>,
    max_retries: Option<u32>,
    retry_delay_ms: Option<u64>,
    upsert_mode: Option<UpsertMode>,
}

impl TryFrom<ClientConfigFile> for ClientConfig {
    type Error = ExtPipesError;

    fn try_from(file: ClientConfigFile) -> Result<Self> {
        let credentials = match (file.auth.api_key, file.auth.token) {
            (Some(_), Some(_)) => {
                return Err(ExtPipesError::config(
                    "Config file sets both api_key and token",
                ))
            }
            (Some(key), None) => Credentials::ApiKey(key),
            (None, Some(token)) => Credentials::Token(token),
            (None, None) => {
                return Err(ExtPipesError::config(
                    "Config file sets neither api_key nor token",
                ))
            }
        };

        let mut config = ClientConfig::new(file.client.project, credentials);
        if let Some(base_url) = file.client.base_url {
            config.base_url = base_url;
        }
        if let Some(client_name) = file.client.client_name {
            config.client_name = client_name;
        }
        if let Some(limits) = file.limits {
            if let Some(limit) = limits.list_limit {
                config.list_limit = limit;
            }
            if let Some(retries) = limits.max_retries {
                config.max_retries = retries;
            }
            if let Some(delay) = limits.retry_delay_ms {
                config.retry_delay_ms = delay;
            }
            if let Some(mode) = limits.upsert_mode {
                config.upsert_mode = mode;
            }
        }
        Ok(config)
    }
}

// --- Pipeline declaration files (CLI upsert input) --------------------------

/// `[[pipelines]]` entries in a declaration file, snake_case on disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineSpec {
    pub external_id: String,
    pub name: String,
    pub description: Option<String>,
    pub data_set_id: Option<i64>,
    pub raw_tables: Option<Vec<RawTableSpec>>,
    pub schedule: Option<String>,
    pub contacts: Option<Vec<ContactSpec>>,
    pub metadata: Option<HashMap<String, String>>,
    pub source: Option<String>,
    pub documentation: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawTableSpec {
    pub db_name: String,
    pub table_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactSpec {
    pub name: Option<String>,
    pub email: Option<String>,
    pub role: Option<String>,
    pub send_notification: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelinesFile {
    pub pipelines: Vec<PipelineSpec>,
}

impl PipelinesFile {
    pub fn from_toml_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        let file: PipelinesFile = toml::from_str(&content).map_err(|e| ExtPipesError::Config {
            message: format!("Failed to parse pipelines file: {}", e),
        })?;
        file.validate()?;
        Ok(file)
    }
}

impl Validate for PipelinesFile {
    fn validate(&self) -> Result<()> {
        for spec in &self.pipelines {
            validate_non_empty("pipelines.external_id", &spec.external_id)?;
            validate_non_empty("pipelines.name", &spec.name)?;
            if let Some(schedule) = &spec.schedule {
                validate_schedule("pipelines.schedule", schedule)?;
            }
        }
        Ok(())
    }
}

impl From<PipelineSpec> for ExtractionPipeline {
    fn from(spec: PipelineSpec) -> Self {
        ExtractionPipeline {
            external_id: Some(spec.external_id),
            name: Some(spec.name),
            description: spec.description,
            data_set_id: spec.data_set_id,
            raw_tables: spec.raw_tables.map(|tables| {
                tables
                    .into_iter()
                    .map(|t| RawTable {
                        db_name: t.db_name,
                        table_name: t.table_name,
                    })
                    .collect()
            }),
            schedule: spec.schedule,
            contacts: spec.contacts.map(|contacts| {
                contacts
                    .into_iter()
                    .map(|c| Contact {
                        name: c.name,
                        email: c.email,
                        role: c.role,
                        send_notification: c.send_notification,
                    })
                    .collect()
            }),
            metadata: spec.metadata,
            source: spec.source,
            documentation: spec.documentation,
            ..Default::default()
        }
    }
}
