// Wizard configuration
//
// Layered with the `config` crate: built-in defaults, then an optional TOML file, then
// `CARBON_WIZARD_*` environment variables.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use url::Url;

use crate::models::form::{FormDefinition, FormError};
use crate::utils::path_resolver;
use crate::utils::validation::{validate_endpoint_path, validate_server_url};

pub const ENV_PREFIX: &str = "CARBON_WIZARD";

const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:5000";
const DEFAULT_RESULTS_PATH: &str = "/results";
const DEFAULT_TIMEOUT_SECS: i64 = 12;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("configuration error: {0}")]
    Source(#[from] ::config::ConfigError),
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WizardConfig {
    /// Base URL of the results server.
    pub server_url: String,
    pub results_path: String,
    pub request_timeout_secs: u64,
    /// Alternate form definition; the built-in carbon questionnaire is used when unset.
    #[serde(default)]
    pub form_path: Option<PathBuf>,
    #[serde(default)]
    pub log_dir: Option<PathBuf>,
}

impl Default for WizardConfig {
    fn default() -> Self {
        Self {
            server_url: DEFAULT_SERVER_URL.to_string(),
            results_path: DEFAULT_RESULTS_PATH.to_string(),
            request_timeout_secs: DEFAULT_TIMEOUT_SECS as u64,
            form_path: None,
            log_dir: None,
        }
    }
}

impl WizardConfig {
    /// Load configuration. An explicit file must exist; otherwise the default locations are
    /// probed and skipped when absent.
    pub fn load(explicit_file: Option<&Path>) -> Result<Self, ConfigError> {
        match explicit_file {
            Some(path) => Self::build(Some((path, true)), ENV_PREFIX),
            None => {
                let found = path_resolver::resolve_config_file();
                Self::build(found.as_deref().map(|p| (p, false)), ENV_PREFIX)
            }
        }
    }

    fn build(file: Option<(&Path, bool)>, env_prefix: &str) -> Result<Self, ConfigError> {
        let mut builder = ::config::Config::builder()
            .set_default("server_url", DEFAULT_SERVER_URL)?
            .set_default("results_path", DEFAULT_RESULTS_PATH)?
            .set_default("request_timeout_secs", DEFAULT_TIMEOUT_SECS)?;

        if let Some((path, required)) = file {
            builder = builder.add_source(::config::File::from(path).required(required));
        }

        builder = builder
            .add_source(::config::Environment::with_prefix(env_prefix).try_parsing(true));

        let cfg: WizardConfig = builder.build()?.try_deserialize()?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_server_url(&self.server_url).map_err(|e| ConfigError::Invalid(e.to_string()))?;
        validate_endpoint_path(&self.results_path)
            .map_err(|e| ConfigError::Invalid(e.to_string()))?;
        if self.request_timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "request_timeout_secs must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Absolute URL of the results endpoint.
    pub fn results_url(&self) -> anyhow::Result<Url> {
        let base = validate_server_url(&self.server_url)?;
        let path = validate_endpoint_path(&self.results_path)?;
        base.join(&path)
            .map_err(|e| anyhow::anyhow!("Failed to build results URL: {}", e))
    }

    /// Resolve a server-provided redirect (often a bare path) against the server base URL.
    pub fn resolve_redirect(&self, target: &str) -> String {
        Url::parse(&self.server_url)
            .and_then(|base| base.join(target))
            .map(|u| u.to_string())
            .unwrap_or_else(|_| target.to_string())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn load_form(&self) -> Result<FormDefinition, FormError> {
        match &self.form_path {
            Some(path) => FormDefinition::load(path),
            None => FormDefinition::builtin(),
        }
    }
}
