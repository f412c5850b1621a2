use anyhow::Result;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::sempro::{InMemoryRecordStore, Role, RolePrecedence, WorkflowOptions, DEFAULT_PRECEDENCE};

/// Main configuration structure for SITASI
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct SitasiConfig {
    /// Logging settings
    pub observability: ObservabilityConfig,
    /// Workflow authorisation settings
    pub workflow: WorkflowConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level used when RUST_LOG is not set
    pub log_level: String,
    /// Emit JSON log lines instead of human-readable ones
    pub json_logs: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            json_logs: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct WorkflowConfig {
    /// Effective-role precedence for multi-role users, highest first
    pub role_precedence: Vec<Role>,
    /// Maximum audit entries kept per submission
    pub history_limit: usize,
    /// Restrict students and lecturers to submissions they participate in
    pub enforce_ownership: bool,
}

impl Default for WorkflowConfig {
    fn default() -> Self {
        Self {
            role_precedence: DEFAULT_PRECEDENCE.to_vec(),
            history_limit: InMemoryRecordStore::DEFAULT_HISTORY_LIMIT,
            enforce_ownership: true,
        }
    }
}

impl WorkflowConfig {
    pub fn to_options(&self) -> WorkflowOptions {
        WorkflowOptions {
            precedence: RolePrecedence::new(self.role_precedence.iter().copied()),
            enforce_ownership: self.enforce_ownership,
        }
    }
}

impl SitasiConfig {
    /// Load configuration from multiple sources with precedence:
    /// 1. Default values
    /// 2. Configuration file (sitasi.toml)
    /// 3. Environment variables (SITASI_ prefix, `__` between nested keys,
    ///    comma-separated lists, e.g. SITASI_WORKFLOW__ROLE_PRECEDENCE=koorpro,dosen)
    pub fn load() -> Result<Self> {
        Self::build(Path::new("sitasi.toml"), Self::environment())
    }

    /// Same layering as [`SitasiConfig::load`] with explicit environment variables
    pub fn load_with_env(file: &Path, vars: config::Map<String, String>) -> Result<Self> {
        Self::build(file, Self::environment().source(Some(vars)))
    }

    fn environment() -> Environment {
        Environment::with_prefix("SITASI")
            .prefix_separator("_")
            .separator("__")
            .list_separator(",")
            .with_list_parse_key("workflow.role_precedence")
            .try_parsing(true)
    }

    fn build(file: &Path, environment: Environment) -> Result<Self> {
        let mut builder = Config::builder();

        if file.exists() {
            builder = builder.add_source(File::from(file));
        }

        let config = builder.add_source(environment).build()?;
        Ok(config.try_deserialize()?)
    }

    /// Load from an explicit file, ignoring the environment
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self> {
        let config = Config::builder()
            .add_source(File::from(path.as_ref()))
            .build()?;
        Ok(config.try_deserialize()?)
    }

    /// Save configuration to file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let toml_content = toml::to_string_pretty(self)?;
        std::fs::write(path, toml_content)?;
        Ok(())
    }

    /// Load .env file if it exists. Returns whether one was loaded; runs
    /// before logging is set up, so the caller reports it.
    pub fn load_env_file() -> Result<bool> {
        if Path::new(".env").exists() {
            dotenvy::dotenv()?;
            return Ok(true);
        }
        Ok(false)
    }
}

/// Global configuration instance
static CONFIG: std::sync::LazyLock<Result<SitasiConfig, anyhow::Error>> =
    std::sync::LazyLock::new(|| {
        let _ = SitasiConfig::load_env_file();
        SitasiConfig::load()
    });

/// Get the global configuration
pub fn config() -> Result<&'static SitasiConfig> {
    CONFIG
        .as_ref()
        .map_err(|e| anyhow::anyhow!("Failed to load configuration: {}", e))
}
