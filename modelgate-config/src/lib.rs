//! Automatic validation configuration for modelgate
//!
//! [`AutoValidationConfig`] is what a host reads at startup: whether child
//! properties and root collection elements are validated implicitly, which
//! model types take part at all, and optionally how to log. It can be read
//! from JSON or TOML files, from `MODELGATE_*` environment variables, or
//! built in code, and is turned into a [`PolicyConfig`] with
//! [`AutoValidationConfig::into_policy`].
//!
//! # Examples
//!
//! ```
//! use modelgate_config::AutoValidationConfig;
//! use modelgate_core::ModelType;
//!
//! mod audit {
//!     pub struct AuditRecord;
//! }
//! struct Signup;
//!
//! let config = AutoValidationConfig::from_json(r#"{
//!     "filter": { "exclude": ["AuditRecord"] }
//! }"#).unwrap();
//!
//! let policy = config.into_policy();
//! assert!(policy.matches_filter(&ModelType::of::<Signup>()));
//! assert!(!policy.matches_filter(&ModelType::of::<audit::AuditRecord>()));
//! ```

pub mod env;
pub mod error;
pub mod loader;

pub use env::{DEFAULT_PREFIX, EnvLoader};
pub use error::{ConfigError, Result};
pub use loader::{ConfigLoader, FileFormat};

use modelgate_core::logging::{LogConfig, LogFormat, LogLevel};
use modelgate_core::{ModelType, PolicyConfig, TypeFilter};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, warn};

/// Type names included in or excluded from automatic validation.
///
/// A name matches a model type if it equals the full type name
/// (`app::models::Signup`) or the name without its module path (`Signup`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TypeFilterConfig {
    /// When not empty, only these types are validated
    pub include: Vec<String>,
    /// These types are never validated
    pub exclude: Vec<String>,
}

impl TypeFilterConfig {
    pub fn is_empty(&self) -> bool {
        self.include.is_empty() && self.exclude.is_empty()
    }

    pub fn matches(&self, model_type: &ModelType) -> bool {
        let short = model_type.short_name();
        let named = |name: &String| name == model_type.name() || *name == short;

        if self.exclude.iter().any(named) {
            return false;
        }
        self.include.is_empty() || self.include.iter().any(named)
    }

    fn validate(&self) -> Result<()> {
        if let Some(name) = self
            .include
            .iter()
            .chain(&self.exclude)
            .find(|name| name.trim().is_empty())
        {
            return Err(ConfigError::ValidationError(format!(
                "empty type name in filter: {:?}",
                name
            )));
        }

        if let Some(name) = self.include.iter().find(|name| self.exclude.contains(*name)) {
            return Err(ConfigError::ValidationError(format!(
                "type '{}' is both included and excluded",
                name
            )));
        }

        Ok(())
    }
}

/// Host settings for automatic validation
#[derive(Clone, Default, Deserialize)]
#[serde(default)]
pub struct AutoValidationConfig {
    /// Validate every bound child property with its own validator.
    ///
    /// Deprecated: prefer validators that include their children explicitly.
    pub implicitly_validate_child_properties: bool,

    /// Validate elements of a root collection with the element validator.
    ///
    /// Deprecated: prefer a validator for the collection type.
    pub implicitly_validate_root_collection_elements: bool,

    pub filter: TypeFilterConfig,

    /// Optional logging setup for hosts without their own subscriber
    pub logging: Option<LogConfig>,

    #[serde(skip)]
    custom_filter: Option<TypeFilter>,
}

impl AutoValidationConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load from a JSON, TOML or `.env` file, detected by extension.
    ///
    /// Env files accept bare keys (`FILTER_EXCLUDE`) and keys with the
    /// `MODELGATE_` prefix; prefixed keys win.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let loader = ConfigLoader::auto(path)?;
        let value = loader.load_file(path)?;

        debug!(path = %path.display(), format = ?loader.format(), "Loaded validation configuration");

        if loader.format() == FileFormat::Env {
            return Self::new().apply_env(&env_file_vars(value));
        }

        Self::from_value(value)
    }

    pub fn from_json(content: &str) -> Result<Self> {
        Self::from_value(ConfigLoader::new(FileFormat::Json).parse(content)?)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        Self::from_value(ConfigLoader::new(FileFormat::Toml).parse(content)?)
    }

    pub fn from_value(value: serde_json::Value) -> Result<Self> {
        let config: Self = deserialize(value)?;
        config.filter.validate()?;
        Ok(config)
    }

    /// Read `MODELGATE_*` variables from the process environment
    pub fn from_env() -> Result<Self> {
        Self::new().apply_env(&EnvLoader::default().load()?)
    }

    /// Override settings from normalised environment variables.
    ///
    /// Recognised keys: `implicitly_validate_child_properties`,
    /// `implicitly_validate_root_collection_elements`, `filter_include` and
    /// `filter_exclude` (comma separated), `log_level`, `log_format`.
    pub fn apply_env(mut self, vars: &HashMap<String, String>) -> Result<Self> {
        if let Some(value) = vars.get("implicitly_validate_child_properties") {
            self.implicitly_validate_child_properties =
                parse_bool("implicitly_validate_child_properties", value)?;
        }
        if let Some(value) = vars.get("implicitly_validate_root_collection_elements") {
            self.implicitly_validate_root_collection_elements =
                parse_bool("implicitly_validate_root_collection_elements", value)?;
        }
        if let Some(value) = vars.get("filter_include") {
            self.filter.include = split_list(value);
        }
        if let Some(value) = vars.get("filter_exclude") {
            self.filter.exclude = split_list(value);
        }
        if let Some(value) = vars.get("log_level") {
            let level: LogLevel = parse_enum("log_level", value)?;
            self.logging = Some(self.logging.unwrap_or_default().level(level));
        }
        if let Some(value) = vars.get("log_format") {
            let format: LogFormat = parse_enum("log_format", value)?;
            self.logging = Some(self.logging.unwrap_or_default().format(format));
        }

        self.filter.validate()?;
        Ok(self)
    }

    pub fn implicitly_validate_child_properties(mut self, enabled: bool) -> Self {
        self.implicitly_validate_child_properties = enabled;
        self
    }

    pub fn implicitly_validate_root_collection_elements(mut self, enabled: bool) -> Self {
        self.implicitly_validate_root_collection_elements = enabled;
        self
    }

    pub fn include<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.filter.include.extend(names.into_iter().map(Into::into));
        self
    }

    pub fn exclude<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.filter.exclude.extend(names.into_iter().map(Into::into));
        self
    }

    /// Filter model types in code. Takes precedence over the name lists.
    pub fn with_filter<F>(mut self, filter: F) -> Self
    where
        F: Fn(&ModelType) -> bool + Send + Sync + 'static,
    {
        self.custom_filter = Some(Arc::new(filter));
        self
    }

    pub fn with_logging(mut self, logging: LogConfig) -> Self {
        self.logging = Some(logging);
        self
    }

    pub fn has_custom_filter(&self) -> bool {
        self.custom_filter.is_some()
    }

    /// Build the policy the scope resolver applies
    pub fn into_policy(self) -> PolicyConfig {
        if self.implicitly_validate_child_properties {
            warn!(
                "implicitly_validate_child_properties is deprecated; \
                 include child validators explicitly instead"
            );
        }
        if self.implicitly_validate_root_collection_elements {
            warn!(
                "implicitly_validate_root_collection_elements is deprecated; \
                 register a validator for the collection type instead"
            );
        }

        let filter = match (self.custom_filter, self.filter.is_empty()) {
            (Some(filter), _) => Some(filter),
            (None, true) => None,
            (None, false) => {
                let names = self.filter;
                Some(Arc::new(move |model_type: &ModelType| names.matches(model_type)) as TypeFilter)
            }
        };

        PolicyConfig::new()
            .implicit_validation(self.implicitly_validate_child_properties)
            .implicit_root_collection_elements(self.implicitly_validate_root_collection_elements)
            .with_shared_filter(filter)
    }
}

impl fmt::Debug for AutoValidationConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AutoValidationConfig")
            .field(
                "implicitly_validate_child_properties",
                &self.implicitly_validate_child_properties,
            )
            .field(
                "implicitly_validate_root_collection_elements",
                &self.implicitly_validate_root_collection_elements,
            )
            .field("filter", &self.filter)
            .field("logging", &self.logging)
            .field("custom_filter", &self.custom_filter.as_ref().map(|_| "<fn>"))
            .finish()
    }
}

fn deserialize<T: DeserializeOwned>(value: serde_json::Value) -> Result<T> {
    serde_json::from_value(value).map_err(|e| ConfigError::DeserializationError(e.to_string()))
}

fn parse_bool(key: &str, value: &str) -> Result<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
        }),
    }
}

fn parse_enum<T: DeserializeOwned>(key: &str, value: &str) -> Result<T> {
    serde_json::from_value(serde_json::Value::String(value.trim().to_lowercase())).map_err(|_| {
        ConfigError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
        }
    })
}

// Normalise env file entries the way `from_env` does, keeping bare keys
fn env_file_vars(value: serde_json::Value) -> HashMap<String, String> {
    let serde_json::Value::Object(map) = value else {
        return HashMap::new();
    };
    let entries: Vec<(String, String)> = map
        .into_iter()
        .filter_map(|(k, v)| v.as_str().map(|s| (k.to_uppercase(), s.to_string())))
        .collect();

    let mut vars = EnvLoader::new(None).load_from(entries.clone());
    vars.extend(EnvLoader::default().load_from(entries));
    vars
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}
