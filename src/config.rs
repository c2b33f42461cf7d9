use crate::suno::DEFAULT_BASE_URL;
use fscore::models::UniverseSelection;
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
const DEFAULT_UNIVERSE_DIR: &str = "data";
const DEFAULT_LIQUIDITY_COLUMN: &str = "liquidity";
const CONCURRENCY_PER_CPU: usize = 8;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse YAML config: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("invalid value for {key}: {value:?}")]
    InvalidValue { key: String, value: String },

    #[error("max_concurrency must be at least 1")]
    ZeroConcurrency,

    #[error("malformed run specification: {0}")]
    RunSpec(#[from] json5::Error),

    #[error("year given twice: {positional} in the run specification and {flag} via --year")]
    ConflictingYear { positional: i32, flag: i32 },

    #[error("invalid year {year}: expected 1..={current}")]
    InvalidYear { year: i32, current: i32 },
}

/// Keys accepted in the `CONFIG_FILE` YAML document. All are optional.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigYaml {
    pub provider_base_url: Option<String>,
    pub max_concurrency: Option<usize>,
    pub request_timeout_secs: Option<u64>,
    pub universe_dir: Option<PathBuf>,
    pub min_liquidity: Option<f64>,
    pub liquidity_column: Option<String>,
}

/// Settings for one screening run, after defaults are applied.
#[derive(Clone, Debug)]
pub struct AppConfig {
    pub provider_base_url: String,
    pub max_concurrency: usize,
    pub request_timeout: Duration,
    pub universe_dir: PathBuf,
    pub min_liquidity: Option<f64>,
    pub liquidity_column: String,
}

impl AppConfig {
    /// Reads `CONFIG_FILE` when set, otherwise the `FSCORE_*` variables.
    pub fn load() -> Result<Self, ConfigError> {
        match env::var("CONFIG_FILE") {
            Ok(config_file) => Self::from_yaml(&config_file),
            Err(_) => Self::from_env(),
        }
    }

    pub fn from_yaml(file_path: &str) -> Result<Self, ConfigError> {
        let yaml_content = fs::read_to_string(file_path).map_err(|source| ConfigError::Read {
            path: file_path.to_string(),
            source,
        })?;
        Self::from_yaml_str(&yaml_content)
    }

    pub fn from_yaml_str(yaml_content: &str) -> Result<Self, ConfigError> {
        let yaml_config: ConfigYaml = serde_yaml::from_str(yaml_content)?;
        Self::from_parts(yaml_config)
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Reads the `FSCORE_*` variables through `lookup`. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        Self::from_parts(ConfigYaml {
            provider_base_url: lookup("FSCORE_PROVIDER_URL"),
            max_concurrency: parse_var(&lookup, "FSCORE_MAX_CONCURRENCY")?,
            request_timeout_secs: parse_var(&lookup, "FSCORE_REQUEST_TIMEOUT")?,
            universe_dir: lookup("FSCORE_UNIVERSE_DIR").map(PathBuf::from),
            min_liquidity: parse_var(&lookup, "FSCORE_MIN_LIQUIDITY")?,
            liquidity_column: lookup("FSCORE_LIQUIDITY_COLUMN"),
        })
    }

    fn from_parts(yaml_config: ConfigYaml) -> Result<Self, ConfigError> {
        let config = Self {
            provider_base_url: yaml_config
                .provider_base_url
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            max_concurrency: yaml_config
                .max_concurrency
                .unwrap_or_else(|| num_cpus::get() * CONCURRENCY_PER_CPU),
            request_timeout: Duration::from_secs(
                yaml_config.request_timeout_secs.unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS),
            ),
            universe_dir: yaml_config
                .universe_dir
                .unwrap_or_else(|| PathBuf::from(DEFAULT_UNIVERSE_DIR)),
            min_liquidity: yaml_config.min_liquidity,
            liquidity_column: yaml_config
                .liquidity_column
                .unwrap_or_else(|| DEFAULT_LIQUIDITY_COLUMN.to_string()),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_concurrency == 0 {
            return Err(ConfigError::ZeroConcurrency);
        }
        if let Some(min) = self.min_liquidity {
            if !min.is_finite() {
                return Err(ConfigError::InvalidValue {
                    key: "min_liquidity".to_string(),
                    value: min.to_string(),
                });
            }
        }
        Ok(())
    }
}

fn parse_var<T, F>(lookup: &F, key: &str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        None => Ok(None),
        Some(raw) => raw.trim().parse().map(Some).map_err(|_| ConfigError::InvalidValue {
            key: key.to_string(),
            value: raw,
        }),
    }
}

/// Positional run specification, e.g. `{year: 2019}` or `{'year': 2019}`.
#[derive(Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RunSpec {
    #[serde(default)]
    pub year: Option<i32>,
}

impl RunSpec {
    pub fn parse(text: &str) -> Result<Self, ConfigError> {
        Ok(json5::from_str(text)?)
    }
}

/// Picks the universe from the positional year and the `--year` flag.
pub fn resolve_year(
    positional: Option<i32>,
    flag: Option<i32>,
    current_year: i32,
) -> Result<UniverseSelection, ConfigError> {
    let year = match (positional, flag) {
        (Some(positional), Some(flag)) => {
            return Err(ConfigError::ConflictingYear { positional, flag });
        }
        (year, None) | (None, year) => year,
    };

    if let Some(year) = year {
        if year < 1 || year > current_year {
            return Err(ConfigError::InvalidYear {
                year,
                current: current_year,
            });
        }
    }
    Ok(UniverseSelection::from_year(year))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults_from_empty_environment() {
        let config = AppConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.provider_base_url, DEFAULT_BASE_URL);
        assert_eq!(config.max_concurrency, num_cpus::get() * CONCURRENCY_PER_CPU);
        assert_eq!(config.request_timeout, Duration::from_secs(30));
        assert_eq!(config.universe_dir, PathBuf::from("data"));
        assert_eq!(config.min_liquidity, None);
        assert_eq!(config.liquidity_column, "liquidity");
    }

    #[test]
    fn test_environment_overrides() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("FSCORE_PROVIDER_URL", "http://localhost:9000/api"),
            ("FSCORE_MAX_CONCURRENCY", "4"),
            ("FSCORE_REQUEST_TIMEOUT", " 5 "),
            ("FSCORE_UNIVERSE_DIR", "/tmp/universes"),
            ("FSCORE_MIN_LIQUIDITY", "500"),
            ("FSCORE_LIQUIDITY_COLUMN", "liq2m"),
        ]))
        .unwrap();
        assert_eq!(config.provider_base_url, "http://localhost:9000/api");
        assert_eq!(config.max_concurrency, 4);
        assert_eq!(config.request_timeout, Duration::from_secs(5));
        assert_eq!(config.universe_dir, PathBuf::from("/tmp/universes"));
        assert_eq!(config.min_liquidity, Some(500.0));
        assert_eq!(config.liquidity_column, "liq2m");
    }

    #[test]
    fn test_blank_variable_is_unset() {
        let config = AppConfig::from_lookup(lookup_from(&[("FSCORE_REQUEST_TIMEOUT", "  ")])).unwrap();
        assert_eq!(config.request_timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_unparsable_variable_names_key() {
        let err = AppConfig::from_lookup(lookup_from(&[("FSCORE_MAX_CONCURRENCY", "lots")])).unwrap_err();
        match err {
            ConfigError::InvalidValue { key, value } => {
                assert_eq!(key, "FSCORE_MAX_CONCURRENCY");
                assert_eq!(value, "lots");
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_zero_concurrency_rejected() {
        let err = AppConfig::from_lookup(lookup_from(&[("FSCORE_MAX_CONCURRENCY", "0")])).unwrap_err();
        assert!(matches!(err, ConfigError::ZeroConcurrency));
    }

    #[test]
    fn test_yaml_config() {
        let config = AppConfig::from_yaml_str(
            "provider_base_url: http://mirror/api\nmax_concurrency: 2\nmin_liquidity: 750.5\n",
        )
        .unwrap();
        assert_eq!(config.provider_base_url, "http://mirror/api");
        assert_eq!(config.max_concurrency, 2);
        assert_eq!(config.min_liquidity, Some(750.5));
        assert_eq!(config.universe_dir, PathBuf::from("data"));
    }

    #[test]
    fn test_yaml_unknown_key_rejected() {
        assert!(matches!(
            AppConfig::from_yaml_str("port: 8888\n"),
            Err(ConfigError::Yaml(_))
        ));
    }

    #[test]
    fn test_missing_config_file() {
        let err = AppConfig::from_yaml("/nonexistent/fscore.yaml").unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn test_run_spec_forms() {
        assert_eq!(RunSpec::parse(r#"{"year": 2019}"#).unwrap().year, Some(2019));
        assert_eq!(RunSpec::parse("{'year': 2019}").unwrap().year, Some(2019));
        assert_eq!(RunSpec::parse("{year: 2015}").unwrap().year, Some(2015));
        assert_eq!(RunSpec::parse("{}").unwrap(), RunSpec::default());
    }

    #[test]
    fn test_run_spec_rejects_bad_input() {
        assert!(matches!(RunSpec::parse("{'month': 3}"), Err(ConfigError::RunSpec(_))));
        assert!(matches!(RunSpec::parse("{'year': 2019.5}"), Err(ConfigError::RunSpec(_))));
        assert!(matches!(RunSpec::parse("{'year': '2019'}"), Err(ConfigError::RunSpec(_))));
        assert!(matches!(RunSpec::parse("__import__('os')"), Err(ConfigError::RunSpec(_))));
    }

    #[test]
    fn test_resolve_year() {
        assert_eq!(resolve_year(None, None, 2024).unwrap(), UniverseSelection::Current);
        assert_eq!(resolve_year(Some(2019), None, 2024).unwrap(), UniverseSelection::Historical(2019));
        assert_eq!(resolve_year(None, Some(2024), 2024).unwrap(), UniverseSelection::Historical(2024));
    }

    #[test]
    fn test_resolve_year_rejects_conflicts_and_range() {
        assert!(matches!(
            resolve_year(Some(2019), Some(2019), 2024),
            Err(ConfigError::ConflictingYear { .. })
        ));
        assert!(matches!(
            resolve_year(Some(2030), None, 2024),
            Err(ConfigError::InvalidYear { year: 2030, .. })
        ));
        assert!(matches!(
            resolve_year(None, Some(0), 2024),
            Err(ConfigError::InvalidYear { year: 0, .. })
        ));
    }
}
