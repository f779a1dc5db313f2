use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::types::Locale;

pub const DEFAULT_MAX_RANGE_DAYS: u32 = 366;
/// Four years, so a Feb 29 yearly rule always has an occurrence in the window.
pub const DEFAULT_SEARCH_HORIZON_DAYS: u32 = 1461;

/// Top-level config (cadence.toml + CADENCE_* env overrides).
///
/// Nested keys are separated by a double underscore in the environment, e.g.
/// `CADENCE_EXPANSION__MAX_RANGE_DAYS=31`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CadenceConfig {
    #[serde(default)]
    pub describe: DescribeConfig,
    #[serde(default)]
    pub expansion: ExpansionConfig,
}

/// How rule descriptions are rendered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DescribeConfig {
    #[serde(default)]
    pub locale: Locale,
}

/// Limits for date-range expansion and forward occurrence search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpansionConfig {
    /// Widest `[start, end]` span (in days, inclusive) a single range expansion
    /// may cover.
    #[serde(default = "default_max_range_days")]
    pub max_range_days: u32,
    /// How many days ahead `next_occurrence` looks before giving up.
    #[serde(default = "default_search_horizon_days")]
    pub search_horizon_days: u32,
}

impl Default for ExpansionConfig {
    fn default() -> Self {
        Self {
            max_range_days: DEFAULT_MAX_RANGE_DAYS,
            search_horizon_days: DEFAULT_SEARCH_HORIZON_DAYS,
        }
    }
}

fn default_max_range_days() -> u32 {
    DEFAULT_MAX_RANGE_DAYS
}
fn default_search_horizon_days() -> u32 {
    DEFAULT_SEARCH_HORIZON_DAYS
}

impl CadenceConfig {
    /// Load config from a TOML file with CADENCE_* env var overrides.
    ///
    /// Checks in order:
    ///   1. Explicit path argument
    ///   2. ~/.cadence/cadence.toml
    ///
    /// A missing file is not an error: built-in defaults apply.
    pub fn load(config_path: Option<&str>) -> crate::error::Result<Self> {
        let path = config_path
            .map(String::from)
            .unwrap_or_else(default_config_path);
        debug!(%path, "loading cadence config");

        let config: CadenceConfig = Figment::from(Serialized::defaults(CadenceConfig::default()))
            .merge(Toml::file(&path))
            .merge(Env::prefixed("CADENCE_").split("__"))
            .extract()
            .map_err(|e| crate::error::CadenceError::Config(e.to_string()))?;

        Ok(config)
    }
}

fn default_config_path() -> String {
    let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
    format!("{}/.cadence/cadence.toml", home)
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    #[test]
    fn missing_file_yields_defaults() {
        Jail::expect_with(|_jail| {
            let config = CadenceConfig::load(Some("does-not-exist.toml"))
                .map_err(|e| e.to_string())?;
            assert_eq!(config, CadenceConfig::default());
            assert_eq!(config.describe.locale, Locale::En);
            assert_eq!(config.expansion.max_range_days, 366);
            assert_eq!(config.expansion.search_horizon_days, 1461);
            Ok(())
        });
    }

    #[test]
    fn toml_file_overrides_defaults() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "cadence.toml",
                r#"
                [describe]
                locale = "pt"

                [expansion]
                max_range_days = 62
                "#,
            )?;
            let config = CadenceConfig::load(Some("cadence.toml")).map_err(|e| e.to_string())?;
            assert_eq!(config.describe.locale, Locale::Pt);
            assert_eq!(config.expansion.max_range_days, 62);
            // untouched keys keep their defaults
            assert_eq!(config.expansion.search_horizon_days, 1461);
            Ok(())
        });
    }

    #[test]
    fn env_overrides_file() {
        Jail::expect_with(|jail| {
            jail.create_file("cadence.toml", "[expansion]\nmax_range_days = 62\n")?;
            jail.set_env("CADENCE_EXPANSION__MAX_RANGE_DAYS", "31");
            jail.set_env("CADENCE_DESCRIBE__LOCALE", "pt");
            let config = CadenceConfig::load(Some("cadence.toml")).map_err(|e| e.to_string())?;
            assert_eq!(config.expansion.max_range_days, 31);
            assert_eq!(config.describe.locale, Locale::Pt);
            Ok(())
        });
    }

    #[test]
    fn bad_value_is_config_error() {
        Jail::expect_with(|jail| {
            jail.create_file("cadence.toml", "[describe]\nlocale = \"klingon\"\n")?;
            let err = CadenceConfig::load(Some("cadence.toml")).unwrap_err();
            assert_eq!(err.code(), "CONFIG_ERROR");
            Ok(())
        });
    }
}
