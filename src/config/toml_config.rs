use crate::config::{defaults, AppConfig, DEFAULT_OUTPUT_PATH, DEFAULT_SNAPSHOT_FILE};
use crate::core::fallback::FallbackMenus;
use crate::domain::model::{MenuItem, SnapshotFormat, Source};
use crate::domain::ports::FetchSettings;
use crate::utils::error::{MenuError, Result};
use crate::utils::validation::Validate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::sync::OnceLock;

/// Layout of the optional configuration file.
///
/// ```toml
/// [fetch]
/// timeout_seconds = 12
///
/// [output]
/// path = "./public/data"
/// format = "menus"
///
/// [[sources]]
/// id = "smichovna"
/// name = "Smíchovna"
/// url = "https://www.smichovna.cz/tydenni-nabidka"
/// strategy = "weekly"
///
/// [fallback]
/// smichovna = [{ type = "soup", name = "Hovězí vývar s nudlemi", price = 45 }]
/// ```
///
/// Omitting `sources` or `fallback` keeps the built-in restaurants.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub fetch: FetchConfig,
    #[serde(default)]
    pub output: OutputConfig,
    pub sources: Option<Vec<Source>>,
    pub fallback: Option<HashMap<String, Vec<MenuItem>>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FetchConfig {
    pub timeout_seconds: Option<u64>,
    pub retries: Option<u32>,
    pub retry_delay_ms: Option<u64>,
    pub user_agent: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    pub path: Option<String>,
    pub snapshot_file: Option<String>,
    pub format: Option<SnapshotFormat>,
}

impl TomlConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);
        Ok(toml::from_str(&processed_content)?)
    }

    /// Replaces `${VAR}` with the value of the environment variable. Unknown
    /// variables are left as written.
    fn substitute_env_vars(content: &str) -> String {
        use regex::Regex;
        static RE: OnceLock<Regex> = OnceLock::new();
        let re = RE.get_or_init(|| Regex::new(r"\$\{([^}]+)\}").expect("regex should be valid"));

        re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        })
        .to_string()
    }

    pub fn into_app_config(self) -> AppConfig {
        let default_fetch = FetchSettings::default();
        let fetch = FetchSettings {
            timeout_seconds: self.fetch.timeout_seconds.unwrap_or(default_fetch.timeout_seconds),
            retries: self.fetch.retries.unwrap_or(default_fetch.retries),
            retry_delay_ms: self.fetch.retry_delay_ms.unwrap_or(default_fetch.retry_delay_ms),
            user_agent: self.fetch.user_agent.unwrap_or(default_fetch.user_agent),
        };

        AppConfig {
            sources: self.sources.unwrap_or_else(defaults::default_sources),
            fallback_menus: self
                .fallback
                .map(FallbackMenus::new)
                .unwrap_or_else(defaults::default_fallback_menus),
            fetch,
            output_path: self
                .output
                .path
                .unwrap_or_else(|| DEFAULT_OUTPUT_PATH.to_string()),
            snapshot_file: self
                .output
                .snapshot_file
                .unwrap_or_else(|| DEFAULT_SNAPSHOT_FILE.to_string()),
            snapshot_format: self.output.format.unwrap_or_default(),
            weekday: None,
        }
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        if let Some(sources) = &self.sources {
            if sources.is_empty() {
                return Err(MenuError::Config {
                    message: "`sources` is present but empty".to_string(),
                });
            }
        }
        self.clone().into_app_config().validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::StrategyKind;
    use crate::domain::ports::ConfigProvider;
    use chrono::Weekday;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_full_config() {
        let toml_content = r#"
[fetch]
timeout_seconds = 15
retries = 1
user_agent = "menicka-bot/1.0"

[output]
path = "./data"
snapshot_file = "menu.json"
format = "legacy"

[[sources]]
id = "smichovna"
name = "Smíchovna"
url = "https://www.smichovna.cz/tydenni-nabidka"
strategy = "weekly"

[[sources]]
id = "corleone-andel"
name = "Corleone Anděl"
url = "https://www.corleone.cz/poledni-menu-andel"
prefer_today_section = true
prefer_czech = true

[fallback]
smichovna = [
  { type = "soup", name = "Hovězí vývar s nudlemi", price = 45 },
]
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert!(config.validate().is_ok());

        let app = config.into_app_config();
        assert_eq!(app.sources().len(), 2);
        assert_eq!(app.sources()[0].strategy, StrategyKind::Weekly);
        assert_eq!(app.sources()[1].strategy, StrategyKind::SingleDay);
        assert!(app.sources()[1].prefer_czech);
        assert_eq!(app.fetch_settings().timeout_seconds, 15);
        assert_eq!(app.fetch_settings().retry_delay_ms, 500);
        assert_eq!(app.snapshot_format(), SnapshotFormat::Legacy);
        assert_eq!(app.snapshot_file(), "menu.json");
        assert!(app.fallback_menus().for_day("smichovna", Weekday::Tue).is_some());
        assert!(app.fallback_menus().for_day("corleone-andel", Weekday::Tue).is_none());
    }

    #[test]
    fn test_empty_file_uses_builtins() {
        let app = TomlConfig::from_toml_str("").unwrap().into_app_config();
        assert_eq!(app.sources().len(), 5);
        assert_eq!(app.output_path(), "./public/data");
        assert!(app.fallback_menus().for_day("u-mamlasu", Weekday::Mon).is_some());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("MENICKA_TEST_OUTPUT", "/srv/menicka");

        let config = TomlConfig::from_toml_str(
            r#"
[output]
path = "${MENICKA_TEST_OUTPUT}"
"#,
        )
        .unwrap();
        assert_eq!(config.output.path.as_deref(), Some("/srv/menicka"));

        std::env::remove_var("MENICKA_TEST_OUTPUT");
    }

    #[test]
    fn test_invalid_source_url_fails_validation() {
        let config = TomlConfig::from_toml_str(
            r#"
[[sources]]
id = "x"
name = "X"
url = "invalid-url"
"#,
        )
        .unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_syntax_error_is_reported() {
        let err = TomlConfig::from_toml_str("[fetch\ntimeout_seconds = 1").unwrap_err();
        assert!(matches!(err, MenuError::Toml(_)));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[fetch]\nretries = 0\n")
            .unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.fetch.retries, Some(0));
    }
}
