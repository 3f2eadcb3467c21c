//! Configuration for mend: parser options and logging, loaded from TOML.
//!
//! ```toml
//! [parser]
//! source_level = "1.7"
//! mode = "diet"
//! statements_recovery = false
//!
//! [logging]
//! level = "mend.recovery=trace,info"
//! json = true
//! ```

use std::path::Path;
use std::sync::Once;

use mend_syntax::{JavaLanguageLevel, ParseMode, ParseOptions};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

static TRACING_INIT: Once = Once::new();

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MendConfig {
    #[serde(default)]
    pub parser: ParserConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ParserConfig {
    /// Java source level, `"1.3"` through `"1.8"` (a bare `"8"` is accepted too).
    #[serde(default = "ParserConfig::default_source_level")]
    pub source_level: String,

    #[serde(default = "ParserConfig::default_mode")]
    pub mode: ParseMode,

    /// Keep statements of bodies that contain syntax errors.
    #[serde(default = "ParserConfig::default_statements_recovery")]
    pub statements_recovery: bool,
}

impl ParserConfig {
    fn default_source_level() -> String {
        JavaLanguageLevel::default().to_string()
    }

    fn default_mode() -> ParseMode {
        ParseMode::Full
    }

    fn default_statements_recovery() -> bool {
        true
    }
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            source_level: Self::default_source_level(),
            mode: Self::default_mode(),
            statements_recovery: Self::default_statements_recovery(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// A simple level (`info`, `debug`, ...) or a full `EnvFilter` directive string.
    #[serde(default = "LoggingConfig::default_level")]
    pub level: String,

    /// Emit logs as JSON lines.
    #[serde(default)]
    pub json: bool,
}

impl LoggingConfig {
    fn default_level() -> String {
        "info".to_owned()
    }

    fn normalize_level_directives(input: &str) -> String {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Self::default_level();
        }

        match trimmed.to_ascii_lowercase().as_str() {
            "trace" => "trace".to_owned(),
            "debug" => "debug".to_owned(),
            "info" => "info".to_owned(),
            "warn" | "warning" => "warn".to_owned(),
            "error" => "error".to_owned(),
            _ => trimmed.to_owned(),
        }
    }

    fn config_env_filter(&self) -> tracing_subscriber::EnvFilter {
        let directives = Self::normalize_level_directives(&self.level);
        tracing_subscriber::EnvFilter::try_new(directives).unwrap_or_else(|_| {
            tracing_subscriber::EnvFilter::default()
                .add_directive(tracing_subscriber::filter::LevelFilter::INFO.into())
        })
    }

    /// The effective filter: the configured level, with `RUST_LOG` merged in
    /// when set.
    pub fn env_filter(&self) -> tracing_subscriber::EnvFilter {
        let env_directives = std::env::var("RUST_LOG")
            .ok()
            .map(|value| value.trim().to_owned())
            .filter(|value| !value.is_empty());

        match env_directives {
            Some(env_directives) => {
                let combined = format!(
                    "{},{env_directives}",
                    Self::normalize_level_directives(&self.level)
                );
                tracing_subscriber::EnvFilter::try_new(combined)
                    .or_else(|_| tracing_subscriber::EnvFilter::try_new(env_directives))
                    .unwrap_or_else(|_| self.config_env_filter())
            }
            None => self.config_env_filter(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: Self::default_level(),
            json: false,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse toml config: {0}")]
    Toml(String),
    #[error("invalid source level `{0}`")]
    InvalidLanguageLevel(String),
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        // The default `Display` quotes a snippet of the input; keep only the message.
        ConfigError::Toml(err.message().to_owned())
    }
}

impl MendConfig {
    /// Load a config file from TOML.
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::load_from_str(&text)
    }

    /// Parse config from TOML text. The source level is validated eagerly so a
    /// bad file fails at load time rather than at the first parse.
    pub fn load_from_str(text: &str) -> Result<Self, ConfigError> {
        let config: MendConfig = toml::from_str(text)?;
        config.language_level()?;
        Ok(config)
    }

    pub fn language_level(&self) -> Result<JavaLanguageLevel, ConfigError> {
        self.parser
            .source_level
            .parse()
            .map_err(|_| ConfigError::InvalidLanguageLevel(self.parser.source_level.clone()))
    }

    /// Options for [`mend_syntax::parse`] and friends.
    pub fn parse_options(&self) -> Result<ParseOptions, ConfigError> {
        Ok(ParseOptions {
            language_level: self.language_level()?,
            mode: self.parser.mode,
            statements_recovery: self.parser.statements_recovery,
        })
    }
}

/// Install the global tracing subscriber: an `EnvFilter` plus a plain-text or
/// JSON `fmt` layer on stderr.
///
/// Safe to call more than once; only the first call has an effect, and a
/// subscriber installed by someone else is left alone.
pub fn init_tracing(config: &LoggingConfig) {
    TRACING_INIT.call_once(|| {
        let registry = tracing_subscriber::registry().with(config.env_filter());
        let result = if config.json {
            registry
                .with(
                    tracing_subscriber::fmt::layer()
                        .json()
                        .with_writer(std::io::stderr),
                )
                .try_init()
        } else {
            registry
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                .try_init()
        };
        if let Err(err) = result {
            tracing::debug!(target: "mend.config", error = %err, "tracing subscriber already installed");
        }
    });
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn empty_file_uses_defaults() {
        let config = MendConfig::load_from_str("").unwrap();
        assert_eq!(config, MendConfig::default());
        assert_eq!(config.parser.source_level, "1.8");
        assert_eq!(config.parse_options().unwrap(), ParseOptions::default());
    }

    #[test]
    fn parser_section_maps_to_parse_options() {
        let config = MendConfig::load_from_str(
            r#"
[parser]
source_level = "1.4"
mode = "diet"
statements_recovery = false
"#,
        )
        .unwrap();
        assert_eq!(
            config.parse_options().unwrap(),
            ParseOptions {
                language_level: JavaLanguageLevel::JAVA_1_4,
                mode: ParseMode::Diet,
                statements_recovery: false,
            }
        );
        assert_eq!(config.logging, LoggingConfig::default());
    }

    #[test]
    fn unknown_source_level_is_rejected() {
        let err = MendConfig::load_from_str("[parser]\nsource_level = \"1.2\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidLanguageLevel(ref level) if level == "1.2"));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = MendConfig::load_from_str("[parser]\ncompliance = \"1.5\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Toml(_)));
    }

    #[test]
    fn load_from_path_reads_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[logging]\nlevel = \"Warning\"\njson = true").unwrap();
        let config = MendConfig::load_from_path(file.path()).unwrap();
        assert!(config.logging.json);
        assert_eq!(LoggingConfig::normalize_level_directives(&config.logging.level), "warn");
    }

    #[test]
    fn missing_file_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mend.toml");
        let err = MendConfig::load_from_path(&path).unwrap_err();
        match err {
            ConfigError::Io { path: reported, .. } => assert_eq!(reported, path.display().to_string()),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn level_directives_pass_through() {
        assert_eq!(LoggingConfig::normalize_level_directives("  "), "info");
        assert_eq!(
            LoggingConfig::normalize_level_directives("mend.recovery=trace,info"),
            "mend.recovery=trace,info"
        );
    }

    #[test]
    fn init_tracing_is_idempotent() {
        let config = LoggingConfig::default();
        init_tracing(&config);
        init_tracing(&config);
    }
}
