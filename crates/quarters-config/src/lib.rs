//! Configuration management.

mod settings;

pub use settings::{AnalysisSettings, AppConfig, AppSettings, DataSettings, LoggingConfig};

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, Environment, File};
use quarters_core::{QuartersError, QuartersResult};
use std::path::Path;

/// Load configuration from an optional file and the environment.
///
/// A missing file is not an error; every section falls back to its
/// defaults. `QUARTERS_ANALYSIS__TICKER=AAPL` style variables override
/// the file.
pub fn load_config(path: &Path) -> QuartersResult<AppConfig> {
    build(
        Config::builder().add_source(File::from(path).required(false)),
        environment(),
    )
    .map_err(|e| QuartersError::Config(e.to_string()))
}

fn environment() -> Environment {
    Environment::with_prefix("QUARTERS")
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
}

fn build(
    builder: ConfigBuilder<DefaultState>,
    environment: Environment,
) -> Result<AppConfig, ConfigError> {
    builder.add_source(environment).build()?.try_deserialize()
}

#[cfg(test)]
mod tests {
    use super::*;
    use quarters_core::types::Interval;
    use std::io::Write;

    fn write_toml(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let config = load_config(Path::new("/no/such/quarters.toml")).unwrap();
        assert_eq!(config.app.name, "quarters");
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.analysis.ticker, "SNAP");
        assert!(config.data.auto_adjust);
    }

    #[test]
    fn test_partial_file_overrides() {
        let file = write_toml(
            r#"
            [analysis]
            ticker = "AAPL"
            interval = "1d"

            [logging]
            format = "json"
            "#,
        );
        let config = load_config(file.path()).unwrap();

        assert_eq!(config.analysis.ticker, "AAPL");
        assert_eq!(config.analysis.start, "2014-1-1");
        assert_eq!(config.logging.format, "json");
        assert_eq!(config.logging.level, "info");

        let spec = config.analysis.period_spec().unwrap();
        assert_eq!(spec.interval(), Interval::Day1);
    }

    #[test]
    fn test_invalid_file_is_an_error() {
        let file = write_toml("[analysis\nticker = ");
        let err = load_config(file.path()).unwrap_err();
        assert!(matches!(err, QuartersError::Config(_)));
    }

    #[test]
    fn test_environment_overrides_file() {
        let file = write_toml(
            r#"
            [analysis]
            ticker = "MSFT"
            "#,
        );
        let vars = [
            ("QUARTERS_ANALYSIS__TICKER", "AAPL"),
            ("QUARTERS_DATA__BASE_URL", "http://localhost:9000"),
            ("QUARTERS_DATA__AUTO_ADJUST", "false"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        let config = build(
            Config::builder().add_source(File::from(file.path())),
            environment().source(Some(vars)),
        )
        .unwrap();

        assert_eq!(config.analysis.ticker, "AAPL");
        assert_eq!(config.analysis.interval, "1wk");
        assert_eq!(config.data.base_url.as_deref(), Some("http://localhost:9000"));
        assert!(!config.data.auto_adjust);
    }
}
