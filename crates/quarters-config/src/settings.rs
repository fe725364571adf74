//! Configuration structures.

use quarters_core::{PeriodSpec, QuartersResult};
use serde::{Deserialize, Serialize};

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub app: AppSettings,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub analysis: AnalysisSettings,
    #[serde(default)]
    pub data: DataSettings,
}

/// General app settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    pub name: String,
    pub environment: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            name: "quarters".to_string(),
            environment: "development".to_string(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    /// `pretty`, `compact` or `json`
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

/// The four analysis parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisSettings {
    pub ticker: String,
    /// `YYYY-M-D`
    pub start: String,
    /// `YYYY-M-D`, exclusive
    pub end: String,
    pub interval: String,
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            ticker: "SNAP".to_string(),
            start: "2014-1-1".to_string(),
            end: "2021-1-1".to_string(),
            interval: "1wk".to_string(),
        }
    }
}

impl AnalysisSettings {
    /// Validate the settings into a period specification.
    pub fn period_spec(&self) -> QuartersResult<PeriodSpec> {
        PeriodSpec::parse(&self.ticker, &self.start, &self.end, &self.interval)
    }
}

/// Price provider settings. Unset values use the provider defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DataSettings {
    pub base_url: Option<String>,
    pub user_agent: Option<String>,
    /// Scale prices for splits and dividends
    pub auto_adjust: bool,
}

impl Default for DataSettings {
    fn default() -> Self {
        Self {
            base_url: None,
            user_agent: None,
            auto_adjust: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_period() {
        let spec = AnalysisSettings::default().period_spec().unwrap();
        assert_eq!(spec.to_string(), "SNAP 2014-01-01..2021-01-01 @ 1wk");
    }

    #[test]
    fn test_invalid_period() {
        let settings = AnalysisSettings {
            interval: "2wk".to_string(),
            ..AnalysisSettings::default()
        };
        assert!(settings.period_spec().is_err());
    }
}
