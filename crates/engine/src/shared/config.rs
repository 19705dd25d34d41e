use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub input: InputConfig,
    pub output: OutputConfig,
    #[serde(default)]
    pub analysis: AnalysisConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct InputConfig {
    /// Path to the raw sales export
    pub path: String,
    /// Field delimiter of the export, single character
    #[serde(default = "default_delimiter")]
    pub delimiter: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct OutputConfig {
    pub dir: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AnalysisConfig {
    #[serde(default = "default_top_products")]
    pub top_products: usize,
    #[serde(default = "default_top_staff")]
    pub top_staff: usize,
    #[serde(default = "default_forecast_months")]
    pub forecast_months: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            top_products: default_top_products(),
            top_staff: default_top_staff(),
            forecast_months: default_forecast_months(),
        }
    }
}

fn default_delimiter() -> String {
    ";".to_string()
}

fn default_top_products() -> usize {
    10
}

fn default_top_staff() -> usize {
    10
}

fn default_forecast_months() -> usize {
    3
}

/// Default configuration embedded in the binary
const DEFAULT_CONFIG: &str = r#"
[input]
path = "data/sales_export.csv"
delimiter = ";"

[output]
dir = "output"

[analysis]
top_products = 10
top_staff = 10
forecast_months = 3
"#;

/// Load configuration from config.toml
///
/// Search order:
/// 1. Explicit path when given (errors if unreadable)
/// 2. config.toml in the current directory
/// 3. config.toml next to the executable
/// 4. Falls back to embedded default config
pub fn load_config(explicit: Option<&Path>) -> anyhow::Result<Config> {
    if let Some(path) = explicit {
        tracing::info!("Loading config from: {}", path.display());
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        return Ok(config);
    }

    let cwd_config = Path::new("config.toml");
    if cwd_config.exists() {
        tracing::info!("Loading config from: {}", cwd_config.display());
        let contents = std::fs::read_to_string(cwd_config)?;
        let config: Config = toml::from_str(&contents)?;
        return Ok(config);
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            let config_path = exe_dir.join("config.toml");

            if config_path.exists() {
                tracing::info!("Loading config from: {}", config_path.display());
                let contents = std::fs::read_to_string(&config_path)?;
                let config: Config = toml::from_str(&contents)?;
                return Ok(config);
            }
        }
    }

    tracing::info!("Using default embedded configuration");
    let config: Config = toml::from_str(DEFAULT_CONFIG)?;
    Ok(config)
}

impl Config {
    pub fn input_path(&self) -> PathBuf {
        PathBuf::from(&self.input.path)
    }

    pub fn output_dir(&self) -> PathBuf {
        PathBuf::from(&self.output.dir)
    }

    pub fn cleaned_data_path(&self) -> PathBuf {
        self.output_dir().join("cleaned_data.csv")
    }

    pub fn pivots_dir(&self) -> PathBuf {
        self.output_dir().join("pivots")
    }

    pub fn charts_dir(&self) -> PathBuf {
        self.output_dir().join("charts")
    }

    /// Delimiter as a single byte for the CSV reader
    pub fn delimiter_byte(&self) -> anyhow::Result<u8> {
        let bytes = self.input.delimiter.as_bytes();
        if bytes.len() != 1 {
            anyhow::bail!(
                "input.delimiter must be a single character, got {:?}",
                self.input.delimiter
            );
        }
        Ok(bytes[0])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_loads() {
        let config: Result<Config, _> = toml::from_str(DEFAULT_CONFIG);
        assert!(config.is_ok());
        let config = config.unwrap();
        assert_eq!(config.input.path, "data/sales_export.csv");
        assert_eq!(config.input.delimiter, ";");
        assert_eq!(config.output.dir, "output");
        assert_eq!(config.analysis.forecast_months, 3);
    }

    #[test]
    fn test_analysis_section_is_optional() {
        let config: Config = toml::from_str(
            r#"
            [input]
            path = "x.csv"

            [output]
            dir = "out"
            "#,
        )
        .unwrap();
        assert_eq!(config.input.delimiter, ";");
        assert_eq!(config.analysis.top_products, 10);
        assert_eq!(config.analysis.top_staff, 10);
    }

    #[test]
    fn test_delimiter_byte_rejects_multichar() {
        let mut config: Config = toml::from_str(DEFAULT_CONFIG).unwrap();
        assert_eq!(config.delimiter_byte().unwrap(), b';');
        config.input.delimiter = ";;".to_string();
        assert!(config.delimiter_byte().is_err());
    }
}
