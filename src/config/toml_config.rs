use crate::config::CalculationSettings;
use crate::core::standards::{TableStandards, WhoStandards};
use crate::domain::model::GainBandBasis;
use crate::domain::ports::{ConfigProvider, StandardsSource};
use crate::utils::error::{GrowthError, Result};
use crate::utils::validation::{
    validate_file_extension, validate_path, validate_required_field, Validate,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub calculation: CalculationSettings,
    pub standards: Option<StandardsConfig>,
    pub logging: Option<LoggingConfig>,

    /// Directory of the loaded file; relative table paths resolve against it.
    #[serde(skip)]
    pub base_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StandardsConfig {
    pub male_csv: Option<String>,
    pub female_csv: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: Option<String>,
    pub json: Option<bool>,
}

impl TomlConfig {
    /// Loads configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(GrowthError::IoError)?;
        let mut config = Self::from_toml_str(&content)?;
        config.base_dir = path.as_ref().parent().map(Path::to_path_buf);
        Ok(config)
    }

    /// Parses configuration from a TOML string
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| GrowthError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value, leaving unknown names as-is
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| GrowthError::ConfigValidationError {
            field: "env_substitution".to_string(),
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        self.calculation.validate()?;

        if let Some(standards) = &self.standards {
            if standards.male_csv.is_some() || standards.female_csv.is_some() {
                let male = validate_required_field("standards.male_csv", &standards.male_csv)?;
                let female =
                    validate_required_field("standards.female_csv", &standards.female_csv)?;
                for (field, path) in [("standards.male_csv", male), ("standards.female_csv", female)]
                {
                    validate_path(field, path)?;
                    validate_file_extension(field, path, &["csv"])?;
                }
            }
        }

        if let Some(level) = self.logging.as_ref().and_then(|l| l.level.as_deref()) {
            let valid_levels = ["error", "warn", "info", "debug", "trace"];
            if !valid_levels.contains(&level.to_ascii_lowercase().as_str()) {
                return Err(GrowthError::InvalidConfigValueError {
                    field: "logging.level".to_string(),
                    value: level.to_string(),
                    reason: format!("Valid levels: {}", valid_levels.join(", ")),
                });
            }
        }

        Ok(())
    }

    fn resolve(&self, path: &str) -> PathBuf {
        let path = Path::new(path);
        match &self.base_dir {
            Some(base) if path.is_relative() => base.join(path),
            _ => path.to_path_buf(),
        }
    }

    /// The configured table, or the compiled-in WHO table when none is set.
    pub fn load_standards(&self) -> Result<Box<dyn StandardsSource>> {
        let paths = self
            .standards
            .as_ref()
            .and_then(|s| s.male_csv.as_deref().zip(s.female_csv.as_deref()));

        match paths {
            Some((male, female)) => {
                let table = TableStandards::from_csv_paths(self.resolve(male), self.resolve(female))?;
                tracing::info!("Using custom standards tables");
                Ok(Box::new(table))
            }
            None => Ok(Box::new(WhoStandards)),
        }
    }

    pub fn json_logging(&self) -> bool {
        self.logging.as_ref().and_then(|l| l.json).unwrap_or(false)
    }

    pub fn verbose_logging(&self) -> bool {
        matches!(
            self.logging
                .as_ref()
                .and_then(|l| l.level.as_deref())
                .map(str::to_ascii_lowercase)
                .as_deref(),
            Some("debug") | Some("trace")
        )
    }
}

impl ConfigProvider for TomlConfig {
    fn weeks_per_month(&self) -> f64 {
        self.calculation.weeks_per_month
    }

    fn gain_band_tolerance(&self) -> f64 {
        self.calculation.gain_band_tolerance
    }

    fn weight_range_tolerance(&self) -> f64 {
        self.calculation.weight_range_tolerance
    }

    fn length_range_tolerance(&self) -> f64 {
        self.calculation.length_range_tolerance
    }

    fn gain_band_basis(&self) -> GainBandBasis {
        self.calculation.gain_band_basis
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
