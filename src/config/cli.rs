use crate::config::CalculationSettings;
use crate::domain::model::{GainBandBasis, Metric, Sex, Unit};
use crate::utils::error::Result;
use crate::utils::validation::{validate_file_extension, validate_path, validate_positive, Validate};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};

#[derive(Debug, Clone, Parser)]
#[command(name = "growth-tracker")]
#[command(about = "WHO growth-standard lookups, progress and recommendations for infants")]
pub struct CliConfig {
    /// Path to a TOML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Emit logs as JSON lines on stderr
    #[arg(long, global = true)]
    pub log_json: bool,

    /// Override the gain band basis (legacy or weekly)
    #[arg(long, global = true)]
    pub gain_band_basis: Option<GainBandBasis>,

    /// Override the number of weeks per month
    #[arg(long, global = true)]
    pub weeks_per_month: Option<f64>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Standard row for an age, interpolated between whole months
    Lookup {
        #[arg(long, allow_hyphen_values = true)]
        age: f64,
        #[arg(long)]
        sex: Sex,
    },
    /// Expected gain over the month ending at an age
    Expected {
        #[arg(long, allow_hyphen_values = true)]
        age: f64,
        #[arg(long)]
        sex: Sex,
    },
    /// Progress from a birth value toward birth + target gain
    Progress {
        #[arg(long, allow_hyphen_values = true)]
        birth: String,
        #[arg(long, allow_hyphen_values = true)]
        current: String,
        #[arg(long, allow_hyphen_values = true)]
        target_gain: String,
    },
    /// A measurement as a share of the standard at an age
    StandardProgress {
        #[arg(long, allow_hyphen_values = true)]
        value: String,
        #[arg(long)]
        unit: Unit,
        #[arg(long, allow_hyphen_values = true)]
        age: f64,
        #[arg(long)]
        sex: Sex,
        #[arg(long)]
        metric: Metric,
    },
    /// Recommended gain bands and value ranges for an age
    Recommend {
        #[arg(long, allow_hyphen_values = true)]
        age: f64,
        #[arg(long)]
        sex: Sex,
    },
    /// Assess a JSON growth record
    Assess {
        #[arg(long)]
        record: String,
        /// Assessment date, defaults to the latest measurement
        #[arg(long)]
        on: Option<NaiveDate>,
    },
    /// Export the active standards table as CSV
    Table {
        #[arg(long)]
        sex: Sex,
        #[arg(long)]
        output: Option<String>,
    },
}

impl CliConfig {
    /// Command line values win over the config file.
    pub fn apply_overrides(&self, settings: &mut CalculationSettings) {
        if let Some(basis) = self.gain_band_basis {
            settings.gain_band_basis = basis;
        }
        if let Some(weeks) = self.weeks_per_month {
            settings.weeks_per_month = weeks;
        }
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        if let Some(path) = &self.config {
            validate_path("config", path)?;
            validate_file_extension("config", path, &["toml"])?;
        }
        if let Some(weeks) = self.weeks_per_month {
            validate_positive("weeks_per_month", weeks)?;
        }
        match &self.command {
            Command::Assess { record, .. } => {
                validate_path("record", record)?;
                validate_file_extension("record", record, &["json"])?;
            }
            Command::Table {
                output: Some(output),
                ..
            } => {
                validate_path("output", output)?;
                validate_file_extension("output", output, &["csv"])?;
            }
            _ => {}
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_lookup_command() {
        let cli = CliConfig::try_parse_from(["growth-tracker", "lookup", "--age", "6", "--sex", "male"])
            .unwrap();
        match cli.command {
            Command::Lookup { age, sex } => {
                assert_eq!(age, 6.0);
                assert_eq!(sex, Sex::Male);
            }
            other => panic!("unexpected command {:?}", other),
        }
        assert!(!cli.json);
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = CliConfig::try_parse_from([
            "growth-tracker",
            "recommend",
            "--age",
            "2",
            "--sex",
            "f",
            "--json",
            "--gain-band-basis",
            "weekly",
        ])
        .unwrap();
        assert!(cli.json);

        let mut settings = CalculationSettings::default();
        cli.apply_overrides(&mut settings);
        assert_eq!(settings.gain_band_basis, GainBandBasis::Weekly);
        assert_eq!(settings.weeks_per_month, 4.3);
    }

    #[test]
    fn test_progress_values_stay_textual() {
        let cli = CliConfig::try_parse_from([
            "growth-tracker",
            "progress",
            "--birth",
            "3300",
            "--current",
            "oops",
            "--target-gain",
            "1200",
        ])
        .unwrap();
        assert!(matches!(cli.command, Command::Progress { ref current, .. } if current == "oops"));
    }

    #[test]
    fn test_rejects_unknown_sex() {
        assert!(CliConfig::try_parse_from(["growth-tracker", "lookup", "--age", "6", "--sex", "x"])
            .is_err());
    }

    #[test]
    fn test_validate_paths() {
        let cli = CliConfig::try_parse_from(["growth-tracker", "assess", "--record", "baby.txt"])
            .unwrap();
        assert!(cli.validate().is_err());

        let cli = CliConfig::try_parse_from([
            "growth-tracker",
            "assess",
            "--record",
            "baby.json",
            "--on",
            "2026-03-01",
        ])
        .unwrap();
        assert!(cli.validate().is_ok());

        let cli = CliConfig::try_parse_from([
            "growth-tracker",
            "--weeks-per-month",
            "0",
            "table",
            "--sex",
            "male",
        ])
        .unwrap();
        assert!(cli.validate().is_err());
    }
}
