use crate::config::cli::Command;
use crate::core::engine::GrowthEngine;
use crate::core::standards::write_rows;
use crate::domain::model::{
    ExpectedGrowth, GrowthAssessment, GrowthRecord, GrowthStandardRow, Measurement, Metric,
    ProgressResult, RecommendationBundle, Sex,
};
use crate::domain::ports::{ConfigProvider, StandardsSource};
use crate::utils::error::{GrowthError, Result};
use crate::utils::numeric::parse_or_zero;
use crate::utils::validation::Validate;
use chrono::NaiveDate;
use serde::Serialize;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CommandOutput {
    Lookup {
        sex: Sex,
        row: GrowthStandardRow,
    },
    Expected {
        sex: Sex,
        age_months: f64,
        growth: ExpectedGrowth,
    },
    Progress(ProgressResult),
    StandardProgress {
        metric: Metric,
        measurement: Measurement,
        percentage: u8,
    },
    Recommendations(RecommendationBundle),
    Assessment {
        on: NaiveDate,
        assessment: GrowthAssessment,
    },
    TableCsv {
        sex: Sex,
        csv: String,
    },
    TableWritten {
        sex: Sex,
        path: String,
        rows: usize,
    },
}

pub fn run_command<S, C>(engine: &GrowthEngine<S, C>, command: &Command) -> Result<CommandOutput>
where
    S: StandardsSource,
    C: ConfigProvider,
{
    let output = match command {
        Command::Lookup { age, sex } => CommandOutput::Lookup {
            sex: *sex,
            row: engine.lookup(*age, *sex),
        },
        Command::Expected { age, sex } => CommandOutput::Expected {
            sex: *sex,
            age_months: *age,
            growth: engine.expected_monthly_growth(*age, *sex),
        },
        Command::Progress {
            birth,
            current,
            target_gain,
        } => CommandOutput::Progress(engine.progress_result(
            parse_or_zero(birth),
            parse_or_zero(current),
            parse_or_zero(target_gain),
        )),
        Command::StandardProgress {
            value,
            unit,
            age,
            sex,
            metric,
        } => {
            let measurement = Measurement::new(parse_or_zero(value), *unit);
            CommandOutput::StandardProgress {
                metric: *metric,
                measurement,
                percentage: engine.progress_relative_to_standard(measurement, *age, *sex, *metric),
            }
        }
        Command::Recommend { age, sex } => {
            CommandOutput::Recommendations(engine.build_recommendations(*age, *sex))
        }
        Command::Assess { record, on } => {
            let record = load_record(record)?;
            let on = on
                .or_else(|| record.last_measured_on())
                .unwrap_or(record.birth_date);
            CommandOutput::Assessment {
                on,
                assessment: engine.assess_record(&record, on),
            }
        }
        Command::Table { sex, output } => {
            let rows = engine.table(*sex);
            match output {
                Some(path) => {
                    let file = std::fs::File::create(path)?;
                    write_rows(file, rows)?;
                    tracing::info!("Wrote {} {} rows to {}", rows.len(), sex, path);
                    CommandOutput::TableWritten {
                        sex: *sex,
                        path: path.clone(),
                        rows: rows.len(),
                    }
                }
                None => {
                    let mut buffer = Vec::new();
                    write_rows(&mut buffer, rows)?;
                    let csv = String::from_utf8(buffer).map_err(|e| GrowthError::InvalidStandardsTable {
                        message: e.to_string(),
                    })?;
                    CommandOutput::TableCsv { sex: *sex, csv }
                }
            }
        }
    };

    Ok(output)
}

pub fn load_record<P: AsRef<Path>>(path: P) -> Result<GrowthRecord> {
    let content = std::fs::read_to_string(&path)?;
    let record: GrowthRecord = serde_json::from_str(&content)?;
    record.validate()?;
    tracing::debug!(
        "Loaded {} record with {} follow-ups",
        record.sex,
        record.follow_ups.len()
    );
    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::GrowthStatus;
    use tempfile::TempDir;

    #[test]
    fn test_progress_command_parses_or_zeroes() {
        let engine = GrowthEngine::who();
        let command = Command::Progress {
            birth: "3300".to_string(),
            current: "4300".to_string(),
            target_gain: "1200".to_string(),
        };
        match run_command(&engine, &command).unwrap() {
            CommandOutput::Progress(result) => assert_eq!(result.percentage, 83),
            other => panic!("unexpected output {:?}", other),
        }

        let command = Command::Progress {
            birth: "3300".to_string(),
            current: "".to_string(),
            target_gain: "n/a".to_string(),
        };
        match run_command(&engine, &command).unwrap() {
            CommandOutput::Progress(result) => {
                assert_eq!(result.percentage, 100);
                assert_eq!(result.current_total, 0.0);
            }
            other => panic!("unexpected output {:?}", other),
        }
    }

    #[test]
    fn test_table_command_writes_csv() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("female.csv").to_string_lossy().to_string();
        let engine = GrowthEngine::who();
        let output = run_command(
            &engine,
            &Command::Table {
                sex: Sex::Female,
                output: Some(path.clone()),
            },
        )
        .unwrap();
        assert_eq!(
            output,
            CommandOutput::TableWritten {
                sex: Sex::Female,
                path: path.clone(),
                rows: 13,
            }
        );
        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written.lines().count(), 14);
    }

    #[test]
    fn test_assess_command_defaults_to_latest_date() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("record.json");
        std::fs::write(
            &path,
            r#"{
                "sex": "female",
                "birth_date": "2026-01-01",
                "birth": { "weight": { "value": 3200, "unit": "g" } },
                "follow_ups": [
                    { "date": "2026-02-22", "weight": { "value": 4900, "unit": "g" } },
                    { "date": "2026-03-01", "weight": { "value": 5.12, "unit": "kg" } }
                ]
            }"#,
        )
        .unwrap();

        let engine = GrowthEngine::who();
        let command = Command::Assess {
            record: path.to_string_lossy().to_string(),
            on: None,
        };
        match run_command(&engine, &command).unwrap() {
            CommandOutput::Assessment { on, assessment } => {
                assert_eq!(on, NaiveDate::from_ymd_opt(2026, 3, 1).unwrap());
                let weight = assessment.metric(Metric::Weight).unwrap();
                assert_eq!(weight.status, GrowthStatus::Adequate);
            }
            other => panic!("unexpected output {:?}", other),
        }
    }

    #[test]
    fn test_assess_command_rejects_bad_record() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("record.json");
        std::fs::write(&path, "{ not json").unwrap();
        let engine = GrowthEngine::who();
        let command = Command::Assess {
            record: path.to_string_lossy().to_string(),
            on: None,
        };
        let err = run_command(&engine, &command).unwrap_err();
        assert!(matches!(err, GrowthError::SerializationError(_)));
    }
}
