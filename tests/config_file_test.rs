use growth_tracker::app::commands::{run_command, CommandOutput};
use growth_tracker::config::cli::Command;
use growth_tracker::domain::model::GainPeriod;
use growth_tracker::utils::validation::Validate;
use growth_tracker::{GrowthEngine, GrowthError, Sex, TomlConfig};
use tempfile::TempDir;

const FLAT_TABLE: &str = "age_months,weight_kg,height_cm,head_circ_cm
0,3.0,50.0,35.0
6,6.0,62.0,41.0
12,9.0,74.0,47.0
";

#[test]
fn test_config_with_custom_tables_drives_engine() {
    let dir = TempDir::new().unwrap();
    std::fs::create_dir(dir.path().join("tables")).unwrap();
    std::fs::write(dir.path().join("tables/male.csv"), FLAT_TABLE).unwrap();
    std::fs::write(dir.path().join("tables/female.csv"), FLAT_TABLE).unwrap();
    let config_path = dir.path().join("growth.toml");
    std::fs::write(
        &config_path,
        r#"
[calculation]
weeks_per_month = 4.0
gain_band_basis = "weekly"

[standards]
male_csv = "tables/male.csv"
female_csv = "tables/female.csv"
"#,
    )
    .unwrap();

    let config = TomlConfig::from_file(&config_path).unwrap();
    config.validate().unwrap();
    let engine = GrowthEngine::new(config.load_standards().unwrap(), config.calculation.clone());

    // halfway between the 0 and 6 month rows
    assert_eq!(engine.lookup(3.0, Sex::Male).weight_kg, 4.5);

    let output = run_command(
        &engine,
        &Command::Recommend {
            age: 3.0,
            sex: Sex::Female,
        },
    )
    .unwrap();
    match output {
        CommandOutput::Recommendations(bundle) => {
            // 500 g a month over 4 weeks
            assert_eq!(bundle.weight_gain.expected, 125);
            assert_eq!(bundle.height_gain.period, GainPeriod::Weekly);
            assert_eq!(bundle.height_gain.expected, 5);
        }
        other => panic!("unexpected output {:?}", other),
    }
}

#[test]
fn test_broken_table_is_reported() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("male.csv"),
        "age_months,weight_kg,height_cm,head_circ_cm\n3,6.0,61.0,40.0\n1,4.5,54.7,37.1\n",
    )
    .unwrap();
    std::fs::write(dir.path().join("female.csv"), FLAT_TABLE).unwrap();
    let config_path = dir.path().join("growth.toml");
    std::fs::write(
        &config_path,
        "[standards]\nmale_csv = \"male.csv\"\nfemale_csv = \"female.csv\"\n",
    )
    .unwrap();

    let config = TomlConfig::from_file(&config_path).unwrap();
    let err = config.load_standards().err().unwrap();
    assert!(matches!(err, GrowthError::InvalidStandardsTable { .. }));
}

#[test]
fn test_missing_config_file() {
    let err = TomlConfig::from_file("/nonexistent/growth.toml").unwrap_err();
    assert!(matches!(err, GrowthError::IoError(_)));
}
