use anyhow::Context;
use clap::Parser;
use growth_tracker::app::commands::run_command;
use growth_tracker::app::report::render_text;
use growth_tracker::utils::error::{ErrorSeverity, GrowthError};
use growth_tracker::utils::{logger, validation::Validate};
use growth_tracker::{CliConfig, GrowthEngine, TomlConfig};

fn main() {
    let cli = CliConfig::parse();

    let file_config = match &cli.config {
        Some(path) => match TomlConfig::from_file(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("❌ Failed to load config file '{}': {}", path, e);
                eprintln!("💡 {}", e.recovery_suggestion());
                std::process::exit(1);
            }
        },
        None => TomlConfig::default(),
    };

    let verbose = cli.verbose || file_config.verbose_logging();
    if cli.log_json || file_config.json_logging() {
        logger::init_json_logger(verbose);
    } else {
        logger::init_cli_logger(verbose);
    }

    tracing::info!("Starting growth-tracker");
    tracing::debug!("CLI config: {:?}", cli);

    if let Err(e) = run(&cli, file_config) {
        let severity = e
            .downcast_ref::<GrowthError>()
            .map(|g| g.severity())
            .unwrap_or(ErrorSeverity::High);

        tracing::error!("❌ {:#} (Severity: {:?})", e, severity);
        match e.downcast_ref::<GrowthError>() {
            Some(g) => {
                eprintln!("❌ {}", g.user_friendly_message());
                eprintln!("💡 {}", g.recovery_suggestion());
            }
            None => eprintln!("❌ {:#}", e),
        }

        let exit_code = match severity {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        };
        if exit_code > 0 {
            std::process::exit(exit_code);
        }
    }
}

fn run(cli: &CliConfig, mut file_config: TomlConfig) -> anyhow::Result<()> {
    cli.validate()?;
    cli.apply_overrides(&mut file_config.calculation);
    file_config.validate()?;

    let standards = file_config
        .load_standards()
        .context("loading standards tables")?;
    let engine = GrowthEngine::new(standards, file_config.calculation.clone());

    let output = run_command(&engine, &cli.command)?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        print!("{}", render_text(&output));
    }

    Ok(())
}
