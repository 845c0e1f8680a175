use clap::{value_parser, Arg, ArgAction, Command};
use log::{error, info};
use simplelog::{
    format_description, ColorChoice, CombinedLogger, ConfigBuilder, LevelFilter, SharedLogger,
    TermLogger, TerminalMode, WriteLogger,
};
use std::fs::File;
use std::path::PathBuf;
use std::process::ExitCode;

use run_fire_fighter::application;
use run_fire_fighter::constants::FILEPATH_PARAMETERS_ROBOT;

fn main() -> ExitCode {
    // Parse the command line arguments
    let matches = Command::new("fire fighter")
        .about("Fire-fighting robot configuration.")
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .help("Robot parameters file.")
                .default_value(FILEPATH_PARAMETERS_ROBOT)
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("pins")
                .short('p')
                .long("pins")
                .help("Pin assignment file of the single-board computer.")
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("dump")
                .short('d')
                .long("dump")
                .action(ArgAction::SetTrue)
                .help("Print the validated configuration as JSON"),
        )
        .arg(
            Arg::new("level")
                .short('l')
                .long("log-level")
                .help("Log level: 0 (Off), 1 (Error), 2 (Warn), 3 (Info), 4 (Debug), 5 (Trace)")
                .default_value("3")
                .value_parser(value_parser!(u32)),
        )
        .get_matches();

    let filepath_parameters = matches
        .get_one::<PathBuf>("config")
        .cloned()
        .unwrap_or_else(|| PathBuf::from(FILEPATH_PARAMETERS_ROBOT));
    let filepath_pins = matches.get_one::<PathBuf>("pins");

    let is_dump = matches.get_flag("dump");

    // Check the log filter
    let log_filter = get_log_filter(matches.get_one::<u32>("level"));

    // Initiate the logger
    initiate_logger(log_filter, "fire_fighter.log");
    info!("Log level: {log_filter}.");

    // Run the startup sequence. Nothing may actuate with an invalid
    // configuration.
    match application::run(&filepath_parameters, filepath_pins.map(|path| path.as_path())) {
        Ok((provider, config_pins)) => {
            if is_dump {
                println!(
                    "{:#}",
                    application::get_report(&provider, config_pins.as_ref())
                );
            }

            ExitCode::SUCCESS
        }
        Err(err) => {
            error!("Startup is stopped: {err}.");
            eprintln!("Startup is stopped: {err}.");

            ExitCode::FAILURE
        }
    }
}

/// Get the log filter.
///
/// # Arguments
/// * `log_level` - Log level.
///
/// # Returns
/// Log filter.
fn get_log_filter(log_level: Option<&u32>) -> LevelFilter {
    match log_level {
        Some(level) => match level {
            0 => LevelFilter::Off,
            1 => LevelFilter::Error,
            2 => LevelFilter::Warn,
            3 => LevelFilter::Info,
            4 => LevelFilter::Debug,
            5 => LevelFilter::Trace,
            _ => LevelFilter::Info,
        },
        None => LevelFilter::Info,
    }
}

/// Initiate the logger.
///
/// # Arguments
/// * `level` - Log level.
/// * `filepath` - Log file path.
fn initiate_logger(level: LevelFilter, filepath: &str) {
    let config = ConfigBuilder::new()
        .set_time_format_custom(format_description!(
            "[year]/[month]/[day] [hour]:[minute]:[second].[subsecond]"
        ))
        .build();

    // Log to the terminal
    let mut loggers: Vec<Box<dyn SharedLogger>> = vec![TermLogger::new(
        level,
        config.clone(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )];

    // Log to the file
    match File::create(filepath) {
        Ok(file) => loggers.push(WriteLogger::new(level, config, file)),
        Err(error) => eprintln!("Failed to create the log file: {error}."),
    }

    let _ = CombinedLogger::init(loggers);
}
