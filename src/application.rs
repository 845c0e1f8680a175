// This file is part of fire_fighter_robot.
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

use log::{debug, error, info};
use serde_json::{json, Value};
use std::path::Path;
use strum::IntoEnumIterator;

use crate::config_pins::ConfigPins;
use crate::enums::PinFunction;
use crate::error::ConfigurationError;
use crate::provider::ConfigurationProvider;

/// Run the startup sequence of the configuration.
///
/// # Notes
/// The control loop must not start if this returns an error.
///
/// # Arguments
/// * `filepath_parameters` - The path to the robot parameters file.
/// * `filepath_pins` - The path to the pin assignment file. None if the
/// board does not use it.
///
/// # Returns
/// Configuration provider to share with the consumers and the pin assignment
/// if requested.
///
/// # Errors
/// If any configuration can not be loaded or is not valid.
pub fn run(
    filepath_parameters: &Path,
    filepath_pins: Option<&Path>,
) -> Result<(ConfigurationProvider, Option<ConfigPins>), ConfigurationError> {
    info!("Load the robot parameters from {:?}.", filepath_parameters);
    let provider = ConfigurationProvider::from_file(filepath_parameters)?;

    let config_pins = match filepath_pins {
        Some(filepath) => {
            info!("Load the pin assignment from {:?}.", filepath);

            let config_pins = ConfigPins::new(filepath)?;
            let violations = config_pins.violations();
            for violation in violations.iter() {
                error!("Pin assignment invariant violated: {violation}.");
            }
            if let Some(violation) = violations.into_iter().next() {
                return Err(ConfigurationError::InvariantViolated(violation));
            }

            Some(config_pins)
        }
        None => None,
    };

    log_parameters(&provider, config_pins.as_ref());

    info!("Robot configuration is valid.");

    Ok((provider, config_pins))
}

/// Log the parameters. They are logged at the info level in the debug mode.
///
/// # Arguments
/// * `provider` - Configuration provider.
/// * `config_pins` - Pin assignment.
fn log_parameters(provider: &ConfigurationProvider, config_pins: Option<&ConfigPins>) {
    let is_debug_mode = provider.config().debug_mode;

    let mut lines: Vec<String> = provider
        .parameters()
        .iter()
        .map(|parameter| {
            format!(
                "{} = {} ({})",
                parameter.name,
                parameter.value,
                parameter.unit.as_ref()
            )
        })
        .collect();

    if let Some(config_pins) = config_pins {
        lines.extend(
            PinFunction::iter()
                .map(|function| format!("pin {function} = {}", config_pins.pin(function))),
        );
    }

    for line in lines {
        if is_debug_mode {
            info!("{line}");
        } else {
            debug!("{line}");
        }
    }
}

/// Get the report of the configuration.
///
/// # Arguments
/// * `provider` - Configuration provider.
/// * `config_pins` - Pin assignment.
///
/// # Returns
/// Report.
pub fn get_report(provider: &ConfigurationProvider, config_pins: Option<&ConfigPins>) -> Value {
    let pins: Option<Value> = config_pins.map(|config_pins| {
        PinFunction::iter()
            .map(|function| (function.to_string(), json!(config_pins.pin(function))))
            .collect::<serde_json::Map<String, Value>>()
            .into()
    });

    json!({
        "filename": provider.config().filename,
        "parameters": provider.parameters(),
        "pins": pins,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::constants::{FILEPATH_PARAMETERS_PINS, FILEPATH_PARAMETERS_ROBOT};
    use crate::enums::ParameterName;
    use crate::error::Violation;
    use crate::utility::create_yaml_file;

    #[test]
    fn test_run() {
        let (provider, config_pins) = run(
            Path::new(FILEPATH_PARAMETERS_ROBOT),
            Some(Path::new(FILEPATH_PARAMETERS_PINS)),
        )
        .unwrap();

        assert_eq!(provider.config().speed_fast, 255);
        assert_eq!(config_pins.unwrap().pump, 16);
    }

    #[test]
    fn test_run_without_pins() {
        let (_, config_pins) = run(Path::new(FILEPATH_PARAMETERS_ROBOT), None).unwrap();

        assert!(config_pins.is_none());
    }

    #[test]
    fn test_run_invalid_parameters() {
        let file = create_yaml_file("fire_near_distance_cm: 25\nobstacle_distance_cm: 20\n");

        let error = run(file.path(), None).unwrap_err();

        assert_eq!(
            error.violation().unwrap().parameters(),
            vec![
                ParameterName::FireNearDistanceCm,
                ParameterName::ObstacleDistanceCm
            ]
        );
    }

    #[test]
    fn test_run_invalid_pins() {
        let file = create_yaml_file("echo: 20\n");

        let error = run(Path::new(FILEPATH_PARAMETERS_ROBOT), Some(file.path())).unwrap_err();

        assert_eq!(
            error.violation(),
            Some(&Violation::PinConflict {
                first: PinFunction::Trigger,
                second: PinFunction::Echo,
                pin: 20,
            })
        );
    }

    #[test]
    fn test_run_missing_file() {
        let result = run(Path::new("config/not_exist.yaml"), None);

        assert!(matches!(result, Err(ConfigurationError::Load { .. })));
    }

    #[test]
    fn test_get_report() {
        let provider = ConfigurationProvider::new(Default::default()).unwrap();

        let report = get_report(&provider, None);

        assert_eq!(report["filename"], "");
        assert_eq!(report["parameters"].as_array().unwrap().len(), 22);
        assert_eq!(report["parameters"][7]["name"], "SPEED_FAST");
        assert_eq!(report["parameters"][7]["value"], 255);
        assert!(report["pins"].is_null());

        let config_pins = ConfigPins::default();
        let report = get_report(&provider, Some(&config_pins));

        assert_eq!(report["pins"]["motor_left_fwd"], 17);
        assert_eq!(report["pins"]["buzzer"], 19);
    }
}
