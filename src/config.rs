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

use log::debug;
use std::path::Path;
use strum::IntoEnumIterator;

use crate::constants::{
    BACKUP_DELAY_MS, BLUETOOTH_BAUD_RATE, DEBUG_MODE, FIRE_NEAR_DISTANCE_CM,
    FLAME_SENSITIVITY_HIGH, FLAME_SENSITIVITY_LOW, FLAME_SENSITIVITY_MEDIUM,
    FLAME_THRESHOLD_VALUE, LOOP_DELAY_MS, OBSTACLE_AVOID_DELAY_MS, OBSTACLE_DISTANCE_CM,
    PUMP_COOLDOWN_MS, PUMP_DURATION_MS, SAFE_DISTANCE_CM, SERVO_CENTER, SERVO_LEFT, SERVO_RIGHT,
    SERVO_SCAN_DELAY_MS, SPEED_FAST, SPEED_NORMAL, SPEED_SLOW, SPEED_TURN, SUPPORTED_BAUD_RATES,
};
use crate::enums::{ParameterName, Relation};
use crate::error::{ConfigurationError, Violation};
use crate::parameter::ParameterValue;
use crate::utility::get_entries;

// Ordering rules as (lower, relation, upper).
const ORDERING_RULES: [(ParameterName, Relation, ParameterName); 11] = [
    // Lower reading is a stronger flame, so the high sensitivity uses the
    // smallest cutoff.
    (
        ParameterName::FlameSensitivityHigh,
        Relation::Less,
        ParameterName::FlameSensitivityMedium,
    ),
    (
        ParameterName::FlameSensitivityMedium,
        Relation::Less,
        ParameterName::FlameSensitivityLow,
    ),
    (
        ParameterName::FlameSensitivityHigh,
        Relation::LessOrEqual,
        ParameterName::FlameThresholdValue,
    ),
    (
        ParameterName::FlameThresholdValue,
        Relation::LessOrEqual,
        ParameterName::FlameSensitivityLow,
    ),
    // The pump must be reachable before the obstacle avoidance takes over.
    (
        ParameterName::FireNearDistanceCm,
        Relation::Less,
        ParameterName::ObstacleDistanceCm,
    ),
    (
        ParameterName::ObstacleDistanceCm,
        Relation::LessOrEqual,
        ParameterName::SafeDistanceCm,
    ),
    (
        ParameterName::SpeedSlow,
        Relation::Less,
        ParameterName::SpeedTurn,
    ),
    (
        ParameterName::SpeedTurn,
        Relation::Less,
        ParameterName::SpeedNormal,
    ),
    (
        ParameterName::SpeedNormal,
        Relation::LessOrEqual,
        ParameterName::SpeedFast,
    ),
    (
        ParameterName::ServoLeft,
        Relation::Less,
        ParameterName::ServoCenter,
    ),
    (
        ParameterName::ServoCenter,
        Relation::Less,
        ParameterName::ServoRight,
    ),
];

#[derive(Clone, PartialEq, Debug)]
pub struct Config {
    // Configuration filename. Empty if only the shipped defaults are used.
    pub filename: String,
    // Flame sensor threshold in raw ADC units (0 - 1023). A reading below it
    // is a detected flame.
    pub flame_threshold_value: u16,
    // Flame sensor thresholds of the different sensitivity levels.
    pub flame_sensitivity_high: u16,
    pub flame_sensitivity_medium: u16,
    pub flame_sensitivity_low: u16,
    // Distance to start the obstacle avoidance in cm.
    pub obstacle_distance_cm: u16,
    // Distance to the fire to start the pump in cm.
    pub fire_near_distance_cm: u16,
    // Distance that is safe to drive forward in cm.
    pub safe_distance_cm: u16,
    // Motor speeds as PWM duty (0 - 255).
    pub speed_fast: u8,
    pub speed_normal: u8,
    pub speed_slow: u8,
    pub speed_turn: u8,
    // Time to run the pump in ms.
    pub pump_duration_ms: u32,
    // Time to wait before the pump runs again in ms.
    pub pump_cooldown_ms: u32,
    // Servo angles in degree.
    pub servo_center: u8,
    pub servo_left: u8,
    pub servo_right: u8,
    // Time to settle at each scan angle in ms.
    pub servo_scan_delay_ms: u32,
    // Delay of each control loop cycle in ms.
    pub loop_delay_ms: u32,
    pub obstacle_avoid_delay_ms: u32,
    pub backup_delay_ms: u32,
    // Baud rate of the bluetooth serial port.
    pub bluetooth_baud_rate: u32,
    pub debug_mode: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            filename: String::new(),

            flame_threshold_value: FLAME_THRESHOLD_VALUE,
            flame_sensitivity_high: FLAME_SENSITIVITY_HIGH,
            flame_sensitivity_medium: FLAME_SENSITIVITY_MEDIUM,
            flame_sensitivity_low: FLAME_SENSITIVITY_LOW,

            obstacle_distance_cm: OBSTACLE_DISTANCE_CM,
            fire_near_distance_cm: FIRE_NEAR_DISTANCE_CM,
            safe_distance_cm: SAFE_DISTANCE_CM,

            speed_fast: SPEED_FAST,
            speed_normal: SPEED_NORMAL,
            speed_slow: SPEED_SLOW,
            speed_turn: SPEED_TURN,

            pump_duration_ms: PUMP_DURATION_MS,
            pump_cooldown_ms: PUMP_COOLDOWN_MS,

            servo_center: SERVO_CENTER,
            servo_left: SERVO_LEFT,
            servo_right: SERVO_RIGHT,
            servo_scan_delay_ms: SERVO_SCAN_DELAY_MS,

            loop_delay_ms: LOOP_DELAY_MS,
            obstacle_avoid_delay_ms: OBSTACLE_AVOID_DELAY_MS,
            backup_delay_ms: BACKUP_DELAY_MS,

            bluetooth_baud_rate: BLUETOOTH_BAUD_RATE,

            debug_mode: DEBUG_MODE,
        }
    }
}

impl Config {
    /// Create a new config object.
    ///
    /// # Notes
    /// The values in the parameter file override the shipped defaults. A
    /// missing key keeps the default. The result is not validated against the
    /// ordering rules yet.
    ///
    /// # Arguments
    /// * `filepath` - The path to the robot parameters file.
    ///
    /// # Returns
    /// A new config object.
    ///
    /// # Errors
    /// If the file can not be read, a key is not a registered parameter, or a
    /// value is out of its valid range.
    pub fn new(filepath: &Path) -> Result<Self, ConfigurationError> {
        let mut config = Self::default();
        config.filename = filepath.display().to_string();

        for (key, raw) in get_entries(filepath)? {
            let name = ParameterName::from_key(&key)
                .ok_or_else(|| ConfigurationError::UnknownParameter(key.clone()))?;
            let value = name.parse_value(&raw)?;

            debug!("Read {name} = {value} from {}.", config.filename);

            config.set_value(name, value)?;
        }

        Ok(config)
    }

    /// Get the value of the parameter.
    ///
    /// # Arguments
    /// * `name` - Parameter name.
    ///
    /// # Returns
    /// Value.
    pub fn value(&self, name: ParameterName) -> ParameterValue {
        let value = match name {
            ParameterName::FlameThresholdValue => self.flame_threshold_value as i64,
            ParameterName::FlameSensitivityHigh => self.flame_sensitivity_high as i64,
            ParameterName::FlameSensitivityMedium => self.flame_sensitivity_medium as i64,
            ParameterName::FlameSensitivityLow => self.flame_sensitivity_low as i64,
            ParameterName::ObstacleDistanceCm => self.obstacle_distance_cm as i64,
            ParameterName::FireNearDistanceCm => self.fire_near_distance_cm as i64,
            ParameterName::SafeDistanceCm => self.safe_distance_cm as i64,
            ParameterName::SpeedFast => self.speed_fast as i64,
            ParameterName::SpeedNormal => self.speed_normal as i64,
            ParameterName::SpeedSlow => self.speed_slow as i64,
            ParameterName::SpeedTurn => self.speed_turn as i64,
            ParameterName::PumpDurationMs => self.pump_duration_ms as i64,
            ParameterName::PumpCooldownMs => self.pump_cooldown_ms as i64,
            ParameterName::ServoCenter => self.servo_center as i64,
            ParameterName::ServoLeft => self.servo_left as i64,
            ParameterName::ServoRight => self.servo_right as i64,
            ParameterName::ServoScanDelayMs => self.servo_scan_delay_ms as i64,
            ParameterName::LoopDelayMs => self.loop_delay_ms as i64,
            ParameterName::ObstacleAvoidDelayMs => self.obstacle_avoid_delay_ms as i64,
            ParameterName::BackupDelayMs => self.backup_delay_ms as i64,
            ParameterName::BluetoothBaudRate => self.bluetooth_baud_rate as i64,
            ParameterName::DebugMode => return ParameterValue::Boolean(self.debug_mode),
        };

        ParameterValue::Integer(value)
    }

    /// Get the value of the parameter by the name.
    ///
    /// # Arguments
    /// * `name` - Parameter name such as "SPEED_FAST".
    ///
    /// # Returns
    /// Value.
    ///
    /// # Errors
    /// If the name is not registered.
    pub fn get(&self, name: &str) -> Result<ParameterValue, ConfigurationError> {
        name.parse::<ParameterName>()
            .map(|parameter| self.value(parameter))
            .map_err(|_| ConfigurationError::UnknownParameter(String::from(name)))
    }

    /// Set the value of the parameter while building the configuration.
    ///
    /// # Arguments
    /// * `name` - Parameter name.
    /// * `value` - Value.
    ///
    /// # Errors
    /// If the value has the wrong kind or is out of the valid range.
    fn set_value(&mut self, name: ParameterName, value: ParameterValue) -> Result<(), ConfigurationError> {
        if let Some(violation) = name.check_range(&value) {
            return Err(ConfigurationError::InvariantViolated(violation));
        }

        match name {
            ParameterName::FlameThresholdValue => self.flame_threshold_value = narrow(name, value)?,
            ParameterName::FlameSensitivityHigh => {
                self.flame_sensitivity_high = narrow(name, value)?
            }
            ParameterName::FlameSensitivityMedium => {
                self.flame_sensitivity_medium = narrow(name, value)?
            }
            ParameterName::FlameSensitivityLow => self.flame_sensitivity_low = narrow(name, value)?,
            ParameterName::ObstacleDistanceCm => self.obstacle_distance_cm = narrow(name, value)?,
            ParameterName::FireNearDistanceCm => self.fire_near_distance_cm = narrow(name, value)?,
            ParameterName::SafeDistanceCm => self.safe_distance_cm = narrow(name, value)?,
            ParameterName::SpeedFast => self.speed_fast = narrow(name, value)?,
            ParameterName::SpeedNormal => self.speed_normal = narrow(name, value)?,
            ParameterName::SpeedSlow => self.speed_slow = narrow(name, value)?,
            ParameterName::SpeedTurn => self.speed_turn = narrow(name, value)?,
            ParameterName::PumpDurationMs => self.pump_duration_ms = narrow(name, value)?,
            ParameterName::PumpCooldownMs => self.pump_cooldown_ms = narrow(name, value)?,
            ParameterName::ServoCenter => self.servo_center = narrow(name, value)?,
            ParameterName::ServoLeft => self.servo_left = narrow(name, value)?,
            ParameterName::ServoRight => self.servo_right = narrow(name, value)?,
            ParameterName::ServoScanDelayMs => self.servo_scan_delay_ms = narrow(name, value)?,
            ParameterName::LoopDelayMs => self.loop_delay_ms = narrow(name, value)?,
            ParameterName::ObstacleAvoidDelayMs => {
                self.obstacle_avoid_delay_ms = narrow(name, value)?
            }
            ParameterName::BackupDelayMs => self.backup_delay_ms = narrow(name, value)?,
            ParameterName::BluetoothBaudRate => self.bluetooth_baud_rate = narrow(name, value)?,
            ParameterName::DebugMode => {
                if let ParameterValue::Boolean(debug_mode) = value {
                    self.debug_mode = debug_mode;
                }
            }
        }

        Ok(())
    }

    /// Get all the violated invariants.
    ///
    /// # Notes
    /// The ranges are checked first, then the ordering rules, then the baud
    /// rate.
    ///
    /// # Returns
    /// Violations. Empty if the configuration is valid.
    pub fn violations(&self) -> Vec<Violation> {
        let mut violations: Vec<Violation> = ParameterName::iter()
            .filter_map(|name| name.check_range(&self.value(name)))
            .collect();

        for (lower, relation, upper) in ORDERING_RULES.iter() {
            if let (Some(lower_value), Some(upper_value)) =
                (self.value(*lower).as_integer(), self.value(*upper).as_integer())
            {
                if !relation.holds(lower_value, upper_value) {
                    violations.push(Violation::Ordering {
                        lower: *lower,
                        upper: *upper,
                        relation: *relation,
                        lower_value: lower_value,
                        upper_value: upper_value,
                    });
                }
            }
        }

        if !SUPPORTED_BAUD_RATES.contains(&self.bluetooth_baud_rate) {
            violations.push(Violation::UnsupportedBaudRate {
                parameter: ParameterName::BluetoothBaudRate,
                value: self.bluetooth_baud_rate as i64,
            });
        }

        violations
    }

    /// Validate the configuration.
    ///
    /// # Errors
    /// The first violated invariant.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        match self.violations().into_iter().next() {
            Some(violation) => Err(ConfigurationError::InvariantViolated(violation)),
            None => Ok(()),
        }
    }
}

/// Narrow the integer value to the type of the field.
///
/// # Arguments
/// * `name` - Parameter name.
/// * `value` - Value that is already in the valid range.
///
/// # Returns
/// Narrowed value.
///
/// # Errors
/// If the value can not be represented by the field.
fn narrow<T: TryFrom<i64>>(name: ParameterName, value: ParameterValue) -> Result<T, ConfigurationError> {
    let out_of_range = |value: i64| {
        let (min, max) = name.valid_range().unwrap_or((0, 0));
        ConfigurationError::InvariantViolated(Violation::OutOfRange {
            parameter: name,
            value: value,
            min: min,
            max: max,
        })
    };

    match value {
        ParameterValue::Integer(integer) => {
            T::try_from(integer).map_err(|_| out_of_range(integer))
        }
        ParameterValue::Boolean(_) => Err(ConfigurationError::InvariantViolated(
            Violation::WrongKind {
                parameter: name,
                value: value.to_string(),
            },
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::utility::create_yaml_file;

    fn create_config() -> Config {
        Config::default()
    }

    fn assert_ordering_violation(config: &Config, lower: ParameterName, upper: ParameterName) {
        let error = config.validate().unwrap_err();
        let violation = error.violation().unwrap();

        assert!(matches!(violation, Violation::Ordering { .. }));
        assert_eq!(violation.parameters(), vec![lower, upper]);
    }

    #[test]
    fn test_default() {
        let config = create_config();

        assert_eq!(config.flame_sensitivity_high, 400);
        assert_eq!(config.flame_sensitivity_medium, 500);
        assert_eq!(config.flame_sensitivity_low, 600);

        assert_eq!(config.fire_near_distance_cm, 15);
        assert_eq!(config.obstacle_distance_cm, 20);
        assert_eq!(config.safe_distance_cm, 30);

        assert_eq!(config.speed_slow, 150);
        assert_eq!(config.speed_turn, 180);
        assert_eq!(config.speed_normal, 200);
        assert_eq!(config.speed_fast, 255);

        assert_eq!(config.servo_left, 45);
        assert_eq!(config.servo_center, 90);
        assert_eq!(config.servo_right, 135);

        assert_eq!(config.bluetooth_baud_rate, 9600);
        assert!(config.debug_mode);
    }

    #[test]
    fn test_validate_default() {
        let config = create_config();

        assert!(config.violations().is_empty());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_value_matches_default() {
        let config = create_config();

        for name in ParameterName::iter() {
            assert_eq!(config.value(name), name.default_value(), "{name}");
        }
    }

    #[test]
    fn test_get() {
        let config = create_config();

        assert_eq!(
            config.get("PUMP_DURATION_MS").unwrap(),
            ParameterValue::Integer(3000)
        );
        assert_eq!(
            config.get("DEBUG_MODE").unwrap(),
            ParameterValue::Boolean(true)
        );

        // Repeated reads return the same value
        assert_eq!(
            config.get("LOOP_DELAY_MS").unwrap(),
            config.get("LOOP_DELAY_MS").unwrap()
        );
    }

    #[test]
    fn test_get_unknown() {
        let config = create_config();

        let error = config.get("SPEED_ULTRA").unwrap_err();

        assert!(
            matches!(error, ConfigurationError::UnknownParameter(ref name) if name == "SPEED_ULTRA")
        );

        // Lower case is the key in the file, not the parameter name
        assert!(config.get("speed_fast").is_err());
    }

    #[test]
    fn test_validate_fire_near_distance() {
        let mut config = create_config();
        config.fire_near_distance_cm = 25;
        config.obstacle_distance_cm = 20;

        assert_ordering_violation(
            &config,
            ParameterName::FireNearDistanceCm,
            ParameterName::ObstacleDistanceCm,
        );

        assert_eq!(config.violations().len(), 1);
    }

    #[test]
    fn test_validate_safe_distance() {
        let mut config = create_config();

        // Equal is allowed
        config.safe_distance_cm = 20;
        assert!(config.validate().is_ok());

        config.safe_distance_cm = 19;
        assert_ordering_violation(
            &config,
            ParameterName::ObstacleDistanceCm,
            ParameterName::SafeDistanceCm,
        );
    }

    #[test]
    fn test_validate_flame_sensitivity() {
        let mut config = create_config();
        config.flame_sensitivity_medium = 400;

        assert_ordering_violation(
            &config,
            ParameterName::FlameSensitivityHigh,
            ParameterName::FlameSensitivityMedium,
        );

        let mut config = create_config();
        config.flame_threshold_value = 650;

        assert_ordering_violation(
            &config,
            ParameterName::FlameThresholdValue,
            ParameterName::FlameSensitivityLow,
        );
    }

    #[test]
    fn test_validate_speed() {
        let mut config = create_config();

        config.speed_turn = 200;
        assert_ordering_violation(
            &config,
            ParameterName::SpeedTurn,
            ParameterName::SpeedNormal,
        );

        // Equal is allowed between the normal and fast speeds
        config.speed_normal = 255;
        assert!(config.validate().is_ok());

        config.speed_slow = 200;
        assert_ordering_violation(&config, ParameterName::SpeedSlow, ParameterName::SpeedTurn);
    }

    #[test]
    fn test_validate_servo() {
        let mut config = create_config();
        config.servo_right = 90;

        assert_ordering_violation(
            &config,
            ParameterName::ServoCenter,
            ParameterName::ServoRight,
        );

        let mut config = create_config();
        config.servo_right = 190;

        let error = config.validate().unwrap_err();
        assert_eq!(
            error.violation(),
            Some(&Violation::OutOfRange {
                parameter: ParameterName::ServoRight,
                value: 190,
                min: 0,
                max: 180,
            })
        );
    }

    #[test]
    fn test_validate_flame_range() {
        let mut config = create_config();
        config.flame_sensitivity_low = 1100;
        config.flame_threshold_value = 1050;

        let violations = config.violations();

        assert_eq!(violations.len(), 2);
        assert_eq!(
            violations[0].parameters(),
            vec![ParameterName::FlameThresholdValue]
        );
        assert_eq!(
            violations[1].parameters(),
            vec![ParameterName::FlameSensitivityLow]
        );
    }

    #[test]
    fn test_validate_baud_rate() {
        let mut config = create_config();
        config.bluetooth_baud_rate = 10000;

        let error = config.validate().unwrap_err();

        assert_eq!(
            error.violation(),
            Some(&Violation::UnsupportedBaudRate {
                parameter: ParameterName::BluetoothBaudRate,
                value: 10000,
            })
        );

        config.bluetooth_baud_rate = 115200;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_zero_loop_delay() {
        let mut config = create_config();
        config.loop_delay_ms = 0;

        let error = config.validate().unwrap_err();

        assert_eq!(
            error.violation().unwrap().parameters(),
            vec![ParameterName::LoopDelayMs]
        );
    }

    #[test]
    fn test_new() {
        let config = Config::new(Path::new("config/parameters_robot.yaml")).unwrap();

        assert_eq!(config.filename, "config/parameters_robot.yaml");

        let mut config_default = create_config();
        config_default.filename = config.filename.clone();

        assert_eq!(config, config_default);
    }

    #[test]
    fn test_new_override() {
        let file = create_yaml_file("speed_slow: 120\nDEBUG_MODE: false\n");

        let config = Config::new(file.path()).unwrap();

        assert_eq!(config.speed_slow, 120);
        assert!(!config.debug_mode);

        // Others keep the defaults
        assert_eq!(config.speed_turn, 180);
        assert_eq!(config.pump_duration_ms, 3000);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_new_unknown_key() {
        let file = create_yaml_file("speed_ultra: 300\n");

        let result = Config::new(file.path());

        assert!(
            matches!(result, Err(ConfigurationError::UnknownParameter(ref key)) if key == "speed_ultra")
        );
    }

    #[test]
    fn test_new_out_of_range() {
        let file = create_yaml_file("speed_fast: 300\n");

        let error = Config::new(file.path()).unwrap_err();

        assert_eq!(
            error.violation(),
            Some(&Violation::OutOfRange {
                parameter: ParameterName::SpeedFast,
                value: 300,
                min: 0,
                max: 255,
            })
        );

        let file = create_yaml_file("fire_near_distance_cm: -5\n");

        let error = Config::new(file.path()).unwrap_err();

        assert_eq!(
            error.violation().unwrap().parameters(),
            vec![ParameterName::FireNearDistanceCm]
        );
    }

    #[test]
    fn test_new_wrong_kind() {
        let file = create_yaml_file("debug_mode: 1\n");

        let error = Config::new(file.path()).unwrap_err();

        assert!(matches!(
            error.violation(),
            Some(Violation::WrongKind {
                parameter: ParameterName::DebugMode,
                ..
            })
        ));
    }

    #[test]
    fn test_new_keeps_ordering_violation() {
        let file = create_yaml_file("fire_near_distance_cm: 25\n");

        // Loading only checks the ranges
        let config = Config::new(file.path()).unwrap();

        assert_ordering_violation(
            &config,
            ParameterName::FireNearDistanceCm,
            ParameterName::ObstacleDistanceCm,
        );
    }
}
