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

use serde::Serialize;
use std::fmt;

use crate::constants::{
    ADC_MAX, BACKUP_DELAY_MS, BLUETOOTH_BAUD_RATE, DEBUG_MODE, DELAY_MAX_MS, DISTANCE_MAX_CM,
    DISTANCE_MIN_CM, FIRE_NEAR_DISTANCE_CM, FLAME_SENSITIVITY_HIGH, FLAME_SENSITIVITY_LOW,
    FLAME_SENSITIVITY_MEDIUM, FLAME_THRESHOLD_VALUE, LOOP_DELAY_MS, OBSTACLE_AVOID_DELAY_MS,
    OBSTACLE_DISTANCE_CM, PUMP_COOLDOWN_MS, PUMP_DURATION_MS, PWM_DUTY_MAX, SAFE_DISTANCE_CM,
    SERVO_ANGLE_MAX, SERVO_CENTER, SERVO_LEFT, SERVO_RIGHT, SERVO_SCAN_DELAY_MS, SPEED_FAST,
    SPEED_NORMAL, SPEED_SLOW, SPEED_TURN, SUPPORTED_BAUD_RATES,
};
use crate::enums::{ParameterGroup, ParameterName, Unit};
use crate::error::{ConfigurationError, Violation};
use crate::utility::ConfigValue;

/// Value of the parameter.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize)]
#[serde(untagged)]
pub enum ParameterValue {
    Integer(i64),
    Boolean(bool),
}

impl ParameterValue {
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            ParameterValue::Integer(value) => Some(*value),
            ParameterValue::Boolean(_) => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ParameterValue::Integer(_) => None,
            ParameterValue::Boolean(value) => Some(*value),
        }
    }
}

impl fmt::Display for ParameterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParameterValue::Integer(value) => write!(f, "{value}"),
            ParameterValue::Boolean(value) => write!(f, "{value}"),
        }
    }
}

impl ParameterName {
    /// Get the group of the parameter.
    ///
    /// # Returns
    /// Parameter group.
    pub fn group(&self) -> ParameterGroup {
        match self {
            ParameterName::FlameThresholdValue
            | ParameterName::FlameSensitivityHigh
            | ParameterName::FlameSensitivityMedium
            | ParameterName::FlameSensitivityLow => ParameterGroup::FlameSensing,

            ParameterName::ObstacleDistanceCm
            | ParameterName::FireNearDistanceCm
            | ParameterName::SafeDistanceCm => ParameterGroup::DistanceSensing,

            ParameterName::SpeedFast
            | ParameterName::SpeedNormal
            | ParameterName::SpeedSlow
            | ParameterName::SpeedTurn => ParameterGroup::MotorActuation,

            ParameterName::PumpDurationMs | ParameterName::PumpCooldownMs => {
                ParameterGroup::PumpActuation
            }

            ParameterName::ServoCenter
            | ParameterName::ServoLeft
            | ParameterName::ServoRight
            | ParameterName::ServoScanDelayMs => ParameterGroup::Servo,

            ParameterName::LoopDelayMs
            | ParameterName::ObstacleAvoidDelayMs
            | ParameterName::BackupDelayMs => ParameterGroup::LoopTiming,

            ParameterName::BluetoothBaudRate => ParameterGroup::Communication,

            ParameterName::DebugMode => ParameterGroup::Diagnostics,
        }
    }

    /// Get the unit of the parameter.
    ///
    /// # Returns
    /// Unit.
    pub fn unit(&self) -> Unit {
        match self {
            ParameterName::ServoScanDelayMs => Unit::Millisecond,
            _ => match self.group() {
                ParameterGroup::FlameSensing => Unit::AdcUnit,
                ParameterGroup::DistanceSensing => Unit::Centimeter,
                ParameterGroup::MotorActuation => Unit::PwmDuty,
                ParameterGroup::PumpActuation | ParameterGroup::LoopTiming => Unit::Millisecond,
                ParameterGroup::Servo => Unit::Degree,
                ParameterGroup::Communication => Unit::BitsPerSecond,
                ParameterGroup::Diagnostics => Unit::Boolean,
            },
        }
    }

    /// Get the valid range of the parameter.
    ///
    /// # Returns
    /// Inclusive (minimum, maximum). None for the boolean parameter.
    pub fn valid_range(&self) -> Option<(i64, i64)> {
        match self {
            // The pump must run and the loop must yield.
            ParameterName::PumpDurationMs | ParameterName::LoopDelayMs => Some((1, DELAY_MAX_MS)),
            ParameterName::BluetoothBaudRate => Some((
                SUPPORTED_BAUD_RATES[0] as i64,
                SUPPORTED_BAUD_RATES[SUPPORTED_BAUD_RATES.len() - 1] as i64,
            )),
            ParameterName::DebugMode => None,
            _ => match self.unit() {
                Unit::AdcUnit => Some((0, ADC_MAX)),
                Unit::Centimeter => Some((DISTANCE_MIN_CM, DISTANCE_MAX_CM)),
                Unit::PwmDuty => Some((0, PWM_DUTY_MAX)),
                Unit::Degree => Some((0, SERVO_ANGLE_MAX)),
                _ => Some((0, DELAY_MAX_MS)),
            },
        }
    }

    /// Get the shipped default value of the parameter.
    ///
    /// # Returns
    /// Default value.
    pub fn default_value(&self) -> ParameterValue {
        let value = match self {
            ParameterName::FlameThresholdValue => FLAME_THRESHOLD_VALUE as i64,
            ParameterName::FlameSensitivityHigh => FLAME_SENSITIVITY_HIGH as i64,
            ParameterName::FlameSensitivityMedium => FLAME_SENSITIVITY_MEDIUM as i64,
            ParameterName::FlameSensitivityLow => FLAME_SENSITIVITY_LOW as i64,
            ParameterName::ObstacleDistanceCm => OBSTACLE_DISTANCE_CM as i64,
            ParameterName::FireNearDistanceCm => FIRE_NEAR_DISTANCE_CM as i64,
            ParameterName::SafeDistanceCm => SAFE_DISTANCE_CM as i64,
            ParameterName::SpeedFast => SPEED_FAST as i64,
            ParameterName::SpeedNormal => SPEED_NORMAL as i64,
            ParameterName::SpeedSlow => SPEED_SLOW as i64,
            ParameterName::SpeedTurn => SPEED_TURN as i64,
            ParameterName::PumpDurationMs => PUMP_DURATION_MS as i64,
            ParameterName::PumpCooldownMs => PUMP_COOLDOWN_MS as i64,
            ParameterName::ServoCenter => SERVO_CENTER as i64,
            ParameterName::ServoLeft => SERVO_LEFT as i64,
            ParameterName::ServoRight => SERVO_RIGHT as i64,
            ParameterName::ServoScanDelayMs => SERVO_SCAN_DELAY_MS as i64,
            ParameterName::LoopDelayMs => LOOP_DELAY_MS as i64,
            ParameterName::ObstacleAvoidDelayMs => OBSTACLE_AVOID_DELAY_MS as i64,
            ParameterName::BackupDelayMs => BACKUP_DELAY_MS as i64,
            ParameterName::BluetoothBaudRate => BLUETOOTH_BAUD_RATE as i64,
            ParameterName::DebugMode => return ParameterValue::Boolean(DEBUG_MODE),
        };

        ParameterValue::Integer(value)
    }

    /// Get the key of the parameter in the parameter file.
    ///
    /// # Returns
    /// Lower case name.
    pub fn key(&self) -> String {
        self.as_ref().to_ascii_lowercase()
    }

    /// Find the parameter of the key in the parameter file.
    ///
    /// # Arguments
    /// * `key` - Key in any letter case.
    ///
    /// # Returns
    /// Parameter name or None if the key is not registered.
    pub fn from_key(key: &str) -> Option<Self> {
        key.to_ascii_uppercase().parse().ok()
    }

    /// Check the value against the valid range.
    ///
    /// # Arguments
    /// * `value` - Value of the parameter.
    ///
    /// # Returns
    /// Violation or None if the value is valid.
    pub fn check_range(&self, value: &ParameterValue) -> Option<Violation> {
        match (self.valid_range(), value) {
            (Some((min, max)), ParameterValue::Integer(value)) => {
                if (*value < min) || (*value > max) {
                    Some(Violation::OutOfRange {
                        parameter: *self,
                        value: *value,
                        min: min,
                        max: max,
                    })
                } else {
                    None
                }
            }
            (None, ParameterValue::Boolean(_)) => None,
            _ => Some(Violation::WrongKind {
                parameter: *self,
                value: value.to_string(),
            }),
        }
    }

    /// Parse the raw value read from the parameter file.
    ///
    /// # Arguments
    /// * `raw` - Raw value.
    ///
    /// # Returns
    /// Parsed value.
    ///
    /// # Errors
    /// If the raw value does not have the kind of the parameter.
    pub fn parse_value(&self, raw: &str) -> Result<ParameterValue, ConfigurationError> {
        let value = if self.valid_range().is_some() {
            i64::parse_value(raw).map(ParameterValue::Integer)
        } else {
            bool::parse_value(raw).map(ParameterValue::Boolean)
        };

        value.ok_or_else(|| {
            ConfigurationError::InvariantViolated(Violation::WrongKind {
                parameter: *self,
                value: String::from(raw),
            })
        })
    }
}

/// Description of the parameter used to report the configuration.
#[derive(Debug, PartialEq, Clone, Serialize)]
pub struct ConfigurationParameter {
    pub name: ParameterName,
    pub group: ParameterGroup,
    pub unit: Unit,
    pub value: ParameterValue,
    // Inclusive valid range. None for the boolean parameter.
    pub valid_range: Option<(i64, i64)>,
}

impl ConfigurationParameter {
    /// Create a new configuration parameter.
    ///
    /// # Arguments
    /// * `name` - Parameter name.
    /// * `value` - Current value.
    ///
    /// # Returns
    /// A new configuration parameter.
    pub fn new(name: ParameterName, value: ParameterValue) -> Self {
        Self {
            name: name,
            group: name.group(),
            unit: name.unit(),
            value: value,
            valid_range: name.valid_range(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use strum::IntoEnumIterator;

    #[test]
    fn test_group_and_unit() {
        assert_eq!(
            ParameterName::FlameSensitivityLow.group(),
            ParameterGroup::FlameSensing
        );
        assert_eq!(ParameterName::FlameSensitivityLow.unit(), Unit::AdcUnit);

        assert_eq!(ParameterName::ServoScanDelayMs.group(), ParameterGroup::Servo);
        assert_eq!(ParameterName::ServoScanDelayMs.unit(), Unit::Millisecond);
        assert_eq!(ParameterName::ServoLeft.unit(), Unit::Degree);

        assert_eq!(
            ParameterName::BluetoothBaudRate.unit(),
            Unit::BitsPerSecond
        );
        assert_eq!(ParameterName::DebugMode.unit(), Unit::Boolean);
    }

    #[test]
    fn test_valid_range() {
        assert_eq!(ParameterName::FlameThresholdValue.valid_range(), Some((0, 1023)));
        assert_eq!(ParameterName::SafeDistanceCm.valid_range(), Some((1, 400)));
        assert_eq!(ParameterName::SpeedFast.valid_range(), Some((0, 255)));
        assert_eq!(ParameterName::ServoRight.valid_range(), Some((0, 180)));
        assert_eq!(ParameterName::PumpDurationMs.valid_range(), Some((1, 60000)));
        assert_eq!(ParameterName::PumpCooldownMs.valid_range(), Some((0, 60000)));
        assert_eq!(
            ParameterName::BluetoothBaudRate.valid_range(),
            Some((1200, 115200))
        );
        assert_eq!(ParameterName::DebugMode.valid_range(), None);
    }

    #[test]
    fn test_default_value_in_range() {
        for name in ParameterName::iter() {
            assert_eq!(name.check_range(&name.default_value()), None, "{name}");
        }
    }

    #[test]
    fn test_key() {
        assert_eq!(ParameterName::SpeedTurn.key(), "speed_turn");

        assert_eq!(
            ParameterName::from_key("speed_turn"),
            Some(ParameterName::SpeedTurn)
        );
        assert_eq!(
            ParameterName::from_key("SPEED_TURN"),
            Some(ParameterName::SpeedTurn)
        );
        assert_eq!(ParameterName::from_key("speed_ultra"), None);
    }

    #[test]
    fn test_check_range() {
        assert_eq!(
            ParameterName::SpeedFast.check_range(&ParameterValue::Integer(256)),
            Some(Violation::OutOfRange {
                parameter: ParameterName::SpeedFast,
                value: 256,
                min: 0,
                max: 255,
            })
        );
        assert_eq!(
            ParameterName::SpeedFast.check_range(&ParameterValue::Boolean(true)),
            Some(Violation::WrongKind {
                parameter: ParameterName::SpeedFast,
                value: String::from("true"),
            })
        );
        assert_eq!(
            ParameterName::DebugMode.check_range(&ParameterValue::Boolean(false)),
            None
        );
    }

    #[test]
    fn test_parse_value() {
        assert_eq!(
            ParameterName::SpeedSlow.parse_value("120").unwrap(),
            ParameterValue::Integer(120)
        );
        assert_eq!(
            ParameterName::DebugMode.parse_value("false").unwrap(),
            ParameterValue::Boolean(false)
        );

        let error = ParameterName::DebugMode.parse_value("1").unwrap_err();
        assert_eq!(
            error.violation(),
            Some(&Violation::WrongKind {
                parameter: ParameterName::DebugMode,
                value: String::from("1"),
            })
        );

        assert!(ParameterName::LoopDelayMs.parse_value("2.5").is_err());
    }

    #[test]
    fn test_configuration_parameter_json() {
        let parameter = ConfigurationParameter::new(
            ParameterName::SpeedSlow,
            ParameterName::SpeedSlow.default_value(),
        );

        assert_eq!(
            serde_json::to_value(&parameter).unwrap(),
            serde_json::json!({
                "name": "SPEED_SLOW",
                "group": "motor_actuation",
                "unit": "pwm_duty",
                "value": 150,
                "valid_range": [0, 255],
            })
        );
    }
}
