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

use std::fmt;
use thiserror::Error;

use crate::enums::{ParameterName, PinFunction, Relation};

/// Invariant of the configuration that does not hold.
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum Violation {
    // Two parameters are not ordered as required.
    Ordering {
        lower: ParameterName,
        upper: ParameterName,
        relation: Relation,
        lower_value: i64,
        upper_value: i64,
    },
    // Value is out of the valid range of the parameter.
    OutOfRange {
        parameter: ParameterName,
        value: i64,
        min: i64,
        max: i64,
    },
    // Value has the wrong kind (e.g. boolean for an integer parameter).
    WrongKind {
        parameter: ParameterName,
        value: String,
    },
    UnsupportedBaudRate {
        parameter: ParameterName,
        value: i64,
    },
    PinOutOfRange {
        function: PinFunction,
        pin: i64,
        max: i64,
    },
    PinWrongKind {
        function: PinFunction,
        value: String,
    },
    // Two functions share the same pin.
    PinConflict {
        first: PinFunction,
        second: PinFunction,
        pin: u8,
    },
}

impl Violation {
    /// Get the parameters involved in the violation.
    ///
    /// # Returns
    /// Parameters. Empty for the violations of the pin assignment.
    pub fn parameters(&self) -> Vec<ParameterName> {
        match self {
            Violation::Ordering { lower, upper, .. } => vec![*lower, *upper],
            Violation::OutOfRange { parameter, .. }
            | Violation::WrongKind { parameter, .. }
            | Violation::UnsupportedBaudRate { parameter, .. } => vec![*parameter],
            Violation::PinOutOfRange { .. }
            | Violation::PinWrongKind { .. }
            | Violation::PinConflict { .. } => Vec::new(),
        }
    }

    /// Get the pin functions involved in the violation.
    ///
    /// # Returns
    /// Pin functions. Empty for the violations of the robot parameters.
    pub fn pin_functions(&self) -> Vec<PinFunction> {
        match self {
            Violation::PinOutOfRange { function, .. }
            | Violation::PinWrongKind { function, .. } => vec![*function],
            Violation::PinConflict { first, second, .. } => vec![*first, *second],
            _ => Vec::new(),
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::Ordering {
                lower,
                upper,
                relation,
                lower_value,
                upper_value,
            } => write!(
                f,
                "{lower} ({lower_value}) {} {upper} ({upper_value}) does not hold",
                relation.symbol()
            ),
            Violation::OutOfRange {
                parameter,
                value,
                min,
                max,
            } => write!(f, "{parameter} ({value}) is out of the range [{min}, {max}]"),
            Violation::WrongKind { parameter, value } => {
                write!(f, "{parameter} has the value ({value}) of the wrong kind")
            }
            Violation::UnsupportedBaudRate { parameter, value } => {
                write!(f, "{parameter} ({value}) is not a supported baud rate")
            }
            Violation::PinOutOfRange { function, pin, max } => {
                write!(f, "pin of {function} ({pin}) is out of the range [0, {max}]")
            }
            Violation::PinWrongKind { function, value } => {
                write!(f, "pin of {function} ({value}) is not an integer")
            }
            Violation::PinConflict { first, second, pin } => {
                write!(f, "{first} and {second} share the pin {pin}")
            }
        }
    }
}

/// Errors of the robot configuration. All of them are fatal at startup.
#[derive(Debug, Error)]
pub enum ConfigurationError {
    #[error("Unknown parameter: {0}")]
    UnknownParameter(String),

    #[error("Invariant violated: {0}")]
    InvariantViolated(Violation),

    #[error("Failed to load {filepath}: {source}")]
    Load {
        filepath: String,
        #[source]
        source: config::ConfigError,
    },
}

impl ConfigurationError {
    /// Get the violation if the error is an invariant violation.
    ///
    /// # Returns
    /// Violation or None.
    pub fn violation(&self) -> Option<&Violation> {
        match self {
            ConfigurationError::InvariantViolated(violation) => Some(violation),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_violation_parameters() {
        let violation = Violation::Ordering {
            lower: ParameterName::FireNearDistanceCm,
            upper: ParameterName::ObstacleDistanceCm,
            relation: Relation::Less,
            lower_value: 25,
            upper_value: 20,
        };

        assert_eq!(
            violation.parameters(),
            vec![
                ParameterName::FireNearDistanceCm,
                ParameterName::ObstacleDistanceCm
            ]
        );
        assert!(violation.pin_functions().is_empty());

        let violation = Violation::PinConflict {
            first: PinFunction::Pump,
            second: PinFunction::Buzzer,
            pin: 16,
        };

        assert!(violation.parameters().is_empty());
        assert_eq!(
            violation.pin_functions(),
            vec![PinFunction::Pump, PinFunction::Buzzer]
        );
    }

    #[test]
    fn test_display() {
        let error = ConfigurationError::InvariantViolated(Violation::Ordering {
            lower: ParameterName::FireNearDistanceCm,
            upper: ParameterName::ObstacleDistanceCm,
            relation: Relation::Less,
            lower_value: 25,
            upper_value: 20,
        });

        assert_eq!(
            error.to_string(),
            "Invariant violated: FIRE_NEAR_DISTANCE_CM (25) < OBSTACLE_DISTANCE_CM (20) does not hold"
        );

        let error = ConfigurationError::UnknownParameter(String::from("SPEED_ULTRA"));

        assert_eq!(error.to_string(), "Unknown parameter: SPEED_ULTRA");
        assert!(error.violation().is_none());
    }
}
