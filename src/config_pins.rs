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

use std::collections::HashMap;
use std::path::Path;
use strum::IntoEnumIterator;

use crate::constants::{
    BCM_PIN_MAX, PIN_BUZZER, PIN_ECHO, PIN_FLAME_CENTER, PIN_FLAME_LEFT, PIN_FLAME_RIGHT,
    PIN_MOTOR_LEFT_BWD, PIN_MOTOR_LEFT_EN, PIN_MOTOR_LEFT_FWD, PIN_MOTOR_RIGHT_BWD,
    PIN_MOTOR_RIGHT_EN, PIN_MOTOR_RIGHT_FWD, PIN_PUMP, PIN_TRIGGER,
};
use crate::enums::PinFunction;
use crate::error::{ConfigurationError, Violation};
use crate::utility::{get_entries, ConfigValue};

/// Pin assignment of the single-board computer in the BCM numbering.
#[derive(Clone, PartialEq, Debug)]
pub struct ConfigPins {
    // Configuration filename. Empty if only the defaults are used.
    pub filename: String,
    // H-bridge direction pins.
    pub motor_left_fwd: u8,
    pub motor_left_bwd: u8,
    pub motor_right_fwd: u8,
    pub motor_right_bwd: u8,
    // H-bridge enable pins driven by PWM.
    pub motor_left_en: u8,
    pub motor_right_en: u8,
    // Digital flame sensors. The output is low when a flame is detected.
    pub flame_left: u8,
    pub flame_center: u8,
    pub flame_right: u8,
    // Ultrasonic sensor.
    pub trigger: u8,
    pub echo: u8,
    pub pump: u8,
    pub buzzer: u8,
}

impl Default for ConfigPins {
    fn default() -> Self {
        Self {
            filename: String::new(),
            motor_left_fwd: PIN_MOTOR_LEFT_FWD,
            motor_left_bwd: PIN_MOTOR_LEFT_BWD,
            motor_right_fwd: PIN_MOTOR_RIGHT_FWD,
            motor_right_bwd: PIN_MOTOR_RIGHT_BWD,
            motor_left_en: PIN_MOTOR_LEFT_EN,
            motor_right_en: PIN_MOTOR_RIGHT_EN,
            flame_left: PIN_FLAME_LEFT,
            flame_center: PIN_FLAME_CENTER,
            flame_right: PIN_FLAME_RIGHT,
            trigger: PIN_TRIGGER,
            echo: PIN_ECHO,
            pump: PIN_PUMP,
            buzzer: PIN_BUZZER,
        }
    }
}

impl ConfigPins {
    /// Create a new ConfigPins object.
    ///
    /// # Arguments
    /// * `filepath` - The path to the pin assignment file.
    ///
    /// # Returns
    /// A new ConfigPins object.
    ///
    /// # Errors
    /// If the file can not be read, a key is not a pin function, or a pin is
    /// not a valid BCM pin.
    pub fn new(filepath: &Path) -> Result<Self, ConfigurationError> {
        let mut config = Self::default();
        config.filename = filepath.display().to_string();

        for (key, raw) in get_entries(filepath)? {
            let function = key
                .to_ascii_lowercase()
                .parse::<PinFunction>()
                .map_err(|_| ConfigurationError::UnknownParameter(key.clone()))?;

            let pin = i64::parse_value(&raw).ok_or_else(|| {
                ConfigurationError::InvariantViolated(Violation::PinWrongKind {
                    function: function,
                    value: raw.clone(),
                })
            })?;

            config.set_pin(function, pin)?;
        }

        Ok(config)
    }

    /// Get the pin of the function.
    ///
    /// # Arguments
    /// * `function` - Pin function.
    ///
    /// # Returns
    /// BCM pin.
    pub fn pin(&self, function: PinFunction) -> u8 {
        match function {
            PinFunction::MotorLeftFwd => self.motor_left_fwd,
            PinFunction::MotorLeftBwd => self.motor_left_bwd,
            PinFunction::MotorRightFwd => self.motor_right_fwd,
            PinFunction::MotorRightBwd => self.motor_right_bwd,
            PinFunction::MotorLeftEn => self.motor_left_en,
            PinFunction::MotorRightEn => self.motor_right_en,
            PinFunction::FlameLeft => self.flame_left,
            PinFunction::FlameCenter => self.flame_center,
            PinFunction::FlameRight => self.flame_right,
            PinFunction::Trigger => self.trigger,
            PinFunction::Echo => self.echo,
            PinFunction::Pump => self.pump,
            PinFunction::Buzzer => self.buzzer,
        }
    }

    /// Get the pin by the function name.
    ///
    /// # Arguments
    /// * `name` - Function name such as "pump".
    ///
    /// # Returns
    /// BCM pin.
    ///
    /// # Errors
    /// If the name is not a pin function.
    pub fn get(&self, name: &str) -> Result<u8, ConfigurationError> {
        name.parse::<PinFunction>()
            .map(|function| self.pin(function))
            .map_err(|_| ConfigurationError::UnknownParameter(String::from(name)))
    }

    fn set_pin(&mut self, function: PinFunction, pin: i64) -> Result<(), ConfigurationError> {
        if (pin < 0) || (pin > BCM_PIN_MAX) {
            return Err(ConfigurationError::InvariantViolated(
                Violation::PinOutOfRange {
                    function: function,
                    pin: pin,
                    max: BCM_PIN_MAX,
                },
            ));
        }

        // Checked above
        let pin = pin as u8;
        match function {
            PinFunction::MotorLeftFwd => self.motor_left_fwd = pin,
            PinFunction::MotorLeftBwd => self.motor_left_bwd = pin,
            PinFunction::MotorRightFwd => self.motor_right_fwd = pin,
            PinFunction::MotorRightBwd => self.motor_right_bwd = pin,
            PinFunction::MotorLeftEn => self.motor_left_en = pin,
            PinFunction::MotorRightEn => self.motor_right_en = pin,
            PinFunction::FlameLeft => self.flame_left = pin,
            PinFunction::FlameCenter => self.flame_center = pin,
            PinFunction::FlameRight => self.flame_right = pin,
            PinFunction::Trigger => self.trigger = pin,
            PinFunction::Echo => self.echo = pin,
            PinFunction::Pump => self.pump = pin,
            PinFunction::Buzzer => self.buzzer = pin,
        }

        Ok(())
    }

    /// Get all the violations of the pin assignment.
    ///
    /// # Returns
    /// Violations. Empty if every pin is valid and used only once.
    pub fn violations(&self) -> Vec<Violation> {
        let mut violations = Vec::new();

        let mut used: HashMap<u8, PinFunction> = HashMap::new();
        for function in PinFunction::iter() {
            let pin = self.pin(function);

            if (pin as i64) > BCM_PIN_MAX {
                violations.push(Violation::PinOutOfRange {
                    function: function,
                    pin: pin as i64,
                    max: BCM_PIN_MAX,
                });
                continue;
            }

            match used.get(&pin).copied() {
                Some(first) => violations.push(Violation::PinConflict {
                    first: first,
                    second: function,
                    pin: pin,
                }),
                None => {
                    used.insert(pin, function);
                }
            }
        }

        violations
    }

    /// Validate the pin assignment.
    ///
    /// # Errors
    /// The first violation.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        match self.violations().into_iter().next() {
            Some(violation) => Err(ConfigurationError::InvariantViolated(violation)),
            None => Ok(()),
        }
    }
}
