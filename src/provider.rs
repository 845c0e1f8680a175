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

use log::{error, info};
use std::path::Path;
use std::sync::Arc;
use strum::IntoEnumIterator;

use crate::config::Config;
use crate::enums::ParameterName;
use crate::error::ConfigurationError;
use crate::parameter::{ConfigurationParameter, ParameterValue};

/// Read-only access to the validated robot configuration.
///
/// # Notes
/// The provider only exists if the configuration passed the validation. There
/// is no setter. Clones share the same frozen configuration, so the sensing
/// loop, the motion controller and the other consumers can read it from any
/// thread without locking.
#[derive(Clone, Debug)]
pub struct ConfigurationProvider {
    _config: Arc<Config>,
}

impl ConfigurationProvider {
    /// Create a new configuration provider.
    ///
    /// # Arguments
    /// * `config` - Configuration to freeze.
    ///
    /// # Returns
    /// A new configuration provider.
    ///
    /// # Errors
    /// The first violated invariant. All the violations are logged.
    pub fn new(config: Config) -> Result<Self, ConfigurationError> {
        let violations = config.violations();
        for violation in violations.iter() {
            error!("Configuration invariant violated: {violation}.");
        }

        if let Some(violation) = violations.into_iter().next() {
            return Err(ConfigurationError::InvariantViolated(violation));
        }

        if config.filename.is_empty() {
            info!("Use the default robot configuration.");
        } else {
            info!("Use the robot configuration in {}.", config.filename);
        }

        Ok(Self {
            _config: Arc::new(config),
        })
    }

    /// Load the configuration file and create a new configuration provider.
    ///
    /// # Arguments
    /// * `filepath` - The path to the robot parameters file.
    ///
    /// # Returns
    /// A new configuration provider.
    ///
    /// # Errors
    /// If the configuration can not be loaded or is not valid.
    pub fn from_file(filepath: &Path) -> Result<Self, ConfigurationError> {
        Self::new(Config::new(filepath)?)
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
        self._config.get(name)
    }

    /// Get the value of the parameter.
    ///
    /// # Arguments
    /// * `name` - Parameter name.
    ///
    /// # Returns
    /// Value.
    pub fn value(&self, name: ParameterName) -> ParameterValue {
        self._config.value(name)
    }

    /// Get the configuration.
    ///
    /// # Returns
    /// Configuration.
    pub fn config(&self) -> &Config {
        &self._config
    }

    /// Get the description of all the parameters.
    ///
    /// # Returns
    /// Parameters in the registered order.
    pub fn parameters(&self) -> Vec<ConfigurationParameter> {
        ParameterName::iter()
            .map(|name| ConfigurationParameter::new(name, self.value(name)))
            .collect()
    }
}
