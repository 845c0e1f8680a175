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

use config::{Config, ConfigError, Value};
use std::collections::BTreeMap;
use std::path::Path;

use crate::error::ConfigurationError;

/// Trait to parse the configuration value from a string.
pub trait ConfigValue: Sized {
    /// Parse the configuration value from a string.
    ///
    /// # Parameters
    /// * `s` - String to parse.
    ///
    /// # Returns
    /// The parsed configuration value or None if the string does not have the
    /// expected format.
    fn parse_value(s: &str) -> Option<Self>;
}

impl ConfigValue for i64 {
    fn parse_value(s: &str) -> Option<Self> {
        s.trim().parse::<i64>().ok()
    }
}

impl ConfigValue for bool {
    fn parse_value(s: &str) -> Option<Self> {
        s.trim().parse::<bool>().ok()
    }
}

/// Get the configuation from the file.
///
/// # Parameters
/// * `filepath` - Path to the config file.
///
/// # Returns
/// The configuration.
///
/// # Errors
/// If the file can not be read or parsed.
pub fn get_config(filepath: &Path) -> Result<Config, ConfigurationError> {
    let name = filepath.to_string_lossy();

    Config::builder()
        .add_source(config::File::with_name(&name))
        .build()
        .map_err(|error| load_error(filepath, error))
}

/// Get all the entries in the file.
///
/// # Parameters
/// * `filepath` - Path to the config file.
///
/// # Returns
/// The raw value of each key, sorted by the key.
///
/// # Errors
/// If the file can not be read or a value is not a scalar.
pub fn get_entries(filepath: &Path) -> Result<BTreeMap<String, String>, ConfigurationError> {
    let table = get_config(filepath)?
        .try_deserialize::<BTreeMap<String, Value>>()
        .map_err(|error| load_error(filepath, error))?;

    let mut entries = BTreeMap::new();
    for (key, value) in table {
        let raw = value
            .into_string()
            .map_err(|error| load_error(filepath, error))?;
        entries.insert(key, raw);
    }

    Ok(entries)
}

/// Wrap the error of the config crate.
///
/// # Parameters
/// * `filepath` - Path to the config file.
/// * `error` - Error from the config crate.
///
/// # Returns
/// The load error.
fn load_error(filepath: &Path, error: ConfigError) -> ConfigurationError {
    ConfigurationError::Load {
        filepath: filepath.display().to_string(),
        source: error,
    }
}

/// Create a temporary YAML file.
///
/// # Arguments
/// * `content` - Content of the file.
///
/// # Returns
/// Temporary file that is deleted when dropped.
#[cfg(test)]
pub fn create_yaml_file(content: &str) -> tempfile::NamedTempFile {
    use std::io::Write;

    let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();

    file
}
