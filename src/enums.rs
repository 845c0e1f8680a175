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
use strum_macros::{AsRefStr, Display, EnumCount, EnumIter, EnumString};

/// Name of the registered robot parameter.
///
/// # Notes
/// The string form is the upper snake case name used by the firmware, e.g.
/// `FLAME_THRESHOLD_VALUE`. The key in the parameter file is the lower case
/// form of the same name.
#[derive(
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Clone,
    Copy,
    Hash,
    EnumIter,
    EnumCount,
    EnumString,
    AsRefStr,
    Display,
    Serialize,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ParameterName {
    FlameThresholdValue,
    FlameSensitivityHigh,
    FlameSensitivityMedium,
    FlameSensitivityLow,
    ObstacleDistanceCm,
    FireNearDistanceCm,
    SafeDistanceCm,
    SpeedFast,
    SpeedNormal,
    SpeedSlow,
    SpeedTurn,
    PumpDurationMs,
    PumpCooldownMs,
    ServoCenter,
    ServoLeft,
    ServoRight,
    ServoScanDelayMs,
    LoopDelayMs,
    ObstacleAvoidDelayMs,
    BackupDelayMs,
    BluetoothBaudRate,
    DebugMode,
}

/// Role of the parameter.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, EnumIter, AsRefStr, Serialize)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ParameterGroup {
    FlameSensing,
    DistanceSensing,
    MotorActuation,
    PumpActuation,
    Servo,
    LoopTiming,
    Communication,
    Diagnostics,
}

/// Unit of the parameter value.
#[derive(Debug, PartialEq, Eq, Clone, Copy, AsRefStr, Serialize)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Unit {
    AdcUnit,
    Centimeter,
    PwmDuty,
    Millisecond,
    Degree,
    BitsPerSecond,
    Boolean,
}

/// Relation between two ordered parameters.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Relation {
    Less,
    LessOrEqual,
}

impl Relation {
    /// Check the relation.
    ///
    /// # Arguments
    /// * `lower` - Value expected to be the lower one.
    /// * `upper` - Value expected to be the upper one.
    ///
    /// # Returns
    /// True if the relation holds. Otherwise, false.
    pub fn holds(&self, lower: i64, upper: i64) -> bool {
        match self {
            Relation::Less => lower < upper,
            Relation::LessOrEqual => lower <= upper,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Relation::Less => "<",
            Relation::LessOrEqual => "<=",
        }
    }
}

/// Function of the pin on the single-board computer (BCM numbering).
#[derive(
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Clone,
    Copy,
    Hash,
    EnumIter,
    EnumString,
    AsRefStr,
    Display,
    Serialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum PinFunction {
    MotorLeftFwd,
    MotorLeftBwd,
    MotorRightFwd,
    MotorRightBwd,
    MotorLeftEn,
    MotorRightEn,
    FlameLeft,
    FlameCenter,
    FlameRight,
    Trigger,
    Echo,
    Pump,
    Buzzer,
}
