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

//! # Fire-Fighting Robot Configuration
//!
//! This library holds the validated configuration of the fire-fighting robot.
//! The sensing loop, the motion controller, the pump sequencer and the serial
//! command receiver read the thresholds, speeds and timings from it.
pub mod application;
pub mod config;
pub mod config_pins;
pub mod constants;
pub mod enums;
pub mod error;
pub mod parameter;
pub mod provider;
pub mod utility;
