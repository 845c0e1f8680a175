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

// Flame sensor thresholds in raw ADC units (0 - 1023). A lower reading means
// a stronger flame signal.
pub const FLAME_THRESHOLD_VALUE: u16 = 500;
pub const FLAME_SENSITIVITY_HIGH: u16 = 400;
pub const FLAME_SENSITIVITY_MEDIUM: u16 = 500;
pub const FLAME_SENSITIVITY_LOW: u16 = 600;

// Distance thresholds in centimeter.
pub const OBSTACLE_DISTANCE_CM: u16 = 20;
pub const FIRE_NEAR_DISTANCE_CM: u16 = 15;
pub const SAFE_DISTANCE_CM: u16 = 30;

// Motor speeds as PWM duty (0 - 255).
pub const SPEED_FAST: u8 = 255;
pub const SPEED_NORMAL: u8 = 200;
pub const SPEED_SLOW: u8 = 150;
pub const SPEED_TURN: u8 = 180;

// Pump timing in millisecond.
pub const PUMP_DURATION_MS: u32 = 3000;
pub const PUMP_COOLDOWN_MS: u32 = 1000;

// Servo angles in degree.
pub const SERVO_CENTER: u8 = 90;
pub const SERVO_LEFT: u8 = 45;
pub const SERVO_RIGHT: u8 = 135;
pub const SERVO_SCAN_DELAY_MS: u32 = 300;

// Loop timing in millisecond.
pub const LOOP_DELAY_MS: u32 = 50;
pub const OBSTACLE_AVOID_DELAY_MS: u32 = 500;
pub const BACKUP_DELAY_MS: u32 = 500;

pub const BLUETOOTH_BAUD_RATE: u32 = 9600;

pub const DEBUG_MODE: bool = true;

// Valid ranges of the parameters.
pub const ADC_MAX: i64 = 1023;

// The ultrasonic sensor clamps its reading at 400 cm.
pub const DISTANCE_MIN_CM: i64 = 1;
pub const DISTANCE_MAX_CM: i64 = 400;

pub const PWM_DUTY_MAX: i64 = 255;

pub const SERVO_ANGLE_MAX: i64 = 180;

pub const DELAY_MAX_MS: i64 = 60_000;

pub const SUPPORTED_BAUD_RATES: [u32; 8] = [1200, 2400, 4800, 9600, 19200, 38400, 57600, 115200];

// Default pin assignment in the BCM numbering.
pub const PIN_MOTOR_LEFT_FWD: u8 = 17;
pub const PIN_MOTOR_LEFT_BWD: u8 = 27;
pub const PIN_MOTOR_RIGHT_FWD: u8 = 23;
pub const PIN_MOTOR_RIGHT_BWD: u8 = 24;
pub const PIN_MOTOR_LEFT_EN: u8 = 12;
pub const PIN_MOTOR_RIGHT_EN: u8 = 13;
pub const PIN_FLAME_LEFT: u8 = 5;
pub const PIN_FLAME_CENTER: u8 = 6;
pub const PIN_FLAME_RIGHT: u8 = 26;
pub const PIN_TRIGGER: u8 = 20;
pub const PIN_ECHO: u8 = 21;
pub const PIN_PUMP: u8 = 16;
pub const PIN_BUZZER: u8 = 19;

// Highest general purpose pin on the 40-pin header.
pub const BCM_PIN_MAX: i64 = 27;

pub const FILEPATH_PARAMETERS_ROBOT: &str = "config/parameters_robot.yaml";
pub const FILEPATH_PARAMETERS_PINS: &str = "config/parameters_pins.yaml";
