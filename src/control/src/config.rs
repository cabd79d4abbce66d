use core::fmt;
use core::time::Duration;

use anyhow::{ensure, Result};
use serde::Serialize;

use crate::state::Temperature;
use crate::tag::DebugLevel;

// Serial rates the board's UART can be configured for
pub const STANDARD_BAUD_RATES: [u32; 13] = [
    300, 600, 1200, 2400, 4800, 9600, 14400, 19200, 28800, 31250, 38400, 57600, 115200,
];

// Full scale of the 10 bit ADC the dial potentiometer is read on
pub const ADC_MAX: u16 = 1023;

// millis() wraps at 2^32, so a deadline can only be told apart from a
// stale start time when it is less than half of that
pub const MAX_CLOCK_SPAN: Duration = Duration::from_millis(1 << 31);

pub const FIRMWARE_VERSION: Version = Version::new(1, 0);

#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize)]
pub enum Board {
    Mega,
    Mcu328,
}

/// Hardware fitted to the controller, one switch per build option.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize)]
pub struct HardwareOptions {
    pub board: Board,
    // Open Access v3 standard board
    pub v3_standard: bool,
    // MCP23017 I2C I/O expander
    pub io_expander: bool,
    // AT24C I2C EEPROM
    pub eeprom: bool,
    // DS18S20 1-wire temperature sensor
    pub temperature_sensor: bool,
    // LCD extension, drives its display through the expander
    pub lcd: bool,
}

impl HardwareOptions {
    pub fn validate(&self) -> Result<()> {
        ensure!(
            !self.io_expander || self.v3_standard,
            "the MCP23017 I/O expander is only fitted to the v3 standard board"
        );
        ensure!(
            !self.lcd || self.io_expander,
            "the LCD board requires the MCP23017 I/O expander"
        );
        Ok(())
    }

    /// The LCD library takes over every expander pin it doesn't use itself.
    pub fn expander_pins_available(&self) -> bool {
        self.io_expander && !self.lcd
    }
}

impl Default for HardwareOptions {
    fn default() -> Self {
        HardwareOptions {
            board: Board::Mcu328,
            v3_standard: true,
            io_expander: true,
            eeprom: true,
            temperature_sensor: false,
            lcd: false,
        }
    }
}

// Raw ADC readings at the two ends of the thermostat dial
#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize)]
pub struct DialCalibration {
    pub pot_low: u16,
    pub pot_high: u16,
}

impl DialCalibration {
    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.pot_low < self.pot_high,
            "dial calibration is inverted: low {} is not below high {}",
            self.pot_low,
            self.pot_high
        );
        ensure!(
            self.pot_high <= ADC_MAX,
            "dial calibration high {} exceeds the ADC range of {}",
            self.pot_high,
            ADC_MAX
        );
        Ok(())
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize)]
pub struct Timeouts {
    // Longest a user may run the spa
    pub user: Duration,
    // Longest the system may run the spa
    pub system: Duration,
    // Longest a chlorine dispense may run
    pub chlorine: Duration,
}

impl Timeouts {
    pub fn validate(&self) -> Result<()> {
        for (name, timeout) in [
            ("user", self.user),
            ("system", self.system),
            ("chlorine", self.chlorine),
        ] {
            ensure!(!timeout.is_zero(), "{} timeout must not be zero", name);
            ensure!(
                timeout < MAX_CLOCK_SPAN,
                "{} timeout of {}ms does not fit the millisecond clock",
                name,
                timeout.as_millis()
            );
        }
        Ok(())
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize)]
pub struct Version {
    pub major: u8,
    pub minor: u8,
}

impl Version {
    pub const fn new(major: u8, minor: u8) -> Self {
        Version { major, minor }
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.major, self.minor)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
pub struct CoreConfig {
    // How much of each RFID tag read ends up on the serial console
    pub debug: DebugLevel,

    pub version: Version,

    // USB serial port speed
    pub baud_rate: u32,

    // Lowest setpoint on the thermostat dial
    pub minimum_temperature: Temperature,

    // Highest setpoint on the thermostat dial
    pub maximum_temperature: Temperature,

    pub dial: DialCalibration,

    // Period between thermostat dial samples
    pub thermostat_interval: Duration,

    pub timeouts: Timeouts,
}

impl CoreConfig {
    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.minimum_temperature < self.maximum_temperature,
            "minimum temperature {}F is not below maximum temperature {}F",
            self.minimum_temperature.0,
            self.maximum_temperature.0
        );
        ensure!(
            STANDARD_BAUD_RATES.contains(&self.baud_rate),
            "{} is not a standard serial baud rate",
            self.baud_rate
        );
        self.dial.validate()?;
        ensure!(
            !self.thermostat_interval.is_zero(),
            "thermostat interval must not be zero"
        );
        ensure!(
            self.thermostat_interval < MAX_CLOCK_SPAN,
            "thermostat interval does not fit the millisecond clock"
        );
        self.timeouts.validate()
    }
}

impl Default for CoreConfig {
    fn default() -> Self {
        CoreConfig {
            debug: DebugLevel::Decimal,
            version: FIRMWARE_VERSION,
            baud_rate: 9600,
            minimum_temperature: Temperature::new(90),
            maximum_temperature: Temperature::new(105),
            dial: DialCalibration {
                pot_low: 710,
                pot_high: 770,
            },
            thermostat_interval: Duration::from_millis(60_000),
            timeouts: Timeouts {
                user: Duration::from_millis(1_800_000),
                system: Duration::from_millis(1_800_000),
                chlorine: Duration::from_millis(300_000),
            },
        }
    }
}
