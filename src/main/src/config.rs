use core::time::Duration;

use anyhow::{Context, Result};
use serde::Serialize;

use control::{
    Board, CoreConfig, DebugLevel, DialCalibration, HardwareOptions, Temperature, Timeouts,
    FIRMWARE_VERSION,
};

#[toml_cfg::toml_config]
pub struct TomlConfig {
    // 4 binary, 3 decimal, 2 hex, 1 denied tags only, 0 never
    #[default(3)]
    debug: u8,
    #[default(9600)]
    baud_rate: u32,
    #[default(90)]
    minimum_temperature: i16,
    #[default(105)]
    maximum_temperature: i16,
    #[default(1800000)]
    user_timeout_ms: u64,
    #[default(1800000)]
    system_timeout_ms: u64,
    #[default(300000)]
    chlorine_timeout_ms: u64,
    #[default(710)]
    pot_low: u16,
    #[default(770)]
    pot_high: u16,
    #[default(60000)]
    thermostat_interval_ms: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Config {
    pub hardware: HardwareOptions,
    pub core: CoreConfig,
}

impl Config {
    pub fn read() -> Result<Self> {
        let mut config = Config::try_from(TOML_CONFIG)?;
        config.hardware = compiled_hardware();
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.hardware
            .validate()
            .context("Invalid hardware selection")?;
        self.core.validate().context("Invalid configuration")
    }
}

// Hardware options are picked with cargo features when the firmware is built
fn compiled_hardware() -> HardwareOptions {
    HardwareOptions {
        board: if cfg!(feature = "mcu328") {
            Board::Mcu328
        } else {
            Board::Mega
        },
        v3_standard: cfg!(feature = "hwv3std"),
        io_expander: cfg!(feature = "mcpioxp"),
        eeprom: cfg!(feature = "at24eeprom"),
        temperature_sensor: cfg!(feature = "ds18s20"),
        lcd: cfg!(feature = "lcdboard"),
    }
}

impl TryFrom<TomlConfig> for Config {
    type Error = anyhow::Error;

    fn try_from(config: TomlConfig) -> Result<Self> {
        let debug = DebugLevel::try_from(config.debug).context("Invalid debug setting")?;
        Ok(Config {
            core: CoreConfig {
                debug,
                version: FIRMWARE_VERSION,
                baud_rate: config.baud_rate,
                minimum_temperature: Temperature::new(config.minimum_temperature),
                maximum_temperature: Temperature::new(config.maximum_temperature),
                dial: DialCalibration {
                    pot_low: config.pot_low,
                    pot_high: config.pot_high,
                },
                thermostat_interval: Duration::from_millis(config.thermostat_interval_ms),
                timeouts: Timeouts {
                    user: Duration::from_millis(config.user_timeout_ms),
                    system: Duration::from_millis(config.system_timeout_ms),
                    chlorine: Duration::from_millis(config.chlorine_timeout_ms),
                },
            },
            ..Config::default()
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            hardware: HardwareOptions::default(),
            core: CoreConfig::default(),
        }
    }
}
