use anyhow::{anyhow, bail, Result};
use embedded_hal::i2c::{Error, I2c};
use log::*;

use control::HardwareOptions;

use crate::eeprom::At24c;
use crate::expander::Mcp23017;
use crate::onewire::Ds18s20;

// Chips fitted to this build of the controller
#[derive(Debug, Clone, Copy)]
pub struct Peripherals {
    pub options: HardwareOptions,
    expander: Option<Mcp23017>,
    eeprom: Option<At24c>,
    thermometer: Option<Ds18s20>,
}

impl Peripherals {
    pub fn new(options: HardwareOptions) -> Result<Self> {
        options.validate()?;
        Ok(Peripherals {
            options,
            expander: options.io_expander.then(Mcp23017::default),
            eeprom: options.eeprom.then(At24c::default),
            thermometer: options.temperature_sensor.then_some(Ds18s20),
        })
    }

    pub fn expander(&self) -> Result<&Mcp23017> {
        match self.expander {
            Some(ref expander) if self.options.expander_pins_available() => Ok(expander),
            Some(_) => bail!("MCP23017 pins are in use by the LCD board"),
            None => bail!("No MCP23017 I/O expander fitted"),
        }
    }

    pub fn eeprom(&self) -> Result<&At24c> {
        self.eeprom
            .as_ref()
            .ok_or_else(|| anyhow!("No AT24C EEPROM fitted"))
    }

    pub fn thermometer(&self) -> Result<Ds18s20> {
        self.thermometer
            .ok_or_else(|| anyhow!("No DS18S20 temperature sensor fitted"))
    }

    /// Puts the I2C chips into a known state and checks they answer.
    pub fn bring_up<I: I2c>(&self, i2c: &mut I) -> Result<()> {
        if let Some(expander) = &self.expander {
            expander.init(i2c).map_err(|e| {
                error!("MCP23017 at {:#04x} did not initialise", expander.address);
                anyhow!("MCP23017 init failed: {:?}", e.kind())
            })?;
            info!("MCP23017 I/O expander ready at {:#04x}", expander.address);
        }

        if let Some(eeprom) = &self.eeprom {
            let mut probe = [0u8; 1];
            eeprom.read(i2c, 0, &mut probe).map_err(|e| {
                error!("AT24C at {:#04x} did not answer", eeprom.address);
                anyhow!("AT24C probe failed: {:?}", e.kind())
            })?;
            info!(
                "AT24C EEPROM ready at {:#04x}, {} bytes",
                eeprom.address, eeprom.capacity
            );
        }

        if self.thermometer.is_some() {
            info!("DS18S20 temperature sensor enabled");
        }
        if self.options.lcd {
            warn!("LCD board enabled, MCP23017 I/O pins are unavailable");
        }
        Ok(())
    }
}
