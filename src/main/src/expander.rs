//! MCP23017 16-bit I2C I/O expander, register map with IOCON.BANK = 0.

use embedded_hal::i2c::I2c;

const IODIRA: u8 = 0x00;
const GPPUA: u8 = 0x0C;
const GPIOA: u8 = 0x12;
const OLATA: u8 = 0x14;

pub const DEFAULT_ADDRESS: u8 = 0x20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pin(u8);

impl Pin {
    // 0..8 are GPA0..GPA7, 8..16 are GPB0..GPB7
    pub fn new(index: u8) -> Option<Self> {
        (index < 16).then_some(Pin(index))
    }

    // Registers come in A/B pairs, port B is the A address + 1
    fn register(self, port_a: u8) -> u8 {
        port_a + self.0 / 8
    }

    fn mask(self) -> u8 {
        1 << (self.0 % 8)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Input,
    Output,
}

#[derive(Debug, Clone, Copy)]
pub struct Mcp23017 {
    pub address: u8,
}

impl Default for Mcp23017 {
    fn default() -> Self {
        Mcp23017 {
            address: DEFAULT_ADDRESS,
        }
    }
}

impl Mcp23017 {
    pub fn new(address: u8) -> Self {
        Mcp23017 { address }
    }

    /// Power-on state: every pin an input and the output latches low.
    pub fn init<I: I2c>(&self, i2c: &mut I) -> Result<(), I::Error> {
        i2c.write(self.address, &[IODIRA, 0xFF, 0xFF])?;
        i2c.write(self.address, &[OLATA, 0x00, 0x00])
    }

    pub fn set_direction<I: I2c>(
        &self,
        i2c: &mut I,
        pin: Pin,
        direction: Direction,
    ) -> Result<(), I::Error> {
        // IODIR bit set means input
        self.update(i2c, pin.register(IODIRA), pin.mask(), direction == Direction::Input)
    }

    pub fn set_pull_up<I: I2c>(
        &self,
        i2c: &mut I,
        pin: Pin,
        enabled: bool,
    ) -> Result<(), I::Error> {
        self.update(i2c, pin.register(GPPUA), pin.mask(), enabled)
    }

    pub fn write_pin<I: I2c>(
        &self,
        i2c: &mut I,
        pin: Pin,
        high: bool,
    ) -> Result<(), I::Error> {
        self.update(i2c, pin.register(OLATA), pin.mask(), high)
    }

    pub fn read_pin<I: I2c>(&self, i2c: &mut I, pin: Pin) -> Result<bool, I::Error> {
        let value = self.read_register(i2c, pin.register(GPIOA))?;
        Ok(value & pin.mask() != 0)
    }

    // GPIOB in the high byte
    pub fn read_all<I: I2c>(&self, i2c: &mut I) -> Result<u16, I::Error> {
        let mut buf = [0u8; 2];
        i2c.write_read(self.address, &[GPIOA], &mut buf)?;
        Ok(u16::from_le_bytes(buf))
    }

    fn read_register<I: I2c>(&self, i2c: &mut I, register: u8) -> Result<u8, I::Error> {
        let mut buf = [0u8; 1];
        i2c.write_read(self.address, &[register], &mut buf)?;
        Ok(buf[0])
    }

    fn update<I: I2c>(
        &self,
        i2c: &mut I,
        register: u8,
        mask: u8,
        set: bool,
    ) -> Result<(), I::Error> {
        let current = self.read_register(i2c, register)?;
        let value = match set {
            true => current | mask,
            false => current & !mask,
        };
        if value != current {
            i2c.write(self.address, &[register, value])?;
        }
        Ok(())
    }
}
