//! Bit-banged 1-wire master and the DS18S20 temperature sensor on it.
//!
//! The data line is an open-drain pin with an external pull-up: driving it
//! high releases the bus. Slot timings are the standard-speed values.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};

use control::{Celsius, Scratchpad};

const SKIP_ROM: u8 = 0xCC;
const CONVERT_T: u8 = 0x44;
const READ_SCRATCHPAD: u8 = 0xBE;

// Worst case conversion time at full resolution
const CONVERSION_MS: u32 = 750;

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum OneWireError<E> {
    NoDevice,
    CrcMismatch,
    Pin(E),
}

impl<E> From<E> for OneWireError<E> {
    fn from(e: E) -> Self {
        OneWireError::Pin(e)
    }
}

pub struct OneWire<P, D> {
    pin: P,
    delay: D,
}

impl<P: InputPin + OutputPin, D: DelayNs> OneWire<P, D> {
    pub fn new(pin: P, delay: D) -> Self {
        OneWire { pin, delay }
    }

    /// Returns whether any device answered with a presence pulse.
    pub fn reset(&mut self) -> Result<bool, P::Error> {
        self.pin.set_low()?;
        self.delay.delay_us(480);
        self.pin.set_high()?;
        self.delay.delay_us(70);
        let present = self.pin.is_low()?;
        self.delay.delay_us(410);
        Ok(present)
    }

    fn write_bit(&mut self, bit: bool) -> Result<(), P::Error> {
        let (low, recovery) = match bit {
            true => (6, 64),
            false => (60, 10),
        };
        self.pin.set_low()?;
        self.delay.delay_us(low);
        self.pin.set_high()?;
        self.delay.delay_us(recovery);
        Ok(())
    }

    fn read_bit(&mut self) -> Result<bool, P::Error> {
        self.pin.set_low()?;
        self.delay.delay_us(6);
        self.pin.set_high()?;
        self.delay.delay_us(9);
        let bit = !self.pin.is_low()?;
        self.delay.delay_us(55);
        Ok(bit)
    }

    // Least significant bit first
    pub fn write_byte(&mut self, byte: u8) -> Result<(), P::Error> {
        for i in 0..8 {
            self.write_bit(byte >> i & 1 == 1)?;
        }
        Ok(())
    }

    pub fn read_byte(&mut self) -> Result<u8, P::Error> {
        let mut byte = 0;
        for i in 0..8 {
            if self.read_bit()? {
                byte |= 1 << i;
            }
        }
        Ok(byte)
    }

    pub fn delay_ms(&mut self, ms: u32) {
        self.delay.delay_ms(ms);
    }
}

// Single sensor on the bus, addressed with SKIP ROM
#[derive(Debug, Clone, Copy, Default)]
pub struct Ds18s20;

impl Ds18s20 {
    pub fn read_temperature<P, D>(
        &self,
        bus: &mut OneWire<P, D>,
    ) -> Result<Celsius, OneWireError<P::Error>>
    where
        P: InputPin + OutputPin,
        D: DelayNs,
    {
        self.command(bus, CONVERT_T)?;
        bus.delay_ms(CONVERSION_MS);

        self.command(bus, READ_SCRATCHPAD)?;
        let mut bytes = [0u8; 9];
        for byte in bytes.iter_mut() {
            *byte = bus.read_byte()?;
        }

        Scratchpad(bytes)
            .verified_temperature()
            .ok_or(OneWireError::CrcMismatch)
    }

    fn command<P, D>(
        &self,
        bus: &mut OneWire<P, D>,
        command: u8,
    ) -> Result<(), OneWireError<P::Error>>
    where
        P: InputPin + OutputPin,
        D: DelayNs,
    {
        if !bus.reset()? {
            return Err(OneWireError::NoDevice);
        }
        bus.write_byte(SKIP_ROM)?;
        bus.write_byte(command)?;
        Ok(())
    }
}
