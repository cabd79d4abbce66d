//! AT24C series I2C EEPROM with two-byte memory addressing.
//!
//! Covers the AT24C32 through AT24C512. Smaller parts take a one-byte word
//! address and larger ones carry the top address bits in the device address,
//! so both are refused before any bus traffic.

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::{Error, ErrorKind, I2c};

pub const DEFAULT_ADDRESS: u8 = 0x50;

// Self-timed write cycle, datasheet maximum
const WRITE_CYCLE_MS: u32 = 5;

// AT24C512
const MAX_PAGE_SIZE: usize = 128;

// Capacities reachable through a two-byte word address, AT24C32..AT24C512
const MIN_CAPACITY: u32 = 4 * 1024;
const MAX_CAPACITY: u32 = 64 * 1024;

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum EepromError<E> {
    OutOfRange { offset: u16, len: usize },
    UnsupportedCapacity { capacity: u32 },
    Bus(E),
}

impl<E: Error> EepromError<E> {
    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            EepromError::OutOfRange { .. } | EepromError::UnsupportedCapacity { .. } => None,
            EepromError::Bus(e) => Some(e.kind()),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct At24c {
    pub address: u8,
    pub capacity: u32,
    pub page_size: u16,
}

// AT24C256
impl Default for At24c {
    fn default() -> Self {
        At24c {
            address: DEFAULT_ADDRESS,
            capacity: 32 * 1024,
            page_size: 64,
        }
    }
}

impl At24c {
    fn check_range<E>(&self, offset: u16, len: usize) -> Result<(), EepromError<E>> {
        if !(MIN_CAPACITY..=MAX_CAPACITY).contains(&self.capacity) {
            return Err(EepromError::UnsupportedCapacity {
                capacity: self.capacity,
            });
        }
        if len > self.capacity as usize || u32::from(offset) + len as u32 > self.capacity {
            return Err(EepromError::OutOfRange { offset, len });
        }
        Ok(())
    }

    pub fn read<I: I2c>(
        &self,
        i2c: &mut I,
        offset: u16,
        buf: &mut [u8],
    ) -> Result<(), EepromError<I::Error>> {
        self.check_range::<I::Error>(offset, buf.len())?;
        if buf.is_empty() {
            return Ok(());
        }
        i2c.write_read(self.address, &offset.to_be_bytes(), buf)
            .map_err(EepromError::Bus)
    }

    /// Writes `data` one page at a time, waiting out the write cycle after each.
    pub fn write<I: I2c, D: DelayNs>(
        &self,
        i2c: &mut I,
        delay: &mut D,
        offset: u16,
        data: &[u8],
    ) -> Result<(), EepromError<I::Error>> {
        self.check_range::<I::Error>(offset, data.len())?;

        let page_size = usize::from(self.page_size).clamp(1, MAX_PAGE_SIZE);
        let mut address = usize::from(offset);
        let mut remaining = data;
        while !remaining.is_empty() {
            // A page write wraps within the page, so stop at the boundary
            let room = page_size - address % page_size;
            let (chunk, rest) = remaining.split_at(room.min(remaining.len()));

            let mut frame = [0u8; 2 + MAX_PAGE_SIZE];
            frame[..2].copy_from_slice(&(address as u16).to_be_bytes());
            frame[2..2 + chunk.len()].copy_from_slice(chunk);
            i2c.write(self.address, &frame[..2 + chunk.len()])
                .map_err(EepromError::Bus)?;
            delay.delay_ms(WRITE_CYCLE_MS);

            address += chunk.len();
            remaining = rest;
        }
        Ok(())
    }
}
