use anyhow::{anyhow, Result};
use crc::{Crc, CRC_8_MAXIM_DOW};
use fixed::types::I12F4;

use crate::state::Celsius;

const CRC: Crc<u8> = Crc::<u8>::new(&CRC_8_MAXIM_DOW);

// Raw 9 byte scratchpad as read from the sensor
#[derive(Debug, PartialEq, Clone, Copy)]
pub struct Scratchpad(pub [u8; 9]);

impl Scratchpad {
    pub fn crc_ok(&self) -> bool {
        CRC.checksum(&self.0[..8]) == self.0[8]
    }

    pub fn temperature(&self) -> Celsius {
        // 0.5 degree steps, two's complement
        let raw = i16::from_le_bytes([self.0[0], self.0[1]]);
        let count_remain = i16::from(self.0[6]);
        let count_per_c = i16::from(self.0[7]);

        if count_per_c == 0 {
            return Celsius::new(I12F4::from_bits(raw.saturating_mul(8)));
        }

        //                              count_per_c - count_remain
        // t = (raw >> 1) - 0.25   +   --------------------------
        //                                    count_per_c
        let whole = (raw >> 1).saturating_mul(16);
        let fraction = (count_per_c - count_remain) * 16 / count_per_c;
        Celsius::new(I12F4::from_bits(whole.saturating_sub(4).saturating_add(fraction)))
    }

    // The reading, only if the scratchpad arrived intact
    pub fn verified_temperature(&self) -> Option<Celsius> {
        self.crc_ok().then(|| self.temperature())
    }

    pub fn temperature_checked(&self) -> Result<Celsius> {
        self.verified_temperature()
            .ok_or_else(|| anyhow!("DS18S20 scratchpad CRC mismatch: {:02x?}", self.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plus_25() {
        let scratchpad = Scratchpad([0x32, 0x00, 0x4B, 0x46, 0xFF, 0xFF, 0x0C, 0x10, 0x6B]);
        assert!(scratchpad.crc_ok());
        let t = scratchpad.temperature_checked().unwrap();
        assert_eq!(I12F4::from(t), I12F4::from_num(25));
    }

    #[test]
    fn test_minus_half() {
        let scratchpad = Scratchpad([0xFF, 0xFF, 0x4B, 0x46, 0xFF, 0xFF, 0x04, 0x10, 0xBC]);
        let t = scratchpad.temperature_checked().unwrap();
        assert_eq!(I12F4::from(t), I12F4::from_num(-0.5));
    }

    #[test]
    fn test_extended_resolution() {
        // 17C - 0.25C + 6/16C
        let scratchpad = Scratchpad([0x22, 0x00, 0x4B, 0x46, 0xFF, 0xFF, 0x0A, 0x10, 0x95]);
        let t = scratchpad.temperature_checked().unwrap();
        assert_eq!(I12F4::from(t), I12F4::from_num(17.125));
    }

    #[test]
    fn test_half_degree_fallback() {
        let scratchpad = Scratchpad([0x33, 0x00, 0, 0, 0, 0, 0, 0, 0]);
        assert_eq!(I12F4::from(scratchpad.temperature()), I12F4::from_num(25.5));
    }

    #[test]
    fn test_bad_crc_rejected() {
        let scratchpad = Scratchpad([0x32, 0x00, 0x4B, 0x46, 0xFF, 0xFF, 0x0C, 0x10, 0x6C]);
        assert!(!scratchpad.crc_ok());
        assert_eq!(scratchpad.verified_temperature(), None);
        assert!(scratchpad.temperature_checked().is_err());
    }
}
