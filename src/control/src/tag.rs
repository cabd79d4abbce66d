//! How much of an RFID tag read is shown on the serial console.

use core::fmt;

use anyhow::{anyhow, Error};
use serde::Serialize;

#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Serialize)]
pub enum DebugLevel {
    Never = 0,
    DeniedOnly = 1,
    Hex = 2,
    Decimal = 3,
    Binary = 4,
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Radix {
    Binary,
    Decimal,
    Hex,
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Verdict {
    Granted,
    Denied,
}

impl DebugLevel {
    /// Radix to print a tag in, or `None` if the read stays off the console.
    pub fn radix_for(self, verdict: Verdict) -> Option<Radix> {
        match (self, verdict) {
            (DebugLevel::Never, _) => None,
            (DebugLevel::DeniedOnly, Verdict::Denied) => Some(Radix::Decimal),
            (DebugLevel::DeniedOnly, Verdict::Granted) => None,
            (DebugLevel::Hex, _) => Some(Radix::Hex),
            (DebugLevel::Decimal, _) => Some(Radix::Decimal),
            (DebugLevel::Binary, _) => Some(Radix::Binary),
        }
    }
}

impl TryFrom<u8> for DebugLevel {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(DebugLevel::Never),
            1 => Ok(DebugLevel::DeniedOnly),
            2 => Ok(DebugLevel::Hex),
            3 => Ok(DebugLevel::Decimal),
            4 => Ok(DebugLevel::Binary),
            other => Err(anyhow!("debug level {} is out of range 0-4", other)),
        }
    }
}

impl From<DebugLevel> for u8 {
    fn from(level: DebugLevel) -> u8 {
        level as u8
    }
}

#[derive(Debug, Clone, Copy)]
pub struct TagDisplay {
    pub tag: u32,
    pub radix: Radix,
}

impl fmt::Display for TagDisplay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.radix {
            Radix::Binary => write!(f, "{:b}", self.tag),
            Radix::Decimal => write!(f, "{}", self.tag),
            Radix::Hex => write!(f, "{:X}", self.tag),
        }
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use std::string::ToString;

    #[test]
    fn test_never_shows_nothing() {
        assert_eq!(DebugLevel::Never.radix_for(Verdict::Granted), None);
        assert_eq!(DebugLevel::Never.radix_for(Verdict::Denied), None);
    }

    #[test]
    fn test_denied_only() {
        assert_eq!(DebugLevel::DeniedOnly.radix_for(Verdict::Granted), None);
        assert_eq!(
            DebugLevel::DeniedOnly.radix_for(Verdict::Denied),
            Some(Radix::Decimal)
        );
    }

    #[test]
    fn test_every_read_shown_at_higher_levels() {
        for verdict in [Verdict::Granted, Verdict::Denied] {
            assert_eq!(DebugLevel::Hex.radix_for(verdict), Some(Radix::Hex));
            assert_eq!(DebugLevel::Decimal.radix_for(verdict), Some(Radix::Decimal));
            assert_eq!(DebugLevel::Binary.radix_for(verdict), Some(Radix::Binary));
        }
    }

    #[test]
    fn test_level_from_u8() {
        assert_eq!(DebugLevel::try_from(3).unwrap(), DebugLevel::Decimal);
        assert_eq!(u8::from(DebugLevel::Binary), 4);
        let err = DebugLevel::try_from(5).unwrap_err();
        assert!(err.to_string().contains("5"), "{}", err);
    }

    #[test]
    fn test_tag_display() {
        let tag = 0x00A1_B2C3;
        let show = |radix| TagDisplay { tag, radix }.to_string();
        assert_eq!(show(Radix::Decimal), "10597059");
        assert_eq!(show(Radix::Hex), "A1B2C3");
        assert_eq!(show(Radix::Binary), "101000011011001011000011");
    }
}
