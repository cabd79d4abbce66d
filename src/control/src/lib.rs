#![no_std]

mod config;
mod dial;
mod ds18s20;
mod state;
mod tag;
mod timer;

pub use config::{
    Board, CoreConfig, DialCalibration, HardwareOptions, Timeouts, Version, ADC_MAX,
    FIRMWARE_VERSION, MAX_CLOCK_SPAN, STANDARD_BAUD_RATES,
};
pub use dial::setpoint_from_pot;
pub use ds18s20::Scratchpad;
pub use state::{Celsius, PowerState, Temperature};
pub use tag::{DebugLevel, Radix, TagDisplay, Verdict};
pub use timer::{Deadline, Interval};
