pub mod access;
pub mod config;
pub mod eeprom;
pub mod expander;
pub mod hardware;
pub mod onewire;
pub mod safety;
pub mod thermostat;

pub use config::Config;
pub use hardware::Peripherals;
