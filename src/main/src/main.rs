use anyhow::Result;
use log::*;
use tracing_subscriber::EnvFilter;

use spa_controller::{Config, Peripherals};

fn main() -> Result<()> {
    // Route `log` records from the libraries through tracing, RUST_LOG picks the level
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = Config::read()?;
    config.validate()?;
    let peripherals = Peripherals::new(config.hardware)?;

    let core = &config.core;
    info!("Spa controller firmware v{}", core.version);
    info!(
        "Board {:?}{}, serial console at {} baud",
        peripherals.options.board,
        if peripherals.options.v3_standard { " (v3 standard)" } else { "" },
        core.baud_rate
    );
    info!(
        "I/O expander: {}, EEPROM: {}, temperature sensor: {}",
        peripherals.expander().is_ok(),
        peripherals.eeprom().is_ok(),
        peripherals.thermometer().is_ok()
    );
    info!(
        "Dial {}F to {}F over raw {}..{}, sampled every {:?}",
        core.minimum_temperature.0,
        core.maximum_temperature.0,
        core.dial.pot_low,
        core.dial.pot_high,
        core.thermostat_interval
    );
    info!("Tag display: {:?}", core.debug);

    println!("{}", serde_json::to_string_pretty(&config)?);
    Ok(())
}
