use anyhow::Result;
use log::*;

use control::{setpoint_from_pot, CoreConfig, Interval, Temperature};

// Samples the thermostat dial once per thermostat interval
#[derive(Debug)]
pub struct DialSampler {
    config: CoreConfig,
    interval: Interval,
    setpoint: Option<Temperature>,
}

impl DialSampler {
    pub fn new(config: CoreConfig) -> Result<Self> {
        config.validate()?;
        Ok(DialSampler {
            config,
            interval: Interval::new(config.thermostat_interval),
            setpoint: None,
        })
    }

    pub fn setpoint(&self) -> Option<Temperature> {
        self.setpoint
    }

    /// Reads the dial when a sample is due, returning the setpoint if it moved.
    pub fn poll(
        &mut self,
        now: u32,
        read: impl FnOnce() -> Result<u16>,
    ) -> Result<Option<Temperature>> {
        if !self.interval.due(now) {
            return Ok(None);
        }

        let raw = read()?;
        let setpoint = setpoint_from_pot(&self.config, raw);
        if self.setpoint == Some(setpoint) {
            debug!("Dial unchanged at {}F (raw {})", setpoint.0, raw);
            return Ok(None);
        }

        info!("Thermostat setpoint now {}F (raw {})", setpoint.0, raw);
        self.setpoint = Some(setpoint);
        Ok(Some(setpoint))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;
    use control::DialCalibration;

    #[test]
    fn test_first_poll_samples() {
        let mut sampler = DialSampler::new(CoreConfig::default()).unwrap();
        let setpoint = sampler.poll(0, || Ok(740)).unwrap();
        assert_eq!(setpoint, Some(Temperature::new(98)));
        assert_eq!(sampler.setpoint(), setpoint);
    }

    #[test]
    fn test_dial_not_read_between_samples() {
        let mut sampler = DialSampler::new(CoreConfig::default()).unwrap();
        sampler.poll(0, || Ok(740)).unwrap();
        let result = sampler.poll(59_999, || panic!("dial read early"));
        assert_eq!(result.unwrap(), None);
    }

    #[test]
    fn test_only_changes_reported() {
        let mut sampler = DialSampler::new(CoreConfig::default()).unwrap();
        assert!(sampler.poll(0, || Ok(740)).unwrap().is_some());
        // 741 still rounds to 98F
        assert_eq!(sampler.poll(60_000, || Ok(741)).unwrap(), None);
        assert_eq!(
            sampler.poll(120_000, || Ok(770)).unwrap(),
            Some(Temperature::new(105))
        );
    }

    #[test]
    fn test_read_error_propagates() {
        let mut sampler = DialSampler::new(CoreConfig::default()).unwrap();
        let result = sampler.poll(0, || Err(anyhow!("ADC busy")));
        assert!(result.is_err());
        assert_eq!(sampler.setpoint(), None);
    }

    #[test]
    fn test_invalid_calibration_rejected() {
        let config = CoreConfig {
            dial: DialCalibration {
                pot_low: 770,
                pot_high: 710,
            },
            ..CoreConfig::default()
        };
        assert!(DialSampler::new(config).is_err());
    }
}
