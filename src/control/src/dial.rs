use micromath::F32Ext;

use crate::config::CoreConfig;
use crate::state::Temperature;

pub fn setpoint_from_pot(config: &CoreConfig, raw: u16) -> Temperature {
    //                 raw - pot_low
    // setpoint = min + ------------------- * (max - min)
    //                 pot_high - pot_low

    let pot_low = config.dial.pot_low.min(config.dial.pot_high);
    let pot_high = config.dial.pot_low.max(config.dial.pot_high);
    if pot_low == pot_high {
        return config.minimum_temperature;
    }

    let reading = raw.clamp(pot_low, pot_high);
    let scaling_factor = f32::from(reading - pot_low) / f32::from(pot_high - pot_low);

    let minimum = f32::from(i16::from(config.minimum_temperature));
    let maximum = f32::from(i16::from(config.maximum_temperature));
    let setpoint = minimum + (maximum - minimum) * scaling_factor;

    Temperature::new(F32Ext::round(setpoint) as i16)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DialCalibration;

    #[test]
    fn test_calibration_ends_map_to_dial_bounds() {
        let config = CoreConfig::default();
        assert_eq!(setpoint_from_pot(&config, 710), config.minimum_temperature);
        assert_eq!(setpoint_from_pot(&config, 770), config.maximum_temperature);
    }

    #[test]
    fn test_midpoint() {
        let config = CoreConfig::default();
        // 90F + 15F * 0.5 = 97.5F
        assert_eq!(setpoint_from_pot(&config, 740), Temperature::new(98));
        // 90F + 15F * 0.25 = 93.75F
        assert_eq!(setpoint_from_pot(&config, 725), Temperature::new(94));
    }

    #[test]
    fn test_readings_outside_calibration_clamp() {
        let config = CoreConfig::default();
        assert_eq!(setpoint_from_pot(&config, 0), config.minimum_temperature);
        assert_eq!(setpoint_from_pot(&config, 709), config.minimum_temperature);
        assert_eq!(setpoint_from_pot(&config, 771), config.maximum_temperature);
        assert_eq!(setpoint_from_pot(&config, 1023), config.maximum_temperature);
    }

    #[test]
    fn test_setpoint_never_decreases_as_dial_turns() {
        let config = CoreConfig::default();
        let mut previous = setpoint_from_pot(&config, 700);
        for raw in 700..=780 {
            let setpoint = setpoint_from_pot(&config, raw);
            assert!(previous <= setpoint, "{:?} > {:?}", previous, setpoint);
            previous = setpoint;
        }
    }

    #[test]
    fn test_unvalidated_calibration_does_not_panic() {
        let inverted = CoreConfig {
            dial: DialCalibration {
                pot_low: 770,
                pot_high: 710,
            },
            ..CoreConfig::default()
        };
        assert_eq!(setpoint_from_pot(&inverted, 600), inverted.minimum_temperature);
        assert_eq!(setpoint_from_pot(&inverted, 740), Temperature::new(98));
        assert_eq!(setpoint_from_pot(&inverted, 800), inverted.maximum_temperature);

        let collapsed = CoreConfig {
            dial: DialCalibration {
                pot_low: 740,
                pot_high: 740,
            },
            ..CoreConfig::default()
        };
        for raw in [0, 740, 1023] {
            assert_eq!(setpoint_from_pot(&collapsed, raw), collapsed.minimum_temperature);
        }
    }
}
