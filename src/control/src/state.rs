use fixed::types::I12F4;
use micromath::F32Ext;
use serde::Serialize;

// Temperature in whole degrees Fahrenheit, the unit printed on the dial
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Serialize)]
pub struct Temperature(pub i16);

impl Temperature {
    pub fn new(value: i16) -> Self {
        Self(value)
    }
}

impl From<Temperature> for i16 {
    fn from(value: Temperature) -> i16 {
        value.0
    }
}

// Sensor reading in degrees celcius, 1/16 degree resolution
#[derive(Debug, PartialEq, PartialOrd, Clone, Copy)]
pub struct Celsius(I12F4);

impl Celsius {
    pub fn new(value: I12F4) -> Self {
        Self(value)
    }

    pub fn to_fahrenheit(self) -> Temperature {
        let fahrenheit = self.0.to_num::<f32>() * 9.0 / 5.0 + 32.0;
        Temperature::new(F32Ext::round(fahrenheit) as i16)
    }
}

impl From<Celsius> for I12F4 {
    fn from(value: Celsius) -> I12F4 {
        value.0
    }
}

#[derive(Debug, PartialEq, Clone, Copy)]
pub enum PowerState {
    On,
    Off,
}
