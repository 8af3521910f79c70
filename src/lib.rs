//! # Introduction
//! This is a platform-agnostic Rust driver for the [`VEML6035 Ambient Light Sensor`](https://www.vishay.com/en/product/84889/) using [`embedded-hal`](https://github.com/rust-embedded/embedded-hal) traits.
//!
//! ## Supported devices
//! - [VEML6035](https://www.vishay.com/docs/84889/veml6035.pdf)
//!
//! The lux conversion and the calibration sweep follow the application note
//! [Designing the VEML6035 Into an Application](https://www.vishay.com/docs/84944/designingveml6035.pdf).
//!
//! ## Usage
//! ### Setup
//!
//! Instantiate a new driver instance using a [blocking I²C HAL
//! implementation](https://docs.rs/embedded-hal/0.2.*/embedded_hal/blocking/i2c/index.html).
//! For example, using `linux-embedded-hal`:
//! ```no_run
//! use linux_embedded_hal::I2cdev;
//! use veml6035;
//!
//! let dev = I2cdev::new("/dev/i2c-1").unwrap();
//! let mut sensor = veml6035::VEML6035::init(dev);
//! ```
//!
//! ### Configuration
//!
//! Every field of [`Configuration`] has a default matching the power-on state of the
//! device, so only the fields that differ need to be given:
//!
//! ```no_run
//! # use linux_embedded_hal::I2cdev;
//! # let dev = I2cdev::new("/dev/i2c-1").unwrap();
//! # let mut sensor = veml6035::VEML6035::init(dev);
//! let config = veml6035::Configuration::default()
//!     .with_integration_time(veml6035::IntegrationTime::Ms200)
//!     .with_gain(veml6035::Gain::Double);
//! sensor.write_configuration(&config).unwrap();
//! ```
//!
//! ### Measurements
//!
//! The lux value is computed from the configuration the device reports at read time:
//! ```no_run
//! use linux_embedded_hal::{Delay, I2cdev};
//! # let dev = I2cdev::new("/dev/i2c-1").unwrap();
//! # let mut sensor = veml6035::VEML6035::init(dev);
//! // Pick the least sensitive setting that still yields a usable count
//! sensor.calibrate(&mut Delay).unwrap();
//!
//! let lux_val = sensor.read_ambient_light().unwrap();
//! println!("VEML6035 current lux: {}", lux_val.lux);
//! ```
//!
//! ## Features
//! - `defmt`: derives `defmt::Format` for the public types and logs the calibration sweep.
//!
#![no_std]
#[macro_use]
extern crate num_derive;
use embedded_hal::blocking::delay::DelayMs;
use embedded_hal::blocking::i2c;
use paste::paste;

mod fields;
mod macros;
mod registers;
mod types;
pub use crate::fields::*;
pub use crate::registers::*;
pub use crate::types::{Error, InvalidBitPattern, LuxData};

/// Default 7-bit I²C address of the VEML6035.
pub const DEFAULT_ADDRESS: u8 = 0x29;

/// A calibration step is accepted once its raw count exceeds this value.
const CALIBRATION_TARGET_COUNT: u16 = 100;

/// Shortest wait after reconfiguring before a calibration sample is read.
const MIN_SETTLING_TIME_MS: u32 = 500;

/// Calibration sweep, from coarsest to finest resolution.
const CALIBRATION_STEPS: [(IntegrationTime, Gain, DoubleGain, Sensitivity); 7] = [
    (IntegrationTime::Ms100, Gain::Normal, DoubleGain::Normal, Sensitivity::Low),
    (IntegrationTime::Ms100, Gain::Normal, DoubleGain::Normal, Sensitivity::High),
    (IntegrationTime::Ms100, Gain::Double, DoubleGain::Normal, Sensitivity::High),
    (IntegrationTime::Ms100, Gain::Double, DoubleGain::Double, Sensitivity::High),
    (IntegrationTime::Ms200, Gain::Double, DoubleGain::Double, Sensitivity::High),
    (IntegrationTime::Ms400, Gain::Double, DoubleGain::Double, Sensitivity::High),
    (IntegrationTime::Ms800, Gain::Double, DoubleGain::Double, Sensitivity::High),
];

create_struct_with! (
    /// Contents of the configuration register.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    #[cfg_attr(feature = "defmt", derive(defmt::Format))]
    Configuration, {
        shutdown: Shutdown,
        interrupt_enable: InterruptEnable,
        channel_enable: Channel,
        interrupt_channel: Channel,
        persistence: Persistence,
        integration_time: IntegrationTime,
        gain: Gain,
        double_gain: DoubleGain,
        sensitivity: Sensitivity
    }
);

impl Default for Configuration {
    fn default() -> Self {
        Configuration {
            shutdown: Shutdown::PowerOn,
            interrupt_enable: InterruptEnable::Disabled,
            channel_enable: Channel::AmbientLight,
            interrupt_channel: Channel::AmbientLight,
            persistence: Persistence::One,
            integration_time: IntegrationTime::Ms100,
            gain: Gain::Normal,
            double_gain: DoubleGain::Normal,
            sensitivity: Sensitivity::Low,
        }
    }
}

impl Configuration {
    /// Lux represented by a single count under this configuration.
    pub fn resolution(&self) -> f64 {
        lux_resolution(
            self.integration_time,
            self.gain,
            self.double_gain,
            self.sensitivity,
        )
    }
}

pub struct VEML6035<I2C> {
    i2c: I2C,
    address: u8,
}

impl<I2C, E> VEML6035<I2C>
where
    I2C: i2c::WriteRead<Error = E> + i2c::Write<Error = E>,
{
    /// Initializes the VEML6035 driver at the default address while consuming the i2c bus
    pub fn init(i2c: I2C) -> Self {
        Self::init_with_address(i2c, DEFAULT_ADDRESS)
    }

    pub fn init_with_address(i2c: I2C, address: u8) -> Self {
        VEML6035 { i2c, address }
    }

    /// Destroy driver instance, return I²C bus instance.
    pub fn destroy(self) -> I2C {
        self.i2c
    }

    pub fn read_configuration(&mut self) -> Result<Configuration, Error<E>> {
        let word = self.read_register(Register::CONFIGURATION)?;
        Ok(decode_configuration(word)?)
    }

    pub fn write_configuration(&mut self, config: &Configuration) -> Result<(), Error<E>> {
        self.write_register(Register::CONFIGURATION, encode_configuration(config))
    }

    /// Puts the sensor in shutdown, keeping the rest of its configuration.
    pub fn shutdown(&mut self) -> Result<(), Error<E>> {
        self.set_shutdown(Shutdown::PowerOff)
    }

    /// Wakes the sensor up from shutdown, keeping the rest of its configuration.
    pub fn power_on(&mut self) -> Result<(), Error<E>> {
        self.set_shutdown(Shutdown::PowerOn)
    }

    /// Raw count of the ambient light channel.
    pub fn read_raw_ambient_light(&mut self) -> Result<u16, Error<E>> {
        self.read_register(Register::AMBIENT_LIGHT_DATA)
    }

    /// Raw count of the white channel.
    pub fn read_white_channel(&mut self) -> Result<u16, Error<E>> {
        self.read_register(Register::WHITE_CHANNEL_DATA)
    }

    /// Reads the ambient light count and converts it to lux.
    ///
    /// The configuration is read back from the device after the count, so the
    /// conversion always uses the settings the device is actually running with.
    pub fn read_ambient_light(&mut self) -> Result<LuxData, Error<E>> {
        let raw = self.read_raw_ambient_light()?;
        let config = self.read_configuration()?;

        Ok(LuxData {
            raw,
            lux: raw_to_lux(raw, &config),
        })
    }

    /// Searches for the coarsest resolution at which the current light level yields
    /// a count above 100.
    ///
    /// Each step of the sweep is written to the device, given time to settle and then
    /// sampled. The sweep stops at the first step whose count is above 100 and leaves
    /// that configuration in the device. If no step gets there the most sensitive
    /// configuration stays in place; this is not reported as an error.
    ///
    /// Every other configuration field is reset to its default.
    pub fn calibrate<D>(&mut self, delay: &mut D) -> Result<(), Error<E>>
    where
        D: DelayMs<u32>,
    {
        for &(integration_time, gain, double_gain, sensitivity) in CALIBRATION_STEPS.iter() {
            let config = Configuration::default()
                .with_integration_time(integration_time)
                .with_gain(gain)
                .with_double_gain(double_gain)
                .with_sensitivity(sensitivity);

            self.write_configuration(&config)?;
            delay.delay_ms(settling_time_ms(integration_time));
            let raw = self.read_raw_ambient_light()?;

            #[cfg(feature = "defmt")]
            defmt::debug!("VEML6035 calibration: {} -> raw count {}", config, raw);

            if raw > CALIBRATION_TARGET_COUNT {
                #[cfg(feature = "defmt")]
                defmt::debug!("VEML6035 calibration: accepted {}", config);
                return Ok(());
            }
        }

        #[cfg(feature = "defmt")]
        defmt::debug!("VEML6035 calibration: target count not reached");

        Ok(())
    }

    pub fn read_high_threshold(&mut self) -> Result<u16, Error<E>> {
        self.read_register(Register::HIGH_THRESHOLD)
    }

    /// Sets the upper bound of the interrupt window, in raw counts.
    pub fn write_high_threshold(&mut self, threshold: u16) -> Result<(), Error<E>> {
        self.write_register(Register::HIGH_THRESHOLD, threshold)
    }

    pub fn read_low_threshold(&mut self) -> Result<u16, Error<E>> {
        self.read_register(Register::LOW_THRESHOLD)
    }

    /// Sets the lower bound of the interrupt window, in raw counts.
    pub fn write_low_threshold(&mut self, threshold: u16) -> Result<(), Error<E>> {
        self.write_register(Register::LOW_THRESHOLD, threshold)
    }

    pub fn read_power_saving_mode(&mut self) -> Result<PowerSavingRegister, Error<E>> {
        let word = self.read_register(Register::POWER_SAVING_MODE)?;
        Ok(PowerSavingRegister::try_from(word)?)
    }

    pub fn write_power_saving_mode(&mut self, psm: &PowerSavingRegister) -> Result<(), Error<E>> {
        self.write_register(Register::POWER_SAVING_MODE, psm.value())
    }

    /// Returns the threshold interrupt flags. Reading them clears them on the device.
    pub fn read_interrupt_status(&mut self) -> Result<InterruptStatusRegister, Error<E>> {
        let word = self.read_register(Register::INTERRUPT_STATUS)?;
        Ok(InterruptStatusRegister::try_from(word)?)
    }

    fn set_shutdown(&mut self, shutdown: Shutdown) -> Result<(), Error<E>> {
        let config = self.read_configuration()?.with_shutdown(shutdown);
        self.write_configuration(&config)
    }
}

impl<I2C, E> VEML6035<I2C>
where
    I2C: i2c::WriteRead<Error = E> + i2c::Write<Error = E>,
{
    fn write_register(&mut self, register: u8, value: u16) -> Result<(), Error<E>> {
        let (low, high) = encode_u16(value);
        self.i2c
            .write(self.address, &[register, low, high])
            .map_err(Error::I2C)
    }

    fn read_register(&mut self, register: u8) -> Result<u16, Error<E>> {
        let mut data: [u8; 2] = [0; 2];
        self.i2c
            .write_read(self.address, &[register], &mut data)
            .map_err(Error::I2C)
            .and(Ok(decode_u16(data[0], data[1])))
    }
}

/// Lux per count for the given settings.
///
/// `0.0004 * (800 / t) * (2 - dg) * (2 - gain) * (1 + 7 * sensitivity)`, where the
/// three switches contribute their bit value.
pub fn lux_resolution(
    integration_time: IntegrationTime,
    gain: Gain,
    double_gain: DoubleGain,
    sensitivity: Sensitivity,
) -> f64 {
    let int_time: f64 = integration_time.into();
    let gain = f64::from(gain as u8);
    let double_gain = f64::from(double_gain as u8);
    let sensitivity = f64::from(sensitivity as u8);

    0.0004 * (800.0 / int_time) * (2.0 - double_gain) * (2.0 - gain) * (1.0 + 7.0 * sensitivity)
}

fn raw_to_lux(raw: u16, config: &Configuration) -> f64 {
    f64::from(raw) * config.resolution()
}

// Twice the integration time, but never under half a second.
fn settling_time_ms(integration_time: IntegrationTime) -> u32 {
    (integration_time.milliseconds() * 2).max(MIN_SETTLING_TIME_MS)
}
