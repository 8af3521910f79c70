use crate::create_register;
use crate::fields::*;
use crate::types::InvalidBitPattern;
use crate::Configuration;
use core::convert::TryFrom;
use num_traits::FromPrimitive;
use num_traits::ToPrimitive;
use paste::paste;

pub mod helpers {
    #[inline]
    pub fn get_mask(start_index: u8, width: u8) -> u16 {
        ((1u16 << width) - 1u16) << start_index
    }
}

/// Register (command code) definitions
pub struct Register;
impl Register {
    pub const CONFIGURATION: u8 = 0x00;
    pub const HIGH_THRESHOLD: u8 = 0x01;
    pub const LOW_THRESHOLD: u8 = 0x02;
    pub const POWER_SAVING_MODE: u8 = 0x03;
    pub const AMBIENT_LIGHT_DATA: u8 = 0x04;
    pub const WHITE_CHANNEL_DATA: u8 = 0x05;
    pub const INTERRUPT_STATUS: u8 = 0x06;
}

/// Combines the two bytes of a register, which the device sends LSB first.
#[inline]
pub fn decode_u16(low: u8, high: u8) -> u16 {
    (u16::from(high) << 8) | u16::from(low)
}

/// Splits a register word into `(low, high)`, the order the device expects them.
#[inline]
pub fn encode_u16(value: u16) -> (u8, u8) {
    let [low, high] = value.to_le_bytes();
    (low, high)
}

pub fn encode_configuration(config: &Configuration) -> u16 {
    ConfigurationRegister::from(*config).value()
}

/// Fails only if the integration time field holds one of its ten unassigned patterns.
pub fn decode_configuration(word: u16) -> Result<Configuration, InvalidBitPattern> {
    ConfigurationRegister::try_from(word).map(Configuration::from)
}

// General Field structure used by registers
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Field<T> {
    pub start_index: u8,
    pub width: u8,
    pub value: T,
}

impl<T> Field<T>
where
    T: ToPrimitive,
{
    pub fn bits(&self) -> u16 {
        // The algorithm: ((1 << length) - 1) << pos
        let mask: u16 = self::helpers::get_mask(self.start_index, self.width);

        self.value
            .to_u16()
            .map_or(0, |val| (val << self.start_index) & mask)
    }
}

impl<T> Field<T>
where
    T: FromPrimitive,
{
    /// Extracts the value at this field's position from a full register word.
    pub fn decode(&self, word: u16) -> Result<T, InvalidBitPattern> {
        let mask = self::helpers::get_mask(self.start_index, self.width);
        let bits = (word & mask) >> self.start_index;

        T::from_u16(bits).ok_or(InvalidBitPattern {
            start_index: self.start_index,
            width: self.width,
            bits,
        })
    }
}

/// Defines a standard structure for a 16-bit register.
///
/// This macro takes `StructName, {structfield1: type1, structfield2: type2, ...}` as arguments
/// and generates a structure:
///
/// ```compile_fail
/// struct StructName {
///     structfield1: Field<type1>,
///     structfield2: Field<type2>,
///     ...
/// }
/// ```
///
/// The structure gets `with_structfieldX()` factory methods, a `value()` function that
/// returns the encoded u16 word and a `TryFrom<u16>` implementation. Bit positions come
/// from the register's `Default` implementation.
///
#[macro_export]
macro_rules! create_register {
    ($reg_name:ident, {$($element: ident: $ty: ty),*}) => {
        #[derive(Debug, Clone, Copy, PartialEq)]
        pub struct $reg_name { $(pub $element: Field<$ty>),* }

        paste! {
            impl $reg_name {
                pub fn value(&self) -> u16 {
                    let mut temp: u16 = 0x0000;
                    $(
                        temp |= self.$element.bits();
                    )*
                    temp
                }

            // Creates with_<variable> methods
            $(
                pub fn [<with_ $element>] (self, [<new_ $element>]: $ty) -> Self {
                    let mut tmp = self;
                    tmp.$element.value = [<new_ $element>];
                    tmp
                }
            )*
            }
        }

        impl TryFrom<u16> for $reg_name {
            type Error = InvalidBitPattern;

            fn try_from(val: u16) -> Result<Self, Self::Error> {
                let mut new_reg = $reg_name::default();
                $(
                    new_reg.$element.value = new_reg.$element.decode(val)?;
                )*
                Ok(new_reg)
            }
        }
    }
}

create_register!(ConfigurationRegister, {
    shutdown: Shutdown,
    interrupt_enable: InterruptEnable,
    channel_enable: Channel,
    interrupt_channel: Channel,
    persistence: Persistence,
    integration_time: IntegrationTime,
    gain: Gain,
    double_gain: DoubleGain,
    sensitivity: Sensitivity
});

impl Default for ConfigurationRegister {
    fn default() -> Self {
        ConfigurationRegister {
            shutdown: Field {
                start_index: 0,
                width: 1,
                value: Shutdown::PowerOn,
            },
            interrupt_enable: Field {
                start_index: 1,
                width: 1,
                value: InterruptEnable::Disabled,
            },
            channel_enable: Field {
                start_index: 2,
                width: 1,
                value: Channel::AmbientLight,
            },
            interrupt_channel: Field {
                start_index: 3,
                width: 1,
                value: Channel::AmbientLight,
            },
            persistence: Field {
                start_index: 4,
                width: 2,
                value: Persistence::One,
            },
            integration_time: Field {
                start_index: 6,
                width: 4,
                value: IntegrationTime::Ms100,
            },
            gain: Field {
                start_index: 10,
                width: 1,
                value: Gain::Normal,
            },
            double_gain: Field {
                start_index: 11,
                width: 1,
                value: DoubleGain::Normal,
            },
            sensitivity: Field {
                start_index: 12,
                width: 1,
                value: Sensitivity::Low,
            },
        }
    }
}

impl From<Configuration> for ConfigurationRegister {
    fn from(config: Configuration) -> Self {
        ConfigurationRegister::default()
            .with_shutdown(config.shutdown)
            .with_interrupt_enable(config.interrupt_enable)
            .with_channel_enable(config.channel_enable)
            .with_interrupt_channel(config.interrupt_channel)
            .with_persistence(config.persistence)
            .with_integration_time(config.integration_time)
            .with_gain(config.gain)
            .with_double_gain(config.double_gain)
            .with_sensitivity(config.sensitivity)
    }
}

impl From<ConfigurationRegister> for Configuration {
    fn from(reg: ConfigurationRegister) -> Self {
        Configuration {
            shutdown: reg.shutdown.value,
            interrupt_enable: reg.interrupt_enable.value,
            channel_enable: reg.channel_enable.value,
            interrupt_channel: reg.interrupt_channel.value,
            persistence: reg.persistence.value,
            integration_time: reg.integration_time.value,
            gain: reg.gain.value,
            double_gain: reg.double_gain.value,
            sensitivity: reg.sensitivity.value,
        }
    }
}

create_register!(PowerSavingRegister, {mode: PowerSaving, wait: PowerSavingWait});

impl Default for PowerSavingRegister {
    fn default() -> Self {
        PowerSavingRegister {
            mode: Field {
                start_index: 0,
                width: 1,
                value: PowerSaving::Disabled,
            },
            wait: Field {
                start_index: 1,
                width: 2,
                value: PowerSavingWait::Ms400,
            },
        }
    }
}

create_register!(InterruptStatusRegister, {high_threshold: ThresholdFlag, low_threshold: ThresholdFlag});

impl Default for InterruptStatusRegister {
    fn default() -> Self {
        InterruptStatusRegister {
            high_threshold: Field {
                start_index: 14,
                width: 1,
                value: ThresholdFlag::Clear,
            },
            low_threshold: Field {
                start_index: 15,
                width: 1,
                value: ThresholdFlag::Clear,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SHUTDOWN: [Shutdown; 2] = [Shutdown::PowerOn, Shutdown::PowerOff];
    const INTERRUPT_ENABLE: [InterruptEnable; 2] =
        [InterruptEnable::Disabled, InterruptEnable::Enabled];
    const CHANNELS: [Channel; 2] = [Channel::AmbientLight, Channel::White];
    const PERSISTENCE: [Persistence; 4] = [
        Persistence::One,
        Persistence::Two,
        Persistence::Four,
        Persistence::Eight,
    ];
    const INTEGRATION_TIMES: [IntegrationTime; 6] = [
        IntegrationTime::Ms25,
        IntegrationTime::Ms50,
        IntegrationTime::Ms100,
        IntegrationTime::Ms200,
        IntegrationTime::Ms400,
        IntegrationTime::Ms800,
    ];
    const GAINS: [Gain; 2] = [Gain::Normal, Gain::Double];
    const DOUBLE_GAINS: [DoubleGain; 2] = [DoubleGain::Normal, DoubleGain::Double];
    const SENSITIVITIES: [Sensitivity; 2] = [Sensitivity::Low, Sensitivity::High];

    #[test]
    fn u16_is_little_endian() {
        assert_eq!(decode_u16(0x34, 0x12), 0x1234);
        assert_eq!(encode_u16(0x1234), (0x34, 0x12));

        for value in [0x0000u16, 0x00FF, 0xFF00, 0xBEEF, 0xFFFF] {
            let (low, high) = encode_u16(value);
            assert_eq!(decode_u16(low, high), value);
        }
    }

    #[test]
    fn zero_word_is_default_configuration() {
        let config = decode_configuration(0x0000).unwrap();

        assert_eq!(config, Configuration::default());
        assert_eq!(config.shutdown, Shutdown::PowerOn);
        assert_eq!(config.interrupt_enable, InterruptEnable::Disabled);
        assert_eq!(config.channel_enable, Channel::AmbientLight);
        assert_eq!(config.interrupt_channel, Channel::AmbientLight);
        assert_eq!(config.persistence, Persistence::One);
        assert_eq!(config.integration_time, IntegrationTime::Ms100);
        assert_eq!(config.gain, Gain::Normal);
        assert_eq!(config.double_gain, DoubleGain::Normal);
        assert_eq!(config.sensitivity, Sensitivity::Low);
        assert_eq!(encode_configuration(&config), 0x0000);
    }

    #[test]
    fn every_field_lands_on_its_bits() {
        let config = Configuration::default()
            .with_shutdown(Shutdown::PowerOff)
            .with_interrupt_enable(InterruptEnable::Enabled)
            .with_channel_enable(Channel::White)
            .with_interrupt_channel(Channel::White)
            .with_persistence(Persistence::Eight)
            .with_integration_time(IntegrationTime::Ms25)
            .with_gain(Gain::Double)
            .with_double_gain(DoubleGain::Double)
            .with_sensitivity(Sensitivity::High);

        assert_eq!(encode_configuration(&config), 0b1_1111_0011_1111);

        let config = Configuration::default().with_integration_time(IntegrationTime::Ms800);
        assert_eq!(encode_configuration(&config), 0b0000_1100_0000);
    }

    #[test]
    fn all_configurations_survive_encoding() {
        for &shutdown in SHUTDOWN.iter() {
            for &interrupt_enable in INTERRUPT_ENABLE.iter() {
                for &channel_enable in CHANNELS.iter() {
                    for &interrupt_channel in CHANNELS.iter() {
                        for &persistence in PERSISTENCE.iter() {
                            for &integration_time in INTEGRATION_TIMES.iter() {
                                for &gain in GAINS.iter() {
                                    for &double_gain in DOUBLE_GAINS.iter() {
                                        for &sensitivity in SENSITIVITIES.iter() {
                                            let config = Configuration {
                                                shutdown,
                                                interrupt_enable,
                                                channel_enable,
                                                interrupt_channel,
                                                persistence,
                                                integration_time,
                                                gain,
                                                double_gain,
                                                sensitivity,
                                            };
                                            let word = encode_configuration(&config);
                                            assert_eq!(word & 0xE000, 0);
                                            assert_eq!(decode_configuration(word), Ok(config));
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn unassigned_integration_time_is_rejected() {
        // 0b0100 at bits 6..10
        assert_eq!(
            decode_configuration(0x0100),
            Err(InvalidBitPattern {
                start_index: 6,
                width: 4,
                bits: 0b0100,
            })
        );
        assert!(decode_configuration(0b1111 << 6).is_err());
    }

    #[test]
    fn reserved_bits_are_ignored() {
        let config = decode_configuration(0xE000 | 0x1000).unwrap();
        assert_eq!(config.sensitivity, Sensitivity::High);
        assert_eq!(encode_configuration(&config), 0x1000);
    }

    #[test]
    fn power_saving_register() {
        let reg = PowerSavingRegister::default()
            .with_mode(PowerSaving::Enabled)
            .with_wait(PowerSavingWait::Ms1600);
        assert_eq!(reg.value(), 0b101);

        let reg = PowerSavingRegister::try_from(0b0111).unwrap();
        assert_eq!(reg.mode.value, PowerSaving::Enabled);
        assert_eq!(reg.wait.value, PowerSavingWait::Ms3200);
    }

    #[test]
    fn interrupt_status_register() {
        let status = InterruptStatusRegister::try_from(0x4000).unwrap();
        assert_eq!(status.high_threshold.value, ThresholdFlag::Crossed);
        assert_eq!(status.low_threshold.value, ThresholdFlag::Clear);

        let status = InterruptStatusRegister::try_from(0x8000).unwrap();
        assert_eq!(status.high_threshold.value, ThresholdFlag::Clear);
        assert_eq!(status.low_threshold.value, ThresholdFlag::Crossed);
    }

    #[test]
    fn test_fields() {
        let field = Field {
            start_index: 6,
            width: 4,
            value: IntegrationTime::Ms25,
        };
        assert_eq!(field.bits(), 0b0011_0000_0000);
        assert_eq!(field.decode(0b0011_0000_0000), Ok(IntegrationTime::Ms25));
    }
}
