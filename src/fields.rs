//! Typed values of every bitfield the driver reads or writes.
//!
//! The discriminant of each variant is its bit pattern inside the register.

/// `ALS_SD`: shut the sensor down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromPrimitive, ToPrimitive)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Shutdown {
    PowerOn = 0b0,
    PowerOff = 0b1,
}

/// `ALS_INT_EN`: threshold interrupt enable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromPrimitive, ToPrimitive)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InterruptEnable {
    Disabled = 0b0,
    Enabled = 0b1,
}

/// Channel selection, used both for the enabled channel and the interrupt source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromPrimitive, ToPrimitive)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Channel {
    AmbientLight = 0b0,
    White = 0b1,
}

/// Consecutive out-of-window samples required before the interrupt fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromPrimitive, ToPrimitive)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Persistence {
    One = 0b00,
    Two = 0b01,
    Four = 0b10,
    Eight = 0b11,
}

impl Persistence {
    pub fn count(self) -> u8 {
        match self {
            Persistence::One => 1,
            Persistence::Two => 2,
            Persistence::Four => 4,
            Persistence::Eight => 8,
        }
    }
}

/// `ALS_IT`: integration time. Only these six patterns of the 4-bit field are valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromPrimitive, ToPrimitive)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum IntegrationTime {
    Ms25 = 0b1100,
    Ms50 = 0b1000,
    Ms100 = 0b0000,
    Ms200 = 0b0001,
    Ms400 = 0b0010,
    Ms800 = 0b0011,
}

impl IntegrationTime {
    pub fn milliseconds(self) -> u32 {
        match self {
            IntegrationTime::Ms25 => 25,
            IntegrationTime::Ms50 => 50,
            IntegrationTime::Ms100 => 100,
            IntegrationTime::Ms200 => 200,
            IntegrationTime::Ms400 => 400,
            IntegrationTime::Ms800 => 800,
        }
    }
}

impl From<IntegrationTime> for f64 {
    fn from(itime: IntegrationTime) -> Self {
        itime.milliseconds() as f64
    }
}

/// `ALS_GAIN`: analog front-end gain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromPrimitive, ToPrimitive)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Gain {
    Normal = 0b0,
    Double = 0b1,
}

/// `DG`: digital gain, doubles sensitivity independently of [`Gain`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromPrimitive, ToPrimitive)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DoubleGain {
    Normal = 0b0,
    Double = 0b1,
}

/// `SENS`: photodiode sensitivity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromPrimitive, ToPrimitive)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Sensitivity {
    Low = 0b0,
    High = 0b1,
}

/// `PSM`: wait time between measurements in power saving mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromPrimitive, ToPrimitive)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PowerSavingWait {
    Ms400 = 0b00,
    Ms800 = 0b01,
    Ms1600 = 0b10,
    Ms3200 = 0b11,
}

/// `PSM_EN`
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromPrimitive, ToPrimitive)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PowerSaving {
    Disabled = 0b0,
    Enabled = 0b1,
}

/// Threshold interrupt flag, cleared by the device when the status register is read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromPrimitive, ToPrimitive)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ThresholdFlag {
    Clear = 0b0,
    Crossed = 0b1,
}
