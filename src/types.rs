/// All possible errors in this crate
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E> {
    /// I²C bus error.
    I2C(E),
    /// A register read from the device holds a bit pattern that has no typed value.
    InvalidBitPattern(InvalidBitPattern),
}

impl<E> From<InvalidBitPattern> for Error<E> {
    fn from(err: InvalidBitPattern) -> Self {
        Error::InvalidBitPattern(err)
    }
}

/// The bits found in a register field that match none of the field's values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InvalidBitPattern {
    pub start_index: u8,
    pub width: u8,
    pub bits: u16,
}

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LuxData {
    /// Count read from the ambient light data register.
    pub raw: u16,
    /// `raw` scaled by the resolution of the configuration active at read time.
    pub lux: f64,
}
