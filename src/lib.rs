#![no_std]
#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

pub mod device;
pub mod interface;
pub mod power;
pub mod registers;
pub mod sensors;

// Re-export main types
pub use device::{AccelData, Bmx160Driver, ErrorFlags, GyroData, MagData, SensorStatus};
pub use interface::{I2cInterface, InterfaceSelect, SpiInterface};
pub use sensors::{
    AccelBandwidth, AccelConfig, AccelDataMps2, AccelOdr, AccelRange, GyroBandwidth, GyroConfig,
    GyroDataDps, GyroDataRps, GyroOdr, GyroRange, MagConfig, MagDataUT, MagOdr,
};

pub use power::{AccelPowerMode, GyroPowerMode, MagPowerMode, PmuState, PmuStatus};

/// BMX160 I2C address when the SDO pin is low (default: 0x68)
///
/// This is the most common configuration. Use [`I2cInterface::new()`] for
/// this address.
pub const I2C_ADDRESS: u8 = 0x68;

/// BMX160 I2C address when the SDO pin is high (alternative: 0x69)
///
/// Use [`I2cInterface::alternative()`] for this address.
pub const I2C_ADDRESS_ALT: u8 = 0x69;

/// Expected value of the `CHIP_ID` register
pub const CHIP_ID_VALUE: u8 = 0xD8;

/// Maximum SPI clock frequency supported by the chip (mode 0)
pub const SPI_MAX_CLOCK_HZ: u32 = 4_000_000;

/// Driver errors
#[derive(Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E> {
    /// Communication error with the device
    Bus(E),
    /// Invalid `CHIP_ID` register value (contains the actual value read)
    InvalidDevice(u8),
}

impl<E> From<E> for Error<E> {
    fn from(error: E) -> Self {
        Self::Bus(error)
    }
}
