//! Bus interface implementations for the BMX160
//!
//! This module provides implementations of the `device-driver` traits for
//! I2C and SPI communication with the BMX160. Each interface supplies its
//! own addressing convention: SPI sets the read bit on the address byte,
//! I2C leaves the address untouched and inserts the settle delay the chip
//! needs between transactions on that bus.

use crate::I2C_ADDRESS;

use device_driver::RegisterInterface;

/// Register access staging buffer: one address byte plus up to seven data
/// bytes, which covers every write this driver performs.
const WRITE_BUF_LEN: usize = 8;

/// Settle time after every I2C register access.
const I2C_SETTLE_DELAY_US: u32 = 1_000;

/// Primary serial interface selection, reported by each bus interface.
///
/// The BMX160 latches its primary interface in `NV_CONF` during reset; the
/// value to latch depends on which bus the driver is talking over, so the
/// interface supplies it rather than the driver guessing.
pub trait InterfaceSelect {
    /// Whether `NV_CONF.spi_en` must be set for this transport.
    fn spi_en(&self) -> bool;
}

/// I2C interface for the BMX160
///
/// Every register access is followed by a fixed 1 ms settle delay to give
/// the chip time to turn the bus around; the delay provider is owned by the
/// interface so the driver itself has no timing concerns.
pub struct I2cInterface<I2C, D> {
    i2c: I2C,
    address: u8,
    delay: D,
}

impl<I2C, D> I2cInterface<I2C, D> {
    /// Create a new I2C interface with the default address (0x68, SDO pin LOW)
    ///
    /// # Arguments
    /// * `i2c` - The I2C peripheral
    /// * `delay` - Delay provider used for the per-access settle time
    ///
    /// # Example
    /// ```ignore
    /// let interface = I2cInterface::new(i2c, delay);
    /// let mut imu = Bmx160Driver::new(interface);
    /// ```
    pub const fn new(i2c: I2C, delay: D) -> Self {
        Self {
            i2c,
            address: I2C_ADDRESS,
            delay,
        }
    }

    /// Create a new I2C interface with the alternative address (0x69, SDO pin HIGH)
    pub const fn alternative(i2c: I2C, delay: D) -> Self {
        Self {
            i2c,
            address: crate::I2C_ADDRESS_ALT,
            delay,
        }
    }

    /// Create a new I2C interface with a custom device address
    ///
    /// For standard BMX160 wirings, prefer [`new()`](Self::new) or
    /// [`alternative()`](Self::alternative).
    pub const fn with_address(i2c: I2C, address: u8, delay: D) -> Self {
        Self { i2c, address, delay }
    }

    /// Consume the interface and return the I2C peripheral
    pub fn release(self) -> I2C {
        self.i2c
    }
}

impl<I2C, D> InterfaceSelect for I2cInterface<I2C, D> {
    fn spi_en(&self) -> bool {
        false
    }
}

impl<I2C, D, E> RegisterInterface for I2cInterface<I2C, D>
where
    I2C: embedded_hal::i2c::I2c<Error = E>,
    D: embedded_hal::delay::DelayNs,
{
    type Error = E;
    type AddressType = u8;

    fn read_register(
        &mut self,
        address: Self::AddressType,
        size_bits: u32,
        read_data: &mut [u8],
    ) -> Result<(), Self::Error> {
        let _ = size_bits; // Size is implicit in read_data.len() for I2C
        self.i2c.write_read(self.address, &[address], read_data)?;
        self.delay.delay_us(I2C_SETTLE_DELAY_US);
        Ok(())
    }

    fn write_register(
        &mut self,
        address: Self::AddressType,
        size_bits: u32,
        write_data: &[u8],
    ) -> Result<(), Self::Error> {
        let _ = size_bits; // Size is implicit in write_data.len() for I2C
        let mut buffer = [0u8; WRITE_BUF_LEN];
        buffer[0] = address;
        let len = write_data.len().min(WRITE_BUF_LEN - 1);
        buffer[1..=len].copy_from_slice(&write_data[..len]);

        self.i2c.write(self.address, &buffer[..=len])?;
        self.delay.delay_us(I2C_SETTLE_DELAY_US);
        Ok(())
    }
}

#[cfg(feature = "async")]
impl<I2C, D, E> device_driver::AsyncRegisterInterface for I2cInterface<I2C, D>
where
    I2C: embedded_hal_async::i2c::I2c<Error = E>,
    D: embedded_hal_async::delay::DelayNs,
{
    type Error = E;
    type AddressType = u8;

    async fn read_register(
        &mut self,
        address: Self::AddressType,
        size_bits: u32,
        read_data: &mut [u8],
    ) -> Result<(), Self::Error> {
        let _ = size_bits; // Size is implicit in read_data.len() for I2C
        self.i2c
            .write_read(self.address, &[address], read_data)
            .await?;
        self.delay.delay_us(I2C_SETTLE_DELAY_US).await;
        Ok(())
    }

    async fn write_register(
        &mut self,
        address: Self::AddressType,
        size_bits: u32,
        write_data: &[u8],
    ) -> Result<(), Self::Error> {
        let _ = size_bits; // Size is implicit in write_data.len() for I2C
        let mut buffer = [0u8; WRITE_BUF_LEN];
        buffer[0] = address;
        let len = write_data.len().min(WRITE_BUF_LEN - 1);
        buffer[1..=len].copy_from_slice(&write_data[..len]);

        self.i2c.write(self.address, &buffer[..=len]).await?;
        self.delay.delay_us(I2C_SETTLE_DELAY_US).await;
        Ok(())
    }
}

/// SPI interface for the BMX160
///
/// Register reads set bit 7 of the address byte; writes clear it.
///
/// # Note on Chip Select
///
/// This interface uses the `SpiDevice` trait from `embedded-hal`, which
/// manages the chip select (CS) pin automatically, asserting it for the
/// duration of each transaction and releasing it on every exit path.
/// Configure the device for SPI mode 0 at up to 4 MHz
/// ([`crate::SPI_MAX_CLOCK_HZ`]).
///
/// If using `embedded-hal-bus`, you would typically create an `SpiDevice` like:
/// ```ignore
/// let spi_device = embedded_hal_bus::spi::ExclusiveDevice::new(spi_bus, cs_pin, delay);
/// let interface = SpiInterface::new(spi_device);
/// ```
pub struct SpiInterface<SPI> {
    spi: SPI,
}

impl<SPI> SpiInterface<SPI> {
    /// Create a new SPI interface with the given SPI device
    ///
    /// The SPI device should already include chip select management via the
    /// `SpiDevice` trait (e.g., using `embedded_hal_bus::spi::ExclusiveDevice`).
    pub const fn new(spi: SPI) -> Self {
        Self { spi }
    }

    /// Consume the interface and return the SPI device
    pub fn release(self) -> SPI {
        self.spi
    }
}

impl<SPI> InterfaceSelect for SpiInterface<SPI> {
    fn spi_en(&self) -> bool {
        true
    }
}

impl<SPI, E> RegisterInterface for SpiInterface<SPI>
where
    SPI: embedded_hal::spi::SpiDevice<Error = E>,
{
    type Error = E;
    type AddressType = u8;

    fn read_register(
        &mut self,
        address: Self::AddressType,
        size_bits: u32,
        read_data: &mut [u8],
    ) -> Result<(), Self::Error> {
        let _ = size_bits; // Size is implicit in read_data.len() for SPI
        // For SPI reads, set MSB to 1
        let read_address = address | 0x80;

        let mut operations = [
            embedded_hal::spi::Operation::Write(&[read_address]),
            embedded_hal::spi::Operation::Read(read_data),
        ];

        self.spi.transaction(&mut operations)
    }

    fn write_register(
        &mut self,
        address: Self::AddressType,
        size_bits: u32,
        write_data: &[u8],
    ) -> Result<(), Self::Error> {
        let _ = size_bits; // Size is implicit in write_data.len() for SPI
        // For SPI writes, MSB should be 0 (clear it just in case)
        let write_address = address & 0x7F;

        let mut buffer = [0u8; WRITE_BUF_LEN];
        buffer[0] = write_address;
        let len = write_data.len().min(WRITE_BUF_LEN - 1);
        buffer[1..=len].copy_from_slice(&write_data[..len]);

        self.spi.write(&buffer[..=len])
    }
}

#[cfg(feature = "async")]
impl<SPI, E> device_driver::AsyncRegisterInterface for SpiInterface<SPI>
where
    SPI: embedded_hal_async::spi::SpiDevice<Error = E>,
{
    type Error = E;
    type AddressType = u8;

    async fn read_register(
        &mut self,
        address: Self::AddressType,
        size_bits: u32,
        read_data: &mut [u8],
    ) -> Result<(), Self::Error> {
        let _ = size_bits; // Size is implicit in read_data.len() for SPI
        // For SPI reads, set MSB to 1
        let read_address = address | 0x80;

        let mut operations = [
            embedded_hal_async::spi::Operation::Write(&[read_address]),
            embedded_hal_async::spi::Operation::Read(read_data),
        ];

        self.spi.transaction(&mut operations).await
    }

    async fn write_register(
        &mut self,
        address: Self::AddressType,
        size_bits: u32,
        write_data: &[u8],
    ) -> Result<(), Self::Error> {
        let _ = size_bits; // Size is implicit in write_data.len() for SPI
        // For SPI writes, MSB should be 0 (clear it just in case)
        let write_address = address & 0x7F;

        let mut buffer = [0u8; WRITE_BUF_LEN];
        buffer[0] = write_address;
        let len = write_data.len().min(WRITE_BUF_LEN - 1);
        buffer[1..=len].copy_from_slice(&write_data[..len]);

        self.spi.write(&buffer[..=len]).await
    }
}
