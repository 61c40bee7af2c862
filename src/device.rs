//! High-level driver API for the BMX160
//!
//! This module provides a user-friendly interface to the BMX160 sensor,
//! handling reset, power-mode sequencing, sensor configuration, and data
//! reading over either bus.

use crate::interface::InterfaceSelect;
use crate::power::{
    AccelPowerMode, GyroPowerMode, MagPowerMode, PmuState, PmuStatus, SOFT_RESET_CMD,
};
use crate::registers::Bmx160 as RegisterDevice;
use crate::{Error, CHIP_ID_VALUE};

// Only import RegisterInterface when not using async feature
#[cfg(not(feature = "async"))]
use device_driver::RegisterInterface;

#[cfg(feature = "async")]
use device_driver::AsyncRegisterInterface;

// Sample burst addresses. These are read straight through the bus interface
// rather than the register map so each triplet arrives in one transaction.
const MAG_DATA_ADDR: u8 = 0x04;
const GYRO_DATA_ADDR: u8 = 0x0C;
const ACCEL_DATA_ADDR: u8 = 0x12;
const SENSOR_TIME_ADDR: u8 = 0x18;
const TEMP_DATA_ADDR: u8 = 0x20;
const ACCEL_CONF_ADDR: u8 = 0x40;

/// Reading this address once after a soft reset settles the serial
/// interface (and latches SPI mode when wired for SPI).
const SERIAL_SETTLE_ADDR: u8 = 0x7F;

/// Sensor-time counter resolution in microseconds per tick
pub const SENSOR_TIME_RESOLUTION_US: f32 = 39.0;

/// Accelerometer data (raw 16-bit values)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AccelData {
    /// X-axis acceleration (raw)
    pub x: i16,
    /// Y-axis acceleration (raw)
    pub y: i16,
    /// Z-axis acceleration (raw)
    pub z: i16,
}

/// Gyroscope data (raw 16-bit values)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GyroData {
    /// X-axis rotation (raw)
    pub x: i16,
    /// Y-axis rotation (raw)
    pub y: i16,
    /// Z-axis rotation (raw)
    pub z: i16,
}

/// Magnetometer data (raw 16-bit values)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MagData {
    /// X-axis magnetic field (raw)
    pub x: i16,
    /// Y-axis magnetic field (raw)
    pub y: i16,
    /// Z-axis magnetic field (raw)
    pub z: i16,
}

/// Decoded `STATUS` register
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SensorStatus {
    /// New accelerometer sample available
    pub accel_data_ready: bool,
    /// New gyroscope sample available
    pub gyro_data_ready: bool,
    /// New magnetometer sample available
    pub mag_data_ready: bool,
    /// NVM write operation ready
    pub nvm_ready: bool,
    /// Fast offset compensation completed
    pub foc_ready: bool,
    /// Manual magnetometer interface operation in progress
    pub mag_manual_op: bool,
    /// Gyroscope self-test completed successfully
    pub gyro_self_test_ok: bool,
}

/// Decoded `ERR_REG` register
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ErrorFlags {
    /// Fatal chip error, reset required
    pub fatal: bool,
    /// Error code (0x1 = command dropped, 0x2 = magnetometer init error, ...)
    pub error_code: u8,
    /// Magnetometer interface failure
    pub mag_interface_failure: bool,
    /// Accel/gyro data-ready dropped
    pub data_ready_dropped: bool,
    /// Magnetometer data-ready dropped
    pub mag_data_ready_dropped: bool,
}

impl ErrorFlags {
    /// Whether any error condition is flagged
    #[must_use]
    pub const fn any(&self) -> bool {
        self.fatal
            || self.error_code != 0
            || self.mag_interface_failure
            || self.data_ready_dropped
            || self.mag_data_ready_dropped
    }
}

/// Main driver for the BMX160
///
/// Generic over the bus interface; see [`crate::interface`] for the SPI and
/// I2C implementations. Constructing the driver performs no bus traffic;
/// call [`init()`](Self::init) (or [`reset()`](Self::reset) plus the
/// per-sensor `init_*` methods) before reading samples.
///
/// The driver owns its scratch state and stored configuration. It is not
/// `Sync`; callers that need concurrent access to one chip must serialize
/// externally.
pub struct Bmx160Driver<I> {
    device: RegisterDevice<I>,
    accel_config: crate::sensors::AccelConfig,
    gyro_config: crate::sensors::GyroConfig,
    mag_config: crate::sensors::MagConfig,
}

impl<I> Bmx160Driver<I> {
    /// Create a new BMX160 driver instance
    ///
    /// Binds the bus interface and default configuration. No registers are
    /// touched until [`init()`](Self::init) or [`reset()`](Self::reset) is
    /// called.
    pub fn new(interface: I) -> Self {
        Self {
            device: RegisterDevice::new(interface),
            accel_config: crate::sensors::AccelConfig::default(),
            gyro_config: crate::sensors::GyroConfig::default(),
            mag_config: crate::sensors::MagConfig::default(),
        }
    }

    /// Get the currently stored accelerometer configuration
    #[must_use]
    pub const fn accel_config(&self) -> &crate::sensors::AccelConfig {
        &self.accel_config
    }

    /// Get the currently stored gyroscope configuration
    #[must_use]
    pub const fn gyro_config(&self) -> &crate::sensors::GyroConfig {
        &self.gyro_config
    }

    /// Get the currently stored magnetometer configuration
    #[must_use]
    pub const fn mag_config(&self) -> &crate::sensors::MagConfig {
        &self.mag_config
    }

    /// Convert a raw temperature reading to degrees Celsius
    ///
    /// 0x0000 corresponds to 23 °C with a resolution of 1/512 °C per LSB.
    #[must_use]
    pub fn temperature_to_celsius(raw: i16) -> f32 {
        23.0 + f32::from(raw) / 512.0
    }

    /// Consume the driver and return the underlying interface
    pub fn release(self) -> I {
        self.device.interface
    }

    /// Get a reference to the underlying register device (for advanced usage)
    pub const fn device(&self) -> &RegisterDevice<I> {
        &self.device
    }
}

#[cfg(not(feature = "async"))]
impl<I> Bmx160Driver<I>
where
    I: RegisterInterface<AddressType = u8> + InterfaceSelect,
{
    /// Initialize the device
    ///
    /// Performs a soft reset, verifies the chip ID, and powers up all three
    /// sensors with the stored configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails or the chip
    /// ID does not read back as 0xD8.
    pub fn init(&mut self) -> Result<(), Error<I::Error>> {
        self.reset()?;

        let id = self.chip_id()?;
        if id != CHIP_ID_VALUE {
            return Err(Error::InvalidDevice(id));
        }

        self.init_accel()?;
        self.init_gyro()?;
        self.init_mag()?;
        Ok(())
    }

    /// Soft-reset the device
    ///
    /// Writes the reset command, settles the serial interface with a dummy
    /// read, and latches the low-level configuration registers. All sensors
    /// come out of reset suspended; call the `init_*` methods afterwards.
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails. There is no
    /// retry; on failure the device state is unknown and the caller should
    /// reset again.
    pub fn reset(&mut self) -> Result<(), Error<I::Error>> {
        self.device.cmd().write(|w| {
            w.set_cmd(SOFT_RESET_CMD);
        })?;

        // One dummy read settles the serial interface after reset; when
        // wired for SPI this also switches the chip out of I2C mode.
        let mut scratch = [0u8; 1];
        self.device
            .interface
            .read_register(SERIAL_SETTLE_ADDR, 8, &mut scratch)?;

        self.device.conf().write(|w| {
            w.set_nvm_prog_en(true);
        })?;

        let spi_en = self.device.interface.spi_en();
        self.device.nv_conf().write(|w| {
            w.set_spi_en(spi_en);
        })?;

        Ok(())
    }

    /// Read the `CHIP_ID` register
    ///
    /// Should return 0xD8 for a valid BMX160
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn chip_id(&mut self) -> Result<u8, Error<I::Error>> {
        let reg = self.device.chip_id().read()?;
        Ok(reg.chip_id())
    }

    /// Power up the accelerometer and apply the stored configuration
    ///
    /// Sets normal power mode, then writes the ODR/bandwidth byte and the
    /// range register. Writing the same configuration twice produces
    /// identical register values.
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn init_accel(&mut self) -> Result<(), Error<I::Error>> {
        self.device.cmd().write(|w| {
            w.set_cmd(AccelPowerMode::Normal.cmd());
        })?;

        let config = self.accel_config;
        self.device.acc_conf().write(|w| {
            w.set_acc_odr(config.odr.bits());
            w.set_acc_bwp(config.bandwidth.bits());
        })?;
        self.device.acc_range().write(|w| {
            w.set_acc_range(config.range.bits());
        })?;

        Ok(())
    }

    /// Store a new accelerometer configuration and apply it
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn configure_accelerometer(
        &mut self,
        config: crate::sensors::AccelConfig,
    ) -> Result<(), Error<I::Error>> {
        self.accel_config = config;
        self.init_accel()
    }

    /// Power up the gyroscope and apply the stored configuration
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn init_gyro(&mut self) -> Result<(), Error<I::Error>> {
        self.device.cmd().write(|w| {
            w.set_cmd(GyroPowerMode::Normal.cmd());
        })?;

        let config = self.gyro_config;
        self.device.gyr_conf().write(|w| {
            w.set_gyr_odr(config.odr.bits());
            w.set_gyr_bwp(config.bandwidth.bits());
        })?;
        self.device.gyr_range().write(|w| {
            w.set_gyr_range(config.range.bits());
        })?;

        Ok(())
    }

    /// Store a new gyroscope configuration and apply it
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn configure_gyroscope(
        &mut self,
        config: crate::sensors::GyroConfig,
    ) -> Result<(), Error<I::Error>> {
        self.gyro_config = config;
        self.init_gyro()
    }

    /// Power up the magnetometer and apply the stored configuration
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn init_mag(&mut self) -> Result<(), Error<I::Error>> {
        self.device.cmd().write(|w| {
            w.set_cmd(MagPowerMode::Normal.cmd());
        })?;

        let config = self.mag_config;
        self.device.mag_conf().write(|w| {
            w.set_mag_odr(config.odr.bits());
        })?;

        Ok(())
    }

    /// Store a new magnetometer configuration and apply it
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn configure_magnetometer(
        &mut self,
        config: crate::sensors::MagConfig,
    ) -> Result<(), Error<I::Error>> {
        self.mag_config = config;
        self.init_mag()
    }

    /// Set the accelerometer power mode
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn set_accel_power_mode(&mut self, mode: AccelPowerMode) -> Result<(), Error<I::Error>> {
        self.device.cmd().write(|w| {
            w.set_cmd(mode.cmd());
        })?;
        Ok(())
    }

    /// Set the gyroscope power mode
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn set_gyro_power_mode(&mut self, mode: GyroPowerMode) -> Result<(), Error<I::Error>> {
        self.device.cmd().write(|w| {
            w.set_cmd(mode.cmd());
        })?;
        Ok(())
    }

    /// Set the magnetometer power mode
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn set_mag_power_mode(&mut self, mode: MagPowerMode) -> Result<(), Error<I::Error>> {
        self.device.cmd().write(|w| {
            w.set_cmd(mode.cmd());
        })?;
        Ok(())
    }

    /// Read accelerometer data
    ///
    /// Returns raw 16-bit values for X, Y, Z axes.
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn read_accel(&mut self) -> Result<AccelData, Error<I::Error>> {
        // Read all 6 bytes in one burst to prevent torn reads
        let mut buffer = [0u8; 6];
        self.device
            .interface
            .read_register(ACCEL_DATA_ADDR, 48, &mut buffer)?;

        let x = i16::from_le_bytes([buffer[0], buffer[1]]);
        let y = i16::from_le_bytes([buffer[2], buffer[3]]);
        let z = i16::from_le_bytes([buffer[4], buffer[5]]);

        Ok(AccelData { x, y, z })
    }

    /// Read gyroscope data
    ///
    /// Returns raw 16-bit values for X, Y, Z axes.
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn read_gyro(&mut self) -> Result<GyroData, Error<I::Error>> {
        // Read all 6 bytes in one burst to prevent torn reads
        let mut buffer = [0u8; 6];
        self.device
            .interface
            .read_register(GYRO_DATA_ADDR, 48, &mut buffer)?;

        let x = i16::from_le_bytes([buffer[0], buffer[1]]);
        let y = i16::from_le_bytes([buffer[2], buffer[3]]);
        let z = i16::from_le_bytes([buffer[4], buffer[5]]);

        Ok(GyroData { x, y, z })
    }

    /// Read magnetometer data
    ///
    /// Returns raw 16-bit values for X, Y, Z axes.
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn read_mag(&mut self) -> Result<MagData, Error<I::Error>> {
        // Read all 6 bytes in one burst to prevent torn reads
        let mut buffer = [0u8; 6];
        self.device
            .interface
            .read_register(MAG_DATA_ADDR, 48, &mut buffer)?;

        let x = i16::from_le_bytes([buffer[0], buffer[1]]);
        let y = i16::from_le_bytes([buffer[2], buffer[3]]);
        let z = i16::from_le_bytes([buffer[4], buffer[5]]);

        Ok(MagData { x, y, z })
    }

    /// Read accelerometer data in m/s²
    ///
    /// Scales the raw reading by the sensitivity of the configured range.
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn read_accelerometer(&mut self) -> Result<crate::sensors::AccelDataMps2, Error<I::Error>> {
        let data = self.read_accel()?;
        let sensitivity = self.accel_config.range.sensitivity();
        Ok(crate::sensors::AccelDataMps2::from_raw(
            data.x,
            data.y,
            data.z,
            sensitivity,
        ))
    }

    /// Read gyroscope data in degrees per second
    ///
    /// Scales the raw reading by the sensitivity of the configured range.
    /// Use [`GyroDataDps::to_radians_per_sec`](crate::sensors::GyroDataDps::to_radians_per_sec)
    /// for rad/s.
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn read_gyroscope(&mut self) -> Result<crate::sensors::GyroDataDps, Error<I::Error>> {
        let data = self.read_gyro()?;
        let sensitivity = self.gyro_config.range.sensitivity();
        Ok(crate::sensors::GyroDataDps::from_raw(
            data.x,
            data.y,
            data.z,
            sensitivity,
        ))
    }

    /// Read magnetometer data in µT
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn read_magnetometer(&mut self) -> Result<crate::sensors::MagDataUT, Error<I::Error>> {
        let data = self.read_mag()?;
        Ok(crate::sensors::MagDataUT::from_raw(
            data.x,
            data.y,
            data.z,
            crate::sensors::MAG_SENSITIVITY,
        ))
    }

    /// Read back the raw accelerometer configuration bytes (`ACC_CONF`,
    /// `ACC_RANGE`)
    ///
    /// Diagnostic helper for verifying what the chip actually latched; not
    /// required for operation.
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn read_accel_conf(&mut self) -> Result<(u8, u8), Error<I::Error>> {
        let mut buffer = [0u8; 2];
        self.device
            .interface
            .read_register(ACCEL_CONF_ADDR, 16, &mut buffer)?;
        Ok((buffer[0], buffer[1]))
    }

    /// Read the power state of all three sensors
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn pmu_status(&mut self) -> Result<PmuStatus, Error<I::Error>> {
        let reg = self.device.pmu_status().read()?;
        Ok(PmuStatus {
            accel: PmuState::from_bits(reg.acc_pmu_status()),
            gyro: PmuState::from_bits(reg.gyr_pmu_status()),
            mag: PmuState::from_bits(reg.mag_pmu_status()),
        })
    }

    /// Read the sensor status flags
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn status(&mut self) -> Result<SensorStatus, Error<I::Error>> {
        let reg = self.device.status().read()?;
        Ok(SensorStatus {
            accel_data_ready: reg.drdy_acc(),
            gyro_data_ready: reg.drdy_gyr(),
            mag_data_ready: reg.drdy_mag(),
            nvm_ready: reg.nvm_rdy(),
            foc_ready: reg.foc_rdy(),
            mag_manual_op: reg.mag_man_op(),
            gyro_self_test_ok: reg.gyr_self_test_ok(),
        })
    }

    /// Read the error flags
    ///
    /// The register is sticky; reading it clears the flags on the chip.
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn error_flags(&mut self) -> Result<ErrorFlags, Error<I::Error>> {
        let reg = self.device.err_reg().read()?;
        Ok(ErrorFlags {
            fatal: reg.fatal_err(),
            error_code: reg.err_code(),
            mag_interface_failure: reg.mag_if_fail_err(),
            data_ready_dropped: reg.drdy_err(),
            mag_data_ready_dropped: reg.mag_drdy_err(),
        })
    }

    /// Read the free-running 24-bit sensor-time counter
    ///
    /// One tick is 39 µs ([`SENSOR_TIME_RESOLUTION_US`]).
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn sensor_time(&mut self) -> Result<u32, Error<I::Error>> {
        let mut buffer = [0u8; 3];
        self.device
            .interface
            .read_register(SENSOR_TIME_ADDR, 24, &mut buffer)?;
        Ok(u32::from_le_bytes([buffer[0], buffer[1], buffer[2], 0]))
    }

    /// Read the temperature sensor
    ///
    /// Returns the raw 16-bit signed value; convert with
    /// [`temperature_to_celsius`](Self::temperature_to_celsius).
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn read_temperature(&mut self) -> Result<i16, Error<I::Error>> {
        let mut buffer = [0u8; 2];
        self.device
            .interface
            .read_register(TEMP_DATA_ADDR, 16, &mut buffer)?;
        Ok(i16::from_le_bytes([buffer[0], buffer[1]]))
    }

    /// Read the temperature in degrees Celsius
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn read_temperature_celsius(&mut self) -> Result<f32, Error<I::Error>> {
        let raw = self.read_temperature()?;
        Ok(Self::temperature_to_celsius(raw))
    }
}

#[cfg(feature = "async")]
impl<I> Bmx160Driver<I>
where
    I: AsyncRegisterInterface<AddressType = u8> + InterfaceSelect,
{
    /// Initialize the device
    ///
    /// Performs a soft reset, verifies the chip ID, and powers up all three
    /// sensors with the stored configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails or the chip
    /// ID does not read back as 0xD8.
    pub async fn init(&mut self) -> Result<(), Error<I::Error>> {
        self.reset().await?;

        let id = self.chip_id().await?;
        if id != CHIP_ID_VALUE {
            return Err(Error::InvalidDevice(id));
        }

        self.init_accel().await?;
        self.init_gyro().await?;
        self.init_mag().await?;
        Ok(())
    }

    /// Soft-reset the device
    ///
    /// Writes the reset command, settles the serial interface with a dummy
    /// read, and latches the low-level configuration registers.
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub async fn reset(&mut self) -> Result<(), Error<I::Error>> {
        self.device
            .cmd()
            .write_async(|w| {
                w.set_cmd(SOFT_RESET_CMD);
            })
            .await?;

        // One dummy read settles the serial interface after reset; when
        // wired for SPI this also switches the chip out of I2C mode.
        let mut scratch = [0u8; 1];
        self.device
            .interface
            .read_register(SERIAL_SETTLE_ADDR, 8, &mut scratch)
            .await?;

        self.device
            .conf()
            .write_async(|w| {
                w.set_nvm_prog_en(true);
            })
            .await?;

        let spi_en = self.device.interface.spi_en();
        self.device
            .nv_conf()
            .write_async(|w| {
                w.set_spi_en(spi_en);
            })
            .await?;

        Ok(())
    }

    /// Read the `CHIP_ID` register
    ///
    /// Should return 0xD8 for a valid BMX160
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub async fn chip_id(&mut self) -> Result<u8, Error<I::Error>> {
        let reg = self.device.chip_id().read_async().await?;
        Ok(reg.chip_id())
    }

    /// Power up the accelerometer and apply the stored configuration
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub async fn init_accel(&mut self) -> Result<(), Error<I::Error>> {
        self.device
            .cmd()
            .write_async(|w| {
                w.set_cmd(AccelPowerMode::Normal.cmd());
            })
            .await?;

        let config = self.accel_config;
        self.device
            .acc_conf()
            .write_async(|w| {
                w.set_acc_odr(config.odr.bits());
                w.set_acc_bwp(config.bandwidth.bits());
            })
            .await?;
        self.device
            .acc_range()
            .write_async(|w| {
                w.set_acc_range(config.range.bits());
            })
            .await?;

        Ok(())
    }

    /// Store a new accelerometer configuration and apply it
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub async fn configure_accelerometer(
        &mut self,
        config: crate::sensors::AccelConfig,
    ) -> Result<(), Error<I::Error>> {
        self.accel_config = config;
        self.init_accel().await
    }

    /// Power up the gyroscope and apply the stored configuration
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub async fn init_gyro(&mut self) -> Result<(), Error<I::Error>> {
        self.device
            .cmd()
            .write_async(|w| {
                w.set_cmd(GyroPowerMode::Normal.cmd());
            })
            .await?;

        let config = self.gyro_config;
        self.device
            .gyr_conf()
            .write_async(|w| {
                w.set_gyr_odr(config.odr.bits());
                w.set_gyr_bwp(config.bandwidth.bits());
            })
            .await?;
        self.device
            .gyr_range()
            .write_async(|w| {
                w.set_gyr_range(config.range.bits());
            })
            .await?;

        Ok(())
    }

    /// Store a new gyroscope configuration and apply it
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub async fn configure_gyroscope(
        &mut self,
        config: crate::sensors::GyroConfig,
    ) -> Result<(), Error<I::Error>> {
        self.gyro_config = config;
        self.init_gyro().await
    }

    /// Power up the magnetometer and apply the stored configuration
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub async fn init_mag(&mut self) -> Result<(), Error<I::Error>> {
        self.device
            .cmd()
            .write_async(|w| {
                w.set_cmd(MagPowerMode::Normal.cmd());
            })
            .await?;

        let config = self.mag_config;
        self.device
            .mag_conf()
            .write_async(|w| {
                w.set_mag_odr(config.odr.bits());
            })
            .await?;

        Ok(())
    }

    /// Store a new magnetometer configuration and apply it
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub async fn configure_magnetometer(
        &mut self,
        config: crate::sensors::MagConfig,
    ) -> Result<(), Error<I::Error>> {
        self.mag_config = config;
        self.init_mag().await
    }

    /// Set the accelerometer power mode
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub async fn set_accel_power_mode(
        &mut self,
        mode: AccelPowerMode,
    ) -> Result<(), Error<I::Error>> {
        self.device
            .cmd()
            .write_async(|w| {
                w.set_cmd(mode.cmd());
            })
            .await?;
        Ok(())
    }

    /// Set the gyroscope power mode
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub async fn set_gyro_power_mode(
        &mut self,
        mode: GyroPowerMode,
    ) -> Result<(), Error<I::Error>> {
        self.device
            .cmd()
            .write_async(|w| {
                w.set_cmd(mode.cmd());
            })
            .await?;
        Ok(())
    }

    /// Set the magnetometer power mode
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub async fn set_mag_power_mode(&mut self, mode: MagPowerMode) -> Result<(), Error<I::Error>> {
        self.device
            .cmd()
            .write_async(|w| {
                w.set_cmd(mode.cmd());
            })
            .await?;
        Ok(())
    }

    /// Read accelerometer data
    ///
    /// Returns raw 16-bit values for X, Y, Z axes.
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub async fn read_accel(&mut self) -> Result<AccelData, Error<I::Error>> {
        // Read all 6 bytes in one burst to prevent torn reads
        let mut buffer = [0u8; 6];
        self.device
            .interface
            .read_register(ACCEL_DATA_ADDR, 48, &mut buffer)
            .await?;

        let x = i16::from_le_bytes([buffer[0], buffer[1]]);
        let y = i16::from_le_bytes([buffer[2], buffer[3]]);
        let z = i16::from_le_bytes([buffer[4], buffer[5]]);

        Ok(AccelData { x, y, z })
    }

    /// Read gyroscope data
    ///
    /// Returns raw 16-bit values for X, Y, Z axes.
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub async fn read_gyro(&mut self) -> Result<GyroData, Error<I::Error>> {
        // Read all 6 bytes in one burst to prevent torn reads
        let mut buffer = [0u8; 6];
        self.device
            .interface
            .read_register(GYRO_DATA_ADDR, 48, &mut buffer)
            .await?;

        let x = i16::from_le_bytes([buffer[0], buffer[1]]);
        let y = i16::from_le_bytes([buffer[2], buffer[3]]);
        let z = i16::from_le_bytes([buffer[4], buffer[5]]);

        Ok(GyroData { x, y, z })
    }

    /// Read magnetometer data
    ///
    /// Returns raw 16-bit values for X, Y, Z axes.
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub async fn read_mag(&mut self) -> Result<MagData, Error<I::Error>> {
        // Read all 6 bytes in one burst to prevent torn reads
        let mut buffer = [0u8; 6];
        self.device
            .interface
            .read_register(MAG_DATA_ADDR, 48, &mut buffer)
            .await?;

        let x = i16::from_le_bytes([buffer[0], buffer[1]]);
        let y = i16::from_le_bytes([buffer[2], buffer[3]]);
        let z = i16::from_le_bytes([buffer[4], buffer[5]]);

        Ok(MagData { x, y, z })
    }

    /// Read accelerometer data in m/s²
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub async fn read_accelerometer(
        &mut self,
    ) -> Result<crate::sensors::AccelDataMps2, Error<I::Error>> {
        let data = self.read_accel().await?;
        let sensitivity = self.accel_config.range.sensitivity();
        Ok(crate::sensors::AccelDataMps2::from_raw(
            data.x,
            data.y,
            data.z,
            sensitivity,
        ))
    }

    /// Read gyroscope data in degrees per second
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub async fn read_gyroscope(&mut self) -> Result<crate::sensors::GyroDataDps, Error<I::Error>> {
        let data = self.read_gyro().await?;
        let sensitivity = self.gyro_config.range.sensitivity();
        Ok(crate::sensors::GyroDataDps::from_raw(
            data.x,
            data.y,
            data.z,
            sensitivity,
        ))
    }

    /// Read magnetometer data in µT
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub async fn read_magnetometer(
        &mut self,
    ) -> Result<crate::sensors::MagDataUT, Error<I::Error>> {
        let data = self.read_mag().await?;
        Ok(crate::sensors::MagDataUT::from_raw(
            data.x,
            data.y,
            data.z,
            crate::sensors::MAG_SENSITIVITY,
        ))
    }

    /// Read back the raw accelerometer configuration bytes (`ACC_CONF`,
    /// `ACC_RANGE`)
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub async fn read_accel_conf(&mut self) -> Result<(u8, u8), Error<I::Error>> {
        let mut buffer = [0u8; 2];
        self.device
            .interface
            .read_register(ACCEL_CONF_ADDR, 16, &mut buffer)
            .await?;
        Ok((buffer[0], buffer[1]))
    }

    /// Read the power state of all three sensors
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub async fn pmu_status(&mut self) -> Result<PmuStatus, Error<I::Error>> {
        let reg = self.device.pmu_status().read_async().await?;
        Ok(PmuStatus {
            accel: PmuState::from_bits(reg.acc_pmu_status()),
            gyro: PmuState::from_bits(reg.gyr_pmu_status()),
            mag: PmuState::from_bits(reg.mag_pmu_status()),
        })
    }

    /// Read the sensor status flags
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub async fn status(&mut self) -> Result<SensorStatus, Error<I::Error>> {
        let reg = self.device.status().read_async().await?;
        Ok(SensorStatus {
            accel_data_ready: reg.drdy_acc(),
            gyro_data_ready: reg.drdy_gyr(),
            mag_data_ready: reg.drdy_mag(),
            nvm_ready: reg.nvm_rdy(),
            foc_ready: reg.foc_rdy(),
            mag_manual_op: reg.mag_man_op(),
            gyro_self_test_ok: reg.gyr_self_test_ok(),
        })
    }

    /// Read the error flags
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub async fn error_flags(&mut self) -> Result<ErrorFlags, Error<I::Error>> {
        let reg = self.device.err_reg().read_async().await?;
        Ok(ErrorFlags {
            fatal: reg.fatal_err(),
            error_code: reg.err_code(),
            mag_interface_failure: reg.mag_if_fail_err(),
            data_ready_dropped: reg.drdy_err(),
            mag_data_ready_dropped: reg.mag_drdy_err(),
        })
    }

    /// Read the free-running 24-bit sensor-time counter
    ///
    /// One tick is 39 µs ([`SENSOR_TIME_RESOLUTION_US`]).
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub async fn sensor_time(&mut self) -> Result<u32, Error<I::Error>> {
        let mut buffer = [0u8; 3];
        self.device
            .interface
            .read_register(SENSOR_TIME_ADDR, 24, &mut buffer)
            .await?;
        Ok(u32::from_le_bytes([buffer[0], buffer[1], buffer[2], 0]))
    }

    /// Read the temperature sensor
    ///
    /// Returns the raw 16-bit signed value; convert with
    /// [`temperature_to_celsius`](Self::temperature_to_celsius).
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub async fn read_temperature(&mut self) -> Result<i16, Error<I::Error>> {
        let mut buffer = [0u8; 2];
        self.device
            .interface
            .read_register(TEMP_DATA_ADDR, 16, &mut buffer)
            .await?;
        Ok(i16::from_le_bytes([buffer[0], buffer[1]]))
    }

    /// Read the temperature in degrees Celsius
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub async fn read_temperature_celsius(&mut self) -> Result<f32, Error<I::Error>> {
        let raw = self.read_temperature().await?;
        Ok(Self::temperature_to_celsius(raw))
    }
}
