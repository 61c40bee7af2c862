//! Accelerometer sensor types and configuration
//!
//! Provides types, enums, and utility functions for the BMX160's 3-axis
//! accelerometer.

/// Gravitational constant used to scale accelerometer readings to m/s²
pub const GRAVITY_EARTH: f32 = 9.81;

/// ACC_CONF value used during the accelerometer self-test procedure
/// (±8g range, 1600 Hz ODR)
pub const SELF_TEST_CONFIG: u8 = 0x2C;

/// SELF_TEST register value enabling positive excitation on all axes
pub const SELF_TEST_POSITIVE_EN: u8 = 0x0D;

/// SELF_TEST register value enabling negative excitation on all axes
pub const SELF_TEST_NEGATIVE_EN: u8 = 0x09;

/// Minimum raw difference between positive and negative excitation for a
/// passing self-test (per axis)
pub const SELF_TEST_LIMIT: i16 = 8192;

/// Accelerometer full-scale range
///
/// The discriminant is the `ACC_RANGE` register code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AccelRange {
    /// ±2g range (most sensitive, least range)
    G2 = 0x03,
    /// ±4g range
    G4 = 0x05,
    /// ±8g range
    G8 = 0x08,
    /// ±16g range (least sensitive, most range)
    G16 = 0x0C,
}

impl AccelRange {
    /// Get the sensitivity in LSB/g
    ///
    /// This is used to convert raw sensor values to physical units.
    #[must_use]
    pub const fn sensitivity(self) -> f32 {
        match self {
            Self::G2 => 16384.0, // LSB/g
            Self::G4 => 8192.0,  // LSB/g
            Self::G8 => 4096.0,  // LSB/g
            Self::G16 => 2048.0, // LSB/g
        }
    }

    /// Get the maximum measurable acceleration in g
    #[must_use]
    pub const fn max_value(self) -> u8 {
        match self {
            Self::G2 => 2,
            Self::G4 => 4,
            Self::G8 => 8,
            Self::G16 => 16,
        }
    }

    /// Get the `ACC_RANGE` register code
    #[must_use]
    pub const fn bits(self) -> u8 {
        self as u8
    }
}

/// Accelerometer output data rate
///
/// The discriminant is the ODR code written to `ACC_CONF` bits[3:0].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AccelOdr {
    /// 0.78 Hz
    Hz0_78 = 0x01,
    /// 1.56 Hz
    Hz1_56 = 0x02,
    /// 3.12 Hz
    Hz3_12 = 0x03,
    /// 6.25 Hz
    Hz6_25 = 0x04,
    /// 12.5 Hz
    Hz12_5 = 0x05,
    /// 25 Hz
    Hz25 = 0x06,
    /// 50 Hz
    Hz50 = 0x07,
    /// 100 Hz
    Hz100 = 0x08,
    /// 200 Hz
    Hz200 = 0x09,
    /// 400 Hz
    Hz400 = 0x0A,
    /// 800 Hz
    Hz800 = 0x0B,
    /// 1600 Hz
    Hz1600 = 0x0C,
}

impl AccelOdr {
    /// Get the sample frequency in Hz
    #[must_use]
    pub const fn frequency_hz(self) -> f32 {
        match self {
            Self::Hz0_78 => 0.78,
            Self::Hz1_56 => 1.56,
            Self::Hz3_12 => 3.12,
            Self::Hz6_25 => 6.25,
            Self::Hz12_5 => 12.5,
            Self::Hz25 => 25.0,
            Self::Hz50 => 50.0,
            Self::Hz100 => 100.0,
            Self::Hz200 => 200.0,
            Self::Hz400 => 400.0,
            Self::Hz800 => 800.0,
            Self::Hz1600 => 1600.0,
        }
    }

    /// Get the ODR code written to `ACC_CONF`
    #[must_use]
    pub const fn bits(self) -> u8 {
        self as u8
    }
}

/// Accelerometer bandwidth / averaging setting (`ACC_CONF` bits[6:4])
///
/// In normal power mode this selects the oversampling filter; in low-power
/// mode it selects the number of averaged samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AccelBandwidth {
    /// 4x oversampling / no averaging
    Osr4Avg1 = 0x00,
    /// 2x oversampling / 2-sample averaging
    Osr2Avg2 = 0x01,
    /// Normal filter / 4-sample averaging
    NormalAvg4 = 0x02,
    /// 8-sample averaging
    Avg8 = 0x03,
    /// 16-sample averaging
    Avg16 = 0x04,
    /// 32-sample averaging
    Avg32 = 0x05,
    /// 64-sample averaging
    Avg64 = 0x06,
    /// 128-sample averaging
    Avg128 = 0x07,
}

impl AccelBandwidth {
    /// Get the bandwidth code written to `ACC_CONF`
    #[must_use]
    pub const fn bits(self) -> u8 {
        self as u8
    }
}

/// Accelerometer configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AccelConfig {
    /// Output data rate
    pub odr: AccelOdr,
    /// Bandwidth / averaging filter
    pub bandwidth: AccelBandwidth,
    /// Full-scale range
    pub range: AccelRange,
}

impl Default for AccelConfig {
    fn default() -> Self {
        Self {
            odr: AccelOdr::Hz800,
            bandwidth: AccelBandwidth::Osr2Avg2,
            range: AccelRange::G4,
        }
    }
}

/// Accelerometer data in m/s²
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AccelDataMps2 {
    /// X-axis acceleration in m/s²
    pub x: f32,
    /// Y-axis acceleration in m/s²
    pub y: f32,
    /// Z-axis acceleration in m/s²
    pub z: f32,
}

impl AccelDataMps2 {
    /// Create from raw sensor values
    ///
    /// # Arguments
    ///
    /// * `raw_x` - Raw X-axis value
    /// * `raw_y` - Raw Y-axis value
    /// * `raw_z` - Raw Z-axis value
    /// * `sensitivity` - Sensitivity in LSB/g (from [`AccelRange::sensitivity()`])
    #[must_use]
    pub fn from_raw(raw_x: i16, raw_y: i16, raw_z: i16, sensitivity: f32) -> Self {
        Self {
            x: f32::from(raw_x) / sensitivity * GRAVITY_EARTH,
            y: f32::from(raw_y) / sensitivity * GRAVITY_EARTH,
            z: f32::from(raw_z) / sensitivity * GRAVITY_EARTH,
        }
    }

    /// Get the magnitude of the acceleration vector
    #[must_use]
    pub fn magnitude(&self) -> f32 {
        libm::sqrtf(self.x * self.x + self.y * self.y + self.z * self.z)
    }

    /// Normalize the acceleration vector (make magnitude = 1.0)
    #[must_use]
    pub fn normalize(&self) -> Self {
        let mag = self.magnitude();
        if mag > 0.0 {
            Self {
                x: self.x / mag,
                y: self.y / mag,
                z: self.z / mag,
            }
        } else {
            *self
        }
    }
}
