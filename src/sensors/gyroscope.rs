//! Gyroscope sensor types and configuration
//!
//! Provides types, enums, and utility functions for the BMX160's 3-axis
//! gyroscope.

/// Degrees-to-radians factor applied by [`GyroDataDps::to_radians_per_sec`]
///
/// Kept at the rounded value historically used for this chip's rad/s output
/// rather than `PI / 180.0`; the difference is below `f32` resolution at
/// gyroscope magnitudes.
pub const DEG_TO_RAD: f32 = 0.0174533;

/// Gyroscope full-scale range
///
/// The discriminant is the `GYR_RANGE` register code. Note the inverse
/// ordering: code 0 is the widest range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GyroRange {
    /// ±2000°/s range (least sensitive, most range)
    Dps2000 = 0x00,
    /// ±1000°/s range
    Dps1000 = 0x01,
    /// ±500°/s range
    Dps500 = 0x02,
    /// ±250°/s range
    Dps250 = 0x03,
    /// ±125°/s range (most sensitive, least range)
    Dps125 = 0x04,
}

impl GyroRange {
    /// Get the sensitivity in LSB/(°/s)
    ///
    /// This is used to convert raw sensor values to physical units.
    #[must_use]
    pub const fn sensitivity(self) -> f32 {
        match self {
            Self::Dps2000 => 16.4,  // LSB/(°/s)
            Self::Dps1000 => 32.8,  // LSB/(°/s)
            Self::Dps500 => 65.6,   // LSB/(°/s)
            Self::Dps250 => 131.2,  // LSB/(°/s)
            Self::Dps125 => 262.4,  // LSB/(°/s)
        }
    }

    /// Get the maximum measurable rotation rate in °/s
    #[must_use]
    pub const fn max_value(self) -> u16 {
        match self {
            Self::Dps2000 => 2000,
            Self::Dps1000 => 1000,
            Self::Dps500 => 500,
            Self::Dps250 => 250,
            Self::Dps125 => 125,
        }
    }

    /// Get the `GYR_RANGE` register code
    #[must_use]
    pub const fn bits(self) -> u8 {
        self as u8
    }
}

/// Gyroscope output data rate
///
/// The discriminant is the ODR code written to `GYR_CONF` bits[3:0].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GyroOdr {
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
    /// 3200 Hz
    Hz3200 = 0x0D,
}

impl GyroOdr {
    /// Get the sample frequency in Hz
    #[must_use]
    pub const fn frequency_hz(self) -> f32 {
        match self {
            Self::Hz25 => 25.0,
            Self::Hz50 => 50.0,
            Self::Hz100 => 100.0,
            Self::Hz200 => 200.0,
            Self::Hz400 => 400.0,
            Self::Hz800 => 800.0,
            Self::Hz1600 => 1600.0,
            Self::Hz3200 => 3200.0,
        }
    }

    /// Get the ODR code written to `GYR_CONF`
    #[must_use]
    pub const fn bits(self) -> u8 {
        self as u8
    }
}

/// Gyroscope bandwidth setting (`GYR_CONF` bits[5:4])
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GyroBandwidth {
    /// 4x oversampling
    Osr4 = 0x00,
    /// 2x oversampling
    Osr2 = 0x01,
    /// Normal filter mode
    Normal = 0x02,
}

impl GyroBandwidth {
    /// Get the bandwidth code written to `GYR_CONF`
    #[must_use]
    pub const fn bits(self) -> u8 {
        self as u8
    }
}

/// Gyroscope configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GyroConfig {
    /// Output data rate
    pub odr: GyroOdr,
    /// Bandwidth filter
    pub bandwidth: GyroBandwidth,
    /// Full-scale range
    pub range: GyroRange,
}

impl Default for GyroConfig {
    fn default() -> Self {
        Self {
            odr: GyroOdr::Hz800,
            bandwidth: GyroBandwidth::Osr4,
            range: GyroRange::Dps250,
        }
    }
}

/// Gyroscope data in degrees per second
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GyroDataDps {
    /// X-axis rotation rate in °/s
    pub x: f32,
    /// Y-axis rotation rate in °/s
    pub y: f32,
    /// Z-axis rotation rate in °/s
    pub z: f32,
}

impl GyroDataDps {
    /// Create from raw sensor values
    ///
    /// # Arguments
    ///
    /// * `raw_x` - Raw X-axis value
    /// * `raw_y` - Raw Y-axis value
    /// * `raw_z` - Raw Z-axis value
    /// * `sensitivity` - Sensitivity in LSB/(°/s) (from [`GyroRange::sensitivity()`])
    #[must_use]
    pub fn from_raw(raw_x: i16, raw_y: i16, raw_z: i16, sensitivity: f32) -> Self {
        Self {
            x: f32::from(raw_x) / sensitivity,
            y: f32::from(raw_y) / sensitivity,
            z: f32::from(raw_z) / sensitivity,
        }
    }

    /// Convert to radians per second
    #[must_use]
    pub fn to_radians_per_sec(&self) -> GyroDataRps {
        GyroDataRps {
            x: self.x * DEG_TO_RAD,
            y: self.y * DEG_TO_RAD,
            z: self.z * DEG_TO_RAD,
        }
    }

    /// Get the magnitude of the rotation rate vector
    #[must_use]
    pub fn magnitude(&self) -> f32 {
        libm::sqrtf(self.x * self.x + self.y * self.y + self.z * self.z)
    }
}

/// Gyroscope data in radians per second
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GyroDataRps {
    /// X-axis rotation rate in rad/s
    pub x: f32,
    /// Y-axis rotation rate in rad/s
    pub y: f32,
    /// Z-axis rotation rate in rad/s
    pub z: f32,
}

impl GyroDataRps {
    /// Convert to degrees per second
    #[must_use]
    pub fn to_degrees_per_sec(&self) -> GyroDataDps {
        GyroDataDps {
            x: self.x / DEG_TO_RAD,
            y: self.y / DEG_TO_RAD,
            z: self.z / DEG_TO_RAD,
        }
    }

    /// Get the magnitude of the rotation rate vector
    #[must_use]
    pub fn magnitude(&self) -> f32 {
        libm::sqrtf(self.x * self.x + self.y * self.y + self.z * self.z)
    }
}
