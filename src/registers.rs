//! Register definitions for the BMX160
//!
//! The BMX160 has a flat 8-bit register space. Configuration and status
//! registers are defined here; the multi-byte sample areas (magnetometer,
//! gyroscope and accelerometer data, sensor time, temperature) are read as
//! bursts directly through the bus interface, see [`crate::device`].
//!
//! All power-mode transitions and the soft reset go through the `CMD`
//! register (0x7E); the command encodings live in [`crate::power`].

device_driver::create_device!(
    device_name: Bmx160,
    dsl: {
        config {
            type RegisterAddressType = u8;
            type DefaultByteOrder = LE;
        }

        /// CHIP_ID - Device ID Register (0x00)
        /// Expected value: 0xD8
        register ChipId {
            const ADDRESS = 0x00;
            const SIZE_BITS = 8;

            /// Device ID (should read 0xD8)
            chip_id: uint = 0..8,
        },

        /// ERR_REG - Error Register (0x02)
        register ErrReg {
            const ADDRESS = 0x02;
            const SIZE_BITS = 8;

            /// Fatal chip error, reset required
            fatal_err: bool = 0,
            /// Error code (0x1 = command dropped, 0x2 = magnetometer init error, ...)
            err_code: uint = 1..5,
            /// Magnetometer interface failure
            mag_if_fail_err: bool = 5,
            /// Data-ready dropped (accel/gyro)
            drdy_err: bool = 6,
            /// Data-ready dropped (magnetometer)
            mag_drdy_err: bool = 7,
        },

        /// PMU_STATUS - Power Mode Status (0x03)
        ///
        /// Current power state of each sensor, updated once a CMD write
        /// completes.
        register PmuStatus {
            const ADDRESS = 0x03;
            const SIZE_BITS = 8;

            /// Magnetometer power mode (0=suspend, 1=normal, 2=low power)
            mag_pmu_status: uint = 0..2,
            /// Gyroscope power mode (0=suspend, 1=normal, 3=fast start-up)
            gyr_pmu_status: uint = 2..4,
            /// Accelerometer power mode (0=suspend, 1=normal, 2=low power)
            acc_pmu_status: uint = 4..6,
            reserved_7_6: uint = 6..8,
        },

        /// STATUS - Sensor Status (0x1B)
        register Status {
            const ADDRESS = 0x1B;
            const SIZE_BITS = 8;

            reserved_0: uint = 0..1,
            /// Gyroscope self-test completed successfully
            gyr_self_test_ok: bool = 1,
            /// Manual magnetometer interface operation in progress
            mag_man_op: bool = 2,
            /// Fast offset compensation completed
            foc_rdy: bool = 3,
            /// NVM write operation ready
            nvm_rdy: bool = 4,
            /// Magnetometer data ready
            drdy_mag: bool = 5,
            /// Gyroscope data ready
            drdy_gyr: bool = 6,
            /// Accelerometer data ready
            drdy_acc: bool = 7,
        },

        /// ACC_CONF - Accelerometer Configuration (0x40)
        ///
        /// ODR in bits[3:0], bandwidth in bits[6:4]. Bit 7 enables
        /// undersampling in low-power mode and stays cleared in normal mode,
        /// which bounds the packed configuration to 7 bits.
        register AccConf {
            const ADDRESS = 0x40;
            const SIZE_BITS = 8;

            /// Output data rate (0x01 = 25/32 Hz ... 0x0C = 1600 Hz)
            acc_odr: uint = 0..4,
            /// Bandwidth / averaging (OSR4 ... 128-sample averaging)
            acc_bwp: uint = 4..7,
            /// Undersampling enable (low-power mode only)
            acc_us: bool = 7,
        },

        /// ACC_RANGE - Accelerometer Range (0x41)
        register AccRange {
            const ADDRESS = 0x41;
            const SIZE_BITS = 8;

            /// Full-scale range (0x03 = ±2g, 0x05 = ±4g, 0x08 = ±8g, 0x0C = ±16g)
            acc_range: uint = 0..4,
            reserved_7_4: uint = 4..8,
        },

        /// GYR_CONF - Gyroscope Configuration (0x42)
        ///
        /// ODR in bits[3:0], bandwidth in bits[5:4]; bits[7:6] are reserved,
        /// so the packed configuration is 6 bits wide.
        register GyrConf {
            const ADDRESS = 0x42;
            const SIZE_BITS = 8;

            /// Output data rate (0x06 = 25 Hz ... 0x0D = 3200 Hz)
            gyr_odr: uint = 0..4,
            /// Bandwidth (0 = OSR4, 1 = OSR2, 2 = normal)
            gyr_bwp: uint = 4..6,
            reserved_7_6: uint = 6..8,
        },

        /// GYR_RANGE - Gyroscope Range (0x43)
        register GyrRange {
            const ADDRESS = 0x43;
            const SIZE_BITS = 8;

            /// Full-scale range (0x00 = ±2000°/s ... 0x04 = ±125°/s)
            gyr_range: uint = 0..3,
            reserved_7_3: uint = 3..8,
        },

        /// MAG_CONF - Magnetometer Configuration (0x44)
        ///
        /// Only the ODR in bits[3:0]; the upper nibble is reserved, so the
        /// packed configuration is 4 bits wide.
        register MagConf {
            const ADDRESS = 0x44;
            const SIZE_BITS = 8;

            /// Output data rate (0x01 = 25/32 Hz ... 0x0B = 800 Hz)
            mag_odr: uint = 0..4,
            reserved_7_4: uint = 4..8,
        },

        /// CONF - Miscellaneous Configuration (0x6A)
        register Conf {
            const ADDRESS = 0x6A;
            const SIZE_BITS = 8;

            reserved_0: uint = 0..1,
            /// NVM programming enable
            nvm_prog_en: bool = 1,
            reserved_7_2: uint = 2..8,
        },

        /// SELF_TEST - Self-Test Configuration (0x6D)
        ///
        /// Field layout only; this driver does not sequence self-tests.
        /// The accelerometer excitation constants live in
        /// [`crate::sensors::accelerometer`].
        register SelfTest {
            const ADDRESS = 0x6D;
            const SIZE_BITS = 8;

            /// Accelerometer self-test axis enable (0 = off)
            acc_self_test_enable: uint = 0..2,
            /// Accelerometer excitation sign (true = positive)
            acc_self_test_sign: bool = 2,
            /// Accelerometer excitation amplitude (true = high)
            acc_self_test_amp: bool = 3,
            /// Gyroscope built-in self-test trigger
            gyr_self_test_enable: bool = 4,
            reserved_7_5: uint = 5..8,
        },

        /// NV_CONF - Non-Volatile Configuration (0x70)
        ///
        /// Latches the primary serial interface; written during reset with
        /// the code reported by the bus interface.
        register NvConf {
            const ADDRESS = 0x70;
            const SIZE_BITS = 8;

            /// SPI is the primary interface (cleared for I2C)
            spi_en: bool = 0,
            /// I2C watchdog timer period select
            i2c_wdt_sel: bool = 1,
            /// I2C watchdog timer enable
            i2c_wdt_en: bool = 2,
            reserved_7_3: uint = 3..8,
        },

        /// CMD - Command Register (0x7E)
        ///
        /// Power-mode transitions, soft reset, and other one-shot commands.
        register Cmd {
            const ADDRESS = 0x7E;
            const SIZE_BITS = 8;

            /// Command value (see [`crate::power`])
            cmd: uint = 0..8,
        }
    }
);
