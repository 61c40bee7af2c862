//! Unit tests for the magnetometer path

use crate::common::test_utils::assert_float_eq;
use crate::common::create_mock_driver;
use bmx160::sensors::{MagConfig, MagOdr, MAG_SENSITIVITY};
use bmx160::MagPowerMode;

#[test]
fn test_init_mag_powers_up_then_configures() {
    let (mut driver, interface) = create_mock_driver();

    driver.init_mag().unwrap();

    // Normal-mode command first, then the ODR write
    assert_eq!(
        interface.writes_to(0x7E),
        vec![MagPowerMode::Normal.cmd()]
    );
    assert_eq!(interface.writes_to(0x44), vec![0x09]);
}

#[test]
fn test_mag_odr_configuration() {
    let (mut driver, interface) = create_mock_driver();

    for (odr, code) in [
        (MagOdr::Hz12_5, 0x05),
        (MagOdr::Hz100, 0x08),
        (MagOdr::Hz800, 0x0B),
    ] {
        driver.configure_magnetometer(MagConfig { odr }).unwrap();
        assert_eq!(interface.get_register(0x44), code);
    }
}

#[test]
fn test_mag_burst_read_is_six_bytes_at_data_start() {
    let (mut driver, interface) = create_mock_driver();

    interface.set_mag_data(1, 2, 3);
    interface.clear_operations();

    driver.read_mag().unwrap();

    let reads: Vec<_> = interface
        .operations()
        .iter()
        .filter_map(|op| match op {
            crate::common::Operation::ReadRegister { address, .. } => Some(*address),
            _ => None,
        })
        .collect();

    assert_eq!(reads, vec![0x04, 0x05, 0x06, 0x07, 0x08, 0x09]);
}

#[test]
fn test_mag_fixed_sensitivity_scaling() {
    let (mut driver, interface) = create_mock_driver();

    interface.set_mag_data(640, 0, -640);

    let data = driver.read_magnetometer().unwrap();
    assert_float_eq(data.x, 640.0 / MAG_SENSITIVITY, 1e-3);
    assert_float_eq(data.y, 0.0, 1e-3);
    assert_float_eq(data.z, -640.0 / MAG_SENSITIVITY, 1e-3);
}
