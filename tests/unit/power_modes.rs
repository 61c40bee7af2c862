//! Unit tests for power-mode commands and status registers

use crate::common::create_mock_driver;
use bmx160::{AccelPowerMode, GyroPowerMode, MagPowerMode, PmuState};

#[test]
fn test_power_mode_commands_on_the_wire() {
    let (mut driver, interface) = create_mock_driver();

    driver
        .set_accel_power_mode(AccelPowerMode::LowPower)
        .unwrap();
    driver
        .set_gyro_power_mode(GyroPowerMode::FastStartup)
        .unwrap();
    driver.set_mag_power_mode(MagPowerMode::Suspend).unwrap();

    assert_eq!(interface.writes_to(0x7E), vec![0x12, 0x17, 0x18]);
}

#[test]
fn test_pmu_status_tracks_commands() {
    let (mut driver, _interface) = create_mock_driver();

    driver.set_accel_power_mode(AccelPowerMode::Normal).unwrap();
    driver
        .set_gyro_power_mode(GyroPowerMode::FastStartup)
        .unwrap();
    driver.set_mag_power_mode(MagPowerMode::LowPower).unwrap();

    let pmu = driver.pmu_status().unwrap();
    assert_eq!(pmu.accel, PmuState::Normal);
    assert_eq!(pmu.gyro, PmuState::FastStartup);
    assert_eq!(pmu.mag, PmuState::LowPower);
}

#[test]
fn test_soft_reset_suspends_all_sensors() {
    let (mut driver, _interface) = create_mock_driver();

    driver.init().unwrap();
    driver.reset().unwrap();

    let pmu = driver.pmu_status().unwrap();
    assert_eq!(pmu.accel, PmuState::Suspend);
    assert_eq!(pmu.gyro, PmuState::Suspend);
    assert_eq!(pmu.mag, PmuState::Suspend);
}

#[test]
fn test_status_data_ready_flags() {
    let (mut driver, interface) = create_mock_driver();

    interface.set_register(0x1B, 0xE0);

    let status = driver.status().unwrap();
    assert!(status.accel_data_ready);
    assert!(status.gyro_data_ready);
    assert!(status.mag_data_ready);
    assert!(!status.nvm_ready);
    assert!(!status.foc_ready);
}

#[test]
fn test_status_secondary_flags() {
    let (mut driver, interface) = create_mock_driver();

    // nvm_rdy + foc_rdy + gyr_self_test_ok
    interface.set_register(0x1B, 0b0001_1010);

    let status = driver.status().unwrap();
    assert!(status.nvm_ready);
    assert!(status.foc_ready);
    assert!(status.gyro_self_test_ok);
    assert!(!status.mag_manual_op);
    assert!(!status.accel_data_ready);
}

#[test]
fn test_sensor_time_counter() {
    let (mut driver, interface) = create_mock_driver();

    interface.set_sensor_time(0x12_3456);
    assert_eq!(driver.sensor_time().unwrap(), 0x12_3456);

    interface.set_sensor_time(0xFF_FFFF);
    assert_eq!(driver.sensor_time().unwrap(), 0xFF_FFFF);
}
