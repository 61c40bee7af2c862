//! Mock interface implementation for testing the BMX160 driver

use bmx160::InterfaceSelect;
#[cfg(feature = "async")]
use device_driver::AsyncRegisterInterface;
use device_driver::RegisterInterface;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// Records operations performed on the mock interface
#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    /// Read register operation
    ReadRegister {
        /// Register address
        address: u8,
        /// Value that was returned
        value: u8,
    },
    /// Write register operation
    WriteRegister {
        /// Register address
        address: u8,
        /// Value that was written
        value: u8,
    },
}

/// Shared state for mock interface (uses interior mutability)
#[derive(Debug)]
struct MockState {
    /// Simulated register values
    registers: HashMap<u8, u8>,

    /// Operations log for verification
    operations: Vec<Operation>,

    /// Failure injection flags
    fail_next_read: bool,
    fail_next_write: bool,

    /// Which primary-interface code this mock reports during reset
    spi_mode: bool,
}

const CHIP_ID_ADDR: u8 = 0x00;
const PMU_STATUS_ADDR: u8 = 0x03;
const MAG_DATA_ADDR: u8 = 0x04;
const GYRO_DATA_ADDR: u8 = 0x0C;
const ACCEL_DATA_ADDR: u8 = 0x12;
const SENSOR_TIME_ADDR: u8 = 0x18;
const TEMP_DATA_ADDR: u8 = 0x20;
const CMD_ADDR: u8 = 0x7E;

const SOFT_RESET_CMD: u8 = 0xB6;

impl MockState {
    fn new() -> Self {
        Self {
            registers: Self::power_on_registers(),
            operations: Vec::new(),
            fail_next_read: false,
            fail_next_write: false,
            spi_mode: true,
        }
    }

    /// Register file at power-on / after soft reset
    fn power_on_registers() -> HashMap<u8, u8> {
        let mut registers = HashMap::new();
        registers.insert(CHIP_ID_ADDR, 0xD8);
        registers
    }

    /// Simulate the chip's reaction to a CMD register write: power-mode
    /// transitions show up in PMU_STATUS, a soft reset restores defaults.
    fn execute_command(&mut self, cmd: u8) {
        let pmu = self.registers.get(&PMU_STATUS_ADDR).copied().unwrap_or(0);
        match cmd {
            SOFT_RESET_CMD => {
                // CHIP_ID is a hardwired, read-only register on real hardware;
                // a soft reset cannot change it. Preserve it across the reset.
                let chip_id = self
                    .registers
                    .get(&CHIP_ID_ADDR)
                    .copied()
                    .unwrap_or(0xD8);
                self.registers = Self::power_on_registers();
                self.registers.insert(CHIP_ID_ADDR, chip_id);
            }
            // Accelerometer: suspend / normal / low power
            0x10..=0x12 => {
                let state = cmd - 0x10;
                self.registers
                    .insert(PMU_STATUS_ADDR, (pmu & !0x30) | (state << 4));
            }
            // Gyroscope: suspend / normal / fast start-up
            0x14 | 0x15 | 0x17 => {
                let state = match cmd {
                    0x14 => 0,
                    0x15 => 1,
                    _ => 3,
                };
                self.registers
                    .insert(PMU_STATUS_ADDR, (pmu & !0x0C) | (state << 2));
            }
            // Magnetometer: suspend / normal / low power
            0x18..=0x1A => {
                let state = cmd - 0x18;
                self.registers.insert(PMU_STATUS_ADDR, (pmu & !0x03) | state);
            }
            _ => {}
        }
    }

    fn set_sample(&mut self, base: u8, x: i16, y: i16, z: i16) {
        let [x_l, x_h] = x.to_le_bytes();
        let [y_l, y_h] = y.to_le_bytes();
        let [z_l, z_h] = z.to_le_bytes();

        self.registers.insert(base, x_l);
        self.registers.insert(base + 1, x_h);
        self.registers.insert(base + 2, y_l);
        self.registers.insert(base + 3, y_h);
        self.registers.insert(base + 4, z_l);
        self.registers.insert(base + 5, z_h);
    }
}

/// Mock interface for testing
#[derive(Clone)]
pub struct MockInterface {
    state: Rc<RefCell<MockState>>,
}

impl MockInterface {
    /// Create a new mock interface with default register values
    #[allow(dead_code)]
    pub fn new() -> Self {
        Self {
            state: Rc::new(RefCell::new(MockState::new())),
        }
    }

    /// Set a register value
    #[allow(dead_code)]
    pub fn set_register(&self, address: u8, value: u8) {
        self.state.borrow_mut().registers.insert(address, value);
    }

    /// Get a register value
    #[allow(dead_code)]
    pub fn get_register(&self, address: u8) -> u8 {
        self.state
            .borrow()
            .registers
            .get(&address)
            .copied()
            .unwrap_or(0)
    }

    /// Set the `CHIP_ID` register value
    #[allow(dead_code)]
    pub fn set_chip_id(&self, value: u8) {
        self.set_register(CHIP_ID_ADDR, value);
    }

    /// Choose which primary-interface code the mock reports (default: SPI)
    #[allow(dead_code)]
    pub fn set_spi_mode(&self, spi: bool) {
        self.state.borrow_mut().spi_mode = spi;
    }

    /// Set accelerometer data (will be returned on next read)
    #[allow(dead_code)]
    pub fn set_accel_data(&self, x: i16, y: i16, z: i16) {
        self.state.borrow_mut().set_sample(ACCEL_DATA_ADDR, x, y, z);
    }

    /// Set gyroscope data (will be returned on next read)
    #[allow(dead_code)]
    pub fn set_gyro_data(&self, x: i16, y: i16, z: i16) {
        self.state.borrow_mut().set_sample(GYRO_DATA_ADDR, x, y, z);
    }

    /// Set magnetometer data (will be returned on next read)
    #[allow(dead_code)]
    pub fn set_mag_data(&self, x: i16, y: i16, z: i16) {
        self.state.borrow_mut().set_sample(MAG_DATA_ADDR, x, y, z);
    }

    /// Set temperature data (will be returned on next read)
    #[allow(dead_code)]
    pub fn set_temperature_data(&self, temp_raw: i16) {
        let [t_l, t_h] = temp_raw.to_le_bytes();
        let mut state = self.state.borrow_mut();
        state.registers.insert(TEMP_DATA_ADDR, t_l);
        state.registers.insert(TEMP_DATA_ADDR + 1, t_h);
    }

    /// Set the 24-bit sensor-time counter
    #[allow(dead_code)]
    pub fn set_sensor_time(&self, ticks: u32) {
        let [b0, b1, b2, _] = ticks.to_le_bytes();
        let mut state = self.state.borrow_mut();
        state.registers.insert(SENSOR_TIME_ADDR, b0);
        state.registers.insert(SENSOR_TIME_ADDR + 1, b1);
        state.registers.insert(SENSOR_TIME_ADDR + 2, b2);
    }

    /// Inject a read failure on the next read operation
    #[allow(dead_code)]
    pub fn fail_next_read(&self) {
        self.state.borrow_mut().fail_next_read = true;
    }

    /// Inject a write failure on the next write operation
    #[allow(dead_code)]
    pub fn fail_next_write(&self) {
        self.state.borrow_mut().fail_next_write = true;
    }

    /// Get the operations log
    #[allow(dead_code)]
    pub fn operations(&self) -> Vec<Operation> {
        self.state.borrow().operations.clone()
    }

    /// Clear the operations log
    #[allow(dead_code)]
    pub fn clear_operations(&self) {
        self.state.borrow_mut().operations.clear();
    }

    /// All values written to one register, in order
    #[allow(dead_code)]
    pub fn writes_to(&self, address: u8) -> Vec<u8> {
        self.state
            .borrow()
            .operations
            .iter()
            .filter_map(|op| match op {
                Operation::WriteRegister { address: a, value } if *a == address => Some(*value),
                _ => None,
            })
            .collect()
    }

    /// Verify a register was written with expected value
    #[allow(dead_code)]
    pub fn verify_register(&self, address: u8, expected: u8) -> bool {
        self.get_register(address) == expected
    }
}

/// Mock error type
#[derive(Debug, Clone, PartialEq)]
pub enum MockError {
    /// Simulated communication error
    Communication,
}

impl InterfaceSelect for MockInterface {
    fn spi_en(&self) -> bool {
        self.state.borrow().spi_mode
    }
}

impl RegisterInterface for MockInterface {
    type Error = MockError;
    type AddressType = u8;

    fn read_register(
        &mut self,
        address: Self::AddressType,
        _size_bits: u32,
        read_data: &mut [u8],
    ) -> Result<(), Self::Error> {
        let mut state = self.state.borrow_mut();

        // Check for injected failure
        if state.fail_next_read {
            state.fail_next_read = false;
            return Err(MockError::Communication);
        }

        for (i, byte) in read_data.iter_mut().enumerate() {
            let reg_addr = address.wrapping_add(i as u8);
            *byte = state.registers.get(&reg_addr).copied().unwrap_or(0);

            state.operations.push(Operation::ReadRegister {
                address: reg_addr,
                value: *byte,
            });
        }

        Ok(())
    }

    fn write_register(
        &mut self,
        address: Self::AddressType,
        _size_bits: u32,
        write_data: &[u8],
    ) -> Result<(), Self::Error> {
        let mut state = self.state.borrow_mut();

        // Check for injected failure
        if state.fail_next_write {
            state.fail_next_write = false;
            return Err(MockError::Communication);
        }

        for (i, &byte) in write_data.iter().enumerate() {
            let reg_addr = address.wrapping_add(i as u8);

            state.operations.push(Operation::WriteRegister {
                address: reg_addr,
                value: byte,
            });

            if reg_addr == CMD_ADDR {
                state.execute_command(byte);
            } else {
                state.registers.insert(reg_addr, byte);
            }
        }

        Ok(())
    }
}

#[cfg(feature = "async")]
impl AsyncRegisterInterface for MockInterface {
    type Error = MockError;
    type AddressType = u8;

    async fn read_register(
        &mut self,
        address: Self::AddressType,
        size_bits: u32,
        read_data: &mut [u8],
    ) -> Result<(), Self::Error> {
        // Delegate to synchronous implementation
        RegisterInterface::read_register(self, address, size_bits, read_data)
    }

    async fn write_register(
        &mut self,
        address: Self::AddressType,
        size_bits: u32,
        write_data: &[u8],
    ) -> Result<(), Self::Error> {
        // Delegate to synchronous implementation
        RegisterInterface::write_register(self, address, size_bits, write_data)
    }
}

impl Default for MockInterface {
    fn default() -> Self {
        Self::new()
    }
}
