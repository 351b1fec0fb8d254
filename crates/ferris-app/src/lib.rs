#![no_std]

// This mod MUST go first, so that the others see its macros.
pub(crate) mod fmt;

pub mod battery;
pub mod ble;
pub mod board;
pub mod sensor;
pub mod status;

pub const FW_VERSION: &str = env!("FW_VERSION");

/// GAP name, also carried in the advertising data.
pub const DEVICE_NAME: &str = "Ferris V0.1";
