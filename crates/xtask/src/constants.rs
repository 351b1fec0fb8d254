/// nRF52840, Cortex-M4F.
pub const TARGET: &str = "thumbv7em-none-eabihf";
/// probe-rs target name.
pub const CHIP: &str = "nRF52840_xxAA";

pub const FIRMWARE_MANIFEST: &str = "crates/ferris-app/Cargo.toml";
pub const FIRMWARE_BIN: &str = "ferris-app";

/// Crates that build and test on the host.
pub const HOST_CRATES: &[&str] = &["mpu6050", "ferris-motion"];
